//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only PostgreSQL persistence lives here. Adapters convert between domain
//! types and storage rows and hold no business logic.

pub mod persistence;

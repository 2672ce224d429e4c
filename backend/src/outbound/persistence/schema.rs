//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Column names
//! that clash with SQL keywords or use camel case are renamed with
//! `sql_name` so Rust code sees snake case.

diesel::table! {
    /// Postal addresses shared by customers and jobs.
    address (idaddress) {
        idaddress -> Int4,
        house_num_name -> Nullable<Varchar>,
        street_name -> Nullable<Varchar>,
        postcode -> Nullable<Varchar>,
        latitude -> Nullable<Varchar>,
        longitude -> Nullable<Varchar>,
    }
}

diesel::table! {
    customer (idcustomer) {
        idcustomer -> Int4,
        org_id -> Nullable<Int4>,
        /// Invoice address.
        address_id -> Nullable<Int4>,
        forename -> Nullable<Varchar>,
        surname -> Nullable<Varchar>,
        /// Creation time in UTC, defaulted by the database.
        #[sql_name = "timestamp"]
        created_at -> Nullable<Timestamp>,
        email -> Nullable<Varchar>,
        /// Digits only.
        telephone -> Nullable<Varchar>,
    }
}

diesel::table! {
    zone (idzone) {
        idzone -> Int4,
        org_id -> Nullable<Int4>,
        name -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Recurring jobs. `zone_id` carries no foreign key.
    jobs (idjob) {
        idjob -> Int4,
        price -> Nullable<Numeric>,
        #[sql_name = "dateLastDone"]
        date_last_done -> Nullable<Date>,
        /// Days between visits.
        frequency -> Nullable<Int4>,
        org_id -> Nullable<Int4>,
        address_id -> Nullable<Int4>,
        zone_id -> Nullable<Int4>,
        customer_id -> Nullable<Int4>,
        info -> Nullable<Text>,
        date_next_due -> Nullable<Timestamp>,
        payment_type_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Completion ledger; rows cascade with their job.
    job_history (idjob_history) {
        idjob_history -> Int4,
        job_id -> Int4,
        #[sql_name = "timestamp"]
        completed_at -> Nullable<Timestamp>,
        paid -> Bool,
        payment_type_id -> Nullable<Int4>,
    }
}

diesel::joinable!(job_history -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(address, customer, job_history, jobs, zone);

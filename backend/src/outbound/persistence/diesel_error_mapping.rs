//! Shared mapping from pool and Diesel failures into repository port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    AddressRepositoryError, CustomerRepositoryError, JobHistoryRepositoryError,
    JobRepositoryError, ZoneRepositoryError,
};

use super::pool::PoolError;

/// Constructors every repository error enum provides.
pub(crate) trait RepositoryFailure: Sized {
    fn from_connection(message: String) -> Self;
    fn from_query(message: String) -> Self;
    fn from_constraint(message: String) -> Self;
}

macro_rules! impl_repository_failure {
    ($($error:ty),* $(,)?) => {
        $(
            impl RepositoryFailure for $error {
                fn from_connection(message: String) -> Self {
                    Self::connection(message)
                }

                fn from_query(message: String) -> Self {
                    Self::query(message)
                }

                fn from_constraint(message: String) -> Self {
                    Self::constraint(message)
                }
            }
        )*
    };
}

impl_repository_failure!(
    CustomerRepositoryError,
    AddressRepositoryError,
    ZoneRepositoryError,
    JobRepositoryError,
    JobHistoryRepositoryError,
);

/// Pool checkout or build failures are connection errors.
pub(crate) fn map_pool_error<E: RepositoryFailure>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::from_connection(message)
}

/// Classify a Diesel error.
///
/// Integrity violations become constraint errors named after the violated
/// constraint; a closed connection is a connection error; everything else is
/// a query error. Database detail is logged at debug level and kept out of
/// the returned message.
pub(crate) fn map_diesel_error<E: RepositoryFailure>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation),
            info,
        ) => {
            let constraint = info.constraint_name().unwrap_or("unnamed constraint");
            E::from_constraint(format!("{kind:?} on {constraint}"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::from_connection("database connection error".to_owned())
        }
        DieselError::NotFound => E::from_query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::from_query("database query error".to_owned()),
        _ => E::from_query("database error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct FakeInfo(Option<&'static str>);

    impl diesel::result::DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            "violation"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.0
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(FakeInfo(constraint)))
    }

    #[rstest]
    fn foreign_key_violation_names_constraint() {
        let error: CustomerRepositoryError = map_diesel_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("jobs_customer_id_fkey"),
        ));
        assert!(matches!(
            error,
            CustomerRepositoryError::Constraint { ref message } if message.contains("jobs_customer_id_fkey")
        ));
    }

    #[rstest]
    #[case(DatabaseErrorKind::CheckViolation)]
    #[case(DatabaseErrorKind::UniqueViolation)]
    #[case(DatabaseErrorKind::NotNullViolation)]
    fn integrity_kinds_are_constraints(#[case] kind: DatabaseErrorKind) {
        let error: JobRepositoryError = map_diesel_error(database_error(kind, None));
        assert!(matches!(error, JobRepositoryError::Constraint { .. }));
    }

    #[rstest]
    fn closed_connection_is_connection_error() {
        let error: ZoneRepositoryError =
            map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(error, ZoneRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn not_found_is_query_error() {
        let error: JobHistoryRepositoryError = map_diesel_error(DieselError::NotFound);
        assert_eq!(error, JobHistoryRepositoryError::query("record not found"));
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let error: AddressRepositoryError = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, AddressRepositoryError::connection("timed out"));
    }
}

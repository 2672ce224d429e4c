//! Conversions from repository port errors into [`Error`].
//!
//! Connection failures become `ServiceUnavailable`, constraint violations
//! become `Conflict`, and anything else is `InternalError`.

use super::Error;
use super::ports::{
    AddressRepositoryError, CustomerRepositoryError, JobHistoryRepositoryError,
    JobRepositoryError, ZoneRepositoryError,
};

macro_rules! map_repository_errors {
    ($($error:ident => $subject:literal),* $(,)?) => {
        $(
            impl From<$error> for Error {
                fn from(error: $error) -> Self {
                    match error {
                        $error::Connection { message } => Error::service_unavailable(format!(
                            "{} repository unavailable: {message}",
                            $subject
                        )),
                        $error::Constraint { message } => {
                            tracing::warn!(repository = $subject, %message, "write rejected by constraint");
                            Error::conflict(format!(
                                "the {} change conflicts with related records",
                                $subject
                            ))
                        }
                        $error::Query { message } => Error::internal(format!(
                            "{} repository error: {message}",
                            $subject
                        )),
                    }
                }
            }
        )*
    };
}

map_repository_errors! {
    CustomerRepositoryError => "customer",
    AddressRepositoryError => "address",
    ZoneRepositoryError => "zone",
    JobRepositoryError => "job",
    JobHistoryRepositoryError => "job history",
}

use log::{error, warn};
use mongodb::error::Error as DbError;
use rocket::{http::Status, response::Responder, Request};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Result type returned by route handlers.
pub type ApiResult<T> = std::result::Result<T, Failure>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(what: impl Into<String>) -> Self {
        Self::Validation(what.into())
    }

    /// The status this error surfaces as when no endpoint-specific mapping applies.
    pub fn status(&self) -> Status {
        match self {
            Self::Db(_) => Status::InternalServerError,
            Self::NotFound(_) => Status::NotFound,
            Self::Validation(_) => Status::UnprocessableEntity,
        }
    }

    /// Collapse this error into the given externally visible status.
    pub fn surface_as(self, status: Status) -> Failure {
        Failure {
            status,
            cause: self,
        }
    }
}

/// An error that has been assigned the status it is reported with.
///
/// The internal cause is logged but never sent to the client; the JSON error
/// body is produced by the catcher registered for the status.
#[derive(Debug)]
pub struct Failure {
    pub status: Status,
    pub cause: Error,
}

impl From<Error> for Failure {
    fn from(cause: Error) -> Self {
        let status = cause.status();
        cause.surface_as(status)
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Failure {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'o> {
        match self.cause {
            Error::Db(ref err) => error!("Store failure reported as {}: {err}", self.status),
            ref cause => warn!("{cause}; reported as {}", self.status),
        }
        Err(self.status)
    }
}

/// Map every failure of an endpoint's guarded region onto a single status.
pub trait OrStatus<T> {
    fn or_status(self, status: Status) -> ApiResult<T>;
}

impl<T, E> OrStatus<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn or_status(self, status: Status) -> ApiResult<T> {
        self.map_err(|err| err.into().surface_as(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_statuses() {
        assert_eq!(Error::not_found("x").status(), Status::NotFound);
        assert_eq!(
            Error::validation("x").status(),
            Status::UnprocessableEntity
        );
    }

    #[test]
    fn guarded_region_collapses_to_one_status() {
        let missing: Result<()> = Err(Error::not_found("Question 1000"));
        let failure = missing.or_status(Status::UnprocessableEntity).unwrap_err();
        assert_eq!(failure.status, Status::UnprocessableEntity);
        assert!(matches!(failure.cause, Error::NotFound(_)));

        let fine: Result<u32> = Ok(7);
        assert_eq!(fine.or_status(Status::NotFound).unwrap(), 7);
    }

    #[test]
    fn failure_from_error_keeps_default_status() {
        let failure: Failure = Error::validation("empty answer").into();
        assert_eq!(failure.status, Status::UnprocessableEntity);
    }
}

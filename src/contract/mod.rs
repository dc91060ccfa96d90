//! Design-by-contract failures shared by names and the file tree.
//!
//! Every public operation reports failures as one of three kinds. Callers
//! branch on [`Error::kind`], never on the rendered message.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The caller passed an argument the operation does not accept.
    #[snafu(display("Illegal argument: {message}"))]
    IllegalArgumentError { message: String },
    /// The implementation broke its own postcondition or invariant.
    #[snafu(display("Invalid state: {message}"))]
    InvalidStateError { message: String },
    /// An operation that should not fail hit an internal failure.
    #[snafu(display("Service failure: {message}"))]
    ServiceFailureError {
        message: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Precondition,
    Postcondition,
    Service,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IllegalArgumentError { .. } => ErrorKind::Precondition,
            Error::InvalidStateError { .. } => ErrorKind::Postcondition,
            Error::ServiceFailureError { .. } => ErrorKind::Service,
        }
    }

    /// The failure wrapped by a service failure, if any.
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Error::ServiceFailureError { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

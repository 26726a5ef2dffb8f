//!Error types.

use std::error;
use std::fmt;
use std::result;

///Shorthand for results with the crate's `Error` type.
pub type Result<T> = result::Result<T, Error>;

///Errors caused by misuse of a `Request`.
///
///None of these are meant to be retried. They are reported to the caller
///as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    ///The URI given to `Request::from_uri` could not be used.
    InvalidUri {
        ///The rejected URI.
        uri: String,
        ///Why it was rejected.
        reason: String
    },

    ///An attempt was made to write into one of the transport stores through
    ///the generic accessor. Use `Request::set_param` instead.
    ReadOnlySource {
        ///The key that was about to be written.
        key: String
    },

    ///A header was looked up with an empty name.
    EmptyHeaderName
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidUri { ref uri, ref reason } => write!(f, "invalid URI '{}': {}", uri, reason),
            Error::ReadOnlySource { ref key } => write!(f, "cannot set '{}': setting values in the transport stores is not allowed, use set_param", key),
            Error::EmptyHeaderName => write!(f, "an HTTP header name is required")
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display_names_the_key() {
        let error = Error::ReadOnlySource { key: "a".to_owned() };
        assert!(error.to_string().contains("'a'"));
    }

    #[test]
    fn display_invalid_uri() {
        let error = Error::InvalidUri { uri: "nope".to_owned(), reason: "relative URL without a base".to_owned() };
        assert_eq!(error.to_string(), "invalid URI 'nope': relative URL without a base");
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by certificate generation and context configuration.
///
/// Every failure is deterministic for a given input and is reported to the
/// immediate caller; nothing is retried or logged internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Error due to invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A context passed to `configure_trust`/`configure_cert` matched
    /// neither supported TLS-context shape. Carries the concrete type name.
    #[error("unrecognized context type `{0}`")]
    UnsupportedContext(&'static str),

    /// Presentation was attempted with a certificate chain longer than one
    /// entry. Issuance never produces such chains; this guards the
    /// single-level hierarchy invariant.
    #[error("certificate chain has {0} entries, presentation supports exactly one")]
    UnsupportedChainLength(usize),

    /// Error during data encoding.
    #[error("failed to encode data: {0}")]
    Encoding(String),

    /// Error during data decoding.
    #[error("failed to decode data: {0}")]
    Decoding(String),

    /// Error raised by the TLS context being configured.
    #[error("context configuration failed: {0}")]
    Context(String),

    /// Filesystem error while writing key/certificate material.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for Error {
    fn from(err: pkcs8::spki::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<openssl::error::ErrorStack> for Error {
    fn from(err: openssl::error::ErrorStack) -> Self {
        Error::Context(err.to_string())
    }
}

impl From<native_tls::Error> for Error {
    fn from(err: native_tls::Error) -> Self {
        Error::Context(err.to_string())
    }
}

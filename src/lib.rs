//! # faketlscerts: throwaway PKI for TLS tests
//!
//! This crate mints a self-signed certificate authority and the server
//! certificates it issues, so test suites can exercise TLS code paths
//! without touching real-world PKI. The generated material is deliberately
//! worthless outside a test run: a fixed fast key algorithm, a display name
//! that advertises the generator, and no revocation story.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use faketlscerts::CA;
//!
//! # fn main() -> Result<(), faketlscerts::error::Error> {
//! let ca = CA::new()?;
//! let leaf = ca.issue_server_cert(&["example.org"])?;
//!
//! // Server side: present the leaf certificate.
//! let mut acceptor =
//!     openssl::ssl::SslAcceptor::mozilla_intermediate(openssl::ssl::SslMethod::tls()).unwrap();
//! leaf.configure_cert(&mut acceptor)?;
//!
//! // Client side: trust the authority.
//! let mut connector = native_tls::TlsConnector::builder();
//! ca.configure_trust(&mut connector)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported TLS contexts
//!
//! [`CA::configure_trust`] and [`LeafCert::configure_cert`] accept a mutable
//! reference to any of:
//!
//! - `openssl::ssl::SslContextBuilder` (and the acceptor/connector builders
//!   wrapping it),
//! - `native_tls::TlsConnectorBuilder`.
//!
//! The context is mutated in place; anything else fails with
//! [`error::Error::UnsupportedContext`] naming the rejected type.
//!
//! ## Module organization
//!
//! - [`ca`]: the certificate authority and issuance
//! - [`leaf`]: issued certificates and identity injection
//! - [`blob`]: the opaque PEM byte container
//! - [`builder`]: common certificate assembly and signing
//! - [`extensions`]: typed X.509 extension encode/decode
//! - [`key`]: the fixed-algorithm key pair
//! - [`error`]: error types

pub mod blob;
pub mod builder;
pub mod ca;
mod context;
pub mod error;
pub mod extensions;
pub mod key;
pub mod leaf;

pub use blob::Blob;
pub use ca::CA;
pub use leaf::LeafCert;

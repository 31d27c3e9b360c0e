use std::any::Any;

use crate::blob::Blob;
use crate::context;
use crate::error::{Error, Result};

/// A server (or client) certificate issued by a [`crate::CA`].
///
/// There is no public constructor; instances come from
/// [`crate::CA::issue_server_cert`].
#[derive(Debug)]
pub struct LeafCert {
    /// The PEM-encoded private key for this certificate.
    pub private_key_pem: Blob,
    /// The certificate chain. Entry 0 is the certificate itself; any later
    /// entries would be intermediates on the way to the root. The issuing
    /// hierarchy is flat today, so the chain always has exactly one entry.
    pub cert_chain_pems: Vec<Blob>,
    /// The private key concatenated with the certificate chain, for APIs
    /// that want a single combined bundle.
    pub private_key_and_cert_chain_pem: Blob,
}

impl LeafCert {
    pub(crate) fn new(private_key_pem: Blob, cert_pem: Blob) -> Self {
        let mut combined = private_key_pem.bytes().to_vec();
        combined.extend_from_slice(cert_pem.bytes());
        LeafCert {
            private_key_pem,
            cert_chain_pems: vec![cert_pem],
            private_key_and_cert_chain_pem: Blob::new(combined),
        }
    }

    /// Configure `ctx` to present this certificate as its identity.
    ///
    /// `ctx` may be any supported TLS-context builder (see the crate docs);
    /// it is mutated in place. Unrecognized context types are rejected with
    /// [`Error::UnsupportedContext`].
    pub fn configure_cert<C: Any>(&self, ctx: &mut C) -> Result<()> {
        // Issuance never builds longer chains; if one ever shows up the
        // injection code below would silently present an incomplete chain,
        // so refuse before touching the context.
        if self.cert_chain_pems.len() != 1 {
            return Err(Error::UnsupportedChainLength(self.cert_chain_pems.len()));
        }
        let shape = context::classify(ctx)?;
        context::set_identity(shape, self)
    }
}

use std::any::Any;

use x509_cert::name::Name;

use crate::blob::Blob;
use crate::builder::{CertificateBuilder, display_name};
use crate::context;
use crate::error::{Error, Result};
use crate::extensions::{AuthorityKeyIdentifier, BasicConstraints, SubjectAltName};
use crate::key::KeyPair;
use crate::leaf::LeafCert;

/// A throwaway certificate authority.
///
/// Construction generates a fresh key pair and a self-signed root
/// certificate; afterwards the authority is immutable. Leaf certificates
/// come out of [`CA::issue_server_cert`], and the root can be pushed into a
/// verifier context with [`CA::configure_trust`].
pub struct CA {
    key: KeyPair,
    subject: Name,
    subject_key_id: Vec<u8>,
    cert_pem: Blob,
}

impl CA {
    pub fn new() -> Result<CA> {
        let key = KeyPair::generate();
        let subject = display_name("Testing CA")?;

        let mut builder =
            CertificateBuilder::new(subject.clone(), subject.clone(), key.verifying_key())?;
        builder.push_extension(
            &BasicConstraints {
                is_ca: true,
                max_path_length: Some(9),
            },
            true,
        )?;
        let subject_key_id = builder.subject_key_identifier().to_vec();
        let cert = builder.sign(&key)?;

        Ok(CA {
            key,
            subject,
            subject_key_id,
            cert_pem: Blob::new(cert.to_pem()?.into_bytes()),
        })
    }

    /// The PEM-encoded root certificate. Add this to a trust store to trust
    /// certificates issued by this authority.
    pub fn cert_pem(&self) -> &Blob {
        &self.cert_pem
    }

    /// Issue a server certificate valid for the given hostnames.
    ///
    /// At least one hostname is required; each becomes a DNS Subject
    /// Alternative Name entry, in the order given. The leaf gets its own
    /// fresh key pair, independent of the authority's.
    pub fn issue_server_cert(&self, hostnames: &[&str]) -> Result<LeafCert> {
        if hostnames.is_empty() {
            return Err(Error::InvalidInput(
                "must specify at least one hostname".into(),
            ));
        }

        let key = KeyPair::generate();
        let mut builder = CertificateBuilder::new(
            display_name("Testing cert")?,
            self.subject.clone(),
            key.verifying_key(),
        )?;
        builder.push_extension(
            &BasicConstraints {
                is_ca: false,
                max_path_length: None,
            },
            true,
        )?;
        builder.push_extension(
            &AuthorityKeyIdentifier {
                key_identifier: self.subject_key_id.clone(),
            },
            false,
        )?;
        builder.push_extension(
            &SubjectAltName {
                dns_names: hostnames.iter().map(|h| h.to_string()).collect(),
            },
            true,
        )?;
        let cert = builder.sign(&self.key)?;

        Ok(LeafCert::new(
            Blob::new(key.to_pkcs8_pem()?.into_bytes()),
            Blob::new(cert.to_pem()?.into_bytes()),
        ))
    }

    /// Configure `ctx` to trust certificates signed by this authority.
    ///
    /// `ctx` may be any supported TLS-context builder (see the crate docs);
    /// it is mutated in place. Unrecognized context types are rejected with
    /// [`Error::UnsupportedContext`].
    pub fn configure_trust<C: Any>(&self, ctx: &mut C) -> Result<()> {
        let shape = context::classify(ctx)?;
        context::add_trust_root(shape, self.cert_pem.bytes())
    }
}

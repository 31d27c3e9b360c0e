//! Typed encode/decode for the X.509 extensions this crate emits.
//!
//! Only the extensions that actually appear on generated certificates are
//! modeled: basic constraints, the subject/authority key identifier pair
//! that links a leaf to its issuing CA, and DNS subject alternative names.

use der::asn1::{Ia5String, OctetString};
use der::oid::{AssociatedOid, ObjectIdentifier};
use der::{Decode, Encode};
use x509_cert::ext::pkix::name::GeneralName;

use crate::error::{Error, Result};

/// An extension that can be encoded into, and decoded from, the DER value
/// of an `x509_cert::ext::Extension`.
pub trait X509Extension {
    /// The extension's object identifier.
    const OID: ObjectIdentifier;

    /// Encode the extension into its DER value.
    fn to_der_value(&self) -> Result<Vec<u8>>;

    /// Decode the extension from a DER value.
    fn from_der_value(value: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

/// Basic Constraints: whether the certificate may act as a CA and, for CAs,
/// how deep a chain it may sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u8>,
}

impl X509Extension for BasicConstraints {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::BasicConstraints::OID;

    fn to_der_value(&self) -> Result<Vec<u8>> {
        let bc = x509_cert::ext::pkix::BasicConstraints {
            ca: self.is_ca,
            path_len_constraint: self.max_path_length,
        };
        Ok(bc.to_der()?)
    }

    fn from_der_value(value: &[u8]) -> Result<Self> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(value)
            .map_err(|e| Error::Decoding(e.to_string()))?;
        Ok(BasicConstraints {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint,
        })
    }
}

/// Subject Key Identifier: a digest of the certificate's own public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectKeyIdentifier {
    pub key_identifier: Vec<u8>,
}

impl X509Extension for SubjectKeyIdentifier {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::SubjectKeyIdentifier::OID;

    fn to_der_value(&self) -> Result<Vec<u8>> {
        let ski = x509_cert::ext::pkix::SubjectKeyIdentifier(OctetString::new(
            self.key_identifier.as_slice(),
        )?);
        Ok(ski.to_der()?)
    }

    fn from_der_value(value: &[u8]) -> Result<Self> {
        let ski = x509_cert::ext::pkix::SubjectKeyIdentifier::from_der(value)
            .map_err(|e| Error::Decoding(e.to_string()))?;
        Ok(SubjectKeyIdentifier {
            key_identifier: ski.0.as_bytes().to_vec(),
        })
    }
}

/// Authority Key Identifier: the issuing CA's subject key identifier,
/// copied onto the certificates it signs. Only the key-identifier field is
/// populated; issuer name and serial are redundant for a one-level chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Vec<u8>,
}

impl X509Extension for AuthorityKeyIdentifier {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::AuthorityKeyIdentifier::OID;

    fn to_der_value(&self) -> Result<Vec<u8>> {
        let aki = x509_cert::ext::pkix::AuthorityKeyIdentifier {
            key_identifier: Some(OctetString::new(self.key_identifier.as_slice())?),
            authority_cert_issuer: None,
            authority_cert_serial_number: None,
        };
        Ok(aki.to_der()?)
    }

    fn from_der_value(value: &[u8]) -> Result<Self> {
        let aki = x509_cert::ext::pkix::AuthorityKeyIdentifier::from_der(value)
            .map_err(|e| Error::Decoding(e.to_string()))?;
        let key_identifier = aki
            .key_identifier
            .ok_or_else(|| Error::Decoding("authority key identifier has no key id".into()))?;
        Ok(AuthorityKeyIdentifier {
            key_identifier: key_identifier.as_bytes().to_vec(),
        })
    }
}

/// Subject Alternative Name restricted to DNS entries, order preserving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    pub dns_names: Vec<String>,
}

impl X509Extension for SubjectAltName {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::SubjectAltName::OID;

    fn to_der_value(&self) -> Result<Vec<u8>> {
        let names = self
            .dns_names
            .iter()
            .map(|name| {
                Ia5String::new(name)
                    .map(GeneralName::DnsName)
                    .map_err(|e| Error::InvalidInput(format!("hostname {name:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let san = x509_cert::ext::pkix::SubjectAltName(names);
        Ok(san.to_der()?)
    }

    fn from_der_value(value: &[u8]) -> Result<Self> {
        let san = x509_cert::ext::pkix::SubjectAltName::from_der(value)
            .map_err(|e| Error::Decoding(e.to_string()))?;
        let dns_names = san
            .0
            .iter()
            .map(|name| match name {
                GeneralName::DnsName(dns) => Ok(dns.to_string()),
                other => Err(Error::Decoding(format!(
                    "unsupported general name in SAN: {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SubjectAltName { dns_names })
    }
}

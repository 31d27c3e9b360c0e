//! Assembly of the fields every generated certificate shares.
//!
//! [`CertificateBuilder`] produces the unsigned structure (names, validity
//! window, serial number, public key, subject key identifier); the caller
//! adds the type-specific extensions and signs.

use der::asn1::{BitString, GeneralizedTime, OctetString, UtcTime};
use der::{Encode, EncodePem};
use sha1::{Digest, Sha1};
use time::{Duration, OffsetDateTime};
use x509_cert::certificate::{CertificateInner, TbsCertificateInner, Version};
use x509_cert::ext::Extension;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::time::{Time, Validity};

use crate::error::{Error, Result};
use crate::extensions::{SubjectKeyIdentifier, X509Extension};
use crate::key::KeyPair;

/// Suffix appended to every display name so stray test certificates can be
/// traced back to their generator. Debugging aid only, not a security
/// property.
const GENERATOR_TAG: &str = concat!(" (generated by faketlscerts v", env!("CARGO_PKG_VERSION"), ")");

/// Build a single-CN distinguished name carrying the generator tag.
pub fn display_name(text: &str) -> Result<Name> {
    use core::str::FromStr;
    Name::from_str(&format!("CN={text}{GENERATOR_TAG}"))
        .map_err(|e| Error::Encoding(e.to_string()))
}

/// A signed X.509 certificate, encodable as DER or PEM.
#[derive(Debug, Clone)]
pub struct Certificate {
    pub inner: CertificateInner,
}

impl Certificate {
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.inner.to_der()?)
    }

    pub fn to_pem(&self) -> Result<String> {
        Ok(self.inner.to_pem(pkcs8::LineEnding::LF)?)
    }
}

/// The common, unsigned portion of a certificate.
///
/// Construction fixes the validity window to one day in the past (clock
/// skew padding, the bound is inclusive) through a thousand years out, draws
/// a random serial number, and attaches a non-critical Subject Key
/// Identifier computed from the subject public key.
pub struct CertificateBuilder {
    subject: Name,
    issuer: Name,
    serial_number: SerialNumber,
    not_before: OffsetDateTime,
    not_after: OffsetDateTime,
    spki: SubjectPublicKeyInfoOwned,
    extensions: Vec<Extension>,
    subject_key_id: Vec<u8>,
}

impl CertificateBuilder {
    pub fn new(subject: Name, issuer: Name, public_key: &p256::ecdsa::VerifyingKey) -> Result<Self> {
        let now = OffsetDateTime::now_utc();
        let spki = SubjectPublicKeyInfoOwned::from_key(*public_key)?;

        // RFC 5280 method 1: SHA-1 over the subjectPublicKey bit string.
        let subject_key_id = Sha1::digest(spki.subject_public_key.raw_bytes()).to_vec();

        let ski = SubjectKeyIdentifier {
            key_identifier: subject_key_id.clone(),
        };

        let mut builder = CertificateBuilder {
            subject,
            issuer,
            serial_number: random_serial_number()?,
            not_before: now - Duration::days(1),
            not_after: now + Duration::days(365 * 1000),
            spki,
            extensions: Vec::new(),
            subject_key_id,
        };
        builder.push_extension(&ski, false)?;
        Ok(builder)
    }

    /// The Subject Key Identifier attached at construction. The CA retains
    /// this to stamp Authority Key Identifiers onto the leaves it issues.
    pub fn subject_key_identifier(&self) -> &[u8] {
        &self.subject_key_id
    }

    pub fn push_extension<E: X509Extension>(&mut self, ext: &E, critical: bool) -> Result<()> {
        self.extensions.push(Extension {
            extn_id: E::OID,
            critical,
            extn_value: OctetString::new(ext.to_der_value()?)?,
        });
        Ok(())
    }

    /// Sign with ECDSA-with-SHA-256 and assemble the final certificate.
    pub fn sign(self, key: &KeyPair) -> Result<Certificate> {
        let signature_algorithm = AlgorithmIdentifierOwned {
            oid: const_oid::db::rfc5912::ECDSA_WITH_SHA_256,
            parameters: None,
        };

        let validity = Validity {
            not_before: Time::UtcTime(UtcTime::from_unix_duration(
                core::time::Duration::from_secs(self.not_before.unix_timestamp() as u64),
            )?),
            // Past 2049, so RFC 5280 requires GeneralizedTime here.
            not_after: Time::GeneralTime(GeneralizedTime::from_unix_duration(
                core::time::Duration::from_secs(self.not_after.unix_timestamp() as u64),
            )?),
        };

        let tbs_certificate = TbsCertificateInner {
            version: Version::V3,
            serial_number: self.serial_number,
            signature: signature_algorithm.clone(),
            issuer: self.issuer,
            validity,
            subject: self.subject,
            subject_public_key_info: self.spki,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: Some(self.extensions),
        };

        let signature = key.sign_der(&tbs_certificate.to_der()?);

        Ok(Certificate {
            inner: CertificateInner {
                tbs_certificate,
                signature_algorithm,
                signature: BitString::from_bytes(&signature)?,
            },
        })
    }
}

/// A random 16-byte serial number, constrained to a positive DER INTEGER so
/// collisions across generated certificates are negligible without any
/// shared counter.
fn random_serial_number() -> Result<SerialNumber> {
    use rand_core::{OsRng, RngCore};
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    // Keep the leading byte positive and nonzero so the encoding stays a
    // fixed-width positive INTEGER.
    bytes[0] = (bytes[0] & 0x7f) | 0x40;
    Ok(SerialNumber::new(&bytes)?)
}

//! Detection of supported TLS-context shapes and PEM injection into them.
//!
//! Two ecosystems are supported: the `openssl` crate's context builders and
//! `native-tls` connector builders. Detection happens once at this boundary
//! and yields a tagged reference; the certificate model never inspects
//! context types itself. Anything outside these two shapes is rejected with
//! [`Error::UnsupportedContext`] naming the offending type.

use std::any::{Any, type_name};

use native_tls::{Certificate as NativeTlsCertificate, Identity, TlsConnectorBuilder};
use openssl::ssl::{SslAcceptorBuilder, SslConnectorBuilder, SslContextBuilder, SslFiletype};
use openssl::x509::X509;

use crate::error::{Error, Result};
use crate::leaf::LeafCert;

/// A context that has been recognized as one of the supported shapes.
pub(crate) enum ContextRef<'a> {
    /// `openssl` context builders. Trust anchors load from memory; private
    /// key and certificate chain only load from file paths.
    OpenSsl(&'a mut SslContextBuilder),
    /// `native-tls` connector builder. Everything loads from memory.
    NativeTls(&'a mut TlsConnectorBuilder),
}

/// Inspect the concrete type of `ctx` and classify it.
///
/// The acceptor and connector builders hand out their inner
/// `SslContextBuilder` through `DerefMut`, so all three openssl entry
/// points collapse into one arm.
pub(crate) fn classify<C: Any>(ctx: &mut C) -> Result<ContextRef<'_>> {
    let any: &mut dyn Any = ctx;
    if any.is::<SslContextBuilder>() {
        let builder = any
            .downcast_mut::<SslContextBuilder>()
            .expect("type checked above");
        Ok(ContextRef::OpenSsl(builder))
    } else if any.is::<SslAcceptorBuilder>() {
        let builder = any
            .downcast_mut::<SslAcceptorBuilder>()
            .expect("type checked above");
        Ok(ContextRef::OpenSsl(&mut **builder))
    } else if any.is::<SslConnectorBuilder>() {
        let builder = any
            .downcast_mut::<SslConnectorBuilder>()
            .expect("type checked above");
        Ok(ContextRef::OpenSsl(&mut **builder))
    } else if any.is::<TlsConnectorBuilder>() {
        let builder = any
            .downcast_mut::<TlsConnectorBuilder>()
            .expect("type checked above");
        Ok(ContextRef::NativeTls(builder))
    } else {
        Err(Error::UnsupportedContext(type_name::<C>()))
    }
}

/// Add `root_pem` to the context's set of trusted roots.
pub(crate) fn add_trust_root(ctx: ContextRef<'_>, root_pem: &[u8]) -> Result<()> {
    match ctx {
        ContextRef::OpenSsl(builder) => {
            let cert = X509::from_pem(root_pem)?;
            builder.cert_store_mut().add_cert(cert)?;
        }
        ContextRef::NativeTls(builder) => {
            let cert = NativeTlsCertificate::from_pem(root_pem)?;
            builder.add_root_certificate(cert);
        }
    }
    Ok(())
}

/// Install `leaf`'s private key and certificate chain as the context's
/// identity.
pub(crate) fn set_identity(ctx: ContextRef<'_>, leaf: &LeafCert) -> Result<()> {
    match ctx {
        ContextRef::OpenSsl(builder) => {
            // openssl only takes identity material from paths, so the
            // combined bundle takes a detour through a scoped temp file.
            // Key first; a failure there leaves the context untouched.
            leaf.private_key_and_cert_chain_pem
                .with_tempfile(|path| {
                    builder.set_private_key_file(path, SslFiletype::PEM)?;
                    builder.set_certificate_chain_file(path)?;
                    builder.check_private_key()?;
                    Ok(())
                })
        }
        ContextRef::NativeTls(builder) => {
            let identity = Identity::from_pkcs8(
                leaf.cert_chain_pems[0].bytes(),
                leaf.private_key_pem.bytes(),
            )?;
            builder.identity(identity);
            Ok(())
        }
    }
}

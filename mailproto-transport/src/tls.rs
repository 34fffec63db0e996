//! Default TLS configuration: Mozilla's root set via `webpki-roots` for the
//! client role, and PEM-loaded identity material for the server role. The
//! original left TLS context selection to the platform (`ssl.create_default_
//! context`); here the caller supplies a certificate chain and key instead
//! of relying on implicit OS trust.

use std::io;
use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::{ClientConfig, RootCertStore, ServerConfig};

/// The root store used by [`default_client_config`]: the Mozilla set
/// bundled by `webpki-roots`, not the platform trust store.
pub fn default_root_store() -> RootCertStore {
    let mut store = RootCertStore::empty();
    store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    store
}

/// A client config with no client certificate, trusting the Mozilla root
/// set. Suitable for both implicit TLS and STARTTLS/STLS upgrades.
pub fn default_client_config() -> Arc<ClientConfig> {
    Arc::new(
        ClientConfig::builder()
            .with_root_certificates(default_root_store())
            .with_no_client_auth(),
    )
}

/// Build a server config from a PEM certificate chain and private key,
/// requesting no client certificate.
pub fn server_config_from_pem(
    cert_chain: &[u8],
    private_key: &[u8],
) -> io::Result<Arc<ServerConfig>> {
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut &cert_chain[..])
        .collect::<Result<_, _>>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let key: PrivateKeyDer<'static> = rustls_pemfile::private_key(&mut &private_key[..])
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "no private key found in PEM"))?;
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Arc::new(config))
}

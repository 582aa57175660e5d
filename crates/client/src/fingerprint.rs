//! In-process TLS thumbprint retrieval.
//!
//! Adding a standalone host to a cluster requires the SHA-1 thumbprint of
//! the host's certificate in its connect spec. The thumbprint is obtained by
//! performing a TLS handshake directly against the host and hashing the peer
//! certificate, with verification disabled: the thumbprint is how trust in
//! this certificate gets established in the first place.
//!
//! # Invariants
//! - A thumbprint is exactly 20 colon-separated uppercase hex byte-pairs;
//!   anything else is an error, never silently accepted.
//! - The handshake is read-only: no application data is exchanged.

use std::sync::Arc;

use sha1::{Digest, Sha1};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::error::{ClientError, Result};
use virtmgr_config::constants::THUMBPRINT_PAIR_COUNT;

/// Certificate verifier that accepts any peer certificate.
///
/// Only used for thumbprint retrieval; nothing else is done with the
/// connection.
#[derive(Debug)]
struct AcceptAnyServerCert(Arc<rustls::crypto::CryptoProvider>);

impl rustls::client::danger::ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

/// Format a certificate's SHA-1 digest as colon-separated hex byte-pairs.
fn format_thumbprint(cert_der: &[u8]) -> String {
    Sha1::digest(cert_der)
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Reject thumbprints that do not have exactly the expected pair count.
fn ensure_pair_count(host: &str, thumbprint: &str) -> Result<()> {
    let pairs = thumbprint.split(':').count();
    if pairs != THUMBPRINT_PAIR_COUNT {
        return Err(ClientError::InvalidThumbprint {
            host: host.to_string(),
            pairs,
            expected: THUMBPRINT_PAIR_COUNT,
        });
    }
    Ok(())
}

/// Retrieve the SHA-1 thumbprint of a host's TLS certificate.
///
/// Performs an in-process handshake against `host:port` and hashes the leaf
/// certificate the peer presents.
pub async fn host_thumbprint(host: &str, port: u16) -> Result<String> {
    debug!("Retrieving TLS thumbprint of {}:{}", host, port);

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| ClientError::TlsError(e.to_string()))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
        .with_no_client_auth();

    let server_name = rustls::pki_types::ServerName::try_from(host.to_string())
        .map_err(|_| ClientError::InvalidUrl(format!("invalid host name '{}'", host)))?;

    let tcp = TcpStream::connect((host, port)).await.map_err(|e| {
        ClientError::TlsError(format!("failed to connect to {}:{}: {}", host, port, e))
    })?;

    let connector = TlsConnector::from(Arc::new(config));
    let tls = connector.connect(server_name, tcp).await.map_err(|e| {
        ClientError::TlsError(format!("TLS handshake with {}:{} failed: {}", host, port, e))
    })?;

    let (_, connection) = tls.get_ref();
    let cert = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| {
            ClientError::TlsError(format!("{}:{} presented no certificate", host, port))
        })?;

    let thumbprint = format_thumbprint(cert.as_ref());
    ensure_pair_count(host, &thumbprint)?;

    debug!("Thumbprint of {}:{} is {}", host, port, thumbprint);
    Ok(thumbprint)
}

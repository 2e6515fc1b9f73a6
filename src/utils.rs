use anyhow::{Context, Result, anyhow, ensure};
use rustls::{
    ServerConfig as RustlsServerConfig,
    pki_types::{CertificateDer, PrivateKeyDer},
};
use std::{fs::File, io::BufReader, sync::Arc};

fn pem_reader(path: &str, what: &str) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .with_context(|| format!("opening {} `{}`", what, path))
}

pub fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>> {
    let mut rd = pem_reader(path, "certificate file")?;
    let chain = rustls_pemfile::certs(&mut rd)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing certificates in `{}`", path))?;
    ensure!(!chain.is_empty(), "no certificates found in `{}`", path);
    Ok(chain)
}

// PKCS#8, PKCS#1 or SEC1, the first one in the file wins
pub fn load_key(path: &str) -> Result<PrivateKeyDer<'static>> {
    let mut rd = pem_reader(path, "key file")?;
    rustls_pemfile::private_key(&mut rd)
        .with_context(|| format!("parsing private key in `{}`", path))?
        .ok_or_else(|| anyhow!("no private key found in `{}`", path))
}

// server-auth only; clients are not asked for certificates
pub fn server_tls_config(cert_path: &str, key_path: &str) -> Result<Arc<RustlsServerConfig>> {
    let cert_chain = load_certs(cert_path).context("reading server certificate")?;
    let priv_key   = load_key(key_path).context("reading server private key")?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let mut cfg = RustlsServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .context("TLS protocol versions")?
        .with_no_client_auth()
        .with_single_cert(cert_chain, priv_key)
        .context("invalid TLS cert/key combo")?;
    cfg.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];
    Ok(Arc::new(cfg))
}

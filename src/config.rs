use crate::tx::{GasParams, TxBuilder};

use serde::Deserialize;
use std::{fs, net::SocketAddr, sync::Arc};
use anyhow::{Context, Result, bail, ensure};

fn default_store_name() -> String { "crud".into() }
fn default_bech32_prefix() -> String { "bluzelle".into() }
fn default_max_body_bytes() -> usize { 1024 * 1024 }
fn default_gas() -> u64 { GasParams::default().default_gas }
fn default_gas_adjustment() -> f64 { GasParams::default().gas_adjustment }
fn default_base_gas() -> u64 { GasParams::default().base_gas }
fn default_gas_per_byte() -> u64 { GasParams::default().gas_per_byte }

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub listen: String,                     // ex 0.0.0.0:1317
    #[serde(default = "default_store_name")]
    pub store_name: String,                 // route prefix, /crud/create ...
    #[serde(default = "default_bech32_prefix")]
    pub bech32_prefix: String,              // account HRP, lower case, "bluzelle"
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_gas")]
    pub default_gas: u64,                   // ex 200000
    #[serde(default = "default_gas_adjustment")]
    pub gas_adjustment: f64,                // ex 1.0
    #[serde(default = "default_base_gas")]
    pub base_gas: u64,                      // ex 1000
    #[serde(default = "default_gas_per_byte")]
    pub gas_per_byte: u64,                  // ex 10
    pub https_cert: Option<String>,         // "/etc/crud-gateway/server.crt"
    pub https_key: Option<String>,          // "/etc/crud-gateway/server.key"
}

#[derive(Clone)]
pub struct GatewayAppState { // everything a handler needs, injected once at router build time
    pub cfg:     Arc<GatewayConfig>,
    pub builder: Arc<dyn TxBuilder>,
}

// bech32 HRPs are printable ASCII; decoders hand them back lower-cased
fn valid_hrp(prefix: &str) -> bool {
    (1..=83).contains(&prefix.len())
        && prefix.bytes().all(|b| (33..=126).contains(&b) && !b.is_ascii_uppercase())
}

impl GatewayConfig {
    pub fn load(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config file `{}`", path))?;
        Self::parse(&s)
            .with_context(|| format!("parsing `{}`", path))
    }

    pub fn parse(s: &str) -> Result<Self> {
        let cfg: GatewayConfig = toml::from_str(s)
            .context("parsing config as TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        ensure!(
            valid_hrp(&self.bech32_prefix),
            "bech32_prefix `{}` must be 1-83 lower-case printable ASCII characters",
            self.bech32_prefix
        );
        ensure!(
            !self.store_name.is_empty() && !self.store_name.contains('/'),
            "store_name must be a single non-empty path segment"
        );
        ensure!(
            self.gas_adjustment.is_finite() && self.gas_adjustment > 0.0,
            "gas_adjustment must be positive"
        );
        ensure!(self.max_body_bytes > 0, "max_body_bytes must be positive");
        if self.https_cert.is_some() != self.https_key.is_some() {
            bail!("https_cert and https_key must be set together");
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .with_context(|| format!("invalid listen address `{}`", self.listen))
    }

    pub fn gas_params(&self) -> GasParams {
        GasParams {
            default_gas:    self.default_gas,
            gas_adjustment: self.gas_adjustment,
            base_gas:       self.base_gas,
            gas_per_byte:   self.gas_per_byte,
        }
    }

    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        match (&self.https_cert, &self.https_key) {
            (Some(c), Some(k)) => Some((c.as_str(), k.as_str())),
            _                  => None,
        }
    }
}

pub fn load(path: &str) -> Result<GatewayConfig> {
    GatewayConfig::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg = GatewayConfig::parse(r#"listen = "127.0.0.1:1317""#).unwrap();
        assert_eq!(cfg.store_name, "crud");
        assert_eq!(cfg.bech32_prefix, "bluzelle");
        assert_eq!(cfg.max_body_bytes, 1024 * 1024);
        assert_eq!(cfg.gas_params(), GasParams::default());
        assert!(cfg.tls_paths().is_none());
    }

    #[test]
    fn full_config() {
        let cfg = GatewayConfig::parse(
            r#"
            listen = "0.0.0.0:8443"
            store_name = "kv"
            bech32_prefix = "cosmos"
            https_cert = "server.crt"
            https_key = "server.key"
            default_gas = 100000
            gas_adjustment = 1.5
            gas_per_byte = 99
            "#,
        )
        .unwrap();
        assert_eq!(cfg.store_name, "kv");
        assert_eq!(
            cfg.gas_params(),
            GasParams { default_gas: 100_000, gas_adjustment: 1.5, base_gas: 1_000, gas_per_byte: 99 }
        );
        assert_eq!(cfg.tls_paths(), Some(("server.crt", "server.key")));
    }

    #[test]
    fn unknown_or_misplaced_keys_are_rejected() {
        for bad in [
            "listen = \"127.0.0.1:1\"\ndefault_gaz = 5",
            "listen = \"127.0.0.1:1\"\n[gas]\ndefault_gas = 100000",
        ] {
            let err = GatewayConfig::parse(bad).unwrap_err();
            assert!(format!("{:#}", err).contains("unknown field"), "{:#}", err);
        }
    }

    #[test]
    fn rejects_bad_values() {
        for bad in [
            r#"listen = "nowhere""#,
            "listen = \"127.0.0.1:1\"\nbech32_prefix = \"\"",
            "listen = \"127.0.0.1:1\"\nbech32_prefix = \"Bluzelle\"",
            "listen = \"127.0.0.1:1\"\nbech32_prefix = \"blu zelle\"",
            "listen = \"127.0.0.1:1\"\nstore_name = \"a/b\"",
            "listen = \"127.0.0.1:1\"\nhttps_cert = \"only.crt\"",
            "listen = \"127.0.0.1:1\"\ngas_adjustment = 0.0",
        ] {
            assert!(GatewayConfig::parse(bad).is_err(), "accepted: {}", bad);
        }
    }

    #[test]
    fn load_reads_file_and_reports_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "listen = \"127.0.0.1:1317\"").unwrap();
        let cfg = load(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.listen_addr().unwrap().port(), 1317);

        let err = load("/definitely/not/here.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.toml"));
    }
}

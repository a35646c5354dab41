//! Network configuration for the Payra SDK
//!
//! Configuration comes from a [`ConfigSource`], a plain key-value lookup supplied by the
//! embedding application. [`NetworkConfig::resolve`] reads the keys for one network; values
//! are validated only when an operation asks for them, so signing does not fail because an
//! RPC URL is malformed and vice versa.

use crate::constants::{
    forward_contract_key, gateway_contract_key, legacy_private_key_key, merchant_id_key,
    rpc_url_key, signature_key_key, CALL_TIMEOUT_KEY, DEFAULT_CALL_TIMEOUT,
    DEFAULT_PROBE_TIMEOUT, PROBE_TIMEOUT_KEY,
};
use crate::error::{PayraError, Result};
use alloy::primitives::{Address, U256};
use alloy::transports::http::reqwest::Url;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Key-value configuration store
///
/// Blank values are treated the same as missing ones.
pub trait ConfigSource: Send + Sync {
    /// Look up a raw value by key
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    /// Load `.env` from the working directory (if present) and read the environment
    pub fn load_dotenv() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// Per-network configuration, as read from a [`ConfigSource`]
///
/// Built fresh for every operation and never mutated afterwards.
#[derive(Clone)]
pub struct NetworkConfig {
    network: String,
    requested: String,
    merchant_id: Option<String>,
    signing_key: Option<String>,
    forward_contract: Option<String>,
    gateway_contract: Option<String>,
    rpc_urls: Vec<String>,
}

impl NetworkConfig {
    /// Read all keys for `network` (case-insensitive, stored upper-case)
    pub fn resolve(source: &dyn ConfigSource, network: &str) -> Self {
        let requested = network.trim().to_string();
        let network = requested.to_uppercase();

        let signing_key = source
            .get(&signature_key_key(&network))
            .or_else(|| source.get(&legacy_private_key_key(&network)));

        // Endpoints are numbered from 1; the first gap ends the list
        let rpc_urls = (1..)
            .map_while(|index| source.get(&rpc_url_key(&network, index)))
            .map(|url| url.trim().to_string())
            .collect();

        Self {
            merchant_id: source.get(&merchant_id_key(&network)),
            forward_contract: source.get(&forward_contract_key(&network)),
            gateway_contract: source.get(&gateway_contract_key(&network)),
            signing_key,
            rpc_urls,
            network,
            requested,
        }
    }

    /// Canonical (upper-case) network name
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Network name as the caller spelled it
    pub fn requested_network(&self) -> &str {
        &self.requested
    }

    /// Merchant identifier, parsed as a decimal uint256
    pub fn merchant_id(&self) -> Result<U256> {
        let raw = self.merchant_id.as_deref().ok_or_else(|| {
            PayraError::config(format!("Missing merchantId for {}", self.network))
        })?;
        U256::from_str_radix(raw.trim(), 10).map_err(|e| {
            PayraError::config(format!("Invalid merchantId for {}: {e}", self.network))
        })
    }

    /// Address of the forward proxy contract
    pub fn forward_contract(&self) -> Result<Address> {
        parse_address(
            self.forward_contract.as_deref(),
            "forwardAddress",
            &self.network,
        )
    }

    /// Address of the gateway (registry) contract
    pub fn gateway_contract(&self) -> Result<Address> {
        parse_address(
            self.gateway_contract.as_deref(),
            "gatewayAddress",
            &self.network,
        )
    }

    /// Raw signing key as configured (hex, optionally `0x`-prefixed)
    pub fn signing_key(&self) -> Result<&str> {
        self.signing_key.as_deref().ok_or_else(|| {
            PayraError::config(format!("Missing signature key for {}", self.network))
        })
    }

    /// All configured RPC endpoints, in configuration order
    pub fn rpc_urls(&self) -> Result<Vec<Url>> {
        if self.rpc_urls.is_empty() {
            return Err(PayraError::config(format!(
                "No RPC URLs found for network: {}",
                self.network
            )));
        }

        self.rpc_urls
            .iter()
            .map(|raw| {
                raw.parse().map_err(|e| {
                    PayraError::config(format!("Invalid RPC URL {raw} for {}: {e}", self.network))
                })
            })
            .collect()
    }

    /// The configured text of `url`, before URL parsing normalized it
    pub fn configured_rpc_url(&self, url: &Url) -> Option<&str> {
        self.rpc_urls
            .iter()
            .map(String::as_str)
            .find(|raw| raw.parse::<Url>().is_ok_and(|parsed| &parsed == url))
    }
}

fn parse_address(raw: Option<&str>, name: &str, network: &str) -> Result<Address> {
    let raw = raw.ok_or_else(|| PayraError::config(format!("Missing {name} for {network}")))?;
    raw.trim()
        .parse()
        .map_err(|e| PayraError::config(format!("Invalid {name} for {network}: {e}")))
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("network", &self.network)
            .field("requested", &self.requested)
            .field("merchant_id", &self.merchant_id)
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("forward_contract", &self.forward_contract)
            .field("gateway_contract", &self.gateway_contract)
            .field("rpc_urls", &self.rpc_urls)
            .finish()
    }
}

/// Timeouts applied to network operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Bound on the `eth_blockNumber` health probe
    pub probe_timeout: Duration,
    /// Bound on the `eth_call` itself
    pub call_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Defaults overridden by `PAYRA_RPC_PROBE_TIMEOUT_MS` / `PAYRA_RPC_CALL_TIMEOUT_MS`
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            probe_timeout: read_millis(source, PROBE_TIMEOUT_KEY)?
                .unwrap_or(defaults.probe_timeout),
            call_timeout: read_millis(source, CALL_TIMEOUT_KEY)?.unwrap_or(defaults.call_timeout),
        })
    }

    /// Set the health probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the contract call timeout
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

fn read_millis(source: &dyn ConfigSource, key: &str) -> Result<Option<Duration>> {
    source
        .get(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| PayraError::config(format!("Invalid {key}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloy::primitives::address;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_network_name_is_uppercased() {
        let src = source(&[("PAYRA_POLYGON_MERCHANT_ID", "42")]);
        let config = NetworkConfig::resolve(&src, "polygon");
        assert_eq!(config.network(), "POLYGON");
        assert_eq!(config.merchant_id().unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_requested_network_keeps_caller_spelling() {
        let config = NetworkConfig::resolve(&source(&[]), " Polygon ");
        assert_eq!(config.network(), "POLYGON");
        assert_eq!(config.requested_network(), "Polygon");
    }

    #[test]
    fn test_configured_rpc_url_is_unnormalized() {
        let src = source(&[
            ("PAYRA_POLYGON_RPC_URL_1", "http://127.0.0.1:8545"),
            ("PAYRA_POLYGON_RPC_URL_2", "https://rpc.example/v1/key"),
        ]);
        let config = NetworkConfig::resolve(&src, "polygon");
        let urls = config.rpc_urls().unwrap();

        assert_eq!(urls[0].as_str(), "http://127.0.0.1:8545/");
        assert_eq!(
            config.configured_rpc_url(&urls[0]),
            Some("http://127.0.0.1:8545")
        );
        assert_eq!(
            config.configured_rpc_url(&urls[1]),
            Some("https://rpc.example/v1/key")
        );

        let other: Url = "https://elsewhere.example".parse().unwrap();
        assert_eq!(config.configured_rpc_url(&other), None);
    }

    #[test]
    fn test_rpc_urls_stop_at_first_gap() {
        let src = source(&[
            ("PAYRA_POLYGON_RPC_URL_1", " https://one.example "),
            ("PAYRA_POLYGON_RPC_URL_2", "https://two.example"),
            ("PAYRA_POLYGON_RPC_URL_4", "https://four.example"),
        ]);
        let urls = NetworkConfig::resolve(&src, "polygon").rpc_urls().unwrap();
        let urls: Vec<_> = urls.iter().map(Url::as_str).collect();
        assert_eq!(urls, ["https://one.example/", "https://two.example/"]);
    }

    #[test]
    fn test_no_rpc_urls_is_config_error() {
        let err = NetworkConfig::resolve(&source(&[]), "linea")
            .rpc_urls()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.to_string(), "No RPC URLs found for network: LINEA");
    }

    #[test]
    fn test_missing_and_invalid_merchant_id() {
        let missing = NetworkConfig::resolve(&source(&[]), "polygon")
            .merchant_id()
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::Config);

        let src = source(&[("PAYRA_POLYGON_MERCHANT_ID", "0xabc")]);
        let invalid = NetworkConfig::resolve(&src, "polygon")
            .merchant_id()
            .unwrap_err();
        assert_eq!(invalid.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let src = source(&[("PAYRA_POLYGON_MERCHANT_ID", "   ")]);
        assert!(NetworkConfig::resolve(&src, "polygon").merchant_id().is_err());
    }

    #[test]
    fn test_contract_addresses() {
        let src = source(&[
            (
                "PAYRA_POLYGON_CORE_FORWARD_CONTRACT_ADDRESS",
                "0x00000000000000000000000000000000000000f0",
            ),
            ("PAYRA_POLYGON_OCP_GATEWAY_CONTRACT_ADDRESS", "not-an-address"),
        ]);
        let config = NetworkConfig::resolve(&src, "Polygon");
        assert_eq!(
            config.forward_contract().unwrap(),
            address!("00000000000000000000000000000000000000f0")
        );
        assert_eq!(config.gateway_contract().unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn test_legacy_private_key_name() {
        let src = source(&[("PAYRA_POLYGON_PRIVATE_KEY", "0xabc")]);
        assert_eq!(
            NetworkConfig::resolve(&src, "polygon").signing_key().unwrap(),
            "0xabc"
        );

        let src = source(&[
            ("PAYRA_POLYGON_PRIVATE_KEY", "0xabc"),
            ("PAYRA_POLYGON_SIGNATURE_KEY", "0xdef"),
        ]);
        assert_eq!(
            NetworkConfig::resolve(&src, "polygon").signing_key().unwrap(),
            "0xdef"
        );
    }

    #[test]
    fn test_debug_redacts_signing_key() {
        let src = source(&[("PAYRA_POLYGON_SIGNATURE_KEY", "0xdeadbeef")]);
        let debug = format!("{:?}", NetworkConfig::resolve(&src, "polygon"));
        assert!(!debug.contains("deadbeef"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_options_from_source() {
        let src = source(&[("PAYRA_RPC_CALL_TIMEOUT_MS", "1500")]);
        let options = ClientOptions::from_source(&src).unwrap();
        assert_eq!(options.probe_timeout, DEFAULT_PROBE_TIMEOUT);
        assert_eq!(options.call_timeout, Duration::from_millis(1500));

        let src = source(&[("PAYRA_RPC_PROBE_TIMEOUT_MS", "soon")]);
        assert!(ClientOptions::from_source(&src).is_err());
    }
}

//! Configuration keys, timeouts and protocol constants

use std::time::Duration;

/// Prefix shared by every configuration key
pub const CONFIG_PREFIX: &str = "PAYRA";

/// Ethereum signed-message prefix for a 32-byte message
///
/// The signed payload is always a keccak256 hash, so the length suffix is fixed.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Upper bound on the `eth_blockNumber` liveness probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Upper bound on the `eth_call` issued after a successful probe
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC id used by the health probe
pub const PROBE_REQUEST_ID: u64 = 1;

/// Optional override for the probe timeout, in milliseconds
pub const PROBE_TIMEOUT_KEY: &str = "PAYRA_RPC_PROBE_TIMEOUT_MS";

/// Optional override for the call timeout, in milliseconds
pub const CALL_TIMEOUT_KEY: &str = "PAYRA_RPC_CALL_TIMEOUT_MS";

/// Index of the user-data contract in `getRegistryDetails()`'s return tuple
pub const USER_DATA_REGISTRY_INDEX: usize = 2;

/// `PAYRA_<NET>_MERCHANT_ID`
pub fn merchant_id_key(network: &str) -> String {
    format!("{CONFIG_PREFIX}_{network}_MERCHANT_ID")
}

/// `PAYRA_<NET>_SIGNATURE_KEY`
pub fn signature_key_key(network: &str) -> String {
    format!("{CONFIG_PREFIX}_{network}_SIGNATURE_KEY")
}

/// `PAYRA_<NET>_PRIVATE_KEY`, the older name for the signing key
pub fn legacy_private_key_key(network: &str) -> String {
    format!("{CONFIG_PREFIX}_{network}_PRIVATE_KEY")
}

/// `PAYRA_<NET>_CORE_FORWARD_CONTRACT_ADDRESS`
pub fn forward_contract_key(network: &str) -> String {
    format!("{CONFIG_PREFIX}_{network}_CORE_FORWARD_CONTRACT_ADDRESS")
}

/// `PAYRA_<NET>_OCP_GATEWAY_CONTRACT_ADDRESS`
pub fn gateway_contract_key(network: &str) -> String {
    format!("{CONFIG_PREFIX}_{network}_OCP_GATEWAY_CONTRACT_ADDRESS")
}

/// `PAYRA_<NET>_RPC_URL_<index>`, indices start at 1
pub fn rpc_url_key(network: &str, index: usize) -> String {
    format!("{CONFIG_PREFIX}_{network}_RPC_URL_{index}")
}

//! Payment authorization signatures
//!
//! The on-chain verifier rebuilds the same digest, so the payload layout and the
//! message prefix here are a fixed wire contract:
//!
//! ```text
//! hash   = keccak256(abi.encode(token, merchantId, orderId, amount, timestamp, payer))
//! digest = keccak256("\x19Ethereum Signed Message:\n32" ++ hash)
//! sig    = r (32 bytes) ++ s (32 bytes) ++ v (1 byte, 27/28)
//! ```

use crate::config::NetworkConfig;
use crate::constants::SIGNED_MESSAGE_PREFIX;
use crate::error::{PayraError, Result};
use alloy::hex;
use alloy::primitives::{keccak256, Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use alloy::sol;
use alloy::sol_types::SolValue;
use std::fmt;

sol! {
    /// Tuple hashed and signed for a payment authorization.
    /// Field order and types must match the verifying contract.
    #[derive(Debug, PartialEq, Eq)]
    struct AuthorizationPayload {
        address tokenAddress;
        uint256 merchantId;
        string orderId;
        uint256 amount;
        uint256 timestamp;
        address payerAddress;
    }
}

impl AuthorizationPayload {
    /// `abi.encode(...)` of the six fields, as top-level parameters
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }

    /// keccak256 of the encoded payload
    pub fn hash(&self) -> B256 {
        keccak256(self.encode())
    }

    /// Hash wrapped in the Ethereum signed-message envelope; this is what gets signed
    pub fn digest(&self) -> B256 {
        let hash = self.hash();
        let mut message = Vec::with_capacity(SIGNED_MESSAGE_PREFIX.len() + hash.len());
        message.extend_from_slice(SIGNED_MESSAGE_PREFIX);
        message.extend_from_slice(hash.as_slice());
        keccak256(message)
    }
}

/// Recoverable secp256k1 signature in `r ‖ s ‖ v` layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationSignature {
    pub r: B256,
    pub s: B256,
    /// Recovery id in Ethereum notation (27 or 28)
    pub v: u8,
}

impl AuthorizationSignature {
    /// 65 raw bytes
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    /// `0x`-prefixed lowercase hex, 132 characters
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.to_bytes())
    }
}

impl fmt::Display for AuthorizationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Order fields covered by a payment authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRequest {
    pub token_address: Address,
    pub order_id: String,
    pub amount: U256,
    pub timestamp: u64,
    pub payer_address: Address,
}

impl SignatureRequest {
    /// Payload for this request under `merchant_id`
    pub fn payload(&self, merchant_id: U256) -> AuthorizationPayload {
        AuthorizationPayload {
            tokenAddress: self.token_address,
            merchantId: merchant_id,
            orderId: self.order_id.clone(),
            amount: self.amount,
            timestamp: U256::from(self.timestamp),
            payerAddress: self.payer_address,
        }
    }
}

/// Parse a 32-byte hex signing key, with or without `0x`
pub fn parse_signing_key(raw: &str, network: &str) -> Result<PrivateKeySigner> {
    let raw = raw.trim();
    let key = raw.strip_prefix("0x").unwrap_or(raw);

    let invalid = || PayraError::InvalidKey {
        network: network.to_string(),
    };

    if key.len() != 64 {
        return Err(invalid());
    }

    let bytes = B256::from_slice(&hex::decode(key).map_err(|_| invalid())?);
    PrivateKeySigner::from_bytes(&bytes).map_err(|_| invalid())
}

/// Sign an authorization for `request` with the network's key and merchant id
///
/// Pure: no network I/O.
pub fn sign_authorization(
    config: &NetworkConfig,
    request: &SignatureRequest,
) -> Result<AuthorizationSignature> {
    let raw_key = config.signing_key()?;
    let merchant_id = config.merchant_id()?;
    let signer = parse_signing_key(raw_key, config.requested_network())?;

    let digest = request.payload(merchant_id).digest();
    let signature = signer.sign_hash_sync(&digest)?;

    Ok(AuthorizationSignature {
        r: B256::from(signature.r().to_be_bytes::<32>()),
        s: B256::from(signature.s().to_be_bytes::<32>()),
        v: 27 + u8::from(signature.v()),
    })
}

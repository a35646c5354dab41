//! Payra SDK for Rust
//!
//! A Rust SDK for merchant backends integrating the Payra on-chain payment protocol.
//!
//! # Features
//!
//! - Sign payment authorizations that the Payra contract verifies on-chain
//! - Check whether an order has been paid
//! - Fetch an order's settlement details (token, amount, fee, timestamp)
//!
//! All chain access is read-only (`eth_call`); the SDK never sends transactions.
//!
//! # Configuration
//!
//! Per network (`<NET>` is the upper-cased network name, e.g. `POLYGON`):
//!
//! | key | used by |
//! |---|---|
//! | `PAYRA_<NET>_MERCHANT_ID` | everything |
//! | `PAYRA_<NET>_SIGNATURE_KEY` | signing |
//! | `PAYRA_<NET>_CORE_FORWARD_CONTRACT_ADDRESS` | `is_order_paid`, `get_order_status` |
//! | `PAYRA_<NET>_OCP_GATEWAY_CONTRACT_ADDRESS` | `get_order_details` |
//! | `PAYRA_<NET>_RPC_URL_1`, `_2`, ... | order queries |
//!
//! # Example
//!
//! ```rust,ignore
//! use payra_sdk::PayraClient;
//! use alloy::primitives::{address, U256};
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let client = PayraClient::from_env()?;
//!
//!     let signature = client.generate_signature(
//!         "polygon",
//!         address!("c2132D05D31c914a87C6611C10748AEb04B58e8F"), // USDT
//!         "ORDER-1",
//!         U256::from(12_340_000u64), // 12.34 USDT
//!         1_700_000_000,
//!         address!("bCd665bE1393094bfD5013E0e2e21aB6Df1D6078"),
//!     )?;
//!
//!     let status = client.is_order_paid("polygon", "ORDER-1").await;
//!     println!("{signature} paid={:?}", status.paid);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod pipeline;
pub mod rpc;
pub mod signature;
pub mod types;

// Re-export main types for convenience
pub use client::{PayraClient, PayraClientBuilder};
pub use config::{ClientOptions, ConfigSource, EnvSource, NetworkConfig};
pub use contracts::AbiCodec;
pub use error::{ErrorKind, PayraError, Result};
pub use pipeline::CallPipeline;
pub use rpc::{EndpointSelector, HealthProbe, PrioritySelector, RandomSelector, RoundRobinSelector};
pub use signature::{AuthorizationPayload, AuthorizationSignature, SignatureRequest};
pub use types::{OrderPaidResult, OrderStatus, OrderStatusResult};

//! PayraClient - main entry point for the SDK

use crate::config::{ClientOptions, ConfigSource, EnvSource, NetworkConfig};
use crate::contracts::{AbiCodec, GET_ORDER_DETAILS, GET_ORDER_STATUS, IS_ORDER_PAID};
use crate::error::{PayraError, Result};
use crate::pipeline::CallPipeline;
use crate::rpc::{EndpointSelector, RandomSelector};
use crate::signature::{sign_authorization, SignatureRequest};
use crate::types::{OrderPaidResult, OrderStatus, OrderStatusResult};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use std::sync::Arc;

/// Client for signing payment authorizations and verifying orders on-chain
///
/// Network configuration is re-read from the [`ConfigSource`] on every call, so changes to
/// the underlying store take effect without rebuilding the client.
pub struct PayraClient {
    source: Arc<dyn ConfigSource>,
    pipeline: CallPipeline,
}

impl PayraClient {
    /// Create a client over `source` with default timeouts and random endpoint selection
    pub fn new(source: impl ConfigSource + 'static) -> Result<Self> {
        Self::builder(source).build()
    }

    /// Create a client over the process environment (after loading `.env`)
    ///
    /// Timeouts may be overridden with `PAYRA_RPC_PROBE_TIMEOUT_MS` and
    /// `PAYRA_RPC_CALL_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let source = EnvSource::load_dotenv();
        let options = ClientOptions::from_source(&source)?;
        Self::builder(source).options(options).build()
    }

    /// Start configuring a client over `source`
    pub fn builder(source: impl ConfigSource + 'static) -> PayraClientBuilder {
        PayraClientBuilder {
            source: Arc::new(source),
            options: ClientOptions::default(),
            selector: Arc::new(RandomSelector),
            codec: None,
        }
    }

    /// Resolve the configuration for `network` as this client sees it
    pub fn network_config(&self, network: &str) -> NetworkConfig {
        NetworkConfig::resolve(self.source.as_ref(), network)
    }

    // ========== Signing ==========

    /// Sign a payment authorization for an order
    ///
    /// # Returns
    ///
    /// `0x`-prefixed 65-byte signature (`r ‖ s ‖ v`) as 132 hex characters.
    /// Errors are returned as-is rather than folded into an envelope.
    pub fn generate_signature(
        &self,
        network: &str,
        token_address: Address,
        order_id: &str,
        amount: U256,
        timestamp: u64,
        payer_address: Address,
    ) -> Result<String> {
        let request = SignatureRequest {
            token_address,
            order_id: order_id.to_string(),
            amount,
            timestamp,
            payer_address,
        };
        self.sign(network, &request)
    }

    /// Sign a prepared [`SignatureRequest`]
    pub fn sign(&self, network: &str, request: &SignatureRequest) -> Result<String> {
        let config = self.network_config(network);
        sign_authorization(&config, request).map(|signature| signature.to_hex())
    }

    // ========== Order Verification (envelopes) ==========

    /// Whether an order is paid, via the forward proxy
    ///
    /// Never fails: errors are reported in the envelope.
    pub async fn is_order_paid(&self, network: &str, order_id: &str) -> OrderPaidResult {
        let result = self.check_order_paid(network, order_id).await;
        log_failure(IS_ORDER_PAID, network, &result);
        result.into()
    }

    /// Settlement details of an order, via the forward proxy
    pub async fn get_order_status(&self, network: &str, order_id: &str) -> OrderStatusResult {
        let result = self.fetch_order_status(network, order_id).await;
        log_failure(GET_ORDER_STATUS, network, &result);
        result.into()
    }

    /// Settlement details of an order, via the gateway registry and user-data contract
    pub async fn get_order_details(&self, network: &str, order_id: &str) -> OrderStatusResult {
        let result = self.fetch_order_details(network, order_id).await;
        log_failure(GET_ORDER_DETAILS, network, &result);
        result.into()
    }

    // ========== Order Verification (typed) ==========

    /// Typed form of [`is_order_paid`](Self::is_order_paid)
    pub async fn check_order_paid(&self, network: &str, order_id: &str) -> Result<bool> {
        let config = self.network_config(network);
        let args = order_args(&config, order_id)?;

        let values = self
            .pipeline
            .call_forwarded(&config, IS_ORDER_PAID, &args)
            .await?;

        match values.as_slice() {
            [DynSolValue::Bool(paid)] => Ok(*paid),
            other => Err(PayraError::decoding(
                IS_ORDER_PAID,
                format!("expected a single bool, got {other:?}"),
            )),
        }
    }

    /// Typed form of [`get_order_status`](Self::get_order_status)
    pub async fn fetch_order_status(&self, network: &str, order_id: &str) -> Result<OrderStatus> {
        let config = self.network_config(network);
        let args = order_args(&config, order_id)?;

        let values = self
            .pipeline
            .call_forwarded(&config, GET_ORDER_STATUS, &args)
            .await?;
        OrderStatus::from_values(GET_ORDER_STATUS, &values)
    }

    /// Typed form of [`get_order_details`](Self::get_order_details)
    pub async fn fetch_order_details(&self, network: &str, order_id: &str) -> Result<OrderStatus> {
        let config = self.network_config(network);
        let args = order_args(&config, order_id)?;

        let values = self
            .pipeline
            .call_via_registry(&config, GET_ORDER_DETAILS, &args)
            .await?;
        OrderStatus::from_values(GET_ORDER_DETAILS, &values)
    }
}

/// `(uint256 merchantId, string orderId)`
fn order_args(config: &NetworkConfig, order_id: &str) -> Result<Vec<DynSolValue>> {
    Ok(vec![
        DynSolValue::Uint(config.merchant_id()?, 256),
        DynSolValue::String(order_id.to_string()),
    ])
}

fn log_failure<T>(operation: &str, network: &str, result: &Result<T>) {
    if let Err(err) = result {
        tracing::warn!(operation, network, kind = ?err.kind(), error = %err, "order query failed");
    }
}

/// Builder for [`PayraClient`]
pub struct PayraClientBuilder {
    source: Arc<dyn ConfigSource>,
    options: ClientOptions,
    selector: Arc<dyn EndpointSelector>,
    codec: Option<AbiCodec>,
}

impl PayraClientBuilder {
    /// Timeouts for the health probe and contract calls
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Endpoint selection strategy (random by default)
    pub fn selector(mut self, selector: impl EndpointSelector + 'static) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    /// Use a custom contract interface instead of the bundled one
    pub fn codec(mut self, codec: AbiCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Finish building the client
    pub fn build(self) -> Result<PayraClient> {
        let codec = match self.codec {
            Some(codec) => codec,
            None => AbiCodec::payra()?,
        };

        let http = reqwest::Client::builder()
            .user_agent(concat!("PayraRustSDK/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PayraError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(PayraClient {
            source: self.source,
            pipeline: CallPipeline::new(codec, self.selector, http, self.options),
        })
    }
}

//! Read-only contract call pipelines
//!
//! Two deployment topologies are supported:
//!
//! - **Forwarded**: the core call is wrapped in `forward(bytes)` and sent to the forward
//!   proxy. The proxy returns the core function's raw return data as `bytes`, which is then
//!   decoded with the core function's schema.
//! - **Registry**: the gateway contract is asked for its registry, and the core call is sent
//!   directly to the user-data contract listed there.
//!
//! Every call is an `eth_call`: nothing is signed, broadcast or mined.

use crate::config::{ClientOptions, NetworkConfig};
use crate::constants::USER_DATA_REGISTRY_INDEX;
use crate::contracts::{AbiCodec, GET_REGISTRY_DETAILS};
use crate::error::{PayraError, Result};
use crate::rpc::{EndpointSelector, HealthProbe};
use alloy::dyn_abi::DynSolValue;
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Composes endpoint selection, the ABI codec and static calls
#[derive(Debug, Clone)]
pub struct CallPipeline {
    codec: AbiCodec,
    selector: Arc<dyn EndpointSelector>,
    probe: HealthProbe,
    call_timeout: Duration,
}

impl CallPipeline {
    /// Build a pipeline from its parts
    pub fn new(
        codec: AbiCodec,
        selector: Arc<dyn EndpointSelector>,
        http: reqwest::Client,
        options: ClientOptions,
    ) -> Self {
        Self {
            codec,
            selector,
            probe: HealthProbe::new(http, options.probe_timeout),
            call_timeout: options.call_timeout,
        }
    }

    /// The codec used for every call
    pub fn codec(&self) -> &AbiCodec {
        &self.codec
    }

    /// Call `function` on the core contract through the forward proxy
    ///
    /// Requires the merchant id and forward address to be configured; `args` are the
    /// function's full argument list.
    pub async fn call_forwarded(
        &self,
        config: &NetworkConfig,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        config.merchant_id()?;
        let forward = config.forward_contract()?;

        let url = self.healthy_endpoint(config).await?;

        let inner = self.codec.encode(function, args)?;
        let data = self.codec.encode_forward(&inner)?;

        let raw = self.static_call(&url, forward, data).await?;
        let inner_return = self.codec.decode_forward(&raw)?;
        self.codec.decode(function, &inner_return)
    }

    /// Call `function` directly on the user-data contract listed by the gateway registry
    pub async fn call_via_registry(
        &self,
        config: &NetworkConfig,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        config.merchant_id()?;
        let gateway = config.gateway_contract()?;

        let url = self.healthy_endpoint(config).await?;

        let user_data = self.user_data_contract(&url, gateway).await?;

        let data = self.codec.encode(function, args)?;
        let raw = self.static_call(&url, user_data, data).await?;
        self.codec.decode(function, &raw)
    }

    /// Address of the user-data contract, from `getRegistryDetails()` on the gateway
    async fn user_data_contract(&self, url: &Url, gateway: Address) -> Result<Address> {
        let data = self.codec.encode(GET_REGISTRY_DETAILS, &[])?;
        let raw = self.static_call(url, gateway, data).await?;
        let registry = self.codec.decode(GET_REGISTRY_DETAILS, &raw)?;

        registry
            .get(USER_DATA_REGISTRY_INDEX)
            .and_then(DynSolValue::as_address)
            .ok_or_else(|| {
                PayraError::decoding(GET_REGISTRY_DETAILS, "missing user-data contract address")
            })
    }

    /// Pick one configured endpoint and make sure it answers
    async fn healthy_endpoint(&self, config: &NetworkConfig) -> Result<Url> {
        let candidates = config.rpc_urls()?;
        let url = self.selector.select(&candidates).cloned().ok_or_else(|| {
            PayraError::config(format!(
                "No RPC URLs found for network: {}",
                config.network()
            ))
        })?;

        tracing::debug!(network = config.network(), %url, "selected RPC endpoint");

        if !self.probe.is_healthy(&url).await {
            let url = config
                .configured_rpc_url(&url)
                .map_or_else(|| url.to_string(), str::to_string);
            return Err(PayraError::RpcUnavailable { url });
        }

        Ok(url)
    }

    /// `eth_call` against `to`, bounded by the call timeout
    async fn static_call(&self, url: &Url, to: Address, data: Bytes) -> Result<Bytes> {
        // Read-only provider without fillers (we only do eth_call operations)
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<Ethereum>()
            .connect_http(url.clone());

        let tx = TransactionRequest::default().with_to(to).with_input(data);

        tracing::debug!(%to, "eth_call");

        match tokio::time::timeout(self.call_timeout, async { provider.call(tx).await }).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(e)) => Err(PayraError::ContractCall(e.to_string())),
            Err(_) => Err(PayraError::ContractCall(format!(
                "eth_call to {to} timed out after {:?}",
                self.call_timeout
            ))),
        }
    }
}

//! ABI encoding and decoding against the embedded contract interfaces

use super::{CORE_ABI_JSON, FORWARD, FORWARD_ABI_JSON};
use crate::error::{PayraError, Result};
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Bytes;

/// Encoder/decoder for the core and forward contract interfaces
///
/// Purely deterministic: no network access and no state beyond the parsed ABIs.
#[derive(Debug, Clone)]
pub struct AbiCodec {
    core: JsonAbi,
    forward: JsonAbi,
}

impl AbiCodec {
    /// Codec for the interfaces shipped with the SDK
    pub fn payra() -> Result<Self> {
        Self::from_documents(CORE_ABI_JSON, FORWARD_ABI_JSON)
    }

    /// Codec for caller-supplied JSON ABI documents
    ///
    /// The forward document must declare `forward(bytes) returns (bytes)`.
    pub fn from_documents(core_json: &str, forward_json: &str) -> Result<Self> {
        let core: JsonAbi = serde_json::from_str(core_json)
            .map_err(|e| PayraError::config(format!("Invalid core ABI document: {e}")))?;
        let forward: JsonAbi = serde_json::from_str(forward_json)
            .map_err(|e| PayraError::config(format!("Invalid forward ABI document: {e}")))?;

        if forward.function(FORWARD).is_none() {
            return Err(PayraError::config(
                "Forward ABI document does not declare forward(bytes)",
            ));
        }

        Ok(Self { core, forward })
    }

    /// Encode a core-contract call: 4-byte selector followed by the argument words
    pub fn encode(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes> {
        let func = lookup(&self.core, function).map_err(|e| PayraError::encoding(function, e))?;
        func.abi_encode_input(args)
            .map(Bytes::from)
            .map_err(|e| PayraError::encoding(function, e))
    }

    /// Decode the return data of a core-contract call
    pub fn decode(&self, function: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
        let func = lookup(&self.core, function).map_err(|e| PayraError::decoding(function, e))?;
        func.abi_decode_output(data)
            .map_err(|e| PayraError::decoding(function, e))
    }

    /// Encode a synthetic return payload for a core function
    ///
    /// The inverse of [`decode`](Self::decode); useful for mock nodes.
    pub fn encode_return(&self, function: &str, values: &[DynSolValue]) -> Result<Bytes> {
        let func = lookup(&self.core, function).map_err(|e| PayraError::encoding(function, e))?;
        func.abi_encode_output(values)
            .map(Bytes::from)
            .map_err(|e| PayraError::encoding(function, e))
    }

    /// Wrap inner call data as the single argument of `forward(bytes)`
    pub fn encode_forward(&self, inner: &[u8]) -> Result<Bytes> {
        let func = lookup(&self.forward, FORWARD).map_err(|e| PayraError::encoding(FORWARD, e))?;
        func.abi_encode_input(&[DynSolValue::Bytes(inner.to_vec())])
            .map(Bytes::from)
            .map_err(|e| PayraError::encoding(FORWARD, e))
    }

    /// Unwrap the `bytes` returned by `forward`, yielding the inner function's return data
    pub fn decode_forward(&self, data: &[u8]) -> Result<Bytes> {
        let func = lookup(&self.forward, FORWARD).map_err(|e| PayraError::decoding(FORWARD, e))?;
        let values = func
            .abi_decode_output(data)
            .map_err(|e| PayraError::decoding(FORWARD, e))?;

        match values.as_slice() {
            [DynSolValue::Bytes(inner)] => Ok(Bytes::copy_from_slice(inner)),
            other => Err(PayraError::decoding(
                FORWARD,
                format!("expected a single bytes value, got {other:?}"),
            )),
        }
    }

    /// Encode a synthetic `forward` return payload wrapping `inner`
    pub fn encode_forward_return(&self, inner: &[u8]) -> Result<Bytes> {
        let func = lookup(&self.forward, FORWARD).map_err(|e| PayraError::encoding(FORWARD, e))?;
        func.abi_encode_output(&[DynSolValue::Bytes(inner.to_vec())])
            .map(Bytes::from)
            .map_err(|e| PayraError::encoding(FORWARD, e))
    }
}

/// First declaration of `name`; the Payra interfaces have no overloads
fn lookup<'a>(abi: &'a JsonAbi, name: &str) -> std::result::Result<&'a Function, String> {
    abi.function(name)
        .and_then(|overloads| overloads.first())
        .ok_or_else(|| format!("unknown function {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{GET_ORDER_STATUS, GET_REGISTRY_DETAILS, IS_ORDER_PAID};
    use crate::error::ErrorKind;
    use alloy::primitives::{address, hex, U256};

    fn order_args(merchant: u64, order_id: &str) -> Vec<DynSolValue> {
        vec![
            DynSolValue::Uint(U256::from(merchant), 256),
            DynSolValue::String(order_id.to_string()),
        ]
    }

    #[test]
    fn test_selectors() {
        let codec = AbiCodec::payra().unwrap();

        let paid = codec.encode(IS_ORDER_PAID, &order_args(4, "ORDER-1")).unwrap();
        assert_eq!(&paid[..4], hex!("c04a772b"));

        let status = codec.encode(GET_ORDER_STATUS, &order_args(4, "ORDER-1")).unwrap();
        assert_eq!(&status[..4], hex!("2b765e50"));

        let registry = codec.encode(GET_REGISTRY_DETAILS, &[]).unwrap();
        assert_eq!(&registry[..], hex!("8f84dfe7"));

        let forward = codec.encode_forward(&paid).unwrap();
        assert_eq!(&forward[..4], hex!("d948d468"));
    }

    #[test]
    fn test_encode_is_order_paid_layout() {
        let codec = AbiCodec::payra().unwrap();
        let data = codec.encode(IS_ORDER_PAID, &order_args(4, "ab")).unwrap();

        // selector + merchant id + string offset + length + one padded word
        assert_eq!(data.len(), 4 + 4 * 32);
        assert_eq!(U256::from_be_slice(&data[4..36]), U256::from(4u64));
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(64u64));
        assert_eq!(U256::from_be_slice(&data[68..100]), U256::from(2u64));
        assert_eq!(&data[100..102], b"ab");
    }

    #[test]
    fn test_unknown_function() {
        let codec = AbiCodec::payra().unwrap();
        let err = codec.encode("withdrawAll", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);

        let err = codec.decode("withdrawAll", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn test_arity_and_type_mismatch() {
        let codec = AbiCodec::payra().unwrap();

        let too_few = [DynSolValue::Uint(U256::from(4u64), 256)];
        assert_eq!(
            codec.encode(IS_ORDER_PAID, &too_few).unwrap_err().kind(),
            ErrorKind::Encoding
        );

        let wrong_type = [DynSolValue::Bool(true), DynSolValue::String("x".into())];
        assert_eq!(
            codec.encode(IS_ORDER_PAID, &wrong_type).unwrap_err().kind(),
            ErrorKind::Encoding
        );
    }

    #[test]
    fn test_decode_short_input() {
        let codec = AbiCodec::payra().unwrap();
        let err = codec.decode(IS_ORDER_PAID, &[0u8; 7]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);

        let err = codec.decode(GET_ORDER_STATUS, &[0u8; 64]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn test_order_status_round_trip() {
        let codec = AbiCodec::payra().unwrap();
        codec.encode(GET_ORDER_STATUS, &order_args(7, "ORDER-9")).unwrap();

        let status = DynSolValue::Tuple(vec![
            DynSolValue::Bool(true),
            DynSolValue::Address(address!("c2132D05D31c914a87C6611C10748AEb04B58e8F")),
            DynSolValue::Uint(U256::from(12_340_000u64), 256),
            DynSolValue::Uint(U256::from(12_340u64), 256),
            DynSolValue::Uint(U256::from(1_700_000_000u64), 256),
        ]);
        let raw = codec.encode_return(GET_ORDER_STATUS, &[status.clone()]).unwrap();
        let decoded = codec.decode(GET_ORDER_STATUS, &raw).unwrap();

        assert_eq!(decoded, vec![status]);
    }

    #[test]
    fn test_forward_wrapping_is_transparent() {
        let codec = AbiCodec::payra().unwrap();
        let inner = codec
            .encode_return(IS_ORDER_PAID, &[DynSolValue::Bool(true)])
            .unwrap();

        let wrapped = codec.encode_forward_return(&inner).unwrap();
        assert_ne!(wrapped, inner);

        let unwrapped = codec.decode_forward(&wrapped).unwrap();
        assert_eq!(unwrapped, inner);
        assert_eq!(
            codec.decode(IS_ORDER_PAID, &unwrapped).unwrap(),
            vec![DynSolValue::Bool(true)]
        );
    }

    #[test]
    fn test_forward_document_must_declare_forward() {
        let err = AbiCodec::from_documents(CORE_ABI_JSON, "[]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}

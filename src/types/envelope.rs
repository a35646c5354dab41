//! Result envelopes returned by the public order operations
//!
//! An envelope never carries both data and an error: on failure every domain field is
//! `None` and `error` holds the message.
//!
//! The JSON form is meant to be handed straight to web clients: token amounts are decimal
//! strings and addresses are EIP-55 checksummed.

use super::OrderStatus;
use crate::error::Result;
use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Outcome of `is_order_paid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPaidResult {
    pub success: bool,
    pub paid: Option<bool>,
    pub error: Option<String>,
}

impl From<Result<bool>> for OrderPaidResult {
    fn from(result: Result<bool>) -> Self {
        match result {
            Ok(paid) => Self {
                success: true,
                paid: Some(paid),
                error: None,
            },
            Err(err) => Self {
                success: false,
                paid: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Outcome of `get_order_status` / `get_order_details`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusResult {
    pub success: bool,
    pub paid: Option<bool>,
    #[serde(with = "checksummed")]
    pub token: Option<Address>,
    #[serde(with = "decimal")]
    pub amount: Option<U256>,
    #[serde(with = "decimal")]
    pub fee: Option<U256>,
    pub timestamp: Option<u64>,
    pub error: Option<String>,
}

/// `U256` as a base-10 string, since JSON numbers lose precision past 2^53
mod decimal {
    use alloy::primitives::U256;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Address in EIP-55 mixed case
mod checksummed {
    use alloy::primitives::Address;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<Address>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(address) => serializer.serialize_str(&address.to_checksum(None)),
            None => serializer.serialize_none(),
        }
    }
}

impl From<Result<OrderStatus>> for OrderStatusResult {
    fn from(result: Result<OrderStatus>) -> Self {
        match result {
            Ok(status) => Self {
                success: true,
                paid: Some(status.paid()),
                token: Some(status.token()),
                amount: Some(status.amount()),
                fee: Some(status.fee()),
                timestamp: Some(status.timestamp()),
                error: None,
            },
            Err(err) => Self {
                success: false,
                paid: None,
                token: None,
                amount: None,
                fee: None,
                timestamp: None,
                error: Some(err.to_string()),
            },
        }
    }
}

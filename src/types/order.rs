//! On-chain order settlement record

use crate::error::{PayraError, Result};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Settlement details of an order, as stored by the Payra contract
///
/// Only ever produced by decoding a contract call result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderStatus {
    paid: bool,
    token: Address,
    amount: U256,
    fee: U256,
    timestamp: u64,
}

impl OrderStatus {
    /// Whether the order has been paid
    pub fn paid(&self) -> bool {
        self.paid
    }

    /// Token the order was paid in
    pub fn token(&self) -> Address {
        self.token
    }

    /// Amount paid, in the token's smallest unit
    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Protocol fee, in the token's smallest unit
    pub fn fee(&self) -> U256 {
        self.fee
    }

    /// Settlement time (Unix seconds)
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Build from the decoded outputs of `getOrderStatus` / `getOrderDetails`
    ///
    /// Accepts either a single tuple output or the five fields returned flat.
    pub(crate) fn from_values(function: &str, values: &[DynSolValue]) -> Result<Self> {
        let fields = match values {
            [single] => single.as_tuple().ok_or_else(|| {
                PayraError::decoding(function, format!("expected a tuple, got {single:?}"))
            })?,
            flat => flat,
        };

        let [paid, token, amount, fee, timestamp] = fields else {
            return Err(PayraError::decoding(
                function,
                format!("expected 5 fields, got {}", fields.len()),
            ));
        };

        let field_error = |name: &str| PayraError::decoding(function, format!("bad field {name}"));

        let timestamp = timestamp
            .as_uint()
            .ok_or_else(|| field_error("timestamp"))?
            .0;

        Ok(Self {
            paid: paid.as_bool().ok_or_else(|| field_error("paid"))?,
            token: token.as_address().ok_or_else(|| field_error("token"))?,
            amount: amount.as_uint().ok_or_else(|| field_error("amount"))?.0,
            fee: fee.as_uint().ok_or_else(|| field_error("fee"))?.0,
            timestamp: u64::try_from(timestamp).map_err(|_| field_error("timestamp"))?,
        })
    }
}

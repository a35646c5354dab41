//! Error types for the Payra SDK
//!
//! Every failure inside the SDK is a [`PayraError`]. The envelope operations on
//! [`PayraClient`](crate::PayraClient) fold these into their `error` field, while the
//! typed operations hand them back so callers can branch on [`ErrorKind`].

/// Errors produced by the Payra SDK
#[derive(Debug, thiserror::Error)]
pub enum PayraError {
    /// Missing or malformed network configuration
    #[error("{0}")]
    Config(String),

    /// Signing key is not a 32-byte hex string
    #[error("Invalid private key for {network}")]
    InvalidKey { network: String },

    /// Selected RPC endpoint failed its health probe
    #[error("RPC {url} is not responding")]
    RpcUnavailable { url: String },

    /// Call data could not be built for a contract function
    #[error("Failed to encode {function}: {reason}")]
    Encoding { function: String, reason: String },

    /// Return data did not match the function's declared outputs
    #[error("Failed to decode {function}: {reason}")]
    Decoding { function: String, reason: String },

    /// The static call reverted, failed in transport or timed out
    #[error("Contract call failed: {0}")]
    ContractCall(String),

    /// The secp256k1 signer rejected the digest
    #[error("Signing failed: {0}")]
    Signing(#[from] alloy::signers::Error),
}

/// Fieldless discriminant of [`PayraError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    InvalidKey,
    RpcUnavailable,
    Encoding,
    Decoding,
    ContractCall,
    Signing,
}

impl PayraError {
    /// Which class of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidKey { .. } => ErrorKind::InvalidKey,
            Self::RpcUnavailable { .. } => ErrorKind::RpcUnavailable,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Decoding { .. } => ErrorKind::Decoding,
            Self::ContractCall(_) => ErrorKind::ContractCall,
            Self::Signing(_) => ErrorKind::Signing,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn encoding(function: &str, reason: impl ToString) -> Self {
        Self::Encoding {
            function: function.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn decoding(function: &str, reason: impl ToString) -> Self {
        Self::Decoding {
            function: function.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the SDK
pub type Result<T, E = PayraError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_unavailable_message() {
        let err = PayraError::RpcUnavailable {
            url: "https://rpc.example".into(),
        };
        assert_eq!(err.to_string(), "RPC https://rpc.example is not responding");
        assert_eq!(err.kind(), ErrorKind::RpcUnavailable);
    }

    #[test]
    fn test_invalid_key_message() {
        let err = PayraError::InvalidKey {
            network: "polygon".into(),
        };
        assert_eq!(err.to_string(), "Invalid private key for polygon");
    }
}

//! Contract interfaces for the Payra protocol
//!
//! Two interfaces are embedded as JSON ABI documents:
//! - the core contract (order queries and registry lookup)
//! - the forward proxy, which relays opaque call data to the current core implementation

mod codec;

pub use codec::AbiCodec;

/// JSON ABI of the Payra core contract
pub const CORE_ABI_JSON: &str = include_str!("abi/payra_core.json");

/// JSON ABI of the Payra forward proxy
pub const FORWARD_ABI_JSON: &str = include_str!("abi/payra_forward.json");

/// `isOrderPaid(uint256,string) returns (bool)`
pub const IS_ORDER_PAID: &str = "isOrderPaid";

/// `getOrderStatus(uint256,string) returns (OrderStatus)`, served behind the forward proxy
pub const GET_ORDER_STATUS: &str = "getOrderStatus";

/// `getOrderDetails(uint256,string) returns (OrderStatus)`, served by the user-data contract
pub const GET_ORDER_DETAILS: &str = "getOrderDetails";

/// `getRegistryDetails() returns (address,address,address,address)`
pub const GET_REGISTRY_DETAILS: &str = "getRegistryDetails";

/// `forward(bytes) payable returns (bytes)`
pub const FORWARD: &str = "forward";

//! RPC endpoint selection and liveness checks
//!
//! Every operation picks exactly one configured endpoint through an [`EndpointSelector`]
//! and probes it once. A failed probe fails the operation; there is no fallback to another
//! candidate, so callers own any retry policy.

mod health;
mod selector;

pub use health::HealthProbe;
pub use selector::{EndpointSelector, PrioritySelector, RandomSelector, RoundRobinSelector};

//! Sign an authorization and check an order against a live network
//!
//! Run with: cargo run --example verify_order -- <network> <order-id>
//!
//! Reads PAYRA_* settings from the environment or a `.env` file

use alloy::primitives::{address, U256};
use payra_sdk::PayraClient;
use std::time::{SystemTime, UNIX_EPOCH};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let network = args.next().unwrap_or_else(|| "polygon".to_string());
    let order_id = args.next().unwrap_or_else(|| "order_123".to_string());

    let client = PayraClient::from_env()?;

    // Example token (POL) and payer
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let signature = client.generate_signature(
        &network,
        address!("0000000000000000000000000000000000001010"),
        &order_id,
        U256::from(10u64).pow(U256::from(18u64)),
        timestamp,
        address!("1111111111111111111111111111111111111111"),
    )?;
    println!("Signature generated: {signature}");

    let paid = client.is_order_paid(&network, &order_id).await;
    println!("isOrderPaid: {}", serde_json::to_string_pretty(&paid)?);

    let status = client.get_order_status(&network, &order_id).await;
    println!("getOrderStatus: {}", serde_json::to_string_pretty(&status)?);

    Ok(())
}

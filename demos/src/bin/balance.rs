//! Credit balance demo.
//!
//! # Running
//!
//! ```bash
//! export VERIFALIA_TOKEN="..."
//! cargo run --bin balance
//! ```

use std::env;

use verifalia::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let token = env::var("VERIFALIA_TOKEN")
        .map_err(|_| Error::configuration("VERIFALIA_TOKEN must be set"))?;

    let client = Client::builder()
        .credentials(BearerCredentialsConfig::new(token))
        .build()?;

    let balance = client.credits().get_balance().await?;
    println!("Credit packs: {}", balance.credit_packs);
    if let Some(free) = balance.free_credits {
        println!("Free credits: {free}");
    }

    let usages = client.credits().list_daily_usages().limit(7).await?;
    for usage in &usages.items {
        println!("{}: {} packs, {} free", usage.date, usage.credit_packs, usage.free_credits);
    }

    Ok(())
}

//! Fetch one day of Bitcoin/Ethereum news and print it.
//!
//! ```text
//! export MESSARI_API_KEY="..."
//! cargo run --example news_feed
//! ```

use messari_sdk::{CallParams, MessariClient, PageOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    messari_sdk::init_tracing();

    let client = MessariClient::from_env()?;

    let params = CallParams::new().query([
        ("assetIds", json!("bitcoin,ethereum")),
        ("publishedAfter", json!("2025-11-15T00:00:00Z")),
        ("publishedBefore", json!("2025-11-16T00:00:00Z")),
        ("limit", json!(50)),
        ("sort", json!(2)),
    ]);

    let data = client.call("news.feed", &params).await?;
    println!("{}", MessariClient::pretty(&data.unwrap_or_default()));

    let sources = client
        .paged_call(
            "news.sources",
            &CallParams::new().query([("sourceTypes", json!("News")), ("limit", json!(10))]),
            &PageOptions::new("page", 2),
        )
        .await?;
    for (page, payload) in sources.iter().enumerate() {
        println!("--- sources page {page} ---");
        println!("{}", MessariClient::pretty(payload.as_ref().unwrap_or(&json!(null))));
    }

    Ok(())
}

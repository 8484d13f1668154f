//! Looks up restrooms near downtown Portland, then runs a text search.
//!
//! Run with: `cargo run --example nearby`
//!
//! Set `RUST_LOG=refuge_restrooms=debug` to see each request.

use refuge_restrooms::{ApiResult, LocationQuery, RestroomClient, SearchQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), refuge_restrooms::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("refuge_restrooms=info,nearby=info")),
        )
        .init();

    let client = RestroomClient::new()?;

    println!("=== Nearby (ADA accessible) ===");
    let nearby = client
        .get_by_location(&LocationQuery::new(45.5231, -122.6765).ada(true).per_page(5))
        .await;
    print_names(&nearby);
    println!();

    println!("=== Search: \"coffee\" ===");
    let found = client
        .search(&SearchQuery::new("coffee").unisex(true).per_page(5))
        .await;
    print_names(&found);

    Ok(())
}

fn print_names(result: &ApiResult) {
    match result {
        ApiResult::Success(json) => {
            let restrooms = json.as_array().map(Vec::as_slice).unwrap_or_default();
            if restrooms.is_empty() {
                println!("No restrooms found");
            }
            for restroom in restrooms {
                println!(
                    "- {} ({}, {})",
                    restroom["name"].as_str().unwrap_or("unnamed"),
                    restroom["street"].as_str().unwrap_or("?"),
                    restroom["city"].as_str().unwrap_or("?"),
                );
            }
        }
        ApiResult::Failure(err) => eprintln!("Request failed: {}", err),
    }
}

//! # refuge-restrooms - a client for the Refuge Restrooms API
//!
//! [Refuge Restrooms](https://www.refugerestrooms.org) lists safe restroom
//! access for transgender, intersex and gender nonconforming people. This
//! crate wraps its read-only JSON API: restrooms by date, by location, by
//! free-text search, and an unfiltered listing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use refuge_restrooms::{DateQuery, ListOptions, LocationQuery, RestroomClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), refuge_restrooms::Error> {
//!     let client = RestroomClient::new()?;
//!
//!     // Nearest ADA accessible restrooms
//!     let nearby = client
//!         .get_by_location(&LocationQuery::new(45.5231, -122.6765).ada(true))
//!         .await;
//!     println!("{}", nearby.into_json());
//!
//!     // Added or updated since the start of 2024
//!     let recent = client
//!         .get_by_date(&DateQuery::new(1, 1, 2024).updated(true))
//!         .await;
//!     println!("{}", recent.into_json());
//!
//!     let found = client.search(&SearchQuery::new("public library")).await;
//!     let page_two = client.list_all(&ListOptions::new().page(2)).await;
//!     println!("{} / {}", found.is_success(), page_two.is_success());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The query operations report failures as data. An [`ApiResult`] is either
//! the server's JSON, untouched, or an [`ErrorBody`] that renders as
//! `{"error": "HTTP Error: 404", "success": false}` for non-200 responses or
//! `{"error": "Exception: ...", "success": false}` for transport and decoding
//! failures.
//!
//! ```no_run
//! use refuge_restrooms::{ApiResult, ListOptions, RestroomClient};
//!
//! # async fn example() -> Result<(), refuge_restrooms::Error> {
//! # let client = RestroomClient::new()?;
//! match client.list_all(&ListOptions::default()).await {
//!     ApiResult::Success(json) => println!("{}", json),
//!     ApiResult::Failure(err) => eprintln!("failed: {}", err.error),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For the typed [`Error`] with status, headers and raw body, call
//! [`RestroomClient::request`] directly.
//!
//! ## TLS
//!
//! Certificates are always validated unless
//! [`ClientBuilder::danger_accept_invalid_certs`] is used, which exists for
//! test servers only.

mod client;
pub mod config;
mod error;
pub mod params;
mod response;
mod result;

pub use client::{ClientBuilder, RestroomClient};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use params::{DateQuery, ListOptions, LocationQuery, QueryParams, SearchQuery};
pub use response::Response;
pub use result::{ApiResult, ErrorBody};

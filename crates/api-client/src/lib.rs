//! API client for the Advertboard marketplace backend
//!
//! This crate provides a typed HTTP client for the listings, auth,
//! subscription and donation endpoints of an Advertboard backend.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load the backend URL and token file from environment variables
//! - **Bearer auth**: The stored access token is attached to every request
//! - **Shape normalization**: Listings arrive in two naming schemes and leave in one
//! - **Marker errors**: `requiresKey`, `cannotUpvoteOwn` and `limitReached` surface as [`ErrorKind`]
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use advertboard_api_client::{AdvertboardClient, ErrorKind};
//! use advertboard_api_client::endpoints::adverts::SearchParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AdvertboardClient::new()?;
//!
//!     let adverts = client.adverts().list(&SearchParams::new().with_query("bike")).await?;
//!     println!("Found {} adverts", adverts.len());
//!
//!     if let Some(first) = adverts.first() {
//!         match client.adverts().upvote(&first.id).await {
//!             Ok(vote) => println!("{} upvotes", vote.upvotes),
//!             Err(e) if e.kind() == ErrorKind::CannotUpvoteOwn => println!("That one is yours"),
//!             Err(e) => return Err(e.into()),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod normalize;
pub mod tokens;

pub use client::AdvertboardClient;
pub use config::{ClientConfig, Environment};
pub use endpoints::auth::User;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use normalize::{Advert, CustomField, Post, Visibility};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenStore, Tokens};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::AdvertboardClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{AdvertsApi, AuthApi, DonationsApi, PostsApi, SubscriptionsApi};
    pub use crate::error::{ApiError, ApiResult, ErrorKind};
    pub use crate::normalize::{Advert, CustomField, Post, Visibility};
    pub use crate::tokens::{TokenStore, Tokens};
}

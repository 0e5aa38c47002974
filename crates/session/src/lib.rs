//! Session state for Advertboard clients
//!
//! The session is the one place that knows who is signed in. It owns the
//! persisted tokens, verifies them on startup and publishes every change.
//!
//! # Example
//!
//! ```rust,no_run
//! use advertboard_api_client::AdvertboardClient;
//! use advertboard_session::SessionManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AdvertboardClient::new()?;
//!     let session = SessionManager::new(&client);
//!
//!     if !session.restore().await.authenticated {
//!         let user = session.login("ann@example.com", "secret").await?;
//!         println!("Signed in as {}", user.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod manager;
pub mod scope;
pub mod state;

pub use manager::SessionManager;
pub use scope::ViewScope;
pub use state::{Session, SessionState};

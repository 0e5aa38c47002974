//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of backend endpoints.
//!
//! ## Mapping to the backend
//!
//! | Module | Backend resource | Description |
//! |--------|-----------------|-------------|
//! | `adverts` | `/api/adverts` | Listings CRUD, engagement, share links |
//! | `posts` | `/api/adverts` | Same listings in the reduced post shape |
//! | `auth` | `/api/auth` | Login, registration, logout, current user |
//! | `subscriptions` | `/api/subscriptions` | Premium subscriptions |
//! | `donations` | `/api/donations` | One-off and recurring donations |

pub mod adverts;
pub mod auth;
pub mod donations;
pub mod posts;
pub mod subscriptions;

pub use adverts::AdvertsApi;
pub use auth::AuthApi;
pub use donations::DonationsApi;
pub use posts::PostsApi;
pub use subscriptions::SubscriptionsApi;

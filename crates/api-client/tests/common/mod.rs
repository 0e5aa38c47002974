//! Shared helpers for endpoint tests

#![allow(dead_code)]

use advertboard_api_client::{AdvertboardClient, ClientConfig, MemoryTokenStore, Tokens};
use std::sync::Arc;
use wiremock::MockServer;

/// Client pointed at `server` with an in-memory token store
pub fn client_for(server: &MockServer) -> (AdvertboardClient, Arc<MemoryTokenStore>) {
    client_with_tokens(server, Tokens::default())
}

/// Client pointed at `server` with pre-seeded tokens
pub fn client_with_tokens(
    server: &MockServer,
    tokens: Tokens,
) -> (AdvertboardClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_tokens(tokens));
    let config = ClientConfig::development()
        .with_base_url(server.uri())
        .without_token_file();
    let client = AdvertboardClient::with_store(config, store.clone()).unwrap();
    (client, store)
}

/// Tokens holding only an access token
pub fn access_only(token: &str) -> Tokens {
    Tokens {
        access_token: Some(token.to_string()),
        refresh_token: None,
    }
}

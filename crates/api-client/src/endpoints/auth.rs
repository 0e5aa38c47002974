//! Authentication endpoints
//!
//! These calls only talk to the backend. Persisting the returned tokens is
//! the session's job.

use crate::client::AdvertboardClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: AdvertboardClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: AdvertboardClient) -> Self {
        Self { client }
    }

    /// Sign in
    ///
    /// POST /api/auth/login
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.client
            .post("api/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Create an account; no refresh token is issued
    ///
    /// POST /api/auth/register
    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<RegisterResponse> {
        self.client
            .post("api/auth/register", &RegisterRequest { name, email, password })
            .await
    }

    /// Invalidate a refresh token
    ///
    /// POST /api/auth/logout
    pub async fn logout(&self, refresh_token: &str) -> ApiResult<LogoutResponse> {
        self.client
            .post("api/auth/logout", &LogoutRequest { refresh_token })
            .await
    }

    /// The user owning the current access token
    ///
    /// GET /api/auth/me
    pub async fn me(&self) -> ApiResult<User> {
        let response: CurrentUserResponse = self.client.get("api/auth/me").await?;
        Ok(response.user)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutRequest<'a> {
    refresh_token: &'a str,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier, from `_id` or `id`
    pub id: String,
    /// Sign-in email
    pub email: String,
    /// Display name
    pub name: String,
    /// Entitlement derived from subscription state
    pub has_premium_access: bool,
    /// Karma score
    pub good_karma: i64,
}

/// User as the backend sends it; the identifier arrives as `_id` or `id`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    #[serde(rename = "_id")]
    underscore_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "has_premium_access", alias = "hasPremiumAccess", default)]
    has_premium_access: bool,
    #[serde(default)]
    good_karma: i64,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        let id = [wire.underscore_id, wire.id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        Self {
            id,
            email: wire.email,
            name: wire.name,
            has_premium_access: wire.has_premium_access,
            good_karma: wire.good_karma,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer credential
    pub access_token: String,
    /// Renewal credential
    pub refresh_token: String,
    /// The signed-in user
    pub user: User,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Bearer credential
    pub access_token: String,
    /// The new user
    pub user: User,
}

/// Logout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Confirmation text, empty when none was sent
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct CurrentUserResponse {
    user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_underscore_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","email":"a@b.c","name":"Ann","has_premium_access":true,"goodKarma":7}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.has_premium_access);
        assert_eq!(user.good_karma, 7);
    }

    #[test]
    fn test_user_from_plain_id() {
        let user: User = serde_json::from_str(r#"{"id":"u2","email":"a@b.c","name":"Ann"}"#).unwrap();
        assert_eq!(user.id, "u2");
        assert!(!user.has_premium_access);
        assert_eq!(user.good_karma, 0);
    }

    #[test]
    fn test_user_premium_alias() {
        let user: User =
            serde_json::from_str(r#"{"id":"u3","email":"e","name":"n","hasPremiumAccess":true}"#).unwrap();
        assert!(user.has_premium_access);
    }

    #[test]
    fn test_logout_request_shape() {
        let body = serde_json::to_value(LogoutRequest { refresh_token: "r1" }).unwrap();
        assert_eq!(body, serde_json::json!({"refreshToken": "r1"}));
    }

    #[test]
    fn test_login_response_deserialize() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"accessToken":"a","refreshToken":"r","user":{"id":"u1","email":"e","name":"n"}}"#,
        )
        .unwrap();
        assert_eq!(response.access_token, "a");
        assert_eq!(response.refresh_token, "r");
        assert_eq!(response.user.id, "u1");
    }
}

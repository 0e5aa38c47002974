//! CLI command implementations

pub mod account;
pub mod adverts;
pub mod donate;
pub mod posts;
pub mod subscriptions;

use crate::output::OutputFormat;
use advertboard_api_client::{AdvertboardClient, CustomField, User};
use advertboard_session::SessionManager;
use anyhow::{anyhow, Context as _, Result};

/// Everything a command needs: the client, the session and the output format
pub struct Context {
    pub client: AdvertboardClient,
    pub session: SessionManager,
    pub format: OutputFormat,
}

impl Context {
    /// Build the client from the environment and attach a session to it
    pub fn from_env(format: OutputFormat) -> Result<Self> {
        let client = AdvertboardClient::new().context("Failed to configure the API client")?;
        let session = SessionManager::new(&client);
        Ok(Self {
            client,
            session,
            format,
        })
    }

    /// Whether output should be JSON
    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Restore the persisted session and return its user
    pub async fn require_user(&self) -> Result<User> {
        self.session
            .restore()
            .await
            .user
            .ok_or_else(|| anyhow!("Not signed in. Run `advertboard login` first."))
    }
}

/// Parse `name=value` into a custom field
pub fn parse_field(raw: &str) -> Result<CustomField, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name is empty in `{raw}`"));
    }
    Ok(CustomField::new(name, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        let field = parse_field("Colour = red").unwrap();
        assert_eq!(field.name, "Colour");
        assert_eq!(field.value, "red");
    }

    #[test]
    fn test_parse_field_keeps_extra_equals() {
        let field = parse_field("formula=a=b").unwrap();
        assert_eq!(field.value, "a=b");
    }

    #[test]
    fn test_parse_field_rejects_missing_separator() {
        assert!(parse_field("colour").is_err());
        assert!(parse_field("=red").is_err());
    }
}

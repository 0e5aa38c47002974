//! Advert API endpoints
//!
//! Maps to the `/api/adverts` resource:
//! - Search and list adverts
//! - Get, create, update, delete a single advert
//! - Engagement: upvotes, view tracking, stats
//! - Public and private share links
//!
//! Listings come back in whichever naming scheme the backend used and are
//! normalized to [`Advert`] before they are returned.

use crate::client::{path_segment, AdvertboardClient, Query};
use crate::error::ApiResult;
use crate::normalize::{Advert, CustomField, FieldNaming, ListingBody, RawAdvert, Visibility};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Advert API interface
#[derive(Clone)]
pub struct AdvertsApi {
    client: AdvertboardClient,
}

impl AdvertsApi {
    /// Create a new adverts API interface
    pub(crate) fn new(client: AdvertboardClient) -> Self {
        Self { client }
    }

    /// Search adverts
    ///
    /// GET /api/adverts
    pub async fn list(&self, params: &SearchParams) -> ApiResult<Vec<Advert>> {
        let response: AdvertListWire = self
            .client
            .get_with_query("api/adverts", &params.to_query())
            .await?;
        Ok(response.into_adverts())
    }

    /// Get a single advert, passing the private access key when given
    ///
    /// GET /api/adverts/:id
    ///
    /// Private adverts fail with `ErrorKind::RequiresKey` when the key is
    /// missing or wrong.
    pub async fn get(&self, id: &str, key: Option<&str>) -> ApiResult<Advert> {
        debug!(advert_id = %id, with_key = key.is_some(), "Fetching advert");
        let path = format!("api/adverts/{}", path_segment(id)?);
        let response: AdvertWire = match key {
            Some(key) => {
                let query: Query = vec![("key", key.to_string())];
                self.client.get_with_query(&path, &query).await?
            }
            None => self.client.get(&path).await?,
        };
        Ok(response.advert.into())
    }

    /// Create a new advert
    ///
    /// POST /api/adverts
    ///
    /// Fails with `ErrorKind::LimitReached` when the plan's listing limit is
    /// exhausted.
    pub async fn create(&self, advert: &CreateAdvertRequest) -> ApiResult<AdvertWithMessage> {
        let response: AdvertMessageWire = self.client.post("api/adverts", &advert.body()).await?;
        Ok(response.into())
    }

    /// Update an existing advert; only the fields set are sent
    ///
    /// PUT /api/adverts/:id
    pub async fn update(&self, id: &str, advert: &UpdateAdvertRequest) -> ApiResult<AdvertWithMessage> {
        let path = format!("api/adverts/{}", path_segment(id)?);
        let response: AdvertMessageWire = self.client.put(&path, &advert.body()).await?;
        Ok(response.into())
    }

    /// Delete an advert
    ///
    /// DELETE /api/adverts/:id
    pub async fn delete(&self, id: &str) -> ApiResult<MessageResponse> {
        self.client.delete(&format!("api/adverts/{}", path_segment(id)?)).await
    }

    /// Adverts owned by the signed-in user
    ///
    /// GET /api/adverts/user/me
    pub async fn mine(&self) -> ApiResult<Vec<Advert>> {
        let response: AdvertListWire = self.client.get("api/adverts/user/me").await?;
        let adverts = response.into_adverts();
        if let Some(first) = adverts.first() {
            debug!(count = adverts.len(), first_id = %first.id, "Fetched own adverts");
        }
        Ok(adverts)
    }

    /// Upvote an advert
    ///
    /// POST /api/adverts/:id/upvote
    ///
    /// Fails with `ErrorKind::CannotUpvoteOwn` for the caller's own listing.
    pub async fn upvote(&self, id: &str) -> ApiResult<UpvoteResponse> {
        debug!(advert_id = %id, "Upvoting advert");
        self.client.post_empty(&format!("api/adverts/{}/upvote", path_segment(id)?)).await
    }

    /// Record a view
    ///
    /// POST /api/adverts/:id/view
    pub async fn track_view(&self, id: &str) -> ApiResult<ViewResponse> {
        self.client.post_empty(&format!("api/adverts/{}/view", path_segment(id)?)).await
    }

    /// Public share link
    ///
    /// GET /api/adverts/:id/share
    pub async fn share_link(&self, id: &str) -> ApiResult<ShareLinkResponse> {
        self.client.get(&format!("api/adverts/{}/share", path_segment(id)?)).await
    }

    /// Private share link with its access key
    ///
    /// GET /api/adverts/:id/share-private
    pub async fn private_share_link(&self, id: &str) -> ApiResult<PrivateShareLinkResponse> {
        self.client.get(&format!("api/adverts/{}/share-private", path_segment(id)?)).await
    }

    /// Engagement statistics
    ///
    /// GET /api/adverts/:id/stats
    pub async fn stats(&self, id: &str) -> ApiResult<AdvertStats> {
        self.client.get(&format!("api/adverts/{}/stats", path_segment(id)?)).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Search parameters for listing adverts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    pub query: Option<String>,
    /// Tags, all sent as `tags[]`
    pub tags: Vec<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Radius in km around `lat`/`lng`
    pub radius: Option<f64>,
    /// Latitude for geo-search
    pub lat: Option<f64>,
    /// Longitude for geo-search
    pub lng: Option<f64>,
}

impl SearchParams {
    /// Create new params with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add a tag filter
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Filter by free-text location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Filter by distance around a point
    #[must_use]
    pub fn with_radius(mut self, lat: f64, lng: f64, radius: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self.radius = Some(radius);
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        let mut query = Query::new();

        if let Some(ref q) = self.query {
            query.push(("query", q.clone()));
        }
        for tag in &self.tags {
            query.push(("tags[]", tag.clone()));
        }
        if let Some(ref location) = self.location {
            query.push(("location", location.clone()));
        }
        if let Some(radius) = self.radius {
            query.push(("radius", radius.to_string()));
        }
        if let Some(lat) = self.lat {
            query.push(("lat", lat.to_string()));
        }
        if let Some(lng) = self.lng {
            query.push(("lng", lng.to_string()));
        }

        query
    }
}

/// Create advert request
///
/// Sent through the listing body, never serialized directly.
#[derive(Debug, Clone, Default)]
pub struct CreateAdvertRequest {
    /// Listing title
    pub title: String,
    /// Listing text
    pub description: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Custom fields, sent as `customFields`
    pub custom_fields: Option<Vec<CustomField>>,
    /// Tags
    pub tags: Option<Vec<String>>,
    /// Public or private listing; the backend default applies when unset
    pub visibility: Option<Visibility>,
}

impl CreateAdvertRequest {
    /// Create a request with the required fields
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    fn body(&self) -> ListingBody<'_> {
        ListingBody {
            title: Some(&self.title),
            description: Some(&self.description),
            image: self.image.as_deref(),
            location: self.location.as_deref(),
            custom_fields: self
                .custom_fields
                .as_deref()
                .map(|f| FieldNaming::Camel.wrap(f)),
            tags: self.tags.as_deref(),
            visibility: self.visibility,
        }
    }
}

/// Update advert request; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateAdvertRequest {
    /// New title
    pub title: Option<String>,
    /// New listing text
    pub description: Option<String>,
    /// New image URL
    pub image: Option<String>,
    /// New location
    pub location: Option<String>,
    /// Replacement custom fields, sent as `customFields`
    pub custom_fields: Option<Vec<CustomField>>,
    /// Replacement tags
    pub tags: Option<Vec<String>>,
    /// New visibility
    pub visibility: Option<Visibility>,
}

impl UpdateAdvertRequest {
    fn body(&self) -> ListingBody<'_> {
        ListingBody {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            image: self.image.as_deref(),
            location: self.location.as_deref(),
            custom_fields: self
                .custom_fields
                .as_deref()
                .map(|f| FieldNaming::Camel.wrap(f)),
            tags: self.tags.as_deref(),
            visibility: self.visibility,
        }
    }
}

/// Advert plus the backend's confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct AdvertWithMessage {
    /// The stored advert
    pub advert: Advert,
    /// Confirmation text from the backend
    pub message: String,
}

/// Message-only response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Confirmation text from the backend
    pub message: String,
}

/// Upvote response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpvoteResponse {
    /// Upvote count after the change
    pub upvotes: u64,
    /// Whether the caller now upvotes the advert
    pub upvoted: bool,
}

/// View tracking response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewResponse {
    /// View count after recording this view
    pub views: u64,
}

/// Public share link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    /// Public link to the advert
    pub url: String,
}

/// Private share link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateShareLinkResponse {
    /// Link including the access key
    pub url: String,
    /// Access key for the private advert
    pub key: String,
    /// Optional note from the backend
    #[serde(default)]
    pub message: String,
}

/// Engagement statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertStats {
    /// Total upvotes
    pub upvotes: u64,
    /// Total views
    pub views: u64,
    /// Whether the caller has upvoted
    pub upvoted: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvertListWire {
    pub(crate) adverts: Option<Vec<RawAdvert>>,
}

impl AdvertListWire {
    fn into_adverts(self) -> Vec<Advert> {
        self.adverts
            .unwrap_or_default()
            .into_iter()
            .map(Advert::from)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvertWire {
    pub(crate) advert: RawAdvert,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdvertMessageWire {
    pub(crate) advert: RawAdvert,
    #[serde(default)]
    pub(crate) message: String,
}

impl From<AdvertMessageWire> for AdvertWithMessage {
    fn from(wire: AdvertMessageWire) -> Self {
        Self {
            advert: wire.advert.into(),
            message: wire.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_query() {
        let params = SearchParams::new()
            .with_query("bike")
            .with_tag("sport")
            .with_tag("outdoor")
            .with_radius(52.52, 13.405, 10.0);

        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("query", "bike".to_string()),
                ("tags[]", "sport".to_string()),
                ("tags[]", "outdoor".to_string()),
                ("radius", "10".to_string()),
                ("lat", "52.52".to_string()),
                ("lng", "13.405".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_search_params() {
        assert!(SearchParams::new().to_query().is_empty());
    }

    #[test]
    fn test_create_body_uses_camel_case_fields() {
        let mut request = CreateAdvertRequest::new("Bike", "Blue bike");
        request.custom_fields = Some(vec![CustomField::new("size", "M")]);
        request.visibility = Some(Visibility::Private);

        let value = serde_json::to_value(request.body()).unwrap();
        assert_eq!(value["title"], "Bike");
        assert_eq!(value["customFields"][0]["name"], "size");
        assert_eq!(value["visibility"], "private");
        assert!(value.get("custom_fields").is_none());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_update_body_is_partial() {
        let request = UpdateAdvertRequest {
            description: Some("New text".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(request.body()).unwrap();
        assert_eq!(value, serde_json::json!({"description": "New text"}));
    }

    #[test]
    fn test_update_body_renames_custom_fields() {
        let request = UpdateAdvertRequest {
            custom_fields: Some(vec![CustomField::new("size", "L")]),
            ..Default::default()
        };
        let value = serde_json::to_value(request.body()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"customFields": [{"name": "size", "value": "L"}]})
        );
    }

    #[test]
    fn test_list_wire_normalizes() {
        let wire: AdvertListWire = serde_json::from_str(
            r#"{"adverts":[{"id":"x1","title":"T","description":"D","custom_fields":[{"name":"a","value":"b"}]}]}"#,
        )
        .unwrap();
        let adverts = wire.into_adverts();
        assert_eq!(adverts[0].legacy_id, "x1");
        assert_eq!(adverts[0].custom_fields.len(), 1);
    }
}

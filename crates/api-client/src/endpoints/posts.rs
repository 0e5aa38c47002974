//! Post API endpoints
//!
//! Same `/api/adverts` resource as [`super::adverts`], viewed through the
//! reduced [`Post`] shape. Outgoing custom fields travel as `custom_fields`;
//! incoming listings are normalized whichever key the backend used.

use crate::client::{path_segment, AdvertboardClient};
use crate::endpoints::adverts::{
    AdvertListWire, AdvertMessageWire, AdvertWire, MessageResponse, SearchParams,
};
use crate::error::{ApiError, ApiResult};
use crate::normalize::{CustomField, FieldNaming, ListingBody, Post, RawAdvert};
use serde::Serialize;
use tracing::{debug, warn};

/// Post API interface
#[derive(Clone)]
pub struct PostsApi {
    client: AdvertboardClient,
}

impl PostsApi {
    /// Create a new posts API interface
    pub(crate) fn new(client: AdvertboardClient) -> Self {
        Self { client }
    }

    /// Search posts
    ///
    /// GET /api/adverts
    pub async fn list(&self, params: &SearchParams) -> ApiResult<Vec<Post>> {
        let response: AdvertListWire = self
            .client
            .get_with_query("api/adverts", &params.to_query())
            .await?;
        Ok(into_posts(response.adverts.unwrap_or_default()))
    }

    /// Get a single post
    ///
    /// GET /api/adverts/:id
    pub async fn get(&self, id: &str) -> ApiResult<Post> {
        let response: AdvertWire = self.client.get(&format!("api/adverts/{}", path_segment(id)?)).await?;
        Ok(response.advert.into())
    }

    /// Create a post
    ///
    /// POST /api/adverts
    pub async fn create(&self, post: &PostRequest) -> ApiResult<PostWithMessage> {
        let response: AdvertMessageWire = self.client.post("api/adverts", &post.body()).await?;
        Ok(response.into())
    }

    /// Update a post; only the fields set are sent
    ///
    /// PUT /api/adverts/:id
    pub async fn update(&self, id: &str, post: &PostRequest) -> ApiResult<PostWithMessage> {
        let response: AdvertMessageWire = self
            .client
            .put(&format!("api/adverts/{}", path_segment(id)?), &post.body())
            .await?;
        Ok(response.into())
    }

    /// Delete a post
    ///
    /// DELETE /api/adverts/:id
    pub async fn delete(&self, id: &str) -> ApiResult<MessageResponse> {
        self.client.delete(&format!("api/adverts/{}", path_segment(id)?)).await
    }

    /// Posts owned by the signed-in user
    ///
    /// GET /api/adverts/user/me
    pub async fn mine(&self) -> ApiResult<Vec<Post>> {
        let response: Option<AdvertListWire> = self.client.get("api/adverts/user/me").await?;
        match response.and_then(|r| r.adverts) {
            Some(adverts) => {
                debug!(count = adverts.len(), "Fetched own posts");
                Ok(into_posts(adverts))
            }
            None => {
                warn!("Own posts response had no adverts array");
                Err(ApiError::unexpected("Failed to retrieve user posts"))
            }
        }
    }
}

fn into_posts(adverts: Vec<RawAdvert>) -> Vec<Post> {
    adverts.into_iter().map(Post::from).collect()
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Create or update post request
///
/// For creation `title` and `description` are expected; for updates any
/// subset may be set.
#[derive(Debug, Clone, Default)]
pub struct PostRequest {
    /// Post title
    pub title: Option<String>,
    /// Post text
    pub description: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Custom fields, sent as `custom_fields`
    pub custom_fields: Option<Vec<CustomField>>,
    /// Tags
    pub tags: Option<Vec<String>>,
}

impl PostRequest {
    /// Create a request with the fields every new post needs
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    fn body(&self) -> ListingBody<'_> {
        ListingBody {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            image: self.image.as_deref(),
            location: self.location.as_deref(),
            custom_fields: self
                .custom_fields
                .as_deref()
                .map(|f| FieldNaming::Snake.wrap(f)),
            tags: self.tags.as_deref(),
            visibility: None,
        }
    }
}

/// Post plus the backend's confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct PostWithMessage {
    /// The stored post
    pub post: Post,
    /// Confirmation text from the backend
    pub message: String,
}

impl From<AdvertMessageWire> for PostWithMessage {
    fn from(wire: AdvertMessageWire) -> Self {
        Self {
            post: wire.advert.into(),
            message: wire.message,
        }
    }
}

//! Listing shape normalization
//!
//! The backend serves the same listing under two naming schemes: `_id` with
//! `customFields`, or `id`/`_id` with `custom_fields`. Incoming listings are
//! read into [`RawAdvert`], which accepts every variant, and folded into the
//! canonical [`Advert`]: identifier present under both `id` and `_id`, custom
//! fields under `customFields` only. Outgoing bodies pick one scheme through
//! [`WireCustomFields`].
//!
//! Tie-breaks: `_id` beats `id`, `customFields` beats `custom_fields`. An
//! empty `_id` counts as absent.

use serde::{Deserialize, Serialize};

/// A free-form name/value attribute on a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: String,
}

impl CustomField {
    /// Create a custom field
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Listing visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Listed and searchable
    #[default]
    Public,
    /// Reachable only through a private share link
    Private,
}

/// GeoJSON point, `[longitude, latitude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// GeoJSON type tag, normally `Point`
    #[serde(rename = "type")]
    pub kind: String,
    /// Longitude then latitude
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    /// Longitude
    #[must_use]
    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Listing exactly as the backend sends it, either naming scheme
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAdvert {
    /// Identifier under `_id`
    #[serde(rename = "_id")]
    pub underscore_id: Option<String>,
    /// Identifier under `id`
    pub id: Option<String>,
    /// Listing title
    #[serde(default)]
    pub title: String,
    /// Listing text
    #[serde(default)]
    pub description: String,
    /// Image URL
    pub image: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Geo position, when the listing has one
    pub coordinates: Option<GeoPoint>,
    /// Distance from the search point in km
    pub distance: Option<f64>,
    /// Custom fields under `customFields`
    pub custom_fields: Option<Vec<CustomField>>,
    /// Custom fields under `custom_fields`
    #[serde(rename = "custom_fields")]
    pub snake_custom_fields: Option<Vec<CustomField>>,
    /// Tags
    pub tags: Option<Vec<String>>,
    /// Creation timestamp as sent
    pub created_at: Option<String>,
    /// Owner ID
    pub user_id: Option<String>,
    /// Upvote count
    pub upvotes: Option<u64>,
    /// View count
    pub views: Option<u64>,
    /// IDs of users who upvoted
    pub upvoted_by: Option<Vec<String>>,
    /// Whether the caller has upvoted
    pub upvoted: Option<bool>,
    /// Public or private
    pub visibility: Option<Visibility>,
    /// Access key, sent to the owner only
    pub private_key: Option<String>,
}

impl RawAdvert {
    /// Resolved identifier, empty when neither key was sent
    #[must_use]
    pub fn resolved_id(&self) -> String {
        [&self.underscore_id, &self.id]
            .into_iter()
            .flatten()
            .find(|id| !id.is_empty())
            .cloned()
            .unwrap_or_default()
    }
}

/// Canonical listing with engagement data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advert {
    /// Resolved identifier
    pub id: String,
    /// Same value as `id`, kept for consumers that read `_id`
    #[serde(rename = "_id")]
    pub legacy_id: String,
    /// Listing title
    pub title: String,
    /// Listing text
    pub description: String,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-text location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Geo position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    /// Distance from the search point in km
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Custom fields, whichever key the backend used
    pub custom_fields: Vec<CustomField>,
    /// Tags
    pub tags: Vec<String>,
    /// Creation timestamp as sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Owner ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Upvote count, zero when absent
    pub upvotes: u64,
    /// View count, zero when absent
    pub views: u64,
    /// IDs of users who upvoted
    pub upvoted_by: Vec<String>,
    /// Whether the caller has upvoted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upvoted: Option<bool>,
    /// Public unless the backend says otherwise
    pub visibility: Visibility,
    /// Access key, present for the owner only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl Advert {
    /// Whether `user_id` has upvoted this listing
    #[must_use]
    pub fn is_upvoted_by(&self, user_id: &str) -> bool {
        self.upvoted_by.iter().any(|id| id == user_id)
    }
}

impl From<RawAdvert> for Advert {
    fn from(raw: RawAdvert) -> Self {
        let id = raw.resolved_id();
        Self {
            legacy_id: id.clone(),
            id,
            title: raw.title,
            description: raw.description,
            image: raw.image,
            location: raw.location,
            coordinates: raw.coordinates,
            distance: raw.distance,
            custom_fields: raw
                .custom_fields
                .or(raw.snake_custom_fields)
                .unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
            created_at: raw.created_at,
            user_id: raw.user_id,
            upvotes: raw.upvotes.unwrap_or_default(),
            views: raw.views.unwrap_or_default(),
            upvoted_by: raw.upvoted_by.unwrap_or_default(),
            upvoted: raw.upvoted,
            visibility: raw.visibility.unwrap_or_default(),
            private_key: raw.private_key,
        }
    }
}

/// Canonical listing as shown in post views
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Resolved identifier
    pub id: String,
    /// Same value as `id`, kept for consumers that read `_id`
    #[serde(rename = "_id")]
    pub legacy_id: String,
    /// Post title
    pub title: String,
    /// Post text
    pub description: String,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-text location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Custom fields
    pub custom_fields: Vec<CustomField>,
    /// Tags
    pub tags: Vec<String>,
    /// Creation timestamp as sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<Advert> for Post {
    fn from(advert: Advert) -> Self {
        Self {
            id: advert.id,
            legacy_id: advert.legacy_id,
            title: advert.title,
            description: advert.description,
            image: advert.image,
            location: advert.location,
            custom_fields: advert.custom_fields,
            tags: advert.tags,
            created_at: advert.created_at,
        }
    }
}

impl From<RawAdvert> for Post {
    fn from(raw: RawAdvert) -> Self {
        Advert::from(raw).into()
    }
}

/// Normalize one backend listing
#[must_use]
pub fn normalize_advert(raw: RawAdvert) -> Advert {
    raw.into()
}

/// Normalize one backend listing into the post shape
#[must_use]
pub fn normalize_post(raw: RawAdvert) -> Post {
    raw.into()
}

/// Custom fields on an outgoing body, under the key the endpoint expects
#[derive(Debug, Clone, Copy, Serialize)]
pub enum WireCustomFields<'a> {
    /// `customFields`
    #[serde(rename = "customFields")]
    Camel(&'a [CustomField]),
    /// `custom_fields`
    #[serde(rename = "custom_fields")]
    Snake(&'a [CustomField]),
}

/// Naming scheme for outgoing custom fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldNaming {
    Camel,
    Snake,
}

impl FieldNaming {
    pub(crate) fn wrap(self, fields: &[CustomField]) -> WireCustomFields<'_> {
        match self {
            Self::Camel => WireCustomFields::Camel(fields),
            Self::Snake => WireCustomFields::Snake(fields),
        }
    }
}

/// Create/update body shared by the adverts and posts endpoints
#[derive(Debug, Default, Serialize)]
pub(crate) struct ListingBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(flatten)]
    pub custom_fields: Option<WireCustomFields<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawAdvert {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_snake_case_fields_are_unified() {
        let post = normalize_post(raw(json!({
            "_id": "a1",
            "title": "Bike",
            "description": "Blue",
            "custom_fields": [{"name": "size", "value": "M"}]
        })));

        assert_eq!(post.custom_fields, vec![CustomField::new("size", "M")]);

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["customFields"][0]["name"], "size");
        assert!(value.get("custom_fields").is_none());
    }

    #[test]
    fn test_only_id_is_aliased() {
        let advert = normalize_advert(raw(json!({"id": "b2", "title": "Sofa", "description": ""})));
        assert_eq!(advert.id, "b2");
        assert_eq!(advert.legacy_id, "b2");

        let value = serde_json::to_value(&advert).unwrap();
        assert_eq!(value["id"], "b2");
        assert_eq!(value["_id"], "b2");
    }

    #[test]
    fn test_underscore_id_preferred() {
        let advert = normalize_advert(raw(json!({"_id": "mongo", "id": "other"})));
        assert_eq!(advert.id, "mongo");
        assert_eq!(advert.legacy_id, "mongo");
    }

    #[test]
    fn test_empty_underscore_id_falls_back() {
        let advert = normalize_advert(raw(json!({"_id": "", "id": "b2"})));
        assert_eq!(advert.id, "b2");
    }

    #[test]
    fn test_camel_case_fields_preferred() {
        let advert = normalize_advert(raw(json!({
            "_id": "a1",
            "customFields": [{"name": "colour", "value": "red"}],
            "custom_fields": [{"name": "size", "value": "M"}]
        })));
        assert_eq!(advert.custom_fields, vec![CustomField::new("colour", "red")]);
    }

    #[test]
    fn test_empty_camel_case_fields_still_win() {
        let advert = normalize_advert(raw(json!({
            "_id": "a1",
            "customFields": [],
            "custom_fields": [{"name": "size", "value": "M"}]
        })));
        assert!(advert.custom_fields.is_empty());
    }

    #[test]
    fn test_null_camel_case_fields_fall_back() {
        let advert = normalize_advert(raw(json!({
            "_id": "a1",
            "customFields": null,
            "custom_fields": [{"name": "size", "value": "M"}]
        })));
        assert_eq!(advert.custom_fields.len(), 1);
    }

    #[test]
    fn test_missing_fields_default() {
        let advert = normalize_advert(raw(json!({})));
        assert_eq!(advert.id, "");
        assert!(advert.custom_fields.is_empty());
        assert!(advert.tags.is_empty());
        assert_eq!(advert.upvotes, 0);
        assert_eq!(advert.visibility, Visibility::Public);
    }

    #[test]
    fn test_engagement_fields_carried() {
        let advert = normalize_advert(raw(json!({
            "_id": "a1",
            "upvotes": 3,
            "views": 10,
            "upvotedBy": ["u1", "u2"],
            "visibility": "private",
            "privateKey": "k",
            "coordinates": {"type": "Point", "coordinates": [13.4, 52.5]}
        })));
        assert_eq!(advert.upvotes, 3);
        assert_eq!(advert.views, 10);
        assert!(advert.is_upvoted_by("u2"));
        assert!(!advert.is_upvoted_by("u3"));
        assert_eq!(advert.visibility, Visibility::Private);
        let point = advert.coordinates.unwrap();
        assert_eq!(point.lng(), 13.4);
        assert_eq!(point.lat(), 52.5);
    }

    #[test]
    fn test_listing_body_uses_requested_key() {
        let fields = vec![CustomField::new("size", "M")];

        let body = ListingBody {
            title: Some("Bike"),
            custom_fields: Some(FieldNaming::Snake.wrap(&fields)),
            ..Default::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["custom_fields"][0]["value"], "M");
        assert!(value.get("customFields").is_none());

        let body = ListingBody {
            custom_fields: Some(FieldNaming::Camel.wrap(&fields)),
            visibility: Some(Visibility::Private),
            ..Default::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["customFields"][0]["value"], "M");
        assert_eq!(value["visibility"], "private");
    }

    #[test]
    fn test_listing_body_omits_absent_fields() {
        let body = ListingBody {
            title: Some("Only title"),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"title": "Only title"}));
    }

    fn field_strategy() -> impl Strategy<Value = CustomField> {
        ("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}").prop_map(|(n, v)| CustomField::new(n, v))
    }

    proptest! {
        #[test]
        fn prop_snake_only_fields_survive(fields in prop::collection::vec(field_strategy(), 0..6)) {
            let advert = normalize_advert(RawAdvert {
                underscore_id: Some("x".to_string()),
                snake_custom_fields: Some(fields.clone()),
                ..Default::default()
            });
            prop_assert_eq!(advert.custom_fields, fields);
        }

        #[test]
        fn prop_id_only_is_mirrored(id in "[a-f0-9]{1,24}") {
            let post = normalize_post(RawAdvert { id: Some(id.clone()), ..Default::default() });
            prop_assert_eq!(&post.id, &id);
            prop_assert_eq!(&post.legacy_id, &id);
        }

        #[test]
        fn prop_id_never_empty_when_present(
            underscore in proptest::option::of("[a-f0-9]{1,24}"),
            plain in proptest::option::of("[a-f0-9]{1,24}"),
        ) {
            let had_id = underscore.is_some() || plain.is_some();
            let advert = normalize_advert(RawAdvert {
                underscore_id: underscore,
                id: plain,
                ..Default::default()
            });
            prop_assert_eq!(advert.id.is_empty(), !had_id);
            prop_assert_eq!(&advert.id, &advert.legacy_id);
        }
    }
}

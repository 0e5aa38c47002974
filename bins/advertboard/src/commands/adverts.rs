//! Advert commands

use super::{parse_field, Context};
use crate::output::{self, Status};
use advertboard_api_client::endpoints::adverts::{
    CreateAdvertRequest, SearchParams, UpdateAdvertRequest,
};
use advertboard_api_client::{CustomField, Visibility};
use anyhow::{bail, Result};
use clap::Args;
use owo_colors::OwoColorize;
use serde_json::json;

/// Search filters shared by the listing commands
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Free-text search
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only listings carrying this tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Location name
    #[arg(short, long)]
    pub location: Option<String>,

    /// Latitude of the search centre
    #[arg(long, requires_all = ["lng", "radius"], allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the search centre
    #[arg(long, requires_all = ["lat", "radius"], allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Search radius in kilometres
    #[arg(long, requires_all = ["lat", "lng"])]
    pub radius: Option<f64>,
}

impl SearchArgs {
    /// Translate the flags into query parameters
    pub fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::new();
        if let Some(query) = &self.query {
            params = params.with_query(query);
        }
        for tag in &self.tags {
            params = params.with_tag(tag);
        }
        if let Some(location) = &self.location {
            params = params.with_location(location);
        }
        if let (Some(lat), Some(lng), Some(radius)) = (self.lat, self.lng, self.radius) {
            params = params.with_radius(lat, lng, radius);
        }
        params
    }
}

/// Editable listing fields
#[derive(Debug, Clone, Default, Args)]
pub struct ListingArgs {
    /// Title
    #[arg(long)]
    pub title: Option<String>,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Location name
    #[arg(short, long)]
    pub location: Option<String>,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Custom field as NAME=VALUE (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    pub fields: Vec<CustomField>,

    /// Make the listing reachable only through a private share link
    #[arg(long)]
    pub private: bool,
}

impl ListingArgs {
    fn tags(&self) -> Option<Vec<String>> {
        (!self.tags.is_empty()).then(|| self.tags.clone())
    }

    fn fields(&self) -> Option<Vec<CustomField>> {
        (!self.fields.is_empty()).then(|| self.fields.clone())
    }

    fn visibility(&self) -> Option<Visibility> {
        self.private.then_some(Visibility::Private)
    }

    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.location.is_none()
            && self.tags.is_empty()
            && self.fields.is_empty()
            && !self.private
    }
}

/// List adverts
pub async fn list(ctx: &Context, search: &SearchArgs) -> Result<()> {
    let adverts = ctx.client.adverts().list(&search.to_params()).await?;
    print_list(ctx, &adverts, "No adverts found")
}

/// Show one advert
pub async fn show(ctx: &Context, id: &str, key: Option<&str>) -> Result<()> {
    let advert = ctx.client.adverts().get(id, key).await?;

    if ctx.json() {
        return output::json(&advert);
    }

    output::print_advert(&advert);
    Ok(())
}

/// Publish a new advert
pub async fn create(ctx: &Context, listing: ListingArgs) -> Result<()> {
    let (Some(title), Some(description)) = (listing.title.clone(), listing.description.clone()) else {
        bail!("--title and --description are required");
    };

    let request = CreateAdvertRequest {
        image: listing.image.clone(),
        location: listing.location.clone(),
        custom_fields: listing.fields(),
        tags: listing.tags(),
        visibility: listing.visibility(),
        ..CreateAdvertRequest::new(title, description)
    };

    let created = ctx.client.adverts().create(&request).await?;

    if ctx.json() {
        return output::json(&created);
    }

    Status::success(&created.message);
    println!("  {}", output::advert_line(&created.advert));
    Ok(())
}

/// Change fields of an advert; omitted flags are left untouched
pub async fn update(ctx: &Context, id: &str, listing: ListingArgs) -> Result<()> {
    if listing.is_empty() {
        bail!("Nothing to update");
    }

    let request = UpdateAdvertRequest {
        title: listing.title.clone(),
        description: listing.description.clone(),
        image: listing.image.clone(),
        location: listing.location.clone(),
        custom_fields: listing.fields(),
        tags: listing.tags(),
        visibility: listing.visibility(),
    };

    let updated = ctx.client.adverts().update(id, &request).await?;

    if ctx.json() {
        return output::json(&updated);
    }

    Status::success(&updated.message);
    println!("  {}", output::advert_line(&updated.advert));
    Ok(())
}

/// Delete an advert
pub async fn delete(ctx: &Context, id: &str) -> Result<()> {
    let response = ctx.client.adverts().delete(id).await?;

    if ctx.json() {
        return output::json(&response);
    }

    Status::success(&response.message);
    Ok(())
}

/// Adverts owned by the signed-in user
pub async fn mine(ctx: &Context) -> Result<()> {
    let adverts = ctx.client.adverts().mine().await?;
    print_list(ctx, &adverts, "You have not published any adverts")
}

/// Upvote an advert
pub async fn upvote(ctx: &Context, id: &str) -> Result<()> {
    let vote = ctx.client.adverts().upvote(id).await?;

    if ctx.json() {
        return output::json(&vote);
    }

    if vote.upvoted {
        Status::success(&format!("Upvoted ({} total)", vote.upvotes));
    } else {
        Status::info(&format!("Upvote removed ({} total)", vote.upvotes));
    }
    Ok(())
}

/// Record a view
pub async fn view(ctx: &Context, id: &str) -> Result<()> {
    let response = ctx.client.adverts().track_view(id).await?;

    if ctx.json() {
        return output::json(&response);
    }

    Status::success(&format!("View recorded ({} total)", response.views));
    Ok(())
}

/// Create a share link
pub async fn share(ctx: &Context, id: &str, private: bool) -> Result<()> {
    if private {
        let link = ctx.client.adverts().private_share_link(id).await?;

        if ctx.json() {
            return output::json(&link);
        }

        if !link.message.is_empty() {
            Status::success(&link.message);
        }
        println!("  {:<6} {}", "URL".dimmed(), link.url.cyan());
        println!("  {:<6} {}", "Key".dimmed(), link.key.yellow());
        return Ok(());
    }

    let link = ctx.client.adverts().share_link(id).await?;

    if ctx.json() {
        return output::json(&link);
    }

    println!("{}", link.url.cyan());
    Ok(())
}

/// Engagement statistics
pub async fn stats(ctx: &Context, id: &str) -> Result<()> {
    let stats = ctx.client.adverts().stats(id).await?;

    if ctx.json() {
        return output::json(&json!({
            "id": id,
            "upvotes": stats.upvotes,
            "views": stats.views,
            "upvoted": stats.upvoted,
        }));
    }

    Status::header("Advert statistics");
    println!("  {:<10} {}", "Upvotes".dimmed(), stats.upvotes);
    println!("  {:<10} {}", "Views".dimmed(), stats.views);
    println!(
        "  {:<10} {}",
        "You".dimmed(),
        if stats.upvoted { "upvoted" } else { "not upvoted" }
    );
    Ok(())
}

fn print_list(ctx: &Context, adverts: &[advertboard_api_client::Advert], empty: &str) -> Result<()> {
    if ctx.json() {
        return output::json(adverts);
    }

    if adverts.is_empty() {
        Status::info(empty);
        return Ok(());
    }

    Status::header(&output::format_count(adverts.len(), "advert", "adverts"));
    for advert in adverts {
        println!("  {}", output::advert_line(advert));
    }
    Ok(())
}

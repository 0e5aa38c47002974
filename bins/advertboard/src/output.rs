//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use advertboard_api_client::{Advert, Post, User, Visibility};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable
    #[default]
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a hint below an error
    pub fn hint(message: &str) {
        eprintln!("  {} {}", "hint:".dimmed(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Print any serializable value as pretty JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// One-line summary used in listings
pub fn advert_line(advert: &Advert) -> String {
    let mut line = format!("{}  {}", advert.id.dimmed(), advert.title.bold());
    if let Some(location) = &advert.location {
        line.push_str(&format!("  {}", location.cyan()));
    }
    if let Some(distance) = advert.distance {
        line.push_str(&format!("  {distance:.1} km"));
    }
    if advert.visibility == Visibility::Private {
        line.push_str(&format!("  {}", "private".yellow()));
    }
    line.push_str(&format!("  ▲{} 👁{}", advert.upvotes, advert.views));
    line
}

/// Print every field worth showing for one advert
pub fn print_advert(advert: &Advert) {
    Status::header(&advert.title);
    println!("  {:<12} {}", "ID".dimmed(), advert.id);
    if !advert.description.is_empty() {
        println!("  {:<12} {}", "Description".dimmed(), advert.description);
    }
    if let Some(location) = &advert.location {
        println!("  {:<12} {}", "Location".dimmed(), location);
    }
    if let Some(point) = &advert.coordinates {
        println!("  {:<12} {:.5}, {:.5}", "Coordinates".dimmed(), point.lat(), point.lng());
    }
    if let Some(image) = &advert.image {
        println!("  {:<12} {}", "Image".dimmed(), image);
    }
    if !advert.tags.is_empty() {
        println!("  {:<12} {}", "Tags".dimmed(), advert.tags.join(", "));
    }
    for field in &advert.custom_fields {
        println!("  {:<12} {}", field.name.dimmed(), field.value);
    }
    println!("  {:<12} {}", "Upvotes".dimmed(), advert.upvotes);
    println!("  {:<12} {}", "Views".dimmed(), advert.views);
    if let Some(created_at) = &advert.created_at {
        println!("  {:<12} {}", "Created".dimmed(), created_at);
    }
}

/// One-line summary of a post
pub fn post_line(post: &Post) -> String {
    let mut line = format!("{}  {}", post.id.dimmed(), post.title.bold());
    if let Some(location) = &post.location {
        line.push_str(&format!("  {}", location.cyan()));
    }
    if !post.tags.is_empty() {
        line.push_str(&format!("  [{}]", post.tags.join(", ")));
    }
    line
}

/// Print a post
pub fn print_post(post: &Post) {
    Status::header(&post.title);
    println!("  {:<12} {}", "ID".dimmed(), post.id);
    if !post.description.is_empty() {
        println!("  {:<12} {}", "Description".dimmed(), post.description);
    }
    if let Some(location) = &post.location {
        println!("  {:<12} {}", "Location".dimmed(), location);
    }
    if !post.tags.is_empty() {
        println!("  {:<12} {}", "Tags".dimmed(), post.tags.join(", "));
    }
    for field in &post.custom_fields {
        println!("  {:<12} {}", field.name.dimmed(), field.value);
    }
}

/// Print the signed-in user
pub fn print_user(user: &User) {
    println!("  {:<12} {}", "Name".dimmed(), user.name);
    println!("  {:<12} {}", "Email".dimmed(), user.email);
    println!(
        "  {:<12} {}",
        "Premium".dimmed(),
        if user.has_premium_access {
            "✓ yes".green().to_string()
        } else {
            "no".to_string()
        }
    );
    println!("  {:<12} {}", "Karma".dimmed(), user.good_karma);
}

#[cfg(test)]
mod tests {
    use super::*;
    use advertboard_api_client::normalize::{normalize_advert, RawAdvert};

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "advert", "adverts"), "1 advert");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(0, "advert", "adverts"), "0 adverts");
    }

    #[test]
    fn test_advert_line_mentions_title_and_counts() {
        let raw: RawAdvert = serde_json::from_str(
            r#"{"_id":"a1","title":"Bike","upvotes":3,"views":9,"visibility":"private"}"#,
        )
        .unwrap();
        let line = advert_line(&normalize_advert(raw));
        assert!(line.contains("Bike"));
        assert!(line.contains("private"));
        assert!(line.contains("▲3"));
        assert!(line.contains("👁9"));
    }
}

//! Post commands: the same listings in the reduced post shape

use super::adverts::SearchArgs;
use super::Context;
use crate::output::{self, Status};
use anyhow::Result;

/// List posts
pub async fn list(ctx: &Context, search: &SearchArgs) -> Result<()> {
    let posts = ctx.client.posts().list(&search.to_params()).await?;
    print_list(ctx, &posts, "No posts found")
}

/// Show one post
pub async fn show(ctx: &Context, id: &str) -> Result<()> {
    let post = ctx.client.posts().get(id).await?;

    if ctx.json() {
        return output::json(&post);
    }

    output::print_post(&post);
    Ok(())
}

/// Posts owned by the signed-in user
pub async fn mine(ctx: &Context) -> Result<()> {
    let posts = ctx.client.posts().mine().await?;
    print_list(ctx, &posts, "You have no posts")
}

fn print_list(ctx: &Context, posts: &[advertboard_api_client::Post], empty: &str) -> Result<()> {
    if ctx.json() {
        return output::json(posts);
    }

    if posts.is_empty() {
        Status::info(empty);
        return Ok(());
    }

    Status::header(&output::format_count(posts.len(), "post", "posts"));
    for post in posts {
        println!("  {}", output::post_line(post));
    }
    Ok(())
}

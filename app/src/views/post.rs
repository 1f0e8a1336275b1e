//! Single-post page: loading, ownership, deletion.

use appwrite_client::User;
use tracing::info;

use crate::error::Result;
use crate::models::Post;
use crate::services::{AssetService, PostService};

/// Everything the post page renders.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub image_url: Option<String>,
    /// Owners see the edit and delete controls.
    pub is_owner: bool,
}

/// Post page state.
#[derive(Debug, Clone)]
pub enum PostView {
    Found(PostDetail),
    /// Callers redirect to the landing feed.
    NotFound,
}

/// Loads one post for display. `viewer` is the logged-in user, if any.
/// A missing post is a state, not an error; transport failures
/// propagate so the page can show its failure surface.
pub async fn load(
    posts: &PostService,
    assets: &AssetService,
    viewer: Option<&User>,
    post_id: &str,
) -> Result<PostView> {
    let Some(post) = posts.get(post_id).await? else {
        return Ok(PostView::NotFound);
    };

    let image_url = post
        .featured_image
        .as_deref()
        .and_then(|id| assets.preview_url(id));
    let is_owner = viewer.map(|user| user.id == post.owner_id).unwrap_or(false);

    Ok(PostView::Found(PostDetail {
        post,
        image_url,
        is_owner,
    }))
}

/// Deletes a post, then best-effort removes its featured image. Returns
/// whether the record was actually removed; the image cleanup never
/// changes the outcome.
pub async fn delete(posts: &PostService, assets: &AssetService, post: &Post) -> Result<bool> {
    let deleted = posts.delete(&post.id).await?;
    if deleted {
        if let Some(image_id) = &post.featured_image {
            assets.delete_best_effort(image_id).await;
        }
        info!(post_id = %post.id, "post and image removed");
    }
    Ok(deleted)
}


//! Post authoring: the create/edit submission flow.
//!
//! A submission with an image is a two-step write. The ordering rule is
//! that the record must never point at a file that does not exist:
//! uploads happen before the record write, and a superseded image is
//! deleted only after the record points at its replacement. A step that
//! fails after an upload triggers compensating cleanup of that upload.

use appwrite_client::User;
use serde_json::Value;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{ImageUpload, NewPost, Post, PostPatch, PostStatus};
use crate::services::{AssetService, PostService};
use crate::text::slugify;

/// Authoring state for the create/edit form.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub slug: String,
    pub content: Option<Value>,
    pub status: Option<PostStatus>,
    pub image: Option<ImageUpload>,
}

impl PostForm {
    /// Starts a form with the slug derived from the title.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            slug: slugify(title),
            ..Default::default()
        }
    }

    /// Pre-fills the form from an existing post for editing.
    pub fn for_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: Some(Value::String(post.content.clone())),
            status: Some(post.status),
            image: None,
        }
    }

    /// Changing the title re-derives the slug, replacing any manual
    /// edit.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.slug = slugify(title);
    }

    /// Manual slug edits are normalized through the same derivation.
    pub fn set_slug(&mut self, slug: &str) {
        self.slug = slugify(slug);
    }
}

/// Submits the form: creates a post when `existing` is `None`, updates
/// it otherwise. Returns the id of the stored post for navigation.
pub async fn submit(
    posts: &PostService,
    assets: &AssetService,
    owner: &User,
    form: PostForm,
    existing: Option<&Post>,
) -> Result<String> {
    match existing {
        None => create_post(posts, assets, owner, form).await,
        Some(post) => update_post(posts, assets, form, post).await,
    }
}

/// A new post requires an image; that is checked before any platform
/// call. If the record write fails after the upload, the upload is
/// removed again.
async fn create_post(
    posts: &PostService,
    assets: &AssetService,
    owner: &User,
    form: PostForm,
) -> Result<String> {
    let image = form
        .image
        .ok_or_else(|| AppError::Validation("a featured image is required".to_string()))?;
    let uploaded = assets.upload(image).await?;

    let new = NewPost {
        title: form.title,
        slug: form.slug,
        content: form.content,
        featured_image: Some(uploaded.id.clone()),
        status: form.status,
        owner_id: owner.id.clone(),
    };

    match posts.create(&new).await {
        Ok(post) => {
            info!(post_id = %post.id, "post published");
            Ok(post.id)
        }
        Err(e) => {
            assets.delete_best_effort(&uploaded.id).await;
            Err(e)
        }
    }
}

/// Without a new image only the record changes. With one, the
/// replacement is uploaded first, the record is pointed at it, and the
/// superseded image is deleted last; a failed record write removes the
/// replacement again.
async fn update_post(
    posts: &PostService,
    assets: &AssetService,
    form: PostForm,
    existing: &Post,
) -> Result<String> {
    let replacement = match form.image {
        Some(image) => Some(assets.upload(image).await?),
        None => None,
    };

    let featured_image = replacement
        .as_ref()
        .map(|file| file.id.clone())
        .or_else(|| existing.featured_image.clone());

    let patch = PostPatch {
        title: Some(form.title),
        content: form.content,
        featured_image,
        status: form.status,
    };

    match posts.update(&existing.id, &patch).await {
        Ok(post) => {
            if replacement.is_some() {
                if let Some(old_image) = &existing.featured_image {
                    assets.delete_best_effort(old_image).await;
                }
            }
            info!(post_id = %post.id, "post updated");
            Ok(post.id)
        }
        Err(e) => {
            if let Some(new_file) = &replacement {
                assets.delete_best_effort(&new_file.id).await;
            }
            Err(e)
        }
    }
}

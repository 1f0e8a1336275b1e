//! Feed pages: the landing feed and the browse-everything listing.

use appwrite_client::Query;
use tracing::warn;

use crate::models::{PostStatus, PostSummary};
use crate::services::{AssetService, PostService};

/// Rows the browse listing asks for, matching the platform's default
/// page size.
const BROWSE_PAGE_ROWS: u64 = 25;

/// One card in a feed grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: Option<String>,
}

/// Landing page state.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    /// Nothing to show; rendered as the "Login to read posts"
    /// invitation.
    Empty,
    Posts(Vec<PostCard>),
}

/// Browse page state.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseView {
    /// No posts yet; rendered as an invitation to write the first one.
    Empty,
    Posts(Vec<PostCard>),
    /// The listing failed; the message feeds the error banner.
    Failed(String),
}

fn card(assets: &AssetService, summary: &PostSummary) -> PostCard {
    PostCard {
        id: summary.id.clone(),
        title: summary.title.clone(),
        excerpt: summary.content.clone(),
        image_url: summary
            .featured_image
            .as_deref()
            .and_then(|id| assets.preview_url(id)),
    }
}

/// Landing feed: active posts, or the logged-out invitation. This page
/// has no error surface, so a listing failure degrades to the empty
/// state.
pub async fn home(posts: &PostService, assets: &AssetService) -> HomeView {
    match posts.list(None).await {
        Ok(summaries) if summaries.is_empty() => HomeView::Empty,
        Ok(summaries) => HomeView::Posts(summaries.iter().map(|s| card(assets, s)).collect()),
        Err(e) => {
            warn!(error = %e, "landing feed fetch failed, showing empty state");
            HomeView::Empty
        }
    }
}

/// Browse page: the newest active posts, with explicit empty and
/// failure states.
pub async fn browse(posts: &PostService, assets: &AssetService) -> BrowseView {
    let filters = vec![
        Query::equal("status", PostStatus::Active.as_str()),
        Query::order_desc("$createdAt"),
        Query::limit(BROWSE_PAGE_ROWS),
    ];
    match posts.list(Some(filters)).await {
        Ok(summaries) if summaries.is_empty() => BrowseView::Empty,
        Ok(summaries) => BrowseView::Posts(summaries.iter().map(|s| card(assets, s)).collect()),
        Err(e) => BrowseView::Failed(e.to_string()),
    }
}

//! View-models mapping service outcomes to renderable states.
//!
//! Rendering itself lives elsewhere; these functions decide what a page
//! shows, nothing more.

pub mod feed;
pub mod post;

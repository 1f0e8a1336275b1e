//! Application services over the platform boundary.

pub mod assets;
pub mod posts;
pub mod session;

pub use assets::AssetService;
pub use posts::PostService;
pub use session::SessionService;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod brief_link_repo;
pub mod google_token_repo;

pub use brief_link_repo::BriefLinkRepo;
pub use google_token_repo::GoogleTokenRepo;

//! Row models and DTOs.

pub mod brief_link;
pub mod google_token;

//! Request handlers, grouped by resource.

pub mod cron;
pub mod emails;
pub mod google_tokens;
pub mod links;

//! Authentication: validation of identity-provider access tokens.

pub mod jwt;

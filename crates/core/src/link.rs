//! Brief-link domain rules: token generation, status transitions, locale.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Length of a generated link token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 32;

/// Generate an unguessable link token.
///
/// The token is the only externally reachable handle to a brief link, so it
/// must carry enough entropy to resist enumeration (32 alphanumeric chars,
/// roughly 190 bits).
pub fn generate_link_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a brief link.
///
/// Created `Pending`; flips to `Completed` exactly once when the client
/// submits the brief, and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Pending,
    Completed,
}

impl LinkStatus {
    /// Database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Pending => "pending",
            LinkStatus::Completed => "completed",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(LinkStatus::Pending),
            "completed" => Ok(LinkStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown link status: {other}"
            ))),
        }
    }

    /// The only legal transition is `pending -> completed`.
    pub fn can_transition_to(self, to: LinkStatus) -> bool {
        matches!((self, to), (LinkStatus::Pending, LinkStatus::Completed))
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Message locale for correspondence tied to a link. Hebrew is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    He,
    En,
}

impl Language {
    /// Lenient parse: `"en"` selects English, anything else falls back to
    /// Hebrew.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "en" => Language::En,
            _ => Language::He,
        }
    }

    /// Locale tag as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::He => "he",
            Language::En => "en",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_expected_length_and_charset() {
        let token = generate_link_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_are_not_repeated() {
        assert_ne!(generate_link_token(), generate_link_token());
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(LinkStatus::parse("pending").unwrap(), LinkStatus::Pending);
        assert_eq!(
            LinkStatus::parse("completed").unwrap(),
            LinkStatus::Completed
        );
        assert_eq!(LinkStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(LinkStatus::parse("archived").is_err());
    }

    #[test]
    fn only_pending_to_completed_is_legal() {
        assert!(LinkStatus::Pending.can_transition_to(LinkStatus::Completed));
        assert!(!LinkStatus::Completed.can_transition_to(LinkStatus::Pending));
        assert!(!LinkStatus::Pending.can_transition_to(LinkStatus::Pending));
        assert!(!LinkStatus::Completed.can_transition_to(LinkStatus::Completed));
    }

    #[test]
    fn language_falls_back_to_hebrew() {
        assert_eq!(Language::from_tag("en"), Language::En);
        assert_eq!(Language::from_tag("he"), Language::He);
        assert_eq!(Language::from_tag(""), Language::He);
        assert_eq!(Language::from_tag("fr"), Language::He);
    }
}

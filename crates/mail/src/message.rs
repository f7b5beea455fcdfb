//! Raw MIME assembly for the Gmail send endpoint.
//!
//! Gmail's REST API takes a complete RFC 5322 message, base64url-encoded,
//! in the `raw` field. The message is multipart/alternative with a single
//! base64 HTML part; the subject uses an RFC 2047 encoded word so non-ASCII
//! (Hebrew) subjects survive transport.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;

/// Per-process sequence mixed into boundary tokens so two messages composed
/// in the same millisecond still get distinct boundaries.
static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Build the raw RFC 5322 message.
///
/// Lines are CRLF-joined. The boundary token is derived from the current
/// time plus a sequence number, so it cannot collide with body content or
/// with another message's boundary.
pub fn compose_raw_message(
    from: &str,
    from_name: &str,
    to: &str,
    subject: &str,
    html_body: &str,
) -> String {
    let boundary = format!(
        "boundary_{}_{}",
        chrono::Utc::now().timestamp_millis(),
        BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed)
    );

    let subject_b64 = STANDARD.encode(subject.as_bytes());
    let body_b64 = STANDARD.encode(html_body.as_bytes());

    let lines = [
        format!("From: \"{from_name}\" <{from}>"),
        format!("To: {to}"),
        format!("Subject: =?UTF-8?B?{subject_b64}?="),
        "MIME-Version: 1.0".to_string(),
        format!("Content-Type: multipart/alternative; boundary=\"{boundary}\""),
        String::new(),
        format!("--{boundary}"),
        "Content-Type: text/html; charset=UTF-8".to_string(),
        "Content-Transfer-Encoding: base64".to_string(),
        String::new(),
        body_b64,
        String::new(),
        format!("--{boundary}--"),
    ];

    lines.join("\r\n")
}

/// Encode a raw message for the `raw` field: standard base64 with `+` -> `-`,
/// `/` -> `_`, and padding stripped.
pub fn encode_for_send(raw: &str) -> String {
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECT: &str = "\u{05ea}\u{05d6}\u{05db}\u{05d5}\u{05e8}\u{05ea} - Briefdesk";
    const HTML: &str = "<html><body><p>Hello + friends / all</p></body></html>";

    fn compose() -> String {
        compose_raw_message(
            "dana@example.com",
            "Dana",
            "client@example.com",
            SUBJECT,
            HTML,
        )
    }

    #[test]
    fn message_uses_crlf_line_endings() {
        let raw = compose();
        assert!(raw.contains("\r\n"));
        // No bare LF: every newline is part of a CRLF pair.
        assert!(!raw.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn subject_round_trips_through_the_encoded_word() {
        let raw = compose();
        let line = raw
            .split("\r\n")
            .find(|l| l.starts_with("Subject: "))
            .expect("subject header present");
        let encoded = line
            .strip_prefix("Subject: =?UTF-8?B?")
            .and_then(|rest| rest.strip_suffix("?="))
            .expect("subject uses an RFC 2047 encoded word");
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), SUBJECT);
    }

    #[test]
    fn html_body_round_trips_byte_for_byte() {
        let raw = compose();
        let lines: Vec<&str> = raw.split("\r\n").collect();
        // The body payload sits between the blank line after the part
        // headers and the blank line before the closing boundary.
        let encoding_idx = lines
            .iter()
            .position(|l| *l == "Content-Transfer-Encoding: base64")
            .expect("base64 transfer encoding declared");
        let body_b64 = lines[encoding_idx + 2];
        let decoded = STANDARD.decode(body_b64).unwrap();
        assert_eq!(decoded, HTML.as_bytes());
    }

    #[test]
    fn headers_carry_sender_and_recipient() {
        let raw = compose();
        assert!(raw.contains("From: \"Dana\" <dana@example.com>"));
        assert!(raw.contains("To: client@example.com"));
        assert!(raw.contains("MIME-Version: 1.0"));
    }

    #[test]
    fn boundary_tokens_are_unique_per_message() {
        let boundary_of = |raw: &str| {
            raw.split("boundary=\"")
                .nth(1)
                .and_then(|rest| rest.split('"').next())
                .map(str::to_string)
                .expect("boundary declared")
        };
        assert_ne!(boundary_of(&compose()), boundary_of(&compose()));
    }

    #[test]
    fn send_encoding_is_base64url_without_padding() {
        let encoded = encode_for_send(&compose());
        assert!(!encoded.is_empty());
        assert!(encoded
            .chars()
            .all(|c| c != '+' && c != '/' && c != '='));

        // Decodes back to the exact raw message.
        let raw = compose();
        let encoded = encode_for_send(&raw);
        let decoded = URL_SAFE_NO_PAD.decode(encoded).unwrap();
        assert_eq!(decoded, raw.as_bytes());
    }
}

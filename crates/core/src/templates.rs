//! Reminder email templates.
//!
//! Two shipped locales: Hebrew (default, RTL) and English. The number shown
//! in the message is the same business-day count that gated eligibility, so
//! the gate and the display always agree.

use crate::link::Language;

/// A rendered reminder message.
#[derive(Debug, Clone)]
pub struct ReminderEmail {
    pub subject: String,
    pub html: String,
}

/// Inputs for the overdue-brief reminder message.
#[derive(Debug, Clone, Copy)]
pub struct ReminderContext<'a> {
    /// Display name of the link's creator (the recipient).
    pub creator_name: &'a str,
    /// The client the brief was sent to.
    pub client_email: &'a str,
    /// Deep link to the brief form.
    pub brief_url: &'a str,
    /// Elapsed working days since the link was created.
    pub business_days: u32,
}

/// Render the reminder subject and HTML body for the given locale.
pub fn reminder_email(language: Language, ctx: &ReminderContext<'_>) -> ReminderEmail {
    match language {
        Language::En => ReminderEmail {
            subject: format!(
                "Reminder: {} hasn't filled the brief yet - Briefdesk",
                ctx.client_email
            ),
            html: render_english(ctx),
        },
        Language::He => ReminderEmail {
            subject: format!(
                "\u{05ea}\u{05d6}\u{05db}\u{05d5}\u{05e8}\u{05ea}: {} \u{05d8}\u{05e8}\u{05dd} \u{05de}\u{05d9}\u{05dc}\u{05d0} \u{05d0}\u{05ea} \u{05d4}\u{05d1}\u{05e8}\u{05d9}\u{05e3} - Briefdesk",
                ctx.client_email
            ),
            html: render_hebrew(ctx),
        },
    }
}

fn render_english(ctx: &ReminderContext<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html dir="ltr" lang="en">
<head><meta charset="utf-8"></head>
<body style="margin:0;padding:24px;background-color:#f0f0f8;font-family:Arial,Helvetica,sans-serif;color:#1a1a2e;line-height:1.7">
<div style="max-width:600px;margin:0 auto;background-color:#ffffff;border-radius:12px;padding:32px">
<h1 style="font-size:22px;margin:0 0 16px">Follow-up reminder</h1>
<p>Hello {creator},</p>
<p>The brief sent to <strong>{client}</strong> has not been filled yet. It has been <strong>{days} business days</strong> since it was sent.</p>
<p>We recommend reaching out to the client, or resending the link below.</p>
<p style="margin:28px 0"><a href="{url}" style="background-color:#e94560;color:#ffffff;text-decoration:none;font-weight:bold;padding:12px 36px;border-radius:8px">View brief link</a></p>
<p style="font-size:12px;color:#8e8ea0">Automatic reminder from Briefdesk.</p>
</div>
</body>
</html>"#,
        creator = ctx.creator_name,
        client = ctx.client_email,
        days = ctx.business_days,
        url = ctx.brief_url,
    )
}

fn render_hebrew(ctx: &ReminderContext<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html dir="rtl" lang="he">
<head><meta charset="utf-8"></head>
<body style="margin:0;padding:24px;background-color:#f0f0f8;font-family:Arial,Helvetica,sans-serif;direction:rtl;color:#1a1a2e;line-height:1.7">
<div style="max-width:600px;margin:0 auto;background-color:#ffffff;border-radius:12px;padding:32px">
<h1 style="font-size:22px;margin:0 0 16px">&#x5ea;&#x5d6;&#x5db;&#x5d5;&#x5e8;&#x5ea; &#x5de;&#x5e2;&#x5e7;&#x5d1;</h1>
<p>&#x5e9;&#x5dc;&#x5d5;&#x5dd; {creator},</p>
<p>&#x5d4;&#x5d1;&#x5e8;&#x5d9;&#x5e3; &#x5e9;&#x5e0;&#x5e9;&#x5dc;&#x5d7; &#x5dc;-<strong>{client}</strong> &#x5d8;&#x5e8;&#x5dd; &#x5de;&#x5d5;&#x5dc;&#x5d0;. &#x5e2;&#x5d1;&#x5e8;&#x5d5; <strong>{days} &#x5d9;&#x5de;&#x5d9; &#x5e2;&#x5e1;&#x5e7;&#x5d9;&#x5dd;</strong> &#x5de;&#x5d0;&#x5d6; &#x5d4;&#x5e9;&#x5dc;&#x5d9;&#x5d7;&#x5d4;.</p>
<p>&#x5de;&#x5d5;&#x5de;&#x5dc;&#x5e5; &#x5dc;&#x5d9;&#x5e6;&#x5d5;&#x5e8; &#x5e7;&#x5e9;&#x5e8; &#x5e2;&#x5dd; &#x5d4;&#x5dc;&#x5e7;&#x5d5;&#x5d7;, &#x5d0;&#x5d5; &#x5dc;&#x5e9;&#x5dc;&#x5d5;&#x5d7; &#x5de;&#x5d7;&#x5d3;&#x5e9; &#x5d0;&#x5ea; &#x5d4;&#x5e7;&#x5d9;&#x5e9;&#x5d5;&#x5e8; &#x5e9;&#x5dc;&#x5de;&#x5d8;&#x5d4;.</p>
<p style="margin:28px 0"><a href="{url}" style="background-color:#e94560;color:#ffffff;text-decoration:none;font-weight:bold;padding:12px 36px;border-radius:8px">&#x5e6;&#x5e4;&#x5d4; &#x5d1;&#x5e7;&#x5d9;&#x5e9;&#x5d5;&#x5e8; &#x5d4;&#x5d1;&#x5e8;&#x5d9;&#x5e3;</a></p>
<p style="font-size:12px;color:#8e8ea0">&#x5ea;&#x5d6;&#x5db;&#x5d5;&#x5e8;&#x5ea; &#x5d0;&#x5d5;&#x5d8;&#x5d5;&#x5de;&#x5d8;&#x5d9;&#x5ea; &#x5de;-Briefdesk.</p>
</div>
</body>
</html>"#,
        creator = ctx.creator_name,
        client = ctx.client_email,
        days = ctx.business_days,
        url = ctx.brief_url,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>() -> ReminderContext<'a> {
        ReminderContext {
            creator_name: "Dana",
            client_email: "client@example.com",
            brief_url: "https://briefdesk.example.com/brief/abc123",
            business_days: 8,
        }
    }

    #[test]
    fn english_message_names_the_client_and_link() {
        let email = reminder_email(Language::En, &ctx());
        assert!(email.subject.contains("client@example.com"));
        assert!(email.html.contains("client@example.com"));
        assert!(email.html.contains("https://briefdesk.example.com/brief/abc123"));
        assert!(email.html.contains("8 business days"));
        assert!(email.html.contains(r#"dir="ltr""#));
    }

    #[test]
    fn hebrew_message_is_rtl_and_shows_the_count() {
        let email = reminder_email(Language::He, &ctx());
        assert!(email.subject.contains("client@example.com"));
        assert!(email.html.contains(r#"dir="rtl""#));
        assert!(email.html.contains("8"));
        assert!(email.html.contains("https://briefdesk.example.com/brief/abc123"));
    }

    #[test]
    fn default_language_is_hebrew() {
        let email = reminder_email(Language::default(), &ctx());
        assert!(email.html.contains(r#"dir="rtl""#));
    }
}

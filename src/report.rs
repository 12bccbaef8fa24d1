//! Human-readable rendering of outcomes and the run summary.
//!
//! Rendered blocks are plain text so they can be written to the results file
//! verbatim. [`colorize_block`] and [`colorize_summary`] add terminal colors
//! for console output only.
use colored::*;

use crate::credential::Credential;
use crate::stats::RunSummary;
use crate::verifier::VerificationOutcome;

pub const SUMMARY_TITLE: &str = "=== Credential Check Summary ===";

pub const BANNER: &str = r#"
 ╔══════════════════════════════════════╗
 ║          Credential Checker          ║
 ╚══════════════════════════════════════╝
"#;

/// Render one credential's outcome. The first line always carries the preview
/// and status; only valid outcomes get a `Details:` section.
pub fn render_outcome(
    credential: &Credential,
    outcome: &VerificationOutcome,
    preview_len: usize,
) -> String {
    let mut out = format!(
        "Token: {} | Status: {}",
        credential.preview(preview_len),
        outcome.status_label()
    );
    match outcome {
        VerificationOutcome::Valid { attributes } => {
            out.push_str("\nDetails:");
            for (key, value) in attributes.fields() {
                out.push_str(&format!("\n  - {}: {}", key, value));
            }
        }
        VerificationOutcome::Invalid { status_code } => {
            out.push_str(&format!(" | Status Code: {}", status_code));
        }
        VerificationOutcome::TransportError { message } => {
            out.push_str(&format!(" | Error: {}", message));
        }
    }
    out
}

pub fn render_summary(summary: &RunSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(SUMMARY_TITLE.to_string());
    lines.push(format!("Total Credentials: {}", summary.total_count));
    lines.push(format!("Valid Credentials: {}", summary.valid_count));
    lines.push(format!("Invalid Credentials: {}", summary.invalid_count));
    if summary.transport_error_count > 0 {
        lines.push(format!(
            "  of which Transport Errors: {}",
            summary.transport_error_count
        ));
    }
    lines.push(format!("Success Rate: {:.2}%", summary.success_rate));
    lines.join("\n")
}

/// Color the status line of a rendered block green or red.
pub fn colorize_block(block: &str, outcome: &VerificationOutcome) -> String {
    let (head, rest) = match block.split_once('\n') {
        Some((h, r)) => (h, Some(r)),
        None => (block, None),
    };
    let head = if outcome.is_valid() {
        head.green().to_string()
    } else {
        head.red().to_string()
    };
    match rest {
        Some(r) => format!("{}\n{}", head, r),
        None => head,
    }
}

pub fn colorize_summary(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| {
            if line == SUMMARY_TITLE {
                line.bold().cyan().to_string()
            } else if line.starts_with("Valid ") {
                line.green().to_string()
            } else if line.starts_with("Invalid ") {
                line.red().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PremiumTier, ProfileAttributes};

    fn cred() -> Credential {
        Credential::new("MTk4NjIyNDgzNDcxOTI1MjQ4.Cl2FMQ.ZnCjm1XVW7vRze4b7Cq4se7kKWs").unwrap()
    }

    fn attrs() -> ProfileAttributes {
        ProfileAttributes {
            username: "alice#0420".into(),
            user_id: 175928847299117063,
            email: Some("a@example.test".into()),
            phone: None,
            verified: true,
            creation_date: "2016-04-30 11:18:25".into(),
            premium: PremiumTier::Tier1,
            badges: vec![],
            locale: Some("en-US".into()),
            avatar_url: None,
        }
    }

    #[test]
    fn invalid_block_has_no_details() {
        let out = VerificationOutcome::Invalid { status_code: 401 };
        let s = render_outcome(&cred(), &out, 10);
        assert_eq!(s, "Token: MTk4NjIyND... | Status: INVALID | Status Code: 401");
        assert!(!s.contains("Details:"));
    }

    #[test]
    fn valid_block_lists_every_attribute() {
        let out = VerificationOutcome::Valid { attributes: attrs() };
        let s = render_outcome(&cred(), &out, 10);
        insta::assert_snapshot!(s, @r"
        Token: MTk4NjIyND... | Status: VALID
        Details:
          - username: alice#0420
          - user_id: 175928847299117063
          - email: a@example.test
          - phone: Not available
          - verified: true
          - creation_date: 2016-04-30 11:18:25
          - premium_type: Nitro Classic
          - badges: None
          - locale: en-US
          - avatar_url: No avatar
        ");
    }

    #[test]
    fn summary_block() {
        let summary = RunSummary {
            total_count: 3,
            valid_count: 1,
            invalid_count: 2,
            transport_error_count: 1,
            success_rate: 33.33,
        };
        insta::assert_snapshot!(render_summary(&summary), @r"
        === Credential Check Summary ===
        Total Credentials: 3
        Valid Credentials: 1
        Invalid Credentials: 2
          of which Transport Errors: 1
        Success Rate: 33.33%
        ");
    }

    #[test]
    fn colorizing_keeps_text_intact() {
        let out = VerificationOutcome::Invalid { status_code: 403 };
        let plain = render_outcome(&cred(), &out, 10);
        let colored = colorize_block(&plain, &out);
        assert!(colored.contains("Status: INVALID"));
    }
}

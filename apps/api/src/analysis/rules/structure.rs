//! Structure rules. Letter-layout checks (greeting, closing, subject) only
//! run for email; spacing rules run everywhere.

use crate::analysis::models::{Category, EmailContext, ModeKind, WritingMode};
use crate::analysis::regions::{parse_regions, RegionName};
use crate::analysis::rules::{CheckHit, DetectorSpec, Matcher, ScanTarget, Suggest};

pub const MAX_SUBJECT_CHARS: usize = 60;

const EMAIL_ONLY: &[ModeKind] = &[ModeKind::Email];

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "missing_greeting",
        Category::Structure,
        Matcher::Check(missing_greeting),
        Suggest::FromCheck,
    )
    .only_in(EMAIL_ONLY),
    DetectorSpec::new(
        "missing_closing",
        Category::Structure,
        Matcher::Check(missing_closing),
        Suggest::FromCheck,
    )
    .only_in(EMAIL_ONLY),
    DetectorSpec::new(
        "subject_too_long",
        Category::Structure,
        Matcher::Check(subject_too_long),
        Suggest::FromCheck,
    )
    .target(ScanTarget::Region(RegionName::Subject))
    .only_in(EMAIL_ONLY),
    DetectorSpec::new(
        "double_space",
        Category::Structure,
        Matcher::Pattern(r"\S(?P<m> {2,})\b"),
        Suggest::Fixed(" "),
    ),
    DetectorSpec::new(
        "space_before_punctuation",
        Category::Structure,
        Matcher::Pattern(r"\w(?P<m>[ \t]+[,.;:!?])"),
        Suggest::Transform(trim_leading),
    ),
    DetectorSpec::new(
        "missing_space_after_punctuation",
        Category::Structure,
        Matcher::Pattern(r"[a-z](?P<m>[,;])[A-Za-z]"),
        Suggest::Transform(append_space),
    ),
];

fn trim_leading(found: &str) -> String {
    found.trim_start().to_string()
}

fn append_space(found: &str) -> String {
    format!("{found} ")
}

/// Greeting wording for the recipient.
pub fn greeting_for(ctx: &EmailContext) -> &'static str {
    match ctx.recipient_type.to_ascii_lowercase().as_str() {
        "hiring_manager" | "recruiter" => "Dear Hiring Manager,",
        "colleague" | "team" => "Hi team,",
        "client" | "customer" => "Dear valued client,",
        "professor" => "Dear Professor,",
        _ => "Hello,",
    }
}

/// Sign-off wording for the requested tone.
pub fn closing_for(ctx: &EmailContext) -> &'static str {
    match ctx.required_tone.to_ascii_lowercase().as_str() {
        "formal" => "Kind regards,",
        "friendly" | "casual" => "Best,",
        "apologetic" => "Thank you for your understanding,",
        "persuasive" | "enthusiastic" => "Looking forward to hearing from you,",
        _ => "Best regards,",
    }
}

/// Non-blank lines with their trimmed byte spans.
fn content_lines(text: &str) -> Vec<(usize, usize)> {
    let mut offset = 0;
    let mut lines = Vec::new();
    for raw in text.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lead = raw.len() - raw.trim_start().len();
        lines.push((start + lead, start + lead + trimmed.len()));
    }
    lines
}

fn missing_greeting(text: &str, mode: &WritingMode) -> Vec<CheckHit> {
    let Some(ctx) = mode.email() else {
        return Vec::new();
    };
    let regions = parse_regions(text);
    if !regions.greeting.is_empty() {
        return Vec::new();
    }
    let skip = usize::from(!regions.subject.is_empty());
    let Some(&(start, end)) = content_lines(text).get(skip) else {
        return Vec::new();
    };
    vec![CheckHit {
        start,
        end,
        suggestion: format!("{}\n\n{}", greeting_for(ctx), &text[start..end]),
    }]
}

fn missing_closing(text: &str, mode: &WritingMode) -> Vec<CheckHit> {
    let Some(ctx) = mode.email() else {
        return Vec::new();
    };
    let regions = parse_regions(text);
    if !regions.closing.is_empty() {
        return Vec::new();
    }
    let lines = content_lines(text);
    let skip = usize::from(!regions.subject.is_empty());
    if lines.len() <= skip {
        return Vec::new();
    }
    let Some(&(start, end)) = lines.last() else {
        return Vec::new();
    };
    vec![CheckHit {
        start,
        end,
        suggestion: format!("{}\n\n{}", &text[start..end], closing_for(ctx)),
    }]
}

fn subject_too_long(subject: &str, _mode: &WritingMode) -> Vec<CheckHit> {
    if subject.chars().count() <= MAX_SUBJECT_CHARS {
        return Vec::new();
    }
    vec![CheckHit {
        start: 0,
        end: subject.len(),
        suggestion: shorten(subject, MAX_SUBJECT_CHARS),
    }]
}

/// Cuts `text` to at most `max` chars, backing off to the last word break.
fn shorten(text: &str, max: usize) -> String {
    let cut = text
        .char_indices()
        .nth(max)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..cut];
    match head.rfind(char::is_whitespace) {
        Some(i) if i > 0 => head[..i].trim_end().to_string(),
        _ => head.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(recipient: &str, tone: &str) -> WritingMode {
        WritingMode::Email(EmailContext {
            recipient_type: recipient.to_string(),
            purpose: "follow_up".to_string(),
            required_tone: tone.to_string(),
        })
    }

    #[test]
    fn test_missing_greeting_flags_first_content_line() {
        let text = "Subject: Update\nThe report is attached.\nBest,\nAna";
        let hits = missing_greeting(text, &email("recruiter", "formal"));
        assert_eq!(hits.len(), 1);
        assert_eq!(&text[hits[0].start..hits[0].end], "The report is attached.");
        assert_eq!(
            hits[0].suggestion,
            "Dear Hiring Manager,\n\nThe report is attached."
        );
    }

    #[test]
    fn test_present_greeting_is_not_flagged() {
        let text = "Hi Ana,\nThe report is attached.\nBest,\nLi";
        assert!(missing_greeting(text, &email("colleague", "friendly")).is_empty());
        assert!(missing_closing(text, &email("colleague", "friendly")).is_empty());
    }

    #[test]
    fn test_missing_closing_uses_tone() {
        let text = "Hi Ana,\nThe report is attached.";
        let hits = missing_closing(text, &email("colleague", "apologetic"));
        assert_eq!(hits.len(), 1);
        assert_eq!(&text[hits[0].start..hits[0].end], "The report is attached.");
        assert!(hits[0]
            .suggestion
            .ends_with("Thank you for your understanding,"));
    }

    #[test]
    fn test_layout_checks_are_silent_outside_email() {
        let text = "The report is attached.";
        assert!(missing_greeting(text, &WritingMode::General).is_empty());
        assert!(missing_closing(text, &WritingMode::General).is_empty());
    }

    #[test]
    fn test_subject_too_long() {
        let subject = "Following up regarding the senior data analyst application I submitted last week";
        let hits = subject_too_long(subject, &email("recruiter", "formal"));
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].start, hits[0].end), (0, subject.len()));
        assert!(hits[0].suggestion.chars().count() <= MAX_SUBJECT_CHARS);
        assert!(subject.starts_with(&hits[0].suggestion));
        assert!(subject_too_long("Short subject", &WritingMode::General).is_empty());
    }

    #[test]
    fn test_spacing_patterns() {
        let registry = &crate::analysis::rules::REGISTRY;
        let text = "Hello  world , fine,thanks";
        let double = registry.get("double_space").unwrap().scan(text, &WritingMode::General);
        assert_eq!((double[0].start, double[0].end), (5, 7));
        let before = registry
            .get("space_before_punctuation")
            .unwrap()
            .scan(text, &WritingMode::General);
        assert_eq!(&text[before[0].start..before[0].end], " ,");
        assert_eq!(before[0].suggestion, ",");
        let after = registry
            .get("missing_space_after_punctuation")
            .unwrap()
            .scan(text, &WritingMode::General);
        assert_eq!(&text[after[0].start..after[0].end], ",");
        assert_eq!(after[0].suggestion, ", ");
    }

    #[test]
    fn test_adjacent_missing_spaces_all_flagged() {
        let hits = crate::analysis::rules::REGISTRY
            .get("missing_space_after_punctuation")
            .unwrap()
            .scan("a,b,c", &WritingMode::General);
        let spans: Vec<_> = hits.iter().map(|h| (h.start, h.end)).collect();
        assert_eq!(spans, vec![(1, 2), (3, 4)]);
    }
}

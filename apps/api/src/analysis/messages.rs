//! Message templates keyed by `(detector id, mode)`.
//!
//! Detectors decide WHERE an issue is; this table decides how it is worded
//! and how severe it is for the active writing mode. Lookups fall back to the
//! `General` entry when a mode has no override.
//!
//! Placeholders: `{match}`, `{suggestion}`, `{recipient}`, `{purpose}`, `{tone}`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::analysis::models::{EmailContext, ModeKind, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    pub severity: Severity,
    pub message: &'static str,
    pub explanation: Option<&'static str>,
}

const fn t(
    severity: Severity,
    message: &'static str,
    explanation: Option<&'static str>,
) -> MessageTemplate {
    MessageTemplate {
        severity,
        message,
        explanation,
    }
}

use ModeKind::{AcademicResearch as Research, AcademicStandard as Academic, Email, General};
use Severity::{High, Low, Medium};

const TEMPLATES: &[(&str, ModeKind, MessageTemplate)] = &[
    // spelling
    ("common_misspelling", General, t(Medium, "Possible misspelling: '{match}'", Some("Did you mean '{suggestion}'?"))),
    ("common_misspelling", Academic, t(High, "Misspelled word: '{match}'", Some("Spelling errors undermine credibility in academic writing. Use '{suggestion}'."))),
    ("common_misspelling", Research, t(High, "Misspelled word: '{match}'", Some("Spelling errors undermine credibility in academic writing. Use '{suggestion}'."))),
    ("common_misspelling", Email, t(High, "Possible misspelling: '{match}'", Some("Typos in an email to a {recipient} can look careless."))),
    // grammar
    ("lowercase_i", General, t(Medium, "The pronoun 'I' should be capitalized", None)),
    ("repeated_word", General, t(Medium, "Repeated word: '{match}'", Some("The same word appears twice in a row."))),
    ("article_agreement", General, t(Medium, "Use '{suggestion}' instead of '{match}'", Some("Use 'an' before a vowel sound and 'a' before a consonant sound."))),
    ("confused_phrase", General, t(High, "Incorrect phrase: '{match}'", Some("The standard form is '{suggestion}'."))),
    ("sentence_capitalization", General, t(Low, "Sentence should start with a capital letter", None)),
    ("sentence_capitalization", Academic, t(Medium, "Sentence should start with a capital letter", None)),
    ("sentence_capitalization", Research, t(Medium, "Sentence should start with a capital letter", None)),
    // style
    ("wordy_phrase", General, t(Low, "Wordy phrase: '{match}'", Some("'{suggestion}' says the same thing in fewer words."))),
    ("wordy_phrase", Academic, t(Medium, "Wordy phrase: '{match}'", Some("Concise phrasing is expected in academic prose; prefer '{suggestion}'."))),
    ("wordy_phrase", Research, t(Medium, "Wordy phrase: '{match}'", Some("Concise phrasing is expected in academic prose; prefer '{suggestion}'."))),
    ("weak_intensifier", General, t(Low, "Weak intensifier: '{match}'", Some("Intensifiers rarely add meaning; choose a stronger word instead."))),
    ("weak_intensifier", Academic, t(Medium, "Avoid intensifiers in academic writing", Some("Words like 'very' or 'really' weaken precision."))),
    ("weak_intensifier", Research, t(Medium, "Avoid intensifiers in academic writing", Some("Words like 'very' or 'really' weaken precision."))),
    ("passive_voice", General, t(Low, "Passive voice: '{match}'", Some("Active voice is usually clearer and more direct."))),
    ("passive_voice", Academic, t(Low, "Passive construction: '{match}'", Some("Passive voice is acceptable in methods sections; check that the agent is clear."))),
    ("passive_voice", Research, t(Low, "Passive construction: '{match}'", Some("Passive voice is acceptable in methods sections; check that the agent is clear."))),
    ("passive_voice", Email, t(Low, "Passive voice: '{match}'", Some("A {tone} email reads better in active voice."))),
    ("cliche", General, t(Low, "Cliché: '{match}'", Some("Overused phrases make writing generic. Try '{suggestion}'."))),
    ("cliche", Email, t(Medium, "Cliché: '{match}'", Some("A {recipient} sees this phrase constantly. Try '{suggestion}'."))),
    // tone
    ("shouting_caps", General, t(Medium, "All-caps text reads as shouting: '{match}'", None)),
    ("shouting_caps", Email, t(High, "All-caps text reads as shouting: '{match}'", Some("Use normal case when writing to a {recipient}."))),
    ("demanding_language", General, t(Low, "Demanding phrasing: '{match}'", Some("Softer phrasing such as '{suggestion}' is more collaborative."))),
    ("demanding_language", Email, t(Medium, "Demanding phrasing: '{match}'", Some("For a {tone} {purpose} email, try '{suggestion}'."))),
    ("passive_aggressive", General, t(Medium, "Potentially passive-aggressive: '{match}'", Some("Try '{suggestion}' instead."))),
    ("passive_aggressive", Email, t(High, "Potentially passive-aggressive: '{match}'", Some("This can read as hostile to a {recipient}. Try '{suggestion}'."))),
    ("self_deprecating", General, t(Low, "Undermining phrase: '{match}'", Some("Confident phrasing such as '{suggestion}' reads better."))),
    ("self_deprecating", Email, t(Medium, "Undermining phrase: '{match}'", Some("In a {purpose} email, '{suggestion}' sounds more confident."))),
    // structure
    ("missing_greeting", Email, t(Medium, "Email has no greeting", Some("A {purpose} email to a {recipient} should open with a greeting."))),
    ("missing_closing", Email, t(Medium, "Email has no closing", Some("End a {tone} email with a sign-off before your name."))),
    ("subject_too_long", Email, t(Low, "Subject line is too long", Some("Keep subject lines under 60 characters so they are not truncated."))),
    ("double_space", General, t(Low, "Multiple spaces between words", None)),
    ("space_before_punctuation", General, t(Low, "Unexpected space before punctuation", None)),
    ("missing_space_after_punctuation", General, t(Low, "Missing space after punctuation", None)),
    // professionalism
    ("repeated_exclamation", General, t(Medium, "Excessive exclamation marks", Some("Multiple exclamation marks look unprofessional."))),
    ("repeated_exclamation", Email, t(Medium, "Excessive exclamation marks", Some("Multiple exclamation marks can seem unprofessional to a {recipient}."))),
    ("repeated_question", General, t(Low, "Excessive question marks", None)),
    ("informal_abbreviation", General, t(Medium, "Informal abbreviation: '{match}'", Some("Spell it out: '{suggestion}'."))),
    ("informal_abbreviation", Email, t(High, "Informal abbreviation: '{match}'", Some("Avoid text-speak when writing to a {recipient}."))),
    ("emoticon", General, t(Low, "Emoticon or emoji", Some("Emoji are usually out of place in professional writing."))),
    ("emoticon", Email, t(Medium, "Emoticon or emoji", Some("Consider whether a {recipient} expects emoji in a {tone} email."))),
    // clarity
    ("long_sentence", General, t(Low, "Long sentence", Some("Sentences over 35 words are hard to follow; consider splitting."))),
    ("long_sentence", Academic, t(Medium, "Long sentence", Some("Split complex sentences so each carries one claim."))),
    ("long_sentence", Research, t(Medium, "Long sentence", Some("Split complex sentences so each carries one claim."))),
    ("vague_wording", General, t(Low, "Vague wording: '{match}'", Some("Be specific; '{suggestion}' is more precise."))),
    ("vague_wording", Academic, t(Medium, "Imprecise wording: '{match}'", Some("Academic writing should quantify or specify. Consider '{suggestion}'."))),
    ("vague_wording", Research, t(Medium, "Imprecise wording: '{match}'", Some("Academic writing should quantify or specify. Consider '{suggestion}'."))),
    ("double_negative", General, t(Medium, "Double negative: '{match}'", Some("Rewrite positively: '{suggestion}'."))),
    // academic
    ("contraction", Academic, t(Medium, "Contraction in formal writing: '{match}'", Some("Expand to '{suggestion}'."))),
    ("contraction", Research, t(High, "Contraction in formal writing: '{match}'", Some("Research writing avoids contractions. Expand to '{suggestion}'."))),
    ("colloquialism", Academic, t(Medium, "Colloquial expression: '{match}'", Some("Prefer a formal alternative such as '{suggestion}'."))),
    ("personal_opinion", Academic, t(Medium, "First-person opinion: '{match}'", Some("State the claim through evidence rather than personal belief."))),
    ("personal_opinion", Research, t(High, "First-person opinion: '{match}'", Some("Research claims should rest on evidence, not on what the authors think."))),
    ("sweeping_generalization", Academic, t(High, "Sweeping generalization: '{match}'", Some("Absolute statements about whole groups are rarely defensible."))),
    ("emotive_language", Academic, t(Medium, "Emotive language: '{match}'", Some("Use neutral wording such as '{suggestion}'."))),
    ("absolute_claim", Academic, t(Medium, "Overstated claim: '{match}'", Some("Hedge the claim, e.g. '{suggestion}', unless it is cited."))),
    ("absolute_claim", Research, t(High, "Overstated claim: '{match}'", Some("Uncited certainty is a red flag for reviewers. Consider '{suggestion}'."))),
    ("uncited_research_claim", Research, t(High, "Claim about research without a citation", Some("Add a citation within the same sentence."))),
    ("self_citation", Research, t(Low, "First-person self-citation: '{match}'", Some("Refer to your own cited work in the third person, e.g. '{suggestion}', to keep review anonymous."))),
    ("uncited_statistic", Research, t(Medium, "Statistic without a source: '{match}'", Some("Cite where this figure comes from."))),
];

static TABLE: Lazy<HashMap<(&'static str, ModeKind), MessageTemplate>> = Lazy::new(|| {
    TEMPLATES
        .iter()
        .map(|&(id, mode, template)| ((id, mode), template))
        .collect()
});

/// Template for a detector in a mode. Academic research falls back to
/// academic standard before general; every mode finally falls back to general.
pub fn lookup(detector_id: &'static str, mode: ModeKind) -> Option<&'static MessageTemplate> {
    let chain: &[ModeKind] = match mode {
        General => &[General],
        Academic => &[Academic, General],
        Research => &[Research, Academic, General],
        Email => &[Email, General],
    };
    chain
        .iter()
        .find_map(|&m| TABLE.get(&(detector_id, m)))
}

pub struct RenderContext<'a> {
    pub matched: &'a str,
    pub suggestion: &'a str,
    pub email: Option<&'a EmailContext>,
}

/// Fills placeholders. Email placeholders degrade to neutral words outside
/// email mode.
pub fn render(template: &str, ctx: &RenderContext<'_>) -> String {
    let (recipient, purpose, tone) = match ctx.email {
        Some(e) => (
            humanize(&e.recipient_type, "recipient"),
            humanize(&e.purpose, "professional"),
            humanize(&e.required_tone, "professional"),
        ),
        None => (
            "recipient".to_string(),
            "professional".to_string(),
            "professional".to_string(),
        ),
    };
    template
        .replace("{match}", ctx.matched.trim())
        .replace("{suggestion}", ctx.suggestion)
        .replace("{recipient}", &recipient)
        .replace("{purpose}", &purpose)
        .replace("{tone}", &tone)
}

/// `hiring_manager` → `hiring manager`; empty → `fallback`.
fn humanize(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.replace(['_', '-'], " ")
    }
}

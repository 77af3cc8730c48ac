//! Academic detector groups. Active only in academic modes; citation checks
//! only in research mode (see `Category::active_in`).

use crate::analysis::models::Category;
use crate::analysis::rules::{
    DetectorSpec, GuardMode, GuardSpec, Matcher, Suggest, CITATION_PATTERN, GUARD_RADIUS,
};

pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("can't", "cannot"),
    ("won't", "will not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("shouldn't", "should not"),
    ("couldn't", "could not"),
    ("wouldn't", "would not"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("we're", "we are"),
    ("they're", "they are"),
    ("i'm", "I am"),
];

pub const COLLOQUIALISMS: &[(&str, &str)] = &[
    ("pretty much", "largely"),
    ("big deal", "significant issue"),
    ("figure out", "determine"),
    ("look into", "investigate"),
    ("come up with", "develop"),
    ("find out", "discover"),
    ("okay", "acceptable"),
    ("huge", "substantial"),
    ("a bunch of", "several"),
];

pub const EMOTIVE_WORDS: &[(&str, &str)] = &[
    ("amazing", "notable"),
    ("awesome", "impressive"),
    ("terrible", "poor"),
    ("horrible", "severe"),
    ("shocking", "unexpected"),
    ("ridiculous", "unreasonable"),
    ("disastrous", "highly damaging"),
];

pub const ABSOLUTE_CLAIMS: &[(&str, &str)] = &[
    ("proves", "suggests"),
    ("prove", "suggest"),
    ("proven", "supported"),
    ("always", "often"),
    ("never", "rarely"),
    ("certainly", "likely"),
    ("undoubtedly", "arguably"),
    ("definitely", "probably"),
    ("without a doubt", "arguably"),
    ("without doubt", "arguably"),
];

pub const SELF_CITATIONS: &[(&str, &str)] = &[
    ("our previous work", "prior work"),
    ("our previous study", "a prior study"),
    ("our earlier work", "prior work"),
    ("our prior work", "prior work"),
    ("my previous work", "prior work"),
    ("in our previous paper", "in prior work"),
];

const CITATION_NEARBY: GuardSpec = GuardSpec {
    pattern: CITATION_PATTERN,
    radius: GUARD_RADIUS,
    mode: GuardMode::Require,
};

const NO_CITATION_NEARBY: GuardSpec = GuardSpec {
    pattern: CITATION_PATTERN,
    radius: GUARD_RADIUS,
    mode: GuardMode::Forbid,
};

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "contraction",
        Category::AcademicTone,
        Matcher::Words(CONTRACTIONS),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "colloquialism",
        Category::AcademicTone,
        Matcher::Words(COLLOQUIALISMS),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "personal_opinion",
        Category::AcademicObjectivity,
        Matcher::Pattern(r"(?i)\b(?:I|we)\s+(?:think|believe|feel|guess|suppose)\b"),
        Suggest::Fixed("The evidence suggests"),
    ),
    DetectorSpec::new(
        "sweeping_generalization",
        Category::AcademicObjectivity,
        Matcher::Pattern(r"(?i)\b(?:all|every|no)\s+\w+\s+(?:always|never)\b"),
        Suggest::Transform(soften_generalization),
    ),
    DetectorSpec::new(
        "emotive_language",
        Category::AcademicObjectivity,
        Matcher::Words(EMOTIVE_WORDS),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "absolute_claim",
        Category::AcademicHedging,
        Matcher::Words(ABSOLUTE_CLAIMS),
        Suggest::Lookup,
    )
    .guard(NO_CITATION_NEARBY),
    DetectorSpec::new(
        "uncited_research_claim",
        Category::AcademicCitation,
        Matcher::Pattern(
            r"(?i)\b(?:studies|research|evidence|experts|scientists|surveys)\s+(?:show|shows|suggest|suggests|prove|proves|indicate|indicates|demonstrate|demonstrates|confirm|confirms)\b",
        ),
        Suggest::Transform(append_citation),
    )
    .guard(NO_CITATION_NEARBY),
    DetectorSpec::new(
        "uncited_statistic",
        Category::AcademicCitation,
        Matcher::Pattern(r"\b\d+(?:\.\d+)?\s?%"),
        Suggest::Transform(append_citation),
    )
    .guard(NO_CITATION_NEARBY),
    // First-person references to cited work reveal authorship in blind review.
    DetectorSpec::new(
        "self_citation",
        Category::AcademicCitation,
        Matcher::Words(SELF_CITATIONS),
        Suggest::Lookup,
    )
    .guard(CITATION_NEARBY),
];

/// "all students always" → "many students often".
fn soften_generalization(found: &str) -> String {
    found
        .split_whitespace()
        .map(|word| match word.to_ascii_lowercase().as_str() {
            "all" | "every" => crate::analysis::matcher::match_case(word, "many"),
            "no" => crate::analysis::matcher::match_case(word, "few"),
            "always" => "often".to_string(),
            "never" => "rarely".to_string(),
            _ => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn append_citation(found: &str) -> String {
    format!("{found} (Author, Year)")
}

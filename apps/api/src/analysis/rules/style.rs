use crate::analysis::models::Category;
use crate::analysis::rules::{DetectorSpec, Matcher, Suggest};

pub const WORDY_PHRASES: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("at this point in time", "now"),
    ("in the event that", "if"),
    ("for the purpose of", "to"),
    ("with regard to", "about"),
    ("in spite of the fact that", "although"),
    ("a large number of", "many"),
    ("has the ability to", "can"),
    ("have the ability to", "can"),
    ("at the present time", "currently"),
    ("in the near future", "soon"),
    ("each and every", "every"),
    ("first and foremost", "first"),
    ("it is important to note that", "notably,"),
];

pub const CLICHES: &[(&str, &str)] = &[
    ("think outside the box", "think creatively"),
    ("at the end of the day", "ultimately"),
    ("low-hanging fruit", "quick wins"),
    ("game changer", "major improvement"),
    ("game-changer", "major improvement"),
    ("synergy", "collaboration"),
    ("touch base", "connect"),
    ("circle back", "follow up"),
    ("move the needle", "make measurable progress"),
    ("team player", "collaborative colleague"),
    ("go-getter", "self-starter"),
    ("hit the ground running", "start contributing quickly"),
    ("results-driven", "focused on outcomes"),
];

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "wordy_phrase",
        Category::Style,
        Matcher::Words(WORDY_PHRASES),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "weak_intensifier",
        Category::Style,
        Matcher::Pattern(r"(?i)\b(?:very|really|extremely|quite|rather|somewhat|totally)\s+"),
        Suggest::Delete,
    ),
    DetectorSpec::new(
        "passive_voice",
        Category::Style,
        Matcher::Pattern(r"(?i)\b(?:was|were|is|are|been|being)\s+(?:\w+ly\s+)?\w+ed\b"),
        Suggest::Keep,
    ),
    DetectorSpec::new(
        "cliche",
        Category::Style,
        Matcher::Words(CLICHES),
        Suggest::Lookup,
    ),
];

use crate::analysis::models::Category;
use crate::analysis::regions::RegionName;
use crate::analysis::rules::{DetectorSpec, Matcher, ScanTarget, Suggest};

pub const DEMANDING_PHRASES: &[(&str, &str)] = &[
    ("you must", "please"),
    ("you need to", "could you please"),
    ("you should", "you might consider"),
    ("i demand", "I would appreciate"),
    ("immediately", "at your earliest convenience"),
    ("asap", "as soon as possible"),
    ("failure to", "if you are unable to"),
];

pub const PASSIVE_AGGRESSIVE_PHRASES: &[(&str, &str)] = &[
    ("per my last email", "as mentioned in my previous email"),
    ("as i already told you", "as mentioned previously"),
    ("as i said", "as mentioned"),
    ("as previously stated", "as mentioned"),
    ("friendly reminder", "reminder"),
    ("not sure if you saw", "following up on"),
    ("you failed to", "it looks like we missed"),
    ("that's not my job", "let me find the right person for this"),
    ("obviously", "as you may know"),
];

pub const SELF_DEPRECATING_PHRASES: &[(&str, &str)] = &[
    ("sorry to bother you", "thank you for your time"),
    ("sorry for bothering you", "thank you for your time"),
    ("just wanted to", "wanted to"),
    ("just checking in", "following up"),
    ("i'm no expert", "in my experience"),
    ("this might be a stupid question", "I have a question"),
    ("i hope this makes sense", "please let me know if anything is unclear"),
];

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "shouting_caps",
        Category::Tone,
        Matcher::Pattern(r"\b[A-Z]{5,}\b"),
        Suggest::Transform(str::to_lowercase),
    )
    .target(ScanTarget::Region(RegionName::Body)),
    DetectorSpec::new(
        "demanding_language",
        Category::Tone,
        Matcher::Words(DEMANDING_PHRASES),
        Suggest::Lookup,
    )
    .target(ScanTarget::Region(RegionName::Body)),
    DetectorSpec::new(
        "passive_aggressive",
        Category::Tone,
        Matcher::Words(PASSIVE_AGGRESSIVE_PHRASES),
        Suggest::Lookup,
    )
    .target(ScanTarget::Region(RegionName::Body)),
    DetectorSpec::new(
        "self_deprecating",
        Category::Tone,
        Matcher::Words(SELF_DEPRECATING_PHRASES),
        Suggest::Lookup,
    )
    .target(ScanTarget::Region(RegionName::Body)),
];

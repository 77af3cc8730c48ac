use crate::analysis::models::Category;
use crate::analysis::rules::{DetectorSpec, Matcher, Suggest};

pub const INFORMAL_ABBREVIATIONS: &[(&str, &str)] = &[
    ("btw", "by the way"),
    ("fyi", "for your information"),
    ("imo", "in my opinion"),
    ("imho", "in my opinion"),
    ("tbh", "to be honest"),
    ("pls", "please"),
    ("plz", "please"),
    ("thx", "thank you"),
    ("ty", "thank you"),
    ("ur", "your"),
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("gotta", "have to"),
    ("kinda", "somewhat"),
    ("dunno", "don't know"),
    ("idk", "I don't know"),
    ("lol", ""),
    ("hey guys", "hello everyone"),
];

pub const DETECTORS: &[DetectorSpec] = &[
    DetectorSpec::new(
        "repeated_exclamation",
        Category::Professionalism,
        Matcher::Pattern(r"!{2,}"),
        Suggest::Fixed("."),
    ),
    DetectorSpec::new(
        "repeated_question",
        Category::Professionalism,
        Matcher::Pattern(r"\?{2,}|\?!+|!\?+"),
        Suggest::Fixed("?"),
    ),
    DetectorSpec::new(
        "informal_abbreviation",
        Category::Professionalism,
        Matcher::Words(INFORMAL_ABBREVIATIONS),
        Suggest::Lookup,
    ),
    DetectorSpec::new(
        "emoticon",
        Category::Professionalism,
        Matcher::Pattern(r"(?:[:;]-?[)(DPp])|[\x{1F300}-\x{1FAFF}\x{2600}-\x{27BF}]"),
        Suggest::Delete,
    ),
];

#[cfg(test)]
mod tests {
    use crate::analysis::models::WritingMode;
    use crate::analysis::rules::REGISTRY;

    fn flagged(id: &str, text: &str) -> Vec<(String, String)> {
        REGISTRY
            .get(id)
            .unwrap()
            .scan(text, &WritingMode::General)
            .into_iter()
            .map(|h| (text[h.start..h.end].to_string(), h.suggestion))
            .collect()
    }

    #[test]
    fn test_exclamation_run_becomes_period() {
        assert_eq!(
            flagged("repeated_exclamation", "Please respond ASAP!!!"),
            vec![("!!!".to_string(), ".".to_string())]
        );
        assert!(flagged("repeated_exclamation", "Great!").is_empty());
    }

    #[test]
    fn test_interrobang() {
        assert_eq!(flagged("repeated_question", "Really?!").len(), 1);
        assert_eq!(flagged("repeated_question", "Why??").len(), 1);
    }

    #[test]
    fn test_informal_abbreviation_whole_words_only() {
        assert_eq!(
            flagged("informal_abbreviation", "btw the tyre is fine"),
            vec![("btw".to_string(), "by the way".to_string())]
        );
    }

    #[test]
    fn test_emoticons_and_emoji() {
        assert_eq!(flagged("emoticon", "Thanks :) see you 🎉").len(), 2);
    }
}

use crate::analysis::models::Category;
use crate::analysis::rules::{DetectorSpec, Matcher, Suggest};

/// Common misspellings seen in CVs, cover letters and email.
pub const MISSPELLINGS: &[(&str, &str)] = &[
    ("recieve", "receive"),
    ("recieved", "received"),
    ("alot", "a lot"),
    ("seperate", "separate"),
    ("definately", "definitely"),
    ("occured", "occurred"),
    ("occurence", "occurrence"),
    ("untill", "until"),
    ("wich", "which"),
    ("teh", "the"),
    ("accomodate", "accommodate"),
    ("acheive", "achieve"),
    ("acheived", "achieved"),
    ("adress", "address"),
    ("apparantly", "apparently"),
    ("arguement", "argument"),
    ("begining", "beginning"),
    ("beleive", "believe"),
    ("buisness", "business"),
    ("calender", "calendar"),
    ("collegue", "colleague"),
    ("comittee", "committee"),
    ("concious", "conscious"),
    ("enviroment", "environment"),
    ("existance", "existence"),
    ("experiance", "experience"),
    ("foward", "forward"),
    ("goverment", "government"),
    ("guarentee", "guarantee"),
    ("independant", "independent"),
    ("knowlege", "knowledge"),
    ("liason", "liaison"),
    ("maintainance", "maintenance"),
    ("managment", "management"),
    ("millenium", "millennium"),
    ("neccessary", "necessary"),
    ("noticable", "noticeable"),
    ("occassion", "occasion"),
    ("oppurtunity", "opportunity"),
    ("persue", "pursue"),
    ("posession", "possession"),
    ("prefered", "preferred"),
    ("publically", "publicly"),
    ("realy", "really"),
    ("recomend", "recommend"),
    ("refered", "referred"),
    ("remeber", "remember"),
    ("responsability", "responsibility"),
    ("sucess", "success"),
    ("succesful", "successful"),
    ("supercede", "supersede"),
    ("tommorow", "tomorrow"),
    ("truely", "truly"),
    ("wierd", "weird"),
];

pub const DETECTORS: &[DetectorSpec] = &[DetectorSpec::new(
    "common_misspelling",
    Category::Spelling,
    Matcher::Words(MISSPELLINGS),
    Suggest::Lookup,
)];

#[cfg(test)]
mod tests {
    use crate::analysis::models::WritingMode;
    use crate::analysis::rules::REGISTRY;

    #[test]
    fn test_flags_and_corrects_misspellings() {
        let text = "I recieve alot of messages.";
        let hits = REGISTRY
            .get("common_misspelling")
            .unwrap()
            .scan(text, &WritingMode::General);
        assert_eq!(hits.len(), 2);
        assert_eq!((hits[0].start, hits[0].end), (2, 9));
        assert_eq!(hits[0].suggestion, "receive");
        assert_eq!((hits[1].start, hits[1].end), (10, 14));
        assert_eq!(hits[1].suggestion, "a lot");
    }

    #[test]
    fn test_preserves_leading_capital() {
        let hits = REGISTRY
            .get("common_misspelling")
            .unwrap()
            .scan("Definately yes", &WritingMode::General);
        assert_eq!(hits[0].suggestion, "Definitely");
    }

    #[test]
    fn test_ignores_correct_words_and_substrings() {
        let hits = REGISTRY
            .get("common_misspelling")
            .unwrap()
            .scan("I receive a lot; realistic wichita", &WritingMode::General);
        assert!(hits.is_empty());
    }
}

//! Rule-based suffix stripping.

/// Ordered (suffix, replacement) rules. The first rule whose suffix matches is the only one
/// applied, so longer suffixes must stay ahead of the shorter ones they end with.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
    ("ing", ""),
    ("ed", ""),
    ("es", ""),
    ("s", ""),
    ("ly", ""),
];

/// Words shorter than this are returned untouched.
const MIN_STEM_LEN: usize = 3;

/// Reduce a word to its approximate root form.
pub fn stem(word: &str) -> String {
    if word.chars().count() < MIN_STEM_LEN {
        return word.to_string();
    }
    SUFFIX_RULES
        .iter()
        .find_map(|(suffix, replacement)| {
            word.strip_suffix(suffix).map(|root| format!("{root}{replacement}"))
        })
        .unwrap_or_else(|| word.to_string())
}

use serde::{Deserialize, Deserializer};

/// Normalizes a name by stripping any whitespace and decomposing it
/// into Unicode Normalization Form D.
///
/// ```
/// use caredesk::normalization::normalize_name;
/// assert_eq!(normalize_name(" h\u{ef} "), "hi\u{308}");
/// ```
pub fn normalize_name(name: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    name.as_ref().trim().nfd().to_string()
}

/// Folds text for case-insensitive comparison: decomposes it into NFD
/// and lower-cases it. Unlike [`normalize_name`] this keeps surrounding
/// whitespace, since a search for `" "` should still mean something.
///
/// ```
/// use caredesk::normalization::fold;
/// assert_eq!(fold("Alice JOHNSON"), "alice johnson");
/// ```
pub fn fold(text: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    text.as_ref().nfd().collect::<String>().to_lowercase()
}

/// Deserializes a `String` after running it through `normalize_name`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de> {
    let s = String::deserialize(deserializer)?;
    Ok(normalize_name(s))
}

//! Shared utility functions
//!
//! Identifier shaping shared by the synthesizer and the emitters.

/// Convert snake_case to PascalCase
///
/// # Examples
/// ```
/// use traitsynth::util::to_pascal_case;
/// assert_eq!(to_pascal_case("flee_behavior"), "FleeBehavior");
/// assert_eq!(to_pascal_case("FleeBehavior"), "FleeBehavior");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .map(capitalize_first)
        .collect()
}

/// Uppercase the first character, leave the rest untouched
///
/// # Examples
/// ```
/// use traitsynth::util::capitalize_first;
/// assert_eq!(capitalize_first("isBrave"), "IsBrave");
/// ```
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep only ASCII letters and digits
///
/// # Examples
/// ```
/// use traitsynth::util::strip_non_alphanumeric;
/// assert_eq!(strip_non_alphanumeric("is_brave?"), "isbrave");
/// ```
pub fn strip_non_alphanumeric(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Collapse line breaks to single spaces
///
/// Tree text lands in `//` comments, string literals and MiniYaml lines,
/// all of which end at the first line break.
///
/// # Examples
/// ```
/// use traitsynth::util::single_line;
/// assert_eq!(single_line("Dance()\nself.Kill();"), "Dance() self.Kill();");
/// assert_eq!(single_line("a\r\nb"), "a b");
/// ```
pub fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Escape text for use inside a C# string literal
pub fn escape_csharp(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

//! Validation of tag and attribute names against the XML `Name` production.
//!
//! Names that start with `:` are rejected even though XML 1.0 technically
//! allows them, since namespace-aware processors treat a leading colon as an
//! empty prefix.

/// Reasons a string is not usable as an XML name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The name is empty.
    #[error("name must not be empty")]
    Empty,

    /// The first character cannot start a name.
    #[error("name must not start with {0:?}")]
    InvalidStart(char),

    /// A later character is not a name character.
    #[error("name contains invalid character {0:?}")]
    InvalidChar(char),

    /// Tag names beginning with `xml` are reserved.
    #[error("tag name must not start with \"xml\"")]
    ReservedPrefix,
}

/// Check that `name` matches the XML `Name` production.
pub fn check_name(name: &str) -> Result<(), NameError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(NameError::Empty);
    };
    if first == ':' || !is_name_start_char(first) {
        return Err(NameError::InvalidStart(first));
    }
    match chars.find(|&c| !is_name_char(c)) {
        Some(bad) => Err(NameError::InvalidChar(bad)),
        None => Ok(()),
    }
}

/// Check a resolved tag name.
///
/// In addition to [`check_name`], names starting with `xml` in any letter
/// case are reserved.
pub fn check_tag(name: &str) -> Result<(), NameError> {
    check_name(name)?;
    if name
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml"))
    {
        return Err(NameError::ReservedPrefix);
    }
    Ok(())
}

/// Check a resolved attribute name.
pub fn check_attribute(name: &str) -> Result<(), NameError> {
    check_name(name)
}

/// `NameStartChar` from XML 1.0 (fifth edition), section 2.3.
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | '_'
        | 'A'..='Z'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

/// `NameChar` from XML 1.0 (fifth edition), section 2.3.
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

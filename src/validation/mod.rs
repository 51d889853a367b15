//! Input validation for names that end up in the XML and DTD artifacts.
//!
//! Column names become element names verbatim, so they must be valid XML
//! names. Characters outside the accepted set are rejected, never escaped or
//! rewritten.

use thiserror::Error;

/// Maximum length accepted for an element name
pub const MAX_ELEMENT_NAME_LENGTH: usize = 255;

/// Errors that can occur during name validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Name exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Name contains characters not allowed in an XML name
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Name has an invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a name used as an XML element name.
///
/// # Rules
///
/// - Must not be empty or longer than 255 characters
/// - Must start with a letter or underscore
/// - May contain letters, digits, underscores, hyphens and periods
/// - Names starting with `xml` (any letter case) are accepted with a warning
///
/// # Examples
///
/// ```
/// use dtd_export::validation::validate_element_name;
///
/// assert!(validate_element_name("first_name").is_ok());
/// assert!(validate_element_name("2nd").is_err());
/// assert!(validate_element_name("hire date").is_err());
/// ```
pub fn validate_element_name(name: &str) -> ValidationResult<()> {
    let first_char = match name.chars().next() {
        Some(c) => c,
        None => return Err(ValidationError::Empty("element name")),
    };

    let length = name.chars().count();
    if length > MAX_ELEMENT_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "element name",
            max: MAX_ELEMENT_NAME_LENGTH,
            actual: length,
        });
    }

    if !first_char.is_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidFormat(
            "element name",
            format!("'{name}' must start with a letter or underscore"),
        ));
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && !matches!(c, '_' | '-' | '.') {
            return Err(ValidationError::InvalidCharacters {
                field: "element name",
                reason: format!("invalid character '{c}' in '{name}'"),
            });
        }
    }

    // Reserved for future XML standards, but still well-formed
    if name
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xml"))
    {
        tracing::warn!("Element name '{}' starts with the reserved prefix 'xml'", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_column_names() {
        for name in ["id", "first_name", "hire-date", "v1.2", "_internal", "имя"] {
            assert!(validate_element_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            validate_element_name(""),
            Err(ValidationError::Empty("element name"))
        );
    }

    #[test]
    fn test_rejects_leading_digit_and_spaces() {
        assert!(matches!(
            validate_element_name("1st"),
            Err(ValidationError::InvalidFormat(..))
        ));
        assert!(matches!(
            validate_element_name("hire date"),
            Err(ValidationError::InvalidCharacters { .. })
        ));
    }

    #[test]
    fn test_accepts_xml_prefix() {
        for name in ["xml_profile", "XmlData", "xm"] {
            assert!(validate_element_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_too_long() {
        let name = "a".repeat(MAX_ELEMENT_NAME_LENGTH + 1);
        assert!(matches!(
            validate_element_name(&name),
            Err(ValidationError::TooLong { .. })
        ));
    }
}

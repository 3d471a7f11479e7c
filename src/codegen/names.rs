//! Identifier case conversion
//!
//! Conversions used by the Protobuf emitter: enum type names are
//! PascalCase, enum member prefixes are UPPER_SNAKE derived from the
//! PascalCase name, and declared values are normalized into identifier
//! form.

/// Convert to PascalCase, treating `_` as the word boundary.
///
/// Each word's first letter is upper-cased and the rest preserved; a name
/// with no underscore only gets its first character upper-cased.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Derive an UPPER_SNAKE prefix from a PascalCase name by re-inserting
/// underscores at lower-to-upper and letter-to-digit boundaries.
pub fn to_upper_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if let Some(p) = prev {
            let lower_to_upper = p.is_ascii_lowercase() && c.is_ascii_uppercase();
            let letter_to_digit = p.is_ascii_alphabetic() && c.is_ascii_digit();
            if lower_to_upper || letter_to_digit {
                result.push('_');
            }
        }
        result.push(c.to_ascii_uppercase());
        prev = Some(c);
    }

    result
}

/// Normalize a declared enum value into identifier form: upper-cased,
/// spaces and hyphens mapped to underscores.
pub fn enum_value_identifier(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

//! Identifier slugs built from Concepticon glosses.

use crate::{ColexError, Result};
use unicode_normalization::UnicodeNormalization;

/// ASCII-only, lowercase, alphanumeric-only form of `s`.
///
/// Accented letters are decomposed first so that their base letter survives;
/// every other non-ASCII or non-alphanumeric character is dropped.
pub fn slug(s: &str) -> String {
    s.nfd()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// `slug` with the first character upper-cased: `"Body (part)"` → `"Bodypart"`.
pub fn capitalized_slug(s: &str) -> String {
    let slugged = slug(s);
    let mut chars = slugged.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Stable feature identifier `<Bodypart>And<Object>`.
pub fn feature_id(bodypart: &str, object: &str) -> Result<String> {
    let left = capitalized_slug(bodypart);
    if left.is_empty() {
        return Err(ColexError::UnsluggableGloss {
            gloss: bodypart.to_string(),
        });
    }
    let right = capitalized_slug(object);
    if right.is_empty() {
        return Err(ColexError::UnsluggableGloss {
            gloss: object.to_string(),
        });
    }
    Ok(format!("{left}And{right}"))
}

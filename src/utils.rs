//! # Common Utilities
//!
//! Name normalization helpers used throughout the engine.

use deunicode::deunicode;

/// Normalize a species/move/item name to its canonical lookup form:
/// lowercase, spaces to hyphens, apostrophes and dots stripped, accented
/// characters transliterated. Form suffixes are preserved.
///
/// # Examples
///
/// ```
/// use vgc_engine::utils::normalize_name;
///
/// assert_eq!(normalize_name("Flutter Mane"), "flutter-mane");
/// assert_eq!(normalize_name("Urshifu-Rapid-Strike"), "urshifu-rapid-strike");
/// assert_eq!(normalize_name("Farfetch'd"), "farfetchd");
/// assert_eq!(normalize_name("Flabébé"), "flabebe");
/// ```
pub fn normalize_name(name: &str) -> String {
    deunicode(name)
        .to_lowercase()
        .trim()
        .replace(' ', "-")
        .replace(['\'', '.'], "")
}

/// The base species of a name: everything before the first hyphen.
/// Used by the species clause ("calyrex-ice" and "calyrex-shadow" share
/// the base species "calyrex").
pub fn base_species(name: &str) -> String {
    let normalized = normalize_name(name);
    normalized
        .split('-')
        .next()
        .unwrap_or(&normalized)
        .to_string()
}

/// Strip the form suffix from a normalized name, for the NotFound retry
/// path ("landorus-incarnate" -> "landorus").
pub fn strip_form_suffix(name: &str) -> Option<String> {
    let normalized = normalize_name(name);
    let base = base_species(&normalized);
    if base != normalized {
        Some(base)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Flutter Mane"), "flutter-mane");
        assert_eq!(normalize_name("CHIEN-PAO"), "chien-pao");
        assert_eq!(normalize_name("Farfetch'd"), "farfetchd");
        assert_eq!(normalize_name("Mr. Mime"), "mr-mime");
        assert_eq!(normalize_name("Flabébé"), "flabebe");
        assert_eq!(normalize_name("  Wicked Blow  "), "wicked-blow");
    }

    #[test]
    fn test_base_species() {
        assert_eq!(base_species("calyrex-shadow"), "calyrex");
        assert_eq!(base_species("Urshifu-Rapid-Strike"), "urshifu");
        assert_eq!(base_species("incineroar"), "incineroar");
    }

    #[test]
    fn test_strip_form_suffix() {
        assert_eq!(strip_form_suffix("landorus-incarnate"), Some("landorus".into()));
        assert_eq!(strip_form_suffix("landorus"), None);
    }
}

use convert_case::{Case, Casing};

///
/// Casing helpers for generated display metadata.
///
/// The codegen layer derives human-facing names from Rust identifiers once
/// per declaration; nothing here runs on the evaluation path.
///

/// Derive a display name from a snake_case member ident: `unit_vector` →
/// `Unit Vector`.
#[must_use]
pub fn display_name(ident: &str) -> String {
    ident.to_case(Case::Title)
}

/// Derive a nickname from a member ident: first letter of each word,
/// lowercased (`unit_vector` → `uv`). Single-word idents pass through.
#[must_use]
pub fn nickname(ident: &str) -> String {
    let words: Vec<String> = ident.to_case(Case::Snake).split('_').map(str::to_string).collect();

    if words.len() < 2 {
        return words.first().cloned().unwrap_or_default();
    }

    words
        .iter()
        .filter_map(|w| w.chars().next())
        .collect::<String>()
        .to_lowercase()
}

/// Derive a SCREAMING_SNAKE constant ident for generated key constants.
#[must_use]
pub fn constant_name(ident: &str) -> String {
    ident.to_case(Case::Constant)
}

/// Derive a PascalCase type ident for generated wiring types.
#[must_use]
pub fn pascal_name(ident: &str) -> String {
    ident.to_case(Case::Pascal)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_title_cases_members() {
        assert_eq!(display_name("unit_vector"), "Unit Vector");
        assert_eq!(display_name("add"), "Add");
    }

    #[test]
    fn nickname_abbreviates_multi_word_members() {
        assert_eq!(nickname("unit_vector"), "uv");
        assert_eq!(nickname("add"), "add");
    }

    #[test]
    fn constant_name_screams() {
        assert_eq!(constant_name("brush_size"), "BRUSH_SIZE");
    }
}

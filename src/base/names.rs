//! Identifier and qualified-name helpers.

use super::constants::QUALIFIED_SEPARATOR;

/// An identifier or qualified name. Small names are stored inline.
pub type Name = smol_str::SmolStr;

/// Check that `text` is a single identifier (`[XID_Start_]` followed by `XID_Continue`).
pub fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || first == '$' || unicode_ident::is_xid_start(first) => {
            chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
        }
        _ => false,
    }
}

/// Check that every dot-separated segment of `text` is a valid identifier.
pub fn is_valid_qualified_name(text: &str) -> bool {
    !text.is_empty() && text.split(QUALIFIED_SEPARATOR).all(is_valid_identifier)
}

/// `"a.b.C"` -> `"C"`
pub fn last_segment(qualified: &str) -> &str {
    qualified
        .rsplit(QUALIFIED_SEPARATOR)
        .next()
        .unwrap_or(qualified)
}

/// `"a.b.C"` -> `Some("a.b")`, `"C"` -> `None`
pub fn parent_segment(qualified: &str) -> Option<&str> {
    qualified.rfind(QUALIFIED_SEPARATOR).map(|idx| &qualified[..idx])
}

/// Join a (possibly empty) prefix and a simple name.
pub fn join_qualified(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{QUALIFIED_SEPARATOR}{name}")
    }
}

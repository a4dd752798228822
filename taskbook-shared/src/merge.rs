/// Field-level merge rules for partial updates
///
/// A patch never overwrites a stored value with an empty or absent one:
///
/// - text fields: `None`, `Some("")` and whitespace-only text all mean
///   "leave unchanged"
/// - flags: `None` means "leave unchanged", any provided value is applied
///   (an explicit `false` clears the flag)
///
/// Each helper reports whether it changed the target so callers can skip
/// no-op writes in logs.

/// Replaces `current` with `incoming` when `incoming` has non-blank text
pub fn merge_text(current: &mut String, incoming: Option<String>) -> bool {
    match incoming {
        Some(value) if !is_blank(&value) && *current != value => {
            *current = value;
            true
        }
        _ => false,
    }
}

/// Applies `incoming` to `current` whenever it is provided
pub fn merge_flag(current: &mut bool, incoming: Option<bool>) -> bool {
    match incoming {
        Some(value) if *current != value => {
            *current = value;
            true
        }
        _ => false,
    }
}

/// Returns the non-blank text in `incoming`, if any
pub fn provided_text(incoming: Option<&str>) -> Option<&str> {
    incoming.filter(|value| !is_blank(value))
}

/// Empty or whitespace-only text, which create rejects and a patch ignores
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

use tidyq_core::{Capability, TidyqError};

/// Collapse a set of provider errors into a uniform `TidyqError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - If exactly one provider was tried → its error unchanged.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    mut errors: Vec<TidyqError>,
    not_found_what: Option<String>,
) -> TidyqError {
    if !attempted_any {
        return TidyqError::unsupported(capability.to_string());
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, TidyqError::NotFound { .. }))
    {
        return TidyqError::not_found(what);
    }
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    TidyqError::AllProvidersFailed(errors)
}

//! Category name resolution.

use tidyq_core::{Category, TidyqError};

/// Canonical form of a user-supplied category string.
///
/// Lowercases, drops whitespace and punctuation, then strips a single
/// trailing `s`, so `"Stock Prices"`, `"stock.price"` and `"STOCKPRICES"` all
/// map to `"stockprice"`.
#[must_use]
pub fn canonicalize(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if out.ends_with('s') {
        out.pop();
    }
    out
}

/// Resolve one category string.
///
/// # Errors
/// Returns `InvalidCategory` when the canonical form is unknown.
pub fn resolve(raw: &str) -> Result<Category, TidyqError> {
    let key = canonicalize(raw);
    Category::ALL
        .into_iter()
        .find(|c| canonicalize(c.as_str()) == key)
        .ok_or_else(|| TidyqError::invalid_category(raw))
}

/// Resolve a compound request: every element must be a plain-symbol category.
///
/// # Errors
/// Returns `InvalidCategory` for an unknown element and
/// `InvalidCompoundCategory` for a known one outside the compound subset.
pub fn resolve_compound<S: AsRef<str>>(raws: &[S]) -> Result<Vec<Category>, TidyqError> {
    raws.iter()
        .map(|raw| {
            let raw = raw.as_ref();
            let cat = resolve(raw)?;
            if cat.is_compound_eligible() {
                Ok(cat)
            } else {
                Err(TidyqError::InvalidCompoundCategory {
                    raw: raw.to_string(),
                })
            }
        })
        .collect()
}

/// Every valid category string, in presentation order.
#[must_use]
pub fn get_options() -> Vec<&'static str> {
    Category::ALL.iter().map(|c| c.as_str()).collect()
}

/// The category strings that may be combined in one request.
#[must_use]
pub fn compound_get_options() -> Vec<&'static str> {
    Category::ALL
        .iter()
        .filter(|c| c.is_compound_eligible())
        .map(|c| c.as_str())
        .collect()
}

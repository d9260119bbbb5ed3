use regex::Regex;

use crate::automation::{Element, Window};
use crate::errors::{AutoconfError, AutoconfResult};

/// Compiles `pattern` so that it must match a whole element name.
fn full_match(pattern: &str) -> AutoconfResult<Regex> {
    Ok(Regex::new(&format!("^(?:{pattern})$"))?)
}

/// First descendant of `window`, in traversal order, whose name fully matches
/// `pattern`. Several matches are not an error; the patterns are written to be
/// unique on their page.
pub fn find<W: Window>(window: &W, pattern: &str) -> AutoconfResult<Option<W::Element>> {
    let re = full_match(pattern)?;
    let found = window
        .descendants()?
        .into_iter()
        .find(|element| re.is_match(&element.name()));
    tracing::debug!(pattern, found = found.is_some(), "element lookup");
    Ok(found)
}

pub fn find_required<W: Window>(window: &W, pattern: &str) -> AutoconfResult<W::Element> {
    find(window, pattern)?.ok_or_else(|| AutoconfError::ElementNotFound(pattern.to_string()))
}

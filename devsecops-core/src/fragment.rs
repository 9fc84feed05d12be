//! Decoding URL fragments into routes.

use crate::error::RouteError;
use crate::route::{Route, RouteKind, Segment};
use std::borrow::Cow;

/// Strip the platform decoration (`#`, surrounding slashes and whitespace).
#[must_use]
pub fn normalize_fragment(fragment: &str) -> &str {
    let trimmed = fragment.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .trim_matches('/')
}

/// Strict decoding: reports why a fragment does not address a screen.
///
/// An empty fragment is the dashboard, not an error.
///
/// # Errors
/// Returns [`RouteError::MalformedFragment`] when no template matches, or
/// [`RouteError::InvalidId`] when a template matches but an id segment cannot
/// be used.
pub fn try_parse_fragment(fragment: &str) -> Result<Route, RouteError> {
    let normalized = normalize_fragment(fragment);
    if normalized.is_empty() {
        return Ok(Route::dashboard());
    }

    let segments: Vec<&str> = normalized.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(RouteError::MalformedFragment(normalized.to_string()));
    }

    // Literal segments win over ids, so `incident/X/edit` never reads `edit`
    // as an id when both shapes exist.
    let (kind, primary, secondary) = RouteKind::ALL
        .into_iter()
        .filter_map(|kind| match_template(kind, &segments).map(|ids| (kind, ids)))
        .max_by_key(|(kind, _)| kind.literal_count())
        .map(|(kind, (primary, secondary))| (kind, primary, secondary))
        .ok_or_else(|| RouteError::MalformedFragment(normalized.to_string()))?;

    let primary = primary.map(decode_id).transpose()?;
    let secondary = secondary.map(decode_id).transpose()?;
    Route::try_new(kind, primary.as_deref(), secondary.as_deref())
}

/// Browsers percent-encode characters a fragment cannot carry verbatim.
fn decode_id(segment: &str) -> Result<Cow<'_, str>, RouteError> {
    urlencoding::decode(segment).map_err(|_| RouteError::InvalidId(segment.to_string()))
}

/// Decode a fragment, falling back to the dashboard for anything that does
/// not address a known screen.
#[must_use]
pub fn parse_fragment(fragment: &str) -> Route {
    try_parse_fragment(fragment).unwrap_or_else(|err| {
        log::warn!("{err}; showing the dashboard instead");
        Route::dashboard()
    })
}

type Ids<'a> = (Option<&'a str>, Option<&'a str>);

fn match_template<'a>(kind: RouteKind, segments: &[&'a str]) -> Option<Ids<'a>> {
    let template = kind.template();
    if template.len() != segments.len() {
        return None;
    }

    let mut ids: Ids<'a> = (None, None);
    for (expected, actual) in template.iter().zip(segments) {
        match expected {
            Segment::Literal(text) if text == actual => {}
            Segment::Literal(_) => return None,
            Segment::Primary => ids.0 = Some(*actual),
            Segment::Secondary => ids.1 = Some(*actual),
        }
    }
    Some(ids)
}

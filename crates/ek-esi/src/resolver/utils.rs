// crates/ek-esi/src/resolver/utils.rs

//! Utility functions for the resolver.

use crate::error::EsiError;
use crate::model::TextElement;
use crate::parser::{parse_esi_u8, parse_esi_u16, parse_esi_u32};

/// Returns the only element of `items`, `None` when there is none.
///
/// More than one element is an `AmbiguousElement` error; the first match is
/// never picked silently.
pub(super) fn single_or_none<'a, T>(
    items: &'a [T],
    element: &'static str,
) -> Result<Option<&'a T>, EsiError> {
    match items {
        [] => Ok(None),
        [item] => Ok(Some(item)),
        _ => Err(EsiError::AmbiguousElement {
            element,
            count: items.len(),
        }),
    }
}

/// Like [`single_or_none`], but absence is a `MissingElement` error.
pub(super) fn single<'a, T>(items: &'a [T], element: &'static str) -> Result<&'a T, EsiError> {
    single_or_none(items, element)?.ok_or(EsiError::MissingElement { element })
}

/// Text of an optional single element. An empty element counts as absent.
pub(super) fn single_text_or_none<'a>(
    items: &'a [TextElement],
    element: &'static str,
) -> Result<Option<&'a str>, EsiError> {
    Ok(single_or_none(items, element)?
        .map(|t| t.value.trim())
        .filter(|text| !text.is_empty()))
}

/// Text of a required single element.
pub(super) fn single_text<'a>(
    items: &'a [TextElement],
    element: &'static str,
) -> Result<&'a str, EsiError> {
    Ok(single(items, element)?.value.trim())
}

pub(super) fn number_u32(text: &str, element: &'static str) -> Result<u32, EsiError> {
    parse_esi_u32(text).map_err(|_| invalid_number(text, element))
}

pub(super) fn number_u16(text: &str, element: &'static str) -> Result<u16, EsiError> {
    parse_esi_u16(text).map_err(|_| invalid_number(text, element))
}

pub(super) fn number_u8(text: &str, element: &'static str) -> Result<u8, EsiError> {
    parse_esi_u8(text).map_err(|_| invalid_number(text, element))
}

fn invalid_number(text: &str, element: &'static str) -> EsiError {
    EsiError::InvalidNumber {
        element,
        value: text.to_owned(),
    }
}

/// ESI boolean attributes are true only for the literal `"1"`.
pub(super) fn flag(attribute: Option<&str>) -> bool {
    attribute == Some("1")
}

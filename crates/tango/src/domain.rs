//! Functions and types dealing with the app's write side: adding, deleting and importing cards.

pub mod admin;
pub mod dictionary;
pub mod inspirations;
pub mod preferences;

use crate::error::{TangoError, TangoResult};

/// Trims a required form field, rejecting it if nothing is left.
fn required<'a>(value: &'a str, field: &'static str) -> TangoResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(TangoError::ValidationFailure(field))
    } else {
        Ok(value)
    }
}

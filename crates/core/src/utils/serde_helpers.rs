//! Serde utility helpers

use serde::Serializer;
use std::fmt::Display;

/// Serializes any `Display` value as its rendered string.
///
/// Usage:
/// ```ignore
/// #[serde(serialize_with = "serialize_display")]
/// pub ty: TypeExpr,
/// ```
pub fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

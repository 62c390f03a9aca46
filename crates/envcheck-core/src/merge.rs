//! Layered merging of type maps.

use std::collections::BTreeMap;

/// Variable name to lowercase type name.
pub type TypeMap = BTreeMap<String, String>;

/// Merges type maps in precedence order: later layers override earlier
/// ones. Type names are lowercased.
///
/// ```
/// use envcheck_core::{layered_merge, TypeMap};
///
/// let hints = TypeMap::from([("PORT".into(), "port".into())]);
/// let explicit = TypeMap::from([("PORT".into(), "String".into())]);
/// let merged = layered_merge([&hints, &explicit]);
/// assert_eq!(merged["PORT"], "string");
/// ```
#[must_use]
pub fn layered_merge<'a, I>(layers: I) -> TypeMap
where
    I: IntoIterator<Item = &'a TypeMap>,
{
    let mut merged = TypeMap::new();
    for layer in layers {
        for (key, type_name) in layer {
            merged.insert(key.clone(), type_name.to_lowercase());
        }
    }
    merged
}

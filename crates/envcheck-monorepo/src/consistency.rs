//! Cross-app consistency of shared variables.

use envcheck_core::{canonical_type, is_string_type, ParsedFile, TypeMap};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How one app declares a shared variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppDeclaration {
    /// App name.
    pub app: String,
    /// Declared type, explicit or from an annotation comment.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Example value.
    pub value: String,
}

/// A shared variable declared with conflicting types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Description of the conflict.
    pub issue: String,
    /// Per-app declarations.
    pub details: Vec<AppDeclaration>,
}

/// Result of cross-checking apps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consistency {
    /// Variable name to the apps that declare it, for names declared by
    /// two or more apps.
    pub shared_vars: BTreeMap<String, Vec<String>>,
    /// Variable name to its type conflict.
    pub mismatches: BTreeMap<String, Mismatch>,
}

impl Consistency {
    /// Returns true if no conflicts were found.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Cross-checks the example files of several apps.
///
/// `explicit` types take precedence over each app's annotation comments.
/// Two apps conflict when they declare different types for the same name,
/// ignoring undeclared and string-like types. Aliases such as `bool` and
/// `boolean` count as the same type.
#[must_use]
pub fn check_consistency(apps: &[(&str, &ParsedFile)], explicit: &TypeMap) -> Consistency {
    let mut declared: BTreeMap<&str, Vec<(&str, &ParsedFile)>> = BTreeMap::new();
    for &(app, file) in apps {
        for key in &file.keys {
            declared.entry(key.as_str()).or_default().push((app, file));
        }
    }

    let mut consistency = Consistency::default();
    for (key, owners) in declared {
        if owners.len() < 2 {
            continue;
        }
        consistency.shared_vars.insert(
            key.to_string(),
            owners.iter().map(|(app, _)| (*app).to_string()).collect(),
        );

        let details: Vec<AppDeclaration> = owners
            .iter()
            .map(|(app, file)| AppDeclaration {
                app: (*app).to_string(),
                type_name: explicit
                    .get(key)
                    .or_else(|| file.type_hints.get(key))
                    .map(|t| t.to_lowercase()),
                value: file.get(key).unwrap_or_default().to_string(),
            })
            .collect();

        let types: BTreeSet<&str> = details
            .iter()
            .filter_map(|d| d.type_name.as_deref())
            .filter(|t| !is_string_type(t))
            .map(|t| canonical_type(t).unwrap_or(t))
            .collect();
        if types.len() < 2 {
            continue;
        }

        let described = details
            .iter()
            .filter_map(|d| d.type_name.as_deref().map(|t| format!("{t} in {}", d.app)))
            .collect::<Vec<_>>()
            .join(", ");
        consistency.mismatches.insert(
            key.to_string(),
            Mismatch {
                issue: format!("Conflicting types for '{key}': {described}"),
                details,
            },
        );
    }

    consistency
}

//! Type validators for declared variable types.
//!
//! The registry is a constant table, so lookups need no initialization and
//! are safe to share across threads.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[allow(clippy::expect_used)]
static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

/// Outcome of checking one value against one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum TypeCheck {
    /// The value satisfies the type.
    Valid,
    /// The value violates the type.
    Invalid {
        /// Why the value was rejected (e.g., "must be a valid URL").
        message: String,
    },
    /// The type name is not in the registry. Treated as valid.
    UnknownType {
        /// The unrecognized type name.
        type_name: String,
    },
}

impl TypeCheck {
    /// Returns true unless the value was rejected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }

    /// Returns the failure or informational message, if any.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } => Some(message.clone()),
            Self::UnknownType { type_name } => {
                Some(format!("Unknown type '{type_name}', skipping validation"))
            }
        }
    }
}

/// One row of the type registry.
struct TypeRule {
    names: &'static [&'static str],
    description: &'static str,
    check: fn(&str) -> bool,
    message: &'static str,
}

const REGISTRY: &[TypeRule] = &[
    TypeRule {
        names: &["url"],
        description: "Absolute URL with any scheme",
        check: is_url,
        message: "must be a valid URL",
    },
    TypeRule {
        names: &["port"],
        description: "Integer between 1 and 65535",
        check: is_port,
        message: "must be a valid port number (1-65535)",
    },
    TypeRule {
        names: &["boolean", "bool"],
        description: "true/false/1/0/yes/no/on/off",
        check: is_boolean,
        message: "must be a boolean (true/false/1/0/yes/no/on/off)",
    },
    TypeRule {
        names: &["email"],
        description: "local@domain.tld",
        check: is_email,
        message: "must be a valid email address",
    },
    TypeRule {
        names: &["number"],
        description: "Finite decimal number",
        check: is_number,
        message: "must be a number",
    },
    TypeRule {
        names: &["integer", "int"],
        description: "Whole number",
        check: is_integer,
        message: "must be an integer",
    },
    TypeRule {
        names: &["string", "str"],
        description: "Any value",
        check: any_value,
        message: "must be a string",
    },
    TypeRule {
        names: &["json"],
        description: "Syntactically valid JSON",
        check: is_json,
        message: "must be valid JSON",
    },
    TypeRule {
        names: &["uuid"],
        description: "Hyphenated UUID, versions 1-5",
        check: is_uuid,
        message: "must be a valid UUID",
    },
];

fn lookup(type_name: &str) -> Option<&'static TypeRule> {
    let lowered = type_name.to_lowercase();
    REGISTRY
        .iter()
        .find(|rule| rule.names.contains(&lowered.as_str()))
}

/// Checks a value against a type name.
///
/// Empty values always pass; emptiness is a separate policy. Unknown type
/// names pass with [`TypeCheck::UnknownType`].
#[must_use]
pub fn validate_type(value: &str, type_name: &str) -> TypeCheck {
    if value.is_empty() {
        return TypeCheck::Valid;
    }
    match lookup(type_name) {
        Some(rule) if (rule.check)(value) => TypeCheck::Valid,
        Some(rule) => TypeCheck::Invalid {
            message: rule.message.to_string(),
        },
        None => TypeCheck::UnknownType {
            type_name: type_name.to_string(),
        },
    }
}

/// Returns true if the type name is in the registry.
#[must_use]
pub fn is_known_type(type_name: &str) -> bool {
    lookup(type_name).is_some()
}

/// Returns the primary name of a registered type, resolving aliases.
///
/// `bool` and `boolean` both yield `"boolean"`; unknown names yield `None`.
#[must_use]
pub fn canonical_type(type_name: &str) -> Option<&'static str> {
    lookup(type_name).map(|rule| rule.names[0])
}

/// Lists `(names, description)` for every registered type.
#[must_use]
pub fn known_types() -> Vec<(&'static [&'static str], &'static str)> {
    REGISTRY.iter().map(|r| (r.names, r.description)).collect()
}

/// Returns true for type names that accept any value.
#[must_use]
pub fn is_string_type(type_name: &str) -> bool {
    matches!(type_name.to_lowercase().as_str(), "string" | "str")
}

fn any_value(_: &str) -> bool {
    true
}

fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

fn is_port(value: &str) -> bool {
    if !value.bytes().all(|b| b.is_ascii_digit()) || value.starts_with('0') {
        return false;
    }
    value
        .parse::<u32>()
        .is_ok_and(|port| (1..=65_535).contains(&port))
}

fn is_boolean(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "false" | "1" | "0" | "yes" | "no" | "on" | "off"
    )
}

fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_integer(value: &str) -> bool {
    value
        .parse::<i64>()
        .is_ok_and(|n| n.to_string() == value)
}

fn is_json(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

fn is_uuid(value: &str) -> bool {
    UUID.is_match(value)
}

//! Inline cross-record references.
//!
//! A [`Reference`] is ISON's pointer value, written with a leading colon:
//!
//! - `:1` points at a record by bare id
//! - `:user:42` qualifies the id with a table namespace
//! - `:OWNS:5` qualifies the id with a relationship (graph edge) name
//!
//! The qualifier segment is treated as a relationship exactly when it is
//! non-empty and composed solely of uppercase ASCII letters and underscores;
//! anything else is a namespace. The id itself is always a free-form string,
//! even when it looks numeric.
//!
//! ## Examples
//!
//! ```rust
//! use ison::Reference;
//!
//! let r = Reference::parse(":user:42");
//! assert_eq!(r.id, "42");
//! assert_eq!(r.namespace, "user");
//! assert!(!r.is_relationship());
//!
//! let owns = Reference::parse(":OWNS:5");
//! assert!(owns.is_relationship());
//! assert_eq!(owns.to_ison(), ":OWNS:5");
//! ```

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::fmt;

/// An inline pointer to another record (`:id`, `:namespace:id`, or
/// `:RELATIONSHIP:id`).
///
/// At most one of `namespace`/`relationship` is meaningful at a time;
/// `relationship` takes precedence when formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: String,
    #[serde(rename = "_namespace")]
    pub namespace: String,
    #[serde(rename = "_relationship")]
    pub relationship: String,
}

impl Reference {
    /// Creates a bare reference (`:id`).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Reference {
            id: id.into(),
            ..Reference::default()
        }
    }

    /// Creates a namespaced reference (`:namespace:id`).
    #[must_use]
    pub fn namespaced(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Reference {
            id: id.into(),
            namespace: namespace.into(),
            relationship: String::new(),
        }
    }

    /// Creates a relationship reference (`:RELATIONSHIP:id`).
    #[must_use]
    pub fn related(relationship: impl Into<String>, id: impl Into<String>) -> Self {
        Reference {
            id: id.into(),
            namespace: String::new(),
            relationship: relationship.into(),
        }
    }

    /// Parses a reference token.
    ///
    /// A token without the leading `:` yields a bare reference whose id is
    /// the whole token. The qualifier is classified as a relationship when it
    /// is non-empty, all-uppercase ASCII letters and underscores.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ison::Reference;
    ///
    /// assert_eq!(Reference::parse(":1").id, "1");
    /// assert_eq!(Reference::parse(":user:42").namespace, "user");
    /// assert_eq!(Reference::parse(":OWNS:5").relationship, "OWNS");
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let Some(rest) = token.strip_prefix(':') else {
            return Reference::new(token);
        };
        match rest.split_once(':') {
            None => Reference::new(rest),
            Some((qualifier, id)) => {
                if !qualifier.is_empty()
                    && qualifier.chars().all(|c| c == '_' || c.is_ascii_uppercase())
                {
                    Reference::related(qualifier, id)
                } else {
                    Reference::namespaced(qualifier, id)
                }
            }
        }
    }

    /// Formats the reference back to its ISON token form.
    ///
    /// The relationship segment wins when non-blank, then the namespace, then
    /// the bare `:id` form.
    #[must_use]
    pub fn to_ison(&self) -> String {
        if !self.relationship.trim().is_empty() {
            return format!(":{}:{}", self.relationship, self.id);
        }
        if !self.namespace.trim().is_empty() {
            return format!(":{}:{}", self.namespace, self.id);
        }
        format!(":{}", self.id)
    }

    /// Returns `true` if this is a relationship (edge) reference.
    #[must_use]
    pub fn is_relationship(&self) -> bool {
        !self.relationship.trim().is_empty()
    }

    /// Returns the relationship name if set, else the namespace.
    #[must_use]
    pub fn ns_or_rel(&self) -> &str {
        if self.is_relationship() {
            &self.relationship
        } else {
            &self.namespace
        }
    }

    /// Converts the reference to its generic map form
    /// (`{_ref, _namespace, _relationship}`).
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        json!({
            "_ref": self.id,
            "_namespace": self.namespace,
            "_relationship": self.relationship,
        })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ison())
    }
}

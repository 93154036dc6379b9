//! The generic structured-data boundary.
//!
//! The core never parses JSON text itself; it consumes and produces plain
//! ordered field maps (`serde_json::Map`) and delegates the text encoding to
//! serde_json. This module holds the conversions in both directions:
//! building documents from generic maps ([`from_dict`], [`from_json`]) and
//! flattening documents back out ([`to_json`]).
//!
//! ## Usage
//!
//! ```rust
//! use ison::{from_dict_with_options, FromDictOptions};
//! use serde_json::json;
//!
//! let data = json!({
//!     "users": [
//!         {"id": 1, "name": "Alice"},
//!         {"id": 2, "name": "Bob"},
//!     ]
//! });
//!
//! let options = FromDictOptions::new().with_smart_order(true);
//! let doc = from_dict_with_options(data.as_object().unwrap(), &options);
//! assert_eq!(doc.get("users").unwrap().rows.len(), 2);
//! ```

use crate::document::{Block, BlockKind, Document, Row};
use crate::{parse, Reference, Result, Value};
use indexmap::IndexSet;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashMap;

/// Configures [`from_dict_with_options`] behavior.
#[derive(Clone, Debug, Default)]
pub struct FromDictOptions {
    /// Convert `*_id` foreign-key columns into namespace references
    pub auto_refs: bool,
    /// Reorder columns for readability (id, name-like, data, references)
    pub smart_order: bool,
}

impl FromDictOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_auto_refs(mut self, auto_refs: bool) -> Self {
        self.auto_refs = auto_refs;
        self
    }

    #[must_use]
    pub fn with_smart_order(mut self, smart_order: bool) -> Self {
        self.smart_order = smart_order;
        self
    }
}

/// Builds a document from a generic map with default options.
///
/// Lists of row maps become table blocks, plain maps become object blocks,
/// anything else is ignored. Block names are sorted for deterministic
/// output.
#[must_use]
pub fn from_dict(data: &JsonMap<String, JsonValue>) -> Document {
    from_dict_with_options(data, &FromDictOptions::default())
}

/// Builds a document from a generic map.
///
/// A table block's field list is the union of every row's keys in first-seen
/// order. Empty lists and lists whose first element is not a map produce no
/// block. With `auto_refs`, scalar `*_id` columns whose base name (or its
/// plural) matches another block become namespace references; an `edges`
/// table alongside a `nodes` table gets its `source`/`target` columns
/// converted to `node` references.
#[must_use]
pub fn from_dict_with_options(
    data: &JsonMap<String, JsonValue>,
    options: &FromDictOptions,
) -> Document {
    let mut doc = Document::new();

    let mut ref_fields: HashMap<&str, String> = HashMap::new();
    if options.auto_refs {
        for (table_name, table_data) in data {
            if let Some(first) = table_data
                .as_array()
                .and_then(|rows| rows.first())
                .and_then(JsonValue::as_object)
            {
                for key in first.keys() {
                    if let Some(base) = key.strip_suffix("_id") {
                        if key != "id"
                            && (data.contains_key(&format!("{base}s")) || data.contains_key(base))
                        {
                            ref_fields.insert(key.as_str(), base.to_string());
                        }
                    }
                }
            }
            if table_name == "edges" && data.contains_key("nodes") {
                ref_fields.insert("source", "node".to_string());
                ref_fields.insert("target", "node".to_string());
            }
        }
    }

    let mut names: Vec<&String> = data.keys().collect();
    names.sort();

    for name in names {
        match &data[name.as_str()] {
            JsonValue::Array(items) => {
                if items.first().map_or(true, |item| !item.is_object()) {
                    continue;
                }
                let mut field_order: IndexSet<&str> = IndexSet::new();
                for item in items {
                    if let Some(obj) = item.as_object() {
                        for key in obj.keys() {
                            field_order.insert(key.as_str());
                        }
                    }
                }
                let mut fields: Vec<String> =
                    field_order.into_iter().map(str::to_string).collect();
                if options.smart_order {
                    fields = smart_order_fields(&fields);
                }

                let mut block = Block::new(BlockKind::Table, name.as_str());
                for field in &fields {
                    block.add_field(field, "");
                }
                for item in items {
                    let Some(obj) = item.as_object() else { continue };
                    let mut row = Row::new();
                    for (key, value) in obj {
                        if options.auto_refs {
                            if let Some(namespace) = ref_fields.get(key.as_str()) {
                                if let Some(id) = reference_id(value) {
                                    row.insert(
                                        key.clone(),
                                        Value::Reference(Reference::namespaced(
                                            namespace.as_str(),
                                            id,
                                        )),
                                    );
                                    continue;
                                }
                            }
                        }
                        row.insert(key.clone(), value_from_json(value));
                    }
                    block.add_row(row);
                }
                doc.add_block(block);
            }
            JsonValue::Object(obj) => {
                let mut fields: Vec<String> = obj.keys().cloned().collect();
                if options.smart_order {
                    fields = smart_order_fields(&fields);
                }
                let mut block = Block::new(BlockKind::Object, name.as_str());
                for field in &fields {
                    block.add_field(field, "");
                }
                let mut row = Row::new();
                for (key, value) in obj {
                    row.insert(key.clone(), value_from_json(value));
                }
                block.add_row(row);
                doc.add_block(block);
            }
            _ => {}
        }
    }
    doc
}

/// Builds a document from JSON text.
///
/// The JSON decode itself is delegated to serde_json; top-level lists become
/// table blocks (fields taken from the first row), top-level maps become
/// object blocks, in input order.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object.
pub fn from_json(json_text: &str) -> Result<Document> {
    let data: JsonMap<String, JsonValue> = serde_json::from_str(json_text)?;
    let mut doc = Document::new();
    for (name, value) in &data {
        match value {
            JsonValue::Array(items) => {
                let mut block = Block::new(BlockKind::Table, name.as_str());
                if let Some(first) = items.first().and_then(JsonValue::as_object) {
                    for key in first.keys() {
                        block.add_field(key, "");
                    }
                }
                for item in items {
                    let Some(obj) = item.as_object() else { continue };
                    let mut row = Row::new();
                    for (key, value) in obj {
                        row.insert(key.clone(), value_from_json(value));
                    }
                    block.add_row(row);
                }
                doc.add_block(block);
            }
            JsonValue::Object(obj) => {
                let mut block = Block::new(BlockKind::Object, name.as_str());
                let mut row = Row::new();
                for (key, value) in obj {
                    block.add_field(key, "");
                    row.insert(key.clone(), value_from_json(value));
                }
                block.add_row(row);
                doc.add_block(block);
            }
            _ => {}
        }
    }
    Ok(doc)
}

/// Converts ISON text directly to JSON text (block name → list of row maps).
///
/// # Errors
///
/// Returns an error only if the JSON encoding fails.
pub fn to_json(ison_text: &str) -> Result<String> {
    let doc = parse(ison_text);
    Ok(serde_json::to_string(&doc.to_json_value())?)
}

/// Reorders fields for readability: `id` first, recognized name-like fields
/// next, other data fields, and `*_id` foreign-key fields last.
///
/// Relative order within each bucket is preserved.
///
/// # Examples
///
/// ```rust
/// use ison::smart_order_fields;
///
/// let fields: Vec<String> = ["email", "customer_id", "name", "id", "status"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(
///     smart_order_fields(&fields),
///     vec!["id", "name", "email", "status", "customer_id"]
/// );
/// ```
#[must_use]
pub fn smart_order_fields(fields: &[String]) -> Vec<String> {
    const PRIORITY_NAMES: [&str; 6] = [
        "name",
        "title",
        "label",
        "description",
        "display_name",
        "full_name",
    ];

    let mut id_fields = Vec::new();
    let mut name_fields = Vec::new();
    let mut ref_fields = Vec::new();
    let mut other_fields = Vec::new();

    for field in fields {
        let lower = field.to_lowercase();
        if lower == "id" {
            id_fields.push(field.clone());
        } else if PRIORITY_NAMES.contains(&lower.as_str()) {
            name_fields.push(field.clone());
        } else if lower.ends_with("_id") {
            ref_fields.push(field.clone());
        } else {
            other_fields.push(field.clone());
        }
    }

    let mut ordered = id_fields;
    ordered.append(&mut name_fields);
    ordered.append(&mut other_fields);
    ordered.append(&mut ref_fields);
    ordered
}

/// Converts a generic scalar to a [`Value`].
///
/// Whole-number floats collapse to `Int`; nested lists and maps stringify to
/// their JSON text form.
#[must_use]
pub fn value_from_json(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Value::Int(f as i64)
                } else {
                    Value::Float(f)
                }
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

fn reference_id(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_dict_tables_and_objects() {
        let data = json!({
            "users": [{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob", "role": "admin"}],
            "config": {"debug": true},
        });
        let doc = from_dict(data.as_object().unwrap());

        let users = doc.get("users").unwrap();
        assert_eq!(users.kind, BlockKind::Table);
        // union of row keys, first-seen order
        assert_eq!(users.field_names(), vec!["id", "name", "role"]);
        assert_eq!(users.rows.len(), 2);

        let config = doc.get("config").unwrap();
        assert_eq!(config.kind, BlockKind::Object);
        assert_eq!(config.rows[0]["debug"], Value::Bool(true));
    }

    #[test]
    fn test_from_dict_skips_empty_and_scalar_entries() {
        let data = json!({"empty": [], "scalars": [1, 2], "n": 5});
        let doc = from_dict(data.as_object().unwrap());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_from_dict_auto_refs() {
        let data = json!({
            "customers": [{"id": 1}],
            "orders": [{"id": 10, "customer_id": 1}],
        });
        let options = FromDictOptions::new().with_auto_refs(true);
        let doc = from_dict_with_options(data.as_object().unwrap(), &options);

        let orders = doc.get("orders").unwrap();
        let r = orders.rows[0]["customer_id"].as_reference().unwrap();
        assert_eq!(r.namespace, "customer");
        assert_eq!(r.id, "1");
        // plain id columns stay scalars
        assert_eq!(orders.rows[0]["id"], Value::Int(10));
    }

    #[test]
    fn test_from_dict_graph_special_case() {
        let data = json!({
            "nodes": [{"id": 1}],
            "edges": [{"source": 1, "target": 2}],
        });
        let options = FromDictOptions::new().with_auto_refs(true);
        let doc = from_dict_with_options(data.as_object().unwrap(), &options);
        let edges = doc.get("edges").unwrap();
        assert_eq!(
            edges.rows[0]["source"].as_reference().unwrap().namespace,
            "node"
        );
    }

    #[test]
    fn test_smart_order_property() {
        let fields: Vec<String> = ["email", "customer_id", "name", "id", "status"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            smart_order_fields(&fields),
            vec!["id", "name", "email", "status", "customer_id"]
        );
    }

    #[test]
    fn test_value_from_json_whole_float_collapses() {
        assert_eq!(value_from_json(&json!(7.0)), Value::Int(7));
        assert_eq!(value_from_json(&json!(7.5)), Value::Float(7.5));
        assert_eq!(value_from_json(&json!(null)), Value::Null);
        assert_eq!(value_from_json(&json!("x")), Value::from("x"));
    }

    #[test]
    fn test_from_json_keeps_input_order() {
        let doc = from_json(r#"{"b": [{"x": 1}], "a": {"y": 2}}"#).unwrap();
        assert_eq!(doc.order().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_to_json_round() {
        let json_text = to_json("table.users\nid:int name\n1 Alice\n").unwrap();
        let v: JsonValue = serde_json::from_str(&json_text).unwrap();
        assert_eq!(v["users"][0]["id"], 1);
        assert_eq!(v["users"][0]["name"], "Alice");
    }
}

//! Composable runtime schema validation.
//!
//! Validators check decoded generic values (`serde_json::Value`, the shape
//! produced by [`crate::Document::to_dict`] and friends) against declared
//! shapes. Leaf validators report at most one failure; composite validators
//! (object, array, table, document) never stop at the first failure: they
//! collect the complete set of violations in one pass, each tagged with a
//! dotted/bracketed field path.
//!
//! Validators are configured with chained builder calls and should be
//! treated as immutable once validation begins.
//!
//! ## Usage
//!
//! ```rust
//! use ison::schema::{self, Schema, SchemaExt};
//! use serde_json::json;
//!
//! let user = schema::object([
//!     ("name", schema::string().min(1).boxed()),
//!     ("age", schema::int().min(0.0).optional().boxed()),
//!     ("email", schema::string().email().boxed()),
//! ]);
//!
//! assert!(user
//!     .validate(Some(&json!({"name": "Alice", "email": "alice@example.com"})))
//!     .is_none());
//!
//! let err = user.validate(Some(&json!({"name": "", "email": "nope"}))).unwrap();
//! assert_eq!(err.as_aggregate().unwrap().errors.len(), 2);
//! ```
//!
//! ## Validating whole documents
//!
//! ```rust
//! use ison::schema::{self, SchemaExt};
//! use serde_json::json;
//!
//! let doc_schema = schema::document([(
//!     "users",
//!     schema::table("users", [("id", schema::int().boxed())]).boxed(),
//! )]);
//!
//! let data = json!({"users": [{"id": 1}, {"id": 2}]});
//! let result = doc_schema.safe_parse(data.as_object().unwrap());
//! assert!(result.success);
//! ```

use crate::error::{SchemaError, ValidationError, ValidationErrors};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

/// The common validator interface.
///
/// `validate` receives `None` (or JSON null, which is treated the same) for
/// absent values; an absent value passes iff the validator is optional.
pub trait Schema {
    /// Checks the value and returns the failure, if any.
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError>;

    /// Returns `true` if an absent value is acceptable.
    fn is_optional(&self) -> bool;

    /// Returns the declared default, if any. Defaults are applied by the
    /// containing object validator, not by the leaf itself.
    fn default_value(&self) -> Option<&JsonValue>;

    /// Returns the human-readable description, if one was set.
    fn description(&self) -> &str;
}

/// Boxing helper so schemas compose without explicit `Box::new` noise.
pub trait SchemaExt: Schema + Sized + 'static {
    fn boxed(self) -> Box<dyn Schema> {
        Box::new(self)
    }
}

impl<S: Schema + Sized + 'static> SchemaExt for S {}

type Refinement = Box<dyn Fn(&JsonValue) -> Option<String>>;

/// Configuration shared by every validator: optionality, default,
/// description, and refinement predicates.
#[derive(Default)]
struct SchemaCore {
    optional: bool,
    default: Option<JsonValue>,
    description: String,
    refinements: Vec<Refinement>,
}

impl SchemaCore {
    fn run_refinements(&self, value: &JsonValue) -> Option<SchemaError> {
        for refinement in &self.refinements {
            if let Some(msg) = refinement(value) {
                return Some(SchemaError::Invalid(msg));
            }
        }
        None
    }
}

/// Treats JSON null the same as an absent value.
fn present(value: Option<&JsonValue>) -> Option<&JsonValue> {
    value.filter(|v| !v.is_null())
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn missing_error(core: &SchemaCore, message: &str) -> Option<SchemaError> {
    if core.optional {
        None
    } else {
        Some(SchemaError::invalid(message))
    }
}

/// Collects a nested failure into `errs`, flattening aggregates so every
/// entry keeps a full field path.
fn collect(errs: &mut ValidationErrors, path: &str, err: SchemaError, value: Option<&JsonValue>) {
    match err {
        SchemaError::Invalid(message) => {
            errs.push(ValidationError::new(
                path,
                message,
                value.cloned().unwrap_or(JsonValue::Null),
            ));
        }
        SchemaError::Aggregate(nested) => {
            for sub in nested.errors {
                errs.push(ValidationError::new(
                    format!("{path}.{}", sub.field),
                    sub.message,
                    sub.value,
                ));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

/// Validates string values: length bounds, email/url/regex formats, and
/// custom refinements.
pub struct StringSchema {
    core: SchemaCore,
    min_len: Option<usize>,
    max_len: Option<usize>,
    exact_len: Option<usize>,
    pattern: Option<Regex>,
    check_email: bool,
    check_url: bool,
}

/// Creates a string validator.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema {
        core: SchemaCore::default(),
        min_len: None,
        max_len: None,
        exact_len: None,
        pattern: None,
        check_email: false,
        check_url: false,
    }
}

impl StringSchema {
    /// Requires at least `n` characters.
    #[must_use]
    pub fn min(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    /// Requires at most `n` characters.
    #[must_use]
    pub fn max(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    /// Requires exactly `n` characters.
    #[must_use]
    pub fn length(mut self, n: usize) -> Self {
        self.exact_len = Some(n);
        self
    }

    /// Requires an email-shaped value.
    #[must_use]
    pub fn email(mut self) -> Self {
        self.check_email = true;
        self
    }

    /// Requires an `http(s)://` URL without whitespace.
    #[must_use]
    pub fn url(mut self) -> Self {
        self.check_url = true;
        self
    }

    /// Requires the value to match `pattern`. Anchor the pattern to demand a
    /// full match.
    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.core.default = Some(JsonValue::String(value.into()));
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }

    /// Adds a custom predicate, run only after all structural checks pass.
    #[must_use]
    pub fn refine<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        let message = message.into();
        self.core.refinements.push(Box::new(move |value| {
            match value.as_str() {
                Some(s) if !predicate(s) => Some(message.clone()),
                _ => None,
            }
        }));
        self
    }
}

impl Schema for StringSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required field is missing");
        };
        let Some(s) = value.as_str() else {
            return Some(SchemaError::invalid(format!(
                "expected string, got {}",
                type_name(value)
            )));
        };

        let len = s.chars().count();
        if let Some(min) = self.min_len {
            if len < min {
                return Some(SchemaError::invalid(format!(
                    "string must be at least {min} characters"
                )));
            }
        }
        if let Some(max) = self.max_len {
            if len > max {
                return Some(SchemaError::invalid(format!(
                    "string must be at most {max} characters"
                )));
            }
        }
        if let Some(exact) = self.exact_len {
            if len != exact {
                return Some(SchemaError::invalid(format!(
                    "string must be exactly {exact} characters"
                )));
            }
        }
        if self.check_email && !EMAIL_RE.is_match(s) {
            return Some(SchemaError::invalid("invalid email format"));
        }
        if self.check_url && !URL_RE.is_match(s) {
            return Some(SchemaError::invalid("invalid URL format"));
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(s) {
                return Some(SchemaError::invalid(
                    "string does not match required pattern",
                ));
            }
        }
        self.core.run_refinements(value)
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

/// Validates numeric values: any numeric representation is accepted, with
/// optional integrality, bounds, and sign checks.
pub struct NumberSchema {
    core: SchemaCore,
    min: Option<f64>,
    max: Option<f64>,
    integer: bool,
    positive: bool,
    negative: bool,
}

/// Creates a number validator accepting integers and floats.
#[must_use]
pub fn number() -> NumberSchema {
    NumberSchema {
        core: SchemaCore::default(),
        min: None,
        max: None,
        integer: false,
        positive: false,
        negative: false,
    }
}

/// Creates a number validator that additionally requires an integral value.
#[must_use]
pub fn int() -> NumberSchema {
    let mut schema = number();
    schema.integer = true;
    schema
}

/// Creates a float validator (alias for [`number`]).
#[must_use]
pub fn float() -> NumberSchema {
    number()
}

impl NumberSchema {
    /// Requires the value to be at least `n`.
    #[must_use]
    pub fn min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    /// Requires the value to be at most `n`.
    #[must_use]
    pub fn max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }

    /// Requires the value to be strictly greater than zero.
    #[must_use]
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    /// Requires the value to be strictly less than zero.
    #[must_use]
    pub fn negative(mut self) -> Self {
        self.negative = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: f64) -> Self {
        self.core.default = Some(JsonValue::from(value));
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }

    /// Adds a custom predicate, run only after all structural checks pass.
    #[must_use]
    pub fn refine<F>(mut self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(f64) -> bool + 'static,
    {
        let message = message.into();
        self.core.refinements.push(Box::new(move |value| {
            match value.as_f64() {
                Some(n) if !predicate(n) => Some(message.clone()),
                _ => None,
            }
        }));
        self
    }
}

impl Schema for NumberSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required field is missing");
        };
        let Some(n) = value.as_f64() else {
            return Some(SchemaError::invalid(format!(
                "expected number, got {}",
                type_name(value)
            )));
        };

        if self.integer && n != n.trunc() {
            return Some(SchemaError::invalid("expected integer, got float"));
        }
        if let Some(min) = self.min {
            if n < min {
                return Some(SchemaError::invalid(format!(
                    "number must be at least {min}"
                )));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Some(SchemaError::invalid(format!(
                    "number must be at most {max}"
                )));
            }
        }
        if self.positive && n <= 0.0 {
            return Some(SchemaError::invalid("number must be positive"));
        }
        if self.negative && n >= 0.0 {
            return Some(SchemaError::invalid("number must be negative"));
        }
        self.core.run_refinements(value)
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Boolean / Null
// ---------------------------------------------------------------------------

/// Validates boolean values.
pub struct BooleanSchema {
    core: SchemaCore,
}

/// Creates a boolean validator.
#[must_use]
pub fn boolean() -> BooleanSchema {
    BooleanSchema {
        core: SchemaCore::default(),
    }
}

impl BooleanSchema {
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: bool) -> Self {
        self.core.default = Some(JsonValue::Bool(value));
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }
}

impl Schema for BooleanSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required field is missing");
        };
        if !value.is_boolean() {
            return Some(SchemaError::invalid(format!(
                "expected boolean, got {}",
                type_name(value)
            )));
        }
        self.core.run_refinements(value)
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

/// Validates that a value is null (or absent).
pub struct NullSchema {
    core: SchemaCore,
}

/// Creates a null validator.
#[must_use]
pub fn null() -> NullSchema {
    NullSchema {
        core: SchemaCore::default(),
    }
}

impl Schema for NullSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        match present(value) {
            Some(value) => Some(SchemaError::invalid(format!(
                "expected null, got {}",
                type_name(value)
            ))),
            None => None,
        }
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// Validates reference values in either form: a map containing `_ref`, or a
/// string beginning with `:`.
pub struct RefSchema {
    core: SchemaCore,
    namespace: Option<String>,
    relationship: Option<String>,
}

/// Creates a reference validator.
#[must_use]
pub fn reference() -> RefSchema {
    RefSchema {
        core: SchemaCore::default(),
        namespace: None,
        relationship: None,
    }
}

impl RefSchema {
    /// Requires the reference's namespace to equal `ns` (map form only).
    #[must_use]
    pub fn namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = Some(ns.into());
        self
    }

    /// Requires the reference's relationship to equal `rel` (map form only).
    #[must_use]
    pub fn relationship(mut self, rel: impl Into<String>) -> Self {
        self.relationship = Some(rel.into());
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }
}

impl Schema for RefSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required field is missing");
        };

        match value {
            JsonValue::Object(obj) => {
                if !obj.contains_key("_ref") {
                    return Some(SchemaError::invalid(
                        "expected reference object with _ref field",
                    ));
                }
                if let Some(expected) = &self.namespace {
                    let ns = obj.get("_namespace").and_then(JsonValue::as_str);
                    if ns != Some(expected.as_str()) {
                        return Some(SchemaError::invalid(format!(
                            "expected namespace {expected}"
                        )));
                    }
                }
                if let Some(expected) = &self.relationship {
                    let rel = obj.get("_relationship").and_then(JsonValue::as_str);
                    if rel != Some(expected.as_str()) {
                        return Some(SchemaError::invalid(format!(
                            "expected relationship {expected}"
                        )));
                    }
                }
            }
            JsonValue::String(s) => {
                if !s.starts_with(':') {
                    return Some(SchemaError::invalid(
                        "expected reference string starting with ':'",
                    ));
                }
            }
            other => {
                return Some(SchemaError::invalid(format!(
                    "expected reference, got {}",
                    type_name(other)
                )));
            }
        }
        self.core.run_refinements(value)
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// Validates a fixed field → validator mapping against a map value.
///
/// All field errors are collected before returning; a field that is missing,
/// non-optional, and carries a default is considered satisfied by the
/// default and is not validated further.
pub struct ObjectSchema {
    core: SchemaCore,
    fields: IndexMap<String, Box<dyn Schema>>,
}

/// Creates an object validator from `(field, validator)` pairs.
#[must_use]
pub fn object<I, K>(fields: I) -> ObjectSchema
where
    I: IntoIterator<Item = (K, Box<dyn Schema>)>,
    K: Into<String>,
{
    ObjectSchema {
        core: SchemaCore::default(),
        fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
}

impl ObjectSchema {
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }

    /// Returns a new object validator with `fields` added (replacing
    /// duplicates).
    #[must_use]
    pub fn extend<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Box<dyn Schema>)>,
        K: Into<String>,
    {
        for (key, value) in fields {
            self.fields.insert(key.into(), value);
        }
        self
    }

    /// Returns a new object validator keeping only the named fields.
    #[must_use]
    pub fn pick(mut self, keys: &[&str]) -> Self {
        self.fields.retain(|name, _| keys.contains(&name.as_str()));
        self
    }

    /// Returns a new object validator without the named fields.
    #[must_use]
    pub fn omit(mut self, keys: &[&str]) -> Self {
        self.fields.retain(|name, _| !keys.contains(&name.as_str()));
        self
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required field is missing");
        };
        let Some(obj) = value.as_object() else {
            return Some(SchemaError::invalid(format!(
                "expected object, got {}",
                type_name(value)
            )));
        };

        let mut errs = ValidationErrors::new();
        for (name, schema) in &self.fields {
            let field_value = present(obj.get(name));
            if field_value.is_none() && !schema.is_optional() && schema.default_value().is_some() {
                // the default satisfies the field; nothing left to validate
                continue;
            }
            if let Some(err) = schema.validate(field_value) {
                collect(&mut errs, name, err, field_value);
            }
        }
        if errs.has_errors() {
            return Some(errs.into());
        }
        self.core.run_refinements(value)
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

/// Validates element type and optional length bounds; every element error is
/// collected, tagged with its index.
pub struct ArraySchema {
    core: SchemaCore,
    item: Box<dyn Schema>,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

/// Creates an array validator over an element validator.
#[must_use]
pub fn array(item: impl Schema + 'static) -> ArraySchema {
    ArraySchema {
        core: SchemaCore::default(),
        item: Box::new(item),
        min_len: None,
        max_len: None,
    }
}

impl ArraySchema {
    /// Requires at least `n` items.
    #[must_use]
    pub fn min(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    /// Requires at most `n` items.
    #[must_use]
    pub fn max(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }
}

impl Schema for ArraySchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required field is missing");
        };
        let Some(arr) = value.as_array() else {
            return Some(SchemaError::invalid(format!(
                "expected array, got {}",
                type_name(value)
            )));
        };

        if let Some(min) = self.min_len {
            if arr.len() < min {
                return Some(SchemaError::invalid(format!(
                    "array must have at least {min} items"
                )));
            }
        }
        if let Some(max) = self.max_len {
            if arr.len() > max {
                return Some(SchemaError::invalid(format!(
                    "array must have at most {max} items"
                )));
            }
        }

        let mut errs = ValidationErrors::new();
        for (i, item) in arr.iter().enumerate() {
            if let Some(err) = self.item.validate(Some(item)) {
                collect(&mut errs, &format!("[{i}]"), err, Some(item));
            }
        }
        if errs.has_errors() {
            return Some(errs.into());
        }
        self.core.run_refinements(value)
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Validates tabular data: either a bare list of row maps, or a block-shaped
/// map containing a `rows` list. Each row is checked against an object
/// validator built from the table's field map, with errors tagged `row[i]`
/// (and `row[i].field` for per-field failures).
pub struct TableSchema {
    core: SchemaCore,
    name: String,
    row_schema: ObjectSchema,
}

/// Creates a table validator from `(field, validator)` pairs.
#[must_use]
pub fn table<I, K>(name: impl Into<String>, fields: I) -> TableSchema
where
    I: IntoIterator<Item = (K, Box<dyn Schema>)>,
    K: Into<String>,
{
    TableSchema {
        core: SchemaCore::default(),
        name: name.into(),
        row_schema: object(fields),
    }
}

impl TableSchema {
    /// Returns the table name this validator was declared for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.core.optional = true;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.core.description = description.into();
        self
    }

    fn validate_rows(&self, rows: &[JsonValue], whole: &JsonValue) -> Option<SchemaError> {
        let mut errs = ValidationErrors::new();
        for (i, row) in rows.iter().enumerate() {
            if !row.is_object() {
                errs.push(ValidationError::new(
                    format!("row[{i}]"),
                    "expected row object",
                    row.clone(),
                ));
                continue;
            }
            if let Some(err) = self.row_schema.validate(Some(row)) {
                collect(&mut errs, &format!("row[{i}]"), err, Some(row));
            }
        }
        if errs.has_errors() {
            return Some(errs.into());
        }
        self.core.run_refinements(whole)
    }
}

impl Schema for TableSchema {
    fn validate(&self, value: Option<&JsonValue>) -> Option<SchemaError> {
        let Some(value) = present(value) else {
            return missing_error(&self.core, "required table is missing");
        };

        match value {
            JsonValue::Object(obj) => match obj.get("rows") {
                Some(rows_value) => match rows_value.as_array() {
                    Some(rows) => self.validate_rows(rows, rows_value),
                    None => Some(SchemaError::invalid("expected table with rows array")),
                },
                None => Some(SchemaError::invalid("expected table with rows array")),
            },
            JsonValue::Array(rows) => self.validate_rows(rows, value),
            other => Some(SchemaError::invalid(format!(
                "expected table, got {}",
                type_name(other)
            ))),
        }
    }

    fn is_optional(&self) -> bool {
        self.core.optional
    }

    fn default_value(&self) -> Option<&JsonValue> {
        self.core.default.as_ref()
    }

    fn description(&self) -> &str {
        &self.core.description
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Non-throwing validation outcome: either the data or the aggregated
/// errors, with a success flag.
#[derive(Debug, Clone, Default)]
pub struct SafeParseResult {
    pub success: bool,
    pub data: Option<JsonMap<String, JsonValue>>,
    pub error: Option<ValidationErrors>,
}

/// Validates a block-name → value map against a block-name → validator map,
/// aggregating every block's errors with the block name prefixed to each
/// path.
pub struct DocumentSchema {
    blocks: IndexMap<String, Box<dyn Schema>>,
}

/// Creates a document validator from `(block name, validator)` pairs.
#[must_use]
pub fn document<I, K>(blocks: I) -> DocumentSchema
where
    I: IntoIterator<Item = (K, Box<dyn Schema>)>,
    K: Into<String>,
{
    DocumentSchema {
        blocks: blocks.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
}

impl DocumentSchema {
    /// Validates `value`, returning it on success or the aggregated errors.
    pub fn parse(
        &self,
        value: &JsonMap<String, JsonValue>,
    ) -> Result<JsonMap<String, JsonValue>, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        for (name, schema) in &self.blocks {
            let block_value = present(value.get(name));
            if let Some(err) = schema.validate(block_value) {
                collect(&mut errs, name, err, block_value);
            }
        }
        if errs.has_errors() {
            Err(errs)
        } else {
            Ok(value.clone())
        }
    }

    /// Like [`DocumentSchema::parse`], but never fails: the outcome is
    /// reported as a tri-state result.
    #[must_use]
    pub fn safe_parse(&self, value: &JsonMap<String, JsonValue>) -> SafeParseResult {
        match self.parse(value) {
            Ok(data) => SafeParseResult {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(error) => SafeParseResult {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_vs_optional() {
        assert!(string().validate(None).is_some());
        assert!(string().optional().validate(None).is_none());
        assert!(string().optional().validate(Some(&json!(null))).is_none());
    }

    #[test]
    fn test_number_integral_check() {
        assert!(int().validate(Some(&json!(3))).is_none());
        assert!(int().validate(Some(&json!(3.0))).is_none());
        assert!(int().validate(Some(&json!(3.5))).is_some());
    }

    #[test]
    fn test_positive_is_strict() {
        assert!(number().positive().validate(Some(&json!(0))).is_some());
        assert!(number().positive().validate(Some(&json!(1))).is_none());
        assert!(number().negative().validate(Some(&json!(0))).is_some());
        assert!(number().negative().validate(Some(&json!(-1))).is_none());
    }

    #[test]
    fn test_object_collects_all_errors() {
        let schema = object([
            ("name", string().min(1).boxed()),
            ("email", string().email().boxed()),
        ]);
        let err = schema
            .validate(Some(&json!({"name": "", "email": "invalid"})))
            .unwrap();
        let errs = err.as_aggregate().unwrap();
        assert_eq!(errs.errors.len(), 2);
        let fields: Vec<&str> = errs.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"email"));
    }

    #[test]
    fn test_default_satisfies_missing_field() {
        let schema = object([("role", string().with_default("user").min(10).boxed())]);
        // missing + defaulted: the min(10) check is never run
        assert!(schema.validate(Some(&json!({}))).is_none());
        // present values are still validated
        assert!(schema.validate(Some(&json!({"role": "x"}))).is_some());
    }
}

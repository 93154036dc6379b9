//! The ISON document tree: [`FieldInfo`], [`Row`], [`Block`], and
//! [`Document`].
//!
//! A document owns an ordered set of named blocks; a block owns an ordered
//! field list and its data rows; a row maps field names to [`Value`]s. The
//! field list order is authoritative both for serialization column order and
//! for positional decoding of row tokens.
//!
//! ## Examples
//!
//! ```rust
//! use ison::{Block, BlockKind, Document, Row, Value};
//!
//! let mut block = Block::new(BlockKind::Table, "users");
//! block.add_field("id", "int");
//! block.add_field("name", "string");
//!
//! let mut row = Row::new();
//! row.insert("id".to_string(), Value::Int(1));
//! row.insert("name".to_string(), Value::from("Alice"));
//! block.add_row(row);
//!
//! let mut doc = Document::new();
//! doc.add_block(block);
//! assert_eq!(doc.order().collect::<Vec<_>>(), vec!["users"]);
//! ```

use crate::Value;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::fmt;

/// An ordered mapping from field name to cell value.
///
/// A row need not cover every declared field: absent fields are simply
/// missing keys, not explicit nulls.
pub type Row = IndexMap<String, Value>;

/// The three block shapes: multi-row tables, single-row objects, and
/// metadata rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Table,
    Object,
    Meta,
}

impl BlockKind {
    /// Returns the kind's text form as used in block headers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Table => "table",
            BlockKind::Object => "object",
            BlockKind::Meta => "meta",
        }
    }

    /// Parses a header kind segment; anything but the three known kinds is
    /// `None`.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "table" => Some(BlockKind::Table),
            "object" => Some(BlockKind::Object),
            "meta" => Some(BlockKind::Meta),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column declaration: a field name plus an optional type hint.
///
/// The hint is one of `int`, `float`, `bool`, `string`, `ref`, `computed`, or
/// the empty string, which means "infer at decode time, emit untyped".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub name: String,
    pub type_hint: String,
}

impl FieldInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, type_hint: impl Into<String>) -> Self {
        FieldInfo {
            name: name.into(),
            type_hint: type_hint.into(),
        }
    }
}

/// A named collection of rows with a declared field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub name: String,
    /// Field declarations in column order
    pub fields: Vec<FieldInfo>,
    pub rows: Vec<Row>,
    /// Aggregate row following a `---` separator, if any
    pub summary_row: Option<Row>,
}

impl Block {
    #[must_use]
    pub fn new(kind: BlockKind, name: impl Into<String>) -> Self {
        Block {
            kind,
            name: name.into(),
            fields: Vec::new(),
            rows: Vec::new(),
            summary_row: None,
        }
    }

    /// Appends a field declaration.
    pub fn add_field(&mut self, name: impl Into<String>, type_hint: impl Into<String>) {
        self.fields.push(FieldInfo::new(name, type_hint));
    }

    /// Appends a data row.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Returns the field names in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Converts the block to its generic map form:
    /// `{kind, name, fields, rows}` plus `summary` when present.
    #[must_use]
    pub fn to_dict(&self) -> JsonValue {
        let fields: Vec<JsonValue> = self
            .fields
            .iter()
            .map(|f| json!({"name": f.name, "typeHint": f.type_hint}))
            .collect();
        let rows: Vec<JsonValue> = self.rows.iter().map(row_to_json).collect();

        let mut result = JsonMap::new();
        result.insert("kind".to_string(), json!(self.kind.as_str()));
        result.insert("name".to_string(), json!(self.name));
        result.insert("fields".to_string(), JsonValue::Array(fields));
        result.insert("rows".to_string(), JsonValue::Array(rows));
        if let Some(summary) = &self.summary_row {
            result.insert("summary".to_string(), row_to_json(summary));
        }
        JsonValue::Object(result)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_dict().serialize(serializer)
    }
}

fn row_to_json(row: &Row) -> JsonValue {
    JsonValue::Object(
        row.iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}

/// A parsed ISON document: named blocks in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    blocks: IndexMap<String, Block>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document::default()
    }

    /// Adds a block, replacing any existing block of the same name.
    ///
    /// Replacement keeps the name's first-seen position in the document
    /// order.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.insert(block.name.clone(), block);
    }

    /// Returns a block by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    /// Returns a mutable block by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Block> {
        self.blocks.get_mut(name)
    }

    /// Block names in order of first appearance.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Blocks in order of first appearance.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Returns the number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the document has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Converts the document to its generic map form: block name →
    /// [`Block::to_dict`].
    #[must_use]
    pub fn to_dict(&self) -> JsonValue {
        JsonValue::Object(
            self.blocks
                .iter()
                .map(|(name, block)| (name.clone(), block.to_dict()))
                .collect(),
        )
    }

    /// Converts the document to a bare data map: block name → list of row
    /// maps.
    ///
    /// Field declarations and summary rows are not included; this is the
    /// shape handed to the JSON boundary.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        JsonValue::Object(
            self.blocks
                .iter()
                .map(|(name, block)| {
                    let rows: Vec<JsonValue> = block.rows.iter().map(row_to_json).collect();
                    (name.clone(), JsonValue::Array(rows))
                })
                .collect(),
        )
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_dict().serialize(serializer)
    }
}

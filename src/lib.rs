//! # ison
//!
//! A parser, serializer, and runtime schema-validation engine for the ISON
//! format, a line-oriented, typed, tabular text serialization with inline
//! cross-record references, and its line-delimited streaming variant,
//! ISONL.
//!
//! ## What is ISON?
//!
//! ISON stores structured data as named blocks of rows. A block declares its
//! columns once (optionally typed), then lists one row per line:
//!
//! ```text
//! table.users
//! id:int name:string active:bool
//! 1 Alice true
//! 2 Bob false
//! ```
//!
//! Values may reference other records inline: `:1` (bare id), `:user:42`
//! (namespaced), or `:OWNS:5` (relationship). See the [`spec`] module for
//! the full format description.
//!
//! ## Key Features
//!
//! - **Fail-soft parsing**: malformed input degrades to fewer blocks; parsing
//!   never raises
//! - **Typed columns**: per-field hints (`int`, `float`, `bool`, `string`,
//!   `ref`) guide decoding, with automatic inference as the fallback
//! - **Inline references**: first-class foreign-key/graph-edge values
//! - **Streaming variant**: ISONL emits one self-describing row per line,
//!   independently appendable and resumable
//! - **Schema validation**: composable validators that aggregate every
//!   violation with full field paths, never failing fast
//!
//! ## Quick Start
//!
//! ```rust
//! let doc = ison::parse("\
//! table.users
//! id:int name:string active:bool
//! 1 Alice true
//! 2 Bob false
//! ");
//!
//! let users = doc.get("users").unwrap();
//! assert_eq!(users.rows.len(), 2);
//! assert_eq!(users.rows[0]["name"].as_str(), Some("Alice"));
//! assert_eq!(users.rows[1]["active"].as_bool(), Some(false));
//!
//! // and back to canonical text
//! let text = ison::dumps(&doc);
//! assert!(text.starts_with("table.users\n"));
//! ```
//!
//! ## Validating decoded data
//!
//! ```rust
//! use ison::schema::{self, SchemaExt};
//! use serde_json::json;
//!
//! let doc_schema = schema::document([(
//!     "users",
//!     schema::table(
//!         "users",
//!         [
//!             ("id", schema::int().positive().boxed()),
//!             ("email", schema::string().email().boxed()),
//!         ],
//!     )
//!     .boxed(),
//! )]);
//!
//! let data = json!({"users": [{"id": 1, "email": "a@example.com"}]});
//! assert!(doc_schema.safe_parse(data.as_object().unwrap()).success);
//! ```
//!
//! ## The generic-map boundary
//!
//! The core never parses JSON text itself; [`from_json`]/[`to_json`]
//! delegate the text layer to serde_json and exchange plain ordered field
//! maps. [`from_dict`] builds documents programmatically from such maps, and
//! every document node serializes with serde.

pub mod convert;
pub mod document;
pub mod dump;
pub mod error;
pub mod parser;
pub mod reference;
pub mod schema;
pub mod spec;
pub mod value;

pub use convert::{
    from_dict, from_dict_with_options, from_json, smart_order_fields, to_json, value_from_json,
    FromDictOptions,
};
pub use document::{Block, BlockKind, Document, FieldInfo, Row};
pub use dump::{
    dump, dump_isonl, dump_with_options, dumps, dumps_isonl, dumps_with_options, DumpOptions,
};
pub use error::{Error, Result, SchemaError, ValidationError, ValidationErrors};
pub use parser::{parse, parse_field_def, parse_isonl, parse_value, tokenize_line};
pub use reference::Reference;
pub use schema::{Schema, SchemaExt};
pub use value::Value;

use std::fs;
use std::path::Path;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads and parses an `.ison` file.
///
/// # Errors
///
/// Returns an error only if the file cannot be read; the parse itself is
/// fail-soft.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
    Ok(parse(&fs::read_to_string(path)?))
}

/// Reads and parses an `.isonl` file.
///
/// # Errors
///
/// Returns an error only if the file cannot be read.
pub fn load_isonl<P: AsRef<Path>>(path: P) -> Result<Document> {
    Ok(parse_isonl(&fs::read_to_string(path)?))
}

/// Converts ISON text to ISONL text.
#[must_use]
pub fn ison_to_isonl(text: &str) -> String {
    dumps_isonl(&parse(text))
}

/// Converts ISONL text to ISON text.
#[must_use]
pub fn isonl_to_ison(text: &str) -> String {
    dumps(&parse_isonl(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_roundtrip() {
        let text = "table.users\nid:int name:string\n1 Alice\n2 Bob\n";
        assert_eq!(dumps(&parse(text)), text);
    }

    #[test]
    fn test_format_conversion() {
        let ison = "table.users\nid:int name\n1 Alice\n";
        let isonl = ison_to_isonl(ison);
        assert_eq!(isonl, "table.users|id:int name|1 Alice\n");
        assert_eq!(isonl_to_ison(&isonl), ison);
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

//! ISON serialization: canonical dumps, the ISONL streaming dump, and the
//! file-writing convenience layer.
//!
//! Serializing a well-formed [`Document`] never fails; only the file-write
//! boundary can, and those errors propagate unmodified through
//! [`crate::Error`].
//!
//! ## Usage
//!
//! ```rust
//! use ison::{dumps, parse};
//!
//! let doc = parse("table.users\nid:int name\n1 Alice\n");
//! let text = dumps(&doc);
//! assert_eq!(text, "table.users\nid:int name\n1 Alice\n");
//! ```
//!
//! ## Column alignment
//!
//! [`DumpOptions::with_align_columns`] pads every column to its widest
//! rendered cell. Padding is plain spaces, which the tokenizer collapses, so
//! an aligned dump re-parses to the same document:
//!
//! ```rust
//! use ison::{dumps_with_options, parse, DumpOptions};
//!
//! let doc = parse("table.t\nid:int name\n1 Alice\n100 Bo\n");
//! let options = DumpOptions::new().with_align_columns(true);
//! let aligned = dumps_with_options(&doc, &options);
//! assert_eq!(parse(&aligned), doc);
//! ```

use crate::document::{Block, Document, Row};
use crate::Result;
use std::fs;
use std::path::Path;

/// Configures serialization behavior.
#[derive(Clone, Debug)]
pub struct DumpOptions {
    /// Pad columns to a shared width for visual alignment
    pub align_columns: bool,
    /// Column separator; an empty string falls back to a single space
    pub delimiter: String,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            align_columns: false,
            delimiter: " ".to_string(),
        }
    }
}

impl DumpOptions {
    /// Creates the default options (no alignment, space delimiter).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables column alignment.
    #[must_use]
    pub fn with_align_columns(mut self, align: bool) -> Self {
        self.align_columns = align;
        self
    }

    /// Sets the column separator.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

/// Serializes a document to canonical ISON text with default options.
#[must_use]
pub fn dumps(doc: &Document) -> String {
    dumps_with_options(doc, &DumpOptions::default())
}

/// Serializes a document to canonical ISON text.
///
/// Each block is emitted as its `kind.name` header, a field-definition line
/// (`name:typeHint` for hinted fields), one line per row with absent fields
/// rendered as `~`, and, when a summary row is present, a `---` separator
/// followed by the summary row. Blocks are separated by a blank line.
#[must_use]
pub fn dumps_with_options(doc: &Document, options: &DumpOptions) -> String {
    let mut out = String::new();
    let delim = if options.delimiter.is_empty() {
        " "
    } else {
        options.delimiter.as_str()
    };

    for (i, block) in doc.blocks().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(block.kind.as_str());
        out.push('.');
        out.push_str(&block.name);
        out.push('\n');

        let widths = options.align_columns.then(|| column_widths(block));
        let widths = widths.as_deref();

        for (j, field) in block.fields.iter().enumerate() {
            if j > 0 {
                out.push_str(delim);
            }
            let cell = header_cell(&field.name, &field.type_hint);
            push_cell(&mut out, &cell, widths, j, block.fields.len());
        }
        out.push('\n');

        for row in &block.rows {
            write_row(&mut out, block, row, delim, widths);
        }
        if let Some(summary) = &block.summary_row {
            out.push_str("---\n");
            write_row(&mut out, block, summary, delim, widths);
        }
    }
    out
}

/// Serializes a document to ISONL: one self-describing
/// `kind.name|fields|values` line per row.
///
/// Every line repeats the full field header, so the stream can be resumed or
/// appended to independently. Summary rows are not part of the streaming
/// form.
#[must_use]
pub fn dumps_isonl(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        let mut header = String::new();
        for (i, field) in block.fields.iter().enumerate() {
            if i > 0 {
                header.push(' ');
            }
            header.push_str(&header_cell(&field.name, &field.type_hint));
        }

        for row in &block.rows {
            out.push_str(block.kind.as_str());
            out.push('.');
            out.push_str(&block.name);
            out.push('|');
            out.push_str(&header);
            out.push('|');
            for (i, field) in block.fields.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                match row.get(&field.name) {
                    Some(value) => out.push_str(&value.to_ison()),
                    None => out.push('~'),
                }
            }
            out.push('\n');
        }
    }
    out
}

/// Serializes a document and writes it to a file with default options.
pub fn dump<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    dump_with_options(doc, path, &DumpOptions::default())
}

/// Serializes a document and writes it to a file.
pub fn dump_with_options<P: AsRef<Path>>(
    doc: &Document,
    path: P,
    options: &DumpOptions,
) -> Result<()> {
    fs::write(path, dumps_with_options(doc, options))?;
    Ok(())
}

/// Serializes a document and writes it to an ISONL file.
pub fn dump_isonl<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    fs::write(path, dumps_isonl(doc))?;
    Ok(())
}

fn header_cell(name: &str, type_hint: &str) -> String {
    if type_hint.trim().is_empty() {
        name.to_string()
    } else {
        format!("{name}:{type_hint}")
    }
}

fn write_row(out: &mut String, block: &Block, row: &Row, delim: &str, widths: Option<&[usize]>) {
    for (j, field) in block.fields.iter().enumerate() {
        if j > 0 {
            out.push_str(delim);
        }
        let cell = match row.get(&field.name) {
            Some(value) => value.to_ison(),
            None => "~".to_string(),
        };
        push_cell(out, &cell, widths, j, block.fields.len());
    }
    out.push('\n');
}

/// Writes one cell, space-padding all but the last column when aligning.
fn push_cell(out: &mut String, cell: &str, widths: Option<&[usize]>, col: usize, columns: usize) {
    out.push_str(cell);
    if let Some(widths) = widths {
        if col + 1 < columns {
            let len = cell.chars().count();
            for _ in len..widths[col] {
                out.push(' ');
            }
        }
    }
}

/// Per-column display width: the widest of the header cell and every
/// rendered value in that column, summary row included.
fn column_widths(block: &Block) -> Vec<usize> {
    let mut widths: Vec<usize> = block
        .fields
        .iter()
        .map(|f| header_cell(&f.name, &f.type_hint).chars().count())
        .collect();
    for row in block.rows.iter().chain(block.summary_row.as_ref()) {
        for (j, field) in block.fields.iter().enumerate() {
            if let Some(value) = row.get(&field.name) {
                let w = value.to_ison().chars().count();
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockKind, Row};
    use crate::{parse, Value};

    fn users_doc() -> Document {
        let mut block = Block::new(BlockKind::Table, "users");
        block.add_field("id", "int");
        block.add_field("name", "string");
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Int(1));
        row.insert("name".to_string(), Value::from("Alice"));
        block.add_row(row);
        let mut doc = Document::new();
        doc.add_block(block);
        doc
    }

    #[test]
    fn test_dumps_basic() {
        assert_eq!(dumps(&users_doc()), "table.users\nid:int name:string\n1 Alice\n");
    }

    #[test]
    fn test_dumps_missing_field_is_null() {
        let mut doc = users_doc();
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Int(2));
        doc.get_mut("users").unwrap().add_row(row);
        assert!(dumps(&doc).ends_with("2 ~\n"));
    }

    #[test]
    fn test_dumps_blank_line_between_blocks() {
        let mut doc = users_doc();
        let mut meta = Block::new(BlockKind::Meta, "info");
        meta.add_field("version", "");
        let mut row = Row::new();
        row.insert("version".to_string(), Value::from("1.0"));
        meta.add_row(row);
        doc.add_block(meta);

        let text = dumps(&doc);
        assert!(text.contains("\n\nmeta.info\n"));
    }

    #[test]
    fn test_dumps_summary_row() {
        let mut doc = users_doc();
        let mut summary = Row::new();
        summary.insert("id".to_string(), Value::Int(99));
        doc.get_mut("users").unwrap().summary_row = Some(summary);

        let text = dumps(&doc);
        assert!(text.ends_with("---\n99 ~\n"));

        let back = parse(&text);
        let block = back.get("users").unwrap();
        assert_eq!(block.rows.len(), 1);
        assert_eq!(block.summary_row.as_ref().unwrap()["id"], Value::Int(99));
    }

    #[test]
    fn test_empty_delimiter_falls_back_to_space() {
        let options = DumpOptions::new().with_delimiter("");
        assert_eq!(
            dumps_with_options(&users_doc(), &options),
            dumps(&users_doc())
        );
    }

    #[test]
    fn test_aligned_dump_pads_columns() {
        let doc = parse("table.t\nid:int name\n1 Alice\n100 Bo\n");
        let options = DumpOptions::new().with_align_columns(true);
        let text = dumps_with_options(&doc, &options);
        // the id column is as wide as its "id:int" header cell
        assert!(text.contains("1      Alice\n"));
        assert!(text.contains("100    Bo\n"));
        assert_eq!(parse(&text), doc);
    }

    #[test]
    fn test_isonl_repeats_header_per_row() {
        let mut doc = users_doc();
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Int(2));
        row.insert("name".to_string(), Value::from("Bob"));
        doc.get_mut("users").unwrap().add_row(row);

        let text = dumps_isonl(&doc);
        assert_eq!(
            text,
            "table.users|id:int name:string|1 Alice\ntable.users|id:int name:string|2 Bob\n"
        );
    }
}

//! ISON parsing: the tokenizer, the value codec, and the block-structured
//! line grammar.
//!
//! Parsing is deliberately fail-soft. Malformed lines, unknown block kinds,
//! and surplus row tokens are skipped or truncated rather than raised; even
//! an empty or entirely broken input yields a [`Document`] (with fewer or no
//! blocks), never an error. Format tolerance here is a feature, not a gap.
//!
//! ## Overview
//!
//! - [`tokenize_line`]: quote- and escape-aware line splitter
//! - [`parse_value`]: token → [`Value`] with type inference and hints
//! - [`parse`]: full-document grammar over blocks, rows, and summary rows
//! - [`parse_isonl`]: the line-delimited streaming variant
//!
//! ## Usage
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
//! ```

use crate::document::{Block, BlockKind, Document, FieldInfo, Row};
use crate::{Reference, Value};

/// Splits one logical line into tokens.
///
/// Runs of unquoted whitespace separate tokens and collapse; double quotes
/// toggle quoted mode and are never emitted. Inside quotes a backslash
/// escapes the next character (`\n`, `\t`, `\"`, `\\` map to their control
/// forms, anything else passes through literally). A backslash outside
/// quotes has no special meaning.
///
/// # Examples
///
/// ```rust
/// use ison::tokenize_line;
///
/// assert_eq!(
///     tokenize_line("1 \"Alice Smith\" alice@example.com"),
///     vec!["1", "Alice Smith", "alice@example.com"]
/// );
/// ```
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            match ch {
                'n' => current.push('\n'),
                't' => current.push('\t'),
                '"' => current.push('"'),
                '\\' => current.push('\\'),
                other => current.push(other),
            }
            escaped = false;
            continue;
        }
        if ch == '\\' && in_quotes {
            escaped = true;
            continue;
        }
        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }
        if !in_quotes && (ch == ' ' || ch == '\t') {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Splits a field-definition token into `(name, type_hint)` on the first
/// colon.
///
/// A token without a colon, or with a leading colon, is all name and carries
/// no hint.
#[must_use]
pub fn parse_field_def(field: &str) -> (&str, &str) {
    match field.find(':') {
        Some(idx) if idx > 0 => (&field[..idx], &field[idx + 1..]),
        _ => (field, ""),
    }
}

/// Decodes a token into a [`Value`], guided but not bound by the field's
/// type hint.
///
/// Null, boolean, and reference literals win regardless of hint. After that,
/// `int`/`float` hints attempt a strict numeric parse and fall through on
/// failure; a `bool` hint recognizes only `1`/`0`; a `string` hint returns
/// the token verbatim; a `ref` hint on a non-reference token degrades to a
/// string. With no hint (or after a fall-through), inference tries integer,
/// then float, then keeps the string.
///
/// # Examples
///
/// ```rust
/// use ison::{parse_value, Value};
///
/// assert_eq!(parse_value("42", ""), Value::Int(42));
/// assert_eq!(parse_value("3.14", ""), Value::Float(3.14));
/// assert_eq!(parse_value("TRUE", ""), Value::Bool(true));
/// assert_eq!(parse_value("42", "string"), Value::from("42"));
/// assert_eq!(parse_value("~", "int"), Value::Null);
/// ```
#[must_use]
pub fn parse_value(token: &str, type_hint: &str) -> Value {
    if token == "~" || token == "null" || token == "NULL" {
        return Value::Null;
    }
    if token == "true" || token == "TRUE" {
        return Value::Bool(true);
    }
    if token == "false" || token == "FALSE" {
        return Value::Bool(false);
    }
    if token.starts_with(':') {
        return Value::Reference(Reference::parse(token));
    }

    match type_hint {
        "int" => {
            if let Ok(v) = token.parse::<i64>() {
                return Value::Int(v);
            }
        }
        "float" => {
            if let Ok(v) = token.parse::<f64>() {
                return Value::Float(v);
            }
        }
        "bool" => {
            if token == "1" {
                return Value::Bool(true);
            }
            if token == "0" {
                return Value::Bool(false);
            }
        }
        "string" => return Value::String(token.to_string()),
        // a ref hint without reference syntax degrades to a string
        "ref" => return Value::String(token.to_string()),
        _ => {}
    }

    if let Ok(v) = token.parse::<i64>() {
        return Value::Int(v);
    }
    if let Ok(v) = token.parse::<f64>() {
        return Value::Float(v);
    }
    Value::String(token.to_string())
}

/// Parses ISON text into a [`Document`].
///
/// The grammar is line-oriented: blank lines and `#` comments are skipped; a
/// `kind.name` line with a known kind opens a block; the next non-blank line
/// declares the block's fields; subsequent lines are rows until a blank
/// line, a new block header, or end of input. A `---` line switches the
/// block into summary mode (last summary line wins).
///
/// Unrecognized content is skipped silently; this function never fails.
#[must_use]
pub fn parse(text: &str) -> Document {
    let mut parser = Parser {
        lines: split_lines(text),
        pos: 0,
    };
    parser.parse()
}

/// Parses ISONL text (one self-describing `kind.name|fields|values` row per
/// line) into a [`Document`].
///
/// The first line seen for a block name establishes its field list; the
/// header segment of later lines for the same name is discarded, so
/// divergent headers are silently ignored. Lines that do not split into
/// three `|` sections, or whose header is not a valid block header, are
/// skipped.
#[must_use]
pub fn parse_isonl(text: &str) -> Document {
    let mut doc = Document::new();
    for raw in split_lines(text) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.splitn(3, '|').collect();
        if parts.len() != 3 {
            continue;
        }
        let Some((kind, name)) = block_header(parts[0]) else {
            continue;
        };

        if doc.get(name).is_none() {
            let mut block = Block::new(kind, name);
            for field in tokenize_line(parts[1]) {
                let (fname, hint) = parse_field_def(&field);
                block.add_field(fname, hint);
            }
            doc.add_block(block);
        }
        if let Some(block) = doc.get_mut(name) {
            let tokens = tokenize_line(parts[2]);
            let row = zip_row(&block.fields, &tokens);
            block.add_row(row);
        }
    }
    doc
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect()
}

/// Recognizes a `kind.name` block header; anything else (including unknown
/// kinds and quoted lines) is not a header.
fn block_header(line: &str) -> Option<(BlockKind, &str)> {
    if line.starts_with('"') {
        return None;
    }
    let (kind, name) = line.split_once('.')?;
    Some((BlockKind::parse(kind)?, name))
}

/// Zips tokens against declared fields positionally; surplus tokens are
/// discarded, short rows leave trailing fields absent.
fn zip_row(fields: &[FieldInfo], tokens: &[String]) -> Row {
    let mut row = Row::new();
    for (field, token) in fields.iter().zip(tokens) {
        row.insert(field.name.clone(), parse_value(token, &field.type_hint));
    }
    row
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl Parser<'_> {
    fn parse(&mut self) -> Document {
        let mut doc = Document::new();
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();
            if line.is_empty() || line.starts_with('#') {
                self.pos += 1;
                continue;
            }
            if let Some((kind, name)) = block_header(line) {
                let block = self.parse_block(kind, name);
                doc.add_block(block);
                continue;
            }
            self.pos += 1;
        }
        doc
    }

    fn parse_block(&mut self, kind: BlockKind, name: &str) -> Block {
        let mut block = Block::new(kind, name);
        self.pos += 1;

        // the field-definition line is the next non-blank, non-comment line
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();
            if line.is_empty() || line.starts_with('#') {
                self.pos += 1;
                continue;
            }
            break;
        }
        if self.pos >= self.lines.len() {
            return block;
        }
        for field in tokenize_line(self.lines[self.pos].trim()) {
            let (fname, hint) = parse_field_def(&field);
            block.add_field(fname, hint);
        }
        self.pos += 1;

        let mut in_summary = false;
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();
            // a blank line is consumed and ends the block
            if line.is_empty() {
                self.pos += 1;
                break;
            }
            if line.starts_with('#') {
                self.pos += 1;
                continue;
            }
            // a new block header is left for the outer loop
            if block_header(line).is_some() {
                break;
            }
            if line == "---" {
                in_summary = true;
                self.pos += 1;
                continue;
            }
            let tokens = tokenize_line(line);
            let row = zip_row(&block.fields, &tokens);
            if in_summary {
                block.summary_row = Some(row);
            } else {
                block.add_row(row);
            }
            self.pos += 1;
        }
        block
    }
}

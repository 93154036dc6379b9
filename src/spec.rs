//! ISON Format Specification
//!
//! This module documents the ISON text format as implemented by this
//! library. It contains no code.
//!
//! # Overview
//!
//! ISON is a line-oriented, typed, tabular serialization format. Data lives
//! in named blocks; each block declares its columns once and then lists one
//! record per line, which keeps repeated structures compact while staying
//! readable for both humans and machines. Records can point at each other
//! with inline reference tokens.
//!
//! File extension conventions: `.ison` for block documents, `.isonl` for the
//! streaming variant. Text is UTF-8; comments start with `#`.
//!
//! # Blocks
//!
//! A block opens with a `kind.name` header. Three kinds exist:
//!
//! | Kind | Meaning |
//! |------|---------|
//! | `table` | multi-row data |
//! | `object` | a single-row record |
//! | `meta` | a metadata row |
//!
//! The first non-blank line after the header declares the fields, each
//! optionally annotated with a type hint (`name:typeHint`):
//!
//! ```text
//! table.users
//! id:int name:string active:bool
//! 1 Alice true
//! 2 Bob false
//! ```
//!
//! Rows follow until a blank line, a new block header, or end of input.
//! Tokens are matched to fields positionally: a short row leaves trailing
//! fields absent (not null), and surplus tokens are discarded.
//!
//! Blocks are separated by blank lines. Lines that fit no rule (unknown
//! block kinds included) are skipped; parsing is tolerant by design and
//! never fails.
//!
//! # Values
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `~`, `null`, `NULL` | `~` |
//! | Boolean | `true`/`false` (any case of the upper forms) | `true` |
//! | Integer | decimal digits, optional sign | `-42` |
//! | Float | decimal with fraction or exponent | `3.14` |
//! | String | bare token or `"quoted"` | `Alice`, `"Alice Smith"` |
//! | Reference | leading `:` | `:user:42` |
//!
//! With no type hint, a token is inferred as integer, then float, then kept
//! as a string. Hints narrow this: `int`/`float` demand a strict numeric
//! parse (falling back to inference), `bool` additionally accepts `1`/`0`,
//! `string` suppresses inference entirely, and `ref` degrades to a string
//! when the token lacks reference syntax. Null, boolean, and reference
//! literals always win over hints.
//!
//! # Strings and escaping
//!
//! Strings containing a space, tab, newline, or quote, as well as blank
//! strings, are written quoted. Inside quotes:
//!
//! ```text
//! \"  - quote
//! \\  - backslash
//! \n  - newline
//! \t  - tab
//! ```
//!
//! Any other escaped character passes through literally. Outside quotes a
//! backslash is an ordinary character. Whitespace between tokens collapses,
//! so column-aligned padding does not change the decoded values.
//!
//! # References
//!
//! A reference token points at another record:
//!
//! ```text
//! :1          bare id
//! :user:42    id in the "user" namespace
//! :OWNS:5     id across an "OWNS" relationship (edge)
//! ```
//!
//! The qualifier is a relationship exactly when it is non-empty, uppercase
//! ASCII letters and underscores only; otherwise it is a namespace. Ids are
//! free-form strings, never parsed as numbers.
//!
//! # Summary rows
//!
//! A line of exactly `---` inside a block switches it to summary mode; the
//! following row is stored as the block's summary row, separate from the
//! data rows. If several rows follow, the last one wins:
//!
//! ```text
//! table.sales
//! region:string total:float
//! north 1250.5
//! south 980.0
//! ---
//! all 2230.5
//! ```
//!
//! # ISONL
//!
//! The streaming variant writes one self-describing row per line, with the
//! block header, the field list, and the row values separated by pipes:
//!
//! ```text
//! table.users|id:int name:string|1 Alice
//! table.users|id:int name:string|2 Bob
//! ```
//!
//! Because every line repeats the header, a stream can be appended to or
//! resumed mid-file. On parse, the first line seen for a block name fixes
//! its field list; header segments on later lines for that name are
//! discarded.
//!
//! # Comparison with JSON
//!
//! **JSON** (116 chars):
//!
//! ```json
//! [{"id":1,"name":"Alice","active":true},
//!  {"id":2,"name":"Bob","active":false}]
//! ```
//!
//! **ISON** (58 chars):
//!
//! ```text
//! table.users
//! id:int name:string active:bool
//! 1 Alice true
//! 2 Bob false
//! ```
//!
//! # Limitations
//!
//! - Field names are unique within a block; duplicate declarations collapse
//!   to the last value per row
//! - Cell values are scalars; nested structures must be flattened or
//!   stringified at the boundary
//! - An encoded empty string (`""`) produces no token and decodes as an
//!   absent field

// This module contains only documentation; no implementation code

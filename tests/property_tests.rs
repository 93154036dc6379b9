//! Property-based tests - pragmatic roundtrip guarantees over generated
//! inputs, complementing the example-driven integration tests.

use ison::{dumps, parse, tokenize_line, Block, BlockKind, Document, Row, Value};
use proptest::prelude::*;

/// One-column table document holding the given values.
fn column_doc(values: &[Value], type_hint: &str) -> Document {
    let mut block = Block::new(BlockKind::Table, "data");
    block.add_field("v", type_hint);
    for value in values {
        let mut row = Row::new();
        row.insert("v".to_string(), value.clone());
        block.add_row(row);
    }
    let mut doc = Document::new();
    doc.add_block(block);
    doc
}

fn roundtrip_column(values: Vec<Value>, type_hint: &str) -> bool {
    let doc = column_doc(&values, type_hint);
    let back = parse(&dumps(&doc));
    let block = back.get("data").expect("block survives the roundtrip");
    block.rows.len() == values.len()
        && block
            .rows
            .iter()
            .zip(&values)
            .all(|(row, value)| row.get("v") == Some(value))
}

/// Strings that stay strings through decoding: no reserved literals, no
/// reference syntax, no numeric shape (they start with a letter).
fn plain_string() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_ ]{0,15}".prop_filter("reserved literal", |s| {
        !matches!(
            s.as_str(),
            "true" | "TRUE" | "false" | "FALSE" | "null" | "NULL"
        )
    })
}

proptest! {
    #[test]
    fn prop_int_roundtrip(values in prop::collection::vec(any::<i64>(), 1..20)) {
        let values: Vec<Value> = values.into_iter().map(Value::Int).collect();
        prop_assert!(roundtrip_column(values, "int"));
    }

    #[test]
    fn prop_float_roundtrip(values in prop::collection::vec(
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        1..20,
    )) {
        let values: Vec<Value> = values.into_iter().map(Value::Float).collect();
        prop_assert!(roundtrip_column(values, "float"));
    }

    #[test]
    fn prop_bool_roundtrip(values in prop::collection::vec(any::<bool>(), 1..20)) {
        let values: Vec<Value> = values.into_iter().map(Value::Bool).collect();
        prop_assert!(roundtrip_column(values, "bool"));
    }

    #[test]
    fn prop_string_roundtrip(values in prop::collection::vec(plain_string(), 1..20)) {
        let values: Vec<Value> = values.into_iter().map(Value::String).collect();
        prop_assert!(roundtrip_column(values, "string"));
    }

    #[test]
    fn prop_escaping_roundtrip(s in "[ -~\n\t]{1,24}") {
        // every non-empty printable string survives encode → tokenize
        let token = Value::from(s.clone()).to_ison();
        prop_assert_eq!(tokenize_line(&token), vec![s]);
    }

    #[test]
    fn prop_tokenizer_joins(tokens in prop::collection::vec("[a-zA-Z0-9_.:@-]{1,12}", 0..10)) {
        let line = tokens.join(" ");
        prop_assert_eq!(tokenize_line(&line), tokens);
    }

    #[test]
    fn prop_isonl_matches_canonical(values in prop::collection::vec(any::<i64>(), 1..10)) {
        let values: Vec<Value> = values.into_iter().map(Value::Int).collect();
        let doc = column_doc(&values, "int");
        let streamed = ison::parse_isonl(&ison::dumps_isonl(&doc));
        prop_assert_eq!(
            streamed.get("data").unwrap().rows.clone(),
            doc.get("data").unwrap().rows.clone()
        );
    }
}

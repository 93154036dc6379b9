use ison::{
    dumps, dumps_isonl, from_json, parse, parse_isonl, to_json, Block, BlockKind, Document,
    Reference, Row, Value,
};

fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn test_parse_simple_table() {
    let doc = parse(
        "\ntable.users\nid name email\n1 Alice alice@example.com\n2 Bob bob@example.com\n",
    );
    let block = doc.get("users").unwrap();
    assert_eq!(block.kind, BlockKind::Table);
    assert_eq!(block.name, "users");
    assert_eq!(block.fields.len(), 3);
    assert_eq!(block.rows.len(), 2);
    assert_eq!(block.rows[0]["id"].as_int(), Some(1));
    assert_eq!(block.rows[0]["name"].as_str(), Some("Alice"));
}

#[test]
fn test_parse_typed_fields() {
    let doc = parse(
        "\ntable.users\nid:int name:string active:bool score:float\n1 Alice true 95.5\n2 Bob false 82.0\n",
    );
    let block = doc.get("users").unwrap();
    assert_eq!(block.fields[0].type_hint, "int");
    assert_eq!(block.fields[1].type_hint, "string");
    assert_eq!(block.fields[2].type_hint, "bool");
    assert_eq!(block.fields[3].type_hint, "float");

    let first = &block.rows[0];
    assert_eq!(first["id"].as_int(), Some(1));
    assert_eq!(first["active"].as_bool(), Some(true));
    assert_eq!(first["score"].as_float(), Some(95.5));
    assert_eq!(block.rows[1]["score"].as_float(), Some(82.0));
}

#[test]
fn test_parse_quoted_strings() {
    let doc = parse(
        "table.users\nid name email\n1 \"Alice Smith\" alice@example.com\n2 \"Bob \\\"The Builder\\\" Jones\" bob@example.com\n",
    );
    let block = doc.get("users").unwrap();
    assert_eq!(block.rows[0]["name"].as_str(), Some("Alice Smith"));
    assert_eq!(
        block.rows[1]["name"].as_str(),
        Some("Bob \"The Builder\" Jones")
    );
}

#[test]
fn test_parse_null_values() {
    let doc = parse("table.users\nid name email\n1 Alice ~\n2 ~ null\n3 Charlie NULL\n");
    let block = doc.get("users").unwrap();
    assert!(block.rows[0]["email"].is_null());
    assert!(block.rows[1]["name"].is_null());
    assert!(block.rows[1]["email"].is_null());
    assert!(block.rows[2]["email"].is_null());
}

#[test]
fn test_parse_references() {
    let doc = parse("table.orders\nid user_id product\n1 :1 Widget\n2 :user:42 Gadget\n3 :OWNS:5 Gizmo\n");
    let block = doc.get("orders").unwrap();

    let bare = block.rows[0]["user_id"].as_reference().unwrap();
    assert_eq!(bare.id, "1");
    assert_eq!(bare.namespace, "");
    assert_eq!(bare.to_ison(), ":1");

    let namespaced = block.rows[1]["user_id"].as_reference().unwrap();
    assert_eq!(namespaced.id, "42");
    assert_eq!(namespaced.namespace, "user");

    let related = block.rows[2]["user_id"].as_reference().unwrap();
    assert_eq!(related.id, "5");
    assert_eq!(related.relationship, "OWNS");
    assert!(related.is_relationship());
}

#[test]
fn test_parse_object_block() {
    let doc = parse("object.config\nkey value\ndebug true\ntimeout 30\n");
    let block = doc.get("config").unwrap();
    assert_eq!(block.kind, BlockKind::Object);
    assert_eq!(block.rows.len(), 2);
}

#[test]
fn test_parse_multiple_blocks() {
    let doc = parse(
        "table.users\nid name\n1 Alice\n\ntable.orders\nid user_id\nO1 :1\n\nobject.meta\nversion 1.0\n",
    );
    assert_eq!(doc.len(), 3);
    assert_eq!(
        doc.order().collect::<Vec<_>>(),
        vec!["users", "orders", "meta"]
    );
}

#[test]
fn test_parse_summary_row() {
    let doc = parse("table.sales\nproduct amount\nWidget 100\nGadget 200\n---\ntotal 300\n");
    let block = doc.get("sales").unwrap();
    assert_eq!(block.rows.len(), 2);
    let summary = block.summary_row.as_ref().unwrap();
    assert_eq!(summary["amount"].as_int(), Some(300));
}

#[test]
fn test_parse_comments() {
    let doc = parse(
        "# leading comment\ntable.users\n# field definitions\nid name\n# first\n1 Alice\n# second\n2 Bob\n",
    );
    assert_eq!(doc.get("users").unwrap().rows.len(), 2);
}

#[test]
fn test_dumps_basic() {
    let mut block = Block::new(BlockKind::Table, "users");
    block.add_field("id", "int");
    block.add_field("name", "string");
    block.add_row(row(&[("id", Value::Int(1)), ("name", Value::from("Alice"))]));
    block.add_row(row(&[("id", Value::Int(2)), ("name", Value::from("Bob"))]));
    let mut doc = Document::new();
    doc.add_block(block);

    let output = dumps(&doc);
    assert!(output.contains("table.users"));
    assert!(output.contains("id:int name:string"));
    assert!(output.contains("1 Alice"));
    assert!(output.contains("2 Bob"));
}

#[test]
fn test_roundtrip_preserves_values() {
    let input = "table.users\nid:int name:string active:bool\n1 Alice true\n2 Bob false\n";
    let doc = parse(input);
    let doc2 = parse(&dumps(&doc));

    let before = doc.get("users").unwrap();
    let after = doc2.get("users").unwrap();
    assert_eq!(before.rows.len(), after.rows.len());
    for (a, b) in before.rows.iter().zip(&after.rows) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_escaping_roundtrip() {
    let mut block = Block::new(BlockKind::Table, "notes");
    block.add_field("text", "string");
    for s in ["line1\nline2", "tab\there", "say \"hi\"", "back\\slash"] {
        block.add_row(row(&[("text", Value::from(s))]));
    }
    let mut doc = Document::new();
    doc.add_block(block);

    let doc2 = parse(&dumps(&doc));
    let notes = doc2.get("notes").unwrap();
    assert_eq!(notes.rows[0]["text"].as_str(), Some("line1\nline2"));
    assert_eq!(notes.rows[1]["text"].as_str(), Some("tab\there"));
    assert_eq!(notes.rows[2]["text"].as_str(), Some("say \"hi\""));
    assert_eq!(notes.rows[3]["text"].as_str(), Some("back\\slash"));
}

#[test]
fn test_dumps_isonl_lines() {
    let mut block = Block::new(BlockKind::Table, "users");
    block.add_field("id", "int");
    block.add_field("name", "string");
    block.add_row(row(&[("id", Value::Int(1)), ("name", Value::from("Alice"))]));
    block.add_row(row(&[("id", Value::Int(2)), ("name", Value::from("Bob"))]));
    let mut doc = Document::new();
    doc.add_block(block);

    let output = dumps_isonl(&doc);
    let lines: Vec<&str> = output.trim().split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "table.users|id:int name:string|1 Alice");
    assert_eq!(lines[1], "table.users|id:int name:string|2 Bob");
}

#[test]
fn test_parse_isonl_groups_blocks() {
    let input = "table.users|id:int name:string|1 Alice\ntable.users|id:int name:string|2 Bob\ntable.orders|id product|O1 Widget";
    let doc = parse_isonl(input);
    assert_eq!(doc.get("users").unwrap().rows.len(), 2);
    assert_eq!(doc.get("orders").unwrap().rows.len(), 1);
    assert_eq!(doc.get("orders").unwrap().rows[0]["id"].as_str(), Some("O1"));
}

#[test]
fn test_isonl_roundtrip() {
    let input = "table.users\nid:int name:string\n1 Alice\n2 Bob\n";
    let doc = parse(input);
    let doc2 = parse_isonl(&dumps_isonl(&doc));
    assert_eq!(doc.get("users").unwrap().rows, doc2.get("users").unwrap().rows);
}

#[test]
fn test_to_json() {
    let json_text =
        to_json("table.users\nid:int name:string active:bool\n1 Alice true\n2 Bob false\n")
            .unwrap();
    let data: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    let users = data["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[0]["name"], "Alice");
    assert_eq!(users[0]["active"], true);
}

#[test]
fn test_from_json() {
    let doc = from_json(
        r#"{"users": [{"id": 1, "name": "Alice", "active": true}, {"id": 2, "name": "Bob", "active": false}]}"#,
    )
    .unwrap();
    let block = doc.get("users").unwrap();
    assert_eq!(block.rows.len(), 2);
    assert_eq!(block.rows[0]["id"].as_int(), Some(1));
}

#[test]
fn test_block_replacement_keeps_order() {
    let mut doc = parse("table.a\nx\n1\n\ntable.b\ny\n2\n");
    let mut replacement = Block::new(BlockKind::Table, "a");
    replacement.add_field("x", "int");
    doc.add_block(replacement);
    assert_eq!(doc.order().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(doc.get("a").unwrap().rows.is_empty());
}

#[test]
fn test_load_and_dump_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.ison");

    let doc = parse("table.users\nid:int name:string\n1 Alice\n");
    ison::dump(&doc, &path).unwrap();
    let loaded = ison::load(&path).unwrap();
    assert_eq!(loaded, doc);

    let isonl_path = dir.path().join("users.isonl");
    ison::dump_isonl(&doc, &isonl_path).unwrap();
    let streamed = ison::load_isonl(&isonl_path).unwrap();
    assert_eq!(streamed.get("users").unwrap().rows, doc.get("users").unwrap().rows);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = ison::load("definitely-not-here.ison").unwrap_err();
    assert!(matches!(err, ison::Error::Io(_)));
}

#[test]
fn test_reference_ns_or_rel() {
    assert_eq!(Reference::new("1").ns_or_rel(), "");
    assert_eq!(Reference::namespaced("user", "1").ns_or_rel(), "user");
    assert_eq!(Reference::related("OWNS", "1").ns_or_rel(), "OWNS");
}

#[test]
fn test_document_to_dict() {
    let doc = parse("table.users\nid:int name:string\n1 Alice\n");
    let dict = doc.to_dict();
    assert_eq!(dict["users"]["kind"], "table");
    assert_eq!(dict["users"]["fields"][0]["name"], "id");
    assert_eq!(dict["users"]["fields"][0]["typeHint"], "int");
    assert_eq!(dict["users"]["rows"][0]["id"], 1);
}

#[test]
fn test_meta_block() {
    let doc = parse("meta.info\nversion generated\n1.0 2024-01-01\n");
    let block = doc.get("info").unwrap();
    assert_eq!(block.kind, BlockKind::Meta);
    assert_eq!(block.rows[0]["version"].as_float(), Some(1.0));
}

use kyaml::{dump, kyaml, load, Decoder, Encoder, Error, ParseErrorKind, Value};

fn encode(value: &Value) -> String {
    Encoder::new().encode(value).unwrap()
}

fn decode(input: &str) -> Value {
    Decoder::new(input).decode().unwrap()
}

fn decode_err(input: &str) -> kyaml::ParseError {
    match Decoder::new(input).decode() {
        Err(Error::Parse(err)) => err,
        other => panic!("expected parse error for {:?}, got {:?}", input, other),
    }
}

#[test]
fn test_encode_strings() {
    assert_eq!(encode(&kyaml!("hello")), "\"hello\"");
    assert_eq!(encode(&kyaml!("say \"hi\"")), "\"say \\\"hi\\\"\"");
    assert_eq!(encode(&kyaml!("back\\slash")), "\"back\\\\slash\"");
    assert_eq!(encode(&kyaml!("line1\nline2")), "\"line1\\nline2\"");
    assert_eq!(encode(&kyaml!("col1\tcol2")), "\"col1\\tcol2\"");
    assert_eq!(encode(&kyaml!("")), "\"\"");
}

#[test]
fn test_encode_numbers() {
    assert_eq!(encode(&Value::Int(42)), "42");
    assert_eq!(encode(&Value::Int(-7)), "-7");
    assert_eq!(encode(&Value::Int(0)), "0");
    assert_eq!(encode(&Value::Float(3.25)), "3.25");
    assert_eq!(encode(&Value::Float(-0.5)), "-0.5");
    assert_eq!(encode(&Value::Float(2.0)), "2.0");
}

#[test]
fn test_encode_mappings() {
    assert_eq!(encode(&kyaml!({})), "{}");
    assert_eq!(
        encode(&kyaml!({"name": "alice", "age": 30})),
        "{\n  name: \"alice\",\n  age: 30,\n}"
    );
    assert_eq!(
        encode(&kyaml!({"s": "hi", "i": 1, "f": 2.5, "b": true, "n": null})),
        "{\n  s: \"hi\",\n  i: 1,\n  f: 2.5,\n  b: true,\n  n: null,\n}"
    );
}

#[test]
fn test_encode_nesting() {
    assert_eq!(
        encode(&kyaml!({"a": {"b": {"c": "deep"}}})),
        "{\n  a: {\n    b: {\n      c: \"deep\",\n    },\n  },\n}"
    );
    assert_eq!(
        encode(&kyaml!({"items": ["a", "b"]})),
        "{\n  items: [\n    \"a\",\n    \"b\",\n  ],\n}"
    );
    assert_eq!(
        encode(&kyaml!([["a", "b"], ["c"]])),
        "[\n  [\n    \"a\",\n    \"b\",\n  ],\n  [\n    \"c\",\n  ],\n]"
    );
}

#[test]
fn test_encode_cuddles_only_all_mapping_sequences() {
    assert_eq!(
        encode(&kyaml!([{"name": "a"}, {"name": "b"}])),
        "[{\n  name: \"a\",\n}, {\n  name: \"b\",\n}]"
    );
    assert_eq!(encode(&kyaml!([{"a": 1}])), "[{\n  a: 1,\n}]");
    assert_eq!(
        encode(&kyaml!(["x", {"name": "y"}])),
        "[\n  \"x\",\n  {\n    name: \"y\",\n  },\n]"
    );
}

#[test]
fn test_key_quoting() {
    for key in ["apiVersion", "app", "foo-bar", "kubernetes.io/name", "metadata"] {
        let mut map = kyaml::Mapping::new();
        map.insert(key.to_string(), Value::from("v"));
        let text = encode(&Value::Mapping(map));
        assert!(text.contains(&format!("{}: \"v\"", key)), "{} should be bare", key);
    }

    let quoted = [
        "true", "false", "yes", "no", "on", "off", "null", "42", "3.14", "0x1A", "0o77", "0b101",
        "1_000", "-5", "+3", ".5", "1e10", "1.2e-3", "has space", "key: val", "a{b", "a}b", "a[b",
        "a]b", "",
    ];
    for key in quoted {
        let mut map = kyaml::Mapping::new();
        map.insert(key.to_string(), Value::from("v"));
        let text = encode(&Value::Mapping(map));
        assert!(
            text.contains(&format!("\"{}\": \"v\"", key)),
            "{:?} should be quoted in {:?}",
            key,
            text
        );
    }
}

#[test]
fn test_encode_folds_multi_line_strings() {
    assert_eq!(
        encode(&kyaml!("This\nis a\nmulti-line string")),
        "\"\\n This\\n\\n is a\\n\\n multi-line string\\n\""
    );
    assert_eq!(
        encode(&kyaml!("this:\n  is:\n  - embedded")),
        "\"\\n this:\\n\\n\\  is:\\n\\n\\  - embedded\\n\""
    );
    assert_eq!(
        encode(&kyaml!("line1\nline2\n")),
        "\"\\n line1\\n\\n line2\\n\\n\\n\""
    );
}

#[test]
fn test_encode_single_newline_stays_inline() {
    assert_eq!(encode(&kyaml!("no newlines here")), "\"no newlines here\"");
    assert_eq!(encode(&kyaml!("\n")), "\"\\n\"");
    assert_eq!(encode(&kyaml!("hello\n")), "\"hello\\n\"");
}

#[test]
fn test_dump_documents() {
    assert_eq!(dump(&kyaml!("hello")).unwrap(), "---\n\"hello\"\n");
    assert_eq!(dump(&Value::Null).unwrap(), "---\nnull\n");

    let text = dump(&kyaml!({"name": "app"})).unwrap();
    assert!(text.starts_with("---\n{"));
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_decode_scalars() {
    assert_eq!(decode("---\nnull\n"), Value::Null);
    assert_eq!(decode("---\ntrue\n"), Value::Bool(true));
    assert_eq!(decode("---\nfalse\n"), Value::Bool(false));
    assert_eq!(decode("---\n0\n"), Value::Int(0));
    assert_eq!(decode("---\n-7\n"), Value::Int(-7));
    assert_eq!(decode("---\n-0.5\n"), Value::Float(-0.5));
    assert_eq!(decode("---\n\"line1\\nline2\"\n"), kyaml!("line1\nline2"));
}

#[test]
fn test_decode_collections() {
    assert_eq!(
        decode("---\n{\n  \"true\": \"v\",\n  \"42\": \"v\",\n}\n"),
        kyaml!({"true": "v", "42": "v"})
    );
    assert_eq!(
        decode("---\n[\n  \"hi\",\n  1,\n  true,\n  null,\n]\n"),
        kyaml!(["hi", 1, true, null])
    );
    assert_eq!(
        decode("---\n[{\n  name: \"a\",\n}, {\n  name: \"b\",\n}]\n"),
        kyaml!([{"name": "a"}, {"name": "b"}])
    );
    assert_eq!(
        decode("---\n[\n  \"x\",\n  {\n    name: \"y\",\n  },\n]\n"),
        kyaml!(["x", {"name": "y"}])
    );
}

#[test]
fn test_decode_unfolds_multi_line_strings() {
    assert_eq!(
        decode("---\n\"\\n This\\n\\n is a\\n\\n multi-line string\\n\"\n"),
        kyaml!("This\nis a\nmulti-line string")
    );
    assert_eq!(
        decode("---\n\"\\n this:\\n\\n\\  is:\\n\\n\\  - embedded\\n\"\n"),
        kyaml!("this:\n  is:\n  - embedded")
    );
    assert_eq!(
        decode("---\n\"\\n line1\\n\\n line2\\n\\n\\n\"\n"),
        kyaml!("line1\nline2\n")
    );
    assert_eq!(decode("---\n\"\\n\"\n"), kyaml!("\n"));
    assert_eq!(decode("---\n\"hello\\n\"\n"), kyaml!("hello\n"));
}

#[test]
fn test_round_trip_symmetry() {
    let values = vec![
        Value::Null,
        kyaml!(true),
        kyaml!(false),
        kyaml!(42),
        kyaml!(-7),
        kyaml!(3.25),
        kyaml!(-0.5),
        kyaml!(1.0),
        kyaml!("say \"hi\""),
        kyaml!("back\\slash"),
        kyaml!("col1\tcol2"),
        kyaml!({"s": "hi", "i": 1, "f": 2.5, "b": true, "n": null}),
        kyaml!([[], {}, [{}]]),
        kyaml!([{"name": "a"}, {"name": "b"}]),
        kyaml!("This\nis a\nmulti-line string"),
        kyaml!("this:\n  is:\n  - embedded"),
        kyaml!("a\n\tindented\n"),
        kyaml!("\n\n"),
        kyaml!({"": 1, "yes": 2, "1e3": 3, "key: val": "x"}),
    ];

    for value in values {
        let text = dump(&value).unwrap();
        assert_eq!(load(&text).unwrap(), value, "document was {:?}", text);
    }
}

#[test]
fn test_errors() {
    let err = decode_err("null\n");
    assert_eq!(err.kind, ParseErrorKind::MissingPrefix);
    assert!(err.to_string().contains("expected \"---\\n\""));

    let err = decode_err("---\n@\n");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
    assert_eq!(err.to_string(), "unexpected character: '@' at position 4");

    let err = decode_err("---\nnull garbage\n");
    assert!(err.message.contains("unexpected content"));

    assert_eq!(
        decode_err("---\n\"hello\n").kind,
        ParseErrorKind::UnterminatedString
    );
    assert_eq!(
        decode_err("---\n{\n  a: 1,\n\n").kind,
        ParseErrorKind::UnexpectedEof
    );
    assert_eq!(
        decode_err("---\n[\n  1,\n\n").kind,
        ParseErrorKind::UnexpectedEof
    );
}

#[test]
fn test_separator_rules() {
    let err = decode_err("---\n{a: 1}\n");
    assert_eq!(err.kind, ParseErrorKind::ExpectedKey);
    assert_eq!(err.position, 9);

    assert_eq!(decode("---\n{a: 1, b: 2,}\n"), kyaml!({"a": 1, "b": 2}));
    assert_eq!(decode("---\n{a: 1 b: 2,}\n"), kyaml!({"a": 1, "b": 2}));
    assert_eq!(decode("---\n[1 2]\n"), kyaml!([1, 2]));
    assert_eq!(decode("---\n[1, 2]\n"), kyaml!([1, 2]));
    assert_eq!(decode("---\n[1, 2,]\n"), kyaml!([1, 2]));
}

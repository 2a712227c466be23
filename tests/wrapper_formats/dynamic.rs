//! Dyn Tests
//!
//! JSON and BSON behaviour of dynamic payloads embedded in records.

use crate::*;
use bson::{doc, Bson, Document};
use typx::{ElementType, Map};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Envelope {
    payload: Dyn,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct StoredEnvelope {
    #[serde(with = "typx::dynamic::bson")]
    payload: Dyn,
}

fn nested_document() -> Document {
    doc! {
        "name": "test",
        "nested": {
            "value": 42,
            "items": ["a", "b", "c"],
        },
    }
}

fn nested_value() -> Value {
    let mut nested = Map::new();
    nested.insert(
        "items".to_string(),
        Value::Array(vec![Value::from("a"), Value::from("b"), Value::from("c")]),
    );
    nested.insert("value".to_string(), Value::Int(42));

    let mut root = Map::new();
    root.insert("name".to_string(), Value::from("test"));
    root.insert("nested".to_string(), Value::Object(nested));
    Value::Object(root)
}

// =============================================================================
// JSON TESTS
// =============================================================================

#[test]
fn test_missing_field_is_null_payload() {
    let e: Envelope = serde_json::from_str("{}").unwrap();
    assert!(e.payload.is_null());
}

#[test]
fn test_explicit_null_is_null_payload() {
    let e: Envelope = serde_json::from_str(r#"{"payload":null}"#).unwrap();
    assert!(e.payload.is_null());
}

#[test]
fn test_nested_json_decodes_canonical() {
    let json = r#"{"payload":{"name":"test","nested":{"value":42,"items":["a","b","c"]}}}"#;
    let e: Envelope = serde_json::from_str(json).unwrap();
    assert_eq!(e.payload.value, nested_value());
}

#[test]
fn test_envelope_json_round_trip() {
    let e = Envelope {
        payload: Dyn::new(nested_value()),
    };
    let json = serde_json::to_string(&e).unwrap();
    assert_eq!(
        json,
        r#"{"payload":{"name":"test","nested":{"items":["a","b","c"],"value":42}}}"#
    );
    assert_eq!(serde_json::from_str::<Envelope>(&json).unwrap(), e);
}

// =============================================================================
// BSON TESTS
// =============================================================================

#[test]
fn test_nested_bson_normalizes() {
    init_tracing();
    let d = Dyn::from_bson(Bson::Document(nested_document()));
    assert_eq!(d.value, nested_value());
}

#[test]
fn test_embedded_document_element_normalizes() {
    let mut bytes = Vec::new();
    nested_document().to_writer(&mut bytes).unwrap();

    let d = Dyn::from_bson_value(ElementType::EmbeddedDocument, &bytes).unwrap();
    assert_eq!(d.value, nested_value());
}

#[test]
fn test_object_element_round_trip() {
    let d = Dyn::new(nested_value());
    let (kind, bytes) = d.to_bson_value().unwrap();
    assert_eq!(kind, ElementType::EmbeddedDocument);
    assert_eq!(Dyn::from_bson_value(kind, &bytes).unwrap(), d);
}

#[test]
fn test_array_element_round_trip() {
    let d = Dyn::new(vec![Value::Int(1), Value::from("two"), Value::Bool(true)]);
    let (kind, bytes) = d.to_bson_value().unwrap();
    assert_eq!(kind, ElementType::Array);
    assert_eq!(Dyn::from_bson_value(kind, &bytes).unwrap(), d);
}

#[test]
fn test_null_payload_fails_bson_but_not_json() {
    assert!(Dyn::null().to_bson_value().is_err());
    assert_eq!(Dyn::null().to_json().unwrap(), b"null".to_vec());
}

#[test]
fn test_object_id_survives_as_opaque() {
    let id = bson::oid::ObjectId::new();
    let d = Dyn::from_bson(Bson::ObjectId(id));
    assert_eq!(d.value.downcast_ref::<Bson>(), Some(&Bson::ObjectId(id)));

    let (kind, _) = d.to_bson_value().unwrap();
    assert_eq!(kind, ElementType::ObjectId);
}

#[test]
fn test_record_field_normalizes_like_element() {
    let id = bson::oid::ObjectId::new();
    let original = doc! { "payload": { "id": id, "n": 7i32 } };

    let e: StoredEnvelope = bson::from_document(original.clone()).unwrap();
    let mut expected = Map::new();
    expected.insert("id".to_string(), Value::Opaque(Opaque::new(Bson::ObjectId(id))));
    expected.insert("n".to_string(), Value::Int(7));
    assert_eq!(e.payload.value, Value::Object(expected));

    let encoded = bson::to_document(&e).unwrap();
    let payload = encoded.get_document("payload").unwrap();
    assert_eq!(payload.get("n"), Some(&Bson::Int32(7)));
    assert_eq!(payload.get("id"), Some(&Bson::ObjectId(id)));
}

#[test]
fn test_record_field_nested_documents() {
    let e: StoredEnvelope = bson::from_document(doc! { "payload": nested_document() }).unwrap();
    assert_eq!(e.payload.value, nested_value());
    assert_eq!(
        bson::to_document(&e).unwrap(),
        doc! { "payload": {
            "name": "test",
            "nested": { "items": ["a", "b", "c"], "value": 42 },
        } }
    );
}

// =============================================================================
// NESTING TESTS
// =============================================================================

#[test]
fn test_dyn_wraps_dyn() {
    let inner = Dyn::new("example");
    let outer = Dyn::opaque(inner.clone());

    assert_eq!(outer.value.downcast_ref::<Dyn>(), Some(&inner));
    assert_eq!(outer.to_json().unwrap(), br#""example""#.to_vec());
}

#[test]
fn test_nested_dyn_decodes_flat() {
    let outer = Dyn::opaque(Dyn::new(nested_value()));
    let json = outer.to_json().unwrap();
    assert_eq!(Dyn::from_json(&json).unwrap().value, nested_value());
}

#[test]
fn test_dyn_wraps_nullable() {
    let d = Dyn::opaque(Nullable::<String>::absent());
    assert_eq!(d.to_json().unwrap(), b"null".to_vec());

    let id = uuid::Uuid::new_v4();
    let mut d = Dyn::new(Opaque::builder(Nullable::new(id)).binary().build());
    assert_eq!(d.marshal_binary().unwrap(), id.as_bytes().to_vec());

    d.unmarshal_binary(&[]).unwrap();
    assert_eq!(
        d.value.downcast_ref::<Nullable<uuid::Uuid>>(),
        Some(&Nullable::absent())
    );
}

//! Nullable Tests
//!
//! Nullable fields inside records, across JSON, BSON, bincode, MessagePack
//! and the binary / text capabilities.

use crate::*;
use bson::Bson;
use typx::ElementType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
struct Account {
    #[serde(default)]
    id: Nullable<Uuid>,
    #[serde(default)]
    name: Nullable<String>,
    #[serde(default)]
    age: Nullable<i64>,
}

// =============================================================================
// JSON TESTS
// =============================================================================

#[test]
fn test_null_field_is_absent() {
    let r: Record = serde_json::from_str(r#"{"field":null}"#).unwrap();
    assert!(r.field.is_absent());
}

#[test]
fn test_missing_field_is_absent() {
    let r: Record = serde_json::from_str("{}").unwrap();
    assert!(r.field.is_absent());
}

#[test]
fn test_string_field_is_present() {
    let r: Record = serde_json::from_str(r#"{"field":"example"}"#).unwrap();
    assert_eq!(r, Record::with("example"));
}

#[test]
fn test_absent_field_encodes_null() {
    let json = serde_json::to_string(&Record::default()).unwrap();
    assert_eq!(json, r#"{"field":null}"#);
}

#[test]
fn test_empty_string_is_not_absent_in_json() {
    let json = serde_json::to_string(&Record::with("")).unwrap();
    assert_eq!(json, r#"{"field":""}"#);
    assert_eq!(serde_json::from_str::<Record>(&json).unwrap(), Record::with(""));
}

// =============================================================================
// BSON TESTS
// =============================================================================

#[test]
fn test_account_document_round_trip() {
    let account = Account {
        id: Nullable::new(Uuid::new_v4()),
        name: Nullable::absent(),
        age: Nullable::new(31),
    };
    let doc = bson::to_document(&account).unwrap();
    assert_eq!(doc.get("name"), Some(&Bson::Null));
    assert_eq!(bson::from_document::<Account>(doc).unwrap(), account);
}

#[test]
fn test_field_element_matches_document_encoding() {
    let r = Record::with("example");
    let doc = bson::to_document(&r).unwrap();

    let (kind, bytes) = r.field.to_bson_value().unwrap();
    assert_eq!(kind, doc.get("field").unwrap().element_type());
    assert_eq!(
        Nullable::<String>::from_bson(doc.get("field").unwrap().clone()).unwrap(),
        Nullable::<String>::from_bson_value(kind, &bytes).unwrap()
    );
}

#[test]
fn test_null_element_resets_present_value() {
    let mut n = Nullable::new(5i64);
    assert!(n.is_present());
    n = Nullable::from_bson_value(ElementType::Null, &[]).unwrap();
    assert!(n.is_absent());
}

#[test]
fn test_wrong_element_kind_is_codec_error() {
    let (kind, bytes) = Nullable::new("example".to_string()).to_bson_value().unwrap();
    let err = Nullable::<i64>::from_bson_value(kind, &bytes).unwrap_err();
    assert!(err.is_codec());
}

// =============================================================================
// OTHER SERDE CODECS
// =============================================================================

#[test]
fn test_bincode_round_trip() {
    let accounts = vec![
        Account::default(),
        Account {
            id: Nullable::new(Uuid::new_v4()),
            name: Nullable::new("example".to_string()),
            age: Nullable::absent(),
        },
    ];
    for account in accounts {
        let bytes = bincode::serialize(&account).unwrap();
        assert_eq!(bincode::deserialize::<Account>(&bytes).unwrap(), account);
    }
}

#[test]
fn test_msgpack_round_trip() {
    let accounts = vec![
        Account::default(),
        Account {
            id: Nullable::absent(),
            name: Nullable::new("example".to_string()),
            age: Nullable::new(-4),
        },
    ];
    for account in accounts {
        let bytes = rmp_serde::to_vec(&account).unwrap();
        assert_eq!(rmp_serde::from_slice::<Account>(&bytes).unwrap(), account);
    }
}

// =============================================================================
// CAPABILITY TESTS
// =============================================================================

#[test]
fn test_uuid_binary_round_trip() {
    let id = Nullable::new(Uuid::new_v4());
    let bytes = id.marshal_binary().unwrap();
    assert_eq!(bytes.len(), 16);

    let mut decoded = Nullable::<Uuid>::absent();
    decoded.unmarshal_binary(&bytes).unwrap();
    assert_eq!(decoded, id);
}

#[test]
fn test_bad_uuid_text_leaves_absent() {
    init_tracing();
    let mut n = Nullable::new(Uuid::new_v4());
    let err = n.unmarshal_text(b"not-a-uuid").unwrap_err();
    assert!(err.is_codec());
    assert!(n.is_absent());
}

#[test]
fn test_absent_text_round_trip() {
    let text = Nullable::<Uuid>::absent().marshal_text().unwrap();
    let mut n = Nullable::new(Uuid::new_v4());
    n.unmarshal_text(&text).unwrap();
    assert!(n.is_absent());
}

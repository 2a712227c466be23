//! Property Tests
//!
//! Round trips over generated payloads, plus the null form of every format.

use crate::*;
use proptest::prelude::*;
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue};
use typx::ElementType;

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

#[test]
fn test_absent_is_null_in_every_format() {
    let n = Nullable::<String>::absent();

    assert_eq!(n.to_json().unwrap(), b"null".to_vec());
    assert_eq!(n.to_bson_value().unwrap(), (ElementType::Null, Vec::new()));
    assert_eq!(n.to_sql().unwrap(), ToSqlOutput::Owned(SqlValue::Null));
    assert!(n.marshal_binary().unwrap().is_empty());
    assert_eq!(n.marshal_text().unwrap(), b"null".to_vec());
}

proptest! {
    #[test]
    fn prop_nullable_int_json(v in any::<Option<i64>>()) {
        let n = Nullable::from(v);
        let back = Nullable::<i64>::from_json(&n.to_json().unwrap()).unwrap();
        prop_assert_eq!(back, n);
    }

    #[test]
    fn prop_nullable_string_bson(v in proptest::option::of("\\PC{0,32}")) {
        let n = Nullable::from(v);
        let (kind, bytes) = n.to_bson_value().unwrap();
        prop_assert_eq!(Nullable::<String>::from_bson_value(kind, &bytes).unwrap(), n);
    }

    #[test]
    fn prop_nullable_string_text(s in any::<String>()) {
        prop_assume!(!s.is_empty() && s != "null");
        let n = Nullable::new(s);
        let mut back = Nullable::<String>::absent();
        back.unmarshal_text(&n.marshal_text().unwrap()).unwrap();
        prop_assert_eq!(back, n);
    }

    #[test]
    fn prop_nullable_bytes_binary(b in prop::collection::vec(any::<u8>(), 1..64)) {
        let n = Nullable::new(b);
        let mut back = Nullable::<Vec<u8>>::absent();
        back.unmarshal_binary(&n.marshal_binary().unwrap()).unwrap();
        prop_assert_eq!(back, n);
    }

    #[test]
    fn prop_dyn_json(v in value_strategy()) {
        let d = Dyn::new(v);
        prop_assert_eq!(Dyn::from_json(&d.to_json().unwrap()).unwrap(), d);
    }

    #[test]
    fn prop_dyn_bson(v in value_strategy()) {
        prop_assume!(!v.is_null());
        let d = Dyn::new(v);
        let (kind, bytes) = d.to_bson_value().unwrap();
        prop_assert_eq!(Dyn::from_bson_value(kind, &bytes).unwrap(), d);
    }

    #[test]
    fn prop_optional_json(v in any::<Option<i32>>()) {
        let o = Optional::from(v);
        let json = serde_json::to_vec(&o).unwrap();
        prop_assert_eq!(serde_json::from_slice::<Optional<i32>>(&json).unwrap(), o);
    }
}

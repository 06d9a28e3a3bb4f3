use proptest::collection::vec;
use proptest::prelude::*;
use qpack::{decode, encode, DecodeError, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-100i64..100).prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        prop_oneof![Just(-1.0), Just(0.0), Just(1.0)].prop_map(Value::Float),
        vec(any::<u8>(), 0..300).prop_map(Value::Bytes),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..8).prop_map(Value::Array),
            vec((inner.clone(), inner), 0..8).prop_map(Value::Map),
        ]
    })
}

fn int_len(int: i64) -> usize {
    if (-60..=63).contains(&int) {
        1
    } else if i8::try_from(int).is_ok() {
        2
    } else if i16::try_from(int).is_ok() {
        3
    } else if i32::try_from(int).is_ok() {
        5
    } else {
        9
    }
}

proptest! {
    #[test]
    fn roundtrip(v in value()) {
        let bin = encode(&v).unwrap();
        prop_assert_eq!(decode(&bin, 0).unwrap(), (v, bin.len()));
    }

    #[test]
    fn proper_prefixes_are_truncated(v in value()) {
        let bin = encode(&v).unwrap();
        for cut in 0..bin.len() {
            let truncated = matches!(
                decode(&bin[..cut], 0),
                Err(DecodeError::TruncatedInput { .. })
            );
            prop_assert!(truncated, "prefix {} of {:02x?}", cut, bin);
        }
    }

    #[test]
    fn integers_use_narrowest_width(int in any::<i64>()) {
        let bin = encode(&Value::Int(int)).unwrap();
        prop_assert_eq!(bin.len(), int_len(int));
    }

    #[test]
    fn decoding_arbitrary_bytes_never_overruns(bin in vec(any::<u8>(), 0..64)) {
        if let Ok((_, next)) = decode(&bin, 0) {
            prop_assert!(next <= bin.len());
        }
    }
}

// tests/codec_round_trip.rs

use std::collections::BTreeMap;

use proptest::prelude::*;
use shellstate::codec::{decode_output, encode_input};
use shellstate::types::{InputFormat, OutputFormat, RAW_KEY};

fn string_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-z][a-z0-9_]{0,8}", "[a-zA-Z0-9 _.-]{0,16}", 0..8)
}

proptest! {
    #[test]
    fn structured_formats_round_trip(values in string_map()) {
        for (input, output) in [
            (InputFormat::Json, OutputFormat::Json),
            (InputFormat::Yaml, OutputFormat::Yaml),
            (InputFormat::Toml, OutputFormat::Toml),
        ] {
            let bytes = encode_input(&input, &values);
            let decoded = decode_output(&output, &bytes).unwrap();
            prop_assert_eq!(decoded.as_ref(), Some(&values), "format {}", input);
        }
    }

    #[test]
    fn raw_format_passes_a_single_key_through(text in "[ -~\n]{0,64}") {
        let mut values = BTreeMap::new();
        values.insert(RAW_KEY.to_string(), text.clone());
        values.insert("ignored".to_string(), "x".to_string());

        let bytes = encode_input(&InputFormat::Raw, &values);
        prop_assert_eq!(&bytes, text.as_bytes());

        let decoded = decode_output(&OutputFormat::Raw, &bytes).unwrap().unwrap();
        prop_assert_eq!(decoded.len(), 1);
        prop_assert_eq!(&decoded[RAW_KEY], &text);
    }
}

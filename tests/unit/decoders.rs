//! KVP decoder behaviour as seen by a registry user.

use ows_dispatch::kvp::{
    BoundingBoxDecoder, ColorDecoder, EnumDecoder, IntegerDecoder, KvpDecoder, KvpParser,
    ListDecoder, ParameterKey, TimeDecoder,
};
use ows_dispatch::value::Color;
use ows_dispatch::{ExceptionCode, TypedValue};
use proptest::prelude::*;
use std::sync::Arc;

fn parser(key: &str, decoder: impl KvpDecoder + 'static) -> KvpParser {
    KvpParser::new(ParameterKey::global(key), Arc::new(decoder))
}

fn formats() -> EnumDecoder {
    EnumDecoder::new(["image/png", "image/jpeg"]).with_unsupported(["image/svg+xml"])
}

#[test]
fn test_color_prefixes() {
    let bgcolor = parser("bgcolor", ColorDecoder);
    for raw in ["0xFF0000", "#FF0000", "FF0000", "0xff0000"] {
        let value = assert_decodes!(bgcolor.parse(raw));
        assert_eq!(value, TypedValue::Color(Color::rgb(255, 0, 0)));
    }

    let value = assert_decodes!(bgcolor.parse("#00FF7F"));
    let TypedValue::Color(color) = value else {
        panic!("expected a color");
    };
    assert_eq!(color.alpha, 255);
    assert_eq!(color.to_string(), "0x00FF7F");
}

#[test]
fn test_invalid_color_mentions_expected_format() {
    let bgcolor = parser("bgcolor", ColorDecoder);
    for raw in ["notacolor", "0xFFF", "#GG0000", "0xFF00001"] {
        assert_exception!(
            bgcolor.parse(raw),
            ExceptionCode::InvalidParameterValue,
            "bgcolor"
        );
        assert_error_message_contains!(bgcolor.parse(raw), "0xRRGGBB");
    }
}

#[test]
fn test_enum_unrecognized_and_unsupported_are_distinct() {
    let format = parser("format", formats());

    assert_exception!(
        format.parse("image/bmp"),
        ExceptionCode::InvalidParameterValue,
        "format"
    );
    assert_error_message_contains!(format.parse("image/bmp"), "not a recognized value");
    assert_error_message_contains!(format.parse("image/bmp"), "image/png, image/jpeg");

    assert_exception!(
        format.parse("image/svg+xml"),
        ExceptionCode::InvalidFormat,
        "format"
    );
    assert_error_message_contains!(format.parse("image/svg+xml"), "not supported");
}

#[test]
fn test_enum_is_case_sensitive() {
    let format = parser("format", formats());
    assert!(format.parse("IMAGE/PNG").is_err());
    assert_eq!(
        assert_decodes!(format.parse("image/png")),
        TypedValue::Token("image/png".to_string())
    );
}

#[test]
fn test_integer_bounds_in_message() {
    let width = parser("width", IntegerDecoder::bounded(Some(1), Some(4096)));
    assert_error_message_contains!(width.parse("0"), "[1, 4096]");
    assert_error_message_contains!(width.parse("5000"), "out of range");
    assert_error_message_contains!(width.parse("wide"), "expected an integer");
    assert_eq!(assert_decodes!(width.parse(" 256 ")).as_i64(), Some(256));

    let open = parser("x", IntegerDecoder::bounded(Some(0), None));
    assert_error_message_contains!(open.parse("-3"), "[0, inf]");
}

#[test]
fn test_bounding_box_with_crs() {
    let bbox = parser("bbox", BoundingBoxDecoder);
    let value = assert_decodes!(bbox.parse("-180,-90,180,90,EPSG:4326"));
    let TypedValue::BoundingBox(envelope) = value else {
        panic!("expected a bounding box");
    };
    assert_eq!(envelope.min_x, -180.0);
    assert_eq!(envelope.max_y, 90.0);
    assert_eq!(envelope.crs.as_deref(), Some("EPSG:4326"));

    assert_error_message_contains!(bbox.parse("10,10,0,0"), "beyond the maximum corner");
    assert_error_message_contains!(bbox.parse("1,2,3"), "minx,miny,maxx,maxy");
}

#[test]
fn test_time_list_normalised_to_utc() {
    let time = parser("time", TimeDecoder);
    let value = assert_decodes!(time.parse("2006-08-01T12:00:00+02:00,2006-08-02"));
    assert_eq!(
        value.to_wire_string(),
        "2006-08-01T10:00:00Z,2006-08-02T00:00:00Z"
    );
}

#[test]
fn test_list_with_custom_delimiter_encodes_back() {
    let decoder = ListDecoder::with_delimiter(";");
    let value = decoder.decode("distance=10;geom=POINT(0 0)").unwrap();
    assert_eq!(value.text_items(), vec!["distance=10", "geom=POINT(0 0)"]);
    assert_eq!(decoder.encode(&value), "distance=10;geom=POINT(0 0)");
}

#[test]
fn test_empty_list_and_empty_items() {
    let decoder = ListDecoder::new();
    assert!(decoder.accepts_empty());
    assert_eq!(decoder.decode("").unwrap(), TypedValue::List(Vec::new()));
    assert_eq!(decoder.decode(",").unwrap().text_items(), vec!["", ""]);
    assert!(!ColorDecoder.accepts_empty());
}

#[test]
fn test_typed_list_element_failure_names_key() {
    let elevation = parser(
        "elevation",
        ListDecoder::new().of(Arc::new(ows_dispatch::kvp::DoubleDecoder)),
    );
    assert_exception!(
        elevation.parse("0,100,high"),
        ExceptionCode::InvalidParameterValue,
        "elevation"
    );
}

proptest! {
    #[test]
    fn test_list_round_trip(items in prop::collection::vec("[A-Za-z0-9:_ .-]{0,12}", 1..8)) {
        let decoder = ListDecoder::new();
        let raw = items.join(",");
        let value = decoder.decode(&raw).unwrap();

        // a single empty item is indistinguishable from an empty value
        if raw.is_empty() {
            prop_assert_eq!(value.as_list().map(<[TypedValue]>::len), Some(0));
        } else {
            let decoded: Vec<String> = value.text_items().into_iter().map(str::to_string).collect();
            prop_assert_eq!(&decoded, &items);
            prop_assert_eq!(decoder.encode(&value), raw);
        }
    }

    #[test]
    fn test_color_accepts_every_rgb_triplet(red: u8, green: u8, blue: u8) {
        let raw = format!("0x{:02X}{:02X}{:02X}", red, green, blue);
        let value = ColorDecoder.decode(&raw).unwrap();
        prop_assert_eq!(&value, &TypedValue::Color(Color::rgb(red, green, blue)));
        prop_assert_eq!(value.to_wire_string(), raw);
    }
}

//! Instants decoded from requests always come out in UTC.

use chrono::{TimeZone, Utc};
use ows_dispatch::datetime::{encode_datetime, parse_datetime};
use ows_dispatch::{Dispatcher, RawRequest, TypedValue};

#[test]
fn test_zoneless_instant_encodes_with_z() {
    let instant = parse_datetime("2008-10-31T00:00:00").unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2008, 10, 31, 0, 0, 0).unwrap());
    assert_eq!(encode_datetime(&instant), "2008-10-31T00:00:00Z");
}

#[test]
fn test_negative_offset_rolls_date_forward() {
    let instant = parse_datetime("2024-12-31T22:30:00-03:00").unwrap();
    assert_eq!(encode_datetime(&instant), "2025-01-01T01:30:00Z");
}

#[test]
fn test_kvp_time_parameter_is_utc() {
    let dispatcher = crate::common::dispatcher();
    let request = dispatcher
        .dispatch(&RawRequest::from_query(
            crate::common::fixtures::WMS_GET_MAP_130,
        ))
        .unwrap();

    let time = request.get("time").unwrap();
    assert_eq!(
        time.to_wire_string(),
        "2006-08-01T12:00:00Z,2006-08-02T12:00:00Z"
    );
}

#[test]
fn test_bad_time_parameter_is_reported() {
    let dispatcher = Dispatcher::with_defaults().unwrap();
    let result = dispatcher.dispatch(&RawRequest::from_pairs([
        ("SERVICE", "WMS"),
        ("REQUEST", "GetCapabilities"),
        ("TIME", "last tuesday"),
    ]));
    assert_error_message_contains!(result, "last tuesday");
}

#[test]
fn test_single_instant_is_scalar() {
    let dispatcher = crate::common::dispatcher();
    let request = dispatcher
        .dispatch(&RawRequest::from_pairs([
            ("SERVICE", "WMS"),
            ("REQUEST", "GetCapabilities"),
            ("TIME", "2006-08-01T12:00:00.5+01:00"),
        ]))
        .unwrap();
    assert!(matches!(request.get("time"), Some(TypedValue::DateTime(_))));
    assert_eq!(
        request.get("time").unwrap().to_wire_string(),
        "2006-08-01T11:00:00.500Z"
    );
}

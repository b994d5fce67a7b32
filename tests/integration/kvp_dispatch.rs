//! Query string requests from realistic clients.

use crate::common::{dispatcher, fixtures};
use ows_dispatch::{ExceptionCode, RawRequest, RequestForm, TypedValue, Version};

#[test]
fn test_wms_get_map_111() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_query(fixtures::WMS_GET_MAP_111)));

    assert_eq!(request.service, "WMS");
    assert_eq!(request.operation, "GetMap");
    assert_eq!(request.version, Version::new(1, 1, 1));
    assert_eq!(request.form, RequestForm::Kvp);
    assert_eq!(
        request.get("layers").unwrap().text_items(),
        vec!["topp:states", "sf:roads"]
    );
    assert_eq!(
        request.get("styles").unwrap().text_items(),
        vec!["population", ""]
    );
    assert_eq!(request.get("transparent"), Some(&TypedValue::Boolean(true)));
    assert_eq!(request.get("bgcolor").unwrap().to_wire_string(), "0xFF0000");
    assert!(!request.contains("service"));
    assert!(!request.contains("request"));
}

#[test]
fn test_wms_get_map_130_uses_crs() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_query(fixtures::WMS_GET_MAP_130)));
    assert_eq!(request.version, Version::new(1, 3, 0));
    assert_eq!(request.get("crs"), Some(&TypedValue::Text("CRS:84".to_string())));
    assert_eq!(request.get("styles"), Some(&TypedValue::List(Vec::new())));
}

#[test]
fn test_wms_130_without_crs_is_missing() {
    let query = fixtures::WMS_GET_MAP_130.replace("&crs=CRS:84", "&srs=EPSG:4326");
    assert_exception!(
        dispatcher().dispatch(&RawRequest::from_query(&query)),
        ExceptionCode::MissingParameterValue,
        "crs"
    );
}

#[test]
fn test_get_feature_info_coordinates() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_query(fixtures::WMS_GET_FEATURE_INFO)));
    assert_eq!(request.get("x").and_then(TypedValue::as_i64), Some(350));
    assert_eq!(request.get("feature_count").and_then(TypedValue::as_i64), Some(5));
    assert_eq!(
        request.get("info_format"),
        Some(&TypedValue::Token("application/json".to_string()))
    );
}

#[test]
fn test_wfs_get_feature_kvp() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_query(fixtures::WFS_GET_FEATURE_KVP)));
    assert_eq!(request.version, Version::new(1, 1, 0));
    assert_eq!(request.get("maxfeatures").and_then(TypedValue::as_i64), Some(50));
    assert_eq!(
        request.get("featureid").unwrap().text_items(),
        vec!["states.1", "states.2"]
    );
}

#[test]
fn test_wcs_get_coverage_kvp() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_query(fixtures::WCS_GET_COVERAGE_KVP)));
    let Some(TypedValue::BoundingBox(envelope)) = request.get("boundingbox") else {
        panic!("expected a bounding box");
    };
    assert_eq!(envelope.crs.as_deref(), Some("urn:ogc:def:crs:EPSG::4326"));
    assert_eq!(request.get("store"), Some(&TypedValue::Boolean(false)));
}

#[test]
fn test_wps_execute_data_inputs_split_on_semicolon() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_query(fixtures::WPS_EXECUTE_KVP)));
    assert_eq!(
        request.get("datainputs").unwrap().text_items(),
        vec!["distance=10", "geom=POINT(0 0)"]
    );
}

#[test]
fn test_wmtver_fallback() {
    let raw = RawRequest::from_pairs([
        ("WMTVER", "1.1.1"),
        ("SERVICE", "WMS"),
        ("REQUEST", "GetCapabilities"),
    ]);
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.version, Version::new(1, 1, 1));
    assert!(!request.contains("wmtver"));
}

#[test]
fn test_version_beats_wmtver() {
    let raw = RawRequest::from_pairs([
        ("SERVICE", "WMS"),
        ("REQUEST", "GetCapabilities"),
        ("WMTVER", "1.1.1"),
        ("VERSION", "1.3.0"),
    ]);
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.version, Version::new(1, 3, 0));
}

#[test]
fn test_unsupported_wmtver_is_attributed_to_wmtver() {
    let raw = RawRequest::from_pairs([
        ("SERVICE", "WMS"),
        ("REQUEST", "GetCapabilities"),
        ("WMTVER", "1.0.0"),
    ]);
    assert_exception!(
        dispatcher().dispatch(&raw),
        ExceptionCode::VersionNegotiationFailed,
        "wmtver"
    );
}

#[test]
fn test_accept_versions_picks_first_supported() {
    let raw = RawRequest::from_query(
        "SERVICE=WFS&REQUEST=GetCapabilities&ACCEPTVERSIONS=3.0.0,1.0.0,2.0.0",
    );
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.version, Version::new(1, 0, 0));
}

#[test]
fn test_accept_versions_ahead_of_version() {
    let raw = RawRequest::from_query(
        "SERVICE=WMS&REQUEST=GetCapabilities&VERSION=1.1.1&ACCEPTVERSIONS=1.3.0",
    );
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.version, Version::new(1, 3, 0));
}

#[test]
fn test_accept_versions_none_supported() {
    let raw = RawRequest::from_query("SERVICE=WCS&REQUEST=GetCapabilities&ACCEPTVERSIONS=0.9.0,3.0.0");
    assert_exception!(
        dispatcher().dispatch(&raw),
        ExceptionCode::VersionNegotiationFailed,
        "acceptversions"
    );
}

#[test]
fn test_default_version() {
    let raw = RawRequest::from_query("SERVICE=WMS&REQUEST=GetCapabilities");
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.version, Version::new(1, 1, 1));
}

#[test]
fn test_blank_version_counts_as_absent() {
    let raw = RawRequest::from_query("SERVICE=WMS&REQUEST=GetCapabilities&VERSION=");
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.version, Version::new(1, 1, 1));
}

#[test]
fn test_missing_and_invalid_reported_together() {
    let raw = RawRequest::from_query(
        "SERVICE=WMS&VERSION=1.1.1&REQUEST=GetMap&LAYERS=&WIDTH=wide&BGCOLOR=blue\
         &SRS=EPSG:4326&BBOX=0,0,1,1&HEIGHT=10&FORMAT=image/png",
    );
    let exception = dispatcher().dispatch(&raw).unwrap_err();

    assert_eq!(exception.code, ExceptionCode::MissingParameterValue);
    assert_eq!(exception.locator.as_deref(), Some("layers"));
    assert_eq!(exception.texts.len(), 3);
    assert!(exception.texts[1].contains("wide"));
    assert!(exception.texts[2].contains("0xRRGGBB"));
}

#[test]
fn test_percent_encoded_values() {
    let raw = RawRequest::from_query(
        "SERVICE=WMS&REQUEST=GetMap&VERSION=1.1.1&LAYERS=topp%3Astates&STYLES=\
         &SRS=EPSG%3A4326&BBOX=-180%2C-90%2C180%2C90&WIDTH=10&HEIGHT=10\
         &FORMAT=image%2Fpng&BGCOLOR=%23FFFFFF",
    );
    let request = assert_decodes!(dispatcher().dispatch(&raw));
    assert_eq!(request.get("layers").unwrap().text_items(), vec!["topp:states"]);
    assert_eq!(request.get("bgcolor").unwrap().to_wire_string(), "0xFFFFFF");
}

//! XML request documents and error accumulation.

use crate::common::{dispatcher, fixtures};
use ows_dispatch::{ExceptionCode, RawRequest, RequestForm, TypedValue, Version};

#[test]
fn test_wfs_get_feature_document() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_xml(fixtures::WFS_GET_FEATURE)));

    assert_eq!(request.service, "WFS");
    assert_eq!(request.operation, "GetFeature");
    assert_eq!(request.version, Version::new(1, 1, 0));
    assert_eq!(request.form, RequestForm::Xml);
    assert_eq!(request.get("maxfeatures"), Some(&TypedValue::Integer(100)));

    let queries = request.get("query").and_then(TypedValue::as_list).unwrap();
    assert_eq!(queries.len(), 1);
    let query = queries[0].as_record().unwrap();
    assert_eq!(query["typename"].as_str(), Some("topp:states"));
    assert_eq!(
        query["propertyname"].text_items(),
        vec!["topp:STATE_NAME", "topp:PERSONS"]
    );

    let filter = query["filter"].as_str().unwrap();
    assert!(filter.starts_with("<ogc:Filter "));
    assert!(filter.contains("<ogc:Literal>NY</ogc:Literal>"));

    let fragment = roxmltree::Document::parse(filter).unwrap();
    assert_eq!(
        fragment.root_element().tag_name().namespace(),
        Some("http://www.opengis.net/ogc")
    );
}

#[test]
fn test_two_errors_become_one_exception() {
    let result = dispatcher().dispatch(&RawRequest::from_xml(fixtures::WFS_GET_FEATURE_TWO_ERRORS));
    let exception = result.unwrap_err();

    assert_eq!(exception.code, ExceptionCode::InvalidParameterValue);
    assert_eq!(exception.texts.len(), 2);
    assert!(exception.texts.iter().any(|text| text.contains("maxFeatures")));
    assert!(exception.texts.iter().any(|text| text.contains("typeName")));
}

#[test]
fn test_wcs_get_coverage_document() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_xml(fixtures::WCS_GET_COVERAGE)));
    assert_eq!(request.service, "WCS");
    assert_eq!(request.get("identifier").and_then(TypedValue::as_str), Some("nurc:Arc_Sample"));

    let subset = request.get("domainsubset").and_then(TypedValue::as_record).unwrap();
    let bbox = subset["boundingbox"].as_record().unwrap();
    assert_eq!(
        bbox["lowercorner"],
        TypedValue::List(vec![TypedValue::Double(-90.0), TypedValue::Double(-180.0)])
    );
    let time = subset["temporalsubset"].as_record().unwrap();
    assert_eq!(time["timeposition"].to_wire_string(), "2008-10-31T00:00:00Z");

    let output = request.get("output").and_then(TypedValue::as_record).unwrap();
    assert_eq!(output["store"], TypedValue::Boolean(false));
}

#[test]
fn test_wps_execute_document() {
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_xml(fixtures::WPS_EXECUTE)));
    assert_eq!(request.service, "WPS");
    assert_eq!(request.get("identifier").and_then(TypedValue::as_str), Some("JTS:buffer"));

    let inputs = request.get("datainputs").and_then(TypedValue::as_record).unwrap();
    let input = inputs["input"].as_list().unwrap()[0].as_record().unwrap();
    assert_eq!(input["identifier"].as_str(), Some("distance"));

    let form = request.get("responseform").and_then(TypedValue::as_record).unwrap();
    let raw_output = form["rawdataoutput"].as_record().unwrap();
    assert_eq!(raw_output["mimetype"].as_str(), Some("application/wkt"));
}

#[test]
fn test_requested_version_must_be_supported() {
    let body = fixtures::WFS_GET_FEATURE.replace("version=\"1.1.0\"", "version=\"3.0.0\"");
    assert_exception!(
        dispatcher().dispatch(&RawRequest::from_xml(body)),
        ExceptionCode::VersionNegotiationFailed,
        "version"
    );
}

#[test]
fn test_service_attribute_optional_for_bound_roots() {
    let body = fixtures::WCS_GET_COVERAGE.replace("service=\"WCS\" ", "");
    let request = assert_decodes!(dispatcher().dispatch(&RawRequest::from_xml(body)));
    assert_eq!(request.service, "WCS");
}

#[test]
fn test_truncated_document() {
    let body = &fixtures::WPS_EXECUTE[..fixtures::WPS_EXECUTE.len() / 2];
    assert_exception!(
        dispatcher().dispatch(&RawRequest::from_xml(body)),
        ExceptionCode::InvalidParameterValue,
        "request"
    );
}

#[test]
fn test_invalid_utf8_body() {
    let mut body = fixtures::WPS_EXECUTE.as_bytes().to_vec();
    body.push(0xC3);
    assert_exception!(
        RawRequest::from_xml_bytes(body),
        ExceptionCode::InvalidParameterValue,
        "request"
    );
}

#[test]
fn test_dispatch_to_matching_operation() {
    let raw = RawRequest::from_xml(fixtures::WFS_GET_FEATURE);
    let request = assert_decodes!(dispatcher().dispatch_to(&raw, "getfeature", None));
    assert_eq!(request.operation, "GetFeature");
}

//! Embedded bootstrap tables for the standard OGC services.
//!
//! These tables let a dispatcher start without external configuration files.
//! Deployments that need other keys or operations load their own tables with
//! [`ParserRegistry::from_table_file`](crate::kvp::ParserRegistry::from_table_file)
//! and [`OperationCatalog::from_file`](crate::dispatcher::OperationCatalog::from_file).

/// Returns the default KVP parser table as a JSON string.
///
/// Covers the common WMS 1.1.1/1.3.0, WFS 1.0.0/1.1.0/2.0.0, WCS 1.0.0/1.1.1
/// and WPS 1.0.0 parameters.
pub fn default_parsers() -> &'static str {
    r#"{
  "parsers": [
    { "key": "updatesequence", "decoder": { "type": "text" } },
    { "key": "acceptversions", "decoder": { "type": "list", "element": { "type": "version" } } },
    { "key": "acceptformats", "decoder": { "type": "list" } },
    { "key": "sections", "decoder": { "type": "list", "element": {
        "type": "enum",
        "values": ["ServiceIdentification", "ServiceProvider", "OperationsMetadata", "Contents", "Filter_Capabilities", "All"]
    } } },
    { "key": "namespace", "decoder": { "type": "text" } },
    { "key": "bbox", "decoder": { "type": "boundingBox" } },
    { "key": "time", "decoder": { "type": "time" } },

    { "service": "WMS", "key": "layers", "decoder": { "type": "list" } },
    { "service": "WMS", "key": "styles", "decoder": { "type": "list" } },
    { "service": "WMS", "key": "query_layers", "decoder": { "type": "list" } },
    { "service": "WMS", "key": "layer", "decoder": { "type": "text" } },
    { "service": "WMS", "key": "style", "decoder": { "type": "text" } },
    { "service": "WMS", "key": "srs", "decoder": { "type": "text" } },
    { "service": "WMS", "key": "crs", "decoder": { "type": "text" } },
    { "service": "WMS", "key": "width", "decoder": { "type": "integer", "min": 1 } },
    { "service": "WMS", "key": "height", "decoder": { "type": "integer", "min": 1 } },
    { "service": "WMS", "key": "format", "decoder": {
        "type": "enum",
        "values": ["image/png", "image/png8", "image/jpeg", "image/gif", "image/tiff", "image/geotiff", "application/openlayers", "application/pdf", "text/xml"],
        "unsupported": ["image/svg+xml", "application/vnd.google-earth.kmz"]
    } },
    { "service": "WMS", "key": "info_format", "decoder": {
        "type": "enum",
        "values": ["text/plain", "text/html", "application/vnd.ogc.gml", "application/json"],
        "unsupported": ["application/vnd.ogc.wms_xml"]
    } },
    { "service": "WMS", "key": "transparent", "decoder": { "type": "boolean" } },
    { "service": "WMS", "key": "bgcolor", "decoder": { "type": "color" } },
    { "service": "WMS", "key": "elevation", "decoder": { "type": "list", "element": { "type": "double" } } },
    { "service": "WMS", "key": "feature_count", "decoder": { "type": "integer", "min": 1 } },
    { "service": "WMS", "key": "x", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WMS", "key": "y", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WMS", "version": "1.3.0", "key": "i", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WMS", "version": "1.3.0", "key": "j", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WMS", "key": "sld_body", "decoder": { "type": "text" } },
    { "service": "WMS", "key": "exceptions", "decoder": {
        "type": "enum",
        "values": ["application/vnd.ogc.se_xml", "application/vnd.ogc.se_inimage", "application/vnd.ogc.se_blank", "application/json"]
    } },
    { "service": "WMS", "version": "1.3.0", "key": "exceptions", "decoder": {
        "type": "enum",
        "values": ["XML", "INIMAGE", "BLANK", "application/json"]
    } },

    { "service": "WFS", "key": "typename", "decoder": { "type": "list" } },
    { "service": "WFS", "version": "2.0.0", "key": "typenames", "decoder": { "type": "list" } },
    { "service": "WFS", "key": "featureid", "decoder": { "type": "identifier" } },
    { "service": "WFS", "version": "2.0.0", "key": "resourceid", "decoder": { "type": "identifier" } },
    { "service": "WFS", "key": "maxfeatures", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WFS", "version": "2.0.0", "key": "count", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WFS", "key": "startindex", "decoder": { "type": "integer", "min": 0 } },
    { "service": "WFS", "key": "propertyname", "decoder": { "type": "list" } },
    { "service": "WFS", "key": "sortby", "decoder": { "type": "list" } },
    { "service": "WFS", "key": "srsname", "decoder": { "type": "text" } },
    { "service": "WFS", "key": "filter", "decoder": { "type": "text" } },
    { "service": "WFS", "key": "cql_filter", "decoder": { "type": "text" } },
    { "service": "WFS", "key": "resulttype", "decoder": { "type": "enum", "values": ["results", "hits"] } },
    { "service": "WFS", "key": "outputformat", "decoder": {
        "type": "enum",
        "values": ["GML2", "GML3", "text/xml; subtype=gml/2.1.2", "text/xml; subtype=gml/3.1.1", "application/gml+xml; version=3.2", "application/json", "csv"],
        "unsupported": ["SHAPE-ZIP"]
    } },

    { "service": "WCS", "key": "coverage", "decoder": { "type": "identifier" } },
    { "service": "WCS", "key": "identifiers", "decoder": { "type": "identifier" } },
    { "service": "WCS", "key": "identifier", "decoder": { "type": "text" } },
    { "service": "WCS", "version": "2.0.1", "key": "coverageid", "decoder": { "type": "identifier" } },
    { "service": "WCS", "key": "boundingbox", "decoder": { "type": "boundingBox" } },
    { "service": "WCS", "key": "format", "decoder": { "type": "text" } },
    { "service": "WCS", "key": "store", "decoder": { "type": "boolean" } },
    { "service": "WCS", "key": "crs", "decoder": { "type": "text" } },
    { "service": "WCS", "key": "response_crs", "decoder": { "type": "text" } },
    { "service": "WCS", "key": "interpolation", "decoder": {
        "type": "enum",
        "values": ["nearest neighbor", "bilinear", "bicubic"],
        "unsupported": ["lost area", "barycentric"]
    } },

    { "service": "WPS", "key": "identifier", "decoder": { "type": "identifier" } },
    { "service": "WPS", "key": "datainputs", "decoder": { "type": "list", "delimiter": ";" } },
    { "service": "WPS", "key": "responsedocument", "decoder": { "type": "text" } },
    { "service": "WPS", "key": "rawdataoutput", "decoder": { "type": "text" } },
    { "service": "WPS", "key": "storeexecuteresponse", "decoder": { "type": "boolean" } },
    { "service": "WPS", "key": "lineage", "decoder": { "type": "boolean" } },
    { "service": "WPS", "key": "status", "decoder": { "type": "boolean" } },
    { "service": "WPS", "key": "language", "decoder": { "type": "text" } }
  ]
}"#
}

/// Returns the default operation catalog as a JSON string.
pub fn default_operations() -> &'static str {
    r#"{
  "operations": [
    { "service": "WMS", "operation": "GetCapabilities", "versions": ["1.1.1", "1.3.0"] },
    { "service": "WMS", "operation": "GetMap", "versions": ["1.1.1", "1.3.0"],
      "required": ["layers", "bbox", "width", "height", "format"],
      "requiredByVersion": { "1.1.1": ["srs"], "1.3.0": ["crs"] } },
    { "service": "WMS", "operation": "GetFeatureInfo", "versions": ["1.1.1", "1.3.0"],
      "required": ["layers", "query_layers", "bbox", "width", "height"],
      "requiredByVersion": { "1.1.1": ["x", "y"], "1.3.0": ["i", "j"] } },
    { "service": "WMS", "operation": "DescribeLayer", "versions": ["1.1.1"], "required": ["layers"] },
    { "service": "WMS", "operation": "GetLegendGraphic", "versions": ["1.0.0", "1.1.1", "1.3.0"], "required": ["layer", "format"] },

    { "service": "WFS", "operation": "GetCapabilities", "versions": ["1.0.0", "1.1.0", "2.0.0"] },
    { "service": "WFS", "operation": "DescribeFeatureType", "versions": ["1.0.0", "1.1.0", "2.0.0"] },
    { "service": "WFS", "operation": "GetFeature", "versions": ["1.0.0", "1.1.0", "2.0.0"] },

    { "service": "WCS", "operation": "GetCapabilities", "versions": ["1.0.0", "1.1.1", "2.0.1"] },
    { "service": "WCS", "operation": "DescribeCoverage", "versions": ["1.0.0", "1.1.1", "2.0.1"],
      "requiredByVersion": { "1.0.0": ["coverage"], "1.1.1": ["identifiers"], "2.0.1": ["coverageid"] } },
    { "service": "WCS", "operation": "GetCoverage", "versions": ["1.0.0", "1.1.1", "2.0.1"],
      "requiredByVersion": { "1.0.0": ["coverage", "format"], "1.1.1": ["identifier", "boundingbox", "format"], "2.0.1": ["coverageid"] } },

    { "service": "WPS", "operation": "GetCapabilities", "versions": ["1.0.0"] },
    { "service": "WPS", "operation": "DescribeProcess", "versions": ["1.0.0"], "required": ["identifier"] },
    { "service": "WPS", "operation": "Execute", "versions": ["1.0.0"], "required": ["identifier"] }
  ]
}"#
}

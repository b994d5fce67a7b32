//! Request fixtures modelled on real client traffic.

pub const WMS_GET_MAP_111: &str = "SERVICE=WMS&VERSION=1.1.1&REQUEST=GetMap\
    &LAYERS=topp:states,sf:roads&STYLES=population,&SRS=EPSG:4326\
    &BBOX=-124.73,24.96,-66.97,49.37&WIDTH=780&HEIGHT=330&FORMAT=image/png\
    &TRANSPARENT=TRUE&BGCOLOR=0xFF0000";

pub const WMS_GET_MAP_130: &str = "service=WMS&version=1.3.0&request=GetMap\
    &layers=topp:states&styles=&crs=CRS:84&bbox=-124.73,24.96,-66.97,49.37\
    &width=512&height=256&format=image/jpeg&time=2006-08-01T12:00:00,2006-08-02T12:00:00";

pub const WMS_GET_FEATURE_INFO: &str = "SERVICE=WMS&VERSION=1.1.1&REQUEST=GetFeatureInfo\
    &LAYERS=topp:states&QUERY_LAYERS=topp:states&STYLES=&SRS=EPSG:4326\
    &BBOX=-124.73,24.96,-66.97,49.37&WIDTH=780&HEIGHT=330&X=350&Y=160\
    &INFO_FORMAT=application/json&FEATURE_COUNT=5";

pub const WFS_GET_FEATURE_KVP: &str = "service=WFS&version=1.1.0&request=GetFeature\
    &typeName=topp:states&maxFeatures=50&outputFormat=application/json\
    &featureId=states.1,states.2&propertyName=STATE_NAME,PERSONS";

pub const WCS_GET_COVERAGE_KVP: &str = "SERVICE=WCS&VERSION=1.1.1&REQUEST=GetCoverage\
    &IDENTIFIER=nurc:Arc_Sample&BOUNDINGBOX=-90,-180,90,180,urn:ogc:def:crs:EPSG::4326\
    &FORMAT=image/tiff&STORE=false";

pub const WPS_EXECUTE_KVP: &str = "service=WPS&version=1.0.0&request=Execute\
    &identifier=gs:Buffer&datainputs=distance=10;geom=POINT(0 0)&rawdataoutput=result";

pub const WFS_GET_FEATURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:GetFeature service="WFS" version="1.1.0" outputFormat="GML3" maxFeatures="100"
    xmlns:wfs="http://www.opengis.net/wfs"
    xmlns:ogc="http://www.opengis.net/ogc"
    xmlns:topp="http://www.openplans.org/topp">
  <wfs:Query typeName="topp:states" srsName="EPSG:4326">
    <wfs:PropertyName>topp:STATE_NAME</wfs:PropertyName>
    <wfs:PropertyName>topp:PERSONS</wfs:PropertyName>
    <ogc:Filter>
      <ogc:PropertyIsEqualTo>
        <ogc:PropertyName>topp:STATE_ABBR</ogc:PropertyName>
        <ogc:Literal>NY</ogc:Literal>
      </ogc:PropertyIsEqualTo>
    </ogc:Filter>
  </wfs:Query>
</wfs:GetFeature>"#;

/// Two independent problems: a non-numeric maxFeatures and a Query
/// without its typeName.
pub const WFS_GET_FEATURE_TWO_ERRORS: &str = r#"<wfs:GetFeature service="WFS" version="1.1.0" maxFeatures="many"
    xmlns:wfs="http://www.opengis.net/wfs">
  <wfs:Query srsName="EPSG:4326"/>
</wfs:GetFeature>"#;

pub const WCS_GET_COVERAGE: &str = r#"<wcs:GetCoverage service="WCS" version="1.1.1"
    xmlns:wcs="http://www.opengis.net/wcs/1.1.1"
    xmlns:ows="http://www.opengis.net/ows/1.1"
    xmlns:gml="http://www.opengis.net/gml">
  <ows:Identifier>nurc:Arc_Sample</ows:Identifier>
  <wcs:DomainSubset>
    <ows:BoundingBox crs="urn:ogc:def:crs:EPSG::4326">
      <ows:LowerCorner>-90 -180</ows:LowerCorner>
      <ows:UpperCorner>90 180</ows:UpperCorner>
    </ows:BoundingBox>
    <wcs:TemporalSubset>
      <gml:timePosition>2008-10-31T00:00:00</gml:timePosition>
    </wcs:TemporalSubset>
  </wcs:DomainSubset>
  <wcs:Output format="image/tiff" store="false"/>
</wcs:GetCoverage>"#;

pub const WPS_EXECUTE: &str = r#"<wps:Execute service="WPS" version="1.0.0"
    xmlns:wps="http://www.opengis.net/wps/1.0.0"
    xmlns:ows="http://www.opengis.net/ows/1.1">
  <ows:Identifier>JTS:buffer</ows:Identifier>
  <wps:DataInputs>
    <wps:Input>
      <ows:Identifier>distance</ows:Identifier>
      <wps:Data><wps:LiteralData>10</wps:LiteralData></wps:Data>
    </wps:Input>
  </wps:DataInputs>
  <wps:ResponseForm>
    <wps:RawDataOutput mimeType="application/wkt">
      <ows:Identifier>result</ows:Identifier>
    </wps:RawDataOutput>
  </wps:ResponseForm>
</wps:Execute>"#;

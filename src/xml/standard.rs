//! Bindings for the standard WFS, WCS and WPS request documents.

use super::binding::{ElementBinding, FragmentBinding, Occurs, QName};
use super::registry::BindingRegistryBuilder;
use crate::error::BuildResult;
use crate::version::Version;
use crate::kvp::{
    BooleanDecoder, DoubleDecoder, EnumDecoder, IntegerDecoder, KvpDecoder, TextDecoder,
    TimeDecoder, VersionDecoder, WhitespaceListDecoder,
};
use std::sync::Arc;

pub const OWS_1_0: &str = "http://www.opengis.net/ows";
pub const OWS_1_1: &str = "http://www.opengis.net/ows/1.1";
pub const OGC: &str = "http://www.opengis.net/ogc";
pub const FES_2_0: &str = "http://www.opengis.net/fes/2.0";
pub const GML: &str = "http://www.opengis.net/gml";
pub const WFS_1_1: &str = "http://www.opengis.net/wfs";
pub const WFS_2_0: &str = "http://www.opengis.net/wfs/2.0";
pub const WCS_1_1: &str = "http://www.opengis.net/wcs/1.1.1";
pub const WPS_1_0: &str = "http://www.opengis.net/wps/1.0.0";
pub const XLINK: &str = "http://www.w3.org/1999/xlink";

/// WFS 1.0 and 1.1 share a namespace; 1.1 is assumed when unstated.
const WFS_1_X_VERSIONS: [Version; 2] = [Version::new(1, 1, 0), Version::new(1, 0, 0)];
const WFS_2_0_VERSIONS: [Version; 1] = [Version::new(2, 0, 0)];
const WCS_1_1_VERSIONS: [Version; 1] = [Version::new(1, 1, 1)];
const WPS_1_0_VERSIONS: [Version; 1] = [Version::new(1, 0, 0)];

const SECTIONS: [&str; 6] = [
    "ServiceIdentification",
    "ServiceProvider",
    "OperationsMetadata",
    "Contents",
    "Filter_Capabilities",
    "All",
];

fn text() -> Arc<dyn KvpDecoder> {
    Arc::new(TextDecoder)
}

fn boolean() -> Arc<dyn KvpDecoder> {
    Arc::new(BooleanDecoder)
}

fn non_negative() -> Arc<dyn KvpDecoder> {
    Arc::new(IntegerDecoder::bounded(Some(0), None))
}

fn corner() -> Arc<dyn KvpDecoder> {
    Arc::new(WhitespaceListDecoder::new().of(Arc::new(DoubleDecoder)))
}

fn result_type() -> Arc<dyn KvpDecoder> {
    Arc::new(EnumDecoder::new(["results", "hits"]))
}

pub(crate) fn register_all(builder: &mut BindingRegistryBuilder) -> BuildResult<()> {
    register_ows(builder, OWS_1_0)?;
    register_ows(builder, OWS_1_1)?;
    register_wfs_1_1(builder)?;
    register_wfs_2_0(builder)?;
    register_wcs_1_1(builder)?;
    register_wps_1_0(builder)?;
    Ok(())
}

/// Capabilities negotiation elements, shared by every service.
fn register_ows(builder: &mut BindingRegistryBuilder, ns: &str) -> BuildResult<()> {
    let q = |local: &str| QName::new(ns, local);

    builder
        .register(
            ElementBinding::complex(q("AcceptVersions")).child(
                q("Version"),
                "version",
                Occurs::OneOrMore,
            ),
        )?
        .register(ElementBinding::simple(q("Version"), Arc::new(VersionDecoder)))?
        .register(ElementBinding::complex(q("Sections")).child(
            q("Section"),
            "section",
            Occurs::Many,
        ))?
        .register(ElementBinding::simple(
            q("Section"),
            Arc::new(EnumDecoder::new(SECTIONS)),
        ))?
        .register(ElementBinding::complex(q("AcceptFormats")).child(
            q("OutputFormat"),
            "outputformat",
            Occurs::Many,
        ))?
        .register(ElementBinding::simple(q("OutputFormat"), text()))?;

    Ok(())
}

fn capabilities(root: QName, service: &str, versions: &[Version], ows: &str) -> ElementBinding {
    ElementBinding::complex(root)
        .for_service(service)
        .for_versions(versions)
        .attribute("updateSequence", "updatesequence", text(), false)
        .child(QName::new(ows, "AcceptVersions"), "acceptversions", Occurs::Optional)
        .child(QName::new(ows, "Sections"), "sections", Occurs::Optional)
        .child(QName::new(ows, "AcceptFormats"), "acceptformats", Occurs::Optional)
}

fn register_wfs_1_1(builder: &mut BindingRegistryBuilder) -> BuildResult<()> {
    let wfs = |local: &str| QName::new(WFS_1_1, local);
    let ogc = |local: &str| QName::new(OGC, local);

    builder
        .register(capabilities(wfs("GetCapabilities"), "WFS", &WFS_1_X_VERSIONS, OWS_1_0))?
        .register(
            ElementBinding::complex(wfs("DescribeFeatureType"))
                .for_service("WFS")
                .for_versions(&WFS_1_X_VERSIONS)
                .attribute("outputFormat", "outputformat", text(), false)
                .child(wfs("TypeName"), "typename", Occurs::Many),
        )?
        .register(ElementBinding::simple(wfs("TypeName"), text()))?
        .register(
            ElementBinding::complex(wfs("GetFeature"))
                .for_service("WFS")
                .for_versions(&WFS_1_X_VERSIONS)
                .attribute("outputFormat", "outputformat", text(), false)
                .attribute("maxFeatures", "maxfeatures", non_negative(), false)
                .attribute("resultType", "resulttype", result_type(), false)
                .child(wfs("Query"), "query", Occurs::OneOrMore),
        )?
        .register(
            ElementBinding::complex(wfs("Query"))
                .attribute("typeName", "typename", text(), true)
                .attribute("srsName", "srsname", text(), false)
                .attribute("featureVersion", "featureversion", text(), false)
                .child(wfs("PropertyName"), "propertyname", Occurs::Many)
                .child(ogc("Filter"), "filter", Occurs::Optional)
                .child(ogc("SortBy"), "sortby", Occurs::Optional),
        )?
        .register(ElementBinding::simple(wfs("PropertyName"), text()))?
        .register(FragmentBinding::new(ogc("Filter")))?
        .register(FragmentBinding::new(ogc("SortBy")))?;

    Ok(())
}

fn register_wfs_2_0(builder: &mut BindingRegistryBuilder) -> BuildResult<()> {
    let wfs = |local: &str| QName::new(WFS_2_0, local);
    let fes = |local: &str| QName::new(FES_2_0, local);

    builder
        .register(capabilities(wfs("GetCapabilities"), "WFS", &WFS_2_0_VERSIONS, OWS_1_1))?
        .register(
            ElementBinding::complex(wfs("GetFeature"))
                .for_service("WFS")
                .for_versions(&WFS_2_0_VERSIONS)
                .attribute("outputFormat", "outputformat", text(), false)
                .attribute("count", "count", non_negative(), false)
                .attribute("startIndex", "startindex", non_negative(), false)
                .attribute("resultType", "resulttype", result_type(), false)
                .child(wfs("Query"), "query", Occurs::OneOrMore),
        )?
        .register(
            ElementBinding::complex(wfs("Query"))
                .attribute("typeNames", "typenames", text(), true)
                .attribute("srsName", "srsname", text(), false)
                .child(wfs("PropertyName"), "propertyname", Occurs::Many)
                .child(fes("Filter"), "filter", Occurs::Optional)
                .child(fes("SortBy"), "sortby", Occurs::Optional),
        )?
        .register(ElementBinding::simple(wfs("PropertyName"), text()))?
        .register(FragmentBinding::new(fes("Filter")))?
        .register(FragmentBinding::new(fes("SortBy")))?;

    Ok(())
}

fn register_wcs_1_1(builder: &mut BindingRegistryBuilder) -> BuildResult<()> {
    let wcs = |local: &str| QName::new(WCS_1_1, local);
    let ows = |local: &str| QName::new(OWS_1_1, local);

    builder
        .register(capabilities(wcs("GetCapabilities"), "WCS", &WCS_1_1_VERSIONS, OWS_1_1))?
        .register(
            ElementBinding::complex(wcs("DescribeCoverage"))
                .for_service("WCS")
                .for_versions(&WCS_1_1_VERSIONS)
                .child(wcs("Identifier"), "identifiers", Occurs::OneOrMore),
        )?
        .register(ElementBinding::simple(wcs("Identifier"), text()))?
        .register(
            ElementBinding::complex(wcs("GetCoverage"))
                .for_service("WCS")
                .for_versions(&WCS_1_1_VERSIONS)
                .child(ows("Identifier"), "identifier", Occurs::Required)
                .child(wcs("DomainSubset"), "domainsubset", Occurs::Required)
                .child(wcs("Output"), "output", Occurs::Required),
        )?
        .register(ElementBinding::simple(ows("Identifier"), text()))?
        .register(
            ElementBinding::complex(wcs("DomainSubset"))
                .child(ows("BoundingBox"), "boundingbox", Occurs::Required)
                .child(wcs("TemporalSubset"), "temporalsubset", Occurs::Optional),
        )?
        .register(
            ElementBinding::complex(ows("BoundingBox"))
                .attribute("crs", "crs", text(), false)
                .child(ows("LowerCorner"), "lowercorner", Occurs::Required)
                .child(ows("UpperCorner"), "uppercorner", Occurs::Required),
        )?
        .register(ElementBinding::simple(ows("LowerCorner"), corner()))?
        .register(ElementBinding::simple(ows("UpperCorner"), corner()))?
        .register(ElementBinding::complex(wcs("TemporalSubset")).child(
            QName::new(GML, "timePosition"),
            "timeposition",
            Occurs::Many,
        ))?
        .register(ElementBinding::simple(
            QName::new(GML, "timePosition"),
            Arc::new(TimeDecoder),
        ))?
        .register(
            ElementBinding::complex(wcs("Output"))
                .attribute("format", "format", text(), true)
                .attribute("store", "store", boolean(), false),
        )?;

    Ok(())
}

fn register_wps_1_0(builder: &mut BindingRegistryBuilder) -> BuildResult<()> {
    let wps = |local: &str| QName::new(WPS_1_0, local);
    let ows = |local: &str| QName::new(OWS_1_1, local);

    builder
        .register(
            capabilities(wps("GetCapabilities"), "WPS", &WPS_1_0_VERSIONS, OWS_1_1)
                .attribute("language", "language", text(), false),
        )?
        .register(
            ElementBinding::complex(wps("DescribeProcess"))
                .for_service("WPS")
                .for_versions(&WPS_1_0_VERSIONS)
                .attribute("language", "language", text(), false)
                .child(ows("Identifier"), "identifier", Occurs::OneOrMore),
        )?
        .register(
            ElementBinding::complex(wps("Execute"))
                .for_service("WPS")
                .for_versions(&WPS_1_0_VERSIONS)
                .attribute("language", "language", text(), false)
                .child(ows("Identifier"), "identifier", Occurs::Required)
                .child(wps("DataInputs"), "datainputs", Occurs::Optional)
                .child(wps("ResponseForm"), "responseform", Occurs::Optional),
        )?
        .register(ElementBinding::complex(wps("DataInputs")).child(
            wps("Input"),
            "input",
            Occurs::OneOrMore,
        ))?
        .register(
            ElementBinding::complex(wps("Input"))
                .child(ows("Identifier"), "identifier", Occurs::Required)
                .child(ows("Title"), "title", Occurs::Optional)
                .child(wps("Data"), "data", Occurs::Optional)
                .child(wps("Reference"), "reference", Occurs::Optional),
        )?
        .register(ElementBinding::simple(ows("Title"), text()))?
        .register(
            ElementBinding::complex(wps("Data"))
                .child(wps("LiteralData"), "literaldata", Occurs::Optional)
                .child(wps("ComplexData"), "complexdata", Occurs::Optional),
        )?
        .register(
            ElementBinding::simple(wps("LiteralData"), text())
                .attribute("dataType", "datatype", text(), false)
                .attribute("uom", "uom", text(), false),
        )?
        .register(FragmentBinding::new(wps("ComplexData")))?
        .register(
            ElementBinding::complex(wps("Reference"))
                .qualified_attribute(XLINK, "href", "href", text(), true)
                .attribute("mimeType", "mimetype", text(), false)
                .attribute("method", "method", Arc::new(EnumDecoder::new(["GET", "POST"])), false),
        )?
        .register(
            ElementBinding::complex(wps("ResponseForm"))
                .child(wps("RawDataOutput"), "rawdataoutput", Occurs::Optional)
                .child(wps("ResponseDocument"), "responsedocument", Occurs::Optional),
        )?
        .register(
            ElementBinding::complex(wps("RawDataOutput"))
                .attribute("mimeType", "mimetype", text(), false)
                .child(ows("Identifier"), "identifier", Occurs::Required),
        )?
        .register(
            ElementBinding::complex(wps("ResponseDocument"))
                .attribute("storeExecuteResponse", "storeexecuteresponse", boolean(), false)
                .attribute("lineage", "lineage", boolean(), false)
                .attribute("status", "status", boolean(), false)
                .child(wps("Output"), "output", Occurs::Many),
        )?
        .register(
            ElementBinding::complex(wps("Output"))
                .attribute("asReference", "asreference", boolean(), false)
                .attribute("mimeType", "mimetype", text(), false)
                .child(ows("Identifier"), "identifier", Occurs::Required),
        )?;

    Ok(())
}

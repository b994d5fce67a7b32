//! Parser resolution precedence and table bootstrap.

use ows_dispatch::kvp::{ParserRegistry, TextDecoder};
use ows_dispatch::{BuildError, Version};
use std::fs;
use std::sync::Arc;

const V110: Version = Version::new(1, 1, 0);
const V111: Version = Version::new(1, 1, 1);
const V130: Version = Version::new(1, 3, 0);
const V200: Version = Version::new(2, 0, 0);

#[test]
fn test_embedded_version_specific_entries_win() {
    let registry = ParserRegistry::with_embedded_parsers().expect("embedded table");

    let legacy = registry.resolve("WMS", V111, "exceptions").unwrap();
    assert!(legacy.parse("application/vnd.ogc.se_xml").is_ok());
    assert!(legacy.parse("XML").is_err());

    let current = registry.resolve("WMS", V130, "EXCEPTIONS").unwrap();
    assert!(current.parse("XML").is_ok());
    assert!(current.parse("application/vnd.ogc.se_xml").is_err());
}

#[test]
fn test_embedded_version_only_keys() {
    let registry = ParserRegistry::with_embedded_parsers().unwrap();
    assert!(registry.resolve("WMS", V130, "i").is_some());
    assert!(registry.resolve("WMS", V111, "i").is_none());
    assert!(registry.resolve("WFS", V200, "count").is_some());
    assert!(registry.resolve("WFS", V110, "count").is_none());
}

#[test]
fn test_same_key_differs_by_service() {
    let registry = ParserRegistry::with_embedded_parsers().unwrap();
    let wms = registry.resolve("wms", V111, "format").unwrap();
    let wcs = registry.resolve("wcs", V111, "format").unwrap();
    assert_eq!(wms.decoder().kind(), "enum");
    assert_eq!(wcs.decoder().kind(), "text");
}

#[test]
fn test_global_entries_serve_every_service() {
    let registry = ParserRegistry::with_embedded_parsers().unwrap();
    for service in ["WMS", "WFS", "WCS", "WPS"] {
        let parser = registry
            .resolve(service, V111, "acceptversions")
            .unwrap_or_else(|| panic!("acceptversions missing for {}", service));
        let versions = parser.parse("2.0.0,1.1.0").unwrap();
        assert_eq!(versions.as_list().map(|items| items.len()), Some(2));
    }
}

#[test]
fn test_table_file_bootstrap() {
    let path = std::env::temp_dir().join(format!("ows-parsers-{}.json", uuid::Uuid::new_v4()));
    fs::write(
        &path,
        r#"{ "parsers": [
            { "service": "WMS", "key": "dpi", "decoder": { "type": "integer", "min": 1, "max": 600 } },
            { "service": "WMS", "version": "1.3.0", "key": "dpi", "decoder": { "type": "double" } },
            { "key": "format_options", "decoder": { "type": "list", "delimiter": ";" } }
        ] }"#,
    )
    .unwrap();

    let registry = ParserRegistry::from_table_file(&path);
    fs::remove_file(&path).unwrap();
    let registry = registry.expect("table loads");

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.resolve("WMS", V111, "DPI").unwrap().decoder().kind(), "integer");
    assert_eq!(registry.resolve("WMS", V130, "dpi").unwrap().decoder().kind(), "double");
    assert!(registry.resolve("WMS", V111, "dpi").unwrap().parse("900").is_err());

    let options = registry.resolve("WFS", V110, "format_options").unwrap();
    assert_eq!(
        options.parse("dpi:96;antialias:on").unwrap().text_items(),
        vec!["dpi:96", "antialias:on"]
    );
}

#[test]
fn test_missing_table_file() {
    let result = ParserRegistry::from_table_file("/nonexistent/parsers.json");
    assert!(matches!(result, Err(BuildError::Io(_))));
}

#[test]
fn test_table_with_duplicate_entry_rejected() {
    let result = ParserRegistry::from_table_str(
        r#"{ "parsers": [
            { "service": "WMS", "key": "layers", "decoder": { "type": "list" } },
            { "service": "wms", "key": "LAYERS", "decoder": { "type": "text" } }
        ] }"#,
    );
    assert!(matches!(result, Err(BuildError::DuplicateParser { .. })));
}

#[test]
fn test_table_with_unknown_decoder_rejected() {
    let result = ParserRegistry::from_table_str(
        r#"{ "parsers": [ { "key": "layers", "decoder": { "type": "rainbow" } } ] }"#,
    );
    assert!(matches!(result, Err(BuildError::Json(_))));
}

#[test]
fn test_frozen_registry_is_shareable() {
    let mut builder = ParserRegistry::builder();
    builder
        .register(Some("WFS"), None, "srsname", Arc::new(TextDecoder))
        .unwrap();
    let registry = Arc::new(builder.freeze());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.resolve("WFS", V110, "srsName").is_some())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

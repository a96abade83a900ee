// crates/ek-esi/tests/parsing.rs

use ek_esi::{
    DEFAULT_MAPPING_NAME, EsiError, MatchOutcome, PdoDirection, Registry, load_esi_from_str,
    render_terminal,
};
use std::fs;
use std::path::PathBuf;

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

/// A document with a single EL3064 declaring one 32-bit TxPdo.
const MINIMAL_EL3064: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<EtherCATInfo>
  <Descriptions>
    <Devices>
      <Device>
        <Type RevisionNo="#x00140000">EL3064</Type>
        <TxPdo>
          <Index>#x1A00</Index>
          <Name>AI Standard Ch.1</Name>
          <Entry><Index>#x6000</Index><SubIndex>1</SubIndex><BitLen>16</BitLen><Name>Status</Name><DataType>UINT</DataType></Entry>
          <Entry><Index>#x6000</Index><SubIndex>#x11</SubIndex><BitLen>16</BitLen><Name>Value</Name><DataType>INT</DataType></Entry>
        </TxPdo>
      </Device>
    </Devices>
  </Descriptions>
</EtherCATInfo>"##;

#[test]
fn test_minimal_el3064() {
    let document = load_esi_from_str(MINIMAL_EL3064).expect("Failed to parse minimal ESI");
    let terminals = document.terminals().unwrap();
    assert_eq!(terminals.len(), 1);

    let info = &terminals[0];
    assert_eq!(info.name, "EL3064");
    assert!(info.rxpdo.is_empty());
    assert_eq!(info.txpdo.len(), 1);
    assert_eq!(info.txpdo[0].bit_length(), 32);
    assert_eq!(info.txpdo[0].word_length(), 2);

    assert_eq!(info.mappings.len(), 1);
    assert_eq!(info.mappings[0].name, DEFAULT_MAPPING_NAME);
    assert_eq!(info.mappings[0].input_indices, [0x1A00]);
    assert!(info.mappings[0].output_indices.is_empty());

    let size = info.size_for_mapping(&info.mappings[0]).unwrap();
    assert_eq!(size.input_words, [2]);
    assert!(size.output_words.is_empty());
}

/// Resolves a realistic vendor document: padding entries, alternative
/// mappings and unrelated device elements.
#[test]
fn test_vendor_document() {
    let xml = load_test_file("Beckhoff EL30xx.xml");
    let document = load_esi_from_str(&xml).expect("Failed to parse EL30xx document");
    let terminals = document.terminals().unwrap();
    let names: Vec<&str> = terminals.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["EL3064", "EL3054"]);

    let el3064 = &terminals[0];
    assert_eq!(el3064.revision, "#x00140000");
    assert!(el3064.txpdo[0].fixed && el3064.txpdo[0].mandatory);
    assert!(el3064.txpdo[1].fixed && !el3064.txpdo[1].mandatory);
    assert_eq!(el3064.txpdo[0].entries[1].subindex, Some(17));

    let mapping_names: Vec<&str> = el3064.mappings.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(mapping_names, [DEFAULT_MAPPING_NAME, "Standard", "Compact"]);
    assert_eq!(el3064.mappings[0].input_indices, [0x1A00, 0x1A01]);
    assert!(el3064.mappings[1].is_default);
    assert_eq!(el3064.mappings[2].input_indices, [0x1A01]);

    let el3054 = &terminals[1];
    let pdo = el3054.pdo_by_index(0x1A00, PdoDirection::Tx).unwrap();
    assert_eq!(pdo.entries.len(), 4);
    assert_eq!(pdo.entries[2].name, None);
    assert_eq!(pdo.bit_length(), 32);
    assert_eq!(pdo.byte_length(), 4);
}

/// Checks every mapping of the fixture terminals against the fixture registry.
#[test]
fn test_registry_verification() {
    let registry = Registry::from_json_str(&load_test_file("terminals.json")).unwrap();
    let document = load_esi_from_str(&load_test_file("Beckhoff EL30xx.xml")).unwrap();
    let el3064 = document.device(0).unwrap().resolve().unwrap();

    let outcomes: Vec<String> = el3064
        .mappings
        .iter()
        .map(|m| {
            let size = el3064.size_for_mapping(m).unwrap();
            registry.evaluate(&el3064.name, &size).to_string()
        })
        .collect();
    assert_eq!(
        outcomes,
        [
            "terminals.json differs: inputs=1 pdo_in_size=2",
            "terminals.json **matches**",
            "terminals.json differs: pdo_in_size=2",
        ]
    );

    let el3054 = document.device(1).unwrap().resolve().unwrap();
    for mapping in &el3054.mappings {
        let size = el3054.size_for_mapping(mapping).unwrap();
        assert_eq!(registry.evaluate(&el3054.name, &size), MatchOutcome::NotInRegistry);
    }
}

#[test]
fn test_stale_alternative_mapping() {
    let document = load_esi_from_str(&load_test_file("Beckhoff EL4xxx.xml")).unwrap();
    let el4002 = document.device(1).unwrap().resolve().unwrap();
    assert_eq!(el4002.mappings.len(), 3);

    assert!(el4002.size_for_mapping(&el4002.mappings[1]).is_ok());
    let err = el4002.size_for_mapping(&el4002.mappings[2]).unwrap_err();
    assert!(
        matches!(
            err,
            EsiError::UnknownIndex {
                index: 0x1602,
                direction: PdoDirection::Rx
            }
        ),
        "Expected UnknownIndex, got {:?}",
        err
    );
}

/// Devices are only resolved on request, so a broken device does not hide
/// the type names of the others.
#[test]
fn test_broken_device_is_reported_on_resolve() {
    let xml = MINIMAL_EL3064.replace(
        "<Entry><Index>#x6000</Index><SubIndex>1</SubIndex><BitLen>16</BitLen>",
        "<Entry><Index>#x6000</Index><SubIndex>1</SubIndex><BitLen>sixteen</BitLen>",
    );
    let document = load_esi_from_str(&xml).unwrap();
    let device = document.device(0).unwrap();
    assert_eq!(device.type_name().unwrap(), "EL3064");

    let result = device.resolve();
    assert!(
        matches!(
            &result,
            Err(EsiError::InvalidNumber { element: "BitLen", value }) if value == "sixteen"
        ),
        "Expected InvalidNumber, got {:?}",
        result
    );
}

#[test]
fn test_overflowing_bit_lengths_fail_on_resolve() {
    let xml = MINIMAL_EL3064
        .replace("<BitLen>16</BitLen><Name>Status</Name>", "<BitLen>4294967295</BitLen><Name>Status</Name>")
        .replace("<BitLen>16</BitLen><Name>Value</Name>", "<BitLen>1</BitLen><Name>Value</Name>");
    let document = load_esi_from_str(&xml).unwrap();
    let result = document.device(0).unwrap().resolve();
    assert!(
        matches!(&result, Err(EsiError::InvalidNumber { element: "BitLen", .. })),
        "Expected InvalidNumber, got {:?}",
        result
    );
}

#[test]
fn test_empty_entry_name_renders_as_dash() {
    let xml = MINIMAL_EL3064.replace("<Name>Status</Name>", "<Name/>");
    let document = load_esi_from_str(&xml).unwrap();
    let el3064 = document.device(0).unwrap().resolve().unwrap();
    assert_eq!(el3064.txpdo[0].entries[0].name, None);

    let mut report = String::new();
    render_terminal(&mut report, &el3064, &Registry::default()).unwrap();
    assert!(report.contains("      - -: 16 bits (UINT)\n"));
}

#[test]
fn test_ambiguous_type() {
    let xml = MINIMAL_EL3064.replace(
        r##"<Type RevisionNo="#x00140000">EL3064</Type>"##,
        "<Type>EL3064</Type><Type>EL3062</Type>",
    );
    let document = load_esi_from_str(&xml).unwrap();
    let result = document.device(0).unwrap().type_name();
    assert!(matches!(
        result,
        Err(EsiError::AmbiguousElement {
            element: "Type",
            count: 2
        })
    ));
}

#[test]
fn test_malformed_xml_syntax() {
    let xml = r#"<EtherCATInfo><Descriptions><Devices> ... missing closing tags"#;
    let result = load_esi_from_str(xml);
    assert!(
        matches!(result, Err(EsiError::XmlParsing(_))),
        "Expected XmlParsing error, got {:?}",
        result
    );
}

// src/parser.rs

use crate::error::EsiError;
use crate::model;
use crate::resolver;
use crate::types::TerminalInfo;
use log::debug;
use std::num::ParseIntError;

/// A deserialized ESI document.
///
/// Holds the raw device descriptions; terminals are only resolved on request,
/// so devices that are never looked at cannot fail a scan on their contents.
#[derive(Debug)]
pub struct EsiDocument {
    devices: Vec<model::Device>,
}

/// A borrowed view of one `<Device>` inside an [`EsiDocument`].
#[derive(Debug, Clone, Copy)]
pub struct DeviceEntry<'a> {
    device: &'a model::Device,
}

/// Parses an ESI (EtherCAT Slave Information) string slice.
///
/// All `Descriptions/Devices/Device` elements are collected in document order.
///
/// # Errors
/// Returns an `EsiError::XmlParsing` if the text is not a well-formed
/// `EtherCATInfo` document.
pub fn load_esi_from_str(xml_content: &str) -> Result<EsiDocument, EsiError> {
    let info: model::EtherCatInfo = quick_xml::de::from_str(xml_content)?;

    let devices: Vec<model::Device> = info
        .descriptions
        .into_iter()
        .flat_map(|d| d.devices)
        .flat_map(|d| d.device)
        .collect();

    debug!("Loaded ESI document with {} devices", devices.len());
    Ok(EsiDocument { devices })
}

impl EsiDocument {
    /// Number of devices declared by the document.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns the device at `position` (document order).
    pub fn device(&self, position: usize) -> Option<DeviceEntry<'_>> {
        self.devices.get(position).map(|device| DeviceEntry { device })
    }

    /// Iterates the devices in document order.
    pub fn devices(&self) -> impl Iterator<Item = DeviceEntry<'_>> {
        self.devices.iter().map(|device| DeviceEntry { device })
    }

    /// Resolves every device of the document.
    pub fn terminals(&self) -> Result<Vec<TerminalInfo>, EsiError> {
        self.devices().map(|d| d.resolve()).collect()
    }
}

impl<'a> DeviceEntry<'a> {
    /// The `<Type>` text of the device.
    ///
    /// # Errors
    /// `MissingElement` when there is no `<Type>`, `AmbiguousElement` when there
    /// is more than one.
    pub fn type_name(&self) -> Result<&'a str, EsiError> {
        resolver::device_type(self.device).map(|t| t.value.trim())
    }

    /// Builds the full [`TerminalInfo`] for this device.
    pub fn resolve(&self) -> Result<TerminalInfo, EsiError> {
        resolver::resolve_terminal(self.device)
    }
}

// --- Helper Functions (Public for use in the resolver) ---

/// Parses an ESI number: `#x`-prefixed hex ("#x1A00") or plain decimal ("6656").
pub fn parse_esi_u32(s: &str) -> Result<u32, ParseIntError> {
    let trimmed = s.trim();
    match trimmed.strip_prefix("#x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse(),
    }
}

/// Parses an ESI number into a u16 (object and PDO indices).
pub fn parse_esi_u16(s: &str) -> Result<u16, ParseIntError> {
    let trimmed = s.trim();
    match trimmed.strip_prefix("#x") {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => trimmed.parse(),
    }
}

/// Parses an ESI number into a u8 (sub-indices).
pub fn parse_esi_u8(s: &str) -> Result<u8, ParseIntError> {
    let trimmed = s.trim();
    match trimmed.strip_prefix("#x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => trimmed.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_decimal_agree() {
        assert_eq!(parse_esi_u32("#x10"), Ok(16));
        assert_eq!(parse_esi_u32("16"), Ok(16));
        for value in [0u32, 1, 9, 10, 255, 4096, 6656, 65535, 1 << 20] {
            let hex = format!("#x{:X}", value);
            let lower = format!("#x{:x}", value);
            assert_eq!(parse_esi_u32(&hex), parse_esi_u32(&value.to_string()));
            assert_eq!(parse_esi_u32(&lower), Ok(value));
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_esi_u16(" #x1A00\n"), Ok(0x1A00));
        assert_eq!(parse_esi_u8("\t3 "), Ok(3));
    }

    #[test]
    fn test_rejects_other_encodings() {
        assert!(parse_esi_u16("0x1A00").is_err());
        assert!(parse_esi_u16("#b101").is_err());
        assert!(parse_esi_u16("").is_err());
        assert!(parse_esi_u8("#x100").is_err());
    }

    #[test]
    fn test_load_collects_devices_in_order() {
        let xml = r#"<EtherCATInfo>
            <Vendor><Id>2</Id></Vendor>
            <Descriptions>
              <Groups><Group><Type>AnaIn</Type></Group></Groups>
              <Devices>
                <Device><Type>EL3064</Type></Device>
                <Device><Type>EL3062</Type></Device>
              </Devices>
            </Descriptions>
          </EtherCATInfo>"#;
        let doc = load_esi_from_str(xml).unwrap();
        let names: Vec<&str> = doc.devices().map(|d| d.type_name().unwrap()).collect();
        assert_eq!(names, ["EL3064", "EL3062"]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_load_without_devices() {
        let doc = load_esi_from_str("<EtherCATInfo><Vendor/></EtherCATInfo>").unwrap();
        assert!(doc.is_empty());
        assert!(doc.device(0).is_none());
    }

    #[test]
    fn test_malformed_document() {
        let result = load_esi_from_str("<EtherCATInfo><Descriptions>");
        assert!(matches!(result, Err(EsiError::XmlParsing(_))));
    }
}

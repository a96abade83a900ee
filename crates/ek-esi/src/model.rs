//! Internal `serde` data structures that map directly to the ESI XML schema.
//!
//! This module defines the raw structure of an `EtherCATInfo` document as far
//! as this crate needs it. Every child element that the schema allows at most
//! once is still collected into a `Vec`, so the resolver can tell "absent"
//! apart from "ambiguous" instead of letting the deserializer pick one.
//! Elements not named here (`Vendor`, `Groups`, `Fmmu`, `Eeprom`, ...) are
//! skipped by `serde`.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use serde::Deserialize;

/// The root element of an ESI file.
#[derive(Debug, Deserialize, Default)]
#[serde(rename = "EtherCATInfo")]
pub struct EtherCatInfo {
    #[serde(rename = "Descriptions", default)]
    pub descriptions: Vec<Descriptions>,
}

/// Represents `<Descriptions>`.
#[derive(Debug, Deserialize, Default)]
pub struct Descriptions {
    #[serde(rename = "Devices", default)]
    pub devices: Vec<Devices>,
}

/// Represents `<Devices>`.
#[derive(Debug, Deserialize, Default)]
pub struct Devices {
    #[serde(rename = "Device", default)]
    pub device: Vec<Device>,
}

/// Represents a single `<Device>`, one terminal revision.
#[derive(Debug, Deserialize, Default)]
pub struct Device {
    #[serde(rename = "Type", default)]
    pub device_type: Vec<DeviceType>,

    #[serde(rename = "RxPdo", default)]
    pub rx_pdo: Vec<Pdo>,

    #[serde(rename = "TxPdo", default)]
    pub tx_pdo: Vec<Pdo>,

    #[serde(rename = "Info", default)]
    pub info: Vec<DeviceInfo>,
}

/// Represents `<Type ProductCode="#x0bf03052" RevisionNo="#x00140000">EL3064</Type>`.
#[derive(Debug, Deserialize, Default)]
pub struct DeviceType {
    #[serde(rename = "@ProductCode", default)]
    pub product_code: Option<String>,

    #[serde(rename = "@RevisionNo", default)]
    pub revision_no: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Represents an `<RxPdo>` or `<TxPdo>` element.
#[derive(Debug, Deserialize, Default)]
pub struct Pdo {
    #[serde(rename = "@Fixed", default)]
    pub fixed: Option<String>,

    #[serde(rename = "@Mandatory", default)]
    pub mandatory: Option<String>,

    #[serde(rename = "Index", default)]
    pub index: Vec<TextElement>,

    #[serde(rename = "Name", default)]
    pub name: Vec<TextElement>,

    #[serde(rename = "Entry", default)]
    pub entry: Vec<PdoEntry>,
}

/// Represents an `<Entry>` inside a PDO.
#[derive(Debug, Deserialize, Default)]
pub struct PdoEntry {
    #[serde(rename = "Index", default)]
    pub index: Vec<TextElement>,

    #[serde(rename = "SubIndex", default)]
    pub sub_index: Vec<TextElement>,

    #[serde(rename = "BitLen", default)]
    pub bit_len: Vec<TextElement>,

    #[serde(rename = "Name", default)]
    pub name: Vec<TextElement>,

    #[serde(rename = "DataType", default)]
    pub data_type: Vec<TextElement>,
}

/// Represents `<Info>` under a `<Device>`.
#[derive(Debug, Deserialize, Default)]
pub struct DeviceInfo {
    #[serde(rename = "VendorSpecific", default)]
    pub vendor_specific: Vec<VendorSpecific>,
}

/// Represents `<VendorSpecific>`.
#[derive(Debug, Deserialize, Default)]
pub struct VendorSpecific {
    #[serde(rename = "TwinCAT", default)]
    pub twincat: Vec<TwinCat>,
}

/// Represents the `<TwinCAT>` vendor tool section.
#[derive(Debug, Deserialize, Default)]
pub struct TwinCat {
    #[serde(rename = "AlternativeSmMapping", default)]
    pub alternative_sm_mapping: Vec<AlternativeSmMapping>,
}

/// Represents `<AlternativeSmMapping>`, a vendor-declared subset of PDOs.
#[derive(Debug, Deserialize, Default)]
pub struct AlternativeSmMapping {
    #[serde(rename = "@Default", default)]
    pub default: Option<String>,

    #[serde(rename = "Name", default)]
    pub name: Vec<TextElement>,

    #[serde(rename = "Sm", default)]
    pub sm: Vec<SmAssignment>,
}

/// Represents `<Sm No="2"><Pdo>#x1600</Pdo></Sm>` inside an alternative mapping.
#[derive(Debug, Deserialize, Default)]
pub struct SmAssignment {
    #[serde(rename = "@No", default)]
    pub no: Option<String>,

    #[serde(rename = "Pdo", default)]
    pub pdo: Vec<TextElement>,
}

/// Any element whose text content is the only thing read, e.g.
/// `<Name LcId="1033">Channel 1</Name>`. Attributes are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TextElement {
    #[serde(rename = "$text", default)]
    pub value: String,
}

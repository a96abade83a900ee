// crates/ek-esi/src/types.rs

//! Public, ergonomic data structures for a resolved ESI terminal.

use serde::Serialize;
use std::fmt;

/// Name of the mapping synthesized from every PDO a device declares.
pub const DEFAULT_MAPPING_NAME: &str = "All PDOs";

// --- PDO Entries ---

/// One sub-field of a PDO, taken from an `<Entry>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdoEntry {
    /// `<Name>` (absent on padding entries)
    pub name: Option<String>,
    /// `<Index>` of the mapped object (0 for padding)
    pub index: u16,
    /// `<SubIndex>`
    pub subindex: Option<u8>,
    /// `<BitLen>`
    pub bit_length: u32,
    /// `<DataType>`
    pub data_type: Option<String>,
}

// --- PDOs ---

/// A process-data object declared by an `<RxPdo>` or `<TxPdo>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdoInfo {
    pub name: String,
    pub index: u16,
    /// `Fixed="1"`: the entry list may not be changed.
    pub fixed: bool,
    /// `Mandatory="1"`: the PDO must always be assigned.
    pub mandatory: bool,
    /// Entries in document order.
    pub entries: Vec<PdoEntry>,
}

impl PdoInfo {
    /// PDO size in bits. Saturates at `u32::MAX`; the resolver rejects
    /// PDOs whose entries add up to more.
    pub fn bit_length(&self) -> u32 {
        self.entries
            .iter()
            .fold(0, |total, entry| total.saturating_add(entry.bit_length))
    }

    /// PDO size in bytes, rounded up.
    pub fn byte_length(&self) -> u32 {
        self.bit_length().div_ceil(8)
    }

    /// PDO size in 16-bit words, rounded up.
    pub fn word_length(&self) -> u32 {
        self.bit_length().div_ceil(16)
    }

    /// One-line description used by the human-readable report, e.g.
    /// `AI TxPDO-Map Standard Ch.1 (2 words @ 0x1A00 mandatory)`.
    pub fn summary(&self) -> String {
        let flags: Vec<&str> = [
            (self.mandatory, "mandatory"),
            (self.fixed, "fixed"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect();

        if flags.is_empty() {
            format!(
                "{} ({} words @ 0x{:04X})",
                self.name,
                self.word_length(),
                self.index
            )
        } else {
            format!(
                "{} ({} words @ 0x{:04X} {})",
                self.name,
                self.word_length(),
                self.index,
                flags.join(" ")
            )
        }
    }
}

/// Selects the PDO list of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PdoDirection {
    /// Outputs (`<RxPdo>`, sync manager 2).
    Rx,
    /// Inputs (`<TxPdo>`, sync manager 3).
    Tx,
}

impl fmt::Display for PdoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdoDirection::Rx => f.write_str("RxPdo"),
            PdoDirection::Tx => f.write_str("TxPdo"),
        }
    }
}

// --- Mappings ---

/// A set of PDOs assigned to the output (SM2) and input (SM3) sync managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlaveMapping {
    pub name: String,
    /// `Default="1"` on the vendor mapping. Always false for the synthesized one.
    pub is_default: bool,
    /// RxPdo indices on sync manager 2.
    pub output_indices: Vec<u16>,
    /// TxPdo indices on sync manager 3.
    pub input_indices: Vec<u16>,
}

// --- Terminal ---

/// Everything extracted for one `<Device>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalInfo {
    /// `<Type>` text, e.g. `EL3064`.
    pub name: String,
    /// `RevisionNo` attribute of `<Type>`, empty when absent.
    pub revision: String,
    /// Output PDOs.
    pub rxpdo: Vec<PdoInfo>,
    /// Input PDOs.
    pub txpdo: Vec<PdoInfo>,
    /// The `"All PDOs"` mapping first, then any vendor alternatives.
    pub mappings: Vec<SlaveMapping>,
}

impl TerminalInfo {
    /// Returns the PDO list for the given direction.
    pub fn pdos(&self, direction: PdoDirection) -> &[PdoInfo] {
        match direction {
            PdoDirection::Rx => &self.rxpdo,
            PdoDirection::Tx => &self.txpdo,
        }
    }
}

// src/lib.rs

#![doc = "Parses EtherCAT ESI (EtherCAT Slave Information) device descriptions and"]
#![doc = "verifies the derived process-data sizes against the EK9000 terminal registry."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_esi_from_str`: Loading one ESI document and exposing its devices."]
#![doc = "- `TerminalInfo::size_for_mapping`: Word counts for a sync-manager mapping."]
#![doc = "- `Registry::evaluate`: Comparing computed sizes against `terminals.json`."]
#![doc = "- `find_matching`: Lazily scanning a document repository for terminals."]

// --- Crate Modules ---

mod error;
mod model;
mod parser;
mod registry;
mod report;
mod repository;
mod resolver;
mod search;
mod sizing;
mod types;

// --- Public API Re-exports ---

pub use error::EsiError;
pub use parser::{DeviceEntry, EsiDocument, load_esi_from_str, parse_esi_u8, parse_esi_u16, parse_esi_u32};
pub use registry::{
    FieldDifference, MatchOutcome, Registry, RegistryEntry, TerminalCategory, TerminalKind,
    TerminalSpecs,
};
pub use report::{MappingEvaluation, MappingRecord, TerminalRecord, evaluate_mappings, render_terminal};
pub use repository::{DirectoryRepository, DocumentRepository, MemoryRepository};
pub use search::{NamePattern, TerminalSearch, find_matching};
pub use sizing::MappingSize;
pub use types::{DEFAULT_MAPPING_NAME, PdoDirection, PdoEntry, PdoInfo, SlaveMapping, TerminalInfo};

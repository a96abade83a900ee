// crates/ek-esi/src/registry.rs

//! The hand-maintained terminal registry (`terminals.json`) and the
//! comparison of computed mapping sizes against it.

use crate::error::EsiError;
use crate::sizing::MappingSize;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Category tags allowed in the registry's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCategory {
    AnalogIn,
    AnalogOut,
    DigIn,
    DigOut,
    PositionMeasurement,
    DigInMulti,
    DigOutMulti,
}

/// The registry's `type` field: one tag or a list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TerminalKind {
    Single(TerminalCategory),
    Multiple(Vec<TerminalCategory>),
}

/// Optional engineering data used by the record generators, not by the comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminalSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
}

/// One element of the registry's `terminals` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TerminalKind,
    pub inputs: u32,
    pub outputs: u32,
    pub pdo_in_size: u32,
    pub pdo_out_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtyp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<TerminalSpecs>,
}

#[derive(Deserialize)]
struct RegistryFile {
    terminals: Vec<RegistryEntry>,
}

/// A field whose computed value differs from the registered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDifference {
    pub field: &'static str,
    pub registered: u32,
    pub computed: u32,
}

impl fmt::Display for FieldDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.registered)
    }
}

/// Result of checking one mapping against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The terminal has no registry entry.
    NotInRegistry,
    /// All compared fields agree.
    Matches,
    /// The differing fields, in comparison order.
    Differs(Vec<FieldDifference>),
}

impl MatchOutcome {
    /// The differing fields; empty unless `Differs`.
    pub fn differences(&self) -> &[FieldDifference] {
        match self {
            MatchOutcome::Differs(diffs) => diffs,
            _ => &[],
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::NotInRegistry => f.write_str("not in terminals.json"),
            MatchOutcome::Matches => f.write_str("terminals.json **matches**"),
            MatchOutcome::Differs(diffs) => {
                f.write_str("terminals.json differs:")?;
                for diff in diffs {
                    write!(f, " {}", diff)?;
                }
                Ok(())
            }
        }
    }
}

impl RegistryEntry {
    /// Compares `inputs`, `outputs`, `pdo_in_size` and `pdo_out_size`.
    pub fn compare(&self, size: &MappingSize) -> MatchOutcome {
        let to_compare = [
            ("inputs", self.inputs, size.inputs()),
            ("outputs", self.outputs, size.outputs()),
            ("pdo_in_size", self.pdo_in_size, size.pdo_in_size()),
            ("pdo_out_size", self.pdo_out_size, size.pdo_out_size()),
        ];

        let differences: Vec<FieldDifference> = to_compare
            .into_iter()
            .filter(|(_, registered, computed)| registered != computed)
            .map(|(field, registered, computed)| FieldDifference {
                field,
                registered,
                computed,
            })
            .collect();

        if differences.is_empty() {
            MatchOutcome::Matches
        } else {
            MatchOutcome::Differs(differences)
        }
    }
}

/// The terminal registry, keyed by terminal name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    terminals: BTreeMap<String, RegistryEntry>,
}

impl Registry {
    /// Builds a registry from entries. A repeated name replaces the earlier entry.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let mut terminals = BTreeMap::new();
        for entry in entries {
            if let Some(previous) = terminals.insert(entry.name.clone(), entry) {
                warn!("Registry lists {} more than once; using the last entry", previous.name);
            }
        }
        Self { terminals }
    }

    /// Parses the registry JSON (`{"terminals": [...]}`).
    pub fn from_json_str(json: &str) -> Result<Self, EsiError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        Ok(Self::from_entries(file.terminals))
    }

    /// Reads and parses a registry file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EsiError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| EsiError::from(e).in_document(&name))?;
        Self::from_json_str(&json).map_err(|e| e.in_document(&name))
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.terminals.get(name)
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    /// Checks a sized mapping of terminal `name` against its registry entry.
    pub fn evaluate(&self, name: &str, size: &MappingSize) -> MatchOutcome {
        match self.get(name) {
            Some(entry) => entry.compare(size),
            None => MatchOutcome::NotInRegistry,
        }
    }
}

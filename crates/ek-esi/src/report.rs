// crates/ek-esi/src/report.rs

//! Rendering of search results: a nested human-readable report, or one JSON
//! record per terminal.

use crate::error::EsiError;
use crate::registry::{FieldDifference, MatchOutcome, Registry};
use crate::sizing::MappingSize;
use crate::types::{PdoInfo, SlaveMapping, TerminalInfo};
use serde::Serialize;
use std::fmt::{self, Write};

/// Sizing and registry check of one mapping of a terminal.
#[derive(Debug)]
pub struct MappingEvaluation<'a> {
    pub mapping: &'a SlaveMapping,
    /// Word counts, or the lookup error that stopped the sizing.
    pub size: Result<MappingSize, EsiError>,
    /// `None` when the mapping could not be sized.
    pub outcome: Option<MatchOutcome>,
}

/// Sizes every mapping of `info` and checks it against `registry`.
///
/// A lookup error only affects its own mapping.
pub fn evaluate_mappings<'a>(info: &'a TerminalInfo, registry: &Registry) -> Vec<MappingEvaluation<'a>> {
    info.mappings
        .iter()
        .map(|mapping| {
            let size = info.size_for_mapping(mapping);
            let outcome = size
                .as_ref()
                .ok()
                .map(|size| registry.evaluate(&info.name, size));
            MappingEvaluation {
                mapping,
                size,
                outcome,
            }
        })
        .collect()
}

/// Writes the human-readable report for one terminal.
///
/// ```text
/// EL3064 rev #x00140000
///   - TxPdo
///    0. AI TxPDO-Map Standard Ch.1 (2 words @ 0x1A00 mandatory fixed)
///       - Status: 16 bits (UINT)
///       - Value: 16 bits (INT)
///    * Mapping 'All PDOs'
///      pdo_in_size=2 entries=[2] pdo_out_size=0 entries=[] / not in terminals.json
/// ```
pub fn render_terminal<W: Write>(out: &mut W, info: &TerminalInfo, registry: &Registry) -> fmt::Result {
    writeln!(out, "{} rev {}", info.name, info.revision)?;
    render_pdo_list(out, "RxPdo", &info.rxpdo)?;
    render_pdo_list(out, "TxPdo", &info.txpdo)?;

    for evaluation in evaluate_mappings(info, registry) {
        writeln!(out, "   * Mapping '{}'", evaluation.mapping.name)?;
        match (&evaluation.size, &evaluation.outcome) {
            (Ok(size), Some(outcome)) => writeln!(
                out,
                "     pdo_in_size={} entries={:?} pdo_out_size={} entries={:?} / {}",
                size.pdo_in_size(),
                size.input_words,
                size.pdo_out_size(),
                size.output_words,
                outcome
            )?,
            (Err(e), _) => writeln!(out, "     sizing failed: {}", e)?,
            (Ok(_), None) => {}
        }
    }
    Ok(())
}

fn render_pdo_list<W: Write>(out: &mut W, label: &str, pdos: &[PdoInfo]) -> fmt::Result {
    if pdos.is_empty() {
        return Ok(());
    }
    writeln!(out, "  - {}", label)?;
    for (idx, pdo) in pdos.iter().enumerate() {
        writeln!(out, "   {}. {}", idx, pdo.summary())?;
        for entry in &pdo.entries {
            writeln!(
                out,
                "      - {}: {} bits ({})",
                entry.name.as_deref().unwrap_or("-"),
                entry.bit_length,
                entry.data_type.as_deref().unwrap_or("-")
            )?;
        }
    }
    Ok(())
}

// --- Structured records ---

/// Sizing and registry status of one mapping, as emitted in JSON records.
#[derive(Debug, Serialize)]
pub struct MappingRecord {
    pub mapping: String,
    pub input_words: Vec<u32>,
    pub output_words: Vec<u32>,
    pub pdo_in_size: u32,
    pub pdo_out_size: u32,
    /// `matches`, `differs`, `not_in_registry` or `error`.
    pub registry: &'static str,
    /// The differing fields, in comparison order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<FieldDifference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One self-contained record per terminal: the extracted layout plus the
/// evaluation of each of its mappings.
#[derive(Debug, Serialize)]
pub struct TerminalRecord<'a> {
    #[serde(flatten)]
    pub terminal: &'a TerminalInfo,
    pub evaluations: Vec<MappingRecord>,
}

impl<'a> TerminalRecord<'a> {
    pub fn new(info: &'a TerminalInfo, registry: &Registry) -> Self {
        let evaluations = evaluate_mappings(info, registry)
            .into_iter()
            .map(MappingRecord::from)
            .collect();
        Self {
            terminal: info,
            evaluations,
        }
    }

    /// Serializes the record as a single line of JSON.
    pub fn to_json_line(&self) -> Result<String, EsiError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<MappingEvaluation<'_>> for MappingRecord {
    fn from(evaluation: MappingEvaluation<'_>) -> Self {
        let mapping = evaluation.mapping.name.clone();
        match evaluation.size {
            Ok(size) => {
                let (registry, differences) = match &evaluation.outcome {
                    Some(MatchOutcome::Matches) => ("matches", Vec::new()),
                    Some(MatchOutcome::Differs(diffs)) => ("differs", diffs.clone()),
                    Some(MatchOutcome::NotInRegistry) | None => ("not_in_registry", Vec::new()),
                };
                MappingRecord {
                    mapping,
                    pdo_in_size: size.pdo_in_size(),
                    pdo_out_size: size.pdo_out_size(),
                    input_words: size.input_words,
                    output_words: size.output_words,
                    registry,
                    differences,
                    error: None,
                }
            }
            Err(e) => MappingRecord {
                mapping,
                input_words: Vec::new(),
                output_words: Vec::new(),
                pdo_in_size: 0,
                pdo_out_size: 0,
                registry: "error",
                differences: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

// crates/ek-esi/src/sizing.rs

//! Word counts of a terminal's PDOs under a given sync-manager mapping.

use crate::error::EsiError;
use crate::types::{PdoDirection, PdoInfo, SlaveMapping, TerminalInfo};
use serde::Serialize;

/// Sizes of the PDOs selected by one [`SlaveMapping`], in 16-bit words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingSize {
    /// One count per input (TxPdo) index of the mapping, in mapping order.
    pub input_words: Vec<u32>,
    /// One count per output (RxPdo) index of the mapping, in mapping order.
    pub output_words: Vec<u32>,
}

impl MappingSize {
    /// Number of input PDOs.
    pub fn inputs(&self) -> u32 {
        self.input_words.len() as u32
    }

    /// Number of output PDOs.
    pub fn outputs(&self) -> u32 {
        self.output_words.len() as u32
    }

    /// Total input size in words.
    pub fn pdo_in_size(&self) -> u32 {
        saturating_total(&self.input_words)
    }

    /// Total output size in words.
    pub fn pdo_out_size(&self) -> u32 {
        saturating_total(&self.output_words)
    }
}

fn saturating_total(words: &[u32]) -> u32 {
    words.iter().fold(0, |total, &w| total.saturating_add(w))
}

fn checked_total(words: &[u32], direction: PdoDirection) -> Result<(), EsiError> {
    words
        .iter()
        .try_fold(0u32, |total, &w| total.checked_add(w))
        .map(|_| ())
        .ok_or(EsiError::SizeOverflow { direction })
}

impl TerminalInfo {
    /// Looks up a PDO by its index in the Rx or Tx list.
    ///
    /// # Errors
    /// `UnknownIndex` when no PDO has the index, `DuplicateIndex` when more
    /// than one does.
    pub fn pdo_by_index(&self, index: u16, direction: PdoDirection) -> Result<&PdoInfo, EsiError> {
        let mut matches = self.pdos(direction).iter().filter(|pdo| pdo.index == index);
        let found = matches
            .next()
            .ok_or(EsiError::UnknownIndex { index, direction })?;

        let others = matches.count();
        if others > 0 {
            return Err(EsiError::DuplicateIndex {
                index,
                direction,
                count: others + 1,
            });
        }
        Ok(found)
    }

    /// Word counts for the inputs and outputs selected by `mapping`.
    ///
    /// Inputs are looked up among the TxPdos, outputs among the RxPdos.
    pub fn size_for_mapping(&self, mapping: &SlaveMapping) -> Result<MappingSize, EsiError> {
        let input_words = mapping
            .input_indices
            .iter()
            .map(|&index| Ok(self.pdo_by_index(index, PdoDirection::Tx)?.word_length()))
            .collect::<Result<Vec<_>, EsiError>>()?;
        let output_words = mapping
            .output_indices
            .iter()
            .map(|&index| Ok(self.pdo_by_index(index, PdoDirection::Rx)?.word_length()))
            .collect::<Result<Vec<_>, EsiError>>()?;

        checked_total(&input_words, PdoDirection::Tx)?;
        checked_total(&output_words, PdoDirection::Rx)?;
        Ok(MappingSize {
            input_words,
            output_words,
        })
    }
}

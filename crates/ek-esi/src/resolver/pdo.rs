// crates/ek-esi/src/resolver/pdo.rs

use super::entry::resolve_entry;
use super::utils::{flag, number_u16, single_text};
use crate::error::EsiError;
use crate::model;
use crate::types;

/// Resolves one `<RxPdo>` or `<TxPdo>` element into a [`types::PdoInfo`].
///
/// Entries keep their document order; word offsets downstream rely on it.
pub(super) fn resolve_pdo(model: &model::Pdo) -> Result<types::PdoInfo, EsiError> {
    let name = single_text(&model.name, "Name")?.to_owned();
    let index = number_u16(single_text(&model.index, "Index")?, "Index")?;

    let entries = model
        .entry
        .iter()
        .map(resolve_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let bits = entries
        .iter()
        .map(|entry| u64::from(entry.bit_length))
        .sum::<u64>();
    if u32::try_from(bits).is_err() {
        return Err(EsiError::InvalidNumber {
            element: "BitLen",
            value: bits.to_string(),
        });
    }

    Ok(types::PdoInfo {
        name,
        index,
        fixed: flag(model.fixed.as_deref()),
        mandatory: flag(model.mandatory.as_deref()),
        entries,
    })
}

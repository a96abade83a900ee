// crates/ek-esi/src/resolver/entry.rs

use super::utils::{number_u8, number_u16, number_u32, single_text, single_text_or_none};
use crate::error::EsiError;
use crate::model;
use crate::types;

/// Resolves one `<Entry>` element into a [`types::PdoEntry`].
///
/// `Index` and `BitLen` are required, `SubIndex`, `Name` and `DataType` are not.
pub(super) fn resolve_entry(model: &model::PdoEntry) -> Result<types::PdoEntry, EsiError> {
    let index = number_u16(single_text(&model.index, "Index")?, "Index")?;
    let bit_length = number_u32(single_text(&model.bit_len, "BitLen")?, "BitLen")?;
    let subindex = single_text_or_none(&model.sub_index, "SubIndex")?
        .map(|s| number_u8(s, "SubIndex"))
        .transpose()?;

    Ok(types::PdoEntry {
        name: single_text_or_none(&model.name, "Name")?.map(str::to_owned),
        index,
        subindex,
        bit_length,
        data_type: single_text_or_none(&model.data_type, "DataType")?.map(str::to_owned),
    })
}

// crates/ek-esi/src/resolver/mapping.rs

use super::utils::{flag, number_u16, single_text_or_none};
use crate::error::EsiError;
use crate::model;
use crate::types::{self, DEFAULT_MAPPING_NAME};
use log::debug;

/// Sync manager carrying the outputs (RxPdo).
const SM_OUTPUTS: &str = "2";
/// Sync manager carrying the inputs (TxPdo).
const SM_INPUTS: &str = "3";

/// Builds the `"All PDOs"` mapping from the device's own PDO lists.
pub(super) fn default_mapping(
    rxpdo: &[types::PdoInfo],
    txpdo: &[types::PdoInfo],
) -> types::SlaveMapping {
    types::SlaveMapping {
        name: DEFAULT_MAPPING_NAME.to_owned(),
        is_default: false,
        output_indices: rxpdo.iter().map(|pdo| pdo.index).collect(),
        input_indices: txpdo.iter().map(|pdo| pdo.index).collect(),
    }
}

/// Resolves one `<AlternativeSmMapping>` element.
pub(super) fn resolve_alternative_mapping(
    model: &model::AlternativeSmMapping,
) -> Result<types::SlaveMapping, EsiError> {
    let name = single_text_or_none(&model.name, "Name")?
        .unwrap_or_default()
        .to_owned();

    let mut output_indices = Vec::new();
    let mut input_indices = Vec::new();

    for sm in &model.sm {
        let target = match sm.no.as_deref().map(str::trim) {
            Some(SM_OUTPUTS) => &mut output_indices,
            Some(SM_INPUTS) => &mut input_indices,
            other => {
                debug!("Mapping {:?}: ignoring Sm {:?}", name, other);
                continue;
            }
        };
        for pdo in &sm.pdo {
            target.push(number_u16(&pdo.value, "Pdo")?);
        }
    }

    Ok(types::SlaveMapping {
        name,
        is_default: flag(model.default.as_deref()),
        output_indices,
        input_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternative_mapping_slots() {
        let model: model::AlternativeSmMapping = quick_xml::de::from_str(
            r#"<AlternativeSmMapping Default="1">
                 <Name>Compact</Name>
                 <Sm No="2"><Pdo>#x1600</Pdo></Sm>
                 <Sm No="3"><Pdo>#x1a01</Pdo><Pdo>#x1a03</Pdo></Sm>
                 <Sm No="0"/>
               </AlternativeSmMapping>"#,
        )
        .unwrap();
        let mapping = resolve_alternative_mapping(&model).unwrap();
        assert_eq!(mapping.name, "Compact");
        assert!(mapping.is_default);
        assert_eq!(mapping.output_indices, [0x1600]);
        assert_eq!(mapping.input_indices, [0x1A01, 0x1A03]);
    }

    #[test]
    fn test_alternative_mapping_without_name() {
        let model: model::AlternativeSmMapping =
            quick_xml::de::from_str(r#"<AlternativeSmMapping><Sm No="3"><Pdo>6657</Pdo></Sm></AlternativeSmMapping>"#)
                .unwrap();
        let mapping = resolve_alternative_mapping(&model).unwrap();
        assert_eq!(mapping.name, "");
        assert!(!mapping.is_default);
        assert!(mapping.output_indices.is_empty());
        assert_eq!(mapping.input_indices, [0x1A01]);
    }

    #[test]
    fn test_invalid_pdo_reference() {
        let model: model::AlternativeSmMapping = quick_xml::de::from_str(
            r#"<AlternativeSmMapping><Sm No="2"><Pdo>#xG</Pdo></Sm></AlternativeSmMapping>"#,
        )
        .unwrap();
        assert!(matches!(
            resolve_alternative_mapping(&model),
            Err(EsiError::InvalidNumber { element: "Pdo", .. })
        ));
    }
}

// crates/ek-esi/src/resolver/mod.rs

//! Turns the deserialized ESI model into the public terminal types.
//!
//! One sub-module per element kind: `entry` for `<Entry>`, `pdo` for
//! `<RxPdo>`/`<TxPdo>`, `mapping` for the synthesized and vendor mappings.

use crate::error::EsiError;
use crate::model;
use crate::types;
use log::debug;

// --- Sub-modules ---

mod entry;
mod mapping;
mod pdo;
mod utils;

/// Returns the single `<Type>` element of a device.
pub(crate) fn device_type(device: &model::Device) -> Result<&model::DeviceType, EsiError> {
    utils::single(&device.device_type, "Type")
}

/// Resolves a `<Device>` into a [`types::TerminalInfo`].
///
/// `mappings` always starts with the `"All PDOs"` mapping built from the
/// device's own PDO lists, followed by every
/// `Info/VendorSpecific/TwinCAT/AlternativeSmMapping` in document order.
pub(crate) fn resolve_terminal(device: &model::Device) -> Result<types::TerminalInfo, EsiError> {
    let device_type = device_type(device)?;
    let name = device_type.value.trim().to_owned();
    let revision = device_type
        .revision_no
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned();

    let txpdo = device
        .tx_pdo
        .iter()
        .map(pdo::resolve_pdo)
        .collect::<Result<Vec<_>, _>>()?;
    let rxpdo = device
        .rx_pdo
        .iter()
        .map(pdo::resolve_pdo)
        .collect::<Result<Vec<_>, _>>()?;

    let mut mappings = vec![mapping::default_mapping(&rxpdo, &txpdo)];
    for alternative in device
        .info
        .iter()
        .flat_map(|info| &info.vendor_specific)
        .flat_map(|vendor| &vendor.twincat)
        .flat_map(|twincat| &twincat.alternative_sm_mapping)
    {
        mappings.push(mapping::resolve_alternative_mapping(alternative)?);
    }

    debug!(
        "Resolved {} rev {:?}: {} RxPdo, {} TxPdo, {} mappings",
        name,
        revision,
        rxpdo.len(),
        txpdo.len(),
        mappings.len()
    );

    Ok(types::TerminalInfo {
        name,
        revision,
        rxpdo,
        txpdo,
        mappings,
    })
}

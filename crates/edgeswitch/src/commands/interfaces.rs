//! Interface command handler.

use tabled::Tabled;

use edgeswitch_core::{EdgeSwitchInterface, EdgeSwitchInterfaceConfig, InterfaceRole, Snapshot};

use crate::cli::{GlobalOpts, InterfaceFilter, InterfacesArgs};
use crate::error::CliError;
use crate::output::{self, yes_no};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Up")]
    connected: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "PoE")]
    poe: String,
    #[tabled(rename = "STP")]
    stp: String,
    #[tabled(rename = "Address")]
    address: String,
}

fn row(config: &EdgeSwitchInterfaceConfig, iface: &EdgeSwitchInterface) -> InterfaceRow {
    let role = match iface.role {
        InterfaceRole::Port(ref port) => port.poe.clone(),
        InterfaceRole::Lag(ref lag) => format!("{} members", lag.member_count()),
        InterfaceRole::Neither => "-".into(),
    };
    InterfaceRow {
        id: iface.id().to_owned(),
        name: config.display_name(iface.id()),
        kind: iface.identification.kind.to_string(),
        connected: yes_no(iface.is_connected()),
        speed: iface
            .status
            .current_speed
            .clone()
            .unwrap_or_else(|| "-".into()),
        poe: role,
        stp: iface.stp_state().to_owned(),
        address: iface
            .primary_address()
            .map_or_else(|| "-".into(), |a| a.cidr.clone()),
    }
}

/// Interfaces matching `filter`, in document order.
fn select(config: &EdgeSwitchInterfaceConfig, filter: InterfaceFilter) -> Vec<&EdgeSwitchInterface> {
    match filter {
        InterfaceFilter::All => config.iter().collect(),
        InterfaceFilter::Ports => config.ports().collect(),
        InterfaceFilter::Lags => config.lags().collect(),
        InterfaceFilter::Connected => config.connected().collect(),
        InterfaceFilter::Poe => config.poe_active().collect(),
        InterfaceFilter::Sfp => config.sfp().collect(),
        InterfaceFilter::ActiveLags => config.active_lags().collect(),
        InterfaceFilter::Addressed => config.with_addresses().collect(),
    }
}

pub fn handle(
    snapshot: &Snapshot,
    args: &InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let config = &snapshot.interfaces;
    let selected = select(config, args.filter);
    let out = output::render_list(&global.output, &selected, |i| row(config, i))?;
    output::print_output(&out, global.quiet);
    Ok(())
}

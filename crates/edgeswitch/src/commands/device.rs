//! Device command handler.

use tabled::Tabled;

use edgeswitch_core::{EdgeSwitchDevice, InterfaceInfo, Snapshot};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, or_dash, yes_no};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CapabilityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Media")]
    media: String,
    #[tabled(rename = "PoE")]
    poe: String,
    #[tabled(rename = "Max MTU")]
    max_mtu: u32,
}

impl From<&InterfaceInfo> for CapabilityRow {
    fn from(i: &InterfaceInfo) -> Self {
        Self {
            id: i.id.clone(),
            kind: or_dash(&i.kind.to_string()),
            media: or_dash(&i.media),
            poe: yes_no(i.support_poe),
            max_mtu: i.max_mtu,
        }
    }
}

fn detail(d: &EdgeSwitchDevice) -> String {
    let id = &d.identification;
    let mut lines = vec![
        format!("Model:     {}", or_dash(&id.model)),
        format!("Product:   {}", or_dash(&id.product)),
        format!("MAC:       {}", or_dash(&id.mac)),
        format!("Firmware:  {}", or_dash(&id.firmware_version)),
        format!("Ports:     {}", d.port_count()),
        format!("PoE ports: {}", d.poe_port_count()),
        format!("SFP ports: {}", d.sfp_port_count()),
        format!("LAGs:      {}", d.lag_count()),
        format!("Services:  {}", d.capabilities.services.join(", ")),
    ];
    if d.has_errors() {
        lines.push(format!("Errors:    {}", d.error_codes.join(", ")));
    }
    if !d.capabilities.interfaces.is_empty() {
        let rows: Vec<CapabilityRow> = d.capabilities.interfaces.iter().map(Into::into).collect();
        lines.push(String::new());
        lines.push(output::render_table(&rows));
    }
    lines.join("\n")
}

pub fn handle(snapshot: &Snapshot, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, &snapshot.device, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

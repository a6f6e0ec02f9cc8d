//! Summary command handler.

use edgeswitch_core::{Snapshot, SwitchSummary};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(s: &SwitchSummary) -> String {
    [
        format!("Model:          {} ({})", s.model, s.firmware_version),
        format!(
            "Ports:          {} ({} PoE, {} SFP, {} LAG)",
            s.port_count, s.poe_port_count, s.sfp_port_count, s.lag_count
        ),
        format!("Services:       {}", s.service_count),
        format!("CPU:            {:.1}%", s.cpu_usage_percent),
        format!("Memory:         {:.1}%", s.memory_usage_percent),
        format!("Temperature:    {:.1}°C", s.max_temperature_celsius),
        format!("Uptime:         {}s", s.uptime_secs),
        format!("Traffic:        {}", s.total_traffic_rate),
        format!("PoE power:      {:.1} W", s.total_poe_power_watts),
        format!("Connected:      {}", s.connected_interfaces),
        format!("PoE active:     {}", s.poe_active_interfaces),
        format!("Active LAGs:    {}", s.active_lags),
        format!("With errors:    {}", s.interfaces_with_errors),
        format!("Last update:    {}", s.last_update.to_rfc3339()),
    ]
    .join("\n")
}

pub fn handle(snapshot: &Snapshot, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = snapshot.summary();
    let out = output::render_single(&global.output, &summary, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

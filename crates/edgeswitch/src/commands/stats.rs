//! Statistics command handler.

use tabled::Tabled;

use edgeswitch_core::{EdgeSwitchStatistics, InterfaceStatisticsInfo, Snapshot};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, or_dash};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InterfaceStatsRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rate")]
    rate: u64,
    #[tabled(rename = "TX")]
    tx_rate: u64,
    #[tabled(rename = "RX")]
    rx_rate: u64,
    #[tabled(rename = "Errors")]
    errors: u64,
    #[tabled(rename = "Dropped")]
    dropped: u64,
    #[tabled(rename = "PoE W")]
    poe_power: String,
}

impl From<&InterfaceStatisticsInfo> for InterfaceStatsRow {
    fn from(i: &InterfaceStatisticsInfo) -> Self {
        let s = &i.statistics;
        Self {
            id: i.id.clone(),
            name: or_dash(&i.name),
            rate: s.rate,
            tx_rate: s.tx_rate,
            rx_rate: s.rx_rate,
            errors: s.errors,
            dropped: s.dropped,
            poe_power: format!("{:.1}", s.poe_power),
        }
    }
}

fn detail(stats: &EdgeSwitchStatistics) -> String {
    let device = &stats.device;
    let mut lines = vec![
        format!("CPU:         {:.1}%", device.average_cpu_usage()),
        format!(
            "Memory:      {:.1}% ({} / {})",
            device.ram.usage_percent(),
            device.ram.used(),
            device.ram.total
        ),
        format!("Temperature: {:.1}°C", device.max_temperature()),
        format!("Uptime:      {}s", device.uptime),
        format!("Traffic:     {}", stats.total_traffic_rate()),
        format!("PoE power:   {:.1} W", stats.total_poe_power()),
    ];
    for fan in &device.fan_speeds {
        lines.push(format!("Fan {}: {} rpm", or_dash(&fan.name), fan.value));
    }
    if !stats.interfaces.is_empty() {
        let rows: Vec<InterfaceStatsRow> = stats.interfaces.iter().map(Into::into).collect();
        lines.push(String::new());
        lines.push(output::render_table(&rows));
    }
    lines.join("\n")
}

pub fn handle(snapshot: &Snapshot, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(ref stats) = snapshot.statistics else {
        if !global.quiet {
            eprintln!("The switch returned no statistics sample.");
        }
        return Ok(());
    };
    let out = output::render_single(&global.output, stats, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use spacefighter_simulator::config::ShipConfig;
use spacefighter_simulator::dash::DashPhase;
use spacefighter_simulator::snapshot::Snapshot;
use std::path::Path;

/// Parses a JSON ship configuration. Missing fields take their defaults and
/// out-of-range values are clamped.
pub fn parse_config(json: &str) -> anyhow::Result<ShipConfig> {
    let config: ShipConfig = serde_json::from_str(json)?;
    Ok(config.sanitized())
}

pub fn load_config(path: &Path) -> anyhow::Result<ShipConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ship config {:?}", path))?;
    parse_config(&json).with_context(|| format!("Failed to parse ship config {:?}", path))
}

pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "tick", "time", "ship", "position", "velocity", "facing", "dash", "cooldown",
    ]);
    table
}

/// One row per ship in the snapshot.
pub fn add_rows(table: &mut Table, snapshot: &Snapshot) {
    for ship in snapshot.ships.iter() {
        let dash = match (ship.dash_phase, ship.invulnerable) {
            (DashPhase::Idle, _) => "idle",
            (DashPhase::Dashing, true) => "dashing (invulnerable)",
            (DashPhase::Dashing, false) => "dashing",
        };
        table.add_row(vec![
            snapshot.tick.to_string(),
            format!("{:.3}", snapshot.time),
            ship.id.to_string(),
            format!("({:.3}, {:.3})", ship.position.x, ship.position.y),
            format!("({:.3}, {:.3})", ship.velocity.x, ship.velocity.y),
            format!("{:.1}", ship.facing),
            dash.to_string(),
            format!("{:.3}", ship.dash_cooldown),
        ]);
    }
}

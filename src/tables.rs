use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::sim::kpi::DailyStats;

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Renders the per-day rollup as a terminal table.
pub fn build_daily_table(daily: &[DailyStats]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        "Day",
        "Trucks",
        "Avg load",
        "SoC end",
        "Grid",
        "Surplus",
        "Unmet",
    ]);
    for d in daily {
        table.add_row(vec![
            right(d.day.to_string()),
            right(d.truck_count.to_string()),
            right(format!("{:.1}%", d.avg_load_pct)).fg(if d.avg_load_pct >= 100.0 {
                Color::Green
            } else {
                Color::DarkYellow
            }),
            right(format!("{:.1} kWh", d.end_soc_kwh)),
            right(format!("{:.1} kWh", d.grid_kwh)),
            right(format!("{:.1} kWh", d.surplus_kwh)),
            right(format!("{:.1} kWh", d.unmet_kwh)).fg(if d.unmet_kwh > 0.0 {
                Color::Red
            } else {
                Color::Green
            }),
        ]);
    }
    table
}

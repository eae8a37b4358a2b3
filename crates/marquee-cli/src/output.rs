//! Terminal rendering of the view model

use console::style;
use marquee_core::{EventRecord, TransportIcon, ViewState};

/// Width of the seek bar in cells
const BAR_WIDTH: usize = 24;

/// Render one view snapshot as a single status line
pub fn render_view(view: &ViewState) -> String {
    let icon = match view.icon {
        TransportIcon::Play => style("▶").green(),
        TransportIcon::Pause => style("⏸").yellow(),
    };

    let bar = match view.seek_fraction {
        Some(fraction) => {
            let filled = (fraction * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            format!(
                "[{}{}]",
                style("█".repeat(filled)).red(),
                "░".repeat(BAR_WIDTH - filled)
            )
        }
        None => format!("[{}]", "░".repeat(BAR_WIDTH)),
    };

    let mut line = format!(
        "{} {} {} / {}",
        icon, bar, view.position_label, view.duration_label
    );

    if let Some(rate) = view.trick_mode {
        line.push_str(&format!("  {}", style(format!("{rate:+.0}x")).cyan().bold()));
    }
    if view.buffering_visible {
        line.push_str(&format!("  {}", style("buffering…").yellow()));
    }
    if view.muted {
        line.push_str(&format!("  {}", style("muted").dim()));
    }
    if let Some(subtitle) = &view.subtitle_line {
        line.push_str(&format!("  {}", style(subtitle).white().on_black().italic()));
    }

    line
}

/// Render the quality menu once bitrates are known
pub fn render_bitrates(bitrates: &[u64]) -> String {
    if bitrates.is_empty() {
        return "no video bitrates reported".to_string();
    }
    let entries: Vec<String> = bitrates
        .iter()
        .map(|b| format!("{:.1} Mbps", *b as f64 / 1_000_000.0))
        .collect();
    format!("quality menu: {}", entries.join(" | "))
}

/// Dump journal records as JSON lines
pub fn print_journal(records: &[EventRecord]) -> anyhow::Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

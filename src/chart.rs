use crate::aggregate::GroupTotal;
use crate::fmt::won;

const BAR_WIDTH: usize = 36;

/// Render aggregated (label, amount) pairs as a terminal bar chart. Bars
/// scale to the largest absolute total; non-empty groups always get at
/// least one tick.
pub fn render(groups: &[GroupTotal]) -> String {
    let max = groups.iter().map(|g| g.total.abs()).fold(0.0_f64, f64::max);
    if max == 0.0 {
        return String::new();
    }
    let label_width = groups.iter().map(|g| g.key.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for group in groups {
        let scaled = (group.total.abs() / max * BAR_WIDTH as f64).round() as usize;
        let ticks = scaled.max(1);
        let pad = label_width.saturating_sub(group.key.chars().count());
        out.push_str(&format!(
            "{}{}  {} {}\n",
            group.key,
            " ".repeat(pad),
            "█".repeat(ticks),
            won(group.total)
        ));
    }
    out
}

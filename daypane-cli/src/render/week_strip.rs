//! Seven-column week strip with a "now" line and session markers.
use daypane_core::timeline::{DAY_NAMES, Marker};

pub const NOW: char = '┃';
pub const MARKER: char = '▼';

/// Column of a week percentage on a strip `total` cells wide.
pub fn column(position: f64, total: usize) -> usize {
    let col = (position / 100.0 * total as f64).floor();
    (col.max(0.0) as usize).min(total.saturating_sub(1))
}

/// Header, marker row and strip row. `day_width` is the width of one day column.
pub fn strip_lines(position: f64, markers: &[Marker], day_width: usize) -> Vec<String> {
    let total = day_width * DAY_NAMES.len();

    let header: String = DAY_NAMES
        .iter()
        .map(|name| {
            let short: String = name.chars().take(3).collect();
            format!("{short:<day_width$}")
        })
        .collect();

    let mut marks = vec![' '; total];
    for marker in markers {
        marks[column(marker.position, total)] = MARKER;
    }

    let mut strip: Vec<char> = (0..total)
        .map(|i| if i % day_width == 0 { '│' } else { '─' })
        .collect();
    strip[column(position, total)] = NOW;

    vec![
        header.trim_end().to_string(),
        marks.into_iter().collect::<String>().trim_end().to_string(),
        strip.into_iter().collect(),
    ]
}

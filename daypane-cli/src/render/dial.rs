//! Character-cell analog dial.
use daypane_core::clock::{HandAngles, dial_line_angles};

/// Dial radius in rows. Columns are doubled to keep the face roughly round.
pub const RADIUS: usize = 6;

const HOUR: char = '#';
const MINUTE: char = '*';
const SECOND: char = '.';
const TICK: char = '·';
const QUARTER: char = '◆';
const CENTER: char = 'o';

/// Draws the dial with its three hands, one string per row.
pub fn draw(hands: &HandAngles) -> Vec<String> {
    let rows = RADIUS * 2 + 1;
    let cols = RADIUS * 4 + 1;
    let mut grid = vec![vec![' '; cols]; rows];

    for angle in dial_line_angles() {
        // only every fifth line lands on a cell of its own at this size
        let step = (angle / 6.0).round() as u32;
        if step % 5 != 0 {
            continue;
        }
        let mark = if step % 15 == 0 { QUARTER } else { TICK };
        plot(&mut grid, angle, RADIUS as f64, mark);
    }

    hand(&mut grid, hands.second, RADIUS as f64 - 1.0, SECOND);
    hand(&mut grid, hands.minute, RADIUS as f64 - 1.0, MINUTE);
    hand(&mut grid, hands.hour, RADIUS as f64 * 0.55, HOUR);
    grid[RADIUS][RADIUS * 2] = CENTER;

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

fn hand(grid: &mut [Vec<char>], angle: f64, length: f64, mark: char) {
    let steps = (length * 4.0).ceil() as usize;
    for i in 1..=steps {
        plot(grid, angle, length * i as f64 / steps as f64, mark);
    }
}

fn plot(grid: &mut [Vec<char>], angle: f64, distance: f64, mark: char) {
    let radians = angle.to_radians();
    let row = RADIUS as f64 - distance * radians.cos();
    let col = (RADIUS * 2) as f64 + distance * radians.sin() * 2.0;
    let (row, col) = (row.round(), col.round());
    if row < 0.0 || col < 0.0 {
        return;
    }
    if let Some(cell) = grid.get_mut(row as usize).and_then(|r| r.get_mut(col as usize)) {
        *cell = mark;
    }
}

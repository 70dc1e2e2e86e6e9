//! Text candlestick chart.
//!
//! Bars are bucketed into at most `width` columns and scaled onto `height` rows, row 0
//! being the highest price. Rendering to coloured strings happens in the renderer.
use daypane_core::PriceBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wick { up: bool },
    Body { up: bool },
}

#[derive(Debug)]
pub struct CandleGrid {
    /// `rows[r][c]`, row 0 at the top.
    pub rows: Vec<Vec<Cell>>,
    pub high: f64,
    pub low: f64,
    pub first_time: i64,
    pub last_time: i64,
}

/// Lays `bars` out on a `width` x `height` grid. `None` when there is nothing to draw.
pub fn layout(bars: &[PriceBar], width: usize, height: usize) -> Option<CandleGrid> {
    if bars.is_empty() || width == 0 || height == 0 {
        return None;
    }

    let columns = bucket(bars, width);
    let high = columns.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low = columns.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let row_of = |price: f64| -> usize {
        if high <= low {
            return height / 2;
        }
        let scaled = (high - price) / (high - low) * (height - 1) as f64;
        (scaled.round().max(0.0) as usize).min(height - 1)
    };

    let mut rows = vec![vec![Cell::Empty; columns.len()]; height];
    for (c, bar) in columns.iter().enumerate() {
        let up = bar.is_up();
        let (wick_top, wick_bottom) = (row_of(bar.high), row_of(bar.low));
        let (body_top, body_bottom) = (row_of(bar.open.max(bar.close)), row_of(bar.open.min(bar.close)));
        for (r, row) in rows.iter_mut().enumerate() {
            row[c] = if (body_top..=body_bottom).contains(&r) {
                Cell::Body { up }
            } else if (wick_top..=wick_bottom).contains(&r) {
                Cell::Wick { up }
            } else {
                Cell::Empty
            };
        }
    }

    let first = bars.first()?;
    let last = bars.last()?;
    Some(CandleGrid {
        rows,
        high,
        low,
        first_time: first.time,
        last_time: last.time,
    })
}

/// Merges consecutive bars so that at most `width` remain.
fn bucket(bars: &[PriceBar], width: usize) -> Vec<PriceBar> {
    if bars.len() <= width {
        return bars.to_vec();
    }
    let n = bars.len();
    (0..width)
        .filter_map(|i| {
            let chunk = &bars[i * n / width..(i + 1) * n / width];
            let first = chunk.first()?;
            let last = chunk.last()?;
            Some(PriceBar {
                time: first.time,
                open: first.open,
                high: chunk.iter().map(|b| b.high).fold(f64::MIN, f64::max),
                low: chunk.iter().map(|b| b.low).fold(f64::MAX, f64::min),
                close: last.close,
            })
        })
        .collect()
}

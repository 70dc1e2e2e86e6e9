use anyhow::Result;
use std::io::{self, IsTerminal};
use std::time::Duration;
use termimad::crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Runs `frame` every `period` until Ctrl-C, clearing a terminal between frames.
pub async fn watch<F>(period: Duration, mut frame: F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    let clear = io::stdout().is_terminal();
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                if clear {
                    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                }
                frame()?;
            }
            result = &mut ctrl_c => {
                result?;
                debug!("interrupted, leaving watch loop");
                return Ok(());
            }
        }
    }
}

use anyhow::Result;
use chrono::Local;
use daypane_core::clock::ClockFace;
use std::time::Duration;

use super::watch::watch;
use crate::render::Renderer;

pub async fn clock_mode(renderer: &Renderer, watching: bool) -> Result<()> {
    let draw = || -> Result<()> {
        renderer.print_clock(&ClockFace::at(Local::now().naive_local()));
        Ok(())
    };
    if watching {
        watch(Duration::from_secs(1), draw).await
    } else {
        draw()
    }
}

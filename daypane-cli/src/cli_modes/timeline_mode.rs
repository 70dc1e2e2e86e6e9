use anyhow::Result;
use chrono::Local;
use daypane_core::timeline::Timeline;
use std::time::Duration;
use tracing::info;

use super::watch::watch;
use crate::render::Renderer;

pub async fn timeline_mode(renderer: &Renderer, watching: bool) -> Result<()> {
    let mut timeline = Timeline::new();
    let mut draw = || -> Result<()> {
        let frame = timeline.tick(Local::now().naive_local());
        for marker in &frame.dropped {
            info!(session = marker.key, date = %marker.date, "session marker dropped");
        }
        renderer.print_timeline(&frame, timeline.markers());
        Ok(())
    };
    if watching {
        watch(Duration::from_secs(1), draw).await
    } else {
        draw()
    }
}

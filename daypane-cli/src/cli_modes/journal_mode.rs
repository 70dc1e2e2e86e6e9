use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use daypane_core::{ChartState, DayBox, Daypane, Journal};
use tracing::info;

use super::editor_utils::{edit_in_buffer, resolve_editor};
use crate::{
    cli::{JournalAction, JournalArgs},
    render::Renderer,
};

pub async fn journal_mode(daypane: &Daypane, renderer: &Renderer, args: &JournalArgs) -> Result<()> {
    let mut journal = daypane.open_journal()?;

    match &args.action {
        None => {
            let boxes = journal.render().await;
            print_boxes(renderer, &boxes);
        }
        Some(JournalAction::Add) => {
            let today = journal.today();
            let boxes = journal.add_today().await;
            renderer.print_info(&add_outcome(&boxes, today, &daypane.config.date_format));
            print_boxes(renderer, &boxes);
        }
        Some(JournalAction::Note { day, text }) => {
            let date = resolve_day(daypane, day)?;
            note(daypane, renderer, &mut journal, date, text)?;
        }
        Some(JournalAction::Refresh { day }) => {
            let date = resolve_day(daypane, day)?;
            refresh(daypane, renderer, &mut journal, date).await?;
        }
        Some(JournalAction::Path) => {
            renderer.print_info(&format!("{}", journal.store.path().display()));
        }
    }
    Ok(())
}

fn resolve_day(daypane: &Daypane, token: &str) -> Result<NaiveDate> {
    match daypane.parse_day(token) {
        Some(date) => Ok(date),
        None => bail!("could not understand the day '{token}'"),
    }
}

fn note(daypane: &Daypane, renderer: &Renderer, journal: &mut Journal, date: NaiveDate, text: &[String]) -> Result<()> {
    let current = journal.store.get(date).map(|e| e.text.clone()).unwrap_or_default();
    let new_text = if text.is_empty() {
        let editor = resolve_editor(&daypane.config.editor);
        edit_in_buffer(&editor, &current)?.trim_end().to_string()
    } else {
        text.join(" ")
    };

    let label = date.format(&daypane.config.date_format);
    if new_text == current && journal.store.get(date).is_some() {
        renderer.print_info(&format!("Note for {label} unchanged."));
        return Ok(());
    }
    journal
        .commit_note(date, &new_text)
        .with_context(|| format!("saving the note for {date}"))?;
    info!(%date, "note committed");
    renderer.print_info(&format!("Saved note for {label}."));
    Ok(())
}

async fn refresh(daypane: &Daypane, renderer: &Renderer, journal: &mut Journal, date: NaiveDate) -> Result<()> {
    if journal.store.get(date).is_none() {
        bail!("no journal entry for {date}; add a note or use `daypane journal add` first");
    }
    let label = date.format(&daypane.config.date_format);
    let chart = match journal.refresh(date).await {
        Ok(count) => {
            renderer.print_info(&format!("Stored {count} bars for {label}."));
            journal
                .store
                .get(date)
                .map(|e| ChartState::Ready(e.chart_data.clone()))
                .unwrap_or(ChartState::Ready(Vec::new()))
        }
        Err(error) => ChartState::Failed(error.to_string()),
    };
    let text = journal.store.get(date).map(|e| e.text.clone()).unwrap_or_default();
    renderer.print_day_box(&DayBox { date, text, chart });
    Ok(())
}

/// Headline of `journal add`: only a box that actually holds bars counts as refreshed.
fn add_outcome(boxes: &[DayBox], today: NaiveDate, date_format: &str) -> String {
    let label = today.format(date_format);
    match boxes.iter().find(|b| b.date == today).map(|b| &b.chart) {
        Some(ChartState::Ready(_)) => format!("Refreshed {label}."),
        Some(ChartState::Failed(message)) => format!("Added {label}, but its chart could not be fetched: {message}"),
        None => format!("Could not add {label}."),
    }
}

fn print_boxes(renderer: &Renderer, boxes: &[DayBox]) {
    if boxes.is_empty() {
        renderer.print_info("The journal is empty. Run `daypane journal add` to start today.");
        return;
    }
    renderer.print_info(&format!("{} days found.", boxes.len()));
    renderer.print_day_boxes(boxes);
}

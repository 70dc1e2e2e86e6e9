use clap::{Args, Parser, Subcommand};

use crate::render::ColorMode;

/// daypane: trading journal, dosha clock and week timeline
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Defaults to `journal` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every journal day, newest first, fetching missing charts.
    Journal(JournalArgs),
    /// Show the analog clock and the current dosha phase.
    Clock {
        /// Redraw every second until Ctrl-C.
        #[arg(long, short)]
        watch: bool,
    },
    /// Show the week strip with the "now" line and session markers.
    Timeline {
        /// Tick every second until Ctrl-C, dropping markers as sessions open.
        #[arg(long, short)]
        watch: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct JournalArgs {
    /// One line per day: date, chart summary and the first line of the note.
    #[arg(long, short, env = "DAYPANE_SHORT")]
    pub short: bool,

    #[command(subcommand)]
    pub action: Option<JournalAction>,
}

#[derive(Subcommand, Debug)]
pub enum JournalAction {
    /// Make sure today has an entry, refresh its chart and render all days.
    Add,
    /// Set the note of a day (e.g. `daypane journal note yesterday Faded the open.`).
    /// Opens your $EDITOR with the current note when no text is given.
    Note {
        /// `today`, `yesterday`, a weekday name or a date such as `2025-10-16`.
        day: String,
        text: Vec<String>,
    },
    /// Fetch the chart of a day again, even when one is cached.
    Refresh { day: String },
    /// Prints the journal store path.
    Path,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

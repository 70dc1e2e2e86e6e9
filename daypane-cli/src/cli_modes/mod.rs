mod clock_mode;
mod editor_utils;
mod journal_mode;
mod timeline_mode;
mod watch;

pub use clock_mode::clock_mode;
pub use journal_mode::journal_mode;
pub use timeline_mode::timeline_mode;

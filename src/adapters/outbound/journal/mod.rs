/// Log source adapters: the systemd journal and exported log files
mod file_log_source;
mod journalctl;

pub use file_log_source::FileLogSource;
pub use journalctl::{JournalctlLogSource, DEFAULT_UNIT};

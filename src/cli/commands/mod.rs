pub mod check;
pub mod reason;
pub mod resolve;
pub mod simulate;
pub mod table;

pub use check::{CheckCommand, OptionsCommand};
pub use reason::ReasonCommand;
pub use resolve::ResolveCommand;
pub use simulate::SimulateCommand;
pub use table::TableCommand;

/// Comma-separated status list, `-` when empty
pub(crate) fn format_statuses(statuses: &[crate::sempro::Status]) -> String {
    if statuses.is_empty() {
        return "-".to_string();
    }
    statuses
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

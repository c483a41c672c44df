//! Ratatui widgets for the flatsearch TUI.

pub mod command_bar;
pub mod field_palette;
pub mod flat_list;
pub mod help;
pub mod query_bar;
pub mod status_bar;

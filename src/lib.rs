//! flatsearch: browse flat listings with a structured `field:value` search.
//!
//! The binary is a thin shell over three crates:
//!
//! ```text
//! flatsearch-feeds ──► flatsearch-core ──► flatsearch-tui
//!   (file, stdin,       (query parse,       (cards, palette,
//!    HTTP backend)       filter, config)      search bar)
//! ```
//!
//! This crate exposes the command line and the headless output formats so
//! the integration harnesses can reach them.

pub mod cli;
pub mod output;

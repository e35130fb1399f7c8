//! Command handlers for the Structura CLI.

pub mod inspect;
pub mod parse;

pub use inspect::InspectCommand;
pub use parse::ParseCommand;

mod render;
mod terminal;

pub use terminal::{TerminalAlert, TerminalRenderer, TerminalStatus};

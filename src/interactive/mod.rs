//! Interactive TUI interface

pub mod app;
pub mod rendering;

pub use app::{App, Message, MessageStyle, Screen, Statistics, run_tui};

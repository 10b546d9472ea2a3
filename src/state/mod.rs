// State management module.
// Results and console state driven by the event loop.

#![allow(dead_code)]

pub mod console;
pub mod results;

pub use console::{ConsoleLevel, ConsoleLog, ConsoleMessage};
pub use results::{LoadingState, Pane, ResultsState};

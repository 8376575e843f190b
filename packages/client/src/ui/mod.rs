//! Terminal user interface.

mod formatter;
mod input;
mod presenter;
mod screen;

pub use formatter::MessageFormatter;
pub use input::{parse_input, spawn_input_thread};
#[cfg(test)]
pub use presenter::MockPresenter;
pub use presenter::{Presenter, TerminalPresenter};
pub use screen::Screen;

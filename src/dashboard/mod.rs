pub mod dashboard;
pub mod format;
pub mod render;

pub use dashboard::Dashboard;
pub use render::{LogRenderer, Renderer, TerminalRenderer};

use std::io::{self, Write};

use crossterm::{
    cursor::MoveUp,
    queue,
    terminal::{Clear, ClearType},
};
use log::info;

/// Target for a rendered dashboard frame.
///
/// Every frame has the same number of lines as the previous one.
pub trait Renderer: Send {
    fn render(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Redraws the frame in place on an ANSI terminal.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    drawn_lines: u16,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer { out, drawn_lines: 0 }
    }
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalRenderer::new(io::stdout())
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&mut self, lines: &[String]) -> io::Result<()> {
        if self.drawn_lines > 0 {
            queue!(self.out, MoveUp(self.drawn_lines))?;
        }
        for line in lines {
            queue!(self.out, Clear(ClearType::CurrentLine))?;
            writeln!(self.out, "\r{line}")?;
        }
        self.drawn_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.out.flush()
    }
}

/// Emits each frame through the `log` facade, for non-interactive output.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, lines: &[String]) -> io::Result<()> {
        info!("dashboard:\n{}", lines.join("\n"));
        Ok(())
    }
}

use std::io::{self, IsTerminal, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tracing::warn;
use weather_core::{DisplayOutput, DisplaySink, Theme};

/// Writes rendered output to stdout and paints the header with the theme colour.
#[derive(Debug, Clone, Copy)]
pub struct TerminalSink {
    /// Wipe the screen before each render so the new output replaces the old one.
    clear: bool,
}

impl TerminalSink {
    pub fn new(clear: bool) -> Self {
        Self { clear }
    }

    fn write(&self, output: &DisplayOutput) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        let styled = stdout.is_terminal();

        if self.clear && styled {
            queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        let mut lines = output.text.lines();
        match (output.theme, lines.next()) {
            (Some(theme), Some(header)) if styled => write_themed(&mut stdout, theme, header)?,
            (_, Some(header)) => queue!(stdout, Print(header), Print("\n"))?,
            (_, None) => {}
        }
        for line in lines {
            queue!(stdout, Print(line), Print("\n"))?;
        }

        stdout.flush()
    }
}

impl DisplaySink for TerminalSink {
    fn show(&self, output: &DisplayOutput) {
        if let Err(err) = self.write(output) {
            warn!(error = %err, "Failed to write to terminal");
        }
    }
}

fn write_themed(out: &mut impl Write, theme: Theme, line: &str) -> io::Result<()> {
    let (r, g, b) = theme.primary_rgb();
    queue!(
        out,
        SetBackgroundColor(Color::Rgb { r, g, b }),
        SetForegroundColor(Color::White),
        Print(format!(" {line} ")),
        ResetColor,
        Print("\n"),
    )
}

/// Discards everything; used when the caller prints the final state itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn show(&self, _output: &DisplayOutput) {}
}

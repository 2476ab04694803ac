//! Terminal output for the packager.
//!
//! Progress goes to stdout, warnings and errors to stderr. Quiet mode keeps
//! only warnings and errors. Status glyphs are colored when the stream is a
//! terminal.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Output manager honoring verbose and quiet modes
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create an output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Returns true in verbose mode
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a plain line unless quiet
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{message}")
    }

    /// Print only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.println(message)
    }

    /// Print a progress line
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.println(message)
    }

    /// Print a success line
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let stream = StandardStream::stdout(color_choice(io::stdout().is_terminal()));
        write_status(&mut stream.lock(), "✓", Color::Green, message)
    }

    /// Print an indented line
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.println(&format!("  {message}"))
    }

    /// Print a warning, even in quiet mode
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let stream = StandardStream::stderr(color_choice(io::stderr().is_terminal()));
        write_status(&mut stream.lock(), "⚠", Color::Yellow, message)
    }
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Writes `glyph message`, with only the glyph colored.
fn write_status<W: WriteColor>(
    out: &mut W,
    glyph: &str,
    color: Color,
    message: &str,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{glyph}")?;
    out.reset()?;
    writeln!(out, " {message}")
}

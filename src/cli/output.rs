//! Terminal output for upload progress.
//!
//! Progress lines go to stdout and can be silenced with `--quiet`. Failures
//! always reach stderr, falling back to stdout if stderr is unusable.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Leading marker of a progress line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Uploaded,
    Retrying,
    Failed,
    Detail,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Mark::Uploaded => "✓",
            Mark::Retrying => "⚠",
            Mark::Failed => "✗",
            Mark::Detail => "→",
        }
    }

    fn color(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Mark::Uploaded => spec.set_fg(Some(Color::Green)).set_bold(true),
            Mark::Retrying => spec.set_fg(Some(Color::Yellow)).set_bold(true),
            Mark::Failed => spec.set_fg(Some(Color::Red)).set_bold(true),
            Mark::Detail => spec.set_fg(Some(Color::Blue)),
        };
        spec
    }

    /// Warnings and failures color the whole line, not just the marker
    fn tints_message(self) -> bool {
        matches!(self, Mark::Retrying | Mark::Failed)
    }
}

/// Write one line, optionally led by a colored marker
fn render(buffer: &mut Buffer, mark: Option<Mark>, message: &str) -> io::Result<()> {
    let Some(mark) = mark else {
        return writeln!(buffer, "{}", message);
    };

    buffer.set_color(&mark.color())?;
    write!(buffer, "{}", mark.symbol())?;
    buffer.reset()?;
    if mark.tints_message() {
        let mut tint = mark.color();
        tint.set_bold(false);
        buffer.set_color(&tint)?;
    }
    writeln!(buffer, " {}", message)?;
    buffer.reset()
}

/// Prints publish progress and failures
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// `verbose` enables detail lines, `quiet` hides everything but failures
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    fn emit(&self, mark: Option<Mark>, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        render(&mut buffer, mark, message)?;
        self.stdout.print(&buffer)
    }

    /// Upload finished
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.emit(Some(Mark::Uploaded), message)
    }

    /// Something failed but the upload goes on
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.emit(Some(Mark::Retrying), message)
    }

    /// Asset listings and other detail, only with `--verbose`
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.emit(Some(Mark::Detail), message)
    }

    /// Sub-item under the previous line
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.emit(None, &format!("    {}", message))
    }

    /// Plain progress line
    pub fn println(&self, message: &str) -> io::Result<()> {
        self.emit(None, message)
    }

    /// Failure line on stderr, printed even in quiet mode
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        if render(&mut buffer, Some(Mark::Failed), message).is_err()
            || stderr.print(&buffer).is_err()
        {
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Whether progress lines are suppressed
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(mark: Option<Mark>, message: &str) -> String {
        let mut buffer = Buffer::no_color();
        render(&mut buffer, mark, message).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_marks_prefix_message() {
        assert_eq!(rendered(Some(Mark::Uploaded), "app.zip"), "✓ app.zip\n");
        assert_eq!(rendered(Some(Mark::Retrying), "will retry"), "⚠ will retry\n");
        assert_eq!(rendered(Some(Mark::Failed), "gave up"), "✗ gave up\n");
        assert_eq!(rendered(None, "plain"), "plain\n");
    }

    #[test]
    fn test_quiet_suppresses_progress() {
        let output = OutputManager::new(true, true);
        assert!(output.is_quiet());
        assert!(output.success("uploaded").is_ok());
        assert!(output.verbose("detail").is_ok());
        assert!(output.clone().is_quiet());
    }
}

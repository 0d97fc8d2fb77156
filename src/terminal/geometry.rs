//! Terminal geometry: whether a sink is a terminal, how big it is, and
//! whether it can show the default unicode glyphs.

use std::io::{self, IsTerminal};

/// Terminal programs known to render unicode correctly on Windows consoles.
const UNICODE_SAFE_WINDOWS_TERM_PROGRAMS: &[&str] = &["vscode"];

/// Reports the capabilities of the terminal behind an output sink.
pub trait TerminalGeometry: Send {
    /// Whether the sink is an interactive terminal.
    fn is_interactive(&self) -> bool;

    /// `(width, height)` in cells, or `None` if unknown.
    fn size(&self) -> Option<(u16, u16)>;

    /// Whether the default unicode glyphs can be shown.
    fn is_unicode_safe(&self) -> bool;
}

/// Geometry of the process's stdout or stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl TerminalGeometry for StdStream {
    fn is_interactive(&self) -> bool {
        match self {
            Self::Stdout => io::stdout().is_terminal(),
            Self::Stderr => io::stderr().is_terminal(),
        }
    }

    fn size(&self) -> Option<(u16, u16)> {
        if !self.is_interactive() {
            return None;
        }
        crossterm::terminal::size().ok()
    }

    fn is_unicode_safe(&self) -> bool {
        if !cfg!(windows) || !self.is_interactive() {
            return true;
        }
        std::env::var("TERM_PROGRAM")
            .is_ok_and(|program| UNICODE_SAFE_WINDOWS_TERM_PROGRAMS.contains(&program.as_str()))
    }
}

/// Geometry fixed at construction. Height 0 means non-interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGeometry {
    /// Width in cells.
    pub width: u16,
    /// Height in cells; 0 for a plain stream.
    pub height: u16,
    /// Whether unicode glyphs are safe.
    pub unicode_safe: bool,
}

impl FixedGeometry {
    /// An interactive terminal of the given size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            unicode_safe: true,
        }
    }

    /// Use the fallback glyphs.
    #[must_use]
    pub const fn without_unicode(mut self) -> Self {
        self.unicode_safe = false;
        self
    }
}

impl TerminalGeometry for FixedGeometry {
    fn is_interactive(&self) -> bool {
        self.height > 0
    }

    fn size(&self) -> Option<(u16, u16)> {
        Some((self.width, self.height))
    }

    fn is_unicode_safe(&self) -> bool {
        self.unicode_safe
    }
}

/// Geometry of a sink that is not a terminal (files, pipes, buffers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotATerminal;

impl TerminalGeometry for NotATerminal {
    fn is_interactive(&self) -> bool {
        false
    }

    fn size(&self) -> Option<(u16, u16)> {
        None
    }

    fn is_unicode_safe(&self) -> bool {
        true
    }
}

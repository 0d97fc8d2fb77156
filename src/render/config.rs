//! Output configuration: glyphs, colors, layout switches and the target.

use crate::message::MessageStatus;
use crate::terminal::{Color, NotATerminal, Painter, StdStream, Style, TerminalGeometry};
use std::fmt;
use std::io::{self, Write};

/// Lookup table keyed by [`MessageStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMap<T> {
    entries: [Option<T>; 7],
}

impl<T> StatusMap<T> {
    /// An empty map.
    pub const fn new() -> Self {
        Self {
            entries: [None, None, None, None, None, None, None],
        }
    }

    const fn index(status: MessageStatus) -> usize {
        match status {
            MessageStatus::Pending => 0,
            MessageStatus::Started => 1,
            MessageStatus::Success => 2,
            MessageStatus::Warning => 3,
            MessageStatus::Error => 4,
            MessageStatus::Skipped => 5,
            MessageStatus::Unknown => 6,
        }
    }

    /// Value for `status`, if set.
    pub const fn get(&self, status: MessageStatus) -> Option<&T> {
        self.entries[Self::index(status)].as_ref()
    }

    /// Set the value for `status`, returning the previous one.
    pub fn insert(&mut self, status: MessageStatus, value: T) -> Option<T> {
        self.entries[Self::index(status)].replace(value)
    }

    /// Clear the value for `status`.
    pub fn remove(&mut self, status: MessageStatus) -> Option<T> {
        self.entries[Self::index(status)].take()
    }
}

impl<T> Default for StatusMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(MessageStatus, T)> for StatusMap<T> {
    fn from_iter<I: IntoIterator<Item = (MessageStatus, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (status, value) in iter {
            map.insert(status, value);
        }
        map
    }
}

/// When to emit colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color unless the `NO_COLOR` environment variable is set and non-empty.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Painter for this choice, consulting the environment for `Auto`.
    pub fn painter(self) -> Painter {
        match self {
            Self::Always => Painter::Ansi,
            Self::Never => Painter::Plain,
            Self::Auto => {
                let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
                if no_color {
                    Painter::Plain
                } else {
                    Painter::Ansi
                }
            }
        }
    }
}

/// Where rendered output goes, and the geometry of that place.
pub struct Target {
    pub(crate) writer: Box<dyn Write + Send>,
    pub(crate) geometry: Box<dyn TerminalGeometry>,
}

impl Target {
    /// The process's standard error.
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            geometry: Box::new(StdStream::Stderr),
        }
    }

    /// The process's standard output.
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout()),
            geometry: Box::new(StdStream::Stdout),
        }
    }

    /// A plain, non-interactive writer such as a file or a buffer.
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_geometry(writer, NotATerminal)
    }

    /// A writer whose terminal geometry is reported by `geometry`.
    pub fn with_geometry(
        writer: impl Write + Send + 'static,
        geometry: impl TerminalGeometry + 'static,
    ) -> Self {
        Self {
            writer: Box::new(writer),
            geometry: Box::new(geometry),
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("interactive", &self.geometry.is_interactive())
            .finish_non_exhaustive()
    }
}

/// Configuration for the message renderer.
#[derive(Debug)]
pub struct OutputConfig {
    /// Width used when the target's width is unknown.
    pub default_text_width: u16,
    /// Color mode.
    pub colors: ColorChoice,
    /// Whether to show the status indicator column.
    pub show_status_indicator: bool,
    /// Indicator glyph per status.
    pub status_indicators: StatusMap<String>,
    /// Glyphs replacing `status_indicators` where unicode is unsafe.
    pub fallback_status_indicators: StatusMap<String>,
    /// Indicator style per status.
    pub status_styles: StatusMap<Style>,
    /// Spinner frames for started messages on interactive targets.
    pub in_progress_animation: Vec<String>,
    /// Spinner frames used where unicode is unsafe.
    pub fallback_in_progress_animation: Vec<String>,
    /// Indicator for statuses missing from `status_indicators`.
    pub unknown_indicator: String,
    /// Style for statuses missing from `status_styles`.
    pub unknown_style: Style,
    /// Style for finished messages' details.
    pub details_style: Style,
    /// Whether to paint the message text with the status style.
    pub color_message: bool,
    /// Whether to show elapsed time.
    pub show_stopwatch: bool,
    /// Style for the elapsed time.
    pub stopwatch_style: Style,
    /// Output sink.
    pub target: Target,
}

fn glyphs(frames: &[&str]) -> Vec<String> {
    frames.iter().map(ToString::to_string).collect()
}

impl Default for OutputConfig {
    fn default() -> Self {
        use MessageStatus::{Error, Pending, Skipped, Started, Success, Warning};

        Self {
            default_text_width: 100,
            colors: ColorChoice::Auto,
            show_status_indicator: true,
            status_indicators: [
                (Success, "✓"),
                (Warning, "!"),
                (Error, "✗"),
                (Started, ">"),
                (Pending, "#"),
                (Skipped, "-"),
            ]
            .into_iter()
            .map(|(status, glyph)| (status, glyph.to_string()))
            .collect(),
            fallback_status_indicators: [(Success, "√"), (Error, "X")]
                .into_iter()
                .map(|(status, glyph)| (status, glyph.to_string()))
                .collect(),
            status_styles: [
                (Success, Color::Green),
                (Warning, Color::Yellow),
                (Error, Color::Red),
                (Started, Color::Blue),
                (Pending, Color::Cyan),
                (Skipped, Color::Magenta),
            ]
            .into_iter()
            .map(|(status, color)| (status, Style::fg(color)))
            .collect(),
            in_progress_animation: glyphs(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            fallback_in_progress_animation: glyphs(&["/", "-", "\\", "|"]),
            unknown_indicator: "?".to_string(),
            unknown_style: Style::fg(Color::White),
            details_style: Style::fg(Color::BrightBlack),
            color_message: false,
            show_stopwatch: true,
            stopwatch_style: Style::fg(Color::BrightBlack),
            target: Target::default(),
        }
    }
}

impl OutputConfig {
    /// Default configuration writing to `target`.
    pub fn with_target(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}

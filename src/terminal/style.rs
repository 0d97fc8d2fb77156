//! Text styling: colors, attributes and the painter that applies them.
//!
//! Styles are applied per text span with SGR escape sequences. Width math
//! always happens on the plain text before painting, so callers never need
//! to strip escapes again.

use super::output::OutputBuffer;
use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Foreground color.
///
/// The sixteen named colors follow the terminal's palette; [`Color::Rgb`]
/// needs true-color support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// ANSI black.
    Black,
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
    /// ANSI white.
    White,
    /// Bright black, usually rendered gray.
    BrightBlack,
    /// Bright red.
    BrightRed,
    /// Bright green.
    BrightGreen,
    /// Bright yellow.
    BrightYellow,
    /// Bright blue.
    BrightBlue,
    /// Bright magenta.
    BrightMagenta,
    /// Bright cyan.
    BrightCyan,
    /// Bright white.
    BrightWhite,
    /// 24-bit color.
    Rgb(Rgb),
}

impl Color {
    /// SGR foreground code for the named colors.
    const fn sgr_code(self) -> Option<u8> {
        let code = match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BrightBlack => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
            Self::Rgb(_) => return None,
        };
        Some(code)
    }
}

bitflags! {
    /// Text attributes, combinable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold / increased intensity.
        const BOLD = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM = 0b0000_0010;
        /// Italic.
        const ITALIC = 0b0000_0100;
        /// Underline.
        const UNDERLINE = 0b0000_1000;
    }
}

impl Attributes {
    /// SGR codes for each set attribute, in bit order.
    fn sgr_codes(self) -> impl Iterator<Item = u8> {
        [
            (Self::BOLD, 1),
            (Self::DIM, 2),
            (Self::ITALIC, 3),
            (Self::UNDERLINE, 4),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, code)| code)
    }
}

/// Foreground color plus attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color; `None` keeps the terminal default.
    pub fg: Option<Color>,
    /// Text attributes.
    pub attrs: Attributes,
}

impl Style {
    /// Style with no color and no attributes.
    pub const PLAIN: Self = Self {
        fg: None,
        attrs: Attributes::empty(),
    };

    /// Style with only a foreground color.
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            attrs: Attributes::empty(),
        }
    }

    /// Add attributes.
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    /// Whether applying this style changes anything.
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.attrs.is_empty()
    }
}

/// Applies styles to text.
///
/// `Plain` is the identity painter used when colors are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Painter {
    /// Wrap text in SGR sequences.
    Ansi,
    /// Return text unchanged.
    Plain,
}

impl Painter {
    /// Apply `style` to `text`.
    pub fn paint(self, style: Style, text: &str) -> String {
        if self == Self::Plain || style.is_plain() || text.is_empty() {
            return text.to_string();
        }

        let mut out = OutputBuffer::with_capacity(text.len() + 16);
        for code in style.attrs.sgr_codes() {
            out.sgr(code);
        }
        match style.fg {
            Some(Color::Rgb(rgb)) => out.set_fg(rgb),
            Some(color) => {
                if let Some(code) = color.sgr_code() {
                    out.sgr(code);
                }
            }
            None => {}
        }
        out.write_str(text);
        out.reset_attrs();
        out.into_string()
    }
}

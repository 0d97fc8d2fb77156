//! Terminal primitives: geometry queries, text styling and the frame
//! output buffer.

mod geometry;
mod output;
mod style;

pub use geometry::{FixedGeometry, NotATerminal, StdStream, TerminalGeometry};
pub use output::OutputBuffer;
pub use style::{Attributes, Color, Painter, Rgb, Style};

//! `MessageRenderer`: paints a [`MessageStore`] to the output target.
//!
//! Output is split into two regions:
//!
//! ```text
//! ✓ compile                                   3 s   ◀ committed: finished lines,
//! ✗ test                                     12 s      written once, never touched
//!   assertion failed: left == right                    again
//! ⠹ upload                                    1 s   ◀ live block: erased and
//! ⠹ lint                                            ◀ repainted every pass
//! ```
//!
//! On plain streams (height 0) there is no live block. Started messages are
//! logged once per distinct text instead.

use super::config::OutputConfig;
use super::format::{
    display_width, elapsed_text, fit_to_width, normalize_whitespace, wrap_hard, wrap_soft,
};
use crate::message::{Message, MessageStatus, MessageStore};
use crate::terminal::{OutputBuffer, Painter, Style};
use std::collections::HashSet;
use std::io;

/// Geometry resolved once at the start of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Width in columns.
    pub width: u16,
    /// Height in rows; 0 for non-interactive targets.
    pub height: u16,
    /// Whether the default unicode glyphs are safe.
    pub unicode_safe: bool,
}

impl Frame {
    /// Whether the live block is repainted in place.
    #[inline]
    pub const fn is_interactive(&self) -> bool {
        self.height > 0
    }
}

/// Incremental renderer for a message store.
///
/// Tracks what it already committed so repeated passes only add new
/// finished lines and repaint the live block.
pub struct MessageRenderer {
    config: OutputConfig,
    painter: Painter,
    /// Render passes so far; selects the spinner frame.
    render_count: usize,
    /// Finished messages already written.
    finished_index: usize,
    /// `(key, text)` of started messages already logged to a plain stream.
    logged_started: HashSet<(String, String)>,
    /// Width the live block was drawn at.
    in_progress_width: u16,
    /// Lines in the live block.
    in_progress_height: usize,
    /// Frame output, flushed in one write.
    output: OutputBuffer,
}

impl MessageRenderer {
    /// Create a renderer writing to `config.target`.
    pub fn new(config: OutputConfig) -> Self {
        let painter = config.colors.painter();
        Self {
            config,
            painter,
            render_count: 0,
            finished_index: 0,
            logged_started: HashSet::new(),
            in_progress_width: 0,
            in_progress_height: 0,
            output: OutputBuffer::new(),
        }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Query the target's current geometry.
    pub fn frame(&self) -> Frame {
        let geometry = &self.config.target.geometry;
        let size = geometry.size();
        let width = size.map_or(self.config.default_text_width, |(width, _)| width);
        let height = if geometry.is_interactive() {
            size.map_or(0, |(_, height)| height)
        } else {
            0
        };
        Frame {
            width,
            height,
            unicode_safe: geometry.is_unicode_safe(),
        }
    }

    /// Render one pass: erase the live block, commit newly finished
    /// messages, then draw the live block again.
    ///
    /// The renderer's bookkeeping advances even if the write fails, so a
    /// failed pass is not retried.
    pub fn render(&mut self, store: &MessageStore) -> io::Result<()> {
        let frame = self.frame();
        self.output.clear();
        self.erase_in_progress(frame.width);

        let finished = store
            .list_finished()
            .get(self.finished_index..)
            .unwrap_or_default();
        for msg in finished {
            let line = self.format_message(msg, frame);
            self.output.write_str(&line);
        }
        self.finished_index += finished.len();

        let mut count = 0;
        for msg in store.list_in_progress() {
            if !msg.status.is_in_progress() {
                continue;
            }
            if frame.is_interactive() {
                if count >= usize::from(frame.height) {
                    break;
                }
                let line = self.format_message(msg, frame);
                // Only drawn lines belong to the live block.
                if !line.is_empty() {
                    self.output.write_str(&line);
                    count += 1;
                }
            } else if self
                .logged_started
                .insert((msg.key.clone(), msg.message.clone()))
            {
                let line = self.format_message(msg, frame);
                self.output.write_str(&line);
            }
        }

        self.in_progress_height = count;
        self.in_progress_width = frame.width;
        self.render_count = self.render_count.wrapping_add(1);

        if self.output.is_empty() {
            return Ok(());
        }
        self.output.flush_to(&mut self.config.target.writer)
    }

    /// Lines to erase before repainting the live block at `width`.
    ///
    /// The live block always spans the full width, so when the terminal
    /// narrows each of its lines reflows onto several rows.
    pub const fn erase_height(&self, width: u16) -> usize {
        let height = self.in_progress_height;
        if width == 0 || width >= self.in_progress_width {
            return height;
        }
        let prev = self.in_progress_width as usize;
        height * prev.div_ceil(width as usize)
    }

    fn erase_in_progress(&mut self, width: u16) {
        if self.in_progress_height == 0 {
            return;
        }
        self.output.carriage_return();
        for _ in 0..self.erase_height(width) {
            self.output.erase_line_above();
        }
    }

    fn status_style(&self, status: MessageStatus) -> Style {
        self.config
            .status_styles
            .get(status)
            .copied()
            .unwrap_or(self.config.unknown_style)
    }

    fn status_indicator(&self, status: MessageStatus, frame: Frame) -> &str {
        let fallback = (!frame.unicode_safe)
            .then(|| self.config.fallback_status_indicators.get(status))
            .flatten();
        fallback
            .or_else(|| self.config.status_indicators.get(status))
            .unwrap_or(&self.config.unknown_indicator)
    }

    fn animation_frame(&self, frame: Frame) -> Option<&str> {
        let fallback = &self.config.fallback_in_progress_animation;
        let animation = if frame.unicode_safe || fallback.is_empty() {
            &self.config.in_progress_animation
        } else {
            fallback
        };
        if animation.is_empty() {
            return None;
        }
        animation
            .get(self.render_count % animation.len())
            .map(String::as_str)
    }

    /// Format one message as a full line, including its trailing newline.
    ///
    /// Returns an empty string when the frame is too narrow to lay out
    /// the indicator and stopwatch.
    pub fn format_message(&self, msg: &Message, frame: Frame) -> String {
        let interactive = frame.is_interactive();
        let style = self.status_style(msg.status);

        let mut indicator = String::new();
        let mut used = 0;
        if self.config.show_status_indicator {
            let spinner = if msg.status.is_in_progress() && interactive {
                self.animation_frame(frame)
            } else {
                None
            };
            let glyph = spinner.unwrap_or_else(|| self.status_indicator(msg.status, frame));
            let plain = format!("{glyph} ");
            used += display_width(&plain);
            indicator = self.painter.paint(style, &plain);
        }

        let mut elapsed = String::new();
        if self.config.show_stopwatch {
            let text = elapsed_text(msg.elapsed_seconds());
            if !text.is_empty() {
                let plain = format!(" {text}");
                used += display_width(&plain);
                elapsed = self.painter.paint(self.config.stopwatch_style, &plain);
            }
        }

        // Some terminals briefly report a zero width; skip the line then.
        let Some(budget) = usize::from(frame.width).checked_sub(used) else {
            return String::new();
        };

        let mut text = normalize_whitespace(&msg.message);
        if interactive && !msg.progress_message.is_empty() {
            text.push(' ');
            text.push_str(&normalize_whitespace(&msg.progress_message));
        }
        let mut body = fit_to_width(&text, budget);
        if self.config.color_message {
            body = self.painter.paint(style, &body);
        }

        let mut line = String::with_capacity(indicator.len() + body.len() + elapsed.len() + 1);
        line.push_str(&indicator);
        line.push_str(&body);
        line.push_str(&elapsed);
        if msg.status.is_finished() && !msg.details.is_empty() {
            self.push_details(&mut line, &msg.details, frame);
        }
        line.push('\n');
        line
    }

    fn push_details(&self, line: &mut String, details: &str, frame: Frame) {
        let wrap_width = usize::from(frame.width).saturating_sub(2);
        // Details with line breaks are assumed preformatted (stack traces, command output).
        let lines = if details.contains('\n') {
            wrap_hard(details, wrap_width)
        } else {
            wrap_soft(details, wrap_width)
        };

        for detail in &lines {
            line.push('\n');
            if self.config.show_status_indicator {
                line.push_str("  ");
            }
            line.push_str(&self.painter.paint(self.config.details_style, detail));
        }
    }
}

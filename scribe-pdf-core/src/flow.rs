//! The flow engine: turns classified lines into a sequence of page
//! buffers.
//!
//! A vertical cursor walks down each page in PDF user space (origin at the
//! bottom-left corner). Runs are drawn with their baseline at the cursor
//! and the cursor then drops by the style's line advance. Placing a run
//! that would cross the bottom margin closes the page and opens the next;
//! pure gap advances (blank lines, header spacing) never break pages, so a
//! document of nothing but blank lines still fits on its single eagerly
//! opened page.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::classify::{classify_line, Role};
use crate::error::{RenderError, Result};
use crate::page::{DrawOp, PageBuffer, PageSpec};
use crate::style::{
    style_for, TextStyle, BLANK_GAP, BODY_STYLE, HEADER_GAP_AFTER, HEADER_GAP_BEFORE,
    LETTERHEAD_META_STYLE, LETTERHEAD_TITLE_STYLE,
};
use crate::text::{measure_text, wrap_text};

/// Lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Constructed, first page open, nothing consumed yet.
    AwaitingFirstLine,
    /// At least one line record has been consumed.
    Flowing,
    /// `finish` has sealed the final page.
    PageClosed,
}

/// Letterhead block drawn at the top of the first page, before any
/// classified content. The timestamp is supplied by the caller; the engine
/// never reads a clock, so a render stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct Letterhead {
    /// Centered title line.
    pub title: String,
    /// Rendered as "Generated: ..." under the title.
    pub generated_at: DateTime<Utc>,
}

impl Letterhead {
    pub fn new(title: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            generated_at,
        }
    }

    /// The conventional report title.
    pub fn pathology(generated_at: DateTime<Utc>) -> Self {
        Self::new("PATHOLOGY REPORT", generated_at)
    }
}

pub struct FlowEngine {
    spec: PageSpec,
    pages: Vec<PageBuffer>,
    current: PageBuffer,
    cursor_y: f64,
    state: FlowState,
}

impl FlowEngine {
    /// Creates an engine with its first page already open. The one-page
    /// minimum is a property of construction, not a patch at the end.
    pub fn new(spec: PageSpec) -> Self {
        let cursor_y = spec.height() - spec.margins().top;
        let current = PageBuffer::new(spec.clone());
        Self {
            spec,
            pages: Vec::new(),
            current,
            cursor_y,
            state: FlowState::AwaitingFirstLine,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Classifies and flows every line of `text`, in order.
    pub fn flow_text(&mut self, text: &str) -> Result<()> {
        for line in text.split('\n') {
            self.flow_line(line)?;
        }
        Ok(())
    }

    /// Flows a single raw line according to its role.
    pub fn flow_line(&mut self, raw: &str) -> Result<()> {
        let (role, text) = classify_line(raw);
        if self.state == FlowState::AwaitingFirstLine {
            self.state = FlowState::Flowing;
        }

        let style = style_for(role);
        match role {
            Role::Blank => self.advance(BLANK_GAP * style.line_advance()),
            Role::Header => {
                self.advance(HEADER_GAP_BEFORE * style.line_advance());
                self.place_wrapped(style, text)?;
                self.advance(HEADER_GAP_AFTER * style.line_advance());
            }
            Role::Body => self.place_wrapped(style, text)?,
        }
        Ok(())
    }

    /// Draws the letterhead block: centered title, centered timestamp line,
    /// and a rule across the content width.
    pub fn place_letterhead(&mut self, letterhead: &Letterhead) -> Result<()> {
        let title = LETTERHEAD_TITLE_STYLE;
        self.place_centered(title, letterhead.title.clone())?;
        self.advance(0.5 * title.line_advance());

        let meta = LETTERHEAD_META_STYLE;
        let stamp = format!(
            "Generated: {}",
            letterhead.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        self.place_centered(meta, stamp)?;
        self.advance(1.5 * meta.line_advance());

        self.current.push(DrawOp::Rule {
            x1: self.spec.margins().left,
            x2: self.spec.width() - self.spec.margins().right,
            y: self.cursor_y,
            width: 1.0,
        });
        self.advance(BODY_STYLE.line_advance());
        Ok(())
    }

    /// Seals the current page and hands back every page in order. At least
    /// one page is always returned.
    pub fn finish(mut self) -> Vec<PageBuffer> {
        self.state = FlowState::PageClosed;
        self.pages.push(self.current);
        self.pages
    }

    /// Wraps `text` to the content width and places each visual line at the
    /// left margin.
    fn place_wrapped(&mut self, style: TextStyle, text: &str) -> Result<()> {
        let left = self.spec.margins().left;
        for line in wrap_text(text, style.font, style.size, self.spec.content_width()) {
            self.place_run(style, left, line)?;
        }
        Ok(())
    }

    /// Places one run horizontally centered on the page.
    fn place_centered(&mut self, style: TextStyle, text: String) -> Result<()> {
        let width = measure_text(&text, style.font, style.size);
        let x = (self.spec.width() - width) / 2.0;
        self.place_run(style, x, text)
    }

    /// Places one visual line at the cursor, breaking to a new page first
    /// if its advance would cross the bottom margin.
    fn place_run(&mut self, style: TextStyle, x: f64, text: String) -> Result<()> {
        let advance = style.line_advance();
        let bottom = self.spec.margins().bottom;

        if self.cursor_y - advance < bottom {
            self.break_page();
            if self.cursor_y - advance < bottom {
                return Err(RenderError::LayoutOverflow {
                    needed: advance,
                    available: self.spec.content_height(),
                });
            }
        }

        self.current.push(DrawOp::TextRun {
            x,
            y: self.cursor_y,
            font: style.font,
            size: style.size,
            text,
        });
        self.cursor_y -= advance;
        Ok(())
    }

    /// Drops the cursor without drawing. Gap advances never break pages;
    /// an oversized gap is simply swallowed by the next run placement.
    fn advance(&mut self, dy: f64) {
        self.cursor_y -= dy;
    }

    fn break_page(&mut self) {
        let sealed = std::mem::replace(&mut self.current, PageBuffer::new(self.spec.clone()));
        self.pages.push(sealed);
        self.cursor_y = self.spec.height() - self.spec.margins().top;
        debug!("page {} full, starting page {}", self.pages.len(), self.pages.len() + 1);
    }
}

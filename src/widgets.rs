//! Reusable clickable UI components.
//!
//! Each component encapsulates both rendering and click target registration,
//! so visual output and interactive behaviour stay co-located.
//!
//! # Components
//!
//! - [`TabBar`] — Horizontal tab navigation (rendering + click targets).
//! - [`ClickableList`] — Vertical list with per-row click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal tab bar component.
///
/// Renders tabs as a single row of styled labels separated by a separator
/// string, and registers click targets that match the rendered positions
/// (CJK labels are two columns per character).
///
/// # Example
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("ゲーム", tab_style(0), TAB_GAME)
///     .tab("ショップ", tab_style(1), TAB_SHOP)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    /// Add a tab with its label, style, and action ID.
    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the tab bar in a [`Block`]. Click targets follow `Block::inner()`.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// `(display_width, action_id)` of each padded label.
    fn tab_widths(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {} ", label)).width() as u16, *id))
            .collect()
    }

    /// Render the tab bar and register click targets.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let tab_widths = self.tab_widths();

        let mut spans: Vec<Span> = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for horizontal accuracy, outer y/height for tap tolerance
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// Lines are annotated as clickable when added; after rendering, a single
/// [`register_targets`](ClickableList::register_targets) call registers every
/// target at the row its line actually landed on.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("クリック力アップ"));
/// cl.push_clickable(Line::from(" [U] 購入"), BUY_UPGRADE);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action ID.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Rows the lines occupy when wrapped to `width` columns.
    pub fn visual_height(&self, width: u16) -> u16 {
        Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: false })
            .line_count(width) as u16
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines, one logical line per row.
    ///
    /// * `top_offset` — rows before content (e.g. 1 for a top border).
    /// * `bottom_offset` — rows after content (e.g. 1 for a bottom border).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

impl Default for ClickableList<'_> {
    fn default() -> Self {
        Self::new()
    }
}

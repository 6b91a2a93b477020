//! Shared input handling: coordinate conversion, click targets, and event types.
//!
//! This module is game-agnostic. Each game implements its own input dispatch.

use ratzilla::ratatui::layout::Rect;

/// All possible input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press from keyboard.
    Key(char),
    /// A click/tap on a registered target, identified by a semantic action ID.
    /// `dx`/`dy` are the clicked cell's offset from the target's top-left corner.
    Click { action_id: u16, dx: u16, dy: u16 },
}

impl InputEvent {
    /// A click with no meaningful position (e.g. a button row).
    #[cfg(test)]
    pub fn click(action_id: u16) -> Self {
        InputEvent::Click {
            action_id,
            dx: 0,
            dy: 0,
        }
    }
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// The rectangular region (in terminal cell coordinates) for hit testing.
    pub rect: Rect,
    /// Semantic action ID. Each game defines its own constants.
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Register a click target with a rectangular hit region and a semantic action ID.
    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Convenience: register a full-row click target at the given row within an area.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Register click targets for a horizontal tab bar based on actual text widths.
    ///
    /// Each entry in `tab_widths` is `(display_width, action_id)` for the **padded**
    /// label text of that tab. `separator_width` is the display width of the
    /// separator string between tabs.
    ///
    /// Each target covers its label plus half of the adjacent separator(s). The
    /// first tab extends to the left edge and the last tab to the right edge.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let (_, action_id) = tab_widths[i];

            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };

            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + tab_widths[i].0;
                cur_end + (starts[i + 1] - cur_end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Hit-test a terminal cell and return the matching target, if any.
    /// Later-registered targets win where targets overlap.
    fn find_target(&self, col: u16, row: u16) -> Option<&ClickTarget> {
        self.targets.iter().rev().find(|t| {
            let r = &t.rect;
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        })
    }

    /// Hit-test a terminal cell coordinate against all registered targets.
    #[cfg(test)]
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.find_target(col, row).map(|t| t.action_id)
    }

    /// Hit-test and build the resulting click event, carrying the cell offset
    /// inside the target that was hit.
    pub fn resolve_click(&self, col: u16, row: u16) -> Option<InputEvent> {
        self.find_target(col, row).map(|t| InputEvent::Click {
            action_id: t.action_id,
            dx: col - t.rect.x,
            dy: row - t.rect.y,
        })
    }
}

/// Determine whether a screen width (in columns) should use narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate to a terminal row index.
///
/// `click_y` is relative to the grid container's top edge.
/// `grid_height` is the total pixel height of the grid container.
/// `terminal_rows` is the number of rows in the terminal.
///
/// Returns `None` if the click is outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}

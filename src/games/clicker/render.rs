//! Cyber Clicker rendering: stat cards, the coin, floating particles and tabs.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::{can_afford, format_number, total_earned, total_spent};
use super::state::{ClickerState, Particle, Tab, PARTICLE_LIFETIME_MS, UPGRADE_COST};

/// Width of the coin art in cells.
pub const COIN_WIDTH: u16 = 12;
/// Height of the coin art in cells.
pub const COIN_HEIGHT: u16 = 5;

const COIN_ART: &[&str] = &[
    "  ╭━━━━━━╮  ",
    " ╭╯ ╭──╮ ╰╮ ",
    " ┃  │$$│  ┃ ",
    " ╰╮ ╰──╯ ╭╯ ",
    "  ╰━━━━━━╯  ",
];

/// "Pressed" frame shown while the click flash is active.
const COIN_PRESSED_ART: &[&str] = &[
    "            ",
    "  ╭━━━━━━╮  ",
    "  ┃ ╭$$╮ ┃  ",
    "  ╰━━━━━━╯  ",
    "            ",
];

/// Neon palette cycled through by the title and the coin glow.
const NEON: &[Color] = &[Color::Cyan, Color::Magenta, Color::LightMagenta, Color::LightCyan];

fn cycling_color(anim_frame: u32, speed: u32) -> Color {
    NEON[(anim_frame / speed.max(1)) as usize % NEON.len()]
}

pub fn render(state: &ClickerState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    // Log panel on the right when wide enough
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // tab bar
            Constraint::Min(8),    // content
            Constraint::Length(3), // help
        ])
        .split(main_area);

    render_title(state, f, chunks[0]);
    render_tab_bar(state, f, chunks[1], click_state);
    match state.tab {
        Tab::Game => render_game(state, f, chunks[2], click_state),
        Tab::Shop => render_shop(state, f, chunks[2], click_state),
        Tab::Achievements => render_placeholder(
            f,
            chunks[2],
            " 実績 ",
            "🏆 実績システムは次のアップデートで登場します",
            Color::Yellow,
        ),
        Tab::Leaderboard => render_placeholder(
            f,
            chunks[2],
            " ランキング ",
            "👑 プレイヤーランキングは次のアップデートで登場します",
            Color::Magenta,
        ),
        Tab::Stats => render_stats(state, f, chunks[2]),
    }
    render_help(state, f, chunks[3]);

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

fn render_title(state: &ClickerState, f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "CYBER CLICKER",
            Style::default()
                .fg(cycling_color(state.anim_frame, 8))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  コインをクリックして強くなろう",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_tab_bar(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let tab_color = |tab: Tab| match tab {
        Tab::Game | Tab::Leaderboard => Color::Cyan,
        Tab::Shop | Tab::Stats => Color::Magenta,
        Tab::Achievements => Color::Yellow,
    };

    let mut bar = TabBar::new("│").block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    for tab in Tab::all() {
        let color = tab_color(*tab);
        let style = if *tab == state.tab {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        // Narrow screens drop the key prefix to save columns
        let label = if is_narrow_layout(area.width) {
            tab.label().to_string()
        } else {
            format!("{}:{}", tab.index() + 1, tab.label())
        };
        bar = bar.tab(label, style, TAB_BASE + tab.index() as u16);
    }

    let mut cs = click_state.borrow_mut();
    bar.render(f, area, &mut cs);
}

// ── Game tab ───────────────────────────────────────────────────

fn render_game(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(COIN_HEIGHT + 4)])
        .split(area);

    render_stat_cards(state, f, chunks[0]);
    render_coin(state, f, chunks[1], click_state);
}

fn render_stat_cards(state: &ClickerState, f: &mut Frame, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let card = |title: &'static str, value: String, color: Color| {
        Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        )
    };

    f.render_widget(
        card(" 残高 ", format!("¢ {}", format_number(state.coins)), Color::Cyan),
        cards[0],
    );
    f.render_widget(
        card(" クリック力 ", format!("⚡ {}", format_number(state.click_power)), Color::Magenta),
        cards[1],
    );
    f.render_widget(
        card(" 総クリック ", format!("👆 {}", format_number(state.total_clicks)), Color::LightMagenta),
        cards[2],
    );
}

/// Screen rect of the coin art, centered in `inner`.
fn coin_rect(inner: Rect) -> Rect {
    let w = COIN_WIDTH.min(inner.width);
    let h = COIN_HEIGHT.min(inner.height);
    let x = inner.x + (inner.width - w) / 2;
    let y = inner.y + (inner.height.saturating_sub(h + 2)) / 2;
    Rect::new(x, y, w, h)
}

fn render_coin(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let flashing = state.click_flash > 0;
    let border_color = if flashing {
        Color::White
    } else {
        cycling_color(state.anim_frame, 12)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" ◎ COIN ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let coin = coin_rect(inner);
    let art = if flashing { COIN_PRESSED_ART } else { COIN_ART };
    let coin_style = if flashing {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let art_lines: Vec<Line> = art
        .iter()
        .take(coin.height as usize)
        .map(|row| Line::from(Span::styled(*row, coin_style)))
        .collect();
    f.render_widget(Paragraph::new(art_lines), coin);

    // Hint below the coin
    let hint_y = coin.y + coin.height + 1;
    let mut cs = click_state.borrow_mut();
    if hint_y < inner.y + inner.height {
        let hint_area = Rect::new(inner.x, hint_y, inner.width, 1);
        let mut cl = ClickableList::new();
        cl.push_clickable(
            Line::from(Span::styled(
                " [C] コインをクリック！",
                Style::default().fg(Color::DarkGray),
            )),
            CLICK_COIN_HINT,
        );
        cl.register_targets(hint_area, &mut cs, 0, 0);
        f.render_widget(
            Paragraph::new(cl.into_lines()).alignment(Alignment::Center),
            hint_area,
        );
    }
    // Registered after the hint so the coin wins any overlap
    cs.add_click_target(coin, CLICK_COIN);
    drop(cs);

    render_particles(state, f, coin, inner);
}

/// Draw each live "+N" at its stored position inside the coin, drifting up
/// as it ages. `bounds` clips the drift to the coin panel.
fn render_particles(state: &ClickerState, f: &mut Frame, coin: Rect, bounds: Rect) {
    let now = state.timers.now() + state.pending_ms as u64;
    for particle in &state.particles {
        let Some((x, y)) = particle_cell(particle, now, coin, bounds) else {
            continue;
        };
        let age = now.saturating_sub(particle.born_ms) as u32;
        let color = if age < PARTICLE_LIFETIME_MS / 3 {
            Color::White
        } else if age < PARTICLE_LIFETIME_MS * 2 / 3 {
            Color::LightCyan
        } else {
            Color::DarkGray
        };
        let text = format!("+{}", format_number(particle.amount));
        let available = bounds.x + bounds.width - x;
        let width = (text.chars().count() as u16).min(available);
        if width == 0 {
            continue;
        }
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        f.render_widget(
            Paragraph::new(Span::styled(text, style)),
            Rect::new(x, y, width, 1),
        );
    }
}

/// Screen cell of a particle, or None if it has drifted out of `bounds`.
fn particle_cell(particle: &Particle, now: u64, coin: Rect, bounds: Rect) -> Option<(u16, u16)> {
    let age = now.saturating_sub(particle.born_ms).min(PARTICLE_LIFETIME_MS as u64) as u32;
    let rise = (age * 3 / PARTICLE_LIFETIME_MS.max(1)) as u16;
    let x = coin.x + particle.position.x;
    let y = (coin.y + particle.position.y).checked_sub(rise)?;
    let inside = x >= bounds.x
        && x < bounds.x + bounds.width
        && y >= bounds.y
        && y < bounds.y + bounds.height;
    inside.then_some((x, y))
}

// ── Shop tab ───────────────────────────────────────────────────

fn render_shop(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let affordable = can_afford(state);
    let mut cl = ClickableList::new();

    let title_style = if state.purchase_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    };
    cl.push(Line::from(Span::styled(" ⚡ クリック力アップ", title_style)));
    cl.push(Line::from(Span::styled(
        "   1クリックあたりのコインが +1 される",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(vec![
        Span::styled(
            format!("   価格: ¢{}", UPGRADE_COST),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("   現在のレベル: {}", state.click_power),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    cl.push(Line::from(""));
    if affordable {
        cl.push_clickable(
            Line::from(Span::styled(
                " ▶ [U] 購入",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            BUY_UPGRADE,
        );
    } else {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" ▷ [U] 購入 (あと ¢{})", UPGRADE_COST - state.coins),
                Style::default().fg(Color::DarkGray),
            )),
            BUY_UPGRADE,
        );
    }
    cl.push(Line::from(""));
    for name in ["オートクリッカー", "マルチプライヤー"] {
        cl.push(Line::from(vec![
            Span::styled(format!(" 🔒 {}", name), Style::default().fg(Color::DarkGray)),
            Span::styled("  近日公開…", Style::default().fg(Color::DarkGray)),
        ]));
    }

    // Bordered block: content starts one row below the top edge
    let height = (cl.visual_height(area.width.saturating_sub(2)) + 2).min(area.height);
    let shop_area = Rect::new(area.x, area.y, area.width, height);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(shop_area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" ショップ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, shop_area);
}

// ── Stats / placeholder tabs ───────────────────────────────────

fn stat_line(label: &str, value: u64, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<16}", label), Style::default().fg(Color::Gray)),
        Span::styled(
            format_number(value),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_stats(state: &ClickerState, f: &mut Frame, area: Rect) {
    let direction = if is_narrow_layout(area.width) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let general = Paragraph::new(vec![
        stat_line("総クリック数", state.total_clicks, Color::Cyan),
        stat_line("獲得コイン", total_earned(state), Color::Cyan),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 👆 総合統計 "),
    );
    f.render_widget(general, chunks[0]);

    let progress = Paragraph::new(vec![
        stat_line("クリック力レベル", state.click_power, Color::Magenta),
        stat_line("強化に使ったコイン", total_spent(state), Color::Magenta),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" 📈 進捗 "),
    );
    f.render_widget(progress, chunks[1]);
}

fn render_placeholder(f: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let top_pad = area.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color),
    )));
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title.to_string()),
        );
    f.render_widget(widget, area);
}

fn render_help(state: &ClickerState, f: &mut Frame, area: Rect) {
    let text = match state.tab {
        Tab::Game => "C/Space: クリック  1-5/Tab: タブ切替",
        Tab::Shop => "U: 購入  1-5/Tab: タブ切替",
        _ => "1-5/Tab: タブ切替",
    };
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}

fn render_log(state: &ClickerState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest first
    let log_lines: Vec<Line> = state
        .log
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, entry)| {
            let style = match (entry.is_important, i < 3) {
                (true, true) => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Magenta),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" ログ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::clicker::ClickerGame;
use games::Game;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::GameTime;

/// Query the grid container's bounding rect and convert pixel coordinates
/// to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;

    web_sys::console::log_1(
        &format!(
            "click: pixel=({}, {}), cell=({}, {}), targets={}",
            mouse_x,
            mouse_y,
            col,
            row,
            cs.targets.len()
        )
        .into(),
    );

    Some((col, row))
}

/// Milliseconds from `performance.now()`, or None outside a browser window.
fn now_ms() -> Option<f64> {
    Some(web_sys::window()?.performance()?.now())
}

/// Bring the game up to the current wall-clock time. Runs every frame and
/// before every input, so a click is timed from when it actually happened.
fn sync_clock(game_time: &RefCell<GameTime>, game: &RefCell<ClickerGame>) {
    let Some(now) = now_ms() else {
        web_sys::console::warn_1(&"performance.now() unavailable".into());
        return;
    };
    let mut gt = game_time.borrow_mut();
    let ticks = gt.update(now);
    game.borrow_mut().tick(ticks, gt.pending_ms());
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(ClickerGame::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let game_time = Rc::new(RefCell::new(GameTime::default()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;
    web_sys::console::log_1(&"cyber-clicker: terminal ready".into());

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        let game_time = game_time.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let event = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.resolve_click(col, row));
            drop(cs);

            if let Some(event) = event {
                sync_clock(&game_time, &game);
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        let game_time = game_time.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c.to_ascii_lowercase(),
                KeyCode::Tab => '\t',
                _ => return,
            };
            sync_clock(&game_time, &game);
            game.borrow_mut().handle_input(&InputEvent::Key(key));
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            sync_clock(&game_time, &game);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}

//! Cyber Clicker — click the coin, buy click power.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;
pub mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use state::{ClickerState, Position, Tab};

pub struct ClickerGame {
    pub state: ClickerState,
}

impl ClickerGame {
    pub fn new() -> Self {
        Self {
            state: ClickerState::new(),
        }
    }

    /// Click with no pointer position: spawn the particle somewhere on the coin.
    fn click_anywhere(&mut self) {
        let pos = logic::random_position(&mut self.state, render::COIN_WIDTH, render::COIN_HEIGHT);
        logic::apply_click(&mut self.state, pos);
    }

    fn try_upgrade(&mut self) {
        if logic::can_afford(&self.state) {
            logic::apply_upgrade(&mut self.state);
        } else {
            let short = state::UPGRADE_COST - self.state.coins;
            self.state
                .add_log(&format!("コインが足りない… (あと {})", short), false);
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' | ' ' if self.state.tab == Tab::Game => {
                self.click_anywhere();
                true
            }
            'u' if self.state.tab == Tab::Shop => {
                self.try_upgrade();
                true
            }
            '1'..='5' => {
                let idx = (key as u8 - b'1') as usize;
                match Tab::from_index(idx) {
                    Some(tab) => {
                        self.state.tab = tab;
                        true
                    }
                    None => false,
                }
            }
            '\t' => {
                self.state.tab = self.state.tab.next();
                true
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, action_id: u16, dx: u16, dy: u16) -> bool {
        match action_id {
            CLICK_COIN if self.state.tab == Tab::Game => {
                logic::apply_click(&mut self.state, Position::new(dx, dy));
                true
            }
            CLICK_COIN_HINT if self.state.tab == Tab::Game => {
                self.click_anywhere();
                true
            }
            BUY_UPGRADE if self.state.tab == Tab::Shop => {
                self.try_upgrade();
                true
            }
            id if id >= TAB_BASE => match Tab::from_index((id - TAB_BASE) as usize) {
                Some(tab) => {
                    self.state.tab = tab;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl Default for ClickerGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for ClickerGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click { action_id, dx, dy } => self.handle_click(*action_id, *dx, *dy),
        }
    }

    fn tick(&mut self, delta_ticks: u32, pending_ms: u32) {
        logic::advance(&mut self.state, delta_ticks, pending_ms);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

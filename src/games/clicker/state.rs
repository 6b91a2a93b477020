//! Cyber Clicker game state definitions.

use crate::time::ms_to_ticks;

use super::timers::TimerQueue;

/// Price of the click-power upgrade.
pub const UPGRADE_COST: u64 = 25;

/// How long a "+N" particle stays on screen.
pub const PARTICLE_LIFETIME_MS: u32 = 1000;
#[cfg(test)]
pub const PARTICLE_LIFETIME_TICKS: u32 = ms_to_ticks(PARTICLE_LIFETIME_MS);

/// How long the coin shows its "pressed" frame after a click.
pub const CLICK_FLASH_MS: u32 = 600;
pub const CLICK_FLASH_TICKS: u32 = ms_to_ticks(CLICK_FLASH_MS);

/// Maximum number of log entries kept.
const LOG_CAPACITY: usize = 50;

/// Identifier of a particle, unique for the lifetime of a [`ClickerState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Cell offset inside the coin's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A floating "+N" marker spawned by a click. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Position,
    /// Click power at the moment of the click.
    pub amount: u64,
    /// Game-clock time (ms) of the click that spawned it.
    pub born_ms: u64,
}

/// Deferred work scheduled on the game clock.
#[derive(Clone, Copy, Debug)]
pub enum Timer {
    ExpireParticle(ParticleId),
}

/// Top-level tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Game,
    Shop,
    Achievements,
    Leaderboard,
    Stats,
}

impl Tab {
    /// All tabs in display order.
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Game,
            Tab::Shop,
            Tab::Achievements,
            Tab::Leaderboard,
            Tab::Stats,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Game => "ゲーム",
            Tab::Shop => "ショップ",
            Tab::Achievements => "実績",
            Tab::Leaderboard => "ランキング",
            Tab::Stats => "統計",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Game => 0,
            Tab::Shop => 1,
            Tab::Achievements => 2,
            Tab::Leaderboard => 3,
            Tab::Stats => 4,
        }
    }

    pub fn from_index(idx: usize) -> Option<Tab> {
        Tab::all().get(idx).copied()
    }

    /// The tab after this one, wrapping around.
    pub fn next(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }
}

/// Log entry for the Cyber Clicker game.
#[derive(Clone, Debug)]
pub struct ClickerLogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a Cyber Clicker session.
pub struct ClickerState {
    /// Spendable balance.
    pub coins: u64,
    /// Coins awarded per click (starts at 1, only ever grows).
    pub click_power: u64,
    /// Lifetime click count.
    pub total_clicks: u64,
    /// Live particles in spawn order.
    pub particles: Vec<Particle>,
    next_particle_id: u64,
    /// Pending deferred work (particle expiry), on a millisecond clock.
    pub timers: TimerQueue<Timer>,
    /// Wall time (ms) already elapsed past the timer clock's last whole tick.
    pub pending_ms: u32,
    /// Ticks remaining on the coin's "pressed" frame.
    pub click_flash: u32,
    /// Ticks remaining on the shop's purchase highlight.
    pub purchase_flash: u32,
    /// Animation frame counter (incremented every tick).
    pub anim_frame: u32,
    pub tab: Tab,
    pub log: Vec<ClickerLogEntry>,
    /// Xorshift state for keyboard-click particle placement.
    pub rng_state: u32,
}

impl ClickerState {
    pub fn new() -> Self {
        Self {
            coins: 0,
            click_power: 1,
            total_clicks: 0,
            particles: Vec::new(),
            next_particle_id: 0,
            timers: TimerQueue::new(),
            pending_ms: 0,
            click_flash: 0,
            purchase_flash: 0,
            anim_frame: 0,
            tab: Tab::Game,
            log: vec![ClickerLogEntry {
                text: "CYBER CLICKER へようこそ！".into(),
                is_important: true,
            }],
            rng_state: 42,
        }
    }

    /// Hand out a fresh particle id. Ids are never reused within a session.
    pub fn allocate_particle_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_particle_id);
        self.next_particle_id += 1;
        id
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(ClickerLogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    /// Xorshift32 step.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }
}

impl Default for ClickerState {
    fn default() -> Self {
        Self::new()
    }
}

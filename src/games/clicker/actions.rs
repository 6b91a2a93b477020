//! Semantic action IDs for Cyber Clicker click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
/// The coin art itself; the click offset becomes the particle position.
pub const CLICK_COIN: u16 = 0;
/// The "[C]" hint line under the coin (no pointer position inside the coin).
pub const CLICK_COIN_HINT: u16 = 1;
pub const BUY_UPGRADE: u16 = 2;

// ── Tab navigation (base + Tab::index()) ────────────────────────
pub const TAB_BASE: u16 = 10;

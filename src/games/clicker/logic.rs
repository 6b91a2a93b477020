//! Cyber Clicker game logic — pure functions, fully testable.

use crate::time::MS_PER_TICK;

use super::state::{
    ClickerState, Particle, ParticleId, Position, Timer, CLICK_FLASH_TICKS,
    PARTICLE_LIFETIME_MS, UPGRADE_COST,
};

/// Ticks the shop highlights a successful purchase.
const PURCHASE_FLASH_TICKS: u32 = 10;

/// Click the coin at `position` (cell offset inside the coin's box).
///
/// Adds the current click power to the balance, counts the click and spawns
/// a particle that expires `PARTICLE_LIFETIME_MS` later. The click is timed
/// from `state.pending_ms` into the current tick, so the particle never
/// disappears before its full lifetime has passed in wall time.
pub fn apply_click(state: &mut ClickerState, position: Position) -> ParticleId {
    let power = state.click_power;
    state.coins += power;
    state.total_clicks += 1;
    state.click_flash = CLICK_FLASH_TICKS;

    let offset = state.pending_ms as u64;
    let id = state.allocate_particle_id();
    state.particles.push(Particle {
        id,
        position,
        amount: power,
        born_ms: state.timers.now() + offset,
    });
    state.timers.schedule(
        offset + PARTICLE_LIFETIME_MS as u64,
        Timer::ExpireParticle(id),
    );
    id
}

/// Whether the click-power upgrade is affordable right now.
pub fn can_afford(state: &ClickerState) -> bool {
    state.coins >= UPGRADE_COST
}

/// Buy +1 click power for `UPGRADE_COST` coins.
/// Does nothing when the balance is short; callers check [`can_afford`].
pub fn apply_upgrade(state: &mut ClickerState) {
    if !can_afford(state) {
        return;
    }
    state.coins -= UPGRADE_COST;
    state.click_power += 1;
    state.purchase_flash = PURCHASE_FLASH_TICKS;
    state.add_log(
        &format!("⚡ クリック力アップ！ Lv.{}", state.click_power),
        true,
    );
}

/// Coins spent on upgrades so far. Back-derived from the click power,
/// valid only while there is a single fixed-price upgrade.
pub fn total_spent(state: &ClickerState) -> u64 {
    (state.click_power - 1) * UPGRADE_COST
}

/// Coins earned over the session (balance + spent).
pub fn total_earned(state: &ClickerState) -> u64 {
    state.coins + total_spent(state)
}

/// Remove the particle with `id`. Returns false if it was already gone.
pub fn expire_particle(state: &mut ClickerState, id: ParticleId) -> bool {
    let before = state.particles.len();
    state.particles.retain(|p| p.id != id);
    state.particles.len() != before
}

/// Advance the game by `delta_ticks` ticks (at 10 ticks/sec).
pub fn tick(state: &mut ClickerState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    state.anim_frame = state.anim_frame.wrapping_add(delta_ticks);

    if state.click_flash > 0 {
        state.click_flash = state.click_flash.saturating_sub(delta_ticks);
    }
    if state.purchase_flash > 0 {
        state.purchase_flash = state.purchase_flash.saturating_sub(delta_ticks);
    }

    for timer in state.timers.advance(delta_ticks as u64 * MS_PER_TICK as u64) {
        match timer {
            Timer::ExpireParticle(id) => {
                expire_particle(state, id);
            }
        }
    }
}

/// Advance by `delta_ticks`, then record `pending_ms`: how far the wall
/// clock already is past the last whole tick. Clicks handled before the next
/// call are timed from there.
pub fn advance(state: &mut ClickerState, delta_ticks: u32, pending_ms: u32) {
    tick(state, delta_ticks);
    state.pending_ms = pending_ms;
}

/// Pseudo-random cell inside a `width` x `height` box, for clicks that
/// don't come with a pointer position (keyboard).
pub fn random_position(state: &mut ClickerState, width: u16, height: u16) -> Position {
    let x = state.next_random() % width.max(1) as u32;
    let y = state.next_random() % height.max(1) as u32;
    Position::new(x as u16, y as u16)
}

/// Format a number with commas (e.g. 1234567 → "1,234,567").
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::clicker::state::PARTICLE_LIFETIME_TICKS;
    use crate::time::GameTime;

    fn click_n(state: &mut ClickerState, n: usize) {
        for _ in 0..n {
            apply_click(state, Position::default());
        }
    }

    #[test]
    fn click_adds_power_and_counts() {
        let mut state = ClickerState::new();
        apply_click(&mut state, Position::new(3, 1));
        assert_eq!(state.coins, 1);
        assert_eq!(state.total_clicks, 1);
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].position, Position::new(3, 1));
        assert_eq!(state.click_flash, CLICK_FLASH_TICKS);
    }

    #[test]
    fn click_respects_click_power() {
        let mut state = ClickerState::new();
        state.click_power = 7;
        apply_click(&mut state, Position::default());
        assert_eq!(state.coins, 7);
        assert_eq!(state.particles[0].amount, 7);
    }

    #[test]
    fn scenario_a_twenty_five_clicks() {
        let mut state = ClickerState::new();
        click_n(&mut state, 25);
        assert_eq!(state.coins, 25);
        assert_eq!(state.total_clicks, 25);
        assert!(can_afford(&state));
    }

    #[test]
    fn scenario_b_upgrade_after_twenty_five() {
        let mut state = ClickerState::new();
        click_n(&mut state, 25);
        apply_upgrade(&mut state);
        assert_eq!(state.coins, 0);
        assert_eq!(state.click_power, 2);
        assert!(!can_afford(&state));
    }

    #[test]
    fn scenario_c_unaffordable_upgrade_is_noop() {
        let mut state = ClickerState::new();
        click_n(&mut state, 25);
        apply_upgrade(&mut state);
        let log_len = state.log.len();

        apply_upgrade(&mut state);
        assert_eq!(state.coins, 0);
        assert_eq!(state.click_power, 2);
        assert_eq!(state.log.len(), log_len);
    }

    #[test]
    fn scenario_d_particle_expires_after_lifetime() {
        let mut state = ClickerState::new();
        state.click_power = 3;
        apply_click(&mut state, Position::new(10, 20));
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].position, Position::new(10, 20));
        assert_eq!(state.particles[0].amount, 3);

        tick(&mut state, PARTICLE_LIFETIME_TICKS - 1);
        assert_eq!(state.particles.len(), 1);
        tick(&mut state, 1);
        assert!(state.particles.is_empty());
        assert!(state.timers.is_empty());
    }

    #[test]
    fn expiry_removes_only_its_own_particle() {
        let mut state = ClickerState::new();
        // Three clicks within the same tick share a spawn time
        let a = apply_click(&mut state, Position::new(0, 0));
        let b = apply_click(&mut state, Position::new(1, 0));
        let c = apply_click(&mut state, Position::new(2, 0));
        assert!(a != b && b != c && a != c);

        tick(&mut state, 5);
        let d = apply_click(&mut state, Position::new(3, 0));

        tick(&mut state, 5);
        let ids: Vec<ParticleId> = state.particles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![d]);

        tick(&mut state, 5);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn expire_particle_tolerates_missing_id() {
        let mut state = ClickerState::new();
        let id = apply_click(&mut state, Position::default());
        assert!(expire_particle(&mut state, id));
        assert!(!expire_particle(&mut state, id));
        // The scheduled expiry then fires against an already-removed id
        tick(&mut state, PARTICLE_LIFETIME_TICKS);
        assert!(state.particles.is_empty());
    }

    /// Feed one frame timestamp through the clock into the state, the way the
    /// frame loop and the input handlers do.
    fn frame(gt: &mut GameTime, state: &mut ClickerState, now: f64) {
        let ticks = gt.update(now);
        advance(state, ticks, gt.pending_ms());
    }

    #[test]
    fn particle_lives_full_lifetime_in_wall_time() {
        for click_at in [190.0, 200.0, 250.0, 299.0, 301.5] {
            let mut gt = GameTime::default();
            let mut state = ClickerState::new();
            frame(&mut gt, &mut state, 0.0);
            frame(&mut gt, &mut state, click_at);
            let id = apply_click(&mut state, Position::default());

            let mut now = click_at;
            while state.particles.iter().any(|p| p.id == id) {
                now += 10.0;
                frame(&mut gt, &mut state, now);
            }
            let lived = now - click_at;
            assert!(lived >= 1000.0, "click at {}: gone after {} ms", click_at, lived);
            assert!(
                lived < 1000.0 + MS_PER_TICK as f64 + 10.0,
                "click at {}: lingered {} ms",
                click_at,
                lived
            );
        }
    }

    #[test]
    fn click_mid_tick_expires_on_following_tick() {
        let mut state = ClickerState::new();
        advance(&mut state, 1, 90);
        apply_click(&mut state, Position::default());
        assert_eq!(state.particles[0].born_ms, 190);

        tick(&mut state, PARTICLE_LIFETIME_TICKS);
        assert_eq!(state.particles.len(), 1);
        tick(&mut state, 1);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn background_gap_expires_particle() {
        let mut gt = GameTime::default();
        let mut state = ClickerState::new();
        frame(&mut gt, &mut state, 0.0);
        apply_click(&mut state, Position::default());

        // Tab hidden for 10 seconds, then the next frame arrives
        frame(&mut gt, &mut state, 10_000.0);
        assert!(state.particles.is_empty());
        assert!(state.timers.is_empty());
        assert_eq!(state.click_flash, 0);
    }

    #[test]
    fn particles_keep_spawn_order() {
        let mut state = ClickerState::new();
        for x in 0..5 {
            apply_click(&mut state, Position::new(x, 0));
        }
        let xs: Vec<u16> = state.particles.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn click_flash_counts_down() {
        let mut state = ClickerState::new();
        apply_click(&mut state, Position::default());
        tick(&mut state, CLICK_FLASH_TICKS - 1);
        assert_eq!(state.click_flash, 1);
        tick(&mut state, 5);
        assert_eq!(state.click_flash, 0);
    }

    #[test]
    fn click_rearms_flash() {
        let mut state = ClickerState::new();
        apply_click(&mut state, Position::default());
        tick(&mut state, 4);
        apply_click(&mut state, Position::default());
        assert_eq!(state.click_flash, CLICK_FLASH_TICKS);
    }

    #[test]
    fn tick_zero_does_nothing() {
        let mut state = ClickerState::new();
        apply_click(&mut state, Position::default());
        tick(&mut state, 0);
        assert_eq!(state.click_flash, CLICK_FLASH_TICKS);
        assert_eq!(state.anim_frame, 0);
    }

    #[test]
    fn upgrade_logs_and_flashes() {
        let mut state = ClickerState::new();
        state.coins = 30;
        apply_upgrade(&mut state);
        assert_eq!(state.coins, 5);
        assert!(state.purchase_flash > 0);
        assert!(state.log.last().is_some_and(|e| e.text.contains("Lv.2")));
    }

    #[test]
    fn upgrade_at_exact_cost() {
        let mut state = ClickerState::new();
        state.coins = UPGRADE_COST;
        apply_upgrade(&mut state);
        assert_eq!(state.coins, 0);
        assert_eq!(state.click_power, 2);
    }

    #[test]
    fn upgrade_one_short() {
        let mut state = ClickerState::new();
        state.coins = UPGRADE_COST - 1;
        apply_upgrade(&mut state);
        assert_eq!(state.coins, UPGRADE_COST - 1);
        assert_eq!(state.click_power, 1);
    }

    #[test]
    fn derived_totals() {
        let mut state = ClickerState::new();
        click_n(&mut state, 60);
        apply_upgrade(&mut state);
        apply_upgrade(&mut state);
        assert_eq!(state.coins, 10);
        assert_eq!(total_spent(&state), 50);
        assert_eq!(total_earned(&state), 60);
    }

    #[test]
    fn derived_totals_initial() {
        let state = ClickerState::new();
        assert_eq!(total_spent(&state), 0);
        assert_eq!(total_earned(&state), 0);
    }

    #[test]
    fn random_position_inside_box() {
        let mut state = ClickerState::new();
        for _ in 0..100 {
            let p = random_position(&mut state, 12, 5);
            assert!(p.x < 12 && p.y < 5);
        }
        assert_eq!(random_position(&mut state, 0, 0), Position::new(0, 0));
    }

    #[test]
    fn format_number_basic() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}

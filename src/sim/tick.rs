//! Fixed timestep simulation tick
//!
//! Per-tick order: respawn request, player input and physics, platform
//! collisions, platform motion, fall-out / win / death checks, particles.

use glam::Vec2;

use super::collision::{
    Side, check_fall_out, check_flag_touch, resolve_platform_collisions, touches_spike,
};
use super::color::Color;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (pressed this tick)
    pub jump: bool,
    /// Dash (pressed this tick)
    pub dash: bool,
    /// Respawn at the start point (pressed this tick)
    pub respawn: bool,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or 1. Opposite keys cancel.
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.right {
            axis += 1.0;
        }
        if self.left {
            axis -= 1.0;
        }
        axis
    }

    /// Fold newer input into this one: held keys are replaced, presses accumulate
    pub fn merge(&mut self, newer: &TickInput) {
        self.left = newer.left;
        self.right = newer.right;
        self.jump |= newer.jump;
        self.dash |= newer.dash;
        self.respawn |= newer.respawn;
    }

    /// Drop pressed inputs once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.jump = false;
        self.dash = false;
        self.respawn = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if input.respawn && state.phase != GamePhase::Won {
        respawn(state);
    }

    if state.phase == GamePhase::Playing {
        update_player(state, input, dt);

        let was_grounded = state.player.grounded;
        resolve_platform_collisions(&mut state.player, &state.platforms, &mut state.contacts);
        log_contacts(state, was_grounded);

        for platform in &mut state.platforms {
            platform.advance(dt);
        }

        check_outcomes(state);
    }

    // Particles keep animating after a win or death
    state.particles.update(dt);
}

fn respawn(state: &mut GameState) {
    state.player.respawn(&state.tuning);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Respawned);
    log::info!("Player respawned");
}

/// Dash, horizontal movement, jumping, gravity
fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.tuning;
    let player = &mut state.player;
    let mut bursts: Vec<Vec2> = Vec::new();

    player.update_dash_timers(tuning);

    if input.dash && player.try_dash(tuning) {
        state.events.push(GameEvent::DashStarted);
        bursts.push(player.center());
        log::debug!("Dash at {:?}", player.pos);
    }

    player.vel.x = input.axis() * player.current_speed(tuning);
    player.pos.x += player.vel.x * dt;

    if input.jump {
        if let Some(count) = player.try_jump(tuning) {
            let air = count > 1;
            state.events.push(GameEvent::Jumped { air });
            if air {
                bursts.push(player.center());
            }
            log::debug!("Jump {} at {:?}", count, player.pos);
        }
    }

    player.vel.y += tuning.gravity * dt;
    player.pos.y += player.vel.y * dt;

    for origin in bursts {
        state.emit_burst(origin, Color::WHITE);
    }
}

fn log_contacts(state: &GameState, was_grounded: bool) {
    for contact in &state.contacts {
        match contact.side {
            Side::Top if !was_grounded => {
                log::debug!("Landed on platform {}", contact.platform)
            }
            Side::Bottom => log::debug!("Hit head on platform {}", contact.platform),
            _ => {}
        }
    }
}

/// Fall-out respawn, flag touch, spike death
fn check_outcomes(state: &mut GameState) {
    if check_fall_out(&mut state.player, &state.tuning) {
        state.events.push(GameEvent::FellOut);
        log::info!("Player fell out of the world, respawning");
    }

    if check_flag_touch(&state.player, &mut state.flag) {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::FlagReached);
        log::info!("Flag reached after {} ticks", state.time_ticks);
    } else if touches_spike(&state.player, &state.spikes) {
        state.player.alive = false;
        state.phase = GamePhase::Dead;
        state.events.push(GameEvent::Died);
        log::info!("Player died at {:?}", state.player.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::collision::Contact;
    use crate::sim::level::Level;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Platform, Spike};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// Ground only, flag far away
    fn flat_level() -> Level {
        Level {
            platforms: vec![Platform::fixed(Rect::new(0.0, 400.0, 800.0, 20.0))],
            spikes: Vec::new(),
            flag: Vec2::new(5000.0, 0.0),
        }
    }

    fn flat_state() -> GameState {
        GameState::with_level(42, Tuning::default(), flat_level())
    }

    /// Tick with no input until the player stands on something
    fn settle(state: &mut GameState) {
        let idle = TickInput::default();
        for _ in 0..240 {
            tick(state, &idle, SIM_DT);
            if state.player.grounded {
                return;
            }
        }
        panic!("player never landed");
    }

    fn pressed(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_spawn_falls_onto_ground() {
        let mut state = flat_state();
        settle(&mut state);
        assert_eq!(state.player.pos.y, 360.0);
        assert_eq!(state.player.jump_count, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_rest_on_platform_is_stable() {
        let mut state = flat_state();
        settle(&mut state);
        let idle = TickInput::default();
        for _ in 0..600 {
            tick(&mut state, &idle, SIM_DT);
            assert_eq!(state.player.pos.y, 400.0 - 40.0);
            assert_eq!(state.player.vel.y, 0.0);
            assert!(state.player.grounded);
        }
        assert_eq!(state.player.pos.x, 100.0);
    }

    #[test]
    fn test_contacts_reuse_one_buffer() {
        let mut state = flat_state();
        settle(&mut state);
        assert_eq!(state.contacts, vec![Contact { platform: 0, side: Side::Top }]);

        let buffer = state.contacts.as_ptr();
        let idle = TickInput::default();
        for _ in 0..300 {
            tick(&mut state, &idle, SIM_DT);
            assert_eq!(state.contacts.len(), 1);
            assert_eq!(state.contacts.as_ptr(), buffer);
        }

        // Airborne: contacts from the previous tick are gone
        tick(&mut state, &pressed(|i| i.jump = true), SIM_DT);
        assert!(state.contacts.is_empty());
    }

    #[test]
    fn test_horizontal_input() {
        let mut state = flat_state();
        settle(&mut state);
        let x0 = state.player.pos.x;

        tick(&mut state, &pressed(|i| i.right = true), SIM_DT);
        assert!((state.player.pos.x - (x0 + 5.0)).abs() < 1e-3);

        // Opposite keys cancel
        let x1 = state.player.pos.x;
        tick(&mut state, &pressed(|i| { i.left = true; i.right = true }), SIM_DT);
        assert_eq!(state.player.pos.x, x1);
        assert_eq!(state.player.vel.x, 0.0);

        tick(&mut state, &pressed(|i| i.left = true), SIM_DT);
        assert!((state.player.pos.x - (x1 - 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_double_jump_and_particles() {
        let mut state = flat_state();
        settle(&mut state);
        state.drain_events();
        let jump = pressed(|i| i.jump = true);

        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped { air: false }]);
        assert_eq!(state.player.jump_count, 1);
        assert!(state.particles.is_empty());
        assert!(state.player.vel.y < 0.0);

        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped { air: true }]);
        assert_eq!(state.player.jump_count, 2);
        assert_eq!(state.particles.len(), 20);

        // Out of jumps until landing
        tick(&mut state, &jump, SIM_DT);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.player.jump_count, 2);

        settle(&mut state);
        assert_eq!(state.player.jump_count, 0);
    }

    #[test]
    fn test_dash_lasts_dash_time() {
        let mut state = flat_state();
        settle(&mut state);
        let tuning = state.tuning.clone();

        tick(&mut state, &pressed(|i| { i.dash = true; i.right = true }), SIM_DT);
        assert!(state.player.dashing);
        assert_eq!(state.particles.len(), 20);
        let mut dash_ticks = 1;

        let hold_right = pressed(|i| i.right = true);
        loop {
            let x = state.player.pos.x;
            tick(&mut state, &hold_right, SIM_DT);
            if !state.player.dashing {
                assert!((state.player.pos.x - x - tuning.base_speed * SIM_DT).abs() < 1e-3);
                break;
            }
            assert!((state.player.pos.x - x - tuning.dash_speed * SIM_DT).abs() < 1e-3);
            dash_ticks += 1;
            assert!(dash_ticks < 100);
        }

        assert_eq!(dash_ticks, tuning.dash_ticks());
        assert!((dash_ticks as f32 * SIM_DT - tuning.dash_time).abs() < 1e-4);
        assert_eq!(state.player.speed, tuning.base_speed);
    }

    #[test]
    fn test_dash_cooldown_blocks_retrigger() {
        let mut state = flat_state();
        settle(&mut state);
        state.drain_events();
        let dash = pressed(|i| i.dash = true);
        let cooldown = state.tuning.dash_cooldown_ticks();

        let mut dash_ticks = Vec::new();
        for i in 0..=cooldown {
            tick(&mut state, &dash, SIM_DT);
            if state.drain_events().contains(&GameEvent::DashStarted) {
                dash_ticks.push(i);
            }
        }
        assert_eq!(dash_ticks, vec![0, cooldown]);
    }

    #[test]
    fn test_fall_out_respawns_at_spawn() {
        let mut state = flat_state();
        state.player.pos = Vec2::new(2000.0, 0.0);
        state.player.jump_count = 1;
        let idle = TickInput::default();

        let mut fell = false;
        for _ in 0..600 {
            tick(&mut state, &idle, SIM_DT);
            if state.drain_events().contains(&GameEvent::FellOut) {
                fell = true;
                break;
            }
        }
        assert!(fell);
        assert_eq!(state.player.pos, state.tuning.spawn_point);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.jump_count, 0);
    }

    #[test]
    fn test_flag_reached_latches_and_freezes() {
        let mut state = flat_state();
        state.flag.pos = Vec2::new(600.0, 300.0);
        state.player.pos = Vec2::new(600.0, 320.0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.flag.reached);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.drain_events(), vec![GameEvent::FlagReached]);

        let pos = state.player.pos;
        let run_away = pressed(|i| { i.left = true; i.jump = true; i.respawn = true });
        for _ in 0..120 {
            tick(&mut state, &run_away, SIM_DT);
        }
        assert!(state.flag.reached);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.player.pos, pos);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_spike_kills_until_respawn() {
        let mut level = flat_level();
        level.spikes.push(Spike {
            pos: Vec2::new(300.0, 400.0),
            width: 30.0,
            height: 20.0,
        });
        let mut state = GameState::with_level(1, Tuning::default(), level);
        settle(&mut state);

        let right = pressed(|i| i.right = true);
        for _ in 0..120 {
            tick(&mut state, &right, SIM_DT);
            if state.phase == GamePhase::Dead {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Dead);
        assert!(!state.player.alive);
        assert!(state.drain_events().contains(&GameEvent::Died));

        let pos = state.player.pos;
        tick(&mut state, &right, SIM_DT);
        assert_eq!(state.player.pos, pos);

        tick(&mut state, &pressed(|i| i.respawn = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.alive);
        assert_eq!(state.drain_events(), vec![GameEvent::Respawned]);
    }

    #[test]
    fn test_moving_platforms_advance_while_playing() {
        let mut state = GameState::new(3, Tuning::default());
        let start = state.platforms[1].rect.x;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.platforms[1].rect.x > start);
        assert_eq!(state.platforms[0].rect.x, 0.0);
    }

    #[test]
    fn test_input_merge_latches_presses() {
        let mut pending = TickInput::default();
        pending.merge(&pressed(|i| { i.jump = true; i.right = true }));
        pending.merge(&pressed(|i| i.left = true));
        assert!(pending.jump);
        assert!(pending.left && !pending.right);

        pending.clear_one_shots();
        assert!(!pending.jump && !pending.dash && !pending.respawn);
        assert!(pending.left);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            pressed(|i| i.right = true),
            pressed(|i| { i.jump = true; i.right = true }),
            pressed(|i| i.jump = true),
            pressed(|i| i.dash = true),
            TickInput::default(),
        ];

        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.particles.len(), state2.particles.len());
        for (a, b) in state1.particles.iter().zip(state2.particles.iter()) {
            assert_eq!(a, b);
        }
    }

    proptest! {
        #[test]
        fn prop_jump_count_bounded(
            script in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = GameState::new(5, Tuning::default());
            let max_jumps = state.tuning.max_jumps;
            for (left, right, jump, dash) in script {
                let input = TickInput { left, right, jump, dash, respawn: false };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.player.jump_count <= max_jumps);
                if state.player.grounded {
                    prop_assert_eq!(state.player.jump_count, 0);
                }
                prop_assert!(state.particles.len() <= state.tuning.max_particles);
            }
        }
    }
}

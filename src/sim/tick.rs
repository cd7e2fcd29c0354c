//! Fixed timestep simulation tick
//!
//! Applies one tick's worth of player input to the arena, then advances it.

use super::state::{Arena, GamePhase, StepReport};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pad rotation direction, -1..=1 (scaled by `pad_speed`)
    pub movement: f32,
    /// Pause toggle
    pub pause: bool,
    /// Advance a single tick while paused
    pub step_once: bool,
    /// Respawn everything from the seed
    pub restart: bool,
}

/// Advance the arena by one tick. Returns the step report, or `None` when
/// the arena did not move (paused or cleared).
pub fn tick(arena: &mut Arena, input: &TickInput) -> Option<StepReport> {
    if input.restart {
        arena.restart();
    }

    // Handle pause toggle
    if input.pause {
        arena.phase = match arena.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::Cleared => GamePhase::Cleared,
        };
        log::info!("Phase: {:?}", arena.phase);
    }

    match arena.phase {
        GamePhase::Cleared => return None,
        GamePhase::Paused if !input.step_once => return None,
        _ => {}
    }

    let movement = if input.movement.is_finite() {
        input.movement.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let pad_speed = arena.config().pad_speed;
    arena.rotate_pads(movement * pad_speed);

    let report = arena.step();

    if report.bricks_destroyed > 0 && arena.bricks().is_empty() {
        arena.phase = GamePhase::Cleared;
        log::info!(
            "All bricks cleared after {} ticks, score {}",
            arena.time_ticks(),
            arena.score()
        );
    }

    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use crate::polar_to_cartesian;
    use crate::settings::ArenaConfig;
    use crate::sim::{BallCollider, BrickCollider};

    #[test]
    fn test_tick_pause() {
        let mut arena = Arena::new(ArenaConfig::default());
        let before = arena.balls().to_vec();

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        assert!(tick(&mut arena, &pause).is_none());
        assert_eq!(arena.phase(), GamePhase::Paused);

        // Stays frozen
        assert!(tick(&mut arena, &TickInput::default()).is_none());
        assert_eq!(arena.balls(), &before[..]);
        assert_eq!(arena.time_ticks(), 0);

        // Single step while paused
        let step = TickInput {
            step_once: true,
            ..Default::default()
        };
        assert!(tick(&mut arena, &step).is_some());
        assert_eq!(arena.phase(), GamePhase::Paused);
        assert_eq!(arena.time_ticks(), 1);

        // Unpause resumes in the same tick
        assert!(tick(&mut arena, &pause).is_some());
        assert_eq!(arena.phase(), GamePhase::Playing);
        assert_eq!(arena.time_ticks(), 2);
    }

    #[test]
    fn test_movement_rotates_pads() {
        let mut arena = Arena::new(ArenaConfig {
            ball_count: 0,
            ..Default::default()
        });
        let pad_speed = arena.config().pad_speed;

        let input = TickInput {
            movement: 5.0,
            ..Default::default()
        };
        tick(&mut arena, &input);
        assert_eq!(arena.pads()[0].angular_velocity(), pad_speed);
        assert!((arena.pads()[0].angle_start() - pad_speed).abs() < 1e-6);

        // Idle tick clears the pads' motion
        tick(&mut arena, &TickInput::default());
        assert_eq!(arena.pads()[0].angular_velocity(), 0.0);

        let nan = TickInput {
            movement: f32::NAN,
            ..Default::default()
        };
        tick(&mut arena, &nan);
        assert_eq!(arena.pads()[0].angular_velocity(), 0.0);
    }

    #[test]
    fn test_cleared_when_last_brick_falls() {
        let mut arena = Arena::empty(ArenaConfig {
            ball_count: 0,
            brick_rows: 0,
            pad_count: 0,
            ..Default::default()
        });
        arena.add_brick(BrickCollider::new(10.0, 3, 0.0, 0.0));
        let theta = -0.26;
        arena.add_ball(BallCollider::new(
            polar_to_cartesian(13.4, theta).to3(),
            polar_to_cartesian(-0.3, theta).to3(),
            0.5,
        ));

        let report = tick(&mut arena, &TickInput::default());
        assert_eq!(report.map(|r| r.bricks_destroyed), Some(1));
        assert_eq!(arena.phase(), GamePhase::Cleared);

        // Nothing moves once cleared, and pausing does not leave the state
        let ticks = arena.time_ticks();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        assert!(tick(&mut arena, &pause).is_none());
        assert_eq!(arena.phase(), GamePhase::Cleared);
        assert_eq!(arena.time_ticks(), ticks);
    }

    #[test]
    fn test_empty_arena_is_not_cleared() {
        let mut arena = Arena::empty(ArenaConfig::default());
        arena.add_ball(BallCollider::new(Vector::zero(), Vector::zero(), 0.5));
        assert!(tick(&mut arena, &TickInput::default()).is_some());
        assert_eq!(arena.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_restart_leaves_cleared() {
        let mut arena = Arena::new(ArenaConfig::default());
        arena.phase = GamePhase::Cleared;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert!(tick(&mut arena, &restart).is_some());
        assert_eq!(arena.phase(), GamePhase::Playing);
        assert_eq!(arena.time_ticks(), 1);
    }

    #[test]
    fn test_determinism() {
        let config = ArenaConfig {
            seed: 99999,
            ball_count: 3,
            ..Default::default()
        };
        let mut a = Arena::new(config.clone());
        let mut b = Arena::new(config);

        let inputs = [
            TickInput {
                movement: 1.0,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                movement: -0.5,
                ..Default::default()
            },
        ];

        for i in 0..600 {
            let input = &inputs[(i / 40) % inputs.len()];
            assert_eq!(tick(&mut a, input), tick(&mut b, input));
        }
        assert_eq!(a.balls(), b.balls());
        assert_eq!(a.pads(), b.pads());
        assert_eq!(a.score(), b.score());
    }
}

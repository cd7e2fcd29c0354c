//! Arena state and the per-tick collision pass
//!
//! The arena exclusively owns every collider. One [`Arena::step`] moves all
//! balls, then resolves collisions for each ball in turn against the bounds,
//! each pad, each brick and every other ball. Every response mutates the ball
//! in place, so later tests in the same tick see the corrected state and the
//! order matters for reproducing trajectories.

use std::f32::consts::PI;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::BallCollider;
use super::bounds::BoundsCollider;
use super::brick::BrickCollider;
use super::collider::{ColliderMut, ColliderRef};
use crate::consts::*;
use crate::geometry::Vector;
use crate::polar_to_cartesian;
use crate::settings::ArenaConfig;

/// Placement attempts per ball before giving up
const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advancing every tick
    Playing,
    /// Frozen until unpaused or single-stepped
    Paused,
    /// Every brick destroyed
    Cleared,
}

/// What happened during one [`Arena::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub bounds_hits: u32,
    pub pad_hits: u32,
    pub brick_hits: u32,
    pub ball_hits: u32,
    pub bricks_destroyed: u32,
}

impl StepReport {
    pub fn total_hits(&self) -> u32 {
        self.bounds_hits + self.pad_hits + self.brick_hits + self.ball_hits
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    rng: Pcg32,
    bounds: BoundsCollider,
    pads: Vec<BrickCollider>,
    bricks: Vec<BrickCollider>,
    balls: Vec<BallCollider>,
    score: u64,
    time_ticks: u64,
    pub(super) phase: GamePhase,
}

impl Arena {
    /// Create an arena and spawn pads, bricks and balls from `config`
    pub fn new(config: ArenaConfig) -> Self {
        let mut arena = Self::empty(config);
        arena.spawn_all();
        arena
    }

    /// Arena with only its outer wall
    pub fn empty(config: ArenaConfig) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            bounds: BoundsCollider::new(ARENA_RADIUS),
            pads: Vec::new(),
            bricks: Vec::new(),
            balls: Vec::new(),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
        }
    }

    fn spawn_all(&mut self) {
        self.spawn_pads();
        self.spawn_bricks();
        self.spawn_balls();
        log::info!(
            "Spawned {} pads, {} bricks, {} balls (seed {})",
            self.pads.len(),
            self.bricks.len(),
            self.balls.len(),
            self.config.seed
        );
    }

    /// Throw everything away and respawn from the stored seed
    pub fn restart(&mut self) {
        self.pads.clear();
        self.bricks.clear();
        self.balls.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.rng = Pcg32::seed_from_u64(self.config.seed);
        log::info!("Restarting arena");
        self.spawn_all();
    }

    /// Pads evenly spaced around the pad ring, aligned to arena segments
    pub fn spawn_pads(&mut self) {
        let count = self.config.pad_count;
        if count == 0 {
            return;
        }
        let spacing = SEGMENTS / count;
        for i in 0..count {
            let angle = (i * spacing) as f32 * ANGLE;
            self.pads
                .push(BrickCollider::new(PAD_DISTANCE, PAD_SEGMENTS, angle, 0.0));
        }
    }

    /// Rows of bricks outward from [`BRICK_DISTANCE`], columns clockwise from angle 0
    pub fn spawn_bricks(&mut self) {
        for row in 0..self.config.brick_rows {
            let distance = BRICK_DISTANCE + row as f32 * BRICK_WIDTH;
            for column in 0..self.config.brick_columns {
                let angle = (column * BRICK_SEGMENTS) as f32 * ANGLE;
                self.bricks
                    .push(BrickCollider::new(distance, BRICK_SEGMENTS, angle, 0.0));
            }
        }
    }

    /// Balls at random free spots between the bricks and the pads, heading
    /// in random directions
    pub fn spawn_balls(&mut self) {
        let radius = self.config.ball_radius;
        let (min_speed, max_speed) = (self.config.ball_min_speed, self.config.ball_max_speed);

        for n in 0..self.config.ball_count {
            let Some(position) = self.find_ball_spot(radius) else {
                log::warn!(
                    "No free spot for ball {} of {}, spawned {}",
                    n + 1,
                    self.config.ball_count,
                    self.balls.len()
                );
                break;
            };

            let heading = self.rng.random_range(-PI..PI);
            let speed = if max_speed > min_speed {
                self.rng.random_range(min_speed..max_speed)
            } else {
                min_speed
            };
            let velocity = polar_to_cartesian(speed, heading).to3();

            self.balls.push(
                BallCollider::new(position, velocity, radius)
                    .with_max_velocity(self.config.max_velocity),
            );
        }
    }

    fn find_ball_spot(&mut self, radius: f32) -> Option<Vector<3>> {
        let (min, max) = self.config.spawn_band();
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let distance = if max > min {
                self.rng.random_range(min..max)
            } else {
                min
            };
            let angle = self.rng.random_range(-PI..PI);
            let position = polar_to_cartesian(distance, angle).to3().with_y(radius);

            let candidate = BallCollider::new(position, Vector::zero(), radius);
            if !self.balls.iter().any(|ball| ball.did_collide_ball(&candidate)) {
                return Some(position);
            }
        }
        None
    }

    pub fn add_ball(&mut self, ball: BallCollider) {
        self.balls.push(ball);
    }

    pub fn add_brick(&mut self, brick: BrickCollider) {
        self.bricks.push(brick);
    }

    pub fn add_pad(&mut self, pad: BrickCollider) {
        self.pads.push(pad);
    }

    /// Turn every pad by `angle`. Called with 0 on idle ticks so pads stop
    /// imparting motion.
    pub fn rotate_pads(&mut self, angle: f32) {
        for pad in &mut self.pads {
            pad.rotate(angle);
        }
    }

    /// Advance one tick and resolve collisions
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();

        for ball in &mut self.balls {
            ball.step();
        }

        let mut destroyed = vec![false; self.bricks.len()];
        for i in 0..self.balls.len() {
            let ball = &mut self.balls[i];

            if ball.collide_bounds(&self.bounds) {
                report.bounds_hits += 1;
            }
            for pad in &self.pads {
                if ball.collide_brick(pad) {
                    report.pad_hits += 1;
                }
            }
            for (brick, hit) in self.bricks.iter().zip(destroyed.iter_mut()) {
                if ball.collide_brick(brick) {
                    report.brick_hits += 1;
                    *hit = true;
                }
            }

            for j in 0..self.balls.len() {
                if self.collide_balls(i, j) {
                    report.ball_hits += 1;
                }
            }
        }

        // Bricks hit this tick go away together once every ball has been resolved
        report.bricks_destroyed = destroyed.iter().filter(|&&hit| hit).count() as u32;
        let mut flags = destroyed.into_iter();
        self.bricks.retain(|brick| {
            let hit = flags.next().unwrap_or(false);
            if hit {
                log::debug!(
                    "Brick at {:.2} rad, ring {} destroyed",
                    brick.angle_start(),
                    brick.inner_radius()
                );
            }
            !hit
        });

        self.score += u64::from(report.bricks_destroyed) * self.config.brick_value;
        self.time_ticks += 1;

        report
    }

    /// Resolve a collision of ball `i` against ball `j`. A ball never collides with itself.
    fn collide_balls(&mut self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        if i < j {
            let (head, tail) = self.balls.split_at_mut(j);
            head[i].collide_ball(&mut tail[0])
        } else {
            let (head, tail) = self.balls.split_at_mut(i);
            tail[0].collide_ball(&mut head[j])
        }
    }

    // === Read API ===

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn bounds(&self) -> &BoundsCollider {
        &self.bounds
    }

    pub fn pads(&self) -> &[BrickCollider] {
        &self.pads
    }

    pub fn bricks(&self) -> &[BrickCollider] {
        &self.bricks
    }

    pub fn balls(&self) -> &[BallCollider] {
        &self.balls
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Every collider: bounds first, then pads, bricks and balls
    pub fn colliders(&self) -> impl Iterator<Item = ColliderRef<'_>> {
        std::iter::once(ColliderRef::Bounds(&self.bounds))
            .chain(self.pads.iter().map(ColliderRef::Brick))
            .chain(self.bricks.iter().map(ColliderRef::Brick))
            .chain(self.balls.iter().map(ColliderRef::Ball))
    }

    /// Visit every collider mutably, in the same order as [`Arena::colliders`]
    pub fn for_each_collider_mut(&mut self, mut f: impl FnMut(ColliderMut<'_>)) {
        f(ColliderMut::Bounds(&mut self.bounds));
        for pad in &mut self.pads {
            f(ColliderMut::Brick(pad));
        }
        for brick in &mut self.bricks {
            f(ColliderMut::Brick(brick));
        }
        for ball in &mut self.balls {
            f(ColliderMut::Ball(ball));
        }
    }
}

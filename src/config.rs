//! Command line options and the immutable settings derived from them.
//!
//! Every physical constant the simulation consumes lives in [`SimConfig`],
//! which is built once at startup and handed to the stepper and the
//! scheduler. [`SpawnPolicy`] controls the radius of bodies created by mouse
//! clicks.

use core::time::Duration;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};

pub const DEFAULT_DT: f32 = 0.5;
pub const DEFAULT_GAMMA: f32 = 1.0;
pub const DEFAULT_FPS: u32 = 24;
pub const DEFAULT_COLLISION_DECAY: f32 = 0.5;
pub const DEFAULT_RADIUS_SCALE: f32 = 0.05;
pub const DEFAULT_MIN_RADIUS: f32 = 1.0;

/// How force recomputation is coupled to position updates within a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Integration {
    /// Each body is moved, bounced, accelerated and drawn before the next
    /// one is touched, so later bodies see earlier bodies' new positions.
    #[default]
    #[value(name = "sequential")]
    SequentialEuler,
    /// All bodies are moved first, then every acceleration is recomputed
    /// from the same set of positions.
    #[value(name = "synchronized")]
    SynchronizedEuler,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub dt: f32,
    pub gamma: f32,
    pub fps: u32,
    pub collision_decay: f32,
    pub integration: Integration,
    pub max_bodies: Option<usize>,
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gamma: DEFAULT_GAMMA,
            fps: DEFAULT_FPS,
            collision_decay: DEFAULT_COLLISION_DECAY,
            integration: Integration::default(),
            max_bodies: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub radius_scale: f32,
    pub min_radius: f32,
}

impl SpawnPolicy {
    /// Maps a unit sample onto a radius for a canvas of the given height.
    pub fn radius(&self, unit: f32, canvas_height: f32) -> f32 {
        unit * canvas_height * 0.5 * self.radius_scale + self.min_radius
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            radius_scale: DEFAULT_RADIUS_SCALE,
            min_radius: DEFAULT_MIN_RADIUS,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Click to spawn circles that attract and bounce off each other")]
pub struct Args {
    /// Integration timestep per frame
    #[arg(long, default_value_t = DEFAULT_DT)]
    pub dt: f32,

    /// Interaction strength; negative values repel
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_GAMMA)]
    pub gamma: f32,

    /// Target simulation frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Velocity factor kept (and reversed) when a move is rolled back
    #[arg(long, default_value_t = DEFAULT_COLLISION_DECAY)]
    pub collision_decay: f32,

    /// Whether forces see positions updated earlier in the same frame
    #[arg(long, value_enum, default_value_t = Integration::SequentialEuler)]
    pub integration: Integration,

    /// Refuse spawns once this many bodies exist
    #[arg(long)]
    pub max_bodies: Option<usize>,

    /// Seed for spawn velocities and radii
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of the half canvas height added to the minimum radius
    #[arg(long, default_value_t = DEFAULT_RADIUS_SCALE)]
    pub radius_scale: f32,

    /// Smallest radius a spawned body can get
    #[arg(long, default_value_t = DEFAULT_MIN_RADIUS)]
    pub min_radius: f32,
}

impl Args {
    pub fn resolve(&self) -> Result<(SimConfig, SpawnPolicy)> {
        ensure!(
            self.dt.is_finite() && self.dt > 0.0,
            "dt must be a positive number, got {}",
            self.dt
        );
        ensure!(self.gamma.is_finite(), "gamma must be finite, got {}", self.gamma);
        ensure!(self.fps > 0, "fps must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&self.collision_decay),
            "collision decay must lie in [0, 1], got {}",
            self.collision_decay
        );
        ensure!(self.max_bodies != Some(0), "max bodies must be at least 1");
        ensure!(
            self.min_radius.is_finite() && self.min_radius > 0.0,
            "minimum radius must be positive, got {}",
            self.min_radius
        );
        ensure!(
            self.radius_scale.is_finite() && self.radius_scale >= 0.0,
            "radius scale must not be negative, got {}",
            self.radius_scale
        );

        let config = SimConfig {
            dt: self.dt,
            gamma: self.gamma,
            fps: self.fps,
            collision_decay: self.collision_decay,
            integration: self.integration,
            max_bodies: self.max_bodies,
            seed: self.seed,
        };

        let policy = SpawnPolicy {
            radius_scale: self.radius_scale,
            min_radius: self.min_radius,
        };

        Ok((config, policy))
    }
}

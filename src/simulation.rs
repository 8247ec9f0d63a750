use crate::{
    config::{Integration, SimConfig},
    physics::{Affect, Body, BodyId},
};

use itertools::Itertools;
use ultraviolet::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Normal,
    Highlighted,
}

impl From<&Body> for Tint {
    fn from(body: &Body) -> Self {
        if body.highlighted {
            Tint::Highlighted
        } else {
            Tint::Normal
        }
    }
}

/// Receives one filled disc per body per frame, in set order.
pub trait RenderSink {
    fn draw_disc(&mut self, pos: Vec2, radius: f32, tint: Tint);
}

pub struct Simulation {
    bodies: Vec<Body>,
    config: SimConfig,
    rng: fastrand::Rng,
    next_id: u32,
    frame: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Self {
            bodies: Vec::new(),
            config,
            rng,
            next_id: 0,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn highlighted(&self) -> Option<&Body> {
        self.bodies.iter().find(|body| body.highlighted)
    }

    /// Appends a body with a random initial velocity. Refused when the
    /// radius is not positive or the configured cap is reached.
    pub fn spawn(&mut self, x: f32, y: f32, radius: f32) -> Option<BodyId> {
        if radius.is_nan() || radius <= 0.0 {
            log::warn!("refusing to spawn a body with radius {radius}");
            return None;
        }

        if let Some(max) = self.config.max_bodies {
            if self.bodies.len() >= max {
                log::warn!("body limit of {max} reached, ignoring spawn at ({x}, {y})");
                return None;
            }
        }

        let id = BodyId(self.next_id);
        self.next_id += 1;

        let body = Body::create(id, x, y, radius, &mut self.rng);
        log::debug!(
            "spawned body #{} at ({x}, {y}) with radius {radius} and velocity ({}, {})",
            id.0,
            body.vel.x,
            body.vel.y
        );

        self.bodies.push(body);
        Some(id)
    }

    /// Highlights the first body whose box contains the point and clears
    /// every other highlight.
    pub fn hover(&mut self, x: f32, y: f32) -> Option<BodyId> {
        let hit = self
            .bodies
            .iter()
            .find_position(|body| body.contains_point(x, y))
            .map(|(index, _)| index);

        for (index, body) in self.bodies.iter_mut().enumerate() {
            body.highlighted = Some(index) == hit;
        }

        hit.map(|index| self.bodies[index].id)
    }

    pub fn step<S: RenderSink>(&mut self, sink: &mut S) {
        match self.config.integration {
            Integration::SequentialEuler => self.step_sequential(sink),
            Integration::SynchronizedEuler => self.step_synchronized(sink),
        }

        self.frame += 1;
        log::trace!("frame {} done with {} bodies", self.frame, self.bodies.len());
    }

    fn step_sequential<S: RenderSink>(&mut self, sink: &mut S) {
        for i in 0..self.bodies.len() {
            self.advance(i);
            self.bodies[i].acc = self.acceleration_on(i);

            let body = &self.bodies[i];
            sink.draw_disc(body.pos, body.radius, body.into());
        }
    }

    fn step_synchronized<S: RenderSink>(&mut self, sink: &mut S) {
        for i in 0..self.bodies.len() {
            self.advance(i);
        }

        for body in &mut self.bodies {
            body.acc = Vec2::zero();
        }

        let gamma = self.config.gamma;

        for (a, b) in (0..self.bodies.len()).tuple_combinations() {
            let on_a = self.bodies[b].effect_on(&self.bodies[a], gamma);
            let on_b = self.bodies[a].effect_on(&self.bodies[b], gamma);

            self.bodies[a].acc += on_a;
            self.bodies[b].acc += on_b;
        }

        for body in &self.bodies {
            sink.draw_disc(body.pos, body.radius, body.into());
        }
    }

    /// Moves body `i`, undoing the move and reversing its damped velocity if
    /// it lands on another body, then applies last frame's acceleration.
    fn advance(&mut self, i: usize) {
        let dt = self.config.dt;
        let decay = self.config.collision_decay;

        let old_pos = self.bodies[i].pos;
        self.bodies[i].integrate_position(dt);

        let blocked = self
            .bodies
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && self.bodies[i].collides_with(other));

        let body = &mut self.bodies[i];

        if blocked {
            body.pos = old_pos;
            body.vel *= -decay;
        }

        body.integrate_velocity(dt);
    }

    /// Sum of the contributions of every other body, seeing whatever
    /// positions are committed at the time of the call.
    fn acceleration_on(&self, i: usize) -> Vec2 {
        let subject = &self.bodies[i];

        self.bodies
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .fold(Vec2::zero(), |acc, (_, source)| {
                acc + source.effect_on(subject, self.config.gamma)
            })
    }
}

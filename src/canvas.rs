use core::time::Duration;

use crate::{
    config::SpawnPolicy,
    physics::Body,
    scheduler::{Host, StopHandle},
    simulation::{RenderSink, Simulation, Tint},
};

use macroquad::{
    color::*,
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    shapes::*,
    text::draw_text,
    time::*,
    window::*,
};
use ultraviolet::Vec2;

const HINT: &str = "Click anywhere to spawn a circle";
const TOOLTIP_FONT: f32 = 16.0;
const TOOLTIP_LINE: f32 = 18.0;

/// Macroquad window acting as render sink and input source.
///
/// Discs drawn during a step are buffered and shown once the step is over,
/// then redrawn every display frame until the next step is due.
pub struct Canvas {
    shown: Vec<(Vec2, f32, Tint)>,
    pending: Vec<(Vec2, f32, Tint)>,
    policy: SpawnPolicy,
    rng: fastrand::Rng,
    stop: StopHandle,
    pointer: (f32, f32),
    spawned: bool,
}

impl Canvas {
    pub fn new(policy: SpawnPolicy, seed: Option<u64>, stop: StopHandle) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(1)),
            None => fastrand::Rng::new(),
        };

        Self {
            shown: Vec::new(),
            pending: Vec::new(),
            policy,
            rng,
            stop,
            pointer: mouse_position(),
            spawned: false,
        }
    }

    fn handle_input(&mut self, simulation: &mut Simulation) {
        if is_key_pressed(KeyCode::Escape) {
            log::info!("escape pressed, stopping");
            self.stop.stop();
        }

        let pointer = mouse_position();

        if pointer != self.pointer {
            self.pointer = pointer;
            simulation.hover(pointer.0, pointer.1);
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let radius = self.policy.radius(self.rng.f32(), screen_height());

            if simulation.spawn(pointer.0, pointer.1, radius).is_some() {
                self.spawned = true;
            }
        }
    }

    fn render(&self, simulation: &Simulation) {
        clear_background(WHITE);

        for &(pos, radius, tint) in &self.shown {
            let color = match tint {
                Tint::Normal => BLACK,
                Tint::Highlighted => RED,
            };

            draw_circle(pos.x, pos.y, radius, color);
        }

        if let Some(body) = simulation.highlighted() {
            let (x, y) = self.pointer;

            for (line, text) in tooltip_lines(body).iter().enumerate() {
                draw_text(
                    text,
                    x + 12.0,
                    y + 12.0 + TOOLTIP_LINE * (line as f32 + 1.0),
                    TOOLTIP_FONT,
                    DARKGRAY,
                );
            }
        }

        if !self.spawned {
            draw_text(
                HINT,
                screen_width() * 0.5 - 140.0,
                screen_height() * 0.5,
                24.0,
                GRAY,
            );
        }

        draw_text(
            &format!("{} bodies", simulation.bodies().len()),
            10.0,
            16.0,
            12.0,
            GRAY,
        );
    }
}

impl RenderSink for Canvas {
    fn draw_disc(&mut self, pos: Vec2, radius: f32, tint: Tint) {
        self.pending.push((pos, radius, tint));
    }
}

impl Host for Canvas {
    async fn suspend(&mut self, simulation: &mut Simulation, interval: Duration) {
        core::mem::swap(&mut self.shown, &mut self.pending);
        self.pending.clear();

        let start = get_time();

        loop {
            self.handle_input(simulation);
            self.render(simulation);
            next_frame().await;

            if self.stop.is_stopped() || get_time() - start >= interval.as_secs_f64() {
                break;
            }
        }
    }
}

fn tooltip_lines(body: &Body) -> [String; 3] {
    // Halves round up, so -1.5 shows as -1.
    let round = |v: f32| (v + 0.5).floor() as i64;

    [
        format!("Circle #{}", body.id.0),
        format!("pos {},{}", round(body.pos.x), round(body.pos.y)),
        format!("vel {},{}", round(body.vel.x), round(body.vel.y)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::physics::BodyId;

    #[test]
    fn tooltip_rounds_position_and_velocity() {
        let body = Body {
            id: BodyId(42),
            pos: Vec2::new(10.4, 20.6),
            vel: Vec2::new(-1.6, 0.2),
            acc: Vec2::zero(),
            radius: 3.0,
            highlighted: true,
        };

        assert_eq!(
            tooltip_lines(&body),
            ["Circle #42", "pos 10,21", "vel -2,0"].map(String::from)
        );
    }

    #[test]
    fn tooltip_rounds_halves_up() {
        let body = Body {
            id: BodyId(7),
            pos: Vec2::new(2.5, -0.5),
            vel: Vec2::new(-1.5, -2.5),
            acc: Vec2::zero(),
            radius: 1.0,
            highlighted: true,
        };

        assert_eq!(
            tooltip_lines(&body),
            ["Circle #7", "pos 3,0", "vel -1,-2"].map(String::from)
        );
    }
}

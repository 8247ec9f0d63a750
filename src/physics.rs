use ultraviolet::Vec2;

/// Speed bound, per axis, of the random velocity a new body starts with.
pub const SPAWN_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub radius: f32,
    pub highlighted: bool,
}

impl Body {
    /// Creates a body with zero acceleration and a random velocity drawn
    /// uniformly from `[-SPAWN_SPEED, SPAWN_SPEED)` on each axis.
    pub fn create(id: BodyId, x: f32, y: f32, radius: f32, rng: &mut fastrand::Rng) -> Self {
        let vel = Vec2::new(
            rng.f32() * 2.0 * SPAWN_SPEED - SPAWN_SPEED,
            rng.f32() * 2.0 * SPAWN_SPEED - SPAWN_SPEED,
        );

        Self {
            id,
            pos: Vec2::new(x, y),
            vel,
            acc: Vec2::zero(),
            radius,
            highlighted: false,
        }
    }

    pub fn integrate_position(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn integrate_velocity(&mut self, dt: f32) {
        self.vel += self.acc * dt;
    }

    /// Strict overlap test; touching circles do not collide.
    pub fn collides_with(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        (self.pos - other.pos).mag_sq() < reach * reach
    }

    pub fn distance_to(&self, other: &Self) -> f32 {
        (self.pos - other.pos).mag()
    }

    /// Box hit test used for pointer hover. Corners of the bounding square
    /// count as inside even though they lie outside the circle.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        (x - self.pos.x).abs() < self.radius && (y - self.pos.y).abs() < self.radius
    }
}

pub trait Affect {
    type Subject;

    fn effect_on(&self, other: &Self::Subject, gamma: f32) -> Vec2;
}

impl Affect for Body {
    type Subject = Self;

    /// Acceleration this body contributes to `other`. Coincident centers
    /// divide by zero and yield non-finite components.
    fn effect_on(&self, other: &Self::Subject, gamma: f32) -> Vec2 {
        let distance = other.distance_to(self);

        (self.pos - other.pos) * (gamma * other.radius * self.radius / (distance * distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, x: f32, y: f32, radius: f32) -> Body {
        Body {
            id: BodyId(id),
            pos: Vec2::new(x, y),
            vel: Vec2::zero(),
            acc: Vec2::zero(),
            radius,
            highlighted: false,
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn create_draws_velocity_within_bounds() {
        let mut rng = fastrand::Rng::with_seed(7);

        for i in 0..500 {
            let b = Body::create(BodyId(i), 10.0, -3.0, 2.5, &mut rng);

            assert_eq!(b.pos, Vec2::new(10.0, -3.0));
            assert_eq!(b.acc, Vec2::zero());
            assert_eq!(b.radius, 2.5);
            assert!(!b.highlighted);
            assert!((-SPAWN_SPEED..SPAWN_SPEED).contains(&b.vel.x));
            assert!((-SPAWN_SPEED..SPAWN_SPEED).contains(&b.vel.y));
        }
    }

    #[test]
    fn position_integration_is_linear_in_dt() {
        let mut split = body(0, 1.0, 2.0, 1.0);
        split.vel = Vec2::new(3.0, -1.5);
        let mut whole = split.clone();

        split.integrate_position(0.25);
        split.integrate_position(0.5);
        whole.integrate_position(0.75);

        assert!(close(split.pos.x, whole.pos.x));
        assert!(close(split.pos.y, whole.pos.y));
    }

    #[test]
    fn velocity_integration_uses_acceleration() {
        let mut b = body(0, 0.0, 0.0, 1.0);
        b.vel = Vec2::new(1.0, 1.0);
        b.acc = Vec2::new(2.0, -4.0);

        b.integrate_velocity(0.5);

        assert_eq!(b.vel, Vec2::new(2.0, -1.0));
    }

    #[test]
    fn collision_is_symmetric() {
        let pairs = [
            (body(0, 0.0, 0.0, 1.0), body(1, 1.5, 0.0, 1.0)),
            (body(0, 0.0, 0.0, 1.0), body(1, 5.0, 5.0, 2.0)),
            (body(0, -2.0, 3.0, 4.0), body(1, 1.0, -1.0, 0.5)),
        ];

        for (a, b) in &pairs {
            assert_eq!(a.collides_with(b), b.collides_with(a));
        }
    }

    #[test]
    fn tangent_circles_do_not_collide() {
        let a = body(0, 0.0, 0.0, 2.0);
        let b = body(1, 5.0, 0.0, 3.0);

        assert_eq!(a.distance_to(&b), 5.0);
        assert!(!a.collides_with(&b));

        let c = body(2, 4.999, 0.0, 3.0);
        assert!(a.collides_with(&c));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = body(0, 1.0, 1.0, 1.0);
        let b = body(1, 4.0, 5.0, 1.0);

        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn contains_point_is_a_box_test() {
        let b = body(0, 10.0, 10.0, 2.0);

        assert!(b.contains_point(10.0, 10.0));
        assert!(b.contains_point(11.9, 8.1));
        // Inside the square, outside the circle.
        assert!(b.contains_point(11.8, 11.8));
        assert!(!b.contains_point(12.0, 10.0));
        assert!(!b.contains_point(10.0, 7.5));
    }

    #[test]
    fn bodies_pull_each_other_in() {
        let a = body(0, 0.0, 0.0, 2.0);
        let b = body(1, 5.0, 0.0, 3.0);

        let on_a = b.effect_on(&a, 1.0);
        let on_b = a.effect_on(&b, 1.0);

        // gamma * r_a * r_b / d^2 scales the displacement, so |acc| = 6 / 5.
        assert!(close(on_a.x, 1.2));
        assert!(close(on_a.y, 0.0));
        assert!(close(on_b.x, -1.2));
        assert!(close(on_b.y, 0.0));
    }

    #[test]
    fn negative_gamma_repels() {
        let a = body(0, 0.0, 0.0, 1.0);
        let b = body(1, 0.0, 2.0, 1.0);

        assert!(b.effect_on(&a, -1.0).y < 0.0);
    }

    #[test]
    fn coincident_centers_are_not_finite() {
        let a = body(0, 3.0, 3.0, 1.0);
        let b = body(1, 3.0, 3.0, 1.0);

        let effect = b.effect_on(&a, 1.0);

        assert!(!effect.x.is_finite());
        assert!(!effect.y.is_finite());
    }
}

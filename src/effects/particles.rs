//! Particle field - drifting dots joined by fading links.
//!
//! Particles move at a constant velocity and wrap around the edges. Any two
//! particles closer than the link distance are joined by a line whose alpha
//! falls off linearly with distance.

use rand::Rng;

const BASE_LINK_ALPHA: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

/// A line between particles `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f64,
}

pub struct ParticleField {
    width: f64,
    height: f64,
    link_distance: f64,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Scatter `count` particles over a `width` x `height` area.
    ///
    /// Velocities lie within ±0.25 px per frame, radii within 1..3 px.
    pub fn new<R: Rng>(
        count: usize,
        width: f64,
        height: f64,
        link_distance: f64,
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x: rng.r#gen::<f64>() * width,
                y: rng.r#gen::<f64>() * height,
                vx: (rng.r#gen::<f64>() - 0.5) * 0.5,
                vy: (rng.r#gen::<f64>() - 0.5) * 0.5,
                radius: rng.r#gen::<f64>() * 2.0 + 1.0,
            })
            .collect();

        Self {
            width,
            height,
            link_distance,
            particles,
        }
    }

    /// Build a field from known particles (deterministic rendering, tests).
    pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64, link_distance: f64) -> Self {
        Self {
            width,
            height,
            link_distance,
            particles,
        }
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;

            if p.x < 0.0 {
                p.x = self.width;
            }
            if p.x > self.width {
                p.x = 0.0;
            }
            if p.y < 0.0 {
                p.y = self.height;
            }
            if p.y > self.height {
                p.y = 0.0;
            }
        }
    }

    /// New drawing area. Particles outside it wrap on the next step.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Every pair closer than the link distance.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, p1) in self.particles.iter().enumerate() {
            for (offset, p2) in self.particles[a + 1..].iter().enumerate() {
                let distance = (p1.x - p2.x).hypot(p1.y - p2.y);
                if distance < self.link_distance {
                    links.push(Link {
                        a,
                        b: a + 1 + offset,
                        alpha: BASE_LINK_ALPHA * (1.0 - distance / self.link_distance),
                    });
                }
            }
        }
        links
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            radius: 1.0,
        }
    }

    #[test]
    fn test_new_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::new(50, 800.0, 600.0, 100.0, &mut rng);

        assert_eq!(field.particles().len(), 50);
        for p in field.particles() {
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
            assert!(p.vx.abs() <= 0.25 && p.vy.abs() <= 0.25);
            assert!((1.0..3.0).contains(&p.radius));
        }
    }

    #[test]
    fn test_step_moves_and_wraps() {
        let mut field = ParticleField::from_particles(
            vec![
                particle(10.0, 10.0, 0.25, -0.25),
                particle(0.1, 50.0, -0.25, 0.0),
                particle(50.0, 99.9, 0.0, 0.25),
            ],
            100.0,
            100.0,
            100.0,
        );

        field.step();
        let p = field.particles();

        assert_eq!((p[0].x, p[0].y), (10.25, 9.75));
        assert_eq!(p[1].x, 100.0);
        assert_eq!(p[2].y, 0.0);
    }

    #[test]
    fn test_links_fade_with_distance() {
        let field = ParticleField::from_particles(
            vec![
                particle(0.0, 0.0, 0.0, 0.0),
                particle(30.0, 40.0, 0.0, 0.0), // distance 50
                particle(500.0, 500.0, 0.0, 0.0),
            ],
            1000.0,
            1000.0,
            100.0,
        );

        let links = field.links();

        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].alpha - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_resize() {
        let mut field = ParticleField::from_particles(
            vec![particle(700.0, 10.0, 0.0, 0.0)],
            800.0,
            600.0,
            100.0,
        );

        field.resize(400.0, 600.0);
        field.step();

        assert_eq!(field.size(), (400.0, 600.0));
        assert_eq!(field.particles()[0].x, 0.0);
    }
}

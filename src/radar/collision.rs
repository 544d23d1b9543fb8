//! Collision relaxation for blips.
//!
//! Every blip is a circular particle. Each tick applies pairwise repulsion to overlapping
//! particles, integrates damped velocities, and then projects every particle back into its own
//! segment. Projection always follows integration: clipping before the position update lets a
//! particle leave its wedge and never come back.
//!
//! The caller owns the schedule: call [`Simulation::tick`] from a frame loop, or
//! [`Simulation::run`] to relax synchronously until the particles settle or the cooling
//! schedule runs out.

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::random::Lcg;
use super::segment::Segment;

/// Tuning of the relaxation. Defaults follow the classic radar layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub collision_radius: f64,
    pub strength: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub max_ticks: usize,
    /// Particles slower than this are considered at rest.
    pub rest_speed: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let alpha_min: f64 = 0.001;
        Self {
            collision_radius: 12.0,
            strength: 0.85,
            velocity_decay: 0.19,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            max_ticks: 300,
            rest_speed: 1e-3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
}

impl Particle {
    fn speed(&self) -> f64 {
        self.velocity.x.hypot(self.velocity.y)
    }
}

/// How a synchronous relaxation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ticks: usize,
    pub settled: bool,
}

/// Relaxation state: one particle per blip plus the segment it is confined to.
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Vec<Particle>,
    segments: Vec<Segment>,
    params: SimulationParams,
    alpha: f64,
    ticks: usize,
    settled: bool,
    jiggle: Lcg,
}

impl Simulation {
    /// Start a relaxation from `(position, segment)` pairs, velocities at rest.
    pub fn new(
        bodies: impl IntoIterator<Item = (Point, Segment)>,
        params: SimulationParams,
    ) -> Self {
        let (particles, segments) = bodies
            .into_iter()
            .map(|(position, segment)| {
                (
                    Particle {
                        position,
                        velocity: Point::default(),
                    },
                    segment,
                )
            })
            .unzip();

        Self {
            particles,
            segments,
            params,
            alpha: 1.0,
            ticks: 0,
            settled: false,
            jiggle: Lcg::new(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn positions(&self) -> Vec<Point> {
        self.particles.iter().map(|p| p.position).collect()
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// True once the particles are at rest, the schedule has cooled, or the tick cap is hit.
    pub fn is_finished(&self) -> bool {
        self.settled || self.alpha < self.params.alpha_min || self.ticks >= self.params.max_ticks
    }

    /// Advance one step and return the clipped positions.
    pub fn tick(&mut self) -> Vec<Point> {
        self.alpha += -self.alpha * self.params.alpha_decay;

        self.apply_collisions();

        let retain = 1.0 - self.params.velocity_decay;
        for (particle, segment) in self.particles.iter_mut().zip(&self.segments) {
            particle.velocity.x *= retain;
            particle.velocity.y *= retain;
            particle.position.x += particle.velocity.x;
            particle.position.y += particle.velocity.y;
            segment.clip_in_place(&mut particle.position);
        }

        self.ticks += 1;
        let max_speed = self
            .particles
            .iter()
            .map(Particle::speed)
            .fold(0.0, f64::max);
        self.settled = max_speed < self.params.rest_speed;
        tracing::trace!(tick = self.ticks, alpha = self.alpha, max_speed, "collision tick");

        self.positions()
    }

    /// Tick until finished. Never fails: an unsettled run returns its last clipped state.
    pub fn run(&mut self) -> Outcome {
        while !self.is_finished() {
            self.tick();
        }
        if !self.settled {
            tracing::warn!(
                ticks = self.ticks,
                particles = self.particles.len(),
                "collision relaxation stopped before particles came to rest"
            );
        }
        Outcome {
            ticks: self.ticks,
            settled: self.settled,
        }
    }

    /// Push apart particles whose predicted positions overlap.
    fn apply_collisions(&mut self) {
        let radius = self.params.collision_radius;
        let reach = radius * 2.0;
        // Equal radii: the correction is split evenly between the two particles.
        let share = (radius * radius) / (radius * radius + radius * radius);

        let n = self.particles.len();
        for i in 0..n {
            let predicted = {
                let p = &self.particles[i];
                Point::new(p.position.x + p.velocity.x, p.position.y + p.velocity.y)
            };

            for j in (i + 1)..n {
                let other = self.particles[j];
                let mut dx = predicted.x - other.position.x - other.velocity.x;
                let mut dy = predicted.y - other.position.y - other.velocity.y;
                let mut len_sq = dx * dx + dy * dy;
                if len_sq >= reach * reach {
                    continue;
                }

                if dx == 0.0 {
                    dx = self.jiggle.jiggle();
                    len_sq += dx * dx;
                }
                if dy == 0.0 {
                    dy = self.jiggle.jiggle();
                    len_sq += dy * dy;
                }

                let len = len_sq.sqrt();
                let k = (reach - len) / len * self.params.strength;
                dx *= k;
                dy *= k;

                self.particles[i].velocity.x += dx * share;
                self.particles[i].velocity.y += dy * share;
                self.particles[j].velocity.x -= dx * (1.0 - share);
                self.particles[j].velocity.y -= dy * (1.0 - share);
            }
        }
    }
}

//! Deterministic pseudo-random sources used by a layout pass.
//!
//! Each pass owns its generators, so identical input and seed always give identical placement.

pub const DEFAULT_SEED: u64 = 101;

/// Sine-hash generator: `fract(sin(counter++) * 10000)`.
#[derive(Debug, Clone)]
pub struct SineRandom {
    counter: u64,
}

impl SineRandom {
    pub fn new(seed: u64) -> Self {
        Self { counter: seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let x = (self.counter as f64).sin() * 10000.0;
        self.counter = self.counter.wrapping_add(1);
        x - x.floor()
    }

    pub fn between(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Mean of two uniform draws scaled into `[min, max]`: triangular, peaked at the midpoint.
    pub fn normal_between(&mut self, min: f64, max: f64) -> f64 {
        min + (self.next_f64() + self.next_f64()) * 0.5 * (max - min)
    }
}

impl Default for SineRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Linear congruential generator used to nudge coincident particles apart.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub fn new() -> Self {
        Self { state: 1 }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f64 / Self::M as f64
    }

    /// Tiny non-zero offset, at most 5e-7 in magnitude.
    pub fn jiggle(&mut self) -> f64 {
        let j = (self.next_f64() - 0.5) * 1e-6;
        if j == 0.0 { 1e-7 } else { j }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}

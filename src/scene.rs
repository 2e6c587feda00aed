//! CPU-side demo state.
//!
//! The [`Scene`] owns everything a frame needs apart from the GPU: the
//! generator and its parameters, the random source, the current point set
//! and its animation. The renderer reads from it; the panel edits it.

use crate::animation::Animation;
use crate::error::ParamError;
use crate::generator::{Generator, PointGenerator};
use crate::point_set::PointSet;
use crate::random::PointRng;
use glam::Mat4;

/// Explicitly owned point-cloud state for one demo.
#[derive(Debug)]
pub struct Scene {
    generator: Generator,
    rng: PointRng,
    points: PointSet,
    animation: Animation,
    /// Bumped on every regeneration so the renderer can tell sets apart.
    generation: u64,
    elapsed: f32,
    /// Positions changed since the last [`take_dirty`](Self::take_dirty).
    dirty: bool,
}

impl Scene {
    /// Generate the first point set.
    pub fn new(generator: Generator, animation: Animation, mut rng: PointRng) -> Result<Self, ParamError> {
        let points = generator.generate(&mut rng)?;
        Ok(Self {
            generator,
            rng,
            points,
            animation,
            generation: 0,
            elapsed: 0.0,
            dirty: false,
        })
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Parameters for editing. Call [`regenerate`](Self::regenerate) to
    /// apply them.
    pub fn generator_mut(&mut self) -> &mut Generator {
        &mut self.generator
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn set_animation(&mut self, animation: Animation) {
        self.animation = animation;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the point set with a fresh one from the current parameters.
    ///
    /// A seeded source is rewound first, so identical parameters reproduce
    /// identical buffers. On error the previous set stays in place.
    pub fn regenerate(&mut self) -> Result<&PointSet, ParamError> {
        self.generator.validate()?;
        if self.rng.seed().is_some() {
            self.rng.reset();
        }
        let mut fresh = self.generator.generate(&mut self.rng)?;
        // Start a new wave set from the current time so it doesn't jump.
        self.animation.apply(&mut fresh, self.elapsed);
        self.points = fresh;
        self.generation += 1;
        self.dirty = false;
        tracing::info!(
            variant = self.generator.name(),
            points = self.points.len(),
            generation = self.generation,
            "regenerated point set"
        );
        Ok(&self.points)
    }

    /// Advance animation to `elapsed` seconds.
    pub fn tick(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
        if self.animation.apply(&mut self.points, elapsed) {
            self.dirty = true;
        }
    }

    /// Whether positions changed since the last call, resetting the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Model matrix at the last tick.
    pub fn model_matrix(&self) -> Mat4 {
        self.animation.model_matrix(self.elapsed)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

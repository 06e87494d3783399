//! RNG module - seeded spawn source
//!
//! New pieces get a shape and a color drawn independently and uniformly from
//! the seven kinds and the seven color ids. The randomness comes from a small
//! LCG so a seed fully determines the piece sequence.
//!
//! A scripted queue that cycles through a fixed list is also available, for
//! tests and benchmarks that need exact pieces.

use anyhow::{ensure, Result};

use crate::types::{ColorId, ShapeKind, COLOR_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG are weak; use the high half.
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(SimpleRng),
    Scripted {
        items: Vec<(ShapeKind, ColorId)>,
        index: usize,
    },
}

/// Where new pieces come from
#[derive(Debug, Clone)]
pub struct PieceQueue {
    source: Source,
}

impl PieceQueue {
    /// Uniformly random shapes and colors from `seed`
    pub fn random(seed: u32) -> Self {
        Self {
            source: Source::Random(SimpleRng::new(seed)),
        }
    }

    /// Cycle through `items` forever, in order
    pub fn scripted(items: impl IntoIterator<Item = (ShapeKind, ColorId)>) -> Result<Self> {
        let items: Vec<_> = items.into_iter().collect();
        ensure!(!items.is_empty(), "scripted piece queue needs at least one piece");
        Ok(Self {
            source: Source::Scripted { items, index: 0 },
        })
    }

    /// Draw the next shape kind and color
    pub fn draw(&mut self) -> (ShapeKind, ColorId) {
        match &mut self.source {
            Source::Random(rng) => {
                let kind = ShapeKind::ALL[rng.next_range(ShapeKind::ALL.len() as u32) as usize];
                let color = ColorId::wrapping(rng.next_range(COLOR_COUNT as u32) as u8);
                (kind, color)
            }
            Source::Scripted { items, index } => {
                let item = items[*index % items.len()];
                *index = (*index + 1) % items.len();
                item
            }
        }
    }

    /// Current RNG state, if the queue is random
    pub fn seed(&self) -> Option<u32> {
        match &self.source {
            Source::Random(rng) => Some(rng.state()),
            Source::Scripted { .. } => None,
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::random(1)
    }
}

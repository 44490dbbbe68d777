//! RNG module - the engine's source of randomness
//!
//! The engine only ever asks for one byte at a time and reduces it modulo a
//! small bound (at most 10), in this order per spawn: shape, column,
//! rotation count. Anything implementing [`RandomSource`] can drive it,
//! including a plain closure, which keeps tests fully scripted.
//!
//! [`SimpleRng`] is the default source: a seeded LCG, so the same seed
//! always replays the same game.

/// Supplier of uniformly distributed bytes
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

impl<F> RandomSource for F
where
    F: FnMut() -> u8,
{
    fn next_byte(&mut self) -> u8 {
        self()
    }
}

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
}

impl RandomSource for SimpleRng {
    fn next_byte(&mut self) -> u8 {
        // Low LCG bits have short periods; take the top byte.
        (self.next_u32() >> 24) as u8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

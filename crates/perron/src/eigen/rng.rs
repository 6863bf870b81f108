/// Small deterministic generator for inverse-iteration start vectors.
#[derive(Debug, Clone)]
pub(super) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(super) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Maps to `[-1, 1)` with 53 bits of precision.
    pub(super) fn next_f64_signed(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        let v = (u as f64) / ((1u64 << 53) as f64);
        (v * 2.0) - 1.0
    }
}

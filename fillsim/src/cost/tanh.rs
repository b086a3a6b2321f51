use crate::helpe::*;

/// `(C - A) / M + K / tanh(A * F / M)`
///
/// Unlike the logarithmic models, the amount already written plays no
/// part: only how much of the capacity is gone and how much is left.
/// The second term blows up as `A` approaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tanh {
    pub k:  f64,
    pub m:  f64,
    pub f:  f64,
}

impl CostFunction for Tanh {
    #[inline(always)]
    fn score(&self, _written: Amount, capacity: Amount, available: Amount) -> f64 {
        debug_assert!(available > 0.0, "Cost asked for a saturated store");

        (capacity - available) / self.m + self.k / (available * self.f / self.m).tanh()
    }

    fn name(&self) -> &'static str {
        "tanh"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Tanh = Tanh { k: DEFAULT_K, m: DEFAULT_M, f: DEFAULT_F };

    #[test]
    fn ignores_written_amount() {
        assert_eq!(T.score(0.0, 500.0, 300.0), T.score(123.0, 500.0, 300.0));
    }

    #[test]
    fn empty_store_costs_about_k() {
        // tanh(500 * 4 / 256) is within 1e-6 of 1.
        assert!((T.score(0.0, 500.0, 500.0) - DEFAULT_K).abs() < 1e-6);
    }

    #[test]
    fn cost_explodes_near_exhaustion() {
        let roomy = T.score(0.0, 500.0, 250.0);
        let tight = T.score(0.0, 500.0, 0.01);
        assert!(tight > 100.0 * roomy);
        assert!(tight.is_finite());
    }
}

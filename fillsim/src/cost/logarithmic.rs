use crate::helpe::*;

/// Logarithmic cost: the emptier the store, the cheaper it is to
/// write to, and an untouched store costs exactly what has been
/// written to it (nothing, at first).
///
/// `R * (K + M * (ln C - ln A) / (C - A))` for `A < C`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainLog {
    pub k:  f64,
    pub m:  f64,
}

impl CostFunction for PlainLog {
    #[inline(always)]
    fn score(&self, written: Amount, capacity: Amount, available: Amount) -> f64 {
        debug_assert!(available > 0.0, "Cost asked for a saturated store");
        if available >= capacity {
            return written;
        }

        written * (self.k + self.m * (capacity.ln() - available.ln()) / (capacity - available))
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Logarithmic cost with a floor. While the store has more than `F`
/// units of room, cost grows logarithmically as room shrinks. Below
/// `F`, a penalty proportional to the depth into the floor region
/// is added on top of a linear baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlooredLog {
    pub k:  f64,
    pub m:  f64,
    pub f:  f64,
}

impl FlooredLog {
    /// `R * (K + M * (ln C - ln(A - F + 1)) / (C - A + F - 1))`
    #[inline(always)]
    fn headroom(&self, r: Amount, c: Amount, a: Amount) -> f64 {
        r * (self.k + self.m * (c.ln() - (a - self.f + 1.0).ln()) / (c - a + self.f - 1.0))
    }

    /// `R * (K + M ln C / C) + (F - A) * (K + M ln F / F)`
    #[inline(always)]
    fn exhaustion(&self, r: Amount, c: Amount, a: Amount) -> f64 {
        let (k, m, f) = (self.k, self.m, self.f);

        r * (k + m * c.ln() / c) + (f - a) * (k + m * f.ln() / f)
    }
}

impl CostFunction for FlooredLog {
    #[inline(always)]
    fn score(&self, written: Amount, capacity: Amount, available: Amount) -> f64 {
        debug_assert!(available > 0.0, "Cost asked for a saturated store");
        if available >= capacity {
            return written;
        }
        // Both the log argument and the denominator of the headroom
        // branch must stay positive; anything else falls to the floor.
        if available > self.f
            && available - self.f + 1.0 > 0.0
            && capacity - available + self.f - 1.0 > 0.0 {
            self.headroom(written, capacity, available)
        } else {
            self.exhaustion(written, capacity, available)
        }
    }

    fn name(&self) -> &'static str {
        "floored-log"
    }
}

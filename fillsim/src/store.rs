use crate::helpe::*;

impl Store {
    /// Creates an untouched [Store]. Values are taken at face
    /// value; [`SimConfig::validate`] is where they get checked.
    pub fn new(
        capacity:       Amount,
        amplification:  Amount,
        dead_space:     Amount,
    ) -> Self {
        Self {
            capacity,
            amplification,
            dead_space,
            written: 0.0,
        }
    }

    /// Space actually used up: amplified writes plus dead space.
    #[inline(always)]
    pub fn consumed(&self) -> Amount {
        self.written * self.amplification + self.dead_space
    }

    /// Remaining room. Goes negative once the last increment
    /// overshoots the capacity.
    #[inline(always)]
    pub fn available(&self) -> Amount {
        self.capacity - self.dead_space - self.written * self.amplification
    }

    #[inline(always)]
    pub fn fill_ratio(&self) -> f64 {
        self.consumed() / self.capacity
    }

    /// Returns `true` if the store may still receive writes.
    #[inline(always)]
    pub fn is_eligible(&self) -> bool {
        self.available() > 0.0
    }

    /// The store's name in reports and chart legends.
    pub fn label(&self) -> String {
        format!("s{:.0}", self.capacity)
    }

    /// Hands `increment` more raw units to the store.
    #[inline(always)]
    pub fn advance(&mut self, increment: Amount) {
        debug_assert!(increment > 0.0, "Stores never shrink");
        self.written += increment;
    }

    /// Captures the store's current state. `score` must be `None` for
    /// ineligible stores.
    pub fn observe(&self, score: Option<f64>) -> Observation {
        let available = self.available();
        Observation {
            written:    self.written,
            available:  if available > 0.0 { Some(available) } else { None },
            fill_ratio: self.fill_ratio(),
            score,
        }
    }
}

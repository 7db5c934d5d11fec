//! Frame debt: wall-clock time handed in by the host, paid out as whole ticks.

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    debt_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debt_ms(&self) -> f64 {
        self.debt_ms
    }

    pub fn reset(&mut self) {
        self.debt_ms = 0.0;
    }

    /// Add `elapsed_ms` of debt and return how many ticks to run now, at most
    /// `max_ticks`. Debt beyond the cap is dropped.
    pub fn advance(&mut self, elapsed_ms: f64, ticks_per_second: f64, max_ticks: u32) -> u32 {
        if !(elapsed_ms > 0.0) || !(ticks_per_second > 0.0) {
            return 0;
        }
        let tick_ms = 1000.0 / ticks_per_second;
        self.debt_ms += elapsed_ms;

        let owed = (self.debt_ms / tick_ms).floor();
        if owed > max_ticks as f64 {
            log::debug!(
                "frame clock dropping {:.1}ms of debt ({} ticks owed, cap {})",
                self.debt_ms - max_ticks as f64 * tick_ms,
                owed,
                max_ticks
            );
            self.debt_ms = 0.0;
            return max_ticks;
        }
        self.debt_ms -= owed * tick_ms;
        owed as u32
    }
}

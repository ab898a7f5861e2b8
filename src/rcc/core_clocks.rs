//! Structure to represent the cached core clock frequencies

use crate::time::Hertz;

/// Cached core clock frequencies
///
/// These are recorded values, never recomputed from hardware state. The
/// clock setup sequencer is the single writer; a caller driving the
/// low-level divider setters directly is responsible for keeping them
/// consistent.
#[derive(Clone, Copy)]
pub struct CoreClocks {
    pub(super) sysclk: Hertz,
    pub(super) hclk: Hertz,
    pub(super) pclk: Hertz,
}

impl Default for CoreClocks {
    /// Post-reset state: HSI at 8 MHz without multiplication, undivided
    /// buses.
    fn default() -> Self {
        CoreClocks {
            sysclk: Hertz::MHz(8),
            hclk: Hertz::MHz(8),
            pclk: Hertz::MHz(8),
        }
    }
}

impl CoreClocks {
    /// Returns the core (SYSCLK) frequency
    pub fn sysclk(&self) -> Hertz {
        self.sysclk
    }

    /// Returns the AHB bus (HCLK) frequency
    pub fn hclk(&self) -> Hertz {
        self.hclk
    }

    /// Returns the APB peripheral bus frequency
    pub fn pclk(&self) -> Hertz {
        self.pclk
    }
}

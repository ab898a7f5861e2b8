//! Flash access latency
//!
//! Only the wait-state code is managed here. The clock setup sequencer in
//! [`crate::rcc`] selects the band matching its target SYSCLK and applies
//! it *before* raising the frequency, since flash read timing must hold
//! even transiently.

use crate::reg::{RegisterBus, ACR_LATENCY_MASK, FLASH_ACR};

/// Flash wait-state codes (RM0091 Section 3.5.1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Latency {
    /// Zero wait states, SYSCLK at or below 24 MHz
    Ws0 = 0,
    /// One wait state, SYSCLK above 24 MHz up to 48 MHz
    Ws1 = 1,
}

impl Latency {
    /// Latency band required for a SYSCLK frequency in Hz.
    pub const fn for_sysclk(hz: u32) -> Latency {
        if hz <= 24_000_000 {
            Latency::Ws0
        } else {
            Latency::Ws1
        }
    }
}

/// Apply a wait-state code, then confirm the read path picked it up.
pub fn set_ws<B: RegisterBus>(bus: &B, latency: Latency) {
    bus.write_field(FLASH_ACR, ACR_LATENCY_MASK, latency as u32);
    while bus.read(FLASH_ACR) & ACR_LATENCY_MASK != latency as u32 {}
}

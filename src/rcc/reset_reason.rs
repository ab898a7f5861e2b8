//! Reason for the most recent MCU reset, decoded from the RCC_CSR flags.

use crate::reg::{
    RegisterBus, CSR_IWDGRSTF, CSR_LPWRRSTF, CSR_OBLRSTF, CSR_PINRSTF,
    CSR_PORRSTF, CSR_RMVF, CSR_SFTRSTF, CSR_V18PWRRSTF, CSR_WWDGRSTF,
    RCC_CSR,
};

/// Cause of the last system reset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetReason {
    /// Exit from a low-power management mode configured to reset
    LowPowerManagement,
    /// Window watchdog expiry
    WindowWatchdog,
    /// Independent watchdog expiry
    IndependentWatchdog,
    /// Software-requested reset (SYSRESETREQ)
    Software,
    /// Power-on / power-down reset
    PowerOn,
    /// Option byte loader reset
    OptionByteLoader,
    /// 1.8 V domain power reset
    V18PowerDomain,
    /// External reset through the NRST pin
    Pin,
    /// No flag was set; the raw RCC_CSR value is preserved for inspection
    Unknown {
        /// Undecoded register contents
        csr: u32,
    },
}

pub(super) fn get_reset_reason<B: RegisterBus>(bus: &B) -> ResetReason {
    let csr = bus.read(RCC_CSR);
    bus.set_bits(RCC_CSR, CSR_RMVF);

    // More specific causes first: most of them also latch the pin flag.
    if csr & CSR_LPWRRSTF != 0 {
        ResetReason::LowPowerManagement
    } else if csr & CSR_WWDGRSTF != 0 {
        ResetReason::WindowWatchdog
    } else if csr & CSR_IWDGRSTF != 0 {
        ResetReason::IndependentWatchdog
    } else if csr & CSR_SFTRSTF != 0 {
        ResetReason::Software
    } else if csr & CSR_PORRSTF != 0 {
        ResetReason::PowerOn
    } else if csr & CSR_OBLRSTF != 0 {
        ResetReason::OptionByteLoader
    } else if csr & CSR_V18PWRRSTF != 0 {
        ResetReason::V18PowerDomain
    } else if csr & CSR_PINRSTF != 0 {
        ResetReason::Pin
    } else {
        ResetReason::Unknown { csr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::sim::SimBus;

    #[test]
    fn watchdog_outranks_pin_flag() {
        let bus = SimBus::new();
        bus.set_bits(RCC_CSR, CSR_IWDGRSTF | CSR_PINRSTF);
        assert_eq!(
            get_reset_reason(&bus),
            ResetReason::IndependentWatchdog
        );
    }

    #[test]
    fn flags_are_cleared_after_reading() {
        let bus = SimBus::new();
        bus.set_bits(RCC_CSR, CSR_PORRSTF | CSR_PINRSTF);
        assert_eq!(get_reset_reason(&bus), ResetReason::PowerOn);
        assert_eq!(get_reset_reason(&bus), ResetReason::Unknown { csr: 0 });
    }
}

//! Reset and Clock Control
//!
//! This module drives the RCC unit of the STM32F0: oscillator lifecycle,
//! system clock source switching, prescaler/multiplier configuration, the
//! composite clock setup procedures, and peripheral clock/reset gating.
//!
//! See Figure 11 "Clock tree" in Reference Manual RM0091.
//!
//! HSI is 8 MHz. HSI14 is 14 MHz. HSI48 is 48 MHz.
//!
//! # Usage
//!
//! [`Rcc`] owns a [`RegisterBus`] and the cached [`CoreClocks`]. The named
//! setup procedures perform the full validated sequence from reset
//! defaults to a target frequency:
//!
//! ```rust,ignore
//! let mut rcc = Rcc::new(Mmio);
//! rcc.clock_setup_in_hsi(SysClkTarget::Mhz48);
//!
//! // Runtime confirmation that SYSCLK really is 48 MHz
//! assert_eq!(rcc.clocks().sysclk().raw(), 48_000_000);
//!
//! // Enable the clock to a peripheral and reset it
//! rcc.periph_clock_enable(PeriphClock::Spi1);
//! rcc.periph_reset_pulse(PeriphReset::Spi1);
//! ```
//!
//! The low-level setters are also public so callers can compose their own
//! configurations (an HSE-sourced PLL, divided buses). Anyone doing so
//! owns the sequencing constraints the setup procedures otherwise
//! guarantee: an oscillator must be ready before it is selected as system
//! clock source, the PLL multiplier only changes while the PLL is
//! disabled, and the flash latency band must be raised before the
//! frequency is.
//!
//! # Hangs
//!
//! [`Rcc::wait_for_osc_ready`] polls with no timeout. A missing or failed
//! crystal hangs there rather than letting setup continue on an unstable
//! clock; enable the CSS if a runtime response to HSE failure is needed.
#![deny(missing_docs)]

mod core_clocks;
mod osc;
pub mod rec;
mod reset_reason;

pub use core_clocks::CoreClocks;
pub use osc::Oscillator;
pub use rec::{PeriphClock, PeriphReset};
pub use reset_reason::ResetReason;

use crate::flash::{self, Latency};
use crate::reg::{
    RegisterBus, CFGR2_PREDIV_MASK, CFGR_HPRE_MASK, CFGR_MCO_MASK,
    CFGR_PLLMUL_MASK, CFGR_PLLMUL_SHIFT, CFGR_PLLSRC, CFGR_PPRE_MASK,
    CFGR_SWS_MASK, CFGR_SWS_SHIFT, CFGR_SW_MASK, CIR_CLR_SHIFT, CIR_CSSC,
    CIR_CSSF, CIR_IE_SHIFT, CR_CSSON, RCC_CFGR, RCC_CFGR2, RCC_CIR, RCC_CR,
};
use crate::time::Hertz;

#[cfg(feature = "log")]
use log::debug;

/// Constrained RCC peripheral
///
/// Owns the register bus and the cached bus frequencies. There must be at
/// most one instance per register file; clock setup is expected to run
/// once, before interrupts are enabled.
pub struct Rcc<B> {
    pub(crate) bus: B,
    clocks: CoreClocks,
}

impl<B: RegisterBus> Rcc<B> {
    /// Takes ownership of the register bus. The cached frequencies start
    /// at the 8 MHz post-reset defaults.
    pub fn new(bus: B) -> Self {
        Rcc {
            bus,
            clocks: CoreClocks::default(),
        }
    }

    /// Returns the cached core clock frequencies.
    pub fn clocks(&self) -> &CoreClocks {
        &self.clocks
    }

    /// Gets and clears the reason of why the mcu was reset
    pub fn get_reset_reason(&mut self) -> ResetReason {
        reset_reason::get_reset_reason(&self.bus)
    }
}

/// Oscillator control
impl<B: RegisterBus> Rcc<B> {
    /// Turn on an oscillator.
    ///
    /// Enables the oscillator and powers it on. Each oscillator requires
    /// an amount of time to settle to a usable state; poll
    /// [`is_osc_ready`](Self::is_osc_ready) or block on
    /// [`wait_for_osc_ready`](Self::wait_for_osc_ready) before using it.
    pub fn osc_on(&mut self, osc: Oscillator) {
        let d = osc.descriptor();
        self.bus.set_bits(d.enable.addr, d.enable.mask);
    }

    /// Turn off an oscillator.
    ///
    /// The PLL cannot be disabled through this control; switching the
    /// system clock away from it is the supported path, so `Pll` is a
    /// no-op here.
    ///
    /// An oscillator must not be turned off while it is selected as the
    /// system clock source; the hardware gives no protection against
    /// removing the running core clock.
    pub fn osc_off(&mut self, osc: Oscillator) {
        if osc == Oscillator::Pll {
            return;
        }
        let d = osc.descriptor();
        self.bus.clear_bits(d.enable.addr, d.enable.mask);
    }

    /// Route an externally supplied clock signal past the on-chip
    /// oscillator circuit. Only HSE and LSE support bypass; for every
    /// other identity this performs no hardware mutation.
    pub fn osc_bypass_enable(&mut self, osc: Oscillator) {
        if let Some(byp) = osc.descriptor().bypass {
            self.bus.set_bits(byp.addr, byp.mask);
        }
    }

    /// Re-enable the on-chip oscillator circuit. Only HSE and LSE support
    /// bypass; no-op for every other identity.
    pub fn osc_bypass_disable(&mut self, osc: Oscillator) {
        if let Some(byp) = osc.descriptor().bypass {
            self.bus.clear_bits(byp.addr, byp.mask);
        }
    }

    /// Whether the oscillator has reached a stable, usable state.
    pub fn is_osc_ready(&self, osc: Oscillator) -> bool {
        let d = osc.descriptor();
        self.bus.bits_set(d.ready.addr, d.ready.mask)
    }

    /// Busy-poll the ready flag until the oscillator is stable.
    ///
    /// There is no timeout: if the oscillator never starts (missing
    /// crystal, broken board) this hangs, which is the intended fail-stop
    /// behavior for a clock the system depends on.
    pub fn wait_for_osc_ready(&self, osc: Oscillator) {
        while !self.is_osc_ready(osc) {}
    }

    /// Raise an interrupt when the oscillator becomes ready.
    pub fn osc_ready_int_enable(&mut self, osc: Oscillator) {
        let bit = osc.descriptor().cir_bit;
        self.bus.set_bits(RCC_CIR, 1 << (bit + CIR_IE_SHIFT));
    }

    /// Stop the ready transition from raising an interrupt.
    pub fn osc_ready_int_disable(&mut self, osc: Oscillator) {
        let bit = osc.descriptor().cir_bit;
        self.bus.clear_bits(RCC_CIR, 1 << (bit + CIR_IE_SHIFT));
    }

    /// Clear the latched oscillator-ready interrupt flag.
    pub fn osc_ready_int_clear(&mut self, osc: Oscillator) {
        let bit = osc.descriptor().cir_bit;
        self.bus.set_bits(RCC_CIR, 1 << (bit + CIR_CLR_SHIFT));
    }

    /// Whether the oscillator-ready interrupt flag is set.
    pub fn osc_ready_int_flag(&self, osc: Oscillator) -> bool {
        let bit = osc.descriptor().cir_bit;
        self.bus.bits_set(RCC_CIR, 1 << bit)
    }

    /// Enable the clock security system, which monitors the HSE for
    /// failure and falls back to the HSI.
    pub fn css_enable(&mut self) {
        self.bus.set_bits(RCC_CR, CR_CSSON);
    }

    /// Disable the clock security system.
    pub fn css_disable(&mut self) {
        self.bus.clear_bits(RCC_CR, CR_CSSON);
    }

    /// Clear the clock security system interrupt flag.
    pub fn css_int_clear(&mut self) {
        self.bus.set_bits(RCC_CIR, CIR_CSSC);
    }

    /// Whether the clock security system interrupt flag is set.
    pub fn css_int_flag(&self) -> bool {
        self.bus.bits_set(RCC_CIR, CIR_CSSF)
    }
}

fn decode_sysclk_source(sws: u32) -> Oscillator {
    match sws {
        0b00 => Oscillator::Hsi,
        0b01 => Oscillator::Hse,
        0b10 => Oscillator::Pll,
        0b11 => Oscillator::Hsi48,
        _ => unreachable!(),
    }
}

/// Clock source and divider configuration
impl<B: RegisterBus> Rcc<B> {
    /// Request an oscillator as the system clock source.
    ///
    /// Only HSI, HSE, PLL and HSI48 can drive the system clock; for the
    /// remaining identities this performs no hardware mutation. The
    /// oscillator must already be ready — the hardware does not check,
    /// and neither does this setter.
    pub fn set_sysclk_source(&mut self, osc: Oscillator) {
        if let Some(code) = osc.descriptor().sysclk_code {
            self.bus.write_field(RCC_CFGR, CFGR_SW_MASK, code);
        }
    }

    /// The currently effective system clock source, decoded from the
    /// switch status field. May lag the requested source until the
    /// hardware confirms the switch.
    pub fn sysclk_source(&self) -> Oscillator {
        let sws =
            (self.bus.read(RCC_CFGR) & CFGR_SWS_MASK) >> CFGR_SWS_SHIFT;
        decode_sysclk_source(sws)
    }

    /// Set the PLL multiplication factor.
    ///
    /// Only has effect while the PLL is disabled.
    pub fn set_pll_multiplication_factor(&mut self, mul: PllMul) {
        self.bus.write_field(RCC_CFGR, CFGR_PLLMUL_MASK, mul.bits());
    }

    /// Set the AHB prescale factor.
    pub fn set_hpre(&mut self, hpre: HPre) {
        self.bus.write_field(RCC_CFGR, CFGR_HPRE_MASK, hpre.bits());
    }

    /// Set the APB prescale factor.
    ///
    /// The APB clock frequency must not exceed the AHB frequency limits
    /// of the device.
    pub fn set_ppre(&mut self, ppre: PPre) {
        self.bus.write_field(RCC_CFGR, CFGR_PPRE_MASK, ppre.bits());
    }

    /// Set the PLL input predivider applied to the HSE (and, on parts
    /// that support it, the HSI) before the PLL.
    pub fn set_prediv(&mut self, prediv: PreDiv) {
        self.bus
            .write_field(RCC_CFGR2, CFGR2_PREDIV_MASK, prediv.bits());
    }

    /// Select the clock driven out on the MCO pin.
    pub fn set_mco(&mut self, src: McoSource) {
        self.bus.write_field(RCC_CFGR, CFGR_MCO_MASK, src.bits());
    }
}

/// PLL multiplication factors (RCC_CFGR PLLMUL)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum PllMul {
    Mul2,
    Mul3,
    Mul4,
    Mul5,
    Mul6,
    Mul7,
    Mul8,
    Mul9,
    Mul10,
    Mul11,
    Mul12,
    Mul13,
    Mul14,
    Mul15,
    Mul16,
}

impl PllMul {
    const fn bits(self) -> u32 {
        (self as u32) << CFGR_PLLMUL_SHIFT
    }
}

/// AHB prescale factors (RCC_CFGR HPRE)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum HPre {
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div64,
    Div128,
    Div256,
    Div512,
}

impl HPre {
    const fn bits(self) -> u32 {
        let code: u32 = match self {
            HPre::Div1 => 0b0000,
            HPre::Div2 => 0b1000,
            HPre::Div4 => 0b1001,
            HPre::Div8 => 0b1010,
            HPre::Div16 => 0b1011,
            HPre::Div64 => 0b1100,
            HPre::Div128 => 0b1101,
            HPre::Div256 => 0b1110,
            HPre::Div512 => 0b1111,
        };
        code << 4
    }
}

/// APB prescale factors (RCC_CFGR PPRE)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum PPre {
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
}

impl PPre {
    const fn bits(self) -> u32 {
        let code: u32 = match self {
            PPre::Div1 => 0b000,
            PPre::Div2 => 0b100,
            PPre::Div4 => 0b101,
            PPre::Div8 => 0b110,
            PPre::Div16 => 0b111,
        };
        code << 8
    }
}

/// PLL input predivision factors (RCC_CFGR2 PREDIV)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum PreDiv {
    Div1,
    Div2,
    Div3,
    Div4,
    Div5,
    Div6,
    Div7,
    Div8,
    Div9,
    Div10,
    Div11,
    Div12,
    Div13,
    Div14,
    Div15,
    Div16,
}

impl PreDiv {
    const fn bits(self) -> u32 {
        self as u32
    }
}

/// Clock selections for the MCO output pin (RCC_CFGR MCO)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum McoSource {
    NoClock,
    Hsi14,
    Lsi,
    Lse,
    Sysclk,
    Hsi,
    Hse,
    PllDiv2,
}

impl McoSource {
    const fn bits(self) -> u32 {
        (self as u32) << 24
    }
}

/// Fixed menu of HSI-sourced system clock configurations.
///
/// Each target is a fixed point: the PLL multiplier, resulting frequency
/// and flash latency band are paired and validated together. The PLL
/// targets run from HSI/2, so the multiplier is `target / 4 MHz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SysClkTarget {
    /// 8 MHz, HSI directly, no PLL
    Mhz8,
    /// 16 MHz, HSI/2 x4
    Mhz16,
    /// 24 MHz, HSI/2 x6
    Mhz24,
    /// 32 MHz, HSI/2 x8
    Mhz32,
    /// 40 MHz, HSI/2 x10
    Mhz40,
    /// 48 MHz, HSI/2 x12
    Mhz48,
}

impl SysClkTarget {
    const fn plan(self) -> (u32, Option<PllMul>) {
        match self {
            SysClkTarget::Mhz8 => (8_000_000, None),
            SysClkTarget::Mhz16 => (16_000_000, Some(PllMul::Mul4)),
            SysClkTarget::Mhz24 => (24_000_000, Some(PllMul::Mul6)),
            SysClkTarget::Mhz32 => (32_000_000, Some(PllMul::Mul8)),
            SysClkTarget::Mhz40 => (40_000_000, Some(PllMul::Mul10)),
            SysClkTarget::Mhz48 => (48_000_000, Some(PllMul::Mul12)),
        }
    }
}

/// Clock setup sequencer
impl<B: RegisterBus> Rcc<B> {
    /// Bring the system clock to `target`, sourced from the 8 MHz HSI.
    ///
    /// The sequence encodes the hardware ordering constraints:
    ///
    /// 1. HSI on, wait ready, select as system clock — a known-good
    ///    baseline before any PLL manipulation.
    /// 2. AHB and APB prescalers to no division.
    /// 3. Flash latency for the *target* band, before the frequency
    ///    rises above the current safe-read range.
    /// 4. For PLL targets: multiplier while the PLL is off its old
    ///    source, HSI/2 as PLL input, PLL on, wait ready, select PLL.
    /// 5. Record the resulting frequencies in [`CoreClocks`].
    pub fn clock_setup_in_hsi(&mut self, target: SysClkTarget) {
        let (sysclk, mul) = target.plan();

        self.osc_on(Oscillator::Hsi);
        self.wait_for_osc_ready(Oscillator::Hsi);
        self.set_sysclk_source(Oscillator::Hsi);

        self.set_hpre(HPre::Div1);
        self.set_ppre(PPre::Div1);

        flash::set_ws(&self.bus, Latency::for_sysclk(sysclk));

        if let Some(mul) = mul {
            self.set_pll_multiplication_factor(mul);

            // HSI/2 feeds the PLL
            self.bus.clear_bits(RCC_CFGR, CFGR_PLLSRC);

            self.osc_on(Oscillator::Pll);
            self.wait_for_osc_ready(Oscillator::Pll);
            self.set_sysclk_source(Oscillator::Pll);
        }

        // HPRE and PPRE are both at no division, so the bus clocks
        // match SYSCLK.
        let hz = Hertz::from_raw(sysclk);
        self.clocks = CoreClocks {
            sysclk: hz,
            hclk: hz,
            pclk: hz,
        };

        #[cfg(feature = "log")]
        debug!(
            "sysclk {} Hz from {:?}: CFGR={:#010x}",
            sysclk,
            self.sysclk_source(),
            self.bus.read(RCC_CFGR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::sim::SimBus;
    use crate::reg::{ACR_LATENCY_MASK, FLASH_ACR};

    const ALL: [Oscillator; 7] = [
        Oscillator::Hsi,
        Oscillator::Hsi14,
        Oscillator::Hsi48,
        Oscillator::Hse,
        Oscillator::Lsi,
        Oscillator::Lse,
        Oscillator::Pll,
    ];

    fn rcc() -> Rcc<SimBus> {
        Rcc::new(SimBus::new())
    }

    #[test]
    fn osc_on_reaches_ready() {
        for osc in ALL {
            let mut rcc = rcc();
            rcc.osc_on(osc);
            assert!(rcc.is_osc_ready(osc), "{osc:?} did not become ready");
            // Must return immediately now that the flag is up
            rcc.wait_for_osc_ready(osc);
        }
    }

    #[test]
    fn osc_off_clears_enable() {
        for osc in ALL {
            if osc == Oscillator::Pll {
                continue;
            }
            let mut rcc = rcc();
            rcc.osc_on(osc);
            rcc.osc_off(osc);
            assert!(!rcc.is_osc_ready(osc), "{osc:?} still ready after off");
        }
    }

    #[test]
    fn pll_off_is_a_no_op() {
        let mut rcc = rcc();
        rcc.osc_on(Oscillator::Pll);
        let before = rcc.bus.dump();
        rcc.osc_off(Oscillator::Pll);
        assert_eq!(rcc.bus.dump(), before);
        assert!(rcc.is_osc_ready(Oscillator::Pll));
    }

    #[test]
    fn bypass_is_inert_without_support() {
        for osc in ALL {
            if osc == Oscillator::Hse || osc == Oscillator::Lse {
                continue;
            }
            let mut rcc = rcc();
            let before = rcc.bus.dump();
            rcc.osc_bypass_enable(osc);
            assert_eq!(rcc.bus.dump(), before, "{osc:?} bypass mutated state");
            rcc.osc_bypass_disable(osc);
            assert_eq!(rcc.bus.dump(), before, "{osc:?} bypass mutated state");
        }
    }

    #[test]
    fn external_oscillators_support_bypass() {
        use crate::reg::{BDCR_LSEBYP, CR_HSEBYP, RCC_BDCR, RCC_CR};

        let mut rcc = rcc();
        rcc.osc_bypass_enable(Oscillator::Hse);
        assert!(rcc.bus.bits_set(RCC_CR, CR_HSEBYP));
        rcc.osc_bypass_disable(Oscillator::Hse);
        assert!(!rcc.bus.bits_set(RCC_CR, CR_HSEBYP));

        rcc.osc_bypass_enable(Oscillator::Lse);
        assert!(rcc.bus.bits_set(RCC_BDCR, BDCR_LSEBYP));
        rcc.osc_bypass_disable(Oscillator::Lse);
        assert!(!rcc.bus.bits_set(RCC_BDCR, BDCR_LSEBYP));
    }

    #[test]
    fn ready_interrupt_bits_round_trip() {
        for osc in ALL {
            let mut rcc = rcc();
            rcc.osc_ready_int_enable(osc);
            let bit = osc.descriptor().cir_bit;
            assert!(rcc.bus.bits_set(RCC_CIR, 1 << (bit + CIR_IE_SHIFT)));
            rcc.osc_ready_int_disable(osc);
            assert!(!rcc.bus.bits_set(RCC_CIR, 1 << (bit + CIR_IE_SHIFT)));
            assert!(!rcc.osc_ready_int_flag(osc));
        }
    }

    #[test]
    fn ready_interrupt_flag_clears_on_command() {
        for osc in ALL {
            let mut rcc = rcc();
            let bit = osc.descriptor().cir_bit;

            rcc.bus.set_bits(RCC_CIR, 1 << bit);
            assert!(rcc.osc_ready_int_flag(osc));

            rcc.osc_ready_int_clear(osc);
            assert!(!rcc.osc_ready_int_flag(osc), "{osc:?} flag still set");
            assert!(!rcc.bus.bits_set(RCC_CIR, 1 << (bit + CIR_CLR_SHIFT)));
        }
    }

    #[test]
    fn sysclk_source_round_trip() {
        let sources = [
            Oscillator::Hsi,
            Oscillator::Hse,
            Oscillator::Pll,
            Oscillator::Hsi48,
        ];
        for osc in sources {
            let mut rcc = rcc();
            rcc.set_sysclk_source(osc);
            assert_eq!(rcc.sysclk_source(), osc);
        }
    }

    #[test]
    fn non_source_oscillators_are_rejected_silently() {
        for osc in [Oscillator::Hsi14, Oscillator::Lsi, Oscillator::Lse] {
            let mut rcc = rcc();
            rcc.set_sysclk_source(Oscillator::Pll);
            let before = rcc.bus.dump();
            rcc.set_sysclk_source(osc);
            assert_eq!(rcc.bus.dump(), before);
            assert_eq!(rcc.sysclk_source(), Oscillator::Pll);
        }
    }

    #[test]
    #[should_panic]
    fn undefined_sysclk_status_is_fatal() {
        decode_sysclk_source(0b100);
    }

    #[test]
    fn pll_multiplier_only_touches_its_field() {
        let mut rcc = rcc();
        rcc.bus.write(RCC_CFGR, 0xffff_ffff);
        rcc.set_pll_multiplication_factor(PllMul::Mul5);
        assert_eq!(
            rcc.bus.read(RCC_CFGR),
            (0xffff_ffff & !CFGR_PLLMUL_MASK) | (0b0011 << CFGR_PLLMUL_SHIFT)
        );

        rcc.bus.write(RCC_CFGR, 0);
        rcc.set_pll_multiplication_factor(PllMul::Mul16);
        assert_eq!(rcc.bus.read(RCC_CFGR), 0b1110 << CFGR_PLLMUL_SHIFT);
    }

    #[test]
    fn divider_setters_only_touch_their_fields() {
        let mut rcc = rcc();
        rcc.bus.write(RCC_CFGR, 0xffff_ffff);

        rcc.set_hpre(HPre::Div1);
        assert_eq!(rcc.bus.read(RCC_CFGR) & CFGR_HPRE_MASK, 0);
        rcc.set_ppre(PPre::Div1);
        assert_eq!(rcc.bus.read(RCC_CFGR) & CFGR_PPRE_MASK, 0);
        rcc.set_mco(McoSource::Lsi);
        assert_eq!(rcc.bus.read(RCC_CFGR) & CFGR_MCO_MASK, 0b010 << 24);

        // Everything outside the three fields is still set
        let untouched = !(CFGR_HPRE_MASK | CFGR_PPRE_MASK | CFGR_MCO_MASK);
        assert_eq!(rcc.bus.read(RCC_CFGR) & untouched, untouched);

        rcc.bus.write(RCC_CFGR2, 0xffff_fff0);
        rcc.set_prediv(PreDiv::Div2);
        assert_eq!(rcc.bus.read(RCC_CFGR2), 0xffff_fff1);
    }

    #[test]
    fn css_enable_disable_and_flag() {
        let mut rcc = rcc();
        rcc.css_enable();
        assert!(rcc.bus.bits_set(RCC_CR, CR_CSSON));
        rcc.css_disable();
        assert!(!rcc.bus.bits_set(RCC_CR, CR_CSSON));

        assert!(!rcc.css_int_flag());
        rcc.bus.set_bits(RCC_CIR, CIR_CSSF);
        assert!(rcc.css_int_flag());
        rcc.css_int_clear();
        assert!(!rcc.css_int_flag());
    }

    #[test]
    fn clock_setup_reaches_each_target() {
        let cases: [(SysClkTarget, u32, Option<u32>, u32); 6] = [
            (SysClkTarget::Mhz8, 8_000_000, None, 0),
            (SysClkTarget::Mhz16, 16_000_000, Some(0b0010), 0),
            (SysClkTarget::Mhz24, 24_000_000, Some(0b0100), 0),
            (SysClkTarget::Mhz32, 32_000_000, Some(0b0110), 1),
            (SysClkTarget::Mhz40, 40_000_000, Some(0b1000), 1),
            (SysClkTarget::Mhz48, 48_000_000, Some(0b1010), 1),
        ];

        for (target, hz, mul_code, ws) in cases {
            let mut rcc = rcc();
            rcc.clock_setup_in_hsi(target);

            assert_eq!(rcc.clocks().sysclk().raw(), hz, "{target:?}");
            assert_eq!(rcc.clocks().hclk().raw(), hz, "{target:?}");
            assert_eq!(rcc.clocks().pclk().raw(), hz, "{target:?}");

            let cfgr = rcc.bus.read(RCC_CFGR);
            assert_eq!(cfgr & CFGR_HPRE_MASK, 0, "{target:?}");
            assert_eq!(cfgr & CFGR_PPRE_MASK, 0, "{target:?}");
            assert_eq!(
                rcc.bus.read(FLASH_ACR) & ACR_LATENCY_MASK,
                ws,
                "{target:?}"
            );

            match mul_code {
                Some(code) => {
                    assert_eq!(rcc.sysclk_source(), Oscillator::Pll);
                    assert_eq!(
                        (cfgr & CFGR_PLLMUL_MASK) >> CFGR_PLLMUL_SHIFT,
                        code,
                        "{target:?}"
                    );
                    assert_eq!(cfgr & CFGR_PLLSRC, 0, "{target:?}");
                }
                None => {
                    assert_eq!(rcc.sysclk_source(), Oscillator::Hsi);
                }
            }
        }
    }

    #[test]
    fn clocks_default_to_reset_values() {
        let rcc = rcc();
        assert_eq!(rcc.clocks().sysclk().raw(), 8_000_000);
        assert_eq!(rcc.clocks().hclk().raw(), 8_000_000);
        assert_eq!(rcc.clocks().pclk().raw(), 8_000_000);
    }
}

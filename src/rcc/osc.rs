//! Oscillator identities and their control/status bit placements.
//!
//! Each identity maps to one immutable descriptor giving the register and
//! bit for its enable control and ready flag, the index of its ready flag
//! within RCC_CIR, and the optional bypass and system-clock-switch codes.
//! Operations an identity does not support are explicit `None` cases, not
//! implicit fallthroughs.

use crate::reg::{
    BDCR_LSEBYP, BDCR_LSEON, BDCR_LSERDY, CR2_HSI14ON, CR2_HSI14RDY,
    CR2_HSI48ON, CR2_HSI48RDY, CR_HSEBYP, CR_HSEON, CR_HSERDY, CR_HSION,
    CR_HSIRDY, CR_PLLON, CR_PLLRDY, CSR_LSION, CSR_LSIRDY, RCC_BDCR, RCC_CR,
    RCC_CR2, RCC_CSR,
};

/// Clock oscillators of the F0 clock tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// 8 MHz high-speed internal RC oscillator
    Hsi,
    /// 14 MHz internal RC oscillator, dedicated to the ADC
    Hsi14,
    /// 48 MHz internal RC oscillator
    Hsi48,
    /// High-speed external crystal or clock input
    Hse,
    /// ~40 kHz low-speed internal RC oscillator
    Lsi,
    /// 32.768 kHz low-speed external crystal or clock input
    Lse,
    /// Phase-locked loop
    Pll,
}

/// A single control or status bit within a register.
#[derive(Clone, Copy)]
pub(crate) struct RegBit {
    pub addr: u32,
    pub mask: u32,
}

/// Control and status bit placement for one oscillator.
pub(crate) struct OscDescriptor {
    /// Enable control. The PLL's enable cannot be used to turn it off;
    /// switch the system clock away from it instead.
    pub enable: RegBit,
    /// Ready status, in the same register as the enable.
    pub ready: RegBit,
    /// Bit index of the ready flag within RCC_CIR. The interrupt enable
    /// and clear bits sit at fixed offsets above it.
    pub cir_bit: u32,
    /// Bypass control, present only for the external oscillators.
    pub bypass: Option<RegBit>,
    /// SW field code if the oscillator can drive the system clock.
    pub sysclk_code: Option<u32>,
}

const HSI: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_CR, mask: CR_HSION },
    ready: RegBit { addr: RCC_CR, mask: CR_HSIRDY },
    cir_bit: 2,
    bypass: None,
    sysclk_code: Some(0b00),
};

const HSI14: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_CR2, mask: CR2_HSI14ON },
    ready: RegBit { addr: RCC_CR2, mask: CR2_HSI14RDY },
    cir_bit: 5,
    bypass: None,
    sysclk_code: None,
};

const HSI48: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_CR2, mask: CR2_HSI48ON },
    ready: RegBit { addr: RCC_CR2, mask: CR2_HSI48RDY },
    cir_bit: 6,
    bypass: None,
    sysclk_code: Some(0b11),
};

const HSE: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_CR, mask: CR_HSEON },
    ready: RegBit { addr: RCC_CR, mask: CR_HSERDY },
    cir_bit: 3,
    bypass: Some(RegBit { addr: RCC_CR, mask: CR_HSEBYP }),
    sysclk_code: Some(0b01),
};

const LSI: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_CSR, mask: CSR_LSION },
    ready: RegBit { addr: RCC_CSR, mask: CSR_LSIRDY },
    cir_bit: 0,
    bypass: None,
    sysclk_code: None,
};

const LSE: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_BDCR, mask: BDCR_LSEON },
    ready: RegBit { addr: RCC_BDCR, mask: BDCR_LSERDY },
    cir_bit: 1,
    bypass: Some(RegBit { addr: RCC_BDCR, mask: BDCR_LSEBYP }),
    sysclk_code: None,
};

const PLL: OscDescriptor = OscDescriptor {
    enable: RegBit { addr: RCC_CR, mask: CR_PLLON },
    ready: RegBit { addr: RCC_CR, mask: CR_PLLRDY },
    cir_bit: 4,
    bypass: None,
    sysclk_code: Some(0b10),
};

impl Oscillator {
    pub(crate) const fn descriptor(self) -> &'static OscDescriptor {
        match self {
            Oscillator::Hsi => &HSI,
            Oscillator::Hsi14 => &HSI14,
            Oscillator::Hsi48 => &HSI48,
            Oscillator::Hse => &HSE,
            Oscillator::Lsi => &LSI,
            Oscillator::Lse => &LSE,
            Oscillator::Pll => &PLL,
        }
    }
}

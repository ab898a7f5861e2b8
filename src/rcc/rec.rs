//! Peripheral clock gating and reset control
//!
//! Each peripheral's clock-enable and reset bits are addressed by a single
//! value encoding the register byte offset from the RCC base (high bits)
//! and the bit index within that register (low five bits). The same scheme
//! covers the AHBENR/APB1ENR/APB2ENR clock-enable bank and the
//! AHBRSTR/APB1RSTR/APB2RSTR reset bank.
//!
//! The encodings are fixed at compile time by the [`PeriphClock`] and
//! [`PeriphReset`] enums, so only defined (register, bit) combinations can
//! be addressed. There are no ordering interlocks: enabling the clock
//! before first access, and releasing reset before use, is the caller's
//! responsibility, exactly as on the hardware.
//!
//! # Example
//!
//! ```rust,ignore
//! rcc.periph_clock_enable(PeriphClock::Gpioa);
//! rcc.periph_reset_pulse(PeriphReset::Gpioa);
//! ```

use super::Rcc;
use crate::reg::{
    RegisterBus, RCC_AHBENR, RCC_AHBRSTR, RCC_APB1ENR, RCC_APB1RSTR,
    RCC_APB2ENR, RCC_APB2RSTR, RCC_BASE,
};

const fn bit_addr(reg: u32, bit: u32) -> u32 {
    ((reg - RCC_BASE) << 5) | bit
}

const fn decode(encoded: u32) -> (u32, u32) {
    (RCC_BASE + (encoded >> 5), 1 << (encoded & 0x1f))
}

// Generates an enum whose discriminants carry the encoded (register, bit)
// address for every listed peripheral.
macro_rules! periph_bits {
    (
        $(#[$enum_doc:meta])*
        $Enum:ident {
            $( $reg:ident => [ $( $P:ident: $bit:expr ),+ $(,)? ], )+
        }
    ) => {
        paste::item! {
            $(#[$enum_doc])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            #[repr(u32)]
            pub enum $Enum {
                $( $(
                    #[doc = "Control bit for " $P " in " $reg]
                    $P = bit_addr($reg, $bit),
                )+ )+
            }
        }
    };
}

periph_bits! {
    /// Peripheral clock enable bits
    PeriphClock {
        RCC_AHBENR => [
            Dma1: 0, Dma2: 1, Sram: 2, Flitf: 4, Crc: 6,
            Gpioa: 17, Gpiob: 18, Gpioc: 19, Gpiod: 20, Gpioe: 21,
            Gpiof: 22, Tsc: 24,
        ],
        RCC_APB2ENR => [
            Syscfg: 0, Usart6: 5, Usart7: 6, Usart8: 7, Adc: 9,
            Tim1: 11, Spi1: 12, Usart1: 14, Tim15: 16, Tim16: 17,
            Tim17: 18, Dbgmcu: 22,
        ],
        RCC_APB1ENR => [
            Tim2: 0, Tim3: 1, Tim6: 4, Tim7: 5, Tim14: 8, Wwdg: 11,
            Spi2: 14, Usart2: 17, Usart3: 18, Usart4: 19, Usart5: 20,
            I2c1: 21, I2c2: 22, Usb: 23, Can: 25, Crs: 27, Pwr: 28,
            Dac: 29, Cec: 30,
        ],
    }
}

periph_bits! {
    /// Peripheral reset control bits
    PeriphReset {
        RCC_AHBRSTR => [
            Gpioa: 17, Gpiob: 18, Gpioc: 19, Gpiod: 20, Gpioe: 21,
            Gpiof: 22, Tsc: 24,
        ],
        RCC_APB2RSTR => [
            Syscfg: 0, Usart6: 5, Usart7: 6, Usart8: 7, Adc: 9,
            Tim1: 11, Spi1: 12, Usart1: 14, Tim15: 16, Tim16: 17,
            Tim17: 18, Dbgmcu: 22,
        ],
        RCC_APB1RSTR => [
            Tim2: 0, Tim3: 1, Tim6: 4, Tim7: 5, Tim14: 8, Wwdg: 11,
            Spi2: 14, Usart2: 17, Usart3: 18, Usart4: 19, Usart5: 20,
            I2c1: 21, I2c2: 22, Usb: 23, Can: 25, Crs: 27, Pwr: 28,
            Dac: 29, Cec: 30,
        ],
    }
}

/// Peripheral clock/reset gating
impl<B: RegisterBus> Rcc<B> {
    /// Ungate the bus clock of a peripheral.
    pub fn periph_clock_enable(&mut self, periph: PeriphClock) {
        let (addr, mask) = decode(periph as u32);
        self.bus.set_bits(addr, mask);
    }

    /// Gate the bus clock of a peripheral.
    pub fn periph_clock_disable(&mut self, periph: PeriphClock) {
        let (addr, mask) = decode(periph as u32);
        self.bus.clear_bits(addr, mask);
    }

    /// Assert then immediately release a peripheral's reset line. The
    /// hardware latches the pulse; no delay is required in between.
    pub fn periph_reset_pulse(&mut self, periph: PeriphReset) {
        let (addr, mask) = decode(periph as u32);
        self.bus.set_bits(addr, mask);
        self.bus.clear_bits(addr, mask);
    }

    /// Assert a peripheral's reset line and leave it held, for callers
    /// reconfiguring the peripheral across an extended window.
    pub fn periph_reset_hold(&mut self, periph: PeriphReset) {
        let (addr, mask) = decode(periph as u32);
        self.bus.set_bits(addr, mask);
    }

    /// Release a peripheral's reset line.
    pub fn periph_reset_release(&mut self, periph: PeriphReset) {
        let (addr, mask) = decode(periph as u32);
        self.bus.clear_bits(addr, mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::sim::SimBus;

    fn rcc() -> Rcc<SimBus> {
        Rcc::new(SimBus::new())
    }

    #[test]
    fn encoding_addresses_the_defined_register_and_bit() {
        assert_eq!(
            decode(PeriphClock::Gpioa as u32),
            (RCC_AHBENR, 1 << 17)
        );
        assert_eq!(
            decode(PeriphClock::Usart1 as u32),
            (RCC_APB2ENR, 1 << 14)
        );
        assert_eq!(decode(PeriphClock::Cec as u32), (RCC_APB1ENR, 1 << 30));
        assert_eq!(
            decode(PeriphReset::Usart2 as u32),
            (RCC_APB1RSTR, 1 << 17)
        );
    }

    #[test]
    fn clock_enable_then_disable_restores_register() {
        let mut rcc = rcc();
        let before = rcc.bus.read(RCC_APB1ENR);

        rcc.periph_clock_enable(PeriphClock::I2c1);
        assert!(rcc.bus.bits_set(RCC_APB1ENR, 1 << 21));

        rcc.periph_clock_disable(PeriphClock::I2c1);
        assert_eq!(rcc.bus.read(RCC_APB1ENR), before);
    }

    #[test]
    fn enable_does_not_disturb_neighbours() {
        let mut rcc = rcc();
        rcc.periph_clock_enable(PeriphClock::Usart2);
        rcc.periph_clock_enable(PeriphClock::Usart3);
        rcc.periph_clock_disable(PeriphClock::Usart2);
        assert!(rcc.bus.bits_set(RCC_APB1ENR, 1 << 18));
        assert!(!rcc.bus.bits_set(RCC_APB1ENR, 1 << 17));
    }

    #[test]
    fn reset_pulse_leaves_bit_clear() {
        let mut rcc = rcc();
        // Regardless of the bit's value beforehand
        rcc.bus.set_bits(RCC_APB2RSTR, 1 << 12);
        rcc.periph_reset_pulse(PeriphReset::Spi1);
        assert!(!rcc.bus.bits_set(RCC_APB2RSTR, 1 << 12));

        rcc.periph_reset_pulse(PeriphReset::Tim1);
        assert!(!rcc.bus.bits_set(RCC_APB2RSTR, 1 << 11));
    }

    #[test]
    fn reset_hold_until_release() {
        let mut rcc = rcc();
        rcc.periph_reset_hold(PeriphReset::Gpiob);
        assert!(rcc.bus.bits_set(RCC_AHBRSTR, 1 << 18));
        rcc.periph_reset_release(PeriphReset::Gpiob);
        assert!(!rcc.bus.bits_set(RCC_AHBRSTR, 1 << 18));
    }
}

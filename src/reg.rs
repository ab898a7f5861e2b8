//! Word-sized register access
//!
//! The RCC and FLASH register files are reached through the [`RegisterBus`]
//! trait rather than fixed pointers, so the clock logic is the same whether
//! it drives the real memory map ([`Mmio`]) or the simulated register file
//! used by the unit tests. Accesses are native 32-bit reads and writes with
//! no alignment or byte-order concerns.
//!
//! Register addresses and bit placements follow RM0091 Sections 3.5 (FLASH)
//! and 6.4 (RCC).

/// RCC register block base address
pub const RCC_BASE: u32 = 0x4002_1000;
/// FLASH interface register block base address
pub const FLASH_BASE: u32 = 0x4002_2000;

/// Clock control register
pub const RCC_CR: u32 = RCC_BASE + 0x00;
/// Clock configuration register
pub const RCC_CFGR: u32 = RCC_BASE + 0x04;
/// Clock interrupt register
pub const RCC_CIR: u32 = RCC_BASE + 0x08;
/// APB2 peripheral reset register
pub const RCC_APB2RSTR: u32 = RCC_BASE + 0x0c;
/// APB1 peripheral reset register
pub const RCC_APB1RSTR: u32 = RCC_BASE + 0x10;
/// AHB peripheral clock enable register
pub const RCC_AHBENR: u32 = RCC_BASE + 0x14;
/// APB2 peripheral clock enable register
pub const RCC_APB2ENR: u32 = RCC_BASE + 0x18;
/// APB1 peripheral clock enable register
pub const RCC_APB1ENR: u32 = RCC_BASE + 0x1c;
/// RTC domain control register
pub const RCC_BDCR: u32 = RCC_BASE + 0x20;
/// Control/status register
pub const RCC_CSR: u32 = RCC_BASE + 0x24;
/// AHB peripheral reset register
pub const RCC_AHBRSTR: u32 = RCC_BASE + 0x28;
/// Clock configuration register 2
pub const RCC_CFGR2: u32 = RCC_BASE + 0x2c;
/// Clock configuration register 3
pub const RCC_CFGR3: u32 = RCC_BASE + 0x30;
/// Clock control register 2
pub const RCC_CR2: u32 = RCC_BASE + 0x34;

/// Flash access control register
pub const FLASH_ACR: u32 = FLASH_BASE + 0x00;

/// RCC_CR: HSI enable
pub const CR_HSION: u32 = 1 << 0;
/// RCC_CR: HSI ready
pub const CR_HSIRDY: u32 = 1 << 1;
/// RCC_CR: HSE enable
pub const CR_HSEON: u32 = 1 << 16;
/// RCC_CR: HSE ready
pub const CR_HSERDY: u32 = 1 << 17;
/// RCC_CR: HSE bypass
pub const CR_HSEBYP: u32 = 1 << 18;
/// RCC_CR: clock security system enable
pub const CR_CSSON: u32 = 1 << 19;
/// RCC_CR: PLL enable
pub const CR_PLLON: u32 = 1 << 24;
/// RCC_CR: PLL ready
pub const CR_PLLRDY: u32 = 1 << 25;

/// RCC_CR2: HSI14 enable
pub const CR2_HSI14ON: u32 = 1 << 0;
/// RCC_CR2: HSI14 ready
pub const CR2_HSI14RDY: u32 = 1 << 1;
/// RCC_CR2: HSI48 enable
pub const CR2_HSI48ON: u32 = 1 << 16;
/// RCC_CR2: HSI48 ready
pub const CR2_HSI48RDY: u32 = 1 << 17;

/// RCC_CFGR: system clock switch field
pub const CFGR_SW_MASK: u32 = 0b11;
/// RCC_CFGR: system clock switch status field
pub const CFGR_SWS_MASK: u32 = 0b11 << CFGR_SWS_SHIFT;
/// RCC_CFGR: SWS field position
pub const CFGR_SWS_SHIFT: u32 = 2;
/// RCC_CFGR: AHB prescaler field
pub const CFGR_HPRE_MASK: u32 = 0b1111 << 4;
/// RCC_CFGR: APB prescaler field
pub const CFGR_PPRE_MASK: u32 = 0b111 << 8;
/// RCC_CFGR: PLL input source select (clear selects HSI/2)
pub const CFGR_PLLSRC: u32 = 1 << 16;
/// RCC_CFGR: PLL multiplication factor field
pub const CFGR_PLLMUL_MASK: u32 = 0b1111 << CFGR_PLLMUL_SHIFT;
/// RCC_CFGR: PLLMUL field position
pub const CFGR_PLLMUL_SHIFT: u32 = 18;
/// RCC_CFGR: microcontroller clock output select field
pub const CFGR_MCO_MASK: u32 = 0b111 << 24;

// RCC_CIR holds the oscillator ready flags in bits [7:0], the matching
// interrupt enables at the same index plus 8, and the write-only clear
// bits at the same index plus 16.
/// RCC_CIR: offset from a ready flag to its interrupt enable bit
pub const CIR_IE_SHIFT: u32 = 8;
/// RCC_CIR: offset from a ready flag to its clear bit
pub const CIR_CLR_SHIFT: u32 = 16;
/// RCC_CIR: clock security system interrupt flag
pub const CIR_CSSF: u32 = 1 << 7;
/// RCC_CIR: clock security system interrupt clear
pub const CIR_CSSC: u32 = 1 << 23;

/// RCC_BDCR: LSE enable
pub const BDCR_LSEON: u32 = 1 << 0;
/// RCC_BDCR: LSE ready
pub const BDCR_LSERDY: u32 = 1 << 1;
/// RCC_BDCR: LSE bypass
pub const BDCR_LSEBYP: u32 = 1 << 2;

/// RCC_CSR: LSI enable
pub const CSR_LSION: u32 = 1 << 0;
/// RCC_CSR: LSI ready
pub const CSR_LSIRDY: u32 = 1 << 1;
/// RCC_CSR: 1.8 V domain reset flag
pub const CSR_V18PWRRSTF: u32 = 1 << 23;
/// RCC_CSR: remove reset flags
pub const CSR_RMVF: u32 = 1 << 24;
/// RCC_CSR: option byte loader reset flag
pub const CSR_OBLRSTF: u32 = 1 << 25;
/// RCC_CSR: NRST pin reset flag
pub const CSR_PINRSTF: u32 = 1 << 26;
/// RCC_CSR: power-on reset flag
pub const CSR_PORRSTF: u32 = 1 << 27;
/// RCC_CSR: software reset flag
pub const CSR_SFTRSTF: u32 = 1 << 28;
/// RCC_CSR: independent watchdog reset flag
pub const CSR_IWDGRSTF: u32 = 1 << 29;
/// RCC_CSR: window watchdog reset flag
pub const CSR_WWDGRSTF: u32 = 1 << 30;
/// RCC_CSR: low-power management reset flag
pub const CSR_LPWRRSTF: u32 = 1 << 31;

/// RCC_CFGR2: PLL input predivider field
pub const CFGR2_PREDIV_MASK: u32 = 0b1111;

/// FLASH_ACR: read latency field
pub const ACR_LATENCY_MASK: u32 = 0b111;
/// FLASH_ACR: prefetch buffer enable
pub const ACR_PRFTBE: u32 = 1 << 4;

/// Native 32-bit access to the RCC and FLASH register files.
///
/// Read-modify-write helpers are not atomic; callers must ensure no
/// concurrent access to the same register (normally guaranteed by running
/// clock setup before interrupts are enabled).
pub trait RegisterBus {
    /// Read the word at `addr`.
    fn read(&self, addr: u32) -> u32;
    /// Write `value` to the word at `addr`.
    fn write(&self, addr: u32, value: u32);

    /// Set the bits of `mask`, leaving the rest of the register untouched.
    fn set_bits(&self, addr: u32, mask: u32) {
        self.write(addr, self.read(addr) | mask);
    }

    /// Clear the bits of `mask`, leaving the rest of the register untouched.
    fn clear_bits(&self, addr: u32, mask: u32) {
        self.write(addr, self.read(addr) & !mask);
    }

    /// Whether any bit of `mask` is set.
    fn bits_set(&self, addr: u32, mask: u32) -> bool {
        self.read(addr) & mask != 0
    }

    /// Replace the field covered by `mask` with `value` (already shifted
    /// into position), leaving adjacent fields untouched.
    fn write_field(&self, addr: u32, mask: u32, value: u32) {
        self.write(addr, (self.read(addr) & !mask) | (value & mask));
    }
}

/// Volatile memory-mapped access, the on-device implementation.
pub struct Mmio;

impl RegisterBus for Mmio {
    #[inline(always)]
    fn read(&self, addr: u32) -> u32 {
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline(always)]
    fn write(&self, addr: u32, value: u32) {
        unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}


#[cfg(test)]
mod tests {
    use super::sim::SimBus;
    use super::*;

    #[test]
    fn field_write_preserves_adjacent_bits() {
        let bus = SimBus::new();
        bus.write(RCC_CFGR2, 0xffff_fff0);
        bus.write_field(RCC_CFGR2, CFGR2_PREDIV_MASK, 0b0111);
        assert_eq!(bus.read(RCC_CFGR2), 0xffff_fff7);
    }

    #[test]
    fn sim_ready_follows_enable() {
        let bus = SimBus::new();
        bus.set_bits(RCC_CR, CR_HSEON);
        assert!(bus.bits_set(RCC_CR, CR_HSERDY));
        bus.clear_bits(RCC_CR, CR_HSEON);
        assert!(!bus.bits_set(RCC_CR, CR_HSERDY));
    }

    #[test]
    fn sim_interrupt_clear_is_write_one_to_clear() {
        let bus = SimBus::new();
        bus.set_bits(RCC_CIR, 1 << 3);
        assert!(bus.bits_set(RCC_CIR, 1 << 3));

        bus.set_bits(RCC_CIR, 1 << (3 + CIR_CLR_SHIFT));
        assert!(!bus.bits_set(RCC_CIR, 1 << 3));
        // The clear bit itself reads back as zero
        assert!(!bus.bits_set(RCC_CIR, 1 << (3 + CIR_CLR_SHIFT)));
    }

    #[test]
    fn sim_status_follows_switch_request() {
        let bus = SimBus::new();
        bus.write_field(RCC_CFGR, CFGR_SW_MASK, 0b10);
        assert_eq!(bus.read(RCC_CFGR) & CFGR_SWS_MASK, 0b10 << CFGR_SWS_SHIFT);
    }
}

//! Reset and Clock Control driver for the STM32F0 family.
//!
//! This crate configures the RCC unit: oscillator lifecycle (on, off,
//! bypass, ready), system clock source selection, the AHB/APB prescalers
//! and PLL multiplier, composite clock setup procedures that bring the
//! chip from its reset defaults to a validated target frequency, and
//! peripheral clock/reset gating.
//!
//! See Figure 11 "Clock tree" in Reference Manual RM0091.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stm32f0xx_rcc::rcc::{PeriphClock, Rcc, SysClkTarget};
//! use stm32f0xx_rcc::reg::Mmio;
//!
//! let mut rcc = Rcc::new(Mmio);
//! rcc.clock_setup_in_hsi(SysClkTarget::Mhz48);
//!
//! // Enable the clock to a peripheral and reset it
//! rcc.periph_clock_enable(PeriphClock::Usart1);
//! rcc.periph_reset_pulse(stm32f0xx_rcc::rcc::PeriphReset::Usart1);
//!
//! // Bus frequency for baud rate / prescaler computations
//! let pclk = rcc.clocks().pclk();
//! ```
//!
//! The register file is reached through the [`reg::RegisterBus`] seam so
//! the clock logic can also run against a simulated register file in unit
//! tests. On hardware, use [`reg::Mmio`].
//!
//! Clock setup must run before interrupts that touch RCC registers are
//! enabled; read-modify-write sequences here are not atomic.

#![cfg_attr(not(test), no_std)]

pub mod flash;
pub mod prelude;
pub mod rcc;
pub mod reg;
pub mod time;

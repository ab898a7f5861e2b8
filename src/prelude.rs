//! Prelude

pub use crate::reg::RegisterBus as _stm32f0xx_rcc_reg_RegisterBus;
pub use crate::time::U32Ext as _stm32f0xx_rcc_time_U32Ext;

pub use fugit::{ExtU32 as _, RateExtU32 as _};

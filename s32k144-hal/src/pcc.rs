//! Peripheral clock gating (PCC) and system clock sources (SCG)
//!
//! Every peripheral driven by this HAL sits behind a clock gate in the
//! Peripheral Clock Controller; its PCC slot also selects which
//! functional clock source feeds it and, for some slots, a divider.
//! The gate must be off while source or divider are changed - the
//! hardware ignores such writes, so the driver reports them as errors
//! instead of letting them silently do nothing.
//!
//! ```no_run
//! use s32k144_hal::{pac, pcc::{ClockName, Pcc, PeripheralClockSource}};
//!
//! let p = pac::Peripherals::take().unwrap();
//! let mut pcc = Pcc::new(p.PCC);
//! pcc.set_clock_source(ClockName::Lpuart1, PeripheralClockSource::FircDiv2).unwrap();
//! pcc.enable_clock(ClockName::Lpuart1).unwrap();
//! ```

use crate::pac::pcc::{
    PCCN_CGC, PCCN_FRAC, PCCN_PCD_MASK, PCCN_PCS_MASK, PCCN_PCS_SHIFT, PCCN_PR,
};
use crate::pac::scg::{CSR_EN, CSR_LK, CSR_VLD, SOSCCFG_EREFS, SOSCCFG_RANGE_HIGH};
use crate::pac;

/// Error type for clock operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Source/divider changes require the clock gate to be off first.
    ClockEnabled,
    /// A fractional divider is only meaningful with a divider above one.
    InvalidDivider,
    /// The peripheral is not present on this device.
    NotPresent,
}

/// Clock-gated peripherals, by PCC slot.
///
/// A closed enum of the slots this HAL drives; the slot index can never be
/// out of range, unlike the raw register index the hardware manual counts
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockName {
    /// FlexTimer 0
    Ftm0,
    /// FlexTimer 1
    Ftm1,
    /// FlexTimer 2
    Ftm2,
    /// Analog-to-digital converter 0
    Adc0,
    /// Low Power Interrupt Timer
    Lpit,
    /// Low Power SPI 0
    Lpspi0,
    /// Pin control, port A
    PortA,
    /// Pin control, port B
    PortB,
    /// Pin control, port C
    PortC,
    /// Pin control, port D
    PortD,
    /// Pin control, port E
    PortE,
    /// Low Power UART 0
    Lpuart0,
    /// Low Power UART 1
    Lpuart1,
    /// Low Power UART 2
    Lpuart2,
}

impl ClockName {
    /// Index into the PCC register array (register offset / 4).
    pub const fn slot(self) -> usize {
        match self {
            ClockName::Lpspi0 => 0xB0 / 4,
            ClockName::Lpit => 0xDC / 4,
            ClockName::Ftm0 => 0xE0 / 4,
            ClockName::Ftm1 => 0xE4 / 4,
            ClockName::Ftm2 => 0xE8 / 4,
            ClockName::Adc0 => 0xEC / 4,
            ClockName::PortA => 0x124 / 4,
            ClockName::PortB => 0x128 / 4,
            ClockName::PortC => 0x12C / 4,
            ClockName::PortD => 0x130 / 4,
            ClockName::PortE => 0x134 / 4,
            ClockName::Lpuart0 => 0x1A8 / 4,
            ClockName::Lpuart1 => 0x1AC / 4,
            ClockName::Lpuart2 => 0x1B0 / 4,
        }
    }
}

/// Functional clock source for a PCC slot (PCS field encodings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralClockSource {
    /// Clock off
    Off = 0,
    /// System oscillator divided clock
    SoscDiv2 = 1,
    /// Slow IRC divided clock
    SircDiv2 = 2,
    /// Fast IRC divided clock
    FircDiv2 = 3,
    /// System PLL divided clock
    SpllDiv2 = 6,
}

/// Divider for PCC slots with a fractional divider (PCD field, divide by
/// value + 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDivider {
    /// Divide by 1
    By1 = 0,
    /// Divide by 2
    By2 = 1,
    /// Divide by 3
    By3 = 2,
    /// Divide by 4
    By4 = 3,
    /// Divide by 5
    By5 = 4,
    /// Divide by 6
    By6 = 5,
    /// Divide by 7
    By7 = 6,
    /// Divide by 8
    By8 = 7,
}

/// Fractional half-step of the divider (FRAC bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockFraction {
    /// No fractional step
    Zero = 0,
    /// Add a half step to the divider
    Half = 1,
}

/// Driver over the Peripheral Clock Controller.
pub struct Pcc {
    device: pac::PCC,
}

impl Pcc {
    /// Wraps the PCC instance.
    pub fn new(device: pac::PCC) -> Self {
        Self { device }
    }

    /// Releases the underlying instance.
    pub fn free(self) -> pac::PCC {
        self.device
    }

    fn pccn(&self, name: ClockName) -> &vcell::VolatileCell<u32> {
        &self.device.pccn[name.slot()]
    }

    /// `true` if the peripheral exists on this device (PR bit).
    pub fn is_present(&self, name: ClockName) -> bool {
        self.pccn(name).get() & PCCN_PR != 0
    }

    /// `true` if the peripheral's clock gate is currently open.
    pub fn is_enabled(&self, name: ClockName) -> bool {
        self.pccn(name).get() & PCCN_CGC != 0
    }

    /// Opens the clock gate of a peripheral.
    pub fn enable_clock(&mut self, name: ClockName) -> Result<(), Error> {
        let reg = self.pccn(name);
        if reg.get() & PCCN_PR == 0 {
            return Err(Error::NotPresent);
        }
        reg.set(reg.get() | PCCN_CGC);
        Ok(())
    }

    /// Closes the clock gate of a peripheral.
    pub fn disable_clock(&mut self, name: ClockName) {
        let reg = self.pccn(name);
        reg.set(reg.get() & !PCCN_CGC);
    }

    /// Selects the functional clock source of a peripheral.
    ///
    /// Fails with [`Error::ClockEnabled`] while the gate is open; the
    /// hardware would ignore the write.
    pub fn set_clock_source(
        &mut self,
        name: ClockName,
        source: PeripheralClockSource,
    ) -> Result<(), Error> {
        let reg = self.pccn(name);
        if reg.get() & PCCN_CGC != 0 {
            return Err(Error::ClockEnabled);
        }
        reg.set((reg.get() & !PCCN_PCS_MASK) | ((source as u32) << PCCN_PCS_SHIFT));
        Ok(())
    }

    /// Programs the fractional clock divider of a peripheral.
    ///
    /// A half-step fraction with a divide-by-one divider is not a valid
    /// hardware configuration and is rejected, as is any change while the
    /// gate is open.
    pub fn set_clock_divider(
        &mut self,
        name: ClockName,
        divider: ClockDivider,
        fraction: ClockFraction,
    ) -> Result<(), Error> {
        if matches!(divider, ClockDivider::By1) && matches!(fraction, ClockFraction::Half) {
            return Err(Error::InvalidDivider);
        }
        let reg = self.pccn(name);
        if reg.get() & PCCN_CGC != 0 {
            return Err(Error::ClockEnabled);
        }
        let mut value = reg.get() & !(PCCN_PCD_MASK | PCCN_FRAC);
        value |= divider as u32;
        if matches!(fraction, ClockFraction::Half) {
            value |= PCCN_FRAC;
        }
        reg.set(value);
        Ok(())
    }
}

/// System-level clock sources managed by the SCG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemClockSource {
    /// Fast internal RC oscillator (48 MHz)
    Firc,
    /// Slow internal RC oscillator (2/8 MHz)
    Sirc,
    /// External system oscillator
    Sosc,
    /// System PLL
    Spll,
}

/// Driver over the System Clock Generator.
pub struct Scg {
    device: pac::SCG,
}

impl Scg {
    /// Wraps the SCG instance.
    pub fn new(device: pac::SCG) -> Self {
        Self { device }
    }

    /// Releases the underlying instance.
    pub fn free(self) -> pac::SCG {
        self.device
    }

    /// Enables one of the system clock sources and busy-waits until the
    /// hardware reports it valid.
    ///
    /// The SOSC path assumes an external crystal in the high frequency
    /// range, matching the reference board. No further clock tree
    /// configuration is performed here.
    pub fn enable_source(&mut self, source: SystemClockSource) {
        let (csr, cfg) = match source {
            SystemClockSource::Sosc => (&self.device.sosccsr, Some(&self.device.sosccfg)),
            SystemClockSource::Sirc => (&self.device.sirccsr, None),
            SystemClockSource::Firc => (&self.device.firccsr, None),
            SystemClockSource::Spll => (&self.device.spllcsr, None),
        };

        // Unlock and disable before reconfiguring.
        csr.set(csr.get() & !(CSR_LK | CSR_EN));

        if let Some(cfg) = cfg {
            cfg.set(SOSCCFG_RANGE_HIGH | SOSCCFG_EREFS);
        }

        csr.set(CSR_EN);
        while csr.get() & CSR_VLD == 0 {
            cortex_m::asm::nop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_match_the_reference_manual_offsets() {
        assert_eq!(ClockName::PortA.slot(), 73);
        assert_eq!(ClockName::PortE.slot(), 77);
        assert_eq!(ClockName::Lpuart0.slot(), 106);
        assert_eq!(ClockName::Lpuart2.slot(), 108);
    }
}

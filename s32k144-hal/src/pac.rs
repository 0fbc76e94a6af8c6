//! Peripheral register blocks
//!
//! Memory-mapped register definitions for the peripherals this HAL drives,
//! in the same shape a svd2rust generated peripheral access crate would use:
//! one `#[repr(C)]` register block per peripheral family, a zero-sized owned
//! token type per hardware instance, and a [`Peripherals`] singleton that
//! hands each token out exactly once.
//!
//! Register layouts and field positions follow the S32K144 reference manual
//! (S32K1XXRM). Only the fields the drivers actually touch get named
//! constants.

use core::marker::PhantomData;
use core::ops::Deref;

/// General Purpose Input/Output register block (`GPIO_Type`)
pub mod gpio {
    use vcell::VolatileCell;

    /// Registers of one GPIO port, base offsets 0x00..0x18
    #[repr(C)]
    pub struct RegisterBlock {
        /// Port Data Output Register
        pub pdor: VolatileCell<u32>,
        /// Port Set Output Register (write-1-to-set strobe)
        pub psor: VolatileCell<u32>,
        /// Port Clear Output Register (write-1-to-clear strobe)
        pub pcor: VolatileCell<u32>,
        /// Port Toggle Output Register (write-1-to-toggle strobe)
        pub ptor: VolatileCell<u32>,
        /// Port Data Input Register
        pub pdir: VolatileCell<u32>,
        /// Port Data Direction Register (1 = output)
        pub pddr: VolatileCell<u32>,
        /// Port Input Disable Register
        pub pidr: VolatileCell<u32>,
    }
}

/// Port multiplexing control register block (`PORT_Type`)
pub mod port {
    use vcell::VolatileCell;

    /// Registers of one PORT controller
    #[repr(C)]
    pub struct RegisterBlock {
        /// Pin Control Registers, one per pin
        pub pcr: [VolatileCell<u32>; 32],
        /// Global Pin Control Low Register
        pub gpclr: VolatileCell<u32>,
        /// Global Pin Control High Register
        pub gpchr: VolatileCell<u32>,
        _reserved0: [u32; 6],
        /// Interrupt Status Flag Register (write-1-to-clear)
        pub isfr: VolatileCell<u32>,
        _reserved1: [u32; 7],
        /// Digital Filter Enable Register
        pub dfer: VolatileCell<u32>,
        /// Digital Filter Clock Register
        pub dfcr: VolatileCell<u32>,
        /// Digital Filter Width Register
        pub dfwr: VolatileCell<u32>,
    }

    /// PCR: pull select (0 = pull-down, 1 = pull-up)
    pub const PCR_PS: u32 = 1 << 0;
    /// PCR: pull enable
    pub const PCR_PE: u32 = 1 << 1;
    /// PCR: pin mux control field position
    pub const PCR_MUX_SHIFT: u32 = 8;
    /// PCR: pin mux control field mask
    pub const PCR_MUX_MASK: u32 = 0b111 << PCR_MUX_SHIFT;
    /// PCR: interrupt configuration field position
    pub const PCR_IRQC_SHIFT: u32 = 16;
    /// PCR: interrupt configuration field mask
    pub const PCR_IRQC_MASK: u32 = 0b1111 << PCR_IRQC_SHIFT;
    /// PCR: interrupt status flag (write-1-to-clear)
    pub const PCR_ISF: u32 = 1 << 24;
}

/// Peripheral Clock Controller register block (`PCC_Type`)
pub mod pcc {
    use vcell::VolatileCell;

    /// The PCC is a flat array of per-peripheral clock control words.
    #[repr(C)]
    pub struct RegisterBlock {
        /// PCC control words, indexed by peripheral slot
        pub pccn: [VolatileCell<u32>; 128],
    }

    /// PCCn: peripheral clock divider field mask (divide by PCD + 1)
    pub const PCCN_PCD_MASK: u32 = 0b111;
    /// PCCn: peripheral clock divider fraction bit
    pub const PCCN_FRAC: u32 = 1 << 3;
    /// PCCn: peripheral clock source select field position
    pub const PCCN_PCS_SHIFT: u32 = 24;
    /// PCCn: peripheral clock source select field mask
    pub const PCCN_PCS_MASK: u32 = 0b111 << PCCN_PCS_SHIFT;
    /// PCCn: clock gate control (1 = clock enabled)
    pub const PCCN_CGC: u32 = 1 << 30;
    /// PCCn: peripheral present (read-only)
    pub const PCCN_PR: u32 = 1 << 31;
}

/// System Clock Generator register block (`SCG_Type`)
pub mod scg {
    use vcell::VolatileCell;

    /// SCG registers; only the oscillator control/status registers are used.
    #[repr(C)]
    pub struct RegisterBlock {
        /// Version ID Register
        pub verid: VolatileCell<u32>,
        /// Parameter Register
        pub param: VolatileCell<u32>,
        _reserved0: [u32; 2],
        /// Clock Status Register
        pub csr: VolatileCell<u32>,
        /// Run Clock Control Register
        pub rccr: VolatileCell<u32>,
        /// VLPR Clock Control Register
        pub vccr: VolatileCell<u32>,
        /// HSRUN Clock Control Register
        pub hccr: VolatileCell<u32>,
        /// CLKOUT Configuration Register
        pub clkoutcnf: VolatileCell<u32>,
        _reserved1: [u32; 55],
        /// System OSC Control Status Register
        pub sosccsr: VolatileCell<u32>,
        /// System OSC Divide Register
        pub soscdiv: VolatileCell<u32>,
        /// System Oscillator Configuration Register
        pub sosccfg: VolatileCell<u32>,
        _reserved2: [u32; 61],
        /// Slow IRC Control Status Register
        pub sirccsr: VolatileCell<u32>,
        /// Slow IRC Divide Register
        pub sircdiv: VolatileCell<u32>,
        /// Slow IRC Configuration Register
        pub sirccfg: VolatileCell<u32>,
        _reserved3: [u32; 61],
        /// Fast IRC Control Status Register
        pub firccsr: VolatileCell<u32>,
        /// Fast IRC Divide Register
        pub fircdiv: VolatileCell<u32>,
        /// Fast IRC Configuration Register
        pub firccfg: VolatileCell<u32>,
        _reserved4: [u32; 189],
        /// System PLL Control Status Register
        pub spllcsr: VolatileCell<u32>,
        /// System PLL Divide Register
        pub splldiv: VolatileCell<u32>,
        /// System PLL Configuration Register
        pub spllcfg: VolatileCell<u32>,
    }

    /// xxCSR: oscillator enable (SOSCEN/SIRCEN/FIRCEN/SPLLEN)
    pub const CSR_EN: u32 = 1 << 0;
    /// xxCSR: lock register
    pub const CSR_LK: u32 = 1 << 23;
    /// xxCSR: oscillator valid (read-only)
    pub const CSR_VLD: u32 = 1 << 24;

    /// SOSCCFG: external reference select (crystal oscillator)
    pub const SOSCCFG_EREFS: u32 = 1 << 2;
    /// SOSCCFG: frequency range field position
    pub const SOSCCFG_RANGE_SHIFT: u32 = 4;
    /// SOSCCFG: high frequency range (8-40 MHz crystal)
    pub const SOSCCFG_RANGE_HIGH: u32 = 0b11 << SOSCCFG_RANGE_SHIFT;
}

/// Low Power UART register block (`LPUART_Type`)
pub mod lpuart {
    use vcell::VolatileCell;

    /// Registers of one LPUART instance
    #[repr(C)]
    pub struct RegisterBlock {
        /// Version ID Register
        pub verid: VolatileCell<u32>,
        /// Parameter Register
        pub param: VolatileCell<u32>,
        /// Global Register
        pub global: VolatileCell<u32>,
        /// Pin Configuration Register
        pub pincfg: VolatileCell<u32>,
        /// Baud Rate Register
        pub baud: VolatileCell<u32>,
        /// Status Register
        pub stat: VolatileCell<u32>,
        /// Control Register
        pub ctrl: VolatileCell<u32>,
        /// Data Register
        pub data: VolatileCell<u32>,
        /// Match Address Register
        pub matchr: VolatileCell<u32>,
        /// MODEM IrDA Register
        pub modir: VolatileCell<u32>,
        /// FIFO Register
        pub fifo: VolatileCell<u32>,
        /// Watermark Register
        pub water: VolatileCell<u32>,
    }

    /// GLOBAL: software reset
    pub const GLOBAL_RST: u32 = 1 << 1;

    /// BAUD: baud rate modulo divisor field mask (13 bits)
    pub const BAUD_SBR_MASK: u32 = 0x1FFF;
    /// BAUD: stop bit number select (0 = one, 1 = two)
    pub const BAUD_SBNS: u32 = 1 << 13;
    /// BAUD: oversampling ratio field position (field value = ratio - 1)
    pub const BAUD_OSR_SHIFT: u32 = 24;
    /// BAUD: oversampling ratio field mask
    pub const BAUD_OSR_MASK: u32 = 0b11111 << BAUD_OSR_SHIFT;
    /// BAUD: 10-bit mode select
    pub const BAUD_M10: u32 = 1 << 29;

    /// STAT: parity error flag (write-1-to-clear)
    pub const STAT_PF: u32 = 1 << 16;
    /// STAT: framing error flag (write-1-to-clear)
    pub const STAT_FE: u32 = 1 << 17;
    /// STAT: noise flag (write-1-to-clear)
    pub const STAT_NF: u32 = 1 << 18;
    /// STAT: receiver overrun flag (write-1-to-clear)
    pub const STAT_OR: u32 = 1 << 19;
    /// STAT: receive data register full
    pub const STAT_RDRF: u32 = 1 << 21;
    /// STAT: transmission complete
    pub const STAT_TC: u32 = 1 << 22;
    /// STAT: transmit data register empty
    pub const STAT_TDRE: u32 = 1 << 23;
    /// STAT: receive data inversion
    pub const STAT_RXINV: u32 = 1 << 28;
    /// STAT: MSB first
    pub const STAT_MSBF: u32 = 1 << 29;

    /// CTRL: parity type (0 = even, 1 = odd)
    pub const CTRL_PT: u32 = 1 << 0;
    /// CTRL: parity enable
    pub const CTRL_PE: u32 = 1 << 1;
    /// CTRL: 9-bit mode select
    pub const CTRL_M: u32 = 1 << 4;
    /// CTRL: 7-bit mode select
    pub const CTRL_M7: u32 = 1 << 11;
    /// CTRL: receiver enable
    pub const CTRL_RE: u32 = 1 << 18;
    /// CTRL: transmitter enable
    pub const CTRL_TE: u32 = 1 << 19;
    /// CTRL: receiver interrupt enable (RDRF)
    pub const CTRL_RIE: u32 = 1 << 21;
    /// CTRL: transmit interrupt enable (TDRE)
    pub const CTRL_TIE: u32 = 1 << 22;
    /// CTRL: transmission complete interrupt enable
    pub const CTRL_TCIE: u32 = 1 << 23;
    /// CTRL: parity error interrupt enable
    pub const CTRL_PEIE: u32 = 1 << 24;
    /// CTRL: framing error interrupt enable
    pub const CTRL_FEIE: u32 = 1 << 25;
    /// CTRL: noise error interrupt enable
    pub const CTRL_NEIE: u32 = 1 << 26;
    /// CTRL: overrun interrupt enable
    pub const CTRL_ORIE: u32 = 1 << 27;
    /// CTRL: transmit data inversion
    pub const CTRL_TXINV: u32 = 1 << 28;
}

macro_rules! peripheral_tokens {
    ($($(#[$doc:meta])* $NAME:ident: ($block:path, $addr:literal),)+) => {
        $(
            $(#[$doc])*
            pub struct $NAME {
                _marker: PhantomData<*const ()>,
            }

            unsafe impl Send for $NAME {}

            impl $NAME {
                /// Pointer to the register block
                pub const PTR: *const $block = $addr as *const _;

                /// Create an instance out of thin air.
                ///
                /// # Safety
                ///
                /// This bypasses the ownership tracking of [`Peripherals`];
                /// the caller must ensure no other instance is in use.
                #[inline]
                pub unsafe fn steal() -> Self {
                    Self { _marker: PhantomData }
                }
            }

            impl Deref for $NAME {
                type Target = $block;

                #[inline]
                fn deref(&self) -> &Self::Target {
                    unsafe { &*Self::PTR }
                }
            }

            impl crate::Sealed for $NAME {}
        )+

        /// All owned peripheral instances, handed out once by [`Peripherals::take`]
        #[allow(non_snake_case)]
        pub struct Peripherals {
            $(
                $(#[$doc])*
                pub $NAME: $NAME,
            )+
        }

        impl Peripherals {
            /// Returns all the peripheral singletons, the first time it is called
            pub fn take() -> Option<Self> {
                critical_section::with(|_| {
                    if unsafe { DEVICE_PERIPHERALS } {
                        None
                    } else {
                        Some(unsafe { Peripherals::steal() })
                    }
                })
            }

            /// Unchecked version of [`Peripherals::take`]
            ///
            /// # Safety
            ///
            /// Each of the returned peripherals must be used at most once.
            #[inline]
            pub unsafe fn steal() -> Self {
                DEVICE_PERIPHERALS = true;
                Peripherals {
                    $($NAME: $NAME::steal(),)+
                }
            }
        }
    };
}

static mut DEVICE_PERIPHERALS: bool = false;

peripheral_tokens! {
    /// GPIO port A
    PTA: (gpio::RegisterBlock, 0x400F_F000),
    /// GPIO port B
    PTB: (gpio::RegisterBlock, 0x400F_F040),
    /// GPIO port C
    PTC: (gpio::RegisterBlock, 0x400F_F080),
    /// GPIO port D
    PTD: (gpio::RegisterBlock, 0x400F_F0C0),
    /// GPIO port E
    PTE: (gpio::RegisterBlock, 0x400F_F100),
    /// Pin control, port A
    PORTA: (port::RegisterBlock, 0x4004_9000),
    /// Pin control, port B
    PORTB: (port::RegisterBlock, 0x4004_A000),
    /// Pin control, port C
    PORTC: (port::RegisterBlock, 0x4004_B000),
    /// Pin control, port D
    PORTD: (port::RegisterBlock, 0x4004_C000),
    /// Pin control, port E
    PORTE: (port::RegisterBlock, 0x4004_D000),
    /// Peripheral Clock Controller
    PCC: (pcc::RegisterBlock, 0x4006_5000),
    /// System Clock Generator
    SCG: (scg::RegisterBlock, 0x4006_4000),
    /// Low Power UART 0
    LPUART0: (lpuart::RegisterBlock, 0x4006_A000),
    /// Low Power UART 1
    LPUART1: (lpuart::RegisterBlock, 0x4006_B000),
    /// Low Power UART 2
    LPUART2: (lpuart::RegisterBlock, 0x4006_C000),
}

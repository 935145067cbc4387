use bitflags::bitflags;

use super::{Bus, Cpu};

/// Interrupt flag register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// T-cycles spent dispatching an interrupt.
pub const INTERRUPT_DISPATCH_CYCLES: u32 = 20;

bitflags! {
    /// The five interrupt sources, laid out as in IF and IE.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Interrupt {
    /// Sources in service priority order.
    pub const PRIORITY: [Interrupt; 5] = [
        Interrupt::VBLANK,
        Interrupt::STAT,
        Interrupt::TIMER,
        Interrupt::SERIAL,
        Interrupt::JOYPAD,
    ];

    /// Service routine address for a single source.
    pub fn vector(self) -> u16 {
        0x0040 + 8 * self.bits().trailing_zeros() as u16
    }
}

impl Cpu {
    /// Sources that are both requested in IF and enabled in IE.
    pub(super) fn pending_interrupts<B: Bus>(&self, bus: &mut B) -> Interrupt {
        let requested = bus.read8(IF_ADDR);
        let enabled = bus.read8(IE_ADDR);
        Interrupt::from_bits_truncate(requested & enabled)
    }

    /// Service at most one pending interrupt.
    ///
    /// Does nothing unless IME is set. Returns the dispatch cost when an
    /// interrupt was taken.
    pub fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime {
            return None;
        }

        let pending = self.pending_interrupts(bus);
        let source = Interrupt::PRIORITY
            .into_iter()
            .find(|source| pending.contains(*source))?;

        let requested = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, requested & !source.bits());

        self.halted = false;
        self.stopped = false;
        self.ime = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = source.vector();

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            source,
            self.regs.pc,
            pc,
            self.regs.sp,
        );

        Some(INTERRUPT_DISPATCH_CYCLES)
    }
}

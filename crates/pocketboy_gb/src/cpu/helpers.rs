use super::{Bus, Cond, Cpu, Flag, Operand};

impl Cpu {
    /// Read an 8-bit operand: a register, or the byte addressed by HL.
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(r) => self.regs.get8(r),
            Operand::HlInd => bus.read8(self.regs.hl.pair()),
        }
    }

    #[inline]
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(r) => self.regs.set8(r, value),
            Operand::HlInd => bus.write8(self.regs.hl.pair(), value),
        }
    }

    /// The 8-bit immediate of a two-byte instruction.
    ///
    /// PC already points past the instruction, so the operand is the byte
    /// just behind it.
    #[inline]
    pub(super) fn imm8<B: Bus>(&self, bus: &mut B) -> u8 {
        bus.read8(self.regs.pc.wrapping_sub(1))
    }

    /// The 16-bit little-endian immediate of a three-byte instruction.
    #[inline]
    pub(super) fn imm16<B: Bus>(&self, bus: &mut B) -> u16 {
        bus.read16(self.regs.pc.wrapping_sub(2))
    }

    #[inline]
    pub(crate) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        // Stack grows downward; memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write16(self.regs.sp, value);
    }

    #[inline]
    pub(crate) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    #[inline]
    pub(super) fn condition(&self, cc: Cond) -> bool {
        match cc {
            Cond::NZ => !self.get_flag(Flag::Z),
            Cond::Z => self.get_flag(Flag::Z),
            Cond::NC => !self.get_flag(Flag::C),
            Cond::C => self.get_flag(Flag::C),
        }
    }
}

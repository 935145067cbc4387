use super::table::{AluOp, ShiftOp};
use super::{Cpu, Flag};

impl Cpu {
    /// Apply one of the eight accumulator operations to A and `value`.
    ///
    /// All four flags are recomputed; CP discards the result.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a();
        let carry = self.get_flag(Flag::C);
        let result = match op {
            AluOp::Add => self.add8(a, value, false),
            AluOp::Adc => self.add8(a, value, carry),
            AluOp::Sub => self.sub8(a, value, false),
            AluOp::Sbc => self.sub8(a, value, carry),
            AluOp::Cp => {
                self.sub8(a, value, false);
                a
            }
            AluOp::And => {
                let r = a & value;
                self.set_flags(r == 0, false, true, false);
                r
            }
            AluOp::Xor => {
                let r = a ^ value;
                self.set_flags(r == 0, false, false, false);
                r
            }
            AluOp::Or => {
                let r = a | value;
                self.set_flags(r == 0, false, false, false);
                r
            }
        };
        self.regs.set_a(result);
    }

    fn add8(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let c = carry_in as u8;
        let full = a as u16 + b as u16 + c as u16;
        let half = (a & 0x0F) + (b & 0x0F) + c;
        let result = full as u8;
        self.set_flags(result == 0, false, half > 0x0F, full > 0xFF);
        result
    }

    fn sub8(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let c = carry_in as i16;
        let full = a as i16 - b as i16 - c;
        let half = (a & 0x0F) as i16 - (b & 0x0F) as i16 - c;
        let result = full as u8;
        self.set_flags(result == 0, true, half < 0, full < 0);
        result
    }

    /// INC r / INC (HL). C is left untouched.
    pub(super) fn inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, false, value & 0x0F == 0x0F, carry);
        result
    }

    /// DEC r / DEC (HL). C is left untouched.
    pub(super) fn dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, true, value & 0x0F == 0, carry);
        result
    }

    /// ADD HL,rr: Z is preserved, H comes from bit 11 and C from bit 15.
    pub(super) fn add_hl(&mut self, value: u16) {
        let hl = self.regs.hl.pair();
        let zero = self.get_flag(Flag::Z);
        let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        let carry = hl as u32 + value as u32 > 0xFFFF;
        self.set_flags(zero, false, half, carry);
        self.regs.hl.set_pair(hl.wrapping_add(value));
    }

    /// SP plus a signed 8-bit offset, shared by ADD SP,r8 and LD HL,SP+r8.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte addition.
    pub(super) fn sp_offset(&mut self, offset: u8) -> u16 {
        let sp = self.regs.sp;
        let half = (sp & 0x000F) + (offset as u16 & 0x000F) > 0x000F;
        let carry = (sp & 0x00FF) + offset as u16 > 0x00FF;
        self.set_flags(false, false, half, carry);
        sp.wrapping_add(offset as i8 as u16)
    }

    /// Decimal adjust after a BCD addition or subtraction.
    ///
    /// N is kept, H is cleared, and C is set when a 0x60 correction applies.
    pub(super) fn daa(&mut self) {
        let a = self.regs.a();
        let subtract = self.get_flag(Flag::N);
        let mut correction = 0u8;
        let mut carry = false;

        if self.get_flag(Flag::H) || (!subtract && a & 0x0F > 0x09) {
            correction |= 0x06;
        }
        if self.get_flag(Flag::C) || (!subtract && a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        let result = if subtract {
            a.wrapping_sub(correction)
        } else {
            a.wrapping_add(correction)
        };
        self.set_flags(result == 0, subtract, false, carry);
        self.regs.set_a(result);
    }

    /// Rotate or shift `value` as the CB-prefixed instructions do.
    pub(super) fn shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C) as u8;
        let (result, carry) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => (value << 1 | carry_in, value & 0x80 != 0),
            ShiftOp::Rr => (value >> 1 | carry_in << 7, value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => (value >> 1 | value & 0x80, value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        };
        self.set_flags(result == 0, false, false, carry);
        result
    }

    /// BIT n: Z reflects the tested bit, H is set, C is preserved.
    pub(super) fn test_bit(&mut self, bit: u8, value: u8) {
        let carry = self.get_flag(Flag::C);
        self.set_flags(value & (1 << bit) == 0, false, true, carry);
    }
}

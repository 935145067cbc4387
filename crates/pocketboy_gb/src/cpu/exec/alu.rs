use crate::cpu::{AluOp, Bus, Cpu, Flag, Operand, Reg16, ShiftOp};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: Operand) -> u32 {
        let value = self.read_operand(bus, src);
        self.alu(op, value);
        0
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let value = self.imm8(bus);
        self.alu(op, value);
        0
    }

    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, target: Operand) -> u32 {
        let value = self.read_operand(bus, target);
        let result = self.inc8(value);
        self.write_operand(bus, target, result);
        0
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, target: Operand) -> u32 {
        let value = self.read_operand(bus, target);
        let result = self.dec8(value);
        self.write_operand(bus, target, result);
        0
    }

    pub(super) fn exec_inc16(&mut self, rr: Reg16) -> u32 {
        let value = self.regs.get16(rr).wrapping_add(1);
        self.regs.set16(rr, value);
        0
    }

    pub(super) fn exec_dec16(&mut self, rr: Reg16) -> u32 {
        let value = self.regs.get16(rr).wrapping_sub(1);
        self.regs.set16(rr, value);
        0
    }

    pub(super) fn exec_add_hl(&mut self, rr: Reg16) -> u32 {
        let value = self.regs.get16(rr);
        self.add_hl(value);
        0
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.imm8(bus);
        self.regs.sp = self.sp_offset(offset);
        0
    }

    pub(super) fn exec_rotate_a(&mut self, rot: ShiftOp) -> u32 {
        let a = self.regs.a();
        let result = self.shift(rot, a);
        self.regs.set_a(result);
        self.set_flag(Flag::Z, false);
        0
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.daa();
        0
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        let a = self.regs.a();
        self.regs.set_a(!a);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        0
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        0
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        0
    }
}

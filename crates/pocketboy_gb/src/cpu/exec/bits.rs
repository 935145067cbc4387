use crate::cpu::{Bus, Cpu, Operand, ShiftOp};

impl Cpu {
    pub(super) fn exec_shift<B: Bus>(&mut self, bus: &mut B, op: ShiftOp, target: Operand) -> u32 {
        let value = self.read_operand(bus, target);
        let result = self.shift(op, value);
        self.write_operand(bus, target, result);
        0
    }

    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Operand) -> u32 {
        let value = self.read_operand(bus, target);
        self.test_bit(bit, value);
        0
    }

    pub(super) fn exec_res<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Operand) -> u32 {
        let value = self.read_operand(bus, target);
        self.write_operand(bus, target, value & !(1 << bit));
        0
    }

    pub(super) fn exec_set<B: Bus>(&mut self, bus: &mut B, bit: u8, target: Operand) -> u32 {
        let value = self.read_operand(bus, target);
        self.write_operand(bus, target, value | (1 << bit));
        0
    }
}

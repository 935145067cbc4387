use crate::cpu::{Bus, Cond, Cpu, Reg16};

/// Extra cost of a taken conditional call or return.
const STACK_BRANCH_TAKEN: u32 = 12;

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, rr: Reg16) -> u32 {
        let value = self.regs.get16(rr);
        self.push_u16(bus, value);
        0
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, rr: Reg16) -> u32 {
        let value = self.pop_u16(bus);
        // POP AF drops the low nibble of F through `set16`.
        self.regs.set16(rr, value);
        0
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        let target = self.imm16(bus);
        match self.branch(cc, STACK_BRANCH_TAKEN) {
            Some(extra) => {
                let ret = self.regs.pc;
                self.push_u16(bus, ret);
                self.regs.pc = target;
                extra
            }
            None => 0,
        }
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        match self.branch(cc, STACK_BRANCH_TAKEN) {
            Some(extra) => {
                self.regs.pc = self.pop_u16(bus);
                extra
            }
            None => 0,
        }
    }

    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        0
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u16) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector;
        0
    }
}

use crate::cpu::{Bus, Cond, Cpu};

/// Extra cost of a taken conditional relative or absolute jump.
const JUMP_TAKEN: u32 = 4;

impl Cpu {
    /// Evaluate an optional branch condition. Unconditional forms always
    /// pass and never add cycles, since their table cost already covers it.
    #[inline]
    pub(super) fn branch(&self, cc: Option<Cond>, taken_cost: u32) -> Option<u32> {
        match cc {
            None => Some(0),
            Some(cc) if self.condition(cc) => Some(taken_cost),
            Some(_) => None,
        }
    }

    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        let offset = self.imm8(bus) as i8;
        match self.branch(cc, JUMP_TAKEN) {
            Some(extra) => {
                self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
                extra
            }
            None => 0,
        }
    }

    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cc: Option<Cond>) -> u32 {
        let target = self.imm16(bus);
        match self.branch(cc, JUMP_TAKEN) {
            Some(extra) => {
                self.regs.pc = target;
                extra
            }
            None => 0,
        }
    }

    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl.pair();
        0
    }
}

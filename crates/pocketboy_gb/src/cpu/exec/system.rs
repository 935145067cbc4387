use crate::cpu::Cpu;

impl Cpu {
    pub(super) fn exec_stop(&mut self) -> u32 {
        // The padding byte after STOP is covered by the instruction length.
        log::debug!("GB CPU: STOP at PC=0x{:04X}", self.regs.pc.wrapping_sub(2));
        self.stopped = true;
        self.halted = false;
        0
    }

    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        0
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        0
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        // Takes effect immediately; the one-instruction delay is not modelled.
        self.ime = true;
        0
    }
}

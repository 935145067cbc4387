use crate::cpu::{Bus, Cpu, Indirect, Operand, Reg16};

impl Cpu {
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Operand, src: Operand) -> u32 {
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
        0
    }

    pub(super) fn exec_ld_d8<B: Bus>(&mut self, bus: &mut B, dst: Operand) -> u32 {
        let value = self.imm8(bus);
        self.write_operand(bus, dst, value);
        0
    }

    pub(super) fn exec_ld_d16<B: Bus>(&mut self, bus: &mut B, rr: Reg16) -> u32 {
        let value = self.imm16(bus);
        self.regs.set16(rr, value);
        0
    }

    /// Resolve an indirect operand, applying the HL post-increment or
    /// post-decrement.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc.pair(),
            Indirect::DE => self.regs.de.pair(),
            Indirect::HLInc => {
                let hl = self.regs.hl.pair();
                self.regs.hl.set_pair(hl.wrapping_add(1));
                hl
            }
            Indirect::HLDec => {
                let hl = self.regs.hl.pair();
                self.regs.hl.set_pair(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_store_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a());
        0
    }

    pub(super) fn exec_load_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        let value = bus.read8(addr);
        self.regs.set_a(value);
        0
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.imm16(bus);
        bus.write16(addr, self.regs.sp);
        0
    }

    pub(super) fn exec_ldh_store<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = 0xFF00 | self.imm8(bus) as u16;
        bus.write8(addr, self.regs.a());
        0
    }

    pub(super) fn exec_ldh_load<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = 0xFF00 | self.imm8(bus) as u16;
        let value = bus.read8(addr);
        self.regs.set_a(value);
        0
    }

    pub(super) fn exec_ldh_store_c<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = 0xFF00 | self.regs.bc.low() as u16;
        bus.write8(addr, self.regs.a());
        0
    }

    pub(super) fn exec_ldh_load_c<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = 0xFF00 | self.regs.bc.low() as u16;
        let value = bus.read8(addr);
        self.regs.set_a(value);
        0
    }

    pub(super) fn exec_store_a_abs<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.imm16(bus);
        bus.write8(addr, self.regs.a());
        0
    }

    pub(super) fn exec_load_a_abs<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.imm16(bus);
        let value = bus.read8(addr);
        self.regs.set_a(value);
        0
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl.pair();
        0
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.imm8(bus);
        let value = self.sp_offset(offset);
        self.regs.hl.set_pair(value);
        0
    }
}

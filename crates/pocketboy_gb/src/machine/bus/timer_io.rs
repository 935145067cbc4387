use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read_timer_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => self.timer.div,
            0xFF05 => self.timer.tima,
            0xFF06 => self.timer.tma,
            _ => self.timer.read_tac(),
        }
    }

    pub(super) fn write_timer_register(&mut self, addr: u16, value: u8) {
        match addr {
            // Any write clears DIV.
            0xFF04 => self.timer.write_div(),
            0xFF05 => self.timer.tima = value,
            0xFF06 => self.timer.tma = value,
            _ => self.timer.write_tac(value),
        }
    }

    pub(super) fn tick_timer(&mut self, cycles: u32) {
        self.timer.update(cycles, &mut self.if_reg);
    }
}

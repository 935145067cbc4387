use crate::cpu::Bus;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    /// Hand the cycles spent by the CPU to the timer, then the PPU.
    ///
    /// Zero-cycle steps (the CPU is in STOP) leave both frozen.
    fn tick(&mut self, cycles: u32) {
        if cycles == 0 {
            return;
        }
        self.tick_timer(cycles);
        self.ppu_update(cycles);
    }
}

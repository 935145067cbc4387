use super::super::{reg, GameBoyBus};

impl GameBoyBus {
    /// Write to the I/O page (0xFF00-0xFF7F), applying register side effects.
    pub(super) fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.write_joyp(value),
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value, &mut self.if_reg),
            0xFF04..=0xFF07 => self.write_timer_register(addr, value),
            0xFF0F => self.if_reg = value & 0x1F,
            0xFF10..=0xFF3F => self.apu.write(addr, value),
            0xFF40 => self.write_lcdc(value),
            0xFF41 => self.write_stat(value),
            // LY is read-only; writing resets it.
            0xFF44 => self.io[reg::LY] = 0,
            0xFF46 => self.oam_dma(value),
            _ => self.io[(addr - 0xFF00) as usize] = value,
        }
    }
}

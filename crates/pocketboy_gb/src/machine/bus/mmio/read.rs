use super::super::GameBoyBus;

impl GameBoyBus {
    /// Read from the I/O page (0xFF00-0xFF7F).
    pub(super) fn read_io(&self, addr: u16) -> u8 {
        match addr {
            0xFF01 => self.serial.sb,
            0xFF02 => self.serial.sc,
            0xFF04..=0xFF07 => self.read_timer_register(addr),
            // Only the lower 5 bits exist; the rest read as 1.
            0xFF0F => self.if_reg | 0b1110_0000,
            0xFF10..=0xFF3F => self.apu.read(addr),
            // JOYP, LCD registers and everything else are plain storage.
            _ => self.io[(addr - 0xFF00) as usize],
        }
    }
}

use super::super::{reg, GameBoyBus};
use super::{LcdMode, CYCLES_PER_SCANLINE};

impl GameBoyBus {
    pub(in super::super) fn write_lcdc(&mut self, value: u8) {
        let was_enabled = self.lcd_enabled();
        self.io[reg::LCDC] = value;
        let now_enabled = self.lcd_enabled();

        if was_enabled && !now_enabled {
            // LY, the line countdown and the STAT mode all restart from the
            // top of the frame while the LCD is off.
            self.io[reg::LY] = 0;
            self.ppu.countdown = CYCLES_PER_SCANLINE;
            self.io[reg::STAT] = (self.io[reg::STAT] & !0x03) | LcdMode::HBlank as u8;
            log::debug!("GB PPU: LCD off");
        } else if !was_enabled && now_enabled {
            self.ppu.countdown = CYCLES_PER_SCANLINE;
            log::debug!("GB PPU: LCD on");
        }
    }

    pub(in super::super) fn write_stat(&mut self, value: u8) {
        // Only the interrupt selects (bits 3-6) are writable.
        let stat = self.io[reg::STAT];
        self.io[reg::STAT] = (stat & !0x78) | (value & 0x78);
    }
}

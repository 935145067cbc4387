use crate::cpu::Interrupt;

use super::super::{reg, GameBoyBus};
use super::{
    LcdMode, CYCLES_PER_SCANLINE, LAST_LINE, OAM_SCAN_CYCLES, TRANSFER_CYCLES, VBLANK_LINE,
};

impl GameBoyBus {
    /// Advance the pixel engine by `cycles` T-cycles.
    ///
    /// Does nothing while the LCD is off.
    pub(in super::super) fn ppu_update(&mut self, cycles: u32) {
        if !self.lcd_enabled() {
            return;
        }

        self.ppu.countdown -= cycles as i32;
        if self.ppu.countdown <= 0 {
            self.ppu.countdown += CYCLES_PER_SCANLINE;

            let ly = match self.io[reg::LY] {
                ly if ly >= LAST_LINE => 0,
                ly => ly + 1,
            };
            self.io[reg::LY] = ly;

            if ly < VBLANK_LINE {
                self.render_scanline(ly);
            } else if ly == VBLANK_LINE {
                self.if_reg |= Interrupt::VBLANK.bits();
                self.ppu.frame_ready = true;
                log::debug!("GB PPU: VBlank, IF=0x{:02X}", self.if_reg);
            }
        }

        self.update_lcd_status();
    }

    /// Mode implied by LY and the position within the current line.
    fn current_mode(&self) -> LcdMode {
        let countdown = self.ppu.countdown;
        if self.io[reg::LY] >= VBLANK_LINE {
            LcdMode::VBlank
        } else if countdown > CYCLES_PER_SCANLINE - OAM_SCAN_CYCLES {
            LcdMode::OamScan
        } else if countdown > CYCLES_PER_SCANLINE - OAM_SCAN_CYCLES - TRANSFER_CYCLES {
            LcdMode::Transfer
        } else {
            LcdMode::HBlank
        }
    }

    /// Store the mode and coincidence bits in STAT and request INT $48.
    ///
    /// A mode change requests the interrupt when the select bit for the new
    /// mode (STAT bit mode+3) is set; entering pixel transfer never does.
    /// LY=LYC requests it on every update while STAT bit 6 is set.
    fn update_lcd_status(&mut self) {
        let stat = self.io[reg::STAT];
        let ly = self.io[reg::LY];
        let mode = self.current_mode();

        let mut request = false;
        if mode as u8 != stat & 0x03
            && mode != LcdMode::Transfer
            && stat & (1 << (mode as u8 + 3)) != 0
        {
            request = true;
        }

        let coincidence = ly == self.io[reg::LYC];
        if coincidence && stat & 0x40 != 0 {
            request = true;
        }

        if request {
            self.if_reg |= Interrupt::STAT.bits();
            log::trace!("GB PPU: STAT interrupt (STAT=0x{stat:02X} LY={ly} mode={mode:?})");
        }

        let mut next = (stat & !0x07) | mode as u8;
        if coincidence {
            next |= 0x04;
        }
        self.io[reg::STAT] = next;
    }
}

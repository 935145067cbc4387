//! Address decoding for the whole 16-bit space.
//!
//! Every address falls into exactly one arm; the I/O page is handed on to
//! the register handlers in `read`/`write`.

mod read;
mod write;

use super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => match &self.cartridge {
                Some(cart) => cart.rom_read(addr),
                // Open bus with no cartridge inserted.
                None => 0xFF,
            },
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xA000..=0xBFFF => match &self.cartridge {
                Some(cart) => cart.ram_read(addr),
                None => 0xFF,
            },
            0xC000..=0xDFFF => self.wram[self.wram_index(addr)],
            // Echo of 0xC000-0xDDFF.
            0xE000..=0xFDFF => self.wram[self.wram_index(addr - 0x2000)],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            0xFEA0..=0xFEFF => 0x00,
            0xFF00..=0xFF7F => self.read_io(addr),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.ie_reg,
        }
    }

    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.rom_write(addr, value);
                }
            }
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.ram_write(addr, value);
                }
            }
            0xC000..=0xDFFF => {
                let index = self.wram_index(addr);
                self.wram[index] = value;
            }
            0xE000..=0xFDFF => {
                let index = self.wram_index(addr - 0x2000);
                self.wram[index] = value;
            }
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            0xFEA0..=0xFEFF => {}
            0xFF00..=0xFF7F => self.write_io(addr, value),
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.ie_reg = value,
        }
    }
}

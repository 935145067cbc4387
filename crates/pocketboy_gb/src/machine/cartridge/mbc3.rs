use super::{ram_index, rom_index, ROM_BANK_SIZE};

/// What the 0xA000-0xBFFF window currently maps.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum RamWindow {
    Bank(u8),
    /// One of the five clock registers (0x08-0x0C).
    Rtc(usize),
}

/// MBC3 cartridge state.
///
/// The real-time clock registers are plain storage: there is no wall clock
/// behind them, so games see whatever they last wrote.
pub(in super::super) struct Mbc3Cartridge {
    pub(super) rom: Vec<u8>,
    pub(super) ram: Vec<u8>,
    rom_bank: u8,
    window: RamWindow,
    ram_enable: bool,
    rtc: [u8; 5],
    /// Last value written to the latch register (0x6000-0x7FFF).
    latch: u8,
}

impl Mbc3Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram: Vec<u8>) -> Self {
        Self {
            rom,
            ram,
            rom_bank: 1,
            window: RamWindow::Bank(0),
            ram_enable: false,
            rtc: [0; 5],
            latch: 0xFF,
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < ROM_BANK_SIZE as u16 {
            0
        } else {
            self.rom_bank as usize
        };
        self.rom[rom_index(self.rom.len(), bank, addr)]
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            // RAM and clock enable.
            0x0000..=0x1FFF => {
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                self.rom_bank = match value & 0x7F {
                    0 => 1,
                    n => n,
                };
                log::debug!("GB MBC3: ROM bank -> {}", self.rom_bank);
            }
            0x4000..=0x5FFF => match value {
                0x00..=0x03 => self.window = RamWindow::Bank(value),
                0x08..=0x0C => self.window = RamWindow::Rtc((value - 0x08) as usize),
                _ => {}
            },
            0x6000..=0x7FFF => {
                if self.latch == 0x00 && value == 0x01 {
                    log::trace!("GB MBC3: RTC latched {:02X?}", self.rtc);
                }
                self.latch = value;
            }
            _ => {}
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0;
        }
        match self.window {
            RamWindow::Bank(_) if self.ram.is_empty() => 0,
            RamWindow::Bank(bank) => self.ram[ram_index(self.ram.len(), bank as usize, addr)],
            RamWindow::Rtc(reg) => self.rtc[reg],
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        match self.window {
            RamWindow::Bank(_) if self.ram.is_empty() => {}
            RamWindow::Bank(bank) => {
                let index = ram_index(self.ram.len(), bank as usize, addr);
                self.ram[index] = value;
            }
            RamWindow::Rtc(reg) => self.rtc[reg] = value,
        }
    }
}

use super::{ram_index, rom_index, ROM_BANK_SIZE};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum BankingMode {
    /// Upper register bits extend the ROM bank number.
    Rom,
    /// Upper register bits select the RAM bank.
    Ram,
}

/// MBC1 cartridge state.
///
/// 0x2000-0x3FFF selects the low 5 bits of the ROM bank (0 maps to 1);
/// 0x4000-0x5FFF feeds two more bits into either the ROM bank or the RAM
/// bank depending on the mode chosen at 0x6000-0x7FFF.
pub(in super::super) struct Mbc1Cartridge {
    pub(super) rom: Vec<u8>,
    pub(super) ram: Vec<u8>,
    rom_bank: u8,
    ram_bank: u8,
    ram_enable: bool,
    mode: BankingMode,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram: Vec<u8>) -> Self {
        Self {
            rom,
            ram,
            rom_bank: 1,
            ram_bank: 0,
            ram_enable: false,
            mode: BankingMode::Rom,
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
            0x0000..=0x1FFF => {
                self.ram_enable = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                let low = match value & 0x1F {
                    0 => 1,
                    n => n,
                };
                self.rom_bank = (self.rom_bank & 0x60) | low;
                log::debug!("GB MBC1: ROM bank -> {}", self.rom_bank);
            }
            0x4000..=0x5FFF => {
                let bits = value & 0x03;
                match self.mode {
                    BankingMode::Ram => self.ram_bank = bits,
                    BankingMode::Rom => self.rom_bank = (bits << 5) | (self.rom_bank & 0x1F),
                }
                log::debug!(
                    "GB MBC1: upper bank bits -> {bits} ({:?} mode)",
                    self.mode
                );
            }
            0x6000..=0x7FFF => {
                self.mode = if value != 0 {
                    BankingMode::Ram
                } else {
                    BankingMode::Rom
                };
            }
            _ => {}
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable || self.ram.is_empty() {
            return 0;
        }
        self.ram[ram_index(self.ram.len(), self.ram_bank as usize, addr)]
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enable || self.ram.is_empty() {
            return;
        }
        let index = ram_index(self.ram.len(), self.ram_bank as usize, addr);
        self.ram[index] = value;
    }
}

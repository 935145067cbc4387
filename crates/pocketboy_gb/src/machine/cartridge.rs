mod header;
mod mbc1;
mod mbc3;

use anyhow::Result;

pub use header::{CartridgeHeader, MapperKind};
use mbc1::Mbc1Cartridge;
use mbc3::Mbc3Cartridge;

const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// Offset into a ROM image for `addr` within the given 16 KiB bank.
///
/// Bank numbers past the end of the image wrap around, as the unconnected
/// upper bank lines would on hardware.
fn rom_index(rom_len: usize, bank: usize, addr: u16) -> usize {
    let banks = (rom_len / ROM_BANK_SIZE).max(1);
    (bank % banks) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1))
}

/// Offset into external RAM for `addr` within the given 8 KiB bank.
///
/// `ram_len` must be non-zero. 2 KiB chips mirror across the window.
fn ram_index(ram_len: usize, bank: usize, addr: u16) -> usize {
    (bank * RAM_BANK_SIZE + (addr as usize & (RAM_BANK_SIZE - 1))) % ram_len
}

/// Cartridge without a bank controller: 32 KiB of ROM and at most 8 KiB of
/// RAM, both always mapped.
pub(super) struct NoMbcCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl NoMbcCartridge {
    fn rom_read(&self, addr: u16) -> u8 {
        self.rom[rom_index(self.rom.len(), (addr as usize) / ROM_BANK_SIZE, addr)]
    }

    fn ram_read(&self, addr: u16) -> u8 {
        if self.ram.is_empty() {
            return 0;
        }
        self.ram[ram_index(self.ram.len(), 0, addr)]
    }

    fn ram_write(&mut self, addr: u16, value: u8) {
        if self.ram.is_empty() {
            return;
        }
        let index = ram_index(self.ram.len(), 0, addr);
        self.ram[index] = value;
    }
}

/// Cartridge controller selected from the header at load time.
pub(super) enum Cartridge {
    NoMbc(NoMbcCartridge),
    Mbc1(Mbc1Cartridge),
    Mbc3(Mbc3Cartridge),
}

impl Cartridge {
    /// Build a cartridge from a raw ROM image and, optionally, previously
    /// saved external RAM.
    ///
    /// The ROM is resized to the size declared in the header; saved RAM is
    /// copied in up to the declared RAM size.
    pub(super) fn from_rom(
        rom: &[u8],
        saved_ram: Option<&[u8]>,
    ) -> Result<(Self, CartridgeHeader)> {
        let header = CartridgeHeader::parse(rom)?;

        let mut rom = rom.to_vec();
        if rom.len() != header.rom_size {
            log::warn!(
                "GB cartridge: ROM image is {} bytes but header declares {}; resizing",
                rom.len(),
                header.rom_size
            );
            rom.resize(header.rom_size, 0);
        }

        let mut ram = vec![0u8; header.ram_size];
        if let Some(saved) = saved_ram {
            let len = saved.len().min(ram.len());
            ram[..len].copy_from_slice(&saved[..len]);
            if saved.len() != ram.len() {
                log::warn!(
                    "GB cartridge: save is {} bytes, expected {}",
                    saved.len(),
                    ram.len()
                );
            }
        }

        let cart = match header.mapper {
            MapperKind::None => Cartridge::NoMbc(NoMbcCartridge { rom, ram }),
            MapperKind::Mbc1 => Cartridge::Mbc1(Mbc1Cartridge::new(rom, ram)),
            MapperKind::Mbc3 => Cartridge::Mbc3(Mbc3Cartridge::new(rom, ram)),
        };

        log::info!(
            "GB cartridge: '{}' {:?}, ROM {} KiB, RAM {} KiB, CGB flag {}",
            header.title,
            header.mapper,
            header.rom_size / 1024,
            header.ram_size / 1024,
            header.cgb,
        );

        Ok((cart, header))
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::NoMbc(c) => c.rom_read(addr),
            Cartridge::Mbc1(c) => c.rom_read(addr),
            Cartridge::Mbc3(c) => c.rom_read(addr),
        }
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match self {
            // ROM is read-only without a controller.
            Cartridge::NoMbc(_) => {}
            Cartridge::Mbc1(c) => c.rom_write(addr, value),
            Cartridge::Mbc3(c) => c.rom_write(addr, value),
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::NoMbc(c) => c.ram_read(addr),
            Cartridge::Mbc1(c) => c.ram_read(addr),
            Cartridge::Mbc3(c) => c.ram_read(addr),
        }
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::NoMbc(c) => c.ram_write(addr, value),
            Cartridge::Mbc1(c) => c.ram_write(addr, value),
            Cartridge::Mbc3(c) => c.ram_write(addr, value),
        }
    }

    /// Raw external RAM, as persisted to a save file.
    pub(super) fn ram(&self) -> &[u8] {
        match self {
            Cartridge::NoMbc(c) => &c.ram,
            Cartridge::Mbc1(c) => &c.ram,
            Cartridge::Mbc3(c) => &c.ram,
        }
    }
}

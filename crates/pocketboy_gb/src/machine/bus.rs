use anyhow::Result;

use super::{
    cartridge::{Cartridge, CartridgeHeader},
    serial::Serial,
    timer::Timer,
    GameBoyModel,
};

mod apu;
mod dma;
mod init;
mod joypad;
mod mmio;
mod ppu;
mod timer_io;
mod traits;

use apu::Apu;
pub use joypad::Button;
use joypad::Joypad;
use ppu::Ppu;
pub use ppu::Rgb;

const VRAM_SIZE: usize = 0x2000;
/// Eight 4 KiB banks; DMG software only ever sees the first two.
const WRAM_SIZE: usize = 0x8000;
const WRAM_BANK_SIZE: usize = 0x1000;
const OAM_SIZE: usize = 0xA0;
const IO_SIZE: usize = 0x80;
const HRAM_SIZE: usize = 0x7F;

/// Offsets into `io` for registers the bus and PPU consult directly.
pub(super) mod reg {
    pub const JOYP: usize = 0x00;
    pub const LCDC: usize = 0x40;
    pub const STAT: usize = 0x41;
    pub const SCY: usize = 0x42;
    pub const SCX: usize = 0x43;
    pub const LY: usize = 0x44;
    pub const LYC: usize = 0x45;
    pub const DMA: usize = 0x46;
    pub const BGP: usize = 0x47;
    pub const OBP0: usize = 0x48;
    pub const OBP1: usize = 0x49;
    pub const WY: usize = 0x4A;
    pub const WX: usize = 0x4B;
    pub const SVBK: usize = 0x70;
}

pub(crate) struct GameBoyBus {
    vram: [u8; VRAM_SIZE],
    wram: [u8; WRAM_SIZE],
    oam: [u8; OAM_SIZE],
    /// Plain storage for 0xFF00-0xFF7F; registers owned by the timer,
    /// serial port, audio unit and interrupt controller live elsewhere.
    io: [u8; IO_SIZE],
    hram: [u8; HRAM_SIZE],
    pub(crate) if_reg: u8,
    pub(crate) ie_reg: u8,
    cartridge: Option<Cartridge>,
    timer: Timer,
    pub(crate) serial: Serial,
    apu: Apu,
    joypad: Joypad,
    pub(crate) ppu: Ppu,
    model: GameBoyModel,
}

impl Default for GameBoyBus {
    fn default() -> Self {
        let mut bus = Self {
            vram: [0; VRAM_SIZE],
            wram: [0; WRAM_SIZE],
            oam: [0; OAM_SIZE],
            io: [0; IO_SIZE],
            hram: [0; HRAM_SIZE],
            if_reg: 0,
            ie_reg: 0,
            cartridge: None,
            timer: Timer::new(),
            serial: Serial::default(),
            apu: Apu::default(),
            joypad: Joypad::default(),
            ppu: Ppu::default(),
            model: GameBoyModel::Dmg,
        };
        bus.apply_dmg_initial_io_state();
        bus
    }
}

impl GameBoyBus {
    pub(super) fn load_cartridge(
        &mut self,
        rom: &[u8],
        saved_ram: Option<&[u8]>,
    ) -> Result<CartridgeHeader> {
        let (cartridge, header) = Cartridge::from_rom(rom, saved_ram)?;
        self.cartridge = Some(cartridge);
        self.model = header.model();
        Ok(header)
    }

    pub(super) fn model(&self) -> GameBoyModel {
        self.model
    }

    pub(super) fn cartridge_ram(&self) -> Option<&[u8]> {
        self.cartridge.as_ref().map(Cartridge::ram)
    }

    pub(super) fn lcd_enabled(&self) -> bool {
        self.io[reg::LCDC] & 0x80 != 0
    }

    /// Bank mapped at 0xD000-0xDFFF.
    fn wram_bank(&self) -> usize {
        match self.model {
            GameBoyModel::Cgb => match self.io[reg::SVBK] & 0x07 {
                0 => 1,
                n => n as usize,
            },
            GameBoyModel::Dmg => 1,
        }
    }

    /// Index into `wram` for an address in 0xC000-0xDFFF.
    fn wram_index(&self, addr: u16) -> usize {
        let offset = (addr - 0xC000) as usize;
        if offset < WRAM_BANK_SIZE {
            offset
        } else {
            self.wram_bank() * WRAM_BANK_SIZE + (offset - WRAM_BANK_SIZE)
        }
    }
}

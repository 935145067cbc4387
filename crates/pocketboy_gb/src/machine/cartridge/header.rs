use anyhow::{bail, Result};

use super::super::GameBoyModel;

/// The header occupies 0x0100..0x0150 of bank 0.
pub(super) const HEADER_END: usize = 0x150;

const TITLE: std::ops::Range<usize> = 0x134..0x143;
const CGB_FLAG: usize = 0x143;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;

/// Bank-switching controller named by header byte 0x0147.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MapperKind {
    /// Plain 32 KiB ROM, optionally with 8 KiB of RAM.
    None,
    Mbc1,
    Mbc3,
}

/// Fields of the cartridge header that select the controller and buffer
/// sizes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CartridgeHeader {
    pub title: String,
    pub mapper: MapperKind,
    /// ROM size in bytes.
    pub rom_size: usize,
    /// External RAM size in bytes (0 when the cartridge has none).
    pub ram_size: usize,
    /// Header advertises CGB support.
    pub cgb: bool,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            bail!(
                "ROM image is {} bytes, too short to hold a cartridge header",
                rom.len()
            );
        }

        let mapper = match rom[CARTRIDGE_TYPE] {
            0x00 | 0x08 | 0x09 => MapperKind::None,
            0x01..=0x03 => MapperKind::Mbc1,
            0x0F..=0x13 => MapperKind::Mbc3,
            other => bail!("unsupported cartridge type 0x{other:02X}"),
        };

        let rom_size = match rom[ROM_SIZE] {
            code @ 0x00..=0x08 => 0x8000 << code,
            0x52 => 0x12_0000,
            0x53 => 0x14_0000,
            0x54 => 0x18_0000,
            other => bail!("unsupported ROM size code 0x{other:02X}"),
        };

        let ram_size = match rom[RAM_SIZE] {
            0x00 => 0,
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x2_0000,
            0x05 => 0x1_0000,
            other => bail!("unsupported RAM size code 0x{other:02X}"),
        };

        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        Ok(Self {
            title,
            mapper,
            rom_size,
            ram_size,
            cgb: rom[CGB_FLAG] & 0x80 != 0,
        })
    }

    pub fn model(&self) -> GameBoyModel {
        if self.cgb {
            GameBoyModel::Cgb
        } else {
            GameBoyModel::Dmg
        }
    }
}

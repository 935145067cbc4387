mod bus;
mod cartridge;
mod gameboy;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use bus::{Button, Rgb};
pub use cartridge::{CartridgeHeader, MapperKind};
pub use gameboy::{GameBoy, SaveCallback};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum GameBoyModel {
    #[default]
    Dmg,
    /// Colour-capable cartridge (header byte 0x0143 bit 7).
    ///
    /// Only the switchable WRAM bank register follows CGB behaviour; the
    /// picture is still produced with the four DMG shades.
    Cgb,
}

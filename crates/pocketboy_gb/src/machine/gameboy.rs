use anyhow::Result;

use crate::cpu::{Bus, Cpu};
use crate::CYCLES_PER_FRAME;

use super::{Button, CartridgeHeader, GameBoyBus, GameBoyModel, Rgb};

/// Receives the raw external RAM whenever [`GameBoy::save`] is called.
pub type SaveCallback = Box<dyn FnMut(&[u8])>;

/// High-level Game Boy machine.
///
/// Owns the CPU and the bus (and through it the timer, PPU and cartridge),
/// and drives them in lockstep one instruction at a time.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    save_callback: Option<SaveCallback>,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    /// A powered-on machine in the post-boot state, with no cartridge.
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::default(),
            save_callback: None,
        }
    }

    /// Restore the post-boot state and drop the cartridge. The save callback
    /// is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus = GameBoyBus::default();
    }

    /// Insert a cartridge built from `rom`, restoring external RAM from
    /// `saved_ram` when given.
    ///
    /// Fails when the header names an unsupported controller, ROM size or RAM
    /// size. The machine state is left untouched in that case.
    pub fn load_rom(
        &mut self,
        rom: &[u8],
        saved_ram: Option<&[u8]>,
    ) -> Result<CartridgeHeader> {
        let header = self.bus.load_cartridge(rom, saved_ram)?;
        log::info!("GB: running as {:?}", self.bus.model());
        Ok(header)
    }

    pub fn model(&self) -> GameBoyModel {
        self.bus.model()
    }

    pub fn set_save_callback(&mut self, callback: SaveCallback) {
        self.save_callback = Some(callback);
    }

    /// Hand the cartridge's external RAM to the save callback.
    ///
    /// Nothing happens without a callback, a cartridge, or cartridge RAM.
    pub fn save(&mut self) {
        let Some(callback) = self.save_callback.as_mut() else {
            return;
        };
        match self.bus.cartridge_ram() {
            Some(ram) if !ram.is_empty() => {
                log::info!("GB: saving {} bytes of cartridge RAM", ram.len());
                callback(ram);
            }
            _ => log::debug!("GB: nothing to save"),
        }
    }

    /// Execute one instruction, let the timer and PPU catch up, then service
    /// at most one interrupt. Returns the T-cycles consumed.
    pub fn step(&mut self) -> u32 {
        let mut cycles = self.cpu.step(&mut self.bus);
        self.bus.tick(cycles);

        if let Some(dispatch) = self.cpu.handle_interrupts(&mut self.bus) {
            self.bus.tick(dispatch);
            cycles += dispatch;
        }
        cycles
    }

    /// Run until the PPU enters vertical blank.
    ///
    /// With the LCD off this returns after one frame's worth of cycles, and
    /// it returns straight away while the CPU is in STOP. Returns the
    /// T-cycles consumed.
    pub fn run_frame(&mut self) -> u32 {
        self.bus.ppu.take_frame_ready();
        let mut elapsed = 0u32;

        loop {
            elapsed += self.step();

            if self.bus.ppu.take_frame_ready() || self.cpu.stopped {
                break;
            }
            if !self.bus.lcd_enabled() && elapsed >= CYCLES_PER_FRAME {
                break;
            }
        }
        elapsed
    }

    pub fn button_pressed(&mut self, button: Button) {
        self.bus.set_button(button, true);
    }

    pub fn button_released(&mut self, button: Button) {
        self.bus.set_button(button, false);
    }

    /// The 160x144 picture, row-major.
    pub fn framebuffer(&self) -> &[Rgb] {
        self.bus.ppu.framebuffer()
    }

    /// Copy the picture into `buffer` as packed RGB24, as much as fits.
    pub fn frame_rgb24(&self, buffer: &mut [u8]) {
        for (dst, pixel) in buffer.chunks_exact_mut(3).zip(self.framebuffer()) {
            dst.copy_from_slice(pixel);
        }
    }

    /// Bytes sent over the link port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }
}

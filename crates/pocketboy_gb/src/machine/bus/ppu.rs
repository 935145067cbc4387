//! Pixel engine: scanline timing, STAT modes and line rendering.
//!
//! The LCD registers live in the bus's I/O page; this module owns the
//! scanline countdown and the framebuffer the lines are drawn into.

mod mmio;
mod render;
mod timing;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One framebuffer pixel.
pub type Rgb = [u8; 3];

/// T-cycles per scanline.
pub(super) const CYCLES_PER_SCANLINE: i32 = 456;
/// Mode 2 (OAM scan) length at the start of a line.
const OAM_SCAN_CYCLES: i32 = 80;
/// Mode 3 (pixel transfer) length following the OAM scan.
const TRANSFER_CYCLES: i32 = 172;
/// First scanline of vertical blank.
const VBLANK_LINE: u8 = 144;
/// Last scanline before LY wraps to 0.
const LAST_LINE: u8 = 153;

/// DMG shades for palette values 0 (lightest) to 3.
const SHADES: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

/// STAT mode, as stored in STAT bits 0-1.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(super) enum LcdMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

pub(crate) struct Ppu {
    /// Cycles left in the current scanline.
    countdown: i32,
    framebuffer: Vec<Rgb>,
    /// Background/window colour index (before palette) of each pixel on the
    /// line being drawn, used for sprite priority.
    line_bg: [u8; SCREEN_WIDTH],
    /// Set on entry to vertical blank; cleared by whoever consumes the frame.
    frame_ready: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self {
            countdown: CYCLES_PER_SCANLINE,
            framebuffer: vec![[SHADES[0]; 3]; SCREEN_WIDTH * SCREEN_HEIGHT],
            line_bg: [0; SCREEN_WIDTH],
            frame_ready: false,
        }
    }
}

impl Ppu {
    pub(crate) fn framebuffer(&self) -> &[Rgb] {
        &self.framebuffer
    }

    /// Return and clear the vertical-blank flag.
    pub(crate) fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }
}

fn shade(palette: u8, color_index: u8) -> Rgb {
    let value = SHADES[((palette >> (color_index * 2)) & 0x03) as usize];
    [value; 3]
}

use crate::SCREEN_WIDTH;

use super::super::{reg, GameBoyBus, OAM_SIZE};
use super::{shade, SHADES};

const MAP_LOW: u16 = 0x9800;
const MAP_HIGH: u16 = 0x9C00;
/// Rightmost WX that still shows part of the window.
const WX_MAX: u8 = 166;

/// 2-bit colour index of pixel `bit` (7 = leftmost) in a tile row.
#[inline]
fn color_index(lo: u8, hi: u8, bit: u8) -> u8 {
    (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
}

impl GameBoyBus {
    /// Draw scanline `ly` into the framebuffer.
    pub(super) fn render_scanline(&mut self, ly: u8) {
        let lcdc = self.io[reg::LCDC];

        if lcdc & 0x01 != 0 {
            self.render_background(ly, lcdc);
        } else {
            self.clear_line(ly);
        }
        if lcdc & 0x20 != 0 {
            self.render_window(ly, lcdc);
        }
        if lcdc & 0x02 != 0 {
            self.render_sprites(ly, lcdc);
        }
    }

    #[inline]
    fn vram_byte(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    /// Both bitplanes of `row` in a background/window tile.
    ///
    /// LCDC bit 4 picks unsigned indexing from 0x8000 or signed indexing
    /// around 0x9000.
    fn bg_tile_row(&self, lcdc: u8, tile: u8, row: u8) -> (u8, u8) {
        let base = if lcdc & 0x10 != 0 {
            0x8000u16 + tile as u16 * 16
        } else {
            0x9000u16.wrapping_add_signed(tile as i8 as i16 * 16)
        };
        let addr = base + row as u16 * 2;
        (self.vram_byte(addr), self.vram_byte(addr + 1))
    }

    fn put_bg_pixel(&mut self, ly: u8, x: usize, index: u8, palette: u8) {
        self.ppu.line_bg[x] = index;
        self.ppu.framebuffer[ly as usize * SCREEN_WIDTH + x] = shade(palette, index);
    }

    fn clear_line(&mut self, ly: u8) {
        let start = ly as usize * SCREEN_WIDTH;
        self.ppu.line_bg = [0; SCREEN_WIDTH];
        self.ppu.framebuffer[start..start + SCREEN_WIDTH].fill([SHADES[0]; 3]);
    }

    fn render_background(&mut self, ly: u8, lcdc: u8) {
        let map = if lcdc & 0x08 != 0 { MAP_HIGH } else { MAP_LOW };
        let bgp = self.io[reg::BGP];
        let scx = self.io[reg::SCX];
        let y = ly.wrapping_add(self.io[reg::SCY]);

        for x in 0..SCREEN_WIDTH {
            let bx = (x as u8).wrapping_add(scx);
            let tile = self.vram_byte(map + (y / 8) as u16 * 32 + (bx / 8) as u16);
            let (lo, hi) = self.bg_tile_row(lcdc, tile, y % 8);
            let index = color_index(lo, hi, 7 - bx % 8);
            self.put_bg_pixel(ly, x, index, bgp);
        }
    }

    fn render_window(&mut self, ly: u8, lcdc: u8) {
        let wy = self.io[reg::WY];
        let wx = self.io[reg::WX];
        if wy > ly || wx > WX_MAX {
            return;
        }

        let map = if lcdc & 0x40 != 0 { MAP_HIGH } else { MAP_LOW };
        let bgp = self.io[reg::BGP];
        let y = ly - wy;

        // WX is the window's left edge plus 7.
        for x in (wx as usize).saturating_sub(7)..SCREEN_WIDTH {
            let wx_pos = (x + 7 - wx as usize) as u8;
            let tile = self.vram_byte(map + (y / 8) as u16 * 32 + (wx_pos / 8) as u16);
            let (lo, hi) = self.bg_tile_row(lcdc, tile, y % 8);
            let index = color_index(lo, hi, 7 - wx_pos % 8);
            self.put_bg_pixel(ly, x, index, bgp);
        }
    }

    /// Draw the sprites crossing `ly`.
    ///
    /// Entries are visited from 39 down to 0 so that lower indices land on
    /// top. There is no 10-per-line limit.
    fn render_sprites(&mut self, ly: u8, lcdc: u8) {
        let height: i16 = if lcdc & 0x04 != 0 { 16 } else { 8 };
        let obp0 = self.io[reg::OBP0];
        let obp1 = self.io[reg::OBP1];
        let row_base = ly as usize * SCREEN_WIDTH;

        for entry in (0..OAM_SIZE / 4).rev() {
            let [y, x, tile, flags] = [0, 1, 2, 3].map(|i| self.oam[entry * 4 + i]);

            let mut row = ly as i16 - (y as i16 - 16);
            if row < 0 || row >= height {
                continue;
            }
            if flags & 0x40 != 0 {
                row = height - 1 - row;
            }

            let tile = if height == 16 { tile & 0xFE } else { tile };
            let addr = 0x8000u16 + tile as u16 * 16 + row as u16 * 2;
            let (lo, hi) = (self.vram_byte(addr), self.vram_byte(addr + 1));
            let palette = if flags & 0x10 != 0 { obp1 } else { obp0 };
            let behind_bg = flags & 0x80 != 0;
            let flip_x = flags & 0x20 != 0;

            for px in 0..8u8 {
                let bit = if flip_x { px } else { 7 - px };
                let index = color_index(lo, hi, bit);
                // Colour 0 is transparent.
                if index == 0 {
                    continue;
                }

                let sx = x as i16 - 8 + px as i16;
                if !(0..SCREEN_WIDTH as i16).contains(&sx) {
                    continue;
                }
                let sx = sx as usize;
                if behind_bg && self.ppu.line_bg[sx] != 0 {
                    continue;
                }
                self.ppu.framebuffer[row_base + sx] = shade(palette, index);
            }
        }
    }
}

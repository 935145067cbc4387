use super::{reg, GameBoyBus, OAM_SIZE};

impl GameBoyBus {
    /// OAM DMA: copy 160 bytes from `value << 8` into 0xFE00-0xFE9F.
    ///
    /// The transfer completes immediately; the 160 M-cycles during which
    /// hardware blocks the CPU are not modelled.
    pub(super) fn oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        log::debug!("GB DMA: OAM <- 0x{base:04X}");
        for i in 0..OAM_SIZE {
            self.oam[i] = self.read8_mmio(base.wrapping_add(i as u16));
        }
        self.io[reg::DMA] = value;
    }
}

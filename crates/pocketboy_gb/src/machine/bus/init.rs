use super::{reg, GameBoyBus};

impl GameBoyBus {
    /// Put the I/O registers into the state the DMG boot ROM leaves behind
    /// at PC=0x0100.
    ///
    /// WRAM, HRAM, VRAM and OAM stay zeroed so runs are reproducible.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        // Joypad: both groups selected, nothing pressed.
        self.joypad.select = 0x00;
        self.io[reg::JOYP] = self.joypad.state();

        self.serial.sb = 0x00;
        self.serial.sc = 0x7E;

        self.timer.init_dmg();

        // IF's upper bits read as 1; VBlank is already requested.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;

        self.apu.init_dmg();

        self.io[reg::LCDC] = 0x91;
        self.io[reg::STAT] = 0x85;
        self.io[reg::SCY] = 0x00;
        self.io[reg::SCX] = 0x00;
        self.io[reg::LY] = 0x00;
        self.io[reg::LYC] = 0x00;
        self.io[reg::DMA] = 0xFF;
        self.io[reg::BGP] = 0xFC;
        // OBP0/OBP1 are uninitialised on hardware.
        self.io[reg::OBP0] = 0xFF;
        self.io[reg::OBP1] = 0xFF;
        self.io[reg::WY] = 0x00;
        self.io[reg::WX] = 0x00;
    }
}

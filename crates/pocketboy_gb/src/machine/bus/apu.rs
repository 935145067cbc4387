//! Audio register file (0xFF10-0xFF3F).
//!
//! No sound is synthesised; the registers are kept so that software sees
//! the values it wrote, including the NR52 power switch behaviour.

const BASE: u16 = 0xFF10;
const NR52: u16 = 0xFF26;
const WAVE_RAM: u16 = 0xFF30;

pub(super) struct Apu {
    regs: [u8; 0x30],
}

impl Default for Apu {
    fn default() -> Self {
        Self { regs: [0; 0x30] }
    }
}

impl Apu {
    fn reg(&self, addr: u16) -> u8 {
        self.regs[(addr - BASE) as usize]
    }

    fn reg_mut(&mut self, addr: u16) -> &mut u8 {
        &mut self.regs[(addr - BASE) as usize]
    }

    /// DMG post-boot register values.
    pub(super) fn init_dmg(&mut self) {
        const POST_BOOT: [(u16, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        self.regs = [0; 0x30];
        for (addr, value) in POST_BOOT {
            *self.reg_mut(addr) = value;
        }
    }

    /// NR52 bit 7.
    pub(super) fn powered(&self) -> bool {
        self.reg(NR52) & 0x80 != 0
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        self.reg(addr)
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            NR52 => self.write_nr52(value),
            // Wave RAM stays writable while powered off.
            WAVE_RAM..=0xFF3F => *self.reg_mut(addr) = value,
            _ => {
                if self.powered() {
                    *self.reg_mut(addr) = value;
                }
            }
        }
    }

    fn write_nr52(&mut self, value: u8) {
        let was_on = self.powered();
        let now_on = value & 0x80 != 0;

        if was_on && !now_on {
            // Powering off clears every channel and control register,
            // including the channel status bits.
            for addr in BASE..NR52 {
                *self.reg_mut(addr) = 0;
            }
            *self.reg_mut(NR52) = 0;
        }

        // Only bit 7 is writable.
        let nr52 = self.reg_mut(NR52);
        if now_on {
            *nr52 |= 0x80;
        } else {
            *nr52 &= !0x80;
        }
    }
}

use crate::cpu::Interrupt;

/// Link port modelled as a loopback with nothing attached.
///
/// A transfer started with the internal clock (SC = 0x81) completes
/// immediately: the outgoing SB byte is captured in `output`, SB reads back
/// 0xFF as if the other side were disconnected, and INT $58 is requested.
/// Test ROMs report their results this way.
pub(crate) struct Serial {
    pub(crate) sb: u8,
    pub(crate) sc: u8,
    pub(crate) output: Vec<u8>,
}

impl Default for Serial {
    fn default() -> Self {
        Self {
            sb: 0x00,
            sc: 0x7E,
            output: Vec::new(),
        }
    }
}

impl Serial {
    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    pub(super) fn write_sc(&mut self, value: u8, if_reg: &mut u8) {
        self.sc = value;
        // Internal clock & start bit set?
        if (self.sc & 0x81) == 0x81 {
            self.output.push(self.sb);
            self.sb = 0xFF;
            self.sc &= !0x80;
            *if_reg |= Interrupt::SERIAL.bits();
        }
    }
}

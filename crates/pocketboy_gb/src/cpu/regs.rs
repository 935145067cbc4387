use super::Cpu;

/// A 16-bit register made of two 8-bit halves.
///
/// The pair is stored as a single `u16`; the halves are views produced by
/// shifting and masking, so writing one half never touches the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub fn pair(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn set_pair(&mut self, value: u16) {
        self.0 = value;
    }

    #[inline]
    pub fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn low(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn set_high(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    #[inline]
    pub fn set_low(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// Register file of the LR35902.
///
/// A/F, B/C, D/E and H/L are kept as pairs. F only ever holds the four
/// flag bits; the low nibble is masked off on every write path.
#[derive(Clone, Copy, Debug, Default)]
pub struct Registers {
    pub af: RegisterPair,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Register contents after the DMG boot ROM hands over to the cartridge.
    pub fn post_boot() -> Self {
        Self {
            af: RegisterPair::new(0x01B0),
            bc: RegisterPair::new(0x0013),
            de: RegisterPair::new(0x00D8),
            hl: RegisterPair::new(0x014D),
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.af.high()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_high(value);
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.af.low()
    }

    #[inline]
    pub fn set_f(&mut self, value: u8) {
        self.af.set_low(value & 0xF0);
    }

    pub fn get8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.af.high(),
            Reg8::B => self.bc.high(),
            Reg8::C => self.bc.low(),
            Reg8::D => self.de.high(),
            Reg8::E => self.de.low(),
            Reg8::H => self.hl.high(),
            Reg8::L => self.hl.low(),
        }
    }

    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.af.set_high(value),
            Reg8::B => self.bc.set_high(value),
            Reg8::C => self.bc.set_low(value),
            Reg8::D => self.de.set_high(value),
            Reg8::E => self.de.set_low(value),
            Reg8::H => self.hl.set_high(value),
            Reg8::L => self.hl.set_low(value),
        }
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af.pair(),
            Reg16::BC => self.bc.pair(),
            Reg16::DE => self.de.pair(),
            Reg16::HL => self.hl.pair(),
            Reg16::SP => self.sp,
        }
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::AF => self.af.set_pair(value & 0xFFF0),
            Reg16::BC => self.bc.set_pair(value),
            Reg16::DE => self.de.set_pair(value),
            Reg16::HL => self.hl.set_pair(value),
            Reg16::SP => self.sp = value,
        }
    }
}

/// 8-bit CPU registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// 16-bit register pairs (plus SP).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
}

/// An 8-bit instruction operand: either a register or the byte at (HL).
///
/// The variant order follows the 3-bit register field used throughout the
/// opcode map: 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg8),
    HlInd,
}

impl Operand {
    pub(crate) const ENCODING: [Operand; 8] = [
        Operand::Reg(Reg8::B),
        Operand::Reg(Reg8::C),
        Operand::Reg(Reg8::D),
        Operand::Reg(Reg8::E),
        Operand::Reg(Reg8::H),
        Operand::Reg(Reg8::L),
        Operand::HlInd,
        Operand::Reg(Reg8::A),
    ];

    /// Decode the 3-bit register field of an opcode.
    #[inline]
    pub(crate) fn decode(bits: u8) -> Self {
        Self::ENCODING[(bits & 0x07) as usize]
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0-3 are always zero.
#[derive(Clone, Copy, Debug)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.f() & (1 << flag as u8) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = 1 << flag as u8;
        let f = self.regs.f();
        self.regs.set_f(if value { f | mask } else { f & !mask });
    }

    /// Overwrite all four flags at once.
    #[inline]
    pub(crate) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        let f = (z as u8) << Flag::Z as u8
            | (n as u8) << Flag::N as u8
            | (h as u8) << Flag::H as u8
            | (c as u8) << Flag::C as u8;
        self.regs.set_f(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_write_is_visible_in_both_halves() {
        let mut pair = RegisterPair::default();
        for value in [0x0000u16, 0x1234, 0xABCD, 0xFF00, 0x00FF, 0xFFFF] {
            pair.set_pair(value);
            assert_eq!(pair.high(), (value >> 8) as u8);
            assert_eq!(pair.low(), value as u8);
            assert_eq!(pair.pair(), value);
        }
    }

    #[test]
    fn half_writes_leave_other_half_alone() {
        for high in [0x00u8, 0x5A, 0xFF] {
            for low in [0x00u8, 0xA5, 0xFF] {
                let mut pair = RegisterPair::new(0x1234);
                pair.set_high(high);
                assert_eq!(pair.low(), 0x34);
                pair.set_low(low);
                assert_eq!(pair.high(), high);
                assert_eq!(pair.pair(), u16::from_be_bytes([high, low]));
            }
        }
    }

    #[test]
    fn af_never_stores_low_nibble() {
        let mut regs = Registers::default();
        regs.set16(Reg16::AF, 0x12FF);
        assert_eq!(regs.a(), 0x12);
        assert_eq!(regs.f(), 0xF0);

        regs.set_f(0x0F);
        assert_eq!(regs.f(), 0x00);
    }

    #[test]
    fn reg8_accessors_map_onto_pairs() {
        let mut regs = Registers::default();
        regs.set8(Reg8::B, 0x11);
        regs.set8(Reg8::C, 0x22);
        regs.set8(Reg8::H, 0xC0);
        regs.set8(Reg8::L, 0x01);
        assert_eq!(regs.get16(Reg16::BC), 0x1122);
        assert_eq!(regs.get16(Reg16::HL), 0xC001);

        regs.set16(Reg16::DE, 0xBEEF);
        assert_eq!(regs.get8(Reg8::D), 0xBE);
        assert_eq!(regs.get8(Reg8::E), 0xEF);
    }
}

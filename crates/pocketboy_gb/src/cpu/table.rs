//! Opcode dispatch tables.
//!
//! Both tables are built once when a [`Cpu`](super::Cpu) is constructed.
//! Every slot starts out as [`Op::Illegal`]; the implemented instructions
//! are then registered on top, and registering the same opcode twice is a
//! hard failure.

use std::fmt;

use super::regs::{Operand, Reg16};

/// Branch condition encoded in bits 3-4 of conditional control-flow opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

impl Cond {
    fn decode(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Cond::NZ,
            1 => Cond::Z,
            2 => Cond::NC,
            _ => Cond::C,
        }
    }
}

/// The eight accumulator operations of the 0x80-0xBF block (and their
/// immediate forms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const ENCODING: [AluOp; 8] = [
        AluOp::Add,
        AluOp::Adc,
        AluOp::Sub,
        AluOp::Sbc,
        AluOp::And,
        AluOp::Xor,
        AluOp::Or,
        AluOp::Cp,
    ];
}

/// Rotates and shifts from the first quarter of the CB table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    const ENCODING: [ShiftOp; 8] = [
        ShiftOp::Rlc,
        ShiftOp::Rrc,
        ShiftOp::Rl,
        ShiftOp::Rr,
        ShiftOp::Sla,
        ShiftOp::Sra,
        ShiftOp::Swap,
        ShiftOp::Srl,
    ];
}

/// Memory operand addressed through a register pair, used by the
/// `LD (rr),A` / `LD A,(rr)` family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indirect {
    BC,
    DE,
    HLInc,
    HLDec,
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Illegal,
    Prefix,

    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Daa,
    Cpl,
    Scf,
    Ccf,

    Ld(Operand, Operand),
    LdImm(Operand),
    LdImm16(Reg16),
    StoreA(Indirect),
    LoadA(Indirect),
    StoreSp,
    LdhStore,
    LdhLoad,
    LdhStoreC,
    LdhLoadC,
    StoreAAbs,
    LoadAAbs,
    LdSpHl,
    LdHlSpOffset,
    AddSpOffset,

    Inc(Operand),
    Dec(Operand),
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),

    Alu(AluOp, Operand),
    AluImm(AluOp),
    /// RLCA/RRCA/RLA/RRA: the accumulator forms always clear Z.
    RotateA(ShiftOp),

    Jr(Option<Cond>),
    Jp(Option<Cond>),
    JpHl,
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    Rst(u16),
    Push(Reg16),
    Pop(Reg16),

    Shift(ShiftOp, Operand),
    Bit(u8, Operand),
    Res(u8, Operand),
    Set(u8, Operand),
}

/// One dispatch table slot: the operation plus its cost and length metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    /// Base cost in T-cycles. Taken branches add their extra cost on top.
    pub cycles: u32,
    /// Instruction length in bytes; PC is advanced by this before execution.
    pub length: u16,
}

impl Instruction {
    pub const ILLEGAL: Instruction = Instruction {
        op: Op::Illegal,
        cycles: 0,
        length: 0,
    };
}

pub(super) struct TableBuilder {
    entries: Vec<Instruction>,
}

impl TableBuilder {
    pub(super) fn new() -> Self {
        Self {
            entries: vec![Instruction::ILLEGAL; 256],
        }
    }

    pub(super) fn define(&mut self, opcode: u8, op: Op, cycles: u32, length: u16) {
        let slot = &mut self.entries[opcode as usize];
        assert!(
            slot.op == Op::Illegal,
            "opcode 0x{opcode:02X} registered twice ({:?} and {:?})",
            slot.op,
            op
        );
        *slot = Instruction { op, cycles, length };
    }

    pub(super) fn finish(self) -> Box<[Instruction]> {
        self.entries.into_boxed_slice()
    }
}

const PAIRS: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];
const STACK_PAIRS: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF];

/// Extra cost of a memory operand over a register operand in the
/// single-byte register-field instructions.
#[inline]
fn hl_penalty(operand: Operand, extra: u32) -> u32 {
    if operand == Operand::HlInd {
        extra
    } else {
        0
    }
}

/// Build the 256-entry table for unprefixed opcodes.
pub(crate) fn build_main_table() -> Box<[Instruction]> {
    let mut t = TableBuilder::new();

    t.define(0x00, Op::Nop, 4, 1);
    t.define(0x10, Op::Stop, 4, 2);
    t.define(0x76, Op::Halt, 4, 1);
    t.define(0xF3, Op::Di, 4, 1);
    t.define(0xFB, Op::Ei, 4, 1);
    t.define(0x27, Op::Daa, 4, 1);
    t.define(0x2F, Op::Cpl, 4, 1);
    t.define(0x37, Op::Scf, 4, 1);
    t.define(0x3F, Op::Ccf, 4, 1);
    t.define(0xCB, Op::Prefix, 0, 0);

    for (i, &pair) in PAIRS.iter().enumerate() {
        let row = (i as u8) << 4;
        t.define(row | 0x01, Op::LdImm16(pair), 12, 3);
        t.define(row | 0x03, Op::Inc16(pair), 8, 1);
        t.define(row | 0x09, Op::AddHl(pair), 8, 1);
        t.define(row | 0x0B, Op::Dec16(pair), 8, 1);
    }

    for (i, &pair) in STACK_PAIRS.iter().enumerate() {
        let row = 0xC0 | (i as u8) << 4;
        t.define(row | 0x01, Op::Pop(pair), 12, 1);
        t.define(row | 0x05, Op::Push(pair), 16, 1);
    }

    let indirect = [Indirect::BC, Indirect::DE, Indirect::HLInc, Indirect::HLDec];
    for (i, &ind) in indirect.iter().enumerate() {
        let row = (i as u8) << 4;
        t.define(row | 0x02, Op::StoreA(ind), 8, 1);
        t.define(row | 0x0A, Op::LoadA(ind), 8, 1);
    }

    for bits in 0..8u8 {
        let operand = Operand::decode(bits);
        let column = bits << 3;
        t.define(column | 0x04, Op::Inc(operand), 4 + hl_penalty(operand, 8), 1);
        t.define(column | 0x05, Op::Dec(operand), 4 + hl_penalty(operand, 8), 1);
        t.define(column | 0x06, Op::LdImm(operand), 8 + hl_penalty(operand, 4), 2);
    }

    let rotates = [ShiftOp::Rlc, ShiftOp::Rrc, ShiftOp::Rl, ShiftOp::Rr];
    for (i, &rot) in rotates.iter().enumerate() {
        t.define(0x07 | (i as u8) << 3, Op::RotateA(rot), 4, 1);
    }

    // LD r,r' occupies 0x40-0x7F except for the (HL),(HL) slot, which is HALT.
    for opcode in 0x40..=0x7Fu8 {
        if opcode == 0x76 {
            continue;
        }
        let dst = Operand::decode(opcode >> 3);
        let src = Operand::decode(opcode);
        let cycles = 4 + hl_penalty(dst, 4) + hl_penalty(src, 4);
        t.define(opcode, Op::Ld(dst, src), cycles, 1);
    }

    for opcode in 0x80..=0xBFu8 {
        let alu = AluOp::ENCODING[((opcode >> 3) & 0x07) as usize];
        let src = Operand::decode(opcode);
        t.define(opcode, Op::Alu(alu, src), 4 + hl_penalty(src, 4), 1);
    }

    for (i, &alu) in AluOp::ENCODING.iter().enumerate() {
        t.define(0xC6 | (i as u8) << 3, Op::AluImm(alu), 8, 2);
    }

    for n in 0..8u8 {
        t.define(0xC7 | n << 3, Op::Rst((n as u16) * 8), 16, 1);
    }

    t.define(0x18, Op::Jr(None), 12, 2);
    t.define(0xC3, Op::Jp(None), 16, 3);
    t.define(0xE9, Op::JpHl, 4, 1);
    t.define(0xCD, Op::Call(None), 24, 3);
    t.define(0xC9, Op::Ret(None), 16, 1);
    t.define(0xD9, Op::Reti, 16, 1);
    for bits in 0..4u8 {
        let cc = Some(Cond::decode(bits));
        let column = bits << 3;
        t.define(0x20 | column, Op::Jr(cc), 8, 2);
        t.define(0xC2 | column, Op::Jp(cc), 12, 3);
        t.define(0xC4 | column, Op::Call(cc), 12, 3);
        t.define(0xC0 | column, Op::Ret(cc), 8, 1);
    }

    t.define(0x08, Op::StoreSp, 20, 3);
    t.define(0xE0, Op::LdhStore, 12, 2);
    t.define(0xF0, Op::LdhLoad, 12, 2);
    t.define(0xE2, Op::LdhStoreC, 8, 1);
    t.define(0xF2, Op::LdhLoadC, 8, 1);
    t.define(0xEA, Op::StoreAAbs, 16, 3);
    t.define(0xFA, Op::LoadAAbs, 16, 3);
    t.define(0xE8, Op::AddSpOffset, 16, 2);
    t.define(0xF8, Op::LdHlSpOffset, 12, 2);
    t.define(0xF9, Op::LdSpHl, 8, 1);

    t.finish()
}

/// Build the 256-entry table for 0xCB-prefixed opcodes.
///
/// The length of 2 covers the prefix byte as well, so the prefix slot in
/// the main table carries neither cost nor length.
pub(crate) fn build_cb_table() -> Box<[Instruction]> {
    let mut t = TableBuilder::new();

    for opcode in 0..=0xFFu8 {
        let operand = Operand::decode(opcode);
        let y = (opcode >> 3) & 0x07;
        let (op, hl_cycles) = match opcode >> 6 {
            0 => (Op::Shift(ShiftOp::ENCODING[y as usize], operand), 16),
            1 => (Op::Bit(y, operand), 12),
            2 => (Op::Res(y, operand), 16),
            _ => (Op::Set(y, operand), 16),
        };
        let cycles = if operand == Operand::HlInd { hl_cycles } else { 8 };
        t.define(opcode, op, cycles, 2);
    }

    t.finish()
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cond::NZ => "NZ",
            Cond::Z => "Z",
            Cond::NC => "NC",
            Cond::C => "C",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{r:?}"),
            Operand::HlInd => f.write_str("(HL)"),
        }
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Indirect::BC => "(BC)",
            Indirect::DE => "(DE)",
            Indirect::HLInc => "(HL+)",
            Indirect::HLDec => "(HL-)",
        };
        f.write_str(s)
    }
}

fn with_cond(f: &mut fmt::Formatter<'_>, name: &str, cc: Option<Cond>, rest: &str) -> fmt::Result {
    match (cc, rest.is_empty()) {
        (Some(cc), true) => write!(f, "{name} {cc}"),
        (Some(cc), false) => write!(f, "{name} {cc}, {rest}"),
        (None, true) => f.write_str(name),
        (None, false) => write!(f, "{name} {rest}"),
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Illegal => f.write_str("???"),
            Op::Prefix => f.write_str("PREFIX CB"),
            Op::Nop => f.write_str("NOP"),
            Op::Stop => f.write_str("STOP"),
            Op::Halt => f.write_str("HALT"),
            Op::Di => f.write_str("DI"),
            Op::Ei => f.write_str("EI"),
            Op::Daa => f.write_str("DAA"),
            Op::Cpl => f.write_str("CPL"),
            Op::Scf => f.write_str("SCF"),
            Op::Ccf => f.write_str("CCF"),
            Op::Ld(dst, src) => write!(f, "LD {dst}, {src}"),
            Op::LdImm(dst) => write!(f, "LD {dst}, d8"),
            Op::LdImm16(rr) => write!(f, "LD {rr:?}, d16"),
            Op::StoreA(ind) => write!(f, "LD {ind}, A"),
            Op::LoadA(ind) => write!(f, "LD A, {ind}"),
            Op::StoreSp => f.write_str("LD (a16), SP"),
            Op::LdhStore => f.write_str("LDH (a8), A"),
            Op::LdhLoad => f.write_str("LDH A, (a8)"),
            Op::LdhStoreC => f.write_str("LD (C), A"),
            Op::LdhLoadC => f.write_str("LD A, (C)"),
            Op::StoreAAbs => f.write_str("LD (a16), A"),
            Op::LoadAAbs => f.write_str("LD A, (a16)"),
            Op::LdSpHl => f.write_str("LD SP, HL"),
            Op::LdHlSpOffset => f.write_str("LD HL, SP+r8"),
            Op::AddSpOffset => f.write_str("ADD SP, r8"),
            Op::Inc(r) => write!(f, "INC {r}"),
            Op::Dec(r) => write!(f, "DEC {r}"),
            Op::Inc16(rr) => write!(f, "INC {rr:?}"),
            Op::Dec16(rr) => write!(f, "DEC {rr:?}"),
            Op::AddHl(rr) => write!(f, "ADD HL, {rr:?}"),
            Op::Alu(alu, src) => write!(f, "{} A, {src}", format!("{alu:?}").to_uppercase()),
            Op::AluImm(alu) => write!(f, "{} A, d8", format!("{alu:?}").to_uppercase()),
            Op::RotateA(rot) => write!(f, "{}A", format!("{rot:?}").to_uppercase()),
            Op::Jr(cc) => with_cond(f, "JR", cc, "r8"),
            Op::Jp(cc) => with_cond(f, "JP", cc, "a16"),
            Op::JpHl => f.write_str("JP (HL)"),
            Op::Call(cc) => with_cond(f, "CALL", cc, "a16"),
            Op::Ret(cc) => with_cond(f, "RET", cc, ""),
            Op::Reti => f.write_str("RETI"),
            Op::Rst(vector) => write!(f, "RST {vector:02X}H"),
            Op::Push(rr) => write!(f, "PUSH {rr:?}"),
            Op::Pop(rr) => write!(f, "POP {rr:?}"),
            Op::Shift(shift, r) => write!(f, "{} {r}", format!("{shift:?}").to_uppercase()),
            Op::Bit(n, r) => write!(f, "BIT {n}, {r}"),
            Op::Res(n, r) => write!(f, "RES {n}, {r}"),
            Op::Set(n, r) => write!(f, "SET {n}, {r}"),
        }
    }
}

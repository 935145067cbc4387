//! Sharp LR35902 instruction interpreter.

mod alu;
mod bus;
mod exec;
mod helpers;
mod interrupts;
mod regs;
mod table;

pub use bus::Bus;
pub use interrupts::Interrupt;
pub use regs::{Flag, Operand, Reg16, Reg8, RegisterPair, Registers};
pub use table::{AluOp, Cond, Indirect, Instruction, Op, ShiftOp};

/// Idle cost reported by [`Cpu::step`] while the CPU is halted.
pub const HALT_IDLE_CYCLES: u32 = 4;

pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// STOP freezes the whole machine until a joypad interrupt is pending.
    pub stopped: bool,
    main_table: Box<[Instruction]>,
    cb_table: Box<[Instruction]>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Create a CPU in the state the DMG boot ROM leaves behind.
    pub fn new() -> Self {
        Self {
            regs: Registers::post_boot(),
            ime: false,
            halted: false,
            stopped: false,
            main_table: table::build_main_table(),
            cb_table: table::build_cb_table(),
        }
    }

    pub fn reset(&mut self) {
        self.regs = Registers::post_boot();
        self.ime = false;
        self.halted = false;
        self.stopped = false;
    }

    /// Table entry for an unprefixed opcode.
    pub fn instruction(&self, opcode: u8) -> Instruction {
        self.main_table[opcode as usize]
    }

    /// Table entry for a 0xCB-prefixed opcode.
    pub fn cb_instruction(&self, opcode: u8) -> Instruction {
        self.cb_table[opcode as usize]
    }

    /// Execute one instruction and return the number of T-cycles it took.
    ///
    /// While halted this returns [`HALT_IDLE_CYCLES`] so that the rest of the
    /// machine keeps running; while stopped it returns 0.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.stopped {
            if self.pending_interrupts(bus).contains(Interrupt::JOYPAD) {
                log::debug!("GB CPU: leaving STOP on joypad interrupt");
                self.stopped = false;
            }
            return 0;
        }

        if self.halted {
            if !self.pending_interrupts(bus).is_empty() {
                self.halted = false;
            }
            return HALT_IDLE_CYCLES;
        }

        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        let mut instr = self.main_table[opcode as usize];
        let mut prefixed = false;
        if instr.op == Op::Prefix {
            let cb = bus.read8(pc.wrapping_add(1));
            instr = self.cb_table[cb as usize];
            prefixed = true;
        }

        if instr.op == Op::Illegal {
            self.illegal_opcode(prefixed, opcode, pc);
        }

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{pc:04X}: {opcode:02X} - {}", instr.op);
        }

        // Operands are read relative to the advanced PC.
        self.regs.pc = pc.wrapping_add(instr.length);
        instr.cycles + self.execute(bus, instr.op)
    }

    fn illegal_opcode(&self, prefixed: bool, opcode: u8, pc: u16) -> ! {
        let prefix = if prefixed { "CB " } else { "" };
        log::error!(
            "GB CPU: unknown instruction {prefix}0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
            sp = self.regs.sp,
            af = self.regs.af.pair(),
            bc = self.regs.bc.pair(),
            de = self.regs.de.pair(),
            hl = self.regs.hl.pair(),
        );
        panic!("unknown instruction {prefix}0x{opcode:02X} at 0x{pc:04X}");
    }
}

#[cfg(test)]
mod tests;

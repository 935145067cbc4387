mod alu;
mod bits;
mod control;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu, Op};

impl Cpu {
    /// Run the handler for a decoded instruction.
    ///
    /// PC has already been moved past the instruction. The return value is
    /// the cost added on top of the table's base cycles, which is non-zero
    /// only for taken conditional branches.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) -> u32 {
        match op {
            // Filtered out by `step` before execution.
            Op::Illegal | Op::Prefix => 0,

            Op::Nop => 0,
            Op::Stop => self.exec_stop(),
            Op::Halt => self.exec_halt(),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::Daa => self.exec_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),
            Op::Alu(alu, src) => self.exec_alu(bus, alu, src),
            Op::AluImm(alu) => self.exec_alu_imm(bus, alu),
            Op::Inc(target) => self.exec_inc8(bus, target),
            Op::Dec(target) => self.exec_dec8(bus, target),
            Op::Inc16(rr) => self.exec_inc16(rr),
            Op::Dec16(rr) => self.exec_dec16(rr),
            Op::AddHl(rr) => self.exec_add_hl(rr),
            Op::AddSpOffset => self.exec_add_sp_r8(bus),
            Op::RotateA(rot) => self.exec_rotate_a(rot),

            Op::Ld(dst, src) => self.exec_ld(bus, dst, src),
            Op::LdImm(dst) => self.exec_ld_d8(bus, dst),
            Op::LdImm16(rr) => self.exec_ld_d16(bus, rr),
            Op::StoreA(ind) => self.exec_store_a(bus, ind),
            Op::LoadA(ind) => self.exec_load_a(bus, ind),
            Op::StoreSp => self.exec_ld_a16_sp(bus),
            Op::LdhStore => self.exec_ldh_store(bus),
            Op::LdhLoad => self.exec_ldh_load(bus),
            Op::LdhStoreC => self.exec_ldh_store_c(bus),
            Op::LdhLoadC => self.exec_ldh_load_c(bus),
            Op::StoreAAbs => self.exec_store_a_abs(bus),
            Op::LoadAAbs => self.exec_load_a_abs(bus),
            Op::LdSpHl => self.exec_ld_sp_hl(),
            Op::LdHlSpOffset => self.exec_ld_hl_sp_r8(bus),

            Op::Jr(cc) => self.exec_jr(bus, cc),
            Op::Jp(cc) => self.exec_jp(bus, cc),
            Op::JpHl => self.exec_jp_hl(),
            Op::Call(cc) => self.exec_call(bus, cc),
            Op::Ret(cc) => self.exec_ret(bus, cc),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),
            Op::Push(rr) => self.exec_push(bus, rr),
            Op::Pop(rr) => self.exec_pop(bus, rr),

            Op::Shift(shift, target) => self.exec_shift(bus, shift, target),
            Op::Bit(bit, target) => self.exec_bit(bus, bit, target),
            Op::Res(bit, target) => self.exec_res(bus, bit, target),
            Op::Set(bit, target) => self.exec_set(bus, bit, target),
        }
    }
}

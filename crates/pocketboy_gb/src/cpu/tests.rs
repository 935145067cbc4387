use super::*;
use super::interrupts::{IE_ADDR, IF_ADDR};
use super::table::TableBuilder;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// Build a CPU/bus pair with `program` placed at 0x0100 (the post-boot PC).
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

/// Run a single ALU opcode of the 0x80 block with A and B preloaded, and
/// return (A, F).
fn run_alu(cpu: &mut Cpu, bus: &mut TestBus, opcode: u8, a: u8, b: u8, carry: bool) -> (u8, u8) {
    cpu.regs.pc = 0x0100;
    cpu.regs.set_a(a);
    cpu.regs.set8(Reg8::B, b);
    cpu.regs.set_f(if carry { 0x10 } else { 0x00 });
    bus.memory[0x0100] = opcode;
    cpu.step(bus);
    (cpu.regs.a(), cpu.regs.f())
}

fn flags(z: bool, n: bool, h: bool, c: bool) -> u8 {
    (z as u8) << 7 | (n as u8) << 6 | (h as u8) << 5 | (c as u8) << 4
}

#[test]
fn ld_a_d8_loads_immediate_in_eight_cycles() {
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42]);

    let cycles = cpu.step(&mut bus);

    assert_eq!(cpu.regs.a(), 0x42);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn add_a_b_sets_half_carry_only() {
    let (mut cpu, mut bus) = setup(&[0x80]);
    cpu.regs.set_a(0x0F);
    cpu.regs.set8(Reg8::B, 0x01);

    let cycles = cpu.step(&mut bus);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.a(), 0x10);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    assert!(!cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));
}

#[test]
fn main_table_has_every_documented_opcode() {
    let cpu = Cpu::new();
    let holes = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    for opcode in 0..=0xFFu8 {
        let op = cpu.instruction(opcode).op;
        if holes.contains(&opcode) {
            assert_eq!(op, Op::Illegal, "0x{opcode:02X} should be a hole");
        } else {
            assert_ne!(op, Op::Illegal, "0x{opcode:02X} is missing");
        }
    }

    for opcode in 0..=0xFFu8 {
        let instr = cpu.cb_instruction(opcode);
        assert_ne!(instr.op, Op::Illegal, "CB 0x{opcode:02X} is missing");
        assert_eq!(instr.length, 2);
    }
}

#[test]
#[should_panic(expected = "registered twice")]
fn table_builder_rejects_duplicate_opcodes() {
    let mut builder = TableBuilder::new();
    builder.define(0x00, Op::Nop, 4, 1);
    builder.define(0x00, Op::Halt, 4, 1);
}

#[test]
#[should_panic(expected = "unknown instruction 0xD3 at 0x0100")]
fn illegal_opcode_is_fatal() {
    let (mut cpu, mut bus) = setup(&[0xD3]);
    cpu.step(&mut bus);
}

#[test]
fn mnemonics_are_rendered_from_ops() {
    let cpu = Cpu::new();
    assert_eq!(cpu.instruction(0x3E).op.to_string(), "LD A, d8");
    assert_eq!(cpu.instruction(0x77).op.to_string(), "LD (HL), A");
    assert_eq!(cpu.instruction(0x20).op.to_string(), "JR NZ, r8");
    assert_eq!(cpu.instruction(0xC8).op.to_string(), "RET Z");
    assert_eq!(cpu.instruction(0xFF).op.to_string(), "RST 38H");
    assert_eq!(cpu.cb_instruction(0x7E).op.to_string(), "BIT 7, (HL)");
}

#[test]
fn add_and_adc_flags_match_integer_reference() {
    let (mut cpu, mut bus) = setup(&[]);
    for a in 0..=0xFFu8 {
        for b in 0..=0xFFu8 {
            for carry in [false, true] {
                // ADD A,B ignores the incoming carry; ADC A,B uses it.
                for (opcode, use_carry) in [(0x80, false), (0x88, true)] {
                    let c = (use_carry && carry) as u16;
                    let sum = a as u16 + b as u16 + c;
                    let expected_a = sum as u8;
                    let half = (a & 0xF) as u16 + (b & 0xF) as u16 + c > 0xF;
                    let expected_f = flags(expected_a == 0, false, half, sum > 0xFF);

                    let (got_a, got_f) = run_alu(&mut cpu, &mut bus, opcode, a, b, carry);
                    assert_eq!(got_a, expected_a, "opcode {opcode:02X} a={a:02X} b={b:02X} c={carry}");
                    assert_eq!(got_f, expected_f, "opcode {opcode:02X} a={a:02X} b={b:02X} c={carry}");
                }
            }
        }
    }
}

#[test]
fn sub_sbc_and_cp_flags_match_integer_reference() {
    let (mut cpu, mut bus) = setup(&[]);
    for a in 0..=0xFFu8 {
        for b in 0..=0xFFu8 {
            for carry in [false, true] {
                for (opcode, use_carry, keeps_a) in [(0x90, false, false), (0x98, true, false), (0xB8, false, true)] {
                    let c = (use_carry && carry) as i32;
                    let diff = a as i32 - b as i32 - c;
                    let result = diff as u8;
                    let half = (a & 0xF) as i32 - (b & 0xF) as i32 - c < 0;
                    let expected_f = flags(result == 0, true, half, diff < 0);
                    let expected_a = if keeps_a { a } else { result };

                    let (got_a, got_f) = run_alu(&mut cpu, &mut bus, opcode, a, b, carry);
                    assert_eq!(got_a, expected_a, "opcode {opcode:02X} a={a:02X} b={b:02X} c={carry}");
                    assert_eq!(got_f, expected_f, "opcode {opcode:02X} a={a:02X} b={b:02X} c={carry}");
                }
            }
        }
    }
}

#[test]
fn logic_ops_flags_match_reference() {
    let (mut cpu, mut bus) = setup(&[]);
    for a in 0..=0xFFu8 {
        for b in [0x00u8, 0x0F, 0x55, 0xAA, 0xF0, 0xFF, a] {
            let (r, f) = run_alu(&mut cpu, &mut bus, 0xA0, a, b, true);
            assert_eq!((r, f), (a & b, flags(a & b == 0, false, true, false)));

            let (r, f) = run_alu(&mut cpu, &mut bus, 0xA8, a, b, true);
            assert_eq!((r, f), (a ^ b, flags(a ^ b == 0, false, false, false)));

            let (r, f) = run_alu(&mut cpu, &mut bus, 0xB0, a, b, true);
            assert_eq!((r, f), (a | b, flags(a | b == 0, false, false, false)));
        }
    }
}

#[test]
fn inc_and_dec_preserve_carry() {
    for carry in [false, true] {
        for value in 0..=0xFFu8 {
            // INC B, then DEC B.
            let (mut cpu, mut bus) = setup(&[0x04, 0x05]);
            cpu.regs.set8(Reg8::B, value);
            cpu.regs.set_f(if carry { 0x10 } else { 0 });

            cpu.step(&mut bus);
            let inc = value.wrapping_add(1);
            assert_eq!(cpu.regs.get8(Reg8::B), inc);
            assert_eq!(
                cpu.regs.f(),
                flags(inc == 0, false, value & 0xF == 0xF, carry)
            );

            cpu.step(&mut bus);
            assert_eq!(cpu.regs.get8(Reg8::B), value);
            assert_eq!(
                cpu.regs.f(),
                flags(value == 0, true, inc & 0xF == 0, carry)
            );
        }
    }
}

#[test]
fn add_hl_uses_bit_11_and_bit_15_carries() {
    // ADD HL,DE
    let (mut cpu, mut bus) = setup(&[0x19, 0x19]);
    cpu.regs.hl.set_pair(0x0FFF);
    cpu.regs.de.set_pair(0x0001);
    cpu.set_flag(Flag::Z, true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl.pair(), 0x1000);
    assert!(cpu.get_flag(Flag::H));
    assert!(!cpu.get_flag(Flag::C));
    // Z is untouched by 16-bit adds.
    assert!(cpu.get_flag(Flag::Z));

    cpu.regs.hl.set_pair(0xF000);
    cpu.regs.de.set_pair(0x1000);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl.pair(), 0x0000);
    assert!(!cpu.get_flag(Flag::H));
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn sp_relative_ops_take_flags_from_low_byte() {
    // LD HL,SP-1 ; ADD SP,+1
    let (mut cpu, mut bus) = setup(&[0xF8, 0xFF, 0xE8, 0x01]);
    cpu.regs.sp = 0x00FF;

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.hl.pair(), 0x00FE);
    assert_eq!(cpu.regs.f(), flags(false, false, true, true));

    let cycles = cpu.step(&mut bus);
    assert_eq!(cycles, 16);
    assert_eq!(cpu.regs.sp, 0x0100);
    assert_eq!(cpu.regs.f(), flags(false, false, true, true));
}

#[test]
fn push_then_pop_round_trips() {
    for value in [0x0000u16, 0x1234, 0xBEEF, 0xFFFF] {
        // PUSH BC ; POP DE
        let (mut cpu, mut bus) = setup(&[0xC5, 0xD1]);
        cpu.regs.sp = 0xDFF0;
        cpu.regs.bc.set_pair(value);

        assert_eq!(cpu.step(&mut bus), 16);
        assert_eq!(cpu.regs.sp, 0xDFEE);
        assert_eq!(bus.memory[0xDFEE], value as u8);
        assert_eq!(bus.memory[0xDFEF], (value >> 8) as u8);

        assert_eq!(cpu.step(&mut bus), 12);
        assert_eq!(cpu.regs.de.pair(), value);
        assert_eq!(cpu.regs.sp, 0xDFF0);
    }
}

#[test]
fn pop_af_masks_low_flag_nibble() {
    let (mut cpu, mut bus) = setup(&[0xF1]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0xFF;
    bus.memory[0xC001] = 0x12;

    cpu.step(&mut bus);

    assert_eq!(cpu.regs.af.pair(), 0x12F0);
}

#[test]
fn daa_leaves_valid_bcd_unchanged() {
    for tens in 0..10u8 {
        for ones in 0..10u8 {
            let bcd = tens << 4 | ones;
            let (mut cpu, mut bus) = setup(&[0x27]);
            cpu.regs.set_a(bcd);
            cpu.regs.set_f(0);

            cpu.step(&mut bus);

            assert_eq!(cpu.regs.a(), bcd);
            assert!(!cpu.get_flag(Flag::C));
            assert_eq!(cpu.get_flag(Flag::Z), bcd == 0);
        }
    }
}

#[test]
fn daa_after_add_produces_bcd_sum() {
    let to_bcd = |v: u8| (v / 10) << 4 | (v % 10);
    for x in 0..100u8 {
        for y in [0u8, 1, 9, 18, 45, 50, 99] {
            // ADD A,B ; DAA
            let (mut cpu, mut bus) = setup(&[0x80, 0x27]);
            cpu.regs.set_a(to_bcd(x));
            cpu.regs.set8(Reg8::B, to_bcd(y));

            cpu.step(&mut bus);
            cpu.step(&mut bus);

            let sum = x as u16 + y as u16;
            assert_eq!(cpu.regs.a(), to_bcd((sum % 100) as u8), "{x} + {y}");
            assert_eq!(cpu.get_flag(Flag::C), sum >= 100, "{x} + {y}");
        }
    }
}

#[test]
fn daa_after_sub_produces_bcd_difference() {
    let to_bcd = |v: u8| (v / 10) << 4 | (v % 10);
    for x in 0..100u8 {
        for y in [0u8, 1, 9, 10, 55, 99] {
            // SUB A,B ; DAA
            let (mut cpu, mut bus) = setup(&[0x90, 0x27]);
            cpu.regs.set_a(to_bcd(x));
            cpu.regs.set8(Reg8::B, to_bcd(y));

            cpu.step(&mut bus);
            cpu.step(&mut bus);

            let diff = (x as i16 - y as i16).rem_euclid(100) as u8;
            assert_eq!(cpu.regs.a(), to_bcd(diff), "{x} - {y}");
            assert_eq!(cpu.get_flag(Flag::C), x < y, "{x} - {y}");
        }
    }
}

#[test]
fn conditional_branches_add_cost_only_when_taken() {
    // JR NZ,+2 with Z clear (taken) and set (not taken).
    let (mut cpu, mut bus) = setup(&[0x20, 0x02]);
    cpu.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0104);

    let (mut cpu, mut bus) = setup(&[0x20, 0x02]);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);

    // JP C,a16
    let (mut cpu, mut bus) = setup(&[0xDA, 0x00, 0x20]);
    cpu.set_flag(Flag::C, true);
    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x2000);

    let (mut cpu, mut bus) = setup(&[0xDA, 0x00, 0x20]);
    cpu.set_flag(Flag::C, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);

    // CALL Z,a16 then RET Z.
    let (mut cpu, mut bus) = setup(&[0xCC, 0x00, 0x30]);
    bus.memory[0x3000] = 0xC8;
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x3000);
    assert_eq!(cpu.step(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0103);

    let (mut cpu, mut bus) = setup(&[0xCC, 0x00, 0x30, 0xC8]);
    cpu.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0104);
}

#[test]
fn jr_handles_negative_offsets() {
    // JR -2 jumps back onto itself.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]);
    assert_eq!(cpu.step(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn call_and_rst_push_the_return_address() {
    // CALL 0x4000 ; at 0x4000: RST 28H
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x40]);
    bus.memory[0x4000] = 0xEF;
    cpu.regs.sp = 0xFFFE;

    assert_eq!(cpu.step(&mut bus), 24);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.read16(0xFFFC), 0x0103);

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.read16(0xFFFA), 0x4001);
}

#[test]
fn cb_prefixed_ops_use_their_own_table() {
    // SWAP A ; BIT 7,(HL) ; RL (HL) ; SET 0,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37, 0xCB, 0x7E, 0xCB, 0x16, 0xCB, 0xC6]);
    cpu.regs.set_a(0x12);
    cpu.regs.hl.set_pair(0xC000);
    bus.memory[0xC000] = 0x80;
    cpu.set_flag(Flag::C, false);

    assert_eq!(cpu.step(&mut bus), 8);
    assert_eq!(cpu.regs.a(), 0x21);
    assert_eq!(cpu.regs.pc, 0x0102);

    assert_eq!(cpu.step(&mut bus), 12);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.get_flag(Flag::C));
    assert!(cpu.get_flag(Flag::Z));

    assert_eq!(cpu.step(&mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x01);
    assert_eq!(cpu.regs.pc, 0x0108);
}

#[test]
fn rotate_accumulator_always_clears_zero() {
    // RLCA with A = 0 would set Z in the CB form.
    let (mut cpu, mut bus) = setup(&[0x07, 0xCB, 0x07]);
    cpu.regs.set_a(0x00);

    cpu.step(&mut bus);
    assert!(!cpu.get_flag(Flag::Z));

    cpu.step(&mut bus);
    assert!(cpu.get_flag(Flag::Z));
}

#[test]
fn hl_increment_and_decrement_loads() {
    // LD (HL+),A ; LD A,(HL-)
    let (mut cpu, mut bus) = setup(&[0x22, 0x3A]);
    cpu.regs.hl.set_pair(0xC000);
    cpu.regs.set_a(0x99);
    bus.memory[0xC001] = 0x55;

    cpu.step(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x99);
    assert_eq!(cpu.regs.hl.pair(), 0xC001);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.a(), 0x55);
    assert_eq!(cpu.regs.hl.pair(), 0xC000);
}

#[test]
fn flag_low_nibble_stays_clear_across_instructions() {
    // A mix of flag-setting instructions, including POP AF.
    let program = [0x3E, 0x0F, 0xC6, 0x01, 0x27, 0x37, 0x3F, 0xF5, 0xF1, 0xCB, 0x3F];
    let (mut cpu, mut bus) = setup(&program);
    cpu.regs.sp = 0xD000;
    for _ in 0..9 {
        cpu.step(&mut bus);
        assert_eq!(cpu.regs.f() & 0x0F, 0);
    }
}

#[test]
fn interrupts_are_serviced_in_priority_order() {
    let (mut cpu, mut bus) = setup(&[]);
    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0xFFFE;
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x1F;
    // Timer and joypad pending; timer wins.
    bus.memory[IF_ADDR as usize] = (Interrupt::TIMER | Interrupt::JOYPAD).bits();

    let taken = cpu.handle_interrupts(&mut bus);

    assert_eq!(taken, Some(20));
    assert_eq!(cpu.regs.pc, 0x0050);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[IF_ADDR as usize], Interrupt::JOYPAD.bits());
    assert_eq!(bus.read16(cpu.regs.sp), 0x1234);

    // IME is now clear, so the joypad request waits.
    assert_eq!(cpu.handle_interrupts(&mut bus), None);
    assert_eq!(cpu.regs.pc, 0x0050);
}

#[test]
fn interrupt_vectors_follow_source_bits() {
    let vectors: Vec<u16> = Interrupt::PRIORITY.iter().map(|i| i.vector()).collect();
    assert_eq!(vectors, [0x40, 0x48, 0x50, 0x58, 0x60]);
}

#[test]
fn disabled_sources_are_not_serviced() {
    let (mut cpu, mut bus) = setup(&[]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = Interrupt::VBLANK.bits();
    bus.memory[IF_ADDR as usize] = Interrupt::STAT.bits();

    assert_eq!(cpu.handle_interrupts(&mut bus), None);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn halt_idles_until_an_enabled_interrupt_is_pending() {
    // HALT ; NOP
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.halted);

    for _ in 0..3 {
        assert_eq!(cpu.step(&mut bus), HALT_IDLE_CYCLES);
        assert_eq!(cpu.regs.pc, 0x0101);
    }

    // Requested but not enabled: still halted.
    bus.memory[IF_ADDR as usize] = Interrupt::TIMER.bits();
    cpu.step(&mut bus);
    assert!(cpu.halted);

    // Enabled as well: wakes even with IME clear, then resumes execution.
    bus.memory[IE_ADDR as usize] = Interrupt::TIMER.bits();
    cpu.step(&mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn stop_freezes_until_joypad_interrupt() {
    // STOP 00 ; NOP
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);

    assert_eq!(cpu.step(&mut bus), 4);
    assert!(cpu.stopped);
    assert_eq!(cpu.regs.pc, 0x0102);

    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = Interrupt::TIMER.bits();
    assert_eq!(cpu.step(&mut bus), 0);
    assert!(cpu.stopped);

    bus.memory[IF_ADDR as usize] |= Interrupt::JOYPAD.bits();
    assert_eq!(cpu.step(&mut bus), 0);
    assert!(!cpu.stopped);
    assert_eq!(cpu.step(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0103);
}

#[test]
fn ei_and_reti_set_ime() {
    // DI ; EI ; RETI
    let (mut cpu, mut bus) = setup(&[0xF3, 0xFB, 0xF3, 0xD9]);
    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0x00;
    bus.memory[0xC001] = 0x02;

    cpu.step(&mut bus);
    assert!(!cpu.ime);
    cpu.step(&mut bus);
    assert!(cpu.ime);
    cpu.step(&mut bus);
    assert!(!cpu.ime);
    assert_eq!(cpu.step(&mut bus), 16);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0200);
}

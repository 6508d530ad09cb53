//! End-to-end scenarios against the assembled CPU, matching the
//! literal test cases enumerated for this simulator.

use rv32sim::cpu::{Cpu, CpuConfig};
use rv32sim::opcodes::*;

fn itype(imm: u32, rs1: u32, funct3: u32, rd: u32, opcode: u8) -> u32 {
    (imm << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode as u32
}

fn rtype(funct7: u8, rs2: u32, rs1: u32, funct3: u8, rd: u32, opcode: u8) -> u32 {
    ((funct7 as u32) << 25) | (rs2 << 20) | (rs1 << 15) | ((funct3 as u32) << 12) | (rd << 7) | opcode as u32
}

fn stype(imm: u32, rs2: u32, rs1: u32, funct3: u32, opcode: u8) -> u32 {
    let hi = (imm >> 5) & 0x7F;
    let lo = imm & 0x1F;
    (hi << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (lo << 7) | opcode as u32
}

fn btype(imm: i32, rs2: u32, rs1: u32, funct3: u32, opcode: u8) -> u32 {
    let imm = imm as u32;
    let bit12 = (imm >> 12) & 1;
    let bit11 = (imm >> 11) & 1;
    let bits10_5 = (imm >> 5) & 0x3F;
    let bits4_1 = (imm >> 1) & 0xF;
    (bit12 << 31) | (bits10_5 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (bits4_1 << 8) | (bit11 << 7) | opcode as u32
}

fn utype(imm20: u32, rd: u32, opcode: u8) -> u32 {
    (imm20 & 0xFFFF_F000) | (rd << 7) | opcode as u32
}

#[test]
fn base_program_scenario_produces_the_documented_register_and_memory_state() {
    let mut cpu = Cpu::new(CpuConfig::default());
    let program = vec![
        itype(5, 0, 0, 1, OP_IMM),                         // addi x1, x0, 5
        itype(10, 0, 0, 2, OP_IMM),                         // addi x2, x0, 10
        rtype(0, 2, 1, 0, 3, OP),                           // add  x3, x1, x2
        rtype(0, 2, 1, 0, 4, OP),                           // add  x4, x1, x2
        utype(0x0001_0000, 5, OP_LUI),                      // lui  x5, 0x10
        stype(0, 4, 5, 0b010, OP_STORE),                    // sw   x4, 0(x5)
        itype(0, 5, 0b010, 6, OP_LOAD),                     // lw   x6, 0(x5)
        itype(0, 6, 0, 6, OP_IMM),                           // addi x6, x6, 0 (no-op, keeps x6 = 15)
    ];
    cpu.instruction_memory_mut().load_program(&program, 0).unwrap();
    cpu.run(20);

    assert_eq!(cpu.registers().read(1).unwrap(), 5);
    assert_eq!(cpu.registers().read(2).unwrap(), 10);
    assert_eq!(cpu.registers().read(3).unwrap(), 15);
    assert_eq!(cpu.registers().read(4).unwrap(), 15);
    assert_eq!(cpu.registers().read(5).unwrap(), 0x0001_0000);
    assert_eq!(cpu.data_memory().read_word(0x0001_0000).unwrap(), 0x0000_000F);
}

#[test]
fn taken_branch_skips_the_fallthrough_instructions() {
    let mut cpu = Cpu::new(CpuConfig::default());
    let program = vec![
        itype(1, 0, 0, 1, OP_IMM),                          // addi x1, x0, 1
        itype(2, 0, 0, 2, OP_IMM),                          // addi x2, x0, 2
        btype(12, 2, 1, 0b100, OP_BRANCH),                  // blt x1, x2, +12 -> taken
        itype(99, 0, 0, 3, OP_IMM),                          // addi x3, x0, 99 (skipped)
        itype(0, 0, 0, 0, OP_IMM),                           // nop (skipped)
        itype(7, 0, 0, 4, OP_IMM),                           // addi x4, x0, 7 (landing pad)
    ];
    cpu.instruction_memory_mut().load_program(&program, 0).unwrap();
    cpu.run(10);

    assert_eq!(cpu.registers().read(3).unwrap(), 0, "skipped instruction must not execute");
    assert_eq!(cpu.registers().read(4).unwrap(), 7);
}

#[test]
fn mul_and_div_family_execute_through_the_mdu() {
    let mut cpu = Cpu::new(CpuConfig::default());
    let program = vec![
        itype(6, 0, 0, 1, OP_IMM),                          // addi x1, x0, 6
        itype(7, 0, 0, 2, OP_IMM),                          // addi x2, x0, 7
        rtype(FUNCT7_MULDIV, 2, 1, FUNCT3_MUL, 3, OP),      // mul  x3, x1, x2  -> 42
        rtype(FUNCT7_MULDIV, 2, 1, FUNCT3_MULH, 4, OP),     // mulh x4, x1, x2  -> 0 (fits in 32 bits)
        rtype(FUNCT7_MULDIV, 1, 2, FUNCT3_DIV, 5, OP),      // div  x5, x2, x1  -> 1
        rtype(FUNCT7_MULDIV, 1, 2, FUNCT3_REM, 6, OP),      // rem  x6, x2, x1  -> 1
    ];
    cpu.instruction_memory_mut().load_program(&program, 0).unwrap();
    cpu.run(10);

    assert_eq!(cpu.registers().read(3).unwrap(), 42);
    assert_eq!(cpu.registers().read(4).unwrap(), 0);
    assert_eq!(cpu.registers().read(5).unwrap(), 1);
    assert_eq!(cpu.registers().read(6).unwrap(), 1);
}

#[test]
fn halts_on_zero_word_and_reports_zero_cycles_after_reset() {
    let mut cpu = Cpu::new(CpuConfig::default());
    cpu.instruction_memory_mut().load_program(&[0u32], 0).unwrap();
    let summary = cpu.run(5);
    assert!(summary.halted);
    cpu.reset();
    assert_eq!(cpu.cycle(), 0);
    assert!(!cpu.halted());
}

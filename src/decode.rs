//! Instruction decode: split a 32-bit word into its fields and the five
//! immediate shapes, and classify it into a named instruction (or
//! `Unknown` for anything this core doesn't recognize).

use crate::bitvec::sign_extend_u32;
use crate::fields::{self, extract_field};
use crate::opcodes::*;

/// A fully decoded instruction: every field the control unit and
/// datapath might need, computed once per fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstr {
    pub raw: u32,
    pub opcode: u8,
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub funct3: u8,
    pub funct7: u8,
    pub imm_i: i32,
    pub imm_s: i32,
    pub imm_b: i32,
    pub imm_u: u32,
    pub imm_j: i32,
}

fn imm_i(instr: u32) -> i32 {
    sign_extend_u32(extract_field(instr, 31, 20), 11) as i32
}

fn imm_s(instr: u32) -> i32 {
    let hi = extract_field(instr, 31, 25);
    let lo = extract_field(instr, 11, 7);
    sign_extend_u32((hi << 5) | lo, 11) as i32
}

fn imm_b(instr: u32) -> i32 {
    let bit12 = extract_field(instr, 31, 31);
    let bit11 = extract_field(instr, 7, 7);
    let bits10_5 = extract_field(instr, 30, 25);
    let bits4_1 = extract_field(instr, 11, 8);
    let imm = (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1);
    sign_extend_u32(imm, 12) as i32
}

fn imm_u(instr: u32) -> u32 {
    extract_field(instr, 31, 12) << 12
}

fn imm_j(instr: u32) -> i32 {
    let bit20 = extract_field(instr, 31, 31);
    let bits19_12 = extract_field(instr, 19, 12);
    let bit11 = extract_field(instr, 20, 20);
    let bits10_1 = extract_field(instr, 30, 21);
    let imm = (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1);
    sign_extend_u32(imm, 20) as i32
}

/// Decode every field and immediate shape from a raw instruction word.
pub fn decode(instr: u32) -> DecodedInstr {
    DecodedInstr {
        raw: instr,
        opcode: fields::opcode(instr),
        rd: fields::rd(instr),
        rs1: fields::rs1(instr),
        rs2: fields::rs2(instr),
        funct3: fields::funct3(instr),
        funct7: fields::funct7(instr),
        imm_i: imm_i(instr),
        imm_s: imm_s(instr),
        imm_b: imm_b(instr),
        imm_u: imm_u(instr),
        imm_j: imm_j(instr),
    }
}

/// A named RV32I/M instruction, or `Unknown` for anything the decoder
/// cannot classify from (opcode, funct3, funct7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrName {
    Add,
    Sub,
    Sll,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Addi,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Sb,
    Sh,
    Sw,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Jal,
    Jalr,
    Lui,
    Auipc,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    Unknown,
}

/// Classify a decoded instruction from (opcode, funct3, funct7) per the
/// standard RV32I/M decode table.
pub fn classify(d: &DecodedInstr) -> InstrName {
    use InstrName::*;
    match d.opcode {
        OP => {
            if d.funct7 == FUNCT7_MULDIV {
                return match d.funct3 {
                    FUNCT3_MUL => Mul,
                    FUNCT3_MULH => Mulh,
                    FUNCT3_MULHSU => Mulhsu,
                    FUNCT3_MULHU => Mulhu,
                    FUNCT3_DIV => Div,
                    FUNCT3_DIVU => Divu,
                    FUNCT3_REM => Rem,
                    FUNCT3_REMU => Remu,
                    _ => Unknown,
                };
            }
            match (d.funct3, d.funct7) {
                (FUNCT3_ADD_SUB, 0) => Add,
                (FUNCT3_ADD_SUB, FUNCT7_ALT) => Sub,
                (FUNCT3_SLL, 0) => Sll,
                (FUNCT3_XOR, 0) => Xor,
                (FUNCT3_SRL_SRA, 0) => Srl,
                (FUNCT3_SRL_SRA, FUNCT7_ALT) => Sra,
                (FUNCT3_OR, 0) => Or,
                (FUNCT3_AND, 0) => And,
                _ => Unknown,
            }
        }
        OP_IMM => match d.funct3 {
            FUNCT3_ADD_SUB => Addi,
            FUNCT3_XOR => Xori,
            FUNCT3_OR => Ori,
            FUNCT3_AND => Andi,
            FUNCT3_SLL => Slli,
            FUNCT3_SRL_SRA => {
                if d.funct7 == FUNCT7_ALT {
                    Srai
                } else {
                    Srli
                }
            }
            _ => Unknown,
        },
        OP_LOAD => match d.funct3 {
            FUNCT3_LB => Lb,
            FUNCT3_LH => Lh,
            FUNCT3_LW => Lw,
            FUNCT3_LBU => Lbu,
            FUNCT3_LHU => Lhu,
            _ => Unknown,
        },
        OP_STORE => match d.funct3 {
            FUNCT3_SB => Sb,
            FUNCT3_SH => Sh,
            FUNCT3_SW => Sw,
            _ => Unknown,
        },
        OP_BRANCH => match d.funct3 {
            FUNCT3_BEQ => Beq,
            FUNCT3_BNE => Bne,
            FUNCT3_BLT => Blt,
            FUNCT3_BGE => Bge,
            FUNCT3_BLTU => Bltu,
            FUNCT3_BGEU => Bgeu,
            _ => Unknown,
        },
        OP_JAL => Jal,
        OP_JALR => Jalr,
        OP_LUI => Lui,
        OP_AUIPC => Auipc,
        _ => Unknown,
    }
}

//! Named opcode and funct3 constants for the supported RV32I/M subset.

pub const OP_LOAD: u8 = 0x03;
pub const OP_IMM: u8 = 0x13;
pub const OP_AUIPC: u8 = 0x17;
pub const OP_STORE: u8 = 0x23;
pub const OP: u8 = 0x33;
pub const OP_LUI: u8 = 0x37;
pub const OP_BRANCH: u8 = 0x63;
pub const OP_JALR: u8 = 0x67;
pub const OP_JAL: u8 = 0x6F;

pub const FUNCT3_BEQ: u8 = 0b000;
pub const FUNCT3_BNE: u8 = 0b001;
pub const FUNCT3_BLT: u8 = 0b100;
pub const FUNCT3_BGE: u8 = 0b101;
pub const FUNCT3_BLTU: u8 = 0b110;
pub const FUNCT3_BGEU: u8 = 0b111;

pub const FUNCT3_LB: u8 = 0b000;
pub const FUNCT3_LH: u8 = 0b001;
pub const FUNCT3_LW: u8 = 0b010;
pub const FUNCT3_LBU: u8 = 0b100;
pub const FUNCT3_LHU: u8 = 0b101;

pub const FUNCT3_SB: u8 = 0b000;
pub const FUNCT3_SH: u8 = 0b001;
pub const FUNCT3_SW: u8 = 0b010;

pub const FUNCT3_ADD_SUB: u8 = 0b000;
pub const FUNCT3_SLL: u8 = 0b001;
// 0b010 (SLT) and 0b011 (SLTU) are not decoded; see DESIGN.md scope boundary.
pub const FUNCT3_XOR: u8 = 0b100;
pub const FUNCT3_SRL_SRA: u8 = 0b101;
pub const FUNCT3_OR: u8 = 0b110;
pub const FUNCT3_AND: u8 = 0b111;

pub const FUNCT7_ALT: u8 = 0b0100000;
pub const FUNCT7_MULDIV: u8 = 0b0000001;

pub const FUNCT3_MUL: u8 = 0b000;
pub const FUNCT3_MULH: u8 = 0b001;
pub const FUNCT3_MULHSU: u8 = 0b010;
pub const FUNCT3_MULHU: u8 = 0b011;
pub const FUNCT3_DIV: u8 = 0b100;
pub const FUNCT3_DIVU: u8 = 0b101;
pub const FUNCT3_REM: u8 = 0b110;
pub const FUNCT3_REMU: u8 = 0b111;

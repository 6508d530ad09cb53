//! Control unit: a pure function from (opcode, funct3, funct7) to a
//! control-signal bundle. No instruction state is touched here -- the
//! CPU datapath reads the bundle and does all the work.

use crate::decode::{classify, DecodedInstr, InstrName};
use crate::mdu::MulMode;
use crate::shifter::ShiftOp;

/// Which ALU operation (or LUI passthrough) the execute stage performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Lui,
}

/// Which of the five immediate encodings feeds the ALU-B operand / the
/// PC-relative adder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmType {
    R,
    I,
    S,
    B,
    U,
    J,
}

/// Which MDU operation a RV32M instruction routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MduOp {
    Mul,
    Mulh(MulMode),
    Div,
    Divu,
    Rem,
    Remu,
}

/// Branch condition for a conditional-branch instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCond {
    Eq,
    Ne,
    Lt,
    Ge,
    Ltu,
    Geu,
}

/// The full set of control signals the datapath consults for one
/// instruction. Defaults (via [`ControlBundle::default`]) are all
/// zero/false with `alu_op = Add` and `imm_type = I`, per the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBundle {
    pub reg_write: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub mem_to_reg: bool,
    pub alu_src: bool,
    pub branch: Option<BranchCond>,
    pub jump: bool,
    pub jalr: bool,
    pub use_shift: Option<ShiftOp>,
    pub use_mdu: Option<MduOp>,
    pub alu_op: AluOp,
    pub imm_type: ImmType,
    /// Narrows a load/store to a byte, halfword, or full word, and
    /// whether a load sign-extends or zero-extends. `None` for word
    /// accesses (the spec's minimum subset only requires words).
    pub mem_width: MemWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemWidth {
    Byte { signed: bool },
    Half { signed: bool },
    Word,
}

impl Default for ControlBundle {
    fn default() -> Self {
        Self {
            reg_write: false,
            mem_read: false,
            mem_write: false,
            mem_to_reg: false,
            alu_src: false,
            branch: None,
            jump: false,
            jalr: false,
            use_shift: None,
            use_mdu: None,
            alu_op: AluOp::Add,
            imm_type: ImmType::I,
            mem_width: MemWidth::Word,
        }
    }
}

/// Derive the control bundle for a decoded instruction. Unknown
/// instructions get the all-default bundle, which is a no-op: PC simply
/// advances by 4 with no register or memory side effects.
pub fn control(d: &DecodedInstr) -> ControlBundle {
    let name = classify(d);
    let mut c = ControlBundle::default();
    use InstrName::*;
    match name {
        Add => {
            c.reg_write = true;
            c.alu_op = AluOp::Add;
            c.imm_type = ImmType::R;
        }
        Sub => {
            c.reg_write = true;
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::R;
        }
        And => {
            c.reg_write = true;
            c.alu_op = AluOp::And;
            c.imm_type = ImmType::R;
        }
        Or => {
            c.reg_write = true;
            c.alu_op = AluOp::Or;
            c.imm_type = ImmType::R;
        }
        Xor => {
            c.reg_write = true;
            c.alu_op = AluOp::Xor;
            c.imm_type = ImmType::R;
        }
        Sll => {
            c.reg_write = true;
            c.use_shift = Some(ShiftOp::Sll);
            c.imm_type = ImmType::R;
        }
        Srl => {
            c.reg_write = true;
            c.use_shift = Some(ShiftOp::Srl);
            c.imm_type = ImmType::R;
        }
        Sra => {
            c.reg_write = true;
            c.use_shift = Some(ShiftOp::Sra);
            c.imm_type = ImmType::R;
        }
        Addi => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::Add;
            c.imm_type = ImmType::I;
        }
        Andi => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::And;
            c.imm_type = ImmType::I;
        }
        Ori => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::Or;
            c.imm_type = ImmType::I;
        }
        Xori => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::Xor;
            c.imm_type = ImmType::I;
        }
        Slli => {
            c.reg_write = true;
            c.alu_src = true;
            c.use_shift = Some(ShiftOp::Sll);
            c.imm_type = ImmType::I;
        }
        Srli => {
            c.reg_write = true;
            c.alu_src = true;
            c.use_shift = Some(ShiftOp::Srl);
            c.imm_type = ImmType::I;
        }
        Srai => {
            c.reg_write = true;
            c.alu_src = true;
            c.use_shift = Some(ShiftOp::Sra);
            c.imm_type = ImmType::I;
        }
        Lw | Lb | Lh | Lbu | Lhu => {
            c.reg_write = true;
            c.mem_read = true;
            c.mem_to_reg = true;
            c.alu_src = true;
            c.alu_op = AluOp::Add;
            c.imm_type = ImmType::I;
            c.mem_width = match name {
                Lb => MemWidth::Byte { signed: true },
                Lbu => MemWidth::Byte { signed: false },
                Lh => MemWidth::Half { signed: true },
                Lhu => MemWidth::Half { signed: false },
                _ => MemWidth::Word,
            };
        }
        Sw | Sb | Sh => {
            c.mem_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::Add;
            c.imm_type = ImmType::S;
            c.mem_width = match name {
                Sb => MemWidth::Byte { signed: false },
                Sh => MemWidth::Half { signed: false },
                _ => MemWidth::Word,
            };
        }
        Beq => {
            c.branch = Some(BranchCond::Eq);
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::B;
        }
        Bne => {
            c.branch = Some(BranchCond::Ne);
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::B;
        }
        Blt => {
            c.branch = Some(BranchCond::Lt);
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::B;
        }
        Bge => {
            c.branch = Some(BranchCond::Ge);
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::B;
        }
        Bltu => {
            c.branch = Some(BranchCond::Ltu);
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::B;
        }
        Bgeu => {
            c.branch = Some(BranchCond::Geu);
            c.alu_op = AluOp::Sub;
            c.imm_type = ImmType::B;
        }
        Jal => {
            c.reg_write = true;
            c.jump = true;
            c.imm_type = ImmType::J;
        }
        Jalr => {
            c.reg_write = true;
            c.alu_src = true;
            c.jump = true;
            c.jalr = true;
            c.alu_op = AluOp::Add;
            c.imm_type = ImmType::I;
        }
        Lui => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::Lui;
            c.imm_type = ImmType::U;
        }
        Auipc => {
            c.reg_write = true;
            c.alu_src = true;
            c.alu_op = AluOp::Add;
            c.imm_type = ImmType::U;
        }
        Mul => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Mul);
            c.imm_type = ImmType::R;
        }
        Mulh => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Mulh(MulMode::SignedSigned));
            c.imm_type = ImmType::R;
        }
        Mulhsu => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Mulh(MulMode::SignedUnsigned));
            c.imm_type = ImmType::R;
        }
        Mulhu => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Mulh(MulMode::UnsignedUnsigned));
            c.imm_type = ImmType::R;
        }
        Div => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Div);
            c.imm_type = ImmType::R;
        }
        Divu => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Divu);
            c.imm_type = ImmType::R;
        }
        Rem => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Rem);
            c.imm_type = ImmType::R;
        }
        Remu => {
            c.reg_write = true;
            c.use_mdu = Some(MduOp::Remu);
            c.imm_type = ImmType::R;
        }
        Unknown => {}
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::opcodes::*;

    fn rtype(funct7: u32, rs2: u32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
        (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
    }

    #[test]
    fn unknown_instruction_yields_default_no_op_bundle() {
        let d = decode(0b1111111);
        let c = control(&d);
        assert_eq!(c, ControlBundle::default());
    }

    #[test]
    fn lw_sets_load_signals() {
        let instr = (0 << 20) | (2 << 15) | (0b010 << 12) | (1 << 7) | OP_LOAD as u32;
        let c = control(&decode(instr));
        assert!(c.reg_write);
        assert!(c.mem_read);
        assert!(c.mem_to_reg);
        assert!(c.alu_src);
        assert_eq!(c.imm_type, ImmType::I);
    }

    #[test]
    fn sw_sets_store_signals() {
        let instr = (0 << 25) | (3 << 20) | (2 << 15) | (0b010 << 12) | (0 << 7) | OP_STORE as u32;
        let c = control(&decode(instr));
        assert!(c.mem_write);
        assert!(!c.reg_write);
        assert_eq!(c.imm_type, ImmType::S);
    }

    #[test]
    fn mul_routes_to_mdu_not_alu() {
        let instr = rtype(FUNCT7_MULDIV, 3, 2, FUNCT3_MUL, 1, OP as u32);
        let c = control(&decode(instr));
        assert!(c.reg_write);
        assert_eq!(c.use_mdu, Some(MduOp::Mul));
    }

    #[test]
    fn jal_x0_zero_is_detectable_from_bundle_and_fields() {
        let d = decode(OP_JAL as u32); // rd=0, imm_j=0
        let c = control(&d);
        assert!(c.jump);
        assert!(!c.jalr);
        assert_eq!(d.rd, 0);
        assert_eq!(d.imm_j, 0);
    }
}

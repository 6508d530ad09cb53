//! The single-cycle CPU: the integrator that wires the register file,
//! memories, decoder, control unit, ALU/shifter/MDU, and PC update
//! logic together into one fetch-decode-execute-writeback cycle.

use crate::adder;
use crate::control::{control, AluOp, BranchCond, MduOp, MemWidth};
use crate::decode::decode;
use crate::mdu;
use crate::memory::{DataMemory, InstructionMemory, DEFAULT_DMEM_BASE, DEFAULT_DMEM_SIZE, DEFAULT_IMEM_BASE};
use crate::register_file::RegisterFile;
use crate::shifter::shift32;

/// Memory-layout knobs a `Cpu` is constructed with.
#[derive(Debug, Clone, Copy)]
pub struct CpuConfig {
    pub imem_base: u32,
    pub imem_size: u32,
    pub dmem_base: u32,
    pub dmem_size: u32,
    pub start_pc: u32,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            imem_base: DEFAULT_IMEM_BASE,
            imem_size: 4096,
            dmem_base: DEFAULT_DMEM_BASE,
            dmem_size: DEFAULT_DMEM_SIZE,
            start_pc: DEFAULT_IMEM_BASE,
        }
    }
}

/// Outcome of a single cycle, reported to callers that want per-cycle
/// tracing (see [`crate::trace`]).
#[derive(Debug, Clone, Copy)]
pub struct CycleEvent {
    pub cycle: u64,
    pub pc: u32,
}

/// Summary returned by [`Cpu::run`].
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub cycles: u64,
    pub instructions: u64,
    pub halted: bool,
    pub pc: u32,
}

#[derive(Debug)]
pub struct Cpu {
    pc: u32,
    halted: bool,
    cycle: u64,
    instret: u64,
    config: CpuConfig,
    regs: RegisterFile,
    imem: InstructionMemory,
    dmem: DataMemory,
}

impl Cpu {
    pub fn new(config: CpuConfig) -> Self {
        Self {
            pc: config.start_pc,
            halted: false,
            cycle: 0,
            instret: 0,
            imem: InstructionMemory::new(config.imem_base, config.imem_size),
            dmem: DataMemory::new(config.dmem_base, config.dmem_size),
            config,
            regs: RegisterFile::new(),
        }
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn instructions_retired(&self) -> u64 {
        self.instret
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn data_memory(&self) -> &DataMemory {
        &self.dmem
    }

    pub fn instruction_memory_mut(&mut self) -> &mut InstructionMemory {
        &mut self.imem
    }

    /// Re-zero registers and counters. Memory images are left intact
    /// (they persist across resets, per the CPU lifecycle contract).
    pub fn reset(&mut self) {
        self.pc = self.config.start_pc;
        self.halted = false;
        self.cycle = 0;
        self.instret = 0;
        self.regs.reset();
    }

    /// Execute one fetch-decode-execute-writeback cycle. Returns
    /// `Some(event)` if the cycle ran, or `None` if the CPU was already
    /// halted. A non-fatal memory or decode fault is logged and the
    /// cycle degrades gracefully (zero read / dropped write / no-op)
    /// rather than aborting.
    pub fn step(&mut self) -> Option<CycleEvent> {
        if self.halted {
            return None;
        }

        let event = CycleEvent {
            cycle: self.cycle,
            pc: self.pc,
        };

        let instr = match self.imem.read_word(self.pc) {
            Ok(word) => word,
            Err(e) => {
                log::warn!("instruction fetch at 0x{:08x} faulted: {e}; treating as halt", self.pc);
                0
            }
        };

        if instr == 0 {
            log::debug!("halting on zero instruction at pc=0x{:08x}", self.pc);
            self.halted = true;
            self.cycle += 1;
            return Some(event);
        }

        let d = decode(instr);
        let c = control(&d);

        if c == Default::default() {
            log::debug!("unrecognized opcode 0x{:02x} at pc=0x{:08x}; no-op", d.opcode, self.pc);
        }

        let rs1_value = self.regs.read(d.rs1).expect("rs1 field is always < 32");
        let rs2_value = self.regs.read(d.rs2).expect("rs2 field is always < 32");

        let immediate = match c.imm_type {
            crate::control::ImmType::R => 0,
            crate::control::ImmType::I => d.imm_i as u32,
            crate::control::ImmType::S => d.imm_s as u32,
            crate::control::ImmType::B => d.imm_b as u32,
            crate::control::ImmType::U => d.imm_u,
            crate::control::ImmType::J => d.imm_j as u32,
        };
        let alu_b = if c.alu_src { immediate } else { rs2_value };

        // JAL x0, 0 is the explicit halt variant: a self-jump writing
        // nothing meaningful.
        if c.jump && !c.jalr && d.rd == 0 && d.imm_j == 0 {
            log::debug!("halting on JAL x0, 0 at pc=0x{:08x}", self.pc);
            self.halted = true;
            self.cycle += 1;
            return Some(event);
        }

        let mut alu_result = adder::AluResult {
            result: 0,
            n: false,
            z: false,
            c: false,
            v: false,
        };

        if let Some(mdu_op) = c.use_mdu {
            alu_result.result = match mdu_op {
                MduOp::Mul => mdu::mul(rs1_value, rs2_value, mdu::MulMode::SignedSigned).low,
                MduOp::Mulh(mode) => mdu::mul(rs1_value, rs2_value, mode).high,
                MduOp::Div => mdu::div_signed(rs1_value as i32, rs2_value as i32).quotient,
                MduOp::Divu => mdu::div_unsigned(rs1_value, rs2_value).quotient,
                MduOp::Rem => mdu::div_signed(rs1_value as i32, rs2_value as i32).remainder,
                MduOp::Remu => mdu::div_unsigned(rs1_value, rs2_value).remainder,
            };
        } else if let Some(shift_op) = c.use_shift {
            let shamt = if c.alu_src { immediate } else { rs2_value } & 0x1F;
            alu_result.result = shift32(rs1_value, shamt, shift_op);
            alu_result.z = alu_result.result == 0;
            alu_result.n = alu_result.result & 0x8000_0000 != 0;
        } else if c.alu_op == AluOp::Lui {
            alu_result.result = d.imm_u;
        } else {
            alu_result = match c.alu_op {
                AluOp::Add => adder::add(rs1_value, alu_b),
                AluOp::Sub => adder::sub(rs1_value, alu_b),
                AluOp::And => flagged(rs1_value & alu_b),
                AluOp::Or => flagged(rs1_value | alu_b),
                AluOp::Xor => flagged(rs1_value ^ alu_b),
                AluOp::Lui => unreachable!(),
            };
        }

        // AUIPC adds the U-immediate to the PC rather than to rs1.
        let instr_result = if c.alu_op == AluOp::Add && c.imm_type == crate::control::ImmType::U {
            adder::add(self.pc, d.imm_u).result
        } else {
            alu_result.result
        };

        let mut mem_word = 0u32;
        if c.mem_read {
            mem_word = self.load(instr_result, c.mem_width);
        }
        if c.mem_write {
            self.store(instr_result, rs2_value, c.mem_width);
        }

        let write_data = if c.mem_to_reg {
            mem_word
        } else if c.jump {
            self.pc.wrapping_add(4)
        } else {
            instr_result
        };

        let branch_taken = match c.branch {
            Some(cond) => evaluate_branch(cond, rs1_value, rs2_value),
            None => false,
        };

        if c.reg_write {
            self.regs.write(d.rd, write_data, true).expect("rd field is always < 32");
        }
        self.regs.clock_edge();

        let next_pc = if c.jump && c.jalr {
            let target = (rs1_value as i32).wrapping_add(d.imm_i) as u32 & !1;
            target
        } else if c.jump {
            (self.pc as i32).wrapping_add(d.imm_j) as u32
        } else if branch_taken {
            (self.pc as i32).wrapping_add(d.imm_b) as u32
        } else {
            self.pc.wrapping_add(4)
        };

        self.pc = next_pc;
        self.cycle += 1;
        self.instret += 1;
        Some(event)
    }

    fn load(&self, addr: u32, width: MemWidth) -> u32 {
        match width {
            MemWidth::Word => match self.dmem.read_word(addr) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("data load fault at 0x{addr:08x}: {e}; substituting zero");
                    0
                }
            },
            MemWidth::Byte { signed } => match self.dmem.read_byte(addr) {
                Ok(b) => {
                    if signed {
                        b as i8 as i32 as u32
                    } else {
                        b as u32
                    }
                }
                Err(e) => {
                    log::warn!("data load fault at 0x{addr:08x}: {e}; substituting zero");
                    0
                }
            },
            MemWidth::Half { signed } => match self.dmem.read_halfword(addr) {
                Ok(h) => {
                    if signed {
                        h as i16 as i32 as u32
                    } else {
                        h as u32
                    }
                }
                Err(e) => {
                    log::warn!("data load fault at 0x{addr:08x}: {e}; substituting zero");
                    0
                }
            },
        }
    }

    fn store(&mut self, addr: u32, value: u32, width: MemWidth) {
        let result = match width {
            MemWidth::Word => self.dmem.write_word(addr, value),
            MemWidth::Byte { .. } => self.dmem.write_byte(addr, value as u8),
            MemWidth::Half { .. } => self.dmem.write_halfword(addr, value as u16),
        };
        if let Err(e) = result {
            log::warn!("data store fault at 0x{addr:08x}: {e}; write dropped");
        }
    }

    /// Run up to `max_cycles` cycles, stopping early if the CPU halts.
    pub fn run(&mut self, max_cycles: u64) -> RunSummary {
        for _ in 0..max_cycles {
            if self.step().is_none() {
                break;
            }
        }
        RunSummary {
            cycles: self.cycle,
            instructions: self.instret,
            halted: self.halted,
            pc: self.pc,
        }
    }
}

fn flagged(result: u32) -> adder::AluResult {
    adder::AluResult {
        result,
        n: result & 0x8000_0000 != 0,
        z: result == 0,
        c: false,
        v: false,
    }
}

fn evaluate_branch(cond: BranchCond, a: u32, b: u32) -> bool {
    match cond {
        BranchCond::Eq => a == b,
        BranchCond::Ne => a != b,
        BranchCond::Lt => (a as i32) < (b as i32),
        BranchCond::Ge => (a as i32) >= (b as i32),
        BranchCond::Ltu => a < b,
        BranchCond::Geu => a >= b,
    }
}

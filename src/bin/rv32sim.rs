//! Command-line driver: load a hex program, run it to completion (or
//! to a cycle cap), and print the final register/memory state.

use clap::Parser;
use clap_num::maybe_hex;
use log::LevelFilter;
use rv32sim::cpu::{Cpu, CpuConfig};
use rv32sim::loader::load_program_file;
use rv32sim::memory::{DEFAULT_DMEM_BASE, DEFAULT_DMEM_SIZE, DEFAULT_IMEM_BASE};
use rv32sim::trace::{format_final_state, trace_cycle};
use std::process::ExitCode;

/// Run a RV32I/M program on a single-cycle simulator.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Path to a hex program file (one 32-bit word per line).
    program: String,

    /// Print a trace line for every cycle executed.
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of cycles to run before giving up on halting.
    #[arg(long, default_value_t = 10_000)]
    max_cycles: u64,

    /// Address the first instruction word is loaded at.
    #[arg(long, value_parser=maybe_hex::<u32>, default_value_t = DEFAULT_IMEM_BASE)]
    start_addr: u32,

    /// Size in bytes of the instruction memory window.
    #[arg(long, value_parser=maybe_hex::<u32>, default_value_t = 4096)]
    imem_size: u32,

    /// Base address of data memory.
    #[arg(long, value_parser=maybe_hex::<u32>, default_value_t = DEFAULT_DMEM_BASE)]
    data_base: u32,

    /// Size in bytes of the data memory window.
    #[arg(long, value_parser=maybe_hex::<u32>, default_value_t = DEFAULT_DMEM_SIZE)]
    data_size: u32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Info } else { LevelFilter::Warn })
        .parse_env(env_logger::Env::default())
        .init();

    let imem = match load_program_file(&args.program, args.start_addr, args.imem_size) {
        Ok(imem) => imem,
        Err(e) => {
            eprintln!("failed to load {}: {e}", args.program);
            return ExitCode::FAILURE;
        }
    };

    let config = CpuConfig {
        imem_base: args.start_addr.saturating_sub(args.start_addr % 4),
        imem_size: args.imem_size,
        dmem_base: args.data_base,
        dmem_size: args.data_size,
        start_pc: args.start_addr,
    };
    let mut cpu = Cpu::new(config);
    *cpu.instruction_memory_mut() = imem;

    if args.verbose {
        loop {
            match cpu.step() {
                Some(event) => trace_cycle(event),
                None => break,
            }
            if cpu.cycle() >= args.max_cycles {
                break;
            }
        }
    } else {
        cpu.run(args.max_cycles);
    }

    println!("{}", format_final_state(&cpu));

    if cpu.halted() {
        ExitCode::SUCCESS
    } else {
        eprintln!("did not halt within {} cycles", args.max_cycles);
        ExitCode::FAILURE
    }
}

//! Execution tracing: a per-cycle log line, and a final-state dump for
//! register and data-memory contents after a run completes.

use crate::cpu::{Cpu, CycleEvent};

/// Receives one event per executed cycle. The CLI's driving loop calls
/// this after every `Cpu::step()` when tracing is enabled.
pub trait Tracer {
    fn on_cycle(&mut self, event: CycleEvent);
}

/// A [`Tracer`] that forwards each cycle to the `log` facade at `info`
/// level, in the `Cycle N: PC = 0xADDR` form the CLI's verbose mode
/// prints.
#[derive(Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn on_cycle(&mut self, event: CycleEvent) {
        log::info!("Cycle {}: PC = 0x{:08X}", event.cycle, event.pc);
    }
}

/// Emit one `Cycle N: PC = 0xADDR` line for `event` via [`LogTracer`].
/// A free-function convenience for callers that don't need to hold a
/// tracer across the whole run.
pub fn trace_cycle(event: CycleEvent) {
    LogTracer.on_cycle(event);
}

/// Render the non-zero registers and populated data-memory words of a
/// finished run, in the format the CLI prints on exit.
pub fn format_final_state(cpu: &Cpu) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "halted = {}, cycles = {}, instructions = {}, pc = 0x{:08x}\n",
        cpu.halted(),
        cpu.cycle(),
        cpu.instructions_retired(),
        cpu.pc()
    ));

    out.push_str("registers:\n");
    let mut regs: Vec<(u8, u32)> = cpu.registers().nonzero().collect();
    regs.sort_by_key(|(i, _)| *i);
    if regs.is_empty() {
        out.push_str("  (all zero)\n");
    }
    for (i, v) in regs {
        out.push_str(&format!("  x{i}: 0x{v:08x} ({})\n", v as i32));
    }

    out.push_str("data memory:\n");
    let mut words: Vec<(u32, u32)> = cpu.data_memory().populated().collect();
    words.sort_by_key(|(a, _)| *a);
    if words.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (addr, value) in words {
        out.push_str(&format!("  0x{addr:08x}: 0x{value:08x}\n"));
    }

    out
}

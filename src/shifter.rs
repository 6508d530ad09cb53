//! Barrel shifter: any shift amount resolves in a single step rather
//! than one bit position at a time.

/// Which of the three RV32I shift operations to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Sll,
    Srl,
    Sra,
}

/// Shift `data` (treated as a `width`-bit value, `width <= 32`) by the
/// low 5 bits of `amount` (masked with `0x1F`, per the ISA's shamt
/// field), according to `op`.
pub fn shift(data: u32, amount: u32, op: ShiftOp, width: u32) -> u32 {
    let shamt = amount & 0x1F;
    let truncate = |v: u32| if width >= 32 { v } else { v & ((1u32 << width) - 1) };
    match op {
        ShiftOp::Sll => truncate(if shamt as u32 >= width { 0 } else { data << shamt }),
        ShiftOp::Srl => {
            if shamt >= width {
                0
            } else {
                truncate(data) >> shamt
            }
        }
        ShiftOp::Sra => {
            let sign_bit = (width > 0) && (data >> (width - 1)) & 1 != 0;
            if shamt >= width {
                if sign_bit {
                    truncate(u32::MAX)
                } else {
                    0
                }
            } else {
                let value = truncate(data);
                let shifted = value >> shamt;
                if sign_bit {
                    let fill = !((1u32 << (width - shamt)) - 1);
                    truncate(shifted | fill)
                } else {
                    shifted
                }
            }
        }
    }
}

/// Shift a full 32-bit word; the common case used by the CPU datapath.
pub fn shift32(data: u32, amount: u32, op: ShiftOp) -> u32 {
    shift(data, amount, op, 32)
}

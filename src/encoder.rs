use crate::constant::{self, GbcCommand};
use crate::data::{AssemblyError, AssemblyErrorCode, CodeClass};

// Shifts a field value into its slot. The slot width comes from the mask
// itself, and a value that does not fit is an error, never a silent
// truncation.
fn field(
    class: CodeClass,
    name: &str,
    value: u32,
    mask: u32,
    shift: u32,
) -> Result<u32, AssemblyError> {
    let max = mask >> shift;
    if value > max {
        return Err(AssemblyError::new(
            AssemblyErrorCode::FieldOverflow,
            format!(
                "{class} field [ {name} ] value [ {value:#x} ] exceeds its slot [ max {max:#x} ]"
            ),
        ));
    }
    Ok(value << shift)
}

fn require_func(class: CodeClass, func: Option<u32>) -> Result<u32, AssemblyError> {
    match func {
        Some(func) => Ok(func),
        None => Err(AssemblyError::new(
            AssemblyErrorCode::UnexpectedError,
            format!("{class} instruction reached the encoder without a function code"),
        )),
    }
}

fn check_register_count(
    class: CodeClass,
    regs: &[u32],
    slots: usize,
) -> Result<(), AssemblyError> {
    if regs.len() > slots {
        return Err(AssemblyError::new(
            AssemblyErrorCode::IncorrectNumberOfOperands,
            format!(
                "{class} holds [ {slots} ] register slots but [ {} ] registers were supplied",
                regs.len()
            ),
        ));
    }
    Ok(())
}

// Packs one resolved instruction into a GBC command word at the bit offsets
// of its code class.
pub fn encode(
    class: CodeClass,
    opcode: u32,
    func: Option<u32>,
    regs: &[u32],
    imm: Option<u32>,
) -> Result<GbcCommand, AssemblyError> {
    let mut word = field(
        class,
        "opcode",
        opcode,
        constant::OPCODE_MASK,
        constant::OPCODE_SHFT,
    )?;
    match class {
        CodeClass::Code1 => {
            check_register_count(class, regs, 1)?;
            let func = require_func(class, func)?;
            word |= field(
                class,
                "func",
                func,
                constant::CODE1_FNC_MASK,
                constant::CODE1_FNC_SHFT,
            )?;
            if let Some(&rx1) = regs.first() {
                word |= field(
                    class,
                    "rx1",
                    rx1,
                    constant::CODE1_RX1_MASK,
                    constant::CODE1_RX1_SHFT,
                )?;
            }
            if let Some(imm) = imm {
                word |= field(
                    class,
                    "imm",
                    imm,
                    constant::CODE1_IMM_MASK,
                    constant::CODE1_IMM_SHFT,
                )?;
            }
        }
        CodeClass::Code2 => {
            check_register_count(class, regs, 2)?;
            if let Some(&rx1) = regs.first() {
                word |= field(
                    class,
                    "rx1",
                    rx1,
                    constant::CODE2_RX1_MASK,
                    constant::CODE2_RX1_SHFT,
                )?;
            }
            if let Some(&rx2) = regs.get(1) {
                word |= field(
                    class,
                    "rx2",
                    rx2,
                    constant::CODE2_RX2_MASK,
                    constant::CODE2_RX2_SHFT,
                )?;
            }
            if let Some(imm) = imm {
                word |= field(
                    class,
                    "imm",
                    imm,
                    constant::CODE2_IMM_MASK,
                    constant::CODE2_IMM_SHFT,
                )?;
            }
        }
        CodeClass::Code3 => {
            check_register_count(class, regs, 3)?;
            if imm.is_some() {
                return Err(AssemblyError::new(
                    AssemblyErrorCode::IncorrectNumberOfOperands,
                    format!("{class} has no immediate slot"),
                ));
            }
            let func = require_func(class, func)?;
            word |= field(
                class,
                "func",
                func,
                constant::CODE3_FNC_MASK,
                constant::CODE3_FNC_SHFT,
            )?;
            if let Some(&rx1) = regs.first() {
                word |= field(
                    class,
                    "rx1",
                    rx1,
                    constant::CODE3_RX1_MASK,
                    constant::CODE3_RX1_SHFT,
                )?;
            }
            if let Some(&rx2) = regs.get(1) {
                word |= field(
                    class,
                    "rx2",
                    rx2,
                    constant::CODE3_RX2_MASK,
                    constant::CODE3_RX2_SHFT,
                )?;
            }
            if let Some(&rx3) = regs.get(2) {
                word |= field(
                    class,
                    "rx3",
                    rx3,
                    constant::CODE3_RX3_MASK,
                    constant::CODE3_RX3_SHFT,
                )?;
            }
        }
        CodeClass::Code4 => {
            check_register_count(class, regs, 0)?;
            if let Some(imm) = imm {
                word |= field(
                    class,
                    "imm",
                    imm,
                    constant::CODE4_IMM_MASK,
                    constant::CODE4_IMM_SHFT,
                )?;
            }
        }
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::*;

    fn unpack(word: GbcCommand, mask: u32, shift: u32) -> u32 {
        (word & mask) >> shift
    }

    #[test]
    fn code1_round_trips() {
        let word = encode(
            CodeClass::Code1,
            OPCODE_CODE1,
            Some(FUNC_LDU),
            &[R_AX],
            Some(0xBEEF),
        )
        .unwrap();
        assert_eq!(unpack(word, OPCODE_MASK, OPCODE_SHFT), OPCODE_CODE1);
        assert_eq!(unpack(word, CODE1_FNC_MASK, CODE1_FNC_SHFT), FUNC_LDU);
        assert_eq!(unpack(word, CODE1_RX1_MASK, CODE1_RX1_SHFT), R_AX);
        assert_eq!(unpack(word, CODE1_IMM_MASK, CODE1_IMM_SHFT), 0xBEEF);
    }

    #[test]
    fn code2_round_trips() {
        let word = encode(
            CodeClass::Code2,
            OPCODE_ADDI,
            None,
            &[R_CX, R_DX],
            Some(0x1234),
        )
        .unwrap();
        assert_eq!(unpack(word, OPCODE_MASK, OPCODE_SHFT), OPCODE_ADDI);
        assert_eq!(unpack(word, CODE2_RX1_MASK, CODE2_RX1_SHFT), R_CX);
        assert_eq!(unpack(word, CODE2_RX2_MASK, CODE2_RX2_SHFT), R_DX);
        assert_eq!(unpack(word, CODE2_IMM_MASK, CODE2_IMM_SHFT), 0x1234);
    }

    #[test]
    fn code3_round_trips_with_reserved_bits_clear() {
        let word = encode(
            CodeClass::Code3,
            OPCODE_CODE3,
            Some(FUNC_XOR),
            &[R_SAX, R_SBX, R_PC],
            None,
        )
        .unwrap();
        assert_eq!(unpack(word, OPCODE_MASK, OPCODE_SHFT), OPCODE_CODE3);
        assert_eq!(unpack(word, CODE3_FNC_MASK, CODE3_FNC_SHFT), FUNC_XOR);
        assert_eq!(unpack(word, CODE3_RX1_MASK, CODE3_RX1_SHFT), R_SAX);
        assert_eq!(unpack(word, CODE3_RX2_MASK, CODE3_RX2_SHFT), R_SBX);
        assert_eq!(unpack(word, CODE3_RX3_MASK, CODE3_RX3_SHFT), R_PC);
        assert_eq!(word & CODE3_XXX_MASK, 0);
    }

    #[test]
    fn code4_round_trips() {
        let word = encode(CodeClass::Code4, OPCODE_SYS, None, &[], Some(0x00AB_CDEF)).unwrap();
        assert_eq!(unpack(word, OPCODE_MASK, OPCODE_SHFT), OPCODE_SYS);
        assert_eq!(unpack(word, CODE4_IMM_MASK, CODE4_IMM_SHFT), 0x00AB_CDEF);
        assert_eq!(word & CODE4_XXX_MASK, 0);
    }

    #[test]
    fn add_ax_bx_cx_is_bit_exact() {
        let word = encode(
            CodeClass::Code3,
            OPCODE_CODE3,
            Some(FUNC_ADD),
            &[R_AX, R_BX, R_CX],
            None,
        )
        .unwrap();
        assert_eq!(word, 0x1882_0040);
    }

    #[test]
    fn oversized_fields_are_rejected() {
        let err = encode(
            CodeClass::Code2,
            OPCODE_ADDI,
            None,
            &[R_AX, R_BX],
            Some(0x1_0000),
        )
        .unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::FieldOverflow);

        let err = encode(CodeClass::Code2, OPCODE_ADDI, None, &[0x20, R_BX], None).unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::FieldOverflow);

        let err = encode(CodeClass::Code4, OPCODE_SYS, None, &[], Some(0x0100_0000)).unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::FieldOverflow);
    }

    #[test]
    fn surplus_registers_are_rejected() {
        let err = encode(
            CodeClass::Code1,
            OPCODE_CODE1,
            Some(FUNC_PUSH),
            &[R_AX, R_BX],
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::IncorrectNumberOfOperands);
    }

    #[test]
    fn missing_func_is_an_internal_error() {
        let err = encode(CodeClass::Code3, OPCODE_CODE3, None, &[R_AX, R_BX, R_CX], None)
            .unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::UnexpectedError);
    }
}

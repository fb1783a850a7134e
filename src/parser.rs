use crate::constant::SPACE;
use crate::data::{
    resolve_class, resolve_func, resolve_opcode, resolve_register, AssemblyError,
    AssemblyErrorCode, CodeClass,
};
use crate::tokenizer::{tokenize, Tokens};
use crate::very_verbose_println;

// A GA line resolved into encoder inputs: class, opcode, optional function
// code, register operands in source order, optional immediate.
#[derive(Debug)]
pub struct Instruction {
    pub class: CodeClass,
    pub opcode: u32,
    pub func: Option<u32>,
    pub regs: Vec<u32>,
    pub imm: Option<u32>,
}

impl Instruction {
    pub fn parse_line(line: &str) -> Result<Self, AssemblyError> {
        let mut tokens = tokenize(line, SPACE);
        let mnemonic = match tokens.next() {
            Some(token) => token,
            None => {
                return Err(AssemblyError::new(
                    AssemblyErrorCode::SyntaxError,
                    "cannot parse an instruction from an empty line".to_string(),
                ))
            }
        };
        let class = resolve_class(mnemonic)?;
        let opcode = resolve_opcode(mnemonic)?;
        let func = match class {
            CodeClass::Code1 | CodeClass::Code3 => Some(resolve_func(mnemonic, class)?),
            CodeClass::Code2 | CodeClass::Code4 => None,
        };
        very_verbose_println!("recognized operation [ {mnemonic} ] in {class}");

        let mut regs = Vec::new();
        let mut imm = None;
        match class {
            // optional register, then optional immediate
            CodeClass::Code1 => {
                if let Some(token) = tokens.next() {
                    regs.push(resolve_register(token)?);
                }
                if let Some(token) = tokens.next() {
                    imm = Some(parse_immediate(token)?);
                }
            }
            // two registers, then optional immediate (absent encodes as zero)
            CodeClass::Code2 => {
                regs.push(resolve_register(require_operand(mnemonic, &mut tokens, "rx1")?)?);
                regs.push(resolve_register(require_operand(mnemonic, &mut tokens, "rx2")?)?);
                if let Some(token) = tokens.next() {
                    imm = Some(parse_immediate(token)?);
                }
            }
            CodeClass::Code3 => {
                for slot in ["rx1", "rx2", "rx3"] {
                    regs.push(resolve_register(require_operand(mnemonic, &mut tokens, slot)?)?);
                }
            }
            CodeClass::Code4 => {
                imm = Some(parse_immediate(require_operand(mnemonic, &mut tokens, "imm")?)?);
            }
        }
        if let Some(surplus) = tokens.next() {
            return Err(AssemblyError::new(
                AssemblyErrorCode::IncorrectNumberOfOperands,
                format!("[ {mnemonic} ] was given a surplus operand [ {surplus} ]"),
            ));
        }
        Ok(Self {
            class,
            opcode,
            func,
            regs,
            imm,
        })
    }
}

fn require_operand<'a>(
    mnemonic: &str,
    tokens: &mut Tokens<'a>,
    slot: &str,
) -> Result<&'a str, AssemblyError> {
    tokens.next().ok_or_else(|| {
        AssemblyError::new(
            AssemblyErrorCode::IncorrectNumberOfOperands,
            format!("[ {mnemonic} ] is missing its [ {slot} ] operand"),
        )
    })
}

fn radix_literal(token: &str, raw: &str, base: u32) -> Result<u32, AssemblyError> {
    u32::from_str_radix(raw, base).map_err(|err| {
        AssemblyError::new(
            AssemblyErrorCode::InvalidImmediate,
            format!("[ {token} ] is an invalid base-{base} literal :: [ {err} ]"),
        )
    })
}

// Immediates default to base 10; a 0x/0b/0o prefix selects the radix. A
// token that is not a plain literal is handed to the expression evaluator,
// so constant arithmetic like 2+3*4 assembles.
pub fn parse_immediate(token: &str) -> Result<u32, AssemblyError> {
    if let Some(raw) = token.strip_prefix("0x") {
        return radix_literal(token, raw, 16);
    }
    if let Some(raw) = token.strip_prefix("0b") {
        return radix_literal(token, raw, 2);
    }
    if let Some(raw) = token.strip_prefix("0o") {
        return radix_literal(token, raw, 8);
    }
    if let Ok(value) = token.parse::<u32>() {
        return Ok(value);
    }
    match meval::eval_str(token) {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => {
            Ok(value as u32)
        }
        Ok(value) => Err(AssemblyError::new(
            AssemblyErrorCode::InvalidImmediate,
            format!("[ {token} ] evaluates to [ {value} ] which does not fit an unsigned field"),
        )),
        Err(err) => Err(AssemblyError::new(
            AssemblyErrorCode::InvalidImmediate,
            format!("[ {token} ] is not a valid immediate :: [ {err} ]"),
        )),
    }
}

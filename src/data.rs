use crate::constant::{self, NAME};
use colorize::AnsiColor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    Code1,
    Code2,
    Code3,
    Code4,
}

impl fmt::Display for CodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            CodeClass::Code1 => 1,
            CodeClass::Code2 => 2,
            CodeClass::Code3 => 3,
            CodeClass::Code4 => 4,
        };
        write!(f, "code {n}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyErrorCode {
    UnexpectedError,
    UnknownMnemonic,
    UnknownRegister,
    InvalidImmediate,
    IncorrectNumberOfOperands,
    FieldOverflow,
    SyntaxError,
    IoFailure,
    CLIArgParseError,
    OutputWriteError,
}

#[derive(Debug)]
pub struct AssemblyError {
    pub code: AssemblyErrorCode,
    pub reason: String,
    pub line: Option<usize>,
}

impl AssemblyError {
    pub fn new(code: AssemblyErrorCode, reason: String) -> Self {
        Self {
            code,
            reason,
            line: None,
        }
    }

    // attaches a source line number unless one is already recorded
    pub fn with_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = match self.line {
            Some(line) => format!(" [ line {line} ]"),
            None => String::new(),
        };
        let string = format!(
            "{NAME}: {} {} :: {}{location}",
            "error:".to_string().red(),
            format!("{:?}", self.code).yellow(),
            self.reason
        );
        write!(f, "{string}")
    }
}

pub struct OpcodeEntry {
    pub mnemonic: &'static str,
    pub class: CodeClass,
    pub opcode: u32,
    pub func: Option<u32>,
}

const fn op(
    mnemonic: &'static str,
    class: CodeClass,
    opcode: u32,
    func: Option<u32>,
) -> OpcodeEntry {
    OpcodeEntry {
        mnemonic,
        class,
        opcode,
        func,
    }
}

// One entry per GA mnemonic. A mnemonic belongs to exactly one class; the
// resolvers below do an exact-match linear scan, which is fine at this size
// since resolution happens once per source line.
static OPCODE_TABLE: &[OpcodeEntry] = &[
    // code 1
    op("ldu", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_LDU)),
    op("jr", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_JR)),
    op("jrc", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_JRC)),
    op("jrcx", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_JRCX)),
    op("push", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_PUSH)),
    op("pop", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_POP)),
    op("zero", CodeClass::Code1, constant::OPCODE_CODE1, Some(constant::FUNC_ZERO)),
    // code 2
    op("addi", CodeClass::Code2, constant::OPCODE_ADDI, None),
    op("subi", CodeClass::Code2, constant::OPCODE_SUBI, None),
    op("bli", CodeClass::Code2, constant::OPCODE_BLI, None),
    op("bri", CodeClass::Code2, constant::OPCODE_BRI, None),
    op("briu", CodeClass::Code2, constant::OPCODE_BRIU, None),
    op("andi", CodeClass::Code2, constant::OPCODE_ANDI, None),
    op("ori", CodeClass::Code2, constant::OPCODE_ORI, None),
    op("xori", CodeClass::Code2, constant::OPCODE_XORI, None),
    op("lw", CodeClass::Code2, constant::OPCODE_LW, None),
    op("lh", CodeClass::Code2, constant::OPCODE_LH, None),
    op("lb", CodeClass::Code2, constant::OPCODE_LB, None),
    op("sw", CodeClass::Code2, constant::OPCODE_SW, None),
    op("sh", CodeClass::Code2, constant::OPCODE_SH, None),
    op("sb", CodeClass::Code2, constant::OPCODE_SB, None),
    op("eq", CodeClass::Code2, constant::OPCODE_EQ, None),
    op("gt", CodeClass::Code2, constant::OPCODE_GT, None),
    op("lt", CodeClass::Code2, constant::OPCODE_LT, None),
    // code 3
    op("add", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_ADD)),
    op("sub", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_SUB)),
    op("mul", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_MUL)),
    op("mulu", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_MULU)),
    op("div", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_DIV)),
    op("blx", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_BLX)),
    op("brx", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_BRX)),
    op("brxu", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_BRXU)),
    op("and", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_AND)),
    op("or", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_OR)),
    op("xor", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_XOR)),
    op("eqx", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_EQX)),
    op("gtx", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_GTX)),
    op("ltx", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_LTX)),
    op("addf", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_ADDF)),
    op("subf", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_SUBF)),
    op("mulf", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_MULF)),
    op("mulfu", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_MULFU)),
    op("divf", CodeClass::Code3, constant::OPCODE_CODE3, Some(constant::FUNC_DIVF)),
    // code 4
    op("sys", CodeClass::Code4, constant::OPCODE_SYS, None),
];

static REGISTER_TABLE: &[(&str, u32)] = &[
    ("ax", constant::R_AX),
    ("bx", constant::R_BX),
    ("cx", constant::R_CX),
    ("dx", constant::R_DX),
    ("ex", constant::R_EX),
    ("fx", constant::R_FX),
    ("gx", constant::R_GX),
    ("hx", constant::R_HX),
    ("sax", constant::R_SAX),
    ("sbx", constant::R_SBX),
    ("scx", constant::R_SCX),
    ("sdx", constant::R_SDX),
    ("ret", constant::R_RET),
    ("up", constant::R_UP),
    ("0", constant::R_ZERO),
    ("if", constant::R_IF),
    ("tg", constant::R_TG),
    ("sp", constant::R_SP),
    ("srg", constant::R_SRG),
    ("asm", constant::R_ASM),
    ("pc", constant::R_PC),
];

fn lookup(mnemonic: &str) -> Result<&'static OpcodeEntry, AssemblyError> {
    match OPCODE_TABLE.iter().find(|entry| entry.mnemonic == mnemonic) {
        Some(entry) => Ok(entry),
        None => Err(AssemblyError::new(
            AssemblyErrorCode::UnknownMnemonic,
            format!("[ {mnemonic} ] is not a valid operation"),
        )),
    }
}

pub fn resolve_class(mnemonic: &str) -> Result<CodeClass, AssemblyError> {
    Ok(lookup(mnemonic)?.class)
}

pub fn resolve_opcode(mnemonic: &str) -> Result<u32, AssemblyError> {
    Ok(lookup(mnemonic)?.opcode)
}

// Function codes exist for code 1 and code 3 mnemonics only.
pub fn resolve_func(mnemonic: &str, class: CodeClass) -> Result<u32, AssemblyError> {
    let entry = lookup(mnemonic)?;
    if entry.class != class {
        return Err(AssemblyError::new(
            AssemblyErrorCode::UnexpectedError,
            format!(
                "[ {mnemonic} ] belongs to {} but its function code was requested for {class}",
                entry.class
            ),
        ));
    }
    match entry.func {
        Some(func) => Ok(func),
        None => Err(AssemblyError::new(
            AssemblyErrorCode::UnexpectedError,
            format!("[ {mnemonic} ] has no function code in {class}"),
        )),
    }
}

pub fn resolve_register(name: &str) -> Result<u32, AssemblyError> {
    match REGISTER_TABLE.iter().find(|(reg, _)| *reg == name) {
        Some((_, code)) => Ok(*code),
        None => Err(AssemblyError::new(
            AssemblyErrorCode::UnknownRegister,
            format!("[ {name} ] is not a valid register"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_one_mnemonic_per_class() {
        assert_eq!(resolve_class("ldu").unwrap(), CodeClass::Code1);
        assert_eq!(resolve_class("addi").unwrap(), CodeClass::Code2);
        assert_eq!(resolve_class("add").unwrap(), CodeClass::Code3);
        assert_eq!(resolve_class("sys").unwrap(), CodeClass::Code4);
    }

    #[test]
    fn resolves_opcodes_and_funcs() {
        assert_eq!(resolve_opcode("add").unwrap(), constant::OPCODE_CODE3);
        assert_eq!(resolve_opcode("ldu").unwrap(), constant::OPCODE_CODE1);
        assert_eq!(resolve_opcode("sw").unwrap(), constant::OPCODE_SW);
        assert_eq!(resolve_opcode("sys").unwrap(), constant::OPCODE_SYS);
        assert_eq!(
            resolve_func("add", CodeClass::Code3).unwrap(),
            constant::FUNC_ADD
        );
        assert_eq!(
            resolve_func("pop", CodeClass::Code1).unwrap(),
            constant::FUNC_POP
        );
    }

    #[test]
    fn resolves_registers() {
        assert_eq!(resolve_register("ax").unwrap(), constant::R_AX);
        assert_eq!(resolve_register("0").unwrap(), constant::R_ZERO);
        assert_eq!(resolve_register("pc").unwrap(), constant::R_PC);
    }

    #[test]
    fn unknown_names_are_typed_errors() {
        let err = resolve_class("frobnicate").unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::UnknownMnemonic);
        let err = resolve_register("qx").unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::UnknownRegister);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(resolve_class("ADD").is_err());
        assert!(resolve_register("AX").is_err());
    }

    #[test]
    fn resolution_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(resolve_opcode("bri").unwrap(), constant::OPCODE_BRI);
            assert_eq!(resolve_register("tg").unwrap(), constant::R_TG);
        }
    }

    #[test]
    fn func_for_wrong_class_is_rejected() {
        let err = resolve_func("add", CodeClass::Code1).unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::UnexpectedError);
        let err = resolve_func("addi", CodeClass::Code2).unwrap_err();
        assert_eq!(err.code, AssemblyErrorCode::UnexpectedError);
    }

    #[test]
    fn no_mnemonic_appears_twice() {
        for (i, entry) in OPCODE_TABLE.iter().enumerate() {
            assert!(
                !OPCODE_TABLE[i + 1..]
                    .iter()
                    .any(|other| other.mnemonic == entry.mnemonic),
                "duplicate mnemonic {}",
                entry.mnemonic
            );
        }
    }
}

pub type GbcCommand = u32;

pub const NAME: &str = "gsm";
pub const DEFAULT_BINARY_NAME: &str = "a.out";

pub const MACRO_SIGIL: char = '!';
pub const COMMENT: &str = "//";
pub const SPACE: char = ' ';

// GBC file header
pub const GBC_GUARD: u32 = 0x0A0D_0D0A;
pub const GBC_MAGIC: u32 = 0x4F43_4247; // "GBCO" when read little-endian
pub const GBC_MAJOR: u8 = 0;
pub const GBC_MINOR: u8 = 1;
pub const GBC_PATCH: u8 = 0;
pub const GBC_UNUSED: u8 = 0;
pub const GBC_HEADER_BYTES: usize = 12;

// Field masks and shifts for a GBC command. The low 6 bits always hold the
// opcode; the rest of the word depends on the code class.

pub const OPCODE_MASK: u32 = 0x0000_003F;
pub const OPCODE_SHFT: u32 = 0;

// Code 1

pub const CODE1_FNC_MASK: u32 = 0x0000_07C0;
pub const CODE1_FNC_SHFT: u32 = 6;

pub const CODE1_RX1_MASK: u32 = 0x0000_F800;
pub const CODE1_RX1_SHFT: u32 = 11;

pub const CODE1_IMM_MASK: u32 = 0xFFFF_0000;
pub const CODE1_IMM_SHFT: u32 = 16;

// Code 2

pub const CODE2_RX1_MASK: u32 = 0x0000_07C0;
pub const CODE2_RX1_SHFT: u32 = 6;

pub const CODE2_RX2_MASK: u32 = 0x0000_F800;
pub const CODE2_RX2_SHFT: u32 = 11;

pub const CODE2_IMM_MASK: u32 = 0xFFFF_0000;
pub const CODE2_IMM_SHFT: u32 = 16;

// Code 3

pub const CODE3_FNC_MASK: u32 = 0x0000_1FC0;
pub const CODE3_FNC_SHFT: u32 = 6;

// bits 13..=16 must stay zero
pub const CODE3_XXX_MASK: u32 = 0x0001_E000;

pub const CODE3_RX1_MASK: u32 = 0x003E_0000;
pub const CODE3_RX1_SHFT: u32 = 17;

pub const CODE3_RX2_MASK: u32 = 0x07C0_0000;
pub const CODE3_RX2_SHFT: u32 = 22;

pub const CODE3_RX3_MASK: u32 = 0xF800_0000;
pub const CODE3_RX3_SHFT: u32 = 27;

// Code 4

pub const CODE4_XXX_MASK: u32 = 0x0000_0040;

pub const CODE4_IMM_MASK: u32 = 0xFFFF_FF00;
pub const CODE4_IMM_SHFT: u32 = 8;

// Class sentinel opcodes

pub const OPCODE_CODE1: u32 = 0x3F;
pub const OPCODE_CODE3: u32 = 0x00;
pub const OPCODE_SYS: u32 = 0x0F;

// Code 2 direct opcodes

pub const OPCODE_ADDI: u32 = 0x02;
pub const OPCODE_SUBI: u32 = 0x03;
pub const OPCODE_BLI: u32 = 0x06;
pub const OPCODE_BRI: u32 = 0x07;
pub const OPCODE_BRIU: u32 = 0x08;
pub const OPCODE_ANDI: u32 = 0x09;
pub const OPCODE_ORI: u32 = 0x0A;
pub const OPCODE_XORI: u32 = 0x0B;
pub const OPCODE_LW: u32 = 0x0C;
pub const OPCODE_LH: u32 = 0x0D;
pub const OPCODE_LB: u32 = 0x0E;
pub const OPCODE_SW: u32 = 0x10;
pub const OPCODE_SH: u32 = 0x11;
pub const OPCODE_SB: u32 = 0x12;
pub const OPCODE_EQ: u32 = 0x13;
pub const OPCODE_GT: u32 = 0x14;
pub const OPCODE_LT: u32 = 0x15;

// Code 1 function codes

pub const FUNC_LDU: u32 = 0x01;
pub const FUNC_JR: u32 = 0x02;
pub const FUNC_JRC: u32 = 0x03;
pub const FUNC_JRCX: u32 = 0x04;
pub const FUNC_PUSH: u32 = 0x05;
pub const FUNC_POP: u32 = 0x06;
pub const FUNC_ZERO: u32 = 0x07;

// Code 3 function codes

pub const FUNC_ADD: u32 = 0x01;
pub const FUNC_SUB: u32 = 0x02;
pub const FUNC_MUL: u32 = 0x03;
pub const FUNC_MULU: u32 = 0x04;
pub const FUNC_DIV: u32 = 0x05;
pub const FUNC_BLX: u32 = 0x09;
pub const FUNC_BRX: u32 = 0x0A;
pub const FUNC_BRXU: u32 = 0x0B;
pub const FUNC_AND: u32 = 0x0C;
pub const FUNC_OR: u32 = 0x0D;
pub const FUNC_XOR: u32 = 0x0E;
pub const FUNC_EQX: u32 = 0x12;
pub const FUNC_GTX: u32 = 0x13;
pub const FUNC_LTX: u32 = 0x14;
pub const FUNC_ADDF: u32 = 0x15;
pub const FUNC_SUBF: u32 = 0x16;
pub const FUNC_MULF: u32 = 0x17;
pub const FUNC_MULFU: u32 = 0x18;
pub const FUNC_DIVF: u32 = 0x19;

// Register codes

pub const R_AX: u32 = 0x01;
pub const R_BX: u32 = 0x02;
pub const R_CX: u32 = 0x03;
pub const R_DX: u32 = 0x04;
pub const R_EX: u32 = 0x05;
pub const R_FX: u32 = 0x06;
pub const R_GX: u32 = 0x07;
pub const R_HX: u32 = 0x08;

pub const R_SAX: u32 = 0x09;
pub const R_SBX: u32 = 0x0A;
pub const R_SCX: u32 = 0x0B;
pub const R_SDX: u32 = 0x0C;

pub const R_RET: u32 = 0x0D;
pub const R_UP: u32 = 0x0E;
pub const R_ZERO: u32 = 0x0F;
pub const R_IF: u32 = 0x10;
pub const R_TG: u32 = 0x11;
pub const R_SP: u32 = 0x12;
pub const R_SRG: u32 = 0x13;
pub const R_ASM: u32 = 0x14;
pub const R_PC: u32 = 0x15;

use crate::constant::{
    GbcCommand, GBC_GUARD, GBC_HEADER_BYTES, GBC_MAGIC, GBC_MAJOR, GBC_MINOR, GBC_PATCH,
    GBC_UNUSED,
};
use crate::data::{AssemblyError, AssemblyErrorCode};
use crate::encoder::encode;
use crate::parser::Instruction;
use crate::very_verbose_println;
use std::io::{BufRead, Write};

pub enum PassState {
    WritingHeader,
    ReadingDataSection,
    ReadingCodeSection,
    Done,
    Failed,
}

// Pass two: emit the GBC header, then one command word per cleaned line.
// Per-line failures are collected (stamped with the originating source line
// from the line map) and the pass keeps going, so a broken file reports
// every diagnostic in one run. Returns the number of emitted words.
pub fn second_pass<R: BufRead, W: Write>(
    ga: &mut R,
    gbc: &mut W,
    line_map: &[usize],
) -> Result<u32, Vec<AssemblyError>> {
    let mut state = PassState::WritingHeader;
    let mut errors: Vec<AssemblyError> = Vec::new();
    let mut words = 0u32;
    loop {
        state = match state {
            PassState::WritingHeader => match write_header(gbc) {
                Ok(()) => PassState::ReadingDataSection,
                Err(err) => {
                    errors.push(err);
                    PassState::Failed
                }
            },
            // the data section grammar is not defined yet; zero entries
            PassState::ReadingDataSection => PassState::ReadingCodeSection,
            PassState::ReadingCodeSection => {
                match read_code_section(ga, gbc, line_map, &mut errors) {
                    Ok(count) => {
                        words = count;
                        if errors.is_empty() {
                            PassState::Done
                        } else {
                            PassState::Failed
                        }
                    }
                    Err(fatal) => {
                        errors.push(fatal);
                        PassState::Failed
                    }
                }
            }
            PassState::Done => return Ok(words),
            PassState::Failed => return Err(errors),
        }
    }
}

fn write_header<W: Write>(gbc: &mut W) -> Result<(), AssemblyError> {
    let mut header = Vec::with_capacity(GBC_HEADER_BYTES);
    header.extend_from_slice(&GBC_GUARD.to_le_bytes());
    header.extend_from_slice(&GBC_MAGIC.to_le_bytes());
    header.extend_from_slice(&[GBC_MAJOR, GBC_MINOR, GBC_PATCH, GBC_UNUSED]);
    gbc.write_all(&header).map_err(|err| {
        AssemblyError::new(
            AssemblyErrorCode::OutputWriteError,
            format!("could not write GBC header :: [ {err} ]"),
        )
    })
}

fn read_code_section<R: BufRead, W: Write>(
    ga: &mut R,
    gbc: &mut W,
    line_map: &[usize],
    errors: &mut Vec<AssemblyError>,
) -> Result<u32, AssemblyError> {
    let mut raw = String::new();
    let mut index = 0usize;
    let mut words = 0u32;
    loop {
        // per-line scratch is dropped in one go before the next line
        raw.clear();
        let read = ga.read_line(&mut raw).map_err(|err| {
            AssemblyError::new(
                AssemblyErrorCode::IoFailure,
                format!("could not read cleaned source :: [ {err} ]"),
            )
        })?;
        if read == 0 {
            break;
        }
        let source_line = line_map.get(index).copied();
        index += 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match assemble_line(line) {
            Ok(word) => {
                gbc.write_all(&word.to_le_bytes()).map_err(|err| {
                    AssemblyError::new(
                        AssemblyErrorCode::OutputWriteError,
                        format!("could not write instruction word :: [ {err} ]"),
                    )
                })?;
                words += 1;
                very_verbose_println!("emitted [ {word:#010x} ] for [ {line} ]");
            }
            Err(err) => {
                errors.push(match source_line {
                    Some(line) => err.with_line(line),
                    None => err,
                });
            }
        }
    }
    Ok(words)
}

fn assemble_line(line: &str) -> Result<GbcCommand, AssemblyError> {
    let instruction = Instruction::parse_line(line)?;
    encode(
        instruction.class,
        instruction.opcode,
        instruction.func,
        &instruction.regs,
        instruction.imm,
    )
}

use clap::Parser;
use colorize::AnsiColor;
use constant::{DEFAULT_BINARY_NAME, NAME};
use data::{AssemblyError, AssemblyErrorCode};
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::atomic::{AtomicUsize, Ordering};

mod assembler;
mod constant;
mod data;
mod encoder;
mod parser;
mod preprocessor;
mod tokenizer;

static VERBOSE_FLAG: AtomicUsize = AtomicUsize::new(0);

fn _verbose_println(msg: &str) {
    if VERBOSE_FLAG.load(Ordering::Relaxed) >= 1 {
        println!("{NAME}: {} {}", "verbose:".to_string().yellow(), msg)
    }
}

fn _very_verbose_println(msg: &str) {
    if VERBOSE_FLAG.load(Ordering::Relaxed) >= 2 {
        println!("{NAME}: {} {}", "very-verbose:".to_string().yellow(), msg)
    }
}

#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => (crate::_verbose_println(&format!($($arg)*)));
}
#[macro_export]
macro_rules! very_verbose_println {
    ($($arg:tt)*) => (crate::_very_verbose_println(&format!($($arg)*)));
}

#[derive(Parser)]
#[command(name = NAME, about = "assembles GA source into a GBC binary")]
struct Cli {
    /// GA source file
    file: Option<PathBuf>,

    /// output binary path
    #[arg(short, long, default_value = DEFAULT_BINARY_NAME)]
    output: PathBuf,

    /// increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    VERBOSE_FLAG.store(cli.verbose as usize, Ordering::Relaxed);

    let input = match cli.file {
        Some(file) if !file.as_os_str().is_empty() => file,
        _ => {
            let err = AssemblyError::new(
                AssemblyErrorCode::CLIArgParseError,
                "no input file provided".to_string(),
            );
            eprintln!("{err}");
            exit(1);
        }
    };

    match assemble_file(&input, &cli.output) {
        Ok(words) => println!(
            "wrote binary file {} [ {words} words ]",
            cli.output.display()
        ),
        Err(errors) => {
            for err in &errors {
                eprintln!("{err}");
            }
            exit(1);
        }
    }
}

fn io_failure(reason: String) -> Vec<AssemblyError> {
    vec![AssemblyError::new(AssemblyErrorCode::IoFailure, reason)]
}

// Drives both passes. The cleaned intermediate lives in an anonymous temp
// file that the OS removes on close; the output is staged next to its final
// path and only renamed into place once the second pass fully succeeds, so
// a failed run never leaves a truncated binary behind.
fn assemble_file(input: &Path, output: &Path) -> Result<u32, Vec<AssemblyError>> {
    let ga_file = File::open(input)
        .map_err(|err| io_failure(format!("could not open {} :: [ {err} ]", input.display())))?;

    let mut intermediate = tempfile::tempfile()
        .map_err(|err| io_failure(format!("could not create intermediate file :: [ {err} ]")))?;

    verbose_println!("first pass: preprocessing {}", input.display());
    let line_map = {
        let mut reader = BufReader::new(ga_file);
        let mut writer = BufWriter::new(&mut intermediate);
        let line_map =
            preprocessor::first_pass(&mut reader, &mut writer).map_err(|err| vec![err])?;
        writer
            .flush()
            .map_err(|err| io_failure(format!("could not flush intermediate :: [ {err} ]")))?;
        line_map
    };
    intermediate
        .seek(SeekFrom::Start(0))
        .map_err(|err| io_failure(format!("could not rewind intermediate :: [ {err} ]")))?;

    let staging_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(staging_dir)
        .map_err(|err| io_failure(format!("could not stage output file :: [ {err} ]")))?;

    verbose_println!("second pass: assembling {} cleaned lines", line_map.len());
    let words = {
        let mut reader = BufReader::new(&mut intermediate);
        let mut writer = BufWriter::new(staged.as_file_mut());
        let words = assembler::second_pass(&mut reader, &mut writer, &line_map)?;
        writer
            .flush()
            .map_err(|err| io_failure(format!("could not flush output :: [ {err} ]")))?;
        words
    };

    staged.persist(output).map_err(|err| {
        vec![AssemblyError::new(
            AssemblyErrorCode::OutputWriteError,
            format!("could not write {} :: [ {err} ]", output.display()),
        )]
    })?;
    Ok(words)
}

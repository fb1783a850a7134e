use crate::constant::{COMMENT, MACRO_SIGIL, SPACE};
use crate::data::{AssemblyError, AssemblyErrorCode};
use crate::tokenizer::tokenize;
use crate::verbose_println;
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};

// First-pass macro table. Lives for one preprocessing run; a redefinition
// overwrites the previous expansion (last write wins).
pub struct MacroTable {
    map: HashMap<String, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, expansion: &str) {
        if let Some(old) = self.map.insert(name.to_string(), expansion.to_string()) {
            verbose_println!("macro [ {name} ] redefined, discarding [ {old} ]");
        }
    }

    // Substitutes each recorded macro for its first whole-token occurrence,
    // at most once per macro. Substituted text is emitted as-is and never
    // rescanned, so expansion cannot recurse.
    pub fn expand(&self, line: &str) -> String {
        let mut used: HashSet<&str> = HashSet::new();
        let mut out: Vec<&str> = Vec::new();
        for token in tokenize(line, SPACE) {
            match self.map.get(token) {
                Some(expansion) if !used.contains(token) => {
                    used.insert(token);
                    out.push(expansion);
                }
                _ => out.push(token),
            }
        }
        out.join(" ")
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(at) => &line[..at],
        None => line,
    }
}

// Pass one: record and inline macros, strip comments and surrounding
// whitespace, drop lines that end up empty. Returns the 1-based source line
// number of every emitted line so pass two can attach source positions to
// its diagnostics.
pub fn first_pass<R: BufRead, W: Write>(
    ga: &mut R,
    store: &mut W,
) -> Result<Vec<usize>, AssemblyError> {
    let mut macros = MacroTable::new();
    let mut line_map = Vec::new();
    let mut raw = String::new();
    let mut source_line = 0usize;
    loop {
        raw.clear();
        let read = ga.read_line(&mut raw).map_err(|err| {
            AssemblyError::new(
                AssemblyErrorCode::IoFailure,
                format!("could not read GA source :: [ {err} ]"),
            )
            .with_line(source_line + 1)
        })?;
        if read == 0 {
            break;
        }
        source_line += 1;
        let line = raw.trim();

        if let Some(definition) = line.strip_prefix(MACRO_SIGIL) {
            let definition = strip_comment(definition);
            let (name, expansion) = match definition.split_once(SPACE) {
                Some((name, expansion)) => (name, expansion.trim()),
                None => (definition.trim(), ""),
            };
            if name.is_empty() {
                return Err(AssemblyError::new(
                    AssemblyErrorCode::SyntaxError,
                    format!("macro definition [ {line} ] has no name"),
                )
                .with_line(source_line));
            }
            macros.define(name, expansion);
            continue;
        }

        let expanded = macros.expand(line);
        let cleaned = strip_comment(&expanded).trim();
        if cleaned.is_empty() {
            continue;
        }
        writeln!(store, "{cleaned}").map_err(|err| {
            AssemblyError::new(
                AssemblyErrorCode::IoFailure,
                format!("could not write cleaned source :: [ {err} ]"),
            )
            .with_line(source_line)
        })?;
        line_map.push(source_line);
    }
    Ok(line_map)
}

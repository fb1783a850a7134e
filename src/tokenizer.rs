// Whitespace-collapsing cursor over one source line. Tokens borrow from the
// line and never outlive it.

pub struct Tokens<'a> {
    line: &'a str,
    pos: usize,
    delimiter: char,
}

pub fn tokenize(line: &str, delimiter: char) -> Tokens<'_> {
    Tokens {
        line,
        pos: 0,
        delimiter,
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.line[self.pos..];
        let token_start = rest.trim_start_matches(self.delimiter);
        if token_start.is_empty() {
            self.pos = self.line.len();
            return None;
        }
        let skipped = rest.len() - token_start.len();
        let end = token_start
            .find(self.delimiter)
            .unwrap_or(token_start.len());
        self.pos += skipped + end;
        Some(&token_start[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_delimiter_runs() {
        let tokens: Vec<&str> = tokenize("a   b", ' ').collect();
        assert_eq!(tokens, vec!["a", "b"]);
    }

    #[test]
    fn skips_leading_and_trailing_delimiters() {
        let tokens: Vec<&str> = tokenize("  add ax bx cx  ", ' ').collect();
        assert_eq!(tokens, vec!["add", "ax", "bx", "cx"]);
    }

    #[test]
    fn empty_line_yields_nothing() {
        assert_eq!(tokenize("", ' ').next(), None);
        assert_eq!(tokenize("     ", ' ').next(), None);
    }

    #[test]
    fn exhaustion_is_stable() {
        let mut tokens = tokenize("one", ' ');
        assert_eq!(tokens.next(), Some("one"));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn cursor_restarts_from_a_fresh_tokenize() {
        let line = "push ax";
        let first: Vec<&str> = tokenize(line, ' ').collect();
        let second: Vec<&str> = tokenize(line, ' ').collect();
        assert_eq!(first, second);
    }

    #[test]
    fn honors_other_delimiters() {
        let tokens: Vec<&str> = tokenize("ax,,bx,cx", ',').collect();
        assert_eq!(tokens, vec!["ax", "bx", "cx"]);
    }
}

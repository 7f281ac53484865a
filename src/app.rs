use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use crate::{
    LogTrace, NoTrace, Symbol, Trace, WildcardError, WildcardSpec,
    cli::{Mode, Opt},
    error::{Error, Result},
    find_all_entries_with, find_pattern_with_wildcard_with,
};

/// Whitespace-separated tokens of a reader, read line by line on demand.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, failing with a message naming `what` at the end
    /// of input.
    pub fn next_token(&mut self, what: &'static str) -> Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(Error::UnexpectedEof(what));
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// How user-supplied strings become symbols.
struct Alphabet<S> {
    split: fn(&str) -> Vec<S>,
    spec: fn(&str, Option<&str>) -> std::result::Result<WildcardSpec<S>, WildcardError>,
}

/// Runs one query in the mode selected by `opt`, reading its arguments from
/// `input` and writing one result per line to `output`.
///
/// Prompts go to `prompt`; pass a sink for non-interactive use.
pub fn run<R: BufRead, W: Write>(
    opt: &Opt,
    input: R,
    output: W,
    prompt: &mut dyn Write,
) -> Result<()> {
    let chars = Alphabet {
        split: |s: &str| s.chars().collect(),
        spec: WildcardSpec::parse,
    };
    let bytes = Alphabet {
        split: |s: &str| s.as_bytes().to_vec(),
        spec: WildcardSpec::parse_bytes,
    };

    let mut tokens = Tokens::new(input);
    match (opt.bytes, opt.debug) {
        (false, false) => run_with(opt.mode(), &chars, &mut tokens, output, prompt, NoTrace),
        (false, true) => run_with(opt.mode(), &chars, &mut tokens, output, prompt, LogTrace),
        (true, false) => run_with(opt.mode(), &bytes, &mut tokens, output, prompt, NoTrace),
        (true, true) => run_with(opt.mode(), &bytes, &mut tokens, output, prompt, LogTrace),
    }
}

fn run_with<S: Symbol, R: BufRead, W: Write>(
    mode: Mode,
    alphabet: &Alphabet<S>,
    tokens: &mut Tokens<R>,
    mut output: W,
    prompt: &mut dyn Write,
    mut trace: impl Trace<S>,
) -> Result<()> {
    match mode {
        Mode::Entries => {
            let result = entries(alphabet, tokens, prompt, &mut trace)?;
            writeln!(prompt, "\nResult:")?;
            for (start, index) in result {
                writeln!(output, "{start} {index}")?;
            }
        }
        Mode::Wildcard | Mode::Forbidden => {
            let result = wildcard(mode, alphabet, tokens, prompt, &mut trace)?;
            writeln!(prompt, "\nResult:")?;
            for start in result {
                writeln!(output, "{start}")?;
            }
        }
    }
    output.flush()?;
    Ok(())
}

/// One-based `(start, pattern number)` pairs, sorted.
fn entries<S: Symbol, R: BufRead>(
    alphabet: &Alphabet<S>,
    tokens: &mut Tokens<R>,
    prompt: &mut dyn Write,
    trace: &mut impl Trace<S>,
) -> Result<Vec<(usize, usize)>> {
    write!(prompt, "Text: ")?;
    prompt.flush()?;
    let text = (alphabet.split)(&tokens.next_token("text")?);

    write!(prompt, "Number of patterns: ")?;
    prompt.flush()?;
    let value = tokens.next_token("number of patterns")?;
    let count: usize = value
        .parse()
        .map_err(|source| Error::InvalidCount { value, source })?;

    writeln!(prompt, "Patterns:")?;
    let patterns = (0..count)
        .map(|_| tokens.next_token("pattern").map(|p| (alphabet.split)(&p)))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("searching for {} patterns in {} symbols", patterns.len(), text.len());

    let entries = find_all_entries_with(&text, &patterns, trace)?;
    let mut result = Vec::new();
    for (index, pattern) in patterns.iter().enumerate() {
        if let Some(positions) = entries.get(pattern) {
            result.extend(positions.iter().map(|&start| (start + 1, index + 1)));
        }
    }
    result.sort_unstable();
    Ok(result)
}

/// One-based start positions, ascending.
fn wildcard<S: Symbol, R: BufRead>(
    mode: Mode,
    alphabet: &Alphabet<S>,
    tokens: &mut Tokens<R>,
    prompt: &mut dyn Write,
    trace: &mut impl Trace<S>,
) -> Result<Vec<usize>> {
    write!(prompt, "Text: ")?;
    prompt.flush()?;
    let text = (alphabet.split)(&tokens.next_token("text")?);

    write!(prompt, "Pattern: ")?;
    prompt.flush()?;
    let pattern = (alphabet.split)(&tokens.next_token("pattern")?);

    write!(prompt, "Wildcard: ")?;
    prompt.flush()?;
    let wildcard = tokens.next_token("wildcard")?;

    let forbidden = if mode == Mode::Forbidden {
        write!(prompt, "Forbidden: ")?;
        prompt.flush()?;
        Some(tokens.next_token("forbidden symbol")?)
    } else {
        None
    };

    let spec = (alphabet.spec)(&wildcard, forbidden.as_deref())?;
    log::debug!("searching for a pattern of {} symbols in {} symbols", pattern.len(), text.len());

    let result = find_pattern_with_wildcard_with(&text, &pattern, spec, trace)?;
    Ok(result.into_iter().map(|start| start + 1).collect())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, sink};

    use crate::{
        app::{Tokens, run},
        cli::Opt,
        error::Error,
    };

    fn exec(opt: &Opt, input: &str) -> Result<String, Error> {
        let mut output = Vec::new();
        run(opt, Cursor::new(input), &mut output, &mut sink())?;
        Ok(String::from_utf8(output).unwrap())
    }

    fn opt(wildcard: bool, forbidden: bool, bytes: bool) -> Opt {
        Opt {
            wildcard,
            forbidden,
            bytes,
            debug: false,
        }
    }

    #[test]
    fn test_tokens() {
        let mut tokens = Tokens::new(Cursor::new("  abc de\n\n f \n"));
        assert_eq!(tokens.next_token("a").unwrap(), "abc");
        assert_eq!(tokens.next_token("b").unwrap(), "de");
        assert_eq!(tokens.next_token("c").unwrap(), "f");
        assert!(matches!(tokens.next_token("d"), Err(Error::UnexpectedEof("d"))));
    }

    #[test]
    fn test_entries() {
        let output = exec(&opt(false, false, false), "ushers\n4\nhe she hers his\n").unwrap();
        assert_eq!(output, "2 2\n3 1\n3 3\n");
    }

    #[test]
    fn test_entries_with_duplicates() {
        let output = exec(&opt(false, false, true), "NTAG 3 TAGT TAG T").unwrap();
        assert_eq!(output, "2 2\n2 3\n");

        let output = exec(&opt(false, false, false), "aaa 2 aa aa").unwrap();
        assert_eq!(output, "1 1\n1 2\n2 1\n2 2\n");
    }

    #[test]
    fn test_entries_errors() {
        assert!(matches!(
            exec(&opt(false, false, false), "abc x"),
            Err(Error::InvalidCount { .. })
        ));
        assert!(matches!(
            exec(&opt(false, false, false), "abc 2 a"),
            Err(Error::UnexpectedEof("pattern"))
        ));
        assert!(matches!(
            exec(&opt(false, false, false), "abc 0"),
            Ok(output) if output.is_empty()
        ));
    }

    #[test]
    fn test_wildcard() {
        let output = exec(&opt(true, false, false), "ACTANCA A$$A$ $").unwrap();
        assert_eq!(output, "1\n");

        let output = exec(&opt(true, false, false), "aXcabcaYc a?c ?").unwrap();
        assert_eq!(output, "1\n4\n7\n");
    }

    #[test]
    fn test_forbidden() {
        let output = exec(&opt(false, true, false), "aXcabcaYc a?c ? b").unwrap();
        assert_eq!(output, "1\n7\n");

        let output = exec(&opt(true, true, true), "aXcabcaYc a?c ? b").unwrap();
        assert_eq!(output, "1\n7\n");
    }

    #[test]
    fn test_malformed_wildcard() {
        assert!(matches!(
            exec(&opt(true, false, false), "abc a?c ??"),
            Err(Error::Wildcard(_))
        ));
        assert!(matches!(
            exec(&opt(false, true, true), "abc a?c ? 好"),
            Err(Error::Wildcard(_))
        ));
    }
}

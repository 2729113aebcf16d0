use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Streams},
        scope::ScopeChain,
        value::core::Value,
    },
};

impl Streams<'_> {
    /// Writes `text` and a newline to the output stream.
    ///
    /// # Errors
    /// `Io` if the stream rejects the write.
    pub fn write_line(&mut self, text: &str) -> EvalResult<()> {
        writeln!(self.output, "{text}").map_err(|e| RuntimeError::Io { details: e.to_string(),
                                                                       lexeme:  None, })
    }
}

/// Prints the bound parameter `p` with its `Display` form.
fn print_parameter(scopes: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    let text = scopes.lookup("p")?.to_string();
    streams.write_line(&text)?;
    Ok(Flow::Normal)
}

/// `void printi(int p)`
///
/// # Errors
/// `Io` if the output stream fails.
pub fn printi(scopes: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    print_parameter(scopes, streams)
}

/// `void printf(float p)`. Whole numbers keep their fractional part: `2.0`.
///
/// # Errors
/// `Io` if the output stream fails.
pub fn printf(scopes: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    print_parameter(scopes, streams)
}

/// `void printl(array p)`, written as a nested list like `[[1, 2], [3, 4]]`.
///
/// # Errors
/// `Io` if the output stream fails.
pub fn printl(scopes: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    print_parameter(scopes, streams)
}

/// `void prints(string p)`, with escape sequences expanded.
///
/// # Errors
/// `Io` if the output stream fails.
pub fn prints(scopes: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    let text = match scopes.lookup("p")? {
        Value::Str(s) => unescape(s),
        other => other.to_string(),
    };
    streams.write_line(&text)?;
    Ok(Flow::Normal)
}

/// Expands `\n`, `\t`, `\\` and `\"`. Any other backslash is kept as is.
///
/// # Example
/// ```
/// use clite::interpreter::evaluator::function::print::unescape;
///
/// assert_eq!(unescape(r"a\tb\n"), "a\tb\n");
/// assert_eq!(unescape(r"C:\dir"), r"C:\dir");
/// ```
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let expanded = match chars.peek() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('\\') => '\\',
            Some('"') => '"',
            _ => {
                out.push(c);
                continue;
            },
        };
        chars.next();
        out.push(expanded);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_backslash_survives() {
        assert_eq!(unescape("end\\"), "end\\");
        assert_eq!(unescape(r#"say \"hi\""#), r#"say "hi""#);
        assert_eq!(unescape(r"\\n"), r"\n");
    }
}

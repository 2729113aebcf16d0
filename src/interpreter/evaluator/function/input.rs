use std::str::FromStr;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Streams},
        scope::ScopeChain,
        value::core::Value,
    },
};

fn io_error(details: impl Into<String>) -> RuntimeError {
    RuntimeError::Io { details: details.into(),
                       lexeme:  None, }
}

impl Streams<'_> {
    /// Reads the next whitespace-delimited token.
    ///
    /// Leading whitespace is skipped; the whitespace after the token is left
    /// in the stream.
    ///
    /// # Errors
    /// `Io` at end of input, on a read failure, or for invalid UTF-8.
    ///
    /// # Example
    /// ```
    /// use std::io::{Cursor, sink};
    ///
    /// use clite::interpreter::evaluator::core::Streams;
    ///
    /// let mut input = Cursor::new("  12\n  abc ");
    /// let mut output = sink();
    /// let mut streams = Streams { input: &mut input, output: &mut output };
    ///
    /// assert_eq!(streams.read_token().unwrap(), "12");
    /// assert_eq!(streams.read_token().unwrap(), "abc");
    /// assert!(streams.read_token().is_err());
    /// ```
    pub fn read_token(&mut self) -> EvalResult<String> {
        let mut token = Vec::new();
        loop {
            let buffer = self.input.fill_buf().map_err(|e| io_error(e.to_string()))?;
            if buffer.is_empty() {
                break;
            }
            let skipped = if token.is_empty() {
                buffer.iter().take_while(|b| b.is_ascii_whitespace()).count()
            } else {
                0
            };
            let rest = &buffer[skipped..];
            let taken = rest.iter().take_while(|b| !b.is_ascii_whitespace()).count();
            token.extend_from_slice(&rest[..taken]);
            let finished = taken < rest.len();
            self.input.consume(skipped + taken);
            if finished {
                break;
            }
        }

        if token.is_empty() {
            return Err(io_error("unexpected end of input"));
        }
        String::from_utf8(token).map_err(|e| io_error(e.to_string()))
    }

    /// Reads the rest of the current line without its line terminator.
    ///
    /// # Errors
    /// `Io` at end of input or on a read failure.
    pub fn read_line(&mut self) -> EvalResult<String> {
        let mut line = String::new();
        let read = self.input
                       .read_line(&mut line)
                       .map_err(|e| io_error(e.to_string()))?;
        if read == 0 {
            return Err(io_error("unexpected end of input"));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Reads a token and parses it as `T`.
fn read_parsed<T: FromStr>(streams: &mut Streams<'_>, kind: &str) -> EvalResult<T> {
    let token = streams.read_token()?;
    token.parse()
         .map_err(|_| io_error(format!("expected {kind} input, found '{token}'")))
}

/// `int inputi()`
///
/// # Errors
/// `Io` if no token is left or it is not an int.
pub fn inputi(_: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    let value = read_parsed::<i64>(streams, "an int")?;
    Ok(Flow::Return(Value::Int(value), None))
}

/// `float inputf()`
///
/// # Errors
/// `Io` if no token is left or it is not a number.
pub fn inputf(_: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    let value = read_parsed::<f64>(streams, "a float")?;
    Ok(Flow::Return(Value::Float(value), None))
}

/// `string inputs()`
///
/// # Errors
/// `Io` if no token is left.
pub fn inputs(_: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    let token = streams.read_token()?;
    Ok(Flow::Return(Value::Str(token), None))
}

/// `string inputline()`
///
/// # Errors
/// `Io` at end of input.
pub fn inputline(_: &ScopeChain, streams: &mut Streams<'_>) -> EvalResult<Flow> {
    let line = streams.read_line()?;
    Ok(Flow::Return(Value::Str(line), None))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, sink};

    use super::*;

    #[test]
    fn tokens_and_lines_share_one_stream() {
        let mut input = Cursor::new("7 rest of line\r\nnext\n");
        let mut output = sink();
        let mut streams = Streams { input:  &mut input,
                                    output: &mut output, };

        assert_eq!(read_parsed::<i64>(&mut streams, "an int").unwrap(), 7);
        assert_eq!(streams.read_line().unwrap(), " rest of line");
        assert_eq!(streams.read_line().unwrap(), "next");
        assert!(matches!(streams.read_line(), Err(RuntimeError::Io { .. })));
    }

    #[test]
    fn unparsable_input_is_an_io_error() {
        let mut input = Cursor::new("abc");
        let mut output = sink();
        let mut streams = Streams { input:  &mut input,
                                    output: &mut output, };

        assert!(matches!(read_parsed::<f64>(&mut streams, "a float"),
                         Err(RuntimeError::Io { .. })));
    }
}

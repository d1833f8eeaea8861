//! Strict quote validation.
//!
//! The `csv` reader recovers from every quoting mistake on its own, which is
//! what lazy mode wants. Strict mode runs this pass first so malformed files
//! are rejected with a line number instead of being silently reinterpreted.

#[derive(Clone, Copy)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just saw a quote inside a quoted field: either an escape or the close.
    QuoteInQuoted,
}

/// A quoting violation and the 1-based line it occurred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteViolation {
    pub line: u64,
    pub reason: &'static str,
}

/// Checks `text` against RFC 4180 quoting rules.
pub fn validate_quotes(text: &str, delimiter: char) -> Result<(), QuoteViolation> {
    let mut state = State::FieldStart;
    let mut line = 1u64;
    let mut quote_line = 1u64;

    for c in text.chars() {
        state = match (state, c) {
            (State::FieldStart, '"') => {
                quote_line = line;
                State::Quoted
            }
            (State::FieldStart | State::Unquoted | State::QuoteInQuoted, '\n') => {
                line += 1;
                State::FieldStart
            }
            (State::FieldStart | State::Unquoted | State::QuoteInQuoted, c) if c == delimiter => {
                State::FieldStart
            }
            (State::FieldStart, '\r') => State::FieldStart,
            (State::FieldStart | State::Unquoted, _) if c == '"' => {
                return Err(QuoteViolation {
                    line,
                    reason: "bare quote in unquoted field",
                });
            }
            (State::FieldStart | State::Unquoted, _) => State::Unquoted,
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, '\n') => {
                line += 1;
                State::Quoted
            }
            (State::Quoted, _) => State::Quoted,
            (State::QuoteInQuoted, '"') => State::Quoted,
            (State::QuoteInQuoted, '\r') => State::QuoteInQuoted,
            (State::QuoteInQuoted, _) => {
                return Err(QuoteViolation {
                    line,
                    reason: "unexpected character after closing quote",
                });
            }
        };
    }

    if matches!(state, State::Quoted) {
        return Err(QuoteViolation {
            line: quote_line,
            reason: "unterminated quoted field",
        });
    }
    Ok(())
}

//! Tokenizer for KeyValues-style text
//!
//! Used for VMT materials and for the mount configuration. Rules:
//!
//! - everything from `//` to the end of a line is dropped
//! - tokens are separated by whitespace
//! - double quotes group characters into a token and are removed; quoted and
//!   unquoted runs that touch join into a single token
//! - a quoted run may continue onto the next line, the line break becoming a
//!   space
//! - backslashes are ordinary characters, so Windows style paths survive

use crate::error::{Result, VmtError};

/// Split text into tokens
pub fn tokenize(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut in_token = false;
    let mut quote_line = None;

    for (number, line) in text.lines().enumerate() {
        let line = line.split("//").next().unwrap_or_default();

        for c in line.chars() {
            if quote_line.is_some() {
                if c == '"' {
                    quote_line = None;
                } else {
                    token.push(c);
                }
            } else if c == '"' {
                quote_line = Some(number + 1);
                in_token = true;
            } else if c.is_whitespace() {
                if in_token {
                    tokens.push(std::mem::take(&mut token));
                    in_token = false;
                }
            } else {
                token.push(c);
                in_token = true;
            }
        }

        if quote_line.is_some() {
            token.push(' ');
        } else if in_token {
            tokens.push(std::mem::take(&mut token));
            in_token = false;
        }
    }

    if let Some(line) = quote_line {
        return Err(VmtError::UnterminatedQuote { line });
    }
    Ok(tokens)
}

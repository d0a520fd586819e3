//! Splits template text into literal runs and tokenised actions.

use super::RenderError;

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Token {
    Str(String),
    Number(String),
    Bool(bool),
    Field(String),
    Ident(String),
    LParen,
    RParen,
    Pipe,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Segment {
    Text(String),
    Action(Vec<Token>),
}

/// Break `input` into text and `{{ ... }}` actions, applying `{{-` and
/// `-}}` whitespace trimming.
pub(super) fn segments(input: &str) -> Result<Vec<Segment>, RenderError> {
    let mut out = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        let (before, opened) = rest.split_at(start);
        let body = opened.strip_prefix("{{").unwrap_or(opened);
        let (trim_left, body) = match body.strip_prefix('-') {
            Some(tail) if tail.starts_with(char::is_whitespace) => (true, tail),
            _ => (false, body),
        };
        let text = if trim_left { before.trim_end() } else { before };
        if !text.is_empty() {
            out.push(Segment::Text(text.to_owned()));
        }
        let (tokens, trim_right, after) = lex_action(body)?;
        out.push(Segment::Action(tokens));
        rest = if trim_right { after.trim_start() } else { after };
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest.to_owned()));
    }
    Ok(out)
}

fn lex_action(mut rest: &str) -> Result<(Vec<Token>, bool, &str), RenderError> {
    let mut tokens = Vec::new();
    loop {
        let trimmed = rest.trim_start();
        let spaced = trimmed.len() < rest.len();
        rest = trimmed;
        if let Some(after) = rest.strip_prefix("}}") {
            return Ok((tokens, false, after));
        }
        if spaced && let Some(after) = rest.strip_prefix("-}}") {
            return Ok((tokens, true, after));
        }
        let mut chars = rest.chars();
        let Some(first) = chars.next() else {
            return Err(RenderError::new("unterminated action"));
        };
        let (token, tail) = match first {
            '(' => (Token::LParen, chars.as_str()),
            ')' => (Token::RParen, chars.as_str()),
            '|' => (Token::Pipe, chars.as_str()),
            '"' => lex_quoted(chars.as_str())?,
            '`' => lex_raw(chars.as_str())?,
            '.' => {
                let (name, tail) = take_ident(chars.as_str());
                if name.is_empty() {
                    return Err(RenderError::new("expected a variable name after '.'"));
                }
                (Token::Field(name.to_owned()), tail)
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' => lex_number(rest),
            c if c.is_alphabetic() || c == '_' => {
                let (word, tail) = take_ident(rest);
                let token = match word {
                    "true" => Token::Bool(true),
                    "false" => Token::Bool(false),
                    _ => Token::Ident(word.to_owned()),
                };
                (token, tail)
            }
            other => {
                return Err(RenderError::new(format!(
                    "unexpected {other:?} in action"
                )));
            }
        };
        tokens.push(token);
        rest = tail;
    }
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn lex_number(input: &str) -> (Token, &str) {
    let mut chars = input.char_indices();
    chars.next();
    let end = chars
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-')))
        .map_or(input.len(), |(i, _)| i);
    let (number, tail) = input.split_at(end);
    (Token::Number(number.to_owned()), tail)
}

fn lex_quoted(input: &str) -> Result<(Token, &str), RenderError> {
    let mut value = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                let (_, tail) = input.split_at(i + c.len_utf8());
                return Ok((Token::Str(value), tail));
            }
            '\\' => {
                let escaped = match chars.next() {
                    Some((_, 'n')) => '\n',
                    Some((_, 't')) => '\t',
                    Some((_, 'r')) => '\r',
                    Some((_, '\\')) => '\\',
                    Some((_, '"')) => '"',
                    Some((_, other)) => {
                        return Err(RenderError::new(format!(
                            "unknown escape sequence \\{other}"
                        )));
                    }
                    None => break,
                };
                value.push(escaped);
            }
            '\n' => break,
            _ => value.push(c),
        }
    }
    Err(RenderError::new("unterminated quoted string"))
}

fn lex_raw(input: &str) -> Result<(Token, &str), RenderError> {
    let end = input
        .find('`')
        .ok_or_else(|| RenderError::new("unterminated raw string"))?;
    let (value, tail) = input.split_at(end);
    let tail = tail.strip_prefix('`').unwrap_or(tail);
    Ok((Token::Str(value.to_owned()), tail))
}

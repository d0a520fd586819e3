//! Evaluates tokenised actions against an environment snapshot.

use std::fmt;
use std::iter::Peekable;
use std::slice;

use super::RenderError;
use super::lexer::Token;
use crate::EnvSnapshot;

const CONTROL_KEYWORDS: &[&str] = &[
    "block", "break", "continue", "define", "else", "end", "if", "range", "template", "with",
];

/// A value flowing through an action.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Datum {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Datum {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Evaluate one action's tokens to the text it produces.
pub(super) fn evaluate(tokens: &[Token], env: &EnvSnapshot) -> Result<Datum, RenderError> {
    let mut eval = Evaluator {
        tokens: tokens.iter().peekable(),
        env,
    };
    let value = eval.pipeline()?;
    match eval.tokens.next() {
        None => Ok(value),
        Some(extra) => Err(RenderError::new(format!("unexpected {extra:?} in action"))),
    }
}

struct Evaluator<'a> {
    tokens: Peekable<slice::Iter<'a, Token>>,
    env: &'a EnvSnapshot,
}

impl Evaluator<'_> {
    fn pipeline(&mut self) -> Result<Datum, RenderError> {
        let mut value = self.command(None)?;
        while self.tokens.next_if_eq(&&Token::Pipe).is_some() {
            value = self.command(Some(value))?;
        }
        Ok(value)
    }

    fn command(&mut self, piped: Option<Datum>) -> Result<Datum, RenderError> {
        match self.tokens.next() {
            Some(Token::Ident(name)) => {
                let mut args = Vec::new();
                while let Some(arg) = self.operand()? {
                    args.push(arg);
                }
                args.extend(piped);
                call(name, args, self.env)
            }
            Some(token) => {
                if piped.is_some() {
                    return Err(RenderError::new(format!(
                        "cannot pipe into non-function {token:?}"
                    )));
                }
                let value = self.resolve(token)?;
                if self.operand()?.is_some() {
                    return Err(RenderError::new("can't give argument to non-function"));
                }
                Ok(value)
            }
            None => Err(RenderError::new("missing value for command")),
        }
    }

    fn operand(&mut self) -> Result<Option<Datum>, RenderError> {
        match self.tokens.peek() {
            None | Some(Token::Pipe | Token::RParen) => Ok(None),
            Some(_) => match self.tokens.next() {
                Some(token) => self.resolve(token).map(Some),
                None => Ok(None),
            },
        }
    }

    fn resolve(&mut self, token: &Token) -> Result<Datum, RenderError> {
        match token {
            Token::Str(s) => Ok(Datum::Str(s.clone())),
            Token::Number(raw) => parse_number(raw),
            Token::Bool(b) => Ok(Datum::Bool(*b)),
            Token::Field(name) => Ok(Datum::Str(
                self.env.get(name).unwrap_or_default().to_owned(),
            )),
            Token::Ident(name) => call(name, Vec::new(), self.env),
            Token::LParen => {
                let value = self.pipeline()?;
                if self.tokens.next_if_eq(&&Token::RParen).is_none() {
                    return Err(RenderError::new("unclosed left paren"));
                }
                Ok(value)
            }
            Token::RParen => Err(RenderError::new("unexpected right paren")),
            Token::Pipe => Err(RenderError::new("missing value for command")),
        }
    }
}

fn parse_number(raw: &str) -> Result<Datum, RenderError> {
    let digits = raw.replace('_', "");
    if let Ok(i) = digits.parse::<i64>() {
        return Ok(Datum::Int(i));
    }
    match digits.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(Datum::Float(x)),
        _ => Err(RenderError::new(format!("bad number syntax: {raw:?}"))),
    }
}

fn call(name: &str, args: Vec<Datum>, env: &EnvSnapshot) -> Result<Datum, RenderError> {
    if CONTROL_KEYWORDS.contains(&name) {
        return Err(RenderError::new(format!("unsupported action {name:?}")));
    }
    match name {
        "env" => {
            let [key] = arity(name, args)?;
            let key = string_arg(name, key)?;
            Ok(Datum::Str(env.get(&key).unwrap_or_default().to_owned()))
        }
        "default" => {
            let [fallback, value] = arity(name, args)?;
            Ok(Datum::Str(match (fallback, value) {
                (_, Datum::Str(value)) if !value.is_empty() => value,
                (Datum::Str(fallback), _) => fallback,
                _ => String::new(),
            }))
        }
        "upper" => unary_text(name, args, |s| s.to_uppercase()),
        "lower" => unary_text(name, args, |s| s.to_lowercase()),
        "trimSpace" => unary_text(name, args, |s| s.trim().to_owned()),
        _ => Err(RenderError::new(format!("function {name:?} not defined"))),
    }
}

fn arity<const N: usize>(name: &str, args: Vec<Datum>) -> Result<[Datum; N], RenderError> {
    let given = args.len();
    args.try_into().map_err(|_| {
        RenderError::new(format!(
            "wrong number of args for {name}: want {N} got {given}"
        ))
    })
}

fn string_arg(name: &str, arg: Datum) -> Result<String, RenderError> {
    match arg {
        Datum::Str(s) => Ok(s),
        other => Err(RenderError::new(format!(
            "wrong type for value in {name}; expected string; got {}",
            other.type_name()
        ))),
    }
}

fn unary_text(
    name: &str,
    args: Vec<Datum>,
    op: impl FnOnce(&str) -> String,
) -> Result<Datum, RenderError> {
    let [arg] = arity(name, args)?;
    let text = string_arg(name, arg)?;
    Ok(Datum::Str(op(&text)))
}

//! Symbolic expressions
//!
//! Keys and results cross the expression backend as nested lists of tokens
//! and data atoms, e.g.
//!
//! ```text
//! (key-data(public-key(ecdh(curve "NIST P-256")(q #04...#))))
//! ```
//!
//! Expressions are built from a format string where `%s` takes a string
//! argument and `%b` a byte-string argument; both become data atoms.

use core::fmt;
use zeroize::Zeroize;

use crate::error::{BackendError, ErrorCode, ErrorSource};
use crate::mpi::Mpi;

/// Argument substituted into a format string
#[derive(Debug, Clone, Copy)]
pub enum SexpArg<'a> {
    /// `%s`
    Str(&'a str),
    /// `%b`
    Bytes(&'a [u8]),
}

/// Expression node
#[derive(Clone, PartialEq, Eq)]
pub enum Sexp {
    Token(String),
    Data(Vec<u8>),
    List(Vec<Sexp>),
}

const fn sexp_error(code: ErrorCode) -> BackendError {
    BackendError::new(ErrorSource::Sexp, code)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-./_:*+=".contains(c)
}

impl Sexp {
    /// Build an expression from `format`, substituting `args` in order.
    ///
    /// The format must describe exactly one list and consume every argument.
    pub fn build(format: &str, args: &[SexpArg<'_>]) -> Result<Self, BackendError> {
        let mut stack: Vec<Vec<Sexp>> = Vec::new();
        let mut root: Option<Sexp> = None;
        let mut args = args.iter();
        let mut chars = format.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                '(' => {
                    if root.is_some() {
                        return Err(sexp_error(ErrorCode::BadFormat));
                    }
                    stack.push(Vec::new());
                }
                ')' => {
                    let items = stack.pop().ok_or(sexp_error(ErrorCode::BadFormat))?;
                    let list = Sexp::List(items);
                    match stack.last_mut() {
                        Some(parent) => parent.push(list),
                        None => root = Some(list),
                    }
                }
                '%' => {
                    let directive = chars.next().map(|(_, directive)| directive);
                    let parent = stack.last_mut().ok_or(sexp_error(ErrorCode::BadFormat))?;
                    let atom = match (directive, args.next()) {
                        (Some('s' | 'b'), None) => return Err(sexp_error(ErrorCode::MissingArgument)),
                        (Some('s'), Some(SexpArg::Str(s))) => Sexp::Data(s.as_bytes().to_vec()),
                        (Some('b'), Some(SexpArg::Bytes(b))) => Sexp::Data(b.to_vec()),
                        (Some('s' | 'b'), Some(_)) => return Err(sexp_error(ErrorCode::WrongArgType)),
                        _ => return Err(sexp_error(ErrorCode::BadFormat)),
                    };
                    parent.push(atom);
                }
                c if c.is_whitespace() => {}
                c if is_token_char(c) => {
                    let mut end = start + c.len_utf8();
                    while let Some(&(next_start, next)) = chars.peek() {
                        if !is_token_char(next) {
                            break;
                        }
                        end = next_start + next.len_utf8();
                        chars.next();
                    }
                    let parent = stack.last_mut().ok_or(sexp_error(ErrorCode::BadFormat))?;
                    parent.push(Sexp::Token(format[start..end].to_string()));
                }
                _ => return Err(sexp_error(ErrorCode::BadFormat)),
            }
        }

        if !stack.is_empty() || args.next().is_some() {
            return Err(sexp_error(ErrorCode::BadFormat));
        }
        root.ok_or(sexp_error(ErrorCode::BadFormat))
    }

    /// Token heading this list, if any
    pub fn car(&self) -> Option<&str> {
        match self {
            Sexp::List(items) => match items.first() {
                Some(Sexp::Token(token)) => Some(token.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Depth-first search for the first list headed by `token`
    pub fn find_token(&self, token: &str) -> Option<&Sexp> {
        match self {
            Sexp::List(items) => {
                if self.car() == Some(token) {
                    return Some(self);
                }
                items.iter().find_map(|item| item.find_token(token))
            }
            _ => None,
        }
    }

    /// Element `n` of this list
    pub fn nth(&self, n: usize) -> Option<&Sexp> {
        match self {
            Sexp::List(items) => items.get(n),
            _ => None,
        }
    }

    /// Bytes of element `n` if it is an atom
    pub fn nth_data(&self, n: usize) -> Option<&[u8]> {
        match self.nth(n)? {
            Sexp::Data(data) => Some(data.as_slice()),
            Sexp::Token(token) => Some(token.as_bytes()),
            Sexp::List(_) => None,
        }
    }

    /// Element `n` as UTF-8 text
    pub fn nth_str(&self, n: usize) -> Option<&str> {
        core::str::from_utf8(self.nth_data(n)?).ok()
    }

    /// Whether a `(flags ...)` list inside this expression carries `flag`
    pub fn has_flag(&self, flag: &str) -> bool {
        match self.find_token("flags") {
            Some(Sexp::List(items)) => items
                .iter()
                .skip(1)
                .any(|item| matches!(item, Sexp::Token(token) if token == flag)),
            _ => false,
        }
    }

    /// Extract parameter `name` as an integer.
    ///
    /// With an empty `path` the whole expression is searched; otherwise only
    /// the list headed by `path`.
    pub fn extract_mpi(&self, path: &str, name: &str) -> Result<Mpi, BackendError> {
        let scope = if path.is_empty() {
            self
        } else {
            self.find_token(path).ok_or(sexp_error(ErrorCode::NoObject))?
        };
        let value = scope
            .find_token(name)
            .and_then(|param| param.nth_data(1))
            .ok_or(sexp_error(ErrorCode::NoObject))?;
        Ok(Mpi::from_be_bytes(value))
    }
}

impl Drop for Sexp {
    fn drop(&mut self) {
        if let Sexp::Data(data) = self {
            data.zeroize();
        }
    }
}

/// Longest data atom rendered verbatim
const SHOWN_ATOM_LEN: usize = 16;

fn is_plain_text(data: &[u8]) -> bool {
    !data.is_empty()
        && data.len() <= SHOWN_ATOM_LEN
        && data
            .iter()
            .all(|&b| (b.is_ascii_graphic() && b != b'"' && b != b'\\') || b == b' ')
}

/// Transport form for diagnostics. Only short text atoms such as curve names
/// are shown; other data atoms are reduced to their length.
impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Token(token) => f.write_str(token),
            Sexp::Data(data) if is_plain_text(data) => {
                write!(f, "\"{}\"", String::from_utf8_lossy(data))
            }
            Sexp::Data(data) => write!(f, "[{} bytes]", data.len()),
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    let separate = i > 0 && matches!(item, Sexp::Token(_) | Sexp::Data(_));
                    if separate {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Structure only; atoms are reduced to their length
impl fmt::Debug for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Token(token) => write!(f, "Token({})", token),
            Sexp::Data(data) => write!(f, "Data({} bytes)", data.len()),
            Sexp::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

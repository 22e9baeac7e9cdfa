// src/utils/origin.rs

use std::cell::Cell;
use std::fmt;

use url::{ParseError, SyntaxViolation, Url};

use crate::error::AppError;

/// Schemes a same-site navigation or an image fetch may use.
pub const HTTP_SCHEMES: [&str; 2] = ["http", "https"];

/// Why an untrusted string could not be turned into a `Url`.
///
/// Lenient WHATWG parsing silently repairs input (drops tabs, turns `\` into
/// `/`, percent-encodes spaces). Those repairs are exactly what smuggling
/// payloads rely on, so any reported violation counts as a failed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unparseable {
    Invalid(ParseError),
    Malformed(SyntaxViolation),
}

impl fmt::Display for Unparseable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unparseable::Invalid(e) => write!(f, "{}", e),
            Unparseable::Malformed(v) => write!(f, "{}", v.description()),
        }
    }
}

fn parse_strict(base: Option<&Url>, candidate: &str) -> Result<Url, Unparseable> {
    let violation = Cell::new(None);
    let record = |v: SyntaxViolation| {
        // keep the first one
        let first = violation.take().unwrap_or(v);
        violation.set(Some(first));
    };

    let parsed = Url::options()
        .base_url(base)
        .syntax_violation_callback(Some(&record))
        .parse(candidate)
        .map_err(Unparseable::Invalid)?;

    match violation.take() {
        Some(v) => Err(Unparseable::Malformed(v)),
        None => Ok(parsed),
    }
}

/// Parses a fully qualified URL; relative input is an error.
pub fn parse_absolute(candidate: &str) -> Result<Url, Unparseable> {
    parse_strict(None, candidate)
}

/// The origin of the page currently being served.
///
/// Passed explicitly to the validators instead of being read from ambient
/// state, so every check is reproducible from its inputs alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    base: Url,
}

impl SiteOrigin {
    /// Parses an `http`/`https` origin such as `https://app.example.com`.
    /// Any path, query or fragment is dropped.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let mut base = Url::parse(input.trim())
            .map_err(|e| AppError::Config(format!("origin '{}': {}", input, e)))?;

        if !HTTP_SCHEMES.contains(&base.scheme()) {
            return Err(AppError::Config(format!(
                "origin '{}' must use http or https",
                input
            )));
        }
        if base.host_str().is_none_or(str::is_empty) {
            return Err(AppError::Config(format!("origin '{}' has no host", input)));
        }

        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    /// Normalized host (lowercase, IDNA-encoded).
    pub fn host(&self) -> &str {
        self.base.host_str().unwrap_or_default()
    }

    /// ASCII serialization, e.g. `https://app.example.com:8443`.
    pub fn as_str(&self) -> String {
        self.base.origin().ascii_serialization()
    }

    /// Resolves `candidate` against this origin, the way a browser resolves an `href`.
    pub fn resolve(&self, candidate: &str) -> Result<Url, Unparseable> {
        parse_strict(Some(&self.base), candidate)
    }

    /// True when `url` points at the same host as this origin.
    pub fn same_host(&self, url: &Url) -> bool {
        url.host_str() == Some(self.host())
    }
}

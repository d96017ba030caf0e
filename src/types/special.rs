// vuex_common/src/types/special.rs
//
// Opaque value kinds: callables, instants and regular-expression matchers

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use regex::{Regex, RegexBuilder};

use super::value::Value;
use crate::errors::ValueError;

type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// An opaque callable, compared by reference
#[derive(Clone)]
pub struct Function {
    inner: Arc<NativeFn>,
}

impl Function {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.inner)(args)
    }

    /// A callable that ignores its own arguments and calls this one with `[arg]`
    pub fn partial(&self, arg: Value) -> Function {
        let target = self.clone();
        Function::new(move |_| target.call(std::slice::from_ref(&arg)))
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::as_ptr(&self.inner) as *const () == Arc::as_ptr(&other.inner) as *const ()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Arc::as_ptr(&self.inner) as *const ())
    }
}

/// A date-like instant with millisecond precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateObject {
    instant: DateTime<Utc>,
}

impl DateObject {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Build from milliseconds since the Unix epoch
    pub fn from_millis(millis: i64) -> Result<Self, ValueError> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self::new)
            .ok_or_else(|| ValueError::InvalidDate(format!("{} ms is out of range", millis)))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn to_rfc3339(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// A compiled regular expression together with its source and flags
///
/// Supported flags: `i` (case-insensitive), `m` (multi-line), `s` (dot
/// matches newline). `g`, `u` and `y` are accepted and kept for callers that
/// track match positions themselves.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    source: String,
    flags: String,
}

impl Pattern {
    pub fn new(source: &str, flags: &str) -> Result<Self, ValueError> {
        let mut builder = RegexBuilder::new(source);
        let mut seen = String::new();
        for flag in flags.chars() {
            if seen.contains(flag) {
                return Err(ValueError::InvalidPattern(
                    source.to_string(),
                    format!("duplicate flag '{}'", flag),
                ));
            }
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'u' | 'y' => {}
                other => {
                    return Err(ValueError::InvalidPattern(
                        source.to_string(),
                        format!("unknown flag '{}'", other),
                    ))
                }
            }
            seen.push(flag);
        }
        let regex = builder
            .build()
            .map_err(|err| ValueError::InvalidPattern(source.to_string(), err.to_string()))?;
        Ok(Self {
            regex,
            source: source.to_string(),
            flags: seen,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Byte range of the leftmost match
    pub fn find(&self, haystack: &str) -> Option<(usize, usize)> {
        self.regex.find(haystack).map(|m| (m.start(), m.end()))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

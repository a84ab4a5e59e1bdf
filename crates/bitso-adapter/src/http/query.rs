/*
[INPUT]:  Endpoint base paths, identifier lists and free-form query parameters
[OUTPUT]: Request paths (including query string) ready for signing
[POS]:    HTTP layer - path and query string construction
[UPDATE]: When changing parameter joining rules
*/

use crate::http::{BitsoError, Result};

/// Join parameters with `separator`, trimming each entry and skipping empty ones.
///
/// Returns `None` when nothing is left to join.
pub fn join_params<S: AsRef<str>>(separator: &str, params: &[S]) -> Option<String> {
    let joined = params
        .iter()
        .map(|param| param.as_ref().trim())
        .filter(|param| !param.is_empty())
        .collect::<Vec<_>>()
        .join(separator);

    if joined.is_empty() { None } else { Some(joined) }
}

/// Characters that would carry an identifier out of its path segment
const RESERVED: &[char] = &['/', '\\', '?', '#'];

/// Incremental builder for `/api/v3/...` request paths
#[derive(Debug, Clone)]
pub(crate) struct PathBuilder {
    path: String,
    query: Vec<String>,
}

impl PathBuilder {
    pub(crate) fn new(base: &str) -> Self {
        Self {
            path: base.to_string(),
            query: Vec::new(),
        }
    }

    /// Append a single `/segment`; blank segments are ignored
    pub(crate) fn segment(mut self, segment: &str) -> Result<Self> {
        let segment = segment.trim();
        if !segment.is_empty() {
            self.path.push('/');
            self.path.push_str(check_segment(segment)?);
        }
        Ok(self)
    }

    /// Append identifiers as one `/id1-id2-...` segment
    pub(crate) fn ids<S: AsRef<str>>(mut self, ids: &[S]) -> Result<Self> {
        if let Some(joined) = join_params("-", ids) {
            self.path.push('/');
            self.path.push_str(check_segment(&joined)?);
        }
        Ok(self)
    }

    pub(crate) fn param(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        self.query.push(format!("{key}={value}"));
        self
    }

    /// Append caller-supplied `key=value` parameters
    pub(crate) fn raw_params<S: AsRef<str>>(mut self, params: &[S]) -> Self {
        if let Some(joined) = join_params("&", params) {
            self.query.push(joined);
        }
        self
    }

    pub(crate) fn build(self) -> String {
        match join_params("&", &self.query) {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path,
        }
    }
}

/// Reject segments that `Url::join` would split or collapse
fn check_segment(segment: &str) -> Result<&str> {
    if segment.contains(RESERVED) || segment == "." || segment == ".." {
        return Err(BitsoError::invalid_input(format!(
            "identifier {segment:?} is not a valid path segment"
        )));
    }
    Ok(segment)
}

/// True when at least one entry survives trimming
pub(crate) fn has_any<S: AsRef<str>>(params: &[S]) -> bool {
    params.iter().any(|param| !param.as_ref().trim().is_empty())
}

/// Path for endpoints addressed either by identifiers or by a filter, never both
pub(crate) fn ids_or_filter<I, P>(base: &str, ids: &[I], params: &[P]) -> Result<String>
where
    I: AsRef<str>,
    P: AsRef<str>,
{
    if has_any(ids) && has_any(params) {
        return Err(BitsoError::invalid_input(format!(
            "{base} takes identifiers or query parameters, not both"
        )));
    }
    Ok(PathBuilder::new(base).ids(ids)?.raw_params(params).build())
}

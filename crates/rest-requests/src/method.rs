//! HTTP request methods

use std::fmt;

/// HTTP request methods supported by [`request`](crate::request).
///
/// The set is closed: every variant maps to exactly one verb-specific
/// sender, and the mapping is an exhaustive `match` so adding a variant
/// without a handler fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    /// HTTP GET
    Get,
    /// HTTP HEAD
    Head,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP DELETE
    Delete,
    /// HTTP OPTIONS
    Options,
    /// HTTP PATCH
    Patch,
}

impl RequestMethod {
    /// Canonical uppercase name of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Head => "HEAD",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Options => "OPTIONS",
            RequestMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RequestMethod> for reqwest::Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Head => reqwest::Method::HEAD,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Options => reqwest::Method::OPTIONS,
            RequestMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This keeps the core deterministic: no timeouts, retries,
//! or cancellation live here, and the caller controls concurrency by deciding
//! how many requests to have in flight.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed to
//! any transport without lifetime concerns. Request bodies are raw bytes
//! because multipart uploads are not valid UTF-8.

/// HTTP method for a request. The sevdesk voucher surface only ever issues
/// GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `SevdeskClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `SevdeskClient::parse_*` methods for status classification and
/// envelope unwrapping. `body` holds whatever text the caller managed to
/// read; leave it empty if reading the body failed.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Per-call options for `SevdeskClient::build_request`: method, extra
/// headers, optional body. Headers named identically to a reserved header
/// replace it (see `build_request` for the merge order).
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
        }
    }
}

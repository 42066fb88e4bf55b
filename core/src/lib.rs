//! API client core for the sevdesk bookkeeping service.
//!
#![recursion_limit = "256"]
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `SevdeskClient` holds only a base URL and an immutable credential.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Every successful response arrives wrapped in `{ "objects": ... }`; the
//!   parse step gates on a 2xx status and unwraps that envelope.
//! - Wire types mirror the remote schema's loose typing (numeric strings,
//!   `"0"`/`"1"` booleans) instead of papering over it; normalization happens
//!   through explicit methods at the call site.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod multipart;
pub mod types;

pub use client::{extract_objects, Credential, SevdeskClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use multipart::MultipartForm;
pub use types::{
    BookkeepingSystemVersion, ExtractedVoucherInformation, SaveVoucherPayload, SavedVoucher,
    TemporaryVoucherFile, VersionInfo, VoucherCreditDebit, VoucherPosSpec, VoucherSpec,
    VoucherStatus, VoucherTax, VoucherTaxRule, VoucherType,
};

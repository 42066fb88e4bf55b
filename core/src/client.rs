//! Stateless request builder and response parser for the sevdesk API.
//!
//! # Design
//! `SevdeskClient` holds only a base URL and an immutable [`Credential`] and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an [`HttpRequest`] and a `parse_*` method
//! that consumes an [`HttpResponse`]. The caller executes the actual HTTP
//! round-trip, keeping the core deterministic and free of I/O dependencies —
//! timeouts, retries, and concurrency are entirely the caller's business.
//!
//! Every successful response wraps its payload in `{ "objects": ... }`;
//! `parse_*` gates on a 2xx status and returns the unwrapped payload.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::multipart::MultipartForm;
use crate::types::{
    ExtractedVoucherInformation, SaveVoucherPayload, SavedVoucher, TemporaryVoucherFile,
    VersionInfo, VoucherCreditDebit, VoucherTaxRule,
};

/// Production API host with its version path prefix.
pub const DEFAULT_BASE_URL: &str = "https://my.sevdesk.de/api/v1";

const ROUTE_VERSION: &str = "/Tools/bookkeepingSystemVersion";
const ROUTE_UPLOAD_TEMP_FILE: &str = "/Voucher/Factory/uploadTempFile";
const ROUTE_CREATE_FROM_PDF: &str = "/Voucher/Factory/createFromPdf";
const ROUTE_SAVE_VOUCHER: &str = "/Voucher/Factory/saveVoucher";
const ROUTE_DEFAULT_TAX_RULE: &str = "/Voucher/Factory/getDefaultTaxRule";

/// Immutable API credential: an opaque token and an optional user-agent
/// string, both fixed for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct Credential {
    token: String,
    user_agent: Option<String>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_agent: None,
        }
    }

    pub fn with_user_agent(token: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_agent: Some(user_agent.into()),
        }
    }
}

/// Stateless client for the sevdesk voucher API.
///
/// Builds [`HttpRequest`] values and parses [`HttpResponse`] values without
/// touching the network. Performs no I/O at construction time.
#[derive(Debug, Clone)]
pub struct SevdeskClient {
    base_url: String,
    credential: Credential,
}

impl SevdeskClient {
    /// Client against the production host.
    pub fn new(credential: Credential) -> Self {
        Self::with_base_url(credential, DEFAULT_BASE_URL)
    }

    /// Client against a different host (tests, staging).
    pub fn with_base_url(credential: Credential, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    /// Assemble a request for `route` (leading slash, appended verbatim to
    /// the base URL).
    ///
    /// Header merge order is reserved-first, caller-second: `Authorization`
    /// and (when configured) `User-Agent` are seeded, then caller headers are
    /// applied in order, each replacing an existing header with the identical
    /// name. A caller header spelled exactly `Authorization` therefore
    /// replaces the credential token for that call; callers may rely on
    /// either side of this, so the precedence is pinned by test.
    pub fn build_request(&self, route: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![("Authorization".to_string(), self.credential.token.clone())];
        if let Some(user_agent) = &self.credential.user_agent {
            headers.push(("User-Agent".to_string(), user_agent.clone()));
        }
        for (name, value) in options.headers {
            match headers.iter().position(|(existing, _)| *existing == name) {
                Some(index) => headers[index].1 = value,
                None => headers.push((name, value)),
            }
        }
        HttpRequest {
            method: options.method,
            path: format!("{}{route}", self.base_url),
            headers,
            body: options.body,
        }
    }

    /// GET the bookkeeping system version. Callers must branch on the result
    /// when building save-voucher payloads: the two schema generations take
    /// different tax shapes.
    pub fn build_bookkeeping_system_version(&self) -> HttpRequest {
        self.build_request(ROUTE_VERSION, RequestOptions::default())
    }

    pub fn parse_bookkeeping_system_version(
        &self,
        response: HttpResponse,
    ) -> Result<VersionInfo, ApiError> {
        parse_objects(ROUTE_VERSION, response)
    }

    /// POST a document as a multipart upload. The blob goes out under the
    /// part name `file` together with its filename; the response references
    /// server-side staged content.
    pub fn build_upload_temp_file(&self, filename: &str, content: &[u8]) -> HttpRequest {
        let form =
            MultipartForm::new().file("file", filename, "application/octet-stream", content);
        let content_type = form.content_type();
        self.build_request(
            ROUTE_UPLOAD_TEMP_FILE,
            RequestOptions {
                method: HttpMethod::Post,
                headers: vec![("content-type".to_string(), content_type)],
                body: Some(form.finish()),
            },
        )
    }

    pub fn parse_upload_temp_file(
        &self,
        response: HttpResponse,
    ) -> Result<TemporaryVoucherFile, ApiError> {
        parse_objects(ROUTE_UPLOAD_TEMP_FILE, response)
    }

    /// POST a reference to a previously staged file and get OCR-style
    /// extraction candidates back.
    pub fn build_create_from_pdf(&self, filename: &str, mime_type: &str) -> HttpRequest {
        let form = MultipartForm::new()
            .text("filename", filename)
            .text("mimeType", mime_type);
        let content_type = form.content_type();
        self.build_request(
            ROUTE_CREATE_FROM_PDF,
            RequestOptions {
                method: HttpMethod::Post,
                headers: vec![("content-type".to_string(), content_type)],
                body: Some(form.finish()),
            },
        )
    }

    pub fn parse_create_from_pdf(
        &self,
        response: HttpResponse,
    ) -> Result<ExtractedVoucherInformation, ApiError> {
        parse_objects(ROUTE_CREATE_FROM_PDF, response)
    }

    /// POST a voucher header plus its positions. Creating a voucher is not
    /// idempotent; re-issuing after an ambiguous failure is the caller's
    /// call.
    pub fn build_save_voucher(&self, payload: &SaveVoucherPayload) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_vec(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build_request(
            ROUTE_SAVE_VOUCHER,
            RequestOptions {
                method: HttpMethod::Post,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: Some(body),
            },
        ))
    }

    pub fn parse_save_voucher(&self, response: HttpResponse) -> Result<SavedVoucher, ApiError> {
        parse_objects(ROUTE_SAVE_VOUCHER, response)
    }

    /// GET the default tax rule for the credit or debit side. Only meaningful
    /// under bookkeeping system 2.0.
    pub fn build_default_tax_rule(&self, voucher_type: VoucherCreditDebit) -> HttpRequest {
        let route = format!("{ROUTE_DEFAULT_TAX_RULE}?voucherType={}", voucher_type.code());
        self.build_request(&route, RequestOptions::default())
    }

    pub fn parse_default_tax_rule(
        &self,
        response: HttpResponse,
    ) -> Result<VoucherTaxRule, ApiError> {
        parse_objects(ROUTE_DEFAULT_TAX_RULE, response)
    }
}

/// Wire-level wrapper every response uses around its real payload.
#[derive(Deserialize)]
struct Envelope<T> {
    objects: T,
}

/// Unwrap the `objects` field of a response body, discarding any sibling
/// top-level fields (pagination metadata and the like). Malformed JSON or a
/// missing `objects` field surfaces as the serde error, unannotated.
pub fn extract_objects<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
    Ok(envelope.objects)
}

fn parse_objects<T: DeserializeOwned>(route: &str, response: HttpResponse) -> Result<T, ApiError> {
    check_status(route, &response)?;
    extract_objects(&response.body)
}

/// Gate on a 2xx status. Anything else fails with the raw status code and
/// whatever body text was recovered; client and server errors are not told
/// apart and nothing is retried.
fn check_status(route: &str, response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    let body = if response.body.is_empty() {
        None
    } else {
        Some(response.body.clone())
    };
    Err(ApiError::Http {
        route: route.to_string(),
        status: response.status,
        body,
    })
}

//! Minimal `multipart/form-data` body builder.
//!
//! The upload routes take one file part and a handful of text fields; that is
//! the whole feature set here. Parts are framed with CRLF per RFC 7578 and
//! the boundary is a fresh UUID, so it cannot collide with file content in
//! practice.

use uuid::Uuid;

/// Incrementally builds a multipart body. Obtain the header value with
/// [`content_type`](MultipartForm::content_type) before calling
/// [`finish`](MultipartForm::finish).
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: Uuid::new_v4().simple().to_string(),
            buf: Vec::new(),
        }
    }

    /// Append a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file field with its filename and raw content.
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, content: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(content);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Value for the request's `content-type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form and return the body bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

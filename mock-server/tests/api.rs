use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "mock-token";
const BOUNDARY: &str = "test-boundary";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, token);
    }
    builder.body(String::new()).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn multipart_request(uri: &str, parts: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(format!("{parts}--{BOUNDARY}--\r\n"))
        .unwrap()
}

fn file_part(filename: &str, content: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
    )
}

fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

// --- authentication ---

#[tokio::test]
async fn missing_token_is_rejected_with_body_text() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(get_request("/Tools/bookkeepingSystemVersion", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_bytes(resp).await.as_ref(), b"invalid token");
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(get_request("/Tools/bookkeepingSystemVersion", Some("nope")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- bookkeeping system version ---

#[tokio::test]
async fn version_is_wrapped_in_envelope() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(get_request("/Tools/bookkeepingSystemVersion", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["objects"]["version"], "2.0");
}

// --- uploadTempFile ---

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(multipart_request(
            "/Voucher/Factory/uploadTempFile",
            &text_part("something", "else"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_stages_file_and_keeps_extension() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(multipart_request(
            "/Voucher/Factory/uploadTempFile",
            &file_part("invoice.pdf", "%PDF-1.4 fake"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let objects = &json["objects"];
    assert_eq!(objects["originMimeType"], "application/pdf");
    assert_eq!(objects["mimeType"], "image/png");
    assert_eq!(objects["pages"], 1);
    let staged = objects["filename"].as_str().unwrap();
    assert!(staged.ends_with(".pdf"));
    assert_ne!(staged, "invoice.pdf");
    assert_eq!(
        format!("{}.pdf", objects["contentHash"].as_str().unwrap()),
        staged
    );
}

// --- createFromPdf ---

#[tokio::test]
async fn create_from_pdf_unknown_file_is_404() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(multipart_request(
            "/Voucher/Factory/createFromPdf",
            &format!(
                "{}{}",
                text_part("filename", "missing.pdf"),
                text_part("mimeType", "application/pdf")
            ),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await.as_ref(), b"unknown temporary file");
}

#[tokio::test]
async fn create_from_pdf_without_filename_field_is_rejected() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(multipart_request(
            "/Voucher/Factory/createFromPdf",
            &text_part("mimeType", "application/pdf"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_then_extract_lifecycle() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    // Stage a file.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(multipart_request(
            "/Voucher/Factory/uploadTempFile",
            &file_part("invoice.pdf", "%PDF-1.4 fake"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let staged = body_json(resp).await["objects"]["filename"]
        .as_str()
        .unwrap()
        .to_string();

    // Reference it.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(multipart_request(
            "/Voucher/Factory/createFromPdf",
            &format!(
                "{}{}",
                text_part("filename", &staged),
                text_part("mimeType", "application/pdf")
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let objects = &json["objects"];
    assert_eq!(objects["extractions"]["AMOUNT"][0], "226.10");
    assert_eq!(objects["voucher"]["supplierName"], "ACME GmbH");
    assert_eq!(objects["accountDatevs"][0]["accountNumber"], 6815);
}

// --- saveVoucher ---

#[tokio::test]
async fn save_voucher_echoes_sums_and_positions() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(json_request(
            "/Voucher/Factory/saveVoucher",
            r#"{
                "filename": "abc123.pdf",
                "voucher": {
                    "objectName": "Voucher",
                    "mapAll": true,
                    "voucherDate": "01.05.2024",
                    "supplierName": "ACME GmbH",
                    "status": 100,
                    "taxRule": {"id": 9, "objectName": "TaxRule"},
                    "creditDebit": "C",
                    "voucherType": "VOU",
                    "sumNet": 190.0,
                    "sumGross": 226.1
                },
                "voucherPosSave": [{
                    "objectName": "VoucherPos",
                    "mapAll": true,
                    "accountDatev": {"id": 1420, "objectName": "AccountDatev"},
                    "taxRate": 19.0,
                    "net": 190.0,
                    "sumNet": 190.0,
                    "sumGross": 226.1
                }]
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let objects = &json["objects"];
    assert_eq!(objects["voucher"]["supplierName"], "ACME GmbH");
    assert_eq!(objects["voucher"]["sumNet"], "190.00");
    assert_eq!(objects["voucher"]["sumGross"], "226.10");
    assert_eq!(objects["voucher"]["taxRule"]["id"], 9);
    assert_eq!(objects["voucherPos"].as_array().unwrap().len(), 1);
    assert_eq!(objects["voucherPos"][0]["sumGross"], "226.10");
    assert_eq!(objects["document"]["filename"], "abc123.pdf");
    assert_eq!(objects["vatdrop"], "0");
}

#[tokio::test]
async fn save_voucher_echoes_legacy_tax_shape() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(json_request(
            "/Voucher/Factory/saveVoucher",
            r#"{
                "filename": "abc123.pdf",
                "voucher": {
                    "objectName": "Voucher",
                    "mapAll": true,
                    "voucherDate": null,
                    "supplierName": "ACME GmbH",
                    "status": 50,
                    "taxType": "default",
                    "creditDebit": "D",
                    "voucherType": "VOU",
                    "sumNet": null,
                    "sumGross": null
                },
                "voucherPosSave": []
            }"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["objects"]["voucher"]["taxType"], "default");
    assert!(json["objects"]["voucher"].get("taxRule").is_none());
    assert_eq!(json["objects"]["voucherPos"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn save_voucher_requires_payload_keys() {
    let app = app(TOKEN);
    let resp = app
        .oneshot(json_request(
            "/Voucher/Factory/saveVoucher",
            r#"{"filename": "abc123.pdf"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- getDefaultTaxRule ---

#[tokio::test]
async fn default_tax_rule_requires_valid_voucher_type() {
    let resp = app(TOKEN)
        .oneshot(get_request(
            "/Voucher/Factory/getDefaultTaxRule?voucherType=X",
            Some(TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app(TOKEN)
        .oneshot(get_request("/Voucher/Factory/getDefaultTaxRule", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn default_tax_rule_differs_per_side() {
    let resp = app(TOKEN)
        .oneshot(get_request(
            "/Voucher/Factory/getDefaultTaxRule?voucherType=C",
            Some(TOKEN),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let credit = body_json(resp).await;
    assert_eq!(credit["objects"]["id"], 9);

    let resp = app(TOKEN)
        .oneshot(get_request(
            "/Voucher/Factory/getDefaultTaxRule?voucherType=D",
            Some(TOKEN),
        ))
        .await
        .unwrap();
    let debit = body_json(resp).await;
    assert_eq!(debit["objects"]["id"], 1);
}

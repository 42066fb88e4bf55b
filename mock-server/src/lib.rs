//! In-process double of the sevdesk voucher API for tests.
//!
//! Serves the five routes the client speaks, wraps every payload in the
//! `{ "objects": ... }` envelope, and enforces the configured token the way
//! the real host does: any request without a matching `Authorization` header
//! is answered with `401` and the body `invalid token`. Uploaded files are
//! staged in shared state so the createFromPdf route can check references.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A staged upload awaiting a createFromPdf reference.
#[derive(Clone, Debug)]
pub struct StagedFile {
    pub origin_filename: String,
    pub content_hash: String,
    pub size: usize,
}

#[derive(Clone)]
pub struct AppState {
    token: String,
    files: Arc<RwLock<HashMap<String, StagedFile>>>,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: token.to_string(),
        files: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/Tools/bookkeepingSystemVersion", get(bookkeeping_system_version))
        .route("/Voucher/Factory/uploadTempFile", post(upload_temp_file))
        .route("/Voucher/Factory/createFromPdf", post(create_from_pdf))
        .route("/Voucher/Factory/saveVoucher", post(save_voucher))
        .route("/Voucher/Factory/getDefaultTaxRule", get(get_default_tax_rule))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let presented = headers.get("authorization").and_then(|v| v.to_str().ok());
    if presented == Some(state.token.as_str()) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid token".to_string()))
    }
}

async fn bookkeeping_system_version(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    Ok(Json(json!({"objects": {"version": "2.0"}})))
}

async fn upload_temp_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let origin_filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let content_hash = Uuid::new_v4().simple().to_string();
        let extension = origin_filename.rsplit_once('.').map(|(_, ext)| ext.to_string());
        let staged_filename = match &extension {
            Some(ext) => format!("{content_hash}.{ext}"),
            None => content_hash.clone(),
        };
        state.files.write().await.insert(
            staged_filename.clone(),
            StagedFile {
                origin_filename,
                content_hash: content_hash.clone(),
                size: bytes.len(),
            },
        );
        return Ok(Json(json!({
            "objects": {
                "pages": 1,
                "mimeType": "image/png",
                "originMimeType": mime_for(extension.as_deref()),
                "filename": staged_filename,
                "contentHash": content_hash,
                "content": []
            }
        })));
    }

    Err((StatusCode::BAD_REQUEST, "no file part".to_string()))
}

async fn create_from_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let mut filename = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        let text = field
            .text()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        if name.as_deref() == Some("filename") {
            filename = Some(text);
        }
    }
    let filename = filename
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "missing filename field".to_string()))?;

    if !state.files.read().await.contains_key(&filename) {
        return Err((StatusCode::NOT_FOUND, "unknown temporary file".to_string()));
    }

    let mut voucher = voucher_json(&filename, "ACME GmbH", 190.0, 36.10, 226.10);
    voucher["taxRule"] = json!({"id": "9", "objectName": "TaxRule"});
    Ok(Json(json!({
        "objects": {
            "voucher": voucher,
            "positions": [],
            "extractions": {
                "AMOUNT": ["226.10"],
                "BIC": ["GENODEF1ABC"],
                "CREDITORNAME": ["ACME GmbH"],
                "CURRENCY": ["EUR"],
                "INVOICENUMBER": ["RE-2024-001"],
                "NETAMOUNT": ["190.00"],
                "TAXRATE": ["19.0"],
                "INVOICEDATE": ["01.05.2024"]
            },
            "accountDatevs": [{
                "accountDatev": 484600,
                "accountNumber": 6815,
                "confidence": 0.87,
                "estimatedBy": "AI"
            }]
        }
    })))
}

/// Save-voucher request body. The voucher itself stays an untyped `Value`
/// because its tax shape differs between bookkeeping system generations.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveVoucherBody {
    filename: String,
    voucher: Value,
    voucher_pos_save: Vec<Value>,
}

async fn save_voucher(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SaveVoucherBody>,
) -> Result<Json<Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let filename = payload.filename.as_str();
    let spec = &payload.voucher;
    if !spec.is_object() {
        return Err((StatusCode::BAD_REQUEST, "voucher must be an object".to_string()));
    }

    let supplier_name = spec
        .get("supplierName")
        .and_then(Value::as_str)
        .unwrap_or("Unknown supplier");
    let sum_net = spec.get("sumNet").and_then(Value::as_f64).unwrap_or(0.0);
    let sum_gross = spec.get("sumGross").and_then(Value::as_f64).unwrap_or(sum_net);
    let sum_tax = sum_gross - sum_net;

    let mut voucher = voucher_json(filename, supplier_name, sum_net, sum_tax, sum_gross);
    // Echo whichever tax shape the payload used.
    if let Some(rule) = spec.get("taxRule") {
        voucher["taxRule"] = rule.clone();
    } else if let Some(tax_type) = spec.get("taxType") {
        voucher["taxType"] = tax_type.clone();
        if let Some(tax_set) = spec.get("taxSet") {
            voucher["taxSet"] = tax_set.clone();
        }
    }

    let voucher_pos: Vec<Value> = payload
        .voucher_pos_save
        .iter()
        .enumerate()
        .map(|(index, pos)| {
            let tax_rate = pos.get("taxRate").and_then(Value::as_f64).unwrap_or(0.0);
            let net = pos.get("sumNet").and_then(Value::as_f64).unwrap_or(0.0);
            let gross = pos.get("sumGross").and_then(Value::as_f64).unwrap_or(net);
            voucher_pos_json(61820 + index as u64, tax_rate, net, gross - net, gross)
        })
        .collect();

    Ok(Json(json!({
        "objects": {
            "voucher": voucher,
            "voucherPos": voucher_pos,
            "document": document_json(filename),
            "vatdrop": "0"
        }
    })))
}

async fn get_default_tax_rule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let rule = match params.get("voucherType").map(String::as_str) {
        Some("C") => json!({
            "id": 9,
            "name": "Vorsteuerabziehbare Aufwendungen",
            "taxRates": ["0.0", "7.0", "19.0"]
        }),
        Some("D") => json!({
            "id": 1,
            "name": "Umsatzsteuerpflichtige Umsätze",
            "taxRates": ["0.0", "7.0", "19.0"]
        }),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "voucherType must be C or D".to_string(),
            ))
        }
    };
    Ok(Json(json!({"objects": rule})))
}

fn mime_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn document_json(filename: &str) -> Value {
    json!({
        "id": "73310",
        "objectName": "Document",
        "create": "2024-05-02T10:15:00+02:00",
        "update": "2024-05-02T10:15:00+02:00",
        "filename": filename
    })
}

fn voucher_json(
    document_filename: &str,
    supplier_name: &str,
    sum_net: f64,
    sum_tax: f64,
    sum_gross: f64,
) -> Value {
    json!({
        "id": "14510",
        "objectName": "Voucher",
        "additionalInformation": null,
        "create": "2024-05-02T10:15:00+02:00",
        "update": "2024-05-02T10:15:00+02:00",
        "sevClient": {
            "id": "8810",
            "objectName": "SevClient",
            "create": "2020-01-07T09:00:00+01:00",
            "update": "2024-04-30T18:00:00+02:00",
            "name": "Musterfirma GmbH",
            "status": "1",
            "chartOfAccounts": "SKR04",
            "accountingSystem": {
                "id": "2",
                "objectName": "AccountingSystem",
                "create": null,
                "update": null,
                "name": "SKR04",
                "accountingChart": {"id": "2", "objectName": "AccountingChart"}
            }
        },
        "voucherDate": "2024-05-01T00:00:00+02:00",
        "supplierName": supplier_name,
        "description": "RE-2024-001",
        "document": document_json(document_filename),
        "payDate": null,
        "status": "100",
        "currency": "EUR",
        "sumNet": format!("{sum_net:.2}"),
        "sumTax": format!("{sum_tax:.2}"),
        "sumGross": format!("{sum_gross:.2}"),
        "sumNetAccounting": format!("{sum_net:.2}"),
        "sumTaxAccounting": format!("{sum_tax:.2}"),
        "sumGrossAccounting": format!("{sum_gross:.2}"),
        "showNet": "1",
        "paidAmount": 0.0,
        "creditDebit": "C",
        "hidden": "0",
        "voucherType": "VOU",
        "recurringIntervall": null,
        "recurringInterval": null,
        "recurringStartDate": null,
        "recurringNextVoucher": null,
        "recurringLastVoucher": null,
        "recurringEndDate": null,
        "enshrined": null,
        "sendType": null,
        "iban": null,
        "paymentDeadline": "2024-05-15T00:00:00+02:00",
        "tip": "0",
        "mileageRate": "0",
        "vatNumber": null,
        "deliveryDate": "2024-05-01T00:00:00+02:00",
        "deliveryDateUntil": null,
        "sumDiscountNet": "0",
        "sumDiscountGross": "0"
    })
}

fn voucher_pos_json(id: u64, tax_rate: f64, net: f64, tax: f64, gross: f64) -> Value {
    json!({
        "id": id.to_string(),
        "objectName": "VoucherPos",
        "create": "2024-05-02T10:15:00+02:00",
        "update": "2024-05-02T10:15:00+02:00",
        "taxRate": format!("{tax_rate}"),
        "sum": format!("{net:.2}"),
        "net": format!("{net:.2}"),
        "isAsset": "0",
        "assetMemoValue": null,
        "sumNet": format!("{net:.2}"),
        "sumTax": format!("{tax:.2}"),
        "sumGross": format!("{gross:.2}"),
        "sumNetAccounting": format!("{net:.2}"),
        "sumTaxAccounting": format!("{tax:.2}"),
        "sumGrossAccounting": format!("{gross:.2}"),
        "comment": null,
        "isGwg": 0,
        "isPercentage": "0",
        "discountedValue": "0",
        "sumNetForeignCurrency": 0.0,
        "sumTaxForeignCurrency": 0.0,
        "sumGrossForeignCurrency": 0.0,
        "sumDiscountForeignCurrency": 0.0,
        "createNextPart": false
    })
}

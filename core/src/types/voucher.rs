//! Domain DTOs for the voucher surface of the API.
//!
//! # Design
//! Response records mirror the remote schema and are only ever constructed by
//! deserialization; the client does not validate them. Two looseness rules
//! from the remote side are encoded in the field types: a field the server
//! sends as `X | null` is a required-key `Option`, a field the server may
//! omit entirely is a `#[serde(default)]` `Option`. Write payloads are a
//! separate, looser-typed family (`*Spec`) used only outbound.
//!
//! The bookkeeping system changed its tax schema between generations "1.0"
//! and "2.0" without versioning endpoints, so the write payloads carry
//! flattened tagged variants ([`VoucherTax`], [`PositionAccount`]) — one
//! variant per generation, mutually exclusive by construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::common::{Id, MixedNumber, NumericBoolean, ObjectName, ObjectReference};

/// Schema generation of the remote bookkeeping system. Gates which tax shape
/// write payloads must use: "1.0" expects `taxType`/`taxSet`, "2.0" expects
/// `taxRule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookkeepingSystemVersion {
    #[serde(rename = "1.0")]
    V1,
    #[serde(rename = "2.0")]
    V2,
}

/// Payload of the version route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: BookkeepingSystemVersion,
}

/// Credit or debit side of a voucher. Also the `voucherType` query parameter
/// of the default-tax-rule route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherCreditDebit {
    #[serde(rename = "C")]
    Credit,
    #[serde(rename = "D")]
    Debit,
}

impl VoucherCreditDebit {
    pub fn code(self) -> &'static str {
        match self {
            VoucherCreditDebit::Credit => "C",
            VoucherCreditDebit::Debit => "D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherType {
    #[serde(rename = "VOU")]
    Standard,
    #[serde(rename = "RV")]
    Recurring,
}

/// Voucher lifecycle status, numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum VoucherStatus {
    Draft,
    Unpaid,
    Transferred,
    PartiallyPaid,
    Paid,
}

impl From<VoucherStatus> for u16 {
    fn from(status: VoucherStatus) -> u16 {
        match status {
            VoucherStatus::Draft => 50,
            VoucherStatus::Unpaid => 100,
            VoucherStatus::Transferred => 150,
            VoucherStatus::PartiallyPaid => 750,
            VoucherStatus::Paid => 1000,
        }
    }
}

impl TryFrom<u16> for VoucherStatus {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            50 => Ok(VoucherStatus::Draft),
            100 => Ok(VoucherStatus::Unpaid),
            150 => Ok(VoucherStatus::Transferred),
            750 => Ok(VoucherStatus::PartiallyPaid),
            1000 => Ok(VoucherStatus::Paid),
            other => Err(format!("unknown voucher status code {other}")),
        }
    }
}

/// Recurrence period, ISO-8601-style duration strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurringInterval {
    #[serde(rename = "P0Y0M1W")]
    Weekly,
    #[serde(rename = "P0Y0M2W")]
    EveryOtherWeek,
    #[serde(rename = "P0Y1M")]
    Monthly,
    #[serde(rename = "P0Y2M")]
    EveryOtherMonth,
    #[serde(rename = "P0Y3M")]
    Quarterly,
    #[serde(rename = "P0Y6M")]
    SemiAnnual,
    #[serde(rename = "P1Y")]
    Yearly,
    #[serde(rename = "P2Y")]
    EveryOtherYear,
    #[serde(rename = "P3Y")]
    EveryThreeYears,
    #[serde(rename = "P4Y")]
    EveryFourYears,
    #[serde(rename = "P5Y")]
    EveryFiveYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherSendType {
    #[serde(rename = "VPR")]
    Printed,
    #[serde(rename = "VPDF")]
    Downloaded,
    #[serde(rename = "VM")]
    Mailed,
    #[serde(rename = "VP")]
    Postal,
}

/// Account metadata embedded in voucher responses. Trimmed to the fields the
/// voucher workflows read; unknown siblings are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SevClient {
    pub id: Id,
    pub object_name: ObjectName,
    pub create: String,
    pub update: String,
    pub name: String,
    pub status: String,
    pub chart_of_accounts: String,
    pub accounting_system: AccountingSystem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingSystem {
    pub id: Id,
    pub object_name: ObjectName,
    pub create: Option<String>,
    pub update: Option<String>,
    pub name: String,
    pub accounting_chart: ObjectReference,
}

/// Stored document record attached to a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Id,
    pub object_name: ObjectName,
    pub create: String,
    pub update: String,
    pub filename: String,
}

/// A bookkeeping record for an incoming or outgoing document. Monetary sums
/// arrive as numeric strings; `paidAmount` is the one genuine number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: Id,
    pub object_name: ObjectName,
    #[serde(default)]
    pub additional_information: Option<Value>,
    pub create: String,
    pub update: String,
    pub sev_client: SevClient,
    #[serde(default)]
    pub create_user: Option<ObjectReference>,
    pub voucher_date: String,
    pub supplier_name: String,
    #[serde(default)]
    pub supplier: Option<ObjectReference>,
    pub description: String,
    pub document: Document,
    #[serde(default)]
    pub result_disdar: Option<String>,
    pub pay_date: Option<String>,
    pub status: String,
    pub currency: String,
    pub sum_net: String,
    pub sum_tax: String,
    pub sum_gross: String,
    pub sum_net_accounting: String,
    pub sum_tax_accounting: String,
    pub sum_gross_accounting: String,
    pub show_net: String,
    pub paid_amount: f64,
    /// Bookkeeping system 1.0 only, replaced by `tax_rule`.
    #[serde(default)]
    pub tax_type: Option<String>,
    /// Bookkeeping system 1.0 only, replaced by `tax_rule`.
    #[serde(default)]
    pub tax_set: Option<ObjectReference>,
    /// Bookkeeping system 2.0 only, replaces `tax_type`/`tax_set`.
    #[serde(default)]
    pub tax_rule: Option<ObjectReference>,
    pub credit_debit: VoucherCreditDebit,
    pub hidden: String,
    pub voucher_type: VoucherType,
    /// The API's own spelling; `recurring_interval` is the corrected field.
    pub recurring_intervall: Option<RecurringInterval>,
    pub recurring_interval: Option<RecurringInterval>,
    pub recurring_start_date: Option<String>,
    pub recurring_next_voucher: Option<String>,
    pub recurring_last_voucher: Option<String>,
    pub recurring_end_date: Option<String>,
    pub enshrined: Option<String>,
    pub send_type: Option<VoucherSendType>,
    pub iban: Option<String>,
    pub payment_deadline: String,
    pub tip: String,
    pub mileage_rate: String,
    pub vat_number: Option<String>,
    pub delivery_date: String,
    pub delivery_date_until: Option<String>,
    pub sum_discount_net: String,
    pub sum_discount_gross: String,
    #[serde(default)]
    pub sum_net_foreign_currency: Option<String>,
    #[serde(default)]
    pub sum_tax_foreign_currency: Option<String>,
    #[serde(default)]
    pub sum_gross_foreign_currency: Option<String>,
    #[serde(default)]
    pub sum_discount_net_foreign_currency: Option<String>,
    #[serde(default)]
    pub sum_discount_gross_foreign_currency: Option<String>,
}

/// A line item within a voucher carrying its own net/tax/gross breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherPosition {
    pub id: Id,
    pub object_name: ObjectName,
    #[serde(default)]
    pub additional_information: Option<Value>,
    pub create: Option<String>,
    pub update: Option<String>,
    #[serde(default)]
    pub sev_client: Option<ObjectReference>,
    #[serde(default)]
    pub voucher: Option<Box<Voucher>>,
    pub tax_rate: MixedNumber,
    pub sum: MixedNumber,
    pub net: Option<MixedNumber>,
    pub is_asset: NumericBoolean,
    pub asset_memo_value: Option<String>,
    pub sum_net: MixedNumber,
    pub sum_tax: MixedNumber,
    pub sum_gross: MixedNumber,
    pub sum_net_accounting: MixedNumber,
    pub sum_tax_accounting: MixedNumber,
    pub sum_gross_accounting: MixedNumber,
    pub comment: Option<String>,
    pub is_gwg: i64,
    pub is_percentage: NumericBoolean,
    pub discounted_value: NumericBoolean,
    pub sum_net_foreign_currency: f64,
    pub sum_tax_foreign_currency: f64,
    pub sum_gross_foreign_currency: f64,
    pub sum_discount_foreign_currency: f64,
    pub create_next_part: bool,
}

/// Server-side staged upload. The API communicates no expiry for the staged
/// content; reference it promptly in a follow-up call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryVoucherFile {
    pub pages: u32,
    pub mime_type: String,
    pub origin_mime_type: String,
    pub filename: String,
    pub content_hash: String,
    pub content: Vec<String>,
}

/// OCR-style candidate matches per field. Candidates, not validated facts —
/// selection and confirmation happen on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extractions {
    #[serde(rename = "AMOUNT")]
    pub amount: Vec<String>,
    #[serde(rename = "BIC")]
    pub bic: Vec<String>,
    #[serde(rename = "CREDITORNAME")]
    pub creditor_name: Vec<String>,
    #[serde(rename = "CURRENCY")]
    pub currency: Vec<String>,
    #[serde(rename = "INVOICENUMBER")]
    pub invoice_number: Vec<String>,
    #[serde(rename = "NETAMOUNT")]
    pub net_amount: Vec<String>,
    #[serde(rename = "TAXRATE")]
    pub tax_rate: Vec<String>,
    #[serde(rename = "INVOICEDATE")]
    pub invoice_date: Vec<String>,
}

/// Heuristic account-code suggestion with a confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDatev {
    pub account_datev: i64,
    pub account_number: i64,
    pub confidence: f64,
    pub estimated_by: String,
}

/// Result of the PDF extraction route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedVoucherInformation {
    pub voucher: Voucher,
    pub positions: Vec<VoucherPosition>,
    pub extractions: Extractions,
    pub account_datevs: Vec<AccountDatev>,
}

/// Enumerated tax rule (bookkeeping system 2.0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherTaxRule {
    pub id: u64,
    pub name: String,
    pub tax_rates: Vec<String>,
}

/// Result of the save-voucher route: the materialized voucher, its
/// positions, and the attached document record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedVoucher {
    pub voucher: Voucher,
    pub voucher_pos: Vec<VoucherPosition>,
    pub document: Document,
    pub vatdrop: String,
}

/// Date fields in write payloads: unix seconds or `dd.mm.yyyy` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DateValue {
    Timestamp(i64),
    Text(String),
}

impl From<i64> for DateValue {
    fn from(value: i64) -> Self {
        DateValue::Timestamp(value)
    }
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::Text(value.to_string())
    }
}

/// Tax treatment of an outbound voucher, one variant per bookkeeping system
/// generation. Flattened into [`VoucherSpec`], so exactly one shape reaches
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VoucherTax {
    /// Bookkeeping system 2.0.
    #[serde(rename_all = "camelCase")]
    Rule { tax_rule: ObjectReference },
    /// Bookkeeping system 1.0.
    #[serde(rename_all = "camelCase")]
    Legacy {
        tax_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tax_set: Option<ObjectReference>,
    },
}

impl VoucherTax {
    pub fn rule(id: impl Into<Id>) -> Self {
        VoucherTax::Rule {
            tax_rule: ObjectReference::new(id, ObjectName::TaxRule),
        }
    }

    pub fn legacy(tax_type: impl Into<String>, tax_set: Option<ObjectReference>) -> Self {
        VoucherTax::Legacy {
            tax_type: tax_type.into(),
            tax_set,
        }
    }
}

/// Booking account of an outbound position, one variant per bookkeeping
/// system generation. Flattened into [`VoucherPosSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PositionAccount {
    /// Bookkeeping system 2.0.
    #[serde(rename_all = "camelCase")]
    Datev { account_datev: ObjectReference },
    /// Bookkeeping system 1.0.
    #[serde(rename_all = "camelCase")]
    Type { accounting_type: ObjectReference },
}

impl PositionAccount {
    pub fn datev(id: impl Into<Id>) -> Self {
        PositionAccount::Datev {
            account_datev: ObjectReference::new(id, ObjectName::AccountDatev),
        }
    }

    pub fn accounting_type(id: impl Into<Id>) -> Self {
        PositionAccount::Type {
            accounting_type: ObjectReference::new(id, ObjectName::AccountingType),
        }
    }
}

/// Outbound voucher header for the save-voucher route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherSpec {
    pub object_name: ObjectName,
    pub map_all: bool,
    pub voucher_date: Option<DateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<ObjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_date: Option<String>,
    pub status: VoucherStatus,
    #[serde(flatten)]
    pub tax: VoucherTax,
    pub credit_debit: VoucherCreditDebit,
    pub voucher_type: VoucherType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub sum_net: Option<f64>,
    pub sum_gross: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_net_accounting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_tax_accounting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_gross_accounting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_net: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_deadline: Option<DateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date_until: Option<DateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<ObjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_centre: Option<ObjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

impl VoucherSpec {
    /// A minimal spec with every optional field unset; callers fill in what
    /// the voucher needs. `mapAll` is always sent as `true`.
    pub fn new(
        status: VoucherStatus,
        credit_debit: VoucherCreditDebit,
        voucher_type: VoucherType,
        tax: VoucherTax,
    ) -> Self {
        Self {
            object_name: ObjectName::Voucher,
            map_all: true,
            voucher_date: None,
            supplier: None,
            supplier_name: None,
            description: None,
            pay_date: None,
            status,
            tax,
            credit_debit,
            voucher_type,
            currency: None,
            sum_net: None,
            sum_gross: None,
            sum_tax: None,
            sum_net_accounting: None,
            sum_tax_accounting: None,
            sum_gross_accounting: None,
            show_net: None,
            payment_deadline: None,
            delivery_date: None,
            delivery_date_until: None,
            document: None,
            cost_centre: None,
            vat_number: None,
        }
    }
}

/// Outbound line item for the save-voucher route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherPosSpec {
    pub object_name: ObjectName,
    pub map_all: bool,
    #[serde(flatten)]
    pub account: PositionAccount,
    pub tax_rate: f64,
    pub net: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_asset: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_memo_value: Option<f64>,
    pub sum_net: Option<f64>,
    pub sum_gross: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl VoucherPosSpec {
    pub fn new(account: PositionAccount, tax_rate: f64) -> Self {
        Self {
            object_name: ObjectName::VoucherPos,
            map_all: true,
            account,
            tax_rate,
            net: None,
            is_asset: None,
            asset_memo_value: None,
            sum_net: None,
            sum_gross: None,
            sum: None,
            sum_tax: None,
            comment: None,
        }
    }
}

/// Request body of the save-voucher route: a staged filename, the voucher
/// header, and its line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVoucherPayload {
    pub filename: String,
    pub voucher: VoucherSpec,
    pub voucher_pos_save: Vec<VoucherPosSpec>,
}

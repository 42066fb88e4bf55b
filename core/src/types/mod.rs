//! Wire types mirroring the remote schema.

pub mod common;
pub mod voucher;

pub use common::{Id, MixedNumber, NumericBoolean, ObjectName, ObjectReference};
pub use voucher::{
    AccountDatev, AccountingSystem, BookkeepingSystemVersion, DateValue, Document,
    ExtractedVoucherInformation, Extractions, PositionAccount, RecurringInterval,
    SaveVoucherPayload, SavedVoucher, SevClient, TemporaryVoucherFile, VersionInfo, Voucher,
    VoucherCreditDebit, VoucherPosSpec, VoucherPosition, VoucherSendType, VoucherSpec,
    VoucherStatus, VoucherTax, VoucherTaxRule, VoucherType,
};

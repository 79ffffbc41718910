use near_sdk::near;
use near_sdk::serde::de::{DeserializeOwned, Error as _};
use near_sdk::serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::logger::LogLevel;

/// Applicant contact details embedded in a loan application
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "near_sdk::serde", default)]
pub struct PersonalInfo {
    pub firstname: String,
    pub lastname: String,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    pub email: String,
    pub mobile: String,
}

/// Monthly figures declared by the applicant
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "near_sdk::serde", rename_all = "camelCase", default)]
pub struct FinancialInfo {
    pub monthly_salary: i64,
    pub monthly_rent: i64,
    pub other_expenditure: i64,
    pub monthly_loan_payment: i64,
}

/// Loan application record, persisted as one JSON object per ledger key.
///
/// Missing and `null` fields decode to their zero value, and keys match field
/// names ignoring ASCII case (the last match wins). Top-level fields this
/// model does not name are collected into `extra` and written back on encode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(crate = "near_sdk::serde", rename_all = "camelCase", default)]
pub struct LoanApplication {
    pub id: String,
    pub property_id: String,
    pub land_id: String,
    pub permit_id: String,
    pub buyer_id: String,
    #[serde(rename = "appraiserApplicationId")]
    pub appraisal_application_id: String,
    pub sales_contract_id: String,
    pub personal_info: PersonalInfo,
    pub financial_info: FinancialInfo,
    pub status: String,
    pub requested_amount: i64,
    pub fair_market_value: i64,
    pub approved_amount: i64,
    pub reviewer_id: String,
    pub last_modified_date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const LOAN_FIELDS: &[&str] = &[
    "id",
    "propertyId",
    "landId",
    "permitId",
    "buyerId",
    "appraiserApplicationId",
    "salesContractId",
    "personalInfo",
    "financialInfo",
    "status",
    "requestedAmount",
    "fairMarketValue",
    "approvedAmount",
    "reviewerId",
    "lastModifiedDate",
];
const PERSONAL_INFO_FIELDS: &[&str] = &["firstname", "lastname", "DOB", "email", "mobile"];
const FINANCIAL_INFO_FIELDS: &[&str] = &[
    "monthlySalary",
    "monthlyRent",
    "otherExpenditure",
    "monthlyLoanPayment",
];

impl LoanApplication {
    /// Decode a stored record; any field of the wrong type is an error.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        serde_json::from_value(normalize_record(value))
    }

    /// Decode a stored record, leaving fields of the wrong type at their zero
    /// value instead of failing.
    ///
    /// Returns the record and the paths of the fields that were left empty.
    /// Fails only when the bytes are not a JSON object.
    pub fn from_slice_lenient(bytes: &[u8]) -> serde_json::Result<(Self, Vec<String>)> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(mut record) = normalize_record(value) else {
            return Err(serde_json::Error::custom(
                "loan application must be a JSON object",
            ));
        };

        let mut dropped = Vec::new();
        if let Some(Value::Object(personal_info)) = record.get_mut("personalInfo") {
            retain_decodable::<PersonalInfo>(personal_info, "personalInfo.", &mut dropped);
        }
        if let Some(Value::Object(financial_info)) = record.get_mut("financialInfo") {
            retain_decodable::<FinancialInfo>(financial_info, "financialInfo.", &mut dropped);
        }
        retain_decodable::<LoanApplication>(&mut record, "", &mut dropped);

        let loan_application = serde_json::from_value(Value::Object(record))?;
        Ok((loan_application, dropped))
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Map keys onto the canonical field names and skip `null` field values
fn normalize_record(value: Value) -> Value {
    let Value::Object(object) = value else {
        return value;
    };

    let mut record = fold_fields(object, LOAN_FIELDS);
    if let Some(Value::Object(personal_info)) = record.get_mut("personalInfo") {
        *personal_info = fold_fields(std::mem::take(personal_info), PERSONAL_INFO_FIELDS);
    }
    if let Some(Value::Object(financial_info)) = record.get_mut("financialInfo") {
        *financial_info = fold_fields(std::mem::take(financial_info), FINANCIAL_INFO_FIELDS);
    }
    Value::Object(record)
}

fn fold_fields(object: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    let mut folded = Map::new();
    for (key, value) in object {
        match fields.iter().find(|field| field.eq_ignore_ascii_case(&key)) {
            // null leaves the field as it was
            Some(_) if value.is_null() => {}
            Some(field) => {
                folded.insert(field.to_string(), value);
            }
            None => {
                folded.insert(key, value);
            }
        }
    }
    folded
}

/// Drop every entry of `object` that `T` cannot decode on its own
fn retain_decodable<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    path: &str,
    dropped: &mut Vec<String>,
) {
    object.retain(|key, value| {
        let single = Map::from_iter([(key.clone(), value.clone())]);
        let decodable = serde_json::from_value::<T>(Value::Object(single)).is_ok();
        if !decodable {
            dropped.push(format!("{}{}", path, key));
        }
        decodable
    });
}

/// How a failed credential attribute read is treated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[near(serializers = [borsh, json])]
pub enum CredentialPolicy {
    /// The attribute reads as an empty string; the role check still applies
    Legacy,
    /// The read error is returned to the caller
    Strict,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::Legacy
    }
}

/// How an undecodable stored record is treated by the status update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[near(serializers = [borsh, json])]
pub enum DecodePolicy {
    /// Log the decode error and continue with a zero-valued record
    Legacy,
    /// Fail with `NotFound` or `Decode` before anything is written
    Strict,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        Self::Legacy
    }
}

/// Runtime settings, supplied at init and replaced by the owner via `set_config`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[near(serializers = [borsh, json])]
pub struct ChaincodeConfig {
    pub credential_policy: CredentialPolicy,
    pub decode_policy: DecodePolicy,
    /// Route `UpdateLoanApplication` through `invoke` (behind the admin role check)
    pub update_via_invoke: bool,
    pub log_level: LogLevel,
}

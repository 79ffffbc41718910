use near_sdk::log;
use near_sdk::serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{ChaincodeError, Result};
use crate::ledger::ChaincodeStub;

/// Channel every loan application notification is broadcast on
pub const EVENT_CHANNEL: &str = "evtSender";

pub const EVENT_STANDARD: &str = "loan-ledger";
pub const EVENT_STANDARD_VERSION: &str = "1.0.0";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "near_sdk::serde", rename_all = "camelCase")]
pub enum LoanEventType {
    LoanApplicationCreation,
    LoanApplicationUpdate,
}

/// Notification payload: `{"eventType": ..., "description": ...}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "near_sdk::serde", rename_all = "camelCase")]
pub struct LoanEvent {
    pub event_type: LoanEventType,
    pub description: String,
}

impl LoanEvent {
    pub fn created(loan_application_id: &str) -> Self {
        Self {
            event_type: LoanEventType::LoanApplicationCreation,
            description: format!("{} Successfully created", loan_application_id),
        }
    }

    pub fn status_updated(loan_application_id: &str) -> Self {
        Self {
            event_type: LoanEventType::LoanApplicationUpdate,
            description: format!("{} Successfully updated status", loan_application_id),
        }
    }

    pub fn to_payload(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|err| ChaincodeError::Event {
            channel: EVENT_CHANNEL.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Encode `event` and hand it to the host for broadcast
pub fn emit<S: ChaincodeStub + ?Sized>(stub: &mut S, event: &LoanEvent) -> Result<()> {
    let payload = event.to_payload()?;
    stub.set_event(EVENT_CHANNEL, &payload)
}

/// Write a NEP-297 event line to the NEAR log
pub(crate) fn log_event(event: &str, data: Value) {
    let event = json!({
        "standard": EVENT_STANDARD,
        "version": EVENT_STANDARD_VERSION,
        "event": event,
        "data": [data]
    });

    log!("EVENT_JSON:{}", event.to_string());
}

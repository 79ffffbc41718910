//! Loan application transitions: read, create, status update.
//!
//! Each handler takes its arguments as the ordered string list the host
//! passes in, talks to the ledger only through `ChaincodeStub`, and logs
//! through the injected `Logger`.

use crate::errors::{ChaincodeError, Result};
use crate::events::{self, LoanEvent};
use crate::ledger::ChaincodeStub;
use crate::logger::Logger;
use crate::types::{DecodePolicy, LoanApplication};

/// Fetch the stored bytes for `args[0]` unmodified.
///
/// An absent key yields empty bytes, not an error.
pub fn get_loan_application<S: ChaincodeStub + ?Sized>(
    stub: &S,
    logger: &Logger,
    args: &[String],
) -> Result<Vec<u8>> {
    logger.debug("Entering GetLoanApplication");

    let Some(loan_application_id) = args.first() else {
        logger.error("Invalid number of arguments");
        return Err(ChaincodeError::InvalidArguments(
            "Missing loan application ID".to_string(),
        ));
    };

    stub.get_state(loan_application_id).map_err(|err| {
        logger.error(format!(
            "Could not fetch loan application with id {} from ledger: {}",
            loan_application_id, err
        ));
        err
    })
}

/// Store `args[1]` verbatim under `args[0]` and announce it.
///
/// The payload is not decoded; an existing record is overwritten. A failed
/// event is reported even though the write already happened.
pub fn create_loan_application<S: ChaincodeStub + ?Sized>(
    stub: &mut S,
    logger: &Logger,
    args: &[String],
) -> Result<()> {
    logger.debug("Entering CreateLoanApplication");

    let [loan_application_id, loan_application_input, ..] = args else {
        logger.error("Invalid number of args");
        return Err(ChaincodeError::InvalidArguments(
            "Expected at least two arguments for loan application creation".to_string(),
        ));
    };

    stub.put_state(loan_application_id, loan_application_input.as_bytes())
        .map_err(|err| {
            logger.error(format!("Could not save loan application to ledger: {}", err));
            err
        })?;

    events::emit(stub, &LoanEvent::created(loan_application_id)).map_err(|err| {
        logger.error(format!(
            "Loan application {} saved but creation event failed: {}",
            loan_application_id, err
        ));
        err
    })?;

    logger.info("Successfully saved loan application");
    Ok(())
}

/// Replace only the status of the record at `args[0]` with `args[1]`.
///
/// The record is decoded, its status overwritten, and the whole record
/// re-encoded in place. Decode failures follow `policy`.
pub fn update_loan_application<S: ChaincodeStub + ?Sized>(
    stub: &mut S,
    logger: &Logger,
    policy: DecodePolicy,
    args: &[String],
) -> Result<()> {
    logger.debug("Entering UpdateLoanApplication");

    let [loan_application_id, status, ..] = args else {
        logger.error("Invalid number of args");
        return Err(ChaincodeError::InvalidArguments(
            "Expected at least two arguments for loan application update".to_string(),
        ));
    };

    let stored = stub.get_state(loan_application_id).map_err(|err| {
        logger.error(format!("Could not fetch loan application from ledger: {}", err));
        err
    })?;

    let mut loan_application = decode_stored(loan_application_id, &stored, policy, logger)?;
    if !loan_application.id.is_empty() && loan_application.id != *loan_application_id {
        logger.warning(format!(
            "Loan application stored under {} carries id {}",
            loan_application_id, loan_application.id
        ));
    }
    loan_application.status = status.clone();

    let updated = loan_application.to_vec().map_err(|err| {
        logger.error(format!("Could not marshal loan application post update: {}", err));
        ChaincodeError::Encode {
            key: loan_application_id.clone(),
            reason: err.to_string(),
        }
    })?;

    stub.put_state(loan_application_id, &updated).map_err(|err| {
        logger.error(format!("Could not save loan application post update: {}", err));
        err
    })?;

    events::emit(stub, &LoanEvent::status_updated(loan_application_id)).map_err(|err| {
        logger.error(format!(
            "Loan application {} updated but update event failed: {}",
            loan_application_id, err
        ));
        err
    })?;

    logger.info("Successfully updated loan application");
    Ok(())
}

fn decode_stored(
    loan_application_id: &str,
    stored: &[u8],
    policy: DecodePolicy,
    logger: &Logger,
) -> Result<LoanApplication> {
    match policy {
        DecodePolicy::Strict => {
            if stored.is_empty() {
                logger.error(format!("Loan application {} not found", loan_application_id));
                return Err(ChaincodeError::NotFound(loan_application_id.to_string()));
            }
            LoanApplication::from_slice(stored).map_err(|err| {
                logger.error(format!(
                    "Could not unmarshal loan application {}: {}",
                    loan_application_id, err
                ));
                ChaincodeError::Decode {
                    key: loan_application_id.to_string(),
                    reason: err.to_string(),
                }
            })
        }
        DecodePolicy::Legacy => match LoanApplication::from_slice_lenient(stored) {
            Ok((loan_application, dropped)) => {
                if !dropped.is_empty() {
                    logger.error(format!(
                        "Could not unmarshal {} of loan application {}, leaving them empty",
                        dropped.join(", "),
                        loan_application_id
                    ));
                }
                Ok(loan_application)
            }
            Err(err) => {
                logger.error(format!(
                    "Could not unmarshal loan application {}, continuing with an empty record: {}",
                    loan_application_id, err
                ));
                Ok(LoanApplication::default())
            }
        },
    }
}

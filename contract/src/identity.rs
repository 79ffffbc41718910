//! Caller identity: credential attributes and the admin role gate.

use crate::errors::{ChaincodeError, Result};
use crate::ledger::ChaincodeStub;
use crate::logger::Logger;
use crate::types::CredentialPolicy;

pub const USERNAME_ATTRIBUTE: &str = "username";
pub const ROLE_ATTRIBUTE: &str = "role";

/// The only role allowed to create loan applications
pub const ADMIN_ROLE: &str = "Bank_Home_Loan_Admin";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
    pub role: String,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Read one credential attribute of the invoking identity as a string
pub fn get_cert_attribute<S: ChaincodeStub + ?Sized>(
    stub: &S,
    logger: &Logger,
    attribute: &str,
) -> Result<String> {
    logger.debug(format!("Reading certificate attribute {}", attribute));

    let value = stub.read_cert_attribute(attribute).map_err(|err| match err {
        credential @ ChaincodeError::Credential { .. } => credential,
        other => ChaincodeError::Credential {
            attribute: attribute.to_string(),
            reason: other.to_string(),
        },
    })?;
    Ok(String::from_utf8_lossy(&value).into_owned())
}

/// Read an attribute, applying `policy` to read failures
pub fn resolve_attribute<S: ChaincodeStub + ?Sized>(
    stub: &S,
    logger: &Logger,
    attribute: &str,
    policy: CredentialPolicy,
) -> Result<String> {
    match get_cert_attribute(stub, logger, attribute) {
        Ok(value) => Ok(value),
        Err(err) => match policy {
            CredentialPolicy::Strict => {
                logger.error(err.to_string());
                Err(err)
            }
            CredentialPolicy::Legacy => {
                logger.warning(format!("{}; treating {} as empty", err, attribute));
                Ok(String::new())
            }
        },
    }
}

pub fn read_caller<S: ChaincodeStub + ?Sized>(
    stub: &S,
    logger: &Logger,
    policy: CredentialPolicy,
) -> Result<Caller> {
    let username = resolve_attribute(stub, logger, USERNAME_ATTRIBUTE, policy)?;
    let role = resolve_attribute(stub, logger, ROLE_ATTRIBUTE, policy)?;
    Ok(Caller { username, role })
}

/// Require the admin role for `action`
pub fn authorize(caller: &Caller, logger: &Logger, action: &'static str) -> Result<()> {
    if caller.is_admin() {
        return Ok(());
    }

    let err = ChaincodeError::AccessDenied {
        username: caller.username.clone(),
        role: caller.role.clone(),
        action,
    };
    logger.error(err.to_string());
    Err(err)
}

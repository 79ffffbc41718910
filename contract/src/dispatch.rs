//! Maps the host entry points (init, query, invoke) onto the loan handlers.

use std::fmt;

use crate::errors::Result;
use crate::identity;
use crate::ledger::ChaincodeStub;
use crate::loans;
use crate::logger::Logger;
use crate::types::ChaincodeConfig;

/// The closed set of operations callers can name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    GetLoanApplication,
    CreateLoanApplication,
    UpdateLoanApplication,
}

impl Operation {
    pub fn parse(function: &str) -> Option<Self> {
        match function {
            "GetLoanApplication" => Some(Self::GetLoanApplication),
            "CreateLoanApplication" => Some(Self::CreateLoanApplication),
            "UpdateLoanApplication" => Some(Self::UpdateLoanApplication),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetLoanApplication => "GetLoanApplication",
            Self::CreateLoanApplication => "CreateLoanApplication",
            Self::UpdateLoanApplication => "UpdateLoanApplication",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deploy-time hook. Seeds nothing.
pub fn init(logger: &Logger, args: &[String]) {
    logger.debug(format!("Init called with {} argument(s)", args.len()));
}

/// Read-only entry point. Unknown functions return no data and no error.
pub fn query<S: ChaincodeStub + ?Sized>(
    stub: &S,
    logger: &Logger,
    function: &str,
    args: &[String],
) -> Result<Option<Vec<u8>>> {
    match Operation::parse(function) {
        Some(Operation::GetLoanApplication) => {
            loans::get_loan_application(stub, logger, args).map(Some)
        }
        _ => {
            logger.debug(format!("Query ignoring function {:?}", function));
            Ok(None)
        }
    }
}

/// State-changing entry point. Every routed operation requires the admin role.
///
/// `UpdateLoanApplication` is routed only when `config.update_via_invoke` is
/// set. Unknown functions return no data and no error.
pub fn invoke<S: ChaincodeStub + ?Sized>(
    stub: &mut S,
    logger: &Logger,
    config: &ChaincodeConfig,
    function: &str,
    args: &[String],
) -> Result<Option<Vec<u8>>> {
    match Operation::parse(function) {
        Some(Operation::CreateLoanApplication) => {
            let caller = identity::read_caller(&*stub, logger, config.credential_policy)?;
            identity::authorize(&caller, logger, "create a loan application")?;
            loans::create_loan_application(stub, logger, args)?;
            Ok(None)
        }
        Some(Operation::UpdateLoanApplication) if config.update_via_invoke => {
            let caller = identity::read_caller(&*stub, logger, config.credential_policy)?;
            identity::authorize(&caller, logger, "update a loan application")?;
            loans::update_loan_application(stub, logger, config.decode_policy, args)?;
            Ok(None)
        }
        _ => {
            logger.debug(format!("Invoke ignoring function {:?}", function));
            Ok(None)
        }
    }
}

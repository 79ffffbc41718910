use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::{env, log, near_bindgen, AccountId, BorshStorageKey, PanicOnDefault};

mod admin;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod identity;
pub mod ledger;
pub mod loans;
pub mod logger;
pub mod types;
mod views;

pub use errors::ChaincodeError;
pub use types::{ChaincodeConfig, CredentialPolicy, DecodePolicy, LoanApplication};

use ledger::NearStub;
use logger::Logger;

/// Name every handler log line is tagged with
pub const LOGGER_NAME: &str = "loan-ledger";

#[derive(BorshSerialize, BorshStorageKey)]
#[borsh(crate = "near_sdk::borsh")]
enum StorageKey {
    Roles,
}

#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
#[borsh(crate = "near_sdk::borsh")]
#[near_bindgen]
pub struct Contract {
    owner_id: AccountId,
    config: ChaincodeConfig,

    // Credential registry: account -> role attribute
    roles: LookupMap<AccountId, String>,
}

#[near_bindgen]
impl Contract {
    #[init]
    pub fn init(owner_id: Option<AccountId>, config: Option<ChaincodeConfig>) -> Self {
        let contract = Self {
            owner_id: owner_id.unwrap_or_else(env::predecessor_account_id),
            config: config.unwrap_or_default(),
            roles: LookupMap::new(StorageKey::Roles),
        };

        dispatch::init(&contract.logger(), &[]);
        log!("Loan ledger initialized, owner {}", contract.owner_id);
        contract
    }

    /// Read-only entry point. Returns the stored record for `GetLoanApplication`,
    /// `None` for an absent key or any other function.
    pub fn query(&self, function: String, args: Vec<String>) -> Option<String> {
        let stub = NearStub::new(&self.roles);
        match dispatch::query(&stub, &self.logger(), &function, &args) {
            Ok(output) => output
                .filter(|bytes| !bytes.is_empty())
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => env::panic_str(&err.to_string()),
        }
    }

    /// State-changing entry point for `CreateLoanApplication` (and
    /// `UpdateLoanApplication` when enabled in the config).
    pub fn invoke(&mut self, function: String, args: Vec<String>) {
        let logger = self.logger();
        let mut stub = NearStub::new(&self.roles);
        if let Err(err) = dispatch::invoke(&mut stub, &logger, &self.config, &function, &args) {
            env::panic_str(&err.to_string());
        }
    }
}

impl Contract {
    pub(crate) fn logger(&self) -> Logger {
        Logger::new(LOGGER_NAME, self.config.log_level)
    }
}

#[cfg(test)]
mod tests;

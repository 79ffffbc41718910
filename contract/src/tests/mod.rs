



#[cfg(test)]
use crate::*;
#[cfg(test)]
use crate::errors::{ChaincodeError, Result};
#[cfg(test)]
use crate::identity::{ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE};
#[cfg(test)]
use crate::ledger::ChaincodeStub;
#[cfg(test)]
use crate::logger::LogLevel;
#[cfg(test)]
use near_sdk::test_utils::{accounts, VMContextBuilder};
#[cfg(test)]
use near_sdk::testing_env;
#[cfg(test)]
use std::collections::{BTreeMap, HashMap};

#[cfg(test)]
pub fn get_context(predecessor: AccountId) -> VMContextBuilder {
    let mut builder = VMContextBuilder::new();
    builder
        .current_account_id(accounts(0))
        .signer_account_id(predecessor.clone())
        .predecessor_account_id(predecessor);
    builder
}

#[cfg(test)]
pub fn as_caller(predecessor: AccountId) {
    testing_env!(get_context(predecessor).build());
}

#[cfg(test)]
pub fn setup_contract() -> Contract {
    as_caller(accounts(0));
    Contract::init(Some(accounts(0)), None)
}

#[cfg(test)]
pub fn test_logger() -> Logger {
    Logger::new("test", LogLevel::Debug)
}

#[cfg(test)]
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
pub const SAMPLE_LOAN: &str = r#"{"id":"L1","propertyId":"P-77","landId":"LD-3","permitId":"PM-9","buyerId":"B-12","appraiserApplicationId":"AP-5","salesContractId":"SC-1","personalInfo":{"firstname":"Ada","lastname":"Byron","DOB":"1815-12-10","email":"ada@example.com","mobile":"555-0100"},"financialInfo":{"monthlySalary":9000,"monthlyRent":1500,"otherExpenditure":400,"monthlyLoanPayment":0},"status":"SUBMITTED","requestedAmount":250000,"fairMarketValue":310000,"approvedAmount":0,"reviewerId":"","lastModifiedDate":"2024-03-01"}"#;

/// In-memory ledger with switchable failures
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStub {
    pub state: BTreeMap<String, Vec<u8>>,
    pub events: Vec<(String, Vec<u8>)>,
    pub attributes: HashMap<String, String>,
    pub writes: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_events: bool,
}

#[cfg(test)]
impl MemoryStub {
    pub fn with_caller(username: &str, role: &str) -> Self {
        let mut stub = Self::default();
        stub.attributes
            .insert(USERNAME_ATTRIBUTE.to_string(), username.to_string());
        stub.attributes
            .insert(ROLE_ATTRIBUTE.to_string(), role.to_string());
        stub
    }

    pub fn record(&self, key: &str) -> LoanApplication {
        LoanApplication::from_slice(&self.state[key]).expect("stored record should decode")
    }

    pub fn event_payload(&self, index: usize) -> serde_json::Value {
        serde_json::from_slice(&self.events[index].1).expect("event payload should be JSON")
    }
}

#[cfg(test)]
impl ChaincodeStub for MemoryStub {
    fn get_state(&self, key: &str) -> Result<Vec<u8>> {
        if self.fail_reads {
            return Err(ChaincodeError::Store("ledger unavailable".to_string()));
        }
        Ok(self.state.get(key).cloned().unwrap_or_default())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(ChaincodeError::Store("ledger is read-only".to_string()));
        }
        self.writes += 1;
        self.state.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn set_event(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        if self.fail_events {
            return Err(ChaincodeError::Event {
                channel: name.to_string(),
                reason: "event hub offline".to_string(),
            });
        }
        self.events.push((name.to_string(), payload.to_vec()));
        Ok(())
    }

    fn read_cert_attribute(&self, name: &str) -> Result<Vec<u8>> {
        self.attributes
            .get(name)
            .map(|value| value.clone().into_bytes())
            .ok_or_else(|| ChaincodeError::Credential {
                attribute: name.to_string(),
                reason: "attribute not present in certificate".to_string(),
            })
    }
}

#[cfg(test)]
mod basic_tests {
    use super::*;

    #[test]
    fn test_initialization() {
        let contract = setup_contract();

        assert_eq!(contract.get_owner(), accounts(0));
        assert_eq!(contract.get_config(), ChaincodeConfig::default());
        assert_eq!(contract.get_role(accounts(1)), None);
    }

    #[test]
    fn test_init_defaults_owner_to_predecessor() {
        as_caller(accounts(2));
        let contract = Contract::init(None, None);

        assert_eq!(contract.get_owner(), accounts(2));
    }

    #[test]
    fn test_default_config_is_legacy_compatible() {
        let config = ChaincodeConfig::default();

        assert_eq!(config.credential_policy, CredentialPolicy::Legacy);
        assert_eq!(config.decode_policy, DecodePolicy::Legacy);
        assert!(!config.update_via_invoke);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_logger_filters_below_level() {
        as_caller(accounts(0));
        let logger = Logger::new("quiet", LogLevel::Warning);

        logger.debug("hidden");
        logger.info("hidden");
        logger.warning("shown");
        logger.error("also shown");

        assert_eq!(
            near_sdk::test_utils::get_logs(),
            vec![
                "[quiet] WARNING shown".to_string(),
                "[quiet] ERROR also shown".to_string(),
            ]
        );
    }
}

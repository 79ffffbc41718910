//! Host primitives the handlers run against.
//!
//! `ChaincodeStub` is the narrow get/put/event/credential surface of the host
//! ledger. `NearStub` backs it with the NEAR runtime; tests back it with an
//! in-memory map.

use near_sdk::collections::LookupMap;
use near_sdk::{env, AccountId};

use crate::errors::{ChaincodeError, Result};
use crate::events;
use crate::identity::{ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE};

/// Records live under this prefix so they never collide with contract state
pub const RECORD_PREFIX: &str = "loan:";

pub trait ChaincodeStub {
    /// Raw bytes stored at `key`; empty when the key is absent.
    fn get_state(&self, key: &str) -> Result<Vec<u8>>;

    /// Replace the bytes at `key` in full.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Broadcast `payload` under the event channel `name`.
    fn set_event(&mut self, name: &str, payload: &[u8]) -> Result<()>;

    /// Named claim about the calling identity.
    fn read_cert_attribute(&self, name: &str) -> Result<Vec<u8>>;
}

pub struct NearStub<'a> {
    roles: &'a LookupMap<AccountId, String>,
}

impl<'a> NearStub<'a> {
    pub fn new(roles: &'a LookupMap<AccountId, String>) -> Self {
        Self { roles }
    }

    pub fn storage_key(key: &str) -> Vec<u8> {
        format!("{}{}", RECORD_PREFIX, key).into_bytes()
    }
}

impl ChaincodeStub for NearStub<'_> {
    fn get_state(&self, key: &str) -> Result<Vec<u8>> {
        Ok(env::storage_read(&Self::storage_key(key)).unwrap_or_default())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()> {
        env::storage_write(&Self::storage_key(key), value);
        Ok(())
    }

    fn set_event(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        let data: serde_json::Value =
            serde_json::from_slice(payload).map_err(|err| ChaincodeError::Event {
                channel: name.to_string(),
                reason: err.to_string(),
            })?;
        events::log_event(name, data);
        Ok(())
    }

    fn read_cert_attribute(&self, name: &str) -> Result<Vec<u8>> {
        let caller = env::predecessor_account_id();
        match name {
            USERNAME_ATTRIBUTE => Ok(caller.to_string().into_bytes()),
            ROLE_ATTRIBUTE => self
                .roles
                .get(&caller)
                .map(String::into_bytes)
                .ok_or_else(|| ChaincodeError::Credential {
                    attribute: name.to_string(),
                    reason: format!("no role registered for {}", caller),
                }),
            other => Err(ChaincodeError::Credential {
                attribute: other.to_string(),
                reason: "attribute is not issued by this host".to_string(),
            }),
        }
    }
}

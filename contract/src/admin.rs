use crate::*;

impl Contract {
    pub(crate) fn assert_owner(&self) {
        assert_eq!(
            env::predecessor_account_id(),
            self.owner_id,
            "Only owner can call this method"
        );
    }
}

#[near_bindgen]
impl Contract {
    /// Set new owner (only current owner can call)
    pub fn set_owner(&mut self, new_owner_id: AccountId) {
        self.assert_owner();
        let old_owner = self.owner_id.clone();
        self.owner_id = new_owner_id.clone();

        log!("Owner changed from {} to {}", old_owner, new_owner_id);
    }

    /// Register the role attribute presented by `account_id` (only owner can call)
    pub fn set_role(&mut self, account_id: AccountId, role: String) {
        self.assert_owner();
        self.roles.insert(&account_id, &role);

        log!("Role of {} set to {}", account_id, role);
    }

    /// Remove the role attribute of `account_id` (only owner can call)
    ///
    /// # Returns
    /// The role that was removed, if any
    pub fn revoke_role(&mut self, account_id: AccountId) -> Option<String> {
        self.assert_owner();
        let removed = self.roles.remove(&account_id);

        match &removed {
            Some(role) => log!("Role {} revoked from {}", role, account_id),
            None => log!("{} had no role to revoke", account_id),
        }
        removed
    }

    /// Replace the runtime configuration (only owner can call)
    pub fn set_config(&mut self, config: ChaincodeConfig) {
        self.assert_owner();
        self.config = config;

        log!(
            "Config updated: credential policy {:?}, decode policy {:?}, update via invoke {}, log level {}",
            self.config.credential_policy,
            self.config.decode_policy,
            self.config.update_via_invoke,
            self.config.log_level.as_str()
        );
    }
}

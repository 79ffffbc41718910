use crate::*;

#[near_bindgen]
impl Contract {
    /// Get contract owner
    pub fn get_owner(&self) -> AccountId {
        self.owner_id.clone()
    }

    /// Get the role attribute registered for an account
    pub fn get_role(&self, account_id: AccountId) -> Option<String> {
        self.roles.get(&account_id)
    }

    /// Get current runtime configuration
    pub fn get_config(&self) -> ChaincodeConfig {
        self.config.clone()
    }
}

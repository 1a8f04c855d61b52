use std::sync::Arc;

use crate::repository::{
    AccountRepository, CampaignRepository, ContactRepository, InMemoryAccountRepository,
    InMemoryCampaignRepository, InMemoryContactRepository, InMemoryUserRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub users: Arc<dyn UserRepository>,
    pub campaigns: Arc<dyn CampaignRepository>,
}

impl AppState {
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        accounts: Arc<dyn AccountRepository>,
        users: Arc<dyn UserRepository>,
        campaigns: Arc<dyn CampaignRepository>,
    ) -> Self {
        Self {
            contacts,
            accounts,
            users,
            campaigns,
        }
    }

    /// Fresh in-memory stores, also the per-test injection point.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryContactRepository::new()),
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCampaignRepository::new()),
        )
    }
}

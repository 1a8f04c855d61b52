//! Entity store capability traits and their in-memory implementations.
//!
//! Handlers only see the traits behind `Arc<dyn ...>`, so tests can inject
//! instrumented fakes (see `tests/http_crud.rs`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Account, Campaign, Contact, User},
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Full collection ordered by id descending.
    async fn all_by_id_desc(&self) -> AppResult<Vec<Contact>>;
    async fn find(&self, id: i64) -> AppResult<Option<Contact>>;
    /// Persists an unsaved contact, assigning the next id.
    async fn insert(&self, draft: Contact) -> AppResult<Contact>;
    /// Replaces the stored contact with the same id. `None` when absent.
    async fn update(&self, contact: Contact) -> AppResult<Option<Contact>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn all_by_name(&self) -> AppResult<Vec<Account>>;
    async fn find(&self, id: i64) -> AppResult<Option<Account>>;
    async fn insert(&self, draft: Account) -> AppResult<Account>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Candidate permission holders: everyone but the current actor.
    async fn all_except(&self, actor_id: Option<i64>) -> AppResult<Vec<User>>;
    async fn insert(&self, user: User) -> AppResult<User>;
}

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Campaign>>;
    async fn insert(&self, campaign: Campaign) -> AppResult<Campaign>;
}

#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    contacts: RwLock<HashMap<i64, Contact>>,
    next_id: AtomicI64,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn all_by_id_desc(&self) -> AppResult<Vec<Contact>> {
        let mut contacts = self
            .contacts
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        contacts.sort_by(|left, right| right.id.cmp(&left.id));
        Ok(contacts)
    }

    async fn find(&self, id: i64) -> AppResult<Option<Contact>> {
        Ok(self.contacts.read().await.get(&id).cloned())
    }

    async fn insert(&self, mut draft: Contact) -> AppResult<Contact> {
        let now = Utc::now();
        draft.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        draft.created_at = now;
        draft.updated_at = now;
        self.contacts.write().await.insert(draft.id, draft.clone());
        Ok(draft)
    }

    async fn update(&self, mut contact: Contact) -> AppResult<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        if !contacts.contains_key(&contact.id) {
            return Ok(None);
        }
        contact.updated_at = Utc::now();
        contacts.insert(contact.id, contact.clone());
        Ok(Some(contact))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.contacts.write().await.remove(&id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn all_by_name(&self) -> AppResult<Vec<Account>> {
        let mut accounts = self
            .accounts
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        accounts.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(accounts)
    }

    async fn find(&self, id: i64) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn insert(&self, mut draft: Account) -> AppResult<Account> {
        draft.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        draft.created_at = Utc::now();
        self.accounts.write().await.insert(draft.id, draft.clone());
        Ok(draft)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn all_except(&self, actor_id: Option<i64>) -> AppResult<Vec<User>> {
        let mut users = self
            .users
            .read()
            .await
            .values()
            .filter(|user| actor_id != Some(user.id))
            .cloned()
            .collect::<Vec<_>>();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        if user.id == 0 {
            user.id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        }
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCampaignRepository {
    campaigns: RwLock<HashMap<Uuid, Campaign>>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Campaign>> {
        Ok(self.campaigns.read().await.get(&uuid).cloned())
    }

    async fn insert(&self, campaign: Campaign) -> AppResult<Campaign> {
        self.campaigns
            .write()
            .await
            .insert(campaign.uuid, campaign.clone());
        Ok(campaign)
    }
}

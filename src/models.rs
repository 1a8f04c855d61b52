//! Domain entities and request/response payloads.
//!
//! Contact attribute payloads stay raw `serde_json` maps end to end: the
//! controller interprets the keys it knows, while the untouched map is what
//! gets forwarded downstream inside the link-bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use uuid::Uuid;

/// Raw attribute payload as received from the request body.
pub type Params = JsonMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub background_info: Option<String>,
    pub account_id: Option<i64>,
    pub permitted_user_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Builds an unsaved contact (`id` 0 until the store assigns one).
    pub fn from_params(params: &Params) -> Self {
        let now = Utc::now();
        let mut contact = Self {
            id: 0,
            first_name: String::new(),
            last_name: None,
            email: None,
            phone: None,
            title: None,
            background_info: None,
            account_id: None,
            permitted_user_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        contact.apply_attributes(params);
        contact
    }

    /// Applies known attribute keys from a raw params map. Unknown keys are
    /// ignored; the caller keeps the raw map for downstream contracts.
    pub fn apply_attributes(&mut self, params: &Params) {
        if let Some(first_name) = param_str(params, "first_name") {
            self.first_name = first_name;
        }
        if params.contains_key("last_name") {
            self.last_name = param_str(params, "last_name").filter(|s| !s.is_empty());
        }
        if params.contains_key("email") {
            self.email = param_str(params, "email").filter(|s| !s.is_empty());
        }
        if params.contains_key("phone") {
            self.phone = param_str(params, "phone").filter(|s| !s.is_empty());
        }
        if params.contains_key("title") {
            self.title = param_str(params, "title").filter(|s| !s.is_empty());
        }
        if params.contains_key("background_info") {
            self.background_info = param_str(params, "background_info").filter(|s| !s.is_empty());
        }
        self.updated_at = Utc::now();
    }

    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }

    /// Returns the validation messages that would block a save.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push("first name must not be blank".to_string());
        }

        if let Some(email) = self.email.as_deref()
            && !email.contains('@')
        {
            errors.push("email must contain @".to_string());
        }

        errors
    }
}

/// Outcome of a save or attribute-apply attempt. Mutation handlers branch on
/// the variant instead of a bare boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Contact),
    ValidationFailed {
        contact: Contact,
        errors: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn from_params(params: &Params) -> Self {
        Self {
            id: 0,
            name: param_str(params, "name").unwrap_or_default(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        if self.name.trim().is_empty() {
            vec!["account name must not be blank".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Campaign is only ever rendered here; identity is a uuid and the persisted
/// flag decides the edit-form target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub uuid: Uuid,
    pub name: String,
    pub persisted: bool,
}

impl Campaign {
    pub fn new_record(&self) -> bool {
        !self.persisted
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub contact: Params,
    pub account: Option<Params>,
    pub users: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub contact: Params,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

fn param_str(params: &Params, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(JsonValue::as_str)
        .map(|raw| raw.trim().to_string())
}

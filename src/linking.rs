//! Combined save-and-associate operation used by contact creation.
//!
//! The link-bundle mirrors the merged parameter hash handed to the
//! downstream save operation: `action`/`controller` metadata plus the raw
//! `contact` params, with `account` and `users` present only when supplied.

use serde::Serialize;

use crate::{
    error::AppResult,
    models::{Account, Contact, Params, SaveOutcome},
    repository::{AccountRepository, ContactRepository},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Params>,
    pub contact: Params,
    pub action: String,
    pub controller: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

impl LinkBundle {
    pub fn for_create(
        contact: Params,
        account: Option<Params>,
        users: Option<Vec<String>>,
    ) -> Self {
        Self {
            account,
            contact,
            action: "create".to_string(),
            controller: "contacts".to_string(),
            users,
        }
    }
}

/// Validates, links and persists a new contact with its paired account and
/// permission list.
///
/// Nothing touches the store until every validation passes, and the contact
/// insert is the final step; a stored contact therefore always carries its
/// account and permission links.
pub async fn save_with_account_and_permissions(
    contacts: &dyn ContactRepository,
    accounts: &dyn AccountRepository,
    mut contact: Contact,
    account: Option<Account>,
    bundle: &LinkBundle,
) -> AppResult<SaveOutcome> {
    let mut errors = contact.validate();

    if let Some(account) = &account {
        errors.extend(account.validate());
    }

    let permitted_user_ids = match parse_user_ids(bundle.users.as_deref()) {
        Ok(ids) => ids,
        Err(message) => {
            errors.push(message);
            Vec::new()
        }
    };

    if !errors.is_empty() {
        return Ok(SaveOutcome::ValidationFailed { contact, errors });
    }

    if let Some(account) = account {
        let saved_account = accounts.insert(account).await?;
        contact.account_id = Some(saved_account.id);
    }

    contact.permitted_user_ids = permitted_user_ids;
    let saved = contacts.insert(contact).await?;

    tracing::debug!(contact_id = saved.id, "contact saved with links");
    Ok(SaveOutcome::Saved(saved))
}

fn parse_user_ids(users: Option<&[String]>) -> Result<Vec<i64>, String> {
    let Some(users) = users else {
        return Ok(Vec::new());
    };

    users
        .iter()
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| format!("user id is not numeric: {raw}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryAccountRepository, InMemoryContactRepository};
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().expect("params must be an object").clone()
    }

    #[test]
    fn bundle_without_account_or_users_omits_those_keys() {
        let bundle = LinkBundle::for_create(params(json!({ "name": "Joe Spec" })), None, None);

        let serialized = serde_json::to_value(&bundle).expect("serialize");
        assert_eq!(
            serialized,
            json!({
                "contact": { "name": "Joe Spec" },
                "action": "create",
                "controller": "contacts"
            })
        );
    }

    #[test]
    fn bundle_with_account_and_users_carries_all_four_keys() {
        let bundle = LinkBundle::for_create(
            params(json!({ "first_name": "Joe" })),
            Some(params(json!({ "name": "Acme" }))),
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()]),
        );

        let serialized = serde_json::to_value(&bundle).expect("serialize");
        assert_eq!(
            serialized,
            json!({
                "account": { "name": "Acme" },
                "contact": { "first_name": "Joe" },
                "action": "create",
                "controller": "contacts",
                "users": ["1", "2", "3"]
            })
        );
    }

    #[tokio::test]
    async fn saved_contact_carries_account_and_permissions() {
        let contacts = InMemoryContactRepository::new();
        let accounts = InMemoryAccountRepository::new();

        let contact_params = params(json!({ "first_name": "Joe", "last_name": "Spec" }));
        let account_params = params(json!({ "name": "Acme" }));
        let bundle = LinkBundle::for_create(
            contact_params.clone(),
            Some(account_params.clone()),
            Some(vec!["1".to_string(), "2".to_string()]),
        );

        let outcome = save_with_account_and_permissions(
            &contacts,
            &accounts,
            Contact::from_params(&contact_params),
            Some(Account::from_params(&account_params)),
            &bundle,
        )
        .await
        .expect("save should not error");

        let SaveOutcome::Saved(saved) = outcome else {
            panic!("expected Saved outcome");
        };
        assert!(saved.id > 0);
        assert_eq!(saved.permitted_user_ids, vec![1, 2]);

        let account_id = saved.account_id.expect("account must be linked");
        let account = accounts
            .find(account_id)
            .await
            .expect("find")
            .expect("account stored");
        assert_eq!(account.name, "Acme");
    }

    #[tokio::test]
    async fn validation_failure_leaves_the_store_untouched() {
        let contacts = InMemoryContactRepository::new();
        let accounts = InMemoryAccountRepository::new();

        let contact_params = params(json!({ "first_name": "  " }));
        let account_params = params(json!({ "name": "" }));
        let bundle = LinkBundle::for_create(
            contact_params.clone(),
            Some(account_params.clone()),
            None,
        );

        let outcome = save_with_account_and_permissions(
            &contacts,
            &accounts,
            Contact::from_params(&contact_params),
            Some(Account::from_params(&account_params)),
            &bundle,
        )
        .await
        .expect("save should not error");

        let SaveOutcome::ValidationFailed { contact, errors } = outcome else {
            panic!("expected ValidationFailed outcome");
        };
        assert_eq!(contact.id, 0);
        assert_eq!(errors.len(), 2);

        assert!(contacts.all_by_id_desc().await.expect("list").is_empty());
        assert!(accounts.all_by_name().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn non_numeric_user_ids_fail_validation() {
        let contacts = InMemoryContactRepository::new();
        let accounts = InMemoryAccountRepository::new();

        let contact_params = params(json!({ "first_name": "Joe" }));
        let bundle = LinkBundle::for_create(
            contact_params.clone(),
            None,
            Some(vec!["1".to_string(), "abc".to_string()]),
        );

        let outcome = save_with_account_and_permissions(
            &contacts,
            &accounts,
            Contact::from_params(&contact_params),
            None,
            &bundle,
        )
        .await
        .expect("save should not error");

        assert!(matches!(outcome, SaveOutcome::ValidationFailed { .. }));
    }
}

//! HTML rendering for the contact pages and forms.
//!
//! Pages are plain string-built HTML; the form templates double as the
//! failure re-render target, so they take the unsaved entity plus its
//! validation messages.

use crate::models::{Account, Campaign, Contact, User};

pub fn contacts_index_page(contacts: &[Contact]) -> String {
    let mut rows = String::new();
    for contact in contacts {
        rows.push_str(&format!(
            "<tr><td><a href=\"/contacts/{id}\">{name}</a></td><td>{email}</td><td>{phone}</td></tr>\n",
            id = contact.id,
            name = escape_html(&contact.full_name()),
            email = escape_html(contact.email.as_deref().unwrap_or("")),
            phone = escape_html(contact.phone.as_deref().unwrap_or("")),
        ));
    }

    let body = format!(
        "<h1>Contacts</h1>\n\
         <p><a href=\"/contacts/new\">New contact</a></p>\n\
         <table>\n<thead><tr><th>Name</th><th>Email</th><th>Phone</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>"
    );
    layout("Contacts", &body)
}

pub fn contact_show_page(contact: &Contact) -> String {
    let account = contact
        .account_id
        .map(|id| format!("<dd>account #{id}</dd>"))
        .unwrap_or_else(|| "<dd>no account</dd>".to_string());

    let body = format!(
        "<h1>{name}</h1>\n<dl>\n\
         <dt>Email</dt><dd>{email}</dd>\n\
         <dt>Phone</dt><dd>{phone}</dd>\n\
         <dt>Title</dt><dd>{title}</dd>\n\
         <dt>Account</dt>{account}\n\
         </dl>\n\
         <p><a href=\"/contacts/{id}/edit\">Edit</a> | <a href=\"/contacts\">Back</a></p>",
        name = escape_html(&contact.full_name()),
        email = escape_html(contact.email.as_deref().unwrap_or("")),
        phone = escape_html(contact.phone.as_deref().unwrap_or("")),
        title = escape_html(contact.title.as_deref().unwrap_or("")),
        id = contact.id,
    );
    layout(&contact.full_name(), &body)
}

pub fn contact_new_page(
    contact: &Contact,
    errors: &[String],
    users: &[User],
    accounts: &[Account],
) -> String {
    let mut body = String::from("<h1>New contact</h1>\n");
    body.push_str(&error_list(errors));
    body.push_str("<form action=\"/contacts\" method=\"post\">\n");
    body.push_str(&contact_fields(contact));
    body.push_str(&account_select(accounts));
    body.push_str(&user_checkboxes(users, contact));
    body.push_str("<button type=\"submit\">Create contact</button>\n</form>");
    layout("New contact", &body)
}

pub fn contact_edit_page(contact: &Contact, errors: &[String]) -> String {
    let mut body = format!("<h1>Edit {}</h1>\n", escape_html(&contact.full_name()));
    body.push_str(&error_list(errors));
    body.push_str(&format!(
        "<form action=\"/contacts/{}\" method=\"post\">\n\
         <input type=\"hidden\" name=\"_method\" value=\"put\"/>\n",
        contact.id
    ));
    body.push_str(&contact_fields(contact));
    body.push_str("<button type=\"submit\">Update contact</button>\n</form>");
    layout("Edit contact", &body)
}

/// Edit form for a campaign. A persisted campaign posts to its canonical
/// resource path with a method-override field; an unsaved one posts to the
/// collection path.
pub fn campaign_edit_page(campaign: &Campaign) -> String {
    let (action, method_override) = if campaign.new_record() {
        ("/campaigns".to_string(), "")
    } else {
        (
            format!("/campaigns/{}", campaign.uuid),
            "<input type=\"hidden\" name=\"_method\" value=\"put\"/>\n",
        )
    };

    let body = format!(
        "<h1>Edit campaign</h1>\n\
         <form action=\"{action}\" method=\"post\">\n\
         {method_override}\
         <label>Name <input type=\"text\" name=\"campaign[name]\" value=\"{name}\"/></label>\n\
         <button type=\"submit\">Save campaign</button>\n</form>",
        name = escape_html(&campaign.name),
    );
    layout("Edit campaign", &body)
}

fn contact_fields(contact: &Contact) -> String {
    let mut fields = String::new();
    fields.push_str(&text_field(
        "contact[first_name]",
        "First name",
        &contact.first_name,
    ));
    fields.push_str(&text_field(
        "contact[last_name]",
        "Last name",
        contact.last_name.as_deref().unwrap_or(""),
    ));
    fields.push_str(&text_field(
        "contact[email]",
        "Email",
        contact.email.as_deref().unwrap_or(""),
    ));
    fields.push_str(&text_field(
        "contact[phone]",
        "Phone",
        contact.phone.as_deref().unwrap_or(""),
    ));
    fields.push_str(&text_field(
        "contact[title]",
        "Title",
        contact.title.as_deref().unwrap_or(""),
    ));
    fields
}

fn text_field(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label} <input type=\"text\" name=\"{name}\" value=\"{}\"/></label>\n",
        escape_html(value)
    )
}

fn account_select(accounts: &[Account]) -> String {
    let mut options = String::from("<option value=\"\">none</option>");
    for account in accounts {
        options.push_str(&format!(
            "<option value=\"{}\">{}</option>",
            account.id,
            escape_html(&account.name)
        ));
    }
    format!("<label>Account <select name=\"account[id]\">{options}</select></label>\n")
}

fn user_checkboxes(users: &[User], contact: &Contact) -> String {
    let mut boxes = String::from("<fieldset><legend>Permissions</legend>\n");
    for user in users {
        let checked = if contact.permitted_user_ids.contains(&user.id) {
            " checked"
        } else {
            ""
        };
        boxes.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"users[]\" value=\"{id}\"{checked}/> {name}</label>\n",
            id = user.id,
            name = escape_html(&user.username),
        ));
    }
    boxes.push_str("</fieldset>\n");
    boxes
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let mut list = String::from("<ul class=\"errors\">\n");
    for error in errors {
        list.push_str(&format!("<li>{}</li>\n", escape_html(error)));
    }
    list.push_str("</ul>\n");
    list
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"/><title>{}</title></head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

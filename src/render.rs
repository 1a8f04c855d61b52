//! Response-format strategy and XML serialization.
//!
//! The format is picked once per request from the Accept header; XML output
//! follows the dasherized ActiveRecord `to_xml` shape the original system's
//! clients expect.

use axum::http::{HeaderMap, header};

use crate::models::Contact;

pub const XML_CONTENT_TYPE: &str = "application/xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Xml,
}

impl ResponseFormat {
    /// Selects the serialization strategy for one request. Only an Accept
    /// header naming `application/xml` switches away from HTML.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let accepts_xml = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains(XML_CONTENT_TYPE));

        if accepts_xml { Self::Xml } else { Self::Html }
    }
}

pub fn contact_to_xml(contact: &Contact) -> String {
    let mut out = String::from(XML_DECLARATION);
    push_contact(&mut out, contact, 0);
    out
}

pub fn contacts_to_xml(contacts: &[Contact]) -> String {
    let mut out = String::from(XML_DECLARATION);
    out.push_str("<contacts type=\"array\">\n");
    for contact in contacts {
        push_contact(&mut out, contact, 1);
    }
    out.push_str("</contacts>\n");
    out
}

fn push_contact(out: &mut String, contact: &Contact, depth: usize) {
    let pad = "  ".repeat(depth);
    let inner = "  ".repeat(depth + 1);

    out.push_str(&format!("{pad}<contact>\n"));
    out.push_str(&format!(
        "{inner}<id type=\"integer\">{}</id>\n",
        contact.id
    ));
    push_text(out, &inner, "first-name", Some(&contact.first_name));
    push_text(out, &inner, "last-name", contact.last_name.as_deref());
    push_text(out, &inner, "email", contact.email.as_deref());
    push_text(out, &inner, "phone", contact.phone.as_deref());
    push_text(out, &inner, "title", contact.title.as_deref());
    push_text(
        out,
        &inner,
        "background-info",
        contact.background_info.as_deref(),
    );

    match contact.account_id {
        Some(account_id) => out.push_str(&format!(
            "{inner}<account-id type=\"integer\">{account_id}</account-id>\n"
        )),
        None => out.push_str(&format!(
            "{inner}<account-id type=\"integer\" nil=\"true\"/>\n"
        )),
    }

    out.push_str(&format!(
        "{inner}<permitted-user-ids type=\"array\">"
    ));
    for user_id in &contact.permitted_user_ids {
        out.push_str(&format!("<id type=\"integer\">{user_id}</id>"));
    }
    out.push_str("</permitted-user-ids>\n");

    out.push_str(&format!(
        "{inner}<created-at type=\"datetime\">{}</created-at>\n",
        contact.created_at.to_rfc3339()
    ));
    out.push_str(&format!(
        "{inner}<updated-at type=\"datetime\">{}</updated-at>\n",
        contact.updated_at.to_rfc3339()
    ));
    out.push_str(&format!("{pad}</contact>\n"));
}

fn push_text(out: &mut String, pad: &str, tag: &str, value: Option<&str>) {
    match value {
        Some(value) => out.push_str(&format!(
            "{pad}<{tag}>{}</{tag}>\n",
            escape_xml(value)
        )),
        None => out.push_str(&format!("{pad}<{tag} nil=\"true\"/>\n")),
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

//! Resource controller actions for contacts plus the campaign edit view.
//!
//! Mutations branch on `SaveOutcome`: `Saved` redirects to the resource,
//! `ValidationFailed` re-renders the originating form with the unsaved
//! entity. Read actions pick HTML or XML once per request from the Accept
//! header.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    linking::{self, LinkBundle},
    models::{
        Account, ApiMessage, ApiResponse, Contact, CreateContactRequest, Params, SaveOutcome,
        UpdateContactRequest,
    },
    render::{self, ResponseFormat},
    state::AppState,
    views,
};

/// Header carrying the current actor's id. Auth is out of scope, but the
/// candidate permission list is still "all users except the actor".
pub const ACTOR_HEADER: &str = "x-user-id";

pub async fn healthcheck() -> Json<ApiResponse<ApiMessage>> {
    Json(ApiResponse {
        data: ApiMessage {
            message: "ok".to_string(),
        },
    })
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let contacts = state.contacts.all_by_id_desc().await?;

    let response = match ResponseFormat::from_headers(&headers) {
        ResponseFormat::Xml => xml_response(render::contacts_to_xml(&contacts)),
        ResponseFormat::Html => Html(views::contacts_index_page(&contacts)).into_response(),
    };
    Ok(response)
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let contact = find_contact(&state, id).await?;

    let response = match ResponseFormat::from_headers(&headers) {
        ResponseFormat::Xml => xml_response(render::contact_to_xml(&contact)),
        ResponseFormat::Html => Html(views::contact_show_page(&contact)).into_response(),
    };
    Ok(response)
}

pub async fn new_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Html<String>> {
    let users = state.users.all_except(actor_id(&headers)).await?;
    let accounts = state.accounts.all_by_name().await?;
    let contact = Contact::from_params(&Params::new());

    Ok(Html(views::contact_new_page(&contact, &[], &users, &accounts)))
}

pub async fn edit(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Html<String>> {
    let contact = find_contact(&state, id).await?;
    Ok(Html(views::contact_edit_page(&contact, &[])))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateContactRequest>,
) -> AppResult<Response> {
    // Supporting lists are fetched up front; the failure branch re-renders
    // the form with them.
    let users = state.users.all_except(actor_id(&headers)).await?;
    let accounts = state.accounts.all_by_name().await?;

    let contact = Contact::from_params(&payload.contact);
    let account = payload.account.as_ref().map(Account::from_params);
    let bundle = LinkBundle::for_create(
        payload.contact.clone(),
        payload.account.clone(),
        payload.users.clone(),
    );

    let outcome = linking::save_with_account_and_permissions(
        state.contacts.as_ref(),
        state.accounts.as_ref(),
        contact,
        account,
        &bundle,
    )
    .await?;

    let response = match outcome {
        SaveOutcome::Saved(saved) => {
            tracing::info!(contact_id = saved.id, name = %saved.full_name(), "contact created");
            Redirect::to(&format!("/contacts/{}", saved.id)).into_response()
        }
        SaveOutcome::ValidationFailed { contact, errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::contact_new_page(&contact, &errors, &users, &accounts)),
        )
            .into_response(),
    };
    Ok(response)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContactRequest>,
) -> AppResult<Response> {
    let mut contact = find_contact(&state, id).await?;
    contact.apply_attributes(&payload.contact);

    let errors = contact.validate();
    if !errors.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::contact_edit_page(&contact, &errors)),
        )
            .into_response());
    }

    let updated = state
        .contacts
        .update(contact)
        .await?
        .ok_or_else(|| AppError::not_found(format!("contact not found: {id}")))?;

    Ok(Redirect::to(&format!("/contacts/{}", updated.id)).into_response())
}

pub async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Response> {
    let deleted = state.contacts.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("contact not found: {id}")));
    }

    tracing::info!(contact_id = id, "contact destroyed");
    Ok(Redirect::to("/contacts").into_response())
}

pub async fn campaign_edit(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> AppResult<Html<String>> {
    let campaign = state
        .campaigns
        .find_by_uuid(uuid)
        .await?
        .ok_or_else(|| AppError::not_found(format!("campaign not found: {uuid}")))?;

    Ok(Html(views::campaign_edit_page(&campaign)))
}

async fn find_contact(state: &AppState, id: i64) -> AppResult<Contact> {
    state
        .contacts
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("contact not found: {id}")))
}

fn actor_id(headers: &HeaderMap) -> Option<i64> {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse::<i64>().ok())
}

fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, render::XML_CONTENT_TYPE)], body).into_response()
}

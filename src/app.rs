use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Mounts the contact resource routes plus the campaign edit view.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/contacts",
            get(handlers::index).post(handlers::create),
        )
        .route("/contacts/new", get(handlers::new_contact))
        .route(
            "/contacts/{id}",
            get(handlers::show)
                .put(handlers::update)
                .delete(handlers::destroy),
        )
        .route("/contacts/{id}/edit", get(handlers::edit))
        .route("/campaigns/{uuid}/edit", get(handlers::campaign_edit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod auth;
pub mod endpoints;
pub mod error;

#[cfg(test)]
mod tests;

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, patch, post, put};
use axum::{Router, middleware};
use capo_core::types::ServerState;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub async fn serve_web(state: Arc<ServerState>) -> anyhow::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(state.cli.serve_url.parse()?))
        .allow_headers(vec![AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_methods(tower_http::cors::Any);

    let app = Router::new()
        .route(
            "/api/projects",
            get(endpoints::projects::get_projects).post(endpoints::projects::post_project),
        )
        .route(
            "/api/projects/{project_id}",
            get(endpoints::projects::get_project)
                .put(endpoints::projects::put_project)
                .delete(endpoints::projects::delete_project),
        )
        .route(
            "/api/projects/{project_id}/collaborators",
            get(endpoints::collaborators::get_collaborators)
                .post(endpoints::collaborators::post_collaborator),
        )
        .route(
            "/api/projects/{project_id}/collaborators/{collaborator_id}",
            patch(endpoints::collaborators::patch_collaborator_role)
                .delete(endpoints::collaborators::delete_collaborator),
        )
        .route(
            "/api/collaborators/invitations",
            get(endpoints::collaborators::get_my_invitations),
        )
        .route(
            "/api/collaborators/{collaborator_id}",
            patch(endpoints::collaborators::patch_collaborator_status),
        )
        .route(
            "/api/projects/{project_id}/songs",
            get(endpoints::songs::get_songs).post(endpoints::songs::post_song),
        )
        .route(
            "/api/songs/{song_id}",
            get(endpoints::songs::get_song)
                .put(endpoints::songs::put_song)
                .delete(endpoints::songs::delete_song),
        )
        .route(
            "/api/songs/{song_id}/chords",
            get(endpoints::chords::get_chords).post(endpoints::chords::post_chord),
        )
        .route(
            "/api/songs/{song_id}/chords/reorder",
            put(endpoints::chords::put_reorder),
        )
        .route(
            "/api/chords/{chord_id}",
            put(endpoints::chords::put_chord).delete(endpoints::chords::delete_chord),
        )
        .route(
            "/api/songs/{song_id}/sequence",
            get(endpoints::sequence::get_sequence)
                .post(endpoints::sequence::post_sequence)
                .put(endpoints::sequence::put_sequence)
                .delete(endpoints::sequence::delete_sequence),
        )
        .route("/api/auth/me", get(endpoints::auth::get_me))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::authorize,
        ))
        .route("/api/auth/register", post(endpoints::auth::post_register))
        .route("/api/auth/login", post(endpoints::auth::post_login))
        .route("/api/auth/refresh", post(endpoints::auth::post_refresh))
        .route("/api/health", get(endpoints::get_health))
        .fallback(endpoints::handle_404)
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

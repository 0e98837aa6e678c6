/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use capo_core::input::load_secret;
use capo_core::types::*;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{WebError, WebResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
    pub kind: TokenKind,
}

/// The three failure modes carry distinct messages; callers must be able to
/// tell an expired credential from a malformed one from a kind mismatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Wrong token type")]
    WrongKind,
}

pub fn encode_token(state: &ServerState, user_id: Uuid, kind: TokenKind) -> WebResult<String> {
    let now = Utc::now();
    let ttl = match kind {
        TokenKind::Access => Duration::minutes(state.cli.access_token_ttl_minutes),
        TokenKind::Refresh => Duration::days(state.cli.refresh_token_ttl_days),
    };

    let claims = Claims {
        sub: user_id,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
        kind,
    };

    let secret = load_secret(&state.cli.jwt_secret_file);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|_| WebError::failed_to_generate_token())
}

pub fn decode_token(
    state: &ServerState,
    token: &str,
    expected_kind: TokenKind,
) -> Result<Claims, TokenError> {
    let secret = load_secret(&state.cli.jwt_secret_file);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;

    if data.claims.kind != expected_kind {
        return Err(TokenError::WrongKind);
    }

    Ok(data.claims)
}

/// Require a valid access token and attach the authenticated user to the
/// request. Everything behind the protected route block goes through here.
pub async fn authorize(
    State(state): State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| WebError::Unauthorized("Authorization header not found".to_string()))?
        .to_str()
        .map_err(|_| WebError::Unauthorized("Invalid Authorization header".to_string()))?;

    let mut header = auth_header.split_whitespace();
    let (bearer, token) = (header.next(), header.next());

    let token = match (bearer, token) {
        (Some("Bearer"), Some(token)) => token,
        _ => {
            return Err(WebError::Unauthorized(
                "Invalid Authorization header".to_string(),
            ));
        }
    };

    let claims = decode_token(&state, token, TokenKind::Access)?;

    let user = EUser::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::Unauthorized("User not found".to_string()))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

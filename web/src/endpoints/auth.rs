/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::http::StatusCode;
use axum::{Extension, Json, extract::State};
use chrono::{NaiveDateTime, Utc};
use capo_core::input::validate_password;
use capo_core::types::*;
use email_address::EmailAddress;
use password_auth::{generate_hash, verify_password};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{TokenKind, decode_token, encode_token};
use crate::error::{WebError, WebResult};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<MUser> for UserResponse {
    fn from(user: MUser) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn post_register(
    state: State<Arc<ServerState>>,
    Json(body): Json<MakeUserRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<UserResponse>>)> {
    if state.cli.disable_registration {
        return Err(WebError::registration_disabled());
    }

    if !EmailAddress::is_valid(body.email.as_str()) {
        return Err(WebError::invalid_email());
    }

    validate_password(body.password.as_str()).map_err(WebError::invalid_password)?;

    let existing_user = EUser::find()
        .filter(CUser::Email.eq(body.email.clone()))
        .one(&state.db)
        .await?;

    if existing_user.is_some() {
        return Err(WebError::email_already_registered());
    }

    let now = Utc::now().naive_utc();
    let user = AUser {
        id: Set(Uuid::new_v4()),
        email: Set(body.email.clone()),
        password_hash: Set(generate_hash(body.password)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let user = user.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: UserResponse::from(user),
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn post_login(
    state: State<Arc<ServerState>>,
    Json(body): Json<MakeLoginRequest>,
) -> WebResult<Json<BaseResponse<TokenResponse>>> {
    let user = EUser::find()
        .filter(CUser::Email.eq(body.email.clone()))
        .one(&state.db)
        .await?
        .ok_or_else(WebError::invalid_credentials)?;

    verify_password(body.password, &user.password_hash)
        .map_err(|_| WebError::invalid_credentials())?;

    let access_token = encode_token(&state, user.id, TokenKind::Access)?;
    let refresh_token = encode_token(&state, user.id, TokenKind::Refresh)?;

    let res = BaseResponse {
        error: false,
        message: TokenResponse {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        },
    };

    Ok(Json(res))
}

pub async fn post_refresh(
    state: State<Arc<ServerState>>,
    Json(body): Json<RefreshRequest>,
) -> WebResult<Json<BaseResponse<RefreshResponse>>> {
    let claims = decode_token(&state, &body.refresh_token, TokenKind::Refresh)?;

    let user = EUser::find_by_id(claims.sub)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::Unauthorized("User not found".to_string()))?;

    let access_token = encode_token(&state, user.id, TokenKind::Access)?;

    let res = BaseResponse {
        error: false,
        message: RefreshResponse {
            access_token,
            token_type: "bearer".to_string(),
        },
    };

    Ok(Json(res))
}

pub async fn get_me(
    _state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<UserResponse>>> {
    let res = BaseResponse {
        error: false,
        message: UserResponse::from(user),
    };

    Ok(Json(res))
}

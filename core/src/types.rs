/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "Capo", display_name = "Capo", bin_name = "capo-server", author = "Capo", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "CAPO_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "CAPO_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "CAPO_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(
        long,
        env = "CAPO_SERVE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub serve_url: String,
    #[arg(long, env = "CAPO_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "CAPO_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "CAPO_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "CAPO_ACCESS_TOKEN_TTL_MINUTES", value_parser = greater_than_zero::<i64>, default_value = "15")]
    pub access_token_ttl_minutes: i64,
    #[arg(long, env = "CAPO_REFRESH_TOKEN_TTL_DAYS", value_parser = greater_than_zero::<i64>, default_value = "7")]
    pub refresh_token_ttl_days: i64,
    #[arg(long, env = "CAPO_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
    #[arg(long, env = "CAPO_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
}

pub type ListResponse = Vec<ListItem>;

pub type EChord = chord::Entity;
pub type EProject = project::Entity;
pub type EProjectCollaborator = project_collaborator::Entity;
pub type ESequence = sequence::Entity;
pub type ESequenceBeat = sequence_beat::Entity;
pub type ESequenceMeasure = sequence_measure::Entity;
pub type ESong = song::Entity;
pub type EUser = user::Entity;

pub type MChord = chord::Model;
pub type MProject = project::Model;
pub type MProjectCollaborator = project_collaborator::Model;
pub type MSequence = sequence::Model;
pub type MSequenceBeat = sequence_beat::Model;
pub type MSequenceMeasure = sequence_measure::Model;
pub type MSong = song::Model;
pub type MUser = user::Model;

pub type AChord = chord::ActiveModel;
pub type AProject = project::ActiveModel;
pub type AProjectCollaborator = project_collaborator::ActiveModel;
pub type ASequence = sequence::ActiveModel;
pub type ASequenceBeat = sequence_beat::ActiveModel;
pub type ASequenceMeasure = sequence_measure::ActiveModel;
pub type ASong = song::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CChord = chord::Column;
pub type CProject = project::Column;
pub type CProjectCollaborator = project_collaborator::Column;
pub type CSequence = sequence::Column;
pub type CSequenceBeat = sequence_beat::Column;
pub type CSequenceMeasure = sequence_measure::Column;
pub type CSong = song::Column;
pub type CUser = user::Column;

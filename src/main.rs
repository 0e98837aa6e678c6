/*
 * SPDX-FileCopyrightText: 2025 Capo Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use capo_core::init_state;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = init_state().await?;

    let _sentry_guard = if state.cli.report_errors {
        Some(sentry::init(sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    } else {
        None
    };

    web::serve_web(Arc::clone(&state)).await?;

    Ok(())
}

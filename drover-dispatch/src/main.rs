//! Drover Dispatch
//!
//! Triggered entry point that launches one scheduled task on the cluster
//! orchestrator and waits for it to start.
//!
//! Flow:
//! - Configuration: resolve all settings from the environment
//! - Maintenance gate: a lock-store record suppresses the launch entirely
//! - Launch: run the task with an overridden container command
//! - Poll: wait until the task leaves the starting state, bounded by the
//!   invocation budget
//!
//! One invocation performs at most one launch; a scheduler that re-invokes
//! the binary owns any retry policy.

mod config;
mod context;
mod dispatcher;
mod error;
mod poller;
mod repository;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::context::{DeadlineContext, InvocationContext};
use crate::dispatcher::{DispatchOutcome, Dispatcher};
use crate::repository::{HttpLockStore, HttpTaskOrchestrator, LockStore, TaskOrchestrator};
use drover_client::{LockStoreClient, OrchestratorClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drover_dispatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "Dispatching task {} for environment {}",
        config.task_name, config.env_name
    );

    // Initialize service clients
    let orchestrator: Arc<dyn TaskOrchestrator> = Arc::new(HttpTaskOrchestrator::new(
        OrchestratorClient::new(config.orchestrator_url.clone()),
    ));
    let lock_store: Arc<dyn LockStore> = Arc::new(HttpLockStore::new(LockStoreClient::new(
        config.lock_store_url.clone(),
    )));

    let ctx = DeadlineContext::new(config.invocation_budget);
    info!(
        "Invocation {} with a budget of {:?}",
        ctx.invocation_id(),
        config.invocation_budget
    );

    let dispatcher = Dispatcher::new(config, orchestrator, lock_store);

    match dispatcher.dispatch(&ctx).await? {
        DispatchOutcome::Completed => {
            println!("{}", serde_json::json!({ "completed": true }));
        }
        DispatchOutcome::Skipped => {
            info!("Nothing dispatched");
        }
    }

    Ok(())
}

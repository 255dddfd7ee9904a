//! todo-sync entry point
//!
//! Refreshes the task cache from the remote backend, mirrors it into the
//! local store and prints the resulting task list.

mod state;

use anyhow::Context;
use todo_sync_core::task::Task;
use todo_sync_core::SyncConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_sync=info,todo_sync_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SyncConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Using data directory {:?}, remote latency {}ms",
        config.data_dir,
        config.remote_latency.as_millis()
    );

    let app_state = AppState::new(&config)
        .await
        .context("Failed to initialize application state")?;

    let repository = app_state.tasks().await;
    let mut repository = repository.lock().await;

    repository.refresh_tasks();
    let tasks = repository
        .get_tasks()
        .await
        .context("Remote backend returned no tasks")?;

    tracing::info!("Synchronized {} tasks", tasks.len());
    for task in &tasks {
        println!("{}", render_task(task));
    }

    Ok(())
}

/// One output line per task: completion box, list title and id
fn render_task(task: &Task) -> String {
    let mark = if task.is_completed() { 'x' } else { ' ' };
    format!("[{}] {} ({})", mark, task.title_for_list(), task.id())
}

//! E2 node agent
//!
//! Main binary of the E2 agent. It implements:
//! - CLI argument parsing
//! - Configuration loading and validation
//! - RAN function registration and agent task spawning
//! - Graceful shutdown handling
//!
//! # Usage
//!
//! ```bash
//! e2-agent -c config/e2agent.yaml
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use e2node_agent::{
    load_and_validate_e2_agent_config, task_channel, E2AgentError, E2AgentMessage, E2AgentTask,
    RanFunctionTable, SctpRicConnector, StatusReceiver, Task, TaskHandle,
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT_MS,
};
use e2node_common::{init_logging, LogLevel};
use e2node_e2sm::KpmServiceModel;

/// E2 node agent towards a near-RT RIC
#[derive(Parser, Debug)]
#[command(name = "e2-agent")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the E2 agent configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "log-level", default_value = "info")]
    log_level: LogLevel,
}

/// Running agent
struct E2AgentApp {
    handle: TaskHandle<E2AgentMessage>,
    join: JoinHandle<Result<(), E2AgentError>>,
    status_rx: StatusReceiver,
    task_finished: bool,
}

impl E2AgentApp {
    /// Loads the configuration and spawns the agent task.
    ///
    /// Returns `None` when the agent is disabled in the configuration.
    fn new(config_path: &str) -> Result<Option<Self>> {
        info!("Loading configuration from: {}", config_path);
        let config = load_and_validate_e2_agent_config(config_path)
            .with_context(|| format!("Failed to load configuration from {config_path}"))?;

        if !config.enable {
            info!("E2 agent disabled in configuration");
            return Ok(None);
        }

        info!(
            "Configuration loaded: RIC={}:{}, PLMN={}, gNB ID={} ({} bits)",
            config.ric_ip,
            config.ric_port,
            config.node.plmn,
            config.node.gnb_id,
            config.node.gnb_id_length
        );

        let mut ran_functions = RanFunctionTable::new();
        ran_functions.register(config.kpm_ran_function_id, Box::new(KpmServiceModel::new()));
        info!(
            "RAN functions: {} registered (KPM as {})",
            ran_functions.len(),
            config.kpm_ran_function_id
        );

        let (handle, rx) = task_channel(DEFAULT_CHANNEL_CAPACITY);
        let mut task = E2AgentTask::new(
            config,
            ran_functions,
            Arc::new(SctpRicConnector),
            handle.clone(),
        )?;
        let status_rx = task.status_receiver();
        let join = tokio::spawn(async move { task.run(rx).await });
        info!("E2 agent task spawned");

        Ok(Some(Self {
            handle,
            join,
            status_rx,
            task_finished: false,
        }))
    }

    /// Runs until Ctrl+C or until the agent task terminates.
    async fn run(&mut self) -> Result<()> {
        info!("E2 agent started, waiting for shutdown signal...");

        loop {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, initiating shutdown...");
                    return Ok(());
                }
                result = &mut self.join => {
                    self.task_finished = true;
                    let result = result.context("E2 agent task panicked")?;
                    return result.context("E2 agent task terminated");
                }
                changed = self.status_rx.changed() => {
                    if changed.is_err() {
                        continue;
                    }
                    let status = self.status_rx.borrow_and_update().clone();
                    match status.to_yaml() {
                        Ok(yaml) => debug!("E2 agent status:\n{}", yaml),
                        Err(e) => warn!("Failed to render status: {}", e),
                    }
                }
            }
        }
    }

    /// Stops the agent task, waiting at most the shutdown timeout.
    async fn shutdown(self) -> Result<()> {
        if self.task_finished {
            return Ok(());
        }
        info!("Initiating graceful shutdown...");

        if self.handle.shutdown().await.is_err() {
            debug!("E2 agent task already stopped");
        }

        let timeout = Duration::from_millis(DEFAULT_SHUTDOWN_TIMEOUT_MS);
        match tokio::time::timeout(timeout, self.join).await {
            Ok(Ok(Ok(()))) => info!("E2 agent task shut down successfully"),
            Ok(Ok(Err(e))) => warn!("E2 agent task failed during shutdown: {}", e),
            Ok(Err(e)) => warn!("E2 agent task panicked: {}", e),
            Err(_) => warn!("E2 agent task did not stop within {:?}", timeout),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level);

    match run_agent(args).await {
        Ok(()) => {
            info!("E2 agent exited successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("E2 agent failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_agent(args: Args) -> Result<()> {
    let Some(mut app) = E2AgentApp::new(&args.config_file)? else {
        return Ok(());
    };

    let result = app.run().await;
    app.shutdown().await?;
    result
}

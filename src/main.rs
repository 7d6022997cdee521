// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kubewait::config::Config;
use kubewait::kubectl::ClusterClient;
use kubewait::wait::{wait_for_crd, wait_for_pod_to_start, wait_for_pods, wait_for_ray_health};

#[derive(Parser)]
#[command(
    name = "kubewait",
    about = "Wait for Kubernetes state to converge during e2e tests",
    long_about = "Polls the cluster through kubectl until a condition holds.\n
Defaults come from KUBEWAIT_* environment variables and can be overridden per call."
)]
struct Cli {
    /// Number of attempts before giving up
    #[arg(long, global = true)]
    tries: Option<u32>,

    /// Seconds to wait between attempts
    #[arg(long, global = true)]
    backoff_secs: Option<u64>,

    /// Namespace to operate in
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Wait until a CRD is registered
    Crd { name: String },
    /// Wait until the namespace holds exactly this many pods
    Pods { goal: usize },
    /// Wait until a pod whose name contains the filter is Running
    PodRunning { filter: String },
    /// Wait until a Ray pod passes `ray health-check`
    RayHealth {
        filter: String,
        #[arg(short, long)]
        container: Option<String>,
    },
    /// Run a command inside a pod and print its output
    Exec {
        pod: String,
        #[arg(short, long)]
        container: Option<String>,
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },
    /// Run a local script inside a pod and print its output
    ExecScript {
        pod: String,
        script: PathBuf,
        #[arg(short, long)]
        container: Option<String>,
    },
    /// Print a RayCluster resource as YAML
    GetRaycluster { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.tries, cli.backoff_secs, cli.namespace);
    let poll_config = config.poll_config()?;
    let namespace = config.namespace.clone();

    let client = ClusterClient::kubectl(&config.kubectl)
        .with_script_interpreter(&config.script_interpreter);

    match cli.command {
        Commands::Crd { name } => wait_for_crd(&client, &name, &poll_config).await?,
        Commands::Pods { goal } => wait_for_pods(&client, goal, &namespace, &poll_config).await?,
        Commands::PodRunning { filter } => {
            let pod = wait_for_pod_to_start(&client, &filter, &namespace, &poll_config).await?;
            println!("{pod}");
        }
        Commands::RayHealth { filter, container } => {
            let container = container.unwrap_or_else(|| config.ray_container.clone());
            let pod =
                wait_for_ray_health(&client, &filter, &namespace, &container, &poll_config).await?;
            println!("{pod}");
        }
        Commands::Exec {
            pod,
            container,
            command,
        } => {
            let out = client
                .exec_in_pod(&command, &pod, &namespace, container.as_deref())
                .await?;
            println!("{out}");
        }
        Commands::ExecScript {
            pod,
            script,
            container,
        } => {
            let out = client
                .exec_script_in_pod(&script, &pod, &namespace, container.as_deref())
                .await?;
            println!("{out}");
        }
        Commands::GetRaycluster { name } => {
            let doc = client.get_raycluster(&name, &namespace).await?;
            print!("{}", serde_yaml::to_string(&doc)?);
        }
    }

    info!("Done");
    Ok(())
}

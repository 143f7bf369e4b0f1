// SPDX-License-Identifier: MIT

//! `agentflow`: a thin command-line client for the `agentflow-daemon` HTTP
//! API. Not a reimplementation of the daemon's routing or persistence —
//! every command is one JSON-RPC call (or one SSE subscription) away from
//! `client::AgentClient`.

mod client;
mod commands;
mod exit_error;

use clap::{Parser, Subcommand};
use exit_error::ExitError;

#[derive(Parser)]
#[command(name = "agentflow", version, about = "Client for the agent execution runtime daemon")]
struct Cli {
    /// Base URL the daemon is listening on.
    #[arg(long, global = true, default_value = "http://127.0.0.1:4700")]
    url: String,

    /// Base path the `a2a` JSON-RPC methods are served under.
    #[arg(long, global = true, default_value = "/a2a")]
    base_path: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a message; resumes `--task-id` if it names a paused task.
    Send {
        text: String,
        #[arg(long)]
        task_id: Option<String>,
    },
    /// Send a message and print its task's events as they stream in.
    Stream {
        text: String,
        #[arg(long)]
        task_id: Option<String>,
    },
    /// Fetch a task's current state.
    Get { task_id: String },
    /// Request cancellation of a task.
    Cancel { task_id: String },
    /// Resubscribe to a task's event stream.
    Resubscribe { task_id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(err.code);
    }
}

async fn run(cli: Cli) -> Result<(), ExitError> {
    let client = client::AgentClient::new(&cli.url, &cli.base_path);
    match cli.command {
        Command::Send { text, task_id } => commands::send::run(&client, text, task_id).await,
        Command::Stream { text, task_id } => commands::stream::run(&client, text, task_id).await,
        Command::Get { task_id } => commands::get::run(&client, task_id).await,
        Command::Cancel { task_id } => commands::cancel::run(&client, task_id).await,
        Command::Resubscribe { task_id } => commands::resubscribe::run(&client, task_id).await,
    }
}

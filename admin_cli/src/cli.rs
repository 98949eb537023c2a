use clap::{Parser, Subcommand};
use std::path::PathBuf;
use supamenu::StepId;
use web_common::OrderStatus;

#[derive(Parser, Debug)]
#[command(name = "supamenu-admin", version, about = "SupaMenu restaurant admin tool")]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8080/api/v1
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token from a previous `login`
    #[arg(long, global = true, env = "SUPAMENU_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Sign in and print the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check a draft file without sending it
    Validate {
        #[arg(long)]
        draft: PathBuf,
        /// Only this step (profile, type-and-timing, menu)
        #[arg(long, value_parser = parse_step)]
        step: Option<StepId>,
    },
    /// Walk a draft file through the wizard and create the restaurant
    Create {
        #[arg(long)]
        draft: PathBuf,
    },
    /// Print metrics and orders
    Dashboard {
        #[arg(long, value_parser = parse_status)]
        status: Option<OrderStatus>,
    },
}

fn parse_step(s: &str) -> Result<StepId, String> {
    s.parse()
}

fn parse_status(s: &str) -> Result<OrderStatus, String> {
    [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Served,
        OrderStatus::Paid,
        OrderStatus::Cancelled,
    ]
    .into_iter()
    .find(|status| status.value().eq_ignore_ascii_case(s.trim()))
    .ok_or_else(|| format!("Unknown order status: {}", s))
}

mod cli;
mod draft_file;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use supamenu::client::{ApiClientConfig, ReqwestTransport};
use supamenu::{
    validate, ApiClient, Destination, LogSink, Navigator, SessionContext, StepId, StepOutcome,
    ValidationResult, WizardController, WizardSession,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use web_common::OrderStatus;

use crate::cli::{Cli, Cmd};

/// Redirects have no meaning in a terminal; they are only logged.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, destination: Destination) {
        info!(path = destination.path(), "redirect");
    }
}

fn api_client(cli: &Cli, session: SessionContext) -> Result<ApiClient<ReqwestTransport>> {
    let config = match &cli.base_url {
        Some(url) => ApiClientConfig::new(url.clone()),
        None => ApiClientConfig::from_env(),
    };
    debug!(base_url = %config.base_url, "using backend");
    let transport = ReqwestTransport::new(config).context("invalid backend URL")?;
    Ok(ApiClient::new(transport, session))
}

fn signed_in(cli: &Cli) -> Result<SessionContext> {
    match cli.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(SessionContext::with_token(token)),
        _ => bail!("no token: run `login` and pass --token or set SUPAMENU_TOKEN"),
    }
}

fn print_errors(step: StepId, result: &ValidationResult) {
    match result.errors() {
        None => println!("[ok]   {}. {}", step.number(), step.title()),
        Some(errors) => {
            println!("[fail] {}. {}", step.number(), step.title());
            for (field, message) in errors {
                println!("       {}: {}", field, message);
            }
        }
    }
}

fn run_validate(draft: &Path, only: Option<StepId>) -> Result<ExitCode> {
    let draft = draft_file::load(draft)?;
    let steps: Vec<StepId> = match only {
        Some(step) => vec![step],
        None => StepId::ALL.to_vec(),
    };

    let mut all_valid = true;
    for step in steps {
        let result = validate(step, &draft);
        all_valid &= result.is_valid();
        print_errors(step, &result);
    }
    Ok(if all_valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run_create(cli: &Cli, draft: &Path) -> Result<ExitCode> {
    let draft = draft_file::load(draft)?;
    let client = api_client(cli, signed_in(cli)?)?;
    let wizard = WizardSession::with_controller(WizardController::with_draft(draft), client, LogSink, LogNavigator);

    loop {
        match wizard.next() {
            StepOutcome::Advanced { from, to } => debug!(from = from.key(), to = to.key(), "advanced"),
            StepOutcome::AtLastStep | StepOutcome::Ignored => break,
            StepOutcome::Blocked(errors) => {
                print_errors(wizard.state().step(), &ValidationResult::Invalid(errors));
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    match wizard.submit().await {
        Ok(restaurant) => {
            println!("Created restaurant {} ({})", restaurant.id, restaurant.name);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            for (field, message) in wizard.state().errors() {
                println!("  {}: {}", field, message);
            }
            eprintln!("Create failed: {}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_dashboard(cli: &Cli, status: Option<OrderStatus>) -> Result<ExitCode> {
    let api = api_client(cli, signed_in(cli)?)?;

    let metrics = api.metrics().await?;
    println!("Total orders:   {}", metrics.total_orders);
    println!("Pending orders: {}", metrics.pending_orders);
    println!("Total sales:    {:.0} RWF", metrics.total_sales);

    let orders = api.orders(status).await?;
    println!();
    if orders.is_empty() {
        println!("No orders");
    }
    for order in orders {
        let items: u32 = order.order_items.iter().map(|line| line.quantity).sum();
        println!(
            "#{:<8} table {:<4} {:>3} items {:>10.0} RWF  {:<10} {}",
            order.id,
            order.table_number,
            items,
            order.total_amount,
            order.status.value(),
            order.created_at
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.cmd {
        Cmd::Login { email, password } => {
            let api = api_client(&cli, SessionContext::new())?;
            let response = api.login(email, password).await?;
            println!("{}", response.token);
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Validate { draft, step } => run_validate(draft, *step),
        Cmd::Create { draft } => run_create(&cli, draft).await,
        Cmd::Dashboard { status } => run_dashboard(&cli, *status).await,
    }
}

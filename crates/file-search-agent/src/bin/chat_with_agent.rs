//! Opens a session against an existing Azure AI agent and exchanges a
//! single prompt/response pair.

use std::io::Write as _;
use std::process::ExitCode;
use std::time::Duration;

use file_search_agent::{print_json, read_prompt, require_env};
use file_search_agent_client::{AgentsClient, AzureConfig, Error};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let endpoint = match require_env("AZURE_AI_ENDPOINT") {
        Ok(value) => value,
        Err(err) => return fatal(err),
    };
    let project = match require_env("AZURE_AI_PROJECT_NAME") {
        Ok(value) => value,
        Err(err) => return fatal(err),
    };
    let api_key = match require_env("AZURE_AI_KEY") {
        Ok(value) => value,
        Err(err) => return fatal(err),
    };
    let agent_id = match require_env("AZURE_AI_AGENT_ID") {
        Ok(value) => value,
        Err(err) => return fatal(err),
    };

    let client =
        AgentsClient::new(AzureConfig::new(endpoint, project, api_key));

    let session = match client.create_session(&agent_id).await {
        Ok(session) => session,
        Err(err) => return report_request_error(err),
    };
    println!("Session created: {}", session.id);

    print!("Ask the agent: ");
    std::io::stdout().flush().ok();

    let mut stdin = io::BufReader::new(io::stdin());
    let Some(prompt) = read_prompt(&mut stdin).await else {
        eprintln!("No prompt provided.");
        return ExitCode::FAILURE;
    };

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    spinner.set_message("Waiting for the agent...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.send_message(&agent_id, &session.id, &prompt).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            println!();
            println!("{}", "Agent response:".bright_cyan());
            print_json(&response);
            ExitCode::SUCCESS
        }
        Err(err) => report_request_error(err),
    }
}

fn fatal(err: impl std::fmt::Display) -> ExitCode {
    eprintln!("{err}");
    ExitCode::FAILURE
}

fn report_request_error(err: Error) -> ExitCode {
    match err {
        Error::Status { status, body } => {
            eprintln!("Request failed: {status}");
            if !body.is_empty() {
                eprintln!("Response body: {body}");
            }
        }
        other => eprintln!("Request failed: {other}"),
    }
    ExitCode::FAILURE
}

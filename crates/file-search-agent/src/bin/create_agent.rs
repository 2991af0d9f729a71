//! Creates an Azure AI agent that answers from documents in an Azure AI
//! Search index, wired through the file_search tool.

use std::process::ExitCode;

use file_search_agent::{optional_env, print_json, require_env};
use file_search_agent_client::{
    AgentDefinition, AgentsClient, AzureConfig, Error,
};

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
    let connection_id = match require_env("AZURE_AI_SEARCH_CONNECTION_ID") {
        Ok(value) => value,
        Err(err) => return fatal(err),
    };
    let index_name = match require_env("AZURE_AI_SEARCH_INDEX_NAME") {
        Ok(value) => value,
        Err(err) => return fatal(err),
    };

    let mut definition =
        AgentDefinition::file_search(connection_id, index_name);
    if let Some(model) = optional_env("AZURE_AI_MODEL_NAME") {
        definition = definition.with_model(model);
    }

    let client =
        AgentsClient::new(AzureConfig::new(endpoint, project, api_key));
    match client.create_agent(&definition).await {
        Ok(created) => {
            print_json(&created);
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

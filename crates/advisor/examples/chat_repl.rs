//! Interactive advisor session on stdin/stdout
//!
//! Run with a provider key exported (GROQ_API_KEY, OPENAI_API_KEY, or
//! GEMINI_API_KEY plus MORTGAGE_AGENT_LLM__PROVIDER); without one the
//! advisor still answers with deterministic templates.

use std::io::{self, BufRead, Write};

use mortgage_agent_advisor::{AdvisorConfig, MortgageAdvisor};
use mortgage_agent_config::load_settings;
use mortgage_agent_engine::MortgageEngine;
use mortgage_agent_llm::{LlmFactory, LlmProviderConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = load_settings()?;

    let backend = match LlmProviderConfig::from_settings(&settings.llm)
        .and_then(|config| LlmFactory::create(&config))
    {
        Ok(backend) => {
            eprintln!("presenting via {}", backend.model_name());
            Some(backend)
        }
        Err(e) => {
            eprintln!("LLM disabled ({}); templated answers only", e);
            None
        }
    };

    let advisor = MortgageAdvisor::with_config(
        MortgageEngine::new(),
        AdvisorConfig::from(&settings.advisor),
        backend,
    );

    println!("UAE mortgage advisor. Describe your situation; ctrl-d to exit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = advisor.respond(line).await;
        println!("{}", reply.text);
    }

    Ok(())
}

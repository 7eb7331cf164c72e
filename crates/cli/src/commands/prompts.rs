//! Prompts command handler.
//!
//! Lists the prompt definitions available to the workspace.

use clap::Args;
use factcheck_core::config::AppConfig;
use factcheck_prompt::{list_prompts, load_prompt};

/// List available prompt definitions
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptsCommand {
    /// Execute the prompts command.
    pub fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        tracing::info!("Executing prompts command");

        let ids = list_prompts(&config.workspace)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&ids)?);
            return Ok(());
        }

        for id in &ids {
            match load_prompt(&config.workspace, id) {
                Ok(definition) => println!("{}  {}", id, definition.title),
                Err(e) => {
                    tracing::warn!("Failed to load prompt {}: {}", id, e);
                    println!("{}", id);
                }
            }
        }

        Ok(())
    }
}

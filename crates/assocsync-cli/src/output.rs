use anyhow::Result;
use assocsync_core::{Association, AssociationState};
use colored::Colorize;
use serde_json::json;

use crate::cli::OutputFormat;

pub fn print_association(association: &Association, format: OutputFormat) -> Result<()> {
    let id = association.id()?;
    match format {
        OutputFormat::Json => {
            let value = json!({
                "id": id,
                "instance_id": association.instance_id,
                "function_arn": association.function_arn,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("{}: {}", "ID".cyan(), id);
            println!("{}: {}", "Instance".cyan(), association.instance_id);
            println!("{}: {}", "Function".cyan(), association.function_arn);
        }
    }
    Ok(())
}

pub fn print_state(id: &str, state: AssociationState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({ "id": id, "state": state });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let rendered = match state {
                AssociationState::Present => state.to_string().green(),
                _ => state.to_string().yellow(),
            };
            println!("{id}: {rendered}");
        }
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

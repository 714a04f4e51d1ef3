use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "assocsync")]
#[command(about = "Reconcile instance-to-function associations against the control plane")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file (defaults to ./assocsync.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Control-plane base URL (overrides endpoint.base_url)
    #[arg(short, long, global = true, env = "ASSOCSYNC_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token (overrides endpoint.token)
    #[arg(long, global = true, env = "ASSOCSYNC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Transport backend
    #[arg(short, long, global = true, default_value = "http")]
    pub backend: Backend,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
pub enum Backend {
    /// The control-plane REST API
    #[default]
    Http,
    /// A process-local store, for dry runs
    Memory,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Associate a function with an instance and print the association ID
    Create(CreateArgs),
    /// Read an association by ID
    Read(IdArgs),
    /// Delete an association by ID (succeeds if already absent)
    Delete(IdArgs),
    /// Validate and adopt an operator-supplied association ID
    Import(IdArgs),
    /// Report whether an association is present or absent
    Status(IdArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Instance ID
    #[arg(long)]
    pub instance_id: String,
    /// Function ARN
    #[arg(long)]
    pub function_arn: String,
}

#[derive(clap::Args)]
pub struct IdArgs {
    /// Association ID (INSTANCE_ID,FUNCTION_ARN)
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_globals() {
        let cli = Cli::try_parse_from([
            "assocsync",
            "--backend",
            "memory",
            "create",
            "--instance-id",
            "inst-1",
            "--function-arn",
            "arn:aws:lambda:us-east-1:123456789012:function:f",
        ])
        .expect("parse");
        assert_eq!(cli.backend, Backend::Memory);
        match cli.command {
            Commands::Create(args) => assert_eq!(args.instance_id, "inst-1"),
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn parses_id_commands() {
        let id = "inst-1,arn:aws:s3:::b";
        let cli = Cli::try_parse_from(["assocsync", "status", id, "-f", "json"]).expect("parse");
        assert!(matches!(cli.command, Commands::Status(ref args) if args.id == id));
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}

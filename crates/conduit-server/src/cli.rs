use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `conduit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "conduit",
    version,
    about = "Conduit - validation and proxy layer for the HR, investigation and tax front ends"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Validate a JSON file against a named shape
    Validate {
        /// Shape name, e.g. `candidate`
        shape: String,
        /// Path to the JSON payload
        file: std::path::PathBuf,
        /// Source revision (`legacy`, `v1`, `v2`); detected when omitted
        #[arg(long)]
        revision: Option<String>,
    },
    /// Print the JSON Schema of a shape, or list shape names
    Schema {
        /// Shape name; omit to list all shapes
        shape: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_bind_override() {
        let cli = Cli::try_parse_from(["conduit", "serve", "--bind", "0.0.0.0:8080"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"
        ));
    }

    #[test]
    fn validate_takes_shape_file_and_revision() {
        let cli = Cli::try_parse_from([
            "conduit",
            "--quiet",
            "validate",
            "candidate",
            "payload.json",
            "--revision",
            "legacy",
        ])
        .expect("cli should parse");
        assert!(cli.quiet);
        let Commands::Validate {
            shape, revision, ..
        } = cli.command
        else {
            panic!("expected validate");
        };
        assert_eq!(shape, "candidate");
        assert_eq!(revision.as_deref(), Some("legacy"));
    }

    #[test]
    fn schema_shape_is_optional() {
        let cli = Cli::try_parse_from(["conduit", "schema"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Schema { shape: None }));
    }
}

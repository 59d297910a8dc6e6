use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use namespec_core::{Category, RenameEdit, TokenValue};

/// namespec: validate and rebuild scene object names against a token
/// structure.
#[derive(Debug, Parser)]
#[command(name = "namespec")]
#[command(about = "Validate and rebuild object names against a token structure", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify names as valid, needing review, or invalid
    Check(CheckArgs),
    /// Re-render names with some token values changed
    Rename(RenameArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Severity to attach to findings on names
    #[arg(long, value_enum, default_value_t = SeverityArg::Error)]
    pub severity: SeverityArg,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Token edit as category=value; the value "auto" draws the next
    /// increment (repeatable)
    #[arg(long = "set", value_name = "CATEGORY=VALUE")]
    pub set: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Names to process (in addition to --names-file; reads stdin
    /// lines when neither is given)
    pub names: Vec<String>,

    /// Structure template (overrides the preset's)
    #[arg(long)]
    pub structure: Option<String>,

    /// JSON preset with the structure and token values
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// File with one name per line
    #[arg(long)]
    pub names_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Quiet output (print only affected names)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Info,
    Warning,
    Error,
}

impl RenameArgs {
    pub fn edit(&self) -> Result<RenameEdit, String> {
        let mut edit = RenameEdit::new();
        for pair in &self.set {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("--set takes CATEGORY=VALUE, got {pair:?}"))?;
            let category = Category::from_ident(key)
                .ok_or_else(|| format!("unknown token category {key:?}"))?;
            let value = if value == "auto" {
                TokenValue::Auto
            } else {
                TokenValue::Literal(value.to_string())
            };
            edit.set(category, value);
        }
        Ok(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename_args(set: &[&str]) -> RenameArgs {
        RenameArgs {
            common: CommonArgs {
                names: Vec::new(),
                structure: None,
                preset: None,
                names_file: None,
                format: OutputFormat::Human,
                quiet: false,
                verbosity: 0,
            },
            set: set.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn set_pairs_parse_into_an_edit() {
        let args = rename_args(&["type=ctrl", "numerical_inc=auto"]);
        let edit = args.edit().unwrap();
        let entries: Vec<_> = edit.entries().collect();
        assert_eq!(
            entries,
            vec![
                (Category::Type, &TokenValue::Literal("ctrl".to_string())),
                (Category::NumericalInc, &TokenValue::Auto),
            ]
        );
    }

    #[test]
    fn malformed_set_pairs_are_refused() {
        assert!(rename_args(&["type"]).edit().is_err());
        assert!(rename_args(&["side=L"]).edit().is_err());
    }
}

mod args;
mod preset;
mod render;

use clap::Parser;
use std::io::Read;
use std::process::ExitCode;
use tracing::Level;

use namespec_core::{
    classify_names, parse_structure, propose_renames, NameStructure, NamingConfig, Severity,
    DEFAULT_TEMPLATE,
};

use crate::args::{CheckArgs, Cli, Command, CommonArgs, RenameArgs, SeverityArg};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let common = match &cli.command {
        Command::Check(args) => &args.common,
        Command::Rename(args) => &args.common,
    };
    init_tracing(common.verbosity);

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Rename(args) => run_rename(args),
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run_check(args: CheckArgs) -> ExitCode {
    let (structure, config) = load_convention(&args.common);
    let names = load_names(&args.common);

    let severity = match args.severity {
        SeverityArg::Info => Severity::Info,
        SeverityArg::Warning => Severity::Warning,
        SeverityArg::Error => Severity::Error,
    };

    let report = classify_names(&structure, &config, names.iter().map(String::as_str), severity)
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(2);
        });

    let out = render::render_check(
        &report,
        args.common.format,
        args.common.verbosity,
        args.common.quiet,
    );
    print!("{out}");

    if report.has_invalid() {
        ExitCode::from(1)
    } else {
        ExitCode::from(0)
    }
}

fn run_rename(args: RenameArgs) -> ExitCode {
    let (structure, config) = load_convention(&args.common);
    let names = load_names(&args.common);

    let edit = args.edit().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(2);
    });

    let outcomes = propose_renames(&structure, &config, names.iter().map(String::as_str), &edit)
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(2);
        });

    let out = render::render_rename(
        &outcomes,
        args.common.format,
        args.common.verbosity,
        args.common.quiet,
    );
    print!("{out}");

    if outcomes.iter().any(|o| o.outcome.is_err()) {
        ExitCode::from(1)
    } else {
        ExitCode::from(0)
    }
}

fn load_convention(common: &CommonArgs) -> (NameStructure, NamingConfig) {
    let preset = common.preset.as_deref().map(|path| {
        preset::load(path).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(2);
        })
    });

    let (preset_structure, config) = match preset {
        Some(p) => (p.structure, p.config),
        None => (None, NamingConfig::default()),
    };

    // --structure beats the preset's template
    let template = common
        .structure
        .clone()
        .or(preset_structure)
        .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

    let structure = parse_structure(&template).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(2);
    });

    (structure, config)
}

fn load_names(common: &CommonArgs) -> Vec<String> {
    let mut names = common.names.clone();
    if let Some(path) = common.names_file.as_deref() {
        let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("cannot read names from {}: {e}", path.display());
            std::process::exit(2);
        });
        push_lines(&mut names, &text);
    }
    if names.is_empty() && common.names_file.is_none() {
        let mut text = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut text) {
            eprintln!("cannot read names from stdin: {e}");
            std::process::exit(2);
        }
        push_lines(&mut names, &text);
    }
    names
}

fn push_lines(names: &mut Vec<String>, text: &str) {
    names.extend(
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
    );
}

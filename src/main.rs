//! helpkit CLI

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use helpkit::tree::walk_pre_order_with_depth;
use helpkit::{
    deep_copy, deep_merge, is_url, try_deep_merge, ArrayMode, FixSuggestion, GraphValue,
    HelperError, HelpersConfig, TreeNode,
};

#[derive(Parser)]
#[command(name = "helpkit")]
#[command(about = "Small value utilities: URL checks, deep merge, tree walks, deep copy")]
#[command(version)]
struct Cli {
    /// Path to a helpkit.toml config file (overrides HELPKIT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether INPUT is an http(s) URL
    IsUrl {
        input: String,
    },

    /// Deep merge OVERRIDE into BASE (JSON or YAML files)
    Merge {
        base: PathBuf,
        #[arg(value_name = "OVERRIDE")]
        over: PathBuf,

        /// Array strategy: replace or merge (default from config)
        #[arg(short, long)]
        array_mode: Option<ArrayMode>,

        /// Fail on array/object shape mismatches instead of letting OVERRIDE win
        #[arg(long)]
        strict: bool,
    },

    /// Print node ids of a tree file in pre-order
    Tree {
        file: PathBuf,

        /// Indent ids by depth
        #[arg(long)]
        indent: bool,
    },

    /// Deep-copy a JSON or YAML value and print the copy
    Copy {
        file: PathBuf,
    },
}

fn main() {
    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), HelperError> {
    match cli.command {
        Commands::IsUrl { input } => {
            println!("{}", is_url(Some(input.as_str())));
            Ok(())
        }
        Commands::Merge {
            base,
            over,
            array_mode,
            strict,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mode = array_mode.unwrap_or(config.merge.array_mode);
            merge_files(&base, &over, mode, strict)
        }
        Commands::Tree { file, indent } => print_tree(&file, indent),
        Commands::Copy { file } => copy_file(&file),
    }
}

fn load_config(path: Option<&Path>) -> Result<HelpersConfig, HelperError> {
    match path {
        Some(p) => HelpersConfig::load_from(p),
        None => HelpersConfig::load(),
    }
}

/// Read a JSON or YAML file (JSON is valid YAML)
fn read_value(path: &Path) -> Result<Value, HelperError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

fn merge_files(base: &Path, over: &Path, mode: ArrayMode, strict: bool) -> Result<(), HelperError> {
    let base = read_value(base)?;
    let over = read_value(over)?;

    let merged = if strict {
        try_deep_merge(&base, &over, mode)?
    } else {
        deep_merge(&base, &over, mode)
    };

    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

fn print_tree(file: &Path, indent: bool) -> Result<(), HelperError> {
    let text = std::fs::read_to_string(file)?;
    let tree: TreeNode = serde_yaml::from_str(&text)?;

    walk_pre_order_with_depth(&tree, &mut |node, depth| {
        if indent {
            println!("{}{}", "  ".repeat(depth), node.id);
        } else {
            println!("{}", node.id);
        }
    });
    Ok(())
}

fn copy_file(file: &Path) -> Result<(), HelperError> {
    let source = GraphValue::from(read_value(file)?);
    let copy = deep_copy(&source);
    println!("{}", serde_json::to_string_pretty(&copy.to_json()?)?);
    Ok(())
}

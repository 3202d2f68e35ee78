use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

mod call;
mod list;
mod utils;

#[cfg(test)]
mod tests;

use call::handle_call;
use list::handle_list;
use utils::{init_logging, resolve_config};

/// Get the version string including git revision
fn version() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (git:", env!("GIT_HASH"), ")")
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Run pipit shell builtins from the command line",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    /// Runtime configuration file (RON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered builtins
    List {
        /// Also print each builtin's parameter signature
        #[arg(short, long)]
        long: bool,
    },
    /// Call one builtin with stdin as its input stream
    Call {
        /// The builtin to call
        #[arg(allow_hyphen_values = true)]
        name: String,
        /// Arguments, passed as string values
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };
    init_logging(&config);

    match cli.command {
        Commands::List { long } => handle_list(long),
        Commands::Call { name, args } => handle_call(&name, args, &config),
    }
}

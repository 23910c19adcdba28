use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::io::{self, BufRead};

mod filter;
mod layout;
mod menu;
mod state;
mod store;
mod term;

use filter::MatchOptions;
use menu::MenuOptions;
use store::CandidateStore;

/// Interactive single-row item picker: pipe in lines, filter by typing,
/// pick one with Tab/Enter. The choice is printed to stdout.
#[derive(Parser)]
#[command(name = "pickline", version, about, long_about = None)]
struct Cli {
    /// Prompt shown before the filter text.
    #[arg(short, long, default_value = ">> ")]
    prompt: String,

    /// Row width in columns (defaults to the terminal width).
    #[arg(short, long)]
    width: Option<u16>,

    /// Match candidates case-sensitively.
    #[arg(long)]
    case_sensitive: bool,

    /// Show no candidates until a filter is typed.
    #[arg(long)]
    require_query: bool,

    /// Print shell completions and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "pickline", &mut io::stdout());
        return;
    }

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1), // cancelled, dmenu convention
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool, String> {
    let store = load_stdin()?;
    if store.is_empty() {
        log::debug!("stdin had no candidates, showing prompt only");
    } else {
        log::debug!("loaded {} candidates", store.len());
    }

    let opts = MenuOptions {
        prompt: cli.prompt,
        row_width: cli.width.unwrap_or_else(term::default_row_width),
        matching: MatchOptions {
            case_sensitive: cli.case_sensitive,
            match_all_on_empty: !cli.require_query,
        },
    };

    match term::pick(&store, &opts)? {
        Some(choice) => {
            println!("{choice}");
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Read the candidate list from stdin, one candidate per line.
fn load_stdin() -> Result<CandidateStore, String> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        lines.push(line.map_err(|e| format!("Failed to read stdin: {e}"))?);
    }
    CandidateStore::load(lines).map_err(|e| e.to_string())
}

use clap::{Parser as ClapParser, Subcommand};
use sieve_lang::{
    ParserConfig,
    cli::{self, CheckOptions, CheckResult, CliError},
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sieve")]
#[command(about = "Sieve - filter JSON store records with a function-call style query language")]
#[command(version)]
struct Cli {
    /// Log compilation and matching details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a filter and run it against store records
    Check {
        /// The filter expression, e.g. 'EQUAL(id,"store-1")'
        query: String,

        /// JSON array of stores (reads --file or stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Read the JSON array of stores from a file
        #[arg(short, long, conflicts_with = "input")]
        file: Option<std::path::PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate the filter, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Deepest allowed operator nesting
        #[arg(long, env = "SIEVE_MAX_DEPTH", default_value_t = ParserConfig::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// List the fields a filter can reference
    Fields,

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'sieve docs' to list categories)
        category: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SIEVE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            file,
            pretty,
            syntax_only,
            max_depth,
        } => run_check(query, input, file, pretty, syntax_only, max_depth),
        Commands::Fields => run_fields(),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(if e.is_user_error() { 2 } else { 1 });
    }
}

fn read_input(
    input: Option<String>,
    file: Option<std::path::PathBuf>,
) -> Result<Option<String>, CliError> {
    match (input, file) {
        (Some(s), _) => Ok(Some(s)),
        (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        (None, None) => Ok(None),
    }
}

fn run_check(
    query: String,
    input: Option<String>,
    file: Option<std::path::PathBuf>,
    pretty: bool,
    syntax_only: bool,
    max_depth: usize,
) -> Result<(), CliError> {
    let input = if syntax_only {
        None
    } else {
        read_input(input, file)?
    };

    let options = CheckOptions {
        query,
        input,
        syntax_only,
        config: ParserConfig { max_depth },
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(canonical) => println!("Syntax is valid: {}", canonical),
        CheckResult::Success(stores) => {
            let json = if pretty {
                serde_json::to_string_pretty(&stores)
            } else {
                serde_json::to_string(&stores)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_fields() -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(&cli::list_fields())?;
    println!("{}", json);
    Ok(())
}

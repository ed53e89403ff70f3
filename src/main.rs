use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use inverted_wordles::config::Config;
use inverted_wordles::error::WordleResult;
use std::process;
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with canvas and fit settings; explicit flags override it
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out a local answers file once and write the SVG
    Render(cmd::render::RenderArgs),
    /// Keep a wordle up to date with a branch's answers
    Watch(cmd::watch::WatchArgs),
    /// Post answers to a branch
    Submit(cmd::submit::SubmitArgs),
    /// Ask whether a branch's site has finished deploying
    CheckDeploy(cmd::check_deploy::CheckDeployArgs),
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Layers the CLI values over the optional config file.
fn resolve_config(
    file: Option<&str>,
    cli_config: &Config,
    sub_matches: Option<&ArgMatches>,
) -> WordleResult<Config> {
    let config = match (file, sub_matches) {
        (Some(path), Some(matches)) => {
            println!("⚖️  Loading config from: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli_config, matches);
            config
        }
        _ => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}", e);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    // Raw matches tell typed values apart from defaults when merging a config file.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    init_tracing(cli.debug);

    let file = cli.config_file.as_deref();
    let result = match cli.command {
        Commands::Render(args) => {
            match resolve_config(file, &args.config, matches.subcommand_matches("render")) {
                Ok(config) => cmd::render::run(args, config),
                Err(e) => Err(e),
            }
        }
        Commands::Watch(args) => {
            match resolve_config(file, &args.config, matches.subcommand_matches("watch")) {
                Ok(config) => cmd::watch::run(args, config).await,
                Err(e) => Err(e),
            }
        }
        Commands::Submit(args) => cmd::submit::run(args).await,
        Commands::CheckDeploy(args) => cmd::check_deploy::run(args).await,
    };

    if let Err(e) = result {
        fail(e);
    }
}

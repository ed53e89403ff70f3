use clap::Args;
use inverted_wordles::client::{AnswerSource, FileAnswerSource, HttpAnswerSource, WordlesClient};
use inverted_wordles::config::{Config, PollParams};
use inverted_wordles::error::WordleResult;
use inverted_wordles::pipeline::Pipeline;
use inverted_wordles::render::SvgRenderer;
use inverted_wordles::scheduler::{Command, PollTiming, RefreshScheduler};
use inverted_wordles::wordle::WordleState;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub poll: PollParams,

    #[arg(short, long)]
    pub branch: String,

    /// Poll a local answers file instead of the site
    #[arg(long)]
    pub answers_file: Option<PathBuf>,

    #[arg(short, long, default_value = "wordle.svg")]
    pub out: PathBuf,
}

fn spawn_command_reader(tx: mpsc::Sender<Command>) {
    let ctrl_c_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c_tx.send(Command::Shutdown).await;
        }
    });

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let cmd = match line.trim() {
                "t" | "toggle" => Command::ToggleStrategy,
                "q" | "quit" => Command::Shutdown,
                "" => continue,
                other => {
                    warn!("Unknown command '{}' (use 't' to toggle, 'q' to quit)", other);
                    continue;
                }
            };
            if tx.send(cmd).await.is_err() || cmd == Command::Shutdown {
                break;
            }
        }
    });
}

async fn watch_with<S: AnswerSource>(source: S, args: &WatchArgs, config: &Config) {
    let mut state = WordleState::from_config(SvgRenderer::with_output(&args.out), config);
    let mut scheduler = RefreshScheduler::new(
        source,
        Pipeline::from_config(config),
        PollTiming::from(&args.poll),
    );

    let (tx, rx) = mpsc::channel(8);
    spawn_command_reader(tx);

    println!(
        "👀 Rendering '{}' into {} ('t' + Enter toggles sizing, 'q' quits)",
        args.branch,
        args.out.display()
    );
    scheduler.run(&mut state, rx).await;
}

pub async fn run(args: WatchArgs, config: Config) -> WordleResult<()> {
    args.poll.validate()?;

    match &args.answers_file {
        Some(path) => watch_with(FileAnswerSource::new(path), &args, &config).await,
        None => {
            let client =
                WordlesClient::new(&args.poll.base_url, args.poll.request_timeout())?;
            watch_with(HttpAnswerSource::new(client, &args.branch), &args, &config).await
        }
    }
    Ok(())
}

use crate::reports;
use clap::Args;
use inverted_wordles::answers::{self, AnswerFile};
use inverted_wordles::config::Config;
use inverted_wordles::error::WordleResult;
use inverted_wordles::pipeline::Pipeline;
use inverted_wordles::render::SvgRenderer;
use inverted_wordles::wordle::WordleState;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: Config,

    /// Answers payload, in the same shape as /api/fetch_answer serves it
    #[arg(short, long)]
    pub answers: PathBuf,

    #[arg(short, long, default_value = "wordle.svg")]
    pub out: PathBuf,
}

pub fn run(args: RenderArgs, config: Config) -> WordleResult<()> {
    println!("📂 Loading answers: {}", args.answers.display());
    let payload = AnswerFile::load_from_file(&args.answers)?;

    let mut state = WordleState::from_config(SvgRenderer::with_output(&args.out), &config);
    state.answer_counts = answers::aggregate(payload.records());
    reports::print_counts_table(&state.answer_counts);

    let mut pipeline = Pipeline::from_config(&config);
    match pipeline.render(&mut state)? {
        Some(outcome) => {
            reports::print_placement_table(&outcome);
            println!("🖼️  Wrote {}", args.out.display());
        }
        None => println!("⚠️  No answers yet; nothing to draw."),
    }
    Ok(())
}

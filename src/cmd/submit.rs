use clap::Args;
use inverted_wordles::client::{self, WordlesClient};
use inverted_wordles::config::PollParams;
use inverted_wordles::error::{WordleError, WordleResult};

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub poll: PollParams,

    #[arg(short, long)]
    pub branch: String,

    /// One value per answer field; blank ones are skipped
    #[arg(required = true)]
    pub answers: Vec<String>,
}

pub async fn run(args: SubmitArgs) -> WordleResult<()> {
    args.poll.validate()?;
    if client::answers_to_submit(&args.answers).is_empty() {
        return Err(WordleError::Validation(
            "every answer is blank; nothing to submit".into(),
        ));
    }

    let client = WordlesClient::new(&args.poll.base_url, args.poll.request_timeout())?;
    let sent = client.save_answers(&args.branch, &args.answers).await?;
    println!("✅ Submitted {} answers to '{}'", sent, args.branch);
    Ok(())
}

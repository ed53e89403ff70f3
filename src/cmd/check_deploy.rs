use clap::Args;
use inverted_wordles::client::WordlesClient;
use inverted_wordles::config::PollParams;
use inverted_wordles::deploy::{self, DeployStatus};
use inverted_wordles::error::WordleResult;

#[derive(Args, Debug, Clone)]
pub struct CheckDeployArgs {
    #[command(flatten)]
    pub poll: PollParams,

    #[arg(short, long)]
    pub branch: String,

    /// Keep checking until the branch is up or the attempts run out
    #[arg(long, default_value_t = false)]
    pub wait: bool,
}

pub async fn run(args: CheckDeployArgs) -> WordleResult<()> {
    args.poll.validate()?;
    let client = WordlesClient::new(&args.poll.base_url, args.poll.request_timeout())?;

    let status = if args.wait {
        println!(
            "⏳ Waiting for '{}' (every {}s, {} checks)",
            args.branch, args.poll.deploy_check_interval_secs, args.poll.deploy_check_attempts
        );
        deploy::wait_for_deploy(
            &client,
            &args.branch,
            args.poll.deploy_check_interval(),
            args.poll.deploy_check_attempts,
        )
        .await
    } else {
        let res = client.check_deploy(&[args.branch.clone()]).await?;
        if res.get(&args.branch).copied().unwrap_or(false) {
            DeployStatus::Ready
        } else {
            DeployStatus::NotReady
        }
    };

    match status {
        DeployStatus::Ready => println!("✅ '{}' is deployed", args.branch),
        DeployStatus::NotReady => println!("⌛ '{}' is still generating", args.branch),
    }
    Ok(())
}

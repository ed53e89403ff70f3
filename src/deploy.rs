use crate::client::WordlesClient;
use std::time::Duration;
use strum_macros::Display;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DeployStatus {
    Ready,
    NotReady,
}

/// Polls `check_deploy` for a freshly created branch until it reports ready or the
/// attempts run out. Failed requests are logged and still use up an attempt; running out
/// is reported as [`DeployStatus::NotReady`], never as an error.
pub async fn wait_for_deploy(
    client: &WordlesClient,
    branch: &str,
    interval: Duration,
    attempts: usize,
) -> DeployStatus {
    let branches = vec![branch.to_string()];
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);

    for attempt in 1..=attempts {
        ticker.tick().await;
        match client.check_deploy(&branches).await {
            Ok(status) if status.get(branch).copied().unwrap_or(false) => {
                info!("Branch '{}' is deployed (check {})", branch, attempt);
                return DeployStatus::Ready;
            }
            Ok(_) => info!(
                "Branch '{}' not deployed yet ({}/{})",
                branch, attempt, attempts
            ),
            Err(e) => warn!("Deploy check for '{}' failed: {}", branch, e),
        }
    }

    warn!(
        "Branch '{}' did not come up within {} checks",
        branch, attempts
    );
    DeployStatus::NotReady
}

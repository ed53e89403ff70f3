use super::{Canvas, LayoutEngine, Packer, PlacedWord};
use crate::answers::WordCount;
use crate::config::FitParams;
use crate::error::WordleResult;
use crate::sizing::{self, SizingParams, SizingStrategy};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPolicy {
    pub max_attempts: usize,
    pub shrink_factor: f64,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            shrink_factor: 0.8,
        }
    }
}

impl From<&FitParams> for FitPolicy {
    fn from(params: &FitParams) -> Self {
        Self {
            max_attempts: params.max_attempts,
            shrink_factor: params.shrink_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub placed: Vec<PlacedWord>,
    /// Number of words that were offered to the packer.
    pub requested: usize,
    pub attempts: usize,
    /// Scale the accepted attempt was sized with.
    pub scale_used: f64,
}

impl FitOutcome {
    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.requested
    }
}

/// Drives the layout engine through the shrink-and-retry loop.
///
/// Every attempt that leaves words out multiplies `scale` by the shrink factor, including
/// the last one, so after `n` failed attempts the scale is `initial * shrink^n`. Once the
/// attempts run out the final attempt's placement is accepted as is, even if an earlier
/// attempt placed more words.
#[derive(Debug, Clone, Copy, Default)]
pub struct FitController {
    policy: FitPolicy,
}

impl FitController {
    pub fn new(policy: FitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FitPolicy {
        &self.policy
    }

    pub fn layout<P: Packer>(
        &self,
        engine: &mut LayoutEngine<P>,
        canvas: Canvas,
        counts: &[WordCount],
        strategy: SizingStrategy,
        scale: &mut f64,
    ) -> WordleResult<FitOutcome> {
        let max = sizing::max_count(counts)?;

        let mut placed = Vec::new();
        let mut attempts = 0;
        let mut scale_used = *scale;

        for attempt in 1..=self.policy.max_attempts.max(1) {
            attempts = attempt;
            scale_used = *scale;

            let sized = sizing::map_sizes_with_max(
                counts,
                max,
                SizingParams {
                    strategy,
                    scale: *scale,
                },
            );
            placed = engine.place(&sized, canvas);
            debug!(
                "Attempt {}: placed {}/{} words at scale {:.4}",
                attempt,
                placed.len(),
                sized.len(),
                *scale
            );

            if placed.len() < sized.len() {
                *scale *= self.policy.shrink_factor;
                info!(
                    "Only laid out {} out of {} words, retrying with scale factor {:.4}",
                    placed.len(),
                    sized.len(),
                    *scale
                );
            } else {
                break;
            }
        }

        Ok(FitOutcome {
            placed,
            requested: counts.len(),
            attempts,
            scale_used,
        })
    }
}

use crate::error::{WordleError, WordleResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub canvas: CanvasParams,
    #[command(flatten)]
    pub fit: FitParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasParams {
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
    /// Gap kept around every word, in pixels
    #[arg(long, default_value_t = 5.0)]
    pub padding: f64,
    #[arg(long, default_value = "Impact")]
    pub font: String,
}

impl Default for CanvasParams {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: 5.0,
            font: "Impact".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    #[arg(long, default_value_t = 10)]
    pub max_attempts: usize,
    #[arg(long, default_value_t = 0.8)]
    pub shrink_factor: f64,
    #[arg(long, default_value_t = 1.0)]
    pub initial_scale: f64,
    /// Size common answers largest instead of rare ones
    #[arg(long, default_value_t = false)]
    pub conventional: bool,
    /// Fixes the packer's random rotations and offsets
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            shrink_factor: 0.8,
            initial_scale: 1.0,
            conventional: false,
            seed: None,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollParams {
    #[arg(long, default_value = "http://localhost:8888")]
    pub base_url: String,
    #[arg(long, default_value_t = 5)]
    pub poll_interval_secs: u64,
    #[arg(long, default_value_t = 600)]
    pub poll_deadline_secs: u64,
    #[arg(long, default_value_t = 2)]
    pub deploy_check_interval_secs: u64,
    #[arg(long, default_value_t = 60)]
    pub deploy_check_attempts: usize,
    /// Per-request limit for calls to the site
    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl Default for PollParams {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888".to_string(),
            poll_interval_secs: 5,
            poll_deadline_secs: 600,
            deploy_check_interval_secs: 2,
            deploy_check_attempts: 60,
            request_timeout_secs: 10,
        }
    }
}

impl PollParams {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn poll_deadline(&self) -> Duration {
        Duration::from_secs(self.poll_deadline_secs)
    }

    pub fn deploy_check_interval(&self) -> Duration {
        Duration::from_secs(self.deploy_check_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> WordleResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(WordleError::Config(
                "poll_interval_secs must be at least 1".into(),
            ));
        }
        if self.deploy_check_interval_secs == 0 {
            return Err(WordleError::Config(
                "deploy_check_interval_secs must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(WordleError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WordleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WordleError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WordleResult<()> {
        let c = &self.canvas;
        if !(c.width > 0.0 && c.height > 0.0) {
            return Err(WordleError::Config(format!(
                "Canvas must have a positive size, got {}x{}",
                c.width, c.height
            )));
        }
        if !(c.padding >= 0.0) {
            return Err(WordleError::Config("padding must not be negative".into()));
        }

        let f = &self.fit;
        if f.max_attempts == 0 {
            return Err(WordleError::Config("max_attempts must be at least 1".into()));
        }
        if !(f.shrink_factor > 0.0 && f.shrink_factor < 1.0) {
            return Err(WordleError::Config(format!(
                "shrink_factor must lie in (0, 1), got {}",
                f.shrink_factor
            )));
        }
        if !(f.initial_scale > 0.0) {
            return Err(WordleError::Config("initial_scale must be positive".into()));
        }
        Ok(())
    }

    /// Copies values the user typed on the command line over those loaded from a file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(canvas.width);
        update_if_present!(canvas.height);
        update_if_present!(canvas.padding);
        update_if_present!(canvas.font);

        update_if_present!(fit.max_attempts);
        update_if_present!(fit.shrink_factor);
        update_if_present!(fit.initial_scale);
        update_if_present!(fit.conventional);
        update_if_present!(fit.seed);
    }
}

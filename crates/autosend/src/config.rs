//! Layered configuration for the auto-send core.
//!
//! Defaults, then an optional file, then `AUTOSEND_*` environment variables
//! (nested keys separated by `__`, e.g. `AUTOSEND_RATE_LIMIT__MAX_PER_WINDOW`).

use autosend_feedback::{DeltaAnalyzer, DeltaThresholds};
use autosend_gate::hard_block::DEFAULT_SENTIMENT_FLOOR;
use autosend_gate::ratelimit::{DEFAULT_MAX_PER_WINDOW, DEFAULT_WINDOW_SECS};
use autosend_gate::{
    default_patterns, AutoSendEngine, AutoSendEngineBuilder, HardBlock, QuotaPolicy,
    RateLimitPolicy, TopicPattern,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoSendConfig {
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub hard_block: HardBlockConfig,

    /// Ordered forbidden-topic matchers. Replaces the defaults wholesale when
    /// set.
    #[serde(default = "default_patterns")]
    pub forbidden_topics: Vec<TopicPattern>,

    #[serde(default)]
    pub feedback: DeltaThresholds,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AutoSendConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            hard_block: HardBlockConfig::default(),
            forbidden_topics: default_patterns(),
            feedback: DeltaThresholds::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_per_window")]
    pub max_per_window: u32,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    #[serde(default)]
    pub quota_policy: QuotaPolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_window: DEFAULT_MAX_PER_WINDOW,
            window_secs: default_window_secs(),
            quota_policy: QuotaPolicy::default(),
        }
    }
}

impl RateLimitConfig {
    pub fn policy(&self) -> Result<RateLimitPolicy, ConfigError> {
        let secs = i64::try_from(self.window_secs).map_err(|_| {
            ConfigError::Invalid(format!("rate_limit.window_secs too large: {}", self.window_secs))
        })?;
        let window = chrono::Duration::try_seconds(secs).ok_or_else(|| {
            ConfigError::Invalid(format!("rate_limit.window_secs too large: {secs}"))
        })?;
        Ok(RateLimitPolicy::new(self.max_per_window, window)?)
    }
}

/// Hard-block configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardBlockConfig {
    /// Sentiment scores strictly below this block.
    #[serde(default = "default_sentiment_floor")]
    pub sentiment_floor: f64,
}

impl Default for HardBlockConfig {
    fn default() -> Self {
        Self {
            sentiment_floor: DEFAULT_SENTIMENT_FLOOR,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_max_per_window() -> u32 {
    DEFAULT_MAX_PER_WINDOW
}

fn default_window_secs() -> u64 {
    DEFAULT_WINDOW_SECS.unsigned_abs()
}

fn default_sentiment_floor() -> f64 {
    DEFAULT_SENTIMENT_FLOOR
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AutoSendConfig {
    /// Load configuration from defaults, an optional file and the environment.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&AutoSendConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("AUTOSEND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AutoSendConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section without building anything long-lived.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate_limit.policy()?;
        HardBlock::new(self.hard_block.sentiment_floor)?;
        autosend_gate::ForbiddenTopicScanner::new(&self.forbidden_topics)?;
        self.feedback.validate()?;
        Ok(())
    }

    /// Engine builder preloaded from this configuration. Callers can still
    /// swap in a shared rate-limit store or a custom clock.
    pub fn engine_builder(&self) -> Result<AutoSendEngineBuilder, ConfigError> {
        Ok(AutoSendEngine::builder()
            .rate_limit_policy(self.rate_limit.policy()?)
            .quota_policy(self.rate_limit.quota_policy)
            .hard_block(HardBlock::new(self.hard_block.sentiment_floor)?)
            .topic_patterns(self.forbidden_topics.clone()))
    }

    pub fn build_engine(&self) -> Result<AutoSendEngine, ConfigError> {
        Ok(self.engine_builder()?.build()?)
    }

    pub fn delta_analyzer(&self) -> Result<DeltaAnalyzer, ConfigError> {
        Ok(DeltaAnalyzer::new(self.feedback)?)
    }
}

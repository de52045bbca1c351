use tracing::{debug, info};

use super::{AppConfig, ConfigSource, CONFIG_ENV_KEY};

pub fn log_config_source(path: &std::path::Path, source: ConfigSource) {
    match source {
        ConfigSource::Flag => info!(
            target: "qbpm::config",
            path = %path.display(),
            "Loading configuration from --config"
        ),
        ConfigSource::Env => info!(
            target: "qbpm::config",
            path = %path.display(),
            "Loading configuration using QBPM_CONFIG_PATH environment variable"
        ),
        ConfigSource::Default => debug!(
            target: "qbpm::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            "QBPM_CONFIG_PATH not set; using default config location"
        ),
    }
}

pub fn log_loaded(config: &AppConfig) {
    info!(
        target: "qbpm::config",
        path = %config
            .source_path
            .as_deref()
            .unwrap_or_else(|| std::path::Path::new("<defaults>"))
            .display(),
        profile_dir = ?config.profiles.dir,
        browser = %config.browser.binary.display(),
        application_dir = %config.desktop.application_dir.display(),
        grace_period_ms = config.launch.grace_period.as_millis() as u64,
        menu = config.menu.program.map(|menu| menu.as_str()).unwrap_or("auto"),
        "Configuration file loaded successfully"
    );
}

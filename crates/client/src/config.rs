use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
pub const CONFIG_PATH: &str = "config.toml";

/// Compile-time base URL override (`API_BASE_URL=... dx build`).
const BASE_URL_OVERRIDE: Option<&str> = option_env!("API_BASE_URL");

/// Parse config contents and apply the compile-time override.
pub fn resolve(contents: &str, base_url_override: Option<&str>) -> AppConfig {
    AppConfig::from_toml_or_default(contents).with_base_url_override(base_url_override)
}

/// Install the config from already-read TOML (the web build embeds the file).
/// Only the first call has effect.
pub fn init_from_str(contents: &str) -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let config = resolve(contents, BASE_URL_OVERRIDE);
        tracing::info!(
            base_url = %config.api.base_url,
            default_access = config.access.default_access.as_str(),
            "client config loaded"
        );
        config
    })
}

/// Read `config.toml` from disk. A missing file yields the defaults.
pub fn load_from_file(path: &str) -> &'static AppConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => init_from_str(&contents),
        Err(e) => {
            tracing::warn!(path, error = %e, "config file not found; using defaults");
            init_from_str("")
        }
    }
}

/// The loaded config, or the defaults if nothing was loaded yet.
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(|| resolve("", BASE_URL_OVERRIDE))
}

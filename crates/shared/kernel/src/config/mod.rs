use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use shub_domain::config::AppConfig;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix for environment overrides (`SHUB__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "SHUB";
const ENV_SEPARATOR: &str = "__";
/// File stem looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "studyhub";

/// Custom error type for config loading.
#[shub_derive::shub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, `studyhub.{toml,json,yaml,..}`
///    in the working directory is used if present.
/// 2. **Environment Overrides**: variables prefixed with `SHUB__`, nested with `__`
///    (e.g. `SHUB__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source cannot be parsed,
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use shub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct CliConfig {
///     verbose: bool,
/// }
///
/// let cfg: CliConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build(path.map(|p| p.as_ref().to_path_buf()), env_source())
}

/// [`load_config`] specialized to the application config.
///
/// # Errors
/// See [`load_config`].
pub fn load_app_config(path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = load_config(path)?;
    debug!(
        users = cfg.users.len(),
        subscriptions = cfg.subscriptions.len(),
        custom_plans = cfg.plans.is_some(),
        "Application config loaded"
    );
    Ok(cfg)
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

fn build<T>(path: Option<PathBuf>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (file, required) = path.map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_NAME), false), |p| (p, true));

    info!("Loading config from {} (required: {required})", file.display());

    Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use std::fs;
    use tempfile::tempdir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        env_source().source(Some(map))
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let cfg: AppConfig = build(None, env(&[])).unwrap();
        assert!(cfg.users.is_empty());
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = build::<AppConfig>(Some(dir.path().join("absent.toml")), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }));
        assert!(err.to_string().contains("Failed to build config"));
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("studyhub.toml");
        fs::write(
            &path,
            r#"
            [logging]
            level = "info"

            [[users]]
            id = "u-1"
            role = "lecturer"
            "#,
        )
        .unwrap();

        let cfg: AppConfig =
            build(Some(path), env(&[("SHUB__LOGGING__LEVEL", "debug"), ("SHUB__LOGGING__JSON", "true")]))
                .unwrap();

        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.json);
        assert_eq!(cfg.users.len(), 1);
        assert_eq!(cfg.users[0].role, shub_domain::role::Role::Lecturer);
    }
}

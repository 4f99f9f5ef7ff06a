use std::path::{Path, PathBuf};

use doorset_config::{AppConfig, ConfigError};
use doorset_frontend::RunOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let mut args = std::env::args().skip(1);
    let mut config_override: Option<PathBuf> = None;
    let mut form: Option<PathBuf> = None;
    let mut save_to: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_override = Some(path_argument(&mut args, "--config")),
            "--form" => form = Some(path_argument(&mut args, "--form")),
            "--save" => save_to = Some(path_argument(&mut args, "--save")),
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let (config, config_error) = load_configuration(config_override.as_deref());
    init_logging(&config);
    if let Some(err) = &config_error {
        report_config_error(err);
    }
    info!("starting doorset");

    let options = RunOptions {
        form: form.as_deref(),
        save_to: save_to.as_deref(),
    };
    if let Err(err) = doorset_frontend::run_cli(&config, options) {
        error!(error = %err, "doorset run failed");
        std::process::exit(1);
    }
}

fn path_argument(args: &mut impl Iterator<Item = String>, flag: &str) -> PathBuf {
    let Some(path) = args.next() else {
        eprintln!("`{flag}` needs a file path");
        std::process::exit(1);
    };
    PathBuf::from(path)
}

/// 加载失败时回退到内置默认值；错误一并返回，
/// 待日志订阅器安装后再记录。
fn load_configuration(override_path: Option<&Path>) -> (AppConfig, Option<ConfigError>) {
    let loaded = match override_path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::discover(),
    };
    match loaded {
        Ok(cfg) => (cfg, None),
        Err(err) => (AppConfig::default(), Some(err)),
    }
}

fn report_config_error(err: &ConfigError) {
    match err {
        ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
            warn!(path = %path.display(), error = %err, "config could not be loaded, using built-in defaults");
        }
        ConfigError::Context { .. } => {
            warn!(error = %err, "config could not be loaded, using built-in defaults");
        }
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    // 宿主程序可能已经安装了订阅器。
    let _ = fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn broken_config_is_kept_for_reporting() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "[logging\nlevel = ").unwrap();

        let (config, err) = load_configuration(Some(file.path()));
        assert_eq!(config.logging.level, "info");
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
    }

    #[test]
    fn valid_config_has_no_error() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

        let (config, err) = load_configuration(Some(file.path()));
        assert_eq!(config.logging.level, "debug");
        assert!(err.is_none());
    }
}

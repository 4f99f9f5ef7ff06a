pub mod cli;
pub mod errors;
pub mod loader;
pub mod settings;

use doorset_config::AppConfig;
use errors::FrontendError;
use tracing::info;

pub use cli::RunOptions;

/// 运行命令行前端。
pub fn run_cli(config: &AppConfig, options: RunOptions<'_>) -> Result<(), FrontendError> {
    info!("starting doorset cli");
    cli::run(config, options)
}

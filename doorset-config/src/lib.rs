use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// 指定配置文件路径的环境变量。
pub const CONFIG_ENV: &str = "DOORSET_CONFIG";

/// 应用配置的根结构。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub drawing: DrawingConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 自动发现配置文件：优先读取环境变量 `DOORSET_CONFIG`，否则寻找 `./config/default.toml`。
    /// 若文件缺失，则返回默认配置。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("default.toml"))
            .map_err(|source| ConfigError::Context {
                message: "failed to resolve the current working directory".to_string(),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// 绘图位置与缩放配置，未注明时单位为毫米。
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DrawingConfig {
    #[serde(default = "DrawingConfig::default_origin")]
    pub origin_x: f64,
    #[serde(default = "DrawingConfig::default_origin")]
    pub origin_y: f64,
    /// 视图缩放时扣除的比例。
    #[serde(default = "DrawingConfig::default_view_scaling")]
    pub view_scaling: f64,
    /// 判断视窗底边与面板护板顶边是否齐平时允许的误差。
    #[serde(default = "DrawingConfig::default_flush_tolerance")]
    pub flush_tolerance_mm: f64,
}

impl DrawingConfig {
    fn default_origin() -> f64 {
        100.0
    }

    fn default_view_scaling() -> f64 {
        0.65
    }

    fn default_flush_tolerance() -> f64 {
        1e-6
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            origin_x: Self::default_origin(),
            origin_y: Self::default_origin(),
            view_scaling: Self::default_view_scaling(),
            flush_tolerance_mm: Self::default_flush_tolerance(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SurfaceConfig {
    #[serde(default = "SurfaceConfig::default_width")]
    pub width: f64,
    #[serde(default = "SurfaceConfig::default_height")]
    pub height: f64,
    #[serde(default = "SurfaceConfig::default_pixel_ratio")]
    pub pixel_ratio: f64,
}

impl SurfaceConfig {
    fn default_width() -> f64 {
        1200.0
    }

    fn default_height() -> f64 {
        1000.0
    }

    fn default_pixel_ratio() -> f64 {
        1.0
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            pixel_ratio: Self::default_pixel_ratio(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontendConfig {
    /// 未设置 `DOORSET_FORM` 时使用的表单文件。
    #[serde(default)]
    pub form_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

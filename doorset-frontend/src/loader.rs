use std::env;
use std::path::{Path, PathBuf};

use doorset_config::AppConfig;
use doorset_io::{FormLoader, FormValues, TomlFormFacade};
use tracing::{info, warn};

use crate::errors::FrontendError;

/// 指定表单文件的环境变量。
pub const FORM_ENV: &str = "DOORSET_FORM";

/// 已加载表单的来源。
#[derive(Debug, Clone, PartialEq)]
pub enum FormSource {
    File(PathBuf),
    Demo,
}

#[derive(Debug)]
pub struct LoadedForm {
    pub form: FormValues,
    pub source: FormSource,
}

/// 加载本次运行使用的表单。
///
/// 显式路径必须加载成功；否则依次尝试 `DOORSET_FORM` 与
/// `frontend.form_path`，都不可用时回退到演示表单。
pub fn load_form(config: &AppConfig, explicit: Option<&Path>) -> Result<LoadedForm, FrontendError> {
    let loader = TomlFormFacade::new();
    if let Some(path) = explicit {
        let form = loader.load(path).map_err(|source| FrontendError::Form {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "form loaded");
        return Ok(LoadedForm {
            form,
            source: FormSource::File(path.to_path_buf()),
        });
    }

    let candidate = env::var_os(FORM_ENV)
        .map(PathBuf::from)
        .or_else(|| config.frontend.form_path.clone());
    Ok(load_or_demo(&loader, candidate))
}

fn load_or_demo<L: FormLoader>(loader: &L, candidate: Option<PathBuf>) -> LoadedForm {
    if let Some(path) = candidate {
        match loader.load(&path) {
            Ok(form) => {
                info!(path = %path.display(), "form loaded");
                return LoadedForm {
                    form,
                    source: FormSource::File(path),
                };
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "form could not be loaded, using the demo form");
            }
        }
    }

    LoadedForm {
        form: FormValues::demo(),
        source: FormSource::Demo,
    }
}

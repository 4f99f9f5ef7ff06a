use std::fs;
use std::path::{Path, PathBuf};

use doorset_engine::input::{Field, FieldKind};
use thiserror::Error;
use toml::{Table, Value};
use tracing::debug;

mod form;
mod validate;

pub use form::{FormEntry, FormValues, parse_number};
pub use validate::{InputIssue, validate_inputs};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse form {path:?}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid form: {0}")]
    InvalidForm(String),
}

pub trait FormLoader {
    fn load(&self, path: &Path) -> Result<FormValues, IoError>;
}

pub trait FormSaver {
    fn save(&self, form: &FormValues, path: &Path) -> Result<(), IoError>;
}

/// 以字段 id 为键的扁平 TOML 表读写表单。
///
/// ```toml
/// door_width_left = 926
/// door_height = "2000"
/// fire_rating = "FD30"
/// lock_edge_protection = true
/// ```
pub struct TomlFormFacade;

impl TomlFormFacade {
    pub fn new() -> Self {
        Self
    }

    pub fn to_toml_string(&self, form: &FormValues) -> Result<String, IoError> {
        let mut table = Table::new();
        for (field, entry) in form.iter() {
            let value = match entry {
                FormEntry::Text(text) => Value::String(text.to_string()),
                FormEntry::Flag(checked) => Value::Boolean(checked),
            };
            table.insert(field.id().to_string(), value);
        }
        toml::to_string(&table).map_err(|err| IoError::InvalidForm(err.to_string()))
    }
}

impl Default for TomlFormFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl FormLoader for TomlFormFacade {
    fn load(&self, path: &Path) -> Result<FormValues, IoError> {
        let data = fs::read_to_string(path).map_err(|source| IoError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let table: Table = toml::from_str(&data).map_err(|source| IoError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        let form = form_from_table(&table)?;
        debug!(path = %path.display(), fields = table.len(), "form loaded");
        Ok(form)
    }
}

impl FormSaver for TomlFormFacade {
    fn save(&self, form: &FormValues, path: &Path) -> Result<(), IoError> {
        fs::write(path, self.to_toml_string(form)?).map_err(|source| IoError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn form_from_table(table: &Table) -> Result<FormValues, IoError> {
    let mut form = FormValues::new();
    for (key, value) in table {
        let field = Field::from_id(key)
            .ok_or_else(|| IoError::InvalidForm(format!("unknown field `{key}`")))?;
        match (field.kind(), value) {
            (FieldKind::Flag, Value::Boolean(checked)) => form.set_checked(field, *checked),
            (FieldKind::Flag, other) => {
                return Err(IoError::InvalidForm(format!(
                    "`{key}` must be true or false, found {}",
                    other.type_str()
                )));
            }
            (_, Value::String(text)) => form.set(field, text.as_str()),
            (FieldKind::Number, Value::Integer(number)) => form.set(field, number.to_string()),
            (FieldKind::Number, Value::Float(number)) => form.set(field, number.to_string()),
            (_, other) => {
                return Err(IoError::InvalidForm(format!(
                    "`{key}` must be text, found {}",
                    other.type_str()
                )));
            }
        }
    }
    Ok(form)
}

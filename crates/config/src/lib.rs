//! Configuration loading, validation, and management for LiftCheck.
//!
//! Loads configuration from `~/.liftcheck/config.toml` with environment
//! variable overrides. Every field has a default, so a missing file is a
//! valid (default) configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.liftcheck/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Where the CSV tables live and how they are encoded
    #[serde(default)]
    pub data: DataConfig,

    /// Column names the decision flows depend on
    #[serde(default)]
    pub schema: SchemaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Maximum accepted request body, in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Base directory; relative table paths are resolved against it.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Equipment master list (management number, site name, maker, model)
    #[serde(default = "default_elevator_list")]
    pub elevator_list: TableFileConfig,

    /// Main contactor decision table
    #[serde(default = "default_primary_table")]
    pub primary_table: TableFileConfig,

    /// Backup landing device (UPS) table
    #[serde(default = "default_secondary_table")]
    pub secondary_table: TableFileConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_elevator_list() -> TableFileConfig {
    TableFileConfig {
        path: "エレベーター一覧.csv".into(),
        encodings: vec!["shift_jis".into(), "utf-8".into()],
        na_values: default_na_values(),
    }
}

fn default_primary_table() -> TableFileConfig {
    TableFileConfig {
        path: "東芝/東芝電磁接触器判定表.csv".into(),
        encodings: vec!["utf-8".into()],
        na_values: default_na_values(),
    }
}

fn default_secondary_table() -> TableFileConfig {
    TableFileConfig {
        path: "東芝/東芝UPS対応表.csv".into(),
        encodings: vec!["utf-8".into()],
        na_values: default_na_values(),
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            elevator_list: default_elevator_list(),
            primary_table: default_primary_table(),
            secondary_table: default_secondary_table(),
        }
    }
}

impl DataConfig {
    /// Full path of a table file.
    pub fn resolve(&self, table: &TableFileConfig) -> PathBuf {
        let path = Path::new(&table.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}

/// One CSV file and the encodings to try, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFileConfig {
    pub path: String,

    /// WHATWG encoding labels (e.g. "utf-8", "shift_jis")
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,

    /// Cell values read as empty. An empty list keeps every cell literally.
    #[serde(default = "default_na_values")]
    pub na_values: Vec<String>,
}

fn default_encodings() -> Vec<String> {
    vec!["utf-8".into()]
}

/// Missing-value tokens read as empty unless a table overrides the list.
pub fn default_na_values() -> Vec<String> {
    [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Column names the decision flows are keyed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// First entry question of the primary flow
    #[serde(default = "default_category_column")]
    pub category_column: String,

    /// Second entry question, filtered by category only
    #[serde(default = "default_panel_model_column")]
    pub panel_model_column: String,

    /// Third entry question; the generic walk starts after it
    #[serde(default = "default_slope_column")]
    pub slope_column: String,

    /// Columns returned as comments instead of questions
    #[serde(default = "default_commentary_columns")]
    pub commentary_columns: Vec<String>,

    /// Columns only shown on the result, never asked
    #[serde(default = "default_result_only_columns")]
    pub result_only_columns: Vec<String>,

    /// Leading classification column of the secondary table, never surfaced
    #[serde(default = "default_category_column")]
    pub secondary_hidden_column: String,

    /// Secondary-table field derived from the primary table
    #[serde(default = "default_derived_field")]
    pub derived_field: String,

    /// Primary-flow column telling whether a backup landing device exists
    #[serde(default = "default_backup_presence_column")]
    pub backup_presence_column: String,

    /// Value of `backup_presence_column` meaning "present"
    #[serde(default = "default_backup_presence_value")]
    pub backup_presence_value: String,

    /// Row value meaning "no matching model"
    #[serde(default = "default_no_model_sentinel")]
    pub no_model_sentinel: String,

    /// Model-type columns and the local-override column that replaces them
    #[serde(default = "default_model_overrides")]
    pub model_overrides: Vec<ModelOverrideConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOverrideConfig {
    pub column: String,
    pub override_column: String,
}

fn default_category_column() -> String {
    "分類".into()
}
fn default_panel_model_column() -> String {
    "制御盤型式".into()
}
fn default_slope_column() -> String {
    "傾斜有無".into()
}
fn default_derived_field() -> String {
    "主回路電磁接触器フェールセーフ該当有無".into()
}
fn default_backup_presence_column() -> String {
    "停電時自動着床装置の有無".into()
}
fn default_backup_presence_value() -> String {
    "有".into()
}
fn default_no_model_sentinel() -> String {
    "該当型式無".into()
}

fn default_commentary_columns() -> Vec<String> {
    vec![
        "電動機主回路用接触器目視確認可否コメント".into(),
        "ブレーキ用接触器目視確認可否コメント".into(),
        "ブレーキ用接触器②目視確認可否コメント".into(),
    ]
}

fn default_result_only_columns() -> Vec<String> {
    vec![
        "主回路電磁接触器フェールセーフ該当有無".into(),
        "電動機主回路用接触器判定基準用コメント".into(),
        "電動機主回路用接触器判定基準".into(),
        "ブレーキ電磁接触器フェールセーフ該当有無".into(),
        "ブレーキ用接触器判定基準".into(),
        "ブレーキ電磁接触器②フェールセーフ該当有無".into(),
        "ブレーキ用接触器②判定基準".into(),
        "備考".into(),
    ]
}

fn default_model_overrides() -> Vec<ModelOverrideConfig> {
    [
        "電動機主回路用接触器型式",
        "ブレーキ用接触器型式",
        "ブレーキ用接触器型式②",
    ]
    .into_iter()
    .map(|column| ModelOverrideConfig {
        column: column.into(),
        override_column: format!("{column}_現地型式"),
    })
    .collect()
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            category_column: default_category_column(),
            panel_model_column: default_panel_model_column(),
            slope_column: default_slope_column(),
            commentary_columns: default_commentary_columns(),
            result_only_columns: default_result_only_columns(),
            secondary_hidden_column: default_category_column(),
            derived_field: default_derived_field(),
            backup_presence_column: default_backup_presence_column(),
            backup_presence_value: default_backup_presence_value(),
            no_model_sentinel: default_no_model_sentinel(),
            model_overrides: default_model_overrides(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.liftcheck/config.toml).
    ///
    /// Environment variables override the file:
    /// - `LIFTCHECK_DATA_DIR`
    /// - `LIFTCHECK_HOST`
    /// - `LIFTCHECK_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("LIFTCHECK_DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("LIFTCHECK_HOST") {
            self.gateway.host = host;
        }
        if let Some(port) = lookup("LIFTCHECK_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("LIFTCHECK_PORT is not a port number: {port}"))
            })?;
        }
        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".liftcheck")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must be non-zero".into(),
            ));
        }

        let schema = &self.schema;
        for (key, value) in [
            ("schema.category_column", &schema.category_column),
            ("schema.panel_model_column", &schema.panel_model_column),
            ("schema.slope_column", &schema.slope_column),
            ("schema.derived_field", &schema.derived_field),
        ] {
            if value.is_empty() {
                return Err(ConfigError::ValidationError(format!("{key} cannot be empty")));
            }
        }

        for (key, table) in [
            ("data.elevator_list", &self.data.elevator_list),
            ("data.primary_table", &self.data.primary_table),
            ("data.secondary_table", &self.data.secondary_table),
        ] {
            if table.encodings.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{key}.encodings must list at least one encoding"
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

use crate::core::ConfigProvider;
use crate::domain::model::{SourceFormat, CITIES_FILENAME, CONTINENT_FILENAME, DATABASE_FILENAME};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub continent: Option<ContinentConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub format: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContinentConfig {
    pub enabled: Option<bool>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub data_dir: String,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub cities: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_allowed_value(
            "source.format",
            &self.source.format,
            &SourceFormat::SUPPORTED,
        )?;
        validation::validate_path("source.path", &self.source.path)?;

        if let Some(format) = SourceFormat::parse(&self.source.format) {
            validation::validate_file_extension(
                "source.path",
                &self.source.path,
                format.expected_extension(),
            )?;
        }

        validation::validate_path("load.data_dir", &self.load.data_dir)?;

        if let Some(path) = ConfigProvider::continent_path(self) {
            validation::validate_path("continent.path", path)?;
            validation::validate_file_extension("continent.path", path, "json")?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn continent_merge_enabled(&self) -> bool {
        ConfigProvider::continent_path(self).is_some()
    }
}

impl ConfigProvider for TomlConfig {
    fn source_format(&self) -> &str {
        &self.source.format
    }

    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn continent_path(&self) -> Option<&str> {
        // 沒有 [continent] 區段時採用預設行為：合併 continent.json
        match &self.continent {
            Some(continent) if !continent.enabled.unwrap_or(true) => None,
            Some(continent) => Some(continent.path.as_deref().unwrap_or(CONTINENT_FILENAME)),
            None => Some(CONTINENT_FILENAME),
        }
    }

    fn data_dir(&self) -> &str {
        &self.load.data_dir
    }

    fn cities_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|f| f.cities.as_deref())
            .unwrap_or(CITIES_FILENAME)
    }

    fn database_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|f| f.database.as_deref())
            .unwrap_or(DATABASE_FILENAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

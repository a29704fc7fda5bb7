use crate::config::schema::FormSchema;
use crate::domain::model::FieldSpec;
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{
    validate_at_least, validate_endpoint, validate_store_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://leave-form-back-end.onrender.com/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub attachment: AttachmentConfig,
    pub theme: Option<ThemeConfig>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub store_path: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_ATTACHMENT_BYTES
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: None,
        }
    }
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submission: SubmissionConfig::default(),
            attachment: AttachmentConfig::default(),
            theme: None,
            fields: Vec::new(),
        }
    }
}

impl FormConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時退回預設值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No config file at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${LEAVE_FORM_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FormError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.submission.endpoint
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.submission
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.attachment.max_bytes
    }

    /// 偏好設定檔位置：配置指定，否則放在使用者設定目錄
    pub fn theme_store_path(&self) -> PathBuf {
        self.theme
            .as_ref()
            .and_then(|t| t.store_path.as_ref())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("leave-form")
                    .join("preferences.json")
            })
    }

    /// 沒有 [[fields]] 時使用請假單預設欄位
    pub fn schema(&self) -> Result<FormSchema> {
        if self.fields.is_empty() {
            Ok(FormSchema::leave_request())
        } else {
            FormSchema::new(self.fields.clone())
        }
    }
}

impl Validate for FormConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint("submission.endpoint", &self.submission.endpoint)?;

        if let Some(timeout) = self.submission.timeout_seconds {
            validate_at_least("submission.timeout_seconds", timeout, 1)?;
        }

        validate_at_least("attachment.max_bytes", self.attachment.max_bytes, 1)?;

        if let Some(path) = self.theme.as_ref().and_then(|t| t.store_path.as_deref()) {
            validate_store_path("theme.store_path", path)?;
        }

        self.schema()?;
        Ok(())
    }
}

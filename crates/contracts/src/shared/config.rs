use once_cell::sync::Lazy;
use serde::Deserialize;

use super::api::AUTH_TOKEN_KEY;
use super::decision_dialog::ConfirmationPolicy;

/// Настройки панели
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Порт backend на том же хосте, что и страница
    pub port: u16,
    /// Ключ local storage с bearer токеном
    pub token_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            token_key: AUTH_TOKEN_KEY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    pub rows_per_page: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 5,
            page_size_options: vec![5, 10, 25, 50],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    pub confirmation: ConfirmationPolicy,
    /// Причина, подставляемая в окно подтверждения одобрения
    pub approve_default_reason: String,
    /// Задержка перед обновлением списка после успешного решения
    pub refresh_delay_ms: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            confirmation: ConfirmationPolicy::Always,
            approve_default_reason: "Документы проверены".to_string(),
            refresh_delay_ms: 1500,
        }
    }
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
token_key = "custom-auth-token"

[list]
rows_per_page = 5
page_size_options = [5, 10, 25, 50]

[workflow]
confirmation = "always"
approve_default_reason = "Документы проверены"
refresh_delay_ms = 1500
"#;

static EMBEDDED: Lazy<DashboardConfig> = Lazy::new(|| match parse_config(DEFAULT_CONFIG) {
    Ok(config) => config,
    Err(e) => {
        log::warn!("Embedded configuration is invalid, using defaults: {}", e);
        DashboardConfig::default()
    }
});

/// Parse and validate configuration text
pub fn parse_config(contents: &str) -> anyhow::Result<DashboardConfig> {
    let config: DashboardConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Embedded default configuration
pub fn embedded_config() -> &'static DashboardConfig {
    &EMBEDDED
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.list.rows_per_page == 0 {
            anyhow::bail!("list.rows_per_page must be positive");
        }
        if self.list.page_size_options.iter().any(|&size| size == 0) {
            anyhow::bail!("list.page_size_options must not contain 0");
        }
        if self.api.token_key.trim().is_empty() {
            anyhow::bail!("api.token_key must not be empty");
        }
        Ok(())
    }

    /// Варианты размера страницы, всегда включая текущий
    pub fn page_size_options(&self) -> Vec<usize> {
        let mut options = self.list.page_size_options.clone();
        if !options.contains(&self.list.rows_per_page) {
            options.push(self.list.rows_per_page);
        }
        options.sort_unstable();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(embedded_config().api.token_key, "custom-auth-token");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [workflow]
            confirmation = "reason_only"
            "#,
        )
        .unwrap();
        assert_eq!(config.workflow.confirmation, ConfirmationPolicy::ReasonOnly);
        assert_eq!(config.list.rows_per_page, 5);
        assert_eq!(config.api.port, 3000);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(parse_config("[list]\nrows_per_page = 0").is_err());
        assert!(parse_config("[api]\nport = \"http\"").is_err());
    }

    #[test]
    fn test_page_size_options_include_current() {
        let mut config = DashboardConfig::default();
        config.list.rows_per_page = 7;
        assert_eq!(config.page_size_options(), vec![5, 7, 10, 25, 50]);
    }
}

//! Загрузка настроек панели.
//!
//! Сначала `GET /dashboard.toml` рядом со страницей, при любой ошибке
//! используется встроенная конфигурация.

use contracts::shared::config::{embedded_config, parse_config, DashboardConfig};
use gloo_net::http::Request;

const CONFIG_PATH: &str = "/dashboard.toml";

async fn fetch_config_text() -> Result<String, String> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}

pub async fn load_config() -> DashboardConfig {
    match fetch_config_text().await {
        Ok(text) => match parse_config(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "{} некорректен, используются встроенные настройки: {:#}",
                    CONFIG_PATH,
                    e
                );
                embedded_config().clone()
            }
        },
        Err(e) => {
            log::info!("{} недоступен ({}), используются встроенные настройки", CONFIG_PATH, e);
            embedded_config().clone()
        }
    }
}

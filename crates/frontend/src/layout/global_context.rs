use contracts::enums::EntityKind;
use contracts::shared::config::{embedded_config, DashboardConfig};
use leptos::prelude::*;

use crate::system::auth::storage;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Открытый раздел (тип сущности)
    pub active: RwSignal<EntityKind>,
    pub left_open: RwSignal<bool>,
    pub config: RwSignal<DashboardConfig>,
    pub config_loaded: RwSignal<bool>,
    /// Bearer токен, прочитанный из local storage
    pub auth_token: RwSignal<Option<String>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        let config = embedded_config().clone();
        let token = storage::get_auth_token(&config.api.token_key);
        Self {
            active: RwSignal::new(EntityKind::Miner),
            left_open: RwSignal::new(true),
            config: RwSignal::new(config),
            config_loaded: RwSignal::new(false),
            auth_token: RwSignal::new(token),
        }
    }

    pub fn apply_config(&self, config: DashboardConfig) {
        let token = storage::get_auth_token(&config.api.token_key);
        log::info!(
            "Настройки загружены: порт {}, подтверждение {:?}",
            config.api.port,
            config.workflow.confirmation
        );
        self.auth_token.set(token);
        self.config.set(config);
        self.config_loaded.set(true);
    }

    /// Сохранить токен, вставленный пользователем
    pub fn sign_in(&self, token: String) {
        let token = token.trim().to_string();
        if token.is_empty() {
            return;
        }
        let key = self.config.with_untracked(|c| c.api.token_key.clone());
        storage::save_auth_token(&key, &token);
        self.auth_token.set(Some(token));
    }

    pub fn sign_out(&self) {
        let key = self.config.with_untracked(|c| c.api.token_key.clone());
        storage::clear_auth_token(&key);
        self.auth_token.set(None);
    }

    pub fn open_entity(&self, kind: EntityKind) {
        log::debug!("open_entity: {}", kind.code());
        if self.active.get_untracked() != kind {
            self.active.set(kind);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

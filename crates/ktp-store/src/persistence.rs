//! Сохранение состояния интерфейса
//!
//! Раньше вкладки и токен читались из браузерного хранилища прямо
//! внутри компонентов; здесь это явная зависимость, передаваемая слою
//! отображения. Расчётное ядро о хранилище не знает.

use ktp_core::{KtpError, Result};
use std::collections::HashMap;

/// Ключи состояния интерфейса (имена исторические)
pub const KEY_RUNN_ACTIVE_TAB: &str = "runn-active-tab";
pub const KEY_RUNN_MODE: &str = "runn-mode";
pub const KEY_SELECTED_GROUP_SLUG: &str = "selectedGroupSlug";
pub const KEY_AUTH_TOKEN: &str = "token";

/// Хранилище ключ-значение (аналог localStorage)
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str);
}

/// Хранилище в памяти процесса
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    values: HashMap<String, String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Сеанс интерфейса поверх хранилища
#[derive(Debug)]
pub struct UiSession<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> UiSession<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Токен авторизации; без него запросы к каталогам не выполняются
    pub fn auth_token(&self) -> Result<String> {
        self.storage
            .get(KEY_AUTH_TOKEN)
            .ok_or(KtpError::MissingAuthToken)
    }

    pub fn set_auth_token(&mut self, token: &str) {
        self.storage.set(KEY_AUTH_TOKEN, token);
    }

    /// Активная вкладка РУНН
    pub fn runn_active_tab(&self) -> Option<String> {
        self.storage.get(KEY_RUNN_ACTIVE_TAB)
    }

    pub fn set_runn_active_tab(&mut self, tab: &str) {
        self.storage.set(KEY_RUNN_ACTIVE_TAB, tab);
    }

    /// Режим РУНН
    pub fn runn_mode(&self) -> Option<String> {
        self.storage.get(KEY_RUNN_MODE)
    }

    pub fn set_runn_mode(&mut self, mode: &str) {
        self.storage.set(KEY_RUNN_MODE, mode);
    }

    /// Выбранная группа калькуляций
    pub fn selected_group_slug(&self) -> Option<String> {
        self.storage.get(KEY_SELECTED_GROUP_SLUG)
    }

    pub fn set_selected_group_slug(&mut self, slug: &str) {
        self.storage.set(KEY_SELECTED_GROUP_SLUG, slug);
    }

    /// Выход: токен удаляется, настройки вкладок остаются
    pub fn clear_auth(&mut self) {
        self.storage.remove(KEY_AUTH_TOKEN);
    }
}

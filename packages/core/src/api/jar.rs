//! StorageJar - минимальный API над localStorage с откатом на cookie.
//!
//! Каждая операция заново спрашивает окружение, доступен ли localStorage,
//! поэтому смена носителя посреди сессии сразу меняет поведение.
//!
//! Истечение в localStorage пассивное: просроченная запись читается как
//! отсутствующая, но физически остаётся на месте до `delete` или перезаписи.
//! `read` вернул `None` - это ещё не значит, что ключ никогда не писали.

use crate::config::Config;
use crate::storage::cookie;
use crate::storage::medium::{Backend, CookieMedium, DurableMedium};
use crate::storage::models::{Entry, StoredItem};
use crate::utils::error::{Result, StorageJarError};
use crate::utils::time::{expiry_from_now, Clock, SystemClock};
use tracing::{debug, warn};

pub struct StorageJar<B: Backend, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    config: Config,
}

impl<B: Backend> StorageJar<B, SystemClock> {
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageJar<crate::storage::web::WebBackend, SystemClock> {
    /// Хранилище текущей вкладки браузера
    pub fn browser() -> Self {
        Self::new(crate::storage::web::WebBackend)
    }
}

impl<B: Backend, C: Clock> StorageJar<B, C> {
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            config: Config::global().clone(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Доступен ли localStorage прямо сейчас
    pub fn has_durable_medium(&self) -> bool {
        self.backend.durable().is_some()
    }

    /// Записать значение на время жизни по умолчанию (7 дней)
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        self.write_with_lifetime(key, value, self.config.default_lifetime_days)
    }

    /// Записать значение на `lifetime_days` дней.
    ///
    /// Отрицательное время жизни допустимо: так `delete` удаляет cookie.
    /// Очень большое (или бесконечное) время жизни насыщается до максимального
    /// момента, `NaN` отклоняется с `InvalidLifetime`.
    /// Ошибки носителя (например, переполнение квоты) пробрасываются вызывающему.
    pub fn write_with_lifetime(&self, key: &str, value: &str, lifetime_days: f64) -> Result<()> {
        if lifetime_days.is_nan() {
            return Err(StorageJarError::InvalidLifetime(format!(
                "lifetime for '{}' is NaN",
                key
            )));
        }

        let expires = expiry_from_now(&self.clock, lifetime_days);

        match self.backend.durable() {
            Some(storage) => {
                let item = StoredItem::new(value, expires);
                storage.set_item(key, &item.to_json()?)?;

                debug!(
                    target: "storage_jar::jar",
                    key = %key,
                    expires,
                    "Wrote item to localStorage"
                );
            }
            None => {
                let assignment =
                    cookie::format_assignment(key, value, expires, &self.config.cookie_path)?;
                self.backend.fallback()?.set_cookie(&assignment)?;

                debug!(
                    target: "storage_jar::jar",
                    key = %key,
                    expires,
                    "Wrote item to cookie"
                );
            }
        }

        Ok(())
    }

    /// Прочитать запись: конверт из localStorage или сырую строку из cookie.
    ///
    /// Отсутствующая, битая и просроченная записи одинаково дают `None`.
    pub fn read_entry(&self, key: &str) -> Result<Option<Entry>> {
        match self.backend.durable() {
            Some(storage) => {
                let Some(raw) = storage.get_item(key)? else {
                    return Ok(None);
                };

                let item = match StoredItem::from_json(&raw) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(
                            target: "storage_jar::jar",
                            key = %key,
                            error = %e,
                            "Ignoring malformed localStorage item"
                        );
                        return Ok(None);
                    }
                };

                if item.is_valid_at(self.clock.now_millis()) {
                    Ok(Some(Entry::Durable(item)))
                } else {
                    Ok(None)
                }
            }
            None => {
                let cookies = self.backend.fallback()?.cookies()?;
                Ok(cookie::find_cookie(&cookies, key).map(|value| Entry::Cookie(value.to_string())))
            }
        }
    }

    /// Прочитать значение независимо от носителя
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entry(key)?.map(Entry::into_value))
    }

    /// Есть ли действительная запись под ключом
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read_entry(key)?.is_some())
    }

    /// Удалить запись. `false`, если её нет или она уже истекла.
    pub fn delete(&self, key: &str) -> Result<bool> {
        if !self.contains(key)? {
            return Ok(false);
        }

        match self.backend.durable() {
            Some(storage) => storage.remove_item(key)?,
            None => self.write_with_lifetime(key, "", self.config.deletion_lifetime_days)?,
        }

        debug!(target: "storage_jar::jar", key = %key, "Deleted item");
        Ok(true)
    }
}

//! Централизованная конфигурация для Storage Jar
//!
//! Все константы и настройки должны быть определены здесь,
//! чтобы избежать хардкода по всему проекту.

use std::sync::OnceLock;

/// Глобальная конфигурация (синглтон)
static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Основная структура конфигурации
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ============================================
    // ВРЕМЯ ЖИЗНИ
    // ============================================

    /// Время жизни записи по умолчанию (в днях)
    /// По умолчанию: 7 дней
    pub default_lifetime_days: f64,

    /// Время жизни, с которым перезаписывается cookie при удалении (в днях).
    /// Отрицательное значение заставляет браузер сразу удалить cookie.
    pub deletion_lifetime_days: f64,

    // ============================================
    // COOKIE
    // ============================================

    /// Атрибут `path` для cookie
    pub cookie_path: String,
}

impl Default for Config {
    /// Конфигурация с дефолтными значениями
    fn default() -> Self {
        Self {
            default_lifetime_days: 7.0,
            deletion_lifetime_days: -1.0,
            cookie_path: "/".to_string(),
        }
    }
}

impl Config {
    /// Создать конфигурацию из переменных окружения
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Переопределяем значения из env, если они заданы
        if let Ok(val) = std::env::var("STORAGE_JAR_DEFAULT_LIFETIME_DAYS") {
            if let Ok(parsed) = val.parse() {
                config.default_lifetime_days = parsed;
            }
        }

        if let Ok(val) = std::env::var("STORAGE_JAR_DELETION_LIFETIME_DAYS") {
            if let Ok(parsed) = val.parse() {
                config.deletion_lifetime_days = parsed;
            }
        }

        if let Ok(val) = std::env::var("STORAGE_JAR_COOKIE_PATH") {
            if !val.trim().is_empty() {
                config.cookie_path = val;
            }
        }

        config
    }

    /// Получить глобальный экземпляр конфигурации
    ///
    /// Автоматически инициализирует конфигурацию со значениями по умолчанию при первом вызове
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Config::default)
    }

    /// Инициализировать глобальную конфигурацию со значениями по умолчанию
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init() -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::default())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию из переменных окружения
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_from_env() -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::from_env())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию с кастомным экземпляром
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_with(config: Config) -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(config)
            .map_err(|_| "Config already initialized")
    }

    /// Проверить, инициализирована ли глобальная конфигурация
    pub fn is_initialized() -> bool {
        GLOBAL_CONFIG.get().is_some()
    }
}

// Модели данных для хранилища

use serde::{Deserialize, Serialize};

/// Конверт, в котором значение лежит в localStorage.
///
/// localStorage не умеет истекать сам, поэтому рядом со значением хранится
/// абсолютный момент истечения.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub value: String,
    /// Момент истечения, мс с эпохи
    pub timestamp: i64,
}

impl StoredItem {
    pub fn new(value: impl Into<String>, timestamp: i64) -> Self {
        Self {
            value: value.into(),
            timestamp,
        }
    }

    /// Действительна ли запись в момент `now`
    pub fn is_valid_at(&self, now: i64) -> bool {
        now <= self.timestamp
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Результат чтения: конверт из localStorage или сырая строка из cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Durable(StoredItem),
    Cookie(String),
}

impl Entry {
    /// Сохранённое значение независимо от носителя
    pub fn value(&self) -> &str {
        match self {
            Entry::Durable(item) => &item.value,
            Entry::Cookie(raw) => raw,
        }
    }

    /// Момент истечения; для cookie неизвестен
    pub fn expires_at(&self) -> Option<i64> {
        match self {
            Entry::Durable(item) => Some(item.timestamp),
            Entry::Cookie(_) => None,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            Entry::Durable(item) => item.value,
            Entry::Cookie(raw) => raw,
        }
    }
}

// Типы ошибок

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageJarError {
    #[error("Storage medium unavailable: {0}")]
    Unavailable(String),

    #[error("Storage medium error: {0}")]
    Medium(String),

    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid lifetime: {0}")]
    InvalidLifetime(String),

    #[error("WASM serialization error: {0}")]
    SerdeWasm(String),
}

impl From<serde_json::Error> for StorageJarError {
    fn from(error: serde_json::Error) -> Self {
        StorageJarError::Serialization(error.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for StorageJarError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        StorageJarError::SerdeWasm(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorageJarError>;

// Для WASM-биндингов
#[cfg(target_arch = "wasm32")]
impl From<StorageJarError> for wasm_bindgen::JsValue {
    fn from(error: StorageJarError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageJarError::QuotaExceeded("session".to_string());
        assert_eq!(err.to_string(), "Storage quota exceeded: session");

        let err = StorageJarError::InvalidKey("a=b".to_string());
        assert_eq!(err.to_string(), "Invalid key: a=b");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StorageJarError = parse_err.into();
        assert!(matches!(err, StorageJarError::Serialization(_)));
    }
}

// Браузерное окружение: window.localStorage + document.cookie

use crate::storage::medium::{Backend, CookieMedium, DurableMedium};
use crate::utils::error::{Result, StorageJarError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, HtmlDocument, Storage};

fn js_error(context: &str, err: JsValue) -> StorageJarError {
    StorageJarError::Medium(format!("{}: {:?}", context, err))
}

/// Окружение текущей вкладки браузера
#[derive(Debug, Clone, Copy, Default)]
pub struct WebBackend;

impl Backend for WebBackend {
    type Durable = WebStorage;
    type Fallback = DocumentCookies;

    // `window.localStorage` может отсутствовать или бросать SecurityError
    fn durable(&self) -> Option<WebStorage> {
        web_sys::window()?
            .local_storage()
            .ok()
            .flatten()
            .map(WebStorage)
    }

    fn fallback(&self) -> Result<DocumentCookies> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| StorageJarError::Unavailable("document is not available".to_string()))?;

        document
            .dyn_into::<HtmlDocument>()
            .map(DocumentCookies)
            .map_err(|_| StorageJarError::Unavailable("document has no cookie API".to_string()))
    }
}

pub struct WebStorage(Storage);

impl DurableMedium for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.0
            .get_item(key)
            .map_err(|e| js_error("localStorage.getItem", e))
    }

    // QuotaExceededError приходит сюда как исключение JS
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.0.set_item(key, value).map_err(|e| {
            let name = e
                .dyn_ref::<DomException>()
                .map(|err| err.name())
                .unwrap_or_default();
            if name == "QuotaExceededError" {
                StorageJarError::QuotaExceeded(key.to_string())
            } else {
                js_error("localStorage.setItem", e)
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.0
            .remove_item(key)
            .map_err(|e| js_error("localStorage.removeItem", e))
    }
}

pub struct DocumentCookies(HtmlDocument);

impl CookieMedium for DocumentCookies {
    fn cookies(&self) -> Result<String> {
        self.0.cookie().map_err(|e| js_error("document.cookie", e))
    }

    fn set_cookie(&self, assignment: &str) -> Result<()> {
        self.0
            .set_cookie(assignment)
            .map_err(|e| js_error("document.cookie=", e))
    }
}

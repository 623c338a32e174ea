// WASM bindings
//
// Повторяют JS API StorageJar: статические методы без состояния,
// носитель выбирается заново при каждом вызове.

use crate::api::StorageJar;
use crate::utils::error::StorageJarError;
use crate::wasm::console;
use wasm_bindgen::prelude::*;

type JsResult<T> = Result<T, JsValue>;

fn report(error: StorageJarError) -> JsValue {
    console::error(&error.to_string());
    error.into()
}

/// Инициализация: panic hook и приветствие в консоли
#[wasm_bindgen(js_name = initStorageJar)]
pub fn init_storage_jar() {
    console::init_logging();
}

#[wasm_bindgen(js_name = StorageJar)]
pub struct JsStorageJar;

#[wasm_bindgen(js_class = StorageJar)]
impl JsStorageJar {
    /// Доступен ли localStorage
    #[wasm_bindgen(js_name = hasLocalStorage)]
    pub fn has_local_storage() -> bool {
        StorageJar::browser().has_durable_medium()
    }

    /// Есть ли действительная запись под ключом
    pub fn contains(key: String) -> JsResult<bool> {
        StorageJar::browser().contains(&key).map_err(report)
    }

    /// Удалить запись; `false`, если её нет
    pub fn delete(key: String) -> JsResult<bool> {
        StorageJar::browser().delete(&key).map_err(report)
    }

    /// `{value, timestamp}` из localStorage, строка из cookie или `null`
    pub fn read(key: String) -> JsResult<JsValue> {
        let entry = StorageJar::browser().read_entry(&key).map_err(report)?;
        match entry {
            Some(entry) => serde_wasm_bindgen::to_value(&entry)
                .map_err(|e| report(StorageJarError::from(e))),
            None => Ok(JsValue::NULL),
        }
    }

    /// Записать значение; `lifetime` в днях, по умолчанию 7
    pub fn write(key: String, value: String, lifetime: Option<f64>) -> JsResult<()> {
        let jar = StorageJar::browser();
        let lifetime = lifetime.unwrap_or(jar.config().default_lifetime_days);
        jar.write_with_lifetime(&key, &value, lifetime)
            .map_err(report)
    }
}

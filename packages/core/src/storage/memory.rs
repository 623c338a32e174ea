// In-memory окружение для тестов и non-WASM платформ.
// Моделирует браузер: localStorage без истечения и cookie с нативным `expires`.

use crate::storage::cookie::{self, CookieAssignment};
use crate::storage::medium::{Backend, CookieMedium, DurableMedium};
use crate::utils::error::{Result, StorageJarError};
use crate::utils::time::{Clock, SystemClock};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory окружение браузера
#[derive(Clone)]
pub struct MemoryBackend {
    items: Rc<RefCell<HashMap<String, String>>>,
    durable_available: Rc<Cell<bool>>,
    quota_bytes: Option<usize>,
    cookies: Rc<RefCell<Vec<CookieAssignment>>>,
    clock: Rc<dyn Clock>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Часы нужны cookie-хранилищу, чтобы скрывать истёкшие cookie
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            items: Rc::new(RefCell::new(HashMap::new())),
            durable_available: Rc::new(Cell::new(true)),
            quota_bytes: None,
            cookies: Rc::new(RefCell::new(Vec::new())),
            clock: Rc::new(clock),
        }
    }

    /// Окружение без localStorage (например, приватный режим старых браузеров)
    pub fn without_durable(self) -> Self {
        self.durable_available.set(false);
        self
    }

    /// Ограничить суммарный размер ключей и значений localStorage (в байтах)
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Включить/выключить localStorage на лету; видно всем клонам
    pub fn set_durable_available(&self, available: bool) {
        self.durable_available.set(available);
    }

    /// Сырое содержимое localStorage, в обход проверки истечения
    pub fn raw_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Положить в localStorage произвольную строку (например, битый JSON)
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    pub fn durable_len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Присваивание cookie в том виде, в каком оно хранится (включая истёкшие)
    pub fn raw_cookie(&self, name: &str) -> Option<CookieAssignment> {
        self.cookies
            .borrow()
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    type Durable = MemoryStorage;
    type Fallback = MemoryCookieJar;

    fn durable(&self) -> Option<MemoryStorage> {
        if !self.durable_available.get() {
            return None;
        }
        Some(MemoryStorage {
            items: Rc::clone(&self.items),
            quota_bytes: self.quota_bytes,
        })
    }

    fn fallback(&self) -> Result<MemoryCookieJar> {
        Ok(MemoryCookieJar {
            cookies: Rc::clone(&self.cookies),
            clock: Rc::clone(&self.clock),
        })
    }
}

/// In-memory аналог localStorage
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl DurableMedium for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.borrow_mut();

        if let Some(quota) = self.quota_bytes {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageJarError::QuotaExceeded(format!(
                    "setting '{}' exceeds {} bytes",
                    key, quota
                )));
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// In-memory аналог `document.cookie`
pub struct MemoryCookieJar {
    cookies: Rc<RefCell<Vec<CookieAssignment>>>,
    clock: Rc<dyn Clock>,
}

impl MemoryCookieJar {
    fn is_live(&self, cookie: &CookieAssignment) -> bool {
        match cookie.expires {
            Some(expires) => self.clock.now_millis() <= expires,
            None => true,
        }
    }
}

impl CookieMedium for MemoryCookieJar {
    fn cookies(&self) -> Result<String> {
        let cookies = self.cookies.borrow();
        let visible: Vec<String> = cookies
            .iter()
            .filter(|c| self.is_live(c))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        Ok(visible.join("; "))
    }

    fn set_cookie(&self, assignment: &str) -> Result<()> {
        let cookie = cookie::parse_assignment(assignment).ok_or_else(|| {
            StorageJarError::Medium(format!("malformed cookie assignment: {}", assignment))
        })?;

        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies
            .iter()
            .position(|c| c.name == cookie.name && c.path == cookie.path);

        // Cookie с истёкшим сроком браузер сразу удаляет
        if !self.is_live(&cookie) {
            if let Some(index) = existing {
                cookies.remove(index);
            }
            return Ok(());
        }

        match existing {
            Some(index) => cookies[index] = cookie,
            None => cookies.push(cookie),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::ManualClock;

    #[test]
    fn test_memory_storage_items() {
        let backend = MemoryBackend::new();
        let storage = backend.durable().unwrap();

        storage.set_item("hello", "world").unwrap();
        assert_eq!(storage.get_item("hello").unwrap().as_deref(), Some("world"));
        assert_eq!(backend.raw_item("hello").as_deref(), Some("world"));

        storage.remove_item("hello").unwrap();
        assert_eq!(storage.get_item("hello").unwrap(), None);
        assert_eq!(backend.durable_len(), 0);
    }

    #[test]
    fn test_durable_availability_toggle() {
        let backend = MemoryBackend::new();
        assert!(backend.durable().is_some());

        let clone = backend.clone();
        clone.set_durable_available(false);
        assert!(backend.durable().is_none());

        assert!(MemoryBackend::new().without_durable().durable().is_none());
    }

    #[test]
    fn test_quota_exceeded() {
        let backend = MemoryBackend::new().with_quota(10);
        let storage = backend.durable().unwrap();

        storage.set_item("k", "12345").unwrap();
        // Перезапись того же ключа учитывает только новое значение
        storage.set_item("k", "123456789").unwrap();

        let err = storage.set_item("other", "12345").unwrap_err();
        assert!(matches!(err, StorageJarError::QuotaExceeded(_)));
        assert_eq!(storage.get_item("other").unwrap(), None);
    }

    #[test]
    fn test_cookie_jar_native_expiry() {
        let clock = ManualClock::new(0);
        let backend = MemoryBackend::with_clock(clock.clone());
        let jar = backend.fallback().unwrap();

        jar.set_cookie("foo = bar; expires=Thu, 01 Jan 1970 00:00:10 GMT; path=/")
            .unwrap();
        jar.set_cookie("theme=dark").unwrap();
        assert_eq!(jar.cookies().unwrap(), "foo=bar; theme=dark");

        clock.set(10_000);
        assert_eq!(jar.cookies().unwrap(), "foo=bar; theme=dark");

        clock.set(10_001);
        assert_eq!(jar.cookies().unwrap(), "theme=dark");
    }

    #[test]
    fn test_cookie_jar_overwrite_and_expired_assignment() {
        let clock = ManualClock::new(5_000);
        let backend = MemoryBackend::with_clock(clock);
        let jar = backend.fallback().unwrap();

        jar.set_cookie("foo=one; path=/").unwrap();
        jar.set_cookie("foo=two; path=/").unwrap();
        assert_eq!(jar.cookies().unwrap(), "foo=two");

        jar.set_cookie("foo=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/")
            .unwrap();
        assert_eq!(jar.cookies().unwrap(), "");
        assert!(backend.raw_cookie("foo").is_none());
    }

    #[test]
    fn test_cookie_jar_rejects_malformed_assignment() {
        let jar = MemoryBackend::new().fallback().unwrap();
        assert!(matches!(
            jar.set_cookie("garbage"),
            Err(StorageJarError::Medium(_))
        ));
    }
}

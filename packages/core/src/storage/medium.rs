//! Абстракция носителей хранилища.
//!
//! Браузер предоставляет два носителя: долговечный (localStorage) и
//! запасной (cookie). `Backend` отдаёт их по запросу, а доступность
//! долговечного носителя проверяется при каждой операции.

use crate::utils::error::Result;

/// Долговечный носитель: ключ -> строка, без собственного истечения
pub trait DurableMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Запасной носитель с семантикой `document.cookie`
pub trait CookieMedium {
    /// Текущий список cookie: `a=1; b=2`
    fn cookies(&self) -> Result<String>;

    /// Присваивание вида `key = value; expires=...; path=/`
    fn set_cookie(&self, assignment: &str) -> Result<()>;
}

/// Окружение, из которого берутся носители
pub trait Backend {
    type Durable: DurableMedium;
    type Fallback: CookieMedium;

    /// `None`, если долговечный носитель сейчас недоступен
    fn durable(&self) -> Option<Self::Durable>;

    fn fallback(&self) -> Result<Self::Fallback>;
}

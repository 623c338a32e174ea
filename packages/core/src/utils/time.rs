//! Время жизни записей: часы и вычисление момента истечения.
//!
//! Все моменты времени - миллисекунды с начала эпохи (как `Date.now()` в JS).

use std::cell::Cell;
use std::rc::Rc;

pub const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Источник текущего времени (wall-clock, мс с эпохи)
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Системные часы: `Date.now()` в браузере, `chrono::Utc` нативно
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Часы с ручным управлением для тестов.
///
/// Клоны разделяют одно и то же значение, поэтому один экземпляр можно
/// отдать в `StorageJar`, а другой - в `MemoryBackend`.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_millis)),
        }
    }

    pub fn set(&self, now_millis: i64) {
        self.now.set(now_millis);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn advance_days(&self, days: f64) {
        self.advance(days_to_millis(days));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// Перевести количество дней в миллисекунды (дробные и отрицательные дни допустимы).
///
/// Значения за пределами `i64` (включая бесконечности) насыщаются до
/// `i64::MAX` / `i64::MIN`. `NaN` сюда попадать не должен: `StorageJar` отклоняет его раньше.
pub fn days_to_millis(days: f64) -> i64 {
    (days * MILLIS_PER_DAY).round() as i64
}

/// Абсолютный момент истечения: сейчас + `days`, с насыщением
pub fn expiry_from_now<C: Clock + ?Sized>(clock: &C, days: f64) -> i64 {
    clock.now_millis().saturating_add(days_to_millis(days))
}

/// Запись действительна, пока текущее время не превысило `timestamp`
pub fn is_timestamp_valid<C: Clock + ?Sized>(clock: &C, timestamp: i64) -> bool {
    clock.now_millis() <= timestamp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_to_millis() {
        assert_eq!(days_to_millis(1.0), 86_400_000);
        assert_eq!(days_to_millis(7.0), 604_800_000);
        assert_eq!(days_to_millis(0.5), 43_200_000);
        assert_eq!(days_to_millis(-1.0), -86_400_000);
        assert_eq!(days_to_millis(0.0), 0);
    }

    #[test]
    fn test_days_to_millis_saturates() {
        assert_eq!(days_to_millis(1e17), i64::MAX);
        assert_eq!(days_to_millis(f64::INFINITY), i64::MAX);
        assert_eq!(days_to_millis(-1e17), i64::MIN);
        assert_eq!(days_to_millis(f64::NEG_INFINITY), i64::MIN);
    }

    #[test]
    fn test_expiry_from_now_saturates() {
        let clock = ManualClock::new(1_792_411_200_000);
        assert_eq!(expiry_from_now(&clock, 1e17), i64::MAX);
        assert_eq!(expiry_from_now(&clock, f64::INFINITY), i64::MAX);
        assert_eq!(expiry_from_now(&clock, f64::NEG_INFINITY), i64::MIN);
    }

    #[test]
    fn test_expiry_from_now() {
        let clock = ManualClock::new(1_000);
        assert_eq!(expiry_from_now(&clock, 1.0), 86_401_000);
        assert_eq!(expiry_from_now(&clock, 0.0), 1_000);
    }

    #[test]
    fn test_timestamp_validity_boundary() {
        let clock = ManualClock::new(5_000);
        assert!(is_timestamp_valid(&clock, 5_000));
        assert!(is_timestamp_valid(&clock, 5_001));

        clock.advance(1);
        assert!(!is_timestamp_valid(&clock, 5_000));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(0);
        let shared = clock.clone();

        clock.advance_days(1.0);
        assert_eq!(shared.now_millis(), 86_400_000);

        shared.set(42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}

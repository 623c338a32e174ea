//! Кодек строк `document.cookie`.
//!
//! Запись: `key = value; expires=Mon, 19 Oct 2026 12:00:00 GMT; path=/`.
//! Чтение: список `a=1; b=2`, в котором ищется первая пара с нужным ключом.

use crate::utils::error::{Result, StorageJarError};
use chrono::{DateTime, NaiveDateTime};

/// Формат даты атрибута `expires` (как `Date.prototype.toGMTString`)
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Fri, 31 Dec 9999 23:59:59 GMT - последняя дата с четырёхзначным годом
pub const MAX_EXPIRES_MILLIS: i64 = 253_402_300_799_000;

/// Разобранное присваивание cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAssignment {
    pub name: String,
    pub value: String,
    /// Момент истечения, мс с эпохи (точность - секунда)
    pub expires: Option<i64>,
    pub path: Option<String>,
}

/// Имя cookie не может быть пустым и не может содержать `=`, `;` или пробелы по краям
pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(StorageJarError::InvalidKey("cookie name is empty".to_string()));
    }
    if key.contains('=') || key.contains(';') {
        return Err(StorageJarError::InvalidKey(format!(
            "cookie name {:?} contains '=' or ';'",
            key
        )));
    }
    if key.trim() != key {
        return Err(StorageJarError::InvalidKey(format!(
            "cookie name {:?} has surrounding whitespace",
            key
        )));
    }
    Ok(())
}

/// `;` в значении обрезал бы его и превратил остаток в атрибуты
pub fn validate_value(value: &str) -> Result<()> {
    if value.contains(';') {
        return Err(StorageJarError::InvalidValue(
            "cookie value contains ';'".to_string(),
        ));
    }
    Ok(())
}

/// Дата для `expires`. Момент зажимается в [эпоха, 9999 год]: cookie с
/// любым сроком жизни остаётся записываемым, как и в JS.
pub fn format_expires(expires_millis: i64) -> String {
    let clamped = expires_millis.clamp(0, MAX_EXPIRES_MILLIS);
    match DateTime::from_timestamp_millis(clamped) {
        Some(date) => date.format(EXPIRES_FORMAT).to_string(),
        None => "Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
    }
}

pub fn parse_expires(raw: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(raw.trim(), EXPIRES_FORMAT)
        .ok()
        .map(|date| date.and_utc().timestamp_millis())
}

/// Собрать строку для присваивания `document.cookie`
pub fn format_assignment(key: &str, value: &str, expires_millis: i64, path: &str) -> Result<String> {
    validate_key(key)?;
    validate_value(value)?;

    Ok(format!(
        "{} = {}; expires={}; path={}",
        key,
        value,
        format_expires(expires_millis),
        path
    ))
}

/// Разобрать присваивание так же, как это делает браузер: пробелы вокруг `=` отбрасываются
pub fn parse_assignment(assignment: &str) -> Option<CookieAssignment> {
    let mut parts = assignment.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut cookie = CookieAssignment {
        name: name.to_string(),
        value: value.trim().to_string(),
        expires: None,
        path: None,
    };

    for attribute in parts {
        let Some((attr_name, attr_value)) = attribute.split_once('=') else {
            continue;
        };
        match attr_name.trim().to_ascii_lowercase().as_str() {
            "expires" => cookie.expires = parse_expires(attr_value),
            "path" => cookie.path = Some(attr_value.trim().to_string()),
            _ => {}
        }
    }

    Some(cookie)
}

/// Найти значение cookie `key` в списке `a=1; b=2`
pub fn find_cookie<'a>(cookies: &'a str, key: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .map(|cookie| cookie.trim_start_matches(' '))
        .find_map(|cookie| cookie.strip_prefix(key)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expires_gmt() {
        // 2026-10-19T12:00:00Z
        let formatted = format_expires(1_792_411_200_000);
        assert_eq!(formatted, "Mon, 19 Oct 2026 12:00:00 GMT");
        assert_eq!(parse_expires(&formatted), Some(1_792_411_200_000));
    }

    #[test]
    fn test_parse_expires_truncates_to_seconds() {
        let formatted = format_expires(1_792_411_200_999);
        assert_eq!(parse_expires(&formatted), Some(1_792_411_200_000));
        assert_eq!(parse_expires("yesterday"), None);
    }

    #[test]
    fn test_format_expires_clamps_out_of_range() {
        assert_eq!(format_expires(i64::MAX), "Fri, 31 Dec 9999 23:59:59 GMT");
        assert_eq!(format_expires(8_641_792_411_200_000), "Fri, 31 Dec 9999 23:59:59 GMT");
        assert_eq!(parse_expires(&format_expires(i64::MAX)), Some(MAX_EXPIRES_MILLIS));
        assert_eq!(format_expires(i64::MIN), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn test_format_assignment() {
        let assignment = format_assignment("foo", "bar", 0, "/").unwrap();
        assert_eq!(
            assignment,
            "foo = bar; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/"
        );
    }

    #[test]
    fn test_format_assignment_rejects_bad_names() {
        assert!(matches!(
            format_assignment("", "v", 0, "/"),
            Err(StorageJarError::InvalidKey(_))
        ));
        assert!(matches!(
            format_assignment("a=b", "v", 0, "/"),
            Err(StorageJarError::InvalidKey(_))
        ));
        assert!(matches!(
            format_assignment(" a", "v", 0, "/"),
            Err(StorageJarError::InvalidKey(_))
        ));
        assert!(matches!(
            format_assignment("a", "x;y", 0, "/"),
            Err(StorageJarError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_parse_assignment() {
        let cookie =
            parse_assignment("foo = bar; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/").unwrap();
        assert_eq!(cookie.name, "foo");
        assert_eq!(cookie.value, "bar");
        assert_eq!(cookie.expires, Some(1_000));
        assert_eq!(cookie.path.as_deref(), Some("/"));

        let session = parse_assignment("token=").unwrap();
        assert_eq!(session.value, "");
        assert_eq!(session.expires, None);

        assert!(parse_assignment("no-equals-sign").is_none());
        assert!(parse_assignment(" = value").is_none());
    }

    #[test]
    fn test_find_cookie() {
        let cookies = "theme=dark; foo=bar; foobar=baz";
        assert_eq!(find_cookie(cookies, "foo"), Some("bar"));
        assert_eq!(find_cookie(cookies, "foobar"), Some("baz"));
        assert_eq!(find_cookie(cookies, "theme"), Some("dark"));
        assert_eq!(find_cookie(cookies, "fo"), None);
        assert_eq!(find_cookie("", "foo"), None);
    }

    #[test]
    fn test_find_cookie_keeps_equals_in_value() {
        assert_eq!(find_cookie("jwt=a.b=c", "jwt"), Some("a.b=c"));
    }
}

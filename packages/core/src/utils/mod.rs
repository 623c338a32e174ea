// Вспомогательные модули: ошибки и время

pub mod error;
pub mod time;

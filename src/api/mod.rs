//! Внешний API движка раздачи.
//!
//! - команды (commands.rs) – всё, что меняет состояние (действие, принудительный фолд);
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – снимки для фронта с учётом того, кто смотрит;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;

// Utils compartidos

pub mod constants;
pub mod error_handler;
pub mod i18n;
pub mod storage;
pub mod validation;

//! # KTP Calc
//!
//! Расчётное ядро конфигуратора: подбор калькуляций, разбивка
//! себестоимости, свод стоимости по ячейкам и группам

pub mod aggregate;
pub mod matcher;
pub mod rollup;

// Re-export основных типов
pub use aggregate::{CellQuote, GroupQuote, KindQuote, QuoteCalculator};
pub use matcher::{CellMatcher, CellType, MatchResult};
pub use rollup::{CostCalculator, DEFAULT_MANUFACTURING_HOURS};

/// Предупреждение подбора
///
/// Несовпадение — не ошибка (вклад роли просто нулевой), но о
/// деградированном подборе по типу стоит сообщить оператору.
#[derive(Debug, Clone)]
pub struct MatchWarning {
    /// Роль, по которой подбор деградировал
    pub kind: ktp_core::MaterialKind,

    pub message: String,
}

impl MatchWarning {
    pub fn new(kind: ktp_core::MaterialKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

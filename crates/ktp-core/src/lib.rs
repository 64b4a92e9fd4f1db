//! # KTP Core
//!
//! Базовые модели данных конфигуратора КТП и типы ошибок

pub mod breakdown;
pub mod calculation;
pub mod cell;
pub mod material;
pub mod settings;

// Re-export основных типов
pub use breakdown::CostBreakdown;
pub use calculation::{
    BomCategory, BomItem, CalculationData, CalculationRecord, CellConfig, CellConfigType,
    ManufacturingParams, MaterialRef,
};
pub use cell::{Cell, CellPurpose, MaterialSelection};
pub use material::{Material, MaterialKind, PriceSource};
pub use settings::{AreaPriceRange, BmzSettings, CellUsage, EquipmentPrice, SwitchgearConfiguration};

/// Ошибки конфигуратора
#[derive(Debug, thiserror::Error)]
pub enum KtpError {
    #[error("токен авторизации отсутствует в хранилище")]
    MissingAuthToken,

    #[error("ошибка запроса к каталогу: {0}")]
    CatalogTransport(String),

    #[error("ошибка разбора ответа каталога: {0}")]
    CatalogDecode(#[from] serde_json::Error),

    #[error("группа калькуляций не найдена: {0}")]
    GroupNotFound(String),

    #[error("количество ячеек должно быть не меньше 1")]
    InvalidQuantity,

    #[error("некорректный диапазон площадей: {0}..{1}")]
    InvalidRange(rust_decimal::Decimal, rust_decimal::Decimal),

    #[error("диапазоны площадей пересекаются: {0}..{1} и {2}..{3}")]
    OverlappingRanges(
        rust_decimal::Decimal,
        rust_decimal::Decimal,
        rust_decimal::Decimal,
        rust_decimal::Decimal,
    ),

    #[error("не заполнено обязательное поле: {0}")]
    MissingField(&'static str),

    #[error("прочая ошибка: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KtpError>;

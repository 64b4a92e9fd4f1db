//! # KTP Catalog
//!
//! Доступ к удалённым каталогам: материалы, калькуляции, справочники.
//! Нормализация форм данных происходит здесь, на границе разбора;
//! расчётный слой получает уже канонические структуры.

pub mod calculation_catalog;
pub mod material_catalog;
pub mod source;

// Re-export основных типов
pub use calculation_catalog::CalculationCatalog;
pub use material_catalog::MaterialCatalog;
pub use source::{CalculationGroup, CatalogSource, JsonCatalogSource};

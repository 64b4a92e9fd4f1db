//! # KTP
//!
//! Конфигуратор комплектных трансформаторных подстанций: каталоги
//! материалов и калькуляций, подбор калькуляций по выбору ячейки,
//! десятишаговая разбивка себестоимости и свод стоимости по группам.

pub use ktp_calc as calc;
pub use ktp_catalog as catalog;
pub use ktp_core as core;
pub use ktp_store as store;

pub use ktp_calc::{CellMatcher, CostCalculator, QuoteCalculator};
pub use ktp_catalog::{CalculationCatalog, CatalogSource, JsonCatalogSource, MaterialCatalog};
pub use ktp_core::{Cell, CellPurpose, CostBreakdown, KtpError, MaterialKind, Result};
pub use ktp_store::{ConfigurationStore, EquipmentType, InMemoryStorage, UiSession};

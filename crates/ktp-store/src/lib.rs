//! # KTP Store
//!
//! Клиентское состояние сеанса: ячейки по видам оборудования,
//! глобальные значения по умолчанию, настройки интерфейса

pub mod persistence;
pub mod session;

// Re-export основных типов
pub use persistence::{InMemoryStorage, KeyValueStorage, UiSession};
pub use session::{
    ConfigurationStore, EquipmentType, GlobalDefaults, NewCalculationForm,
    NEW_RECORD_MANUFACTURING_HOURS,
};

//! Материалы каталога и роли компонентов

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Материал из удалённого каталога
///
/// Владелец данных — API склада; конфигуратор их не изменяет.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Идентификатор в каталоге
    pub id: String,

    /// Наименование (часто содержит номинальный ток, напр. "ВА-99 630А")
    pub name: String,

    /// Цена; API присылает то число, то строку
    #[serde(with = "price_serde")]
    pub price: Decimal,

    /// Единица измерения ("шт" и т.п.)
    #[serde(default)]
    pub unit: Option<String>,

    /// Ссылка на категорию каталога (для фильтрации)
    #[serde(default)]
    pub category: Option<String>,
}

/// Роль компонента в ячейке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Выключатель
    Breaker,
    /// Релейная защита и автоматика
    Rza,
    /// Прибор учёта (ПУ)
    Meter,
    /// Разъединитель (СР)
    Disconnector,
    /// Трансформатор собственных нужд
    Tsn,
    /// Трансформатор напряжения
    Tn,
    /// Силовой трансформатор
    Transformer,
    /// Трансформатор тока
    TransformerCurrent,
    /// Трансформатор напряжения (измерительный, поле ячейки)
    TransformerVoltage,
    /// Трансформатор мощности (поле ячейки)
    TransformerPower,
}

impl MaterialKind {
    /// Роли, участвующие в подборе калькуляций
    pub const MATCHABLE: [MaterialKind; 6] = [
        MaterialKind::Breaker,
        MaterialKind::Rza,
        MaterialKind::Meter,
        MaterialKind::Disconnector,
        MaterialKind::Tsn,
        MaterialKind::Tn,
    ];

    /// Канонический тег `cellConfig.type` для резервного подбора по типу
    ///
    /// Теговый подбор существует только для четырёх ролей;
    /// выключатель и РЗА подбираются исключительно по id.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            MaterialKind::Meter => Some("pu"),
            MaterialKind::Disconnector => Some("disconnector"),
            MaterialKind::Tsn => Some("tsn"),
            MaterialKind::Tn => Some("tn"),
            _ => None,
        }
    }

    /// Ключ роли в индексе `cellConfig.materials`
    pub fn index_key(&self) -> Option<&'static str> {
        match self {
            MaterialKind::Breaker => Some("switch"),
            MaterialKind::Rza => Some("rza"),
            MaterialKind::Meter => Some("counter"),
            MaterialKind::Disconnector => Some("sr"),
            MaterialKind::Tsn => Some("tsn"),
            MaterialKind::Tn => Some("tn"),
            _ => None,
        }
    }
}

/// Источник цен материалов по роли и идентификатору
///
/// Реализуется каталогом материалов; расчётный слой знает только
/// этот интерфейс.
pub trait PriceSource {
    /// Цена выбранного материала; None — материал не найден в каталоге
    fn price_of(&self, kind: MaterialKind, id: &str) -> Option<Decimal>;
}

/// Цена на проводе: число либо строка ("12 500.50" не встречается,
/// но "12500.50" — регулярно). Нормализуем к Decimal на границе разбора.
pub mod price_serde {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(Decimal),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(d) => Ok(d),
            NumberOrString::String(s) => {
                Decimal::from_str(s.trim()).map_err(serde::de::Error::custom)
            }
        }
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(value, serializer)
    }
}

//! Справочники настроек: конфигурации РУ и параметры БМЗ

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{KtpError, Result};

/// Строка таблицы применяемости: ячейка и её количество
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellUsage {
    pub cell_name: String,

    pub quantity: u32,
}

/// Конфигурация РУ (админский справочник)
///
/// Отображает {тип, выключатель, ток, группа, шинный мост} на таблицу
/// применяемости ячеек. Не участвует в расчёте стоимости.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchgearConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub config_type: String,

    pub breaker: String,

    pub amperage: String,

    pub group: String,

    pub busbar: String,

    #[serde(default)]
    pub cells: Vec<CellUsage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SwitchgearConfiguration {
    /// Проверка перед отправкой формы
    pub fn validate(&self) -> Result<()> {
        if self.config_type.is_empty() {
            return Err(KtpError::MissingField("type"));
        }
        if self.breaker.is_empty() {
            return Err(KtpError::MissingField("breaker"));
        }
        if self.group.is_empty() {
            return Err(KtpError::MissingField("group"));
        }
        Ok(())
    }
}

/// Ценовой диапазон по площади БМЗ
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPriceRange {
    /// Нижняя граница площади, м², включительно
    #[serde(with = "crate::material::price_serde")]
    pub from: Decimal,

    /// Верхняя граница площади, м², включительно
    #[serde(with = "crate::material::price_serde")]
    pub to: Decimal,

    /// Цена квадратного метра в диапазоне
    #[serde(with = "crate::material::price_serde")]
    pub price: Decimal,
}

impl AreaPriceRange {
    fn overlaps(&self, other: &AreaPriceRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }
}

/// Позиция прайс-листа оборудования БМЗ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentPrice {
    pub name: String,

    #[serde(with = "crate::material::price_serde")]
    pub price: Decimal,
}

/// Настройки БМЗ: диапазоны цен по площади + прайс-лист оборудования
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmzSettings {
    #[serde(default)]
    pub area_ranges: Vec<AreaPriceRange>,

    #[serde(default)]
    pub equipment: Vec<EquipmentPrice>,
}

impl BmzSettings {
    /// Проверка формы: диапазоны не должны пересекаться,
    /// границы должны быть упорядочены
    pub fn validate(&self) -> Result<()> {
        for range in &self.area_ranges {
            if range.from > range.to {
                return Err(KtpError::InvalidRange(range.from, range.to));
            }
        }

        for (i, a) in self.area_ranges.iter().enumerate() {
            for b in self.area_ranges.iter().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(KtpError::OverlappingRanges(a.from, a.to, b.from, b.to));
                }
            }
        }

        Ok(())
    }

    /// Цена квадратного метра для данной площади
    pub fn price_for_area(&self, area: Decimal) -> Option<Decimal> {
        self.area_ranges
            .iter()
            .find(|r| r.from <= area && area <= r.to)
            .map(|r| r.price)
    }
}

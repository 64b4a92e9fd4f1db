//! Калькуляции — типовые сметы с параметрами производства

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::material::MaterialKind;

/// Калькуляция: смета по категориям + производственные параметры
///
/// Владелец — удалённый API; записи сгруппированы по slug группы
/// (класс напряжения / семейство РУ).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: String,

    pub name: String,

    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    pub data: CalculationData,
}

impl CalculationRecord {
    /// Сумма материалов сметы: Σ цена × количество по всем категориям
    pub fn materials_total(&self) -> Decimal {
        self.data
            .categories
            .iter()
            .flat_map(|c| c.items.iter())
            .map(|item| item.price * item.quantity)
            .sum()
    }

    /// Содержит ли индекс калькуляции материал с данным id для роли
    pub fn references_material(&self, kind: MaterialKind, id: &str) -> bool {
        self.data
            .cell_config
            .as_ref()
            .map(|cfg| cfg.materials.refs(kind).iter().any(|m| m.id == id))
            .unwrap_or(false)
    }

    /// Совпадает ли тег типа ячейки
    pub fn has_type_tag(&self, tag: &str) -> bool {
        self.data
            .cell_config
            .as_ref()
            .map(|cfg| cfg.cell_type.as_tag() == Some(tag))
            .unwrap_or(false)
    }
}

/// Содержимое калькуляции
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationData {
    /// Смета, разбитая по категориям
    #[serde(default)]
    pub categories: Vec<BomCategory>,

    /// Производственные параметры
    pub calculation: ManufacturingParams,

    /// Индекс применимости (по какому выбору ячейки подходит запись)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_config: Option<CellConfig>,
}

/// Категория сметы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomCategory {
    pub name: String,

    #[serde(default)]
    pub items: Vec<BomItem>,
}

/// Позиция сметы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomItem {
    pub name: String,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(with = "crate::material::price_serde")]
    pub price: Decimal,

    #[serde(with = "crate::material::price_serde")]
    pub quantity: Decimal,
}

/// Производственные параметры калькуляции
///
/// Проценты — целые числа, трактуемые как "/100".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingParams {
    /// Нормо-часы изготовления; может отсутствовать в старых записях
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturing_hours: Option<Decimal>,

    /// Ставка нормо-часа
    #[serde(default)]
    pub hourly_rate: Decimal,

    /// Общепроизводственные расходы, %
    #[serde(default)]
    pub overhead_percentage: Decimal,

    /// Административные расходы, %
    #[serde(default)]
    pub admin_percentage: Decimal,

    /// Плановая прибыль, %
    #[serde(default)]
    pub planned_profit_percentage: Decimal,

    /// НДС, %
    #[serde(default)]
    pub nds_percentage: Decimal,
}

/// Тег типа ячейки в `cellConfig.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellConfigType {
    #[serde(rename = "breaker")]
    Breaker,
    #[serde(rename = "pu")]
    Pu,
    #[serde(rename = "disconnector")]
    Disconnector,
    #[serde(rename = "tsn")]
    Tsn,
    #[serde(rename = "tn")]
    Tn,
    /// Неизвестный тег — запись не участвует в теговом подборе
    #[serde(other)]
    Unknown,
}

impl CellConfigType {
    pub fn as_tag(&self) -> Option<&'static str> {
        match self {
            CellConfigType::Breaker => Some("breaker"),
            CellConfigType::Pu => Some("pu"),
            CellConfigType::Disconnector => Some("disconnector"),
            CellConfigType::Tsn => Some("tsn"),
            CellConfigType::Tn => Some("tn"),
            CellConfigType::Unknown => None,
        }
    }
}

/// Индекс применимости калькуляции
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellConfig {
    #[serde(rename = "type")]
    pub cell_type: CellConfigType,

    #[serde(default)]
    pub materials: MaterialIndex,
}

/// Ссылка на материал внутри индекса; значим только id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRef {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Индекс материалов по ролям
///
/// В данных поле роли — то одиночный объект, то массив; при разборе
/// всё нормализуется к массиву, и подбор никогда не ветвится по форме.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialIndex {
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub switch: Vec<MaterialRef>,

    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub rza: Vec<MaterialRef>,

    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub counter: Vec<MaterialRef>,

    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub sr: Vec<MaterialRef>,

    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub tsn: Vec<MaterialRef>,

    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub tn: Vec<MaterialRef>,
}

impl MaterialIndex {
    /// Ссылки индекса для роли; роли вне индекса дают пустой срез
    pub fn refs(&self, kind: MaterialKind) -> &[MaterialRef] {
        match kind {
            MaterialKind::Breaker => &self.switch,
            MaterialKind::Rza => &self.rza,
            MaterialKind::Meter => &self.counter,
            MaterialKind::Disconnector => &self.sr,
            MaterialKind::Tsn => &self.tsn,
            MaterialKind::Tn => &self.tn,
            _ => &[],
        }
    }
}

/// Одиночный объект или массив → всегда массив
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<MaterialRef>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(MaterialRef),
        Many(Vec<MaterialRef>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(single) => vec![single],
        OneOrMany::Many(list) => list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record_json() -> &'static str {
        r#"{
            "id": "calc-1",
            "name": "Ячейка ввода 10 кВ",
            "slug": "ksо-2101",
            "data": {
                "categories": [
                    {
                        "name": "Металл",
                        "items": [
                            {"name": "Лист 2мм", "unit": "кг", "price": "150", "quantity": 40},
                            {"name": "Уголок", "unit": "кг", "price": 120, "quantity": "10"}
                        ]
                    },
                    {
                        "name": "Монтаж",
                        "items": [
                            {"name": "Шина АД31Т", "unit": "м", "price": 800, "quantity": 5}
                        ]
                    }
                ],
                "calculation": {
                    "manufacturingHours": 12,
                    "hourlyRate": 1000,
                    "overheadPercentage": 15,
                    "adminPercentage": 10,
                    "plannedProfitPercentage": 20,
                    "ndsPercentage": 12
                },
                "cellConfig": {
                    "type": "breaker",
                    "materials": {
                        "switch": {"id": "42", "name": "ВА-99 630А"},
                        "rza": [{"id": "77"}, {"id": "78"}]
                    }
                }
            }
        }"#
    }

    #[test]
    fn test_decode_record() {
        let record: CalculationRecord = serde_json::from_str(record_json()).unwrap();

        assert_eq!(record.id, "calc-1");
        assert_eq!(record.data.categories.len(), 2);
        assert_eq!(
            record.data.calculation.manufacturing_hours,
            Some(Decimal::from(12))
        );
    }

    #[test]
    fn test_materials_total() {
        let record: CalculationRecord = serde_json::from_str(record_json()).unwrap();

        // 150*40 + 120*10 + 800*5 = 6000 + 1200 + 4000
        assert_eq!(record.materials_total(), Decimal::from(11200));
    }

    #[test]
    fn test_single_object_normalized_to_array() {
        let record: CalculationRecord = serde_json::from_str(record_json()).unwrap();
        let cfg = record.data.cell_config.as_ref().unwrap();

        assert_eq!(cfg.materials.switch.len(), 1);
        assert_eq!(cfg.materials.rza.len(), 2);
        assert!(cfg.materials.sr.is_empty());
    }

    #[test]
    fn test_references_material() {
        let record: CalculationRecord = serde_json::from_str(record_json()).unwrap();

        assert!(record.references_material(MaterialKind::Breaker, "42"));
        assert!(record.references_material(MaterialKind::Rza, "78"));
        assert!(!record.references_material(MaterialKind::Breaker, "43"));
        assert!(!record.references_material(MaterialKind::Meter, "42"));
    }

    #[test]
    fn test_unknown_type_tag() {
        let json = r#"{"type": "что-то новое", "materials": {}}"#;
        let cfg: CellConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.cell_type, CellConfigType::Unknown);
        assert_eq!(cfg.cell_type.as_tag(), None);
    }

    #[test]
    fn test_missing_manufacturing_hours() {
        let json = r#"{"hourlyRate": 900, "ndsPercentage": 12}"#;
        let params: ManufacturingParams = serde_json::from_str(json).unwrap();

        assert_eq!(params.manufacturing_hours, None);
        assert_eq!(params.hourly_rate, Decimal::from(900));
        assert_eq!(params.overhead_percentage, Decimal::ZERO);
    }
}

//! Ячейка конфигурации и её назначения

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::material::MaterialKind;

/// Назначение ячейки — закрытый набор ролей
///
/// В данных встречается написание "Секционный разьединитель" (через ь);
/// при разборе принимаются оба варианта, сериализуется корректное.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellPurpose {
    /// Вводная ячейка
    #[serde(rename = "Ввод")]
    Input,

    /// Секционный выключатель
    #[serde(rename = "СВ", alias = "Секционный выключатель")]
    SectionSwitch,

    /// Секционный разъединитель
    #[serde(rename = "Секционный разъединитель", alias = "Секционный разьединитель")]
    SectionDisconnector,

    /// Отходящая линия
    #[serde(rename = "Отходящая")]
    Outgoing,

    /// Трансформаторная ячейка
    #[serde(rename = "Трансформаторная")]
    TransformerCell,

    /// Трансформатор напряжения
    #[serde(rename = "Трансформатор напряжения")]
    VoltageTransformer,

    /// Трансформатор собственных нужд
    #[serde(rename = "Трансформатор собственных нужд")]
    AuxiliaryTransformer,

    /// Ввод 0,4 кВ (РУНН)
    #[serde(rename = "Ввод 0,4 кВ")]
    LvInput,

    /// Отходящая 0,4 кВ (РУНН)
    #[serde(rename = "Отходящая 0,4 кВ")]
    LvOutgoing,

    /// Секционный автомат (РУНН)
    #[serde(rename = "Секционный автомат")]
    LvSectionBreaker,

    /// АВР (РУНН)
    #[serde(rename = "АВР")]
    Avr,
}

impl CellPurpose {
    /// Роли материалов, применимые к данному назначению
    ///
    /// Таблица фиксированная: форма никогда не заполняет у ячейки
    /// поля вне этого списка.
    pub fn applicable_kinds(&self) -> &'static [MaterialKind] {
        match self {
            CellPurpose::Input | CellPurpose::Outgoing => &[
                MaterialKind::Breaker,
                MaterialKind::Rza,
                MaterialKind::Meter,
                MaterialKind::TransformerCurrent,
            ],
            CellPurpose::SectionSwitch => &[
                MaterialKind::Breaker,
                MaterialKind::Rza,
                MaterialKind::TransformerCurrent,
            ],
            CellPurpose::SectionDisconnector => &[MaterialKind::Disconnector],
            CellPurpose::TransformerCell => &[
                MaterialKind::Breaker,
                MaterialKind::Rza,
                MaterialKind::Transformer,
                MaterialKind::TransformerCurrent,
            ],
            CellPurpose::VoltageTransformer => {
                &[MaterialKind::Tn, MaterialKind::TransformerVoltage]
            }
            CellPurpose::AuxiliaryTransformer => {
                &[MaterialKind::Tsn, MaterialKind::TransformerPower]
            }
            CellPurpose::LvInput => &[MaterialKind::Breaker, MaterialKind::Meter],
            CellPurpose::LvOutgoing | CellPurpose::LvSectionBreaker => &[MaterialKind::Breaker],
            CellPurpose::Avr => &[MaterialKind::Breaker, MaterialKind::Rza],
        }
    }

    /// Человекочитаемая подпись назначения
    pub fn label(&self) -> &'static str {
        match self {
            CellPurpose::Input => "Ввод",
            CellPurpose::SectionSwitch => "СВ",
            CellPurpose::SectionDisconnector => "Секционный разъединитель",
            CellPurpose::Outgoing => "Отходящая",
            CellPurpose::TransformerCell => "Трансформаторная",
            CellPurpose::VoltageTransformer => "Трансформатор напряжения",
            CellPurpose::AuxiliaryTransformer => "Трансформатор собственных нужд",
            CellPurpose::LvInput => "Ввод 0,4 кВ",
            CellPurpose::LvOutgoing => "Отходящая 0,4 кВ",
            CellPurpose::LvSectionBreaker => "Секционный автомат",
            CellPurpose::Avr => "АВР",
        }
    }
}

/// Выбранный материал — кортеж, замороженный в момент выбора
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSelection {
    /// Идентификатор материала в каталоге
    pub id: String,

    /// Наименование на момент выбора
    pub name: String,

    /// Цена на момент выбора
    #[serde(with = "crate::material::price_serde")]
    pub price: Decimal,
}

impl MaterialSelection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Ячейка конфигурации
///
/// Живёт в пределах сеанса: создаётся при включении назначения,
/// правится на месте, уничтожается при удалении или сбросе.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Идентификатор (генерируется на клиенте, стабилен в сеансе)
    pub id: Uuid,

    /// Назначение ячейки
    pub purpose: CellPurpose,

    /// Количество одинаковых ячеек, всегда >= 1
    pub quantity: u32,

    /// Выбранные материалы по ролям
    pub selections: HashMap<MaterialKind, MaterialSelection>,
}

impl Cell {
    /// Создать ячейку с количеством 1 и без выбранных материалов
    pub fn new(purpose: CellPurpose) -> Self {
        Self {
            id: Uuid::new_v4(),
            purpose,
            quantity: 1,
            selections: HashMap::new(),
        }
    }

    /// Построитель: задать количество (минимум 1)
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Построитель: выбрать материал для роли
    pub fn with_selection(mut self, kind: MaterialKind, selection: MaterialSelection) -> Self {
        self.selections.insert(kind, selection);
        self
    }

    /// Выбор по роли
    pub fn selection(&self, kind: MaterialKind) -> Option<&MaterialSelection> {
        self.selections.get(&kind)
    }

    /// Идентификатор выбранного материала по роли
    pub fn selected_id(&self, kind: MaterialKind) -> Option<&str> {
        self.selections.get(&kind).map(|s| s.id.as_str())
    }

    /// Есть ли хоть один выбранный материал
    pub fn has_any_selection(&self) -> bool {
        !self.selections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[test]
    fn test_new_cell_defaults() {
        let cell = Cell::new(CellPurpose::Input);

        assert_eq!(cell.quantity, 1);
        assert!(!cell.has_any_selection());
    }

    #[test]
    fn test_quantity_clamped_to_one() {
        let cell = Cell::new(CellPurpose::Outgoing).with_quantity(0);

        assert_eq!(cell.quantity, 1);
    }

    #[test]
    fn test_selection_roundtrip() {
        let cell = Cell::new(CellPurpose::Input).with_selection(
            MaterialKind::Breaker,
            MaterialSelection::new("42", "ВА-99 630А", Decimal::from(125000)),
        );

        assert_eq!(cell.selected_id(MaterialKind::Breaker), Some("42"));
        assert_eq!(cell.selected_id(MaterialKind::Rza), None);
        assert!(cell.has_any_selection());
    }

    #[rstest]
    #[case("\"Секционный разъединитель\"")]
    #[case("\"Секционный разьединитель\"")]
    fn test_disconnector_purpose_both_spellings(#[case] json: &str) {
        let purpose: CellPurpose = serde_json::from_str(json).unwrap();

        assert_eq!(purpose, CellPurpose::SectionDisconnector);
        // сериализация всегда даёт корректное написание
        assert_eq!(
            serde_json::to_string(&purpose).unwrap(),
            "\"Секционный разъединитель\""
        );
    }

    #[rstest]
    #[case(CellPurpose::SectionDisconnector, MaterialKind::Disconnector, true)]
    #[case(CellPurpose::SectionDisconnector, MaterialKind::Breaker, false)]
    #[case(CellPurpose::AuxiliaryTransformer, MaterialKind::Tsn, true)]
    #[case(CellPurpose::VoltageTransformer, MaterialKind::Tn, true)]
    #[case(CellPurpose::LvOutgoing, MaterialKind::Meter, false)]
    fn test_applicable_kinds(
        #[case] purpose: CellPurpose,
        #[case] kind: MaterialKind,
        #[case] expected: bool,
    ) {
        assert_eq!(purpose.applicable_kinds().contains(&kind), expected);
    }
}

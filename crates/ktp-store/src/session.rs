//! Хранилища конфигурации по видам оборудования

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ktp_calc::{GroupQuote, QuoteCalculator};
use ktp_core::{
    CalculationData, CalculationRecord, Cell, CellPurpose, KtpError, ManufacturingParams,
    MaterialKind, MaterialSelection, PriceSource, Result,
};

/// Нормо-часы, подставляемые формой создания НОВОЙ калькуляции
///
/// Расходится с `ktp_calc::DEFAULT_MANUFACTURING_HOURS` (4) для
/// существующих записей без часов; расхождение наблюдалось в работе и
/// сохранено, не унифицировано.
pub const NEW_RECORD_MANUFACTURING_HOURS: u32 = 1;

/// Вид оборудования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    /// РУНН — распредустройство низкого напряжения
    Runn,
    /// РУСН — распредустройство среднего напряжения
    Rusn,
    /// БМЗ — блочно-модульное здание
    Bmz,
    /// Шинный мост
    BusBridge,
}

impl EquipmentType {
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentType::Runn => "РУНН",
            EquipmentType::Rusn => "РУСН",
            EquipmentType::Bmz => "БМЗ",
            EquipmentType::BusBridge => "Шинный мост",
        }
    }
}

/// Глобальные значения по умолчанию для новых ячеек
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDefaults {
    /// Тип корпуса
    pub body_type: Option<String>,

    /// Класс напряжения
    pub voltage: Option<String>,

    /// Выключатель по умолчанию
    pub default_breaker: Option<MaterialSelection>,

    /// РЗА по умолчанию
    pub default_rza: Option<MaterialSelection>,

    /// Прибор учёта по умолчанию
    pub default_meter: Option<MaterialSelection>,
}

impl GlobalDefaults {
    /// Значение по умолчанию для роли, если оно задано
    fn selection_for(&self, kind: MaterialKind) -> Option<&MaterialSelection> {
        match kind {
            MaterialKind::Breaker => self.default_breaker.as_ref(),
            MaterialKind::Rza => self.default_rza.as_ref(),
            MaterialKind::Meter => self.default_meter.as_ref(),
            _ => None,
        }
    }
}

/// Хранилище сконфигурированных ячеек одного вида оборудования
///
/// Итоги нигде не кэшируются: любой пересчёт идёт через
/// [`QuoteCalculator`] от текущего состояния, устаревших сумм не бывает.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationStore {
    equipment: EquipmentType,

    cells: Vec<Cell>,

    defaults: GlobalDefaults,
}

impl ConfigurationStore {
    pub fn new(equipment: EquipmentType) -> Self {
        Self {
            equipment,
            cells: Vec::new(),
            defaults: GlobalDefaults::default(),
        }
    }

    pub fn equipment(&self) -> EquipmentType {
        self.equipment
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn defaults(&self) -> &GlobalDefaults {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: GlobalDefaults) {
        self.defaults = defaults;
    }

    /// Добавить ячейку назначения; применимые роли заполняются
    /// глобальными значениями по умолчанию
    pub fn add_cell(&mut self, purpose: CellPurpose) -> Uuid {
        let mut cell = Cell::new(purpose);
        for &kind in purpose.applicable_kinds() {
            if let Some(selection) = self.defaults.selection_for(kind) {
                cell.selections.insert(kind, selection.clone());
            }
        }

        tracing::debug!(
            "{}: добавлена ячейка \"{}\" ({})",
            self.equipment.label(),
            purpose.label(),
            cell.id
        );

        let id = cell.id;
        self.cells.push(cell);
        id
    }

    /// Переключить назначение: нет ячеек — добавить одну,
    /// есть — убрать все
    pub fn toggle_purpose(&mut self, purpose: CellPurpose) -> bool {
        if self.cells.iter().any(|c| c.purpose == purpose) {
            self.cells.retain(|c| c.purpose != purpose);
            false
        } else {
            self.add_cell(purpose);
            true
        }
    }

    /// Удалить ячейку
    pub fn remove_cell(&mut self, id: Uuid) {
        self.cells.retain(|c| c.id != id);
    }

    /// Задать количество (не меньше 1)
    pub fn set_quantity(&mut self, id: Uuid, quantity: u32) -> Result<()> {
        if quantity < 1 {
            return Err(KtpError::InvalidQuantity);
        }

        if let Some(cell) = self.cell_mut(id) {
            cell.quantity = quantity;
        }
        Ok(())
    }

    /// Изменить выбор материала для роли
    ///
    /// Роли вне таблицы применимости назначения игнорируются:
    /// форма такие поля не показывает, записывать их некуда.
    pub fn update_selection(
        &mut self,
        id: Uuid,
        kind: MaterialKind,
        selection: Option<MaterialSelection>,
    ) {
        let Some(cell) = self.cell_mut(id) else {
            return;
        };

        if !cell.purpose.applicable_kinds().contains(&kind) {
            tracing::warn!(
                "роль {:?} неприменима к назначению \"{}\", выбор пропущен",
                kind,
                cell.purpose.label()
            );
            return;
        }

        match selection {
            Some(selection) => {
                cell.selections.insert(kind, selection);
            }
            None => {
                cell.selections.remove(&kind);
            }
        }
    }

    /// Сбросить конфигурацию
    pub fn reset(&mut self) {
        self.cells.clear();
        self.defaults = GlobalDefaults::default();
    }

    /// Пересчитать свод стоимости от текущего состояния
    pub fn quote(
        &self,
        records: &[CalculationRecord],
        prices: &impl PriceSource,
    ) -> GroupQuote {
        QuoteCalculator::group_quote(&self.cells, records, prices)
    }

    fn cell_mut(&mut self, id: Uuid) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.id == id)
    }
}

/// Начальное состояние формы новой калькуляции
#[derive(Debug, Clone)]
pub struct NewCalculationForm {
    pub name: String,

    pub slug: String,

    pub data: CalculationData,
}

impl NewCalculationForm {
    /// Форма для группы; часы посеяны единицей, см.
    /// [`NEW_RECORD_MANUFACTURING_HOURS`]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            slug: slug.into(),
            data: CalculationData {
                categories: Vec::new(),
                calculation: ManufacturingParams {
                    manufacturing_hours: Some(Decimal::from(NEW_RECORD_MANUFACTURING_HOURS)),
                    hourly_rate: Decimal::ZERO,
                    overhead_percentage: Decimal::ZERO,
                    admin_percentage: Decimal::ZERO,
                    planned_profit_percentage: Decimal::ZERO,
                    nds_percentage: Decimal::ZERO,
                },
                cell_config: None,
            },
        }
    }

    /// Собрать запись для сохранения
    pub fn into_record(self, id: impl Into<String>) -> Result<CalculationRecord> {
        if self.name.is_empty() {
            return Err(KtpError::MissingField("name"));
        }

        Ok(CalculationRecord {
            id: id.into(),
            name: self.name,
            slug: self.slug,
            updated_at: None,
            data: self.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoPrices;

    impl PriceSource for NoPrices {
        fn price_of(&self, _kind: MaterialKind, _id: &str) -> Option<Decimal> {
            None
        }
    }

    fn defaults_with_breaker() -> GlobalDefaults {
        GlobalDefaults {
            default_breaker: Some(MaterialSelection::new(
                "42",
                "ВА-99 630А",
                Decimal::from(125000),
            )),
            ..GlobalDefaults::default()
        }
    }

    #[test]
    fn test_add_cell_seeds_defaults() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        store.set_defaults(defaults_with_breaker());

        let id = store.add_cell(CellPurpose::Input);

        let cell = store.cells().iter().find(|c| c.id == id).unwrap();
        assert_eq!(cell.selected_id(MaterialKind::Breaker), Some("42"));
        assert_eq!(cell.selected_id(MaterialKind::Rza), None);
    }

    #[test]
    fn test_defaults_respect_applicability() {
        // у "Секционного разъединителя" выключателя нет —
        // значение по умолчанию не подставляется
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        store.set_defaults(defaults_with_breaker());

        let id = store.add_cell(CellPurpose::SectionDisconnector);

        let cell = store.cells().iter().find(|c| c.id == id).unwrap();
        assert!(!cell.has_any_selection());
    }

    #[test]
    fn test_toggle_purpose() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);

        assert!(store.toggle_purpose(CellPurpose::Input));
        assert_eq!(store.cells().len(), 1);

        assert!(!store.toggle_purpose(CellPurpose::Input));
        assert!(store.cells().is_empty());
    }

    #[test]
    fn test_set_quantity_rejects_zero() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        let id = store.add_cell(CellPurpose::Input);

        assert!(matches!(
            store.set_quantity(id, 0),
            Err(KtpError::InvalidQuantity)
        ));

        store.set_quantity(id, 4).unwrap();
        assert_eq!(store.cells()[0].quantity, 4);
    }

    #[test]
    fn test_update_selection_ignores_inapplicable_kind() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        let id = store.add_cell(CellPurpose::SectionDisconnector);

        store.update_selection(
            id,
            MaterialKind::Breaker,
            Some(MaterialSelection::new("42", "ВА-99", Decimal::ZERO)),
        );

        assert!(!store.cells()[0].has_any_selection());
    }

    #[test]
    fn test_clear_selection() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        store.set_defaults(defaults_with_breaker());
        let id = store.add_cell(CellPurpose::Input);

        store.update_selection(id, MaterialKind::Breaker, None);

        assert_eq!(store.cells()[0].selected_id(MaterialKind::Breaker), None);
    }

    #[test]
    fn test_reset() {
        let mut store = ConfigurationStore::new(EquipmentType::Runn);
        store.set_defaults(defaults_with_breaker());
        store.add_cell(CellPurpose::LvInput);

        store.reset();

        assert!(store.cells().is_empty());
        assert!(store.defaults().default_breaker.is_none());
    }

    #[test]
    fn test_quote_reflects_current_state() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        let id = store.add_cell(CellPurpose::Input);
        store.update_selection(
            id,
            MaterialKind::Breaker,
            Some(MaterialSelection::new("42", "ВА-99", Decimal::ZERO)),
        );

        let record: CalculationRecord = serde_json::from_str(
            r#"{
                "id": "a", "name": "Ввод", "slug": "kso-2101",
                "data": {
                    "categories": [{"name": "М", "items":
                        [{"name": "Комплект", "price": 100000, "quantity": 1}]}],
                    "calculation": {
                        "manufacturingHours": 4, "hourlyRate": 1000,
                        "overheadPercentage": 15, "adminPercentage": 10,
                        "plannedProfitPercentage": 20, "ndsPercentage": 12
                    },
                    "cellConfig": {"type": "breaker",
                                   "materials": {"switch": [{"id": "42"}]}}
                }
            }"#,
        )
        .unwrap();

        let quote = store.quote(std::slice::from_ref(&record), &NoPrices);
        assert_eq!(quote.total, Decimal::from(173_376));

        // удалили ячейку — свод сразу нулевой
        store.remove_cell(id);
        let quote = store.quote(std::slice::from_ref(&record), &NoPrices);
        assert_eq!(quote.total, Decimal::ZERO);
    }

    #[test]
    fn test_new_calculation_form_seeds_one_hour() {
        let form = NewCalculationForm::new("kso-2101");

        assert_eq!(
            form.data.calculation.manufacturing_hours,
            Some(Decimal::from(1))
        );

        let err = form.into_record("calc-1");
        assert!(matches!(err, Err(KtpError::MissingField("name"))));
    }

    #[test]
    fn test_new_calculation_form_into_record() {
        let mut form = NewCalculationForm::new("kso-2101");
        form.name = "Ячейка ввода".to_string();

        let record = form.into_record("calc-1").unwrap();

        assert_eq!(record.id, "calc-1");
        assert_eq!(record.slug, "kso-2101");
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut store = ConfigurationStore::new(EquipmentType::Rusn);
        store.set_defaults(defaults_with_breaker());
        store.add_cell(CellPurpose::Input);

        let json = serde_json::to_string(&store).unwrap();
        let restored: ConfigurationStore = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.equipment(), EquipmentType::Rusn);
        assert_eq!(restored.cells().len(), 1);
        assert_eq!(
            restored.cells()[0].selected_id(MaterialKind::Breaker),
            Some("42")
        );
    }
}

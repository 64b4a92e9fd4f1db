//! Граница удалённого API каталогов
//!
//! Трейт [`CatalogSource`] — единственный шов между конфигуратором и
//! сервером; маршруты и транспорт — дело реализации. Поставляемая здесь
//! [`JsonCatalogSource`] разбирает снятые с API JSON-документы и служит
//! источником в тестах и демонстрациях.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ktp_core::{
    BmzSettings, CalculationRecord, KtpError, Material, Result, SwitchgearConfiguration,
};

/// Группа калькуляций (класс напряжения / семейство РУ)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationGroup {
    pub name: String,

    pub slug: String,
}

/// Источник данных каталогов
///
/// Все операции чтения идемпотентны; повторный вызов с теми же
/// аргументами просто перечитывает данные.
pub trait CatalogSource {
    /// Материалы категории
    fn materials_by_category(&self, category: &str) -> Result<Vec<Material>>;

    /// Полнотекстовый поиск материалов по наименованию
    fn search_materials(&self, query: &str) -> Result<Vec<Material>>;

    /// Список групп калькуляций
    fn calculation_groups(&self) -> Result<Vec<CalculationGroup>>;

    /// Калькуляции группы, в порядке выдачи сервера
    ///
    /// Порядок значим: при подборе по id побеждает первая запись списка.
    fn calculations_by_group(&self, slug: &str) -> Result<Vec<CalculationRecord>>;

    /// Создать или обновить калькуляцию (upsert по id)
    fn save_calculation(&mut self, record: CalculationRecord) -> Result<()>;

    /// Конфигурации РУ
    fn switchgear_configurations(&self) -> Result<Vec<SwitchgearConfiguration>>;

    /// Создать или обновить конфигурацию РУ
    fn save_switchgear_configuration(&mut self, config: SwitchgearConfiguration) -> Result<()>;

    /// Удалить конфигурацию РУ
    fn delete_switchgear_configuration(&mut self, id: &str) -> Result<()>;

    /// Настройки БМЗ
    fn bmz_settings(&self) -> Result<BmzSettings>;

    /// Обновить настройки БМЗ
    fn update_bmz_settings(&mut self, settings: BmzSettings) -> Result<()>;
}

/// Снятый с API документ каталогов
#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    materials: HashMap<String, Vec<Material>>,

    #[serde(default)]
    groups: Vec<CalculationGroup>,

    #[serde(default)]
    calculations: HashMap<String, Vec<CalculationRecord>>,

    #[serde(default)]
    switchgear: Vec<SwitchgearConfiguration>,

    #[serde(default)]
    bmz: BmzSettings,
}

/// Источник каталогов поверх JSON-документа
///
/// Нормализация форм (цена строкой/числом, одиночный объект/массив в
/// индексе материалов) выполняется при разборе, см. модели `ktp-core`.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalogSource {
    materials: HashMap<String, Vec<Material>>,
    groups: Vec<CalculationGroup>,
    calculations: HashMap<String, Vec<CalculationRecord>>,
    switchgear: Vec<SwitchgearConfiguration>,
    bmz: BmzSettings,
}

impl JsonCatalogSource {
    /// Пустой источник
    pub fn new() -> Self {
        Self::default()
    }

    /// Разобрать документ каталогов
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;

        Ok(Self {
            materials: fixture.materials,
            groups: fixture.groups,
            calculations: fixture.calculations,
            switchgear: fixture.switchgear,
            bmz: fixture.bmz,
        })
    }

    /// Построитель: материалы категории
    pub fn with_materials(mut self, category: impl Into<String>, items: Vec<Material>) -> Self {
        self.materials.insert(category.into(), items);
        self
    }

    /// Построитель: калькуляции группы
    pub fn with_calculations(
        mut self,
        slug: impl Into<String>,
        records: Vec<CalculationRecord>,
    ) -> Self {
        let slug = slug.into();
        self.groups.push(CalculationGroup {
            name: slug.clone(),
            slug: slug.clone(),
        });
        self.calculations.insert(slug, records);
        self
    }

    /// Построитель: настройки БМЗ
    pub fn with_bmz(mut self, settings: BmzSettings) -> Self {
        self.bmz = settings;
        self
    }
}

impl CatalogSource for JsonCatalogSource {
    fn materials_by_category(&self, category: &str) -> Result<Vec<Material>> {
        Ok(self.materials.get(category).cloned().unwrap_or_default())
    }

    fn search_materials(&self, query: &str) -> Result<Vec<Material>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .materials
            .values()
            .flatten()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn calculation_groups(&self) -> Result<Vec<CalculationGroup>> {
        Ok(self.groups.clone())
    }

    fn calculations_by_group(&self, slug: &str) -> Result<Vec<CalculationRecord>> {
        self.calculations
            .get(slug)
            .cloned()
            .ok_or_else(|| KtpError::GroupNotFound(slug.to_string()))
    }

    fn save_calculation(&mut self, record: CalculationRecord) -> Result<()> {
        if record.name.is_empty() {
            return Err(KtpError::MissingField("name"));
        }

        let records = self.calculations.entry(record.slug.clone()).or_default();
        match records.iter().position(|r| r.id == record.id) {
            Some(i) => records[i] = record,
            None => records.push(record),
        }
        Ok(())
    }

    fn switchgear_configurations(&self) -> Result<Vec<SwitchgearConfiguration>> {
        Ok(self.switchgear.clone())
    }

    fn save_switchgear_configuration(&mut self, config: SwitchgearConfiguration) -> Result<()> {
        config.validate()?;

        let existing = config
            .id
            .as_ref()
            .and_then(|id| self.switchgear.iter().position(|c| c.id.as_ref() == Some(id)));
        match existing {
            Some(i) => self.switchgear[i] = config,
            None => self.switchgear.push(config),
        }
        Ok(())
    }

    fn delete_switchgear_configuration(&mut self, id: &str) -> Result<()> {
        self.switchgear.retain(|c| c.id.as_deref() != Some(id));
        Ok(())
    }

    fn bmz_settings(&self) -> Result<BmzSettings> {
        Ok(self.bmz.clone())
    }

    fn update_bmz_settings(&mut self, settings: BmzSettings) -> Result<()> {
        settings.validate()?;
        self.bmz = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn fixture() -> JsonCatalogSource {
        JsonCatalogSource::from_json(
            r#"{
                "materials": {
                    "breakers": [
                        {"id": "42", "name": "ВА-99 630А", "price": "125000"},
                        {"id": "43", "name": "ВА-99 1000А", "price": 180000}
                    ],
                    "meters": [
                        {"id": "90", "name": "Меркурий 230", "price": 15000}
                    ]
                },
                "groups": [{"name": "КСО-2101 10 кВ", "slug": "kso-2101"}],
                "calculations": {"kso-2101": []}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_materials_by_category() {
        let source = fixture();

        let breakers = source.materials_by_category("breakers").unwrap();
        assert_eq!(breakers.len(), 2);
        assert_eq!(breakers[0].price, Decimal::from(125000));

        // неизвестная категория — пустой список, не ошибка
        assert!(source.materials_by_category("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_search_materials() {
        let source = fixture();

        let hits = source.search_materials("ва-99").unwrap();
        assert_eq!(hits.len(), 2);

        let hits = source.search_materials("меркурий").unwrap();
        assert_eq!(hits.len(), 1);

        assert!(source.search_materials("   ").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_group() {
        let source = fixture();

        assert!(matches!(
            source.calculations_by_group("нет-такой"),
            Err(KtpError::GroupNotFound(_))
        ));
    }

    #[test]
    fn test_save_calculation_upsert() {
        let mut source = fixture();
        let record: CalculationRecord = serde_json::from_str(
            r#"{
                "id": "calc-1",
                "name": "Ввод",
                "slug": "kso-2101",
                "data": {"calculation": {"hourlyRate": 1000, "ndsPercentage": 12}}
            }"#,
        )
        .unwrap();

        source.save_calculation(record.clone()).unwrap();
        assert_eq!(source.calculations_by_group("kso-2101").unwrap().len(), 1);

        // повторное сохранение того же id — обновление, не дубль
        source.save_calculation(record).unwrap();
        assert_eq!(source.calculations_by_group("kso-2101").unwrap().len(), 1);
    }

    #[test]
    fn test_save_calculation_requires_name() {
        let mut source = fixture();
        let record: CalculationRecord = serde_json::from_str(
            r#"{"id": "x", "name": "", "slug": "kso-2101",
                "data": {"calculation": {"hourlyRate": 0, "ndsPercentage": 0}}}"#,
        )
        .unwrap();

        assert!(matches!(
            source.save_calculation(record),
            Err(KtpError::MissingField("name"))
        ));
    }

    #[test]
    fn test_bmz_settings_validated_on_update() {
        let mut source = fixture();
        let bad: BmzSettings = serde_json::from_str(
            r#"{"areaRanges": [
                {"from": 0, "to": 10, "price": 50000},
                {"from": 5, "to": 20, "price": 45000}
            ]}"#,
        )
        .unwrap();

        assert!(source.update_bmz_settings(bad).is_err());
    }
}

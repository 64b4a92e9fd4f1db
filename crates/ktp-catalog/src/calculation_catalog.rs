//! Доступ к каталогу калькуляций группы

use ktp_core::CalculationRecord;

use crate::source::CatalogSource;

/// Калькуляции одной группы в порядке выдачи сервера
///
/// Порядок записей сохраняется: подбор по id берёт первую подходящую.
#[derive(Debug, Clone)]
pub struct CalculationCatalog {
    slug: String,
    records: Vec<CalculationRecord>,
}

impl CalculationCatalog {
    /// Загрузить калькуляции группы
    ///
    /// Сбой или неизвестная группа дают пустой каталог: ячейки без
    /// подобранной калькуляции стоят ноль, страница не падает.
    pub fn load(source: &impl CatalogSource, slug: &str) -> Self {
        let records = match source.calculations_by_group(slug) {
            Ok(records) => {
                tracing::debug!("группа {}: загружено {} калькуляций", slug, records.len());
                records
            }
            Err(err) => {
                tracing::warn!("группа {} недоступна ({}), каталог пуст", slug, err);
                Vec::new()
            }
        };

        Self {
            slug: slug.to_string(),
            records,
        }
    }

    /// Каталог из готового списка записей
    pub fn from_records(slug: impl Into<String>, records: Vec<CalculationRecord>) -> Self {
        Self {
            slug: slug.into(),
            records,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Запись по идентификатору
    pub fn find(&self, id: &str) -> Option<&CalculationRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

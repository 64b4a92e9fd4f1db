//! Кэширующий доступ к каталогу материалов

use std::collections::HashMap;

use rust_decimal::Decimal;

use ktp_core::{Material, MaterialKind, PriceSource};

use crate::source::CatalogSource;

/// Каталог материалов, загруженный по ролям
///
/// Сбой загрузки не фатален: роль остаётся с пустым списком, зависимые
/// расчёты дают нулевой вклад (см. семантику отказов конфигуратора).
#[derive(Debug, Default)]
pub struct MaterialCatalog {
    by_kind: HashMap<MaterialKind, Vec<Material>>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Загрузить категорию каталога для роли
    pub fn load_category(
        &mut self,
        source: &impl CatalogSource,
        kind: MaterialKind,
        category: &str,
    ) {
        let items = match source.materials_by_category(category) {
            Ok(items) => {
                tracing::debug!(
                    "каталог: роль {:?}, категория {}: {} материалов",
                    kind,
                    category,
                    items.len()
                );
                items
            }
            Err(err) => {
                tracing::warn!(
                    "каталог: категория {} недоступна ({}), роль {:?} останется пустой",
                    category,
                    err,
                    kind
                );
                Vec::new()
            }
        };

        self.by_kind.insert(kind, items);
    }

    /// Материалы роли
    pub fn materials(&self, kind: MaterialKind) -> &[Material] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Материал роли по идентификатору
    pub fn material(&self, kind: MaterialKind, id: &str) -> Option<&Material> {
        self.materials(kind).iter().find(|m| m.id == id)
    }
}

impl PriceSource for MaterialCatalog {
    fn price_of(&self, kind: MaterialKind, id: &str) -> Option<Decimal> {
        self.material(kind, id).map(|m| m.price)
    }
}

//! Свод стоимости по ячейкам и группам

use rust_decimal::Decimal;

use ktp_core::{CalculationRecord, Cell, CellPurpose, CostBreakdown, MaterialKind, PriceSource};

use crate::matcher::{CellMatcher, CellType};
use crate::rollup::CostCalculator;
use crate::MatchWarning;

/// Трансформаторов тока на ячейку
const CURRENT_TRANSFORMERS_PER_CELL: u32 = 3;

/// Вклад одной роли в стоимость ячейки
#[derive(Debug, Clone)]
pub struct KindQuote {
    pub kind: MaterialKind,

    /// Подобранная калькуляция
    pub calculation_id: String,

    pub calculation_name: String,

    pub breakdown: CostBreakdown,
}

/// Стоимость одной ячейки
#[derive(Debug, Clone)]
pub struct CellQuote {
    pub cell_id: uuid::Uuid,

    pub purpose: CellPurpose,

    pub cell_type: CellType,

    pub quantity: u32,

    /// Вклады по ролям
    pub kinds: Vec<KindQuote>,

    /// Вклад трансформаторов тока: цена × 3, один раз на ячейку
    pub current_transformers_total: Decimal,

    /// Стоимость одной ячейки
    pub unit_total: Decimal,

    /// Стоимость с учётом количества
    pub total: Decimal,

    pub warnings: Vec<MatchWarning>,
}

/// Свод по группе ячеек
#[derive(Debug, Clone)]
pub struct GroupQuote {
    pub cells: Vec<CellQuote>,

    pub total: Decimal,
}

/// Калькулятор свода стоимости
pub struct QuoteCalculator;

impl QuoteCalculator {
    /// Стоимость ячейки
    ///
    /// По каждой подобранной роли: материалы сметы + цена выбранного
    /// компонента (0, если не разрешилась в каталоге) → итоговая цена
    /// роли. Сумма по ролям — чистая, порядок накопления безразличен.
    pub fn cell_quote(
        cell: &Cell,
        records: &[CalculationRecord],
        prices: &impl PriceSource,
    ) -> CellQuote {
        let matched = CellMatcher::match_cell(cell, records);

        let mut kinds = Vec::new();
        let mut unit_total = Decimal::ZERO;

        for (kind, record) in matched.matched() {
            let materials = record.materials_total();
            let component_price = cell
                .selected_id(kind)
                .and_then(|id| prices.price_of(kind, id))
                .unwrap_or(Decimal::ZERO);

            let breakdown =
                CostCalculator::calculate(materials, &record.data.calculation, component_price);

            tracing::debug!(
                "ячейка {}: роль {:?} → {} (материалы {}, компонент {}, итог {})",
                cell.id,
                kind,
                record.name,
                materials,
                component_price,
                breakdown.final_price
            );

            unit_total += breakdown.final_price;
            kinds.push(KindQuote {
                kind,
                calculation_id: record.id.clone(),
                calculation_name: record.name.clone(),
                breakdown,
            });
        }

        // трансформаторы тока: цена замороженного выбора × 3,
        // один раз на ячейку, независимо от подобранных ролей
        let current_transformers_total = cell
            .selection(MaterialKind::TransformerCurrent)
            .map(|s| s.price * Decimal::from(CURRENT_TRANSFORMERS_PER_CELL))
            .unwrap_or(Decimal::ZERO);
        unit_total += current_transformers_total;

        let total = unit_total * Decimal::from(cell.quantity);

        CellQuote {
            cell_id: cell.id,
            purpose: cell.purpose,
            cell_type: matched.cell_type,
            quantity: cell.quantity,
            kinds,
            current_transformers_total,
            unit_total,
            total,
            warnings: matched.warnings,
        }
    }

    /// Свод по всем ячейкам группы
    pub fn group_quote(
        cells: &[Cell],
        records: &[CalculationRecord],
        prices: &impl PriceSource,
    ) -> GroupQuote {
        tracing::info!(
            "свод стоимости: {} ячеек, {} калькуляций в каталоге",
            cells.len(),
            records.len()
        );

        let cell_quotes: Vec<CellQuote> = cells
            .iter()
            .map(|cell| Self::cell_quote(cell, records, prices))
            .collect();

        let total = cell_quotes.iter().map(|q| q.total).sum();

        tracing::info!("свод стоимости: итого {}", total);

        GroupQuote {
            cells: cell_quotes,
            total,
        }
    }
}

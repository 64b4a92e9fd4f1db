//! Разбивка себестоимости

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Десятишаговая разбивка: материалы → зарплата → накладные →
/// производственная себестоимость → админрасходы → полная себестоимость →
/// плановая прибыль → оптовая цена → НДС → итоговая цена
///
/// Производная величина: пересчитывается при каждом изменении входных
/// данных и нигде не сохраняется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Материалы (с учётом выбранных компонентов)
    pub materials_total: Decimal,

    /// Зарплата: ставка × нормо-часы
    pub salary: Decimal,

    /// Общепроизводственные расходы
    pub overhead_cost: Decimal,

    /// Производственная себестоимость
    pub production_cost: Decimal,

    /// Административные расходы
    pub admin_cost: Decimal,

    /// Полная себестоимость
    pub full_cost: Decimal,

    /// Плановая прибыль
    pub planned_profit: Decimal,

    /// Оптовая цена
    pub wholesale_price: Decimal,

    /// Сумма НДС
    pub nds_amount: Decimal,

    /// Итоговая цена с НДС
    pub final_price: Decimal,
}

impl CostBreakdown {
    /// Нулевая разбивка (вклад несопоставленной роли)
    pub fn zero() -> Self {
        Self {
            materials_total: Decimal::ZERO,
            salary: Decimal::ZERO,
            overhead_cost: Decimal::ZERO,
            production_cost: Decimal::ZERO,
            admin_cost: Decimal::ZERO,
            full_cost: Decimal::ZERO,
            planned_profit: Decimal::ZERO,
            wholesale_price: Decimal::ZERO,
            nds_amount: Decimal::ZERO,
            final_price: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_breakdown() {
        let b = CostBreakdown::zero();

        assert_eq!(b.materials_total, Decimal::ZERO);
        assert_eq!(b.final_price, Decimal::ZERO);
    }

    #[test]
    fn test_wire_field_names() {
        let b = CostBreakdown::zero();
        let json = serde_json::to_value(&b).unwrap();

        assert!(json.get("materialsTotal").is_some());
        assert!(json.get("ndsAmount").is_some());
        assert!(json.get("finalPrice").is_some());
    }
}

//! Десятишаговая разбивка себестоимости

use ktp_core::{CostBreakdown, ManufacturingParams};
use rust_decimal::Decimal;

/// Нормо-часы по умолчанию для записей без `manufacturingHours`
///
/// Форма создания НОВОЙ калькуляции исторически подставляет 1
/// (см. `NEW_RECORD_MANUFACTURING_HOURS` в слое хранилищ); расхождение
/// сохранено намеренно, в двух местах — две константы.
pub const DEFAULT_MANUFACTURING_HOURS: u32 = 4;

/// Калькулятор разбивки себестоимости
pub struct CostCalculator;

impl CostCalculator {
    /// Разбивка от суммы материалов и производственных параметров
    ///
    /// Чистая функция, порядок шагов фиксирован, промежуточного
    /// округления нет — округляет только слой отображения.
    /// Валидация входа — на совести вызывающего.
    pub fn calculate(
        materials_total: Decimal,
        params: &ManufacturingParams,
        additional_materials_total: Decimal,
    ) -> CostBreakdown {
        let materials = materials_total + additional_materials_total;

        let hours = params
            .manufacturing_hours
            .unwrap_or_else(|| Decimal::from(DEFAULT_MANUFACTURING_HOURS));
        let salary = params.hourly_rate * hours;

        let overhead_cost = materials * params.overhead_percentage / Decimal::ONE_HUNDRED;
        let production_cost = materials + salary + overhead_cost;
        let admin_cost = materials * params.admin_percentage / Decimal::ONE_HUNDRED;
        let full_cost = production_cost + admin_cost;
        let planned_profit = full_cost * params.planned_profit_percentage / Decimal::ONE_HUNDRED;
        let wholesale_price = full_cost + planned_profit;
        let nds_amount = wholesale_price * params.nds_percentage / Decimal::ONE_HUNDRED;
        let final_price = wholesale_price + nds_amount;

        CostBreakdown {
            materials_total: materials,
            salary,
            overhead_cost,
            production_cost,
            admin_cost,
            full_cost,
            planned_profit,
            wholesale_price,
            nds_amount,
            final_price,
        }
    }
}

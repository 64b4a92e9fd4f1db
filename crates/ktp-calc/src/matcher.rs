//! Подбор калькуляций по выбору ячейки
//!
//! Единственная каноническая реализация цепочки подбора
//! id → тег типа → назначение ячейки; раньше она дублировалась по
//! компонентам интерфейса с расхождениями.

use ktp_core::{CalculationRecord, Cell, CellPurpose, MaterialKind};
use serde::{Deserialize, Serialize};

use crate::MatchWarning;

/// Классификация ячейки для отображения
///
/// Не участвует в дальнейших вычислениях.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    #[serde(rename = "ПУ")]
    Pu,
    #[serde(rename = "Разъединитель")]
    Disconnector,
    #[serde(rename = "ТСН")]
    Tsn,
    #[serde(rename = "ТН")]
    Tn,
    #[serde(rename = "Выключатель")]
    Breaker,
}

impl CellType {
    pub fn label(&self) -> &'static str {
        match self {
            CellType::Pu => "ПУ",
            CellType::Disconnector => "Разъединитель",
            CellType::Tsn => "ТСН",
            CellType::Tn => "ТН",
            CellType::Breaker => "Выключатель",
        }
    }
}

/// Результат подбора: по одной калькуляции на роль
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub breaker_calc: Option<&'a CalculationRecord>,
    pub rza_calc: Option<&'a CalculationRecord>,
    pub disconnector_calc: Option<&'a CalculationRecord>,
    pub pu_calc: Option<&'a CalculationRecord>,
    pub tsn_calc: Option<&'a CalculationRecord>,
    pub tn_calc: Option<&'a CalculationRecord>,

    /// Человекочитаемая классификация ячейки
    pub cell_type: CellType,

    /// Предупреждения о деградированном подборе
    pub warnings: Vec<MatchWarning>,
}

impl<'a> MatchResult<'a> {
    /// Пустой результат: ничего не подобрано
    pub fn nothing() -> Self {
        Self {
            breaker_calc: None,
            rza_calc: None,
            disconnector_calc: None,
            pu_calc: None,
            tsn_calc: None,
            tn_calc: None,
            cell_type: CellType::Breaker,
            warnings: Vec::new(),
        }
    }

    /// Калькуляция, подобранная для роли
    pub fn calc_for(&self, kind: MaterialKind) -> Option<&'a CalculationRecord> {
        match kind {
            MaterialKind::Breaker => self.breaker_calc,
            MaterialKind::Rza => self.rza_calc,
            MaterialKind::Disconnector => self.disconnector_calc,
            MaterialKind::Meter => self.pu_calc,
            MaterialKind::Tsn => self.tsn_calc,
            MaterialKind::Tn => self.tn_calc,
            _ => None,
        }
    }

    fn set(&mut self, kind: MaterialKind, record: &'a CalculationRecord) {
        match kind {
            MaterialKind::Breaker => self.breaker_calc = Some(record),
            MaterialKind::Rza => self.rza_calc = Some(record),
            MaterialKind::Disconnector => self.disconnector_calc = Some(record),
            MaterialKind::Meter => self.pu_calc = Some(record),
            MaterialKind::Tsn => self.tsn_calc = Some(record),
            MaterialKind::Tn => self.tn_calc = Some(record),
            _ => {}
        }
    }

    /// Подобранные пары (роль, калькуляция)
    pub fn matched(&self) -> impl Iterator<Item = (MaterialKind, &'a CalculationRecord)> + '_ {
        MaterialKind::MATCHABLE
            .into_iter()
            .filter_map(|kind| self.calc_for(kind).map(|rec| (kind, rec)))
    }

    /// Подобрана ли хоть одна калькуляция
    pub fn has_any_match(&self) -> bool {
        self.matched().next().is_some()
    }
}

/// Подборщик калькуляций
pub struct CellMatcher;

impl CellMatcher {
    /// Подобрать калькуляции для ячейки
    ///
    /// Чистая функция от (ячейка, каталог): повторный вызов с теми же
    /// входами даёт тот же результат. Отсутствие совпадения по роли —
    /// не ошибка, вклад роли в стоимость будет нулевым.
    pub fn match_cell<'a>(cell: &Cell, records: &'a [CalculationRecord]) -> MatchResult<'a> {
        // дешёвый выход: нечего подбирать и назначение не требует
        // резервного подбора
        if !cell.has_any_selection() && purpose_fallback_kind(cell.purpose).is_none() {
            return MatchResult::nothing();
        }

        let mut result = MatchResult::nothing();

        for kind in MaterialKind::MATCHABLE {
            let selected = cell.selected_id(kind);

            // шаг 1: точный подбор по id материала, первая запись каталога
            if let Some(id) = selected {
                if let Some(record) = records.iter().find(|r| r.references_material(kind, id)) {
                    tracing::debug!(
                        "ячейка {}: роль {:?} подобрана по id {} → {}",
                        cell.id,
                        kind,
                        id,
                        record.name
                    );
                    result.set(kind, record);
                    continue;
                }
            }

            // шаг 2: деградированный подбор по тегу типа —
            // конкретный материал игнорируется, берётся типовой шаблон
            if let (Some(id), Some(tag)) = (selected, kind.type_tag()) {
                if let Some(record) = records.iter().find(|r| r.has_type_tag(tag)) {
                    tracing::debug!(
                        "ячейка {}: роль {:?} подобрана по тегу \"{}\" → {}",
                        cell.id,
                        kind,
                        tag,
                        record.name
                    );
                    result.set(kind, record);
                    result.warnings.push(MatchWarning::new(
                        kind,
                        format!(
                            "материал {} не найден в индексах, применён типовой шаблон \"{}\"",
                            id, tag
                        ),
                    ));
                }
            }
        }

        // шаг 3: резервный подбор по назначению — для назначений,
        // у которых форма вовсе не заполняет поле с id
        if let Some(kind) = purpose_fallback_kind(cell.purpose) {
            // у ролей резервного подбора тег есть всегда
            if let (None, Some(tag)) = (result.calc_for(kind), kind.type_tag()) {
                if let Some(record) = records.iter().find(|r| r.has_type_tag(tag)) {
                    tracing::debug!(
                        "ячейка {}: назначение \"{}\" даёт подбор по тегу \"{}\" → {}",
                        cell.id,
                        cell.purpose.label(),
                        tag,
                        record.name
                    );
                    result.set(kind, record);
                }
            }
        }

        result.cell_type = classify(cell, &result);
        result
    }
}

/// Роль резервного подбора для назначения
fn purpose_fallback_kind(purpose: CellPurpose) -> Option<MaterialKind> {
    match purpose {
        CellPurpose::SectionDisconnector => Some(MaterialKind::Disconnector),
        CellPurpose::AuxiliaryTransformer => Some(MaterialKind::Tsn),
        CellPurpose::VoltageTransformer => Some(MaterialKind::Tn),
        _ => None,
    }
}

/// Классификация ячейки
///
/// Прецедент: ПУ → Разъединитель → ТСН → ТН → Выключатель.
/// Назначение перекрывает прецедент для трёх назначений резервного
/// подбора; несопоставленный выбор ПУ всё равно даёт "ПУ".
fn classify(cell: &Cell, result: &MatchResult<'_>) -> CellType {
    match cell.purpose {
        CellPurpose::SectionDisconnector => return CellType::Disconnector,
        CellPurpose::AuxiliaryTransformer => return CellType::Tsn,
        CellPurpose::VoltageTransformer => return CellType::Tn,
        _ => {}
    }

    if result.pu_calc.is_some() || cell.selected_id(MaterialKind::Meter).is_some() {
        CellType::Pu
    } else if result.disconnector_calc.is_some() {
        CellType::Disconnector
    } else if result.tsn_calc.is_some() {
        CellType::Tsn
    } else if result.tn_calc.is_some() {
        CellType::Tn
    } else {
        CellType::Breaker
    }
}

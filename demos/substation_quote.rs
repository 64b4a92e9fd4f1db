//! Демонстрация: конфигурация РУСН и свод стоимости
//!
//! ```bash
//! cargo run --example substation_quote
//! ```

use anyhow::Context;
use rust_decimal::Decimal;

use ktp::core::MaterialSelection;
use ktp::{
    CalculationCatalog, CellPurpose, ConfigurationStore, EquipmentType, InMemoryStorage,
    JsonCatalogSource, MaterialCatalog, MaterialKind, UiSession,
};

const CATALOG_JSON: &str = r#"{
    "materials": {
        "breakers": [
            {"id": "42", "name": "ВА-99 630А", "price": "25000", "unit": "шт"},
            {"id": "43", "name": "ВА-99 1000А", "price": 38000, "unit": "шт"}
        ],
        "meters": [
            {"id": "90", "name": "Меркурий 230", "price": 15000, "unit": "шт"}
        ],
        "current-transformers": [
            {"id": "tt-1", "name": "ТОЛ-10 300/5", "price": 7000, "unit": "шт"}
        ]
    },
    "groups": [{"name": "КСО-2101 10 кВ", "slug": "kso-2101"}],
    "calculations": {
        "kso-2101": [
            {
                "id": "calc-vv",
                "name": "Ячейка ввода",
                "slug": "kso-2101",
                "data": {
                    "categories": [
                        {"name": "Материалы", "items": [
                            {"name": "Комплект ячейки", "unit": "шт",
                             "price": 100000, "quantity": 1}
                        ]}
                    ],
                    "calculation": {
                        "manufacturingHours": 4,
                        "hourlyRate": 1000,
                        "overheadPercentage": 15,
                        "adminPercentage": 10,
                        "plannedProfitPercentage": 20,
                        "ndsPercentage": 12
                    },
                    "cellConfig": {
                        "type": "breaker",
                        "materials": {"switch": [{"id": "42"}, {"id": "43"}]}
                    }
                }
            },
            {
                "id": "calc-sr",
                "name": "Секционный разъединитель",
                "slug": "kso-2101",
                "data": {
                    "categories": [
                        {"name": "Материалы", "items": [
                            {"name": "Комплект СР", "unit": "шт",
                             "price": 50000, "quantity": 2}
                        ]}
                    ],
                    "calculation": {
                        "hourlyRate": 1000,
                        "overheadPercentage": 10,
                        "adminPercentage": 5,
                        "plannedProfitPercentage": 15,
                        "ndsPercentage": 12
                    },
                    "cellConfig": {"type": "disconnector", "materials": {}}
                }
            }
        ]
    }
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // сеанс: без токена каталоги не читаем
    let mut session = UiSession::new(InMemoryStorage::new());
    session.set_auth_token("demo-token");
    session.set_selected_group_slug("kso-2101");
    session.auth_token().context("нет токена авторизации")?;

    let source = JsonCatalogSource::from_json(CATALOG_JSON)?;

    let mut materials = MaterialCatalog::new();
    materials.load_category(&source, MaterialKind::Breaker, "breakers");
    materials.load_category(&source, MaterialKind::Meter, "meters");
    materials.load_category(
        &source,
        MaterialKind::TransformerCurrent,
        "current-transformers",
    );

    let slug = session
        .selected_group_slug()
        .context("группа не выбрана")?;
    let calculations = CalculationCatalog::load(&source, &slug);

    // конфигурация: два ввода и секционный разъединитель
    let mut store = ConfigurationStore::new(EquipmentType::Rusn);

    let input = store.add_cell(CellPurpose::Input);
    store.update_selection(
        input,
        MaterialKind::Breaker,
        Some(MaterialSelection::new("42", "ВА-99 630А", Decimal::from(25000))),
    );
    store.update_selection(
        input,
        MaterialKind::TransformerCurrent,
        Some(MaterialSelection::new("tt-1", "ТОЛ-10 300/5", Decimal::from(7000))),
    );
    store.set_quantity(input, 2)?;

    store.add_cell(CellPurpose::SectionDisconnector);

    let quote = store.quote(calculations.records(), &materials);

    println!();
    println!("Свод стоимости {}", store.equipment().label());
    println!("{:-<64}", "");
    for cell in &quote.cells {
        println!(
            "{:<28} {:>3} шт  тип {:<14} {:>12}",
            cell.purpose.label(),
            cell.quantity,
            cell.cell_type.label(),
            cell.total
        );
        for kind in &cell.kinds {
            println!(
                "    {:<40} {:>12}",
                kind.calculation_name, kind.breakdown.final_price
            );
        }
        if cell.current_transformers_total > Decimal::ZERO {
            println!(
                "    {:<40} {:>12}",
                "Трансформаторы тока × 3", cell.current_transformers_total
            );
        }
        for warning in &cell.warnings {
            println!("    ! {}", warning.message);
        }
    }
    println!("{:-<64}", "");
    println!("{:<47} {:>12}", "Итого", quote.total);

    Ok(())
}

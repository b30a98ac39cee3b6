use foldergrid::domain::Product;
use foldergrid::drag::{DragController, HeaderLayout, Point, PointerEvent};
use foldergrid::grid::{
    ColumnConfig, CustomerColumn, GridColumn, GridConfigStore, ProductColumn, RowQuery, SortDirection, Step,
};
use foldergrid::storage::{JsonFileStore, KeyValueStore, MemoryStore, SharedStore};
use foldergrid::{initialize, Config};
use tempfile::TempDir;

#[test]
fn stored_config_gains_new_columns() {
    let store = MemoryStore::new()
        .with_entry("customerTableColumnOrder", r#"["checkbox","name"]"#)
        .with_entry("customerTableColumnWidths", r#"{"checkbox":50,"name":120}"#)
        .with_entry("customerTableColumnVisibility", r#"{"checkbox":true,"name":true}"#);

    let grid = GridConfigStore::<CustomerColumn, _>::load(store);
    let config = grid.config();

    assert_eq!(config.order()[0], CustomerColumn::Checkbox);
    assert_eq!(config.order()[1], CustomerColumn::Name);
    assert!(config.order().contains(&CustomerColumn::Code));
    assert_eq!(config.width(CustomerColumn::Name), 120);
    assert_eq!(config.width(CustomerColumn::Code), CustomerColumn::Code.default_width());
    assert!(config.is_visible(CustomerColumn::Code));
}

#[test]
fn corrupt_documents_fall_back_to_defaults() {
    let store = MemoryStore::new()
        .with_entry("productTableColumnOrder", "[[[")
        .with_entry("productTableSortConfig", "{\"key\":42}");
    let grid = GridConfigStore::<ProductColumn, _>::load(store);
    assert_eq!(grid.config(), &ColumnConfig::default());
}

#[test]
fn settings_survive_restart_in_json_file() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: dir.path().join("data"),
        ..Config::default()
    };

    {
        let store = initialize(&config).unwrap();
        let mut grid = GridConfigStore::<ProductColumn, _>::load(store);
        grid.set_width(ProductColumn::Name, 10).unwrap();
        grid.move_column(ProductColumn::Barcode, Step::Up).unwrap();
        grid.set_visibility(ProductColumn::Unit, false).unwrap();
        grid.set_rows_per_page(25).unwrap();
    }

    let store = JsonFileStore::open(config.settings_path()).unwrap();
    let grid = GridConfigStore::<ProductColumn, _>::load(store);
    assert_eq!(grid.config().width(ProductColumn::Name), 50);
    assert_eq!(grid.config().position(ProductColumn::Barcode), Some(4));
    assert!(!grid.visible_columns().contains(&ProductColumn::Unit));
    assert_eq!(grid.rows_per_page(), 25);
}

#[test]
fn grids_share_one_store_without_clashing() {
    let shared = SharedStore::new(MemoryStore::new());
    let mut products = GridConfigStore::<ProductColumn, _>::load(shared.clone());
    let mut customers = GridConfigStore::<CustomerColumn, _>::load(shared.clone());

    products.set_sort(ProductColumn::Name).unwrap();
    customers.set_sort(CustomerColumn::Balance).unwrap();
    customers.set_sort(CustomerColumn::Balance).unwrap();

    assert_eq!(
        shared.get("productTableSortConfig").unwrap().as_deref(),
        Some(r#"{"key":"name","direction":"asc"}"#)
    );
    assert_eq!(
        shared.get("customerTableSortConfig").unwrap().as_deref(),
        Some(r#"{"key":"balance","direction":"desc"}"#)
    );
}

#[test]
fn header_gestures_drive_the_store() {
    let mut grid = GridConfigStore::<ProductColumn, _>::load(MemoryStore::new());
    let mut drag = DragController::default();
    let at = |x: f64| Point::new(x, 12.0);

    // A 4 px wobble on "name" (170..370) is a click.
    let gesture = [
        PointerEvent::Down(at(250.0)),
        PointerEvent::Move(at(254.0)),
        PointerEvent::Up(at(254.0)),
    ];
    for event in gesture {
        let layout = HeaderLayout::new(grid.config(), 0.0, 40.0);
        for action in drag.handle_event(event, grid.config(), &layout) {
            grid.apply(action).unwrap();
        }
    }
    assert_eq!(grid.config().order(), ProductColumn::ALL);
    assert_eq!(grid.sort().map(|s| (s.column, s.direction)), Some((ProductColumn::Name, SortDirection::Asc)));

    // Dragging "name" onto "id" (110..170) reorders.
    let gesture = [
        PointerEvent::Down(at(250.0)),
        PointerEvent::Move(at(140.0)),
        PointerEvent::Up(at(140.0)),
    ];
    for event in gesture {
        let layout = HeaderLayout::new(grid.config(), 0.0, 40.0);
        for action in drag.handle_event(event, grid.config(), &layout) {
            grid.apply(action).unwrap();
        }
    }
    assert_eq!(grid.config().position(ProductColumn::Name), Some(2));
    assert_eq!(grid.config().position(ProductColumn::Id), Some(3));
}

#[test]
fn row_query_uses_stored_sort_and_page_size() {
    let mut grid = GridConfigStore::<ProductColumn, _>::load(MemoryStore::new());
    grid.set_sort(ProductColumn::Name).unwrap();
    grid.set_sort(ProductColumn::Name).unwrap();
    grid.set_rows_per_page(5).unwrap();

    let items: Vec<Product> = (1..=7).map(|i| Product::new(i, format!("item {i}"), None)).collect();
    let query = RowQuery {
        sort: grid.sort(),
        rows_per_page: grid.rows_per_page(),
        page: 2,
        ..RowQuery::default()
    };
    let page = query.run(&items);

    let names: Vec<&str> = page.rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["item 2", "item 1"]);
    assert_eq!((page.page, page.page_count, page.total), (2, 2, 7));
}

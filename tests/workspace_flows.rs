use foldergrid::backend::MemoryBackend;
use foldergrid::domain::{Customer, FolderId, FolderRecord, ItemId, LeafItem, PathEntry, Product};
use foldergrid::grid::GridBehavior;
use foldergrid::{ConsoleError, FolderActivation, FolderWorkspace, MoveMode};

fn folders() -> Vec<FolderRecord> {
    vec![
        FolderRecord::new(1, "A", None),
        FolderRecord::new(2, "B", Some(1)),
        FolderRecord::new(3, "C", Some(2)),
        FolderRecord::new(7, "Drinks", None),
    ]
}

fn products() -> Vec<Product> {
    vec![
        Product::new(5, "Cola", None),
        Product::new(6, "Juice", None),
        Product::new(8, "Water", Some(7)),
        Product::new(9, "Tea", Some(3)),
    ]
}

async fn workspace() -> FolderWorkspace<MemoryBackend<Product>> {
    FolderWorkspace::load(MemoryBackend::new(folders(), products()))
        .await
        .unwrap()
}

fn count(workspace: &FolderWorkspace<MemoryBackend<Product>>, request: &str) -> usize {
    workspace
        .backend()
        .requests()
        .iter()
        .filter(|r| **r == request)
        .count()
}

fn folder_of(workspace: &FolderWorkspace<MemoryBackend<Product>>, id: i64) -> Option<FolderId> {
    workspace
        .items()
        .iter()
        .find(|i| i.id() == ItemId(id))
        .and_then(LeafItem::folder_id)
}

#[tokio::test]
async fn selected_items_move_into_folder() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));
    ws.toggle_item(ItemId(6));
    ws.begin_move_items().unwrap();
    assert_eq!(ws.mode(), MoveMode::MovingItems);

    let report = ws.commit_move_items(Some(FolderId(7))).await.unwrap();

    assert_eq!(report.moved, 2);
    assert!(report.changed());
    assert_eq!(report.message, "2 products moved to \"Drinks\"");
    assert_eq!(folder_of(&ws, 5), Some(FolderId(7)));
    assert_eq!(folder_of(&ws, 6), Some(FolderId(7)));
    assert!(ws.selection().is_empty());
    assert_eq!(ws.mode(), MoveMode::Idle);
    assert_eq!(ws.item_count(Some(FolderId(7))), 3);
}

#[tokio::test]
async fn items_already_in_target_are_skipped() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(8));
    ws.begin_move_items().unwrap();

    let report = ws.commit_move_items(Some(FolderId(7))).await.unwrap();

    assert!(!report.changed());
    assert_eq!(count(&ws, "reassign_items_folder"), 0);
    assert!(ws.selection().is_empty());
    assert!(ws.mode().is_idle());
}

#[tokio::test]
async fn large_moves_are_batched() {
    let items: Vec<Product> = (1..=5).map(|i| Product::new(i, format!("p{i}"), None)).collect();
    let backend = MemoryBackend::new(folders(), items);
    let mut ws = FolderWorkspace::load(backend).await.unwrap().with_batch_size(2);
    ws.select_all_visible();
    ws.begin_move_items().unwrap();

    ws.commit_move_items(Some(FolderId(1))).await.unwrap();

    assert_eq!(count(&ws, "reassign_items_folder"), 3);
    assert_eq!(ws.item_count(Some(FolderId(1))), 5);
}

#[tokio::test]
async fn failed_move_keeps_selection_and_mode() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));
    ws.toggle_item(ItemId(6));
    ws.begin_move_items().unwrap();
    ws.backend().set_available(false);

    let err = ws.commit_move_items(Some(FolderId(7))).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Backend(_)));
    assert!(!err.is_validation());
    assert_eq!(ws.selection().len(), 2);
    assert_eq!(ws.mode(), MoveMode::MovingItems);
    assert_eq!(folder_of(&ws, 5), None);
}

#[tokio::test]
async fn moving_items_needs_a_selection() {
    let mut ws = workspace().await;
    assert!(matches!(ws.begin_move_items(), Err(ConsoleError::EmptySelection)));
    assert!(matches!(
        ws.commit_move_items(None).await,
        Err(ConsoleError::EmptySelection)
    ));
    assert_eq!(count(&ws, "reassign_items_folder"), 0);
}

#[tokio::test]
async fn folder_move_into_own_subtree_never_reaches_backend() {
    let mut ws = workspace().await;
    ws.begin_move_folder(FolderId(1)).unwrap();

    let err = ws.commit_move_folder(Some(FolderId(3))).await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::CycleDetected {
            moving: FolderId(1),
            target: FolderId(3)
        }
    ));
    let err = ws.commit_move_folder(Some(FolderId(1))).await.unwrap_err();
    assert!(err.is_validation());

    assert_eq!(count(&ws, "update_folder"), 0);
    assert_eq!(ws.mode(), MoveMode::MovingFolder(FolderId(1)));
}

#[tokio::test]
async fn folder_move_to_current_parent_is_idempotent() {
    let mut ws = workspace().await;
    for _ in 0..2 {
        ws.begin_move_folder(FolderId(2)).unwrap();
        let report = ws.commit_move_folder(Some(FolderId(1))).await.unwrap();
        assert!(!report.changed());
        assert!(ws.mode().is_idle());
    }
    assert_eq!(count(&ws, "update_folder"), 0);
    assert_eq!(ws.folder(FolderId(2)).unwrap().parent_id, Some(FolderId(1)));
}

#[tokio::test]
async fn folder_moves_to_root() {
    let mut ws = workspace().await;
    ws.begin_move_folder(FolderId(3)).unwrap();

    let report = ws.commit_move_folder(None).await.unwrap();

    assert_eq!(report.message, "\"C\" moved to \"All\"");
    assert_eq!(ws.folder(FolderId(3)).unwrap().parent_id, None);
    assert_eq!(ws.tree().len(), 3);
}

#[tokio::test]
async fn commit_folder_without_mode_is_rejected() {
    let mut ws = workspace().await;
    assert!(matches!(
        ws.commit_move_folder(None).await,
        Err(ConsoleError::NoActiveMove)
    ));
}

#[tokio::test]
async fn activate_folder_follows_mode() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));

    let outcome = ws.activate_folder(Some(FolderId(3))).await.unwrap();
    assert_eq!(outcome, FolderActivation::Opened(Some(FolderId(3))));
    assert!(ws.selection().is_empty());
    assert_eq!(
        ws.breadcrumb(),
        vec![
            PathEntry::root(),
            PathEntry { id: Some(FolderId(1)), name: "A".into() },
            PathEntry { id: Some(FolderId(2)), name: "B".into() },
            PathEntry { id: Some(FolderId(3)), name: "C".into() },
        ]
    );
    let visible: Vec<ItemId> = ws.visible_items().iter().map(|i| i.id()).collect();
    assert_eq!(visible, [ItemId(9)]);

    ws.toggle_item(ItemId(9));
    ws.begin_move_items().unwrap();
    let outcome = ws.activate_folder(None).await.unwrap();
    assert!(matches!(outcome, FolderActivation::ItemsMoved(report) if report.moved == 1));
    assert_eq!(folder_of(&ws, 9), None);

    ws.begin_move_folder(FolderId(7)).unwrap();
    let outcome = ws.activate_folder(Some(FolderId(1))).await.unwrap();
    assert!(matches!(outcome, FolderActivation::FolderMoved(_)));
    assert_eq!(ws.folder(FolderId(7)).unwrap().parent_id, Some(FolderId(1)));
    assert!(ws.is_expanded(FolderId(1)));
}

#[tokio::test]
async fn entering_one_move_mode_replaces_the_other() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));
    ws.begin_move_items().unwrap();
    ws.begin_move_folder(FolderId(2)).unwrap();
    assert_eq!(ws.mode(), MoveMode::MovingFolder(FolderId(2)));
    assert!(ws.cancel_move());
    assert!(!ws.cancel_move());
    assert_eq!(ws.selection().len(), 1);
}

#[tokio::test]
async fn folder_crud_round_trip() {
    let mut ws = workspace().await;

    assert!(matches!(
        ws.create_folder("   ", None).await,
        Err(ConsoleError::EmptyFolderName)
    ));
    assert_eq!(count(&ws, "create_folder"), 0);

    let created = ws.create_folder("  Snacks ", Some(FolderId(7))).await.unwrap();
    assert_eq!(created.name, "Snacks");
    assert!(ws.is_expanded(FolderId(7)));
    assert_eq!(ws.folders().len(), 5);

    let renamed = ws.rename_folder(created.id, "Chips").await.unwrap();
    assert_eq!(renamed.name, "Chips");
    assert_eq!(ws.folder(created.id).unwrap().name, "Chips");

    ws.open_folder(Some(created.id)).unwrap();
    ws.delete_folder(created.id).await.unwrap();
    assert_eq!(ws.active_folder(), None);
    assert!(ws.folder(created.id).is_none());
}

#[tokio::test]
async fn non_empty_folder_cannot_be_deleted() {
    let mut ws = workspace().await;
    let err = ws.delete_folder(FolderId(7)).await.unwrap_err();
    assert_eq!(err.to_string(), "Backend error: Folder is not empty");
    assert!(ws.folder(FolderId(7)).is_some());
}

#[tokio::test]
async fn sidebar_honours_expanded_set() {
    let mut ws = workspace().await;
    let names = |ws: &FolderWorkspace<MemoryBackend<Product>>| -> Vec<(usize, String)> {
        ws.sidebar().into_iter().map(|r| (r.depth, r.name)).collect()
    };
    assert_eq!(names(&ws), [(0, "A".to_string()), (0, "Drinks".to_string())]);

    ws.expand_path_to(FolderId(2));
    assert_eq!(names(&ws).len(), 4);
    assert!(ws.toggle_expanded(FolderId(3)));
    assert!(!ws.toggle_expanded(FolderId(1)));
    assert_eq!(names(&ws).len(), 2);

    let drinks = ws.sidebar().into_iter().find(|r| r.id == FolderId(7)).unwrap();
    assert_eq!(drinks.item_count, 1);
    assert!(!drinks.has_children);
}

#[tokio::test]
async fn click_semantics_follow_grid_behavior() {
    let mut ws = workspace().await;
    let behavior = GridBehavior::default();
    ws.click_item(ItemId(5), false, &behavior);
    ws.click_item(ItemId(6), false, &behavior);
    assert_eq!(ws.selection().to_vec(), [ItemId(6)]);
    ws.click_item(ItemId(5), true, &behavior);
    assert_eq!(ws.selection().len(), 2);
    ws.clear_selection();
    assert!(ws.selection().is_empty());
}

#[tokio::test]
async fn customers_use_their_own_noun() {
    let backend = MemoryBackend::new(folders(), vec![Customer::new(1, "Acme", None)]);
    let mut ws = FolderWorkspace::load(backend).await.unwrap();
    ws.toggle_item(ItemId(1));
    ws.begin_move_items().unwrap();
    let report = ws.commit_move_items(Some(FolderId(2))).await.unwrap();
    assert_eq!(report.message, "1 customer moved to \"B\"");
}

#[tokio::test]
async fn selected_items_are_deleted() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));
    ws.toggle_item(ItemId(8));

    let deleted = ws.delete_selected(&GridBehavior::default()).await.unwrap();

    assert_eq!(deleted, 2);
    assert!(ws.selection().is_empty());
    assert_eq!(ws.items().len(), 2);
    assert_eq!(ws.item_count(Some(FolderId(7))), 0);
    assert_eq!(count(&ws, "delete_items"), 1);
}

#[tokio::test]
async fn delete_needs_selection_and_permission() {
    let mut ws = workspace().await;
    assert!(matches!(
        ws.delete_selected(&GridBehavior::default()).await,
        Err(ConsoleError::EmptySelection)
    ));

    ws.toggle_item(ItemId(5));
    let locked = GridBehavior {
        delete_enabled: false,
        ..GridBehavior::default()
    };
    let err = ws.delete_selected(&locked).await.unwrap_err();
    assert!(matches!(err, ConsoleError::DeleteDisabled));
    assert!(err.is_validation());

    assert_eq!(count(&ws, "delete_items"), 0);
    assert_eq!(ws.items().len(), 4);
    assert_eq!(ws.selection().len(), 1);
}

#[tokio::test]
async fn failed_delete_keeps_selection() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));
    ws.toggle_item(ItemId(6));
    ws.backend().set_available(false);

    let err = ws.delete_selected(&GridBehavior::default()).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Backend(_)));
    assert_eq!(ws.selection().len(), 2);
    assert_eq!(ws.items().len(), 4);
    assert_eq!(ws.backend().items().len(), 4);
}

#[tokio::test]
async fn moving_the_open_folder_follows_it_to_the_new_parent() {
    let mut ws = workspace().await;
    ws.open_folder(Some(FolderId(3))).unwrap();
    ws.toggle_item(ItemId(9));
    ws.begin_move_folder(FolderId(3)).unwrap();

    ws.commit_move_folder(Some(FolderId(7))).await.unwrap();

    assert_eq!(ws.active_folder(), Some(FolderId(7)));
    assert!(ws.selection().is_empty());
    assert_eq!(ws.folder(FolderId(3)).unwrap().parent_id, Some(FolderId(7)));
}

#[tokio::test]
async fn item_commit_leaves_a_pending_folder_move_alone() {
    let mut ws = workspace().await;
    ws.toggle_item(ItemId(5));
    ws.begin_move_folder(FolderId(2)).unwrap();

    let err = ws.commit_move_items(Some(FolderId(7))).await.unwrap_err();

    assert!(matches!(err, ConsoleError::NoActiveMove));
    assert_eq!(ws.mode(), MoveMode::MovingFolder(FolderId(2)));
    assert_eq!(ws.selection().len(), 1);
    assert_eq!(count(&ws, "reassign_items_folder"), 0);
}

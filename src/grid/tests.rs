use super::*;
use crate::api::TestBackend;
use crate::surface::{MemoryGrid, RecordingNotifier};

fn editor(rows: usize) -> GridEditor<MemoryGrid> {
    GridEditor::new(MemoryGrid::new(rows), Categories::default(), FillMode::Rectangle)
}

fn at(row: usize, col: Column) -> RowCol {
    RowCol::new(row, col.index())
}

fn value(editor: &GridEditor<MemoryGrid>, row: usize, col: Column) -> String {
    editor.value(row, col).unwrap_or_default()
}

fn marks(editor: &GridEditor<MemoryGrid>, at: RowCol) -> CellMarks {
    editor.surface().cell(at).map(|c| c.marks).unwrap_or_default()
}

/// Fills one complete, valid row.
fn fill_row(editor: &mut GridEditor<MemoryGrid>, row: usize, ty: &str, date: &str, amount: &str) {
    let line = format!("{ty}\t{date}\tcash\t\t{amount}\tlunch\t");
    editor.paste_block(&line, row, 0);
}

const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Tab,
    Direction::BackTab,
    Direction::Enter,
    Direction::ShiftEnter,
];

#[test]
fn test_new_activates_first_cell_and_numbers_rows() {
    let editor = editor(3);
    assert_eq!(editor.active_cell(), Some(RowCol::new(0, 0)));
    assert_eq!(editor.anchor(), Some(RowCol::new(0, 0)));
    assert_eq!(editor.selection(), Some(CellRange::cell(RowCol::new(0, 0))));
    assert_eq!(editor.surface().focused(), Some(RowCol::new(0, 0)));
    for row in 0..3 {
        assert_eq!(editor.surface().row_number(row), Some(row + 1));
    }
    assert_eq!(editor.state(), EditorState::Idle);
}

#[test]
fn test_empty_grid_has_no_active_cell() {
    let mut editor = editor(0);
    assert_eq!(editor.active_cell(), None);
    assert!(!editor.move_active_cell(Direction::Down));
    assert!(!editor.set_active_cell(0, 0, false));
    assert_eq!(editor.delete_selection(), 0);
}

#[test]
fn test_set_active_cell_out_of_bounds_is_ignored() {
    let mut editor = editor(2);
    assert!(editor.set_active_cell(1, 3, false));
    assert!(!editor.set_active_cell(2, 0, false));
    assert!(!editor.set_active_cell(0, Column::EDITABLE, false));
    assert_eq!(editor.active_cell(), Some(RowCol::new(1, 3)));
}

#[test]
fn test_set_active_cell_keep_selection() {
    let mut editor = editor(5);
    editor.set_active_cell(1, 1, false);
    editor.extend_selection(3, 2);
    assert!(editor.set_active_cell(2, 2, true));
    assert_eq!(editor.anchor(), Some(RowCol::new(1, 1)));
    assert_eq!(editor.active_cell(), Some(RowCol::new(2, 2)));
    assert_eq!(
        editor.selection(),
        Some(CellRange::spanning(RowCol::new(1, 1), RowCol::new(3, 2)))
    );
}

#[test]
fn test_extend_selection_is_bounding_box() {
    let mut editor = editor(6);
    editor.set_active_cell(4, 5, false);
    assert!(editor.extend_selection(1, 2));
    let selection = editor.selection().unwrap();
    assert_eq!(selection.top_left(), RowCol::new(1, 2));
    assert_eq!(selection.bottom_right(), RowCol::new(4, 5));
    assert_eq!(selection.len(), 16);
    // The anchor does not move.
    assert_eq!(editor.anchor(), Some(RowCol::new(4, 5)));
    assert!(!editor.extend_selection(6, 0));
}

#[test]
fn test_marks_follow_state() {
    let mut editor = editor(3);
    editor.set_active_cell(0, 0, false);
    editor.extend_selection(1, 1);
    assert!(marks(&editor, RowCol::new(0, 0)).active);
    assert!(marks(&editor, RowCol::new(1, 1)).selected);
    assert!(!marks(&editor, RowCol::new(1, 1)).active);
    assert!(!marks(&editor, RowCol::new(2, 0)).selected);

    editor.set_active_cell(2, 2, false);
    assert!(!marks(&editor, RowCol::new(1, 1)).selected);
    assert!(!marks(&editor, RowCol::new(0, 0)).active);
    assert!(marks(&editor, RowCol::new(2, 2)).active);
}

#[test]
fn test_tab_wraps_rows() {
    let mut editor = editor(2);
    let last_col = Column::EDITABLE - 1;
    editor.set_active_cell(0, last_col, false);
    assert!(editor.move_active_cell(Direction::Tab));
    assert_eq!(editor.active_cell(), Some(RowCol::new(1, 0)));
    assert!(editor.move_active_cell(Direction::BackTab));
    assert_eq!(editor.active_cell(), Some(RowCol::new(0, last_col)));
}

#[test]
fn test_tab_stops_at_the_ends() {
    let mut editor = editor(2);
    let last_col = Column::EDITABLE - 1;
    editor.set_active_cell(1, last_col, false);
    editor.move_active_cell(Direction::Tab);
    assert_eq!(editor.active_cell(), Some(RowCol::new(1, last_col)));
    editor.set_active_cell(0, 0, false);
    editor.move_active_cell(Direction::BackTab);
    assert_eq!(editor.active_cell(), Some(RowCol::new(0, 0)));
}

#[test]
fn test_arrows_clamp_at_edges() {
    let mut editor = editor(3);
    editor.set_active_cell(0, 0, false);
    assert!(!editor.move_active_cell(Direction::Up));
    assert!(!editor.move_active_cell(Direction::Left));
    assert!(editor.move_active_cell(Direction::Down));
    assert!(editor.move_active_cell(Direction::Right));
    assert_eq!(editor.active_cell(), Some(RowCol::new(1, 1)));
    editor.set_active_cell(2, Column::EDITABLE - 1, false);
    assert!(!editor.move_active_cell(Direction::Down));
    assert!(!editor.move_active_cell(Direction::Right));
}

#[test]
fn test_arrow_at_edge_keeps_selection() {
    let mut editor = editor(3);
    editor.set_active_cell(0, 0, false);
    editor.extend_selection(1, 1);
    editor.move_active_cell(Direction::Up);
    assert_eq!(editor.selection().map(|s| s.len()), Some(4));
}

#[test]
fn test_enter_moves_down_and_shift_enter_moves_up() {
    let mut editor = editor(3);
    editor.set_active_cell(1, 4, false);
    editor.move_active_cell(Direction::Enter);
    assert_eq!(editor.active_cell(), Some(RowCol::new(2, 4)));
    editor.move_active_cell(Direction::Enter);
    assert_eq!(editor.active_cell(), Some(RowCol::new(2, 4)));
    editor.move_active_cell(Direction::ShiftEnter);
    editor.move_active_cell(Direction::ShiftEnter);
    editor.move_active_cell(Direction::ShiftEnter);
    assert_eq!(editor.active_cell(), Some(RowCol::new(0, 4)));
}

#[test]
fn test_movement_collapses_selection() {
    let mut editor = editor(4);
    editor.set_active_cell(0, 0, false);
    editor.extend_selection(2, 2);
    editor.move_active_cell(Direction::Down);
    assert_eq!(editor.selection(), Some(CellRange::cell(RowCol::new(1, 0))));
    assert_eq!(editor.anchor(), Some(RowCol::new(1, 0)));
}

#[test]
fn test_movement_never_leaves_the_grid() {
    for rows in 1..4 {
        let mut editor = editor(rows);
        for row in 0..rows {
            for col in 0..Column::EDITABLE {
                for direction in ALL_DIRECTIONS {
                    editor.set_active_cell(row, col, false);
                    editor.move_active_cell(direction);
                    let active = editor.active_cell().unwrap();
                    assert!(
                        active.within(rows, Column::EDITABLE),
                        "{direction:?} from ({row}, {col}) left a {rows}-row grid"
                    );
                    assert_eq!(editor.anchor(), Some(active));
                }
            }
        }
    }
}

#[test]
fn test_delete_key_clears_selection_only() {
    let mut editor = editor(3);
    fill_row(&mut editor, 0, "expense", "2025-10-01", "1000");
    fill_row(&mut editor, 1, "income", "2025-10-02", "2000");
    editor.set_active_cell(0, Column::Date.index(), false);
    editor.extend_selection(1, Column::Asset.index());
    assert!(editor.key_down(Key::Delete));
    assert_eq!(value(&editor, 0, Column::Date), "");
    assert_eq!(value(&editor, 1, Column::Asset), "");
    assert_eq!(value(&editor, 0, Column::Type), "expense");
    assert_eq!(value(&editor, 1, Column::Amount), "2,000");
    assert_eq!(editor.row_count(), 3);
}

#[test]
fn test_delete_selection_then_collect_skips_cleared_rows() {
    let mut editor = editor(2);
    fill_row(&mut editor, 0, "expense", "2025-10-01", "1000");
    editor.set_active_cell(0, 0, false);
    editor.extend_selection(0, Column::EDITABLE - 1);
    editor.delete_selection();
    assert_eq!(editor.collect_transactions().unwrap(), Vec::new());
}

#[test]
fn test_paste_block_writes_rectangle() {
    let mut editor = editor(4);
    let written = editor.paste_block("2025-10-01\tcash\n2025-10-02\tbank\r\n", 1, 1);
    assert_eq!(written, 4);
    assert_eq!(value(&editor, 1, Column::Date), "2025-10-01");
    assert_eq!(value(&editor, 1, Column::Asset), "cash");
    assert_eq!(value(&editor, 2, Column::Date), "2025-10-02");
    assert_eq!(value(&editor, 2, Column::Asset), "bank");
    // The trailing line break does not blank the next row.
    assert_eq!(value(&editor, 3, Column::Date), "");
}

#[test]
fn test_paste_block_drops_overflow() {
    let mut editor = editor(2);
    let text = "a\tb\tc\nd\te\tf\ng\th\ti";
    let written = editor.paste_block(text, 1, Column::Content.index());
    // Content and memo of the last row only.
    assert_eq!(written, 2);
    assert_eq!(editor.row_count(), 2);
    assert_eq!(value(&editor, 1, Column::Content), "a");
    assert_eq!(value(&editor, 1, Column::Memo), "b");
    assert_eq!(editor.paste_block("x", 5, 0), 0);
}

#[test]
fn test_paste_block_type_sets_categories() {
    let mut editor = editor(1);
    editor.paste_block("income\t2025-10-01\tbank\tBonus\t3000000", 0, 0);
    assert_eq!(value(&editor, 0, Column::Type), "income");
    assert_eq!(value(&editor, 0, Column::Category), "Bonus");
    assert_eq!(value(&editor, 0, Column::Amount), "3,000,000");
    let cell = editor.surface().cell(at(0, Column::Type)).unwrap();
    assert_eq!(cell.tone, Tone::Blue);
}

#[test]
fn test_paste_block_rejects_unknown_options() {
    let mut editor = editor(1);
    let written = editor.paste_block("transfer\t2025-10-01\twallet", 0, 0);
    assert_eq!(written, 1);
    assert_eq!(value(&editor, 0, Column::Type), "");
    assert_eq!(value(&editor, 0, Column::Asset), "");
}

#[test]
fn test_drag_fill_rectangle() {
    let mut editor = editor(4);
    editor.paste_block("2025-10-01", 0, Column::Date.index());
    let filled = editor.drag_fill(at(0, Column::Date), at(2, Column::Date));
    assert_eq!(filled, 2);
    for row in 0..3 {
        assert_eq!(value(&editor, row, Column::Date), "2025-10-01");
    }
    assert_eq!(value(&editor, 3, Column::Date), "");
}

#[test]
fn test_drag_fill_upwards() {
    let mut editor = editor(4);
    editor.paste_block("hello", 3, Column::Content.index());
    let filled = editor.drag_fill(at(3, Column::Content), at(1, Column::Memo));
    assert_eq!(filled, 5);
    assert_eq!(value(&editor, 1, Column::Content), "hello");
    assert_eq!(value(&editor, 1, Column::Memo), "hello");
    assert_eq!(value(&editor, 0, Column::Content), "");
}

#[test]
fn test_drag_fill_column_mode() {
    let mut editor = GridEditor::new(MemoryGrid::new(3), Categories::default(), FillMode::Column);
    editor.paste_block("memo", 0, Column::Content.index());
    let filled = editor.drag_fill(at(0, Column::Content), at(2, Column::Memo));
    assert_eq!(filled, 2);
    assert_eq!(value(&editor, 2, Column::Content), "memo");
    assert_eq!(value(&editor, 2, Column::Memo), "");
}

#[test]
fn test_drag_fill_type_resets_categories() {
    let mut editor = editor(3);
    editor.paste_block("expense\t\t\tFood", 0, 0);
    editor.paste_block("income\t\t\tSalary", 1, 0);
    editor.drag_fill(at(0, Column::Type), at(1, Column::Type));
    assert_eq!(value(&editor, 1, Column::Type), "expense");
    assert_eq!(value(&editor, 1, Column::Category), "");
    let options = editor.surface().cell(at(1, Column::Category)).unwrap().options;
    assert!(options.contains(&String::from("Food")));
    assert!(!options.contains(&String::from("Salary")));
}

#[test]
fn test_paste_same_type_keeps_category() {
    let mut editor = editor(2);
    editor.paste_block("expense\t2025-10-01\tcard\tFood\t1000", 0, 0);
    let before: Vec<String> = Column::ALL
        .iter()
        .map(|col| value(&editor, 0, *col))
        .collect();

    let written = editor.paste_block("expense\t2025-10-02", 0, 0);
    assert_eq!(written, 2);
    assert_eq!(value(&editor, 0, Column::Date), "2025-10-02");
    for (col, old) in Column::ALL.iter().zip(&before).skip(2) {
        assert_eq!(&value(&editor, 0, *col), old, "{col:?} changed");
    }
    assert_eq!(value(&editor, 0, Column::Category), "Food");
}

#[test]
fn test_drag_fill_same_type_keeps_categories() {
    let mut editor = editor(2);
    editor.paste_block("expense\t\t\tFood", 0, 0);
    editor.paste_block("expense\t\t\tTransport", 1, 0);
    editor.drag_fill(at(0, Column::Type), at(1, Column::Type));
    assert_eq!(value(&editor, 1, Column::Category), "Transport");
    assert!(editor.input(at(1, Column::Type), "expense"));
    assert_eq!(value(&editor, 1, Column::Category), "Transport");
}

#[test]
fn test_drag_fill_out_of_bounds() {
    let mut editor = editor(2);
    assert_eq!(editor.drag_fill(RowCol::new(0, 0), RowCol::new(5, 0)), 0);
}

#[test]
fn test_pointer_selection_gesture() {
    let mut editor = editor(5);
    assert!(editor.pointer_down(RowCol::new(1, 1)));
    assert_eq!(editor.state(), EditorState::Selecting);
    editor.pointer_over(RowCol::new(3, 2));
    editor.pointer_over(RowCol::new(2, 4));
    assert_eq!(
        editor.selection(),
        Some(CellRange::spanning(RowCol::new(1, 1), RowCol::new(2, 4)))
    );
    assert_eq!(editor.pointer_up(), 0);
    assert_eq!(editor.state(), EditorState::Idle);
    // Moving without the button held changes nothing.
    assert!(!editor.pointer_over(RowCol::new(4, 4)));
}

#[test]
fn test_pointer_fill_gesture() {
    let mut editor = editor(4);
    editor.paste_block("cash", 0, Column::Asset.index());
    editor.set_active_cell(0, Column::Asset.index(), false);
    assert!(editor.fill_handle_down());
    assert_eq!(editor.state(), EditorState::Filling);
    assert_eq!(editor.fill_range(), None);
    editor.pointer_over(at(3, Column::Asset));
    assert!(marks(&editor, at(2, Column::Asset)).filling);
    assert_eq!(editor.pointer_up(), 3);
    assert_eq!(editor.state(), EditorState::Idle);
    assert!(!marks(&editor, at(2, Column::Asset)).filling);
    assert_eq!(value(&editor, 3, Column::Asset), "cash");
}

#[test]
fn test_fill_handle_released_in_place() {
    let mut editor = editor(2);
    editor.fill_handle_down();
    assert_eq!(editor.pointer_up(), 0);
    assert_eq!(editor.state(), EditorState::Idle);
}

#[test]
fn test_pointer_down_cancels_fill() {
    let mut editor = editor(3);
    editor.fill_handle_down();
    editor.pointer_over(RowCol::new(2, 0));
    editor.pointer_down(RowCol::new(1, 1));
    assert_eq!(editor.state(), EditorState::Selecting);
    assert_eq!(editor.fill_range(), None);
    assert_eq!(editor.pointer_up(), 0);
}

#[test]
fn test_amount_shows_digits_while_focused() {
    let mut editor = editor(2);
    editor.set_active_cell(0, Column::Amount.index(), false);
    assert!(editor.input(at(0, Column::Amount), "12a,345"));
    assert_eq!(value(&editor, 0, Column::Amount), "12345");
    editor.move_active_cell(Direction::Right);
    assert_eq!(value(&editor, 0, Column::Amount), "12,345");
    editor.move_active_cell(Direction::Left);
    assert_eq!(value(&editor, 0, Column::Amount), "12345");
    editor.blur();
    assert_eq!(value(&editor, 0, Column::Amount), "12,345");
}

#[test]
fn test_input_type_changes_categories() {
    let mut editor = editor(1);
    editor.input(at(0, Column::Type), "income");
    let cell = editor.surface().cell(at(0, Column::Category)).unwrap();
    assert_eq!(cell.options.len(), Categories::default().income().len() + 1);
    assert!(!editor.input(at(0, Column::Type), "refund"));
}

#[test]
fn test_on_type_changed() {
    let mut editor = editor(2);
    editor.paste_block("expense\t\t\tFood", 0, 0);
    assert!(editor.on_type_changed(0, Some(TransactionType::Income)));
    assert_eq!(value(&editor, 0, Column::Category), "");
    let type_cell = editor.surface().cell(at(0, Column::Type)).unwrap();
    assert_eq!(type_cell.tone, Tone::Blue);

    assert!(editor.on_type_changed(0, None));
    let category = editor.surface().cell(at(0, Column::Category)).unwrap();
    assert_eq!(category.options, vec![String::new()]);
    let type_cell = editor.surface().cell(at(0, Column::Type)).unwrap();
    assert_eq!(type_cell.tone, Tone::Neutral);

    assert!(!editor.on_type_changed(9, Some(TransactionType::Expense)));
}

#[tokio::test]
async fn test_refresh_categories_from_backend() {
    let backend = TestBackend::default();
    let mut editor = editor(1);
    assert!(
        editor
            .refresh_categories(0, TransactionType::Expense, &backend)
            .await
    );
    let options = editor.surface().cell(at(0, Column::Category)).unwrap().options;
    assert_eq!(options.len(), 5);
    assert!(options.contains(&String::from("Transport")));
    assert_eq!(value(&editor, 0, Column::Type), "expense");
}

#[tokio::test]
async fn test_refresh_categories_falls_back() {
    let backend = TestBackend::default();
    backend.fail_next(ApiError::Transport(String::from("offline")));
    let mut editor = editor(1);
    editor
        .refresh_categories(0, TransactionType::Income, &backend)
        .await;
    let options = editor.surface().cell(at(0, Column::Category)).unwrap().options;
    assert_eq!(options.len(), Categories::default().income().len() + 1);
}

#[test]
fn test_add_and_delete_rows_renumber() {
    let mut editor = editor(2);
    assert_eq!(editor.add_row(), 2);
    assert_eq!(editor.surface().row_number(2), Some(3));
    editor.paste_block("row two", 1, Column::Content.index());
    assert!(editor.delete_row(0));
    assert_eq!(editor.row_count(), 2);
    assert_eq!(editor.surface().row_number(0), Some(1));
    assert_eq!(editor.surface().row_number(1), Some(2));
    assert_eq!(value(&editor, 0, Column::Content), "row two");
    assert!(!editor.delete_row(7));
}

#[test]
fn test_deleting_the_active_row_keeps_cursor_in_bounds() {
    let mut editor = editor(3);
    editor.set_active_cell(2, 3, false);
    editor.delete_row(2);
    assert_eq!(editor.active_cell(), Some(RowCol::new(1, 3)));
    editor.delete_row(0);
    editor.delete_row(0);
    assert_eq!(editor.row_count(), 0);
    assert_eq!(editor.active_cell(), None);
    assert_eq!(editor.selection(), None);
    editor.add_row();
    assert_eq!(editor.active_cell(), Some(RowCol::new(0, 0)));
}

#[test]
fn test_reset_grid() {
    let mut editor = editor(3);
    fill_row(&mut editor, 1, "income", "2025-10-01", "5000");
    editor.set_active_cell(2, 2, false);
    editor.reset_grid(10);
    assert_eq!(editor.row_count(), 10);
    assert_eq!(editor.surface().row_number(9), Some(10));
    assert_eq!(editor.active_cell(), Some(RowCol::new(0, 0)));
    assert_eq!(value(&editor, 1, Column::Type), "");
    assert_eq!(editor.collect_transactions().unwrap(), Vec::new());
}

#[test]
fn test_validate_blank_row() {
    let editor = editor(1);
    assert_eq!(editor.validate_row(0), Ok(None));
}

#[test]
fn test_validate_row_requires_type_amount_and_date() {
    let mut editor = editor(3);
    editor.paste_block("\t2025-10-01\t\t\t500", 0, 0);
    let e = editor.validate_row(0).unwrap_err();
    assert_eq!(e.field(), Column::Type);
    assert_eq!(e.row(), 0);
    assert!(e.to_string().starts_with("Row 1: "));

    editor.paste_block("expense\t2025-10-01", 1, 0);
    assert_eq!(editor.validate_row(1).unwrap_err().field(), Column::Amount);

    editor.paste_block("expense\t2025-13-01\t\t\t500", 2, 0);
    let e = editor.validate_row(2).unwrap_err();
    assert_eq!(e.field(), Column::Date);
    assert!(e.to_string().starts_with("Row 3: "));
}

#[test]
fn test_validate_row_builds_transaction() {
    let mut editor = editor(1);
    editor.paste_block(
        "expense\t2025-10-03\tcard\tFood\t12,500\tlunch\twith team",
        0,
        0,
    );
    let t = editor.validate_row(0).unwrap().unwrap();
    assert_eq!(t.r#type, TransactionType::Expense);
    assert_eq!(t.date, "2025-10-03");
    assert_eq!(t.asset, "card");
    assert_eq!(t.category, "Food");
    assert_eq!(t.amount, "12500");
    assert_eq!(t.content, "lunch");
    assert_eq!(t.memo, "with team");
}

#[test]
fn test_collect_transactions_in_row_order() {
    let mut editor = editor(5);
    fill_row(&mut editor, 3, "income", "2025-10-04", "40");
    fill_row(&mut editor, 1, "expense", "2025-10-02", "20");
    let batch = editor.collect_transactions().unwrap();
    let amounts: Vec<&str> = batch.iter().map(|t| t.amount.as_str()).collect();
    assert_eq!(amounts, vec!["20", "40"]);
}

#[test]
fn test_collect_transactions_stops_at_first_invalid_row() {
    let mut editor = editor(4);
    fill_row(&mut editor, 0, "income", "2025-10-01", "10");
    editor.paste_block("expense", 1, 0);
    editor.paste_block("expense", 2, 0);
    assert_eq!(editor.collect_transactions().unwrap_err().row(), 1);
}

#[tokio::test]
async fn test_save_sends_batch_and_reloads() {
    let backend = TestBackend::empty();
    let mut notifier = RecordingNotifier::default();
    let mut editor = editor(3);
    fill_row(&mut editor, 0, "expense", "2025-10-01", "1,000");
    fill_row(&mut editor, 2, "income", "2025-10-02", "2000");
    let saved = editor.save(&backend, &mut notifier).await.unwrap();
    assert_eq!(saved, 2);
    assert_eq!(notifier.reloads, 1);
    assert_eq!(notifier.last_alert(), Some("Saved."));
    let state = backend.state();
    assert_eq!(state.bulk_saves.len(), 1);
    assert_eq!(state.bulk_saves[0][0].amount, "1000");
    assert_eq!(editor.state(), EditorState::Idle);
}

#[tokio::test]
async fn test_save_nothing() {
    let backend = TestBackend::empty();
    let mut notifier = RecordingNotifier::default();
    let mut editor = editor(3);
    let e = editor.save(&backend, &mut notifier).await.unwrap_err();
    assert_eq!(e, SaveError::NothingToSave);
    assert_eq!(notifier.last_alert(), Some("Nothing to save."));
    assert_eq!(backend.state().calls, 0);
}

#[tokio::test]
async fn test_save_invalid_row_sends_nothing() {
    let backend = TestBackend::empty();
    let mut notifier = RecordingNotifier::default();
    let mut editor = editor(3);
    fill_row(&mut editor, 0, "expense", "2025-10-01", "1000");
    editor.paste_block("income\t\t\t\t500", 1, 0);
    let e = editor.save(&backend, &mut notifier).await.unwrap_err();
    assert!(matches!(e, SaveError::Validation(_)));
    assert!(notifier.last_alert().unwrap().starts_with("Row 2: "));
    assert_eq!(backend.state().calls, 0);
    assert_eq!(notifier.reloads, 0);
}

#[tokio::test]
async fn test_save_failure_keeps_grid() {
    let backend = TestBackend::empty();
    backend.fail_next(ApiError::Server {
        status: Some(400),
        message: Some(String::from("bad date")),
    });
    let mut notifier = RecordingNotifier::default();
    let mut editor = editor(2);
    fill_row(&mut editor, 0, "expense", "2025-10-01", "1000");
    let e = editor.save(&backend, &mut notifier).await.unwrap_err();
    assert!(matches!(e, SaveError::Api(_)));
    assert_eq!(notifier.last_alert(), Some("Error while saving: bad date"));
    assert_eq!(notifier.reloads, 0);
    assert_eq!(value(&editor, 0, Column::Amount), "1,000");
    assert_eq!(editor.state(), EditorState::Idle);
    // The next attempt goes through.
    assert_eq!(editor.save(&backend, &mut notifier).await, Ok(1));
}

#[test]
fn test_second_save_is_rejected_while_in_flight() {
    let mut editor = editor(1);
    fill_row(&mut editor, 0, "income", "2025-10-01", "1");
    let batch = editor.begin_save().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(editor.state(), EditorState::Saving);
    assert_eq!(editor.begin_save(), Err(SaveError::InFlight));
    assert_eq!(editor.finish_save(Ok(1)), Ok(1));
    assert_eq!(editor.state(), EditorState::Idle);
    assert!(editor.begin_save().is_ok());
}

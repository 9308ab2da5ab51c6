use std::collections::BTreeSet;

use super::*;
use crate::model::{Category, CategoryKind, Cell, ValueKey, ValueKind};
use crate::wire::ValueItem;

fn region() -> CategoryItem {
    CategoryItem::new(
        "Region",
        vec![
            ValueItem::total("All regions"),
            ValueItem::usual("e", "East"),
            ValueItem::usual("w", "West").with_children(vec![
                ValueItem::total("All of West"),
                ValueItem::usual("n", "North").with_children(vec![
                    ValueItem::total("All of North"),
                    ValueItem::usual("nu", "Upper"),
                    ValueItem::usual("nl", "Lower"),
                ]),
                ValueItem::usual("s", "South"),
            ]),
        ],
    )
}

fn brand() -> CategoryItem {
    CategoryItem::new(
        "Brand",
        vec![
            ValueItem::total("All brands"),
            ValueItem::usual("b1", "Acme"),
            ValueItem::usual("other", "Other").with_children(vec![
                ValueItem::total("Any"),
                ValueItem::hidden("promo", "Promo"),
                ValueItem::hidden("sale", "Sale"),
            ]),
            ValueItem::button("More brands"),
        ],
    )
}

fn sort() -> CategoryItem {
    CategoryItem::new(
        "Sort",
        vec![ValueItem::total("Relevance"), ValueItem::usual("price", "Price")],
    )
}

fn engine_with(mode: DrillDownMode, remote: &[CategoryItem]) -> SelectionEngine {
    let mut engine = SelectionEngine::new(mode);
    let _ = engine.initialize(remote, &[sort()], Vec::new());
    engine
}

fn names(engine: &SelectionEngine) -> Vec<&str> {
    engine
        .catalog()
        .categories()
        .iter()
        .map(Category::name)
        .filter(|name| *name != "Sort")
        .collect()
}

fn ids(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|id| id.to_string()).collect()
}

fn key(engine: &SelectionEngine, category: &str, id: &str) -> ValueKey {
    let index = engine.catalog().position(category).expect("category");
    engine.catalog().find_value(index, id).expect("value")
}

fn child(engine: &SelectionEngine, parent: ValueKey, id: &str) -> ValueKey {
    let arena = engine.catalog().arena();
    arena[parent]
        .children()
        .iter()
        .copied()
        .find(|&child| arena[child].id() == id)
        .expect("child")
}

fn is_selected(engine: &SelectionEngine, key: ValueKey) -> bool {
    engine.catalog().arena()[key].is_selected()
}

fn assert_consistent(engine: &SelectionEngine) {
    let arena = engine.catalog().arena();
    for category in engine.catalog().categories() {
        let exclusive = category
            .values()
            .iter()
            .filter(|&&key| arena[key].kind().is_exclusive() && arena[key].is_selected())
            .count();
        assert!(exclusive <= 1, "{} has {exclusive} exclusive selections", category.name());

        let expected: Vec<Cell> = category
            .values()
            .iter()
            .filter_map(|&key| match arena[key].kind() {
                ValueKind::Hidden if arena[key].is_selected() => Some(Cell::Closable(key)),
                ValueKind::Hidden => None,
                ValueKind::Button => Some(Cell::Button {
                    title: arena[key].name().to_string(),
                }),
                _ => Some(Cell::Plain(key)),
            })
            .collect();
        assert_eq!(category.cells(), expected.as_slice(), "stale cells in {}", category.name());
    }
}

#[test]
fn selecting_value_with_options_inserts_row_after_category() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let transition = engine.select_value(0, "w");

    assert!(transition.changed());
    assert!(transition.picker_request().is_none());
    assert_eq!(names(&engine), ["Region", "w"]);
    let row = &engine.catalog().categories()[1];
    let row_ids: Vec<&str> = row
        .values()
        .iter()
        .map(|&key| engine.catalog().arena()[key].id())
        .collect();
    assert_eq!(row_ids, ["", "n", "s"]);
    assert_eq!(row.kind(), CategoryKind::RemoteFilter);
    assert!(!is_selected(&engine, key(&engine, "Region", "")));
    assert_eq!(engine.selected_filter_ids(), ids(&["w"]));
    assert_consistent(&engine);
}

#[test]
fn total_inside_row_collapses_it_and_restores_owner() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    let transition = engine.select_value(1, "");

    assert!(transition.changed());
    assert_eq!(names(&engine), ["Region"]);
    assert!(is_selected(&engine, key(&engine, "Region", "")));
    assert!(engine.selected_filter_ids().is_empty());
    assert_consistent(&engine);
}

#[test]
fn dismissing_last_chip_removes_row_and_resets_parent() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let other = key(&engine, "Brand", "other");
    let transition = engine.select_value(0, "other");
    let request = transition.into_picker_request().expect("picker");
    assert_eq!(request.parent(), Some(other));
    assert_eq!(request.category(), "other");
    assert!(request.preselected().is_empty());

    let promo = child(&engine, other, "promo");
    let _ = engine.apply_picker_result(request.resolve(vec![promo]));
    assert_eq!(names(&engine), ["Brand", "other"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["other", "promo"]));
    let row = engine.catalog().position("other").expect("chip row");
    assert_eq!(engine.catalog().categories()[row].cells(), [Cell::Closable(promo)]);

    let transition = engine.select_value(row, "promo");
    assert!(transition.changed());
    assert_eq!(names(&engine), ["Brand"]);
    assert!(!is_selected(&engine, other));
    assert!(is_selected(&engine, key(&engine, "Brand", "")));
    assert!(engine.selected_filter_ids().is_empty());
    assert_consistent(&engine);
}

#[test]
fn removing_one_of_several_chips_keeps_row() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let other = key(&engine, "Brand", "other");
    let request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let promo = child(&engine, other, "promo");
    let sale = child(&engine, other, "sale");
    let _ = engine.apply_picker_result(request.resolve(vec![promo, sale]));

    let row = engine.catalog().position("other").expect("chip row");
    let _ = engine.select_value(row, "promo");
    assert_eq!(names(&engine), ["Brand", "other"]);
    assert_eq!(engine.catalog().categories()[row].values(), [sale]);
    assert_eq!(engine.selected_filter_ids(), ids(&["other", "sale"]));
    assert_consistent(&engine);
}

#[test]
fn tapping_elsewhere_drops_chip_row() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region(), brand()]);
    let other = key(&engine, "Brand", "other");
    let brand = engine.catalog().position("Brand").expect("brand");
    let request = engine
        .select_value(brand, "other")
        .into_picker_request()
        .expect("picker");
    let promo = child(&engine, other, "promo");
    let _ = engine.apply_picker_result(request.resolve(vec![promo]));
    assert_eq!(names(&engine), ["Region", "Brand", "other"]);

    let _ = engine.select_value(0, "w");
    assert_eq!(names(&engine), ["Region", "w", "Brand"]);
    assert!(!is_selected(&engine, promo));
    assert!(is_selected(&engine, other));
    assert_eq!(engine.selected_filter_ids(), ids(&["other", "w"]));
    assert_consistent(&engine);
}

#[test]
fn chip_rows_never_pile_up() {
    let colour = CategoryItem::new(
        "Colour",
        vec![
            ValueItem::total("Any"),
            ValueItem::usual("red", "Red").with_children(vec![
                ValueItem::total("Any red"),
                ValueItem::hidden("crimson", "Crimson"),
            ]),
        ],
    );
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand(), colour]);
    let other = key(&engine, "Brand", "other");
    let red = key(&engine, "Colour", "red");
    let brand_request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let colour_request = engine
        .select_value(1, "red")
        .into_picker_request()
        .expect("picker");

    let promo = child(&engine, other, "promo");
    let _ = engine.apply_picker_result(brand_request.resolve(vec![promo]));
    assert_eq!(names(&engine), ["Brand", "Colour", "other"]);

    let crimson = child(&engine, red, "crimson");
    let _ = engine.apply_picker_result(colour_request.resolve(vec![crimson]));
    assert_eq!(names(&engine), ["Brand", "Colour", "red"]);
    assert!(!is_selected(&engine, promo));
    assert!(is_selected(&engine, crimson));
    assert_eq!(engine.selected_filter_ids(), ids(&["other", "red", "crimson"]));
    assert_consistent(&engine);
}

#[test]
fn sparse_children_go_to_picker_without_touching_rows() {
    for mode in [DrillDownMode::RowPerDrillDown, DrillDownMode::ReplaceInPlace] {
        let sparse = CategoryItem::new(
            "Colour",
            vec![
                ValueItem::total("Any"),
                ValueItem::usual("red", "Red")
                    .with_children(vec![ValueItem::total("Any red"), ValueItem::hidden("dark", "Dark")]),
            ],
        );
        let mut engine = engine_with(mode, &[sparse]);
        let transition = engine.select_value(0, "red");
        let request = transition.picker_request().expect("picker");
        assert_eq!(request.values().len(), 2);
        assert_eq!(names(&engine), ["Colour"]);
    }
}

#[test]
fn dense_children_open_inline_without_picker() {
    for mode in [DrillDownMode::RowPerDrillDown, DrillDownMode::ReplaceInPlace] {
        let mut engine = engine_with(mode, &[region()]);
        let transition = engine.select_value(0, "w");
        assert!(transition.picker_request().is_none());
        assert_eq!(names(&engine), ["Region", "w"]);
    }
}

#[test]
fn switching_top_level_value_prunes_whole_chain() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    let _ = engine.select_value(1, "n");
    let _ = engine.select_value(2, "nu");
    assert_eq!(names(&engine), ["Region", "w", "n"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["w", "n", "nu"]));

    let _ = engine.select_value(0, "e");
    assert_eq!(names(&engine), ["Region"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["e"]));
    assert_consistent(&engine);

    // reopening starts from a clean subtree
    let _ = engine.select_value(0, "w");
    assert_eq!(names(&engine), ["Region", "w"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["w"]));
}

#[test]
fn switching_inside_row_only_prunes_the_sibling_branch() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    let _ = engine.select_value(1, "n");
    let _ = engine.select_value(1, "s");
    assert_eq!(names(&engine), ["Region", "w"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["w", "s"]));
    assert_consistent(&engine);
}

#[test]
fn deselecting_active_value_restores_total() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    let _ = engine.select_value(1, "n");
    let _ = engine.select_value(0, "w");

    assert_eq!(names(&engine), ["Region"]);
    assert!(is_selected(&engine, key(&engine, "Region", "")));
    assert!(engine.selected_filter_ids().is_empty());
    assert_consistent(&engine);
}

#[test]
fn deselecting_restores_declared_defaults_and_their_rows() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region().with_defaults(["w"])]);
    assert_eq!(names(&engine), ["Region", "w"]);

    let _ = engine.select_value(0, "e");
    assert_eq!(names(&engine), ["Region"]);
    let _ = engine.select_value(0, "e");
    assert_eq!(names(&engine), ["Region", "w"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["w"]));
    assert_consistent(&engine);
}

#[test]
fn initialize_opens_nested_default_chain() {
    let engine = engine_with(DrillDownMode::RowPerDrillDown, &[region().with_defaults(["w", "n"])]);
    assert_eq!(names(&engine), ["Region", "w", "n"]);
    assert_eq!(engine.selected_filter_ids(), ids(&["w", "n"]));
    let north = key(&engine, "w", "n");
    assert!(is_selected(&engine, child(&engine, north, "")));
    assert_consistent(&engine);
}

#[test]
fn initialize_selects_total_children_without_defaults() {
    let engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let west = key(&engine, "Region", "w");
    assert!(is_selected(&engine, child(&engine, west, "")));
    assert!(!is_selected(&engine, child(&engine, west, "n")));
}

#[test]
fn initialize_hands_back_picker_for_sparse_default() {
    let mut engine = SelectionEngine::new(DrillDownMode::RowPerDrillDown);
    let transition = engine.initialize(&[brand().with_defaults(["other"])], &[], Vec::new());
    assert!(transition.changed());
    let request = transition.into_picker_request().expect("picker");
    assert_eq!(request.category(), "other");
    assert_eq!(request.parent(), Some(key(&engine, "Brand", "other")));
    assert_eq!(names(&engine), ["Brand"]);
}

#[test]
fn initialize_without_sparse_default_has_no_picker() {
    let mut engine = SelectionEngine::new(DrillDownMode::RowPerDrillDown);
    let transition = engine.initialize(&[region().with_defaults(["w"])], &[], Vec::new());
    assert!(transition.picker_request().is_none());
}

#[test]
fn retapping_overflow_value_reopens_picker_without_mutation() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let other = key(&engine, "Brand", "other");
    let request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let promo = child(&engine, other, "promo");
    let _ = engine.apply_picker_result(request.resolve(vec![promo]));

    let before = engine.selected_filter_ids();
    let transition = engine.select_value(0, "other");
    assert!(!transition.changed());
    let request = transition.picker_request().expect("picker");
    assert_eq!(request.preselected(), [promo]);
    assert_eq!(engine.selected_filter_ids(), before);
}

#[test]
fn empty_drill_down_result_keeps_parent_without_row() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let other = key(&engine, "Brand", "other");
    let request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let _ = engine.apply_picker_result(request.resolve(Vec::new()));

    assert_eq!(names(&engine), ["Brand"]);
    assert!(is_selected(&engine, other));
    assert!(is_selected(&engine, child(&engine, other, "")));
    assert_eq!(engine.selected_filter_ids(), ids(&["other"]));
}

#[test]
fn button_picker_replaces_category_front() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let request = engine.press_button(0).into_picker_request().expect("picker");
    assert!(request.parent().is_none());
    assert_eq!(request.category(), "Brand");

    let acme = key(&engine, "Brand", "b1");
    let transition = engine.apply_picker_result(request.resolve(vec![acme]));
    assert!(transition.changed());
    let brand = &engine.catalog().categories()[0];
    assert_eq!(brand.values()[0], acme);
    assert_eq!(brand.values().len(), 4);
    assert_eq!(engine.selected_filter_ids(), ids(&["b1"]));
    assert_consistent(&engine);
}

#[test]
fn button_picker_keeps_a_single_exclusive_choice() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let request = engine.press_button(0).into_picker_request().expect("picker");
    let acme = key(&engine, "Brand", "b1");
    let other = key(&engine, "Brand", "other");
    let _ = engine.apply_picker_result(request.resolve(vec![acme, other]));
    assert_eq!(engine.selected_filter_ids(), ids(&["b1"]));
    assert_consistent(&engine);
}

#[test]
fn empty_button_picker_result_clears_category() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let _ = engine.select_value(0, "b1");
    let request = engine.press_button(0).into_picker_request().expect("picker");
    let _ = engine.apply_picker_result(request.resolve(Vec::new()));

    assert!(is_selected(&engine, key(&engine, "Brand", "")));
    assert!(engine.selected_filter_ids().is_empty());
}

#[test]
fn replace_mode_splices_chips_into_parent_row() {
    let mut engine = engine_with(DrillDownMode::ReplaceInPlace, &[brand()]);
    let other = key(&engine, "Brand", "other");
    let request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let promo = child(&engine, other, "promo");
    let _ = engine.apply_picker_result(request.resolve(vec![promo]));

    assert_eq!(names(&engine), ["Brand"]);
    let brand = &engine.catalog().categories()[0];
    assert_eq!(brand.values()[0], promo);
    assert_eq!(brand.cells()[0], Cell::Closable(promo));
    assert_eq!(engine.selected_filter_ids(), ids(&["other", "promo"]));
    assert_consistent(&engine);

    // dismissing the only chip falls back to the category default
    let _ = engine.select_value(0, "promo");
    assert!(!is_selected(&engine, other));
    assert!(is_selected(&engine, key(&engine, "Brand", "")));
    assert!(engine.selected_filter_ids().is_empty());
    assert_consistent(&engine);
}

#[test]
fn replace_mode_keeps_row_while_chips_remain() {
    let mut engine = engine_with(DrillDownMode::ReplaceInPlace, &[brand()]);
    let other = key(&engine, "Brand", "other");
    let request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let promo = child(&engine, other, "promo");
    let sale = child(&engine, other, "sale");
    let _ = engine.apply_picker_result(request.resolve(vec![promo, sale]));

    let _ = engine.select_value(0, "promo");
    assert!(is_selected(&engine, other));
    assert_eq!(engine.selected_filter_ids(), ids(&["other", "sale"]));
    assert_eq!(engine.catalog().categories()[0].values()[0], promo);
}

#[test]
fn hidden_values_toggle_independently() {
    let tags = CategoryItem::new(
        "Tags",
        vec![
            ValueItem::total("Any"),
            ValueItem::hidden("new", "New"),
            ValueItem::hidden("hot", "Hot"),
        ],
    );
    let mut engine = engine_with(DrillDownMode::ReplaceInPlace, &[tags]);
    let _ = engine.select_value(0, "new");
    let _ = engine.select_value(0, "hot");
    assert_eq!(engine.selected_filter_ids(), ids(&["new", "hot"]));
    assert!(is_selected(&engine, key(&engine, "Tags", "")));
    assert_consistent(&engine);
}

#[test]
fn parameters_are_reported_separately() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let sort = engine.catalog().position("Sort").expect("sort");
    let _ = engine.select_value(sort, "price");
    let _ = engine.select_value(0, "e");

    assert_eq!(engine.selected_parameter_ids(), ids(&["price"]));
    assert_eq!(engine.selected_filter_ids(), ids(&["e"]));
}

#[test]
fn queries_are_stable_without_mutation() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    assert_eq!(engine.selected_filter_ids(), engine.selected_filter_ids());
    assert_eq!(engine.selected_values(), engine.selected_values());
}

#[test]
fn selected_values_follow_catalog_order_without_repeats() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    let _ = engine.select_value(1, "s");
    let west = key(&engine, "Region", "w");
    let south = child(&engine, west, "s");
    assert_eq!(engine.selected_values(), [west, south]);
}

#[test]
fn lookup_failures_leave_catalog_untouched() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    let _ = engine.select_value(0, "w");
    let before = (engine.selected_filter_ids(), engine.catalog().len());

    assert!(!engine.select_value(0, "missing").changed());
    assert!(!engine.select_value(99, "w").changed());
    assert!(engine.press_button(99).picker_request().is_none());
    assert_eq!((engine.selected_filter_ids(), engine.catalog().len()), before);
}

#[test]
fn results_from_previous_catalog_are_ignored() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[brand()]);
    let request = engine
        .select_value(0, "other")
        .into_picker_request()
        .expect("picker");
    let chosen = request.values()[1];
    let _ = engine.initialize(&[brand()], &[], Vec::new());

    let transition = engine.apply_picker_result(request.resolve(vec![chosen]));
    assert!(!transition.changed());
    assert_eq!(names(&engine), ["Brand"]);
}

#[test]
fn clear_empties_catalog() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region()]);
    engine.clear();
    assert!(engine.catalog().is_empty());
    assert!(engine.selected_filter_ids().is_empty());
}

#[test]
fn long_interaction_keeps_invariants() {
    let mut engine = engine_with(DrillDownMode::RowPerDrillDown, &[region(), brand()]);
    let steps: [(&str, &str); 9] = [
        ("Region", "w"),
        ("w", "n"),
        ("n", "nl"),
        ("w", "s"),
        ("Brand", "b1"),
        ("Region", ""),
        ("Region", "w"),
        ("w", ""),
        ("Brand", "b1"),
    ];
    for (category, id) in steps {
        let index = engine.catalog().position(category).expect("category");
        let _ = engine.select_value(index, id);
        assert_consistent(&engine);
    }
    assert_eq!(names(&engine), ["Region", "Brand"]);
    assert!(engine.selected_filter_ids().is_empty());
}

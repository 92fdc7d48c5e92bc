use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use ratatui::layout::{Rect, Size};

use super::*;
use crate::tabs::placement::FormFactor;

const FIVE: [&str; 5] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];

fn options() -> BarOptions {
    BarOptions {
        closable: false,
        ..BarOptions::default()
    }
}

fn bar_with(labels: &[&str], options: BarOptions) -> TabBar<usize> {
    let items = labels
        .iter()
        .enumerate()
        .map(|(i, label)| TabItem::new(*label, i))
        .collect();
    TabBar::with_options(items, options, TerminalHost::default())
}

fn bar(labels: &[&str]) -> TabBar<usize> {
    bar_with(labels, options())
}

fn event_log(bar: &mut TabBar<usize>) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    let callbacks = bar.callbacks_mut();
    callbacks.on_changed = Some(Box::new(move |item| {
        let label = item.map_or("-".to_string(), |i| i.label.clone());
        a.borrow_mut().push(format!("changed:{}", label));
    }));
    callbacks.on_selected = Some(Box::new(move |item| {
        b.borrow_mut().push(format!("selected:{}", item.label));
    }));
    callbacks.on_unselected = Some(Box::new(move |item| {
        c.borrow_mut().push(format!("unselected:{}", item.label));
    }));
    callbacks.on_removed = Some(Box::new(move |item| {
        d.borrow_mut().push(format!("removed:{}", item.label));
    }));
    log
}

#[test]
fn test_five_tabs_three_fit() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));

    assert_eq!(bar.visible_count(), 3);
    assert_eq!(bar.hidden_count(), 2);
    assert_eq!(bar.mode(), BarMode::Overflow(3));
    assert!(bar.overflow_button().visible);
    assert_eq!(bar.overflow_button().rect, Rect::new(27, 0, 3, 1));

    let rects: Vec<Rect> = bar.visible_buttons().map(|(_, b)| b.rect).collect();
    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 7, 1),
            Rect::new(8, 0, 6, 1),
            Rect::new(15, 0, 7, 1),
        ]
    );
    assert_eq!(bar.add_button().map(|b| b.rect), Some(Rect::new(23, 0, 3, 1)));
    assert_eq!(bar.geometry().content, Rect::new(0, 2, 30, 8));
}

#[test]
fn test_menu_entry_selects_absolute_index() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));

    let menu = bar.open_overflow_menu().unwrap();
    let labels: Vec<&str> = menu.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Delta", "Epsilon"]);

    assert!(bar.choose_menu_entry(1));
    assert_eq!(bar.selected(), Some(4));
    assert!(bar.menu().is_none());
    assert_eq!(bar.selection_state(), SelectionState::Overflowed(4));
}

#[test]
fn test_menu_entry_out_of_range_keeps_menu() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    bar.open_overflow_menu();
    assert!(!bar.choose_menu_entry(2));
    assert!(bar.menu().is_some());
    assert_eq!(bar.selected(), Some(0));
}

#[test]
fn test_indicator_anchors_to_overflow_when_hidden() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    bar.select_index(4);
    assert_eq!(bar.indicator().rect, Some(Rect::new(27, 1, 3, 1)));

    bar.select_index(1);
    assert_eq!(bar.indicator().rect, Some(Rect::new(8, 1, 6, 1)));
}

#[test]
fn test_indicator_hidden_without_selection() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    assert!(bar.unselect());
    assert!(!bar.indicator().is_visible());
    assert_eq!(bar.selection_state(), SelectionState::Unselected);
}

#[test]
fn test_full_fit_is_idempotent() {
    let mut bar = bar(&FIVE);
    let area = Rect::new(0, 0, 80, 10);
    bar.layout(area);
    assert_eq!(bar.visible_count(), 5);
    assert_eq!(bar.mode(), BarMode::Full);
    assert!(!bar.overflow_button().visible);

    let geometry = *bar.geometry();
    let indicator = *bar.indicator();
    let rects: Vec<Rect> = bar.visible_buttons().map(|(_, b)| b.rect).collect();

    bar.layout(area);
    assert_eq!(*bar.geometry(), geometry);
    assert_eq!(*bar.indicator(), indicator);
    let again: Vec<Rect> = bar.visible_buttons().map(|(_, b)| b.rect).collect();
    assert_eq!(again, rects);
}

#[test]
fn test_empty_bar_shows_only_add() {
    let mut bar = bar(&[]);
    bar.layout(Rect::new(0, 0, 40, 5));
    assert_eq!(bar.visible_count(), 0);
    assert_eq!(bar.mode(), BarMode::Full);
    assert!(!bar.overflow_button().visible);
    assert_eq!(bar.add_button().map(|b| b.rect), Some(Rect::new(0, 0, 3, 1)));
    assert!(!bar.indicator().is_visible());
    assert!(bar.open_overflow_menu().is_none());
}

#[test]
fn test_overflow_menu_unavailable_when_everything_fits() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    assert!(bar.open_overflow_menu().is_none());
    assert!(!bar.activate(TabAction::OpenOverflow));
}

#[test]
fn test_tiny_extent_still_shows_one_tab() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 4, 3));
    assert_eq!(bar.visible_count(), 1);
    assert_eq!(bar.hidden_count(), 4);
}

#[test]
fn test_remove_selected_keeps_valid_selection() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    bar.select_index(2);

    let removed = bar.remove_index(2).unwrap();
    assert_eq!(removed.label, "Gamma");
    assert_eq!(bar.len(), 4);
    let selected = bar.selected().unwrap();
    assert!(selected < bar.len());
    assert_eq!(bar.selected_item().map(|i| i.label.as_str()), Some("Delta"));
}

#[test]
fn test_remove_notifies_in_order() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    bar.select_index(2);
    let log = event_log(&mut bar);

    bar.remove_index(2);
    assert_eq!(
        *log.borrow(),
        vec![
            "unselected:Gamma".to_string(),
            "changed:Delta".to_string(),
            "selected:Delta".to_string(),
            "removed:Gamma".to_string(),
        ]
    );
}

#[test]
fn test_remove_with_clear_policy() {
    let mut bar = bar_with(
        &FIVE,
        BarOptions {
            on_remove: RemovalPolicy::Clear,
            ..options()
        },
    );
    bar.layout(Rect::new(0, 0, 80, 10));
    let log = event_log(&mut bar);

    bar.remove_index(0);
    assert_eq!(bar.selected(), None);
    assert!(!bar.indicator().is_visible());
    assert_eq!(
        *log.borrow(),
        vec![
            "unselected:Alpha".to_string(),
            "changed:-".to_string(),
            "removed:Alpha".to_string(),
        ]
    );
}

#[test]
fn test_select_notifies_in_order() {
    let mut bar = bar(&FIVE);
    let log = event_log(&mut bar);
    bar.select_index(3);
    assert_eq!(
        *log.borrow(),
        vec![
            "unselected:Alpha".to_string(),
            "changed:Delta".to_string(),
            "selected:Delta".to_string(),
        ]
    );
}

#[test]
fn test_invalid_selection_is_ignored() {
    let mut bar = bar(&FIVE);
    let log = event_log(&mut bar);
    let stranger = TabItem::new("Alpha", 0usize);

    assert!(!bar.select_index(5));
    assert!(!bar.select(stranger.id()));
    assert!(!bar.select_index(0));
    assert_eq!(bar.selected(), Some(0));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_append_does_not_change_selection() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    bar.select_index(1);
    bar.append(TabItem::new("Zeta", 5));
    assert_eq!(bar.selected(), Some(1));
    assert_eq!(bar.len(), 6);
}

#[test]
fn test_insert_before_selection_keeps_selected_item() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    bar.select_index(1);
    bar.open_overflow_menu();
    assert!(bar.menu().is_some());
    let log = event_log(&mut bar);

    bar.insert(0, TabItem::new("Zeta", 5));
    assert_eq!(bar.selected(), Some(2));
    assert_eq!(bar.selected_item().map(|i| i.label.as_str()), Some("Beta"));
    assert!(bar.menu().is_none());
    assert_eq!(bar.visible_count() + bar.hidden_count(), 6);
    assert!(log.borrow().is_empty());

    let beta = bar.items()[2].id();
    let beta_rect = bar.button(beta).unwrap().rect;
    assert_eq!(bar.indicator().rect.map(|r| (r.x, r.width)), Some((beta_rect.x, beta_rect.width)));
}

#[test]
fn test_huge_tab_count_lays_out() {
    let items = (0..65_535)
        .map(|i| TabItem::new(format!("T{}", i), i))
        .collect();
    let options = BarOptions {
        fit_search: FitSearch::Bisect,
        ..options()
    };
    let mut bar = TabBar::with_options(items, options, TerminalHost::default());
    bar.layout(Rect::new(0, 0, 80, 24));
    assert!(bar.visible_count() >= 1);
    assert_eq!(bar.visible_count() + bar.hidden_count(), 65_535);
    assert!(bar.overflow_button().visible);

    bar.set_host(TerminalHost::new(FormFactor::Compact));
    assert_eq!(bar.visible_count() + bar.hidden_count(), 65_535);
}

#[test]
fn test_request_new_tab_appends_and_selects() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    assert!(bar.request_new_tab().is_none());

    bar.callbacks_mut().on_item_requested = Some(Box::new(|| Some(TabItem::new("New", 99))));
    let id = bar.request_new_tab().unwrap();
    assert_eq!(bar.len(), 6);
    assert_eq!(bar.selected(), Some(5));
    assert_eq!(bar.selected_item().map(|i| i.id()), Some(id));
}

#[test]
fn test_add_action_goes_through_request() {
    let mut bar = bar(&[]);
    bar.layout(Rect::new(0, 0, 40, 5));
    bar.callbacks_mut().on_item_requested = Some(Box::new(|| Some(TabItem::new("First", 1))));
    assert!(bar.activate(TabAction::AddTab));
    assert_eq!(bar.visible_count(), 1);
    assert_eq!(bar.selected(), Some(0));
    assert!(bar.indicator().is_visible());
}

#[test]
fn test_close_action_removes_tab() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    let beta = bar.items()[1].id();
    let action = bar.button(beta).unwrap().on_closed;
    assert!(bar.activate(action));
    assert_eq!(bar.len(), 4);
    assert!(bar.button(beta).is_none());
}

#[test]
fn test_tap_action_selects_tab() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    let gamma = bar.items()[2].id();
    let action = bar.button(gamma).unwrap().on_tapped;
    assert!(bar.activate(action));
    assert_eq!(bar.selected(), Some(2));
}

#[test]
fn test_cache_identity_across_passes() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    let handles: Vec<_> = bar.items().iter().map(|i| bar.button(i.id()).unwrap().handle()).collect();

    bar.layout(Rect::new(0, 0, 30, 10));
    bar.layout(Rect::new(0, 0, 80, 10));
    let again: Vec<_> = bar.items().iter().map(|i| bar.button(i.id()).unwrap().handle()).collect();
    assert_eq!(handles, again);

    let mut unique = handles.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), handles.len());
}

#[test]
fn test_hover_state_survives_relayout() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    let id = bar.items()[0].id();
    bar.button_mut(id).unwrap().hovered = true;
    bar.layout(Rect::new(0, 0, 30, 10));
    assert!(bar.button(id).unwrap().hovered);
}

#[test]
fn test_cache_pruned_after_removal() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    assert_eq!(bar.cached_buttons(), 5);
    bar.remove_index(4);
    bar.remove_index(0);
    assert_eq!(bar.cached_buttons(), 3);
}

#[test]
fn test_buttons_refresh_importance_and_label() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 80, 10));
    let beta = bar.items()[1].id();
    assert_eq!(bar.button(beta).unwrap().importance, Importance::Medium);

    bar.select_index(1);
    assert_eq!(bar.button(beta).unwrap().importance, Importance::High);

    bar.update(beta, |item| item.label = "Bravo!".into());
    assert_eq!(bar.button(beta).unwrap().label, "Bravo!");
    assert_eq!(bar.button(beta).unwrap().rect.width, 8);
}

#[test]
fn test_reopening_menu_replaces_it() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    let first = bar.open_overflow_menu().unwrap().id();
    let second = bar.open_overflow_menu().unwrap().id();
    assert_ne!(first, second);
    assert_eq!(bar.menu().map(|m| m.id()), Some(second));

    assert!(bar.dismiss_menu());
    assert!(bar.menu().is_none());
    assert!(!bar.dismiss_menu());
}

#[test]
fn test_structural_change_closes_menu() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    bar.open_overflow_menu();
    bar.append(TabItem::new("Zeta", 5));
    assert!(bar.menu().is_none());
}

#[test]
fn test_growing_past_overflow_closes_menu() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    bar.open_overflow_menu();
    bar.layout(Rect::new(0, 0, 80, 10));
    assert!(bar.menu().is_none());
}

#[test]
fn test_menu_follows_overflow_action() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 10));
    bar.open_overflow_menu();
    // same visible count, wider bar
    bar.layout(Rect::new(0, 0, 36, 10));
    assert_eq!(bar.menu().map(|m| m.anchor), Some(Rect::new(33, 0, 3, 1)));
}

#[test]
fn test_animate_only_after_user_selection() {
    let mut bar = bar(&FIVE);
    let area = Rect::new(0, 0, 80, 10);
    bar.layout(area);
    assert!(!bar.indicator().animate);

    bar.select_index(1);
    assert!(bar.indicator().animate);

    bar.layout(area);
    assert!(!bar.indicator().animate);

    bar.remove_index(0);
    assert!(!bar.indicator().animate);
}

#[test]
fn test_leading_placement() {
    let mut bar = bar_with(
        &FIVE,
        BarOptions {
            placement: Placement::Leading,
            ..options()
        },
    );
    bar.layout(Rect::new(0, 0, 30, 20));
    assert_eq!(bar.visible_count(), 5);
    assert_eq!(bar.geometry().bar, Rect::new(0, 0, 9, 20));
    assert_eq!(bar.geometry().content, Rect::new(10, 0, 20, 20));
    assert_eq!(bar.indicator().rect, Some(Rect::new(9, 0, 1, 1)));

    bar.select_index(2);
    assert_eq!(bar.indicator().rect, Some(Rect::new(9, 4, 1, 1)));
}

#[test]
fn test_leading_placement_overflows_on_height() {
    let mut bar = bar_with(
        &FIVE,
        BarOptions {
            placement: Placement::Leading,
            ..options()
        },
    );
    bar.layout(Rect::new(0, 0, 30, 10));
    assert_eq!(bar.visible_count(), 3);
    // Epsilon is hidden, so the bar is only as wide as Alpha and Gamma
    assert_eq!(bar.overflow_button().rect, Rect::new(0, 9, 7, 1));
}

#[test]
fn test_trailing_placement() {
    let mut bar = bar_with(
        &FIVE,
        BarOptions {
            placement: Placement::Trailing,
            ..options()
        },
    );
    bar.layout(Rect::new(0, 0, 30, 20));
    assert_eq!(bar.geometry().bar, Rect::new(21, 0, 9, 20));
    assert_eq!(bar.indicator().rect, Some(Rect::new(20, 0, 1, 1)));
}

#[test]
fn test_bottom_placement() {
    let mut bar = bar_with(
        &FIVE,
        BarOptions {
            placement: Placement::Bottom,
            ..options()
        },
    );
    bar.layout(Rect::new(0, 0, 80, 10));
    assert_eq!(bar.geometry().bar, Rect::new(0, 9, 80, 1));
    assert_eq!(bar.geometry().content, Rect::new(0, 0, 80, 8));
    assert_eq!(bar.indicator().rect, Some(Rect::new(0, 8, 7, 1)));
}

#[test]
fn test_compact_form_factor_puts_icons_on_top() {
    let items = vec![
        TabItem::new("Home", 0).with_icon(crate::model::Icon::new("⌂")),
        TabItem::new("Mail", 1),
    ];
    let mut bar = TabBar::with_options(items, options(), TerminalHost::new(FormFactor::Compact));
    bar.layout(Rect::new(0, 0, 40, 10));
    let home = bar.items()[0].id();
    assert_eq!(bar.button(home).unwrap().icon_position, placement::IconPosition::Top);
    assert_eq!(bar.plan().buttons, arrange::Arrangement::GridColumns(2));
}

#[test]
fn test_min_size() {
    let bar = bar(&FIVE);
    // Alpha + add + overflow, then the indicator row
    assert_eq!(bar.min_size(), Size::new(15, 2));
}

#[test]
fn test_placement_change_relayouts() {
    let mut bar = bar(&FIVE);
    bar.layout(Rect::new(0, 0, 30, 20));
    assert_eq!(bar.visible_count(), 3);
    bar.set_placement(Placement::Leading);
    assert_eq!(bar.visible_count(), 5);
}

#[test]
fn test_before_first_layout_one_tab_shows() {
    let mut bar = bar(&FIVE);
    assert_eq!(bar.visible_count(), 1);
    assert_eq!(bar.hidden_count(), 4);
    bar.remove_index(0);
    bar.remove_index(0);
    bar.remove_index(0);
    bar.remove_index(0);
    assert_eq!(bar.visible_count(), 1);
    assert_eq!(bar.hidden_count(), 0);
}

//! Integration tests for tabnav
//!
//! These drive the engine through its public API the way a host would:
//! key events in, accessors out, time passed explicitly.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabnav::action::PasteReport;
use tabnav::app::{ConfigFile, Fixture};
use tabnav::core::{Engine, EngineConfig, JumpList, MarkChange, Marks, Mode};
use tabnav::handler::{parse_key, KeyBindingRegistry, KeymapFile};
use tabnav::tree::{GroupId, ItemId, Side, TabTree, MAX_NESTING_DEPTH};
use tabnav::NavError;

const MS: Duration = Duration::from_millis(1);

/// Helper to create a KeyEvent
fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(engine: &mut Engine, keys: &str, now: Instant) {
    for token in keys.split_whitespace() {
        engine.handle_key(parse_key(token).unwrap(), now);
    }
}

fn titles(engine: &Engine) -> Vec<String> {
    engine
        .visible_sequence()
        .iter()
        .map(|id| engine.tree().get(*id).unwrap().title.clone())
        .collect()
}

fn engine_from(json: &str) -> Engine {
    let tree = Fixture::parse(json).unwrap().build().unwrap();
    Engine::new(tree, EngineConfig::default())
}

fn find(engine: &Engine, title: &str) -> ItemId {
    engine.tree().find_by_title(title).unwrap()
}

// =============================================================================
// Mode State Machine
// =============================================================================

mod mode_tests {
    use super::*;

    #[test]
    fn test_full_session_through_every_sub_mode() {
        let mut e = engine_from(
            r#"{ "items": [{ "title": "a" }, { "title": "b" }, { "title": "c" }, { "title": "d" }] }"#,
        );
        let t0 = Instant::now();

        assert!(e.handle_key(
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::CONTROL),
            t0
        ));
        assert!(matches!(e.mode(), Mode::Root { .. }));

        // Absolute jump
        press(&mut e, "g 4 enter", t0);
        assert_eq!(e.tree().current(), Some(find(&e, "d")));

        // Mark it, jump somewhere else, come back through the mark
        press(&mut e, "ctrl+space m d", t0);
        press(&mut e, "ctrl+space g g", t0);
        assert_eq!(e.tree().current(), Some(find(&e, "a")));
        press(&mut e, "ctrl+space ' d", t0);
        assert_eq!(e.tree().current(), Some(find(&e, "d")));

        // History: d <- a <- d
        press(&mut e, "ctrl+space ctrl+o", t0);
        assert_eq!(e.tree().current(), Some(find(&e, "a")));
        press(&mut e, "ctrl+i", t0);
        assert_eq!(e.tree().current(), Some(find(&e, "d")));
        press(&mut e, "esc", t0);
        assert_eq!(e.mode(), &Mode::Inactive);
    }

    #[test]
    fn test_inactive_engine_ignores_plain_keys() {
        let mut e = engine_from(r#"{ "items": [{ "title": "a" }] }"#);
        assert!(!e.handle_key(key_event(KeyCode::Char('j')), Instant::now()));
        assert!(!e.handle_key(key_event(KeyCode::Enter), Instant::now()));
    }

    #[test]
    fn test_timer_never_fires_into_later_mode() {
        let mut e = engine_from(r#"{ "items": [{ "title": "a" }, { "title": "b" }, { "title": "c" }] }"#);
        let t0 = Instant::now();
        // A digit armed the jump timer, esc left the mode before it fired
        press(&mut e, "ctrl+space g 3 esc", t0);
        press(&mut e, "ctrl+space j", t0 + 10 * MS);
        assert!(!e.tick(t0 + 5000 * MS));
        assert_eq!(e.tree().current(), Some(find(&e, "a")));
        assert!(matches!(e.mode(), Mode::Browse(_)));
    }

    #[test]
    fn test_custom_timeouts_are_honoured() {
        let config: ConfigFile = toml::from_str("[timeouts]\nroot_ms = 50\n").unwrap();
        let tree = Fixture::parse(r#"{ "items": [{ "title": "a" }] }"#)
            .unwrap()
            .build()
            .unwrap();
        let mut e = Engine::new(tree, config.engine_config());
        let t0 = Instant::now();
        press(&mut e, "ctrl+space", t0);
        assert_eq!(e.next_deadline(), Some(t0 + 50 * MS));
        assert!(e.tick(t0 + 50 * MS));
        assert_eq!(e.mode(), &Mode::Inactive);
    }

    #[test]
    fn test_custom_keymap() {
        let keymap: KeymapFile = toml::from_str("[inactive]\n\"f1\" = \"activate\"\n").unwrap();
        let mut registry = KeyBindingRegistry::new();
        registry.merge(keymap);
        let tree = Fixture::sample().build().unwrap();
        let mut e = Engine::new(tree, EngineConfig::default()).with_keymap(registry);
        assert!(e.handle_key(key_event(KeyCode::F(1)), Instant::now()));
        assert!(e.mode().is_active());
    }
}

// =============================================================================
// Relocation through the public API
// =============================================================================

mod relocation_tests {
    use super::*;

    #[test]
    fn test_yank_paste_round_trip_restores_order() {
        let mut e = engine_from(
            r#"{ "items": [{ "title": "a" }, { "title": "b" }, { "title": "c" }, { "title": "d" }, { "title": "e" }] }"#,
        );
        let (b, c, e_) = (find(&e, "b"), find(&e, "c"), find(&e, "e"));

        e.toggle_select(b);
        e.toggle_select(c);
        assert_eq!(e.yank(), 2);
        let report: PasteReport = e.paste(e_, Side::After);
        assert_eq!(report.placed, vec![b, c]);
        assert_eq!(titles(&e), vec!["a", "d", "e", "b", "c"]);

        let d = find(&e, "d");
        e.toggle_select(c);
        e.toggle_select(b);
        e.yank();
        e.paste(d, Side::Before);
        assert_eq!(titles(&e), vec!["a", "b", "c", "d", "e"]);
        assert!(e.selected().is_empty());
        assert_eq!(e.yank_len(), 0);
    }

    #[test]
    fn test_yanking_folder_and_child_keeps_folder_only() {
        let mut e = engine_from(
            r#"{ "items": [
                { "container": "F", "children": [{ "title": "x" }, { "title": "y" }] },
                { "title": "a" }
            ] }"#,
        );
        e.toggle_select(find(&e, "F"));
        e.toggle_select(find(&e, "x"));
        assert_eq!(e.yank(), 1);
        assert_eq!(e.yanked(), &[find(&e, "F")]);
    }

    #[test]
    fn test_paste_folder_next_to_unpinned_tab_goes_to_pinned_area() {
        let mut e = engine_from(
            r#"{ "items": [
                { "title": "p", "pinned": true },
                { "container": "F", "children": [{ "title": "x" }] },
                { "title": "a" },
                { "title": "b" }
            ] }"#,
        );
        e.toggle_select(find(&e, "F"));
        e.yank();
        e.paste(find(&e, "b"), Side::After);
        // Folders never leave the pinned area
        assert_eq!(titles(&e), vec!["p", "F", "x", "a", "b"]);
    }

    #[test]
    fn test_paste_into_other_workspace_regroups() {
        let mut tree = TabTree::new();
        let a = tree.add_leaf(None, "a", GroupId(0), false).unwrap();
        let f = tree.add_container(None, "F", GroupId(1)).unwrap();
        let x = tree.add_leaf(Some(f), "x", GroupId(1), false).unwrap();
        let b = tree.add_leaf(None, "b", GroupId(1), false).unwrap();
        tree.set_current(a).unwrap();
        let mut e = Engine::new(tree, EngineConfig::default());

        e.toggle_select(f);
        e.yank();
        e.paste(b, Side::Before);
        e.toggle_select(a);
        e.yank();
        e.paste(b, Side::Before);

        for id in [a, f, x, b] {
            assert_eq!(e.tree().get(id).unwrap().group, GroupId(1));
        }
    }

    #[test]
    fn test_paste_onto_missing_anchor_clears_state() {
        let mut e = engine_from(r#"{ "items": [{ "title": "a" }, { "title": "b" }] }"#);
        e.toggle_select(find(&e, "a"));
        e.yank();
        let report = e.paste(ItemId(999), Side::After);
        assert!(report.placed.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(e.yank_len(), 0);
        assert!(e.selected().is_empty());
    }
}

// =============================================================================
// Tree, Jump List, Marks
// =============================================================================

mod collection_tests {
    use super::*;

    #[test]
    fn test_nesting_depth_is_bounded() {
        let mut tree = TabTree::new();
        let mut parent = None;
        for depth in 0..=MAX_NESTING_DEPTH {
            parent = Some(tree.add_container(parent, format!("f{depth}"), GroupId(0)).unwrap());
        }
        let err = tree.add_container(parent, "too deep", GroupId(0)).unwrap_err();
        assert!(matches!(err, NavError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_collapse_preserves_hidden_order() {
        let mut e = engine_from(
            r#"{ "items": [{ "container": "F", "children": [{ "title": "x" }, { "title": "y" }] }] }"#,
        );
        let f = find(&e, "F");
        e.tree_mut().toggle_collapsed(f).unwrap();
        assert_eq!(titles(&e), vec!["F"]);
        e.tree_mut().toggle_collapsed(f).unwrap();
        assert_eq!(titles(&e), vec!["F", "x", "y"]);
    }

    #[test]
    fn test_jump_list_truncates_forward_history() {
        let mut tree = TabTree::new();
        let ids: Vec<ItemId> = ["A", "B", "C", "D"]
            .iter()
            .map(|t| tree.add_leaf(None, *t, GroupId(0), false).unwrap())
            .collect();
        let mut jumps = JumpList::new(10);
        for id in &ids[..3] {
            jumps.record(*id, &tree);
        }
        assert_eq!(jumps.back(Some(ids[2]), &tree), Some(ids[1]));
        assert_eq!(jumps.back(Some(ids[1]), &tree), Some(ids[0]));
        jumps.record(ids[3], &tree);
        assert_eq!(jumps.entries(), &[ids[0], ids[3]]);
        assert_eq!(jumps.cursor(), 1);
        assert_eq!(jumps.forward(&tree), None);
    }

    #[test]
    fn test_marks_one_per_item() {
        let mut tree = TabTree::new();
        let a = tree.add_leaf(None, "a", GroupId(0), false).unwrap();
        let mut marks = Marks::new();
        assert_eq!(marks.set('x', a), MarkChange::Set { moved_from: None });
        assert_eq!(
            marks.set('y', a),
            MarkChange::Set {
                moved_from: Some('x')
            }
        );
        assert_eq!(marks.get('x'), None);
        assert_eq!(marks.mark_of(a), Some('y'));
        assert_eq!(marks.set('y', a), MarkChange::Cleared);
        assert!(marks.is_empty());
    }
}

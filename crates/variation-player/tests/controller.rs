//! Integration tests for board selection and manual navigation.

mod common;

use common::{controller, controller_with, run_for, VISIBLE_WIDTH};
use variation_catalog::builtin::builtin_variations;
use variation_player::{
    Catalog, ControllerError, EngineError, HighlightColor, MountError, PlayerConfig,
    VariationDefinition,
};

#[test]
fn test_first_selection_creates_visible_board() {
    let (mut controller, page) = controller();

    controller.select("basic-setup").unwrap();

    assert_eq!(controller.active(), Some("basic-setup"));
    assert_eq!(controller.board_count(), 1);
    let page = page.borrow();
    assert_eq!(page.mounted, vec!["basic-setup"]);
    assert!(page.visible.contains("basic-setup"));
    assert_eq!(page.width("basic-setup"), VISIBLE_WIDTH);
    assert_eq!(page.render_count("basic-setup"), 1);
    assert_eq!(page.last_render("basic-setup").unwrap().ply, None);

    let panel = page.last_panel("basic-setup").unwrap();
    assert_eq!(panel.annotation, "Start of the game.");
    assert_eq!(panel.counter, "Start");
    assert_eq!(panel.heading(), "Move: Start");
}

#[test]
fn test_new_board_gets_delayed_resize() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();
    let before = page.borrow().resize_count("basic-setup");
    assert_eq!(controller.scheduler().pending_resizes(), 1);

    run_for(&mut controller, 199);
    assert_eq!(page.borrow().resize_count("basic-setup"), before);

    run_for(&mut controller, 1);
    assert_eq!(page.borrow().resize_count("basic-setup"), before + 1);
    assert_eq!(controller.scheduler().pending_resizes(), 0);
}

#[test]
fn test_only_selected_board_is_visible() {
    let (mut controller, page) = controller();

    controller.select("basic-setup").unwrap();
    controller.select("evans-gambit").unwrap();

    let page = page.borrow();
    assert_eq!(page.visible.len(), 1);
    assert!(page.visible.contains("evans-gambit"));
    assert_eq!(page.width("evans-gambit"), VISIBLE_WIDTH);
    assert_eq!(controller.active(), Some("evans-gambit"));
}

#[test]
fn test_board_state_survives_switching() {
    let (mut controller, page) = controller();

    controller.select("giuoco-piano").unwrap();
    for _ in 0..3 {
        controller.step_forward("giuoco-piano").unwrap();
    }
    controller.select("fried-liver").unwrap();
    controller.select("giuoco-piano").unwrap();

    assert_eq!(controller.state("giuoco-piano").unwrap().cursor(), Some(2));
    assert_eq!(page.borrow().mounted, vec!["giuoco-piano", "fried-liver"]);
    assert_eq!(controller.board_count(), 2);
}

#[test]
fn test_reselection_resizes_board_shown_again() {
    let (mut controller, page) = controller();

    controller.select("basic-setup").unwrap();
    controller.select("evans-gambit").unwrap();
    controller.resize_all();
    assert_eq!(page.borrow().width("basic-setup"), 0);

    controller.select("basic-setup").unwrap();
    assert_eq!(page.borrow().width("basic-setup"), VISIBLE_WIDTH);
}

#[test]
fn test_unknown_selection_keeps_current_board() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();

    let err = controller.select("kings-gambit").unwrap_err();

    assert_eq!(err, ControllerError::CatalogEntryMissing("kings-gambit".into()));
    assert_eq!(controller.active(), Some("basic-setup"));
    assert!(page.borrow().visible.contains("basic-setup"));
}

#[test]
fn test_missing_container_marks_variation_unavailable() {
    let (mut controller, page) = controller_with(
        variation_catalog::builtin::builtin_catalog(),
        PlayerConfig::default(),
        |host| host.without_container("evans-gambit"),
    );
    controller.select("basic-setup").unwrap();

    let err = controller.select("evans-gambit").unwrap_err();
    assert_eq!(
        err,
        ControllerError::Mount {
            variation: "evans-gambit".into(),
            source: MountError::ContainerMissing("evans-gambit".into()),
        }
    );
    assert!(controller.is_broken("evans-gambit"));
    assert_eq!(controller.active(), None);
    assert!(page.borrow().visible.is_empty());

    let err = controller.select("evans-gambit").unwrap_err();
    assert_eq!(err, ControllerError::BoardUnavailable("evans-gambit".into()));

    // Other boards are unaffected.
    controller.select("basic-setup").unwrap();
    assert_eq!(controller.active(), Some("basic-setup"));
    assert_eq!(page.borrow().mounted, vec!["basic-setup"]);
}

#[test]
fn test_illegal_move_text_is_reported_before_mounting() {
    let mut variations = builtin_variations();
    variations.push(VariationDefinition::new(
        "broken",
        "Broken line",
        "1.e4 e5 2.Ke3",
    ));
    let catalog = Catalog::with_entries(variations, Vec::new()).unwrap();
    let (mut controller, page) = controller_with(catalog, PlayerConfig::default(), |h| h);

    let err = controller.select("broken").unwrap_err();

    assert!(matches!(
        err,
        ControllerError::MoveParse {
            source: EngineError::IllegalMove { ply: 2, .. },
            ..
        }
    ));
    assert_eq!(err.variation(), "broken");
    assert!(page.borrow().mounted.is_empty());
    assert!(controller.state("broken").is_none());
}

#[test]
fn test_step_past_either_end_paints_nothing() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();
    let calls = page.borrow().call_count("basic-setup");

    controller.step_backward("basic-setup").unwrap();
    assert_eq!(page.borrow().render_count("basic-setup"), 1);
    assert_eq!(page.borrow().highlight_count("basic-setup"), 1);
    assert_eq!(page.borrow().panel_count("basic-setup"), 1);
    assert_eq!(page.borrow().call_count("basic-setup"), calls);
    assert_eq!(controller.state("basic-setup").unwrap().cursor(), None);

    for _ in 0..5 {
        controller.step_forward("basic-setup").unwrap();
    }
    let calls = page.borrow().call_count("basic-setup");
    controller.step_forward("basic-setup").unwrap();
    assert_eq!(page.borrow().call_count("basic-setup"), calls);
    assert_eq!(controller.state("basic-setup").unwrap().cursor(), Some(4));
}

#[test]
fn test_stepping_back_to_start_shows_start_message() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();
    for _ in 0..5 {
        controller.step_forward("basic-setup").unwrap();
    }
    assert_eq!(controller.state("basic-setup").unwrap().cursor(), Some(4));

    for _ in 0..5 {
        controller.step_backward("basic-setup").unwrap();
    }

    assert_eq!(controller.state("basic-setup").unwrap().cursor(), None);
    let page = page.borrow();
    let panel = page.last_panel("basic-setup").unwrap();
    assert_eq!(panel.annotation, "Start of the game.");
    assert_eq!(panel.counter, "Start");
    assert!(!panel.can_step_backward);
    assert!(panel.can_step_forward);
    assert_eq!(page.render_count("basic-setup"), 11);
}

#[test]
fn test_stepping_updates_annotation_and_highlights() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();

    for _ in 0..5 {
        controller.step_forward("basic-setup").unwrap();
    }
    {
        let page = page.borrow();
        let panel = page.last_panel("basic-setup").unwrap();
        assert_eq!(panel.heading(), "Move: 3. Bc4");
        assert_eq!(panel.counter, "5 / 5");
        assert!(panel.annotation.contains("f7"));
        assert!(!panel.can_step_forward);
        assert_eq!(
            page.last_highlight("basic-setup").unwrap(),
            &(vec!["f7".to_string()], HighlightColor::Red)
        );
        assert_eq!(page.last_render("basic-setup").unwrap().ply, Some(4));
    }

    controller.step_backward("basic-setup").unwrap();
    let page = page.borrow();
    let panel = page.last_panel("basic-setup").unwrap();
    assert_eq!(panel.heading(), "Move: 2... Nc6");
    assert_eq!(panel.counter, "4 / 5");
    assert!(page.last_highlight("basic-setup").unwrap().0.is_empty());
}

#[test]
fn test_reset_returns_to_start() {
    let (mut controller, page) = controller();
    controller.select("traxler-counterattack").unwrap();
    for _ in 0..6 {
        controller.step_forward("traxler-counterattack").unwrap();
    }

    controller.reset("traxler-counterattack").unwrap();

    assert_eq!(
        controller.state("traxler-counterattack").unwrap().cursor(),
        None
    );
    let page = page.borrow();
    let render = page.last_render("traxler-counterattack").unwrap();
    assert_eq!(render.board_fen, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    assert_eq!(
        page.last_panel("traxler-counterattack").unwrap().annotation,
        "Start of the game."
    );
}

#[test]
fn test_reset_at_start_still_repaints() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();

    controller.reset("basic-setup").unwrap();

    assert_eq!(page.borrow().render_count("basic-setup"), 2);
}

#[test]
fn test_controls_on_unknown_board() {
    let (mut controller, _page) = controller();

    assert_eq!(
        controller.step_forward("basic-setup"),
        Err(ControllerError::BoardNotActive("basic-setup".into()))
    );
    assert_eq!(
        controller.toggle_autoplay("basic-setup"),
        Err(ControllerError::BoardNotActive("basic-setup".into()))
    );
}

#[test]
fn test_resize_all_touches_every_board() {
    let (mut controller, page) = controller();
    controller.select("basic-setup").unwrap();
    controller.select("giuoco-pianissimo").unwrap();
    let before: Vec<usize> = ["basic-setup", "giuoco-pianissimo"]
        .iter()
        .map(|id| page.borrow().resize_count(id))
        .collect();

    controller.resize_all();

    let page = page.borrow();
    assert_eq!(page.resize_count("basic-setup"), before[0] + 1);
    assert_eq!(page.resize_count("giuoco-pianissimo"), before[1] + 1);
}

#[test]
fn test_default_selection() {
    let (controller, _page) = controller();
    assert_eq!(controller.default_selection(), Some("basic-setup"));

    let config = PlayerConfig {
        default_variation: Some("fried-liver".into()),
        ..PlayerConfig::default()
    };
    let (controller, _page) = controller_with(
        variation_catalog::builtin::builtin_catalog(),
        config,
        |h| h,
    );
    assert_eq!(controller.default_selection(), Some("fried-liver"));
}

#[test]
fn test_custom_missing_annotation_message() {
    let config = PlayerConfig {
        missing_annotation_message: "Nothing to add here.".into(),
        ..PlayerConfig::default()
    };
    let (mut controller, page) = controller_with(
        variation_catalog::builtin::builtin_catalog(),
        config,
        |h| h,
    );
    controller.select("giuoco-piano").unwrap();
    controller.step_forward("giuoco-piano").unwrap();

    assert_eq!(
        page.borrow().last_panel("giuoco-piano").unwrap().annotation,
        "Nothing to add here."
    );
}

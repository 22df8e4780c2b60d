use blockfall::core::{shape_of, GameSession, HeldShape};
use blockfall::term::{AnchorY, FrameBuffer, GameView, ViewStatus, Viewport};
use blockfall::types::{Cell, SessionState, ShapeKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSession::with_seed(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // field pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSession::with_seed(1).snapshot();
    // Lock a cell at bottom-left.
    snap.cells[19 * 10] = Cell::Filled;
    snap.active = None;
    snap.ghost_row = None;

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let snap = GameSession::with_seed(1).snapshot();
    let active = snap.active.unwrap();
    let ghost_row = snap.ghost_row.unwrap();
    assert!(ghost_row > active.row);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    for (col, row) in active.cells() {
        let cell = fb.get(1 + col as u16 * 2, 1 + row as u16).unwrap();
        assert_eq!(cell.ch, '█', "active cell ({col}, {row})");
    }
    for (col, row) in active.cells_at(ghost_row) {
        let cell = fb.get(1 + col as u16 * 2, 1 + row as u16).unwrap();
        assert_eq!(cell.ch, '░', "ghost cell ({col}, {row})");
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameSession::with_seed(1).snapshot();
    snap.score = 1234;
    snap.level = 3;
    snap.lines = 10;
    snap.speed_multiplier = 1.2;
    snap.held = Some(HeldShape {
        kind: ShapeKind::T,
        shape: shape_of(ShapeKind::T),
    });
    snap.can_hold = false;

    let view = GameView::default();
    // Wider than the 22x22 field frame to allow a panel.
    let fb = view.render(&snap, Viewport::new(60, 22));

    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("1.2x"));
    assert!(all.contains("HOLD (used)"));
}

#[test]
fn term_view_skips_panel_on_narrow_viewports() {
    let snap = GameSession::with_seed(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_centers_field_by_default_on_tall_viewports() {
    let snap = GameSession::with_seed(1).snapshot();
    let view = GameView::default();

    // Field frame is 22 rows tall (20 + border).
    let fb = view.render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_field_to_top() {
    let snap = GameSession::with_seed(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_shows_game_over_with_final_score() {
    let mut snap = GameSession::with_seed(1).snapshot();
    snap.state = SessionState::GameOver;
    snap.active = None;
    snap.ghost_row = None;
    snap.score = 700;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Overlay starts at the vertical middle of the frame.
    assert!(fb.row_text(11).contains("GAME OVER"));
    assert!(fb.row_text(12).contains("SCORE 700"));
}

#[test]
fn term_view_shows_paused_overlay() {
    let snap = GameSession::with_seed(1).snapshot();
    let view = GameView::default();

    let running = view.render(&snap, Viewport::new(22, 22));
    assert!(!screen_text(&running).contains("PAUSED"));

    let paused = view.render_with_status(&snap, ViewStatus { paused: true }, Viewport::new(22, 22));
    assert!(screen_text(&paused).contains("PAUSED"));
}

#[test]
fn term_view_follows_field_dimensions() {
    let config = blockfall::core::GameConfig::default().with_size(6, 8);
    let snap = GameSession::new(config).unwrap().snapshot();

    // 6*2 + 2 = 14 wide, 8 + 2 = 10 tall.
    let fb = GameView::default().render(&snap, Viewport::new(14, 10));
    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
}

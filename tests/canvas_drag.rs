// UniAIMS - tests/canvas_drag.rs
//
// Drives the workstation panel through a headless egui context with
// synthetic pointer events and checks the canvas pan follows the pointer.

use uniaims::app::navigation::MemoryStore;
use uniaims::app::state::AppState;
use uniaims::core::repository::MockRepository;
use uniaims::ui::panels::workstation;
use uniaims::util::constants::DEFAULT_PAGE_SIZE;

use egui::{pos2, Event, Modifiers, PointerButton, Pos2, RawInput, Rect};

fn frame(ctx: &egui::Context, state: &mut AppState, events: Vec<Event>) {
    let input = RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(1200.0, 800.0))),
        events,
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| workstation::render(ui, state));
    });
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::default(),
    }
}

/// The whole pointer travel lands in the offset, including the part before
/// egui recognises the drag.
#[test]
fn test_drag_offset_matches_pointer_travel() {
    let mut state = AppState::new(
        Box::new(MockRepository),
        Box::new(MemoryStore::new()),
        "/T-1029/particles",
        DEFAULT_PAGE_SIZE,
    );
    let ctx = egui::Context::default();

    // Lay out once so the canvas rect is known.
    frame(&ctx, &mut state, vec![Event::PointerMoved(pos2(300.0, 400.0))]);
    let before = state.workstation.as_ref().unwrap().transform.offset();

    let start = pos2(300.0, 400.0);
    frame(&ctx, &mut state, vec![Event::PointerMoved(start), button(start, true)]);
    for x in [310.0, 320.0, 350.0, 400.0] {
        frame(&ctx, &mut state, vec![Event::PointerMoved(pos2(x, 400.0))]);
    }
    let end = pos2(400.0, 400.0);
    frame(&ctx, &mut state, vec![button(end, false)]);
    frame(&ctx, &mut state, vec![]);

    let ws = state.workstation.as_ref().unwrap();
    let after = ws.transform.offset();
    assert!(!ws.transform.is_dragging());
    assert_eq!(after.x - before.x, 100.0);
    assert_eq!(after.y - before.y, 0.0);
}

// End-to-end annotation scenarios: chat text in, markers and reveal text out

use backseat_wasm::{
    AnnotationError, AnnotationSession, BufferSurface, ChatOutcome, Comment, CursorDirection, EditingSurface,
    LineAnnotations, SurfaceOp,
};

const DOCUMENT: &str = "use std::collections::HashMap;\n\nfn main() {\n    let mut seen = Vec::new();\n    for x in input() {\n        seen.push(x);\n    }\n}\n";

fn session() -> AnnotationSession<BufferSurface> {
    let mut session = AnnotationSession::default();
    session.attach("main.rs", BufferSurface::from_text(DOCUMENT));
    session
}

fn created_markers(session: &mut AnnotationSession<BufferSurface>) -> usize {
    session
        .surface_mut()
        .unwrap()
        .take_ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::MarkerCreated { .. }))
        .count()
}

fn assert_store_matches_markers(session: &AnnotationSession<BufferSurface>) {
    let stored: Vec<usize> = session.store().unwrap().lines().collect();
    let marked: Vec<usize> = session.indicators().unwrap().lines().collect();
    assert_eq!(stored, marked, "store and markers disagree");
    assert_eq!(session.surface().unwrap().marker_count(), marked.len());
}

fn scenario_a(session: &mut AnnotationSession<BufferSurface>) {
    let outcome = session
        .on_incoming_chat_text("<alice> !line 5 use a hashmap here", None)
        .expect("line 5 exists");
    assert_eq!(
        outcome,
        ChatOutcome::Annotated {
            line: 5,
            comments: LineAnnotations::single(Comment::new("alice", "use a hashmap here")),
        }
    );
}

fn scenario_c(session: &mut AnnotationSession<BufferSurface>) {
    session
        .on_incoming_chat_text("<bob> !line 5 nah, use a tree", None)
        .expect("line 5 exists");
}

#[test]
fn test_scenario_a_first_annotation() {
    let mut session = session();
    scenario_a(&mut session);

    let store = session.store().unwrap();
    assert_eq!(
        store.get(5).unwrap().as_slice(),
        &[Comment::new("alice", "use a hashmap here")]
    );
    assert_eq!(created_markers(&mut session), 1);

    let indicator = session.indicators().unwrap().get(5).unwrap();
    assert_eq!(Some(indicator.span), session.surface().unwrap().line_span(5));
    assert_store_matches_markers(&session);
}

#[test]
fn test_scenario_b_repeated_command_is_idempotent() {
    let mut session = session();
    scenario_a(&mut session);
    assert_eq!(created_markers(&mut session), 1);

    let outcome = session
        .on_incoming_chat_text("<alice> !line 5 use a hashmap here", None)
        .unwrap();

    assert_eq!(outcome, ChatOutcome::Duplicate { line: 5 });
    assert_eq!(session.store().unwrap().get(5).unwrap().len(), 1);
    assert_eq!(created_markers(&mut session), 0);
    assert_store_matches_markers(&session);
}

#[test]
fn test_scenario_c_newest_first_and_reveal() {
    let mut session = session();
    scenario_a(&mut session);
    scenario_c(&mut session);

    assert_eq!(
        session.store().unwrap().get(5).unwrap().as_slice(),
        &[
            Comment::new("bob", "nah, use a tree"),
            Comment::new("alice", "use a hashmap here"),
        ]
    );

    let marker = session.indicators().unwrap().get(5).unwrap().id;
    let text = session
        .on_cursor_transition(marker, CursorDirection::Entered)
        .expect("entering a marker reveals its comments");
    assert_eq!(text.to_string(), "bob - nah, use a tree; alice - use a hashmap here");
    assert_eq!(session.surface().unwrap().last_message(), Some(&text));

    assert!(session.on_cursor_transition(marker, CursorDirection::Left).is_none());
}

#[test]
fn test_scenario_c_reveal_via_cursor_motion() {
    let mut session = session();
    scenario_a(&mut session);
    scenario_c(&mut session);

    let line_five = session.surface().unwrap().line_span(5).unwrap();
    let transitions = session.surface_mut().unwrap().move_cursor(line_five.start + 2);
    assert_eq!(transitions.len(), 1);

    let (marker, direction) = transitions[0];
    let text = session.on_cursor_transition(marker, direction).unwrap();
    assert_eq!(text.to_string(), "bob - nah, use a tree; alice - use a hashmap here");
}

#[test]
fn test_scenario_d_missing_author() {
    let mut session = session();
    let outcome = session.on_incoming_chat_text("!line 3 missing author", None).unwrap();

    assert_eq!(outcome, ChatOutcome::Ignored);
    assert!(session.store().unwrap().is_empty());
    assert_eq!(created_markers(&mut session), 0);
}

#[test]
fn test_scenario_e_clear_all() {
    let mut session = session();
    scenario_a(&mut session);
    scenario_c(&mut session);
    session.on_incoming_chat_text("<carol> !line 1 unused import?", None).unwrap();

    assert_eq!(session.clear_all(), Ok(2));
    assert!(session.store().unwrap().is_empty());
    assert!(session.indicators().unwrap().is_empty());
    assert_eq!(session.surface().unwrap().marker_count(), 0);
}

#[test]
fn test_out_of_range_line_is_dropped() {
    let mut session = session();
    let result = session.on_incoming_chat_text("<alice> !line 400 way down", None);

    assert_eq!(result, Err(AnnotationError::OutOfRange { line: 400, line_count: 9 }));
    assert!(session.store().unwrap().is_empty());
    assert_store_matches_markers(&session);
}

#[test]
fn test_store_and_markers_stay_in_sync() {
    let mut session = session();
    let script = [
        "<alice> !line 5 use a hashmap here",
        "<bob> !line 5 nah, use a tree",
        "<bob> !line 5 nah, use a tree",
        "<carol> !line 3 entry point",
        "<dave> !line 0 nothing here",
        "<erin> !line 99 past the end",
        "<frank> hello everyone",
        "<alice> !line 8 closing brace",
    ];

    for (step, raw) in script.iter().enumerate() {
        let _ = session.on_incoming_chat_text(raw, None);
        assert_store_matches_markers(&session);

        match step {
            3 => {
                session.clear_line(5).unwrap();
                assert_store_matches_markers(&session);
            }
            5 => {
                session.clear_line(42).unwrap();
                assert_store_matches_markers(&session);
            }
            _ => {}
        }
    }

    assert_eq!(session.store().unwrap().lines().collect::<Vec<_>>(), vec![3, 8]);
    session.clear_all().unwrap();
    assert_store_matches_markers(&session);
}

#[test]
fn test_snapshot_lists_lines_in_order() {
    let mut session = session();
    session.on_incoming_chat_text("<alice> !line 6 push later", None).unwrap();
    session.on_incoming_chat_text("<bob> !line 2 blank line", None).unwrap();

    let lines: Vec<usize> = session.snapshot().iter().map(|l| l.line).collect();
    assert_eq!(lines, vec![2, 6]);
}

#[test]
fn test_switching_documents_resets_annotations() {
    let mut session = session();
    scenario_a(&mut session);

    let previous = session
        .attach("lib.rs", BufferSurface::from_text("pub mod a;\npub mod b;\n"))
        .unwrap();
    assert_eq!(previous.marker_count(), 0);
    assert!(session.snapshot().is_empty());

    // Commands now land in the newly attached document
    let result = session.on_incoming_chat_text("<alice> !line 5 use a hashmap here", None);
    assert_eq!(result, Err(AnnotationError::OutOfRange { line: 5, line_count: 3 }));
    session.on_incoming_chat_text("<alice> !line 2 split this", None).unwrap();
    assert_eq!(session.document_id(), Some("lib.rs"));
    assert_store_matches_markers(&session);
}

#[test]
fn test_chat_transcript_feeds_target_document() {
    let mut session = session();
    let results = session.append_chat_text(
        "<alice> !line 5 use a hashmap here\n<viewer> pog\n<bob> !line 5 nah, use a tree\n",
    );
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_ok()));

    // The transcript itself is never annotated
    assert_eq!(session.store().unwrap().lines().collect::<Vec<_>>(), vec![5]);
    assert_eq!(session.store().unwrap().get(5).unwrap().len(), 2);
}

use std::path::PathBuf;
use std::sync::Once;

use marker_core::{parse_keywords, update, AppState, Effect, Msg, Notice, SessionState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn configured_state() -> AppState {
    let state = AppState::new();
    let (state, _) = update(state, Msg::SourceFolderPicked(PathBuf::from("/docs")));
    let (state, _) = update(state, Msg::KeywordsEdited("alpha, beta".to_string()));
    state
}

#[test]
fn parse_keywords_trims_and_drops_empties() {
    init_logging();
    assert_eq!(parse_keywords("foo, , bar,baz "), vec!["foo", "bar", "baz"]);
    assert_eq!(parse_keywords(""), Vec::<String>::new());
    assert_eq!(parse_keywords(" , ,, "), Vec::<String>::new());
    // Order and duplicates are preserved as supplied.
    assert_eq!(parse_keywords("b,a,b"), vec!["b", "a", "b"]);
}

#[test]
fn start_without_source_raises_notice_and_stays_idle() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::KeywordsEdited("alpha".to_string()));

    let (mut state, effects) = update(state, Msg::StartClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view().session, SessionState::Idle);
    assert_eq!(state.take_notice(), Some(Notice::MissingSource));
}

#[test]
fn start_without_keywords_raises_notice_and_stays_idle() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::SourceFolderPicked(PathBuf::from("/docs")));

    let (mut state, effects) = update(state, Msg::StartClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view().session, SessionState::Idle);
    assert_eq!(state.take_notice(), Some(Notice::MissingKeywords));
}

#[test]
fn start_snapshots_configuration_into_the_effect() {
    init_logging();
    let (state, effects) = update(configured_state(), Msg::StartClicked);

    assert_eq!(state.view().session, SessionState::Scanning);
    let Some(Effect::StartBatch(spec)) = effects.first() else {
        panic!("expected StartBatch, got {effects:?}");
    };
    assert_eq!(spec.source, PathBuf::from("/docs"));
    // No destination chosen: output base is the source folder itself.
    assert_eq!(spec.dest_base, PathBuf::from("/docs"));
    assert_eq!(spec.keywords, vec!["alpha", "beta"]);
}

#[test]
fn destination_folder_becomes_the_output_base() {
    init_logging();
    let state = configured_state();
    let (state, _) = update(
        state,
        Msg::DestFolderPicked(Some(PathBuf::from("/annotated"))),
    );

    let (_state, effects) = update(state, Msg::StartClicked);

    let Some(Effect::StartBatch(spec)) = effects.first() else {
        panic!("expected StartBatch, got {effects:?}");
    };
    assert_eq!(spec.dest_base, PathBuf::from("/annotated"));
}

#[test]
fn clearing_destination_reverts_to_in_place() {
    init_logging();
    let state = configured_state();
    let (state, _) = update(
        state,
        Msg::DestFolderPicked(Some(PathBuf::from("/annotated"))),
    );
    let (state, _) = update(state, Msg::DestFolderPicked(None));

    let (_state, effects) = update(state, Msg::StartClicked);

    let Some(Effect::StartBatch(spec)) = effects.first() else {
        panic!("expected StartBatch, got {effects:?}");
    };
    assert_eq!(spec.dest_base, PathBuf::from("/docs"));
}

#[test]
fn start_is_ignored_outside_idle() {
    init_logging();
    let (state, effects) = update(configured_state(), Msg::StartClicked);
    assert_eq!(effects.len(), 1);

    // Second click while the snapshot is in flight: no new effect.
    let (state, effects) = update(state, Msg::StartClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().session, SessionState::Scanning);

    // And none while running either.
    let (state, _) = update(state, Msg::BatchStarted { total: 2 });
    let (state, effects) = update(state, Msg::StartClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().session, SessionState::Running);
}

#[test]
fn no_files_found_returns_to_idle_with_notice() {
    init_logging();
    let (state, _) = update(configured_state(), Msg::StartClicked);
    let (mut state, effects) = update(state, Msg::NoFilesFound);

    assert!(effects.is_empty());
    assert_eq!(state.view().session, SessionState::Idle);
    let notice = state.take_notice().expect("notice");
    assert_eq!(notice, Notice::NoPdfsFound);
    assert!(notice.informational());
}

#[test]
fn keyword_file_failure_surfaces_as_notice() {
    init_logging();
    let state = AppState::new();
    let (mut state, effects) = update(
        state,
        Msg::KeywordFileFailed("could not read keywords.txt".to_string()),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.take_notice(),
        Some(Notice::KeywordFile("could not read keywords.txt".to_string()))
    );
}

#[test]
fn session_restore_fills_configuration_without_marking_dirty() {
    init_logging();
    let state = AppState::new();
    let snapshot = marker_core::SessionSnapshot {
        source_folder: Some(PathBuf::from("/docs")),
        dest_folder: None,
        keywords: vec!["alpha".to_string()],
    };

    let (mut restored, effects) = update(state, Msg::SessionRestored(snapshot));

    assert!(effects.is_empty());
    assert_eq!(restored.view().keyword_count, 1);
    assert_eq!(restored.view().source_folder, Some(PathBuf::from("/docs")));
    assert!(!restored.consume_settings_dirty());
}

#[test]
fn configuration_edits_mark_settings_dirty_once() {
    init_logging();
    let state = AppState::new();
    let (mut state, _) = update(state, Msg::SourceFolderPicked(PathBuf::from("/docs")));
    assert!(state.consume_settings_dirty());
    assert!(!state.consume_settings_dirty());
}

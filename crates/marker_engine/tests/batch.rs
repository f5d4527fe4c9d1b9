use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use marker_engine::{
    AtomicFileWriter, BatchSpec, EngineBackend, EngineEvent, EngineHandle, FailureKind,
    HighlightStamper, JobError, PageChar, PageMarks, PageScanner, PageText, Region,
};
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Scanner double: every page shows one keyword occurrence, except files
/// whose name contains `bad`, which fail to open.
struct ScriptedScanner;

impl PageScanner for ScriptedScanner {
    fn scan_pages(&self, path: &Path) -> Result<Vec<PageText>, JobError> {
        let name = path.file_name().unwrap().to_string_lossy();
        if name.contains("bad") {
            return Err(JobError {
                kind: FailureKind::OpenDocument,
                message: "invalid xref table".to_string(),
            });
        }
        let chars = "target"
            .chars()
            .enumerate()
            .map(|(i, ch)| PageChar {
                ch,
                bounds: Region::new(i as f32 * 8.0, 690.0, (i + 1) as f32 * 8.0, 700.0),
            })
            .collect();
        Ok(vec![PageText { number: 1, chars }])
    }
}

/// Stamper double that writes a real output file through the same atomic
/// writer the production stamper uses, so directory creation and the
/// no-partial-output rule are exercised.
struct RecordingStamper {
    stamped: Arc<Mutex<Vec<(PathBuf, usize)>>>,
}

impl HighlightStamper for RecordingStamper {
    fn stamp(&self, _src: &Path, dest: &Path, marks: &[PageMarks]) -> Result<(), JobError> {
        let parent = dest.parent().expect("dest has a parent");
        let filename = dest.file_name().unwrap().to_str().unwrap();
        AtomicFileWriter::new(parent.to_path_buf())
            .write(filename, b"%PDF-1.4 stamped\n")
            .map_err(|err| JobError {
                kind: FailureKind::Save,
                message: err.to_string(),
            })?;
        let regions = marks.iter().map(|m| m.regions.len()).sum();
        self.stamped.lock().unwrap().push((dest.to_path_buf(), regions));
        Ok(())
    }
}

fn test_engine(stamped: Arc<Mutex<Vec<(PathBuf, usize)>>>) -> EngineHandle {
    EngineHandle::new(Box::new(move || {
        Ok(EngineBackend {
            scanner: Box::new(ScriptedScanner),
            stamper: Box::new(RecordingStamper { stamped }),
        })
    }))
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "timed out waiting for engine event");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn collect_run(engine: &EngineHandle) -> Vec<EngineEvent> {
    let mut events = vec![next_event(engine)];
    while !matches!(
        events.last(),
        Some(EngineEvent::BatchFinished { .. }) | Some(EngineEvent::NoFilesFound)
    ) {
        events.push(next_event(engine));
    }
    events
}

#[test]
fn empty_folder_reports_no_files() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let engine = test_engine(Arc::new(Mutex::new(Vec::new())));

    engine.run_batch(BatchSpec {
        source: temp.path().to_path_buf(),
        dest_base: temp.path().to_path_buf(),
        keywords: vec!["target".to_string()],
    });

    assert_eq!(collect_run(&engine), vec![EngineEvent::NoFilesFound]);
}

#[test]
fn one_broken_file_does_not_stop_the_batch() {
    init_logging();
    let temp = TempDir::new().unwrap();
    for name in ["one.pdf", "bad.pdf", "three.pdf"] {
        fs::write(temp.path().join(name), b"%PDF-1.4\n").unwrap();
    }
    let out = TempDir::new().unwrap();
    let stamped = Arc::new(Mutex::new(Vec::new()));
    let engine = test_engine(stamped.clone());

    engine.run_batch(BatchSpec {
        source: temp.path().to_path_buf(),
        dest_base: out.path().to_path_buf(),
        keywords: vec!["target".to_string()],
    });
    let events = collect_run(&engine);

    assert_eq!(events.first(), Some(&EngineEvent::BatchStarted { total: 3 }));
    assert_eq!(events.last(), Some(&EngineEvent::BatchFinished { total: 3 }));

    let completions: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::FileCompleted {
                index,
                source,
                outcome,
            } => Some((*index, source.clone(), outcome.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(completions.len(), 3);

    // 1-based indexes, in order.
    let indexes: Vec<_> = completions.iter().map(|(i, _, _)| *i).collect();
    assert_eq!(indexes, vec![1, 2, 3]);

    for (_, source, outcome) in &completions {
        let name = source.file_name().unwrap().to_string_lossy();
        if name.contains("bad") {
            let err = outcome.as_ref().unwrap_err();
            assert_eq!(err.kind, FailureKind::OpenDocument);
            assert_eq!(err.message, "invalid xref table");
            // A failed document leaves no output.
            assert!(!out.path().join(name.as_ref()).exists());
        } else {
            assert_eq!(outcome.as_ref().unwrap(), &1);
            assert!(out.path().join(name.as_ref()).exists());
        }
    }

    assert_eq!(stamped.lock().unwrap().len(), 2);
}

#[test]
fn destination_tree_mirrors_nested_sources() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("reports/2024")).unwrap();
    fs::write(temp.path().join("reports/2024/q1.pdf"), b"%PDF-1.4\n").unwrap();
    let out = TempDir::new().unwrap();
    let stamped = Arc::new(Mutex::new(Vec::new()));
    let engine = test_engine(stamped.clone());

    engine.run_batch(BatchSpec {
        source: temp.path().to_path_buf(),
        dest_base: out.path().to_path_buf(),
        keywords: vec!["target".to_string()],
    });
    collect_run(&engine);

    // Parent directories are created before the write.
    assert!(out.path().join("reports/2024/q1.pdf").is_file());
}

#[test]
fn backend_failure_fails_every_file_but_finishes_the_batch() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("doc.pdf"), b"%PDF-1.4\n").unwrap();
    let engine = EngineHandle::new(Box::new(|| {
        Err(JobError {
            kind: FailureKind::Backend,
            message: "pdfium unavailable".to_string(),
        })
    }));

    engine.run_batch(BatchSpec {
        source: temp.path().to_path_buf(),
        dest_base: temp.path().to_path_buf(),
        keywords: vec!["target".to_string()],
    });
    let events = collect_run(&engine);

    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[1],
        EngineEvent::FileCompleted { outcome: Err(err), .. } if err.kind == FailureKind::Backend
    ));
    assert_eq!(events.last(), Some(&EngineEvent::BatchFinished { total: 1 }));
}

#[test]
fn missing_source_is_reported_distinctly_from_corrupt() {
    init_logging();
    let stamped = Arc::new(Mutex::new(Vec::new()));
    let scanner = ScriptedScanner;
    let stamper = RecordingStamper { stamped };

    let err = marker_engine::highlight_file(
        &scanner,
        &stamper,
        Path::new("/definitely/not/here.pdf"),
        Path::new("/tmp/out.pdf"),
        &["target".to_string()],
    )
    .unwrap_err();

    assert_eq!(err.kind, FailureKind::NotFound);
}

#[test]
fn consecutive_batches_run_on_the_same_worker() {
    init_logging();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("doc.pdf"), b"%PDF-1.4\n").unwrap();
    let stamped = Arc::new(Mutex::new(Vec::new()));
    let engine = test_engine(stamped.clone());

    let spec = BatchSpec {
        source: temp.path().to_path_buf(),
        dest_base: temp.path().to_path_buf(),
        keywords: vec!["target".to_string()],
    };
    engine.run_batch(spec.clone());
    let first = collect_run(&engine);
    engine.run_batch(spec);
    let second = collect_run(&engine);

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert_eq!(stamped.lock().unwrap().len(), 2);
}

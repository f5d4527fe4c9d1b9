use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_info, engine_warn};

use crate::dest::output_path_for;
use crate::discover::discover_pdfs;
use crate::highlight::highlight_file;
use crate::scan::{PageScanner, PdfiumScanner};
use crate::stamp::{HighlightStamper, LopdfStamper};
use crate::types::{BatchSpec, EngineEvent};
use crate::JobError;

enum EngineCommand {
    RunBatch(BatchSpec),
}

/// The PDF backends a worker runs with. Constructed on the worker thread by
/// the factory handed to [`EngineHandle::new`]; tests substitute fakes here.
pub struct EngineBackend {
    pub scanner: Box<dyn PageScanner>,
    pub stamper: Box<dyn HighlightStamper>,
}

pub type BackendFactory = Box<dyn FnOnce() -> Result<EngineBackend, JobError> + Send>;

/// Handle to the single worker thread. Commands go in over one channel,
/// events come back over another; the foreground drains events with
/// [`EngineHandle::try_recv`] on its own tick and never blocks.
///
/// The command channel serializes batches: a second request queues behind a
/// running one, it can never interleave with it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(factory: BackendFactory) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let backend = factory();
            if let Err(err) = &backend {
                engine_warn!("engine backend unavailable: {}", err);
            }
            while let Ok(EngineCommand::RunBatch(spec)) = cmd_rx.recv() {
                run_batch(&backend, &spec, &event_tx);
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Production engine: pdfium for text geometry, lopdf for stamping.
    pub fn with_pdf_backend() -> Self {
        Self::new(Box::new(|| {
            Ok(EngineBackend {
                scanner: Box::new(PdfiumScanner::new()?),
                stamper: Box::new(LopdfStamper),
            })
        }))
    }

    pub fn run_batch(&self, spec: BatchSpec) {
        let _ = self.cmd_tx.send(EngineCommand::RunBatch(spec));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

fn run_batch(
    backend: &Result<EngineBackend, JobError>,
    spec: &BatchSpec,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let files = discover_pdfs(&spec.source);
    if files.is_empty() {
        engine_info!("no PDFs under {}", spec.source.display());
        let _ = event_tx.send(EngineEvent::NoFilesFound);
        return;
    }

    let total = files.len();
    engine_info!(
        "batch started: {} file(s) under {}, {} keyword(s)",
        total,
        spec.source.display(),
        spec.keywords.len()
    );
    let _ = event_tx.send(EngineEvent::BatchStarted { total });

    for (position, file) in files.iter().enumerate() {
        let outcome = match backend {
            Ok(backend) => {
                let dest = output_path_for(file, &spec.source, &spec.dest_base);
                highlight_file(
                    backend.scanner.as_ref(),
                    backend.stamper.as_ref(),
                    file,
                    &dest,
                    &spec.keywords,
                )
            }
            // Without a backend every file fails the same way; the batch
            // still reports each one rather than dying silently.
            Err(err) => Err(err.clone()),
        };
        if let Err(err) = &outcome {
            engine_warn!("{}: {}", file.display(), err);
        }
        let _ = event_tx.send(EngineEvent::FileCompleted {
            index: position + 1,
            source: file.clone(),
            outcome,
        });
    }

    engine_info!("batch finished: {} file(s)", total);
    let _ = event_tx.send(EngineEvent::BatchFinished { total });
}

use engine_logging::engine_info;
use marker_core::{Effect, Msg};
use marker_engine::{EngineEvent, EngineHandle};

/// Owns the engine worker and translates between core and engine vocabulary.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new() -> Self {
        Self {
            engine: EngineHandle::with_pdf_backend(),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartBatch(spec) => {
                    engine_info!(
                        "StartBatch source={} dest={} keywords={}",
                        spec.source.display(),
                        spec.dest_base.display(),
                        spec.keywords.len()
                    );
                    self.engine.run_batch(marker_engine::BatchSpec {
                        source: spec.source,
                        dest_base: spec.dest_base,
                        keywords: spec.keywords,
                    });
                }
            }
        }
    }

    /// Non-blocking drain of everything the worker has queued.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BatchStarted { total } => Msg::BatchStarted { total },
        EngineEvent::NoFilesFound => Msg::NoFilesFound,
        EngineEvent::FileCompleted {
            index,
            source,
            outcome,
        } => Msg::FileCompleted {
            index,
            name: source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string()),
            outcome: outcome.map_err(|err| err.to_string()),
        },
        EngineEvent::BatchFinished { total } => Msg::BatchFinished { total },
    }
}

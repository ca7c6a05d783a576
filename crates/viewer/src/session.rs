use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use maquette_core::{import, normalize, ImportError, MeshFormat};
use maquette_render::{
    pack_node, CameraState, ControlFlags, GpuBackend, GpuNodeId, ViewportController,
};
use maquette_scene::SceneNode;

use crate::config::ViewerConfig;

/// Where the upload's bytes come from. The transport layer hands the viewer
/// either the blob itself or a locator it can read; a path is read inside
/// the decode worker so slow IO never blocks the frame loop.
#[derive(Debug, Clone)]
pub enum ModelSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Failed(ImportError),
}

/// What the render loop reads each frame. Must tolerate `node == None`
/// (nothing but helpers to draw) and `Loading` (prior model still shown).
#[derive(Debug)]
pub struct ViewerFrame<'a> {
    pub node: Option<&'a SceneNode>,
    pub camera: CameraState,
    pub controls: ControlFlags,
    pub status: SessionStatus,
}

struct ActiveModel {
    node: SceneNode,
    gpu: GpuNodeId,
}

struct LoadOutcome {
    seq: u64,
    result: Result<SceneNode, ImportError>,
}

/// Orchestrates the import/normalize pipeline and owns the single active
/// node, its GPU handle, and the viewport. One session per mounted viewer;
/// all state transitions happen on the thread that calls `poll`.
pub struct ModelSession {
    backend: Box<dyn GpuBackend>,
    viewport: ViewportController,
    active: Option<ActiveModel>,
    status: SessionStatus,
    seq: u64,
    outcome_tx: Sender<LoadOutcome>,
    outcome_rx: Receiver<LoadOutcome>,
}

impl ModelSession {
    pub fn new(backend: Box<dyn GpuBackend>, config: &ViewerConfig) -> Self {
        let (outcome_tx, outcome_rx) = channel();
        Self {
            backend,
            viewport: ViewportController::new(config.tuning()),
            active: None,
            status: SessionStatus::Idle,
            seq: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn camera(&self) -> CameraState {
        self.viewport.camera()
    }

    pub fn controls(&self) -> ControlFlags {
        self.viewport.controls()
    }

    pub fn active_node(&self) -> Option<&SceneNode> {
        self.active.as_ref().map(|active| &active.node)
    }

    /// Start loading a model. The extension decides the format; an unknown
    /// one fails the request up front without disturbing the active model.
    /// A load issued while another is in flight supersedes it: only the
    /// most recent request's result is ever installed.
    pub fn load(&mut self, source: ModelSource, extension: &str) {
        let format = match MeshFormat::from_extension(extension) {
            Ok(format) => format,
            Err(err) => {
                tracing::warn!("load rejected: {err}");
                // The rejected request is still the most recent one, so any
                // load in flight is superseded and must not install later.
                self.seq += 1;
                self.status = SessionStatus::Failed(err);
                self.viewport.set_locked(false);
                return;
            }
        };

        let seq = self.begin_load();
        tracing::info!(%format, seq, "model load started");
        let tx = self.outcome_tx.clone();
        thread::spawn(move || {
            let result = decode(source, format);
            // The session may already have been dropped; nothing to do then.
            let _ = tx.send(LoadOutcome { seq, result });
        });
    }

    /// Drain finished loads. Called by the host's per-frame callback; this
    /// is the only place results are installed, so the install and the
    /// dispose of the previous node are atomic with respect to `frame`.
    pub fn poll(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome.seq, outcome.result);
        }
    }

    /// The per-frame read handed to the render loop.
    pub fn frame(&self) -> ViewerFrame<'_> {
        ViewerFrame {
            node: self.active_node(),
            camera: self.viewport.camera(),
            controls: self.viewport.controls(),
            status: self.status.clone(),
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_view();
    }

    pub fn toggle_projection(&mut self) {
        self.viewport.toggle_projection();
    }

    /// Tear the session down. Idempotent; also the only path that frees the
    /// active node's GPU resources. Any load still in flight becomes stale
    /// and its result is discarded when it arrives.
    pub fn dispose(&mut self) {
        if let Some(previous) = self.active.take() {
            self.backend.dispose(previous.gpu);
            tracing::info!("active model disposed");
        }
        self.seq += 1;
        self.status = SessionStatus::Idle;
        self.viewport.set_locked(false);
        self.viewport.reset_view();
    }

    fn begin_load(&mut self) -> u64 {
        self.seq += 1;
        self.status = SessionStatus::Loading;
        self.viewport.set_locked(true);
        self.seq
    }

    fn apply_outcome(&mut self, seq: u64, result: Result<SceneNode, ImportError>) {
        if seq != self.seq {
            tracing::debug!(seq, current = self.seq, "stale load result discarded");
            return;
        }

        match result {
            Ok(node) => self.install(node),
            Err(err) => {
                // A failed load never disturbs a previously loaded model.
                tracing::warn!("model load failed: {err}");
                self.status = SessionStatus::Failed(err);
                self.viewport.set_locked(false);
            }
        }
    }

    fn install(&mut self, node: SceneNode) {
        let buffers = pack_node(&node);
        let gpu = self.backend.upload(&buffers);

        // Dispose the previous node only now that the new one fully exists,
        // so a failed or superseded load never leaves the viewer empty.
        if let Some(previous) = self.active.take() {
            self.backend.dispose(previous.gpu);
        }

        if let Some(bounds) = node.bounds() {
            self.viewport.fit_to_bounds(&bounds);
        }

        tracing::info!(
            primitives = node.primitives.len(),
            vertices = node.vertex_count(),
            "model installed"
        );
        self.active = Some(ActiveModel { node, gpu });
        self.status = SessionStatus::Ready;
        self.viewport.set_locked(false);
    }
}

fn decode(source: ModelSource, format: MeshFormat) -> Result<SceneNode, ImportError> {
    let bytes = match source {
        ModelSource::Bytes(bytes) => bytes,
        ModelSource::Path(path) => std::fs::read(&path).map_err(|err| {
            ImportError::Parse(format!("failed to read {}: {err}", path.display()))
        })?,
    };
    normalize(import(&bytes, format)?)
}

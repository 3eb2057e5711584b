//! Audio output backends.
//!
//! A backend opens an output, moves a [`ToneGraph`] onto whatever thread
//! renders it and hands back an [`AudioContext`]: the producer end of the
//! control ring plus whatever must stay alive for sound to keep flowing.

use std::{
    any::Any,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use super::{graph::ToneGraph, message::ToneMessage};
use crate::{config::ToneConfig, error::ToneError, MAX_BLOCK_SIZE};

pub trait AudioBackend {
    fn open(&mut self, config: &ToneConfig) -> Result<AudioContext, ToneError>;

    fn name(&self) -> &'static str;
}

/// Control-side handle to an open output.
pub struct AudioContext {
    tx: Producer<ToneMessage>,
    sample_rate: f32,
    scope: Option<Consumer<f32>>,
    _keep_alive: Box<dyn Any>,
}

impl AudioContext {
    pub fn new(tx: Producer<ToneMessage>, sample_rate: f32, keep_alive: Box<dyn Any>) -> Self {
        Self {
            tx,
            sample_rate,
            scope: None,
            _keep_alive: keep_alive,
        }
    }

    pub fn with_scope(mut self, scope: Consumer<f32>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn send(&mut self, msg: ToneMessage) -> Result<(), ToneError> {
        self.tx.push(msg).map_err(|_| ToneError::QueueFull)
    }

    /// Send all of `msgs` or none of them.
    pub fn send_batch(&mut self, msgs: &[ToneMessage]) -> Result<(), ToneError> {
        if self.tx.slots() < msgs.len() {
            return Err(ToneError::QueueFull);
        }
        for &msg in msgs {
            self.send(msg)?;
        }
        Ok(())
    }

    pub fn take_scope(&mut self) -> Option<Consumer<f32>> {
        self.scope.take()
    }
}

/// Build the control ring, the scope tap and a graph wired to both.
fn wire(
    sample_rate: f32,
    config: &ToneConfig,
) -> (Producer<ToneMessage>, Option<Consumer<f32>>, ToneGraph) {
    let (tx, rx) = RingBuffer::new(config.queue_capacity.max(2));
    let graph = ToneGraph::new(sample_rate, rx);
    if config.scope_capacity == 0 {
        return (tx, None, graph);
    }
    let (scope_tx, scope_rx) = RingBuffer::new(config.scope_capacity);
    (tx, Some(scope_rx), graph.with_scope(scope_tx))
}

/// The system's default output device through cpal.
#[derive(Debug, Default)]
pub struct CpalBackend;

impl CpalBackend {
    pub fn new() -> Self {
        Self
    }
}

impl AudioBackend for CpalBackend {
    fn open(&mut self, config: &ToneConfig) -> Result<AudioContext, ToneError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| ToneError::AudioUnavailable {
                details: "no default output device available".into(),
            })?;
        let output = device
            .default_output_config()
            .map_err(|err| ToneError::AudioUnavailable {
                details: err.to_string(),
            })?;

        let sample_rate = output.sample_rate().0 as f32;
        let channels = output.channels() as usize;
        let (tx, scope, mut graph) = wire(sample_rate, config);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &output.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames];
                        graph.render(block);

                        // Mono to all channels
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            let frame = out_off + i * channels;
                            data[frame..frame + channels].fill(s);
                        }

                        frames_written += frames;
                    }
                },
                |err| tracing::warn!(%err, "audio stream error"),
                None,
            )
            .map_err(|err| ToneError::Stream {
                details: err.to_string(),
            })?;

        stream.play().map_err(|err| ToneError::Stream {
            details: err.to_string(),
        })?;

        tracing::debug!(sample_rate, channels, "opened audio output");

        let context = AudioContext::new(tx, sample_rate, Box::new(stream));
        Ok(match scope {
            Some(scope) => context.with_scope(scope),
            None => context,
        })
    }

    fn name(&self) -> &'static str {
        "cpal"
    }
}

type SharedGraph = Arc<Mutex<Option<ToneGraph>>>;

fn lock(graph: &SharedGraph) -> MutexGuard<'_, Option<ToneGraph>> {
    graph.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Renders on demand instead of on a device thread.
///
/// The graph lives behind the paired [`OfflineRenderer`]; dropping the
/// [`AudioContext`] tears it down, the same way dropping a cpal stream does.
pub struct OfflineBackend {
    sample_rate: f32,
    graph: SharedGraph,
    available: bool,
}

impl OfflineBackend {
    pub fn new(sample_rate: f32) -> (Self, OfflineRenderer) {
        let graph: SharedGraph = Arc::new(Mutex::new(None));
        let backend = Self {
            sample_rate,
            graph: Arc::clone(&graph),
            available: true,
        };
        (backend, OfflineRenderer { graph })
    }

    /// A backend whose device can never be opened.
    pub fn unavailable() -> Self {
        Self {
            sample_rate: 48_000.0,
            graph: Arc::new(Mutex::new(None)),
            available: false,
        }
    }
}

impl AudioBackend for OfflineBackend {
    fn open(&mut self, config: &ToneConfig) -> Result<AudioContext, ToneError> {
        if !self.available {
            return Err(ToneError::AudioUnavailable {
                details: "offline device marked unavailable".into(),
            });
        }

        let (tx, scope, graph) = wire(self.sample_rate, config);
        *lock(&self.graph) = Some(graph);

        let context = AudioContext::new(
            tx,
            self.sample_rate,
            Box::new(OfflineStream(Arc::clone(&self.graph))),
        );
        Ok(match scope {
            Some(scope) => context.with_scope(scope),
            None => context,
        })
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

struct OfflineStream(SharedGraph);

impl Drop for OfflineStream {
    fn drop(&mut self) {
        lock(&self.0).take();
    }
}

/// Drives an [`OfflineBackend`]'s graph from the calling thread.
#[derive(Clone)]
pub struct OfflineRenderer {
    graph: SharedGraph,
}

impl OfflineRenderer {
    /// Render `frames` mono samples. Silence when no output is open.
    pub fn render(&self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut [f32]) {
        match lock(&self.graph).as_mut() {
            Some(graph) => graph.render(out),
            None => out.fill(0.0),
        }
    }

    /// Render `seconds` worth of audio and discard it.
    pub fn advance(&self, seconds: f32) {
        let mut guard = lock(&self.graph);
        if let Some(graph) = guard.as_mut() {
            let frames = (seconds * graph.sample_rate()).round() as usize;
            let mut buf = vec![0.0; frames];
            graph.render(&mut buf);
        }
    }

    pub fn is_open(&self) -> bool {
        lock(&self.graph).is_some()
    }

    /// Inspect the graph, if an output is open.
    pub fn with_graph<R>(&self, f: impl FnOnce(&ToneGraph) -> R) -> Option<R> {
        lock(&self.graph).as_ref().map(f)
    }
}

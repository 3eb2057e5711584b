use rtrb::Consumer;

use super::{
    backend::{AudioBackend, AudioContext, CpalBackend},
    message::{SessionId, ToneMessage, Voicing},
    synthesis::voicing_for,
};
use crate::{config::ToneConfig, emotion::ToneCategory};

/// The tone currently sounding, as the control side knows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSession {
    id: SessionId,
    category: ToneCategory,
    voicing: Voicing,
}

impl ToneSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn category(&self) -> ToneCategory {
        self.category
    }

    /// One entry per sine source.
    pub fn frequencies(&self) -> &[f32] {
        self.voicing.frequencies()
    }
}

enum Output {
    Closed,
    Open(AudioContext),
    /// Opening failed once; stay silent instead of retrying on every hover.
    Failed,
}

/// Plays one emotion tone at a time with click-free transitions.
///
/// The engine never surfaces audio errors: a missing device or a full
/// control queue is logged and the call returns as if nothing happened.
pub struct ToneEngine {
    backend: Box<dyn AudioBackend>,
    config: ToneConfig,
    output: Output,
    session: Option<ToneSession>,
    muted: bool,
    volume: f32,
    next_id: SessionId,
    scope: Option<Consumer<f32>>,
}

impl ToneEngine {
    pub fn new(backend: Box<dyn AudioBackend>, config: ToneConfig) -> Self {
        let volume = config.volume.clamp(0.0, 1.0);
        Self {
            backend,
            config,
            output: Output::Closed,
            session: None,
            muted: false,
            volume,
            next_id: 1,
            scope: None,
        }
    }

    /// An engine on the default output device.
    pub fn with_default_output(config: ToneConfig) -> Self {
        Self::new(Box::new(CpalBackend::new()), config)
    }

    /// Start with the mute flag set; the first tone fades in to silence.
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    fn context(&mut self) -> Option<&mut AudioContext> {
        if matches!(self.output, Output::Closed) {
            self.output = match self.backend.open(&self.config) {
                Ok(mut context) => {
                    self.scope = context.take_scope();
                    Output::Open(context)
                }
                Err(err) => {
                    tracing::warn!(backend = self.backend.name(), %err, "audio unavailable, tones disabled");
                    Output::Failed
                }
            };
        }
        match &mut self.output {
            Output::Open(context) => Some(context),
            Output::Closed | Output::Failed => None,
        }
    }

    /// The context if it is already open. Never opens one.
    fn open_context(&mut self) -> Option<&mut AudioContext> {
        match &mut self.output {
            Output::Open(context) => Some(context),
            Output::Closed | Output::Failed => None,
        }
    }

    fn live_target(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Replace whatever is sounding with the tone for `category`.
    ///
    /// The previous session fades out on the audio thread while the new one
    /// fades in; the call itself returns immediately.
    pub fn play_emotion_sound(&mut self, category: ToneCategory) {
        let id = self.next_id;
        let voicing = voicing_for(category);
        let fade_out = self.config.fade_out().as_secs_f32();
        let start = ToneMessage::Start {
            id,
            voicing,
            target: self.live_target(),
            attack: self.config.fade_in().as_secs_f32(),
        };
        let previous = self.session.take();

        let Some(context) = self.context() else {
            return;
        };

        let mut batch = Vec::with_capacity(2);
        if let Some(previous) = &previous {
            batch.push(ToneMessage::Release {
                id: previous.id,
                fade: fade_out,
            });
        }
        batch.push(start);

        if let Err(err) = context.send_batch(&batch) {
            tracing::warn!(%err, category = category.name(), "dropped tone change");
            self.session = previous;
            return;
        }

        tracing::debug!(id, category = category.name(), frequencies = ?voicing.frequencies(), "tone started");
        self.next_id += 1;
        self.session = Some(ToneSession {
            id,
            category,
            voicing,
        });
    }

    /// Fade the current tone out and stop it. A no-op when nothing plays.
    pub fn stop_sound(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let fade = self.config.fade_out().as_secs_f32();
        let Some(context) = self.open_context() else {
            return;
        };
        match context.send(ToneMessage::Release {
            id: session.id,
            fade,
        }) {
            Ok(()) => tracing::debug!(id = session.id, "tone released"),
            Err(err) => tracing::warn!(%err, id = session.id, "failed to release tone"),
        }
    }

    /// Flip the mute flag and ramp the live gain. Returns the new mute state.
    ///
    /// Without a sounding session the flag is left alone.
    pub fn toggle_mute(&mut self) -> bool {
        let Some(id) = self.session.as_ref().map(ToneSession::id) else {
            return self.muted;
        };

        self.muted = !self.muted;
        let target = self.live_target();
        let seconds = self.config.mute_ramp().as_secs_f32();

        let sent = match self.open_context() {
            Some(context) => context.send(ToneMessage::Ramp {
                id,
                target,
                seconds,
            }),
            None => Ok(()),
        };
        if let Err(err) = sent {
            tracing::warn!(%err, "failed to toggle mute");
            self.muted = !self.muted;
        }
        self.muted
    }

    /// Set the unmuted target level (clamped to 0..=1).
    pub fn set_volume(&mut self, level: f32) {
        self.volume = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };

        if self.muted {
            return;
        }
        let Some(id) = self.session.as_ref().map(ToneSession::id) else {
            return;
        };
        let msg = ToneMessage::Ramp {
            id,
            target: self.volume,
            seconds: self.config.mute_ramp().as_secs_f32(),
        };
        if let Some(Err(err)) = self.open_context().map(|context| context.send(msg)) {
            tracing::warn!(%err, "failed to change volume");
        }
    }

    /// Stop everything and close the output. The engine reopens lazily if
    /// used again.
    pub fn dispose(&mut self) {
        self.session = None;
        self.scope = None;
        if let Some(context) = self.open_context() {
            if let Err(err) = context.send(ToneMessage::StopAll) {
                tracing::warn!(%err, "failed to silence voices before closing");
            }
        }
        if matches!(self.output, Output::Open(_)) {
            tracing::debug!("audio output closed");
        }
        self.output = Output::Closed;
    }

    /// Receiving end of the rendered-sample tap. Opens the output if needed.
    pub fn take_scope(&mut self) -> Option<Consumer<f32>> {
        self.context()?;
        self.scope.take()
    }

    pub fn session(&self) -> Option<&ToneSession> {
        self.session.as_ref()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sample_rate(&self) -> Option<f32> {
        match &self.output {
            Output::Open(context) => Some(context.sample_rate()),
            Output::Closed | Output::Failed => None,
        }
    }

    /// False once opening the output has failed.
    pub fn is_available(&self) -> bool {
        !matches!(self.output, Output::Failed)
    }
}

impl Drop for ToneEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

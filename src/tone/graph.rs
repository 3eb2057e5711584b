use rtrb::{Consumer, Producer};

use super::{
    message::{SessionId, ToneMessage, Voicing},
    scheduler::{Scheduler, Task, TaskHandle},
    voice::{ToneVoice, VoiceState},
};
use crate::{
    dsp::mix::sum_in_place,
    graph::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Voices kept in the pool. One sounding session plus room for the ones
/// still fading out after rapid hovering.
pub const VOICE_POOL_SIZE: usize = 4;

pub const SCHEDULER_CAPACITY: usize = 32;

/// Audio-thread renderer for the tone engine.
///
/// Owned by the output callback. At the start of every block it drains the
/// control ring, runs scheduler tasks that have come due and then mixes
/// every live voice. Nothing here allocates after construction.
pub struct ToneGraph {
    rx: Consumer<ToneMessage>,
    voices: Vec<ToneVoice>,
    /// Pending hard stop per voice slot.
    stops: [Option<TaskHandle>; VOICE_POOL_SIZE],
    scheduler: Scheduler,
    ctx: RenderCtx,
    clock: u64,
    voice_buf: Vec<f32>,
    scope: Option<Producer<f32>>,
}

impl ToneGraph {
    pub fn new(sample_rate: f32, rx: Consumer<ToneMessage>) -> Self {
        Self {
            rx,
            voices: (0..VOICE_POOL_SIZE)
                .map(|_| ToneVoice::new(sample_rate))
                .collect(),
            stops: [None; VOICE_POOL_SIZE],
            scheduler: Scheduler::with_capacity(SCHEDULER_CAPACITY),
            ctx: RenderCtx::new(sample_rate),
            clock: 0,
            voice_buf: vec![0.0; MAX_BLOCK_SIZE],
            scope: None,
        }
    }

    /// Mirror every rendered sample into `tx` for visualisation. Samples are
    /// dropped when the reader falls behind.
    pub fn with_scope(mut self, tx: Producer<f32>) -> Self {
        self.scope = Some(tx);
        self
    }

    /// Render a mono block of any length.
    ///
    /// Blocks are cut short at the next scheduled task so a deferred stop
    /// lands on its exact sample.
    pub fn render(&mut self, out: &mut [f32]) {
        let mut offset = 0;
        while offset < out.len() {
            let end = (offset + MAX_BLOCK_SIZE).min(out.len());
            offset += self.render_chunk(&mut out[offset..end]);
        }
    }

    /// Render up to `out.len()` samples and return how many were written.
    fn render_chunk(&mut self, out: &mut [f32]) -> usize {
        while let Ok(msg) = self.rx.pop() {
            self.handle(msg);
        }

        while let Some(task) = self.scheduler.pop_due(self.clock) {
            self.run(task);
        }

        // Every remaining task is due strictly after the clock
        let len = match self.scheduler.next_due() {
            Some(due) => out.len().min((due - self.clock) as usize),
            None => out.len(),
        };
        let out = &mut out[..len];

        out.fill(0.0);
        let voice_buf = &mut self.voice_buf[..len];
        for (voice, stop) in self.voices.iter_mut().zip(self.stops.iter_mut()) {
            if !voice.is_active() {
                continue;
            }
            voice.render_block(voice_buf, &self.ctx);
            sum_in_place(out, voice_buf);

            // Fade ran out first, the hard stop has nothing left to do
            if voice.is_free() {
                if let Some(handle) = stop.take() {
                    self.scheduler.cancel(handle);
                }
            }
        }

        if let Some(tx) = self.scope.as_mut() {
            for &sample in out.iter() {
                if tx.push(sample).is_err() {
                    break;
                }
            }
        }

        self.clock += len as u64;
        len
    }

    fn handle(&mut self, msg: ToneMessage) {
        match msg {
            ToneMessage::Start {
                id,
                voicing,
                target,
                attack,
            } => self.start(id, voicing, target, attack),
            ToneMessage::Ramp {
                id,
                target,
                seconds,
            } => {
                if let Some(voice) = self.voice_mut(id) {
                    voice.ramp_to(target, seconds);
                }
            }
            ToneMessage::Release { id, fade } => self.release(id, fade),
            ToneMessage::StopAll => {
                for voice in &mut self.voices {
                    voice.stop();
                }
                self.stops = [None; VOICE_POOL_SIZE];
                self.scheduler.clear();
            }
        }
    }

    fn start(&mut self, id: SessionId, voicing: Voicing, target: f32, attack: f32) {
        let clock = self.clock;
        let index = self
            .voices
            .iter()
            .position(ToneVoice::is_free)
            .or_else(|| oldest(&self.voices, VoiceState::Releasing))
            .or_else(|| oldest(&self.voices, VoiceState::Active));

        let Some(index) = index else {
            return;
        };

        let stolen = self.voices[index].id();
        if !self.voices[index].is_free() {
            self.scheduler.cancel_for(stolen);
        }
        self.stops[index] = None;
        self.voices[index].start(id, voicing, target, attack, clock);
    }

    fn release(&mut self, id: SessionId, fade: f32) {
        let due = self.clock + self.ctx.samples_for(fade);
        let Some(index) = self.voice_index(id) else {
            return;
        };
        let voice = &mut self.voices[index];
        if voice.state() != VoiceState::Active {
            return;
        }
        voice.release(fade);
        // A full scheduler leaves the voice to free itself at the end of the fade
        self.stops[index] = self.scheduler.schedule(due, Task::Stop(id));
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Stop(id) => {
                if let Some(index) = self.voice_index(id) {
                    self.voices[index].stop();
                    self.stops[index] = None;
                }
            }
        }
    }

    fn voice_index(&self, id: SessionId) -> Option<usize> {
        self.voices.iter().position(|v| !v.is_free() && v.id() == id)
    }

    fn voice_mut(&mut self, id: SessionId) -> Option<&mut ToneVoice> {
        let index = self.voice_index(id)?;
        self.voices.get_mut(index)
    }

    /// Voices that are sounding or fading out.
    pub fn live_voices(&self) -> impl Iterator<Item = &ToneVoice> {
        self.voices.iter().filter(|v| !v.is_free())
    }

    /// Voices that are sounding and not releasing.
    pub fn sounding_voices(&self) -> impl Iterator<Item = &ToneVoice> {
        self.voices
            .iter()
            .filter(|v| v.state() == VoiceState::Active)
    }

    pub fn voice(&self, id: SessionId) -> Option<&ToneVoice> {
        self.live_voices().find(|v| v.id() == id)
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Samples rendered so far.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }
}

fn oldest(voices: &[ToneVoice], state: VoiceState) -> Option<usize> {
    voices
        .iter()
        .enumerate()
        .filter(|(_, v)| v.state() == state)
        .min_by_key(|(_, v)| v.age())
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::synthesis::{binaural, healing_chord};
    use rtrb::RingBuffer;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn graph() -> (Producer<ToneMessage>, ToneGraph) {
        let (tx, rx) = RingBuffer::new(16);
        (tx, ToneGraph::new(SAMPLE_RATE, rx))
    }

    fn render(graph: &mut ToneGraph, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        graph.render(&mut out);
        out
    }

    #[test]
    fn start_then_release_frees_voice() {
        let (mut tx, mut graph) = graph();
        tx.push(ToneMessage::Start {
            id: 1,
            voicing: binaural(396.0, 10.0),
            target: 0.08,
            attack: 0.2,
        })
        .unwrap();
        render(&mut graph, 9_600);
        assert_eq!(graph.sounding_voices().count(), 1);

        tx.push(ToneMessage::Release { id: 1, fade: 0.1 }).unwrap();
        render(&mut graph, 128);
        assert_eq!(graph.pending_tasks(), 1);
        assert_eq!(graph.sounding_voices().count(), 0);

        // Voice frees itself at the end of the fade and drops its stop
        render(&mut graph, 4_800);
        assert_eq!(graph.live_voices().count(), 0);
        assert_eq!(graph.pending_tasks(), 0);
    }

    #[test]
    fn blocks_split_at_scheduled_stop() {
        let (mut tx, mut graph) = graph();
        tx.push(ToneMessage::Start {
            id: 4,
            voicing: binaural(741.0, 8.0),
            target: 0.08,
            attack: 0.0,
        })
        .unwrap();
        tx.push(ToneMessage::Release { id: 4, fade: 0.01 }).unwrap();

        // 480 samples of fade inside a single 2048-sample request
        let out = render(&mut graph, 2_048);
        assert_eq!(graph.clock(), 2_048);
        assert_eq!(graph.live_voices().count(), 0);
        assert_eq!(graph.pending_tasks(), 0);
        assert!(out[480..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn stop_for_unknown_session_does_nothing() {
        let (mut tx, mut graph) = graph();
        tx.push(ToneMessage::Start {
            id: 2,
            voicing: healing_chord(528.0),
            target: 0.08,
            attack: 0.0,
        })
        .unwrap();
        tx.push(ToneMessage::Release { id: 9, fade: 0.1 }).unwrap();
        render(&mut graph, 256);

        assert_eq!(graph.pending_tasks(), 0);
        assert_eq!(graph.voice(2).map(|v| v.frequencies().len()), Some(4));
    }

    #[test]
    fn stop_all_clears_voices_and_tasks() {
        let (mut tx, mut graph) = graph();
        for id in 1..=3 {
            tx.push(ToneMessage::Start {
                id,
                voicing: binaural(432.0, 6.0),
                target: 0.08,
                attack: 0.0,
            })
            .unwrap();
            tx.push(ToneMessage::Release { id, fade: 1.0 }).unwrap();
        }
        render(&mut graph, 64);
        assert_eq!(graph.pending_tasks(), 3);

        tx.push(ToneMessage::StopAll).unwrap();
        let out = render(&mut graph, 64);
        assert_eq!(graph.live_voices().count(), 0);
        assert_eq!(graph.pending_tasks(), 0);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn stolen_voice_loses_its_pending_stop() {
        let (mut tx, mut graph) = graph();
        let mut id = 0;
        for _ in 0..VOICE_POOL_SIZE {
            id += 1;
            tx.push(ToneMessage::Start {
                id,
                voicing: binaural(417.0, 4.0),
                target: 0.08,
                attack: 0.0,
            })
            .unwrap();
            tx.push(ToneMessage::Release { id, fade: 10.0 }).unwrap();
        }
        render(&mut graph, 64);
        assert_eq!(graph.pending_tasks(), VOICE_POOL_SIZE);

        tx.push(ToneMessage::Start {
            id: 99,
            voicing: binaural(417.0, 4.0),
            target: 0.08,
            attack: 0.0,
        })
        .unwrap();
        render(&mut graph, 64);

        assert_eq!(graph.pending_tasks(), VOICE_POOL_SIZE - 1);
        assert!(graph.voice(1).is_none());
        assert!(graph.voice(99).is_some());
    }

    #[test]
    fn scope_receives_rendered_samples() {
        let (mut tx, rx) = RingBuffer::new(16);
        let (scope_tx, mut scope_rx) = RingBuffer::new(1024);
        let mut graph = ToneGraph::new(SAMPLE_RATE, rx).with_scope(scope_tx);
        tx.push(ToneMessage::Start {
            id: 1,
            voicing: healing_chord(432.0),
            target: 0.5,
            attack: 0.0,
        })
        .unwrap();

        let out = render(&mut graph, 256);
        assert_eq!(scope_rx.slots(), 256);
        for expected in out {
            assert_eq!(scope_rx.pop().unwrap(), expected);
        }
    }
}

/*
Tone synthesis
==============

Each emotion category is sounded one of two ways.

Binaural beat
-------------
Two sines a few hertz apart. Summed, they interfere: the envelope of the
mix swells and fades at the DIFFERENCE frequency.

    base = 396 Hz      ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    base + 10 Hz       ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    sum                ~~~~~~~~    ~~~~~~~~    ~~~~~~~~
                               ^^^^        ^^^^
                           beats at 10 Hz (100 ms apart)

Healing chord
-------------
Four sines stacked on the root at just-intonation ratios:

    1      root
    1.25   major third
    1.5    perfect fifth
    2      octave

Both shapes feed one shared gain ramp, so a whole session fades in and out
as a unit.
*/

use super::message::Voicing;
use crate::emotion::{Synthesis, ToneCategory};

pub const CHORD_RATIOS: [f32; 4] = [1.0, 1.25, 1.5, 2.0];

/// Two sources: `base` and `base + beat`.
pub fn binaural(base: f32, beat: f32) -> Voicing {
    Voicing::from_slice(&[base, base + beat])
}

/// Four sources at [`CHORD_RATIOS`] of `root`.
pub fn healing_chord(root: f32) -> Voicing {
    Voicing::from_slice(&CHORD_RATIOS.map(|ratio| root * ratio))
}

pub fn voicing_for(category: ToneCategory) -> Voicing {
    let base = category.base_frequency();
    match (category.synthesis(), category.beat_frequency()) {
        (Synthesis::BinauralBeat, Some(beat)) => binaural(base, beat),
        _ => healing_chord(base),
    }
}

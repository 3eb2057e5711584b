//! Signal multiplication primitive.

/*
Gain Stage
==========

Volume control in the tone engine is plain multiplication: every summed
source sample is multiplied by the current value of the shared gain.

    output[i] = signal[i] × gain[i]

The gain is not a constant while a fade is running, so the ramp renders one
gain value per sample into a scratch buffer and the two buffers are
multiplied in place. Outside of fades the gain holds still and the cheaper
constant form is used.


Why fades matter
----------------

Cutting a sine from full level to zero between two samples produces a step
in the waveform. A step contains energy at every frequency, which the ear
hears as a click or pop. Spreading the change over ~100 ms of samples turns
the step into a gentle slope and the click disappears.

    abrupt:   ∿∿∿∿|________      (click at the bar)
    ramped:   ∿∿∿∿∿∿∿∿∽∽~~___    (silent release)


Decibels
--------

    ×1.0   =   0 dB  (unity)
    ×0.5   =  -6 dB
    ×0.1   = -20 dB
    ×0.08  ≈ -22 dB  (default healing tone level)
*/

/// Multiply a signal by a constant gain factor (in-place).
///
/// # Arguments
/// * `signal` - The signal buffer to modify in-place
/// * `gain` - The gain factor (0.0 = silence, 1.0 = unchanged)
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply a signal by a modulator, writing result into signal buffer (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_gain() {
        let mut signal = [1.0, -0.5, 0.25];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, -0.25, 0.125]);
    }

    #[test]
    fn test_multiply_in_place() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        let modulator = [1.0, 0.5, 0.5, 0.0];

        multiply_in_place(&mut signal, &modulator);

        assert_eq!(signal, [1.0, 0.25, -0.25, 0.0]);
    }

    #[test]
    fn test_zero_gain_silences() {
        let mut signal = [0.3, -0.7, 0.5];
        apply_gain(&mut signal, 0.0);
        assert!(signal.iter().all(|&s| s == 0.0));
    }
}

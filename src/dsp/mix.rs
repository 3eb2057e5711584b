//! Summing of parallel sources onto one bus.

/*
Summing Bus
===========

Every source of a tone voice is connected to the same gain control. Before
the gain is applied, the sources are simply ADDED together sample by sample.

    source 1 ──┐
    source 2 ──┼──→ (+) ──→ gain ──→ output
    source N ──┘

No weighting happens here. Two unit sines can peak at 2.0 and four can peak
at 4.0, which is fine because the shared gain sits far below unity (a quiet
healing tone is around 0.08). Normalising by the source count would make a
four-note chord quieter per note than a two-tone beat, which we do not want.


Beating
-------

When two sines of close frequency are summed, their phase relationship keeps
drifting. They alternately reinforce and cancel each other:

    sin(a) + sin(b) = 2 · cos((a - b) / 2) · sin((a + b) / 2)

The cosine term is a slow envelope at half the difference frequency, which
the ear hears as a pulsation at the full difference (|f1 - f2| Hz). That is
the binaural-beat illusion: no modulation oscillator is involved, only the
plain sum of two close tones.
*/

/// Add signal B into signal A in-place (summing).
///
/// ⚠️ WARNING: Can exceed [-1.0, +1.0] range! Apply gain afterwards.
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

/// Peak absolute value of a block, used by level meters and tests.
#[inline]
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_adds_without_weighting() {
        let mut a = [1.0, 0.5, -0.5];
        let b = [1.0, 0.5, -1.0];

        sum_in_place(&mut a, &b);

        assert_eq!(a, [2.0, 1.0, -1.5]);
    }

    #[test]
    fn peak_ignores_sign() {
        assert_eq!(peak(&[0.2, -0.9, 0.4]), 0.9);
        assert_eq!(peak(&[]), 0.0);
    }
}

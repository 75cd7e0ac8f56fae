//! Pre-emphasis and framing.

/// Converts a duration in samples to a whole count, rounding halves up.
pub fn round_half_up(x: f64) -> usize {
    if x <= 0.0 {
        return 0;
    }
    (x + 0.5).floor() as usize
}

/// Applies `y[0] = x[0]`, `y[n] = x[n] - coeff * x[n-1]` over the whole signal.
pub fn pre_emphasis(pcm: &[f32], coeff: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(pcm.len());
    let mut prev = 0.0f64;
    for (i, &s) in pcm.iter().enumerate() {
        let s = s as f64;
        out.push(if i == 0 { s } else { s - coeff * prev });
        prev = s;
    }
    out
}

/// Snaps a hop within floating-point noise of a whole sample count onto it,
/// so `0.01 * 16000` frames exactly like 160.
pub fn snap_hop(hop: f64) -> f64 {
    let whole = hop.round();
    if (hop - whole).abs() < 1e-9 { whole } else { hop }
}

/// Number of frames covering `len` samples with a hop of `hop` samples; the
/// last frame may run past the end and is zero-padded.
pub fn num_frames(len: usize, frame_len: usize, hop: f64) -> usize {
    if len == 0 {
        return 0;
    }
    if len <= frame_len {
        return 1;
    }
    1 + ((len - frame_len) as f64 / hop).ceil() as usize
}

/// First sample of frame `index`. Fractional hops are rounded per frame
/// rather than once, so frame times never drift from `index * hop`.
pub fn frame_start(index: usize, hop: f64) -> usize {
    round_half_up(index as f64 * hop)
}

/// Copies the windowed frame starting at `start` into `out`, zero-filling
/// past the end of the signal.
pub fn fill_frame(signal: &[f64], start: usize, window: &[f64], out: &mut [f64]) {
    for (i, (o, &w)) in out.iter_mut().zip(window.iter()).enumerate() {
        *o = signal.get(start + i).copied().unwrap_or(0.0) * w;
    }
}

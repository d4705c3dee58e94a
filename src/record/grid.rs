//! Row/column helpers for text frames.
//!
//! Frames use `\n` as their only row separator. An empty string is an empty frame (zero rows),
//! not a single blank row.

fn rows(frame: &str) -> impl Iterator<Item = &str> {
    frame.split('\n')
}

fn row_width(row: &str) -> usize {
    row.chars().count()
}

/// `(rows, columns)` of a single frame.
pub(crate) fn frame_dims(frame: &str) -> (usize, usize) {
    if frame.is_empty() {
        return (0, 0);
    }
    rows(frame).fold((0, 0), |(n, w), r| (n + 1, w.max(row_width(r))))
}

/// Largest `(rows, columns)` across all non-empty frames.
pub(crate) fn max_dims(frames: &[String]) -> Option<(usize, usize)> {
    frames
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| frame_dims(f))
        .reduce(|(ra, ca), (rb, cb)| (ra.max(rb), ca.max(cb)))
}

pub(crate) fn is_rectangular(frames: &[String]) -> bool {
    let Some((n_rows, n_cols)) = max_dims(frames) else {
        return true;
    };
    frames.iter().filter(|f| !f.is_empty()).all(|f| {
        let mut count = 0usize;
        for r in rows(f) {
            if row_width(r) != n_cols {
                return false;
            }
            count += 1;
        }
        count == n_rows
    })
}

/// Pad every non-empty frame to the shared maximum grid.
///
/// Short rows are right-padded with spaces and missing rows appended as blank rows. Empty frames
/// stay empty.
pub(crate) fn normalize_grid(frames: &mut [String]) {
    let Some((n_rows, n_cols)) = max_dims(frames) else {
        return;
    };
    for frame in frames.iter_mut().filter(|f| !f.is_empty()) {
        let mut out = String::with_capacity(n_rows * (n_cols + 1));
        let mut count = 0usize;
        for r in rows(frame) {
            if count > 0 {
                out.push('\n');
            }
            out.push_str(r);
            pad_spaces(&mut out, n_cols - row_width(r));
            count += 1;
        }
        for _ in count..n_rows {
            out.push('\n');
            pad_spaces(&mut out, n_cols);
        }
        *frame = out;
    }
}

fn pad_spaces(out: &mut String, n: usize) {
    out.extend(std::iter::repeat_n(' ', n));
}

/// Drop `top` leading rows and `bottom` trailing rows.
pub(crate) fn trim_frame(frame: &str, top: usize, bottom: usize) -> String {
    let all: Vec<&str> = rows(frame).collect();
    if all.len() <= top.saturating_add(bottom) {
        return String::new();
    }
    all[top..all.len() - bottom].join("\n")
}

#[cfg(test)]
#[path = "../../tests/unit/record/grid.rs"]
mod tests;

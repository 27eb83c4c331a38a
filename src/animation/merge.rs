//! Animation Channel Merger
//!
//! Sources key each axis of a channel independently: X may be keyed at
//! 0 ms and 10 ms while Y is keyed at 0, 5 and 10 ms. The merger samples all
//! three axes at the union of their key times and produces one dense
//! `(time, Vec3)` record per union time.
//!
//! Per axis, a cursor walks the sorted keys alongside the union:
//! - exact hit: the key's value
//! - between two keys: linear interpolation
//! - before the first key: backward extrapolation from the first two keys
//! - after the last key: the last value is held
//! - a single key: constant
//! - no keys: the caller's fallback value

use glam::Vec3;

/// One key of a per-axis curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisKey {
    /// Milliseconds
    pub time: u64,
    pub value: f32,
}

impl AxisKey {
    #[inline]
    #[must_use]
    pub fn new(time: u64, value: f32) -> Self {
        Self { time, value }
    }
}

/// Up to three independently keyed curves of one channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisCurves {
    pub x: Vec<AxisKey>,
    pub y: Vec<AxisKey>,
    pub z: Vec<AxisKey>,
}

impl AxisCurves {
    #[must_use]
    pub fn new(x: Vec<AxisKey>, y: Vec<AxisKey>, z: Vec<AxisKey>) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }

    #[must_use]
    pub fn axes(&self) -> [&[AxisKey]; 3] {
        [&self.x, &self.y, &self.z]
    }
}

/// Sorted, deduplicated union of the key times of all axes.
#[must_use]
pub fn time_union(curves: &AxisCurves) -> Vec<u64> {
    let mut times: Vec<u64> = curves
        .axes()
        .iter()
        .flat_map(|keys| keys.iter().map(|k| k.time))
        .collect();
    times.sort_unstable();
    times.dedup();
    times
}

/// Sorts keys by time; of several keys sharing a time the first one wins.
fn sorted_keys(keys: &[AxisKey]) -> Vec<AxisKey> {
    let mut sorted = keys.to_vec();
    sorted.sort_by_key(|k| k.time);
    sorted.dedup_by_key(|k| k.time);
    sorted
}

/// `v0 + (v1 - v0) * (t - t0) / (t1 - t0)`; `t` may lie outside `[t0, t1]`.
fn lerp_keys(k0: AxisKey, k1: AxisKey, time: u64) -> f32 {
    let span = k1.time as f64 - k0.time as f64;
    if span <= 0.0 {
        return k0.value;
    }
    let factor = (time as f64 - k0.time as f64) / span;
    (f64::from(k0.value) + f64::from(k1.value - k0.value) * factor) as f32
}

/// Forward-only cursor over one sorted axis.
///
/// Queries must come in non-decreasing time order.
struct AxisCursor<'a> {
    keys: &'a [AxisKey],
    /// Index of the first key whose time is >= the last queried time
    next: usize,
}

impl<'a> AxisCursor<'a> {
    fn new(keys: &'a [AxisKey]) -> Self {
        Self { keys, next: 0 }
    }

    fn sample(&mut self, time: u64) -> Option<f32> {
        let keys = self.keys;
        let len = keys.len();
        match len {
            0 => return None,
            1 => return Some(keys[0].value),
            _ => {}
        }

        while self.next < len && keys[self.next].time < time {
            self.next += 1;
        }

        let value = if self.next < len && keys[self.next].time == time {
            keys[self.next].value
        } else if self.next == 0 {
            lerp_keys(keys[0], keys[1], time)
        } else if self.next == len {
            keys[len - 1].value
        } else {
            lerp_keys(keys[self.next - 1], keys[self.next], time)
        };
        Some(value)
    }
}

/// Merges three per-axis curves into dense records at the union of their
/// key times.
///
/// Every component is multiplied by the matching component of `scale`
/// (unit conversion for translation). An axis without keys yields the
/// matching component of `fallback`, scaled the same way.
///
/// Returns `None` when no axis has any key; callers must not emit a curve
/// node in that case.
#[must_use]
pub fn merge_axes(curves: &AxisCurves, scale: Vec3, fallback: Vec3) -> Option<Vec<(u64, Vec3)>> {
    if curves.is_empty() {
        return None;
    }

    let times = time_union(curves);
    let sorted = curves.axes().map(sorted_keys);
    let mut cursors = [
        AxisCursor::new(&sorted[0]),
        AxisCursor::new(&sorted[1]),
        AxisCursor::new(&sorted[2]),
    ];
    let fallback = fallback.to_array();
    let scale = scale.to_array();

    let merged = times
        .into_iter()
        .map(|time| {
            let mut value = [0.0_f32; 3];
            for axis in 0..3 {
                let sampled = cursors[axis].sample(time).unwrap_or(fallback[axis]);
                value[axis] = sampled * scale[axis];
            }
            (time, Vec3::from_array(value))
        })
        .collect();

    Some(merged)
}

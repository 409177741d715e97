use std::borrow::Cow;

use crate::animation::lerp::Lerp;
use crate::keyframe::model::Keyframe;

/// Result of resolving a keyframe list at one query time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpolated {
    /// Interpolated attributes. When no later keyframe exists this is the active keyframe verbatim.
    pub attributes: Keyframe,
    /// Index of the active keyframe in time order.
    pub active_index: usize,
    /// Index of the following keyframe in time order, if any.
    pub next_index: Option<usize>,
    /// Position between active and next, `0` when there is no next.
    pub ratio: f64,
}

/// Resolve `keyframes` at `time` (same time base as the keyframes).
///
/// Keyframes need not be sorted. Times before the first keyframe clamp to it; times after the
/// last keyframe hold it. Returns `None` only for an empty list.
pub fn resolve(keyframes: &[Keyframe], time: f64) -> Option<Interpolated> {
    let sorted: Cow<'_, [Keyframe]> = if keyframes.windows(2).all(|w| w[0].time <= w[1].time) {
        Cow::Borrowed(keyframes)
    } else {
        let mut owned = keyframes.to_vec();
        owned.sort_by(|a, b| a.time.total_cmp(&b.time));
        Cow::Owned(owned)
    };
    let first = sorted.first()?;

    let effective = time.max(first.time);
    let idx = sorted.partition_point(|k| k.time <= effective);
    let active_index = idx.saturating_sub(1);
    let active = &sorted[active_index];

    let Some(next) = sorted.get(idx) else {
        return Some(Interpolated {
            attributes: active.clone(),
            active_index,
            next_index: None,
            ratio: 0.0,
        });
    };

    let span = next.time - active.time;
    let ratio = if span > 0.0 {
        ((effective - active.time) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut attributes = <Keyframe as Lerp>::lerp(active, next, ratio);
    attributes.time = effective;

    Some(Interpolated {
        attributes,
        active_index,
        next_index: Some(idx),
        ratio,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/keyframe/resolve.rs"]
mod tests;

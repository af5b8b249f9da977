//! Layout phases, in pipeline order.
//!
//! Each phase is a plain function over the node and edge vectors so it can be run (and tested)
//! on its own: [`link`] -> [`value`] -> [`breadth`] -> [`depth`] -> [`stack`].

pub mod breadth;
pub mod depth;
pub mod link;
pub mod stack;
pub mod value;

use std::cmp::Ordering;

pub(crate) fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Reports whether every node carries the hint read by `get`. Hints are all-or-none: a partially
/// hinted graph is rejected instead of guessing which mode the caller meant.
pub(crate) fn all_hinted(
    nodes: &[crate::model::Node],
    hint: &'static str,
    get: impl Fn(&crate::model::Node) -> Option<f64>,
) -> crate::error::Result<bool> {
    let present = nodes.iter().filter(|&n| get(n).is_some()).count();
    if present == 0 {
        return Ok(false);
    }
    if present < nodes.len() {
        return Err(crate::error::Error::PartialHints {
            hint,
            present,
            total: nodes.len(),
        });
    }
    Ok(true)
}

/// Human-readable name for diagnostics; falls back to the node's index when it has no id.
pub(crate) fn node_name(nodes: &[crate::model::Node], index: usize) -> String {
    match nodes.get(index) {
        Some(n) if !n.id.is_empty() => n.id.clone(),
        _ => format!("#{index}"),
    }
}

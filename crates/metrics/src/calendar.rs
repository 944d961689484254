//! Maps week-of-year numbers onto month buckets for the time axis.

use serde::Serialize;

/// The month abbreviations shown on the time axis.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// The first week of every month bucket, in ascending order.
pub const MONTH_ANCHOR_WEEKS: [u32; 12] = [1, 5, 9, 14, 18, 22, 27, 31, 35, 40, 44, 48];

/// Returns the index of the month bucket `week` belongs to.
///
/// Weeks past the last anchor (including week 53) fall into December.
pub fn month_index(week: u32) -> usize {
    MONTH_ANCHOR_WEEKS
        .iter()
        .rposition(|anchor| *anchor <= week)
        .unwrap_or(0)
}

/// Returns the month abbreviation of the bucket `week` belongs to.
pub fn month_label(week: u32) -> &'static str {
    MONTH_LABELS[month_index(week)]
}

/// Returns the month label of a raw week value, or an empty label when the
/// value is not a finite number.
pub fn month_label_for_week(week: f64) -> &'static str {
    if !week.is_finite() {
        return "";
    }

    let week = week.max(0.0).min(u32::MAX as f64) as u32;
    month_label(week)
}

/// A week that anchors a month label on the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceTick {
    pub week: u32,
    pub label: &'static str,
}

/// Returns the month anchors that fall within `[min_week, max_week]`.
///
/// An empty or inverted range yields no ticks.
pub fn reference_ticks_in_range(min_week: u32, max_week: u32) -> Vec<ReferenceTick> {
    MONTH_ANCHOR_WEEKS
        .iter()
        .zip(MONTH_LABELS)
        .filter(|(week, _)| (min_week..=max_week).contains(*week))
        .map(|(week, label)| ReferenceTick { week: *week, label })
        .collect()
}

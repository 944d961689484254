use serde::Serialize;

use crate::record::Series;

/// A record that holds one of the extreme values of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremePoint {
    /// The position of the record in the original sequence.
    pub index: usize,
    pub week: u32,
    pub value: f64,
}

/// The extrema of the valid values of a series field.
///
/// The points are absent when no record holding the extreme value has a valid
/// week, even though the value itself is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub max_value: f64,
    pub min_value: f64,
    pub max_point: Option<ExtremePoint>,
    pub min_point: Option<ExtremePoint>,
}

/// Computes the extrema of `field` over the series.
///
/// Returns `None` when the field has no finite value in any record. Ties on an
/// extreme value resolve to the earliest record in sequence order.
pub fn compute_stats(series: &Series, field: &str) -> Option<SeriesStats> {
    let (min_value, max_value) = series.values(field).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
    })?;

    Some(SeriesStats {
        max_value,
        min_value,
        max_point: first_point_with(series, field, max_value),
        min_point: first_point_with(series, field, min_value),
    })
}

fn first_point_with(series: &Series, field: &str, value: f64) -> Option<ExtremePoint> {
    series
        .records()
        .iter()
        .enumerate()
        .find_map(|(index, record)| match (record.value(field), record.week()) {
            (Some(v), Some(week)) if v == value => Some(ExtremePoint { index, week, value }),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    const FIELD: &str = "v";

    fn series(points: &[(Option<u32>, f64)]) -> Series {
        points
            .iter()
            .map(|(week, v)| Record::new(*week).with(FIELD, *v))
            .collect()
    }

    #[test]
    fn earliest_record_wins_ties() {
        let series = series(&[(Some(1), 10.0), (Some(2), 30.0), (Some(3), 30.0)]);

        let stats = compute_stats(&series, FIELD).unwrap();

        assert_eq!(stats.max_value, 30.0);
        assert_eq!(stats.min_value, 10.0);
        assert_eq!(stats.max_point.map(|p| p.week), Some(2));
        assert_eq!(stats.max_point.map(|p| p.index), Some(1));
        assert_eq!(stats.min_point.map(|p| p.week), Some(1));
    }

    #[test]
    fn ties_follow_sequence_order_not_week_order() {
        let series = series(&[(Some(9), 5.0), (Some(3), 5.0), (Some(4), 7.0)]);

        let stats = compute_stats(&series, FIELD).unwrap();

        assert_eq!(stats.min_point.map(|p| p.week), Some(9));
    }

    #[test]
    fn values_are_bounded_by_extrema() {
        let series = series(&[
            (Some(1), 3.5),
            (Some(2), -1.0),
            (Some(3), 12.25),
            (Some(4), 0.0),
            (Some(5), 12.0),
        ]);

        let stats = compute_stats(&series, FIELD).unwrap();

        for value in series.values(FIELD) {
            assert!(stats.min_value <= value && value <= stats.max_value);
        }
    }

    #[test]
    fn skip_non_numeric_values() {
        let series: Series = vec![
            Record::new(Some(1)).with(FIELD, "n/a"),
            Record::new(Some(2)).with(FIELD, 4.0),
            Record::new(Some(3)),
            Record::new(Some(4)).with(FIELD, serde_json::Value::Null),
        ]
        .into_iter()
        .collect();

        let stats = compute_stats(&series, FIELD).unwrap();

        assert_eq!(stats.max_value, 4.0);
        assert_eq!(stats.min_value, 4.0);
        assert_eq!(stats.max_point.map(|p| p.week), Some(2));
    }

    #[test]
    fn no_valid_values() {
        assert_eq!(compute_stats(&Series::default(), FIELD), None);

        let series: Series = vec![Record::new(Some(1)).with(FIELD, "x")].into_iter().collect();
        assert_eq!(compute_stats(&series, FIELD), None);
    }

    #[test]
    fn extreme_value_without_valid_week() {
        let series = series(&[(None, 8.0), (Some(2), 3.0)]);

        let stats = compute_stats(&series, FIELD).unwrap();

        assert_eq!(stats.max_value, 8.0);
        assert_eq!(stats.max_point, None);
        assert_eq!(stats.min_point.map(|p| p.week), Some(2));
    }

    #[test]
    fn tied_extreme_skips_record_without_week() {
        let series = series(&[(None, 8.0), (Some(6), 8.0)]);

        let stats = compute_stats(&series, FIELD).unwrap();

        assert_eq!(stats.max_point.map(|p| p.week), Some(6));
    }
}

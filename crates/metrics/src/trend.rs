use serde::Serialize;

use crate::record::Series;

/// The raw direction of the latest value compared to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn between(previous: f64, current: f64) -> Direction {
        if current > previous {
            Direction::Up
        } else if current < previous {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
            Direction::Flat => "▬",
        }
    }
}

/// How a direction reads for the metric: for inverse metrics a rise is bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Improving,
    Worsening,
    Unchanged,
}

impl Sentiment {
    pub fn of(direction: Direction, is_inverse: bool) -> Sentiment {
        match (direction, is_inverse) {
            (Direction::Flat, _) => Sentiment::Unchanged,
            (Direction::Up, false) | (Direction::Down, true) => Sentiment::Improving,
            (Direction::Up, true) | (Direction::Down, false) => Sentiment::Worsening,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Improving => "#16a34a",
            Sentiment::Worsening => "#dc2626",
            Sentiment::Unchanged => "#64748b",
        }
    }
}

/// The latest value of a series and, when known, how it moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub current: f64,
    pub previous: Option<f64>,
    pub is_inverse: bool,
}

impl Trend {
    /// The raw comparison; never affected by the inverse flag.
    pub fn direction(&self) -> Option<Direction> {
        self.previous
            .map(|previous| Direction::between(previous, self.current))
    }

    pub fn sentiment(&self) -> Option<Sentiment> {
        self.direction()
            .map(|direction| Sentiment::of(direction, self.is_inverse))
    }
}

/// Evaluates the trend of `field` from the two most recent valid values.
///
/// Records are ordered by week first and records without a valid week are not
/// placed in time, so they are skipped. Returns `None` when no valid value is
/// left; with a single valid value the trend has no direction.
pub fn evaluate_trend(series: &Series, field: &str, is_inverse: bool) -> Option<Trend> {
    let mut values = series
        .sorted_by_week()
        .into_iter()
        .rev()
        .filter(|record| record.week().is_some())
        .filter_map(|record| record.value(field));

    let current = values.next()?;
    let previous = values.next();

    Some(Trend {
        current,
        previous,
        is_inverse,
    })
}

use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

const WEEK_KEY: &str = "week";
const MONTH_KEY: &str = "month";

/// A single weekly record of a KPI category.
///
/// The `week` and `month` properties are lifted out of the raw object, every
/// other property is kept as a named field. Field values are kept verbatim so
/// that non-numeric entries stay in the sequence and show up as gaps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    week: Option<u32>,
    month: Option<String>,
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record without fields for the given week.
    pub fn new(week: Option<u32>) -> Self {
        Self {
            week,
            month: None,
            fields: Map::new(),
        }
    }

    /// Adds a field to the record, replacing any previous value.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_owned(), value.into());
        self
    }

    pub fn week(&self) -> Option<u32> {
        self.week
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    /// Returns the value of `field` only when it is a finite number.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields
            .get(field)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    pub(crate) fn take_field(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    fn from_object(mut object: Map<String, Value>) -> Self {
        let week = object.remove(WEEK_KEY).as_ref().and_then(week_number);
        let month = match object.remove(MONTH_KEY) {
            Some(Value::String(month)) => Some(month),
            _ => None,
        };

        Self {
            week,
            month,
            fields: object,
        }
    }
}

fn week_number(value: &Value) -> Option<u32> {
    if let Some(week) = value.as_u64() {
        return u32::try_from(week).ok();
    }

    value
        .as_f64()
        .filter(|w| w.is_finite() && *w >= 0.0 && w.fract() == 0.0 && *w <= u32::MAX as f64)
        .map(|w| w as u32)
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let object = Map::deserialize(deserializer)?;
        Ok(Record::from_object(object))
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut object = self.fields.clone();

        if let Some(week) = self.week {
            object.insert(WEEK_KEY.to_owned(), Value::from(week));
        }

        if let Some(ref month) = self.month {
            object.insert(MONTH_KEY.to_owned(), Value::from(month.as_str()));
        }

        object.serialize(serializer)
    }
}

/// The ordered weekly records of one category.
///
/// Insertion order is kept as received; it is not guaranteed to be sorted by week.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<Record>);

impl Series {
    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Iterates over the finite values of `field` in sequence order.
    pub fn values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.0.iter().filter_map(move |r| r.value(field))
    }

    /// Returns the records ordered by week.
    ///
    /// The sort is stable; records without a valid week are placed last.
    pub fn sorted_by_week(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.0.iter().collect();
        records.sort_by_key(|r| (r.week.is_none(), r.week));
        records
    }

    /// Returns the smallest and the largest valid week of the series.
    pub fn week_range(&self) -> Option<(u32, u32)> {
        self.0
            .iter()
            .filter_map(Record::week)
            .fold(None, |range, week| match range {
                None => Some((week, week)),
                Some((min, max)) => Some((min.min(week), max.max(week))),
            })
    }
}

impl FromIterator<Record> for Series {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The KPI categories the data source groups its records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Percent,
    Scores,
    Nps,
    Devoluciones,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Percent,
        Category::Scores,
        Category::Nps,
        Category::Devoluciones,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Percent => "percent",
            Category::Scores => "scores",
            Category::Nps => "nps",
            Category::Devoluciones => "devoluciones",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

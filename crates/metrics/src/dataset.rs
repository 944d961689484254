use std::fs;
use std::path::Path;

use serde_json::Map;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use crate::error::DatasetError;
use crate::error::Result;
use crate::record::Category;
use crate::record::Record;
use crate::record::Series;

const CATEGORY_TAG_KEY: &str = "key";

/// A snapshot of every KPI category returned by the data source.
///
/// Categories missing from the payload are empty series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    percent: Series,
    scores: Series,
    nps: Series,
    devoluciones: Series,
}

impl Dataset {
    /// Reads a dataset previously saved from the data source.
    pub fn from_file(path: &Path) -> Result<Dataset> {
        let bytes = fs::read(path)?;
        Dataset::from_slice(&bytes)
    }

    /// Decodes a dataset from the raw response body of the data source.
    pub fn from_slice(bytes: &[u8]) -> Result<Dataset> {
        let value: Value = serde_json::from_slice(bytes)?;
        Dataset::from_value(value)
    }

    /// Decodes a dataset from either supported response shape:
    ///
    /// * an object holding one array of records per category key;
    /// * a flat array of records tagged with a `key` property naming the category.
    ///
    /// An array wrapping a single grouped object is accepted as well.
    pub fn from_value(value: Value) -> Result<Dataset> {
        match value {
            Value::Object(object) => Ok(Dataset::from_grouped(object)),
            Value::Array(items) => {
                let wrapped = matches!(items.first(), Some(Value::Object(first)) if is_grouped(first));

                if !wrapped {
                    return Ok(Dataset::from_tagged(items));
                }

                match items.into_iter().next() {
                    Some(Value::Object(object)) => Ok(Dataset::from_grouped(object)),
                    _ => Ok(Dataset::default()),
                }
            }
            Value::Null => Err(DatasetError::UnexpectedShape("null")),
            Value::Bool(_) => Err(DatasetError::UnexpectedShape("a boolean")),
            Value::Number(_) => Err(DatasetError::UnexpectedShape("a number")),
            Value::String(_) => Err(DatasetError::UnexpectedShape("a string")),
        }
    }

    pub fn series(&self, category: Category) -> &Series {
        match category {
            Category::Percent => &self.percent,
            Category::Scores => &self.scores,
            Category::Nps => &self.nps,
            Category::Devoluciones => &self.devoluciones,
        }
    }

    pub fn with_series(mut self, category: Category, series: Series) -> Self {
        *self.series_mut(category) = series;
        self
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.series(*c).is_empty())
    }

    fn series_mut(&mut self, category: Category) -> &mut Series {
        match category {
            Category::Percent => &mut self.percent,
            Category::Scores => &mut self.scores,
            Category::Nps => &mut self.nps,
            Category::Devoluciones => &mut self.devoluciones,
        }
    }

    fn from_grouped(mut object: Map<String, Value>) -> Dataset {
        let mut dataset = Dataset::default();

        for category in Category::ALL {
            match object.remove(category.key()) {
                Some(Value::Array(items)) => {
                    *dataset.series_mut(category) = items.into_iter().filter_map(record).collect();
                }
                Some(other) => warn!(
                    %category,
                    "ignoring category because it is not an array: {}",
                    kind(&other)
                ),
                None => debug!(%category, "category missing from dataset"),
            }
        }

        dataset
    }

    fn from_tagged(items: Vec<Value>) -> Dataset {
        let mut dataset = Dataset::default();

        for item in items {
            let Some(mut record) = record(item) else {
                continue;
            };

            let category = match record.take_field(CATEGORY_TAG_KEY) {
                Some(Value::String(key)) => Category::from_key(&key),
                _ => None,
            };

            match category {
                Some(category) => dataset.series_mut(category).push(record),
                None => warn!(week = ?record.week(), "skipping record without a known category key"),
            }
        }

        dataset
    }
}

fn is_grouped(object: &Map<String, Value>) -> bool {
    !object.contains_key(CATEGORY_TAG_KEY)
        && Category::ALL.iter().any(|c| object.contains_key(c.key()))
}

fn record(value: Value) -> Option<Record> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        other => {
            warn!("skipping record because it is not an object: {}", kind(&other));
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

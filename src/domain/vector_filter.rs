use serde_json::Value;

use super::Metadata;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeBounds {
    pub gte: Option<f64>,
    pub lte: Option<f64>,
    pub gt: Option<f64>,
    pub lt: Option<f64>,
}

impl RangeBounds {
    pub fn contains(&self, value: f64) -> bool {
        self.gte.is_none_or(|b| value >= b)
            && self.lte.is_none_or(|b| value <= b)
            && self.gt.is_none_or(|b| value > b)
            && self.lt.is_none_or(|b| value < b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Match(Value),
    Range(RangeBounds),
}

/// Predicate over a stored payload field. A query's filters are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorFilter {
    pub key: String,
    pub condition: FilterCondition,
}

impl VectorFilter {
    pub fn matches(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            condition: FilterCondition::Match(value.into()),
        }
    }

    pub fn range(key: impl Into<String>, bounds: RangeBounds) -> Self {
        Self {
            key: key.into(),
            condition: FilterCondition::Range(bounds),
        }
    }

    /// Keys may be dotted paths into nested payload objects.
    pub fn evaluate(&self, payload: &Metadata) -> bool {
        let Some(field) = lookup(payload, &self.key) else {
            return false;
        };

        match &self.condition {
            FilterCondition::Match(expected) => field == expected,
            FilterCondition::Range(bounds) => field.as_f64().is_some_and(|v| bounds.contains(v)),
        }
    }
}

fn lookup<'a>(payload: &'a Metadata, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let mut current = payload.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

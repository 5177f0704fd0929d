use std::collections::BTreeMap;

use serde::Serialize;

use crate::{DateRange, TradingDate};

/// Closing price of one trading session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosePoint {
    pub date: TradingDate,
    pub close: f64,
}

impl ClosePoint {
    pub const fn new(date: TradingDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closes in chronological order, one point per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<ClosePoint>,
}

impl PriceSeries {
    /// Sorts ascending by date. A repeated date keeps the last close seen.
    pub fn from_points(points: impl IntoIterator<Item = ClosePoint>) -> Self {
        let by_date = points
            .into_iter()
            .map(|point| (point.date, point.close))
            .collect::<BTreeMap<_, _>>();

        Self {
            points: by_date
                .into_iter()
                .map(|(date, close)| ClosePoint::new(date, close))
                .collect(),
        }
    }

    pub fn within(&self, range: &DateRange) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|point| range.contains(point.date))
                .copied()
                .collect(),
        }
    }

    pub fn points(&self) -> &[ClosePoint] {
        &self.points
    }

    /// Bare closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

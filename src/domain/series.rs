// Series domain model - fixed-length samples, one per calendar unit
use std::marker::PhantomData;

pub const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Monday first, matching the prompt text.
pub const DAY_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Upper bound on a monthly count; keeps the y axis to a drawable number of ticks.
pub const MAX_BOOKS_PER_MONTH: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementConstraint {
    NonNegativeInteger { max: f64 },
    OpenRange { low: f64, high: f64 },
}

impl ElementConstraint {
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            ElementConstraint::NonNegativeInteger { max } => {
                value.is_finite() && value >= 0.0 && value <= max && value.fract() == 0.0
            }
            ElementConstraint::OpenRange { low, high } => value > low && value < high,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            ElementConstraint::NonNegativeInteger { max } => {
                format!("a whole number from 0 to {}", max)
            }
            ElementConstraint::OpenRange { low, high } => {
                format!("strictly between {:.1} and {:.1}", low, high)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Monthly,
    Weekly,
}

impl SeriesKind {
    pub fn expected_len(self) -> usize {
        self.labels().len()
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            SeriesKind::Monthly => &MONTH_LABELS,
            SeriesKind::Weekly => &DAY_LABELS,
        }
    }

    pub fn constraint(self) -> ElementConstraint {
        match self {
            SeriesKind::Monthly => ElementConstraint::NonNegativeInteger {
                max: MAX_BOOKS_PER_MONTH,
            },
            SeriesKind::Weekly => ElementConstraint::OpenRange {
                low: 0.0,
                high: MAX_HOURS_PER_DAY,
            },
        }
    }

    /// Shape description used in length-mismatch diagnostics.
    pub fn shape_description(self) -> &'static str {
        match self {
            SeriesKind::Monthly => "one per month, January to December",
            SeriesKind::Weekly => "one per day, Monday to Sunday",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            SeriesKind::Monthly => "Enter the number of books read sequentially per month: ",
            SeriesKind::Weekly => {
                "Enter hours read sequentially per day, Monday to Sunday (between 0.0 and 24.0): "
            }
        }
    }
}

/// Type-level tag for the calendar unit of a series.
pub trait Calendar {
    const KIND: SeriesKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monthly;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekly;

impl Calendar for Monthly {
    const KIND: SeriesKind = SeriesKind::Monthly;
}

impl Calendar for Weekly {
    const KIND: SeriesKind = SeriesKind::Weekly;
}

/// A series that passed validation. Only the validator constructs these.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<C: Calendar> {
    values: Vec<f64>,
    _calendar: PhantomData<C>,
}

pub type MonthlySeries = Series<Monthly>;
pub type WeeklySeries = Series<Weekly>;

impl<C: Calendar> Series<C> {
    pub(crate) fn from_validated(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), C::KIND.expected_len());
        Self {
            values,
            _calendar: PhantomData,
        }
    }

    pub fn kind(&self) -> SeriesKind {
        C::KIND
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::MIN, f64::max)
    }

    /// Values paired with their category label.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        C::KIND.labels().iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints() {
        let whole = SeriesKind::Monthly.constraint();
        assert!(whole.accepts(0.0));
        assert!(whole.accepts(12.0));
        assert!(whole.accepts(MAX_BOOKS_PER_MONTH));
        assert!(!whole.accepts(MAX_BOOKS_PER_MONTH + 1.0));
        assert!(!whole.accepts(1e15));
        assert!(!whole.accepts(-1.0));
        assert!(!whole.accepts(2.5));
        assert!(!whole.accepts(f64::NAN));
        assert_eq!(whole.describe(), "a whole number from 0 to 10000");

        let hours = SeriesKind::Weekly.constraint();
        assert!(hours.accepts(7.5));
        assert!(!hours.accepts(0.0));
        assert!(!hours.accepts(24.0));
        assert_eq!(hours.describe(), "strictly between 0.0 and 24.0");
    }

    #[test]
    fn test_kind_shapes() {
        assert_eq!(SeriesKind::Monthly.expected_len(), 12);
        assert_eq!(SeriesKind::Weekly.expected_len(), 7);
        assert_eq!(SeriesKind::Weekly.labels()[0], "M");
        assert_eq!(SeriesKind::Monthly.labels()[11], "DEC");
    }

    #[test]
    fn test_series_max_and_labels() {
        let series = WeeklySeries::from_validated(vec![1.0, 2.5, 8.0, 3.0, 0.5, 4.0, 6.0]);
        assert_eq!(series.kind(), SeriesKind::Weekly);
        assert_eq!(series.max(), 8.0);

        let labelled: Vec<_> = series.labelled().collect();
        assert_eq!(labelled[2], ("W", 8.0));
        assert_eq!(labelled[6], ("S", 6.0));
    }
}

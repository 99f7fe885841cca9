use chrono::{DateTime, Utc};
use indexmap::IndexSet;

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::types::DomainValue;
use crate::error::{ChartError, ChartResult};

/// Mapping from a domain value to a pixel coordinate on one axis.
///
/// Marks treat scales as opaque collaborators. Any
/// `Fn(&DomainValue) -> f64` closure is a scale, which lets a host plug its own
/// layout math in without wrapping it.
pub trait Scale {
    fn map(&self, value: &DomainValue) -> ChartResult<f64>;
}

impl<F> Scale for F
where
    F: Fn(&DomainValue) -> f64,
{
    fn map(&self, value: &DomainValue) -> ChartResult<f64> {
        Ok(self(value))
    }
}

/// Continuous linear mapping from a numeric domain into a pixel range.
///
/// Dates are accepted as unix seconds so a linear scale can also back a time
/// axis whose domain was authored numerically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Creates a scale with the identity-width range `0..=1`.
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    /// Sets the output pixel range. Inverted ranges (`start > end`) are allowed.
    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn domain_to_pixel(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a scale with an empty range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round tick values inside the domain, roughly `count` of them.
    ///
    /// Steps are 1, 2 or 5 times a power of ten. Ticks are listed in domain
    /// order, so a descending domain yields descending ticks.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let mut ticks = nice_ticks(lo, hi, count);
        if self.domain_start > self.domain_end {
            ticks.reverse();
        }
        ticks
    }
}

impl Scale for LinearScale {
    fn map(&self, value: &DomainValue) -> ChartResult<f64> {
        let raw = value.as_continuous().ok_or_else(|| unmapped("linear", value))?;
        self.domain_to_pixel(raw)
    }
}

/// Linear mapping from a date domain into a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        let inner = LinearScale::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )
        .map_err(|_| {
            ChartError::InvalidData("time scale domain must span a non-zero interval".to_owned())
        })?;
        Ok(Self { start, end, inner })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        self.inner = self.inner.with_range(range_start, range_end)?;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    pub fn time_to_pixel(self, time: DateTime<Utc>) -> ChartResult<f64> {
        self.inner.domain_to_pixel(datetime_to_unix_seconds(time))
    }
}

impl Scale for TimeScale {
    fn map(&self, value: &DomainValue) -> ChartResult<f64> {
        match value {
            DomainValue::Date(time) => self.time_to_pixel(*time),
            other => Err(unmapped("time", other)),
        }
    }
}

/// Ordinal scale placing categories at evenly spaced points.
///
/// `padding` is the outer gap at each end, expressed in point steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    categories: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding: f64,
}

impl PointScale {
    pub fn new<I, S>(categories: I, range_start: f64, range_end: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(ChartError::InvalidData(
                "point scale needs at least one category".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        Ok(Self {
            categories,
            range_start,
            range_end,
            padding: 0.5,
        })
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Distance between two adjacent points.
    #[must_use]
    pub fn step(&self) -> f64 {
        let denom = (self.categories.len() as f64 - 1.0) + 2.0 * self.padding;
        if denom <= 0.0 {
            return 0.0;
        }
        (self.range_end - self.range_start) / denom
    }

    pub fn category_to_pixel(&self, category: &str) -> ChartResult<f64> {
        let index = self
            .categories
            .get_index_of(category)
            .ok_or_else(|| ChartError::UnmappedValue {
                scale: "point",
                value: category.to_owned(),
            })?;
        let step = self.step();
        if self.categories.len() == 1 && step == 0.0 {
            return Ok(0.5 * (self.range_start + self.range_end));
        }
        Ok(self.range_start + step * (self.padding + index as f64))
    }
}

impl Scale for PointScale {
    fn map(&self, value: &DomainValue) -> ChartResult<f64> {
        let category = value.as_category().ok_or_else(|| unmapped("point", value))?;
        self.category_to_pixel(category)
    }
}

const MAX_TICKS: f64 = 10_000.0;

fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let step = nice_step((hi - lo) / count as f64);
    if step == 0.0 {
        return vec![lo];
    }

    // Sub-unit steps are applied as a division by their inverse so that
    // 0.1-spaced ticks come out as 0.3 rather than 0.30000000000000004.
    if step < 1.0 {
        let inverse = (1.0 / step).round();
        let first = (lo * inverse).ceil();
        let last = (hi * inverse).floor();
        if last - first > MAX_TICKS {
            return Vec::new();
        }
        let n = (last - first).max(-1.0) as i64;
        (0..=n).map(|i| (first + i as f64) / inverse).collect()
    } else {
        let first = (lo / step).ceil();
        let last = (hi / step).floor();
        if last - first > MAX_TICKS {
            return Vec::new();
        }
        let n = (last - first).max(-1.0) as i64;
        (0..=n).map(|i| (first + i as f64) * step).collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let base = 10_f64.powf(raw.log10().floor());
    let error = raw / base;
    let factor = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    factor * base
}

fn unmapped(scale: &'static str, value: &DomainValue) -> ChartError {
    ChartError::UnmappedValue {
        scale,
        value: format!("{value} ({})", value.kind_name()),
    }
}

// Crowding estimation and peak-hour reporting over a loaded CrowdingTable
use crate::dsc_models::{
    normalize_station, CrowdingRecord, CrowdingTable, DSCError, DayType, HourBand, Result,
};
use chrono::Weekday;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

// ============================================================================
// Crowding Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdingLevel {
    VeryLight,
    Light,
    Moderate,
    SlightlyCongested,
    Congested,
}

impl CrowdingLevel {
    /// Band boundaries belong to the lower band: exactly 20.0 is `VeryLight`.
    pub fn classify(value: f64) -> Self {
        if value <= 20.0 {
            CrowdingLevel::VeryLight
        } else if value <= 40.0 {
            CrowdingLevel::Light
        } else if value <= 60.0 {
            CrowdingLevel::Moderate
        } else if value <= 80.0 {
            CrowdingLevel::SlightlyCongested
        } else {
            CrowdingLevel::Congested
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CrowdingLevel::VeryLight => "very light",
            CrowdingLevel::Light => "light",
            CrowdingLevel::Moderate => "moderate",
            CrowdingLevel::SlightlyCongested => "slightly congested",
            CrowdingLevel::Congested => "congested",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrowdingLevel::VeryLight => "🔵 매우 여유",
            CrowdingLevel::Light => "🟢 여유",
            CrowdingLevel::Moderate => "🟡 보통",
            CrowdingLevel::SlightlyCongested => "🟠 약간 혼잡",
            CrowdingLevel::Congested => "🔴 혼잡",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            CrowdingLevel::VeryLight => (52, 120, 246),
            CrowdingLevel::Light => (46, 160, 67),
            CrowdingLevel::Moderate => (230, 180, 20),
            CrowdingLevel::SlightlyCongested => (245, 130, 32),
            CrowdingLevel::Congested => (220, 50, 47),
        }
    }
}

// ============================================================================
// Queries and Outcomes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CrowdingQuery {
    pub station: String,
    pub weekday: Weekday,
    pub hour_band: HourBand,
}

impl CrowdingQuery {
    pub fn new(station: &str, weekday: Weekday, hour: u8) -> Result<Self> {
        Ok(CrowdingQuery {
            station: normalize_station(station),
            weekday,
            hour_band: HourBand::new(hour)?,
        })
    }

    pub fn day_type(&self) -> DayType {
        DayType::from_weekday(self.weekday)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdingEstimate {
    pub station: String,
    pub weekday: Weekday,
    pub day_type: DayType,
    pub hour_band: String,
    pub mean: f64,
    pub std_dev: f64,
    /// Sampled value, clamped to [0, 100]
    pub value: f64,
    pub level: CrowdingLevel,
}

/// Outcome of one estimate request. `NoData` is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Estimate {
    NoData {
        station: String,
        weekday: Weekday,
        hour_band: String,
    },
    Sampled(CrowdingEstimate),
}

impl Estimate {
    pub fn value(&self) -> Option<f64> {
        match self {
            Estimate::NoData { .. } => None,
            Estimate::Sampled(estimate) => Some(estimate.value),
        }
    }

    pub fn level(&self) -> Option<CrowdingLevel> {
        match self {
            Estimate::NoData { .. } => None,
            Estimate::Sampled(estimate) => Some(estimate.level),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakReport {
    pub station: String,
    pub weekday: Weekday,
    pub day_type: DayType,
    pub peak: CrowdingRecord,
    pub off_peak: CrowdingRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PeakOutcome {
    NoData {
        station: String,
        weekday: Weekday,
        day_type: DayType,
    },
    Found(PeakReport),
}

// ============================================================================
// Estimation
// ============================================================================

pub struct DSCEstimator;

impl DSCEstimator {
    /// One draw from Normal(mean, std_dev), clamped to [0, 100].
    /// A negative or NaN deviation is rejected.
    pub fn sample<R: Rng + ?Sized>(mean: f64, std_dev: f64, rng: &mut R) -> Result<f64> {
        if std_dev.is_nan() || std_dev < 0.0 {
            return Err(DSCError::InvalidRecord(format!(
                "standard deviation must be non-negative, got {}",
                std_dev
            )));
        }
        let normal = Normal::new(mean, std_dev).map_err(|e| {
            DSCError::InvalidRecord(format!("cannot sample Normal({}, {}): {}", mean, std_dev, e))
        })?;
        Ok(normal.sample(rng).clamp(0.0, 100.0))
    }

    /// Looks up the exact (station, day type, hour band) key and draws one sample.
    /// Consumes one draw from `rng` only when a row matches.
    pub fn estimate<R: Rng + ?Sized>(
        table: &CrowdingTable,
        query: &CrowdingQuery,
        rng: &mut R,
    ) -> Result<Estimate> {
        let day_type = query.day_type();
        let hour_band = query.hour_band.label();

        let record = match table.lookup(&query.station, day_type, &hour_band) {
            Some(record) => record,
            None => {
                log::debug!("no row for {} / {} / {}", query.station, day_type, hour_band);
                return Ok(Estimate::NoData {
                    station: query.station.clone(),
                    weekday: query.weekday,
                    hour_band,
                });
            }
        };

        let value = Self::sample(record.mean, record.std_dev, rng)?;
        let level = CrowdingLevel::classify(value);
        log::debug!("line {}: sampled {:.1} ({})", record.line, value, level.name());

        Ok(Estimate::Sampled(CrowdingEstimate {
            station: query.station.clone(),
            weekday: query.weekday,
            day_type,
            hour_band,
            mean: record.mean,
            std_dev: record.std_dev,
            value,
            level,
        }))
    }

    /// Busiest and quietest hour band for the station on the weekday's day type.
    /// Ties keep the earliest row in file order.
    pub fn peak_hours(table: &CrowdingTable, station: &str, weekday: Weekday) -> PeakOutcome {
        let station = normalize_station(station);
        let day_type = DayType::from_weekday(weekday);

        let mut peak: Option<&CrowdingRecord> = None;
        let mut off_peak: Option<&CrowdingRecord> = None;

        for record in table.records_for(&station, day_type) {
            if peak.is_none_or(|p| record.mean > p.mean) {
                peak = Some(record);
            }
            if off_peak.is_none_or(|o| record.mean < o.mean) {
                off_peak = Some(record);
            }
        }

        match (peak, off_peak) {
            (Some(peak), Some(off_peak)) => PeakOutcome::Found(PeakReport {
                station,
                weekday,
                day_type,
                peak: peak.clone(),
                off_peak: off_peak.clone(),
            }),
            _ => PeakOutcome::NoData {
                station,
                weekday,
                day_type,
            },
        }
    }
}

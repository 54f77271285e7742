// Runtime configuration and the application context shared by every surface
use crate::dsc_estimator::{CrowdingQuery, DSCEstimator, Estimate, PeakOutcome};
use crate::dsc_models::{CrowdingTable, DSCModels, Result, TextEncoding};
use chrono::{Datelike, Timelike, Utc, Weekday};
use chrono_tz::Asia::Seoul;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DSCConfig {
    pub data_file: PathBuf,
    pub encoding: TextEncoding,
    /// Fixed sampling seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Lower bound of the hour selector
    pub min_hour: u8,
    /// Font file with Hangul glyphs for the GUI
    pub font: Option<PathBuf>,
}

impl Default for DSCConfig {
    fn default() -> Self {
        DSCConfig {
            data_file: PathBuf::from(DSCModels::DEFAULT_DATA_FILE),
            encoding: TextEncoding::Auto,
            seed: None,
            min_hour: 0,
            font: None,
        }
    }
}

impl DSCConfig {
    pub const DEFAULT_HOUR: u8 = 7;

    pub fn default_hour(&self) -> u8 {
        Self::DEFAULT_HOUR.max(self.min_hour)
    }
}

/// Current weekday and hour in Seoul.
pub fn seoul_now() -> (Weekday, u8) {
    let now = Utc::now().with_timezone(&Seoul);
    (now.weekday(), now.hour() as u8)
}

/// Everything a query needs, built once at startup and passed around explicitly.
pub struct AppContext {
    pub config: DSCConfig,
    table: CrowdingTable,
    rng: ChaCha8Rng,
}

impl AppContext {
    pub fn load(config: DSCConfig) -> Result<Self> {
        let table = DSCModels::load_table(&config.data_file, config.encoding)?;
        Ok(Self::with_table(config, table))
    }

    pub fn with_table(config: DSCConfig, table: CrowdingTable) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("Sampling with fixed seed {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        };

        AppContext { config, table, rng }
    }

    pub fn table(&self) -> &CrowdingTable {
        &self.table
    }

    pub fn estimate(&mut self, station: &str, weekday: Weekday, hour: u8) -> Result<Estimate> {
        let query = CrowdingQuery::new(station, weekday, hour)?;
        DSCEstimator::estimate(&self.table, &query, &mut self.rng)
    }

    pub fn peak_hours(&self, station: &str, weekday: Weekday) -> PeakOutcome {
        DSCEstimator::peak_hours(&self.table, station, weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_context(seed: u64) -> AppContext {
        let table = DSCModels::parse_table(
            "역명,요일,시간대,혼잡도평균,혼잡도표준편차\n대동,월요일,07-08시,50.0,5.0\n",
        )
        .unwrap();
        let config = DSCConfig {
            seed: Some(seed),
            ..DSCConfig::default()
        };
        AppContext::with_table(config, table)
    }

    #[test]
    fn fixed_seed_reproduces_estimates() {
        let mut first = seeded_context(11);
        let mut second = seeded_context(11);
        for _ in 0..5 {
            let a = first.estimate("대동", Weekday::Mon, 7).unwrap();
            let b = second.estimate("대동", Weekday::Mon, 7).unwrap();
            assert!(a.value().is_some());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn invalid_hour_is_an_error_not_no_data() {
        let mut context = seeded_context(1);
        assert!(context.estimate("대동", Weekday::Mon, 24).is_err());
        assert!(context.estimate("대동", Weekday::Mon, 8).unwrap().value().is_none());
    }

    #[test]
    fn default_hour_respects_selector_floor() {
        let mut config = DSCConfig::default();
        assert_eq!(config.default_hour(), 7);
        config.min_hour = 5;
        assert_eq!(config.default_hour(), 7);
        config.min_hour = 9;
        assert_eq!(config.default_hour(), 9);
    }

    #[test]
    fn seoul_hour_is_in_range() {
        let (_, hour) = seoul_now();
        assert!(hour < 24);
    }
}

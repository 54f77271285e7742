// Data models and table loading for the Daejeon Subway Crowding estimator
//
// Input table (one row per station, day of week and hour band):
//   역명, 요일, 시간대, 혼잡도평균 | mean, 혼잡도표준편차 | std
//
// The file is produced by a Korean-locale spreadsheet export, so it is usually
// CP949 encoded. UTF-8 exports (with or without BOM) are accepted as well.

use chrono::Weekday;
use encoding_rs::{EUC_KR, UTF_8};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Day and Hour Keys
// ============================================================================

/// Monday first, the order used by every selector.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

/// Accepts Korean day names (`월요일`, `월`) and English ones (`Monday`, `mon`).
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    let trimmed = input.trim();
    let korean = match trimmed {
        "월요일" | "월" => Some(Weekday::Mon),
        "화요일" | "화" => Some(Weekday::Tue),
        "수요일" | "수" => Some(Weekday::Wed),
        "목요일" | "목" => Some(Weekday::Thu),
        "금요일" | "금" => Some(Weekday::Fri),
        "토요일" | "토" => Some(Weekday::Sat),
        "일요일" | "일" => Some(Weekday::Sun),
        _ => None,
    };
    korean.or_else(|| trimmed.parse::<Weekday>().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    /// Anything that is not recognisably Saturday or Sunday counts as a weekday.
    pub fn from_day_label(label: &str) -> Self {
        parse_weekday(label)
            .map(Self::from_weekday)
            .unwrap_or(DayType::Weekday)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "평일",
            DayType::Weekend => "주말",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

lazy_static! {
    static ref HOUR_BAND_RE: Regex =
        Regex::new(r"^\s*(\d{1,2})\s*-\s*(\d{1,2})\s*(?:시)?\s*$").expect("valid hour band pattern");
}

/// One-hour interval starting at `hour`, labelled `HH-HH시`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourBand(u8);

impl HourBand {
    pub fn new(hour: u8) -> Result<Self> {
        if hour > 23 {
            return Err(DSCError::InvalidQuery(format!(
                "hour must be between 0 and 23, got {}",
                hour
            )));
        }
        Ok(HourBand(hour))
    }

    pub fn hour(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> String {
        format!("{:02}-{:02}시", self.0, (self.0 + 1) % 24)
    }

    /// Parses `07-08시`, `7-8시`, `7 - 8` and `23-24시` style labels.
    pub fn parse_label(label: &str) -> Option<Self> {
        let caps = HOUR_BAND_RE.captures(label)?;
        let start: u8 = caps[1].parse().ok()?;
        let end: u8 = caps[2].parse().ok()?;
        if start > 23 {
            return None;
        }
        if end == (start + 1) % 24 || (start == 23 && end == 24) {
            Some(HourBand(start))
        } else {
            None
        }
    }
}

impl fmt::Display for HourBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Canonical `HH-HH시` form when the cell parses, otherwise the trimmed cell.
pub fn canonical_hour_band(raw: &str) -> String {
    HourBand::parse_label(raw)
        .map(|band| band.label())
        .unwrap_or_else(|| raw.trim().to_string())
}

/// Station names are compared with every whitespace character removed.
pub fn normalize_station(raw: &str) -> String {
    raw.split_whitespace().collect()
}

// ============================================================================
// Records and Table
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdingRecord {
    pub station: String,
    /// Day-of-week cell as it appeared in the file
    pub day_label: String,
    pub day_type: DayType,
    pub hour_band: String,
    pub mean: f64,
    pub std_dev: f64,
    /// Source line in the input file (header is line 1)
    pub line: u64,
}

impl CrowdingRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            station: self.station.clone(),
            day_type: self.day_type,
            hour_band: self.hour_band.clone(),
        }
    }

    pub fn hour(&self) -> Option<u8> {
        HourBand::parse_label(&self.hour_band).map(|band| band.hour())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub station: String,
    pub day_type: DayType,
    pub hour_band: String,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.station, self.day_type, self.hour_band)
    }
}

/// A key that appears on more than one row. `lines[0]` is the row used for lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateKey {
    pub key: RecordKey,
    pub lines: Vec<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct CrowdingTable {
    records: Vec<CrowdingRecord>,
    index: HashMap<RecordKey, usize>,
    duplicates: Vec<DuplicateKey>,
    skipped_rows: usize,
}

impl CrowdingTable {
    pub fn from_records(records: Vec<CrowdingRecord>) -> Self {
        let mut index: HashMap<RecordKey, usize> = HashMap::new();
        let mut duplicate_lines: HashMap<RecordKey, Vec<u64>> = HashMap::new();
        let mut duplicate_order: Vec<RecordKey> = Vec::new();

        for (pos, record) in records.iter().enumerate() {
            let key = record.key();
            let existing = index.get(&key).copied();
            match existing {
                Some(first) => {
                    let lines = duplicate_lines.entry(key.clone()).or_insert_with(|| {
                        duplicate_order.push(key.clone());
                        vec![records[first].line]
                    });
                    lines.push(record.line);
                }
                None => {
                    index.insert(key, pos);
                }
            }
        }

        let duplicates = duplicate_order
            .into_iter()
            .map(|key| {
                let lines = duplicate_lines.remove(&key).unwrap_or_default();
                DuplicateKey { key, lines }
            })
            .collect();

        CrowdingTable {
            records,
            index,
            duplicates,
            skipped_rows: 0,
        }
    }

    pub fn with_skipped_rows(mut self, skipped_rows: usize) -> Self {
        self.skipped_rows = skipped_rows;
        self
    }

    /// Exact key lookup; the first row in file order wins on duplicate keys.
    pub fn lookup(&self, station: &str, day_type: DayType, hour_band: &str) -> Option<&CrowdingRecord> {
        let key = RecordKey {
            station: station.to_string(),
            day_type,
            hour_band: hour_band.to_string(),
        };
        self.index.get(&key).map(|&pos| &self.records[pos])
    }

    /// Every row for the station and day type, duplicates included, in file order.
    pub fn records_for<'a, 's>(
        &'a self,
        station: &'s str,
        day_type: DayType,
    ) -> impl Iterator<Item = &'a CrowdingRecord> + use<'a, 's> {
        self.records
            .iter()
            .filter(move |r| r.station == station && r.day_type == day_type)
    }

    /// The rows lookups would use for each hour band, ordered by start hour.
    /// Bands that do not parse keep their file order at the end.
    pub fn hourly_profile(&self, station: &str, day_type: DayType) -> Vec<&CrowdingRecord> {
        let mut profile: Vec<&CrowdingRecord> = self
            .records
            .iter()
            .enumerate()
            .filter(|(pos, r)| {
                r.station == station
                    && r.day_type == day_type
                    && self.index.get(&r.key()) == Some(pos)
            })
            .map(|(_, r)| r)
            .collect();
        profile.sort_by_key(|r| (r.hour().is_none(), r.hour()));
        profile
    }

    pub fn stations(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.station.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains_station(&self, station: &str) -> bool {
        self.records.iter().any(|r| r.station == station)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum DSCError {
    DataFileMissing(PathBuf),
    FileError(String),
    ParseError(String),
    MissingColumn(String),
    InvalidQuery(String),
    InvalidRecord(String),
}

impl fmt::Display for DSCError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DSCError::DataFileMissing(path) => write!(
                f,
                "Data file not found: '{}'. Place the CSV next to the application or pass --data",
                path.display()
            ),
            DSCError::FileError(e) => write!(f, "File error: {}", e),
            DSCError::ParseError(e) => write!(f, "Parse error: {}", e),
            DSCError::MissingColumn(name) => write!(f, "Missing required column '{}'", name),
            DSCError::InvalidQuery(e) => write!(f, "Invalid query: {}", e),
            DSCError::InvalidRecord(e) => write!(f, "Invalid record: {}", e),
        }
    }
}

impl std::error::Error for DSCError {}

pub type Result<T> = std::result::Result<T, DSCError>;

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TextEncoding {
    /// UTF-8 when the bytes are valid UTF-8, CP949 otherwise
    #[default]
    Auto,
    #[value(name = "utf-8")]
    Utf8,
    Cp949,
}

struct ColumnMap {
    station: usize,
    day: usize,
    hour_band: usize,
    mean: usize,
    std_dev: usize,
}

impl ColumnMap {
    const STATION: &'static [&'static str] = &["역명"];
    const DAY: &'static [&'static str] = &["요일"];
    const HOUR_BAND: &'static [&'static str] = &["시간대"];
    const MEAN: &'static [&'static str] = &["혼잡도평균", "mean"];
    const STD_DEV: &'static [&'static str] = &["혼잡도표준편차", "std"];

    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |names: &[&str]| -> Result<usize> {
            headers
                .iter()
                .position(|h| {
                    let h = h.trim().trim_start_matches('\u{feff}');
                    names.iter().any(|name| h == *name)
                })
                .ok_or_else(|| DSCError::MissingColumn(names[0].to_string()))
        };

        Ok(ColumnMap {
            station: find(Self::STATION)?,
            day: find(Self::DAY)?,
            hour_band: find(Self::HOUR_BAND)?,
            mean: find(Self::MEAN)?,
            std_dev: find(Self::STD_DEV)?,
        })
    }

    fn read(&self, record: &csv::StringRecord, line: u64) -> Result<CrowdingRecord> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| DSCError::InvalidRecord(format!("missing '{}' field", name)))
        };

        let station = normalize_station(field(self.station, "역명")?);
        if station.is_empty() {
            return Err(DSCError::InvalidRecord("empty station name".to_string()));
        }

        let day_label = field(self.day, "요일")?.trim().to_string();
        let hour_band = canonical_hour_band(field(self.hour_band, "시간대")?);
        let mean = parse_statistic(field(self.mean, "혼잡도평균")?, "mean")?;
        let std_dev = parse_statistic(field(self.std_dev, "혼잡도표준편차")?, "std")?;
        if std_dev < 0.0 {
            return Err(DSCError::InvalidRecord(format!(
                "negative standard deviation {}",
                std_dev
            )));
        }

        Ok(CrowdingRecord {
            station,
            day_type: DayType::from_day_label(&day_label),
            day_label,
            hour_band,
            mean,
            std_dev,
            line,
        })
    }
}

fn parse_statistic(raw: &str, name: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DSCError::InvalidRecord(format!("{} '{}' is not a number", name, raw)))?;
    if !value.is_finite() {
        return Err(DSCError::InvalidRecord(format!("{} '{}' is not finite", name, raw)));
    }
    Ok(value)
}

pub struct DSCModels;

impl DSCModels {
    pub const DEFAULT_DATA_FILE: &'static str = "혼잡도_통계_요약 (1).csv";

    /// Selector contents when the table could not be loaded.
    pub const PLACEHOLDER_STATIONS: [&'static str; 3] = ["대동", "시청", "대전역"];

    pub fn load_table(path: &Path, encoding: TextEncoding) -> Result<CrowdingTable> {
        if !path.exists() {
            return Err(DSCError::DataFileMissing(path.to_path_buf()));
        }

        let bytes = fs::read(path)
            .map_err(|e| DSCError::FileError(format!("Failed to read '{}': {}", path.display(), e)))?;
        let text = Self::decode(&bytes, encoding);
        let table = Self::parse_table(&text)?;

        log::info!(
            "Loaded {} rows for {} stations from {}",
            table.len(),
            table.stations().len(),
            path.display()
        );
        if table.is_empty() {
            log::warn!("{} contains no usable rows", path.display());
        }
        if table.skipped_rows() > 0 {
            log::warn!("Skipped {} invalid rows", table.skipped_rows());
        }
        for duplicate in table.duplicates() {
            log::warn!(
                "Duplicate key {} on lines {:?}; line {} is used",
                duplicate.key,
                duplicate.lines,
                duplicate.lines[0]
            );
        }

        Ok(table)
    }

    pub fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
        let (text, had_errors) = match encoding {
            TextEncoding::Utf8 => UTF_8.decode_with_bom_removal(bytes),
            TextEncoding::Cp949 => EUC_KR.decode_without_bom_handling(bytes),
            TextEncoding::Auto => {
                let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
                if had_errors {
                    log::debug!("Input is not valid UTF-8, decoding as CP949");
                    EUC_KR.decode_without_bom_handling(bytes)
                } else {
                    (text, had_errors)
                }
            }
        };

        if had_errors {
            log::warn!("Input contained bytes invalid for {:?}; they were replaced", encoding);
        }
        text.into_owned()
    }

    pub fn parse_table(text: &str) -> Result<CrowdingTable> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| DSCError::ParseError(format!("Failed to read header row: {}", e)))?
            .clone();
        let columns = ColumnMap::resolve(&headers)?;

        let mut records = Vec::new();
        let mut skipped = 0;

        for (row, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Skipping unreadable row: {}", e);
                    skipped += 1;
                    continue;
                }
            };

            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row as u64 + 2);

            match columns.read(&record, line) {
                Ok(crowding) => {
                    log::debug!("line {}: {}", line, crowding.key());
                    records.push(crowding);
                }
                Err(e) => {
                    log::warn!("Skipping line {}: {}", line, e);
                    skipped += 1;
                }
            }
        }

        Ok(CrowdingTable::from_records(records).with_skipped_rows(skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
역명,요일,시간대,혼잡도평균,혼잡도표준편차
대전역,월요일,07-08시,55.0,5.0
대전역,화요일,07-08시,70.0,3.0
대전역,월요일,08-09시,82.5,4.0
대전역,토요일,07-08시,20.0,2.0
 시 청 ,월요일,7-8시,40.0,6.0
";

    #[test]
    fn weekend_days_derive_weekend() {
        for weekday in WEEKDAYS {
            let expected = matches!(weekday, Weekday::Sat | Weekday::Sun);
            assert_eq!(DayType::from_weekday(weekday) == DayType::Weekend, expected);
        }
        assert_eq!(DayType::from_day_label("토요일"), DayType::Weekend);
        assert_eq!(DayType::from_day_label("일요일"), DayType::Weekend);
        assert_eq!(DayType::from_day_label("수요일"), DayType::Weekday);
        assert_eq!(DayType::from_day_label("공휴일"), DayType::Weekday);
    }

    #[test]
    fn hour_band_labels_wrap_at_midnight() {
        assert_eq!(HourBand::new(7).unwrap().label(), "07-08시");
        assert_eq!(HourBand::new(0).unwrap().label(), "00-01시");
        assert_eq!(HourBand::new(23).unwrap().label(), "23-00시");
        assert!(matches!(HourBand::new(24), Err(DSCError::InvalidQuery(_))));
    }

    #[test]
    fn hour_band_cells_are_canonicalized() {
        assert_eq!(canonical_hour_band("7-8시"), "07-08시");
        assert_eq!(canonical_hour_band(" 09 - 10 "), "09-10시");
        assert_eq!(canonical_hour_band("23-24시"), "23-00시");
        assert_eq!(canonical_hour_band("07-09시"), "07-09시");
        assert_eq!(canonical_hour_band(" 첫차 "), "첫차");
    }

    #[test]
    fn weekday_names_parse_in_korean_and_english() {
        assert_eq!(parse_weekday("월요일"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("일"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("Saturday"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("fri"), Some(Weekday::Fri));
        assert_eq!(parse_weekday("someday"), None);
        for weekday in WEEKDAYS {
            assert_eq!(parse_weekday(weekday_label(weekday)), Some(weekday));
        }
    }

    #[test]
    fn station_names_lose_all_whitespace() {
        assert_eq!(normalize_station(" 대 전역\t"), "대전역");
        assert_eq!(normalize_station("시청"), "시청");
    }

    #[test]
    fn parses_korean_headers() {
        let table = DSCModels::parse_table(SAMPLE).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.stations(), vec!["대전역".to_string(), "시청".to_string()]);

        let record = table.lookup("시청", DayType::Weekday, "07-08시").unwrap();
        assert_eq!(record.mean, 40.0);
        assert_eq!(record.line, 6);

        let weekend = table.lookup("대전역", DayType::Weekend, "07-08시").unwrap();
        assert_eq!(weekend.mean, 20.0);
        assert!(table.lookup("대전역", DayType::Weekend, "08-09시").is_none());
    }

    #[test]
    fn duplicate_keys_are_reported_and_first_row_wins() {
        let table = DSCModels::parse_table(SAMPLE).unwrap();
        let record = table.lookup("대전역", DayType::Weekday, "07-08시").unwrap();
        assert_eq!(record.mean, 55.0);
        assert_eq!(record.day_label, "월요일");

        assert_eq!(table.duplicates().len(), 1);
        let duplicate = &table.duplicates()[0];
        assert_eq!(duplicate.key.station, "대전역");
        assert_eq!(duplicate.key.hour_band, "07-08시");
        assert_eq!(duplicate.lines, vec![2, 3]);
    }

    #[test]
    fn station_rows_outlive_the_station_argument() {
        let table = DSCModels::parse_table(SAMPLE).unwrap();
        let rows: Vec<&CrowdingRecord> = {
            let station = normalize_station(" 대전 역 ");
            table.records_for(&station, DayType::Weekday).collect()
        };
        let lines: Vec<u64> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[test]
    fn alternate_statistic_columns_are_accepted() {
        let text = "역명,요일,시간대,mean,std\n대동,금요일,18-19시,61.2,7.5\n";
        let table = DSCModels::parse_table(text).unwrap();
        let record = table.lookup("대동", DayType::Weekday, "18-19시").unwrap();
        assert_eq!(record.mean, 61.2);
        assert_eq!(record.std_dev, 7.5);
    }

    #[test]
    fn missing_statistic_column_is_fatal() {
        let text = "역명,요일,시간대,혼잡도평균\n대동,금요일,18-19시,61.2\n";
        match DSCModels::parse_table(text) {
            Err(DSCError::MissingColumn(name)) => assert_eq!(name, "혼잡도표준편차"),
            other => panic!("expected missing column, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn invalid_rows_are_skipped_and_counted() {
        let text = "\
역명,요일,시간대,혼잡도평균,혼잡도표준편차
대동,월요일,07-08시,abc,5.0
대동,월요일,08-09시,50.0,-1.0
대동,월요일,09-10시,NaN,1.0
,월요일,10-11시,50.0,1.0
대동,월요일,11-12시,45.0,2.0
";
        let table = DSCModels::parse_table(text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.skipped_rows(), 4);
        assert!(table.lookup("대동", DayType::Weekday, "11-12시").is_some());
    }

    #[test]
    fn hourly_profile_is_sorted_and_deduplicated() {
        let text = "\
역명,요일,시간대,혼잡도평균,혼잡도표준편차
대동,월요일,18-19시,70.0,5.0
대동,월요일,기타,10.0,1.0
대동,월요일,07-08시,60.0,5.0
대동,화요일,18-19시,99.0,5.0
";
        let table = DSCModels::parse_table(text).unwrap();
        let profile = table.hourly_profile("대동", DayType::Weekday);
        let bands: Vec<&str> = profile.iter().map(|r| r.hour_band.as_str()).collect();
        assert_eq!(bands, vec!["07-08시", "18-19시", "기타"]);
        assert_eq!(profile[1].mean, 70.0);
    }

    #[test]
    fn missing_file_is_reported_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        match DSCModels::load_table(&path, TextEncoding::Auto) {
            Err(DSCError::DataFileMissing(missing)) => assert_eq!(missing, path),
            other => panic!("expected missing file, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn loads_cp949_encoded_file() {
        let (bytes, _, had_errors) = EUC_KR.encode(SAMPLE);
        assert!(!had_errors);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let table = DSCModels::load_table(file.path(), TextEncoding::Auto).unwrap();
        assert!(table.contains_station("대전역"));
        assert_eq!(table.len(), 5);

        let forced = DSCModels::load_table(file.path(), TextEncoding::Cp949).unwrap();
        assert_eq!(forced.stations(), table.stations());
    }

    #[test]
    fn loads_utf8_file_with_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBF").unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = DSCModels::load_table(file.path(), TextEncoding::Utf8).unwrap();
        assert!(table.lookup("시청", DayType::Weekday, "07-08시").is_some());
    }
}

// Controllers for the terminal surfaces of the Daejeon Subway Crowding estimator
use crate::dsc_config::{seoul_now, AppContext, DSCConfig};
use crate::dsc_models::{normalize_station, parse_weekday, DayType, DSCModels, Result, WEEKDAYS};
use crate::dsc_views::DSCViews;
use chrono::Weekday;
use std::io::{self, Write};

/// Outcome of matching user input against the station catalogue.
#[derive(Debug, Clone, PartialEq)]
pub enum StationMatch {
    Exact(String),
    Candidates(Vec<String>),
    NotFound,
}

pub struct DSCControllers;

impl DSCControllers {
    /// Menu-driven session. A table that fails to load is reported once in the
    /// framed warning and ends the session before the first prompt.
    pub fn run(config: DSCConfig) -> Result<()> {
        DSCViews::show_welcome();

        let (today, now_hour) = seoul_now();
        let mut hour = now_hour.max(config.min_hour);

        let mut context = match AppContext::load(config) {
            Ok(context) => context,
            Err(e) => {
                log::debug!("interactive session aborted: {:?}", e);
                DSCViews::load_error(&e.to_string());
                return Ok(());
            }
        };

        let mut station: Option<String> = None;
        let mut weekday = today;

        loop {
            DSCViews::show_menu(station.as_deref(), weekday, hour);
            let choice = Self::read_input();

            match choice.trim() {
                "1" => {
                    if let Some(selected) = Self::handle_station_selection(&context) {
                        DSCViews::station_selected(&selected);
                        station = Some(selected);
                    }
                }
                "2" => {
                    DSCViews::show_weekday_choices();
                    let input = DSCViews::prompt("요일을 선택하세요 (번호 또는 이름):");
                    match Self::parse_weekday_choice(&input) {
                        Some(selected) => weekday = selected,
                        None => DSCViews::invalid_choice(&input),
                    }
                }
                "3" => {
                    let min_hour = context.config.min_hour;
                    let input = DSCViews::prompt(&format!("시간대를 선택하세요 ({}-23시):", min_hour));
                    match Self::parse_hour(&input, min_hour) {
                        Some(selected) => hour = selected,
                        None => DSCViews::invalid_choice(&input),
                    }
                }
                "4" => match &station {
                    Some(name) => {
                        let estimate = context.estimate(name, weekday, hour)?;
                        DSCViews::show_result(&DSCViews::format_estimate(&estimate));
                    }
                    None => DSCViews::no_station_selected(),
                },
                "5" => match &station {
                    Some(name) => {
                        let outcome = context.peak_hours(name, weekday);
                        DSCViews::show_result(&DSCViews::format_peak_report(&outcome));
                    }
                    None => DSCViews::no_station_selected(),
                },
                "6" => match &station {
                    Some(name) => {
                        let profile = context
                            .table()
                            .hourly_profile(name, DayType::from_weekday(weekday));
                        DSCViews::show_profile(name, weekday, &profile);
                    }
                    None => DSCViews::no_station_selected(),
                },
                "7" => DSCViews::show_stations(&context.table().stations()),
                "8" => DSCViews::show_result(&DSCViews::format_validation_report(
                    context.table(),
                    &context.config.data_file,
                )),
                "0" => {
                    DSCViews::goodbye_message();
                    break;
                }
                "" => {}
                other => DSCViews::invalid_choice(other),
            }
        }

        Ok(())
    }

    // ========================================================================
    // One-shot Commands
    // ========================================================================

    pub fn run_estimate(
        context: &mut AppContext,
        station: &str,
        weekday: Weekday,
        hour: u8,
        json: bool,
    ) -> anyhow::Result<()> {
        let estimate = context.estimate(station, weekday, hour)?;
        log::debug!("estimate value: {:?}", estimate.value());
        if json {
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        } else {
            println!("{}", DSCViews::format_estimate(&estimate));
        }
        Ok(())
    }

    pub fn run_peaks(context: &AppContext, station: &str, weekday: Weekday, json: bool) -> anyhow::Result<()> {
        if !context.table().contains_station(&normalize_station(station)) {
            log::warn!("'{}' is not in the table", station);
        }
        let outcome = context.peak_hours(station, weekday);
        if json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!("{}", DSCViews::format_peak_report(&outcome));
        }
        Ok(())
    }

    pub fn run_profile(context: &AppContext, station: &str, weekday: Weekday) {
        let station = normalize_station(station);
        let profile = context
            .table()
            .hourly_profile(&station, DayType::from_weekday(weekday));
        DSCViews::show_profile(&station, weekday, &profile);
    }

    pub fn run_stations(context: &AppContext) {
        for station in context.table().stations() {
            println!("{}", station);
        }
    }

    pub fn run_validate(context: &AppContext) {
        println!(
            "{}",
            DSCViews::format_validation_report(context.table(), &context.config.data_file)
        );
    }

    // ========================================================================
    // Input Handling
    // ========================================================================

    fn handle_station_selection(context: &AppContext) -> Option<String> {
        let input = DSCViews::prompt("역명을 입력하세요 (일부만 입력해도 됩니다):");
        if input.is_empty() {
            return None;
        }

        let stations = context.table().stations();
        match Self::match_station(&input, &stations) {
            StationMatch::Exact(name) => Some(name),
            StationMatch::Candidates(candidates) => {
                DSCViews::show_station_suggestions(&candidates);
                let choice = DSCViews::prompt(&format!("번호를 입력하세요 (1-{}):", candidates.len()));
                match choice.parse::<usize>() {
                    Ok(n) if n > 0 && n <= candidates.len() => Some(candidates[n - 1].clone()),
                    _ => {
                        DSCViews::invalid_choice(&choice);
                        None
                    }
                }
            }
            StationMatch::NotFound => {
                DSCViews::invalid_station(&input);
                None
            }
        }
    }

    /// Exact name first, then substring matches; a single substring match is taken as exact.
    pub fn match_station(input: &str, stations: &[String]) -> StationMatch {
        let needle = normalize_station(input);
        if needle.is_empty() {
            return StationMatch::NotFound;
        }
        if stations.iter().any(|s| *s == needle) {
            return StationMatch::Exact(needle);
        }

        let mut candidates: Vec<String> = stations
            .iter()
            .filter(|s| s.contains(&needle))
            .cloned()
            .collect();

        match candidates.len() {
            0 => StationMatch::NotFound,
            1 => StationMatch::Exact(candidates.remove(0)),
            _ => StationMatch::Candidates(candidates),
        }
    }

    /// `1`-`7` (Monday first) or any spelling `parse_weekday` accepts.
    pub fn parse_weekday_choice(input: &str) -> Option<Weekday> {
        match input.trim().parse::<usize>() {
            Ok(n) if (1..=7).contains(&n) => Some(WEEKDAYS[n - 1]),
            Ok(_) => None,
            Err(_) => parse_weekday(input),
        }
    }

    pub fn parse_hour(input: &str, min_hour: u8) -> Option<u8> {
        let hour: u8 = input.trim().trim_end_matches('시').trim().parse().ok()?;
        (min_hour..=23).contains(&hour).then_some(hour)
    }

    fn read_input() -> String {
        let _ = io::stdout().flush();
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => input,
            Err(e) => {
                eprintln!("⚠️  Error reading input: {}", e);
                String::new()
            }
        }
    }

    /// Selector contents when no table is available.
    pub fn placeholder_stations() -> Vec<String> {
        DSCModels::PLACEHOLDER_STATIONS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> Vec<String> {
        ["대동", "대전역", "시청", "시청남"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn exact_station_name_wins_over_substrings() {
        assert_eq!(
            DSCControllers::match_station(" 시 청 ", &stations()),
            StationMatch::Exact("시청".to_string())
        );
    }

    #[test]
    fn partial_station_name_lists_candidates() {
        assert_eq!(
            DSCControllers::match_station("대", &stations()),
            StationMatch::Candidates(vec!["대동".to_string(), "대전역".to_string()])
        );
        assert_eq!(
            DSCControllers::match_station("남", &stations()),
            StationMatch::Exact("시청남".to_string())
        );
        assert_eq!(DSCControllers::match_station("유성", &stations()), StationMatch::NotFound);
        assert_eq!(DSCControllers::match_station("  ", &stations()), StationMatch::NotFound);
    }

    #[test]
    fn weekday_choice_accepts_numbers_and_names() {
        assert_eq!(DSCControllers::parse_weekday_choice("1"), Some(Weekday::Mon));
        assert_eq!(DSCControllers::parse_weekday_choice("7"), Some(Weekday::Sun));
        assert_eq!(DSCControllers::parse_weekday_choice("8"), None);
        assert_eq!(DSCControllers::parse_weekday_choice("토요일"), Some(Weekday::Sat));
        assert_eq!(DSCControllers::parse_weekday_choice("tuesday"), Some(Weekday::Tue));
    }

    #[test]
    fn hour_choice_respects_selector_range() {
        assert_eq!(DSCControllers::parse_hour("7", 0), Some(7));
        assert_eq!(DSCControllers::parse_hour("18시", 5), Some(18));
        assert_eq!(DSCControllers::parse_hour("4", 5), None);
        assert_eq!(DSCControllers::parse_hour("24", 0), None);
        assert_eq!(DSCControllers::parse_hour("아침", 0), None);
    }

    #[test]
    fn failed_load_ends_session_without_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = DSCConfig {
            data_file: dir.path().join("absent.csv"),
            ..DSCConfig::default()
        };
        assert!(DSCControllers::run(config).is_ok());
    }

    #[test]
    fn placeholder_stations_are_available_without_data() {
        assert_eq!(DSCControllers::placeholder_stations(), vec!["대동", "시청", "대전역"]);
    }
}

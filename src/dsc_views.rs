// Views for the Daejeon Subway Crowding estimator
use crate::dsc_estimator::{CrowdingLevel, Estimate, PeakOutcome};
use crate::dsc_models::{weekday_label, CrowdingRecord, CrowdingTable, WEEKDAYS};
use chrono::Weekday;
use std::io::{self, Write};
use std::path::Path;

pub struct DSCViews;

impl DSCViews {
    pub const LOAD_FAILED_WARNING: &'static str =
        "데이터 파일을 불러오지 못하여 예측을 수행할 수 없습니다.";

    // ========================================================================
    // Text Formatting (shared with the GUI)
    // ========================================================================

    pub fn format_estimate(estimate: &Estimate) -> String {
        match estimate {
            Estimate::NoData {
                station,
                weekday,
                hour_band,
            } => format!(
                "[❗] 데이터 없음: {}, {}, {}",
                station,
                weekday_label(*weekday),
                hour_band
            ),
            Estimate::Sampled(e) => format!(
                "[{}역 | {} {}]\n예상 혼잡도: {:.1}%\n혼잡도 수준: {}",
                e.station,
                weekday_label(e.weekday),
                e.hour_band,
                e.value,
                e.level.label()
            ),
        }
    }

    pub fn format_peak_report(outcome: &PeakOutcome) -> String {
        match outcome {
            PeakOutcome::NoData {
                station,
                weekday,
                day_type,
            } => format!(
                "[❗] 데이터 없음: {}, {} ({})",
                station,
                weekday_label(*weekday),
                day_type
            ),
            PeakOutcome::Found(report) => format!(
                "[{}역 | {} ({})]\n🔺 가장 혼잡한 시간대: {} (평균 {:.1}%)\n🔻 가장 여유로운 시간대: {} (평균 {:.1}%)",
                report.station,
                weekday_label(report.weekday),
                report.day_type,
                report.peak.hour_band,
                report.peak.mean,
                report.off_peak.hour_band,
                report.off_peak.mean
            ),
        }
    }

    pub fn format_profile_row(record: &CrowdingRecord) -> String {
        format!(
            "{}  평균 {:>5.1}%  표준편차 {:>4.1}  {}",
            record.hour_band,
            record.mean,
            record.std_dev,
            CrowdingLevel::classify(record.mean).label()
        )
    }

    pub fn format_validation_report(table: &CrowdingTable, source: &Path) -> String {
        let mut report = format!(
            "📊 데이터 검증 보고서: {}\n\
             • 행: {} | 역: {} | 건너뛴 행: {}\n\
             • 중복 키: {}",
            source.display(),
            table.len(),
            table.stations().len(),
            table.skipped_rows(),
            table.duplicates().len()
        );

        for duplicate in table.duplicates() {
            let lines: Vec<String> = duplicate.lines.iter().map(|l| l.to_string()).collect();
            report.push_str(&format!(
                "\n   ⚠️  {} → {}행 (사용: {}행)",
                duplicate.key,
                lines.join(", "),
                duplicate.lines[0]
            ));
        }

        report
    }

    // ========================================================================
    // Terminal Output
    // ========================================================================

    pub fn show_welcome() {
        println!("\n{}", "═".repeat(60));
        println!("     🚇 대전 지하철 혼잡도 예측");
        println!("{}", "═".repeat(60));
        println!("  역, 요일, 시간을 선택하면 통계 기반 예상 혼잡도를 보여줍니다.");
        println!("{}", "═".repeat(60));
    }

    pub fn show_menu(station: Option<&str>, weekday: Weekday, hour: u8) {
        println!("\n{}", "─".repeat(60));
        println!(
            "  현재 선택: {} | {} | {:02}시",
            station.unwrap_or("(역 미선택)"),
            weekday_label(weekday),
            hour
        );
        println!("{}", "─".repeat(60));
        println!("  1️⃣  역 선택");
        println!("  2️⃣  요일 선택");
        println!("  3️⃣  시간 선택");
        println!("  4️⃣  혼잡도 예측하기");
        println!("  5️⃣  피크 / 비피크 시간대");
        println!("  6️⃣  시간대별 평균 혼잡도");
        println!("  7️⃣  전체 역 목록");
        println!("  8️⃣  데이터 검증 보고서");
        println!("  0️⃣  종료");
        println!("{}", "─".repeat(60));
        print!("➜ 선택: ");
        let _ = io::stdout().flush();
    }

    pub fn prompt(message: &str) -> String {
        print!("\n{}\n➜ ", message);
        let _ = io::stdout().flush();
        let mut input = String::new();
        if let Err(e) = io::stdin().read_line(&mut input) {
            eprintln!("⚠️  입력 오류: {}", e);
        }
        input.trim().to_string()
    }

    pub fn show_weekday_choices() {
        println!();
        for (i, weekday) in WEEKDAYS.iter().enumerate() {
            println!("  {}. {}", i + 1, weekday_label(*weekday));
        }
    }

    pub fn show_stations(stations: &[String]) {
        println!("\n🚉 전체 역 ({}개)", stations.len());
        println!("{}", "─".repeat(60));
        for (i, chunk) in stations.chunks(5).enumerate() {
            let row: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(j, name)| format!("{:>3}. {}", i * 5 + j + 1, name))
                .collect();
            println!("{}", row.join("  "));
        }
        println!("{}", "─".repeat(60));
    }

    pub fn show_station_suggestions(candidates: &[String]) {
        println!("\n💡 여러 역이 검색되었습니다:");
        for (i, name) in candidates.iter().enumerate() {
            println!("  {}. {}", i + 1, name);
        }
    }

    pub fn show_profile(station: &str, weekday: Weekday, profile: &[&CrowdingRecord]) {
        println!("\n📊 {}역 | {} 시간대별 평균 혼잡도", station, weekday_label(weekday));
        println!("{}", "─".repeat(60));
        if profile.is_empty() {
            println!("  [❗] 데이터 없음");
        }
        for record in profile {
            println!("  {}", Self::format_profile_row(record));
        }
        println!("{}", "─".repeat(60));
    }

    pub fn show_result(text: &str) {
        println!("\n{}", "─".repeat(60));
        println!("{}", text);
        println!("{}", "─".repeat(60));
    }

    pub fn station_selected(station: &str) {
        println!("\n✓ 역 선택: {}", station);
    }

    pub fn invalid_station(input: &str) {
        println!("\n✗ '{}' 역을 찾을 수 없습니다. 7번 메뉴에서 전체 역 목록을 확인하세요.", input);
    }

    pub fn invalid_choice(input: &str) {
        println!("\n✗ 잘못된 입력입니다: '{}'", input);
    }

    pub fn no_station_selected() {
        println!("\n⚠️  먼저 역을 선택하세요 (1번 메뉴).");
    }

    pub fn load_error(message: &str) {
        eprintln!("\n{}", "═".repeat(60));
        eprintln!("❌ 오류: 데이터를 불러올 수 없습니다");
        eprintln!("   {}", message);
        eprintln!("   {}", Self::LOAD_FAILED_WARNING);
        eprintln!("{}", "═".repeat(60));
    }

    pub fn goodbye_message() {
        println!("\n👋 이용해 주셔서 감사합니다.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsc_estimator::{CrowdingEstimate, PeakReport};
    use crate::dsc_models::{DSCModels, DayType};

    #[test]
    fn sampled_estimate_uses_three_lines() {
        let estimate = Estimate::Sampled(CrowdingEstimate {
            station: "대전역".to_string(),
            weekday: Weekday::Mon,
            day_type: DayType::Weekday,
            hour_band: "07-08시".to_string(),
            mean: 50.0,
            std_dev: 5.0,
            value: 63.27,
            level: CrowdingLevel::SlightlyCongested,
        });
        assert_eq!(
            DSCViews::format_estimate(&estimate),
            "[대전역역 | 월요일 07-08시]\n예상 혼잡도: 63.3%\n혼잡도 수준: 🟠 약간 혼잡"
        );
    }

    #[test]
    fn no_data_names_the_query() {
        let estimate = Estimate::NoData {
            station: "A".to_string(),
            weekday: Weekday::Mon,
            hour_band: "10-11시".to_string(),
        };
        assert_eq!(DSCViews::format_estimate(&estimate), "[❗] 데이터 없음: A, 월요일, 10-11시");
    }

    #[test]
    fn peak_report_lists_both_bands() {
        let table = DSCModels::parse_table(
            "역명,요일,시간대,혼잡도평균,혼잡도표준편차\n시청,토요일,14-15시,48.0,5.0\n시청,토요일,06-07시,4.2,1.0\n",
        )
        .unwrap();
        let records: Vec<CrowdingRecord> = table.records_for("시청", DayType::Weekend).cloned().collect();
        let outcome = PeakOutcome::Found(PeakReport {
            station: "시청".to_string(),
            weekday: Weekday::Sat,
            day_type: DayType::Weekend,
            peak: records[0].clone(),
            off_peak: records[1].clone(),
        });
        let text = DSCViews::format_peak_report(&outcome);
        assert!(text.starts_with("[시청역 | 토요일 (주말)]"));
        assert!(text.contains("가장 혼잡한 시간대: 14-15시 (평균 48.0%)"));
        assert!(text.contains("가장 여유로운 시간대: 06-07시 (평균 4.2%)"));
    }

    #[test]
    fn validation_report_lists_duplicates() {
        let table = DSCModels::parse_table(
            "역명,요일,시간대,혼잡도평균,혼잡도표준편차\n대동,월요일,07-08시,50,5\n대동,화요일,07-08시,55,5\n",
        )
        .unwrap();
        let report = DSCViews::format_validation_report(&table, Path::new("data.csv"));
        assert!(report.contains("중복 키: 1"));
        assert!(report.contains("대동 / 평일 / 07-08시 → 2, 3행 (사용: 2행)"));
    }
}

// GUI implementation for the Daejeon Subway Crowding estimator using egui/eframe
use crate::dsc_config::{seoul_now, AppContext, DSCConfig};
use crate::dsc_controllers::DSCControllers;
use crate::dsc_estimator::CrowdingLevel;
use crate::dsc_models::{weekday_label, DayType, WEEKDAYS};
use crate::dsc_views::DSCViews;
use chrono::{Utc, Weekday};
use chrono_tz::Asia::Seoul;
use eframe::egui;
use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Application State
// ============================================================================

pub struct DSCApp {
    // None when the table failed to load
    context: Option<AppContext>,
    error_message: Option<String>,

    stations: Vec<String>,
    min_hour: u8,

    // Current selection
    selected_station: String,
    selected_weekday: Weekday,
    selected_hour: u8,

    // Estimate for the current selection; cleared when the selection changes
    estimate_text: Option<String>,
    estimate_level: Option<CrowdingLevel>,
}

impl DSCApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DSCConfig) -> Self {
        install_korean_font(&cc.egui_ctx, config.font.as_deref());

        let (today, _) = seoul_now();
        let min_hour = config.min_hour;
        let default_hour = config.default_hour();

        let (context, error_message) = match AppContext::load(config) {
            Ok(context) => (Some(context), None),
            Err(e) => {
                log::error!("{}", e);
                (None, Some(e.to_string()))
            }
        };

        let stations = context
            .as_ref()
            .map(|c| c.table().stations())
            .filter(|stations| !stations.is_empty())
            .unwrap_or_else(DSCControllers::placeholder_stations);
        let selected_station = stations.first().cloned().unwrap_or_default();

        Self {
            context,
            error_message,
            stations,
            min_hour,
            selected_station,
            selected_weekday: today,
            selected_hour: default_hour,
            estimate_text: None,
            estimate_level: None,
        }
    }

    fn selection(&self) -> (String, Weekday, u8) {
        (self.selected_station.clone(), self.selected_weekday, self.selected_hour)
    }

    fn clear_estimate_if_changed(&mut self, previous: &(String, Weekday, u8)) {
        if self.selection() != *previous {
            self.estimate_text = None;
            self.estimate_level = None;
        }
    }

    fn run_estimate(&mut self) {
        let Some(context) = self.context.as_mut() else {
            self.estimate_text = Some(DSCViews::LOAD_FAILED_WARNING.to_string());
            self.estimate_level = None;
            return;
        };

        match context.estimate(&self.selected_station, self.selected_weekday, self.selected_hour) {
            Ok(estimate) => {
                self.estimate_level = estimate.level();
                self.estimate_text = Some(DSCViews::format_estimate(&estimate));
            }
            Err(e) => {
                self.estimate_level = None;
                self.estimate_text = Some(format!("[❗] {}", e));
            }
        }
    }
}

impl eframe::App for DSCApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🚇 대전 지하철 혼잡도 예측");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let now = Utc::now().with_timezone(&Seoul);
                    ui.label(now.format("%H:%M:%S").to_string());
                });
            });
        });
        ctx.request_repaint_after(Duration::from_secs(1));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(error) = &self.error_message {
                    ui.colored_label(Color32::RED, "❌ 오류: 데이터 파일을 불러올 수 없습니다");
                    ui.label(error.as_str());
                    ui.separator();
                }

                self.show_controls(ui);
                ui.separator();
                self.show_estimate(ui);
                ui.separator();
                self.show_peak_summary(ui);
                ui.add_space(10.0);
                self.show_profile(ui);
                self.show_data_warnings(ui);
            });
        });
    }
}

// ============================================================================
// View Implementations
// ============================================================================

impl DSCApp {
    fn show_controls(&mut self, ui: &mut Ui) {
        let stations = self.stations.clone();
        let previous = self.selection();

        egui::ComboBox::from_label("역명을 선택하세요")
            .selected_text(self.selected_station.clone())
            .show_ui(ui, |ui| {
                for station in &stations {
                    ui.selectable_value(&mut self.selected_station, station.clone(), station.as_str());
                }
            });

        egui::ComboBox::from_label("요일을 선택하세요")
            .selected_text(weekday_label(self.selected_weekday))
            .show_ui(ui, |ui| {
                for weekday in WEEKDAYS {
                    ui.selectable_value(&mut self.selected_weekday, weekday, weekday_label(weekday));
                }
            });

        ui.add(
            egui::Slider::new(&mut self.selected_hour, self.min_hour..=23)
                .text(format!("시간대 ({}-23시)", self.min_hour)),
        );

        self.clear_estimate_if_changed(&previous);

        ui.add_space(5.0);
        if ui.button(RichText::new("혼잡도 예측하기").strong()).clicked() {
            self.run_estimate();
        }
    }

    fn show_estimate(&self, ui: &mut Ui) {
        ui.label(RichText::new("예상 혼잡도").strong().size(16.0));
        match &self.estimate_text {
            Some(text) => {
                let color = match self.estimate_level {
                    Some(level) => {
                        let (r, g, b) = level.rgb();
                        Color32::from_rgb(r, g, b)
                    }
                    None => Color32::from_rgb(255, 165, 0),
                };
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.colored_label(color, text.as_str());
                });
            }
            None => {
                ui.label("역, 요일, 시간대를 고른 뒤 버튼을 누르세요.");
            }
        }
    }

    // Recomputed every frame, so it always follows the current selection.
    fn show_peak_summary(&self, ui: &mut Ui) {
        ui.label(RichText::new("⏱️ 피크 / 비피크 시간대").strong().size(16.0));
        let text = match &self.context {
            Some(context) => DSCViews::format_peak_report(
                &context.peak_hours(&self.selected_station, self.selected_weekday),
            ),
            None => DSCViews::LOAD_FAILED_WARNING.to_string(),
        };
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(text);
        });
    }

    fn show_profile(&self, ui: &mut Ui) {
        let Some(context) = &self.context else {
            return;
        };
        let day_type = DayType::from_weekday(self.selected_weekday);
        let profile = context.table().hourly_profile(&self.selected_station, day_type);

        egui::CollapsingHeader::new(format!("📊 시간대별 평균 혼잡도 ({})", day_type))
            .default_open(false)
            .show(ui, |ui| {
                if profile.is_empty() {
                    ui.label("[❗] 데이터 없음");
                    return;
                }

                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .column(Column::auto())
                    .column(Column::auto())
                    .column(Column::auto())
                    .column(Column::remainder())
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("시간대");
                        });
                        header.col(|ui| {
                            ui.strong("평균");
                        });
                        header.col(|ui| {
                            ui.strong("표준편차");
                        });
                        header.col(|ui| {
                            ui.strong("수준");
                        });
                    })
                    .body(|mut body| {
                        for record in &profile {
                            let level = CrowdingLevel::classify(record.mean);
                            let (r, g, b) = level.rgb();
                            let highlight = record.hour().map(|h| h == self.selected_hour).unwrap_or(false);
                            body.row(18.0, |mut row| {
                                row.col(|ui| {
                                    let band = RichText::new(record.hour_band.as_str());
                                    ui.label(if highlight { band.strong() } else { band });
                                });
                                row.col(|ui| {
                                    ui.label(format!("{:.1}%", record.mean));
                                });
                                row.col(|ui| {
                                    ui.label(format!("{:.1}", record.std_dev));
                                });
                                row.col(|ui| {
                                    ui.colored_label(Color32::from_rgb(r, g, b), level.label());
                                });
                            });
                        }
                    });
            });
    }

    fn show_data_warnings(&self, ui: &mut Ui) {
        let Some(context) = &self.context else {
            return;
        };
        let table = context.table();
        if table.duplicates().is_empty() && table.skipped_rows() == 0 {
            return;
        }

        egui::CollapsingHeader::new(format!(
            "⚠️ 데이터 경고 (중복 키 {}, 건너뛴 행 {})",
            table.duplicates().len(),
            table.skipped_rows()
        ))
        .default_open(false)
        .show(ui, |ui| {
            ui.label(DSCViews::format_validation_report(table, &context.config.data_file));
        });
    }
}

// ============================================================================
// Fonts
// ============================================================================

const FONT_FILE_NAMES: &[&str] = &[
    "NanumGothic.ttf",
    "NotoSansKR-Regular.otf",
    "NotoSansKR-Regular.ttf",
    "NotoSansCJK-Regular.ttc",
    "malgun.ttf",
];

const SYSTEM_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\malgun.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/AppleGothic.ttf",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
];

/// Configured font first, then the user font directory, then well-known system paths.
fn font_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = configured.map(Path::to_path_buf).into_iter().collect();
    if let Some(dir) = dirs::font_dir() {
        candidates.extend(FONT_FILE_NAMES.iter().map(|name| dir.join(name)));
    }
    candidates.extend(SYSTEM_FONT_PATHS.iter().map(PathBuf::from));
    candidates
}

// The bundled egui fonts have no Hangul glyphs.
fn install_korean_font(ctx: &egui::Context, configured: Option<&Path>) {
    if let Some(path) = configured {
        if !path.exists() {
            log::warn!("Configured font {} does not exist", path.display());
        }
    }

    let found = font_candidates(configured)
        .into_iter()
        .find_map(|path| std::fs::read(&path).ok().map(|bytes| (path, bytes)));

    let Some((path, bytes)) = found else {
        log::warn!("No Korean font found, Hangul text may not render. Use --font to pick one");
        return;
    };

    log::info!("Using font {}", path.display());
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("korean".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("korean".to_owned());
    }
    ctx.set_fonts(fonts);
}

// ============================================================================
// Public entry point
// ============================================================================

pub fn run_gui(config: DSCConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "대전 지하철 혼잡도 예측",
        options,
        Box::new(|cc| Ok(Box::new(DSCApp::new(cc, config)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_without_data() -> DSCApp {
        DSCApp {
            context: None,
            error_message: Some("missing".to_string()),
            stations: DSCControllers::placeholder_stations(),
            min_hour: 0,
            selected_station: "대동".to_string(),
            selected_weekday: Weekday::Mon,
            selected_hour: 7,
            estimate_text: None,
            estimate_level: None,
        }
    }

    #[test]
    fn changing_selection_clears_the_estimate() {
        let mut app = app_without_data();
        let previous = app.selection();
        app.run_estimate();
        assert_eq!(app.estimate_text.as_deref(), Some(DSCViews::LOAD_FAILED_WARNING));

        app.clear_estimate_if_changed(&previous);
        assert!(app.estimate_text.is_some());

        app.selected_hour = 8;
        app.clear_estimate_if_changed(&previous);
        assert!(app.estimate_text.is_none());
        assert!(app.estimate_level.is_none());

        app.run_estimate();
        let previous = app.selection();
        app.selected_weekday = Weekday::Sat;
        app.clear_estimate_if_changed(&previous);
        assert!(app.estimate_text.is_none());
    }

    #[test]
    fn configured_font_is_tried_first() {
        let configured = PathBuf::from("/opt/fonts/custom.ttf");
        let candidates = font_candidates(Some(&configured));
        assert_eq!(candidates[0], configured);
        assert!(candidates.len() > SYSTEM_FONT_PATHS.len());
    }

    #[test]
    fn system_paths_are_always_candidates() {
        let candidates = font_candidates(None);
        for path in SYSTEM_FONT_PATHS {
            assert!(candidates.contains(&PathBuf::from(path)));
        }
    }
}

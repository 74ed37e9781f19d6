mod config;
mod scene;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use iced::widget::canvas::Canvas;
use iced::widget::{button, column, row, scrollable, text, Column, Container};
use iced::{time, Color, Element, Length, Subscription, Task, Theme};

use config::ConsoleConfig;
use scene::{risk_color, SiteScene};
use stratacore::site::{baseline_detections, load_detections, Detection, RiskLevel};
use stratacore::telemetry::InteractionMetrics;
use stratacore::{DetectionStore, ViewportController};

const HISTORY_LIMIT: usize = 20;

#[derive(Parser, Debug)]
#[command(author, version, about = "Operator console for the StrataNet rockfall detection system")]
struct Args {
    /// YAML console configuration; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON detection fixture to load instead of the baseline site data
    #[arg(long)]
    detections: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => ConsoleConfig::load(&path)?,
        None => ConsoleConfig::default(),
    };
    let detections = match args.detections {
        Some(path) => load_detections(&path)
            .with_context(|| format!("loading detection fixture {}", path.display()))?,
        None => baseline_detections(),
    };

    log::info!(
        "starting console for {} with {} detections",
        config.site_name,
        detections.len()
    );

    iced::application(
        move || Console::boot(config.clone(), detections.clone()),
        Console::update,
        Console::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .run()?;

    Ok(())
}

fn application_title(console: &Console) -> String {
    format!("StrataNet AI - {}", console.config.site_name)
}

fn application_subscription(_console: &Console) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_console: &Console) -> Theme {
    Theme::Dark
}

fn clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    DetectionChosen(u32),
    ZoomIn,
    ZoomOut,
    ResetView,
    Panned(f32, f32),
}

/// Top-level application state: the detection store, the viewport, and the
/// presentation chrome around them.
struct Console {
    config: ConsoleConfig,
    store: DetectionStore,
    viewport: ViewportController,
    metrics: InteractionMetrics,
    history: Vec<String>,
    last_updated: String,
    pulse_on: bool,
}

impl Console {
    fn boot(config: ConsoleConfig, detections: Vec<Detection>) -> (Self, Task<Message>) {
        let viewport = ViewportController::new(
            config.viewport,
            config.image_size(),
            config.viewport_size(),
        );
        let console = Self {
            store: DetectionStore::new(detections),
            viewport,
            metrics: InteractionMetrics::new(),
            history: Vec::new(),
            last_updated: clock(),
            pulse_on: false,
            config,
        };
        (console, Task::none())
    }

    fn push_history(&mut self, entry: String) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.last_updated = clock();
                self.pulse_on = !self.pulse_on;
            }
            Message::DetectionChosen(id) => {
                if self.store.select_by_id(id) {
                    self.metrics.record_selection();
                    self.push_history(format!("Selected detection #{}", id));
                }
            }
            Message::ZoomIn => {
                if self.viewport.zoom_in() {
                    self.metrics.record_view_change();
                    self.push_history(format!("Zoom {:.2}x", self.viewport.scale()));
                }
            }
            Message::ZoomOut => {
                if self.viewport.zoom_out() {
                    self.metrics.record_view_change();
                    self.push_history(format!("Zoom {:.2}x", self.viewport.scale()));
                }
            }
            Message::ResetView => {
                self.viewport.reset();
                self.metrics.record_view_change();
                self.push_history("View reset".into());
            }
            Message::Panned(dx, dy) => {
                self.viewport.pan(dx, dy);
                self.metrics.record_view_change();
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let header = row![
            column![
                text("StrataNet AI").size(26),
                text(format!("Rockfall Detection System - {}", self.config.site_name)).size(14),
            ]
            .spacing(2)
            .width(Length::Fill),
            column![
                text("System Active")
                    .size(14)
                    .color(Color::from_rgb(0.30, 0.80, 0.45)),
                text(format!("Last updated {}", self.last_updated)).size(12),
            ]
            .spacing(2),
        ]
        .spacing(20);

        let summary = self.risk_summary_panel();
        let list = self.detection_list_panel();
        let activity = self.activity_panel();

        let sidebar = column![summary, list, activity]
            .spacing(16)
            .width(Length::Fixed(280.0));

        let selected_line: Element<'_, Message> = match self.store.current() {
            Some(detection) => text(format!(
                "Selected: detection #{} ({}, {}, {})",
                detection.id,
                detection.risk.label(),
                detection.size,
                detection.timestamp
            ))
            .size(14)
            .color(risk_color(detection.risk))
            .into(),
            None => text("Click a marker or a list entry to inspect a detection")
                .size(14)
                .into(),
        };

        let controls = row![
            button(text("Zoom In").size(13))
                .on_press(Message::ZoomIn)
                .padding(6),
            button(text("Zoom Out").size(13))
                .on_press(Message::ZoomOut)
                .padding(6),
            button(text("Reset View").size(13))
                .on_press(Message::ResetView)
                .padding(6),
            text(format!("{:.2}x", self.viewport.scale())).size(13),
        ]
        .spacing(8);

        let site_canvas = Canvas::new(SiteScene {
            viewport: &self.viewport,
            detections: self.store.list(),
            selected: self.store.current().map(|detection| detection.id),
            pulse_on: self.pulse_on,
        })
        .width(Length::Fixed(self.config.viewport_width))
        .height(Length::Fixed(self.config.viewport_height));

        let (selections, view_changes) = self.metrics.snapshot();
        let footer = row![
            text("Drag to pan. Click a marker to select its detection.")
                .size(12)
                .width(Length::Fill),
            text(format!(
                "Session: {} selections, {} view changes",
                selections, view_changes
            ))
            .size(12),
        ];

        let main_panel = column![selected_line, controls, site_canvas, footer].spacing(10);

        let layout = column![header, row![sidebar, main_panel].spacing(20)]
            .spacing(16)
            .padding(16);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn risk_summary_panel(&self) -> Element<'_, Message> {
        let summary = self.store.summary();
        let rows = RiskLevel::ALL
            .iter()
            .fold(Column::new().spacing(4), |column, risk| {
                column.push(row![
                    text(risk.label())
                        .size(13)
                        .color(risk_color(*risk))
                        .width(Length::Fill),
                    text(summary.count(*risk).to_string()).size(13),
                ])
            });
        column![text("Detection Summary").size(16), rows]
            .spacing(8)
            .into()
    }

    fn detection_list_panel(&self) -> Element<'_, Message> {
        let selected_id = self.store.current().map(|detection| detection.id);
        let entries: Element<'_, Message> = if self.store.is_empty() {
            text("No detections reported").size(12).into()
        } else {
            let list = self
                .store
                .list()
                .iter()
                .fold(Column::new().spacing(6), |column, detection| {
                    column.push(detection_entry(detection, selected_id == Some(detection.id)))
                });
            scrollable(list).height(Length::Fixed(260.0)).into()
        };
        column![
            text(format!("Recent Detections ({})", self.store.len())).size(16),
            entries
        ]
        .spacing(8)
        .into()
    }

    fn activity_panel(&self) -> Element<'_, Message> {
        let entries: Element<'_, Message> = if self.history.is_empty() {
            text("No activity yet").size(12).into()
        } else {
            let list = self
                .history
                .iter()
                .fold(Column::new().spacing(2), |column, entry| {
                    column.push(text(entry.clone()).size(11))
                });
            scrollable(list).height(Length::Fixed(140.0)).into()
        };
        column![text("Activity").size(16), entries].spacing(8).into()
    }
}

fn detection_entry(detection: &Detection, selected: bool) -> Element<'_, Message> {
    let body = column![
        row![
            text(format!("#{}", detection.id)).size(13).width(Length::Fill),
            text(detection.risk.label())
                .size(13)
                .color(risk_color(detection.risk)),
        ],
        text(format!("{} - Size: {}", detection.timestamp, detection.size)).size(11),
    ]
    .spacing(2);

    button(body)
        .on_press(Message::DetectionChosen(detection.id))
        .padding(8)
        .width(Length::Fill)
        .style(if selected {
            button::primary
        } else {
            button::secondary
        })
        .into()
}

//! Lift journey lookup

use app_core::{LiftJourney, LiftTracker, StageStatus};
use app_ui::{Route, ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{field, heading, FieldData, Screen, ScreenUpdate};
use crate::input::edit_text;
use crate::theme::ShellTheme;

#[derive(Debug, Default)]
pub(crate) struct LiftTrackerScreen {
    query: String,
    editing: bool,
    result: Option<LiftJourney>,
}

impl LiftTrackerScreen {
    fn search(&mut self) -> ScreenUpdate {
        match LiftTracker.search(&self.query) {
            Some(journey) => {
                self.result = Some(journey);
                ScreenUpdate::handled()
            }
            None => ScreenUpdate::notice("Please enter a Lift ID"),
        }
    }
}

impl Screen for LiftTrackerScreen {
    fn hints(&self) -> &'static str {
        if self.editing {
            "type Lift ID · Enter search · Esc done"
        } else {
            "/ enter ID · Enter search · s scan QR · t view task · r report issue"
        }
    }

    fn render(&self, _ctx: &ScreenContext<'_>, _data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let mut lines = vec![
            field(
                "Lift ID",
                &self.query,
                "Enter Lift ID (e.g., LIFT-2024-001)",
                false,
                self.editing,
                theme,
            ),
            Line::default(),
        ];

        let Some(journey) = &self.result else {
            lines.push(Line::from(Span::styled(
                "  Scan the QR code on the lift or enter its ID to track its journey.",
                theme.muted(),
            )));
            return lines;
        };

        lines.push(heading(journey.lift_id.clone(), theme));
        lines.push(Line::from(Span::styled(
            format!("  {} · {} · {}", journey.model, journey.capacity, journey.floors),
            theme.muted(),
        )));
        if let Some(current) = journey.current_stage() {
            lines.push(Line::from(vec![
                Span::styled("  Current stage: ", theme.muted()),
                Span::styled(current.stage.clone(), theme.stage_status(current.status)),
                Span::styled(
                    format!("  ({}/{} complete)", journey.completed_stages(), journey.journey.len()),
                    theme.muted(),
                ),
            ]));
        }
        lines.push(Line::default());
        lines.push(heading("Journey", theme));

        for stage in &journey.journey {
            let marker = match stage.status {
                StageStatus::Completed => "✓",
                StageStatus::InProgress => "●",
                StageStatus::Pending => "○",
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", marker), theme.stage_status(stage.status)),
                Span::raw(stage.stage.clone()),
                Span::styled(
                    format!("  {}", stage.timestamp.as_deref().unwrap_or("Pending")),
                    theme.muted(),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {} · {}", stage.location, stage.description),
                theme.muted(),
            )));
        }
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>, _data: &mut FieldData) -> ScreenUpdate {
        if self.editing {
            return match key.code {
                KeyCode::Enter => {
                    self.editing = false;
                    self.search()
                }
                KeyCode::Esc => {
                    self.editing = false;
                    ScreenUpdate::handled()
                }
                _ => {
                    edit_text(&mut self.query, &key);
                    ScreenUpdate::handled()
                }
            };
        }

        match key.code {
            KeyCode::Char('/') => {
                self.editing = true;
                ScreenUpdate::handled()
            }
            KeyCode::Enter => self.search(),
            KeyCode::Char('s') => {
                let journey = LiftTracker.scan();
                self.query = journey.lift_id.clone();
                self.result = Some(journey);
                ScreenUpdate::handled()
            }
            KeyCode::Char('t') if self.result.is_some() => {
                let target = Route::TaskDetail {
                    task_id: "TASK001".to_string(),
                };
                ScreenUpdate::command(ShellCommand::go(target.to_path()))
            }
            KeyCode::Char('r') if self.result.is_some() => {
                ScreenUpdate::command(ShellCommand::go(Route::ReportIssue.to_path()))
            }
            _ => ScreenUpdate::ignored(),
        }
    }

    fn captures_input(&self) -> bool {
        self.editing
    }
}

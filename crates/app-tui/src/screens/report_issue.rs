//! Issue report form

use app_core::{IssueReport, IssueType};
use app_ui::{ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{field, heading, move_selection, row, FieldData, Screen, ScreenUpdate};
use crate::input::edit_text;
use crate::theme::ShellTheme;

/// Form fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Type,
    Priority,
    Title,
    Description,
    Location,
    LiftId,
    Photos,
}

const FIELDS: [FormField; 7] = [
    FormField::Type,
    FormField::Priority,
    FormField::Title,
    FormField::Description,
    FormField::Location,
    FormField::LiftId,
    FormField::Photos,
];

impl FormField {
    fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Description | FormField::Location | FormField::LiftId
        )
    }
}

#[derive(Debug, Default)]
pub(crate) struct ReportIssueScreen {
    report: IssueReport,
    field: usize,
    editing: bool,
}

impl ReportIssueScreen {
    fn focused(&self) -> FormField {
        FIELDS[self.field.min(FIELDS.len() - 1)]
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focused() {
            FormField::Title => Some(&mut self.report.title),
            FormField::Description => Some(&mut self.report.description),
            FormField::Location => Some(&mut self.report.location),
            FormField::LiftId => Some(&mut self.report.lift_id),
            _ => None,
        }
    }

    fn cycle_type(&mut self, forward: bool) {
        let all = IssueType::all();
        let next = match self.report.issue_type.and_then(|t| all.iter().position(|a| *a == t)) {
            None if forward => 0,
            None => all.len() - 1,
            Some(i) if forward => (i + 1) % all.len(),
            Some(i) => (i + all.len() - 1) % all.len(),
        };
        self.report.issue_type = Some(all[next]);
    }
}

impl Screen for ReportIssueScreen {
    fn hints(&self) -> &'static str {
        if self.editing {
            "type · Enter/Esc done"
        } else {
            "↑↓ field · ←→ choose · Enter edit · p add photo · x remove photo · s submit"
        }
    }

    fn render(&self, _ctx: &ScreenContext<'_>, _data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let focused = self.focused();
        let editing = |f: FormField| self.editing && focused == f;

        let type_spans = IssueType::all()
            .into_iter()
            .map(|t| {
                let style = if self.report.issue_type == Some(t) {
                    theme.active_tab()
                } else {
                    theme.inactive_tab()
                };
                Span::styled(format!(" {} ", t.name()), style)
            })
            .collect::<Vec<_>>();
        let mut type_row = vec![Span::styled(format!("{:<12}", "Issue Type*"), theme.muted())];
        type_row.extend(type_spans);

        let mut lines = vec![
            row(focused == FormField::Type, type_row, theme),
            Line::from(Span::styled(
                format!(
                    "              {}",
                    self.report
                        .issue_type
                        .map_or("Choose what kind of problem this is", |t| t.description())
                ),
                theme.muted(),
            )),
            row(
                focused == FormField::Priority,
                vec![
                    Span::styled(format!("{:<12}", "Priority"), theme.muted()),
                    Span::styled(self.report.priority.name().to_string(), theme.selected()),
                ],
                theme,
            ),
            Line::default(),
            field(
                "Title*",
                &self.report.title,
                "Brief description of the issue",
                focused == FormField::Title,
                editing(FormField::Title),
                theme,
            ),
            field(
                "Description*",
                &self.report.description,
                "Provide detailed information about the issue...",
                focused == FormField::Description,
                editing(FormField::Description),
                theme,
            ),
            field(
                "Location",
                &self.report.location,
                "Building, floor, or specific area",
                focused == FormField::Location,
                editing(FormField::Location),
                theme,
            ),
            field(
                "Lift ID",
                &self.report.lift_id,
                "LIFT-2024-001",
                focused == FormField::LiftId,
                editing(FormField::LiftId),
                theme,
            ),
            row(
                focused == FormField::Photos,
                vec![
                    Span::styled(format!("{:<12}", "Photos"), theme.muted()),
                    Span::raw(format!("{} attached", self.report.photos.len())),
                ],
                theme,
            ),
        ];

        for photo in &self.report.photos {
            lines.push(Line::from(Span::styled(format!("              {}", photo), theme.muted())));
        }
        lines.push(Line::default());
        lines.push(heading("* required", theme));
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>, _data: &mut FieldData) -> ScreenUpdate {
        if self.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                _ => {
                    if let Some(text) = self.text_mut() {
                        edit_text(text, &key);
                    }
                }
            }
            return ScreenUpdate::handled();
        }

        if move_selection(&mut self.field, FIELDS.len(), &key) {
            return ScreenUpdate::handled();
        }

        match (key.code, self.focused()) {
            (KeyCode::Left, FormField::Type) => self.cycle_type(false),
            (KeyCode::Right | KeyCode::Enter, FormField::Type) => self.cycle_type(true),
            (KeyCode::Left | KeyCode::Right | KeyCode::Enter, FormField::Priority) => {
                self.report.priority = self.report.priority.next();
            }
            (KeyCode::Enter, f) if f.is_text() => self.editing = true,
            (KeyCode::Char('p'), _) => {
                let name = self.report.attach_photo().to_string();
                return ScreenUpdate::notice(format!("Attached {}", name));
            }
            (KeyCode::Char('x'), _) => {
                let last = self.report.photos.len().checked_sub(1);
                if let Some(name) = last.and_then(|i| self.report.remove_photo(i)) {
                    return ScreenUpdate::notice(format!("Removed {}", name));
                }
            }
            (KeyCode::Char('s'), _) => {
                return match self.report.submit() {
                    Ok(()) => ScreenUpdate::command(ShellCommand::back())
                        .with_notice("Issue reported successfully! Admin has been notified."),
                    Err(e) => {
                        tracing::warn!("Issue report rejected: {}", e);
                        ScreenUpdate::notice(e.to_string())
                    }
                };
            }
            _ => return ScreenUpdate::ignored(),
        }
        ScreenUpdate::handled()
    }

    fn captures_input(&self) -> bool {
        self.editing
    }
}

//! Compliance checklist for one task

use app_core::{ChecklistCategory, ItemStatus};
use app_ui::{ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{heading, move_selection, row, FieldData, Screen, ScreenUpdate};
use crate::input::edit_text;
use crate::theme::ShellTheme;

#[derive(Debug, Default)]
pub(crate) struct ComplianceScreen {
    category: usize,
    selected: usize,
    /// Remarks being typed for the selected item
    editing_remarks: Option<String>,
}

fn status_label(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Ok => "[OK]    ",
        ItemStatus::NotOk => "[NOT OK]",
        ItemStatus::Pending => "[ -- ]  ",
    }
}

impl ComplianceScreen {
    fn current_category(&self) -> ChecklistCategory {
        let all = ChecklistCategory::all();
        all[self.category % all.len()]
    }

    /// Position of the selected row in the full checklist
    fn item_index(&self, data: &FieldData, task_id: &str) -> Option<usize> {
        let category = self.current_category();
        let checklist = data.checklist(task_id)?;
        checklist
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.category == category)
            .nth(self.selected)
            .map(|(index, _)| index)
    }

    fn switch_category(&mut self, forward: bool) {
        let len = ChecklistCategory::all().len();
        self.category = if forward {
            (self.category + 1) % len
        } else {
            (self.category + len - 1) % len
        };
        self.selected = 0;
    }
}

impl Screen for ComplianceScreen {
    fn title(&self, ctx: &ScreenContext<'_>) -> String {
        match ctx.task_id {
            Some(id) => format!("{} · {}", ctx.route.title(), id),
            None => ctx.route.title().to_string(),
        }
    }

    fn hints(&self) -> &'static str {
        if self.editing_remarks.is_some() {
            "type remarks · Enter save · Esc cancel"
        } else {
            "←→ section · ↑↓ select · Space toggle · r remarks · p photo · s submit"
        }
    }

    fn render(&self, ctx: &ScreenContext<'_>, data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let task_id = ctx.task_id.unwrap_or_default();
        let fresh;
        let checklist = match data.checklist(task_id) {
            Some(checklist) => checklist,
            None => {
                fresh = app_core::Checklist::for_task(task_id);
                &fresh
            }
        };

        let (checked, total) = checklist.progress();
        let percent = if total == 0 { 0 } else { checked * 100 / total };
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Progress ", theme.muted()),
                Span::raw(format!("{}/{} items checked ({}%)", checked, total, percent)),
            ]),
            Line::from(
                ChecklistCategory::all()
                    .into_iter()
                    .map(|category| {
                        let style = if category == self.current_category() {
                            theme.active_tab()
                        } else {
                            theme.inactive_tab()
                        };
                        Span::styled(format!(" {} ", category.label()), style)
                    })
                    .collect::<Vec<_>>(),
            ),
            Line::default(),
            heading(format!("{} Checklist", self.current_category().label()), theme),
        ];

        for (index, item) in checklist.category(self.current_category()).enumerate() {
            let selected = index == self.selected;
            lines.push(row(
                selected,
                vec![
                    Span::styled(status_label(item.status).to_string(), theme.item_status(item.status)),
                    Span::raw(format!(" {}", item.item)),
                ],
                theme,
            ));
            match (&self.editing_remarks, selected) {
                (Some(draft), true) => lines.push(Line::from(Span::styled(
                    format!("      Remarks: {}█", draft),
                    theme.selected(),
                ))),
                _ if !item.remarks.is_empty() => lines.push(Line::from(Span::styled(
                    format!("      Remarks: {}", item.remarks),
                    theme.muted(),
                ))),
                _ => {}
            }
        }
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>, data: &mut FieldData) -> ScreenUpdate {
        let Some(task_id) = ctx.task_id else {
            return ScreenUpdate::ignored();
        };
        data.checklist_mut(task_id);

        if let Some(draft) = self.editing_remarks.as_mut() {
            match key.code {
                KeyCode::Enter => {
                    let remarks = std::mem::take(draft);
                    self.editing_remarks = None;
                    if let Some(index) = self.item_index(data, task_id) {
                        data.checklist_mut(task_id).set_remarks(index, remarks);
                    }
                }
                KeyCode::Esc => self.editing_remarks = None,
                _ => {
                    edit_text(draft, &key);
                }
            }
            return ScreenUpdate::handled();
        }

        let len = data
            .checklist(task_id)
            .map_or(0, |c| c.category(self.current_category()).count());
        if move_selection(&mut self.selected, len, &key) {
            return ScreenUpdate::handled();
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.switch_category(false);
                ScreenUpdate::handled()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.switch_category(true);
                ScreenUpdate::handled()
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(index) = self.item_index(data, task_id) {
                    data.checklist_mut(task_id).cycle_status(index);
                }
                ScreenUpdate::handled()
            }
            KeyCode::Char('r') => {
                let existing = self
                    .item_index(data, task_id)
                    .and_then(|index| data.checklist(task_id)?.items().get(index))
                    .map(|item| item.remarks.clone())
                    .unwrap_or_default();
                self.editing_remarks = Some(existing);
                ScreenUpdate::handled()
            }
            KeyCode::Char('p') => ScreenUpdate::notice("Photo capture is not available in the terminal"),
            KeyCode::Char('s') => {
                let complete = data.checklist(task_id).is_some_and(|c| c.is_complete());
                tracing::info!(task_id, complete, "compliance checklist submitted");
                ScreenUpdate::command(ShellCommand::back())
                    .with_notice("Compliance checklist submitted successfully!")
            }
            _ => ScreenUpdate::ignored(),
        }
    }

    fn captures_input(&self) -> bool {
        self.editing_remarks.is_some()
    }
}

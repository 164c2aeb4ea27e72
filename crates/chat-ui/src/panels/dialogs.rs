//! Blocking dialogs: notice, yes/no confirmation, message edit.
//! At most one is drawn per frame, notice first.

use egui::{self, Align2, RichText, Vec2};
use crate::state::{UiAction, UiState};
use crate::theme::{self, ACCENT, ERROR, PANEL_ROUNDING};

pub fn dialogs(ctx: &egui::Context, state: &mut UiState) -> Option<UiAction> {
    if state.notice.is_some() {
        notice_dialog(ctx, state);
        None
    } else if state.confirm.is_some() {
        confirm_dialog(ctx, state)
    } else if state.editing.is_some() {
        edit_dialog(ctx, state)
    } else {
        None
    }
}

fn centered(title: &str) -> egui::Window<'static> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
}

fn notice_dialog(ctx: &egui::Context, state: &mut UiState) {
    let Some(message) = state.notice.clone() else {
        return;
    };
    let mut dismissed = false;

    centered("Notice").show(ctx, |ui| {
        let p = theme::current(ui);
        ui.label(RichText::new(&message).color(p.text_primary));
        ui.add_space(8.0);
        if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            dismissed = true;
        }
    });

    if dismissed {
        state.notice = None;
    }
}

fn confirm_dialog(ctx: &egui::Context, state: &mut UiState) -> Option<UiAction> {
    let confirm = state.confirm?;
    let mut answer = None;

    centered("Confirm").show(ctx, |ui| {
        let p = theme::current(ui);
        ui.label(RichText::new(confirm.prompt()).color(p.text_primary));
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(RichText::new("Yes").color(ERROR)).clicked() {
                answer = Some(true);
            }
            if ui.button("Cancel").clicked() {
                answer = Some(false);
            }
        });
    });

    match answer {
        Some(yes) => {
            state.confirm = None;
            yes.then(|| confirm.action())
        }
        None => None,
    }
}

fn edit_dialog(ctx: &egui::Context, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;
    let mut close = false;

    centered("Edit message").show(ctx, |ui| {
        let p = theme::current(ui);
        let Some(draft) = state.editing.as_mut() else {
            return;
        };
        ui.add(
            egui::TextEdit::multiline(&mut draft.text)
                .desired_width(320.0)
                .desired_rows(3),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let save = ui.add(
                egui::Button::new(RichText::new("Save").color(p.text_primary))
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING),
            );
            if save.clicked() {
                // Blank edits leave the message unchanged
                if !draft.text.trim().is_empty() {
                    action = Some(UiAction::EditMessage {
                        index: draft.index,
                        text: draft.text.clone(),
                    });
                }
                close = true;
            }
            if ui.button("Cancel").clicked() {
                close = true;
            }
        });
    });

    if close {
        state.editing = None;
    }
    action
}

//! Sidebar: new chat, history search, conversation list, account and
//! theme controls.

use egui::{self, RichText, ScrollArea, Vec2};
use chat_core::view::{ChatView, HistoryItem};
use crate::state::{AccountModal, UiAction, UiState};
use crate::theme::{self, Palette, ACCENT, ERROR, PANEL_PADDING, PANEL_ROUNDING};

pub fn sidebar_panel(ui: &mut egui::Ui, view: &ChatView, state: &mut UiState) -> Option<UiAction> {
    let p = theme::current(ui);
    let mut action = None;
    let enabled = !state.is_blocked();

    egui::Frame::default()
        .fill(p.bg_secondary)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                let new_chat = ui.add(
                    egui::Button::new(RichText::new("+ New chat").color(p.text_primary).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(ui.available_width(), 28.0)),
                );
                if new_chat.clicked() {
                    action = Some(UiAction::NewChat);
                }

                ui.add_space(6.0);
                ui.add(
                    egui::TextEdit::singleline(&mut state.search_filter)
                        .hint_text("Search history...")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(6.0);

                let list_height = ui.available_height() - 70.0;
                ScrollArea::vertical()
                    .max_height(list_height.max(0.0))
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for item in view.visible_history() {
                            if let Some(a) = history_row(ui, p, item) {
                                action = Some(a);
                            }
                        }
                    });

                ui.separator();

                ui.horizontal(|ui| {
                    let account_label = if state.logged_in { "👤 Profile" } else { "🔑 Log in" };
                    if ui.button(account_label).clicked() {
                        let modal = if state.logged_in {
                            AccountModal::Profile
                        } else {
                            AccountModal::Login
                        };
                        state.open_account_modal(modal);
                    }

                    let theme_label = if state.dark_mode { "☀" } else { "🌙" };
                    if ui.button(theme_label).on_hover_text("Toggle theme").clicked() {
                        action = Some(UiAction::ToggleTheme);
                    }

                    if ui.button("⚙").on_hover_text("Settings").clicked() {
                        state.show_settings = !state.show_settings;
                    }
                });
            });
        });

    action
}

fn history_row(ui: &mut egui::Ui, p: &Palette, item: &HistoryItem) -> Option<UiAction> {
    let mut action = None;
    let fill = if item.active { p.bg_surface } else { p.bg_secondary };

    egui::Frame::default()
        .fill(fill)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let delete_width = 24.0;
                let title = RichText::new(&item.title).color(if item.active {
                    p.text_primary
                } else {
                    p.text_secondary
                });
                let row = ui.add_sized(
                    Vec2::new(ui.available_width() - delete_width, 20.0),
                    egui::Button::new(title).frame(false).truncate(),
                );
                if row.clicked() {
                    action = Some(UiAction::SelectConversation(item.index));
                }
                if ui
                    .add(egui::Button::new(RichText::new("✕").color(ERROR)).small().frame(false))
                    .on_hover_text("Delete conversation")
                    .clicked()
                {
                    action = Some(UiAction::DeleteConversation(item.index));
                }
            });
        });

    action
}

//! Chat panel: the active conversation and the input row.
//! Edit and delete buttons only stage a dialog in `UiState`; the
//! dialog itself emits the action.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chat_core::view::{ChatView, MessageView, PlaceholderView};
use chat_types::message::Sender;
use crate::state::{Confirm, EditDraft, UiAction, UiState};
use crate::theme::{self, Palette, ACCENT, ERROR, PANEL_PADDING, PANEL_ROUNDING, SUCCESS, WARNING};

/// Render the chat panel. Returns the user's action, if any.
pub fn chat_panel(ui: &mut egui::Ui, view: &ChatView, state: &mut UiState) -> Option<UiAction> {
    let p = theme::current(ui);
    let mut action = None;
    let enabled = !state.is_blocked();

    egui::Frame::default()
        .fill(p.bg_primary)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                        if view.revealing
                            && ui.add_enabled(enabled, egui::Button::new("■ Stop")).clicked()
                        {
                            action = Some(UiAction::StopReveal);
                        }
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if let Some(greeting) = view.greeting {
                            ui.vertical_centered(|ui| {
                                ui.add_space(40.0);
                                ui.heading(RichText::new(greeting).color(p.text_secondary).size(28.0));
                            });
                        }

                        for message in &view.messages {
                            render_message(ui, p, message, enabled, state);
                            ui.add_space(4.0);
                        }

                        for placeholder in &view.placeholders {
                            render_placeholder(ui, p, placeholder);
                            ui.add_space(4.0);
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(enabled, input);

                    let send_enabled = enabled && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(p.text_primary))
                            .fill(if send_enabled { ACCENT } else { p.bg_surface })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if enabled && (enter || send_btn.clicked()) {
                        if let Some(text) = state.take_input() {
                            action = Some(UiAction::Send(text));
                        }
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(
    ui: &mut egui::Ui,
    p: &Palette,
    message: &MessageView,
    enabled: bool,
    state: &mut UiState,
) {
    let (label_color, bg) = match message.sender {
        Sender::User => (ACCENT, p.user_bubble),
        Sender::Bot => (SUCCESS, p.bot_bubble),
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message.sender.label()).color(label_color).strong().small());
                if message.editable {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.add_enabled(enabled, egui::Button::new("🗑").small()).clicked() {
                            state.confirm = Some(Confirm::DeleteMessage(message.index));
                        }
                        if ui.add_enabled(enabled, egui::Button::new("✏").small()).clicked() {
                            state.editing = Some(EditDraft {
                                index: message.index,
                                text: message.lines.join("\n"),
                            });
                        }
                    });
                }
            });
            for line in &message.lines {
                ui.label(RichText::new(line).color(p.text_primary));
            }
        });
}

fn render_placeholder(ui: &mut egui::Ui, p: &Palette, placeholder: &PlaceholderView) {
    let (bg, color) = if placeholder.failed {
        (p.error_bubble, ERROR)
    } else {
        (p.bot_bubble, p.text_secondary)
    };

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(Sender::Bot.label()).color(SUCCESS).strong().small());
            ui.label(RichText::new(&placeholder.text).color(color).italics());
        });
}

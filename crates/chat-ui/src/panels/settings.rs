//! Settings panel: persistence mode, backend address, reply animation.
//! Edits stay in the caller's draft until Save is clicked.

use egui::{self, RichText, Vec2};
use chat_types::config::{ClientConfig, PersistenceMode};
use crate::theme::{self, ACCENT, ERROR, PANEL_PADDING, PANEL_ROUNDING, SUCCESS};

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Nothing changed
    None,
    /// A field was edited in the draft
    Changed,
    /// The user clicked the explicit Save button
    SaveClicked,
}

/// Save feedback passed in from the app layer
#[derive(Debug, Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Render the settings panel. Returns an action for the caller to handle.
/// A disabled panel (a dialog is open) is drawn greyed out and never
/// reports an action.
pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut ClientConfig,
    save_feedback: Option<&SaveFeedback>,
    enabled: bool,
) -> SettingsAction {
    let p = theme::current(ui);
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(p.bg_secondary)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| ui.add_enabled_ui(enabled, |ui| {
            ui.heading(RichText::new("Settings").color(p.text_primary));
            ui.separator();

            // ── Storage Section ──────────────────────────────
            ui.label(RichText::new("Conversations").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Saved in").color(p.text_secondary).small());
            egui::ComboBox::from_id_salt("persistence_mode")
                .selected_text(config.persistence.label())
                .show_ui(ui, |ui| {
                    for mode in PersistenceMode::all() {
                        if ui
                            .selectable_value(&mut config.persistence, *mode, mode.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new(persistence_description(config.persistence))
                    .color(p.text_secondary)
                    .small()
                    .italics(),
            );

            ui.add_space(4.0);

            ui.label(RichText::new("Server address (optional)").color(p.text_secondary).small());
            if ui
                .add(egui::TextEdit::singleline(&mut config.api_base).hint_text("same origin"))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Title length").color(p.text_secondary).small());
            if ui
                .add(egui::Slider::new(&mut config.title_max_chars, 10..=80))
                .changed()
            {
                changed = true;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Reply Section ────────────────────────────────
            ui.label(RichText::new("Replies").color(ACCENT).strong());
            ui.add_space(2.0);

            if ui
                .checkbox(&mut config.typing.enabled, "Type out replies")
                .changed()
            {
                changed = true;
            }

            ui.add_enabled_ui(config.typing.enabled, |ui| {
                ui.label(RichText::new("Characters per tick").color(p.text_secondary).small());
                if ui
                    .add(egui::Slider::new(&mut config.typing.chars_per_tick, 1..=20))
                    .changed()
                {
                    changed = true;
                }
                ui.label(RichText::new("Tick (ms)").color(p.text_secondary).small());
                if ui
                    .add(egui::Slider::new(&mut config.typing.tick_ms, 5..=200))
                    .changed()
                {
                    changed = true;
                }
            });

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(
                        RichText::new("Save Settings")
                            .color(p.text_primary)
                            .strong(),
                    )
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(
                        RichText::new(&fb.message)
                            .color(color)
                            .small(),
                    );
                }
            });
        }));

    if !enabled {
        SettingsAction::None
    } else if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

pub fn persistence_description(mode: PersistenceMode) -> &'static str {
    match mode {
        PersistenceMode::Remote => "Stored on the server. Requires logging in.",
        PersistenceMode::Local => "Stored in this browser's local storage. No account needed.",
    }
}

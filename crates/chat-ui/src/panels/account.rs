//! Account modals: login / signup form and the profile window.

use egui::{self, Align2, RichText, Vec2};
use crate::state::{AccountModal, Confirm, UiAction, UiState};
use crate::theme::{self, ACCENT, ERROR, PANEL_ROUNDING};

/// Draw whichever account modal is open. Returns the submitted action.
pub fn account_modal(ctx: &egui::Context, state: &mut UiState) -> Option<UiAction> {
    let modal = state.account_modal?;
    let mut open = true;
    let mut action = None;
    let enabled = !state.is_blocked();

    let title = match modal {
        AccountModal::Login => "Log in",
        AccountModal::Signup => "Sign up",
        AccountModal::Profile => "Profile",
    };

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                action = match modal {
                    AccountModal::Login | AccountModal::Signup => auth_form(ui, modal, state),
                    AccountModal::Profile => profile_form(ui, state),
                };
            });
        });

    if !open {
        state.close_account_modal();
        state.account_form.clear();
    }
    action
}

fn auth_form(ui: &mut egui::Ui, modal: AccountModal, state: &mut UiState) -> Option<UiAction> {
    let p = theme::current(ui);
    let mut action = None;

    ui.horizontal(|ui| {
        if ui.selectable_label(modal == AccountModal::Login, "Log in").clicked() {
            state.open_account_modal(AccountModal::Login);
        }
        if ui.selectable_label(modal == AccountModal::Signup, "Sign up").clicked() {
            state.open_account_modal(AccountModal::Signup);
        }
    });
    ui.separator();

    ui.label(RichText::new("Username").color(p.text_secondary).small());
    ui.add(egui::TextEdit::singleline(&mut state.account_form.username).desired_width(240.0));
    ui.add_space(4.0);
    ui.label(RichText::new("Password").color(p.text_secondary).small());
    let password = ui.add(
        egui::TextEdit::singleline(&mut state.account_form.password)
            .password(true)
            .desired_width(240.0),
    );
    ui.add_space(8.0);

    let submit_label = if modal == AccountModal::Login { "Log in" } else { "Create account" };
    let submit = ui.add(
        egui::Button::new(RichText::new(submit_label).color(p.text_primary).strong())
            .fill(ACCENT)
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(240.0, 28.0)),
    );
    let enter = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if submit.clicked() || enter {
        let credentials = state.account_form.credentials();
        action = Some(if modal == AccountModal::Login {
            UiAction::Login(credentials)
        } else {
            UiAction::Signup(credentials)
        });
    }

    ui.add_space(4.0);
    if ui
        .add(egui::Button::new("Continue with Google").min_size(Vec2::new(240.0, 28.0)))
        .clicked()
    {
        action = Some(UiAction::OAuthLogin);
    }

    action
}

fn profile_form(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let p = theme::current(ui);
    let mut action = None;

    ui.label(RichText::new("New password").color(p.text_secondary).small());
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.account_form.new_password)
                .password(true)
                .desired_width(160.0),
        );
        if ui.button("Change").clicked() {
            action = Some(UiAction::ChangePassword(state.account_form.new_password.clone()));
        }
    });

    ui.add_space(8.0);
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Log out").clicked() {
            action = Some(UiAction::Logout);
        }
        if ui
            .button(RichText::new("Delete account").color(ERROR))
            .clicked()
        {
            state.confirm = Some(Confirm::DeleteAccount);
        }
    });

    action
}

use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{Contact, NewContact, SortCriterion};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::ControllerState;

const SUCCESS_BANNER_COLOR: egui::Color32 = egui::Color32::from_rgb(22, 130, 93);

pub struct ContactDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: ControllerState,
    form: ContactFormState,
    status: String,
}

#[derive(Default)]
struct ContactFormState {
    name: String,
    email: String,
    phone: String,
    message: String,
}

impl ContactFormState {
    fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.phone.trim().is_empty()
    }

    fn take_draft(&mut self) -> NewContact {
        let draft = NewContact {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        *self = Self::default();
        draft
    }
}

impl ContactDeskApp {
    pub fn bootstrap(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        // The collection is fetched once at startup; everything after that
        // is user-triggered.
        let mut status = String::new();
        dispatch_backend_command(&cmd_tx, BackendCommand::LoadContacts, &mut status);

        Self {
            cmd_tx,
            ui_rx,
            state: ControllerState::default(),
            form: ContactFormState::default(),
            status,
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply_event(event, now);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context, now: Instant) {
        egui::TopBottomPanel::top("app_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Contact Management").size(24.0).strong());
                ui.label(egui::RichText::new("Manage your contacts efficiently").weak());
            });

            let banner = self.state.notification(now).map(|n| n.message.clone());
            if let Some(message) = banner {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(message).color(SUCCESS_BANNER_COLOR).strong());
                    if ui.small_button("✕").clicked() {
                        self.state.dismiss_notification();
                    }
                });
            }

            if !self.status.is_empty() {
                ui.colored_label(ui.visuals().warn_fg_color, &self.status);
            }
            ui.add_space(6.0);
        });
    }

    fn show_form_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("contact_form_panel")
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Add New Contact").size(18.0).strong());
                ui.add_space(8.0);

                ui.label("Name");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.name)
                        .id_salt("form_name")
                        .hint_text("Full name"),
                );
                ui.add_space(4.0);
                ui.label("Email");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.email)
                        .id_salt("form_email")
                        .hint_text("name@example.com"),
                );
                ui.add_space(4.0);
                ui.label("Phone");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.phone)
                        .id_salt("form_phone")
                        .hint_text("555-0100"),
                );
                ui.add_space(4.0);
                ui.label("Message (optional)");
                ui.add(
                    egui::TextEdit::multiline(&mut self.form.message)
                        .id_salt("form_message")
                        .desired_rows(3),
                );

                ui.add_space(10.0);
                let submittable = self.form.is_submittable();
                if ui
                    .add_enabled(submittable, egui::Button::new("Add Contact"))
                    .clicked()
                {
                    let draft = self.form.take_draft();
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::CreateContact { draft },
                        &mut self.status,
                    );
                }
                if !submittable {
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Name, email and phone are required.")
                            .weak()
                            .size(12.0),
                    );
                }
            });
    }

    fn show_contact_list(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Contacts ({})", self.state.contact_count()))
                        .size(18.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut sort_by = self.state.sort_by();
                    egui::ComboBox::from_id_salt("contact_sort")
                        .selected_text(sort_by.label())
                        .show_ui(ui, |ui| {
                            for criterion in SortCriterion::ALL {
                                ui.selectable_value(&mut sort_by, criterion, criterion.label());
                            }
                        });
                    if sort_by != self.state.sort_by() {
                        self.state.set_sort(sort_by);
                    }
                });
            });
            ui.separator();

            let view = self.state.sorted_view();
            if view.is_empty() {
                ui.add_space(48.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("No contacts yet. Add your first contact!")
                            .weak()
                            .size(15.0),
                    );
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for contact in &view {
                        self.show_contact_entry(ui, contact);
                        ui.add_space(6.0);
                    }
                });
        });
    }

    fn show_contact_entry(&mut self, ui: &mut egui::Ui, contact: &Contact) {
        egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(avatar_initial(&contact.name))
                            .size(22.0)
                            .strong(),
                    );
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&contact.name).size(16.0).strong());
                        ui.label(
                            egui::RichText::new(format_created_at(contact))
                                .weak()
                                .size(12.0),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui
                            .button("🗑 Delete")
                            .on_hover_text("Delete contact")
                            .clicked()
                        {
                            self.state.request_delete(contact.id.clone());
                        }
                    });
                });

                ui.horizontal(|ui| {
                    ui.label("📧");
                    ui.hyperlink_to(&contact.email, format!("mailto:{}", contact.email));
                });
                ui.horizontal(|ui| {
                    ui.label("📞");
                    ui.hyperlink_to(&contact.phone, format!("tel:{}", contact.phone));
                });
                if let Some(message) = contact.message_text() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("\"{message}\""))
                            .italics()
                            .weak(),
                    );
                }
            });
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        if self.state.pending_delete().is_none() {
            return;
        }

        egui::Window::new("Delete contact")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this contact?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        if let Some(id) = self.state.confirm_delete() {
                            dispatch_backend_command(
                                &self.cmd_tx,
                                BackendCommand::DeleteContact { id },
                                &mut self.status,
                            );
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        self.state.cancel_delete();
                    }
                });
            });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.alert().map(str::to_string) else {
            return;
        };

        egui::Window::new("Something went wrong")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.state.dismiss_alert();
                }
            });
    }
}

impl eframe::App for ContactDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);
        self.state.tick(now);

        self.show_header(ctx, now);
        self.show_form_panel(ctx);
        self.show_contact_list(ctx);
        self.show_delete_confirmation(ctx);
        self.show_alert(ctx);

        // Repaint on a short deadline so the notification expiry is
        // observed even without input events.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|first| first.to_uppercase().to_string())
        .unwrap_or_default()
}

fn format_created_at(contact: &Contact) -> String {
    contact
        .created_at
        .with_timezone(&Local)
        .format("%b %e, %Y %I:%M %p")
        .to_string()
}

//! egui rendering for the contact desk: panels, form, list, dialogs.

pub mod app;

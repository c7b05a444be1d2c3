//! Runtime bridge between the UI command queue and the contact service.
//!
//! The worker thread owns a tokio runtime and the HTTP client; commands are
//! processed one at a time, so at most one request is in flight per user
//! action and no cancellation or reordering happens here.

use std::{sync::Arc, thread};

use client_core::{ContactApi, ContactClient};
use crossbeam_channel::{Receiver, Sender};
use tracing::error;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(api_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::LoadFailed {
                    reason: format!("backend worker startup failure: {err}"),
                });
                return;
            }
        };

        runtime.block_on(async move {
            let client: Arc<dyn ContactApi> = Arc::new(ContactClient::new(api_url));
            run_worker(client, cmd_rx, ui_tx).await;
        });
    });
}

async fn run_worker(
    client: Arc<dyn ContactApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::LoadContacts => match client.list_contacts().await {
                Ok(contacts) => {
                    let _ = ui_tx.try_send(UiEvent::ContactsLoaded(contacts));
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::LoadFailed {
                        reason: err.to_string(),
                    });
                }
            },
            BackendCommand::CreateContact { draft } => match client.create_contact(&draft).await {
                Ok(contact) => {
                    let _ = ui_tx.try_send(UiEvent::ContactCreated(contact));
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::CreateContact,
                        &err,
                    )));
                }
            },
            BackendCommand::DeleteContact { id } => match client.delete_contact(&id).await {
                Ok(()) => {
                    let _ = ui_tx.try_send(UiEvent::ContactDeleted(id));
                }
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                        UiErrorContext::DeleteContact,
                        &err,
                    )));
                }
            },
        }
    }
}

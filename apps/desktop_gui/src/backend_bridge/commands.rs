//! Backend commands queued from UI to backend worker.

use shared::domain::{ContactId, NewContact};

pub enum BackendCommand {
    LoadContacts,
    CreateContact { draft: NewContact },
    DeleteContact { id: ContactId },
}

use crate::command::ActionId;

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Path last reported to the routing layer.
    pub current_path: String,
    pub debug_status_visible: bool,
    pub status: StatusState,
}

impl AppState {
    pub(crate) fn report(&mut self, id: ActionId, message: impl Into<String>) {
        self.status.last_action_id = Some(id);
        self.status.message = message.into();
    }
}

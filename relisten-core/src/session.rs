use parking_lot::Mutex;
use std::sync::Arc;

/// Shared per-session context: the display name of the file currently
/// being played.
///
/// Handed explicitly to both the controller (which writes it on file
/// selection) and the checkpoint plugin (which reads it when recording a
/// note), instead of living in a module-level cell. Cloning shares the
/// same underlying slot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    file_name: Arc<Mutex<Option<String>>>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file_name(&self, name: impl Into<String>) {
        *self.file_name.lock() = Some(name.into());
    }

    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.file_name.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_slot() {
        let session = SessionContext::new();
        assert_eq!(session.file_name(), None);

        let writer = session.clone();
        writer.set_file_name("lesson.mp3");
        assert_eq!(session.file_name(), Some("lesson.mp3".to_string()));
    }
}

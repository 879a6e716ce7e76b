use parking_lot::RwLock;
use std::sync::Arc;

/// Board settings drawer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub drawer_open: bool,
    /// Columns can only be dragged when this is on.
    pub can_move_columns: bool,
}

impl Settings {
    pub fn open(self) -> Self {
        Self {
            drawer_open: true,
            ..self
        }
    }

    pub fn close(self) -> Self {
        Self {
            drawer_open: false,
            ..self
        }
    }

    pub fn toggle_column_movement(self) -> Self {
        Self {
            can_move_columns: !self.can_move_columns,
            ..self
        }
    }
}

/// Shared handle to the current settings snapshot.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn snapshot(&self) -> Settings {
        *self.inner.read()
    }

    pub fn update(&self, f: impl FnOnce(Settings) -> Settings) -> Settings {
        let mut guard = self.inner.write();
        *guard = f(*guard);
        *guard
    }

    pub fn can_move_columns(&self) -> bool {
        self.inner.read().can_move_columns
    }

    pub fn toggle_column_movement(&self) -> Settings {
        self.update(Settings::toggle_column_movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_movement_disabled_by_default() {
        assert!(!SettingsStore::default().can_move_columns());
    }

    #[test]
    fn test_toggle_is_shared() {
        let store = SettingsStore::default();
        let handle = store.clone();

        store.toggle_column_movement();
        assert!(handle.can_move_columns());

        handle.toggle_column_movement();
        assert!(!store.can_move_columns());
    }

    #[test]
    fn test_drawer_does_not_touch_movement() {
        let settings = Settings::default().toggle_column_movement().open();
        assert!(settings.drawer_open);
        assert!(settings.can_move_columns);
        assert!(!settings.close().drawer_open);
    }
}

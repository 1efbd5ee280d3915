use std::fmt::{Display, Formatter};

use crate::storage::PreferenceStore;

pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark { ThemeMode::Dark } else { ThemeMode::Light }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label of the toggle button: the mode a press switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Dark",
            ThemeMode::Dark => "Light",
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(ThemeMode)>;

/// The persisted light/dark flag, shared with views by reference.
pub struct ThemePreference {
    store: Box<dyn PreferenceStore>,
    mode: ThemeMode,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl ThemePreference {
    /// Reads the stored flag once. Anything other than a stored JSON boolean
    /// leaves the default light mode in place.
    pub fn initialize(store: Box<dyn PreferenceStore>) -> Self {
        let mode = match store.read(DARK_MODE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<bool>(raw.trim()) {
                Ok(dark) => ThemeMode::from_dark(dark),
                Err(err) => {
                    tracing::warn!(value = %raw, error = %err, "ignoring malformed theme preference");
                    ThemeMode::default()
                }
            },
            Ok(None) => ThemeMode::default(),
            Err(err) => {
                tracing::warn!(error = %err, "theme preference unavailable, using default");
                ThemeMode::default()
            }
        };

        tracing::debug!(%mode, "theme initialised");
        Self {
            store,
            mode,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    /// Flips the mode, stores it and notifies listeners. A failed write is
    /// logged and the in-memory mode still changes.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.mode.toggled();
        match serde_json::to_string(&next.is_dark()) {
            Ok(encoded) => {
                if let Err(err) = self.store.write(DARK_MODE_KEY, &encoded) {
                    tracing::warn!(error = %err, "failed to persist theme preference");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to encode theme preference"),
        }

        self.mode = next;
        for (_, listener) in &mut self.listeners {
            listener(next);
        }
        next
    }

    pub fn subscribe(&mut self, listener: impl FnMut(ThemeMode) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

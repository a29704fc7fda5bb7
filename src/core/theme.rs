use crate::domain::model::ThemePreference;
use crate::domain::ports::{FormView, PreferenceStore, SystemThemeProbe};

/// Storage key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Owns the light/dark preference and reflects it onto the view.
pub struct ThemeManager {
    store: Box<dyn PreferenceStore>,
    probe: Box<dyn SystemThemeProbe>,
    current: ThemePreference,
}

impl ThemeManager {
    pub fn new(store: Box<dyn PreferenceStore>, probe: Box<dyn SystemThemeProbe>) -> Self {
        Self {
            store,
            probe,
            current: ThemePreference::Light,
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// 讀取已儲存的偏好；沒有時依系統設定
    pub fn initialize_theme<V: FormView + ?Sized>(&mut self, view: &mut V) -> ThemePreference {
        // 空字串視同未設定
        let stored = match self.store.get(THEME_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("⚠️ Could not read theme preference: {}", e);
                None
            }
        };

        let is_dark = match stored {
            Some(value) => {
                tracing::debug!("Using stored theme preference: {}", value);
                ThemePreference::from_stored(&value).is_dark()
            }
            None => {
                let prefers_dark = self.probe.prefers_dark();
                tracing::debug!("No stored theme, system prefers dark: {}", prefers_dark);
                prefers_dark
            }
        };

        self.apply_theme(view, is_dark);
        self.current
    }

    pub fn apply_theme<V: FormView + ?Sized>(&mut self, view: &mut V, is_dark: bool) {
        self.current = ThemePreference::from_is_dark(is_dark);
        view.set_root_dark(is_dark);
        view.set_theme_toggle(is_dark);
    }

    /// Persists the new choice, then applies it. Write failures are only logged.
    pub fn on_toggle_changed<V: FormView + ?Sized>(&mut self, view: &mut V, is_dark: bool) {
        let preference = ThemePreference::from_is_dark(is_dark);
        if let Err(e) = self.store.set(THEME_KEY, preference.as_str()) {
            tracing::warn!("⚠️ Could not save theme preference: {}", e);
        }
        self.apply_theme(view, is_dark);
        tracing::info!("🎨 Theme switched to {}", preference.as_str());
    }
}

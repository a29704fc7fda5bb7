// Adapters layer: concrete implementations for external systems (storage, system theme, presentation).

pub mod storage;
pub mod system_theme;
pub mod view;

pub use storage::{JsonFilePreferenceStore, MemoryPreferenceStore};
pub use system_theme::{DarkLightProbe, FixedThemeProbe};
pub use view::{MemoryView, TerminalView};

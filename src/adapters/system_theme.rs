use crate::domain::ports::SystemThemeProbe;

/// Asks the desktop environment through `dark-light`. Detection errors read as light.
#[derive(Debug, Clone, Copy, Default)]
pub struct DarkLightProbe;

impl SystemThemeProbe for DarkLightProbe {
    fn prefers_dark(&self) -> bool {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => true,
            Ok(_) => false,
            Err(e) => {
                tracing::debug!("System theme detection failed: {:?}", e);
                false
            }
        }
    }
}

/// Always answers the same; for tests and headless environments.
#[derive(Debug, Clone, Copy)]
pub struct FixedThemeProbe(pub bool);

impl SystemThemeProbe for FixedThemeProbe {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

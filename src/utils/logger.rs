use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines for interactive use.
    Compact,
    /// One JSON object per line, for log collectors.
    Json,
}

// reqwest/hyper 在 debug 下很吵，只留警告
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "leave_form=debug,reqwest=info,hyper=warn,warn"
    } else {
        "leave_form=info,reqwest=warn,hyper=warn,warn"
    }
}

/// `RUST_LOG` overrides the built-in directives when set.
fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let registry = tracing_subscriber::registry().with(build_filter(verbose));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => registry
            .with(layer.with_target(verbose).compact())
            .try_init(),
        LogFormat::Json => registry
            .with(layer.json().with_current_span(false))
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Logger already installed, keeping the existing one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_quiet_http_stack() {
        assert!(default_directives(false).starts_with("leave_form=info"));
        assert!(default_directives(true).starts_with("leave_form=debug"));
        for verbose in [false, true] {
            assert!(default_directives(verbose).contains("hyper=warn"));
            assert!(EnvFilter::try_new(default_directives(verbose)).is_ok());
        }
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logger(LogFormat::Compact, false);
        init_logger(LogFormat::Json, true);
    }
}

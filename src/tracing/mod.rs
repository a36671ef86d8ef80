use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub enum Config {
    Console(ConsoleConfig),
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::Console(ConsoleConfig::from_env()?))
    }

    pub fn install(self) -> anyhow::Result<TracingProvider> {
        match self {
            Self::Console(inner) => inner.install(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    #[default]
    Full,
    Compact,
}

impl std::str::FromStr for ConsoleFormat {
    type Err = UnknownConsoleFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            other => Err(UnknownConsoleFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown console format {0:?}, expected \"full\" or \"compact\"")]
pub struct UnknownConsoleFormat(String);

pub struct ConsoleConfig {
    color: bool,
    format: ConsoleFormat,
}

impl ConsoleConfig {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            color: crate::with_env_as_or("TRACING_CONSOLE_COLOR", true)?,
            format: crate::with_env_as_or("TRACING_CONSOLE_FORMAT", ConsoleFormat::Full)?,
        })
    }

    fn filter() -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .with_env_var("TRACING_LEVEL")
            .from_env_lossy()
    }

    fn install(self) -> anyhow::Result<TracingProvider> {
        let registry = tracing_subscriber::registry().with(Self::filter());
        match self.format {
            ConsoleFormat::Full => registry
                .with(tracing_subscriber::fmt::layer().with_ansi(self.color))
                .try_init()?,
            ConsoleFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_ansi(self.color),
                )
                .try_init()?,
        }
        Ok(TracingProvider::Console)
    }
}

pub enum TracingProvider {
    Console,
}

impl TracingProvider {
    pub async fn shutdown(self) {}
}

#[cfg(test)]
mod tests {
    use super::ConsoleFormat;

    #[test]
    fn should_parse_console_format() {
        assert_eq!("full".parse::<ConsoleFormat>().unwrap(), ConsoleFormat::Full);
        assert_eq!(
            "Compact".parse::<ConsoleFormat>().unwrap(),
            ConsoleFormat::Compact
        );
        assert!("json".parse::<ConsoleFormat>().is_err());
    }
}

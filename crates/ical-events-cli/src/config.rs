//! Site configuration.
//!
//! Everything about a listing lives in one YAML file: the calendar to read,
//! the site's title and social metadata, the date window, and where to
//! write the page. Unknown keys are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ical_events_core::FilterCriteria;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default output path for the generated page.
pub const DEFAULT_OUTPUT_FILE: &str = "./events/index.html";

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config file: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("config file must contain a YAML mapping")]
    NotAMapping,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for one generated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Calendar URL or file path.
    pub calendar: String,

    /// Site identity and social metadata.
    pub site: SiteConfig,

    /// Date window and count limits.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Extra page metadata.
    #[serde(default)]
    pub meta: MetaConfig,

    /// JSON-LD settings.
    #[serde(default)]
    pub structured_data: StructuredDataConfig,

    /// Where to write the page.
    #[serde(default)]
    pub output: OutputConfig,

    /// Cloudflare Pages project to deploy the output directory to.
    #[serde(default)]
    pub wrangler_pages_project: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Link target for the "Back to site" header link.
    #[serde(default)]
    pub homepage_url: Option<String>,
    /// X/Twitter handle without the leading `@`.
    #[serde(default)]
    pub x_username: Option<String>,
}

/// Filter settings as written in the file; dates default at run time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// First day to list; defaults to today.
    pub start_date: Option<NaiveDate>,
    /// Last day to list; defaults to one year after today.
    pub end_date: Option<NaiveDate>,
    /// Cap on the number of listed events.
    pub max_events: Option<usize>,
}

impl FiltersConfig {
    /// Resolves the start date against `today`.
    ///
    /// The end date is left unset when not configured so the pipeline
    /// computes the one-year default from the same `today`.
    pub fn to_criteria(&self, today: NaiveDate) -> FilterCriteria {
        FilterCriteria {
            start_date: self.start_date.unwrap_or(today),
            end_date: self.end_date,
            max_events: self.max_events,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Image for Open Graph and Twitter cards.
    pub image: Option<String>,
    /// Extra `<meta name=… content=…>` tags.
    pub custom: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredDataConfig {
    pub organization: Option<OrganizationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl Config {
    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(ConfigError::Yaml)?;
        if !value.is_mapping() {
            return Err(ConfigError::NotAMapping);
        }

        let config: Self =
            serde_yaml::from_value(value).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks constraints the types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calendar.trim().is_empty() {
            return Err(ConfigError::Invalid("calendar must not be empty".to_string()));
        }

        if let (Some(start), Some(end)) = (self.filters.start_date, self.filters.end_date) {
            if end < start {
                return Err(ConfigError::Invalid(format!(
                    "filters.end_date ({}) is before filters.start_date ({})",
                    end, start
                )));
            }
        }

        if self
            .wrangler_pages_project
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "wrangler_pages_project must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Loads configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let config = Config::from_yaml(&content)?;
    debug!(path = %path.display(), calendar = %config.calendar, "Loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
calendar: tests/fixtures/sample.ics
site:
  title: Test Events
  description: A test event listing
  homepage_url: https://example.com
  x_username: testuser
filters:
  start_date: 2026-01-01
  end_date: 2026-12-31
  max_events: 50
meta:
  image: https://example.com/og-image.png
  custom:
    author: Test Author
structured_data:
  organization:
    name: Test Org
    url: https://example.com
    logo: https://example.com/logo.png
output:
  file: ./public/index.html
"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    mod parsing {
        use super::*;

        #[test]
        fn full_config() {
            let config = Config::from_yaml(SAMPLE).unwrap();
            assert_eq!(config.calendar, "tests/fixtures/sample.ics");
            assert_eq!(config.site.title, "Test Events");
            assert_eq!(config.site.description, "A test event listing");
            assert_eq!(config.site.homepage_url.as_deref(), Some("https://example.com"));
            assert_eq!(config.site.x_username.as_deref(), Some("testuser"));
            assert_eq!(config.filters.start_date, Some(date(2026, 1, 1)));
            assert_eq!(config.filters.end_date, Some(date(2026, 12, 31)));
            assert_eq!(config.filters.max_events, Some(50));
            assert_eq!(
                config.meta.image.as_deref(),
                Some("https://example.com/og-image.png")
            );
            assert_eq!(config.meta.custom["author"], "Test Author");
            let org = config.structured_data.organization.unwrap();
            assert_eq!(org.name, "Test Org");
            assert_eq!(org.logo.as_deref(), Some("https://example.com/logo.png"));
            assert_eq!(config.output.file, PathBuf::from("./public/index.html"));
            assert!(config.wrangler_pages_project.is_none());
        }

        #[test]
        fn defaults() {
            let config = Config::from_yaml(
                "calendar: test.ics\nsite:\n  title: Minimal\n  description: Minimal test\n",
            )
            .unwrap();
            assert_eq!(config.output.file, PathBuf::from(DEFAULT_OUTPUT_FILE));
            assert!(config.filters.start_date.is_none());
            assert!(config.filters.end_date.is_none());
            assert!(config.filters.max_events.is_none());
            assert!(config.meta.image.is_none());
            assert!(config.meta.custom.is_empty());
            assert!(config.structured_data.organization.is_none());
            assert!(config.site.homepage_url.is_none());
        }

        #[test]
        fn ignores_unknown_keys() {
            let config = Config::from_yaml(
                "calendar: test.ics\ntheme: tron\nsite:\n  title: T\n  description: D\n  extra: 1\n",
            )
            .unwrap();
            assert_eq!(config.site.title, "T");
        }

        #[test]
        fn reads_deploy_project() {
            let config = Config::from_yaml(
                "calendar: test.ics\nsite:\n  title: T\n  description: D\nwrangler_pages_project: my-events\n",
            )
            .unwrap();
            assert_eq!(config.wrangler_pages_project.as_deref(), Some("my-events"));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn missing_required_fields() {
            let err = Config::from_yaml("calendar: test.ics\n").unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }

        #[test]
        fn not_a_mapping() {
            let err = Config::from_yaml("- item1\n- item2\n").unwrap_err();
            assert!(matches!(err, ConfigError::NotAMapping));
            let err = Config::from_yaml("just a string\n").unwrap_err();
            assert!(matches!(err, ConfigError::NotAMapping));
            assert!(Config::from_yaml("").is_err());
        }

        #[test]
        fn invalid_yaml() {
            let err = Config::from_yaml("site: [unclosed\n").unwrap_err();
            assert!(matches!(err, ConfigError::Yaml(_)));
        }

        #[test]
        fn empty_calendar() {
            let err = Config::from_yaml("calendar: '  '\nsite:\n  title: T\n  description: D\n")
                .unwrap_err();
            assert!(err.to_string().contains("calendar must not be empty"));
        }

        #[test]
        fn inverted_window() {
            let err = Config::from_yaml(
                "calendar: c.ics\nsite:\n  title: T\n  description: D\nfilters:\n  start_date: 2026-06-01\n  end_date: 2026-05-01\n",
            )
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }

        #[test]
        fn bad_date_and_negative_count() {
            let bad_date = "calendar: c.ics\nsite:\n  title: T\n  description: D\nfilters:\n  start_date: soon\n";
            assert!(matches!(
                Config::from_yaml(bad_date).unwrap_err(),
                ConfigError::Invalid(_)
            ));
            let negative = "calendar: c.ics\nsite:\n  title: T\n  description: D\nfilters:\n  max_events: -1\n";
            assert!(matches!(
                Config::from_yaml(negative).unwrap_err(),
                ConfigError::Invalid(_)
            ));
        }
    }

    mod loading {
        use super::*;

        #[test]
        fn from_file() {
            let file = write_temp(SAMPLE);
            let config = load_config(file.path()).unwrap();
            assert_eq!(config.site.title, "Test Events");
        }

        #[test]
        fn missing_file() {
            let err = load_config(Path::new("/nonexistent/path/config.yaml")).unwrap_err();
            assert!(matches!(err, ConfigError::NotFound { .. }));
            assert_eq!(
                err.to_string(),
                "config file not found: /nonexistent/path/config.yaml"
            );
        }

        #[test]
        fn directory_is_read_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = load_config(dir.path()).unwrap_err();
            assert!(matches!(err, ConfigError::Read { .. }));
        }
    }

    mod criteria {
        use super::*;

        #[test]
        fn start_defaults_to_today() {
            let today = date(2026, 10, 18);
            let criteria = FiltersConfig::default().to_criteria(today);
            assert_eq!(criteria.start_date, today);
            assert_eq!(criteria.end_date, None);
            assert_eq!(criteria.effective_end_date(today), date(2027, 10, 18));
        }

        #[test]
        fn explicit_values_pass_through() {
            let filters = FiltersConfig {
                start_date: Some(date(2026, 1, 1)),
                end_date: Some(date(2026, 12, 31)),
                max_events: Some(5),
            };
            let criteria = filters.to_criteria(date(2026, 10, 18));
            assert_eq!(
                criteria,
                FilterCriteria::new(date(2026, 1, 1))
                    .with_end_date(date(2026, 12, 31))
                    .with_max_events(5)
            );
        }
    }
}

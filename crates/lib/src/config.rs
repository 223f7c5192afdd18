use camino::Utf8Path;
use serde::Deserialize;

/// Which site URL the build links against. Chosen once by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Production,
    Development,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Production site root, e.g. `https://ggliv.com`.
    pub site: String,
    /// Development server root.
    pub dev_site: String,
    /// Path the blog lives under on either site; may be empty.
    pub base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: "Gabe's Blog".to_owned(),
            description: "My blog! Covers technical topics, personal updates, and whatever else strikes my fancy.".to_owned(),
            site: "https://ggliv.com".to_owned(),
            dev_site: "http://localhost:4321".to_owned(),
            base: "/blog".to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse site config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Site title must not be empty")]
    EmptyTitle,
    #[error("Invalid site URL ({site:?}): {reason}")]
    InvalidSite { site: String, reason: String },
}

/// A site root must be an absolute http(s) URL with a host and nothing
/// after the path, since post paths get appended to it.
fn check_site(site: &str) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidSite {
        site: site.to_owned(),
        reason,
    };

    let parsed = url::Url::parse(site).map_err(|err| invalid(err.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme '{}' not supported, must be http or https",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL must have a host".to_owned()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("URL must not have a query or fragment".to_owned()));
    }

    Ok(())
}

impl SiteConfig {
    pub fn from_yaml(string: &str) -> Result<Self, Error> {
        let config: SiteConfig = serde_yaml::from_str(string)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if given, otherwise falls back to the built-in site.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, Error> {
        let Some(path) = path else {
            return Ok(SiteConfig::default());
        };
        let string = std::fs::read_to_string(path)?;
        Self::from_yaml(&string)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        check_site(&self.site)?;
        check_site(&self.dev_site)
    }

    #[must_use]
    pub fn base_ref(&self, mode: Mode) -> BaseRef {
        let site = match mode {
            Mode::Production => &self.site,
            Mode::Development => &self.dev_site,
        };
        BaseRef::new(site, &self.base)
    }
}

/// Site root plus the base path posts are served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRef {
    site: String,
    base: String,
}

impl BaseRef {
    #[must_use]
    pub fn new(site: &str, base: &str) -> Self {
        BaseRef {
            site: site.trim_end_matches('/').to_owned(),
            base: base.trim_matches('/').to_owned(),
        }
    }

    /// Base path as routed by a server: `/blog`, or empty at the site root.
    #[must_use]
    pub fn base_path(&self) -> String {
        if self.base.is_empty() {
            String::new()
        } else {
            format!("/{}", self.base)
        }
    }

    /// Absolute URL of the blog root, e.g. `https://ggliv.com/blog`.
    #[must_use]
    pub fn root(&self) -> String {
        format!("{}{}", self.site, self.base_path())
    }

    /// Absolute URL of `path` under the blog root.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.root(), path.trim_start_matches('/'))
    }
}

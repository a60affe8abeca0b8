//! Site extraction profiles.
//!
//! A profile is plain data: CSS selectors and one regex per site, loaded from
//! a TOML file of `[profiles.<id>]` tables and compiled once at load time.
//! Anything missing or malformed fails the load, never a later extraction.
//!
//! ```toml
//! [profiles.example]
//! name = "Example Times"
//! article_title = "h1.headline"
//! article_content = "div.story-body p"
//! author_name = "span.byline"
//! published_time = "time"
//! published_time_regex = 'datetime="(.*?)"'
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use broadsheet_core::Error;
use figment::{
    Figment,
    providers::{Format, Toml},
};
use regex::Regex;
use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::extract::MonthNames;

/// Profile as written in configuration, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSpec {
    /// Publisher name stored on every record from this site.
    pub name: Option<String>,
    pub article_title: Option<String>,
    pub article_content: Option<String>,
    pub author_name: Option<String>,
    pub published_time: Option<String>,
    /// Regex whose first group captures the date out of the `published_time` element.
    pub published_time_regex: Option<String>,
    /// Month table override, January first.
    #[serde(default)]
    pub month_names: Option<MonthNames>,
    /// Fail extraction when the author selector matches nothing.
    #[serde(default)]
    pub require_author: bool,
}

/// Validated, compiled profile.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub id: String,
    /// Publisher name.
    pub name: String,
    pub title: Selector,
    pub content: Selector,
    pub author: Selector,
    pub published_time: Selector,
    pub published_time_regex: Regex,
    pub months: MonthNames,
    pub require_author: bool,
}

impl SiteProfile {
    /// Validate and compile a profile.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidProfile` if:
    /// - a required key is missing or blank
    /// - a selector does not parse
    /// - the date regex does not compile or has no capture group
    pub fn compile(id: &str, spec: ProfileSpec) -> Result<Self, Error> {
        let name = required(id, "name", &spec.name)?.to_string();
        let title = selector(id, "article_title", &spec.article_title)?;
        let content = selector(id, "article_content", &spec.article_content)?;
        let author = selector(id, "author_name", &spec.author_name)?;
        let published_time = selector(id, "published_time", &spec.published_time)?;

        let pattern = required(id, "published_time_regex", &spec.published_time_regex)?;
        let published_time_regex = Regex::new(pattern)
            .map_err(|e| Error::invalid_profile(id, format!("published_time_regex does not compile: {e}")))?;
        if published_time_regex.captures_len() < 2 {
            return Err(Error::invalid_profile(id, "published_time_regex needs a capture group for the date"));
        }

        Ok(Self {
            id: id.to_string(),
            name,
            title,
            content,
            author,
            published_time,
            published_time_regex,
            months: spec.month_names.unwrap_or_default(),
            require_author: spec.require_author,
        })
    }
}

fn required<'a>(id: &str, key: &str, value: &'a Option<String>) -> Result<&'a str, Error> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::invalid_profile(id, format!("missing key `{key}`"))),
    }
}

fn selector(id: &str, key: &str, value: &Option<String>) -> Result<Selector, Error> {
    let css = required(id, key, value)?;
    Selector::parse(css).map_err(|e| Error::invalid_profile(id, format!("`{key}` is not a valid selector: {e}")))
}

#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profiles: BTreeMap<String, ProfileSpec>,
}

/// All compiled profiles, keyed by site id.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: BTreeMap<String, SiteProfile>,
}

impl ProfileSet {
    /// Load and compile every profile in a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::invalid_profile(path.display().to_string(), format!("cannot read file: {e}")))?;
        let set = Self::from_toml_str(&contents)?;

        tracing::info!(path = %path.display(), profiles = set.len(), "loaded site profiles");
        Ok(set)
    }

    /// Compile profiles from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        let file: ProfileFile = Figment::from(Toml::string(toml))
            .extract()
            .map_err(|e| Error::invalid_profile("<profiles>", e.to_string()))?;

        Self::from_specs(file.profiles)
    }

    /// Compile profiles that were built in code.
    pub fn from_specs(specs: impl IntoIterator<Item = (String, ProfileSpec)>) -> Result<Self, Error> {
        let profiles = specs
            .into_iter()
            .map(|(id, spec)| SiteProfile::compile(&id, spec).map(|p| (id, p)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Self { profiles })
    }

    /// Look up a profile by site id.
    pub fn get(&self, id: &str) -> Result<&SiteProfile, Error> {
        self.profiles.get(id).ok_or_else(|| Error::ProfileNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PackagerError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagerConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub skill: SkillConfig,
    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

impl PackagerConfig {
    /// Load configuration: defaults, then a config file patch, then env overrides.
    ///
    /// An explicit path (or `SKILL_PACKAGER_CONFIG`) must exist; the per-user
    /// file under the platform config directory is optional.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("SKILL_PACKAGER_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(PackagerError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse a full configuration from TOML text, applying defaults for
    /// anything left out.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|err| PackagerError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("skill-packager/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            PackagerError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            PackagerError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.source {
            self.source.merge(patch);
        }
        if let Some(patch) = patch.skill {
            self.skill.merge(patch);
        }
        if let Some(patch) = patch.sanitize {
            self.sanitize.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_string("SKILL_PACKAGER_REPO_URL") {
            self.source.repo_url = value;
        }
        if let Some(value) = env_string("SKILL_PACKAGER_SKILL_NAME") {
            self.skill.name = value;
        }
        if let Some(value) = env_string("SKILL_PACKAGER_EXAMPLE_EXTENSION") {
            self.source.example_extension = value.trim_start_matches('.').to_string();
        }
    }

    /// Reject values the build cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.skill.name.trim().is_empty() {
            return Err(PackagerError::Config("skill.name must not be empty".to_string()));
        }
        if self.source.example_extension.trim().is_empty() {
            return Err(PackagerError::Config(
                "source.example_extension must not be empty".to_string(),
            ));
        }
        if self.source.toc_file.trim().is_empty() {
            return Err(PackagerError::Config("source.toc_file must not be empty".to_string()));
        }
        if self.source.license_files.is_empty() {
            return Err(PackagerError::Config(
                "source.license_files must name at least one file".to_string(),
            ));
        }
        self.sanitize.substitution_pairs()?;
        Ok(())
    }

    /// Default output directory: `./<skill name>`.
    pub fn default_output_path(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?.join(&self.skill.name))
    }
}

/// Where content lives inside the source repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub repo_url: String,
    /// Guide root, relative to the repository root.
    pub guide_dir: String,
    /// TOC file name inside the guide root.
    pub toc_file: String,
    /// Examples root, relative to the repository root.
    pub examples_dir: String,
    /// Extension (without dot) of example source files.
    pub example_extension: String,
    /// License file names, in lookup priority order.
    pub license_files: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/swiftlang/swift-migration-guide.git".to_string(),
            guide_dir: "Guide.docc".to_string(),
            toc_file: "MigrationGuide.md".to_string(),
            examples_dir: "Sources/Examples".to_string(),
            example_extension: "swift".to_string(),
            license_files: vec![
                "LICENSE.txt".to_string(),
                "LICENSE.md".to_string(),
                "LICENSE".to_string(),
            ],
        }
    }
}

impl SourceConfig {
    fn merge(&mut self, patch: SourcePatch) {
        if let Some(value) = patch.repo_url {
            self.repo_url = value;
        }
        if let Some(value) = patch.guide_dir {
            self.guide_dir = value;
        }
        if let Some(value) = patch.toc_file {
            self.toc_file = value;
        }
        if let Some(value) = patch.examples_dir {
            self.examples_dir = value;
        }
        if let Some(value) = patch.example_extension {
            self.example_extension = value.trim_start_matches('.').to_string();
        }
        if let Some(values) = patch.license_files {
            self.license_files = values;
        }
    }

    /// TOC path relative to the repository root.
    pub fn toc_rel_path(&self) -> PathBuf {
        Path::new(&self.guide_dir).join(&self.toc_file)
    }
}

/// Text that goes into the generated SKILL.md.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    pub name: String,
    pub description: String,
    pub title: String,
    pub intro: String,
    pub examples_intro: String,
    pub usage_notes: Vec<String>,
    pub content_attribution: String,
    pub content_license_name: String,
    pub structure_attribution: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            name: "migrating-to-swift-concurrency".to_string(),
            description: "Provides the complete Swift Concurrency Migration Guide. \
                Use when migrating to Swift 6, resolving data-race safety errors, \
                understanding Sendable and actor isolation, or incrementally adopting async/await."
                .to_string(),
            title: "Swift Concurrency Migration Guide".to_string(),
            intro: "The complete content of the Swift Concurrency Migration Guide by Apple. \
                This guide helps you migrate your code to take advantage of Swift's data-race \
                safety guarantees and the Swift 6 language mode."
                .to_string(),
            examples_intro:
                "Swift source files demonstrating migration patterns and concurrency concepts:"
                    .to_string(),
            usage_notes: vec![
                "Start with Data Race Safety to understand the core concepts".to_string(),
                "Follow the Migration Strategy for a recommended approach".to_string(),
                "Refer to Common Problems for solutions to typical issues".to_string(),
                "Use the Code Examples as reference implementations".to_string(),
            ],
            content_attribution: "copyright Apple Inc. and the Swift project authors".to_string(),
            content_license_name: "Apache 2.0 License".to_string(),
            structure_attribution: "The structure and organization of this skill (this index file) \
                is copyright Kyle Hughes, distributed under the MIT License."
                .to_string(),
        }
    }
}

impl SkillConfig {
    fn merge(&mut self, patch: SkillPatch) {
        if let Some(value) = patch.name {
            self.name = value;
        }
        if let Some(value) = patch.description {
            self.description = value;
        }
        if let Some(value) = patch.title {
            self.title = value;
        }
        if let Some(value) = patch.intro {
            self.intro = value;
        }
        if let Some(value) = patch.examples_intro {
            self.examples_intro = value;
        }
        if let Some(values) = patch.usage_notes {
            self.usage_notes = values;
        }
        if let Some(value) = patch.content_attribution {
            self.content_attribution = value;
        }
        if let Some(value) = patch.content_license_name {
            self.content_license_name = value;
        }
        if let Some(value) = patch.structure_attribution {
            self.structure_attribution = value;
        }
    }
}

/// Character substitutions applied to example destination filenames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizeConfig {
    pub substitutions: BTreeMap<String, String>,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            substitutions: BTreeMap::from([("+".to_string(), "_".to_string())]),
        }
    }
}

impl SanitizeConfig {
    fn merge(&mut self, patch: SanitizePatch) {
        if let Some(values) = patch.substitutions {
            self.substitutions = values;
        }
    }

    /// The table as `(from, to)` character pairs.
    ///
    /// Each key and value must be exactly one character, and no replacement
    /// may itself be substituted, so sanitising twice equals sanitising once.
    pub fn substitution_pairs(&self) -> Result<Vec<(char, char)>> {
        let mut pairs = Vec::with_capacity(self.substitutions.len());
        for (from, to) in &self.substitutions {
            let from_char = single_char(from).ok_or_else(|| {
                PackagerError::Config(format!(
                    "sanitize.substitutions key {from:?} must be a single character"
                ))
            })?;
            let to_char = single_char(to).ok_or_else(|| {
                PackagerError::Config(format!(
                    "sanitize.substitutions value {to:?} must be a single character"
                ))
            })?;
            pairs.push((from_char, to_char));
        }

        for (_, to) in &pairs {
            if pairs.iter().any(|(from, _)| from == to) {
                return Err(PackagerError::Config(format!(
                    "sanitize.substitutions replacement {to:?} is itself substituted"
                )));
            }
        }

        Ok(pairs)
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    source: Option<SourcePatch>,
    skill: Option<SkillPatch>,
    sanitize: Option<SanitizePatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SourcePatch {
    repo_url: Option<String>,
    guide_dir: Option<String>,
    toc_file: Option<String>,
    examples_dir: Option<String>,
    example_extension: Option<String>,
    license_files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SkillPatch {
    name: Option<String>,
    description: Option<String>,
    title: Option<String>,
    intro: Option<String>,
    examples_intro: Option<String>,
    usage_notes: Option<Vec<String>>,
    content_attribution: Option<String>,
    content_license_name: Option<String>,
    structure_attribution: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SanitizePatch {
    substitutions: Option<BTreeMap<String, String>>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

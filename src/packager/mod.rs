//! Skill generation: output preparation, registries, license, index, archive.

pub mod archive;
pub mod index;
pub mod registry;

pub use archive::{archive_path_for, create_archive};
pub use index::render_index;
pub use registry::{Registry, RegistryBuilder};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PackagerConfig;
use crate::content::{FilenameSanitizer, parse_toc_order};
use crate::error::{PackagerError, Result};
use crate::logging::BuildLog;
use crate::utils::fs::{copy_preserving, first_existing, reset_dir};

/// Output subdirectory holding guide pages.
pub const GUIDE_DIR: &str = "Guide";
/// Output subdirectory holding example sources.
pub const EXAMPLES_DIR: &str = "Examples";
/// Index file at the root of the output.
pub const INDEX_FILE: &str = "SKILL.md";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output_path: PathBuf,
    /// Do all extraction but write nothing under the output path.
    pub dry_run: bool,
}

/// What a build produced.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub skill_name: String,
    pub output_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_path: Option<PathBuf>,
    pub license_file: String,
    pub document_count: usize,
    pub example_count: usize,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_temp_dir: Option<PathBuf>,
    pub registry: Registry,
}

pub struct SkillPackager<'a> {
    config: &'a PackagerConfig,
    options: BuildOptions,
    log: &'a dyn BuildLog,
}

impl<'a> SkillPackager<'a> {
    pub fn new(config: &'a PackagerConfig, options: BuildOptions, log: &'a dyn BuildLog) -> Self {
        Self {
            config,
            options,
            log,
        }
    }

    /// Package the checkout at `repo_root`.
    pub fn build(&self, repo_root: &Path) -> Result<BuildReport> {
        let toc_path = repo_root.join(self.config.source.toc_rel_path());
        let doc_order = parse_toc_order(&toc_path)?;

        let output = self.options.output_path.as_path();
        if !self.options.dry_run {
            reset_dir(output)?;
        }

        let sanitizer = FilenameSanitizer::from_config(&self.config.sanitize)?;
        let registry = RegistryBuilder::new(
            &self.config.source,
            repo_root,
            (!self.options.dry_run).then_some(output),
            &sanitizer,
            self.log,
        )
        .build(&doc_order)?;

        let license_file = self.include_license(repo_root)?;

        let index = render_index(
            &registry.documents,
            &registry.examples,
            self.config,
            &license_file,
        );

        let archive_path = if self.options.dry_run {
            self.log.info(&format!(
                "Dry run: would write {} ({} bytes) and {}",
                output.join(INDEX_FILE).display(),
                index.len(),
                archive_path_for(output).display()
            ));
            None
        } else {
            std::fs::write(output.join(INDEX_FILE), &index)?;
            let archive_path = create_archive(output)?;
            self.log
                .info(&format!("Archive created: {}", archive_path.display()));
            Some(archive_path)
        };

        self.log.info("Packaging complete");

        Ok(BuildReport {
            skill_name: self.config.skill.name.clone(),
            output_path: self.options.output_path.clone(),
            archive_path,
            license_file,
            document_count: registry.documents.len(),
            example_count: registry.examples.len(),
            dry_run: self.options.dry_run,
            retained_temp_dir: None,
            registry,
        })
    }

    /// Find the license in the repository root and copy it next to the index.
    fn include_license(&self, repo_root: &Path) -> Result<String> {
        let candidates = &self.config.source.license_files;
        let name = first_existing(repo_root, candidates)
            .ok_or_else(|| PackagerError::LicenseNotFound {
                candidates: candidates.clone(),
            })?
            .to_string();

        if !self.options.dry_run {
            copy_preserving(repo_root.join(&name), self.options.output_path.join(&name))?;
            self.log.info(&format!("Included license: {name}"));
        }
        Ok(name)
    }
}

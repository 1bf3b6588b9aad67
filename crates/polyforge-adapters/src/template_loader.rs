//! Filesystem-based template loader.
//!
//! Discovers and parses `template.toml` manifests below a directory,
//! converting them into domain [`Template`] objects that replace built-in
//! catalog entries of the same name.
//!
//! # Directory layout expected
//!
//! ```text
//! overrides/
//! ├── javascript/
//! │   └── dockerfile/
//! │       ├── template.toml    ← manifest (required)
//! │       └── Dockerfile       ← file content
//! └── project-readme/
//!     ├── template.toml
//!     └── README.md
//! ```
//!
//! Any directory holding a `template.toml` is one template, at any depth.
//! Its files are everything below it except nested template directories.
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id      = "javascript/dockerfile"   # catalog name it replaces
//! version = "1.1.0"
//!
//! [metadata]
//! name        = "Node.js Dockerfile"
//! description = "Multi-stage image."  # optional
//! author      = "Platform team"       # optional
//! tags        = ["docker"]            # optional
//!
//! # Optional: override per-file handling.
//! # If omitted, files containing {{ }} are auto-detected as parameterized.
//! [[files]]
//! path       = "devspace_start.sh"
//! type       = "literal"              # literal | parameterized
//! executable = true
//! ```

use std::{
    collections::{HashMap, HashSet},
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use polyforge_core::domain::{
    DirectorySpec, DomainError, FileSpec, RelativePath, Template, TemplateBuilder,
    TemplateContent, TemplateId, TemplateMetadata, TemplateNode, TemplateSource, TemplateTree,
};

const MANIFEST: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    pub metadata: MetadataSection,
    /// Explicit per-file overrides. Files not listed here are auto-detected:
    /// content containing `{{` is [`FileType::Parameterized`], everything
    /// else is [`FileType::Literal`].
    pub files: Option<Vec<FileEntry>>,
    /// Directories that must exist even if they contain no tracked files.
    pub directories: Option<Vec<DirectoryEntry>>,
}

/// `[template]` section: identity of the template.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    /// Catalog name, e.g. `"go/kubernetes-server"`.
    pub id: String,
    pub version: String,
}

/// `[metadata]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataSection {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Relative path from the template root (e.g. `"kubernetes/service.yaml"`).
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: Option<FileType>,
    #[serde(default)]
    pub executable: bool,
}

/// Controls how a file's content is treated during rendering.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Copied verbatim.
    Literal,
    /// `{{VARIABLE}}` placeholders are substituted.
    Parameterized,
}

/// One entry under `[[directories]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryEntry {
    pub path: String,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] objects from a directory tree of `template.toml` manifests.
///
/// Template directories whose manifest is invalid emit a `WARN` log and are
/// skipped; they do not prevent other templates from loading.
///
/// # Example
///
/// ```no_run
/// use polyforge_adapters::template_loader::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./overrides");
/// let templates = loader.load_all()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), polyforge_core::domain::DomainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every valid template found below `templates_dir`, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTemplate`] if `templates_dir` is missing
    /// or cannot be walked.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let mut templates = Vec::new();
        for dir in self.template_dirs()? {
            match self.load_template_from_dir(&dir) {
                Ok(template) => {
                    debug!(id = %template.id, "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                }
            }
        }

        templates.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    /// Every directory below the root that holds a manifest.
    fn template_dirs(&self) -> Result<Vec<PathBuf>, DomainError> {
        let mut dirs = Vec::new();
        for entry in WalkDir::new(&self.templates_dir).min_depth(1).sort_by_file_name() {
            let entry = entry
                .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
            if entry.file_type().is_file() && entry.file_name() == OsStr::new(MANIFEST) {
                if let Some(parent) = entry.path().parent() {
                    dirs.push(parent.to_path_buf());
                }
            }
        }
        Ok(dirs)
    }

    /// Load a single template from one directory.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn load_template_from_dir(&self, dir: &Path) -> Result<Template, DomainError> {
        let manifest_path = dir.join(MANIFEST);
        let raw = fs::read_to_string(&manifest_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let manifest: TemplateManifest = toml::from_str(&raw).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to parse '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let id = TemplateId::parse(&format!(
            "{}@{}",
            manifest.template.id, manifest.template.version
        ))?;
        let tree = self.build_tree_from_dir(dir, &manifest)?;

        let metadata = TemplateMetadata::new(manifest.metadata.name)
            .description(manifest.metadata.description.unwrap_or_default())
            .author(manifest.metadata.author.unwrap_or_else(|| "Polyforge".into()))
            .tags(manifest.metadata.tags.unwrap_or_default());

        TemplateBuilder::default()
            .id(id)
            .metadata(metadata)
            .tree(tree)
            .build()
    }

    /// Walk `dir` and build a [`TemplateTree`] according to the manifest.
    ///
    /// Manifest `[[directories]]` come first, then everything found on disk
    /// in file-name order. Nested template directories are not descended.
    fn build_tree_from_dir(
        &self,
        dir: &Path,
        manifest: &TemplateManifest,
    ) -> Result<TemplateTree, DomainError> {
        let mut tree = TemplateTree::new();
        let mut added_paths: HashSet<String> = HashSet::new();

        if let Some(dirs) = &manifest.directories {
            for entry in dirs {
                let path = normalize_path(&entry.path);
                if added_paths.insert(path.clone()) {
                    tree.push(TemplateNode::Directory(DirectorySpec::new(
                        RelativePath::try_new(path)?,
                    )));
                }
            }
        }

        let manifest_files: HashMap<String, &FileEntry> = manifest
            .files
            .as_ref()
            .map(|files| files.iter().map(|f| (normalize_path(&f.path), f)).collect())
            .unwrap_or_default();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !(e.file_type().is_dir() && e.path().join(MANIFEST).is_file())
            });

        for walk_entry in walker {
            let walk_entry = walk_entry
                .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
            let abs_path = walk_entry.path();
            let rel_raw = abs_path.strip_prefix(dir).map_err(|_| {
                DomainError::InvalidTemplate(format!(
                    "failed to relativise '{}' against '{}'",
                    abs_path.display(),
                    dir.display()
                ))
            })?;

            if rel_raw == Path::new(MANIFEST) {
                continue;
            }

            let path_str = normalize_path(&rel_raw.to_string_lossy());

            if walk_entry.file_type().is_dir() {
                if added_paths.insert(path_str.clone()) {
                    tree.push(TemplateNode::Directory(DirectorySpec::new(
                        RelativePath::try_new(path_str)?,
                    )));
                }
                continue;
            }

            // Skip symlinks and other special types.
            if !walk_entry.file_type().is_file() {
                continue;
            }

            let content = fs::read_to_string(abs_path).map_err(|e| {
                DomainError::InvalidTemplate(format!("failed to read file '{path_str}': {e}"))
            })?;

            let entry = manifest_files.get(&path_str).copied();
            let mut spec = FileSpec::new(
                RelativePath::try_new(path_str.clone())?,
                resolve_file_content(content, entry),
            );
            if entry.is_some_and(|e| e.executable) {
                spec = spec.executable();
            }

            if added_paths.insert(path_str) {
                tree.push(TemplateNode::File(spec));
            }
        }

        Ok(tree)
    }
}

/// The manifest's explicit `type` wins; otherwise files containing `{{` are
/// parameterized.
fn resolve_file_content(content: String, manifest_entry: Option<&FileEntry>) -> TemplateContent {
    let file_type = manifest_entry
        .and_then(|e| e.file_type)
        .unwrap_or(if content.contains("{{") {
            FileType::Parameterized
        } else {
            FileType::Literal
        });

    match file_type {
        FileType::Literal => TemplateContent::Literal(TemplateSource::from(content)),
        FileType::Parameterized => TemplateContent::Parameterized(TemplateSource::from(content)),
    }
}

/// Forward slashes only, so Windows and Unix paths compare identically.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOCKERFILE_MANIFEST: &str = r#"
[template]
id = "javascript/dockerfile"
version = "1.1.0"

[metadata]
name = "Node.js Dockerfile"
description = "Custom image"
tags = ["docker"]
"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn find_file<'a>(t: &'a Template, path: &str) -> &'a FileSpec {
        t.tree
            .nodes
            .iter()
            .find_map(|n| match n {
                TemplateNode::File(f) if f.path.as_str() == path => Some(f),
                _ => None,
            })
            .unwrap_or_else(|| panic!("file '{path}' not found in template"))
    }

    #[test]
    fn load_all_returns_error_for_missing_dir() {
        let loader = FilesystemTemplateLoader::new("/definitely/not/here");
        assert!(matches!(
            loader.load_all(),
            Err(DomainError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn loads_id_version_and_metadata() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "js/dockerfile/template.toml", DOCKERFILE_MANIFEST);
        write(temp.path(), "js/dockerfile/Dockerfile", "FROM node:22\n{{EXPOSE}}\n");

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert_eq!(templates.len(), 1);
        let t = &templates[0];
        assert_eq!(t.id.name(), "javascript/dockerfile");
        assert_eq!(t.id.version(), "1.1.0");
        assert_eq!(t.metadata.name, "Node.js Dockerfile");
        assert_eq!(t.metadata.description, "Custom image");
        assert_eq!(t.metadata.author, "Polyforge");
        assert_eq!(t.metadata.tags, vec!["docker".to_string()]);
        assert!(matches!(
            find_file(t, "Dockerfile").content,
            TemplateContent::Parameterized(_)
        ));
    }

    #[test]
    fn plain_files_are_literal() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "d/template.toml", DOCKERFILE_MANIFEST);
        write(temp.path(), "d/.dockerignore", "node_modules\n");

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert!(matches!(
            find_file(&templates[0], ".dockerignore").content,
            TemplateContent::Literal(_)
        ));
    }

    #[test]
    fn manifest_overrides_type_and_executable() {
        let temp = TempDir::new().unwrap();
        let manifest = format!(
            "{DOCKERFILE_MANIFEST}\n[[files]]\npath = \"start.sh\"\ntype = \"literal\"\nexecutable = true\n"
        );
        write(temp.path(), "d/template.toml", &manifest);
        write(temp.path(), "d/start.sh", "echo ${{ matrix.node }}");

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        let file = find_file(&templates[0], "start.sh");

        assert!(matches!(file.content, TemplateContent::Literal(_)));
        assert!(file.permissions.executable_flag());
    }

    #[test]
    fn invalid_template_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good/template.toml", DOCKERFILE_MANIFEST);
        write(temp.path(), "good/Dockerfile", "FROM node:22");
        write(temp.path(), "bad/template.toml", "this is not toml [");
        write(temp.path(), "bad/Dockerfile", "FROM node:22");

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id.name(), "javascript/dockerfile");
    }

    #[test]
    fn manifest_without_files_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "empty/template.toml", DOCKERFILE_MANIFEST);

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert!(templates.is_empty());
    }

    #[test]
    fn nested_template_dirs_are_separate_templates() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "outer/template.toml", DOCKERFILE_MANIFEST);
        write(temp.path(), "outer/Dockerfile", "FROM node:22");
        write(
            temp.path(),
            "outer/inner/template.toml",
            &DOCKERFILE_MANIFEST.replace("javascript/dockerfile", "go/dockerfile"),
        );
        write(temp.path(), "outer/inner/Dockerfile", "FROM golang:1.23");

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert_eq!(templates.len(), 2);
        let js = templates
            .iter()
            .find(|t| t.id.name() == "javascript/dockerfile")
            .unwrap();
        assert_eq!(js.tree.len(), 1);
    }

    #[test]
    fn nested_files_and_declared_directories() {
        let temp = TempDir::new().unwrap();
        let manifest = format!("{DOCKERFILE_MANIFEST}\n[[directories]]\npath = \"kubernetes\"\n");
        write(temp.path(), "k/template.toml", &manifest);
        write(temp.path(), "k/kubernetes/deployment.yaml", "kind: Deployment");

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        let tree = &templates[0].tree;

        let directories = tree
            .nodes
            .iter()
            .filter(|n| matches!(n, TemplateNode::Directory(_)))
            .count();
        assert_eq!(directories, 1);
        find_file(&templates[0], "kubernetes/deployment.yaml");
    }

    #[test]
    fn normalize_path_replaces_backslashes() {
        assert_eq!(normalize_path("kubernetes\\service.yaml"), "kubernetes/service.yaml");
    }
}

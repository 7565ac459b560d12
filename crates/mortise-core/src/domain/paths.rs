//! Output locations and namespaces for generated files.
//!
//! [`PathResolver`] is a pure function of the [`SolutionLayout`]: the same
//! `(category, item, class)` triple always yields the same [`ClassPath`].
//! Namespaces are computed from the directory alone, so moving a category's
//! directory automatically moves its namespace.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::domain::naming::to_snake_case;
use crate::domain::value_objects::PathCategory;

// ── SolutionLayout ────────────────────────────────────────────────────────────

/// The fixed inputs every path is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLayout {
    pub root: PathBuf,
    pub src_dir: String,
    pub test_dir: String,
    pub project_base_name: String,
}

impl SolutionLayout {
    pub fn new(root: impl Into<PathBuf>, project_base_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            src_dir: "src".into(),
            test_dir: "tests".into(),
            project_base_name: project_base_name.into(),
        }
    }

    /// Override the source and test folder names (`src`/`tests` by default).
    pub fn with_dirs(mut self, src_dir: impl Into<String>, test_dir: impl Into<String>) -> Self {
        self.src_dir = src_dir.into();
        self.test_dir = test_dir.into();
        self
    }

    pub fn src_root(&self) -> PathBuf {
        self.root.join(&self.src_dir)
    }

    pub fn test_root(&self) -> PathBuf {
        self.root.join(&self.test_dir)
    }

    fn project(&self, suffix: &str) -> String {
        format!("{}.{suffix}", self.project_base_name)
    }
}

// ── ClassPath ─────────────────────────────────────────────────────────────────

/// Where one generated type lives and which namespace it declares.
///
/// Immutable: `full_path` is always `directory` joined with the file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassPath {
    directory: PathBuf,
    full_path: PathBuf,
    module_id: String,
    class_name: String,
}

impl ClassPath {
    fn new(directory: PathBuf, file_name: &str, module_id: String, class_name: &str) -> Self {
        let full_path = directory.join(file_name);
        Self {
            directory,
            full_path,
            module_id,
            class_name: class_name.to_string(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Namespace (or module path) derived from `directory`.
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

// ── ModuleConvention ──────────────────────────────────────────────────────────

/// How directory segments become a namespace for the target language.
pub trait ModuleConvention: fmt::Debug + Send + Sync {
    fn module_id(&self, segments: &[String]) -> String;

    fn file_extension(&self) -> &'static str;

    fn file_name(&self, class_name: &str) -> String {
        format!("{class_name}.{}", self.file_extension())
    }
}

/// `Acme.Api/Domain/Widgets` → `Acme.Api.Domain.Widgets`, files end in `.cs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotNetModules;

impl ModuleConvention for DotNetModules {
    fn module_id(&self, segments: &[String]) -> String {
        segments.join(".")
    }

    fn file_extension(&self) -> &'static str {
        "cs"
    }
}

/// `Acme.Api/Domain/Widgets` → `acme_api::domain::widgets`, files end in `.rs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustModules;

impl ModuleConvention for RustModules {
    fn module_id(&self, segments: &[String]) -> String {
        segments
            .iter()
            .map(|s| to_snake_case(s))
            .collect::<Vec<_>>()
            .join("::")
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn file_name(&self, class_name: &str) -> String {
        format!("{}.rs", to_snake_case(class_name))
    }
}

// ── PathResolver ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PathResolver {
    layout: SolutionLayout,
    convention: Arc<dyn ModuleConvention>,
}

impl PathResolver {
    pub fn new(layout: SolutionLayout) -> Self {
        Self::with_convention(layout, DotNetModules)
    }

    pub fn with_convention(layout: SolutionLayout, convention: impl ModuleConvention + 'static) -> Self {
        Self {
            layout,
            convention: Arc::new(convention),
        }
    }

    pub fn layout(&self) -> &SolutionLayout {
        &self.layout
    }

    /// Resolve the file for `class_name` in `category`.
    ///
    /// `item` is the category's grouping key: the entity plural for
    /// entity-scoped and feature-test categories, the entity name for
    /// [`PathCategory::TestFakes`], the domain directory for
    /// [`PathCategory::Consumer`]. Solution-wide categories ignore it.
    pub fn resolve(&self, category: PathCategory, item: &str, class_name: &str) -> ClassPath {
        let directory = self.directory(category, item);
        let module_id = self.module_id_for(&directory);
        let file_name = self.convention.file_name(class_name);
        ClassPath::new(directory, &file_name, module_id, class_name)
    }

    /// Namespace declared by files in `category`.
    pub fn namespace(&self, category: PathCategory, item: &str) -> String {
        self.module_id_for(&self.directory(category, item))
    }

    pub fn directory(&self, category: PathCategory, item: &str) -> PathBuf {
        let layout = &self.layout;
        let api = layout.src_root().join(layout.project("Api"));
        let domain = api.join("Domain");
        let tests = layout.test_root();

        match category {
            PathCategory::Entity => domain.join(item),
            PathCategory::Dto => domain.join(item).join("Dtos"),
            PathCategory::Validator => domain.join(item).join("Validators"),
            PathCategory::Profile => domain.join(item).join("Mappings"),
            PathCategory::Feature | PathCategory::Consumer => domain.join(item).join("Features"),
            PathCategory::Controller => api.join("Controllers").join("v1"),
            PathCategory::DbContext => api.join("Databases"),
            PathCategory::IntegrationTest => tests
                .join(layout.project("IntegrationTests"))
                .join("FeatureTests")
                .join(item),
            PathCategory::FunctionalTest => tests
                .join(layout.project("FunctionalTests"))
                .join("FunctionalTests")
                .join(item),
            PathCategory::TestFakes => tests
                .join(layout.project("SharedTestHelpers"))
                .join("Fakes")
                .join(item),
            PathCategory::TestRoutes => tests
                .join(layout.project("FunctionalTests"))
                .join("TestUtilities"),
            PathCategory::TestFixture => tests.join(layout.project("IntegrationTests")),
        }
    }

    fn module_id_for(&self, directory: &Path) -> String {
        let relative = directory
            .strip_prefix(self.layout.src_root())
            .or_else(|_| directory.strip_prefix(self.layout.test_root()))
            .unwrap_or(directory);

        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        self.convention.module_id(&segments)
    }
}

//! Generation Service - main application orchestrator.
//!
//! Coordinates one generation run:
//! 1. Validate the graph (each node is checked right before it is generated)
//! 2. Create the project directory
//! 3. Process nodes in graph order (fail-fast)
//! 4. Write project-level files (static-analysis config, then README)
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).
//!
//! # Partial output
//!
//! There is no rollback. When a node fails, every earlier node's output and
//! whatever the failing node managed to write stay on disk. Callers must treat
//! the project directory of a failed run as invalid; [`GenerationService::remove_project`]
//! deletes it.

use std::path::{Path, PathBuf};

use tracing::{Dispatch, debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::generators::generator_for;
use crate::application::integrations::{DeepSourceCopier, IntegrationCopier, ReadmeCopier};
use crate::application::ports::{Filesystem, GenerationPorts, TemplateRenderer, TemplateStore};
use crate::domain::{
    DomainValidator as validator, LanguageNode, Node, NodeContext, Project, entities::context,
};
use crate::error::ForgeResult;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Correlates this run's log events.
    pub run_id: Uuid,
    pub project_directory: PathBuf,
    /// Generated node names, in graph order.
    pub nodes: Vec<String>,
    pub files_written: usize,
}

/// Main generation service.
pub struct GenerationService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    output_root: PathBuf,
    dispatch: Option<Dispatch>,
}

impl GenerationService {
    /// Create a service writing projects below `output_root`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use polyforge_core::application::GenerationService;
    ///
    /// let service = GenerationService::new(
    ///     store,      // impl TemplateStore
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     "./out",
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            output_root: output_root.into(),
            dispatch: None,
        }
    }

    /// Emit this service's events through `dispatch` instead of the
    /// process-wide default subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// `<output_root>/<project name>`.
    pub fn project_directory(&self, project: &Project) -> PathBuf {
        context::project_directory(&self.output_root, project)
    }

    /// Whether the project directory is already present.
    pub fn project_exists(&self, project: &Project) -> bool {
        self.filesystem.exists(&self.project_directory(project))
    }

    /// Generate the whole project.
    pub fn generate(&self, project: &Project) -> ForgeResult<GenerationReport> {
        self.in_dispatch(|| self.run(project))
    }

    /// Check the graph and every node without writing anything.
    pub fn validate(&self, project: &Project) -> ForgeResult<Vec<LanguageNode>> {
        self.in_dispatch(|| self.validate_inner(project))
    }

    /// Process one node: resolve, build its context, create its directory and
    /// hand it to the language generator.
    pub fn process_node(&self, project: &Project, node: &Node) -> ForgeResult<()> {
        let ports = self.ports();
        self.in_dispatch(|| self.process_node_with(project, node, &ports))
    }

    /// Delete a project directory left behind by a failed run.
    ///
    /// Refuses a project name that is not a single plain directory name, so
    /// nothing outside `<output_root>/<name>` is ever removed.
    pub fn remove_project(&self, project: &Project) -> ForgeResult<()> {
        validator::validate_name("project", &project.name)?;
        let directory = self.project_directory(project);
        self.in_dispatch(|| {
            if !self.filesystem.exists(&directory) {
                return Ok(());
            }
            match self.filesystem.remove_dir_all(&directory) {
                Ok(()) => {
                    info!(path = %directory.display(), "Removed project directory");
                    Ok(())
                }
                Err(e) => {
                    warn!(error = %e, path = %directory.display(), "Removing project directory failed");
                    Err(e)
                }
            }
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn in_dispatch<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn ports(&self) -> GenerationPorts<'_> {
        GenerationPorts::new(
            self.store.as_ref(),
            self.renderer.as_ref(),
            self.filesystem.as_ref(),
        )
    }

    #[instrument(skip_all, fields(project = %project.name))]
    fn validate_inner(&self, project: &Project) -> ForgeResult<Vec<LanguageNode>> {
        validator::validate_project(project)?;
        project.metadata.require_git_platform_user_name()?;

        let nodes = project
            .graph
            .nodes
            .iter()
            .map(|node| LanguageNode::resolve(project, node))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(nodes = nodes.len(), "Project is valid");
        Ok(nodes)
    }

    #[instrument(skip_all, fields(project = %project.name, run_id = tracing::field::Empty))]
    fn run(&self, project: &Project) -> ForgeResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!(nodes = project.graph.nodes.len(), "Generating project");

        // Graph-level checks only; each node's protocols are checked right
        // before it is generated.
        validator::validate_project(project)?;
        project.metadata.require_git_platform_user_name()?;

        let ports = self.ports();
        let project_directory = self.project_directory(project);
        self.filesystem.create_dir_all(&project_directory)?;

        let mut nodes = Vec::with_capacity(project.graph.nodes.len());
        for node in &project.graph.nodes {
            self.process_node_with(project, node, &ports)?;
            nodes.push(node.name().to_string());
        }

        let deepsource = DeepSourceCopier::new(project, project_directory.clone());
        let readme = ReadmeCopier::new(project, project_directory.clone());
        for copier in [&deepsource as &dyn IntegrationCopier, &readme] {
            debug!(copier = copier.name(), "Running project copier");
            copier.create(&ports)?;
        }

        let report = GenerationReport {
            run_id,
            project_directory,
            nodes,
            files_written: ports.files_written(),
        };
        info!(files = report.files_written, "Generation completed successfully");
        Ok(report)
    }

    #[instrument(skip_all, fields(node = %node.name(), language = %node.language))]
    fn process_node_with(
        &self,
        project: &Project,
        node: &Node,
        ports: &GenerationPorts<'_>,
    ) -> ForgeResult<()> {
        let language_node = LanguageNode::resolve(project, node)?;
        let ctx = NodeContext::build(project, node, &self.output_root)?;

        self.filesystem.create_dir_all(&ctx.node_directory)?;
        generator_for(language_node.language()).generate(&language_node, &ctx, ports)?;

        info!("Node generated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Language, ProjectGraph, ProjectMetadata, RestConfig};
    use crate::error::ForgeError;

    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    use crate::domain::{ProjectStructure, RenderContext, Template, TemplateId};

    struct NoTemplates;

    impl TemplateStore for NoTemplates {
        fn get(&self, id: &TemplateId) -> ForgeResult<Template> {
            Err(crate::application::ApplicationError::TemplateResolution {
                reason: id.to_string(),
            }
            .into())
        }
        fn list(&self) -> ForgeResult<Vec<Template>> {
            Ok(Vec::new())
        }
        fn insert(&self, _: Template) -> ForgeResult<()> {
            Ok(())
        }
    }

    struct NullRenderer;

    impl TemplateRenderer for NullRenderer {
        fn render(&self, _: &Template, _: &RenderContext, root: &Path) -> ForgeResult<ProjectStructure> {
            Ok(ProjectStructure::new(root))
        }
    }

    #[derive(Default)]
    struct RecordingFs {
        dirs: Mutex<BTreeSet<PathBuf>>,
        removed: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl Filesystem for RecordingFs {
        fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }
        fn write_file(&self, _: &Path, _: &str) -> ForgeResult<()> {
            Ok(())
        }
        fn set_permissions(&self, _: &Path, _: bool) -> ForgeResult<()> {
            Ok(())
        }
        fn exists(&self, path: &Path) -> bool {
            self.dirs.lock().unwrap().contains(path)
        }
        fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
            self.dirs.lock().unwrap().remove(path);
            self.removed.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn service() -> GenerationService {
        service_with(RecordingFs::default())
    }

    fn service_with(fs: RecordingFs) -> GenerationService {
        GenerationService::new(
            Box::new(NoTemplates),
            Box::new(NullRenderer),
            Box::new(fs),
            "out",
        )
    }

    fn project(node: Node) -> Project {
        Project::new("shop", ProjectGraph::new().with_node(node))
            .with_metadata(ProjectMetadata::default().with_git_platform_user_name("octo"))
    }

    #[test]
    fn project_directory_is_below_output_root() {
        let project = project(Node::new("svc1", Language::Go));
        assert_eq!(service().project_directory(&project), PathBuf::from("out/shop"));
    }

    #[test]
    fn validate_resolves_every_node() {
        let project = project(
            Node::new("svc1", Language::JavaScript)
                .with_rest(RestConfig::openapi_server(8080, "openapi: 3.0.0")),
        );
        let nodes = service().validate(&project).unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].rest_server_port(), Some(8080));
    }

    #[test]
    fn validate_requires_git_user_name() {
        let project = Project::new(
            "shop",
            ProjectGraph::new().with_node(Node::new("svc1", Language::Go)),
        );
        let err = service().validate(&project).unwrap_err();

        assert!(matches!(err, ForgeError::Domain(_)));
        assert!(err.to_string().contains("gitPlatformUserName"));
    }

    #[test]
    fn missing_template_fails_the_run() {
        let project = project(Node::new("svc1", Language::Go));
        let err = service().generate(&project).unwrap_err();

        assert!(matches!(err, ForgeError::Application(_)));
    }

    #[test]
    fn remove_project_refuses_names_outside_output_root() {
        let fs = RecordingFs::default();
        let removed = Arc::clone(&fs.removed);
        fs.dirs.lock().unwrap().insert(PathBuf::from("out/.."));
        fs.dirs.lock().unwrap().insert(PathBuf::from("/home/me"));
        let service = service_with(fs);

        for name in ["..", "/home/me", "a/../b", ""] {
            let project = Project::new(name, ProjectGraph::new());
            let err = service.remove_project(&project).unwrap_err();
            assert!(
                matches!(err, ForgeError::Domain(DomainError::InvalidName { .. })),
                "{name:?}: {err}"
            );
        }
        assert!(removed.lock().unwrap().is_empty());
    }

    #[test]
    fn remove_project_deletes_the_project_directory() {
        let fs = RecordingFs::default();
        let removed = Arc::clone(&fs.removed);
        fs.dirs.lock().unwrap().insert(PathBuf::from("out/shop"));
        let service = service_with(fs);

        service.remove_project(&project(Node::new("svc1", Language::Go))).unwrap();
        assert_eq!(*removed.lock().unwrap(), vec![PathBuf::from("out/shop")]);
    }
}

//! Integration tests for polyforge-core.
//!
//! Templates, rendering and the filesystem are faked here so the
//! orchestration rules can be checked without the adapters crate.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use mockall::mock;
use polyforge_core::application::ApplicationError;
use polyforge_core::domain::{
    DomainError, FileSpec, GrpcConfig, ProjectStructure, RelativePath,
    TemplateContent, TemplateNode,
};
use polyforge_core::prelude::*;

// ============================================================================
// Fakes
// ============================================================================

/// Answers every template name with a one-file template whose path is
/// derived from the name, so each artifact lands in its own file.
struct SyntheticStore;

impl TemplateStore for SyntheticStore {
    fn get(&self, id: &TemplateId) -> ForgeResult<Template> {
        self.resolve(id.name())
    }

    fn list(&self) -> ForgeResult<Vec<Template>> {
        Ok(Vec::new())
    }

    fn insert(&self, _template: Template) -> ForgeResult<()> {
        Ok(())
    }

    fn resolve(&self, name: &str) -> ForgeResult<Template> {
        let artifact = name.replace('/', "_");
        let path = if name.ends_with("github-actions") {
            ".github/workflows/{{NODE_NAME}}-container-image.yml".to_string()
        } else {
            format!("{artifact}.txt")
        };
        let content = format!("{name} port={{{{PORT}}}} node={{{{NODE_NAME}}}}\n{{{{ROUTES}}}}");

        Ok(Template::builder()
            .id(TemplateId::new(name, "1.0.0"))
            .metadata(TemplateMetadata::new(name))
            .add_node(TemplateNode::File(FileSpec::new(
                path.as_str(),
                TemplateContent::parameterized(content),
            )))
            .build()?)
    }
}

struct PlaceholderRenderer;

impl TemplateRenderer for PlaceholderRenderer {
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);
        for node in &template.tree.nodes {
            if let TemplateNode::File(file) = node {
                let path = RelativePath::try_new(context.render(file.path.as_str()))?;
                let content = match &file.content {
                    TemplateContent::Literal(source) => source.as_str().to_string(),
                    TemplateContent::Parameterized(source) => context.render(source.as_str()),
                };
                structure.add_file(path, content, file.permissions);
            }
        }
        Ok(structure)
    }
}

/// Records files and directories; clones share state.
#[derive(Clone, Default)]
struct RecordingFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingFs {
    fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.lock().unwrap().clone()
    }

    fn read(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    fn any_under(&self, prefix: &str) -> bool {
        let prefix = Path::new(prefix);
        self.files.lock().unwrap().keys().any(|p| p.starts_with(prefix))
            || self.dirs.lock().unwrap().iter().any(|p| p.starts_with(prefix))
    }
}

impl Filesystem for RecordingFs {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> ForgeResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().iter().any(|d| d == path)
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }
}

mock! {
    pub Fs {}

    impl Filesystem for Fs {
        fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;
        fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;
        fn set_permissions(&self, path: &Path, executable: bool) -> ForgeResult<()>;
        fn exists(&self, path: &Path) -> bool;
        fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
    }
}

// ============================================================================
// Helpers
// ============================================================================

const PETSTORE: &str = r#"
openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
"#;

fn service(fs: &RecordingFs) -> GenerationService {
    GenerationService::new(
        Box::new(SyntheticStore),
        Box::new(PlaceholderRenderer),
        Box::new(fs.clone()),
        "out",
    )
}

fn project(nodes: Vec<Node>) -> Project {
    let graph = nodes.into_iter().fold(ProjectGraph::new(), ProjectGraph::with_node);
    Project::new("shop", graph)
        .with_metadata(ProjectMetadata::default().with_git_platform_user_name("octo"))
}

fn js_server(id: &str) -> Node {
    Node::new(id, Language::JavaScript).with_rest(RestConfig::openapi_server(8080, PETSTORE))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_generates_node_and_project_files() {
    let fs = RecordingFs::default();
    let report = service(&fs).generate(&project(vec![js_server("svc1")])).unwrap();

    assert_eq!(report.project_directory, PathBuf::from("out/shop"));
    assert_eq!(report.nodes, vec!["svc1".to_string()]);
    assert_eq!(report.files_written, fs.files().len());

    let source = fs.read("out/shop/svc1/javascript_rest-openapi.txt").unwrap();
    assert!(source.contains("port=8080"));
    assert!(source.contains("app.get('/pets'"));

    assert_eq!(fs.read("out/shop/svc1/openapi.yaml").unwrap(), PETSTORE);
    assert!(fs.read("out/shop/svc1/javascript_dockerfile.txt").unwrap().contains("port=8080"));
    assert!(fs.read("out/shop/svc1/javascript_kubernetes-server.txt").is_some());
    assert!(fs.read("out/shop/svc1/javascript_devspace-server.txt").is_some());
    assert!(fs.read("out/shop/.github/workflows/svc1-container-image.yml").is_some());
    assert!(fs.read("out/shop/project_readme.txt").is_some());
    assert!(fs.read("out/shop/project_deepsource.txt").is_some());
}

#[test]
fn test_unsupported_protocol_writes_nothing_for_node() {
    let fs = RecordingFs::default();
    let node = js_server("svc1").with_grpc(GrpcConfig::builtin_server(9090, None));

    let err = service(&fs).generate(&project(vec![node])).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("grpc"), "{message}");
    assert!(message.contains("javascript"), "{message}");
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::UnsupportedProtocol { .. })
    ));
    assert!(!fs.any_under("out/shop/svc1"));
}

#[test]
fn test_first_failure_stops_later_nodes() {
    let fs = RecordingFs::default();
    let nodes = vec![
        js_server("first"),
        Node::new("second", Language::Python).with_grpc(GrpcConfig::builtin_server(9090, None)),
        js_server("third"),
    ];

    let err = service(&fs).generate(&project(nodes)).unwrap_err();

    assert!(err.to_string().contains("python"));
    assert!(fs.read("out/shop/first/javascript_dockerfile.txt").is_some());
    assert!(!fs.any_under("out/shop/second"));
    assert!(!fs.any_under("out/shop/third"));
    assert!(fs.read("out/shop/project_readme.txt").is_none());
}

#[test]
fn test_missing_openapi_content_wins() {
    let fs = RecordingFs::default();
    let node = Node::new("svc1", Language::Ruby)
        .with_rest(RestConfig::openapi_server(8080, "   "))
        .with_grpc(GrpcConfig::builtin_server(9090, None));

    let err = service(&fs).generate(&project(vec![node])).unwrap_err();

    assert!(matches!(
        err.as_domain(),
        Some(DomainError::MissingOpenApiContent { .. })
    ));
}

#[test]
fn test_generation_is_idempotent() {
    let first = RecordingFs::default();
    let second = RecordingFs::default();
    let nodes = || {
        vec![
            js_server("web"),
            Node::new("api", Language::Go).with_rest(RestConfig::builtin_server(9000)),
        ]
    };

    service(&first).generate(&project(nodes())).unwrap();
    service(&second).generate(&project(nodes())).unwrap();

    assert_eq!(first.files(), second.files());
}

#[test]
fn test_validate_writes_nothing() {
    let fs = RecordingFs::default();
    let nodes = service(&fs).validate(&project(vec![js_server("svc1")])).unwrap();

    assert_eq!(nodes.len(), 1);
    assert!(fs.files().is_empty());
    assert!(!fs.any_under("out"));
}

#[test]
fn test_worker_node_gets_worker_variants() {
    let fs = RecordingFs::default();
    let node = Node::new("consumer", Language::Go).with_grpc(GrpcConfig::builtin_server(9090, None));

    service(&fs).generate(&project(vec![node])).unwrap();

    assert!(fs.read("out/shop/consumer/go_grpc-builtin.txt").is_some());
    assert!(fs.read("out/shop/consumer/go_kubernetes-worker.txt").is_some());
    assert!(fs.read("out/shop/consumer/go_devspace-worker.txt").is_some());
    assert!(fs.read("out/shop/consumer/go_kubernetes-server.txt").is_none());
}

#[test]
fn test_filesystem_failure_is_returned() {
    let mut fs = MockFs::new();
    fs.expect_create_dir_all().returning(|_| Ok(()));
    fs.expect_set_permissions().returning(|_, _| Ok(()));
    fs.expect_write_file().times(1).returning(|path, _| {
        Err(ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "disk full".into(),
        }
        .into())
    });

    let service = GenerationService::new(
        Box::new(SyntheticStore),
        Box::new(PlaceholderRenderer),
        Box::new(fs),
        "out",
    );
    let err = service.generate(&project(vec![js_server("svc1")])).unwrap_err();

    assert!(matches!(
        err,
        ForgeError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn test_events_go_to_the_given_dispatch() {
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();

    let fs = RecordingFs::default();
    service(&fs)
        .with_dispatch(tracing::Dispatch::new(subscriber))
        .generate(&project(vec![js_server("svc1")]))
        .unwrap();

    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("Generation completed successfully"), "{logs}");
}

#[test]
fn test_remove_project_clears_partial_output() {
    let fs = RecordingFs::default();
    let svc = service(&fs);
    let project = project(vec![
        js_server("svc1"),
        Node::new("svc2", Language::Java).with_grpc(GrpcConfig::builtin_server(9090, None)),
    ]);

    assert!(svc.generate(&project).is_err());
    assert!(fs.any_under("out/shop/svc1"));

    svc.remove_project(&project).unwrap();
    assert!(!fs.any_under("out/shop"));
}

/// The synthetic catalog without the README template.
struct NoReadmeStore;

impl TemplateStore for NoReadmeStore {
    fn get(&self, id: &TemplateId) -> ForgeResult<Template> {
        self.resolve(id.name())
    }

    fn list(&self) -> ForgeResult<Vec<Template>> {
        Ok(Vec::new())
    }

    fn insert(&self, _template: Template) -> ForgeResult<()> {
        Ok(())
    }

    fn resolve(&self, name: &str) -> ForgeResult<Template> {
        if name == "project/readme" {
            return Err(ApplicationError::TemplateResolution {
                reason: format!("no template named '{name}'"),
            }
            .into());
        }
        SyntheticStore.resolve(name)
    }
}

#[test]
fn test_deepsource_is_written_before_readme() {
    let fs = RecordingFs::default();
    let service = GenerationService::new(
        Box::new(NoReadmeStore),
        Box::new(PlaceholderRenderer),
        Box::new(fs.clone()),
        "out",
    );

    let err = service.generate(&project(vec![js_server("svc1")])).unwrap_err();

    assert!(err.to_string().contains("project/readme"));
    assert!(fs.read("out/shop/project_deepsource.txt").is_some());
    assert!(fs.read("out/shop/project_readme.txt").is_none());
}

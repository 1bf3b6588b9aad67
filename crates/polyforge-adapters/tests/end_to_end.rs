//! End-to-end generation with the built-in catalog and real adapters.

use std::path::{Path, PathBuf};

use polyforge_adapters::{
    InMemoryStore, LocalFilesystem, MemoryFilesystem, RequestFormat, SimpleRenderer,
    parse_request,
};
use polyforge_core::domain::{DomainError, Language, Protocol};
use polyforge_core::prelude::*;

const REQUEST: &str = r#"
projectName: shop
repositoryName: shop
userName: octo
metadata:
  gitPlatformUserName: Octo
graph:
  nodes:
    - id: svc1
      language: javascript
      restConfig:
        template: openapi
        server:
          port: 8080
          openApiYamlContent: |
            openapi: 3.0.0
            info:
              title: Petstore
              version: 1.0.0
            paths:
              /pets:
                get:
                  operationId: listPets
              /pets/{petId}:
                get:
                  operationId: showPetById
  edges: []
"#;

fn service(fs: &MemoryFilesystem) -> GenerationService {
    GenerationService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(fs.clone()),
        "out",
    )
}

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(Path::new(path))
        .unwrap_or_else(|| panic!("{path} was not written; have {:?}", fs.list_files()))
}

#[test]
fn test_javascript_rest_server_project() {
    let fs = MemoryFilesystem::new();
    let project = parse_request(REQUEST, RequestFormat::Yaml).unwrap();
    let report = service(&fs).generate(&project).unwrap();

    assert_eq!(report.project_directory, PathBuf::from("out/shop"));
    assert_eq!(report.nodes, vec!["svc1".to_string()]);

    let index = read(&fs, "out/shop/svc1/index.js");
    assert!(index.contains("app.get('/pets', (req, res) => {"));
    assert!(index.contains("app.get('/pets/:petId'"));
    assert!(index.contains("process.env.PORT || 8080"));
    assert!(index.contains("Petstore listening"));
    assert!(read(&fs, "out/shop/svc1/openapi.yaml").contains("operationId: listPets"));

    let dockerfile = read(&fs, "out/shop/svc1/Dockerfile");
    assert!(dockerfile.contains("FROM node:22-alpine AS build"));
    assert!(dockerfile.contains("EXPOSE 8080"));

    let service_yaml = read(&fs, "out/shop/svc1/kubernetes/service.yaml");
    assert!(service_yaml.contains("targetPort: 8080"));
    assert!(read(&fs, "out/shop/svc1/kubernetes/deployment.yaml").contains("image: ghcr.io/octo/shop/svc1:latest"));

    let workflow = read(&fs, "out/shop/.github/workflows/svc1-container-image.yml");
    assert!(workflow.contains("context: ./svc1"));
    assert!(workflow.contains("${{ secrets.GITHUB_TOKEN }}"));

    assert!(read(&fs, "out/shop/svc1/devspace.yaml").contains("- port: \"8080\""));
    assert!(fs.is_executable(Path::new("out/shop/svc1/devspace_start.sh")));

    let readme = read(&fs, "out/shop/README.md");
    assert!(readme.starts_with("# shop"));
    assert!(readme.contains("svc1"));
    assert!(read(&fs, "out/shop/.deepsource.toml").contains("name = \"javascript\""));
}

#[test]
fn test_unsupported_protocol_stops_before_writing_node() {
    let fs = MemoryFilesystem::new();
    let request = r#"
projectName: shop
metadata:
  gitPlatformUserName: octo
graph:
  nodes:
    - id: svc1
      language: javascript
      grpcConfig:
        template: builtin
        server:
          port: 9090
"#;
    let project = parse_request(request, RequestFormat::Yaml).unwrap();
    let err = service(&fs).generate(&project).unwrap_err();

    assert_eq!(
        err.as_domain(),
        Some(&DomainError::UnsupportedProtocol {
            protocol: Protocol::Grpc,
            language: Language::JavaScript,
        })
    );
    assert!(fs.list_files().iter().all(|p| !p.starts_with("out/shop/svc1")));
    assert!(fs.read_file(Path::new("out/shop/README.md")).is_none());
}

#[test]
fn test_go_grpc_worker_gets_worker_variants() {
    let fs = MemoryFilesystem::new();
    let request = r#"
projectName: shop
metadata:
  gitPlatformUserName: octo
graph:
  nodes:
    - id: billing
      language: go
      grpcConfig:
        server:
          port: 9090
          protoContent: "syntax = \"proto3\";"
"#;
    let project = parse_request(request, RequestFormat::Yaml).unwrap();
    service(&fs).generate(&project).unwrap();

    assert!(read(&fs, "out/shop/billing/cmd/grpc-server/main.go").contains("\":9090\""));
    assert!(read(&fs, "out/shop/billing/go.mod").contains("module github.com/octo/shop/billing"));
    assert_eq!(read(&fs, "out/shop/billing/api/billing.proto"), "syntax = \"proto3\";");
    assert!(fs.read_file(Path::new("out/shop/billing/kubernetes/service.yaml")).is_none());
    assert!(!read(&fs, "out/shop/billing/devspace.yaml").contains("ports:"));
    assert!(!read(&fs, "out/shop/billing/Dockerfile").contains("EXPOSE"));
}

#[test]
fn test_every_language_generates_a_rest_server() {
    for language in Language::ALL {
        let fs = MemoryFilesystem::new();
        let request = format!(
            "projectName: shop\nmetadata:\n  gitPlatformUserName: octo\ngraph:\n  nodes:\n    - id: svc\n      language: {language}\n      restConfig:\n        template: openapi\n        server:\n          port: 8080\n          openApiYamlContent: \"openapi: 3.0.0\\ninfo:\\n  title: T\\n  version: '1'\\npaths:\\n  /items:\\n    post:\\n      operationId: createItem\\n\"\n"
        );
        let project = parse_request(&request, RequestFormat::Yaml).unwrap();
        service(&fs).generate(&project).unwrap_or_else(|e| panic!("{language}: {e}"));

        let files = fs.snapshot();
        assert!(
            files.values().any(|content| content.contains("/items")),
            "{language}: no route stub written"
        );
        assert!(files.contains_key(Path::new("out/shop/svc/Dockerfile")), "{language}");
    }
}

#[test]
fn test_generation_on_local_disk() {
    let dir = tempfile::tempdir().unwrap();
    let project = parse_request(REQUEST, RequestFormat::Yaml).unwrap();
    let service = GenerationService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        dir.path(),
    );

    let report = service.generate(&project).unwrap();
    let root = dir.path().join("shop");

    assert_eq!(report.project_directory, root);
    assert!(root.join("svc1/package.json").is_file());
    assert!(root.join(".github/workflows/svc1-container-image.yml").is_file());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(root.join("svc1/devspace_start.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0);
    }

    service.remove_project(&project).unwrap();
    assert!(!root.exists());
}

//! Built-in template catalog.
//!
//! [`all_templates`] is the single entry-point for the templates that ship
//! with Polyforge. Every language gets the same set of artifacts under its
//! template root:
//!
//! | Name                          | Writes                                               |
//! |-------------------------------|------------------------------------------------------|
//! | `<root>/rest-openapi`         | source scaffolding with `{{ROUTES}}`                 |
//! | `<root>/dockerfile`           | `Dockerfile`, `.dockerignore`                        |
//! | `<root>/kubernetes-server`    | `kubernetes/deployment.yaml`, `kubernetes/service.yaml` |
//! | `<root>/kubernetes-worker`    | `kubernetes/deployment.yaml`                         |
//! | `<root>/github-actions`       | `.github/workflows/<node>-container-image.yml`       |
//! | `<root>/devspace-server`      | `devspace.yaml` (with port forward), `devspace_start.sh` |
//! | `<root>/devspace-worker`      | `devspace.yaml`, `devspace_start.sh`                 |
//!
//! Go additionally has `go/rest-builtin` and `go/grpc-builtin`, and the
//! project-level `project/readme` and `project/deepsource` close the run.
//!
//! Integration templates are written once and specialised per language by
//! pre-rendering them with a [`LanguageProfile`]. Placeholders the profile
//! does not know (`{{PORT}}`, `{{IMAGE}}`, ...) survive until generation.

use tracing::{debug, instrument};

use polyforge_core::domain::{
    DomainError, FileSpec, Language, RenderContext, Template, TemplateContent, TemplateId,
    TemplateMetadata, TemplateNode,
};

/// Version of every built-in template. Overrides with the same name replace
/// built-ins regardless of version.
pub const BUILTIN_VERSION: &str = "1.0.0";

// ── Language profiles ─────────────────────────────────────────────────────────

/// Toolchain facts used to specialise the shared integration templates.
#[derive(Debug, Clone, Copy)]
pub struct LanguageProfile {
    pub language: Language,
    /// Image the build stage runs in.
    pub build_image: &'static str,
    /// Image the service runs in.
    pub runtime_image: &'static str,
    /// `RUN` lines of the build stage.
    pub build_steps: &'static str,
    /// `COPY --from=build` lines of the runtime stage.
    pub copy_artifacts: &'static str,
    /// JSON-array `CMD`.
    pub run_command: &'static str,
    /// Entries for `.dockerignore`.
    pub docker_ignore: &'static str,
    /// Workflow steps run before the image build.
    pub ci_steps: &'static str,
    /// Image used by devspace for the dev container.
    pub dev_image: &'static str,
    /// Command suggested inside the dev container.
    pub dev_command: &'static str,
}

impl LanguageProfile {
    fn context(&self) -> RenderContext {
        RenderContext::default()
            .with_variable("LANGUAGE", self.language.display_name())
            .with_variable("BUILD_IMAGE", self.build_image)
            .with_variable("RUNTIME_IMAGE", self.runtime_image)
            .with_variable("BUILD_STEPS", self.build_steps)
            .with_variable("COPY_ARTIFACTS", self.copy_artifacts)
            .with_variable("RUN_COMMAND", self.run_command)
            .with_variable("DOCKER_IGNORE", self.docker_ignore)
            .with_variable("CI_STEPS", self.ci_steps)
            .with_variable("DEV_IMAGE", self.dev_image)
            .with_variable("DEV_COMMAND", self.dev_command)
    }
}

pub const PROFILES: [LanguageProfile; 7] = [
    LanguageProfile {
        language: Language::Go,
        build_image: "golang:1.23-alpine",
        runtime_image: "gcr.io/distroless/static-debian12",
        build_steps: "RUN go mod download\nRUN CGO_ENABLED=0 go build -o /out/service .",
        copy_artifacts: "COPY --from=build /out/service /app/service",
        run_command: r#"["/app/service"]"#,
        docker_ignore: "bin/\n*.test",
        ci_steps: "      - uses: actions/setup-go@v5\n        with:\n          go-version: '1.23'\n      - name: Vet\n        working-directory: ./{{NODE_NAME}}\n        run: go vet ./...",
        dev_image: "golang:1.23",
        dev_command: "go run .",
    },
    LanguageProfile {
        language: Language::Python,
        build_image: "python:3.12-slim",
        runtime_image: "python:3.12-slim",
        build_steps: "RUN pip install --no-cache-dir --prefix=/install -r requirements.txt",
        copy_artifacts: "COPY --from=build /install /usr/local\nCOPY --from=build /src /app",
        run_command: r#"["python", "main.py"]"#,
        docker_ignore: "__pycache__/\n.venv/\n*.pyc",
        ci_steps: "      - uses: actions/setup-python@v5\n        with:\n          python-version: '3.12'\n      - name: Compile\n        working-directory: ./{{NODE_NAME}}\n        run: python -m compileall .",
        dev_image: "python:3.12",
        dev_command: "python main.py",
    },
    LanguageProfile {
        language: Language::Java,
        build_image: "maven:3.9-eclipse-temurin-21",
        runtime_image: "eclipse-temurin:21-jre",
        build_steps: "RUN mvn -q -B package -DskipTests",
        copy_artifacts: "COPY --from=build /src/target/*.jar /app/app.jar",
        run_command: r#"["java", "-jar", "/app/app.jar"]"#,
        docker_ignore: "target/",
        ci_steps: "      - uses: actions/setup-java@v4\n        with:\n          distribution: temurin\n          java-version: '21'\n      - name: Package\n        working-directory: ./{{NODE_NAME}}\n        run: mvn -q -B package",
        dev_image: "maven:3.9-eclipse-temurin-21",
        dev_command: "mvn spring-boot:run",
    },
    LanguageProfile {
        language: Language::Rust,
        build_image: "rust:1.85-slim",
        runtime_image: "debian:bookworm-slim",
        build_steps: "RUN cargo build --release",
        copy_artifacts: "COPY --from=build /src/target/release/{{NODE_NAME_KEBAB}} /app/service",
        run_command: r#"["/app/service"]"#,
        docker_ignore: "target/",
        ci_steps: "      - uses: dtolnay/rust-toolchain@stable\n      - name: Check\n        working-directory: ./{{NODE_NAME}}\n        run: cargo check",
        dev_image: "rust:1.85",
        dev_command: "cargo run",
    },
    LanguageProfile {
        language: Language::JavaScript,
        build_image: "node:22-alpine",
        runtime_image: "node:22-alpine",
        build_steps: "RUN npm install --omit=dev",
        copy_artifacts: "COPY --from=build /src /app",
        run_command: r#"["node", "index.js"]"#,
        docker_ignore: "node_modules/\nnpm-debug.log",
        ci_steps: "      - uses: actions/setup-node@v4\n        with:\n          node-version: '22'\n      - name: Install\n        working-directory: ./{{NODE_NAME}}\n        run: npm install",
        dev_image: "node:22",
        dev_command: "npm start",
    },
    LanguageProfile {
        language: Language::TypeScript,
        build_image: "node:22-alpine",
        runtime_image: "node:22-alpine",
        build_steps: "RUN npm install\nRUN npm run build\nRUN npm prune --omit=dev",
        copy_artifacts: "COPY --from=build /src/package.json /app/package.json\nCOPY --from=build /src/node_modules /app/node_modules\nCOPY --from=build /src/dist /app/dist",
        run_command: r#"["node", "dist/index.js"]"#,
        docker_ignore: "node_modules/\ndist/\nnpm-debug.log",
        ci_steps: "      - uses: actions/setup-node@v4\n        with:\n          node-version: '22'\n      - name: Build\n        working-directory: ./{{NODE_NAME}}\n        run: npm install && npm run build",
        dev_image: "node:22",
        dev_command: "npm run dev",
    },
    LanguageProfile {
        language: Language::Ruby,
        build_image: "ruby:3.3-slim",
        runtime_image: "ruby:3.3-slim",
        build_steps: "RUN bundle config set --local without 'development test'\nRUN bundle install",
        copy_artifacts: "COPY --from=build /usr/local/bundle /usr/local/bundle\nCOPY --from=build /src /app",
        run_command: r#"["bundle", "exec", "ruby", "app.rb"]"#,
        docker_ignore: ".bundle/\nvendor/",
        ci_steps: "      - uses: ruby/setup-ruby@v1\n        with:\n          ruby-version: '3.3'\n          working-directory: ./{{NODE_NAME}}\n          bundler-cache: true",
        dev_image: "ruby:3.3",
        dev_command: "bundle exec ruby app.rb",
    },
];

/// Profile for `language`.
pub fn profile(language: Language) -> &'static LanguageProfile {
    // PROFILES covers every language; checked in tests
    PROFILES
        .iter()
        .find(|p| p.language == language)
        .unwrap_or(&PROFILES[0])
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Every built-in template.
#[instrument]
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    let mut templates = Vec::new();

    for profile in &PROFILES {
        templates.extend(language_templates(profile)?);
    }
    templates.push(go_rest_builtin()?);
    templates.push(go_grpc_builtin()?);
    templates.push(project_readme()?);
    templates.push(project_deepsource()?);

    debug!(count = templates.len(), "Built-in templates assembled");
    Ok(templates)
}

fn language_templates(profile: &LanguageProfile) -> Result<Vec<Template>, DomainError> {
    let root = profile.language.template_root();
    let lang = profile.language.display_name();
    let ctx = profile.context();
    let specialise = |source: &str| ctx.render(source);

    let source_files = rest_openapi_sources(profile.language)
        .iter()
        .map(|(path, content)| file(path, (*content).to_string()))
        .collect();

    Ok(vec![
        template(
            &format!("{root}/rest-openapi"),
            &format!("{lang} REST server from an OpenAPI document"),
            source_files,
        )?,
        template(
            &format!("{root}/dockerfile"),
            &format!("{lang} multi-stage container build"),
            vec![
                file("Dockerfile", specialise(DOCKERFILE)),
                file(".dockerignore", specialise(DOCKERIGNORE)),
            ],
        )?,
        template(
            &format!("{root}/kubernetes-server"),
            "Deployment and Service for a REST server",
            vec![
                file("kubernetes/deployment.yaml", specialise(K8S_DEPLOYMENT_SERVER)),
                file("kubernetes/service.yaml", specialise(K8S_SERVICE)),
            ],
        )?,
        template(
            &format!("{root}/kubernetes-worker"),
            "Deployment for a service without an HTTP port",
            vec![file("kubernetes/deployment.yaml", specialise(K8S_DEPLOYMENT_WORKER))],
        )?,
        template(
            &format!("{root}/github-actions"),
            &format!("{lang} container image workflow"),
            vec![file(
                ".github/workflows/{{NODE_NAME}}-container-image.yml",
                specialise(GITHUB_WORKFLOW),
            )],
        )?,
        template(
            &format!("{root}/devspace-server"),
            "Devspace dev loop with port forwarding",
            vec![
                file("devspace.yaml", specialise(DEVSPACE_SERVER)),
                executable("devspace_start.sh", specialise(DEVSPACE_START)),
            ],
        )?,
        template(
            &format!("{root}/devspace-worker"),
            "Devspace dev loop",
            vec![
                file("devspace.yaml", specialise(DEVSPACE_WORKER)),
                executable("devspace_start.sh", specialise(DEVSPACE_START)),
            ],
        )?,
    ])
}

fn go_rest_builtin() -> Result<Template, DomainError> {
    template(
        "go/rest-builtin",
        "Go REST server on net/http with a health endpoint",
        vec![
            file("go.mod", GO_MOD.to_string()),
            file("main.go", GO_REST_BUILTIN_MAIN.to_string()),
        ],
    )
}

fn go_grpc_builtin() -> Result<Template, DomainError> {
    template(
        "go/grpc-builtin",
        "Go gRPC server with the standard health service",
        vec![
            file("go.mod", GO_GRPC_MOD.to_string()),
            file("cmd/grpc-server/main.go", GO_GRPC_MAIN.to_string()),
        ],
    )
}

fn project_readme() -> Result<Template, DomainError> {
    template(
        "project/readme",
        "Project overview listing services and connections",
        vec![file("README.md", README.to_string())],
    )
}

fn project_deepsource() -> Result<Template, DomainError> {
    template(
        "project/deepsource",
        "DeepSource analyzers for the languages in use",
        vec![file(".deepsource.toml", DEEPSOURCE.to_string())],
    )
}

// ── Builders ──────────────────────────────────────────────────────────────────

fn template(name: &str, description: &str, files: Vec<TemplateNode>) -> Result<Template, DomainError> {
    let namespace = name.split('/').next().unwrap_or(name);
    let artifact = name.rsplit('/').next().unwrap_or(name);

    files
        .into_iter()
        .fold(
            Template::builder()
                .id(TemplateId::new(name, BUILTIN_VERSION))
                .metadata(
                    TemplateMetadata::new(name)
                        .description(description)
                        .tags(vec![namespace.to_string(), artifact.to_string()]),
                ),
            |builder, node| builder.add_node(node),
        )
        .build()
}

fn file(path: &'static str, content: String) -> TemplateNode {
    TemplateNode::File(FileSpec::new(path, TemplateContent::parameterized(content)))
}

fn executable(path: &'static str, content: String) -> TemplateNode {
    TemplateNode::File(FileSpec::new(path, TemplateContent::parameterized(content)).executable())
}

// ── Source bundles ────────────────────────────────────────────────────────────

fn rest_openapi_sources(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::Go => &[("go.mod", GO_MOD), ("main.go", GO_OPENAPI_MAIN)],
        Language::Python => &[
            ("main.py", PYTHON_MAIN),
            ("requirements.txt", PYTHON_REQUIREMENTS),
        ],
        Language::Java => &[
            ("pom.xml", JAVA_POM),
            ("src/main/java/{{PACKAGE_PATH}}/Application.java", JAVA_APPLICATION),
            ("src/main/java/{{PACKAGE_PATH}}/ApiController.java", JAVA_CONTROLLER),
            ("src/main/resources/application.properties", JAVA_PROPERTIES),
        ],
        Language::Rust => &[("Cargo.toml", RUST_CARGO), ("src/main.rs", RUST_MAIN)],
        Language::JavaScript => &[("package.json", JS_PACKAGE), ("index.js", JS_INDEX)],
        Language::TypeScript => &[
            ("package.json", TS_PACKAGE),
            ("tsconfig.json", TS_CONFIG),
            ("src/index.ts", TS_INDEX),
        ],
        Language::Ruby => &[("Gemfile", RUBY_GEMFILE), ("app.rb", RUBY_APP)],
    }
}

const GO_MOD: &str = "module {{MODULE_PATH}}\n\ngo 1.23\n";

const GO_OPENAPI_MAIN: &str = r#"package main

import (
	"log"
	"net/http"
	"os"
)

func main() {
	mux := http.NewServeMux()

{{ROUTES}}

	port := os.Getenv("PORT")
	if port == "" {
		port = "{{PORT}}"
	}
	log.Printf("{{API_TITLE}} {{API_VERSION}} listening on :%s", port)
	log.Fatal(http.ListenAndServe(":"+port, mux))
}
"#;

const GO_REST_BUILTIN_MAIN: &str = r#"package main

import (
	"log"
	"net/http"
	"os"
)

func main() {
	mux := http.NewServeMux()
	mux.HandleFunc("GET /health", func(w http.ResponseWriter, r *http.Request) {
		w.WriteHeader(http.StatusOK)
		_, _ = w.Write([]byte("ok"))
	})

	port := os.Getenv("PORT")
	if port == "" {
		port = "{{PORT}}"
	}
	log.Printf("{{NODE_NAME}} listening on :%s", port)
	log.Fatal(http.ListenAndServe(":"+port, mux))
}
"#;

const GO_GRPC_MOD: &str = "module {{MODULE_PATH}}\n\ngo 1.23\n\nrequire google.golang.org/grpc v1.67.1\n";

const GO_GRPC_MAIN: &str = r#"package main

import (
	"log"
	"net"

	"google.golang.org/grpc"
	"google.golang.org/grpc/health"
	healthpb "google.golang.org/grpc/health/grpc_health_v1"
)

func main() {
	lis, err := net.Listen("tcp", ":{{GRPC_PORT}}")
	if err != nil {
		log.Fatalf("failed to listen: %v", err)
	}

	s := grpc.NewServer()
	healthpb.RegisterHealthServer(s, health.NewServer())

	log.Printf("{{NODE_NAME}} gRPC server listening on %v", lis.Addr())
	if err := s.Serve(lis); err != nil {
		log.Fatalf("failed to serve: %v", err)
	}
}
"#;

const PYTHON_MAIN: &str = r#"from fastapi import FastAPI, HTTPException
import uvicorn

app = FastAPI(title="{{API_TITLE}}", version="{{API_VERSION}}")


{{ROUTES}}


if __name__ == "__main__":
    uvicorn.run(app, host="0.0.0.0", port={{PORT}})
"#;

const PYTHON_REQUIREMENTS: &str = "fastapi>=0.115\nuvicorn[standard]>=0.32\n";

const JAVA_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.3.5</version>
        <relativePath/>
    </parent>

    <groupId>{{PACKAGE}}</groupId>
    <artifactId>{{NODE_NAME_KEBAB}}</artifactId>
    <version>{{API_VERSION}}</version>
    <name>{{API_TITLE}}</name>

    <properties>
        <java.version>21</java.version>
    </properties>

    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
    </dependencies>

    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
            </plugin>
        </plugins>
    </build>
</project>
"#;

const JAVA_APPLICATION: &str = r#"package {{PACKAGE}};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class Application {
    public static void main(String[] args) {
        SpringApplication.run(Application.class, args);
    }
}
"#;

const JAVA_CONTROLLER: &str = r#"package {{PACKAGE}};

import org.springframework.http.HttpStatus;
import org.springframework.http.ResponseEntity;
import org.springframework.web.bind.annotation.RequestMapping;
import org.springframework.web.bind.annotation.RequestMethod;
import org.springframework.web.bind.annotation.RestController;

@RestController
public class ApiController {

{{ROUTES}}
}
"#;

const JAVA_PROPERTIES: &str = "spring.application.name={{NODE_NAME_KEBAB}}\nserver.port=${PORT:{{PORT}}}\n";

const RUST_CARGO: &str = r#"[package]
name = "{{NODE_NAME_KEBAB}}"
version = "{{API_VERSION}}"
edition = "2021"

[dependencies]
axum = "0.8"
tokio = { version = "1", features = ["full"] }
"#;

const RUST_MAIN: &str = r#"#![allow(unused_imports)]

use axum::{
    Router,
    http::StatusCode,
    routing::{MethodFilter, delete, get, head, on, options, patch, post, put},
};

#[tokio::main]
async fn main() {
    let app = Router::new()
{{ROUTES}};

    let port = std::env::var("PORT").unwrap_or_else(|_| "{{PORT}}".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");
    println!("{{API_TITLE}} listening on {port}");
    axum::serve(listener, app).await.expect("server error");
}
"#;

const JS_PACKAGE: &str = r#"{
  "name": "{{NODE_NAME_KEBAB}}",
  "version": "{{API_VERSION}}",
  "private": true,
  "main": "index.js",
  "scripts": {
    "start": "node index.js"
  },
  "dependencies": {
    "express": "^4.21.1"
  }
}
"#;

const JS_INDEX: &str = r#"const express = require('express');

const app = express();
app.use(express.json());

{{ROUTES}}

const port = process.env.PORT || {{PORT}};
app.listen(port, () => {
  console.log(`{{API_TITLE}} listening on port ${port}`);
});
"#;

const TS_PACKAGE: &str = r#"{
  "name": "{{NODE_NAME_KEBAB}}",
  "version": "{{API_VERSION}}",
  "private": true,
  "main": "dist/index.js",
  "scripts": {
    "build": "tsc",
    "start": "node dist/index.js",
    "dev": "ts-node-dev --respawn src/index.ts"
  },
  "dependencies": {
    "express": "^4.21.1"
  },
  "devDependencies": {
    "@types/express": "^5.0.0",
    "@types/node": "^22.9.0",
    "ts-node-dev": "^2.0.0",
    "typescript": "^5.6.3"
  }
}
"#;

const TS_CONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2022",
    "module": "commonjs",
    "rootDir": "src",
    "outDir": "dist",
    "strict": true,
    "esModuleInterop": true
  }
}
"#;

const TS_INDEX: &str = r#"import express, { Request, Response } from 'express';

const app = express();
app.use(express.json());

{{ROUTES}}

const port = Number(process.env.PORT ?? {{PORT}});
app.listen(port, () => {
  console.log(`{{API_TITLE}} listening on port ${port}`);
});
"#;

const RUBY_GEMFILE: &str = r#"source 'https://rubygems.org'

gem 'json'
gem 'puma'
gem 'rackup'
gem 'sinatra'
"#;

const RUBY_APP: &str = r#"require 'json'
require 'sinatra'

set :bind, '0.0.0.0'
set :port, ENV.fetch('PORT', {{PORT}})

{{ROUTES}}
"#;

// ── Integration templates (pre-rendered with a LanguageProfile) ───────────────

const DOCKERFILE: &str = r#"# {{NODE_NAME}} ({{LANGUAGE}})
FROM {{BUILD_IMAGE}} AS build
WORKDIR /src
COPY . .
{{BUILD_STEPS}}

FROM {{RUNTIME_IMAGE}}
WORKDIR /app
{{COPY_ARTIFACTS}}
{{EXPOSE}}
CMD {{RUN_COMMAND}}
"#;

const DOCKERIGNORE: &str = "Dockerfile\n.dockerignore\nkubernetes/\ndevspace.yaml\ndevspace_start.sh\n{{DOCKER_IGNORE}}\n";

const K8S_DEPLOYMENT_SERVER: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{NODE_NAME_KEBAB}}
  labels:
    app: {{NODE_NAME_KEBAB}}
spec:
  replicas: 1
  selector:
    matchLabels:
      app: {{NODE_NAME_KEBAB}}
  template:
    metadata:
      labels:
        app: {{NODE_NAME_KEBAB}}
    spec:
      containers:
        - name: {{NODE_NAME_KEBAB}}
          image: {{IMAGE}}:latest
          env:
            - name: PORT
              value: "{{PORT}}"
          ports:
            - containerPort: {{PORT}}
"#;

const K8S_DEPLOYMENT_WORKER: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{NODE_NAME_KEBAB}}
  labels:
    app: {{NODE_NAME_KEBAB}}
spec:
  replicas: 1
  selector:
    matchLabels:
      app: {{NODE_NAME_KEBAB}}
  template:
    metadata:
      labels:
        app: {{NODE_NAME_KEBAB}}
    spec:
      containers:
        - name: {{NODE_NAME_KEBAB}}
          image: {{IMAGE}}:latest
"#;

const K8S_SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: {{NODE_NAME_KEBAB}}
  labels:
    app: {{NODE_NAME_KEBAB}}
spec:
  selector:
    app: {{NODE_NAME_KEBAB}}
  ports:
    - name: http
      port: {{PORT}}
      targetPort: {{PORT}}
"#;

const GITHUB_WORKFLOW: &str = r#"name: {{NODE_NAME}}-container-image

on:
  push:
    branches: [main]
    paths:
      - '{{NODE_NAME}}/**'
      - '.github/workflows/{{NODE_NAME}}-container-image.yml'
  pull_request:
    paths:
      - '{{NODE_NAME}}/**'

jobs:
  build:
    runs-on: ubuntu-latest
    permissions:
      contents: read
      packages: write
    steps:
      - uses: actions/checkout@v4
{{CI_STEPS}}
      - uses: docker/setup-buildx-action@v3
      - uses: docker/login-action@v3
        if: github.event_name != 'pull_request'
        with:
          registry: ghcr.io
          username: ${{ github.actor }}
          password: ${{ secrets.GITHUB_TOKEN }}
      - uses: docker/build-push-action@v6
        with:
          context: ./{{NODE_NAME}}
          push: ${{ github.event_name != 'pull_request' }}
          tags: {{IMAGE}}:${{ github.sha }},{{IMAGE}}:latest
"#;

const DEVSPACE_SERVER: &str = r#"version: v2beta1
name: {{NODE_NAME_KEBAB}}

images:
  {{NODE_NAME_KEBAB}}:
    image: {{IMAGE}}
    dockerfile: ./Dockerfile

deployments:
  {{NODE_NAME_KEBAB}}:
    kubectl:
      manifests:
        - kubernetes/

dev:
  {{NODE_NAME_KEBAB}}:
    imageSelector: {{IMAGE}}
    devImage: {{DEV_IMAGE}}
    sync:
      - path: ./
    terminal:
      command: ./devspace_start.sh
    ports:
      - port: "{{PORT}}"
"#;

const DEVSPACE_WORKER: &str = r#"version: v2beta1
name: {{NODE_NAME_KEBAB}}

images:
  {{NODE_NAME_KEBAB}}:
    image: {{IMAGE}}
    dockerfile: ./Dockerfile

deployments:
  {{NODE_NAME_KEBAB}}:
    kubectl:
      manifests:
        - kubernetes/

dev:
  {{NODE_NAME_KEBAB}}:
    imageSelector: {{IMAGE}}
    devImage: {{DEV_IMAGE}}
    sync:
      - path: ./
    terminal:
      command: ./devspace_start.sh
"#;

const DEVSPACE_START: &str = r#"#!/bin/bash
set +e

COLOR_BLUE="\033[0;94m"
COLOR_RESET="\033[0m"

echo -e "${COLOR_BLUE}
Welcome to the {{NODE_NAME}} dev container.
Start the service with: {{DEV_COMMAND}}
${COLOR_RESET}"

bash
"#;

// ── Project templates ─────────────────────────────────────────────────────────

const README: &str = r#"# {{PROJECT_NAME}}

Source repository: `{{GIT_PLATFORM_USER_NAME}}/{{GIT_REPOSITORY_NAME}}`

## Services ({{NODE_COUNT}})

{{NODE_TABLE}}

## Connections

{{EDGE_LIST}}

## Layout

Each service directory holds its source scaffolding, a `Dockerfile`,
Kubernetes manifests under `kubernetes/` and a `devspace.yaml` for the inner
dev loop. Container images are built by the workflows in `.github/workflows/`.
"#;

const DEEPSOURCE: &str = "version = 1\n\n{{ANALYZERS}}\n";

// ── Tests ─────────────────────────────────────────────────────────────────────

//! The port bundle handed to generators and copiers for one run.

use std::cell::Cell;
use std::path::Path;

use tracing::debug;

use super::{Filesystem, TemplateRenderer, TemplateStore};
use crate::domain::{FsEntry, ProjectStructure, RenderContext};
use crate::error::ForgeResult;

/// Borrowed ports plus a running count of files written.
///
/// Created by `GenerationService` per run; never shared across threads.
pub struct GenerationPorts<'a> {
    store: &'a dyn TemplateStore,
    renderer: &'a dyn TemplateRenderer,
    filesystem: &'a dyn Filesystem,
    files_written: Cell<usize>,
}

impl<'a> GenerationPorts<'a> {
    pub fn new(
        store: &'a dyn TemplateStore,
        renderer: &'a dyn TemplateRenderer,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            files_written: Cell::new(0),
        }
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem
    }

    pub fn files_written(&self) -> usize {
        self.files_written.get()
    }

    /// Resolve `template_name`, render it with `context` and write the result
    /// below `root`. Returns the number of files written.
    pub fn render_template(
        &self,
        template_name: &str,
        context: &RenderContext,
        root: &Path,
    ) -> ForgeResult<usize> {
        let template = self.store.resolve(template_name)?;
        debug!(template = %template.id, root = %root.display(), "Rendering template");
        let structure = self.renderer.render(&template, context, root)?;
        self.write_structure(&structure)
    }

    /// Write every entry of `structure`, creating parents as needed.
    pub fn write_structure(&self, structure: &ProjectStructure) -> ForgeResult<usize> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        let mut written = 0;
        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(dir.path.as_path()))?;
                }
                FsEntry::File(file) => {
                    let path = root.join(file.path.as_path());
                    self.write_file(&path, &file.content)?;
                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                    written += 1;
                }
            }
        }
        Ok(written)
    }

    /// Write one file, creating its parent directory first.
    pub fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)?;
        self.files_written.set(self.files_written.get() + 1);
        Ok(())
    }
}

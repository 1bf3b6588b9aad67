//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use polyforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId},
    error::ForgeResult,
};
use tracing::{debug, info};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store keyed by `name@version`.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in catalog loaded.
    pub fn with_builtin() -> ForgeResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    pub fn load_builtin(&self) -> ForgeResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    /// Load templates from `dir`. Every template loaded replaces all
    /// versions registered under the same name. Returns how many were loaded.
    pub fn load_overrides(&self, dir: &Path) -> ForgeResult<usize> {
        let templates = FilesystemTemplateLoader::new(dir).load_all()?;
        let count = templates.len();

        let mut inner = self.write()?;
        for template in templates {
            validator::validate_template(&template)?;
            inner.retain(|id, _| id.name() != template.id.name());
            debug!(template = %template.id, "Template overridden");
            inner.insert(template.id.clone(), template);
        }

        info!(count, dir = %dir.display(), "Loaded template overrides");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> ForgeResult<RwLockReadGuard<'_, BTreeMap<TemplateId, Template>>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> ForgeResult<RwLockWriteGuard<'_, BTreeMap<TemplateId, Template>>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> ForgeResult<Template> {
        self.read()?.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateResolution {
                reason: format!("Template not found: {id}"),
            }
            .into()
        })
    }

    fn list(&self) -> ForgeResult<Vec<Template>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> ForgeResult<()> {
        validator::validate_template(&template)?;
        self.write()?.insert(template.id.clone(), template);
        Ok(())
    }
}

//! Project item store.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ProjectError, ProjectResult};
use crate::models::ProjectItem;

/// In-memory store of project items, keyed by type and id.
///
/// Items of a type keep their insertion order; the templating subsystem
/// iterates them in that order. Mutating operations are rejected for items
/// contributed by the engine, a plugin or the studio.
#[derive(Debug, Default)]
pub struct ProjectStore {
    items: HashMap<String, Vec<ProjectItem>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new item. Fails if an item with the same type and id exists.
    pub fn insert(&mut self, item: ProjectItem) -> ProjectResult<()> {
        let bucket = self.items.entry(item.type_id.clone()).or_default();
        if bucket.iter().any(|existing| existing.id == item.id) {
            return Err(ProjectError::DuplicateItem {
                type_id: item.type_id,
                item_id: item.id,
            });
        }
        debug!("Inserting item {}/{}", item.type_id, item.id);
        bucket.push(item);
        Ok(())
    }

    /// Replace an existing project-contributed item.
    pub fn update(&mut self, item: ProjectItem) -> ProjectResult<()> {
        let bucket = self
            .items
            .get_mut(&item.type_id)
            .ok_or_else(|| ProjectError::ItemNotFound {
                type_id: item.type_id.clone(),
                item_id: item.id.clone(),
            })?;

        let existing = bucket
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| ProjectError::ItemNotFound {
                type_id: item.type_id.clone(),
                item_id: item.id.clone(),
            })?;

        if existing.contributor.is_read_only() {
            return Err(ProjectError::ReadOnlyItem {
                type_id: item.type_id,
                item_id: item.id,
                contributor: existing.contributor,
            });
        }

        debug!("Updating item {}/{}", item.type_id, item.id);
        *existing = item;
        Ok(())
    }

    /// Remove a project-contributed item, returning it so callers can raise
    /// the deletion trigger.
    pub fn remove(&mut self, type_id: &str, item_id: &str) -> ProjectResult<ProjectItem> {
        let bucket = self
            .items
            .get_mut(type_id)
            .ok_or_else(|| ProjectError::ItemNotFound {
                type_id: type_id.to_string(),
                item_id: item_id.to_string(),
            })?;

        let position = bucket
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| ProjectError::ItemNotFound {
                type_id: type_id.to_string(),
                item_id: item_id.to_string(),
            })?;

        if bucket[position].contributor.is_read_only() {
            return Err(ProjectError::ReadOnlyItem {
                type_id: type_id.to_string(),
                item_id: item_id.to_string(),
                contributor: bucket[position].contributor,
            });
        }

        debug!("Removing item {}/{}", type_id, item_id);
        Ok(bucket.remove(position))
    }

    /// Get an item by type and id.
    pub fn get(&self, type_id: &str, item_id: &str) -> Option<&ProjectItem> {
        self.items
            .get(type_id)
            .and_then(|bucket| bucket.iter().find(|item| item.id == item_id))
    }

    /// Items of a type, in insertion order.
    pub fn items_of_type(&self, type_id: &str) -> &[ProjectItem] {
        self.items
            .get(type_id)
            .map(|bucket| bucket.as_slice())
            .unwrap_or(&[])
    }

    /// All items across types.
    pub fn all(&self) -> impl Iterator<Item = &ProjectItem> {
        self.items.values().flatten()
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Check if the store has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Generation triggers.

/// A discrete event that re-triggers template generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationTrigger {
    /// The set of installed plugins changed.
    InstalledPluginsChanged,
    /// An item of the given type was deleted.
    ItemDeleted { type_id: String },
    /// An item was created or edited.
    ItemSaved { type_id: String, item_id: String },
}

impl std::fmt::Display for GenerationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationTrigger::InstalledPluginsChanged => write!(f, "installed plugins changed"),
            GenerationTrigger::ItemDeleted { type_id } => {
                write!(f, "item of type '{}' deleted", type_id)
            }
            GenerationTrigger::ItemSaved { type_id, item_id } => {
                write!(f, "item {}/{} saved", type_id, item_id)
            }
        }
    }
}

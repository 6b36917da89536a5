//! Ordered layer storage
//!
//! The stack is split at an insert index: `[0, insert_index)` holds regular
//! layers in push order, `[insert_index, len)` holds overlays in push order.
//! Forward iteration therefore visits every layer before every overlay, and
//! reverse iteration hands overlays the first look at events.

use super::{Layer, LayerId, LayerInfo};

/// One stack slot
pub struct StackEntry {
    id: LayerId,
    layer: Box<dyn Layer>,
    visible: bool,
}

impl StackEntry {
    /// Identity assigned at push
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The layer
    pub fn layer(&self) -> &dyn Layer {
        &*self.layer
    }

    /// The layer, mutably
    pub fn layer_mut(&mut self) -> &mut (dyn Layer + 'static) {
        &mut *self.layer
    }

    /// Whether update and render reach this layer
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Layers and overlays in draw order
#[derive(Default)]
pub struct LayerStack {
    entries: Vec<StackEntry>,
    insert_index: usize,
    next_id: u64,
}

impl LayerStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the end of the layer segment and attach
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let id = self.allocate_id();
        self.entries.insert(
            self.insert_index,
            StackEntry {
                id,
                layer,
                visible: true,
            },
        );
        self.insert_index += 1;

        let entry = &mut self.entries[self.insert_index - 1];
        log::debug!("Pushed layer '{}' ({id})", entry.layer.name());
        entry.layer.on_attach();
        id
    }

    /// Append to the overlay segment and attach
    pub fn push_overlay(&mut self, overlay: Box<dyn Layer>) -> LayerId {
        let id = self.allocate_id();
        self.entries.push(StackEntry {
            id,
            layer: overlay,
            visible: true,
        });

        if let Some(entry) = self.entries.last_mut() {
            log::debug!("Pushed overlay '{}' ({id})", entry.layer.name());
            entry.layer.on_attach();
        }
        id
    }

    /// Detach and remove a regular layer
    ///
    /// Only the layer segment is searched. Returns `None`, leaving the stack
    /// untouched, if `id` is not a regular layer here.
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let index = self.entries[..self.insert_index]
            .iter()
            .position(|entry| entry.id == id)?;

        self.entries[index].layer.on_detach();
        let entry = self.entries.remove(index);
        self.insert_index -= 1;
        log::debug!("Popped layer '{}' ({id})", entry.layer.name());
        Some(entry.layer)
    }

    /// Detach and remove an overlay
    ///
    /// Only the overlay segment is searched. Returns `None`, leaving the
    /// stack untouched, if `id` is not an overlay here.
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let index = self.insert_index
            + self.entries[self.insert_index..]
                .iter()
                .position(|entry| entry.id == id)?;

        self.entries[index].layer.on_detach();
        let entry = self.entries.remove(index);
        log::debug!("Popped overlay '{}' ({id})", entry.layer.name());
        Some(entry.layer)
    }

    /// Entries bottom to top; call `.rev()` for event order
    pub fn iter(&self) -> std::slice::Iter<'_, StackEntry> {
        self.entries.iter()
    }

    /// Entries bottom to top, mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, StackEntry> {
        self.entries.iter_mut()
    }

    /// Ids bottom to top
    pub fn ids(&self) -> Vec<LayerId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Snapshot of every entry bottom to top
    pub fn infos(&self) -> Vec<LayerInfo> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| LayerInfo {
                id: entry.id,
                name: entry.layer.name().to_string(),
                visible: entry.visible,
                overlay: index >= self.insert_index,
            })
            .collect()
    }

    /// Id of the lowest entry named `name`
    pub fn find_by_name(&self, name: &str) -> Option<LayerId> {
        self.entries
            .iter()
            .find(|entry| entry.layer.name() == name)
            .map(|entry| entry.id)
    }

    /// Borrow a layer by id
    pub fn get(&self, id: LayerId) -> Option<&dyn Layer> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(StackEntry::layer)
    }

    /// Mutably borrow a layer by id
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut (dyn Layer + 'static)> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(StackEntry::layer_mut)
    }

    /// Show or hide a layer
    ///
    /// The layer is told only when its visibility actually changes. Returns
    /// `false` if `id` is not in the stack.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        if entry.visible != visible {
            entry.visible = visible;
            log::debug!(
                "Layer '{}' ({id}) is now {}",
                entry.layer.name(),
                if visible { "visible" } else { "hidden" }
            );
            entry.layer.on_visibility_changed(visible);
        }
        true
    }

    /// Visibility of a layer, `None` if it is not in the stack
    pub fn is_visible(&self, id: LayerId) -> Option<bool> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.visible)
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of regular layers
    pub fn layer_count(&self) -> usize {
        self.insert_index
    }

    /// Number of overlays
    pub fn overlay_count(&self) -> usize {
        self.entries.len() - self.insert_index
    }

    fn allocate_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Drop for LayerStack {
    fn drop(&mut self) {
        for entry in &mut self.entries {
            entry.layer.on_detach();
        }
        if !self.entries.is_empty() {
            log::debug!("Layer stack released {} entries", self.entries.len());
        }
    }
}

impl std::fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerStack")
            .field("entries", &self.infos())
            .field("insert_index", &self.insert_index)
            .finish()
    }
}

//! Material handles and the per-session material indexer.
//!
//! Baked surfaces don't hold materials, they hold a dense `material_id` handed out
//! by a [`MaterialIndexer`]. Ids are assigned in first-seen order and never change
//! for the lifetime of the indexer, so every model baked in one session agrees on
//! them. Identity is the `Arc` pointer: two equal-looking materials loaded
//! separately are different materials.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// Surface material as seen by the baker.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Display name
    pub name: String,
    /// Base color (RGBA)
    pub albedo: [f32; 4],
}

impl Material {
    /// Creates an opaque white material.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            albedo: [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Sets the base color.
    #[must_use]
    pub const fn with_albedo(mut self, albedo: [f32; 4]) -> Self {
        self.albedo = albedo;
        self
    }

    /// Wraps the material in a shareable handle.
    #[must_use]
    pub fn into_ref(self) -> MaterialRef {
        Some(Arc::new(self))
    }
}

/// Shared material handle. `None` means "no material" and is a valid entry.
pub type MaterialRef = Option<Arc<Material>>;

/// True if both handles point at the same material (or both are `None`).
#[inline]
#[must_use]
pub fn same_material(a: &MaterialRef, b: &MaterialRef) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Pointer key for the reverse map. The indexer keeps every handle alive, so an
/// address cannot be reused while it is in the map.
fn identity_key(material: &Arc<Material>) -> usize {
    Arc::as_ptr(material) as usize
}

/// Dense, append-only material id assignment.
#[derive(Debug, Default, Clone)]
pub struct MaterialIndexer {
    /// Materials by id
    materials: Vec<MaterialRef>,
    /// Reverse lookup for non-null materials
    reverse_map: HashMap<usize, u32>,
    /// Id of the "no material" entry, once seen
    default_id: Option<u32>,
}

impl MaterialIndexer {
    /// Creates an empty indexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `material`, assigning the next one on first sight.
    pub fn get_or_create_index(&mut self, material: &MaterialRef) -> u32 {
        if let Some(id) = self.index_of(material) {
            return id;
        }

        let id = self.next_id();
        match material {
            Some(m) => {
                self.reverse_map.insert(identity_key(m), id);
            }
            None => self.default_id = Some(id),
        }
        self.materials.push(material.clone());
        id
    }

    /// Id of `material` if it has one.
    #[must_use]
    pub fn index_of(&self, material: &MaterialRef) -> Option<u32> {
        match material {
            Some(m) => self.reverse_map.get(&identity_key(m)).copied(),
            None => self.default_id,
        }
    }

    /// Material for `id`.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&MaterialRef> {
        self.materials.get(id as usize)
    }

    /// All materials, indexed by id.
    #[must_use]
    pub fn materials(&self) -> &[MaterialRef] {
        &self.materials
    }

    /// Consumes the indexer, returning materials indexed by id.
    #[must_use]
    pub fn into_materials(self) -> Vec<MaterialRef> {
        self.materials
    }

    /// Number of ids handed out.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True if no id was handed out.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_id(&self) -> u32 {
        self.materials.len() as u32
    }
}

/// A [`MaterialIndexer`] shared between threads baking the same library.
#[derive(Debug, Default, Clone)]
pub struct SharedMaterialIndexer {
    inner: Arc<Mutex<MaterialIndexer>>,
}

impl SharedMaterialIndexer {
    /// Creates an empty shared indexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locking variant of [`MaterialIndexer::get_or_create_index`].
    pub fn get_or_create_index(&self, material: &MaterialRef) -> u32 {
        self.inner.lock().get_or_create_index(material)
    }

    /// Locks the indexer, e.g. to hold it across a whole model bake.
    pub fn lock(&self) -> MutexGuard<'_, MaterialIndexer> {
        self.inner.lock()
    }

    /// Copy of the current id table.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MaterialRef> {
        self.inner.lock().materials().to_vec()
    }

    /// Number of ids handed out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True if no id was handed out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let stone = Material::new("stone").into_ref();
        let grass = Material::new("grass").into_ref();
        let mut indexer = MaterialIndexer::new();

        assert_eq!(indexer.get_or_create_index(&stone), 0);
        assert_eq!(indexer.get_or_create_index(&grass), 1);
        assert_eq!(indexer.get_or_create_index(&stone), 0);
        assert_eq!(indexer.len(), 2);
    }

    #[test]
    fn test_null_is_its_own_entry() {
        let stone = Material::new("stone").into_ref();
        let mut indexer = MaterialIndexer::new();

        assert_eq!(indexer.get_or_create_index(&stone), 0);
        assert_eq!(indexer.get_or_create_index(&None), 1);
        assert_eq!(indexer.get_or_create_index(&None), 1);
        assert_eq!(indexer.get(1), Some(&None));
    }

    #[test]
    fn test_into_materials_keeps_id_order() {
        let stone = Material::new("stone").into_ref();
        let mut indexer = MaterialIndexer::new();
        indexer.get_or_create_index(&None);
        indexer.get_or_create_index(&stone);

        let materials = indexer.into_materials();
        assert_eq!(materials.len(), 2);
        assert!(materials[0].is_none());
        assert!(same_material(&materials[1], &stone));
    }

    #[test]
    fn test_identity_not_equality() {
        // Same contents, different handles
        let a = Material::new("dirt").into_ref();
        let b = Material::new("dirt").into_ref();
        let mut indexer = MaterialIndexer::new();

        assert_ne!(indexer.get_or_create_index(&a), indexer.get_or_create_index(&b));
        assert!(same_material(&a, &a.clone()));
        assert!(!same_material(&a, &b));
        assert!(same_material(&None, &None));
    }

    #[test]
    fn test_shared_indexer_across_threads() {
        let shared = SharedMaterialIndexer::new();
        let material = Material::new("ore").into_ref();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let material = material.clone();
                std::thread::spawn(move || shared.get_or_create_index(&material))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread panicked"), 0);
        }
        assert_eq!(shared.len(), 1);
        assert!(same_material(&shared.snapshot()[0], &material));
    }
}

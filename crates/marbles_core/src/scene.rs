//! Render scene graph
//!
//! The Scene holds everything the renderer draws: mesh nodes, lights, and the
//! background color. It knows nothing about physics.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

use crate::material::hex_to_rgb;
use crate::MeshNode;

new_key_type! {
    /// Key to a mesh node in the scene
    ///
    /// Uses generational indexing so a key to a removed node never resolves
    /// to a node added later in the same slot.
    pub struct NodeKey;
}

/// A light source
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform light from all directions
    Ambient { color: [f32; 3], intensity: f32 },
    /// Parallel light shining from `position` toward the origin
    Directional {
        color: [f32; 3],
        intensity: f32,
        position: Vec3,
    },
}

impl Light {
    /// White ambient light
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient {
            color: [1.0, 1.0, 1.0],
            intensity,
        }
    }

    /// White directional light placed at `position`, shining at the origin
    pub fn directional(intensity: f32, position: Vec3) -> Self {
        Light::Directional {
            color: [1.0, 1.0, 1.0],
            intensity,
            position,
        }
    }
}

/// Scene graph of meshes and lights
pub struct Scene {
    nodes: SlotMap<NodeKey, MeshNode>,
    lights: Vec<Light>,
    /// Clear color [r, g, b, a]
    pub background: [f32; 4],
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with a sky blue background
    pub fn new() -> Self {
        let [r, g, b] = hex_to_rgb(0x87ceeb);
        Self {
            nodes: SlotMap::with_key(),
            lights: Vec::new(),
            background: [r, g, b, 1.0],
        }
    }

    /// Add a mesh node, returning its key
    pub fn add(&mut self, node: MeshNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Remove a mesh node and return it
    pub fn remove(&mut self, key: NodeKey) -> Option<MeshNode> {
        self.nodes.remove(key)
    }

    /// Get a node by key
    pub fn get(&self, key: NodeKey) -> Option<&MeshNode> {
        self.nodes.get(key)
    }

    /// Get a mutable node by key
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut MeshNode> {
        self.nodes.get_mut(key)
    }

    /// Check whether a key refers to a live node
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterate over keys and nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &MeshNode)> {
        self.nodes.iter()
    }

    /// Get the number of mesh nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All lights in the scene
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Combined ambient term (color * intensity summed over ambient lights)
    pub fn ambient(&self) -> [f32; 3] {
        self.lights.iter().fold([0.0; 3], |mut acc, light| {
            if let Light::Ambient { color, intensity } = light {
                for i in 0..3 {
                    acc[i] += color[i] * intensity;
                }
            }
            acc
        })
    }

    /// The first directional light, if any
    pub fn key_light(&self) -> Option<&Light> {
        self.lights
            .iter()
            .find(|light| matches!(light, Light::Directional { .. }))
    }

    /// Check whether any node has pending changes
    pub fn has_dirty_nodes(&self) -> bool {
        self.nodes.values().any(|node| node.is_dirty())
    }

    /// Clear dirty flags on all nodes
    pub fn clear_all_dirty(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, MeshShape};
    use std::sync::Arc;

    fn node(name: &str) -> MeshNode {
        MeshNode::new(MeshShape::sphere(0.5), Arc::new(Material::default())).with_name(name)
    }

    #[test]
    fn test_scene_new() {
        let scene = Scene::new();
        assert_eq!(scene.node_count(), 0);
        assert!(scene.lights().is_empty());
        assert!((scene.background[0] - 135.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new();
        let key = scene.add(node("a"));
        assert!(scene.contains(key));
        assert_eq!(scene.node_count(), 1);

        let removed = scene.remove(key).unwrap();
        assert_eq!(removed.name.as_deref(), Some("a"));
        assert!(!scene.contains(key));
        assert!(scene.remove(key).is_none());
    }

    #[test]
    fn test_stale_key_does_not_alias() {
        let mut scene = Scene::new();
        let old = scene.add(node("old"));
        scene.remove(old);
        let new = scene.add(node("new"));
        assert_ne!(old, new);
        assert!(scene.get(old).is_none());
    }

    #[test]
    fn test_lights() {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient(0.3));
        scene.add_light(Light::directional(1.5, Vec3::new(10.0, 10.0, 10.0)));

        let ambient = scene.ambient();
        assert!((ambient[0] - 0.3).abs() < 1e-6);
        assert!(matches!(
            scene.key_light(),
            Some(Light::Directional { intensity, .. }) if *intensity == 1.5
        ));
    }

    #[test]
    fn test_dirty_tracking() {
        let mut scene = Scene::new();
        scene.add(node("a"));
        assert!(scene.has_dirty_nodes());
        scene.clear_all_dirty();
        assert!(!scene.has_dirty_nodes());
    }
}

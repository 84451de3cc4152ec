use nalgebra::{Vector2, Vector3};

use super::color::Color;

// ---------------------------------------------------------------------------
// Renderable payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub radius: f64,
    pub color: Color,
}

/// Open or closed polyline in the parent's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vector3<f64>>,
    pub color: Color,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub points: Vec<Vector3<f64>>,
    pub color: Color,
    pub size: f32,              // screen pixels, no attenuation
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpriteContent {
    Label(String),
    Glow,
}

/// Camera-facing quad.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub content: SpriteContent,
    pub scale: Vector2<f64>,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Sphere(Sphere),
    Line(Polyline),
    Points(PointCloud),
    Sprite(Sprite),
    Light(Light),
}

// ---------------------------------------------------------------------------
// Scene graph: arena of nodes with parent/child links
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub position: Vector3<f64>,   // relative to parent
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Slots are never reused, so a stale `NodeId` can only miss, never alias.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    live: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = Node {
            name: "scene".into(),
            kind: NodeKind::Group,
            position: Vector3::zeros(),
            visible: true,
            parent: None,
            children: vec![],
        };
        Self { nodes: vec![Some(root)], live: 1 }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Attach a new visible node under `parent`.
    pub fn add(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        position: Vector3<f64>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            name: name.into(),
            kind,
            position,
            visible: true,
            parent: Some(parent),
            children: vec![],
        }));
        self.live += 1;
        match self.get_mut(parent) {
            Some(p) => p.children.push(id),
            None => log::warn!("node {:?} attached to missing parent {:?}", id, parent),
        }
        id
    }

    /// Remove a node and its whole subtree. Returns how many nodes went away.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root() {
            return 0;
        }
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return 0;
        };
        self.live -= 1;
        if let Some(parent) = node.parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut removed = 1;
        let mut stack = node.children;
        while let Some(child) = stack.pop() {
            if let Some(n) = self.nodes.get_mut(child.0).and_then(Option::take) {
                self.live -= 1;
                removed += 1;
                stack.extend(n.children);
            }
        }
        removed
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.get_mut(id) {
            node.visible = visible;
        }
    }

    /// Position in the scene frame (translations only, no rotation or scale).
    pub fn world_position(&self, id: NodeId) -> Option<Vector3<f64>> {
        let mut node = self.get(id)?;
        let mut pos = node.position;
        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            pos += node.position;
        }
        Some(pos)
    }

    /// A node renders only if it and every ancestor are visible.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.get(cur) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.nodes
            .iter_mut()
            .enumerate()
            .filter_map(|(i, n)| n.as_mut().map(|n| (NodeId(i), n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> NodeKind {
        NodeKind::Sprite(Sprite {
            content: SpriteContent::Label(text.into()),
            scale: Vector2::new(5.0, 2.5),
            color: Color::WHITE,
        })
    }

    #[test]
    fn world_position_accumulates_parents() {
        let mut g = SceneGraph::new();
        let group = g.add(g.root(), "group", NodeKind::Group, Vector3::new(1.0, 0.0, 0.0));
        let body = g.add(group, "body", NodeKind::Group, Vector3::new(0.0, 0.0, 5.0));
        let tag = g.add(body, "label", label("x"), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(g.world_position(tag), Some(Vector3::new(1.0, 3.0, 5.0)));
    }

    #[test]
    fn remove_drops_subtree_and_detaches() {
        let mut g = SceneGraph::new();
        let body = g.add(g.root(), "body", NodeKind::Group, Vector3::zeros());
        let tag = g.add(body, "label", label("x"), Vector3::zeros());
        assert_eq!(g.len(), 3);
        assert_eq!(g.remove(body), 2);
        assert_eq!(g.len(), 1);
        assert!(!g.contains(tag));
        assert!(g.get(g.root()).unwrap().children().is_empty());
        assert_eq!(g.remove(body), 0, "second removal is a no-op");
    }

    #[test]
    fn hidden_parent_hides_children() {
        let mut g = SceneGraph::new();
        let body = g.add(g.root(), "body", NodeKind::Group, Vector3::zeros());
        let tag = g.add(body, "label", label("x"), Vector3::zeros());
        assert!(g.is_rendered(tag));
        g.set_visible(body, false);
        assert!(!g.is_rendered(tag));
        assert!(g.get(tag).unwrap().visible);
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut g = SceneGraph::new();
        assert_eq!(g.remove(g.root()), 0);
        assert_eq!(g.len(), 1);
    }
}

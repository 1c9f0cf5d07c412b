use crate::scene::NodeHandle;

/// Node property a track writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    /// Morph target influences.
    Weights,
}

/// Track `track_index` of a clip, resolved to a concrete node.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node: NodeHandle,
    pub target: TargetPath,
}

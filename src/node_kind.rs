use serde::{Deserialize, Serialize};

/// The catalog of pipeline node variants.
///
/// Each variant is purely a tag; everything about its appearance and
/// behaviour lives in the [`crate::schema::NodeSchema`] returned by
/// [`crate::catalog::schema_for`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Output,
    Llm,
    Text,
    Transform,
    Filter,
    Delay,
    Aggregator,
    ApiCall,
    Math,
    Note,
}

impl NodeKind {
    /// All variants, in the order they appear in the palette.
    pub const ALL: [NodeKind; 11] = [
        NodeKind::Input,
        NodeKind::Llm,
        NodeKind::Output,
        NodeKind::Text,
        NodeKind::Transform,
        NodeKind::Filter,
        NodeKind::Delay,
        NodeKind::Aggregator,
        NodeKind::ApiCall,
        NodeKind::Math,
        NodeKind::Note,
    ];
}

use serde::{Deserialize, Serialize};

/// Fixed id of the single Business Model Canvas.
pub const BUSINESS_MODEL_ID: &str = "default-bmc";

/// First line of value-propositions content derived from the Value Proposition Canvas.
pub const VALUE_PROPOSITIONS_MARKER: &str = "Linked from VP Canvas:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessModelBlockType {
    KeyPartners,
    KeyActivities,
    KeyResources,
    ValuePropositions,
    CustomerRelationships,
    Channels,
    CustomerSegments,
    CostStructure,
    RevenueStreams,
}

impl BusinessModelBlockType {
    pub const ALL: [BusinessModelBlockType; 9] = [
        BusinessModelBlockType::KeyPartners,
        BusinessModelBlockType::KeyActivities,
        BusinessModelBlockType::KeyResources,
        BusinessModelBlockType::ValuePropositions,
        BusinessModelBlockType::CustomerRelationships,
        BusinessModelBlockType::Channels,
        BusinessModelBlockType::CustomerSegments,
        BusinessModelBlockType::CostStructure,
        BusinessModelBlockType::RevenueStreams,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessModelBlockType::KeyPartners => "keyPartners",
            BusinessModelBlockType::KeyActivities => "keyActivities",
            BusinessModelBlockType::KeyResources => "keyResources",
            BusinessModelBlockType::ValuePropositions => "valuePropositions",
            BusinessModelBlockType::CustomerRelationships => "customerRelationships",
            BusinessModelBlockType::Channels => "channels",
            BusinessModelBlockType::CustomerSegments => "customerSegments",
            BusinessModelBlockType::CostStructure => "costStructure",
            BusinessModelBlockType::RevenueStreams => "revenueStreams",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BusinessModelBlockType::KeyPartners => "Key Partners",
            BusinessModelBlockType::KeyActivities => "Key Activities",
            BusinessModelBlockType::KeyResources => "Key Resources",
            BusinessModelBlockType::ValuePropositions => "Value Propositions",
            BusinessModelBlockType::CustomerRelationships => "Customer Relationships",
            BusinessModelBlockType::Channels => "Channels",
            BusinessModelBlockType::CustomerSegments => "Customer Segments",
            BusinessModelBlockType::CostStructure => "Cost Structure",
            BusinessModelBlockType::RevenueStreams => "Revenue Streams",
        }
    }

    /// Blocks whose financial-hypotheses input is shown.
    pub fn is_financial(&self) -> bool {
        matches!(
            self,
            BusinessModelBlockType::CostStructure | BusinessModelBlockType::RevenueStreams
        )
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessModelBlockData {
    pub content: String,
    pub financial_hypotheses: String,
    /// Content is derived from the Value Proposition Canvas and read-only.
    #[serde(skip_serializing_if = "is_false")]
    pub linked: bool,
}

/// The nine canonical blocks. Missing keys in stored JSON load as empty blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessModelBlocks {
    pub key_partners: BusinessModelBlockData,
    pub key_activities: BusinessModelBlockData,
    pub key_resources: BusinessModelBlockData,
    pub value_propositions: BusinessModelBlockData,
    pub customer_relationships: BusinessModelBlockData,
    pub channels: BusinessModelBlockData,
    pub customer_segments: BusinessModelBlockData,
    pub cost_structure: BusinessModelBlockData,
    pub revenue_streams: BusinessModelBlockData,
}

impl BusinessModelBlocks {
    pub fn get(&self, block: BusinessModelBlockType) -> &BusinessModelBlockData {
        match block {
            BusinessModelBlockType::KeyPartners => &self.key_partners,
            BusinessModelBlockType::KeyActivities => &self.key_activities,
            BusinessModelBlockType::KeyResources => &self.key_resources,
            BusinessModelBlockType::ValuePropositions => &self.value_propositions,
            BusinessModelBlockType::CustomerRelationships => &self.customer_relationships,
            BusinessModelBlockType::Channels => &self.channels,
            BusinessModelBlockType::CustomerSegments => &self.customer_segments,
            BusinessModelBlockType::CostStructure => &self.cost_structure,
            BusinessModelBlockType::RevenueStreams => &self.revenue_streams,
        }
    }

    pub fn get_mut(&mut self, block: BusinessModelBlockType) -> &mut BusinessModelBlockData {
        match block {
            BusinessModelBlockType::KeyPartners => &mut self.key_partners,
            BusinessModelBlockType::KeyActivities => &mut self.key_activities,
            BusinessModelBlockType::KeyResources => &mut self.key_resources,
            BusinessModelBlockType::ValuePropositions => &mut self.value_propositions,
            BusinessModelBlockType::CustomerRelationships => &mut self.customer_relationships,
            BusinessModelBlockType::Channels => &mut self.channels,
            BusinessModelBlockType::CustomerSegments => &mut self.customer_segments,
            BusinessModelBlockType::CostStructure => &mut self.cost_structure,
            BusinessModelBlockType::RevenueStreams => &mut self.revenue_streams,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BusinessModelBlockType, &BusinessModelBlockData)> {
        BusinessModelBlockType::ALL
            .into_iter()
            .map(move |block| (block, self.get(block)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessModelCanvasData {
    pub id: String,
    pub blocks: BusinessModelBlocks,
}

impl Default for BusinessModelCanvasData {
    fn default() -> Self {
        Self {
            id: BUSINESS_MODEL_ID.into(),
            blocks: BusinessModelBlocks::default(),
        }
    }
}

impl BusinessModelCanvasData {
    /// Older documents flagged derived content only through the marker prefix.
    pub fn normalize(mut self) -> Self {
        let block = &mut self.blocks.value_propositions;
        if !block.linked && block.content.starts_with(VALUE_PROPOSITIONS_MARKER) {
            block.linked = true;
        }
        self
    }
}

/// Fields to merge into one block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessModelBlockPatch {
    pub content: Option<String>,
    pub financial_hypotheses: Option<String>,
    pub linked: Option<bool>,
}

impl BusinessModelBlockPatch {
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn apply(self, block: &mut BusinessModelBlockData) {
        if let Some(content) = self.content {
            block.content = content;
        }
        if let Some(financial) = self.financial_hypotheses {
            block.financial_hypotheses = financial;
        }
        if let Some(linked) = self.linked {
            block.linked = linked;
        }
    }
}

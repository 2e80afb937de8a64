//! Field-level merge of an incoming store record into a local edit buffer.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::models::{
    BusinessModelBlockType, BusinessModelCanvasData, ProblemCanvasData, ValuePropositionCanvas,
};

/// A fixed-shape document whose user-editable text fields can be addressed
/// individually. Everything that is not an editable field (ids, AI output,
/// provenance flags) always follows the store.
pub trait Canvas: Clone + PartialEq + Send + Sync + 'static {
    type Field: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    fn editable_fields() -> Vec<Self::Field>;

    fn field(&self, field: Self::Field) -> &str;

    fn set_field(&mut self, field: Self::Field, value: String);

    /// Fields rendered read-only in this state of the record.
    fn is_read_only(&self, _field: Self::Field) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    pub record: T,
    /// Whether `record` differs from the local buffer it replaces.
    pub changed: bool,
}

/// Merge `incoming` into `local`, where `base` is the store value `local` was
/// last reconciled against.
///
/// A field in `editing` that is not read-only keeps its local value. Any other
/// field takes the incoming value when the store changed it since `base`, and
/// otherwise keeps its local value, so unsaved edits survive updates that did
/// not touch them. Read-only fields always follow the store.
pub fn reconcile<T: Canvas>(
    local: &T,
    base: &T,
    incoming: &T,
    editing: &HashSet<T::Field>,
) -> Reconciled<T> {
    let mut record = incoming.clone();
    for field in T::editable_fields() {
        if incoming.is_read_only(field) {
            continue;
        }
        let upstream_changed = incoming.field(field) != base.field(field);
        if editing.contains(&field) || !upstream_changed {
            record.set_field(field, local.field(field).to_string());
        }
    }
    let changed = record != *local;
    Reconciled { record, changed }
}

/// Editable fields whose value in `buffer` differs from `baseline`.
pub fn changed_fields<T: Canvas>(buffer: &T, baseline: &T) -> Vec<(T::Field, String)> {
    T::editable_fields()
        .into_iter()
        .filter(|&field| !baseline.is_read_only(field))
        .filter(|&field| buffer.field(field) != baseline.field(field))
        .map(|field| (field, buffer.field(field).to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemField {
    JobsToBeDone,
    Pains,
    Gains,
    InnovatorsBiasCheckInput,
}

impl Canvas for ProblemCanvasData {
    type Field = ProblemField;

    fn editable_fields() -> Vec<ProblemField> {
        vec![
            ProblemField::JobsToBeDone,
            ProblemField::Pains,
            ProblemField::Gains,
            ProblemField::InnovatorsBiasCheckInput,
        ]
    }

    fn field(&self, field: ProblemField) -> &str {
        match field {
            ProblemField::JobsToBeDone => &self.jobs_to_be_done,
            ProblemField::Pains => &self.pains,
            ProblemField::Gains => &self.gains,
            ProblemField::InnovatorsBiasCheckInput => &self.innovators_bias_check_input,
        }
    }

    fn set_field(&mut self, field: ProblemField, value: String) {
        match field {
            ProblemField::JobsToBeDone => self.jobs_to_be_done = value,
            ProblemField::Pains => self.pains = value,
            ProblemField::Gains => self.gains = value,
            ProblemField::InnovatorsBiasCheckInput => self.innovators_bias_check_input = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuePropositionField {
    CustomerJobs,
    CustomerPains,
    CustomerGains,
    ProductsServices,
    PainRelievers,
    GainCreators,
}

impl Canvas for ValuePropositionCanvas {
    type Field = ValuePropositionField;

    fn editable_fields() -> Vec<ValuePropositionField> {
        vec![
            ValuePropositionField::CustomerJobs,
            ValuePropositionField::CustomerPains,
            ValuePropositionField::CustomerGains,
            ValuePropositionField::ProductsServices,
            ValuePropositionField::PainRelievers,
            ValuePropositionField::GainCreators,
        ]
    }

    fn field(&self, field: ValuePropositionField) -> &str {
        match field {
            ValuePropositionField::CustomerJobs => &self.customer_jobs,
            ValuePropositionField::CustomerPains => &self.customer_pains,
            ValuePropositionField::CustomerGains => &self.customer_gains,
            ValuePropositionField::ProductsServices => &self.products_services,
            ValuePropositionField::PainRelievers => &self.pain_relievers,
            ValuePropositionField::GainCreators => &self.gain_creators,
        }
    }

    fn set_field(&mut self, field: ValuePropositionField, value: String) {
        let slot = match field {
            ValuePropositionField::CustomerJobs => &mut self.customer_jobs,
            ValuePropositionField::CustomerPains => &mut self.customer_pains,
            ValuePropositionField::CustomerGains => &mut self.customer_gains,
            ValuePropositionField::ProductsServices => &mut self.products_services,
            ValuePropositionField::PainRelievers => &mut self.pain_relievers,
            ValuePropositionField::GainCreators => &mut self.gain_creators,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockPart {
    Content,
    FinancialHypotheses,
}

/// One text area of the Business Model Canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusinessModelField {
    pub block: BusinessModelBlockType,
    pub part: BlockPart,
}

impl BusinessModelField {
    pub fn content(block: BusinessModelBlockType) -> Self {
        Self {
            block,
            part: BlockPart::Content,
        }
    }

    pub fn financial_hypotheses(block: BusinessModelBlockType) -> Self {
        Self {
            block,
            part: BlockPart::FinancialHypotheses,
        }
    }
}

impl Canvas for BusinessModelCanvasData {
    type Field = BusinessModelField;

    fn editable_fields() -> Vec<BusinessModelField> {
        BusinessModelBlockType::ALL
            .into_iter()
            .flat_map(|block| {
                [
                    BusinessModelField::content(block),
                    BusinessModelField::financial_hypotheses(block),
                ]
            })
            .collect()
    }

    fn field(&self, field: BusinessModelField) -> &str {
        let block = self.blocks.get(field.block);
        match field.part {
            BlockPart::Content => &block.content,
            BlockPart::FinancialHypotheses => &block.financial_hypotheses,
        }
    }

    fn set_field(&mut self, field: BusinessModelField, value: String) {
        let block = self.blocks.get_mut(field.block);
        match field.part {
            BlockPart::Content => block.content = value,
            BlockPart::FinancialHypotheses => block.financial_hypotheses = value,
        }
    }

    fn is_read_only(&self, field: BusinessModelField) -> bool {
        field.part == BlockPart::Content && self.blocks.get(field.block).linked
    }
}

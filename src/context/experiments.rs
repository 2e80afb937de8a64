use chrono::Utc;

use crate::models::{
    generate_id, Hypothesis, Mvp, NewHypothesis, NewMvp, NewTestCard, TestCard,
};

use super::{prompts, AppContext, EnrichOutcome};

const TEST_CARD_LABEL_CHARS: usize = 100;
const MVP_LABEL_CHARS: usize = 30;
const NONE_LINKED: &str = "None linked";

/// First `max` characters of `text`.
pub(super) fn head_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

impl AppContext {
    // Hypotheses

    pub fn hypotheses(&self) -> Vec<Hypothesis> {
        self.hypotheses.all()
    }

    /// New hypotheses start `pending` with `createdAt` set to now.
    pub fn add_hypothesis(&self, input: NewHypothesis) -> Hypothesis {
        self.hypotheses
            .insert(input.into_record(generate_id(), Utc::now()))
    }

    pub fn update_hypothesis(&self, hypothesis: Hypothesis) -> bool {
        self.hypotheses.update(hypothesis)
    }

    /// Test cards and MVPs that reference `id` keep their dangling reference.
    pub fn delete_hypothesis(&self, id: &str) -> bool {
        self.hypotheses.delete(id)
    }

    pub fn get_hypothesis_by_id(&self, id: &str) -> Option<Hypothesis> {
        self.hypotheses.get_by_id(id)
    }

    pub async fn critique_hypothesis(&self, id: &str) -> EnrichOutcome {
        let prompt = self
            .hypotheses
            .get_by_id(id)
            .map(|hypothesis| prompts::hypothesis_critique(&hypothesis));

        self.enrich("Hypothesis critique", prompt, |text| {
            self.hypotheses
                .modify(id, |hypothesis| hypothesis.ai_critique = Some(text))
        })
        .await
    }

    // Test cards

    pub fn test_cards(&self) -> Vec<TestCard> {
        self.test_cards.all()
    }

    pub fn add_test_card(&self, input: NewTestCard) -> TestCard {
        self.test_cards.insert(input.into_record(generate_id()))
    }

    pub fn update_test_card(&self, card: TestCard) -> bool {
        self.test_cards.update(card)
    }

    pub fn delete_test_card(&self, id: &str) -> bool {
        self.test_cards.delete(id)
    }

    pub fn get_test_card_by_id(&self, id: &str) -> Option<TestCard> {
        self.test_cards.get_by_id(id)
    }

    /// The hypothesis a test card checks, as displayed: its description cut to
    /// 100 characters, or the raw id when the hypothesis no longer exists.
    pub fn hypothesis_label(&self, card: &TestCard) -> String {
        match self.hypotheses.get_by_id(&card.hypothesis_id) {
            Some(hypothesis) => {
                let head = head_chars(&hypothesis.description, TEST_CARD_LABEL_CHARS);
                if head.len() < hypothesis.description.len() {
                    format!("{head}...")
                } else {
                    head.to_string()
                }
            }
            None => card.hypothesis_id.clone(),
        }
    }

    // MVPs

    pub fn mvps(&self) -> Vec<Mvp> {
        self.mvps.all()
    }

    pub fn add_mvp(&self, input: NewMvp) -> Mvp {
        self.mvps.insert(input.into_record(generate_id()))
    }

    pub fn update_mvp(&self, mvp: Mvp) -> bool {
        self.mvps.update(mvp)
    }

    pub fn delete_mvp(&self, id: &str) -> bool {
        self.mvps.delete(id)
    }

    pub fn get_mvp_by_id(&self, id: &str) -> Option<Mvp> {
        self.mvps.get_by_id(id)
    }

    pub fn mvp_hypotheses_label(&self, mvp: &Mvp) -> String {
        if mvp.linked_hypothesis_ids.is_empty() {
            return NONE_LINKED.to_string();
        }
        mvp.linked_hypothesis_ids
            .iter()
            .map(|id| match self.hypotheses.get_by_id(id) {
                Some(hypothesis) => {
                    format!("{}...", head_chars(&hypothesis.description, MVP_LABEL_CHARS))
                }
                None => id.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use chrono::Utc;

use crate::models::{generate_id, LearningCard, NewLearningCard};

use super::{experiments::head_chars, prompts, AppContext, EnrichOutcome};

const DRAFT_HYPOTHESIS_CHARS: usize = 50;

impl AppContext {
    pub fn learning_cards(&self) -> Vec<LearningCard> {
        self.learning_cards.all()
    }

    /// `date` is stamped now and never changes afterwards.
    pub fn add_learning_card(&self, input: NewLearningCard) -> LearningCard {
        self.learning_cards
            .insert(input.into_record(generate_id(), Utc::now()))
    }

    pub fn update_learning_card(&self, card: LearningCard) -> bool {
        self.learning_cards.update(card)
    }

    pub fn delete_learning_card(&self, id: &str) -> bool {
        self.learning_cards.delete(id)
    }

    pub fn get_learning_card_by_id(&self, id: &str) -> Option<LearningCard> {
        self.learning_cards.get_by_id(id)
    }

    pub async fn generate_learning_reflection(&self, id: &str) -> EnrichOutcome {
        let prompt = self
            .learning_cards
            .get_by_id(id)
            .map(|card| prompts::learning_reflection(&card));

        self.enrich("Learning reflection", prompt, |text| {
            self.learning_cards
                .modify(id, |card| card.ai_reflection_prompt = Some(text))
        })
        .await
    }

    /// A learning card pre-filled from a finished test card.
    ///
    /// An unknown test card yields an empty draft that still points at it.
    pub fn learning_card_draft(&self, test_card_id: &str) -> NewLearningCard {
        let mut draft = NewLearningCard {
            related_test_card_id: Some(test_card_id.to_string()),
            ..Default::default()
        };
        let Some(card) = self.test_cards.get_by_id(test_card_id) else {
            return draft;
        };

        let hypothesis = if card.hypothesis_id.is_empty() {
            String::new()
        } else {
            let description = self
                .hypotheses
                .get_by_id(&card.hypothesis_id)
                .map(|hypothesis| hypothesis.description)
                .unwrap_or_else(|| card.hypothesis_id.clone());
            format!(
                "(Hypothesis: {}...)",
                head_chars(&description, DRAFT_HYPOTHESIS_CHARS)
            )
        };

        draft.what_we_thought = format!(
            "We believed that {} if we {}, then {}.",
            hypothesis, card.test_description, card.success_criteria
        );
        draft.what_happened = card.results.unwrap_or_default();
        draft.what_we_learned = card.learnings.unwrap_or_default();
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::test_support::context_with,
        llm::MockGenerator,
        models::{NewHypothesis, NewTestCard},
    };

    #[tokio::test]
    async fn draft_is_built_from_test_card() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        let hypothesis = ctx.add_hypothesis(NewHypothesis {
            description: "Freelancers will pay for invoice reminders".into(),
        });
        let card = ctx.add_test_card(NewTestCard {
            hypothesis_id: hypothesis.id,
            test_description: "run a landing page".into(),
            success_criteria: "5% sign up".into(),
            results: Some("2% signed up".into()),
            learnings: Some("Price anchoring matters".into()),
            ..Default::default()
        });

        let draft = ctx.learning_card_draft(&card.id);
        assert_eq!(
            draft.what_we_thought,
            "We believed that (Hypothesis: Freelancers will pay for invoice reminders...) \
             if we run a landing page, then 5% sign up."
        );
        assert_eq!(draft.what_happened, "2% signed up");
        assert_eq!(draft.what_we_learned, "Price anchoring matters");
        assert_eq!(draft.related_test_card_id.as_deref(), Some(card.id.as_str()));
    }

    #[tokio::test]
    async fn learning_card_date_is_fixed_at_creation() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::new("What would change your mind?")).await;
        let added = ctx.add_learning_card(NewLearningCard {
            what_we_thought: "Users want dark mode".into(),
            ..Default::default()
        });

        assert_eq!(
            ctx.generate_learning_reflection(&added.id).await,
            EnrichOutcome::Applied
        );
        let fetched = ctx.get_learning_card_by_id(&added.id).unwrap();
        assert_eq!(fetched.date, added.date);
        assert_eq!(
            fetched.ai_reflection_prompt.as_deref(),
            Some("What would change your mind?")
        );
    }

    #[tokio::test]
    async fn unknown_test_card_gives_blank_draft() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        let draft = ctx.learning_card_draft("ghost");
        assert_eq!(draft.what_we_thought, "");
        assert_eq!(draft.related_test_card_id.as_deref(), Some("ghost"));
    }
}

use crate::models::{generate_id, Interview, NewInterview};

use super::{prompts, AppContext, EnrichOutcome};

impl AppContext {
    pub fn interviews(&self) -> Vec<Interview> {
        self.interviews.all()
    }

    /// Record a new interview. Tags are split from `tags_string`.
    pub fn add_interview(&self, input: NewInterview) -> Interview {
        self.interviews.insert(input.into_record(generate_id()))
    }

    pub fn update_interview(&self, interview: Interview) -> bool {
        self.interviews.update(interview)
    }

    pub fn delete_interview(&self, id: &str) -> bool {
        self.interviews.delete(id)
    }

    pub fn get_interview_by_id(&self, id: &str) -> Option<Interview> {
        self.interviews.get_by_id(id)
    }

    /// Summarize an interview into its `aiSummary`.
    pub async fn generate_interview_summary(&self, id: &str) -> EnrichOutcome {
        let prompt = self
            .interviews
            .get_by_id(id)
            .map(|interview| prompts::interview_summary(&interview));

        self.enrich("Interview summary", prompt, |text| {
            self.interviews
                .modify(id, |interview| interview.ai_summary = Some(text))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::test_support::context_with, llm::MockGenerator, models::Sentiment};

    fn new_interview() -> NewInterview {
        NewInterview {
            date: "2024-05-01".into(),
            interviewee_name: "Priya".into(),
            customer_segment: "Freelancers".into(),
            key_takeaways: "Chases late invoices every week".into(),
            tags_string: Some("pain point, invoicing".into()),
            sentiment: Some(Sentiment::Negative),
        }
    }

    #[tokio::test]
    async fn add_assigns_id_and_splits_tags() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        let added = ctx.add_interview(new_interview());

        let fetched = ctx.get_interview_by_id(&added.id).unwrap();
        assert!(!fetched.id.is_empty());
        assert_eq!(fetched.tags, vec!["pain point", "invoicing"]);
        assert_eq!(fetched.sentiment, Some(Sentiment::Negative));
        assert_eq!(fetched.ai_summary, None);
    }

    #[tokio::test]
    async fn summary_prompt_carries_the_notes() {
        let (_backend, mock, ctx) = context_with(MockGenerator::new("They hate chasing payments.")).await;
        let added = ctx.add_interview(new_interview());

        let outcome = ctx.generate_interview_summary(&added.id).await;
        assert_eq!(outcome, EnrichOutcome::Applied);

        let prompt = &mock.prompts()[0];
        assert!(prompt.contains("Interviewee: Priya"));
        assert!(prompt.contains("Tags: pain point, invoicing"));
        assert_eq!(
            ctx.get_interview_by_id(&added.id).unwrap().ai_summary.as_deref(),
            Some("They hate chasing payments.")
        );
    }

    #[tokio::test]
    async fn unknown_interview_is_not_enriched() {
        let (_backend, mock, ctx) = context_with(MockGenerator::default()).await;
        assert_eq!(
            ctx.generate_interview_summary("ghost").await,
            EnrichOutcome::RecordMissing
        );
        assert_eq!(mock.call_count(), 0);
    }
}

use crate::models::{generate_id, FermiEstimation, NewFermiEstimation};

use super::{prompts, AppContext, EnrichOutcome};

impl AppContext {
    pub fn fermi_estimations(&self) -> Vec<FermiEstimation> {
        self.fermi_estimations.all()
    }

    /// Parses `assumptions_string` into assumptions, each with its own id.
    pub fn add_fermi_estimation(&self, input: NewFermiEstimation) -> FermiEstimation {
        self.fermi_estimations
            .insert(input.into_record(generate_id()))
    }

    pub fn update_fermi_estimation(&self, estimation: FermiEstimation) -> bool {
        self.fermi_estimations.update(estimation)
    }

    pub fn delete_fermi_estimation(&self, id: &str) -> bool {
        self.fermi_estimations.delete(id)
    }

    pub fn get_fermi_estimation_by_id(&self, id: &str) -> Option<FermiEstimation> {
        self.fermi_estimations.get_by_id(id)
    }

    pub async fn assess_fermi_viability(&self, id: &str) -> EnrichOutcome {
        let prompt = self
            .fermi_estimations
            .get_by_id(id)
            .map(|estimation| prompts::fermi_viability(&estimation));

        self.enrich("Fermi viability assessment", prompt, |text| {
            self.fermi_estimations.modify(id, |estimation| {
                estimation.ai_viability_assessment = Some(text)
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::test_support::context_with, llm::MockGenerator};

    #[tokio::test]
    async fn assumptions_are_parsed_on_add() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::default()).await;
        let added = ctx.add_fermi_estimation(NewFermiEstimation {
            name: "Bookkeepers in Berlin".into(),
            assumptions_string: Some("CAC:50, LTV:200".into()),
            ..Default::default()
        });

        let fetched = ctx.get_fermi_estimation_by_id(&added.id).unwrap();
        let pairs: Vec<_> = fetched
            .assumptions
            .iter()
            .map(|a| (a.label.as_str(), a.value.as_str()))
            .collect();
        assert_eq!(pairs, vec![("CAC", "50"), ("LTV", "200")]);
        assert_ne!(fetched.assumptions[0].id, fetched.assumptions[1].id);
    }

    #[tokio::test]
    async fn missing_key_skips_the_call() {
        let (_backend, mock, ctx) = context_with(MockGenerator::without_key()).await;
        let added = ctx.add_fermi_estimation(NewFermiEstimation::default());

        assert_eq!(
            ctx.assess_fermi_viability(&added.id).await,
            EnrichOutcome::Unavailable
        );
        assert_eq!(mock.call_count(), 0);
        assert_eq!(
            ctx.get_fermi_estimation_by_id(&added.id).unwrap(),
            added
        );
    }

    #[tokio::test]
    async fn failed_call_leaves_record_untouched() {
        let (_backend, _mock, ctx) = context_with(MockGenerator::failing("quota exceeded")).await;
        let added = ctx.add_fermi_estimation(NewFermiEstimation::default());

        let outcome = ctx.assess_fermi_viability(&added.id).await;
        assert_eq!(
            outcome,
            EnrichOutcome::Failed("Request failed: quota exceeded".into())
        );
        assert_eq!(ctx.get_fermi_estimation_by_id(&added.id).unwrap(), added);
    }
}

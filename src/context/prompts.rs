use crate::models::{FermiEstimation, Hypothesis, Interview, LearningCard, ValuePropositionCanvas};

use super::suggestions::SuggestionKind;

pub(super) fn interview_summary(interview: &Interview) -> String {
    format!(
        "Summarize the key insights, pains, and gains from this interview:\n\
         Date: {}\n\
         Interviewee: {}\n\
         Segment: {}\n\
         Notes: {}\n\
         Tags: {}\n\
         Provide a concise summary.",
        interview.date,
        interview.interviewee_name,
        interview.customer_segment,
        interview.key_takeaways,
        interview.tags.join(", "),
    )
}

pub(super) fn hypothesis_critique(hypothesis: &Hypothesis) -> String {
    format!(
        "Critique the following hypothesis for clarity, testability, and potential biases: \"{}\". \
         Suggest improvements if any.",
        hypothesis.description
    )
}

pub(super) fn vp_messaging(canvas: &ValuePropositionCanvas) -> String {
    format!(
        "Based on this Value Proposition Canvas:\n\
         Customer Jobs: {}\n\
         Pains: {}\n\
         Gains: {}\n\
         Products/Services: {}\n\
         Pain Relievers: {}\n\
         Gain Creators: {}\n\
         Generate 3-5 benefit-oriented messaging snippets for marketing.",
        canvas.customer_jobs,
        canvas.customer_pains,
        canvas.customer_gains,
        canvas.products_services,
        canvas.pain_relievers,
        canvas.gain_creators,
    )
}

pub(super) fn fermi_viability(estimation: &FermiEstimation) -> String {
    let assumptions = estimation
        .assumptions
        .iter()
        .map(|assumption| format!("{}: {}", assumption.label, assumption.value))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Assess the potential viability based on this Fermi estimation:\n\
         Name: {}\n\
         Assumptions: {}\n\
         Calculation Logic: {}\n\
         Estimated Outcome: {}\n\
         Provide a brief commentary on the viability and key sensitivities.",
        estimation.name, assumptions, estimation.calculation_logic, estimation.estimated_outcome,
    )
}

pub(super) fn learning_reflection(card: &LearningCard) -> String {
    format!(
        "Based on this learning card:\n\
         What we thought: {}\n\
         What happened: {}\n\
         What we learned: {}\n\
         What we will change: {}\n\
         Provide a short reflective prompt or question to deepen the user's insight or consider next steps.",
        card.what_we_thought, card.what_happened, card.what_we_learned, card.what_we_will_change,
    )
}

pub(super) fn problem_suggestions(jobs_to_be_done: &str, kind: SuggestionKind) -> String {
    format!(
        "Based on the customer job-to-be-done: \"{}\", list 5 potential customer {}. \
         Provide the list as a JSON array of strings. Example: [\"Suggestion 1\", \"Suggestion 2\"]",
        jobs_to_be_done,
        kind.as_str(),
    )
}

pub(super) fn innovators_bias(problem_description: &str) -> String {
    format!(
        "Analyze the following problem description for innovator's bias (i.e., focusing on a solution instead of the problem).\n\
         Problem: \"{}\"\n\
         Rephrase the description to focus purely on the customer's situation, jobs, pains, or gains, \
         without mentioning any specific product, service, or solution.\n\
         If the original description is already well-focused on the problem, acknowledge that and briefly explain why.\n\
         Your response should be the rephrased problem statement or the acknowledgment.",
        problem_description
    )
}

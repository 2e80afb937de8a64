use tempfile::TempDir;
use validatehub_lib::{
    models::{BusinessModelBlockPatch, BusinessModelBlockType, NewMvp, ProblemCanvasPatch},
    open_workbook, WorkbookSettings,
};

#[tokio::test]
async fn workbook_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let settings = WorkbookSettings::default();

    let mvp_id = {
        let ctx = open_workbook(dir.path(), &settings).await.unwrap();
        ctx.update_project_name("Ledger Lite");
        ctx.update_problem_canvas(ProblemCanvasPatch {
            jobs_to_be_done: Some("keep books tidy".into()),
            ..Default::default()
        });
        ctx.update_business_model_block(
            BusinessModelBlockType::Channels,
            BusinessModelBlockPatch::content("Accountant referrals"),
        );
        let mvp = ctx.add_mvp(NewMvp {
            name: "Concierge bookkeeping".into(),
            ..Default::default()
        }
        .with_hypothesis_ids("h-1, h-2"));
        ctx.flush().await.unwrap();
        mvp.id
    };

    let ctx = open_workbook(dir.path(), &settings).await.unwrap();
    assert_eq!(ctx.project_name(), "Ledger Lite");
    assert_eq!(ctx.problem_canvas().jobs_to_be_done, "keep books tidy");
    assert_eq!(
        ctx.business_model().blocks.channels.content,
        "Accountant referrals"
    );
    let mvp = ctx.get_mvp_by_id(&mvp_id).unwrap();
    assert_eq!(mvp.linked_hypothesis_ids, vec!["h-1", "h-2"]);
}

#[tokio::test]
async fn fresh_directory_opens_with_defaults() {
    let dir = TempDir::new().unwrap();
    let ctx = open_workbook(&dir.path().join("nested"), &WorkbookSettings::default())
        .await
        .unwrap();

    assert_eq!(ctx.project_name(), "My Awesome Idea");
    assert!(ctx.mvps().is_empty());
    assert_eq!(ctx.summary().mvps, 0);
}

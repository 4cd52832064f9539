//! Shared catalog builders for the integration tests.

#![allow(dead_code)]

use stagegate_core::{
    CatalogInfo, Content, ProgressionController, Question, QuestionId, Stage, StageCatalog,
    StageId,
};

/// Build a catalog where stage `n` (1-based) has `sizes[n - 1]` questions.
///
/// Question ids are global and sequential. Every question offers
/// `right`, `wrong` and `other`; `right` is correct.
pub fn catalog_with_sizes(sizes: &[usize]) -> StageCatalog {
    let mut next_id = 1u32;
    let stages = sizes
        .iter()
        .enumerate()
        .map(|(index, &size)| {
            let questions = (0..size)
                .map(|_| {
                    let id = next_id;
                    next_id += 1;
                    Question::new(
                        QuestionId(id),
                        format!("Question {id}"),
                        vec!["wrong".into(), "right".into(), "other".into()],
                        "right",
                    )
                })
                .collect();
            Stage::new(
                StageId(index as u32 + 1),
                format!("Stage {}", index + 1),
                Content::new(format!("Notes for stage {}", index + 1)),
                questions,
            )
        })
        .collect();

    StageCatalog::new(
        CatalogInfo::new("Test Lab", "Answer everything.", "Well done."),
        stages,
    )
    .expect("valid catalog")
}

/// The four-stage shape of the built-in catalog: 3, 2, 3 and 2 questions.
pub fn four_stage_catalog() -> StageCatalog {
    catalog_with_sizes(&[3, 2, 3, 2])
}

/// Question ids of the current stage.
pub fn current_question_ids(controller: &ProgressionController<'_>) -> Vec<QuestionId> {
    controller
        .current_stage()
        .map(|stage| stage.questions.iter().map(|q| q.id).collect())
        .unwrap_or_default()
}

/// Answer every question of the current stage correctly.
pub fn answer_all_correctly(controller: &mut ProgressionController<'_>) {
    for id in current_question_ids(controller) {
        controller.select_answer(id, "right").expect("select");
    }
}

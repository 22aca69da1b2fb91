use std::sync::Arc;

use tracing::{error, info, warn};

use campusfit_core::model::{Category, Question};

use crate::api::PlacementApi;
use crate::error::ApiError;

/// Fetches the question set for one category.
#[derive(Clone)]
pub struct QuestionLoader {
    api: Arc<dyn PlacementApi>,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(api: Arc<dyn PlacementApi>) -> Self {
        Self { api }
    }

    /// Load the questions for `category`.
    ///
    /// Every failure collapses to an empty list after being logged; the
    /// caller treats an empty list as "no questions available".
    pub async fn load(&self, category: Category) -> Vec<Question> {
        match self.api.questions(category).await {
            Ok(questions) => {
                info!(%category, count = questions.len(), "questions loaded");
                questions
            }
            Err(ApiError::Http(err)) if err.is_decode() => {
                error!(%category, error = %err, "malformed question data");
                Vec::new()
            }
            Err(err) => {
                warn!(%category, error = %err, "question fetch failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryPlacementApi;
    use campusfit_core::model::{AnswerLetter, QuestionId};

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            "Pick one",
            None,
            vec!["a".into(), "b".into()],
            AnswerLetter::parse("a").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_questions_in_server_order() {
        let api = InMemoryPlacementApi::new()
            .with_questions(Category::Technical, vec![question("T1"), question("T2")]);
        let loader = QuestionLoader::new(Arc::new(api));

        let loaded = loader.load(Category::Technical).await;
        let ids: Vec<_> = loaded.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, ["T1", "T2"]);
        assert!(loader.load(Category::Aptitude).await.is_empty());
    }

    #[tokio::test]
    async fn failure_collapses_to_empty() {
        let api = InMemoryPlacementApi::new()
            .with_questions(Category::Aptitude, vec![question("A1")]);
        api.set_unavailable(true);
        let loader = QuestionLoader::new(Arc::new(api));
        assert!(loader.load(Category::Aptitude).await.is_empty());
    }
}

//! Catalog filtering for the exercise list

use std::collections::HashSet;

use super::model::{Category, Difficulty, Exercise, ExerciseId};
use crate::progress::is_unlocked;

/// Criteria for narrowing the exercise list. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    /// Free-text query over title, description and tags
    pub query: Option<String>,
}

/// An exercise annotated with the learner's state
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseView<'a> {
    pub exercise: &'a Exercise,
    pub unlocked: bool,
    pub completed: bool,
}

impl ExerciseFilter {
    /// Restrict to a category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to a difficulty
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Restrict to a search query; blank queries are ignored
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() { None } else { Some(query) };
        self
    }

    /// Check a single exercise against all criteria
    pub fn matches(&self, exercise: &Exercise) -> bool {
        self.category.is_none_or(|c| exercise.category == c)
            && self.difficulty.is_none_or(|d| exercise.difficulty == d)
            && self.query.as_deref().is_none_or(|q| exercise.matches_query(q))
    }

    /// Filter exercises and derive unlocked/completed state from `completed`
    pub fn apply<'a>(
        &self,
        exercises: &'a [Exercise],
        completed: &HashSet<ExerciseId>,
    ) -> Vec<ExerciseView<'a>> {
        exercises
            .iter()
            .filter(|e| self.matches(e))
            .map(|exercise| ExerciseView {
                exercise,
                unlocked: is_unlocked(&exercise.prerequisites, completed),
                completed: completed.contains(&exercise.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Exercise> {
        let mut center =
            Exercise::new(1001, "Perfect Center", Difficulty::Beginner, Category::Flexbox, 50);
        center.tags = vec!["alignment".into()];
        let navbar =
            Exercise::new(1002, "Responsive Navbar", Difficulty::Easy, Category::Flexbox, 100)
                .with_prerequisites(vec![1001]);
        let mut dashboard =
            Exercise::new(2001, "Admin Dashboard", Difficulty::Medium, Category::Grid, 250);
        dashboard.description = "Build a grid-template-areas layout".into();
        vec![center, navbar, dashboard]
    }

    #[test]
    fn default_filter_keeps_everything() {
        let exercises = sample();
        let views = ExerciseFilter::default().apply(&exercises, &HashSet::new());
        assert_eq!(views.len(), 3);
    }

    #[test]
    fn filters_combine() {
        let exercises = sample();
        let filter = ExerciseFilter::default()
            .with_category(Category::Flexbox)
            .with_difficulty(Difficulty::Easy);

        let views = filter.apply(&exercises, &HashSet::new());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].exercise.id, 1002);
    }

    #[test]
    fn query_matches_description_and_tags() {
        let exercises = sample();

        let by_tag =
            ExerciseFilter::default().with_query("ALIGN").apply(&exercises, &HashSet::new());
        assert_eq!(by_tag.len(), 1);

        let by_desc =
            ExerciseFilter::default().with_query("template").apply(&exercises, &HashSet::new());
        assert_eq!(by_desc[0].exercise.id, 2001);
    }

    #[test]
    fn blank_query_is_ignored() {
        assert_eq!(ExerciseFilter::default().with_query("   ").query, None);
    }

    #[test]
    fn views_carry_derived_state() {
        let exercises = sample();
        let completed: HashSet<_> = [1001].into_iter().collect();
        let views = ExerciseFilter::default().apply(&exercises, &completed);

        assert!(views[0].completed);
        assert!(views[1].unlocked);
        assert!(!views[1].completed);

        let none_done = ExerciseFilter::default().apply(&exercises, &HashSet::new());
        assert!(!none_done[1].unlocked);
    }
}

//! Prerequisite resolution

use std::collections::HashSet;

use crate::catalog::{DataProvider, ExerciseId};
use crate::error::QuestError;

/// True iff every prerequisite is in `completed`. No prerequisites means unlocked.
pub fn is_unlocked<'a>(
    prerequisites: impl IntoIterator<Item = &'a ExerciseId>,
    completed: &HashSet<ExerciseId>,
) -> bool {
    prerequisites.into_iter().all(|id| completed.contains(id))
}

/// Prerequisites of an exercise that are not yet completed, in declaration order
pub fn missing_prerequisites(
    prerequisites: &[ExerciseId],
    completed: &HashSet<ExerciseId>,
) -> Vec<ExerciseId> {
    prerequisites.iter().copied().filter(|id| !completed.contains(id)).collect()
}

/// Look an exercise up through the provider and check whether it is unlocked
pub fn check_unlock(
    provider: &impl DataProvider,
    exercise_id: ExerciseId,
    completed: &HashSet<ExerciseId>,
) -> Result<bool, QuestError> {
    let exercise =
        provider.exercise(exercise_id).ok_or(QuestError::ExerciseNotFound(exercise_id))?;
    Ok(is_unlocked(&exercise.prerequisites, completed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category, Difficulty, Exercise};
    use proptest::prelude::*;

    fn completed(ids: &[ExerciseId]) -> HashSet<ExerciseId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn partial_completion_stays_locked() {
        assert!(!is_unlocked(&[1, 2], &completed(&[1])));
    }

    #[test]
    fn superset_unlocks() {
        assert!(is_unlocked(&[1, 2], &completed(&[1, 2, 3])));
    }

    #[test]
    fn no_prerequisites_is_vacuously_unlocked() {
        assert!(is_unlocked(&[], &completed(&[])));
        assert!(is_unlocked(&[], &completed(&[5, 6])));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let prereqs = vec![1, 2];
        let done = completed(&[2]);
        let _ = is_unlocked(&prereqs, &done);
        assert_eq!(prereqs, vec![1, 2]);
        assert_eq!(done, completed(&[2]));
    }

    #[test]
    fn missing_prerequisites_keeps_order() {
        assert_eq!(missing_prerequisites(&[3, 1, 2], &completed(&[1])), vec![3, 2]);
    }

    #[test]
    fn check_unlock_through_provider() {
        let catalog = Catalog::from_exercises(vec![
            Exercise::new(1, "First", Difficulty::Beginner, Category::Flexbox, 50),
            Exercise::new(2, "Second", Difficulty::Easy, Category::Flexbox, 100)
                .with_prerequisites(vec![1]),
        ]);

        assert!(check_unlock(&catalog, 1, &completed(&[])).unwrap());
        assert!(!check_unlock(&catalog, 2, &completed(&[])).unwrap());
        assert!(check_unlock(&catalog, 2, &completed(&[1])).unwrap());
        assert!(matches!(
            check_unlock(&catalog, 99, &completed(&[])),
            Err(QuestError::ExerciseNotFound(99))
        ));
    }

    proptest! {
        #[test]
        fn empty_prerequisites_always_unlock(
            done in proptest::collection::hash_set(any::<u32>(), 0..20),
        ) {
            prop_assert!(is_unlocked(&[], &done));
        }

        #[test]
        fn unlocked_iff_nothing_missing(
            prereqs in proptest::collection::vec(0u32..20, 0..6),
            done in proptest::collection::hash_set(0u32..20, 0..20),
        ) {
            prop_assert_eq!(
                is_unlocked(&prereqs, &done),
                missing_prerequisites(&prereqs, &done).is_empty()
            );
        }

        #[test]
        fn unlock_check_is_idempotent(
            prereqs in proptest::collection::vec(0u32..20, 0..6),
            done in proptest::collection::hash_set(0u32..20, 0..20),
        ) {
            let first = is_unlocked(&prereqs, &done);
            prop_assert_eq!(first, is_unlocked(&prereqs, &done));
            prop_assert_eq!(
                missing_prerequisites(&prereqs, &done),
                missing_prerequisites(&prereqs, &done)
            );
        }
    }
}

use bully::{new_err, BullyError, NodeId};
use rand::Rng;
use std::collections::BTreeSet;

/// How node priorities are produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PriorityAssignment {
    /// Ids given by the operator.
    Explicit(Vec<NodeId>),

    /// `count` consecutive ids beginning with `first`.
    Sequential { first: NodeId, count: usize },

    /// `count` distinct random ids in `1..=max`.
    Random { count: usize, max: NodeId },
}

impl PriorityAssignment {
    /// Produces the ids in ascending order. Fails when they cannot be unique.
    pub fn assign(&self) -> Result<Vec<NodeId>, BullyError> {
        match self {
            PriorityAssignment::Explicit(ids) => {
                let unique: BTreeSet<NodeId> = ids.iter().cloned().collect();
                if unique.len() != ids.len() {
                    return new_err(
                        "Cannot assign priorities".to_string(),
                        format!("duplicate ids in {:?}", ids),
                    );
                }
                Ok(unique.into_iter().collect())
            }
            PriorityAssignment::Sequential { first, count } => {
                let count = *count as NodeId;
                match first.checked_add(count) {
                    Some(_) => Ok((*first..*first + count).collect()),
                    None => new_err(
                        "Cannot assign priorities".to_string(),
                        format!("{} ids starting at {} overflow", count, first),
                    ),
                }
            }
            PriorityAssignment::Random { count, max } => {
                if (*count as NodeId) > *max {
                    return new_err(
                        "Cannot assign priorities".to_string(),
                        format!("{} unique ids do not fit in 1..={}", count, max),
                    );
                }

                let mut rng = rand::thread_rng();
                let mut ids = BTreeSet::new();
                while ids.len() < *count {
                    ids.insert(rng.gen_range(0, *max) + 1);
                }
                Ok(ids.into_iter().collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_ids_are_sorted() {
        let ids = PriorityAssignment::Explicit(vec![30, 10, 20]).assign().unwrap();

        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn explicit_duplicates_are_rejected() {
        assert!(PriorityAssignment::Explicit(vec![10, 10]).assign().is_err());
    }

    #[test]
    fn sequential_ids() {
        let ids = PriorityAssignment::Sequential { first: 1, count: 3 }.assign().unwrap();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn random_ids_are_unique_and_bounded() {
        let ids = PriorityAssignment::Random { count: 50, max: 60 }.assign().unwrap();

        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|&id| id >= 1 && id <= 60));
    }

    #[test]
    fn random_ids_need_room() {
        assert!(PriorityAssignment::Random { count: 5, max: 4 }.assign().is_err());
    }
}

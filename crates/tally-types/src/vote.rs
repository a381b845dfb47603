use serde::{Deserialize, Serialize};

/// The direction a user votes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Like,
    Dislike,
}

impl Direction {
    /// +1 for like, -1 for dislike.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Like => 1,
            Direction::Dislike => -1,
        }
    }

    pub fn as_mark(self) -> Mark {
        match self {
            Direction::Like => Mark::Like,
            Direction::Dislike => Mark::Dislike,
        }
    }

    /// Message shown when the user repeats a vote they already cast.
    pub fn already_marked_message(self) -> &'static str {
        match self {
            Direction::Like => "You already liked this post.",
            Direction::Dislike => "You already disliked this post.",
        }
    }
}

/// A stored vote. "No vote" is the absence of a mark, never a third value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Like,
    Dislike,
}

impl Mark {
    /// Value persisted in `user_marks.mark`.
    pub fn value(self) -> i64 {
        match self {
            Mark::Like => 1,
            Mark::Dislike => -1,
        }
    }

    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Mark::Like),
            -1 => Some(Mark::Dislike),
            _ => None,
        }
    }

    fn matches(self, direction: Direction) -> bool {
        self.value() == direction.sign()
    }
}

/// What a vote did to the caller's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    /// No prior mark; one was inserted.
    Marked,
    /// The opposite mark was removed.
    Withdrawn,
    /// The caller already holds this mark. Nothing changed.
    AlreadyMarked,
}

/// Mutation plan for a single vote event.
///
/// Reversing a vote only moves the rating one step: the opposing mark is
/// deleted and the requested sign is applied once, without also undoing the
/// old mark's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Insert { mark: Mark, delta: i64 },
    Delete { delta: i64 },
    Noop,
}

impl Transition {
    pub fn plan(current: Option<Mark>, direction: Direction) -> Self {
        let s = direction.sign();
        match current {
            None => Transition::Insert {
                mark: direction.as_mark(),
                delta: s,
            },
            Some(mark) if mark.matches(direction) => Transition::Noop,
            Some(_) => Transition::Delete { delta: s },
        }
    }

    pub fn outcome(self) -> VoteOutcome {
        match self {
            Transition::Insert { .. } => VoteOutcome::Marked,
            Transition::Delete { .. } => VoteOutcome::Withdrawn,
            Transition::Noop => VoteOutcome::AlreadyMarked,
        }
    }

    /// Change applied to `post.rating`.
    pub fn delta(self) -> i64 {
        match self {
            Transition::Insert { delta, .. } | Transition::Delete { delta } => delta,
            Transition::Noop => 0,
        }
    }

    /// The caller's mark once this transition has been applied.
    pub fn resulting_mark(self, current: Option<Mark>) -> Option<Mark> {
        match self {
            Transition::Insert { mark, .. } => Some(mark),
            Transition::Delete { .. } => None,
            Transition::Noop => current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_vote_inserts_mark() {
        let t = Transition::plan(None, Direction::Like);
        assert_eq!(t, Transition::Insert { mark: Mark::Like, delta: 1 });
        assert_eq!(t.outcome(), VoteOutcome::Marked);

        let t = Transition::plan(None, Direction::Dislike);
        assert_eq!(t, Transition::Insert { mark: Mark::Dislike, delta: -1 });
    }

    #[test]
    fn repeated_vote_is_noop() {
        let t = Transition::plan(Some(Mark::Like), Direction::Like);
        assert_eq!(t, Transition::Noop);
        assert_eq!(t.delta(), 0);
        assert_eq!(t.resulting_mark(Some(Mark::Like)), Some(Mark::Like));

        let t = Transition::plan(Some(Mark::Dislike), Direction::Dislike);
        assert_eq!(t.outcome(), VoteOutcome::AlreadyMarked);
    }

    #[test]
    fn reversal_moves_one_step() {
        let t = Transition::plan(Some(Mark::Dislike), Direction::Like);
        assert_eq!(t, Transition::Delete { delta: 1 });
        assert_eq!(t.resulting_mark(Some(Mark::Dislike)), None);

        let t = Transition::plan(Some(Mark::Like), Direction::Dislike);
        assert_eq!(t, Transition::Delete { delta: -1 });
        assert_eq!(t.outcome(), VoteOutcome::Withdrawn);
    }

    #[test]
    fn mark_values() {
        assert_eq!(Mark::from_value(1), Some(Mark::Like));
        assert_eq!(Mark::from_value(-1), Some(Mark::Dislike));
        assert_eq!(Mark::from_value(0), None);
        assert_eq!(Mark::Dislike.value(), -1);
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&VoteOutcome::AlreadyMarked).unwrap();
        assert_eq!(json, "\"already_marked\"");
    }
}

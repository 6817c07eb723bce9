use std::{fmt, slice::Iter};

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::{ChallengeError, Name, Property, User, UserID};

#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    pub id: ChallengeID,
    pub title: Name,
    pub description: String,
    pub kind: ChallengeKind,
    pub goal: u32,
    pub unit: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub participants: Vec<ChallengeParticipant>,
    pub tags: Vec<String>,
    pub created_by: UserID,
    pub active: bool,
}

impl Challenge {
    #[must_use]
    pub fn participant(&self, user_id: UserID) -> Option<&ChallengeParticipant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    #[must_use]
    pub fn has_participant(&self, user_id: UserID) -> bool {
        self.participant(user_id).is_some()
    }

    /// Participants with the highest progress first. Participants with equal progress keep
    /// the order in which they joined.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&ChallengeParticipant> {
        let mut participants = self.participants.iter().collect::<Vec<_>>();
        participants.sort_by(|a, b| b.progress.total_cmp(&a.progress));
        participants
    }

    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChallengeID(Uuid);

impl ChallengeID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ChallengeID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ChallengeID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum ChallengeKind {
    Workout,
    Strength,
    Consistency,
}

impl Property for ChallengeKind {
    fn iter() -> Iter<'static, ChallengeKind> {
        static KINDS: [ChallengeKind; 3] = [
            ChallengeKind::Workout,
            ChallengeKind::Strength,
            ChallengeKind::Consistency,
        ];
        KINDS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            ChallengeKind::Workout => "Workout",
            ChallengeKind::Strength => "Strength",
            ChallengeKind::Consistency => "Consistency",
        }
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeParticipant {
    pub user_id: UserID,
    pub user_name: Name,
    progress: f32,
    last_updated: NaiveDateTime,
}

impl ChallengeParticipant {
    /// Progress towards the goal in percent.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub fn last_updated(&self) -> NaiveDateTime {
        self.last_updated
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.progress >= 100.0
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChallengeBoard {
    challenges: Vec<Challenge>,
}

impl ChallengeBoard {
    /// Add a challenge under a newly generated id. Any id of the given challenge is replaced.
    pub fn create_challenge(
        &mut self,
        mut challenge: Challenge,
    ) -> Result<&Challenge, ChallengeError> {
        if challenge.end < challenge.start {
            return Err(ChallengeError::InvalidPeriod);
        }
        challenge.id = Uuid::new_v4().into();
        debug!("created challenge {:?} ({})", challenge.id, challenge.title);
        self.challenges.push(challenge);
        Ok(&self.challenges[self.challenges.len() - 1])
    }

    pub fn join(
        &mut self,
        challenge_id: ChallengeID,
        user: &User,
        timestamp: NaiveDateTime,
    ) -> Result<&Challenge, ChallengeError> {
        let challenge = self.get_mut(challenge_id)?;
        if challenge.has_participant(user.id) {
            return Err(ChallengeError::AlreadyJoined(user.id));
        }
        challenge.participants.push(ChallengeParticipant {
            user_id: user.id,
            user_name: user.name.clone(),
            progress: 0.0,
            last_updated: timestamp,
        });
        Ok(challenge)
    }

    /// Set the progress of a participant. The value is clamped to the range 0 to 100.
    pub fn update_progress(
        &mut self,
        challenge_id: ChallengeID,
        user_id: UserID,
        progress: f32,
        timestamp: NaiveDateTime,
    ) -> Result<&ChallengeParticipant, ChallengeError> {
        let challenge = self.get_mut(challenge_id)?;
        let participant = challenge
            .participants
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .ok_or(ChallengeError::NotParticipant(user_id))?;
        participant.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 100.0)
        };
        participant.last_updated = timestamp;
        Ok(participant)
    }

    #[must_use]
    pub fn get(&self, challenge_id: ChallengeID) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == challenge_id)
    }

    /// Active challenges the user takes part in.
    pub fn active_for(&self, user_id: UserID) -> impl Iterator<Item = &Challenge> {
        self.challenges
            .iter()
            .filter(move |c| c.active && c.has_participant(user_id))
    }

    /// Active challenges the user could still join.
    pub fn available_for(&self, user_id: UserID) -> impl Iterator<Item = &Challenge> {
        self.challenges
            .iter()
            .filter(move |c| c.active && !c.has_participant(user_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    fn get_mut(&mut self, challenge_id: ChallengeID) -> Result<&mut Challenge, ChallengeError> {
        self.challenges
            .iter_mut()
            .find(|c| c.id == challenge_id)
            .ok_or(ChallengeError::NotFound(challenge_id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Gender, WeightUnit};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, day).unwrap()
    }

    fn timestamp(day: u32) -> NaiveDateTime {
        date(day).and_hms_opt(12, 0, 0).unwrap()
    }

    fn user(id: u128, name: &str) -> User {
        User {
            id: id.into(),
            name: Name::new(name).unwrap(),
            gender: Gender::Other,
            weight_unit: WeightUnit::Kilogram,
        }
    }

    fn challenge(title: &str, active: bool) -> Challenge {
        Challenge {
            id: ChallengeID::nil(),
            title: Name::new(title).unwrap(),
            description: String::new(),
            kind: ChallengeKind::Consistency,
            goal: 1000,
            unit: "reps".to_string(),
            start: date(1),
            end: date(30),
            participants: vec![],
            tags: vec!["squat".to_string()],
            created_by: 1.into(),
            active,
        }
    }

    #[test]
    fn test_create_challenge() {
        let mut board = ChallengeBoard::default();
        let a = board.create_challenge(challenge("A", true)).unwrap().id;
        let b = board.create_challenge(challenge("B", true)).unwrap().id;
        assert!(!a.is_nil());
        assert_ne!(a, b);
        assert_eq!(board.len(), 2);
        assert_eq!(board.get(a).map(|c| c.title.to_string()), Some("A".to_string()));
        assert_eq!(board.get(a).map(Challenge::duration_days), Some(30));
    }

    #[test]
    fn test_create_challenge_invalid_period() {
        let mut board = ChallengeBoard::default();
        let mut c = challenge("A", true);
        c.end = date(1);
        c.start = date(2);
        assert_eq!(
            board.create_challenge(c).map(|c| c.id),
            Err(ChallengeError::InvalidPeriod)
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_join() {
        let mut board = ChallengeBoard::default();
        let id = board.create_challenge(challenge("A", true)).unwrap().id;
        let alice = user(2, "Alice");

        let joined = board.join(id, &alice, timestamp(3)).unwrap();
        let participant = joined.participant(alice.id).unwrap();
        assert_eq!(participant.progress(), 0.0);
        assert_eq!(participant.last_updated(), timestamp(3));
        assert_eq!(participant.user_name.to_string(), "Alice");

        assert_eq!(
            board.join(id, &alice, timestamp(4)).map(|c| c.id),
            Err(ChallengeError::AlreadyJoined(alice.id))
        );
        assert_eq!(
            board.join(9.into(), &alice, timestamp(4)).map(|c| c.id),
            Err(ChallengeError::NotFound(9.into()))
        );
    }

    #[rstest]
    #[case(42.5, 42.5)]
    #[case(-10.0, 0.0)]
    #[case(150.0, 100.0)]
    #[case(f32::NAN, 0.0)]
    fn test_update_progress(#[case] progress: f32, #[case] expected: f32) {
        let mut board = ChallengeBoard::default();
        let id = board.create_challenge(challenge("A", true)).unwrap().id;
        let alice = user(2, "Alice");
        board.join(id, &alice, timestamp(3)).unwrap();

        let participant = board
            .update_progress(id, alice.id, progress, timestamp(5))
            .unwrap();
        assert_eq!(participant.progress(), expected);
        assert_eq!(participant.last_updated(), timestamp(5));
        assert_eq!(participant.is_completed(), expected >= 100.0);
    }

    #[test]
    fn test_update_progress_errors() {
        let mut board = ChallengeBoard::default();
        let id = board.create_challenge(challenge("A", true)).unwrap().id;
        assert_eq!(
            board
                .update_progress(id, 2.into(), 10.0, timestamp(5))
                .map(ChallengeParticipant::progress),
            Err(ChallengeError::NotParticipant(2.into()))
        );
        assert_eq!(
            board
                .update_progress(7.into(), 2.into(), 10.0, timestamp(5))
                .map(ChallengeParticipant::progress),
            Err(ChallengeError::NotFound(7.into()))
        );
    }

    #[test]
    fn test_active_and_available() {
        let mut board = ChallengeBoard::default();
        let alice = user(2, "Alice");
        let joined = board.create_challenge(challenge("A", true)).unwrap().id;
        let open = board.create_challenge(challenge("B", true)).unwrap().id;
        let inactive = board.create_challenge(challenge("C", false)).unwrap().id;
        board.join(joined, &alice, timestamp(1)).unwrap();
        board.join(inactive, &alice, timestamp(1)).unwrap();

        assert_eq!(
            board.active_for(alice.id).map(|c| c.id).collect::<Vec<_>>(),
            vec![joined]
        );
        assert_eq!(
            board.available_for(alice.id).map(|c| c.id).collect::<Vec<_>>(),
            vec![open]
        );
        assert_eq!(
            board.available_for(3.into()).map(|c| c.id).collect::<Vec<_>>(),
            vec![joined, open]
        );
        assert_eq!(board.iter().count(), 3);
    }

    #[test]
    fn test_leaderboard() {
        let mut board = ChallengeBoard::default();
        let id = board.create_challenge(challenge("A", true)).unwrap().id;
        for (n, (name, progress)) in [("Tanaka", 75.0), ("Yamada", 82.0), ("Sato", 68.0), ("Ito", 75.0)]
            .into_iter()
            .enumerate()
        {
            let u = user(n as u128 + 10, name);
            board.join(id, &u, timestamp(1)).unwrap();
            board.update_progress(id, u.id, progress, timestamp(2)).unwrap();
        }
        assert_eq!(
            board
                .get(id)
                .unwrap()
                .leaderboard()
                .iter()
                .map(|p| p.user_name.to_string())
                .collect::<Vec<_>>(),
            vec!["Yamada", "Tanaka", "Ito", "Sato"]
        );
    }

    #[test]
    fn test_challenge_kind_display() {
        assert_eq!(
            ChallengeKind::iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["workout", "strength", "consistency"]
        );
    }
}

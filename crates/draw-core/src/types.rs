//! Strongly typed participants, prize tiers and the winner ledger.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Stable business key of a participant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new participant identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person who can be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Unique business key, unaffected by display order
    pub id: ParticipantId,
    /// Display name
    pub name: String,
}

impl Participant {
    /// Create a new participant
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Identifier of a prize tier. Type `0` is the reserved placeholder tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeType(i64);

impl PrizeType {
    /// The reserved placeholder ("special prize") tier.
    pub const PLACEHOLDER: Self = Self(0);

    /// Create a new prize type.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw value.
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Whether this is the reserved placeholder tier.
    pub const fn is_placeholder(self) -> bool {
        self.0 == Self::PLACEHOLDER.0
    }
}

impl From<i64> for PrizeType {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PrizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One configured prize category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTier {
    /// Unique tier identifier
    #[serde(rename = "type")]
    pub prize_type: PrizeType,
    /// Number of prizes in this tier
    pub count: u32,
    /// Tier label, e.g. "First Prize"
    pub text: String,
    /// Prize description
    #[serde(default)]
    pub title: String,
    /// Image path shown by the display client
    #[serde(default, alias = "img")]
    pub image: String,
}

impl PrizeTier {
    /// Create a tier with empty title and image
    pub fn new(prize_type: impl Into<PrizeType>, count: u32, text: impl Into<String>) -> Self {
        Self {
            prize_type: prize_type.into(),
            count,
            text: text.into(),
            title: String::new(),
            image: String::new(),
        }
    }

    /// Set the description
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the image path
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Winners recorded per prize type, in recording order.
///
/// Serialized as a JSON object keyed by prize type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinnerLedger(BTreeMap<PrizeType, Vec<Participant>>);

impl WinnerLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append winners to a tier, creating the entry if absent
    pub fn append(&mut self, prize_type: PrizeType, winners: impl IntoIterator<Item = Participant>) {
        self.0.entry(prize_type).or_default().extend(winners);
    }

    /// Winners of one tier, empty if none were recorded
    pub fn winners(&self, prize_type: PrizeType) -> &[Participant] {
        self.0.get(&prize_type).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate tiers with their winners in prize type order
    pub fn iter(&self) -> impl Iterator<Item = (PrizeType, &[Participant])> {
        self.0.iter().map(|(ty, winners)| (*ty, winners.as_slice()))
    }

    /// Every participant across all tiers, duplicates included
    pub fn all_winners(&self) -> impl Iterator<Item = &Participant> {
        self.0.values().flatten()
    }

    /// Distinct ids of every recorded winner
    pub fn winner_ids(&self) -> HashSet<&ParticipantId> {
        self.all_winners().map(|p| &p.id).collect()
    }

    /// Total number of ledger entries across all tiers
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// True when no winner has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Why a recorded participant was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReason {
    /// Already present in the winner ledger
    AlreadyWon,
    /// Already marked absent
    AlreadyAbsent,
    /// Listed more than once in the same payload
    RepeatedInPayload,
    /// Id is not part of the roster
    NotOnRoster,
}

/// Data-quality audit entry produced when a mutation records a suspicious participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateFlag {
    /// Flagged participant
    pub participant_id: ParticipantId,
    /// Why it was flagged
    pub reason: DuplicateReason,
    /// Tier being recorded, `None` for absentee records
    pub prize_type: Option<PrizeType>,
}

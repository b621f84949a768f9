use arcstr::ArcStr;
use std::fmt;

/// Identifier of an attendee. Cloning is a reference-count bump.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(ArcStr);

impl ParticipantId {
    pub fn new(id: impl Into<ArcStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(ArcStr::from(id))
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(ArcStr::from(id))
    }
}

//! Permission scopes and the set algebra used by the authorization check.
//!
//! Tokens carry scopes as a space-separated string claim; that string is
//! decoded exactly once at the boundary into a [`ScopeSet`], and all checks
//! from there on are set-containment over the [`Scope`] enum.

use std::collections::BTreeSet;
use std::fmt;

use crate::models::AuthGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    ReadLift,
    WriteLift,
    DeleteLift,
    ReadSplit,
    WriteSplit,
    DeleteSplit,
    ReadWorkout,
    WriteWorkout,
    DeleteWorkout,
    ReadSet,
    WriteSet,
    DeleteSet,
    /// Marker distinguishing a refresh token from an access token.
    Refresh,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::ReadLift => "read:lift",
            Scope::WriteLift => "write:lift",
            Scope::DeleteLift => "delete:lift",
            Scope::ReadSplit => "read:split",
            Scope::WriteSplit => "write:split",
            Scope::DeleteSplit => "delete:split",
            Scope::ReadWorkout => "read:workout",
            Scope::WriteWorkout => "write:workout",
            Scope::DeleteWorkout => "delete:workout",
            Scope::ReadSet => "read:set",
            Scope::WriteSet => "write:set",
            Scope::DeleteSet => "delete:set",
            Scope::Refresh => "refresh",
        }
    }

    pub fn parse(s: &str) -> Option<Scope> {
        match s {
            "read:lift" => Some(Scope::ReadLift),
            "write:lift" => Some(Scope::WriteLift),
            "delete:lift" => Some(Scope::DeleteLift),
            "read:split" => Some(Scope::ReadSplit),
            "write:split" => Some(Scope::WriteSplit),
            "delete:split" => Some(Scope::DeleteSplit),
            "read:workout" => Some(Scope::ReadWorkout),
            "write:workout" => Some(Scope::WriteWorkout),
            "delete:workout" => Some(Scope::DeleteWorkout),
            "read:set" => Some(Scope::ReadSet),
            "write:set" => Some(Scope::WriteSet),
            "delete:set" => Some(Scope::DeleteSet),
            "refresh" => Some(Scope::Refresh),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a space-separated scope string. Unknown tokens are dropped.
    pub fn parse(scope: &str) -> Self {
        scope.split(' ').filter_map(Scope::parse).collect()
    }

    pub fn contains(&self, scope: Scope) -> bool {
        self.0.contains(&scope)
    }

    /// Access is granted iff every required scope is present.
    pub fn contains_all(&self, required: &[Scope]) -> bool {
        required.iter().all(|scope| self.0.contains(scope))
    }

    pub fn with(&self, scope: Scope) -> Self {
        let mut set = self.0.clone();
        set.insert(scope);
        Self(set)
    }

    pub fn without(&self, scope: Scope) -> Self {
        let mut set = self.0.clone();
        set.remove(&scope);
        Self(set)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for scope in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(scope.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AuthGroup {
    /// Static mapping from permission group to its granted scope set.
    pub fn scopes(&self) -> ScopeSet {
        match self {
            AuthGroup::Admin => [
                Scope::ReadLift,
                Scope::WriteLift,
                Scope::DeleteLift,
                Scope::ReadSplit,
                Scope::WriteSplit,
                Scope::DeleteSplit,
                Scope::ReadWorkout,
                Scope::WriteWorkout,
                Scope::DeleteWorkout,
                Scope::ReadSet,
                Scope::WriteSet,
                Scope::DeleteSet,
            ]
            .into_iter()
            .collect(),
            AuthGroup::Common => [
                Scope::ReadLift,
                Scope::ReadSplit,
                Scope::ReadWorkout,
                Scope::WriteWorkout,
                Scope::DeleteWorkout,
                Scope::ReadSet,
                Scope::WriteSet,
                Scope::DeleteSet,
            ]
            .into_iter()
            .collect(),
        }
    }
}

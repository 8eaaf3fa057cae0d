//! Organization/team listings and the group names derived from them.

// std
use std::collections::{BTreeSet, btree_map, btree_set};
// self
use crate::{_prelude::*, error::TransportError};

/// Separator between organization and team in composite group names.
pub const GROUP_SEPARATOR: char = '*';

/// Builds the composite `organization*team` group name.
pub fn team_group(organization: &str, team: &str) -> String {
	let mut group = String::with_capacity(organization.len() + team.len() + 1);

	group.push_str(organization);
	group.push(GROUP_SEPARATOR);
	group.push_str(team);

	group
}

/// Organization name to team names, as reported by the provider for the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamListing(BTreeMap<String, BTreeSet<String>>);
impl TeamListing {
	/// Records an organization, even if no team is known for it yet.
	pub fn insert_organization(&mut self, organization: impl Into<String>) {
		self.0.entry(organization.into()).or_default();
	}

	/// Records a team inside its organization.
	pub fn insert_team(&mut self, organization: impl Into<String>, team: impl Into<String>) {
		self.0.entry(organization.into()).or_default().insert(team.into());
	}

	/// Teams listed for `organization`.
	pub fn teams(&self, organization: &str) -> Option<&BTreeSet<String>> {
		self.0.get(organization)
	}

	/// Iterator over `(organization, teams)` pairs.
	pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
		self.0.iter()
	}

	/// Number of organizations.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the user belongs to no organization.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl<O, I, T> FromIterator<(O, I)> for TeamListing
where
	O: Into<String>,
	I: IntoIterator<Item = T>,
	T: Into<String>,
{
	fn from_iter<It>(iter: It) -> Self
	where
		It: IntoIterator<Item = (O, I)>,
	{
		let mut listing = Self::default();

		for (organization, teams) in iter {
			let organization = organization.into();

			listing.insert_organization(organization.clone());

			for team in teams {
				listing.insert_team(organization.clone(), team);
			}
		}

		listing
	}
}

/// Set of authorization groups: bare organization names and `organization*team` names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSet(BTreeSet<String>);
impl GroupSet {
	/// Derives the group set from a team listing.
	///
	/// Every organization contributes its own name, and every team contributes the
	/// composite name built by [`team_group`].
	pub fn from_listing(listing: &TeamListing) -> Self {
		let mut groups = BTreeSet::new();

		for (organization, teams) in listing.iter() {
			groups.insert(organization.clone());

			for team in teams {
				groups.insert(team_group(organization, team));
			}
		}

		Self(groups)
	}

	/// Returns true if the set contains `group`.
	pub fn contains(&self, group: &str) -> bool {
		self.0.contains(group)
	}

	/// Iterator over groups in lexical order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Number of groups.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no group is present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consumes the set into its backing collection.
	pub fn into_inner(self) -> BTreeSet<String> {
		self.0
	}
}
impl<S> FromIterator<S> for GroupSet
where
	S: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = S>,
	{
		Self(iter.into_iter().map(Into::into).collect())
	}
}
impl IntoIterator for GroupSet {
	type IntoIter = btree_set::IntoIter<String>;
	type Item = String;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Outcome of a group lookup that keeps the failure cause visible.
#[derive(Debug)]
pub enum GroupResolution {
	/// Provider returned the user's memberships.
	Resolved(GroupSet),
	/// Provider could not be reached or answered unusably.
	Failed(TransportError),
}
impl GroupResolution {
	/// Returns true for [`GroupResolution::Failed`].
	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed(_))
	}

	/// Converts into a `Result`, keeping the failure cause.
	pub fn into_result(self) -> Result<GroupSet, TransportError> {
		match self {
			Self::Resolved(groups) => Ok(groups),
			Self::Failed(err) => Err(err),
		}
	}
}
impl From<Result<TeamListing, TransportError>> for GroupResolution {
	fn from(result: Result<TeamListing, TransportError>) -> Self {
		match result {
			Ok(listing) => Self::Resolved(GroupSet::from_listing(&listing)),
			Err(err) => Self::Failed(err),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn listing_yields_organization_and_team_groups() {
		let listing = TeamListing::from_iter([("acme", ["core", "infra"])]);
		let groups = GroupSet::from_listing(&listing);

		assert_eq!(groups, GroupSet::from_iter(["acme", "acme*core", "acme*infra"]));
	}

	#[test]
	fn empty_listing_yields_empty_set() {
		assert!(GroupSet::from_listing(&TeamListing::default()).is_empty());
	}

	#[test]
	fn organizations_without_teams_still_count() {
		let mut listing = TeamListing::default();

		listing.insert_organization("solo");
		listing.insert_team("acme", "core");
		listing.insert_team("acme", "core");

		let groups = GroupSet::from_listing(&listing);

		assert_eq!(groups.iter().collect::<Vec<_>>(), vec!["acme", "acme*core", "solo"]);
	}

	#[test]
	fn failures_keep_their_cause() {
		let resolution = GroupResolution::from(Err::<TeamListing, _>(TransportError::Status {
			status: 401,
			message: "Bad credentials".into(),
		}));

		assert!(resolution.is_failed());
		assert!(matches!(
			resolution.into_result(),
			Err(TransportError::Status { status: 401, .. })
		));
	}

	#[test]
	fn listing_deserializes_from_json_object() {
		let listing: TeamListing = serde_json::from_str(r#"{"acme":["core","infra"],"solo":[]}"#)
			.expect("Listing JSON should parse.");

		assert_eq!(listing.len(), 2);
		assert_eq!(listing.teams("acme").map(BTreeSet::len), Some(2));
	}
}

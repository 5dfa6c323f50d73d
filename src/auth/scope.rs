//! Requested and granted scope lists.

// self
use crate::_prelude::*;

/// OAuth scopes in the order they were supplied.
///
/// Entries are kept verbatim. A single string such as `"basic ponyfm:tracks:upload"` stays one
/// entry and is sent unsplit, so callers may pass either a pre-joined string or a list.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a scope list from any iterator of strings.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(scopes.into_iter().map(Into::into).collect())
	}

	/// Joins the scopes with `separator`.
	///
	/// Returns `None` when the joined value is empty, in which case no `scope` parameter is sent.
	pub fn join(&self, separator: &str) -> Option<String> {
		let joined = self.0.join(separator);

		if joined.is_empty() { None } else { Some(joined) }
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}
impl From<&str> for ScopeList {
	fn from(value: &str) -> Self {
		Self(vec![value.to_owned()])
	}
}
impl From<String> for ScopeList {
	fn from(value: String) -> Self {
		Self(vec![value])
	}
}
impl<S> From<Vec<S>> for ScopeList
where
	S: Into<String>,
{
	fn from(value: Vec<S>) -> Self {
		Self::new(value)
	}
}
impl<S, const N: usize> From<[S; N]> for ScopeList
where
	S: Into<String>,
{
	fn from(value: [S; N]) -> Self {
		Self::new(value)
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Repr {
			Joined(String),
			List(Vec<String>),
		}

		Ok(match Repr::deserialize(deserializer)? {
			Repr::Joined(value) => value.into(),
			Repr::List(values) => values.into(),
		})
	}
}

//! Normalized user profiles and the response classification shared by profile fetchers.
//!
//! A fetch ends in exactly one of four outcomes: a [`NormalizedProfile`], or one of the
//! [`ProfileError`] variants. The error branch of the HTTP collaborator always wins over body
//! parsing, and a provider error payload is only trusted when it parses as JSON and carries a
//! truthy `error` member.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ProfileError, http::GetError};

/// Canonical, provider-agnostic user record.
///
/// Mapped fields hold the provider's JSON value uninterpreted. `None` means the member was
/// missing; any present value, including `null` or a number, is copied as is.
/// [`text`](Self::text) reads a field as a string when the caller needs one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProfile {
	/// Provider name, e.g. `poniverse`.
	pub provider: String,
	/// Provider-side user identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Value>,
	/// Login name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub username: Option<Value>,
	/// Human-friendly display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<Value>,
	/// Email address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<Value>,
	/// Response body exactly as received.
	#[serde(rename = "_raw")]
	pub raw: String,
	/// Parsed response body.
	#[serde(rename = "_json")]
	pub parsed: Value,
}
impl NormalizedProfile {
	/// Builds a profile by reading the members named in `fields` from `parsed`.
	pub fn from_json(
		provider: impl Into<String>,
		fields: &ProfileFields,
		raw: impl Into<String>,
		parsed: Value,
	) -> Self {
		Self {
			provider: provider.into(),
			id: parsed.get(fields.id).cloned(),
			username: parsed.get(fields.username).cloned(),
			display_name: parsed.get(fields.display_name).cloned(),
			email: parsed.get(fields.email).cloned(),
			raw: raw.into(),
			parsed,
		}
	}

	/// Returns `field` when it holds a JSON string.
	pub fn text(field: &Option<Value>) -> Option<&str> {
		field.as_ref().and_then(Value::as_str)
	}
}

/// Names of the provider JSON members mapped onto [`NormalizedProfile`] fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileFields {
	/// Member holding the user identifier.
	pub id: &'static str,
	/// Member holding the login name.
	pub username: &'static str,
	/// Member holding the display name.
	pub display_name: &'static str,
	/// Member holding the email address.
	pub email: &'static str,
}

/// Parses a successful profile response body.
pub fn parse_profile_body(body: &str) -> Result<Value, ProfileError> {
	serde_json::from_str(body).map_err(|_| ProfileError::MalformedResponse)
}

/// Classifies a failed profile request.
///
/// Payloads that are missing, unparseable, or lack a truthy `error` member collapse into
/// [`ProfileError::TransportFailure`] with the original error kept as its source.
pub fn classify_get_error(err: GetError) -> ProfileError {
	let rejected = err
		.data
		.as_deref()
		.and_then(|data| serde_json::from_str::<Value>(data).ok())
		.filter(|json| json.get("error").is_some_and(is_truthy))
		.map(|json| description_text(json.get("error_description")));

	match rejected {
		Some(message) => ProfileError::ProviderRejected { message },
		None => ProfileError::TransportFailure { source: err },
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
		Value::String(text) => !text.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn description_text(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(text)) => text.clone(),
		Some(other) => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ProfileErrorKind;

	const FIELDS: ProfileFields =
		ProfileFields { id: "id", username: "username", display_name: "display_name", email: "email" };

	#[test]
	fn members_are_copied_uninterpreted() {
		let raw = r#"{"id":47057,"username":"Codesign","email":null}"#;
		let parsed = parse_profile_body(raw).expect("Fixture body should parse.");
		let profile = NormalizedProfile::from_json("poniverse", &FIELDS, raw, parsed);

		assert_eq!(profile.id, Some(Value::from(47057)));
		assert_eq!(NormalizedProfile::text(&profile.id), None);
		assert_eq!(NormalizedProfile::text(&profile.username), Some("Codesign"));
		assert_eq!(profile.display_name, None);
		assert_eq!(profile.email, Some(Value::Null));
	}

	#[test]
	fn non_object_json_yields_empty_profile() {
		let parsed = parse_profile_body("\"hello\"").expect("A JSON string is valid JSON.");
		let profile = NormalizedProfile::from_json("poniverse", &FIELDS, "\"hello\"", parsed);

		assert_eq!(profile.id, None);
		assert_eq!(profile.raw, "\"hello\"");
	}

	#[test]
	fn unparseable_body_is_malformed() {
		let err = parse_profile_body("Hello, world.").expect_err("Plain text must not parse.");

		assert_eq!(err.kind(), ProfileErrorKind::MalformedResponse);
	}

	#[test]
	fn error_payload_without_error_member_is_transport_failure() {
		let err = classify_get_error(GetError::http_status(500, r#"{"message":"boom"}"#));

		assert_eq!(err.kind(), ProfileErrorKind::TransportFailure);
		assert_eq!(err.to_string(), "Failed to fetch user profile");
	}

	#[test]
	fn falsy_error_member_is_not_a_rejection() {
		for payload in [r#"{"error":""}"#, r#"{"error":null}"#, r#"{"error":false}"#, r#"{"error":0}"#]
		{
			let err = classify_get_error(GetError::http_status(400, payload));

			assert_eq!(err.kind(), ProfileErrorKind::TransportFailure, "payload: {payload}");
		}
	}

	#[test]
	fn rejection_without_description_has_empty_message() {
		let err = classify_get_error(GetError::http_status(401, r#"{"error":"invalid_token"}"#));

		match err {
			ProfileError::ProviderRejected { message } => assert_eq!(message, ""),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn structured_description_is_rendered_as_json_text() {
		let err = classify_get_error(GetError::http_status(
			400,
			r#"{"error":"invalid_request","error_description":{"field":"token"}}"#,
		));

		assert_eq!(err.to_string(), r#"{"field":"token"}"#);

		let err = classify_get_error(GetError::http_status(
			400,
			r#"{"error":"invalid_request","error_description":[1,2]}"#,
		));

		assert_eq!(err.to_string(), "[1,2]");
	}

	#[test]
	fn unparseable_error_payload_is_swallowed() {
		let err = classify_get_error(GetError::http_status(502, "<html>Bad Gateway</html>"));

		match err {
			ProfileError::TransportFailure { source } => {
				assert_eq!(source.status, Some(502));
				assert_eq!(source.data.as_deref(), Some("<html>Bad Gateway</html>"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn profile_serializes_in_canonical_shape() {
		let raw = r#"{"id":"1","display_name":"Pinkie"}"#;
		let parsed = parse_profile_body(raw).expect("Fixture body should parse.");
		let profile = NormalizedProfile::from_json("poniverse", &FIELDS, raw, parsed);
		let value = serde_json::to_value(&profile).expect("Profile should serialize.");

		assert_eq!(value["provider"], "poniverse");
		assert_eq!(value["displayName"], "Pinkie");
		assert_eq!(value["_raw"], raw);
		assert_eq!(value["_json"]["id"], "1");
		assert!(value.get("email").is_none());
	}
}

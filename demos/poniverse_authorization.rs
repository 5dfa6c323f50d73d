//! Builds a Poniverse strategy, prints the authorization redirect, and shows where the callback
//! leg would pick up.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
// self
use oauth2_poniverse::{auth::TokenSet, error::BoxError, poniverse, profile::NormalizedProfile};

fn main() -> Result<()> {
	color_eyre::install()?;

	let options = poniverse::options()
		.client_id("123-456-789")
		.client_secret("shhh-its-a-secret")
		.callback_url("https://www.example.net/auth/poniverse/callback")
		.scope(["basic", "ponyfm:tracks:upload"]);
	let strategy =
		poniverse::strategy(options, |_tokens: TokenSet, profile: NormalizedProfile| async move {
			Ok::<_, BoxError>(NormalizedProfile::text(&profile.username).map(ToOwned::to_owned))
		})?;
	let request = strategy.authorization_url()?;

	println!("Send your user to {}.", request.url);

	let mut pending: HashMap<String, ()> = HashMap::new();

	pending.insert(request.state.clone(), ());

	// Simulate the callback handler matching the returned `state`.
	let returned_state = request.state.clone();

	if pending.remove(&returned_state).is_some() {
		println!("State matched; call Strategy::authenticate with the returned code.");
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}

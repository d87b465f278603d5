//! Parameter binding against a location path.
//!
//! Recomputes the match for a pattern and zips its parameter names to the
//! positional captures. Callers may bind any pattern at any time; the
//! result is only meaningful when the pattern belongs to the route that is
//! currently active for the location.

use std::collections::HashMap;

use crate::error::RouterError;
use crate::pattern::compile;

/// Name-to-value bindings for one matched pattern.
///
/// A value is `None` when the parameter had no corresponding capture.
/// Surplus names are bound to that explicit absent value rather than
/// treated as an error.
pub type ParamMap = HashMap<String, Option<String>>;

/// Extracts named parameters for `pattern` from `location_path`.
///
/// A pattern with no parameter segments that matches the location yields
/// an empty map. A location that does not match the pattern at all is a
/// failure, never a partially filled map.
///
/// # Example
///
/// ```
/// use softnav::bind_params;
///
/// let params = bind_params("/user/:id/post/:postId", "/user/42/post/99").unwrap();
/// assert_eq!(params["id"].as_deref(), Some("42"));
/// assert_eq!(params["postId"].as_deref(), Some("99"));
/// ```
///
/// # Errors
///
/// Returns [`RouterError::NoMatch`] if the location does not satisfy the
/// pattern, and [`RouterError::InvalidPattern`] if the pattern does not
/// compile.
pub fn bind_params(pattern: &str, location_path: &str) -> Result<ParamMap, RouterError> {
	let matcher = compile(pattern)?;
	let captures = matcher
		.captures(location_path)
		.ok_or_else(|| RouterError::NoMatch {
			pattern: pattern.to_string(),
			path: location_path.to_string(),
		})?;

	Ok(matcher
		.params()
		.iter()
		.map(|p| (p.name.clone(), captures.get(p.index).cloned().flatten()))
		.collect())
}

//! Error types for routing.
//!
//! Configuration problems (empty table, double mount, bad pattern) are
//! surfaced at startup; runtime failures (no match, view failure) carry
//! enough context to name the pattern and location involved.

use thiserror::Error;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// The route table was empty at construction.
	///
	/// The router cannot produce a fallback match without at least one
	/// route, so this is rejected loudly instead of tolerated.
	#[error("route table is empty; at least one route is required for fallback")]
	EmptyRouteTable,
	/// `mount` was called on a router that is already mounted.
	///
	/// Mounting twice would double-register the navigation listeners.
	#[error("router is already mounted")]
	AlreadyMounted,
	/// A route pattern failed to compile.
	#[error("invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// Why compilation failed.
		reason: String,
	},
	/// A pattern did not match the location it was bound against.
	///
	/// Distinct from a successful match with zero parameters, which is a
	/// valid, common case.
	#[error("pattern '{pattern}' does not match location '{path}'")]
	NoMatch {
		/// The pattern that was bound.
		pattern: String,
		/// The location path that failed to match.
		path: String,
	},
	/// The asynchronous view producer failed.
	#[error("view resolution failed: {0}")]
	View(String),
	/// A host history or navigation primitive failed.
	#[error("navigation failed: {0}")]
	Navigation(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_configuration_error_display() {
		assert_eq!(
			RouterError::EmptyRouteTable.to_string(),
			"route table is empty; at least one route is required for fallback"
		);
		assert_eq!(
			RouterError::AlreadyMounted.to_string(),
			"router is already mounted"
		);
	}

	#[rstest]
	fn test_no_match_display_names_both_sides() {
		let err = RouterError::NoMatch {
			pattern: "/user/:id".to_string(),
			path: "/about".to_string(),
		};
		assert!(err.to_string().contains("/user/:id"));
		assert!(err.to_string().contains("/about"));
	}

	#[rstest]
	fn test_invalid_pattern_display() {
		let err = RouterError::InvalidPattern {
			pattern: "/bad(".to_string(),
			reason: "unclosed group".to_string(),
		};
		assert!(err.to_string().contains("/bad("));
		assert!(err.to_string().contains("unclosed group"));
	}
}

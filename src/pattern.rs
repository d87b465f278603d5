//! Path pattern compilation.
//!
//! Compiles route patterns made of literal segments and `:name` parameter
//! segments into anchored matchers. Compilation is a pure function of the
//! pattern text and is redone on every match attempt: routing runs at
//! human-navigation frequency, so recomputation is preferred over a
//! compile cache.

use regex::Regex;

use crate::error::RouterError;

/// A named parameter segment together with its capture position.
///
/// Name and position are produced by the same compilation pass that emits
/// the capture group, so the association never depends on two separately
/// computed sequences staying in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
	/// The parameter name, without the `:` sigil.
	pub name: String,
	/// Zero-based capture index within the compiled expression.
	pub index: usize,
}

/// A compiled, anchored matching rule derived from a path pattern.
///
/// Matches the entire location path, never a substring. Each parameter
/// segment compiles to a greedy `(.+)` wildcard: one or more characters,
/// not path-aware, so a capture can span what would otherwise be
/// separator boundaries. Only the separators literally present in the
/// pattern constrain the match.
#[derive(Debug, Clone)]
pub struct Matcher {
	pattern: String,
	regex: Regex,
	params: Vec<ParamSpec>,
}

/// Compiles a path pattern into a [`Matcher`].
///
/// Path separators are escaped to match literally; a `:` followed by word
/// characters starts a parameter segment (a parameter never spans a `/`
/// boundary in the pattern text). Pure and deterministic.
///
/// # Example
///
/// ```
/// use softnav::pattern::compile;
///
/// let matcher = compile("/user/:id").unwrap();
/// assert!(matcher.is_match("/user/42"));
/// assert!(!matcher.is_match("/users/42"));
/// ```
///
/// # Errors
///
/// Returns [`RouterError::InvalidPattern`] if the pattern text does not
/// form a valid expression. [`crate::Router::new`] validates every table
/// entry up front, so for registered routes this surfaces at startup.
pub fn compile(pattern: &str) -> Result<Matcher, RouterError> {
	let mut expr = String::from("^");
	let mut params = Vec::new();
	let mut chars = pattern.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			':' if chars.peek().is_some_and(|n| is_param_char(*n)) => {
				let mut name = String::new();
				while let Some(&next) = chars.peek() {
					if !is_param_char(next) {
						break;
					}
					name.push(next);
					chars.next();
				}
				params.push(ParamSpec {
					name,
					index: params.len(),
				});
				expr.push_str("(.+)");
			}
			'/' => expr.push_str("\\/"),
			_ => expr.push(c),
		}
	}
	expr.push('$');

	let regex = Regex::new(&expr).map_err(|e| RouterError::InvalidPattern {
		pattern: pattern.to_string(),
		reason: e.to_string(),
	})?;

	Ok(Matcher {
		pattern: pattern.to_string(),
		regex,
		params,
	})
}

fn is_param_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

impl Matcher {
	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter segments in order of appearance.
	pub fn params(&self) -> &[ParamSpec] {
		&self.params
	}

	/// Checks whether this pattern matches the given path in full.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Attempts a full match and returns the positional captures.
	///
	/// A capture group that did not participate in the match yields
	/// `None` at its position.
	pub fn captures(&self, path: &str) -> Option<Vec<Option<String>>> {
		self.regex.captures(path).map(|caps| {
			(1..caps.len())
				.map(|i| caps.get(i).map(|m| m.as_str().to_string()))
				.collect()
		})
	}
}

impl std::fmt::Display for Matcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_literal_pattern_matches_exactly() {
		let matcher = compile("/about").unwrap();
		assert!(matcher.is_match("/about"));
		assert!(!matcher.is_match("/about/"));
		assert!(!matcher.is_match("/aboutx"));
		assert!(matcher.params().is_empty());
	}

	#[test]
	fn test_anchored_full_path_only() {
		let matcher = compile("/user").unwrap();
		assert!(!matcher.is_match("/user/42"));
		assert!(!matcher.is_match("prefix/user"));
	}

	#[test]
	fn test_single_param_capture() {
		let matcher = compile("/user/:id").unwrap();
		let captures = matcher.captures("/user/42").unwrap();
		assert_eq!(captures, vec![Some("42".to_string())]);
	}

	#[test]
	fn test_param_names_and_positions_in_one_pass() {
		let matcher = compile("/user/:id/post/:postId").unwrap();
		assert_eq!(
			matcher.params(),
			&[
				ParamSpec {
					name: "id".to_string(),
					index: 0
				},
				ParamSpec {
					name: "postId".to_string(),
					index: 1
				},
			]
		);
	}

	#[test]
	fn test_param_requires_at_least_one_char() {
		let matcher = compile("/user/:id").unwrap();
		assert!(!matcher.is_match("/user/"));
	}

	#[test]
	fn test_greedy_capture_spans_separators() {
		// Wildcards are not path-aware; only literal separators in the
		// pattern constrain the match.
		let matcher = compile("/files/:path").unwrap();
		let captures = matcher.captures("/files/css/main.css").unwrap();
		assert_eq!(captures, vec![Some("css/main.css".to_string())]);
	}

	#[test]
	fn test_underscore_and_digits_in_param_name() {
		let matcher = compile("/orders/:order_id2").unwrap();
		assert_eq!(matcher.params()[0].name, "order_id2");
	}

	#[test]
	fn test_sigil_before_word_char_starts_param_mid_segment() {
		// Any ':' followed by a word character starts a parameter, even
		// inside a segment; the sigil itself is consumed, so the capture
		// starts right after the preceding literal.
		let matcher = compile("/time/12:30").unwrap();
		assert_eq!(
			matcher.params(),
			&[ParamSpec {
				name: "30".to_string(),
				index: 0
			}]
		);
		assert_eq!(
			matcher.captures("/time/12:45").unwrap(),
			vec![Some(":45".to_string())]
		);
	}

	#[test]
	fn test_bare_sigil_is_literal() {
		// ':' not followed by a word character stays literal.
		let matcher = compile("/time/:/entries").unwrap();
		assert!(matcher.is_match("/time/:/entries"));
		assert!(matcher.params().is_empty());
	}

	#[test]
	fn test_invalid_pattern_rejected() {
		let result = compile("/bad(");
		assert!(matches!(
			result,
			Err(RouterError::InvalidPattern { .. })
		));
	}

	#[test]
	fn test_compile_is_deterministic() {
		let a = compile("/user/:id").unwrap();
		let b = compile("/user/:id").unwrap();
		assert_eq!(a.pattern(), b.pattern());
		assert_eq!(a.params(), b.params());
	}

	#[test]
	fn test_matcher_display() {
		let matcher = compile("/user/:id").unwrap();
		assert_eq!(format!("{}", matcher), "/user/:id");
	}
}

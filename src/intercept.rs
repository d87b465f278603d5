//! In-page link interception.
//!
//! Any element in the page body carrying the [`LINK_ATTR`] marker
//! attribute together with an `href` is an intercepted navigation
//! trigger; no per-link registration exists. Whether an event target is
//! navigable is decided by an explicit attribute lookup, not by probing
//! for properties the node happens to have.

/// Marker attribute that flags an element as an intercepted in-page link.
pub const LINK_ATTR: &str = "data-link";

/// Returns the `href` of the event's target if it is a flagged link.
///
/// `None` means the click is not ours to handle and default navigation
/// must proceed untouched.
#[cfg(target_arch = "wasm32")]
pub(crate) fn navigable_href(event: &web_sys::Event) -> Option<String> {
	use wasm_bindgen::JsCast;

	let element = event.target()?.dyn_into::<web_sys::Element>().ok()?;
	if !element.has_attribute(LINK_ATTR) {
		return None;
	}
	element.get_attribute("href")
}

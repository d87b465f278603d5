//! Host environment adapters.
//!
//! The router never touches `window`, `history`, or the DOM directly. The
//! location and history primitives it consumes are wrapped behind the
//! [`Host`] trait and the display container behind [`MountTarget`], so the
//! routing logic stays testable off-browser. The browser-backed
//! implementations compile only for `wasm32`.

use crate::error::RouterError;

/// Adapter over the host environment's location and history primitives.
pub trait Host {
	/// Returns the current navigable path of the active page.
	fn path(&self) -> String;

	/// Returns the origin (scheme and authority) of the active page.
	fn origin(&self) -> String;

	/// Pushes a new navigable address onto session history without
	/// reloading.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Navigation`] if the history primitive fails.
	fn push_state(&self, url: &str) -> Result<(), RouterError>;

	/// Forces a full reload of the current address.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Navigation`] if the reload primitive fails.
	fn reload(&self) -> Result<(), RouterError>;
}

/// A display container whose content the router replaces wholesale.
///
/// The router holds the target for the life of the page but does not own
/// the underlying container; the host environment does.
pub trait MountTarget {
	/// The displayable unit a view producer yields.
	type Renderable;

	/// Replaces all current content with `content`.
	fn replace(&self, content: Self::Renderable);
}

#[cfg(target_arch = "wasm32")]
mod browser {
	use wasm_bindgen::JsValue;

	use super::{Host, MountTarget};
	use crate::error::RouterError;
	use crate::error_log;

	fn js_error(context: &str, value: JsValue) -> RouterError {
		RouterError::Navigation(format!("{context}: {value:?}"))
	}

	fn window() -> Result<web_sys::Window, RouterError> {
		web_sys::window().ok_or_else(|| RouterError::Navigation("no window available".to_string()))
	}

	/// Browser-backed [`Host`] over `window.location` and `window.history`.
	#[derive(Debug, Clone, Copy, Default)]
	pub struct BrowserHost;

	impl BrowserHost {
		/// Creates a browser host adapter.
		pub fn new() -> Self {
			Self
		}
	}

	impl Host for BrowserHost {
		fn path(&self) -> String {
			window()
				.and_then(|w| w.location().pathname().map_err(|e| js_error("pathname", e)))
				.unwrap_or_else(|_| "/".to_string())
		}

		fn origin(&self) -> String {
			window()
				.and_then(|w| w.location().origin().map_err(|e| js_error("origin", e)))
				.unwrap_or_default()
		}

		fn push_state(&self, url: &str) -> Result<(), RouterError> {
			let history = window()?.history().map_err(|e| js_error("history", e))?;
			history
				.push_state_with_url(&JsValue::NULL, "", Some(url))
				.map_err(|e| js_error("pushState", e))
		}

		fn reload(&self) -> Result<(), RouterError> {
			window()?
				.location()
				.reload()
				.map_err(|e| js_error("reload", e))
		}
	}

	/// Mount target over a DOM element.
	///
	/// Replacement clears the element's markup and appends the new node.
	#[derive(Debug, Clone)]
	pub struct ElementTarget {
		element: web_sys::Element,
	}

	impl ElementTarget {
		/// Wraps a DOM element as the router's mount target.
		pub fn new(element: web_sys::Element) -> Self {
			Self { element }
		}
	}

	impl MountTarget for ElementTarget {
		type Renderable = web_sys::Node;

		fn replace(&self, content: web_sys::Node) {
			self.element.set_inner_html("");
			if self.element.append_child(&content).is_err() {
				error_log!("failed to append renderable to mount target");
			}
		}
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHost, ElementTarget};

//! Client-side page router for WASM single-page applications.
//!
//! Maps path patterns like `/user/:id` to asynchronous view producers,
//! intercepts clicks on elements flagged with the `data-link` attribute
//! and browser back/forward navigation, and swaps the mount target's
//! content without a full page reload.
//!
//! The routing logic is generic over a [`Host`] adapter (location and
//! history primitives) and a [`MountTarget`] (the display container), so
//! it runs under plain `cargo test` off-browser; the `web-sys` backed
//! [`BrowserHost`] and [`ElementTarget`] are compiled for `wasm32` only.
//!
//! # Example
//!
//! ```ignore
//! use softnav::{BrowserHost, ElementTarget, Route, Router};
//!
//! let app = document.get_element_by_id("app").unwrap();
//! let router = Router::init(
//! 	BrowserHost::new(),
//! 	ElementTarget::new(app),
//! 	vec![
//! 		// Slot 0 doubles as the fallback for unmatched locations.
//! 		Route::new("/", || async { Ok(home_page()) }),
//! 		Route::new("/about", || async { Ok(about_page()) }),
//! 		Route::new("/user/:id", || async { Ok(user_page().await?) }),
//! 	],
//! )?;
//! ```

pub mod error;
pub mod history;
pub mod intercept;
mod logging;
pub mod params;
pub mod pattern;
pub mod router;

pub use error::RouterError;
#[cfg(target_arch = "wasm32")]
pub use history::{BrowserHost, ElementTarget};
pub use history::{Host, MountTarget};
pub use intercept::LINK_ATTR;
pub use params::{ParamMap, bind_params};
pub use pattern::{Matcher, ParamSpec, compile};
pub use router::{Mountable, Resolution, Route, Router};

/// Installs the console panic hook for readable WASM panics.
///
/// Call once at application start before mounting the router.
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
	console_error_panic_hook::set_once();
}

//! Core router implementation.
//!
//! The [`Router`] owns the route table and the mount target and keeps the
//! target's content synchronized with the current location: intercept,
//! update location, resolve view, render. It is an explicit value owned
//! by application start-up code; clones share the same underlying state
//! and are cheap, so event closures hold their own handle.

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::error::RouterError;
use crate::history::{Host, MountTarget};
use crate::params::{ParamMap, bind_params};
use crate::pattern::compile;

/// Type alias for boxed view producers.
type ViewFn<V> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<V, RouterError>>>;

/// A single route: a path pattern paired with a view producer.
///
/// The pattern uses literal segments and `:name` parameter segments;
/// parameter names must be unique within one pattern. The view producer
/// takes no arguments and asynchronously yields the renderable to mount.
pub struct Route<V> {
	pattern: String,
	view: ViewFn<V>,
}

impl<V> Clone for Route<V> {
	fn clone(&self) -> Self {
		Self {
			pattern: self.pattern.clone(),
			view: Rc::clone(&self.view),
		}
	}
}

impl<V> std::fmt::Debug for Route<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.finish()
	}
}

impl<V> Route<V> {
	/// Creates a route from a pattern and an asynchronous view producer.
	///
	/// # Example
	///
	/// ```
	/// use softnav::Route;
	///
	/// let route: Route<String> =
	/// 	Route::new("/user/:id", || async { Ok("user page".to_string()) });
	/// assert_eq!(route.pattern(), "/user/:id");
	/// ```
	pub fn new<F, Fut>(pattern: impl Into<String>, view: F) -> Self
	where
		F: Fn() -> Fut + 'static,
		Fut: std::future::Future<Output = Result<V, RouterError>> + 'static,
	{
		Self {
			pattern: pattern.into(),
			view: Rc::new(move || view().boxed_local()),
		}
	}

	/// Returns the path pattern.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Invokes the view producer.
	pub fn render(&self) -> LocalBoxFuture<'static, Result<V, RouterError>> {
		(self.view)()
	}
}

/// A resolved route for a location path.
#[derive(Debug)]
pub struct Resolution<'a, V> {
	/// Index of the chosen route within the table.
	pub index: usize,
	/// The chosen route.
	pub route: &'a Route<V>,
	/// Raw positional capture substrings, not yet bound to names.
	///
	/// For the slot-0 fallback this is a synthesized one-element list
	/// holding the whole location path; those captures carry no meaning
	/// and the fallback view must not rely on them.
	pub captures: Vec<String>,
}

struct Inner<H: Host, M: MountTarget> {
	host: H,
	target: M,
	routes: Vec<Route<M::Renderable>>,
	/// Monotonic re-route token. A render completion holding a stale
	/// token is dropped instead of overwriting newer content.
	generation: Cell<u64>,
	mounted: Cell<bool>,
}

/// The client-side page router.
///
/// Construction validates the route table; [`Router::mount`] attaches the
/// navigation listeners and schedules the first render. The router stays
/// mounted for the life of the page, there is no teardown.
pub struct Router<H: Host, M: MountTarget> {
	inner: Rc<Inner<H, M>>,
}

impl<H: Host, M: MountTarget> Clone for Router<H, M> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<H: Host, M: MountTarget> std::fmt::Debug for Router<H, M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.inner.routes.len())
			.field("mounted", &self.inner.mounted.get())
			.finish()
	}
}

impl<H: Host, M: MountTarget> Router<H, M> {
	/// Creates a router over `host` and `target` with an ordered route
	/// table.
	///
	/// Table order is significant: the first route whose pattern matches
	/// wins, and the first table entry doubles as the fallback for
	/// locations nothing matches. Declare the "not found" page first when
	/// one exists.
	///
	/// # Errors
	///
	/// Returns [`RouterError::EmptyRouteTable`] for an empty table and
	/// [`RouterError::InvalidPattern`] if any pattern fails to compile.
	pub fn new(host: H, target: M, routes: Vec<Route<M::Renderable>>) -> Result<Self, RouterError> {
		if routes.is_empty() {
			return Err(RouterError::EmptyRouteTable);
		}
		for route in &routes {
			compile(route.pattern())?;
		}

		Ok(Self {
			inner: Rc::new(Inner {
				host,
				target,
				routes,
				generation: Cell::new(0),
				mounted: Cell::new(false),
			}),
		})
	}

	/// Creates and mounts a router in one call.
	///
	/// # Errors
	///
	/// Propagates the [`Router::new`] and [`Router::mount`] errors.
	pub fn init(host: H, target: M, routes: Vec<Route<M::Renderable>>) -> Result<Self, RouterError>
	where
		Self: Mountable,
	{
		let router = Self::new(host, target, routes)?;
		router.mount()?;
		Ok(router)
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.routes.len()
	}

	/// Returns whether `mount` has already run.
	pub fn is_mounted(&self) -> bool {
		self.inner.mounted.get()
	}

	/// Resolves a location path to a route.
	///
	/// Walks the table in declaration order, compiling each pattern
	/// fresh, and picks the first full match. When nothing matches, falls
	/// back to table slot 0 with the raw path as its sole capture. Total
	/// for the validated table: some route is always returned.
	pub fn resolve<'a>(&'a self, path: &str) -> Resolution<'a, M::Renderable> {
		for (index, route) in self.inner.routes.iter().enumerate() {
			let Ok(matcher) = compile(route.pattern()) else {
				continue;
			};
			if let Some(captures) = matcher.captures(path) {
				return Resolution {
					index,
					route,
					captures: captures
						.into_iter()
						.map(|c| c.unwrap_or_default())
						.collect(),
				};
			}
		}

		Resolution {
			index: 0,
			route: &self.inner.routes[0],
			captures: vec![path.to_string()],
		}
	}

	/// Extracts named parameters for `pattern` against the current
	/// location.
	///
	/// Recomputed from the host's path on every call, so the result is
	/// only meaningful when `pattern` belongs to the currently active
	/// route.
	///
	/// # Errors
	///
	/// Returns [`RouterError::NoMatch`] if the current location does not
	/// satisfy `pattern`.
	pub fn get_params(&self, pattern: &str) -> Result<ParamMap, RouterError> {
		bind_params(pattern, &self.inner.host.path())
	}

	/// Programmatic hard navigation to an absolute-path endpoint.
	///
	/// Pushes `origin + endpoint` onto session history and forces a full
	/// reload. Deliberately heavier than link interception: it does not
	/// reuse the soft-render path, so page-level state starts from a
	/// clean slate.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Navigation`] if a host primitive fails.
	pub fn navigate(&self, endpoint: &str) -> Result<(), RouterError> {
		let url = format!("{}{}", self.inner.host.origin(), endpoint);
		self.inner.host.push_state(&url)?;
		self.inner.host.reload()
	}

	/// Re-resolves the current location and swaps the mount target's
	/// content for the produced renderable.
	///
	/// The target is only cleared once a renderable has been produced; on
	/// view failure the previous content stays displayed and the error
	/// propagates. A re-route that was superseded while its view was in
	/// flight drops its completion silently instead of overwriting newer
	/// content.
	///
	/// # Errors
	///
	/// Returns [`RouterError::View`] when the view producer fails.
	pub async fn reroute(&self) -> Result<(), RouterError> {
		let generation = self.inner.generation.get().wrapping_add(1);
		self.inner.generation.set(generation);

		let path = self.inner.host.path();
		let pending = {
			let resolution = self.resolve(&path);
			resolution.route.render()
		};
		let content = pending.await?;

		if self.inner.generation.get() != generation {
			crate::info_log!("dropping superseded render for '{}'", path);
			return Ok(());
		}
		self.inner.target.replace(content);
		Ok(())
	}

	fn claim_mount(&self) -> Result<(), RouterError> {
		if self.inner.mounted.replace(true) {
			return Err(RouterError::AlreadyMounted);
		}
		Ok(())
	}
}

/// Mounting: listener registration and first-render sequencing.
///
/// Split into its own trait because the browser wiring needs `'static`
/// handles for its event closures, which the rest of the router does not
/// require.
pub trait Mountable {
	/// Attaches navigation listeners and schedules the first render.
	///
	/// The history-pop listener is registered immediately. Link
	/// interception and the first re-route wait for the document to
	/// finish its initial load; if it already has, they run synchronously
	/// within this call.
	///
	/// # Errors
	///
	/// Returns [`RouterError::AlreadyMounted`] on a second call, which
	/// would double-register the listeners.
	fn mount(&self) -> Result<(), RouterError>;
}

#[cfg(not(target_arch = "wasm32"))]
impl<H: Host, M: MountTarget> Mountable for Router<H, M> {
	fn mount(&self) -> Result<(), RouterError> {
		// Browser listeners exist only on wasm; native callers drive
		// `reroute` directly.
		self.claim_mount()
	}
}

#[cfg(target_arch = "wasm32")]
impl<H, M> Mountable for Router<H, M>
where
	H: Host + 'static,
	M: MountTarget + 'static,
{
	fn mount(&self) -> Result<(), RouterError> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let window = web_sys::window()
			.ok_or_else(|| RouterError::Navigation("no window available".to_string()))?;
		let document = window
			.document()
			.ok_or_else(|| RouterError::Navigation("no document available".to_string()))?;

		// Claim only once the environment lookups have succeeded, so a
		// failed mount can be retried.
		self.claim_mount()?;

		// Back/forward handling goes live immediately; the browser has
		// already updated its own history entry when popstate fires.
		let router = self.clone();
		let on_popstate = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
			move |_event: web_sys::PopStateEvent| {
				router.spawn_reroute();
			},
		);
		window
			.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
			.map_err(|e| RouterError::Navigation(format!("popstate listener: {e:?}")))?;
		// Listeners live for the page lifetime.
		on_popstate.forget();

		if document.ready_state() == "loading" {
			let router = self.clone();
			let on_loaded = Closure::<dyn FnMut()>::new(move || {
				router.wire_links_and_render();
			});
			document
				.add_event_listener_with_callback(
					"DOMContentLoaded",
					on_loaded.as_ref().unchecked_ref(),
				)
				.map_err(|e| RouterError::Navigation(format!("loaded listener: {e:?}")))?;
			on_loaded.forget();
		} else {
			self.wire_links_and_render();
		}

		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
impl<H, M> Router<H, M>
where
	H: Host + 'static,
	M: MountTarget + 'static,
{
	fn wire_links_and_render(&self) {
		// Popstate handling and the first render still work without link
		// interception, so a wiring failure is not fatal.
		if let Err(err) = self.wire_links() {
			crate::warn_log!("link interception wiring failed: {}", err);
		}
		self.spawn_reroute();
	}

	fn wire_links(&self) -> Result<(), RouterError> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let body = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.body())
			.ok_or_else(|| RouterError::Navigation("document has no body".to_string()))?;

		let router = self.clone();
		let on_click =
			Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |event: web_sys::MouseEvent| {
				let Some(href) = crate::intercept::navigable_href(&event) else {
					return;
				};
				event.prevent_default();
				if let Err(err) = router.inner.host.push_state(&href) {
					crate::error_log!("push failed for '{}': {}", href, err);
					return;
				}
				router.spawn_reroute();
			});
		body.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
			.map_err(|e| RouterError::Navigation(format!("click listener: {e:?}")))?;
		on_click.forget();

		Ok(())
	}

	fn spawn_reroute(&self) {
		let router = self.clone();
		wasm_bindgen_futures::spawn_local(async move {
			if let Err(err) = router.reroute().await {
				// The previous content stays displayed on failure.
				crate::error_log!("re-route failed: {}", err);
			}
		});
	}
}

//! Host-side capabilities the controller mutates: the rendered UI surface, the router, and the
//! settle timer.
//!
//! Concrete browser adapters live in `ui_surface_web`; the no-op and in-memory adapters here keep
//! the dispatch logic testable without a DOM.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    rc::Rc,
    time::Duration,
};

/// How an element is located on the surface.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementQuery {
    /// Element whose marker attribute equals the logical name.
    Marker(String),
    /// Raw selector; the first match wins.
    Selector(String),
    /// Export trigger whose export attribute equals the data type.
    ExportMarker(String),
}

impl ElementQuery {
    /// Returns the marker name, selector, or data type text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Marker(value) | Self::Selector(value) | Self::ExportMarker(value) => value,
        }
    }
}

/// Element resolved by [`UiSurface::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceElement {
    /// Query that located the element.
    pub query: ElementQuery,
    /// Whether the element is currently visible.
    pub visible: bool,
}

/// Abstract view over the rendered document.
pub trait UiSurface {
    /// Locates the first element matching `query`.
    fn find(&self, query: &ElementQuery) -> Option<SurfaceElement>;

    /// Activates an element. Returns `false` when the element vanished.
    fn click(&self, element: &SurfaceElement) -> bool;

    /// Shows or hides an element.
    fn set_visible(&self, element: &SurfaceElement, visible: bool) -> bool;

    /// Smooth-scrolls an element into view.
    fn scroll_into_view(&self, element: &SurfaceElement) -> bool;

    /// Writes an input value and emits a change notification.
    fn set_input_value(&self, element: &SurfaceElement, value: &str) -> bool;
}

/// Router capability used for `navigate` actions.
pub trait Navigator {
    /// Moves the application to `path`.
    fn navigate(&self, path: &str);
}

/// Object-safe boxed future used by [`Settle`].
pub type SettleFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// Timer capability used for settle delays between UI mutations.
pub trait Settle {
    /// Resolves after `duration`.
    fn settle(&self, duration: Duration) -> SettleFuture<'_>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Surface with no elements.
pub struct NoopUiSurface;

impl UiSurface for NoopUiSurface {
    fn find(&self, _query: &ElementQuery) -> Option<SurfaceElement> {
        None
    }

    fn click(&self, _element: &SurfaceElement) -> bool {
        false
    }

    fn set_visible(&self, _element: &SurfaceElement, _visible: bool) -> bool {
        false
    }

    fn scroll_into_view(&self, _element: &SurfaceElement) -> bool {
        false
    }

    fn set_input_value(&self, _element: &SurfaceElement, _value: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Recorded state of one in-memory element.
pub struct MemoryElement {
    /// Current visibility.
    pub visible: bool,
    /// Number of clicks received.
    pub clicks: usize,
    /// Number of scroll requests received.
    pub scrolls: usize,
    /// Last written input value.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory surface keyed by query, for tests and headless demos.
pub struct MemoryUiSurface {
    elements: Rc<RefCell<BTreeMap<ElementQuery, MemoryElement>>>,
}

impl MemoryUiSurface {
    /// Adds or replaces an element.
    pub fn insert(&self, query: ElementQuery, visible: bool) {
        self.elements.borrow_mut().insert(
            query,
            MemoryElement {
                visible,
                ..MemoryElement::default()
            },
        );
    }

    /// Returns the recorded state of an element.
    pub fn element(&self, query: &ElementQuery) -> Option<MemoryElement> {
        self.elements.borrow().get(query).cloned()
    }

    fn update(&self, query: &ElementQuery, apply: impl FnOnce(&mut MemoryElement)) -> bool {
        match self.elements.borrow_mut().get_mut(query) {
            Some(element) => {
                apply(element);
                true
            }
            None => false,
        }
    }
}

impl UiSurface for MemoryUiSurface {
    fn find(&self, query: &ElementQuery) -> Option<SurfaceElement> {
        self.elements
            .borrow()
            .get(query)
            .map(|element| SurfaceElement {
                query: query.clone(),
                visible: element.visible,
            })
    }

    fn click(&self, element: &SurfaceElement) -> bool {
        self.update(&element.query, |element| element.clicks += 1)
    }

    fn set_visible(&self, element: &SurfaceElement, visible: bool) -> bool {
        self.update(&element.query, |element| element.visible = visible)
    }

    fn scroll_into_view(&self, element: &SurfaceElement) -> bool {
        self.update(&element.query, |element| element.scrolls += 1)
    }

    fn set_input_value(&self, element: &SurfaceElement, value: &str) -> bool {
        self.update(&element.query, |element| {
            element.value = Some(value.to_string())
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Navigator that ignores navigation requests.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _path: &str) {}
}

#[derive(Debug, Clone, Default)]
/// Navigator that records every requested path.
pub struct MemoryNavigator {
    history: Rc<RefCell<Vec<String>>>,
}

impl MemoryNavigator {
    /// Returns the recorded paths in request order.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, path: &str) {
        self.history.borrow_mut().push(path.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Settle timer that resolves immediately.
pub struct ImmediateSettle;

impl Settle for ImmediateSettle {
    fn settle(&self, _duration: Duration) -> SettleFuture<'_> {
        Box::pin(async {})
    }
}

#[derive(Debug, Clone, Default)]
/// Settle timer that resolves immediately and records requested delays.
pub struct MemorySettle {
    delays: Rc<RefCell<Vec<Duration>>>,
}

impl MemorySettle {
    /// Returns the recorded delays in request order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Settle for MemorySettle {
    fn settle(&self, duration: Duration) -> SettleFuture<'_> {
        self.delays.borrow_mut().push(duration);
        Box::pin(async {})
    }
}

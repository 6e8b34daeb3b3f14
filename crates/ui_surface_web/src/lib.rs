//! Browser (`wasm32`) implementations of the [`ui_controller`] host traits.
//!
//! [`WebUiSurface`] resolves element queries with `document.querySelector`, and [`TimerSettle`]
//! waits on `setTimeout`. On native targets both degrade to no-ops so dependent crates still
//! build and test off the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use ui_controller::{ControllerConfig, ElementQuery, Settle, SettleFuture, SurfaceElement, UiSurface};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq, Eq)]
/// DOM-backed surface that locates elements by marker attribute or raw selector.
pub struct WebUiSurface {
    marker_attribute: String,
    export_marker_attribute: String,
}

impl Default for WebUiSurface {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

impl WebUiSurface {
    /// Uses the marker attributes from `config`.
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            marker_attribute: config.marker_attribute.clone(),
            export_marker_attribute: config.export_marker_attribute.clone(),
        }
    }

    /// CSS selector for a query.
    pub fn selector_for(&self, query: &ElementQuery) -> String {
        match query {
            ElementQuery::Marker(name) => attribute_selector(&self.marker_attribute, name),
            ElementQuery::ExportMarker(data_type) => {
                attribute_selector(&self.export_marker_attribute, data_type)
            }
            ElementQuery::Selector(selector) => selector.clone(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn html_element(&self, query: &ElementQuery) -> Option<web_sys::HtmlElement> {
        let document = web_sys::window()?.document()?;
        let element = document
            .query_selector(&self.selector_for(query))
            .ok()
            .flatten()?;
        element.dyn_into::<web_sys::HtmlElement>().ok()
    }
}

fn attribute_selector(attribute: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{attribute}=\"{escaped}\"]")
}

impl UiSurface for WebUiSurface {
    fn find(&self, query: &ElementQuery) -> Option<SurfaceElement> {
        #[cfg(target_arch = "wasm32")]
        {
            let element = self.html_element(query)?;
            Some(SurfaceElement {
                query: query.clone(),
                visible: !element.hidden(),
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = query;
            None
        }
    }

    fn click(&self, element: &SurfaceElement) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(node) = self.html_element(&element.query) else {
                return false;
            };
            node.click();
            true
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = element;
            false
        }
    }

    fn set_visible(&self, element: &SurfaceElement, visible: bool) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(node) = self.html_element(&element.query) else {
                return false;
            };
            node.set_hidden(!visible);
            true
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (element, visible);
            false
        }
    }

    fn scroll_into_view(&self, element: &SurfaceElement) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(node) = self.html_element(&element.query) else {
                return false;
            };
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            node.scroll_into_view_with_scroll_into_view_options(&options);
            true
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = element;
            false
        }
    }

    fn set_input_value(&self, element: &SurfaceElement, value: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(node) = self.html_element(&element.query) else {
                return false;
            };
            let written = if let Some(input) = node.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_value(value);
                true
            } else if let Some(area) = node.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                area.set_value(value);
                true
            } else if let Some(select) = node.dyn_ref::<web_sys::HtmlSelectElement>() {
                select.set_value(value);
                true
            } else {
                false
            };
            if written {
                // Framework bindings listen for bubbling input/change events, not value writes.
                dispatch_bubbling(&node, "input");
                dispatch_bubbling(&node, "change");
            }
            written
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (element, value);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn dispatch_bubbling(node: &web_sys::HtmlElement, event_type: &str) {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    match web_sys::Event::new_with_event_init_dict(event_type, &init) {
        Ok(event) => {
            let _ = node.dispatch_event(&event);
        }
        Err(err) => leptos::logging::warn!("synthetic `{event_type}` event failed: {err:?}"),
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Settle timer backed by `window.setTimeout`. Resolves immediately off the browser.
pub struct TimerSettle;

impl Settle for TimerSettle {
    fn settle(&self, duration: Duration) -> SettleFuture<'_> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let millis = duration.as_millis().min(i32::MAX as u128) as i32;
                if millis == 0 {
                    return;
                }
                let Some(window) = web_sys::window() else {
                    return;
                };
                let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                    if let Err(err) = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    {
                        leptos::logging::warn!("settle timer failed: {err:?}");
                        let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
                    }
                });
                let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = duration;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn marker_queries_use_configured_attributes() {
        let surface = WebUiSurface::default();
        assert_eq!(
            surface.selector_for(&ElementQuery::Marker("diagnostics.fix".to_string())),
            "[data-ai-target=\"diagnostics.fix\"]"
        );
        assert_eq!(
            surface.selector_for(&ElementQuery::ExportMarker("playbook".to_string())),
            "[data-export=\"playbook\"]"
        );
        assert_eq!(
            surface.selector_for(&ElementQuery::Selector("#save".to_string())),
            "#save"
        );
    }

    #[test]
    fn marker_values_are_escaped() {
        let surface = WebUiSurface::from_config(&ControllerConfig {
            marker_attribute: "data-test".to_string(),
            ..ControllerConfig::default()
        });
        assert_eq!(
            surface.selector_for(&ElementQuery::Marker("say \"hi\"".to_string())),
            "[data-test=\"say \\\"hi\\\"\"]"
        );
    }

    #[test]
    fn native_surface_finds_nothing() {
        let surface = WebUiSurface::default();
        assert!(surface
            .find(&ElementQuery::Marker("anything".to_string()))
            .is_none());
    }
}

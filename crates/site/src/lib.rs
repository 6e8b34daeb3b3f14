//! Browser demo site: a content-operations shell driven by the in-app assistant.

mod screens;
mod web_app;

pub use screens::ScreenPlaceholder;
pub use web_app::{AssistantShell, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}

use crate::api::{ApiHandle, ListenBrainzClient};
use crate::components::views::ListensView;
use crate::components::{ModalOutlet, ModalRegistry, ModalStack, ToastHost, ToastQueue, Toaster};
use crate::config::AppConfig;
use crate::session_store::SessionHandle;
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let config = use_hook(AppConfig::load);
    let toast_queue = use_signal(ToastQueue::default);
    let modal_stack = use_signal(ModalStack::default);

    // Provide state via context
    use_context_provider(|| config.clone());
    use_context_provider({
        let api_url = config.api_url.clone();
        move || ApiHandle::new(ListenBrainzClient::new(api_url))
    });
    use_context_provider(SessionHandle::for_platform);
    use_context_provider(|| Toaster::new(toast_queue, config.toast_timeout_ms));
    use_context_provider(|| ModalRegistry::new(modal_stack, config.modal_fade_ms));

    use_effect({
        let config = config.clone();
        move || {
            tracing::info!(
                api_url = %config.api_url,
                signed_in = config.auth_token().is_some(),
                listens = config.listens.len(),
                "Playlist picker ready"
            );
        }
    });

    rsx! {
        div { class: "app-container min-h-screen bg-zinc-950 text-white",
            ListensView {}
            ModalOutlet {}
            ToastHost {}
        }
    }
}

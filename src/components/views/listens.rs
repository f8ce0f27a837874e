use crate::api::*;
use crate::components::{Icon, ModalHost, ModalKind, ModalRegistry};
use crate::config::AppConfig;
use chrono::DateTime;
use dioxus::prelude::*;

fn listened_label(listened_at: Option<i64>) -> Option<String> {
    let timestamp = DateTime::from_timestamp(listened_at?, 0)?;
    Some(timestamp.format("%b %-d, %Y %H:%M").to_string())
}

#[component]
pub fn ListensView() -> Element {
    let config = use_context::<AppConfig>();
    let user_label = config
        .current_user
        .as_ref()
        .map(|user| format!("Signed in as {}", user.name))
        .unwrap_or_else(|| "Not signed in".to_string());

    rsx! {
        div { class: "max-w-3xl mx-auto px-4 py-8 space-y-6",
            header {
                h1 { class: "text-3xl font-bold text-white mb-2", "Recent listens" }
                p { class: "text-zinc-400", "{user_label}" }
            }

            if config.listens.is_empty() {
                div { class: "flex flex-col items-center justify-center py-20",
                    Icon { name: "music".to_string(), class: "w-16 h-16 text-zinc-600 mb-4".to_string() }
                    h2 { class: "text-xl font-semibold text-white mb-2", "No listens yet" }
                    p { class: "text-zinc-400", "Tracks you play will show up here." }
                }
            } else {
                div { class: "space-y-2",
                    for (index, listen) in config.listens.iter().cloned().enumerate() {
                        ListenRow { key: "{index}", listen }
                    }
                }
            }
        }
    }
}

#[component]
fn ListenRow(listen: Listen) -> Element {
    let modals = use_context::<ModalRegistry>();
    let metadata = &listen.track_metadata;
    let when = listened_label(listen.listened_at);

    let on_add = {
        let listen = listen.clone();
        move |_| {
            modals.show(ModalKind::AddToPlaylist {
                track: TrackDescriptor::from(listen.clone()),
            });
        }
    };

    rsx! {
        div { class: "flex items-center justify-between gap-3 px-4 py-3 rounded-xl bg-zinc-900/50 border border-zinc-800",
            div { class: "min-w-0",
                p { class: "font-medium text-white truncate", "{metadata.track_name}" }
                p { class: "text-sm text-zinc-400 truncate", "{metadata.artist_name}" }
                if let Some(when) = when {
                    p { class: "text-xs text-zinc-500", "{when}" }
                }
            }
            button {
                class: "shrink-0 flex items-center gap-2 px-3 py-2 rounded-lg bg-zinc-800 text-white hover:bg-zinc-700 transition-colors text-sm",
                r#type: "button",
                onclick: on_add,
                Icon { name: "plus-circle".to_string(), class: "w-4 h-4".to_string() }
                "Add to playlist"
            }
        }
    }
}

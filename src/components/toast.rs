//! Toast notifications.
//!
//! Toasts are keyed by id: pushing a toast whose id is already on screen
//! replaces it instead of stacking a duplicate.

use crate::components::Icon;
use crate::utils::delay_ms;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "p-3 rounded-xl bg-emerald-500/10 border border-emerald-500/40 text-emerald-100 shadow-lg",
            Self::Error => "p-3 rounded-xl bg-red-500/10 border border-red-500/40 text-red-100 shadow-lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub link: Option<ToastLink>,
}

impl Toast {
    pub fn success(id: &str, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            kind: ToastKind::Success,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    pub fn error(id: &str, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            kind: ToastKind::Error,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, href: impl Into<String>, label: impl Into<String>) -> Self {
        self.link = Some(ToastLink {
            href: href.into(),
            label: label.into(),
        });
        self
    }
}

/// Anything that can present a toast to the user.
pub trait ToastSink {
    fn push(&self, toast: Toast);
}

#[derive(Debug, Clone, PartialEq)]
struct ToastEntry {
    toast: Toast,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastQueue {
    entries: Vec<ToastEntry>,
    next_generation: u64,
}

impl ToastQueue {
    /// Show a toast, replacing any visible toast with the same id.
    /// Returns the generation to pass to [`ToastQueue::expire`].
    pub fn push(&mut self, toast: Toast) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        if let Some(entry) = self.entries.iter_mut().find(|e| e.toast.id == toast.id) {
            entry.toast = toast;
            entry.generation = generation;
        } else {
            self.entries.push(ToastEntry { toast, generation });
        }
        generation
    }

    pub fn dismiss(&mut self, id: &str) {
        self.entries.retain(|entry| entry.toast.id != id);
    }

    /// Dismiss a toast on timeout, unless it was replaced since.
    pub fn expire(&mut self, id: &str, generation: u64) {
        self.entries
            .retain(|entry| entry.toast.id != id || entry.generation != generation);
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|entry| &entry.toast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Toast service provided through context.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    queue: Signal<ToastQueue>,
    timeout_ms: u64,
}

impl Toaster {
    pub fn new(queue: Signal<ToastQueue>, timeout_ms: u64) -> Self {
        Self { queue, timeout_ms }
    }

    pub fn dismiss(&self, id: &str) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.queue.read().toasts().cloned().collect()
    }
}

impl ToastSink for Toaster {
    fn push(&self, toast: Toast) {
        let mut queue = self.queue;
        let id = toast.id.clone();
        let generation = queue.write().push(toast);
        let timeout_ms = self.timeout_ms;
        // Toasts outlive the component that raised them.
        spawn_forever(async move {
            delay_ms(timeout_ms).await;
            queue.write().expire(&id, generation);
        });
    }
}

#[component]
pub fn ToastHost() -> Element {
    let toaster = use_context::<Toaster>();
    let toasts = toaster.snapshot();

    rsx! {
        div { class: "fixed bottom-4 right-4 z-[120] flex flex-col gap-2 w-80 max-w-[90vw]",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: toast.kind.class(),
                    role: "alert",
                    div { class: "flex items-start justify-between gap-3",
                        div { class: "min-w-0 space-y-1",
                            p { class: "text-sm font-semibold", "{toast.title}" }
                            p { class: "text-sm whitespace-pre-line opacity-90", "{toast.message}" }
                            if let Some(link) = toast.link.clone() {
                                a {
                                    class: "text-xs underline opacity-80 hover:opacity-100",
                                    href: "{link.href}",
                                    "{link.label}"
                                }
                            }
                        }
                        button {
                            class: "p-1 rounded-md opacity-70 hover:opacity-100",
                            aria_label: "Dismiss",
                            onclick: {
                                let id = toast.id.clone();
                                move |_| toaster.dismiss(&id)
                            },
                            Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                        }
                    }
                }
            }
        }
    }
}

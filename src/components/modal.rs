use crate::api::{JspfTrack, TrackDescriptor};
use crate::components::{AddToPlaylistModal, CreatePlaylistModal};
use crate::utils::delay_ms;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModalId(u64);

#[cfg(test)]
impl ModalId {
    pub fn for_tests(raw: u64) -> Self {
        Self(raw)
    }
}

/// Mounted but not shown, shown, or fading out before removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Visible,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalKind {
    AddToPlaylist { track: TrackDescriptor },
    CreateOrEditPlaylist { initial_tracks: Vec<JspfTrack> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalEntry {
    pub id: ModalId,
    pub kind: ModalKind,
    pub state: ModalState,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalStack {
    entries: Vec<ModalEntry>,
    next_id: u64,
}

impl ModalStack {
    pub fn mount(&mut self, kind: ModalKind) -> ModalId {
        let id = ModalId(self.next_id);
        self.next_id += 1;
        self.entries.push(ModalEntry {
            id,
            kind,
            state: ModalState::Hidden,
        });
        id
    }

    /// Hidden → Visible. Returns false for any other transition.
    pub fn show(&mut self, id: ModalId) -> bool {
        self.transition(id, ModalState::Hidden, ModalState::Visible)
    }

    /// Visible → Closed. The caller removes the entry once the fade-out is done.
    pub fn hide(&mut self, id: ModalId) -> bool {
        self.transition(id, ModalState::Visible, ModalState::Closed)
    }

    pub fn remove(&mut self, id: ModalId) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn state(&self, id: ModalId) -> Option<ModalState> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.state)
    }

    pub fn entries(&self) -> &[ModalEntry] {
        &self.entries
    }

    fn transition(&mut self, id: ModalId, from: ModalState, to: ModalState) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) if entry.state == from => {
                entry.state = to;
                true
            }
            _ => false,
        }
    }
}

const SHOW_DELAY_MS: u64 = 16;

/// Launches and dismisses modals by kind.
pub trait ModalHost {
    fn show(&self, kind: ModalKind) -> ModalId;
    /// Hide the modal and remove it once its fade-out has finished.
    fn close(&self, id: ModalId);
}

#[derive(Clone, Copy, PartialEq)]
pub struct ModalRegistry {
    stack: Signal<ModalStack>,
    fade_ms: u64,
}

impl ModalRegistry {
    pub fn new(stack: Signal<ModalStack>, fade_ms: u64) -> Self {
        Self { stack, fade_ms }
    }

    pub fn entries(&self) -> Vec<ModalEntry> {
        self.stack.read().entries().to_vec()
    }
}

impl ModalHost for ModalRegistry {
    fn show(&self, kind: ModalKind) -> ModalId {
        let mut stack = self.stack;
        let id = stack.write().mount(kind);
        // One frame hidden so the fade-in transition has a starting point.
        spawn_forever(async move {
            delay_ms(SHOW_DELAY_MS).await;
            stack.write().show(id);
        });
        id
    }

    fn close(&self, id: ModalId) {
        let mut stack = self.stack;
        if !stack.write().hide(id) {
            return;
        }
        let fade_ms = self.fade_ms;
        spawn_forever(async move {
            delay_ms(fade_ms).await;
            stack.write().remove(id);
        });
    }
}

/// Renders every mounted modal.
#[component]
pub fn ModalOutlet() -> Element {
    let registry = use_context::<ModalRegistry>();

    rsx! {
        for entry in registry.entries() {
            {match entry.kind {
                ModalKind::AddToPlaylist { track } => rsx! {
                    AddToPlaylistModal {
                        key: "{entry.id.0}",
                        modal_id: entry.id,
                        visible: entry.state == ModalState::Visible,
                        track,
                    }
                },
                ModalKind::CreateOrEditPlaylist { initial_tracks } => rsx! {
                    CreatePlaylistModal {
                        key: "{entry.id.0}",
                        modal_id: entry.id,
                        visible: entry.state == ModalState::Visible,
                        initial_tracks,
                    }
                },
            }}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_kind() -> ModalKind {
        ModalKind::CreateOrEditPlaylist {
            initial_tracks: Vec::new(),
        }
    }

    #[test]
    fn lifecycle_runs_hidden_visible_closed() {
        let mut stack = ModalStack::default();
        let id = stack.mount(create_kind());
        assert_eq!(stack.state(id), Some(ModalState::Hidden));

        assert!(stack.show(id));
        assert_eq!(stack.state(id), Some(ModalState::Visible));

        assert!(stack.hide(id));
        assert_eq!(stack.state(id), Some(ModalState::Closed));

        stack.remove(id);
        assert_eq!(stack.state(id), None);
    }

    #[test]
    fn out_of_order_transitions_are_rejected() {
        let mut stack = ModalStack::default();
        let id = stack.mount(create_kind());

        assert!(!stack.hide(id));
        assert!(stack.show(id));
        assert!(!stack.show(id));
        assert!(stack.hide(id));
        assert!(!stack.hide(id));
        assert!(!stack.show(id));
    }

    #[test]
    fn ids_are_unique_and_entries_keep_mount_order() {
        let mut stack = ModalStack::default();
        let first = stack.mount(create_kind());
        let second = stack.mount(create_kind());
        assert_ne!(first, second);

        stack.remove(first);
        let third = stack.mount(create_kind());
        let ids: Vec<_> = stack.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second, third]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut stack = ModalStack::default();
        let id = stack.mount(create_kind());
        stack.remove(id);
        assert!(!stack.show(id));
        stack.remove(id);
        assert!(stack.entries().is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod scheduling {
        use super::*;
        use crate::test_support::run_dom_for;

        fn empty() -> Element {
            rsx! {}
        }

        fn mounted_dom() -> VirtualDom {
            let mut dom = VirtualDom::new(empty);
            dom.rebuild_in_place();
            dom
        }

        fn state_in(dom: &VirtualDom, registry: ModalRegistry, id: ModalId) -> Option<ModalState> {
            dom.in_scope(ScopeId::ROOT, || {
                registry
                    .entries()
                    .into_iter()
                    .find(|entry| entry.id == id)
                    .map(|entry| entry.state)
            })
        }

        fn registry_in(dom: &VirtualDom, fade_ms: u64) -> ModalRegistry {
            dom.in_scope(ScopeId::ROOT, || {
                ModalRegistry::new(Signal::new(ModalStack::default()), fade_ms)
            })
        }

        #[tokio::test]
        async fn show_renders_hidden_before_turning_visible() {
            let mut dom = mounted_dom();
            let registry = registry_in(&dom, 20);

            let id = dom.in_scope(ScopeId::ROOT, || registry.show(create_kind()));
            assert_eq!(state_in(&dom, registry, id), Some(ModalState::Hidden));

            run_dom_for(&mut dom, 100).await;
            assert_eq!(state_in(&dom, registry, id), Some(ModalState::Visible));
        }

        #[tokio::test]
        async fn close_keeps_entry_until_fade_out_finishes() {
            let mut dom = mounted_dom();
            let registry = registry_in(&dom, 20);
            let id = dom.in_scope(ScopeId::ROOT, || registry.show(create_kind()));
            run_dom_for(&mut dom, 100).await;

            dom.in_scope(ScopeId::ROOT, || registry.close(id));
            assert_eq!(state_in(&dom, registry, id), Some(ModalState::Closed));

            run_dom_for(&mut dom, 150).await;
            assert_eq!(state_in(&dom, registry, id), None);
        }

        #[tokio::test]
        async fn closing_a_modal_that_is_not_visible_is_ignored() {
            let mut dom = mounted_dom();
            let registry = registry_in(&dom, 20);
            let id = dom.in_scope(ScopeId::ROOT, || registry.show(create_kind()));

            dom.in_scope(ScopeId::ROOT, || {
                registry.close(id);
                registry.close(ModalId::for_tests(99));
            });
            assert_eq!(state_in(&dom, registry, id), Some(ModalState::Hidden));

            run_dom_for(&mut dom, 150).await;
            assert_eq!(state_in(&dom, registry, id), Some(ModalState::Visible));
            assert_eq!(dom.in_scope(ScopeId::ROOT, || registry.entries().len()), 1);
        }
    }
}

//! Action enum — all user-initiated intents and internal events.
//!
//! Card activation is not an Action: cards emit a `SelectionSignal` that only
//! the browse controller listens to (see `signal.rs`).

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Controls,
    CardGrid,
    DetailOverlay,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── View state ───────────────────────────────────────────────────────────
    CycleGenre,
    CycleGenreReverse,
    CycleSort,
    CycleSortReverse,
    OpenSearch,
    CloseSearch,
    SearchChanged(String),
    ClearFilters,

    // ── Detail overlay ───────────────────────────────────────────────────────
    CloseDetail,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}

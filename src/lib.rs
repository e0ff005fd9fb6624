//! # Vitrine
//!
//! The behavior layer of a static marketing page, without the browser.
//! Every interactive component (slide carousels, the mobile nav toggle,
//! scroll-spy links, modal dialogs, the contact form, copy-to-clipboard
//! buttons) is a plain state machine driven by host events and an explicit
//! clock. The host binds DOM events to [`page::PageEvent`]s, calls
//! [`page::Page::advance`] when timers may be due, and writes the observable
//! attributes from [`page::PageState`] back to the document.
//!
//! # Architecture
//!
//! ```text
//! page.toml ──► PageDocument ──► Page ──► PageState ──► render (HTML)
//!                                 ▲
//!        host events / script ────┘
//! ```
//!
//! - **Discovery**: [`document`] describes what markup exists; [`page::Page::new`]
//!   builds one independent component per container.
//! - **Transitions**: events and timer ticks mutate component state; each call
//!   runs to completion.
//! - **Projection**: attribute values (`aria-hidden`, `tabindex`,
//!   `aria-current`, `disabled`, the track transform) are derived from state
//!   on demand and never stored separately.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Slide carousel: index, clamped navigation, autoplay, swipe gestures |
//! | [`timer`] | Deadline-based interval and one-shot timers over an explicit clock |
//! | [`document`] | Page description loading (TOML/JSON) and validation |
//! | [`page`] | Component discovery and event routing |
//! | [`nav`] | Mobile navigation toggle |
//! | [`scroll_spy`] | Active-section tracking for in-page links |
//! | [`modal`] | Modal dialogs with focus trap |
//! | [`contact`] | Contact form submission over a pluggable transport |
//! | [`clipboard`] | Copy-to-clipboard buttons |
//! | [`script`] | Timed event scripts and deterministic replay |
//! | [`render`] | HTML snapshot of a page state using Maud |
//! | [`config`] | `vitrine.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Clock
//!
//! Timers are deadlines, not callbacks. A component stores when its timer is
//! next due and the host reports the current time. Cancelling a timer is
//! dropping it, so a torn-down carousel cannot fire again, and a replay is
//! bit-for-bit reproducible.
//!
//! ## Clamp, Never Wrap
//!
//! Carousels stop at both ends. Autoplay walks to the last slide and halts;
//! only user navigation restarts it.

pub mod carousel;
pub mod clipboard;
pub mod config;
pub mod contact;
pub mod document;
pub mod modal;
pub mod nav;
pub mod output;
pub mod page;
pub mod render;
pub mod script;
pub mod scroll_spy;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_helpers;

//! Page wiring: discover every component in a [`PageDocument`] and route
//! host events to them.
//!
//! [`Page::new`] is the only factory. Each carousel container becomes its
//! own [`Carousel`] holding all of its mutable state; the peripheral
//! components (nav, scroll spy, modals, contact form, copy buttons) are
//! independent siblings. Nothing is global: two pages built from the same
//! document share nothing.
//!
//! Time only moves through [`Page::advance`] (timers) and the `now` passed
//! with each event, so a page can be driven by a real host loop or replayed
//! deterministically from a script.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::carousel::{Carousel, CarouselEvent, CarouselView, Outcome};
use crate::clipboard::{Clipboard, CopyButtonState, CopyButtons, MemoryClipboard};
use crate::config::BehaviorConfig;
use crate::contact::{
    ContactForm, Delivery, FormState, ScriptedTransport, SubmitError, SubmitOutcome, Transport,
};
use crate::document::PageDocument;
use crate::modal::{ModalDialogs, ModalState};
use crate::nav::{NavState, NavToggle};
use crate::scroll_spy::{LinkState, ScrollSpy};
use crate::timer::Millis;

/// Host events, already resolved to their target component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// An event inside carousel `id`.
    Carousel { id: String, event: CarouselEvent },
    /// The carousel container was removed from the page.
    CarouselRemoved { id: String },
    /// `document.visibilitychange`, delivered to every carousel.
    VisibilityChanged { hidden: bool },
    NavToggle,
    NavLinkClicked { index: usize },
    KeyDown {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    Scroll { y: f64 },
    Intersection { section: String },
    ModalOpen {
        id: String,
        #[serde(default)]
        focused: Option<String>,
    },
    ModalClose,
    ModalPrint,
    FieldInput { name: String, value: String },
    FormSubmit,
    CopyClicked { id: String },
}

/// What handling an event (or a timer) did.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Carousel { id: String, outcome: Outcome },
    CarouselRemoved { id: String },
    AutoplayAdvanced { id: String, slides: usize },
    Nav(NavState),
    ActiveSection(Option<String>),
    Modal(ModalState),
    Submit(SubmitOutcome),
    Delivered(Result<Delivery, SubmitError>),
    Copied(Option<String>),
    /// The event named a component that does not exist on this page.
    NoTarget,
    /// Handled with no visible change worth reporting.
    Nothing,
}

/// Snapshot of every observable output on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState {
    pub carousels: Vec<CarouselSnapshot>,
    pub nav: Option<NavState>,
    pub links: Vec<LinkState>,
    pub active_section: Option<String>,
    pub modal: ModalState,
    pub form: Option<FormState>,
    pub copy_buttons: Vec<CopyButtonState>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub id: String,
    pub view: CarouselView,
    pub autoplay_active: bool,
    pub autoplay_halted: bool,
    pub next_autoplay_due: Option<Millis>,
}

impl CarouselSnapshot {
    fn of(carousel: &Carousel) -> Self {
        Self {
            id: carousel.id().to_string(),
            view: carousel.view(),
            autoplay_active: carousel.autoplay_active(),
            autoplay_halted: carousel.autoplay_halted(),
            next_autoplay_due: carousel.next_autoplay_due(),
        }
    }
}

pub struct Page {
    carousels: Vec<Carousel>,
    nav: Option<NavToggle>,
    scroll_spy: ScrollSpy,
    modals: ModalDialogs,
    form: Option<ContactForm>,
    copy_buttons: CopyButtons,
    transport: Box<dyn Transport>,
    clipboard: Box<dyn Clipboard>,
}

impl Page {
    /// Wire every component found in `doc` at time `now`.
    pub fn new(doc: &PageDocument, config: &BehaviorConfig, now: Millis) -> Self {
        let carousels: Vec<Carousel> = doc
            .carousels
            .iter()
            .map(|markup| Carousel::from_markup(markup, &doc.platform, now))
            .collect();
        let links = doc.nav.as_ref().map(|n| n.links.as_slice()).unwrap_or_default();
        debug!(
            carousels = carousels.len(),
            sections = doc.sections.len(),
            modals = doc.modals.len(),
            "page wired"
        );
        Self {
            carousels,
            nav: doc.nav.as_ref().map(NavToggle::from_markup),
            scroll_spy: ScrollSpy::new(
                links,
                &doc.sections,
                config.scroll_spy.clone(),
                doc.platform.viewport_height,
                doc.page_height(),
            ),
            modals: ModalDialogs::new(&doc.modals),
            form: doc
                .form
                .as_ref()
                .map(|f| ContactForm::new(f, config.contact.clone())),
            copy_buttons: CopyButtons::new(&doc.copy_buttons, config.clipboard.feedback()),
            transport: Box::new(ScriptedTransport::default()),
            clipboard: Box::new(MemoryClipboard::new()),
        }
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    pub fn carousel(&self, id: &str) -> Option<&Carousel> {
        self.carousels.iter().find(|c| c.id() == id)
    }

    fn carousel_mut(&mut self, id: &str) -> Option<&mut Carousel> {
        self.carousels.iter_mut().find(|c| c.id() == id)
    }

    /// Drop carousel `id`, cancelling its timer with it.
    pub fn remove_carousel(&mut self, id: &str) -> bool {
        let before = self.carousels.len();
        self.carousels.retain(|c| c.id() != id);
        before != self.carousels.len()
    }

    pub fn dispatch(&mut self, event: PageEvent, now: Millis) -> Effect {
        match event {
            PageEvent::Carousel { id, event } => match self.carousel_mut(&id) {
                Some(carousel) => Effect::Carousel {
                    outcome: carousel.handle(event, now),
                    id,
                },
                None => Effect::NoTarget,
            },
            PageEvent::CarouselRemoved { id } => {
                if self.remove_carousel(&id) {
                    Effect::CarouselRemoved { id }
                } else {
                    Effect::NoTarget
                }
            }
            PageEvent::VisibilityChanged { hidden } => {
                for carousel in &mut self.carousels {
                    carousel.handle(CarouselEvent::VisibilityChanged { hidden }, now);
                }
                Effect::Nothing
            }
            PageEvent::NavToggle => self.with_nav(NavToggle::toggle),
            PageEvent::NavLinkClicked { index } => self.with_nav(|nav| nav.link_clicked(index)),
            PageEvent::KeyDown { key, shift } => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.key_down(&key);
                }
                if self.modals.key_down(&key, shift) {
                    Effect::Modal(self.modals.state())
                } else {
                    Effect::Nothing
                }
            }
            PageEvent::Scroll { y } => {
                self.scroll_spy.on_scroll(y);
                Effect::ActiveSection(self.scroll_spy.active().map(str::to_string))
            }
            PageEvent::Intersection { section } => {
                self.scroll_spy.report_intersection(&section);
                Effect::ActiveSection(self.scroll_spy.active().map(str::to_string))
            }
            PageEvent::ModalOpen { id, focused } => {
                if self.modals.open(&id, focused.as_deref()) {
                    Effect::Modal(self.modals.state())
                } else {
                    Effect::NoTarget
                }
            }
            PageEvent::ModalClose => {
                self.modals.close();
                Effect::Modal(self.modals.state())
            }
            PageEvent::ModalPrint => {
                self.modals.print();
                Effect::Modal(self.modals.state())
            }
            PageEvent::FieldInput { name, value } => match self.form.as_mut() {
                Some(form) => {
                    form.set_value(&name, &value);
                    Effect::Nothing
                }
                None => Effect::NoTarget,
            },
            PageEvent::FormSubmit => match self.form.as_mut() {
                Some(form) => Effect::Submit(form.submit(now)),
                None => Effect::NoTarget,
            },
            PageEvent::CopyClicked { id } => {
                Effect::Copied(self.copy_buttons.click(&id, now, self.clipboard.as_mut()))
            }
        }
    }

    fn with_nav(&mut self, f: impl FnOnce(&mut NavToggle)) -> Effect {
        match self.nav.as_mut() {
            Some(nav) => {
                f(nav);
                Effect::Nav(nav.state())
            }
            None => Effect::NoTarget,
        }
    }

    /// Run every timer that came due up to `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<Effect> {
        let mut effects = Vec::new();
        for carousel in &mut self.carousels {
            let slides = carousel.tick(now);
            if slides > 0 {
                effects.push(Effect::AutoplayAdvanced {
                    id: carousel.id().to_string(),
                    slides,
                });
            }
        }
        if let Some(form) = self.form.as_mut() {
            if let Some(result) = form.poll(now, self.transport.as_mut()) {
                effects.push(Effect::Delivered(result));
            }
        }
        self.copy_buttons.tick(now);
        effects
    }

    pub fn state(&self) -> PageState {
        PageState {
            carousels: self.carousels.iter().map(CarouselSnapshot::of).collect(),
            nav: self.nav.as_ref().map(NavToggle::state),
            links: self.scroll_spy.links(),
            active_section: self.scroll_spy.active().map(str::to_string),
            modal: self.modals.state(),
            form: self.form.as_ref().map(ContactForm::state),
            copy_buttons: self.copy_buttons.state(),
        }
    }
}

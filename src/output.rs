//! CLI output formatting.
//!
//! Every command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Carousels
//! 001 work (3 slides)
//!     Autoplay: every 5000ms
//!     Controls: prev, next, dots
//!
//! Navigation
//!     3 links
//!
//! Sections
//! 001 intro
//! ```
//!
//! ## Simulate
//!
//! ```text
//!    1000ms  [timer]  work advanced 1 slide
//!    1500ms  work pointer_enter  ignored
//!
//! Final state
//! 001 work  slide 2/3
//!     Autoplay: paused
//! ```

use crate::carousel::{CarouselEvent, CarouselSettings, Outcome};
use crate::contact::SubmitOutcome;
use crate::document::PageDocument;
use crate::page::{CarouselSnapshot, Effect, PageEvent, PageState};
use crate::script::Frame;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Pluralize a count: `1 slide`, `3 slides`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the component inventory of a page.
pub fn format_inventory(doc: &PageDocument) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Carousels".to_string());
    if doc.carousels.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, carousel) in doc.carousels.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            carousel.id,
            count(carousel.slides.len(), "slide")
        ));
        let settings = CarouselSettings::from_attributes(
            carousel.autoplay.as_deref(),
            carousel.interval.as_deref(),
            doc.platform.prefers_reduced_motion,
        );
        let autoplay = if !settings.autoplay {
            "off".to_string()
        } else if settings.reduced_motion {
            "off (reduced motion)".to_string()
        } else {
            format!("every {}ms", settings.interval.as_millis())
        };
        lines.push(format!("{}Autoplay: {}", indent(1), autoplay));

        let controls: Vec<&str> = [
            (carousel.prev, "prev"),
            (carousel.next, "next"),
            (carousel.dots, "dots"),
        ]
        .into_iter()
        .filter_map(|(present, name)| present.then_some(name))
        .collect();
        let controls = if controls.is_empty() {
            "none".to_string()
        } else {
            controls.join(", ")
        };
        lines.push(format!("{}Controls: {}", indent(1), controls));
        if !carousel.track {
            lines.push(format!("{}No track: carousel is inert", indent(1)));
        }
        for (j, slide) in carousel.slides.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(j + 1),
                truncate(&slide.title, 60)
            ));
        }
    }

    if let Some(nav) = &doc.nav {
        lines.push(String::new());
        lines.push("Navigation".to_string());
        lines.push(format!("{}{}", indent(1), count(nav.links.len(), "link")));
        if !(nav.toggle && nav.panel) {
            lines.push(format!("{}Toggle not wired", indent(1)));
        }
    }

    if !doc.sections.is_empty() {
        lines.push(String::new());
        lines.push("Sections".to_string());
        for (i, section) in doc.sections.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), section.id));
        }
    }

    if !doc.modals.is_empty() {
        lines.push(String::new());
        lines.push("Modals".to_string());
        for (i, modal) in doc.modals.iter().enumerate() {
            let printable = if modal.printable { ", printable" } else { "" };
            lines.push(format!(
                "{} {} ({} focusable{})",
                format_index(i + 1),
                modal.id,
                modal.focusables.len(),
                printable
            ));
        }
    }

    if let Some(form) = &doc.form {
        let required = form.fields.iter().filter(|f| f.required).count();
        lines.push(String::new());
        lines.push("Contact form".to_string());
        lines.push(format!(
            "{}{} ({} required)",
            indent(1),
            count(form.fields.len(), "field"),
            required
        ));
    }

    if !doc.copy_buttons.is_empty() {
        lines.push(String::new());
        lines.push("Copy buttons".to_string());
        for (i, button) in doc.copy_buttons.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), button.id));
        }
    }

    lines
}

/// Print the component inventory to stdout.
pub fn print_inventory(doc: &PageDocument) {
    for line in format_inventory(doc) {
        println!("{}", line);
    }
}

// ============================================================================
// Simulate
// ============================================================================

fn carousel_event_name(event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::PrevClicked => "prev_clicked".to_string(),
        CarouselEvent::NextClicked => "next_clicked".to_string(),
        CarouselEvent::DotClicked { index } => format!("dot_clicked {index}"),
        CarouselEvent::PointerEnter => "pointer_enter".to_string(),
        CarouselEvent::PointerLeave => "pointer_leave".to_string(),
        CarouselEvent::PointerDown { x, .. } => format!("pointer_down x={x}"),
        CarouselEvent::PointerUp { x } => format!("pointer_up x={x}"),
        CarouselEvent::PointerCancel => "pointer_cancel".to_string(),
        CarouselEvent::VisibilityChanged { hidden } => format!("visibility hidden={hidden}"),
    }
}

/// Short label for a page event.
pub fn describe_event(event: &PageEvent) -> String {
    match event {
        PageEvent::Carousel { id, event } => format!("{id} {}", carousel_event_name(event)),
        PageEvent::CarouselRemoved { id } => format!("{id} removed"),
        PageEvent::VisibilityChanged { hidden } => format!("page hidden={hidden}"),
        PageEvent::NavToggle => "nav toggle".to_string(),
        PageEvent::NavLinkClicked { index } => format!("nav link {index}"),
        PageEvent::KeyDown { key, shift } => {
            if *shift {
                format!("key Shift+{key}")
            } else {
                format!("key {key}")
            }
        }
        PageEvent::Scroll { y } => format!("scroll y={y}"),
        PageEvent::Intersection { section } => format!("intersection {section}"),
        PageEvent::ModalOpen { id, .. } => format!("modal open {id}"),
        PageEvent::ModalClose => "modal close".to_string(),
        PageEvent::ModalPrint => "modal print".to_string(),
        PageEvent::FieldInput { name, .. } => format!("input {name}"),
        PageEvent::FormSubmit => "form submit".to_string(),
        PageEvent::CopyClicked { id } => format!("copy {id}"),
    }
}

/// Short description of what an event or timer did.
pub fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::Carousel { outcome, .. } => match outcome {
            Outcome::Moved { from, to } => format!("slide {} → {}", from + 1, to + 1),
            Outcome::Unchanged => "unchanged".to_string(),
            Outcome::EdgeHit => "edge".to_string(),
            Outcome::Ignored => "ignored".to_string(),
        },
        Effect::CarouselRemoved { id } => format!("{id} torn down"),
        Effect::AutoplayAdvanced { id, slides } => {
            format!("{id} advanced {}", count(*slides, "slide"))
        }
        Effect::Nav(state) => {
            if state.aria_expanded {
                "nav open".to_string()
            } else {
                "nav closed".to_string()
            }
        }
        Effect::ActiveSection(Some(id)) => format!("active {id}"),
        Effect::ActiveSection(None) => "no active section".to_string(),
        Effect::Modal(state) => match (&state.open, &state.focused) {
            (Some(id), Some(focused)) => format!("modal {id} focus {focused}"),
            (Some(id), None) => format!("modal {id}"),
            (None, _) => "no modal".to_string(),
        },
        Effect::Submit(outcome) => match outcome {
            SubmitOutcome::Native => "native submission".to_string(),
            SubmitOutcome::Honeypot => "honeypot".to_string(),
            SubmitOutcome::Invalid { field } => format!("invalid {field}"),
            SubmitOutcome::Scheduled { due } => format!("sending at {due}ms"),
            SubmitOutcome::Busy => "busy".to_string(),
        },
        Effect::Delivered(Ok(delivery)) => format!("delivered ({delivery:?})"),
        Effect::Delivered(Err(err)) => format!("failed: {err}"),
        Effect::Copied(Some(text)) => format!("copied \"{}\"", truncate(text, 40)),
        Effect::Copied(None) => "nothing to copy".to_string(),
        Effect::NoTarget => "no target".to_string(),
        Effect::Nothing => "ok".to_string(),
    }
}

/// Format one replay frame.
pub fn format_frame(frame: &Frame) -> String {
    let source = match &frame.event {
        Some(event) => describe_event(event),
        None => "[timer]".to_string(),
    };
    format!("{:>7}ms  {}  {}", frame.at, source, describe_effect(&frame.effect))
}

fn autoplay_status(snapshot: &CarouselSnapshot) -> String {
    match (snapshot.autoplay_active, snapshot.autoplay_halted, snapshot.next_autoplay_due) {
        (true, _, Some(due)) => format!("running, next at {due}ms"),
        (_, true, _) => "stopped at last slide".to_string(),
        _ => "idle".to_string(),
    }
}

/// Format the final page state.
pub fn format_state(state: &PageState) -> Vec<String> {
    let mut lines = vec!["Final state".to_string()];
    for (i, carousel) in state.carousels.iter().enumerate() {
        let view = &carousel.view;
        let position = if view.slide_count == 0 {
            "empty".to_string()
        } else {
            format!("slide {}/{}", view.index + 1, view.slide_count)
        };
        lines.push(format!("{} {}  {}", format_index(i + 1), carousel.id, position));
        lines.push(format!("{}Autoplay: {}", indent(1), autoplay_status(carousel)));
    }
    if let Some(nav) = &state.nav {
        let label = if nav.aria_expanded { "open" } else { "closed" };
        lines.push(format!("Navigation: {label}"));
    }
    if let Some(section) = &state.active_section {
        lines.push(format!("Active section: {section}"));
    }
    if let Some(open) = &state.modal.open {
        lines.push(format!("Modal: {open}"));
    }
    if let Some(status) = state.form.as_ref().and_then(|f| f.status.as_ref()) {
        lines.push(format!("Form status: {status}"));
    }
    lines
}

/// Print replay frames followed by the final state.
pub fn print_simulation(frames: &[Frame], state: &PageState) {
    for frame in frames {
        println!("{}", format_frame(frame));
    }
    println!();
    for line in format_state(state) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BehaviorConfig;
    use crate::page::Page;
    use crate::test_helpers::sample_page;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(1, "slide"), "1 slide");
        assert_eq!(count(0, "slide"), "0 slides");
        assert_eq!(count(3, "link"), "3 links");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("réalisation", 4), "réal...");
        assert_eq!(truncate("short", 40), "short");
    }

    #[test]
    fn inventory_lists_components() {
        let lines = format_inventory(&sample_page());
        assert_eq!(lines[0], "Carousels");
        assert_eq!(lines[1], "001 work (3 slides)");
        assert_eq!(lines[2], "    Autoplay: every 1000ms");
        assert_eq!(lines[3], "    Controls: prev, next, dots");
        assert!(lines.contains(&"    3 links".to_string()));
        assert!(lines.contains(&"001 quote (3 focusable, printable)".to_string()));
        assert!(lines.contains(&"    3 fields (2 required)".to_string()));
        assert!(lines.contains(&"001 copy-phone".to_string()));
    }

    #[test]
    fn inventory_reports_reduced_motion() {
        let mut doc = sample_page();
        doc.platform.prefers_reduced_motion = true;
        let lines = format_inventory(&doc);
        assert_eq!(lines[2], "    Autoplay: off (reduced motion)");
    }

    #[test]
    fn frame_lines() {
        let timer = Frame {
            at: 1000,
            event: None,
            effect: Effect::AutoplayAdvanced {
                id: "work".into(),
                slides: 1,
            },
        };
        assert_eq!(format_frame(&timer), "   1000ms  [timer]  work advanced 1 slide");

        let click = Frame {
            at: 20,
            event: Some(PageEvent::Carousel {
                id: "work".into(),
                event: CarouselEvent::NextClicked,
            }),
            effect: Effect::Carousel {
                id: "work".into(),
                outcome: Outcome::Moved { from: 0, to: 1 },
            },
        };
        assert_eq!(format_frame(&click), "     20ms  work next_clicked  slide 1 → 2");
    }

    #[test]
    fn state_lines() {
        let page = Page::new(&sample_page(), &BehaviorConfig::default(), 0);
        let lines = format_state(&page.state());
        assert_eq!(lines[0], "Final state");
        assert_eq!(lines[1], "001 work  slide 1/3");
        assert_eq!(lines[2], "    Autoplay: running, next at 1000ms");
        assert_eq!(lines[3], "Navigation: closed");
    }
}

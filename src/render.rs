//! HTML snapshot of a page's observable state.
//!
//! Renders the page markup with every behavior-controlled attribute filled
//! in from a [`PageState`]: carousel track transform, slide `aria-hidden` /
//! `tabindex`, dot `aria-current`, prev/next `disabled` + `aria-disabled` +
//! `is-hidden`, nav `aria-expanded`, active links, the open modal, form
//! status and copy feedback. Useful as a no-JavaScript first paint and as a
//! readable diff target in tests.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! slide bodies are markdown rendered with `pulldown-cmark`.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

use crate::carousel::view::{self, CarouselView};
use crate::document::{CarouselMarkup, PageDocument};
use crate::page::{CarouselSnapshot, PageState};

/// Render the whole page.
pub fn render_page(doc: &PageDocument, state: &PageState) -> Markup {
    let nav_open = state.nav.is_some_and(|n| n.body_nav_open);
    let title = if doc.title.is_empty() { "Page" } else { doc.title.as_str() };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body class=[nav_open.then_some("is-nav-open")] {
                (render_topbar(doc, state))
                (render_nav(doc, state))
                main {
                    @for snapshot in &state.carousels {
                        @if let Some(markup) = doc.carousels.iter().find(|c| c.id == snapshot.id) {
                            (render_carousel(markup, snapshot))
                        }
                    }
                    @for section in &doc.sections {
                        section id=(section.id) {}
                    }
                    (render_form(doc, state))
                }
                (render_modals(doc, state))
            }
        }
    }
}

fn render_topbar(doc: &PageDocument, state: &PageState) -> Markup {
    html! {
        @if !doc.copy_buttons.is_empty() {
            div.topbar {
                @for (button, button_state) in doc.copy_buttons.iter().zip(&state.copy_buttons) {
                    button.topbar__copy.is-copied[button_state.copied] type="button"
                        id=(button.id) data-copy=(button.copy) {
                        (button.label)
                    }
                }
            }
        }
    }
}

fn render_nav(doc: &PageDocument, state: &PageState) -> Markup {
    let Some(nav) = &doc.nav else {
        return html! {};
    };
    let open = state.nav.is_some_and(|n| n.panel_open);
    html! {
        nav.nav {
            @if nav.toggle {
                button.nav__toggle type="button" aria-expanded=(open) { "Menu" }
            }
            @if nav.panel {
                div.nav__links.is-open[open] {
                    @for (link, link_state) in nav.links.iter().zip(&state.links) {
                        a.is-active[link_state.active] href=(link.href) { (link.label) }
                    }
                }
            }
        }
    }
}

/// Render one carousel container from its markup and current state.
pub fn render_carousel(markup: &CarouselMarkup, snapshot: &CarouselSnapshot) -> Markup {
    let view = &snapshot.view;
    html! {
        div.carousel id=(markup.id) data-carousel
            aria-roledescription="carousel"
            aria-label=[markup.label.as_deref()]
            data-autoplay=[markup.autoplay.as_deref()]
            data-interval=[markup.interval.as_deref()] {
            @if markup.track {
                div.carousel__track data-carousel-track
                    style=[view.track_transform.as_ref().map(|t| format!("transform: {t}"))] {
                    (render_slides(markup, view))
                }
            } @else {
                (render_slides(markup, view))
            }
            @if let Some(prev) = view.prev {
                button.carousel__control.carousel__control--prev.is-hidden[prev.hidden()]
                    type="button" data-carousel-prev
                    disabled[prev.disabled()]
                    aria-disabled=(prev.aria_disabled())
                    aria-label="Previous slide" { "‹" }
            }
            @if let Some(next) = view.next {
                button.carousel__control.carousel__control--next.is-hidden[next.hidden()]
                    type="button" data-carousel-next
                    disabled[next.disabled()]
                    aria-disabled=(next.aria_disabled())
                    aria-label="Next slide" { "›" }
            }
            @if markup.dots {
                div.carousel__dots data-carousel-dots {
                    @for (index, dot) in view.dots.iter().enumerate() {
                        button type="button" class=(dot.class())
                            aria-label=(view::dot_label(index))
                            aria-current=(dot.aria_current()) {}
                    }
                }
            }
        }
    }
}

fn render_slides(markup: &CarouselMarkup, view: &CarouselView) -> Markup {
    html! {
        @for (slide, state) in markup.slides.iter().zip(&view.slides) {
            article.carousel__slide data-carousel-slide
                aria-hidden=(state.aria_hidden())
                tabindex=(state.tab_index()) {
                h3 { (slide.title) }
                @if !slide.body.is_empty() {
                    (markdown(&slide.body))
                }
            }
        }
    }
}

fn render_form(doc: &PageDocument, state: &PageState) -> Markup {
    let (Some(form), Some(form_state)) = (&doc.form, &state.form) else {
        return html! {};
    };
    html! {
        form.form method="POST" {
            @for (field, (_, value)) in form.fields.iter().zip(&form_state.fields) {
                label {
                    (field.label)
                    input name=(field.name) value=(value) required[field.required];
                }
            }
            div.form__actions {
                @if form.submit_button {
                    button type="submit" disabled[form_state.submit_disabled] { "Send" }
                }
                p id="form-status" aria-live="polite" {
                    @if let Some(status) = &form_state.status {
                        (status)
                    }
                }
            }
        }
    }
}

fn render_modals(doc: &PageDocument, state: &PageState) -> Markup {
    html! {
        @for modal in &doc.modals {
            @let open = state.modal.open.as_deref() == Some(modal.id.as_str());
            div.modal.is-open[open] id=(modal.id) role="dialog" aria-modal="true"
                aria-hidden=(if open { "false" } else { "true" })
                hidden[!open] {
                h2 { (modal.title) }
                @for focusable in &modal.focusables {
                    @let focused = state.modal.focused.as_deref() == Some(focusable.as_str());
                    button.has-focus[focused] type="button" id=(focusable) {}
                }
            }
        }
    }
}

fn markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

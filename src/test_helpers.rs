//! Shared test utilities: carousel builders and a small sample page.

use std::time::Duration;

use crate::carousel::{Carousel, CarouselSettings, Structure};
use crate::document::PageDocument;

/// Structure with every optional element present.
pub fn full_structure(slide_count: usize) -> Structure {
    Structure {
        track: true,
        slide_count,
        prev: true,
        next: true,
        dots: true,
    }
}

pub fn autoplay_settings(interval_ms: u64) -> CarouselSettings {
    CarouselSettings {
        autoplay: true,
        interval: Duration::from_millis(interval_ms),
        reduced_motion: false,
    }
}

/// A carousel without autoplay, created at t=0.
pub fn manual(slide_count: usize) -> Carousel {
    Carousel::new("test", full_structure(slide_count), CarouselSettings::default(), 0)
}

/// An autoplaying carousel created at t=0.
pub fn autoplaying(slide_count: usize, interval_ms: u64) -> Carousel {
    Carousel::new(
        "test",
        full_structure(slide_count),
        autoplay_settings(interval_ms),
        0,
    )
}

/// Sample page covering every component.
pub const SAMPLE_PAGE: &str = r##"
title = "Atelier"

[platform]
viewport_height = 800

[[carousels]]
id = "work"
label = "Recent work"
autoplay = "true"
interval = "1000"
slides = [
    { title = "Kitchen", body = "A *full* renovation." },
    { title = "Bathroom" },
    { title = "Terrace" },
]

[nav]
links = [
    { label = "Intro", href = "#intro" },
    { label = "Work", href = "#work" },
    { label = "Contact", href = "#contact" },
]

[[sections]]
id = "intro"
top = 0
height = 900

[[sections]]
id = "work"
top = 900
height = 1000

[[sections]]
id = "contact"
top = 1900
height = 600

[[modals]]
id = "quote"
title = "Quote"
focusables = ["quote-name", "quote-print", "quote-close"]
printable = true

[form]
fields = [
    { name = "name", label = "Name", required = true },
    { name = "email", label = "Email", required = true },
    { name = "_gotcha" },
]

[[copy_buttons]]
id = "copy-phone"
label = "Phone"
copy = "  06 12\n 34 56 78 "
"##;

pub fn sample_page() -> PageDocument {
    let doc: PageDocument = toml::from_str(SAMPLE_PAGE).unwrap();
    doc.validate().unwrap();
    doc
}

/// Bootstrap tooltip and popover activation
use crate::config::Selectors;
use crate::ui::dom;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

// Bootstrap's bundle exposes its widgets on the `bootstrap` global
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, js_class = "Tooltip", catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;

    #[wasm_bindgen(js_namespace = bootstrap)]
    type Popover;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, js_class = "Popover", catch)]
    fn new(element: &Element) -> Result<Popover, JsValue>;
}

/// Activate every tooltip and popover trigger; returns how many were activated
pub fn initialize(document: &Document, selectors: &Selectors) -> usize {
    let tooltips = activate(document, &selectors.tooltips, "tooltip", |el| {
        Tooltip::new(el).map(|_| ())
    });
    let popovers = activate(document, &selectors.popovers, "popover", |el| {
        Popover::new(el).map(|_| ())
    });

    debug!("activated {} tooltips and {} popovers", tooltips, popovers);
    tooltips + popovers
}

fn activate(
    document: &Document,
    selector: &str,
    kind: &str,
    create: impl Fn(&Element) -> Result<(), JsValue>,
) -> usize {
    let mut activated = 0;
    for element in dom::query_all::<Element>(document, selector) {
        match create(&element) {
            Ok(()) => activated += 1,
            Err(e) => {
                // Usually the bootstrap bundle is not loaded; the rest would fail too
                warn!("could not create {}: {:?}", kind, e);
                break;
            }
        }
    }
    activated
}

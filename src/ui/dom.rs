/// Small web-sys helpers shared by the UI modules
use crate::error::{Result, UiError};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| UiError::MissingElement("window".to_string()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| UiError::MissingElement("document".to_string()))
}

pub fn query<T: JsCast>(root: &Document, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_in<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_all<T: JsCast>(root: &Document, selector: &str) -> Vec<T> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Replace class markers: remove `remove`, then add `add`
pub fn swap_classes(el: &Element, remove: &[&str], add: Option<&str>) -> Result<()> {
    let classes = el.class_list();
    for class in remove {
        classes.remove_1(class)?;
    }
    if let Some(class) = add {
        classes.add_1(class)?;
    }
    Ok(())
}

/// Set the disabled flag on buttons, or the equivalent attributes on links
/// styled as buttons
pub fn set_disabled(el: &HtmlElement, disabled: bool) -> Result<()> {
    if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
        button.set_disabled(disabled);
        return Ok(());
    }

    if disabled {
        el.set_attribute("aria-disabled", "true")?;
        el.class_list().add_1("disabled")?;
    } else {
        el.remove_attribute("aria-disabled")?;
        el.class_list().remove_1("disabled")?;
    }
    Ok(())
}

/// Yew components mounted into the server-rendered page

use crate::alerts::Severity;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertBannerProps {
    pub message: String,
    #[prop_or_default]
    pub severity: Severity,
}

/// Dismissible Bootstrap alert; the close button is handled by Bootstrap itself
#[function_component(AlertBanner)]
pub fn alert_banner(props: &AlertBannerProps) -> Html {
    html! {
        <div class={props.severity.banner_classes()} role="alert">
            {&props.message}
            <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
        </div>
    }
}

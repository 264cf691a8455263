use leptos::prelude::*;

// Outline icons drawn on a 24x24 grid, sized by the caller's class.

fn icon_svg(class: &'static str, d: &'static str) -> impl IntoView {
    view! {
        <svg
            class=class
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
            stroke="currentColor"
            stroke-width="1.5"
        >
            <path stroke-linecap="round" stroke-linejoin="round" d=d />
        </svg>
    }
}

#[component]
pub fn ArrowLeftIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(class, "M10.5 19.5 3 12m0 0 7.5-7.5M3 12h18")
}

#[component]
pub fn ArrowDownTrayIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(
        class,
        "M3 16.5v2.25A2.25 2.25 0 0 0 5.25 21h13.5A2.25 2.25 0 0 0 21 18.75V16.5M16.5 12 12 16.5m0 0L7.5 12m4.5 4.5V3",
    )
}

#[component]
pub fn ChevronDownIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(class, "m19.5 8.25-7.5 7.5-7.5-7.5")
}

#[component]
pub fn ChevronUpIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(class, "m4.5 15.75 7.5-7.5 7.5 7.5")
}

#[component]
pub fn LockClosedIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(
        class,
        "M16.5 10.5V6.75a4.5 4.5 0 1 0-9 0v3.75m-.75 11.25h10.5a2.25 2.25 0 0 0 2.25-2.25v-6.75a2.25 2.25 0 0 0-2.25-2.25H6.75a2.25 2.25 0 0 0-2.25 2.25v6.75a2.25 2.25 0 0 0 2.25 2.25Z",
    )
}

#[component]
pub fn PencilIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(
        class,
        "m16.862 4.487 1.687-1.688a1.875 1.875 0 1 1 2.652 2.652L10.582 16.07a4.5 4.5 0 0 1-1.897 1.13L6 18l.8-2.685a4.5 4.5 0 0 1 1.13-1.897l8.932-8.931Zm0 0L19.5 7.125",
    )
}

#[component]
pub fn TrashIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(
        class,
        "m14.74 9-.346 9m-4.788 0L9.26 9m9.968-3.21c.342.052.682.107 1.022.166m-1.022-.165L18.16 19.673a2.25 2.25 0 0 1-2.244 2.077H8.084a2.25 2.25 0 0 1-2.244-2.077L4.772 5.79m14.456 0a48.108 48.108 0 0 0-3.478-.397m-12 .562c.34-.059.68-.114 1.022-.165m0 0a48.11 48.11 0 0 1 3.478-.397m7.5 0v-.916c0-1.18-.91-2.164-2.09-2.201a51.964 51.964 0 0 0-3.32 0c-1.18.037-2.09 1.022-2.09 2.201v.916m7.5 0a48.667 48.667 0 0 0-7.5 0",
    )
}

#[component]
pub fn PlusIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(class, "M12 4.5v15m7.5-7.5h-15")
}

#[component]
pub fn XMarkIcon(#[prop(default = "icon")] class: &'static str) -> impl IntoView {
    icon_svg(class, "M6 18 18 6M6 6l12 12")
}

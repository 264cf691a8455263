use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::pages::admin::AdminPage;
use crate::pages::results::ResultPage;
use crate::pages::upload::UploadPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="content">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=UploadPage />
                    <Route path=path!("/result") view=ResultPage />
                    <Route path=path!("/myadmin") view=AdminPage />
                </Routes>
            </main>
        </Router>
    }
}

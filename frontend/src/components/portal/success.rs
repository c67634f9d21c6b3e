//! Portal step 3: submission confirmation.

use leptos::prelude::*;

use crate::components::icons::CheckCircle;
use crate::flow::use_flow;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ReturnSuccessPage(store_url: String) -> impl IntoView {
    let flow = use_flow();
    let router = use_router();

    // The id only exists after a successful submission in this tab; a
    // direct visit has nothing to confirm.
    let Some(return_id) = flow.load_return_id() else {
        router.replace(AppRoute::PortalFind {
            store_url: store_url.clone(),
        });
        return ().into_any();
    };

    let track_route = AppRoute::PortalTrack {
        store_url: store_url.clone(),
        return_id: return_id.clone(),
    };
    let entry_route = AppRoute::PortalFind { store_url };

    view! {
        <div class="min-h-screen bg-base-200 flex items-center justify-center px-4">
            <div class="card bg-base-100 shadow-xl max-w-md w-full">
                <div class="card-body items-center text-center">
                    <div class="text-success">
                        <CheckCircle attr:class="h-16 w-16" />
                    </div>
                    <h1 class="text-2xl font-bold mt-2">"Return request received"</h1>
                    <p class="text-base-content/70">
                        "We emailed you a confirmation. Keep your return id handy:"
                    </p>
                    <div class="badge badge-lg badge-outline font-mono my-2">{return_id}</div>
                    <p class="text-sm text-base-content/60">
                        "You can check progress at any time on the tracking page."
                    </p>
                    <button
                        class="btn btn-primary mt-4"
                        on:click={
                            let router = router.clone();
                            move |_| router.navigate_route(track_route.clone())
                        }
                    >
                        "Track my return"
                    </button>
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=move |_| {
                            flow.clear_return_id();
                            router.navigate_route(entry_route.clone());
                        }
                    >
                        "Start another return"
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}

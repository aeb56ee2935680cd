pub mod admin;
pub mod chat;
pub mod dashboard;
pub mod history;
pub mod login;
pub mod not_found;
pub mod register;
pub mod reports;
pub mod roles;
pub mod status;

use crate::auth::{use_api, use_auth};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdClock, LdFileText, LdLayoutDashboard, LdSettings, LdShield, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::{
    navigation_items, ChatMode, Guard, GuardDecision, RedirectTarget, ADMIN_PATH, CHAT_PATH,
    CONVERSATIONAL_CHAT_PATH, DASHBOARD_PATH, HISTORY_PATH, PSYCHOLOGIST_REPORTS_PATH,
    ROLE_MANAGEMENT_PATH, STATUS_PATH,
};
use shared_ui::LoadingState;

use admin::Admin;
use chat::ChatView;
use dashboard::Dashboard;
use history::History;
use login::Login;
use not_found::NotFound;
use register::Register;
use reports::PsychologistReports;
use roles::RoleManagement;
use status::Status;

/// Application routes. Paths match `shared_types::ROUTE_TABLE`.
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/chat")]
        Chat {},
        #[route("/chat/conversational")]
        ConversationalChat {},
        #[layout(AccessGuard)]
            #[route("/history")]
            History {},
            #[route("/psychologist-reports")]
            PsychologistReports {},
            #[route("/dashboard")]
            Dashboard {},
            #[route("/admin")]
            Admin {},
            #[route("/admin/roles")]
            RoleManagement {},
            #[route("/status")]
            Status {},
        #[end_layout]
        #[route("/:..route")]
        NotFound { route: Vec<String> },
    #[end_layout]
}

impl From<RedirectTarget> for Route {
    fn from(target: RedirectTarget) -> Self {
        match target {
            RedirectTarget::Login => Route::Login {},
            RedirectTarget::Chat => Route::Chat {},
        }
    }
}

#[component]
fn Home() -> Element {
    navigator().replace(Route::Chat {});
    rsx! {}
}

#[component]
fn Chat() -> Element {
    rsx! { ChatView { mode: ChatMode::Standard } }
}

#[component]
fn ConversationalChat() -> Element {
    rsx! { ChatView { mode: ChatMode::Conversational } }
}

/// Runs the route guard on every navigation into a protected page.
#[component]
fn AccessGuard() -> Element {
    let route: Route = use_route();
    let auth = use_auth();
    let guard = Guard::new(client::config::config().access.default_access);

    let decision = guard.evaluate_path(&auth.session.read(), &route.to_string());
    match decision {
        GuardDecision::Render => rsx! { Outlet::<Route> {} },
        GuardDecision::Redirect(target) => {
            tracing::info!(from = %route, to = target.path(), "navigation redirected");
            navigator().replace(Route::from(target));
            rsx! { LoadingState { message: "Redirigiendo...", lines: 1 } }
        }
    }
}

fn nav_icon(path: &str) -> Element {
    match path {
        CHAT_PATH => rsx! { Icon::<LdBookOpen> { icon: LdBookOpen, width: 16, height: 16 } },
        CONVERSATIONAL_CHAT_PATH => {
            rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 16, height: 16 } }
        }
        HISTORY_PATH => rsx! { Icon::<LdClock> { icon: LdClock, width: 16, height: 16 } },
        PSYCHOLOGIST_REPORTS_PATH => {
            rsx! { Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 } }
        }
        DASHBOARD_PATH => {
            rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 16, height: 16 } }
        }
        ADMIN_PATH => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 16, height: 16 } },
        ROLE_MANAGEMENT_PATH => rsx! { Icon::<LdShield> { icon: LdShield, width: 16, height: 16 } },
        STATUS_PATH => rsx! { Icon::<LdSettings> { icon: LdSettings, width: 16, height: 16 } },
        _ => rsx! {},
    }
}

/// Top navigation bar and page frame.
#[component]
fn AppLayout() -> Element {
    let mut auth = use_auth();
    let api = use_api();

    let role = auth.role();
    let user = auth.user();

    let mut links: Vec<(Route, &'static str, &'static str)> = navigation_items(Some(role))
        .iter()
        .filter_map(|item| {
            let target = item.path.parse::<Route>().ok()?;
            Some((target, item.path, item.label))
        })
        .collect();
    // The conversational chat sits next to the plain chat for everyone.
    let chat_index = links.iter().position(|(_, path, _)| *path == CHAT_PATH);
    links.insert(
        chat_index.map(|i| i + 1).unwrap_or(0),
        (Route::ConversationalChat {}, CONVERSATIONAL_CHAT_PATH, "Conversacional"),
    );

    let sign_out = move |_| {
        let api = api.clone();
        spawn(async move {
            api.logout().await;
            auth.reload(&api);
            navigator().push(Route::Login {});
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        div { class: "app-shell",
            header { class: "app-navbar",
                Link { class: "app-brand", to: Route::Chat {}, "Camila AI" }

                nav { class: "app-nav",
                    for (target, path, label) in links {
                        Link {
                            key: "{path}",
                            class: "app-nav-link",
                            active_class: "active",
                            to: target,
                            {nav_icon(path)}
                            span { "{label}" }
                        }
                    }
                }

                div { class: "app-account",
                    if let Some(user) = user {
                        span { class: "app-greeting", "Hola, {user.username} ({role.label()})" }
                        button { class: "app-signout", onclick: sign_out, "Salir" }
                    } else {
                        Link { class: "app-nav-link", to: Route::Login {}, "Ingresar" }
                        Link { class: "app-nav-link app-nav-cta", to: Route::Register {}, "Registrarse" }
                    }
                }
            }

            main { class: "app-main",
                Outlet::<Route> {}
            }
        }
    }
}

//! Route table of the app.
//!
//! [`HOME_PATH`] and [`CHAT_PATH`] are handed to `<Routes>`; [`resolve`] runs
//! the same segments to give components a typed view of a path.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use leptos_router::{OptionalParamSegment, PossibleRouteMatch, StaticSegment};

/// Static segment of the chat route.
pub const CHAT_SEGMENT: &str = "chat";

/// Name of the optional chat route parameter.
pub const ROOM_ID_PARAM: &str = "roomId";

/// Segments of the home route, `/`.
pub type HomePath = StaticSegment<&'static str>;

/// Segments of the chat route, `/chat/:roomId?`.
pub type ChatPath = (StaticSegment<&'static str>, OptionalParamSegment);

pub const HOME_PATH: HomePath = StaticSegment("");

pub const CHAT_PATH: ChatPath = (StaticSegment(CHAT_SEGMENT), OptionalParamSegment(ROOM_ID_PARAM));

/// A matched route. `room_id` is passed through exactly as it appeared in the
/// path; turning it into a number is the chat view's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Chat { room_id: Option<String> },
}

impl AppRoute {
    pub fn chat(room_id: i64) -> Self {
        AppRoute::Chat { room_id: Some(room_id.to_string()) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppRoute::Home => "home",
            AppRoute::Chat { .. } => "chat",
        }
    }

    pub fn href(&self) -> String {
        match self {
            AppRoute::Home => "/".to_string(),
            AppRoute::Chat { room_id: Some(id) } => format!("/{CHAT_SEGMENT}/{id}"),
            AppRoute::Chat { room_id: None } => format!("/{CHAT_SEGMENT}"),
        }
    }
}

/// Matches `path` with the same segments `<Routes>` dispatches on. Query
/// string and fragment are ignored.
pub fn resolve(path: &str) -> Option<AppRoute> {
    let path = path.split(['?', '#']).next().unwrap_or_default();

    if let Some(params) = full_match(&CHAT_PATH, path) {
        let room_id = params
            .into_iter()
            .find(|(k, v)| k == ROOM_ID_PARAM && !v.is_empty())
            .map(|(_, v)| v);
        return Some(AppRoute::Chat { room_id });
    }
    full_match(&HOME_PATH, path).map(|_| AppRoute::Home)
}

/// The route for the current browser location, kept in sync by the router.
pub fn use_current_route() -> Memo<Option<AppRoute>> {
    let location = use_location();
    Memo::new(move |_| resolve(&location.pathname.get()))
}

/// Runs the library matcher and keeps only matches that consume the whole
/// path (a lone trailing slash is allowed).
fn full_match(segments: &impl PossibleRouteMatch, path: &str) -> Option<Vec<(String, String)>> {
    let matched = segments.test(path)?;
    if !matches!(matched.remaining(), "" | "/") {
        return None;
    }
    Some(
        matched
            .params()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

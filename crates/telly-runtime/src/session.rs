use std::future::Future;
use std::sync::Arc;

use telly_api::ShowSource;
use telly_core::models::Episode;
use telly_core::render::Frame;

use crate::browser::{Browser, Completion, EpisodeRequest};
use crate::RuntimeError;

/// Output of a detached episode fetch, ready for [`Session::complete`].
pub type EpisodeFetch = (EpisodeRequest, Result<Vec<Episode>, RuntimeError>);

/// A [`Browser`] wired to a data source.
pub struct Session<S> {
    source: Arc<S>,
    browser: Browser,
}

impl<S: ShowSource + 'static> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            browser: Browser::new(),
        }
    }

    /// Page bootstrap: fetch and draw the show list.
    ///
    /// A failed fetch leaves an empty list with a status message.
    pub async fn start(&mut self) -> Frame {
        match self.source.fetch_shows().await {
            Ok(shows) => self.browser.load_shows(shows),
            Err(e) => self.browser.shows_failed(&e.to_string()),
        }
    }

    pub fn search(&mut self, text: &str) -> Frame {
        self.browser.search(text)
    }

    pub fn show_all(&mut self) -> Frame {
        self.browser.show_all()
    }

    pub fn select_episode(&mut self, value: &str) -> Result<Frame, RuntimeError> {
        self.browser.select_episode(value)
    }

    /// Select a show and wait for its episodes.
    pub async fn select_show(&mut self, value: &str) -> Result<Frame, RuntimeError> {
        if let Some(fetch) = self.select_show_detached(value)? {
            let (request, result) = fetch.await;
            self.complete(request, result);
        }
        Ok(self.browser.frame())
    }

    /// Select a show and hand back the fetch instead of awaiting it.
    ///
    /// The returned future owns everything it needs, so callers can run it
    /// alongside further input and feed the result to [`Session::complete`].
    pub fn select_show_detached(
        &mut self,
        value: &str,
    ) -> Result<Option<impl Future<Output = EpisodeFetch> + Send + 'static>, RuntimeError> {
        let Some(request) = self.browser.select_show(value)? else {
            return Ok(None);
        };
        let source = Arc::clone(&self.source);
        Ok(Some(async move {
            let result = source
                .fetch_episodes(request.show_id)
                .await
                .map_err(|e| RuntimeError::Fetch(e.to_string()));
            (request, result)
        }))
    }

    pub fn complete(
        &mut self,
        request: EpisodeRequest,
        result: Result<Vec<Episode>, RuntimeError>,
    ) -> Completion {
        self.browser.complete_episodes(request, result)
    }

    pub fn frame(&self) -> Frame {
        self.browser.frame()
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use telly_core::models::{Show, ShowId};
    use telly_core::view::ViewKind;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("fake source: {0}")]
    struct FakeError(String);

    #[derive(Default)]
    struct FakeSource {
        shows: Vec<Show>,
        episodes: HashMap<ShowId, Vec<Episode>>,
        offline: bool,
    }

    impl ShowSource for FakeSource {
        type Error = FakeError;

        async fn fetch_shows(&self) -> Result<Vec<Show>, FakeError> {
            if self.offline {
                return Err(FakeError("offline".into()));
            }
            Ok(self.shows.clone())
        }

        async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, FakeError> {
            if self.offline {
                return Err(FakeError("offline".into()));
            }
            self.episodes
                .get(&show_id)
                .cloned()
                .ok_or_else(|| FakeError(format!("no show {show_id}")))
        }
    }

    fn source() -> FakeSource {
        let mut episodes = HashMap::new();
        episodes.insert(2, vec![Episode::new(1, 1, "Pilot")]);
        FakeSource {
            shows: vec![Show::new(1, "Lost"), Show::new(2, "Alias")],
            episodes,
            offline: false,
        }
    }

    #[tokio::test]
    async fn test_start_sorts_shows() {
        let mut session = Session::new(source());
        let frame = session.start().await;
        assert_eq!(frame.rendered.titles(), ["Alias", "Lost"]);
    }

    #[tokio::test]
    async fn test_select_show_end_to_end() {
        let mut session = Session::new(source());
        session.start().await;
        let frame = session.select_show("2").await.unwrap();
        assert_eq!(session.browser().view(), ViewKind::Episodes);
        assert_eq!(frame.rendered.len(), 1);
        assert_eq!(frame.rendered.titles(), ["S01E01 - Pilot"]);
        let labels: Vec<&str> = frame.episode_options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["All episodes", "S01E01 - Pilot"]);
    }

    #[tokio::test]
    async fn test_zombie_search_counts_all_shows() {
        let mut session = Session::new(source());
        session.start().await;
        let frame = session.search("zombie");
        assert_eq!(frame.rendered.len(), 0);
        assert_eq!(frame.count_message.as_deref(), Some("Displaying : 0 / 2 shows"));
    }

    #[tokio::test]
    async fn test_fetch_error_surfaces_as_status() {
        let mut session = Session::new(source());
        session.start().await;
        // Show 1 has no episodes in the fake.
        let frame = session.select_show("1").await.unwrap();
        assert_eq!(session.browser().view(), ViewKind::Shows);
        assert_eq!(frame.rendered.len(), 2);
        assert!(frame.status.unwrap().contains("no show 1"));
    }

    #[tokio::test]
    async fn test_detached_fetch_error_is_typed() {
        let mut session = Session::new(source());
        session.start().await;
        let fetch = session.select_show_detached("1").unwrap().unwrap();
        let (request, result) = fetch.await;
        match &result {
            Err(RuntimeError::Fetch(message)) => assert!(message.contains("no show 1")),
            other => panic!("Expected Fetch error, got {other:?}"),
        }
        assert_eq!(session.complete(request, result), Completion::Failed);
    }

    #[tokio::test]
    async fn test_offline_start() {
        let mut session = Session::new(FakeSource {
            offline: true,
            ..Default::default()
        });
        let frame = session.start().await;
        assert!(frame.rendered.is_empty());
        assert!(frame.status.unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_detached_fetches_resolve_out_of_order() {
        let mut source = source();
        source.episodes.insert(1, vec![Episode::new(1, 1, "Pilot (1)")]);
        let mut session = Session::new(source);
        session.start().await;

        let first = session.select_show_detached("1").unwrap().unwrap();
        let second = session.select_show_detached("2").unwrap().unwrap();
        let (second_req, second_result) = second.await;
        let (first_req, first_result) = first.await;

        assert_eq!(session.complete(second_req, second_result), Completion::Applied);
        assert_eq!(session.complete(first_req, first_result), Completion::Stale);
        assert_eq!(session.frame().rendered.titles(), ["S01E01 - Pilot"]);
    }

    #[tokio::test]
    async fn test_sentinel_needs_no_fetch() {
        let mut session = Session::new(source());
        session.start().await;
        assert!(session.select_show_detached("").unwrap().is_none());
        let frame = session.select_episode("").unwrap();
        assert_eq!(frame.rendered.len(), 2);
        assert_eq!(session.show_all().rendered.len(), 2);
    }
}

//! Drives one search cycle: input → Loading → fetch → normalize → Success/Error.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, info, warn};

use crate::{
    model::{DisplayState, SearchQuery},
    provider::WeatherProvider,
    render::{DisplayOutput, render},
    transform,
};

/// Where rendered output goes. The host decides how to apply the theme.
pub trait DisplaySink: Send + Sync {
    fn show(&self, output: &DisplayOutput);
}

impl<T: DisplaySink + ?Sized> DisplaySink for Arc<T> {
    fn show(&self, output: &DisplayOutput) {
        (**self).show(output)
    }
}

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was shown or requested.
    Ignored,
    /// The result replaced the display state.
    Applied,
    /// A newer submission started meanwhile; the result was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Session {
    latest_ticket: u64,
    /// `None` until the first submission.
    state: Option<DisplayState>,
}

pub struct SearchController<S> {
    provider: Box<dyn WeatherProvider>,
    sink: S,
    session: Mutex<Session>,
    /// Ticket of the last output given to the sink.
    shown: Mutex<u64>,
    clock: fn() -> DateTime<FixedOffset>,
}

impl<S: DisplaySink> SearchController<S> {
    pub fn new(provider: Box<dyn WeatherProvider>, sink: S) -> Self {
        Self {
            provider,
            sink,
            session: Mutex::new(Session::default()),
            shown: Mutex::new(0),
            clock: local_now,
        }
    }

    /// Replace the clock used to stamp successful results.
    pub fn with_clock(mut self, clock: fn() -> DateTime<FixedOffset>) -> Self {
        self.clock = clock;
        self
    }

    /// Current display state; `None` while idle.
    pub fn state(&self) -> Option<DisplayState> {
        self.session().state.clone()
    }

    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let Ok(query) = SearchQuery::parse(input) else {
            debug!("Ignoring blank search");
            return SubmitOutcome::Ignored;
        };

        let ticket = self.begin(&query);

        let result = match self.provider.fetch_forecast(&query).await {
            Ok(raw) => transform::normalize(&raw, (self.clock)()),
            Err(err) => Err(err),
        };

        let state = match result {
            Ok(view) => DisplayState::Success(view),
            Err(err) => {
                warn!(location = %query, error = %err, "Search failed");
                DisplayState::Error(err.to_string())
            }
        };

        self.finish(ticket, state)
    }

    fn begin(&self, query: &SearchQuery) -> u64 {
        let ticket = {
            let mut session = self.session();
            session.latest_ticket += 1;
            session.state = Some(DisplayState::Loading);
            session.latest_ticket
        };
        info!(location = %query, ticket, "Search started");

        self.present(ticket, &render(&DisplayState::Loading));
        ticket
    }

    fn finish(&self, ticket: u64, state: DisplayState) -> SubmitOutcome {
        let output = render(&state);
        let success = matches!(state, DisplayState::Success(_));
        {
            let mut session = self.session();
            if ticket != session.latest_ticket {
                debug!(ticket, latest = session.latest_ticket, "Discarding stale search result");
                return SubmitOutcome::Superseded;
            }
            session.state = Some(state);
        }

        if !self.present(ticket, &output) {
            debug!(ticket, "Search result overtaken before display");
            return SubmitOutcome::Superseded;
        }
        info!(ticket, success, "Search finished");
        SubmitOutcome::Applied
    }

    /// Hands output to the sink without holding the session lock. Sink calls are
    /// serialized and never go back to an older ticket.
    fn present(&self, ticket: u64, output: &DisplayOutput) -> bool {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket < *shown || ticket != self.session().latest_ticket {
            return false;
        }
        *shown = ticket;
        self.sink.show(output);
        true
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        model::{RawCity, RawForecastEntry, RawForecastResponse, RawMain, RawWeather, RawWind},
        presentation::Theme,
    };
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::{
        sync::{OnceLock, Weak},
        time::Duration,
    };

    #[derive(Debug, Default)]
    struct RecordingSink {
        outputs: Mutex<Vec<DisplayOutput>>,
    }

    impl RecordingSink {
        fn outputs(&self) -> Vec<DisplayOutput> {
            self.outputs.lock().unwrap().clone()
        }
    }

    impl DisplaySink for RecordingSink {
        fn show(&self, output: &DisplayOutput) {
            self.outputs.lock().unwrap().push(output.clone());
        }
    }

    /// Answers with a one-entry forecast for the queried city. "Lento" answers late,
    /// "Nenhures" is unknown to the service.
    #[derive(Debug, Default)]
    struct FakeProvider;

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn fetch_forecast(
            &self,
            query: &SearchQuery,
        ) -> Result<RawForecastResponse, WeatherError> {
            match query.as_str() {
                "Nenhures" => Err(WeatherError::NotFound),
                "Lento" => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(forecast("Lento", "Rain"))
                }
                city => Ok(forecast(city, "Clear")),
            }
        }
    }

    fn forecast(city: &str, category: &str) -> RawForecastResponse {
        RawForecastResponse {
            city: RawCity { name: city.into(), country: "PT".into(), timezone: 0 },
            list: vec![RawForecastEntry {
                dt: 1_792_368_000,
                main: RawMain { temp: 20.0, feels_like: 19.0, humidity: 50.0, pressure: 1010.0 },
                weather: vec![RawWeather { main: category.into(), description: "x".into() }],
                wind: RawWind { speed: 1.0 },
            }],
        }
    }

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
    }

    fn controller() -> (SearchController<Arc<RecordingSink>>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let controller = SearchController::new(Box::new(FakeProvider), sink.clone())
            .with_clock(fixed_now);
        (controller, sink)
    }

    fn shown_city(state: &Option<DisplayState>) -> Option<String> {
        match state {
            Some(DisplayState::Success(view)) => Some(view.current.city.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn blank_input_changes_nothing() {
        let (controller, sink) = controller();

        assert_eq!(controller.submit("   ").await, SubmitOutcome::Ignored);
        assert_eq!(controller.submit("").await, SubmitOutcome::Ignored);

        assert_eq!(controller.state(), None);
        assert!(sink.outputs().is_empty());
    }

    #[tokio::test]
    async fn loading_is_shown_before_result() {
        let (controller, sink) = controller();

        assert_eq!(controller.submit(" Faro ").await, SubmitOutcome::Applied);

        let outputs = sink.outputs();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0], render(&DisplayState::Loading));
        assert!(outputs[1].text.starts_with("Faro, PT"));
        assert_eq!(outputs[1].theme, Some(Theme::Clear));
        assert_eq!(shown_city(&controller.state()).as_deref(), Some("Faro"));
    }

    #[tokio::test]
    async fn failure_becomes_error_state() {
        let (controller, sink) = controller();

        controller.submit("Nenhures").await;

        assert_eq!(
            controller.state(),
            Some(DisplayState::Error("Cidade não encontrada".into()))
        );
        let last = sink.outputs().pop().unwrap();
        assert!(last.text.contains("Ops! Cidade não encontrada"));
        assert!(last.text.contains("Tente buscar outra cidade"));
    }

    #[tokio::test]
    async fn new_submission_replaces_previous_state() {
        let (controller, _sink) = controller();

        controller.submit("Nenhures").await;
        controller.submit("Braga").await;

        assert_eq!(shown_city(&controller.state()).as_deref(), Some("Braga"));
    }

    #[tokio::test]
    async fn stale_result_is_discarded() {
        let (controller, sink) = controller();

        let (slow, fast) = tokio::join!(controller.submit("Lento"), async {
            tokio::task::yield_now().await;
            controller.submit("Rápido").await
        });

        assert_eq!(slow, SubmitOutcome::Superseded);
        assert_eq!(fast, SubmitOutcome::Applied);
        assert_eq!(shown_city(&controller.state()).as_deref(), Some("Rápido"));

        // two Loading renders and one result; the late answer never reached the sink
        let outputs = sink.outputs();
        assert_eq!(outputs.len(), 3);
        assert!(outputs.iter().all(|o| !o.text.contains("Lento")));
    }

    /// Reads the controller's state from inside `show`.
    #[derive(Default)]
    struct InspectingSink {
        controller: OnceLock<Weak<SearchController<Arc<InspectingSink>>>>,
        seen: Mutex<Vec<Option<DisplayState>>>,
    }

    impl DisplaySink for InspectingSink {
        fn show(&self, _output: &DisplayOutput) {
            let state = self
                .controller
                .get()
                .and_then(Weak::upgrade)
                .and_then(|controller| controller.state());
            self.seen.lock().unwrap().push(state);
        }
    }

    #[tokio::test]
    async fn sink_runs_outside_session_lock() {
        let sink = Arc::new(InspectingSink::default());
        let controller = Arc::new(
            SearchController::new(Box::new(FakeProvider), sink.clone()).with_clock(fixed_now),
        );
        sink.controller.set(Arc::downgrade(&controller)).ok().unwrap();

        assert_eq!(controller.submit("Faro").await, SubmitOutcome::Applied);

        let seen = sink.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Some(DisplayState::Loading));
        assert_eq!(shown_city(&seen[1]).as_deref(), Some("Faro"));
    }
}

//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::error::{FETCH_FAILED_MESSAGE, GEO_UNSUPPORTED_MESSAGE, LOCATION_FAILED_MESSAGE};
use crate::state::{AppState, Phase};

/// The reducer handles all state transitions.
///
/// Each result action is only accepted in the phase that requested it, so the
/// mount chain runs once and late or duplicate results are dropped.
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Mount => {
            if state.phase != Phase::Init {
                return DispatchResult::unchanged();
            }
            state.phase = Phase::Locating;
            state.loading = true;
            state.error = None;
            state.diagnostic = None;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::LocatePosition)
        }

        // ===== Location actions =====
        Action::LocationDidResolve(coords) => {
            if state.phase != Phase::Locating {
                return DispatchResult::unchanged();
            }
            state.phase = Phase::Fetching;
            DispatchResult::changed_with(Effect::FetchWeather {
                lat: coords.lat,
                lon: coords.lon,
            })
        }

        Action::LocationDidError(detail) => {
            if state.phase != Phase::Locating {
                return DispatchResult::unchanged();
            }
            fall_back(state, Phase::LocationFailed, LOCATION_FAILED_MESSAGE, Some(detail));
            DispatchResult::changed()
        }

        Action::LocationUnsupported => {
            if state.phase != Phase::Locating {
                return DispatchResult::unchanged();
            }
            fall_back(state, Phase::GeoUnsupported, GEO_UNSUPPORTED_MESSAGE, None);
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(snapshot) => {
            if state.phase != Phase::Fetching {
                return DispatchResult::unchanged();
            }
            state.snapshot = snapshot;
            state.phase = Phase::Success;
            state.loading = false;
            state.error = None;
            state.diagnostic = None;
            DispatchResult::changed()
        }

        Action::WeatherDidError(detail) => {
            if state.phase != Phase::Fetching {
                return DispatchResult::unchanged();
            }
            fall_back(state, Phase::FetchFailed, FETCH_FAILED_MESSAGE, Some(detail));
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn fall_back(state: &mut AppState, phase: Phase, message: &str, detail: Option<String>) {
    state.restore_fallback();
    state.phase = phase;
    state.loading = false;
    state.error = Some(message.to_string());
    state.diagnostic = detail;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Coordinates, WeatherSnapshot};

    fn paris() -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::bundled_default();
        snapshot.location.name = "Paris".into();
        snapshot.current.temp_c = 15.6;
        snapshot.current.condition.text = "Sunny".into();
        snapshot
    }

    fn state_in(phase: Phase) -> AppState {
        AppState {
            phase,
            ..Default::default()
        }
    }

    #[test]
    fn test_mount_starts_locating() {
        let mut state = AppState::default();
        state.tick_count = 9;

        let result = reducer(&mut state, Action::Mount);

        assert!(result.changed);
        assert!(state.loading);
        assert_eq!(state.phase, Phase::Locating);
        assert_eq!(state.tick_count, 0);
        assert_eq!(result.effects, vec![Effect::LocatePosition]);
    }

    #[test]
    fn test_mount_runs_once() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Mount);

        let result = reducer(&mut state, Action::Mount);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_location_resolve_requests_fetch() {
        let mut state = state_in(Phase::Locating);

        let result = reducer(
            &mut state,
            Action::LocationDidResolve(Coordinates { lat: 5.96, lon: 10.15 }),
        );

        assert!(result.changed);
        assert!(state.loading);
        assert_eq!(state.phase, Phase::Fetching);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather { lat: 5.96, lon: 10.15 }]
        );
    }

    #[test]
    fn test_location_error_falls_back_without_fetch() {
        let mut state = state_in(Phase::Locating);

        let result = reducer(&mut state, Action::LocationDidError("denied".into()));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(!state.loading);
        assert_eq!(state.phase, Phase::LocationFailed);
        assert_eq!(state.error.as_deref(), Some(LOCATION_FAILED_MESSAGE));
        assert_eq!(state.diagnostic.as_deref(), Some("denied"));
        assert_eq!(state.snapshot, state.fallback);
    }

    #[test]
    fn test_unsupported_settles_immediately() {
        let mut state = state_in(Phase::Locating);

        let result = reducer(&mut state, Action::LocationUnsupported);

        assert!(result.effects.is_empty());
        assert!(!state.loading);
        assert_eq!(state.phase, Phase::GeoUnsupported);
        assert_eq!(state.error.as_deref(), Some(GEO_UNSUPPORTED_MESSAGE));
    }

    #[test]
    fn test_weather_load_replaces_snapshot() {
        let mut state = state_in(Phase::Fetching);

        let result = reducer(&mut state, Action::WeatherDidLoad(paris()));

        assert!(result.changed);
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.snapshot, paris());
        assert_eq!(state.fallback, WeatherSnapshot::bundled_default());
    }

    #[test]
    fn test_weather_error_restores_fallback() {
        let mut state = state_in(Phase::Fetching);
        state.snapshot = paris();

        reducer(&mut state, Action::WeatherDidError("HTTP 500".into()));

        assert!(!state.loading);
        assert_eq!(state.phase, Phase::FetchFailed);
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(state.snapshot, WeatherSnapshot::bundled_default());
    }

    #[test]
    fn test_results_ignored_outside_their_phase() {
        let mut state = state_in(Phase::Success);
        state.snapshot = paris();
        state.loading = false;

        for action in [
            Action::LocationDidResolve(Coordinates { lat: 0.0, lon: 0.0 }),
            Action::LocationDidError("late".into()),
            Action::LocationUnsupported,
            Action::WeatherDidLoad(WeatherSnapshot::bundled_default()),
            Action::WeatherDidError("late".into()),
        ] {
            let result = reducer(&mut state, action);
            assert!(!result.changed);
            assert!(result.effects.is_empty());
        }

        assert_eq!(state.snapshot, paris());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_tick_only_animates_while_loading() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.tick_count, 1);

        state.loading = false;
        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);
        assert_eq!(state.tick_count, 1);
    }
}

//! `CompatibilityMatcher`: the default [`Matcher`].

use std::collections::HashSet;

use ridepool_core::{
    CandidateRequest, CandidateSupplier, Clock, DepartureWindow, MatchError, MatchQuery,
    MatchRequest, MatchResult, Matcher, RideOffer, SystemClock, TripEndpoints,
};

use crate::{
    CompatibilityFilter, ConfigError, MatcherConfig, PoolStrategy, compatibility_score, rank,
};

/// Matcher that filters a supplier's candidate pool through the route and
/// time gates, scores the survivors and ranks them.
///
/// The matcher is generic over its collaborators: the candidate supplier
/// and the clock that defines "now" for each fetch.
#[derive(Debug)]
pub struct CompatibilityMatcher<S, C = SystemClock>
where
    S: CandidateSupplier,
    C: Clock,
{
    supplier: S,
    clock: C,
    config: MatcherConfig,
    filter: CompatibilityFilter,
}

impl<S> CompatibilityMatcher<S, SystemClock>
where
    S: CandidateSupplier,
{
    /// Construct a matcher on the system clock with default configuration.
    #[must_use]
    pub fn new(supplier: S) -> Self {
        Self::build(supplier, SystemClock, MatcherConfig::default())
    }
}

impl<S, C> CompatibilityMatcher<S, C>
where
    S: CandidateSupplier,
    C: Clock,
{
    /// Construct a matcher with an explicit clock and configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn with_config(supplier: S, clock: C, config: MatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(supplier, clock, config))
    }

    fn build(supplier: S, clock: C, config: MatcherConfig) -> Self {
        let filter = CompatibilityFilter::from_config(&config);
        Self {
            supplier,
            clock,
            config,
            filter,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Validate a wire request and match it.
    ///
    /// The request's `maxResults` falls back to
    /// [`MatcherConfig::default_max_results`].
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidQuery`] before any fetch when the request
    /// is malformed, or [`MatchError::Supplier`] when the fetch fails.
    pub fn match_request(&self, request: &MatchRequest) -> Result<Vec<MatchResult>, MatchError> {
        let (query, max_results) = request.validate_detailed(self.config.default_max_results)?;
        self.find_matches(&query, max_results)
    }

    /// Suggest rides resembling a passenger's past trips.
    ///
    /// Past pickups and drop-offs are averaged into one synthetic trip
    /// departing now. An empty history yields no suggestions and no fetch.
    ///
    /// # Errors
    /// Returns [`MatchError::Supplier`] when the fetch fails.
    pub fn recommend(
        &self,
        history: &[TripEndpoints],
        max_results: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let Some(centre) = TripEndpoints::centroid(history) else {
            log::debug!("no booking history; skipping recommendations");
            return Ok(Vec::new());
        };
        let query = MatchQuery::new(centre.pickup, centre.dropoff, self.clock.now());
        self.find_matches(&query, max_results)
    }

    fn candidate_request(&self, query: &MatchQuery) -> CandidateRequest {
        let request = CandidateRequest::new(self.clock.now(), self.config.pool_cap);
        match self.config.pool_strategy {
            PoolStrategy::SoonestDeparture => request,
            PoolStrategy::DepartureWindow => request.with_departure_window(
                DepartureWindow::around(query.departure_time, self.config.time_tolerance_minutes),
            ),
        }
    }

    fn evaluate(&self, pool: Vec<RideOffer>, query: &MatchQuery) -> Vec<MatchResult> {
        let mut seen = HashSet::with_capacity(pool.len());
        let mut admitted = Vec::new();
        for ride in pool {
            if !seen.insert(ride.id) {
                log::warn!(
                    "ride {} appears more than once in the candidate pool; keeping the first",
                    ride.id
                );
                continue;
            }
            match self.filter.admit(&ride, query) {
                Ok(deviations) => admitted.push(MatchResult {
                    compatibility_score: compatibility_score(&deviations),
                    pickup_deviation_km: deviations.pickup_km,
                    dropoff_deviation_km: deviations.dropoff_km,
                    time_difference_minutes: deviations.time_minutes,
                    ride,
                }),
                Err(rejection) => log::trace!("ride {} rejected: {rejection:?}", ride.id),
            }
        }
        admitted
    }
}

impl<S, C> Matcher for CompatibilityMatcher<S, C>
where
    S: CandidateSupplier,
    C: Clock,
{
    fn find_matches(
        &self,
        query: &MatchQuery,
        max_results: usize,
    ) -> Result<Vec<MatchResult>, MatchError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        let request = self.candidate_request(query);
        let pool = self.supplier.fetch_candidates(&request)?;
        let pool_size = pool.len();
        let admitted = self.evaluate(pool, query);
        log::debug!(
            "admitted {} of {pool_size} candidate rides for departure {}",
            admitted.len(),
            query.departure_time
        );
        Ok(rank(admitted, max_results))
    }
}

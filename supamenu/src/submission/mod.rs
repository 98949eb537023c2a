//! Turns a validated draft into exactly one create request.

mod payload;

pub use payload::*;

use std::cell::Cell;
use tracing::{info, warn};
use web_common::RestaurantDto;

use crate::api::ApiClient;
use crate::draft::DraftEntity;
use crate::errors::{ApiError, SubmissionError};
use crate::transport::{ApiRequest, HttpTransport};

/// Resets the in-flight flag when the submission future completes or is dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Issues create-restaurant requests, one at a time.
///
/// A second [`submit`](Self::submit) while one is awaiting its response is
/// refused with [`SubmissionError::Busy`]; nothing is queued and nothing is
/// retried automatically.
#[derive(Debug)]
pub struct SubmissionCoordinator<T> {
    client: ApiClient<T>,
    in_flight: Cell<bool>,
}

impl<T: HttpTransport> SubmissionCoordinator<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            in_flight: Cell::new(false),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Sends `draft` and classifies the outcome.
    ///
    /// The payload is built before the first await, so later edits to the
    /// caller's draft never leak into this request.
    pub async fn submit(&self, draft: &DraftEntity) -> Result<RestaurantDto, SubmissionError> {
        if self.in_flight.replace(true) {
            warn!("submission refused: another one is in flight");
            return Err(SubmissionError::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        let form = create_restaurant_form(draft);
        let request = ApiRequest::post(CREATE_RESTAURANT_PATH).multipart(form);
        info!(
            name = %draft.name,
            menu_items = draft.menu_items.len(),
            version = PAYLOAD_VERSION,
            "submitting restaurant"
        );

        let restaurant: RestaurantDto = self
            .client
            .execute(request, "Failed to create restaurant")
            .await
            .map_err(|e| {
                let classified = SubmissionError::from(e);
                warn!(error = %classified, "restaurant submission failed");
                classified
            })?;

        if restaurant.id.is_empty() {
            let error = SubmissionError::from(ApiError::Decode("missing restaurant id".to_string()));
            warn!(error = %error, "restaurant submission failed");
            return Err(error);
        }

        info!(id = %restaurant.id, "restaurant created");
        Ok(restaurant)
    }
}

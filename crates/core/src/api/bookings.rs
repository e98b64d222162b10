use serde_json::Value;

use crate::models::{MobileBooking, RecordId};

use super::{endpoints::BOOKINGS, take_field, take_list, take_saved, ApiClient, ApiError, Saved};

/// `/api/bookings` handle.
pub struct BookingsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Booking endpoints.
    pub fn bookings(&self) -> BookingsApi<'_> {
        BookingsApi { client: self }
    }
}

impl BookingsApi<'_> {
    /// All bookings.
    pub async fn list(&self) -> Result<Vec<MobileBooking>, ApiError> {
        let mut body: Value = self.client.get(BOOKINGS).await?;
        take_list(&mut body, "bookings", BOOKINGS)
    }

    /// One booking with its sale details.
    pub async fn get(&self, id: RecordId) -> Result<MobileBooking, ApiError> {
        let path = format!("{BOOKINGS}/{id}");
        let mut body: Value = self.client.get(&path).await?;
        take_field(&mut body, "booking", &path)
    }

    /// Create a record.
    pub async fn add(&self, booking: &MobileBooking) -> Result<Saved<MobileBooking>, ApiError> {
        let body: Value = self.client.post(BOOKINGS, booking).await?;
        take_saved(body, "booking", BOOKINGS)
    }

    /// Replace a record.
    pub async fn update(
        &self,
        id: RecordId,
        booking: &MobileBooking,
    ) -> Result<Saved<MobileBooking>, ApiError> {
        let path = format!("{BOOKINGS}/{id}");
        let body: Value = self.client.put(&path, booking).await?;
        take_saved(body, "booking", &path)
    }
}

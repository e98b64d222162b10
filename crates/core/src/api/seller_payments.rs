use serde::Deserialize;
use serde_json::Value;

use crate::models::{RecordId, SellerPayment, SellerPaymentFilters};

use super::{
    endpoints::SELLER_PAYMENTS, message_of, take_field, take_saved, ApiClient, ApiError, Saved,
};

/// `GET /api/seller-payments` body.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SellerPaymentList {
    /// Matching payments.
    #[serde(default)]
    pub payments: Vec<SellerPayment>,
    /// Total reported by the server.
    #[serde(default)]
    pub count: u64,
}

/// `/api/seller-payments` handle.
pub struct SellerPaymentsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Seller payment endpoints.
    pub fn seller_payments(&self) -> SellerPaymentsApi<'_> {
        SellerPaymentsApi { client: self }
    }
}

impl SellerPaymentsApi<'_> {
    /// Payments matching `filters`; unset filters are not sent.
    pub async fn list(&self, filters: &SellerPaymentFilters) -> Result<SellerPaymentList, ApiError> {
        self.client.get_with_query(SELLER_PAYMENTS, filters).await
    }

    /// Fetch one record.
    pub async fn get(&self, id: RecordId) -> Result<SellerPayment, ApiError> {
        let path = format!("{SELLER_PAYMENTS}/{id}");
        let mut body: Value = self.client.get(&path).await?;
        take_field(&mut body, "payment", &path)
    }

    /// Create a record.
    pub async fn add(&self, payment: &SellerPayment) -> Result<Saved<SellerPayment>, ApiError> {
        let body: Value = self.client.post(SELLER_PAYMENTS, payment).await?;
        take_saved(body, "payment", SELLER_PAYMENTS)
    }

    /// Replace a record.
    pub async fn update(
        &self,
        id: RecordId,
        payment: &SellerPayment,
    ) -> Result<Saved<SellerPayment>, ApiError> {
        let path = format!("{SELLER_PAYMENTS}/{id}");
        let body: Value = self.client.put(&path, payment).await?;
        take_saved(body, "payment", &path)
    }

    /// Delete a record. Returns the server's confirmation, if any.
    pub async fn delete(&self, id: RecordId) -> Result<Option<String>, ApiError> {
        let path = format!("{SELLER_PAYMENTS}/{id}");
        let body: Value = self.client.delete(&path).await?;
        Ok(message_of(body))
    }
}

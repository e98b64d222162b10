use serde_json::Value;

use crate::models::Partner;

use super::{endpoints::PARTNERS, take_list, ApiClient, ApiError};

/// `/api/partners` handle. Read-only.
pub struct PartnersApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Partner endpoints.
    pub fn partners(&self) -> PartnersApi<'_> {
        PartnersApi { client: self }
    }
}

impl PartnersApi<'_> {
    /// Partners of the signed-in tenant.
    pub async fn list(&self) -> Result<Vec<Partner>, ApiError> {
        let mut body: Value = self.client.get(PARTNERS).await?;
        take_list(&mut body, "partners", PARTNERS)
    }
}

//! Bill store backed by the Billed REST API.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::BillId,
    error::{ApiError, StoreError},
    protocol::{Bill, BillUpdate, CreatedBill},
};
use tracing::{debug, warn};

use crate::{BillsApi, NewBillPayload};

pub struct HttpBillStore {
    http: Client,
    base_url: String,
    jwt: Option<String>,
}

impl HttpBillStore {
    pub fn new(base_url: impl Into<String>, jwt: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            jwt,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.jwt {
            Some(jwt) => request.bearer_auth(jwt),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, StoreError> {
        let res = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| StoreError::transport(err.to_string()))?;

        let status = res.status();
        debug!(operation, status = status.as_u16(), "bill store response");
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let server_message = serde_json::from_str::<ApiError>(&body)
                .ok()
                .map(|err| err.message);
            let err = StoreError::from_status(status.as_u16(), server_message);
            warn!(operation, status = status.as_u16(), "bill store rejected request: {err}");
            return Err(err);
        }

        res.json::<T>()
            .await
            .map_err(|err| StoreError::transport(format!("invalid {operation} response: {err}")))
    }
}

fn multipart_form(payload: &NewBillPayload) -> Result<Form, StoreError> {
    let mut form = Form::new()
        .text("email", payload.email.clone())
        .text("type", payload.expense_type.label())
        .text("name", payload.name.clone())
        .text("amount", payload.amount.to_string())
        .text("date", payload.date.clone())
        .text("pct", payload.pct.to_string())
        .text("status", payload.status.as_str());
    if let Some(vat) = &payload.vat {
        form = form.text("vat", vat.clone());
    }
    if let Some(commentary) = &payload.commentary {
        form = form.text("commentary", commentary.clone());
    }
    if let Some(receipt) = &payload.receipt {
        let mut part = Part::bytes(receipt.file.bytes.clone()).file_name(receipt.file.name.clone());
        if let Some(mime_type) = &receipt.file.mime_type {
            part = part
                .mime_str(mime_type)
                .map_err(|err| StoreError::transport(format!("invalid receipt mime type: {err}")))?;
        }
        form = form
            .text("fileName", receipt.file.name.clone())
            .part(receipt.form_key.clone(), part);
    }
    Ok(form)
}

#[async_trait]
impl BillsApi for HttpBillStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let request = self.http.get(format!("{}/bills", self.base_url));
        self.send("list", request).await
    }

    async fn create(&self, payload: &NewBillPayload) -> Result<CreatedBill, StoreError> {
        let form = multipart_form(payload)?;
        let request = self
            .http
            .post(format!("{}/bills", self.base_url))
            .multipart(form);
        self.send("create", request).await
    }

    async fn update(&self, bill_id: &BillId, update: &BillUpdate) -> Result<Bill, StoreError> {
        let request = self
            .http
            .patch(format!("{}/bills/{}", self.base_url, bill_id.0))
            .json(update);
        self.send("update", request).await
    }
}

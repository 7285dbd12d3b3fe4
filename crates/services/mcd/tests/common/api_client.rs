use std::error::Error;

use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

pub const API_TOKEN_HEADER: &str = "x-api-token";

pub struct ApiClient {
    pub url: String,
    pub client: reqwest::Client,
}

impl ApiClient {
    pub fn new(url: String) -> Self {
        let client = reqwest::ClientBuilder::new()
            .build()
            .expect("Failed to build reqwest Client");
        Self { url, client }
    }

    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    /// Sends a request and returns the status with the JSON body, or
    /// `Value::Null` when the body is not JSON.
    pub async fn send<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        headers: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<(StatusCode, Value), Box<dyn Error>> {
        let mut request = self.client.request(method, self.path(endpoint));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        Ok((status, serde_json::from_str(&text).unwrap_or(Value::Null)))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        bearer: &str,
    ) -> Result<T, Box<dyn Error>> {
        let response = self
            .client
            .get(self.path(endpoint))
            .bearer_auth(bearer)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Box<dyn Error>> {
        let response = self
            .client
            .post(self.path(endpoint))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn admin<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        api_token: &str,
        body: Option<&B>,
    ) -> Result<T, Box<dyn Error>> {
        let mut request = self
            .client
            .request(method, self.path(endpoint))
            .header(API_TOKEN_HEADER, api_token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

use std::borrow::Cow;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::OpenRxError;

const OPENPRESCRIBING_BASE: &str = "https://openprescribing.net/api/1.0";
const OPENPRESCRIBING_API: &str = "openprescribing";
const OPENPRESCRIBING_BASE_ENV: &str = "OPENRX_API_BASE";

pub struct OpenPrescribingClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
}

impl OpenPrescribingClient {
    pub fn new() -> Result<Self, OpenRxError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(OPENPRESCRIBING_BASE, OPENPRESCRIBING_BASE_ENV),
        })
    }

    #[cfg(test)]
    fn new_for_test(base: String) -> Result<Self, OpenRxError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: Cow::Owned(base),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, OpenRxError> {
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(OpenRxError::Api {
                api: OPENPRESCRIBING_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| OpenRxError::ApiJson {
            api: OPENPRESCRIBING_API.to_string(),
            source,
        })
    }

    /// Resolves a 9-character BNF chemical code to its canonical name.
    ///
    /// The length check runs before any request goes out. An exact-match
    /// query returns at most one element; an empty array means the code is
    /// unknown to OpenPrescribing.
    pub async fn chemical_name(&self, code: &str) -> Result<String, OpenRxError> {
        if !crate::sources::is_valid_chemical_code(code) {
            return Err(OpenRxError::InvalidArgument(
                "chemical code must be exactly 9 characters".into(),
            ));
        }

        let url = self.endpoint("bnf_code");
        debug!(code, "looking up chemical name");
        let matches: Vec<BnfCodeMatch> = self
            .get_json(
                self.client
                    .get(&url)
                    .query(&[("q", code), ("exact", "true"), ("format", "json")]),
            )
            .await?;

        let Some(found) = matches.into_iter().next() else {
            return Err(OpenRxError::NotFound {
                entity: "chemical".to_string(),
                id: code.to_string(),
                suggestion: "Browse codes at https://openprescribing.net/bnf/".to_string(),
            });
        };

        Ok(found.name)
    }

    /// Fetches spending on a chemical aggregated by Integrated Care Board,
    /// one row per board per month.
    pub async fn spending_by_icb(&self, code: &str) -> Result<Vec<SpendingRow>, OpenRxError> {
        let url = self.endpoint("spending_by_org/");
        debug!(code, "fetching ICB spending");
        self.get_json(
            self.client
                .get(&url)
                .query(&[("code", code), ("format", "json"), ("org_type", "icb")]),
        )
        .await
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BnfCodeMatch {
    pub name: String,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpendingRow {
    pub date: String,
    pub row_name: String,
    pub items: u64,
    pub quantity: Option<f64>,
    pub actual_cost: Option<f64>,
    pub row_id: Option<String>,
}

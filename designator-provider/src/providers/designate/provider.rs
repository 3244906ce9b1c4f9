//! Designate DnsProvider 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{CreateRecordSetRequest, RecordSet, RecordSetQuery, Zone};

use super::types::{RecordSetsResponse, ZonesResponse};
use super::{DesignateProvider, MAX_PAGES};

#[async_trait]
impl DnsProvider for DesignateProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut zones = Vec::new();
        let mut next = Some(self.url("/zones"));

        for _ in 0..MAX_PAGES {
            let Some(url) = next.take() else {
                log::debug!("Listed {} zones", zones.len());
                return Ok(zones);
            };
            let page: ZonesResponse = self.get_url(&url, ErrorContext::default()).await?;
            zones.extend(page.zones);
            next = page.links.next;
        }

        Err(self.too_many_pages("/zones"))
    }

    async fn list_recordsets(
        &self,
        zone_id: &str,
        query: &RecordSetQuery,
    ) -> Result<Vec<RecordSet>> {
        let ctx = ErrorContext {
            zone: Some(zone_id.to_string()),
            record_name: query.name.clone(),
            ..Default::default()
        };
        let mut recordsets = Vec::new();
        let mut path = format!("/zones/{zone_id}/recordsets");
        let query_string = query.to_query_string();
        if !query_string.is_empty() {
            path.push('?');
            path.push_str(&query_string);
        }
        let mut next = Some(self.url(&path));

        for _ in 0..MAX_PAGES {
            let Some(url) = next.take() else {
                log::debug!("Listed {} recordsets in zone {zone_id}", recordsets.len());
                return Ok(recordsets);
            };
            let page: RecordSetsResponse = self.get_url(&url, ctx.clone()).await?;
            recordsets.extend(page.recordsets);
            next = page.links.next;
        }

        Err(self.too_many_pages(&format!("/zones/{zone_id}/recordsets")))
    }

    async fn create_recordset(
        &self,
        zone_id: &str,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet> {
        let ctx = ErrorContext {
            zone: Some(zone_id.to_string()),
            record_name: Some(request.name.clone()),
            ..Default::default()
        };
        self.post(&format!("/zones/{zone_id}/recordsets"), request, ctx)
            .await
    }

    async fn delete_recordset(&self, zone_id: &str, recordset_id: &str) -> Result<()> {
        let ctx = ErrorContext {
            zone: Some(zone_id.to_string()),
            record_id: Some(recordset_id.to_string()),
            ..Default::default()
        };
        self.delete(&format!("/zones/{zone_id}/recordsets/{recordset_id}"), ctx)
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::error::ProviderError;
    use crate::session::Session;
    use crate::types::RecordType;

    fn provider(server: &MockServer) -> DesignateProvider {
        DesignateProvider::new(Session::from_token(
            Client::new(),
            "tok",
            &server.uri(),
            &server.uri(),
        ))
    }

    fn recordset(id: &str, name: &str, ip: &str) -> serde_json::Value {
        json!({
            "id": id,
            "zone_id": "z1",
            "zone_name": "example.com.",
            "name": name,
            "type": "A",
            "records": [ip],
            "ttl": null,
            "description": "managed-by: designator",
            "status": "ACTIVE",
            "action": "NONE"
        })
    }

    #[tokio::test]
    async fn test_list_recordsets_follows_pagination() {
        let server = MockServer::start().await;
        let next = format!("{}/v2/zones/z1/recordsets?type=A&marker=r1", server.uri());

        Mock::given(method("GET"))
            .and(path("/v2/zones/z1/recordsets"))
            .and(query_param("marker", "r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recordsets": [recordset("r2", "db.example.com.", "10.0.0.2")],
                "links": {"self": "ignored"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/zones/z1/recordsets"))
            .and(query_param("type", "A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recordsets": [recordset("r1", "web.example.com.", "10.0.0.1")],
                "links": {"self": "ignored", "next": next}
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let recordsets = provider(&server)
            .list_recordsets("z1", &RecordSetQuery::by_type(RecordType::A))
            .await
            .unwrap();
        let names: Vec<_> = recordsets.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["web.example.com.", "db.example.com."]);
    }

    #[tokio::test]
    async fn test_list_all_recordsets_sends_no_type_filter() {
        let server = MockServer::start().await;
        let mut cname = recordset("r2", "mail.example.com.", "mx.other.org.");
        cname["type"] = json!("CNAME");
        cname["description"] = json!(null);

        Mock::given(method("GET"))
            .and(path("/v2/zones/z1/recordsets"))
            .and(query_param_is_missing("type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recordsets": [recordset("r1", "web.example.com.", "10.0.0.1"), cname],
                "links": {"self": "ignored"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recordsets = provider(&server)
            .list_recordsets("z1", &RecordSetQuery::all())
            .await
            .unwrap();
        let types: Vec<_> = recordsets.iter().map(|r| r.record_type.as_str()).collect();
        assert_eq!(types, vec!["A", "CNAME"]);
    }

    #[tokio::test]
    async fn test_create_recordset() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/zones/z1/recordsets"))
            .and(body_json(json!({
                "name": "web.example.com.",
                "type": "A",
                "records": ["10.0.0.1"],
                "description": "managed-by: designator"
            })))
            .respond_with(
                ResponseTemplate::new(202)
                    .set_body_json(recordset("r1", "web.example.com.", "10.0.0.1")),
            )
            .mount(&server)
            .await;

        let request = CreateRecordSetRequest {
            name: "web.example.com.".to_string(),
            record_type: RecordType::A,
            records: vec!["10.0.0.1".to_string()],
            ttl: None,
            description: Some("managed-by: designator".to_string()),
        };
        let created = provider(&server)
            .create_recordset("z1", &request)
            .await
            .unwrap();
        assert_eq!(created.id, "r1");
    }

    #[tokio::test]
    async fn test_create_duplicate_maps_to_record_exists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/zones/z1/recordsets"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": 409, "type": "duplicate_recordset", "message": "Duplicate RecordSet"
            })))
            .mount(&server)
            .await;

        let request = CreateRecordSetRequest {
            name: "web.example.com.".to_string(),
            record_type: RecordType::A,
            records: vec!["10.0.0.1".to_string()],
            ttl: Some(300),
            description: None,
        };
        let err = provider(&server)
            .create_recordset("z1", &request)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RecordExists { ref record_name, .. } if record_name == "web.example.com."
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_recordset() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/zones/z1/recordsets/r9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": 404, "type": "recordset_not_found", "message": "Could not find RecordSet"
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .delete_recordset("z1", "r9")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RecordNotFound { ref record_id, .. } if record_id == "r9"
        ));
    }

    #[tokio::test]
    async fn test_list_zones() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "zones": [
                    {"id": "z1", "name": "example.com.", "status": "ACTIVE"},
                    {"id": "z2", "name": "0.10.in-addr.arpa.", "status": "ACTIVE"}
                ],
                "links": {"self": "ignored"}
            })))
            .mount(&server)
            .await;

        let zones = provider(&server).list_zones().await.unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[1].name, "0.10.in-addr.arpa.");
    }
}
